use crate::{
    Blob, Clob, Context, Result, SqlArray, SqlRef, StatementError, Value, write_date,
    write_fraction, write_offset, write_time, write_timestamp,
};
use std::fmt::{Debug, Write};

/// Renders runtime values as the SQL literal text a human would paste into a
/// query tool to reproduce the bound value.
///
/// Dialect formatters override the temporal values they know about and hand
/// everything else to a delegate, typically a [`BaseSqlFormatter`].
pub trait SqlFormatter: Send + Sync + Debug {
    /// Append the literal for `value` to `out`.
    ///
    /// Fails only when inspecting a handle fails (for example reading the
    /// length of a broken large object).
    fn write_value(&self, out: &mut String, value: &Value) -> Result<()>;

    fn format(&self, value: &Value) -> Result<String> {
        let mut out = String::new();
        self.write_value(&mut out, value)?;
        Ok(out)
    }
}

/// Dialect independent rendering.
///
/// Large objects, arrays and references render as informational text only, it
/// is not meant to be replayed against the database. Strings are quoted but
/// embedded quotes are NOT escaped, `O'Brien` renders as `'O'Brien'`.
#[derive(Debug, Default, Clone, Copy)]
pub struct BaseSqlFormatter {}

impl BaseSqlFormatter {
    pub const fn new() -> Self {
        Self {}
    }

    pub fn write_value_null(&self, out: &mut String) {
        out.push_str("NULL");
    }

    pub fn write_value_blob(&self, out: &mut String, value: &dyn Blob) -> Result<()> {
        let length = value
            .length()
            .context(StatementError::Format("cannot read the blob length".into()))?;
        let _ = write!(out, "'<Blob length = {}>'", length);
        Ok(())
    }

    pub fn write_value_clob(&self, out: &mut String, value: &dyn Clob) -> Result<()> {
        let length = value
            .length()
            .context(StatementError::Format("cannot read the clob length".into()))?;
        let _ = write!(out, "'<Clob length = {}>'", length);
        Ok(())
    }

    pub fn write_value_array(&self, out: &mut String, value: &dyn SqlArray) -> Result<()> {
        let name = value.base_type_name().context(StatementError::Format(
            "cannot read the array base type name".into(),
        ))?;
        out.push_str(&name);
        Ok(())
    }

    pub fn write_value_ref(&self, out: &mut String, value: &dyn SqlRef) -> Result<()> {
        let name = value.base_type_name().context(StatementError::Format(
            "cannot read the reference base type name".into(),
        ))?;
        out.push_str(&name);
        Ok(())
    }

    pub fn write_value_string(&self, out: &mut String, value: &str) {
        out.push('\'');
        out.push_str(value);
        out.push('\'');
    }

    /// Default textual form of everything that has no literal of its own.
    pub fn write_value_plain(&self, out: &mut String, value: &Value) {
        match value {
            Value::Boolean(v) => out.push_str(["false", "true"][*v as usize]),
            Value::Int8(v) => drop(write!(out, "{}", v)),
            Value::Int16(v) => drop(write!(out, "{}", v)),
            Value::Int32(v) => drop(write!(out, "{}", v)),
            Value::Int64(v) => drop(write!(out, "{}", v)),
            Value::Float32(v) => drop(write!(out, "{}", v)),
            Value::Float64(v) => drop(write!(out, "{}", v)),
            Value::Decimal(v) => drop(write!(out, "{}", v)),
            Value::Date(v) => write_date(out, v),
            Value::Time(v) => {
                write_time(out, v);
                if v.nanosecond() != 0 {
                    write_fraction(out, v.nanosecond());
                }
            }
            Value::Timestamp(v) => write_timestamp(out, v),
            Value::Calendar(v) => {
                write_date(out, &v.date());
                out.push(' ');
                write_time(out, &v.time());
                write_fraction(out, v.nanosecond());
                write_offset(out, &v.offset());
            }
            _ => drop(write!(out, "{:?}", value)),
        }
    }
}

impl SqlFormatter for BaseSqlFormatter {
    fn write_value(&self, out: &mut String, value: &Value) -> Result<()> {
        match value {
            Value::Null => self.write_value_null(out),
            Value::Blob(v) => self.write_value_blob(out, v.as_ref())?,
            Value::Clob(v) => self.write_value_clob(out, v.as_ref())?,
            Value::Array(v) => self.write_value_array(out, v.as_ref())?,
            Value::Ref(v) => self.write_value_ref(out, v.as_ref())?,
            Value::Varchar(v) => self.write_value_string(out, v),
            _ => self.write_value_plain(out, value),
        }
        Ok(())
    }
}
