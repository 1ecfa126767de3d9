use crate::{
    BaseSqlFormatter, Result, SqlFormatter, Value, write_date, write_fraction, write_time,
    write_timestamp,
};
use std::{fmt::Write, sync::Arc};
use time::{Date, OffsetDateTime, PrimitiveDateTime, Time};

const YMD24: &str = "'YYYY-MM-DD HH24:MI:SS'";

fn base() -> Arc<dyn SqlFormatter> {
    Arc::new(BaseSqlFormatter::new())
}

/// Rendering used when the database product is not recognized.
#[derive(Debug, Clone)]
pub struct DefaultSqlFormatter {
    base: Arc<dyn SqlFormatter>,
}

impl DefaultSqlFormatter {
    pub fn new(base: Arc<dyn SqlFormatter>) -> Self {
        Self { base }
    }

    /// `TO_DATE('2024-01-15 00:00:00.0','YYYY-MM-DD HH24:MI:SS')`
    pub fn write_value_date(&self, out: &mut String, value: &Date) {
        self.write_value_calendar_like(out, &value.midnight());
    }

    /// `TO_DATE('9:5:3','HH24:MI:SS')`, calendar fields are not padded.
    pub fn write_value_time(&self, out: &mut String, value: &Time) {
        let _ = write!(
            out,
            "TO_DATE('{}:{}:{}','HH24:MI:SS')",
            value.hour(),
            value.minute(),
            value.second()
        );
    }

    /// `TO_TIMESTAMP('2024-01-15 10:30:45.5','YYYY-MM-DD HH24:MI:SS:FF')`
    pub fn write_value_timestamp(&self, out: &mut String, value: &PrimitiveDateTime) {
        out.push_str("TO_TIMESTAMP('");
        write_timestamp(out, value);
        out.push_str("','YYYY-MM-DD HH24:MI:SS:FF')");
    }

    pub fn write_value_calendar(&self, out: &mut String, value: &OffsetDateTime) {
        self.write_value_calendar_like(out, &PrimitiveDateTime::new(value.date(), value.time()));
    }

    fn write_value_calendar_like(&self, out: &mut String, value: &PrimitiveDateTime) {
        out.push_str("TO_DATE('");
        write_timestamp(out, value);
        let _ = write!(out, "',{})", YMD24);
    }
}

impl Default for DefaultSqlFormatter {
    fn default() -> Self {
        Self::new(base())
    }
}

impl SqlFormatter for DefaultSqlFormatter {
    fn write_value(&self, out: &mut String, value: &Value) -> Result<()> {
        match value {
            Value::Null => out.push_str("NULL"),
            Value::Date(v) => self.write_value_date(out, v),
            Value::Time(v) => self.write_value_time(out, v),
            Value::Timestamp(v) => self.write_value_timestamp(out, v),
            Value::Calendar(v) => self.write_value_calendar(out, v),
            _ => return self.base.write_value(out, value),
        }
        Ok(())
    }
}

/// Oracle style rendering: every temporal value goes through a conversion
/// function with an explicit format mask.
#[derive(Debug, Clone)]
pub struct OracleSqlFormatter {
    base: Arc<dyn SqlFormatter>,
}

impl OracleSqlFormatter {
    pub fn new(base: Arc<dyn SqlFormatter>) -> Self {
        Self { base }
    }

    /// `TO_DATE('2024-01-15 00:00:00','YYYY-MM-DD HH24:MI:SS')`
    pub fn write_value_date(&self, out: &mut String, value: &Date) {
        self.write_value_date_time(out, value, &Time::MIDNIGHT);
    }

    /// `TO_DATE('09:05:03','HH24:MI:SS')`
    pub fn write_value_time(&self, out: &mut String, value: &Time) {
        out.push_str("TO_DATE('");
        write_time(out, value);
        out.push_str("','HH24:MI:SS')");
    }

    /// `TO_TIMESTAMP('2024-01-15 10:30:45.123','YYYY-MM-DD HH24:MI:SS.FF')`
    pub fn write_value_timestamp(&self, out: &mut String, value: &PrimitiveDateTime) {
        out.push_str("TO_TIMESTAMP('");
        write_date(out, &value.date());
        out.push(' ');
        write_time(out, &value.time());
        write_fraction(out, value.nanosecond());
        out.push_str("','YYYY-MM-DD HH24:MI:SS.FF')");
    }

    pub fn write_value_calendar(&self, out: &mut String, value: &OffsetDateTime) {
        self.write_value_date_time(out, &value.date(), &value.time());
    }

    fn write_value_date_time(&self, out: &mut String, date: &Date, time: &Time) {
        out.push_str("TO_DATE('");
        write_date(out, date);
        out.push(' ');
        write_time(out, time);
        let _ = write!(out, "',{})", YMD24);
    }
}

impl Default for OracleSqlFormatter {
    fn default() -> Self {
        Self::new(base())
    }
}

impl SqlFormatter for OracleSqlFormatter {
    fn write_value(&self, out: &mut String, value: &Value) -> Result<()> {
        match value {
            Value::Null => out.push_str("NULL"),
            Value::Date(v) => self.write_value_date(out, v),
            Value::Time(v) => self.write_value_time(out, v),
            Value::Timestamp(v) => self.write_value_timestamp(out, v),
            Value::Calendar(v) => self.write_value_calendar(out, v),
            _ => return self.base.write_value(out, value),
        }
        Ok(())
    }
}

/// DB2 style rendering: one constructor function per temporal type.
#[derive(Debug, Clone)]
pub struct Db2SqlFormatter {
    base: Arc<dyn SqlFormatter>,
}

impl Db2SqlFormatter {
    pub fn new(base: Arc<dyn SqlFormatter>) -> Self {
        Self { base }
    }

    /// `DATE('2024-01-15')`
    pub fn write_value_date(&self, out: &mut String, value: &Date) {
        out.push_str("DATE('");
        write_date(out, value);
        out.push_str("')");
    }

    /// `TIME('10:30:45')`
    pub fn write_value_time(&self, out: &mut String, value: &Time) {
        out.push_str("TIME('");
        write_time(out, value);
        out.push_str("')");
    }

    /// `TIMESTAMP('2024-01-15 10:30:45')`
    pub fn write_value_timestamp(&self, out: &mut String, value: &PrimitiveDateTime) {
        out.push_str("TIMESTAMP('");
        write_date(out, &value.date());
        out.push(' ');
        write_time(out, &value.time());
        out.push_str("')");
    }
}

impl Default for Db2SqlFormatter {
    fn default() -> Self {
        Self::new(base())
    }
}

impl SqlFormatter for Db2SqlFormatter {
    fn write_value(&self, out: &mut String, value: &Value) -> Result<()> {
        match value {
            Value::Null => out.push_str("NULL"),
            // Calendars keep only their date
            Value::Calendar(v) => self.write_value_date(out, &v.date()),
            Value::Date(v) => self.write_value_date(out, v),
            Value::Time(v) => self.write_value_time(out, v),
            Value::Timestamp(v) => self.write_value_timestamp(out, v),
            _ => return self.base.write_value(out, value),
        }
        Ok(())
    }
}
