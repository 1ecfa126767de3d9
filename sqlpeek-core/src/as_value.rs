use crate::{Error, MemoryBlob, MemoryClob, Result, Value};
use rust_decimal::{Decimal, prelude::FromPrimitive, prelude::ToPrimitive};
use std::{any, sync::Arc};
use time::{Date, OffsetDateTime, PrimitiveDateTime, Time};

/// Conversion between native Rust types and the dynamically typed [`Value`].
///
/// Used to bind parameters generically and to decode the cells of a
/// [`ResultSet`](crate::ResultSet).
///
/// ```rust
/// use sqlpeek_core::{AsValue, Value};
/// let v = 42i32.as_value();
/// assert_eq!(v, Value::Int32(42));
/// let n: i64 = AsValue::try_from_value(v).unwrap();
/// assert_eq!(n, 42);
/// ```
pub trait AsValue {
    /// Convert this value into its owned [`Value`] representation.
    fn as_value(self) -> Value;
    /// Attempt to convert a dynamic [`Value`] into `Self`.
    ///
    /// Accepts the canonical variant for the type and, for numbers, the other
    /// integer widths after a range check.
    fn try_from_value(value: Value) -> Result<Self>
    where
        Self: Sized;
}

impl<T: AsValue> From<T> for Value {
    fn from(value: T) -> Self {
        value.as_value()
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Varchar(value.into())
    }
}

fn conversion_error<T>(value: &Value) -> Error {
    Error::msg(format!(
        "Cannot convert {:?} to {}",
        value,
        any::type_name::<T>()
    ))
}

macro_rules! impl_as_value_integer {
    ($source:ty, $destination:path) => {
        impl AsValue for $source {
            fn as_value(self) -> Value {
                $destination(self)
            }
            fn try_from_value(value: Value) -> Result<Self> {
                let wide: i128 = match value {
                    Value::Int8(v) => v as _,
                    Value::Int16(v) => v as _,
                    Value::Int32(v) => v as _,
                    Value::Int64(v) => v as _,
                    Value::Boolean(v) => v as _,
                    Value::Decimal(v) if v.is_integer() => v
                        .to_i128()
                        .ok_or_else(|| Error::msg(format!("Value {v}: Decimal does not fit into i128")))?,
                    _ => return Err(conversion_error::<Self>(&value)),
                };
                <$source>::try_from(wide).map_err(|_| {
                    Error::msg(format!(
                        "Value {wide} is out of range for {}",
                        any::type_name::<Self>(),
                    ))
                })
            }
        }
    };
}
impl_as_value_integer!(i8, Value::Int8);
impl_as_value_integer!(i16, Value::Int16);
impl_as_value_integer!(i32, Value::Int32);
impl_as_value_integer!(i64, Value::Int64);

impl AsValue for bool {
    fn as_value(self) -> Value {
        Value::Boolean(self)
    }
    fn try_from_value(value: Value) -> Result<Self> {
        match value {
            Value::Boolean(v) => Ok(v),
            Value::Int8(v) => Ok(v != 0),
            Value::Int16(v) => Ok(v != 0),
            Value::Int32(v) => Ok(v != 0),
            Value::Int64(v) => Ok(v != 0),
            _ => Err(conversion_error::<Self>(&value)),
        }
    }
}

impl AsValue for f32 {
    fn as_value(self) -> Value {
        Value::Float32(self)
    }
    fn try_from_value(value: Value) -> Result<Self> {
        match value {
            Value::Float32(v) => Ok(v),
            Value::Float64(v) => Ok(v as f32),
            Value::Int64(v) => Ok(v as f32),
            Value::Int32(v) => Ok(v as f32),
            _ => Err(conversion_error::<Self>(&value)),
        }
    }
}

impl AsValue for f64 {
    fn as_value(self) -> Value {
        Value::Float64(self)
    }
    fn try_from_value(value: Value) -> Result<Self> {
        match value {
            Value::Float64(v) => Ok(v),
            Value::Float32(v) => Ok(v as f64),
            Value::Int64(v) => Ok(v as f64),
            Value::Int32(v) => Ok(v as f64),
            Value::Decimal(v) => v
                .to_f64()
                .ok_or_else(|| Error::msg(format!("Value {v}: Decimal does not fit into f64"))),
            _ => Err(conversion_error::<Self>(&value)),
        }
    }
}

impl AsValue for Decimal {
    fn as_value(self) -> Value {
        Value::Decimal(self)
    }
    fn try_from_value(value: Value) -> Result<Self> {
        match value {
            Value::Decimal(v) => Ok(v),
            Value::Int64(v) => Ok(v.into()),
            Value::Int32(v) => Ok(v.into()),
            Value::Float64(v) => Decimal::from_f64(v)
                .ok_or_else(|| Error::msg(format!("Value {v}: f64 does not fit into Decimal"))),
            Value::Varchar(ref v) => v
                .parse()
                .map_err(|e| Error::new(e).context(format!("Cannot parse `{v}` as Decimal"))),
            _ => Err(conversion_error::<Self>(&value)),
        }
    }
}

impl AsValue for String {
    fn as_value(self) -> Value {
        Value::Varchar(self)
    }
    fn try_from_value(value: Value) -> Result<Self> {
        match value {
            Value::Varchar(v) => Ok(v),
            Value::Clob(v) => v.content(),
            _ => Err(conversion_error::<Self>(&value)),
        }
    }
}

impl AsValue for Vec<u8> {
    fn as_value(self) -> Value {
        Value::Blob(Arc::new(MemoryBlob(self)))
    }
    fn try_from_value(value: Value) -> Result<Self> {
        match value {
            Value::Blob(v) => v.bytes(),
            Value::Varchar(v) => Ok(v.into_bytes()),
            _ => Err(conversion_error::<Self>(&value)),
        }
    }
}

impl AsValue for MemoryClob {
    fn as_value(self) -> Value {
        Value::Clob(Arc::new(self))
    }
    fn try_from_value(value: Value) -> Result<Self> {
        match value {
            Value::Clob(v) => Ok(MemoryClob(v.content()?)),
            Value::Varchar(v) => Ok(MemoryClob(v)),
            _ => Err(conversion_error::<Self>(&value)),
        }
    }
}

macro_rules! impl_as_value_temporal {
    ($source:ty, $destination:path) => {
        impl AsValue for $source {
            fn as_value(self) -> Value {
                $destination(self)
            }
            fn try_from_value(value: Value) -> Result<Self> {
                match value {
                    $destination(v) => Ok(v),
                    _ => Err(conversion_error::<Self>(&value)),
                }
            }
        }
    };
}
impl_as_value_temporal!(Date, Value::Date);
impl_as_value_temporal!(Time, Value::Time);
impl_as_value_temporal!(PrimitiveDateTime, Value::Timestamp);
impl_as_value_temporal!(OffsetDateTime, Value::Calendar);

impl<T: AsValue> AsValue for Option<T> {
    fn as_value(self) -> Value {
        match self {
            Some(v) => v.as_value(),
            None => Value::Null,
        }
    }
    fn try_from_value(value: Value) -> Result<Self> {
        if value.is_null() {
            return Ok(None);
        }
        T::try_from_value(value).map(Some)
    }
}
