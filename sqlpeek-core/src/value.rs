use crate::Result;
use rust_decimal::Decimal;
use std::{
    any::Any,
    fmt::{self, Debug},
    sync::Arc,
};
use time::{Date, OffsetDateTime, PrimitiveDateTime, Time};

/// Runtime value bound to a statement parameter or read back from a row.
///
/// Large objects, arrays and structured references are carried as shared
/// handles: formatting only inspects their metadata, the content is read by the
/// driver when it binds them.
#[derive(Default, Clone)]
pub enum Value {
    #[default]
    Null,
    Boolean(bool),
    Int8(i8),
    Int16(i16),
    Int32(i32),
    Int64(i64),
    Float32(f32),
    Float64(f64),
    Decimal(Decimal),
    Varchar(String),
    Date(Date),
    Time(Time),
    Timestamp(PrimitiveDateTime),
    /// Zone qualified temporal value, produced by the calendar aware setters.
    Calendar(OffsetDateTime),
    Blob(Arc<dyn Blob>),
    Clob(Arc<dyn Clob>),
    Array(Arc<dyn SqlArray>),
    Ref(Arc<dyn SqlRef>),
}

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Name of the variant, used in diagnostics.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "NULL",
            Value::Boolean(..) => "BOOLEAN",
            Value::Int8(..) => "TINYINT",
            Value::Int16(..) => "SMALLINT",
            Value::Int32(..) => "INTEGER",
            Value::Int64(..) => "BIGINT",
            Value::Float32(..) => "REAL",
            Value::Float64(..) => "DOUBLE",
            Value::Decimal(..) => "DECIMAL",
            Value::Varchar(..) => "VARCHAR",
            Value::Date(..) => "DATE",
            Value::Time(..) => "TIME",
            Value::Timestamp(..) => "TIMESTAMP",
            Value::Calendar(..) => "TIMESTAMP WITH TIME ZONE",
            Value::Blob(..) => "BLOB",
            Value::Clob(..) => "CLOB",
            Value::Array(..) => "ARRAY",
            Value::Ref(..) => "REF",
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Null, Self::Null) => true,
            (Self::Boolean(l), Self::Boolean(r)) => l == r,
            (Self::Int8(l), Self::Int8(r)) => l == r,
            (Self::Int16(l), Self::Int16(r)) => l == r,
            (Self::Int32(l), Self::Int32(r)) => l == r,
            (Self::Int64(l), Self::Int64(r)) => l == r,
            (Self::Float32(l), Self::Float32(r)) => l == r,
            (Self::Float64(l), Self::Float64(r)) => l == r,
            (Self::Decimal(l), Self::Decimal(r)) => l == r,
            (Self::Varchar(l), Self::Varchar(r)) => l == r,
            (Self::Date(l), Self::Date(r)) => l == r,
            (Self::Time(l), Self::Time(r)) => l == r,
            (Self::Timestamp(l), Self::Timestamp(r)) => l == r,
            (Self::Calendar(l), Self::Calendar(r)) => l == r,
            // Handles are equal only when they are the very same object
            (Self::Blob(l), Self::Blob(r)) => Arc::ptr_eq(l, r),
            (Self::Clob(l), Self::Clob(r)) => Arc::ptr_eq(l, r),
            (Self::Array(l), Self::Array(r)) => Arc::ptr_eq(l, r),
            (Self::Ref(l), Self::Ref(r)) => Arc::ptr_eq(l, r),
            _ => false,
        }
    }
}

impl Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("Null"),
            Value::Boolean(v) => f.debug_tuple("Boolean").field(v).finish(),
            Value::Int8(v) => f.debug_tuple("Int8").field(v).finish(),
            Value::Int16(v) => f.debug_tuple("Int16").field(v).finish(),
            Value::Int32(v) => f.debug_tuple("Int32").field(v).finish(),
            Value::Int64(v) => f.debug_tuple("Int64").field(v).finish(),
            Value::Float32(v) => f.debug_tuple("Float32").field(v).finish(),
            Value::Float64(v) => f.debug_tuple("Float64").field(v).finish(),
            Value::Decimal(v) => f.debug_tuple("Decimal").field(v).finish(),
            Value::Varchar(v) => f.debug_tuple("Varchar").field(v).finish(),
            Value::Date(v) => f.debug_tuple("Date").field(v).finish(),
            Value::Time(v) => f.debug_tuple("Time").field(v).finish(),
            Value::Timestamp(v) => f.debug_tuple("Timestamp").field(v).finish(),
            Value::Calendar(v) => f.debug_tuple("Calendar").field(v).finish(),
            Value::Blob(v) => f.debug_tuple("Blob").field(v).finish(),
            Value::Clob(v) => f.debug_tuple("Clob").field(v).finish(),
            Value::Array(v) => f.debug_tuple("Array").field(v).finish(),
            Value::Ref(v) => f.debug_tuple("Ref").field(v).finish(),
        }
    }
}

/// Binary large object handle.
pub trait Blob: Send + Sync + Debug {
    /// Length in bytes.
    fn length(&self) -> Result<u64>;
    fn bytes(&self) -> Result<Vec<u8>>;
}

/// Character large object handle.
pub trait Clob: Send + Sync + Debug {
    /// Length in characters.
    fn length(&self) -> Result<u64>;
    fn content(&self) -> Result<String>;
}

/// Database array handle.
pub trait SqlArray: Send + Sync + Debug {
    /// SQL type name of the elements.
    fn base_type_name(&self) -> Result<String>;
    fn elements(&self) -> Result<Vec<Value>>;
}

/// Reference to a structured (user defined) database value.
pub trait SqlRef: Send + Sync + Debug {
    /// SQL type name of the referenced value.
    fn base_type_name(&self) -> Result<String>;
    fn value(&self) -> Result<Value>;
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryBlob(pub Vec<u8>);

impl Blob for MemoryBlob {
    fn length(&self) -> Result<u64> {
        Ok(self.0.len() as u64)
    }
    fn bytes(&self) -> Result<Vec<u8>> {
        Ok(self.0.clone())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryClob(pub String);

impl Clob for MemoryClob {
    fn length(&self) -> Result<u64> {
        Ok(self.0.chars().count() as u64)
    }
    fn content(&self) -> Result<String> {
        Ok(self.0.clone())
    }
}

#[derive(Debug, Clone, Default)]
pub struct MemoryArray {
    pub base_type_name: String,
    pub elements: Vec<Value>,
}

impl MemoryArray {
    pub fn new(base_type_name: impl Into<String>, elements: Vec<Value>) -> Self {
        Self {
            base_type_name: base_type_name.into(),
            elements,
        }
    }
}

impl SqlArray for MemoryArray {
    fn base_type_name(&self) -> Result<String> {
        Ok(self.base_type_name.clone())
    }
    fn elements(&self) -> Result<Vec<Value>> {
        Ok(self.elements.clone())
    }
}

#[derive(Debug, Clone, Default)]
pub struct MemoryRef {
    pub base_type_name: String,
    pub value: Value,
}

impl MemoryRef {
    pub fn new(base_type_name: impl Into<String>, value: Value) -> Self {
        Self {
            base_type_name: base_type_name.into(),
            value,
        }
    }
}

impl SqlRef for MemoryRef {
    fn base_type_name(&self) -> Result<String> {
        Ok(self.base_type_name.clone())
    }
    fn value(&self) -> Result<Value> {
        Ok(self.value.clone())
    }
}

/// Arbitrary value handed to the `set_object` family.
///
/// The concrete SQL representation is up to the driver, so it travels type
/// erased together with the name of its Rust type.
pub struct SqlObject {
    type_name: &'static str,
    value: Box<dyn Any + Send + Sync>,
}

impl SqlObject {
    pub fn new<T: Any + Send + Sync>(value: T) -> Self {
        Self {
            type_name: std::any::type_name::<T>(),
            value: Box::new(value),
        }
    }

    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.value.downcast_ref::<T>()
    }

    pub fn is<T: Any>(&self) -> bool {
        self.value.is::<T>()
    }
}

impl Debug for SqlObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SqlObject")
            .field("type_name", &self.type_name)
            .finish_non_exhaustive()
    }
}
