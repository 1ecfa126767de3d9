use crate::{Blob, Clob, Result, ResultSet, SqlArray, SqlObject, SqlRef};
use rust_decimal::Decimal;
use std::{fmt::Display, future::Future, io::Read, sync::Arc, time::Duration};
use time::{Date, PrimitiveDateTime, Time, UtcOffset};
use url::Url;

/// Byte or character stream handed to the stream setters.
pub type Stream = Box<dyn Read + Send>;

/// SQL type codes, numbered like the `java.sql.Types` constants so that the
/// codes logged by sqlpeek match the ones found in driver documentation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SqlType {
    Bit,
    TinyInt,
    SmallInt,
    Integer,
    BigInt,
    Float,
    Real,
    Double,
    Numeric,
    Decimal,
    Char,
    Varchar,
    LongVarchar,
    Date,
    Time,
    Timestamp,
    Binary,
    VarBinary,
    LongVarBinary,
    Null,
    Other,
    JavaObject,
    Distinct,
    Struct,
    Array,
    Blob,
    Clob,
    Ref,
    DataLink,
    Boolean,
    NChar,
    NVarchar,
    NClob,
    TimeWithTimezone,
    TimestampWithTimezone,
}

impl SqlType {
    pub const fn code(&self) -> i32 {
        match self {
            SqlType::Bit => -7,
            SqlType::TinyInt => -6,
            SqlType::SmallInt => 5,
            SqlType::Integer => 4,
            SqlType::BigInt => -5,
            SqlType::Float => 6,
            SqlType::Real => 7,
            SqlType::Double => 8,
            SqlType::Numeric => 2,
            SqlType::Decimal => 3,
            SqlType::Char => 1,
            SqlType::Varchar => 12,
            SqlType::LongVarchar => -1,
            SqlType::Date => 91,
            SqlType::Time => 92,
            SqlType::Timestamp => 93,
            SqlType::Binary => -2,
            SqlType::VarBinary => -3,
            SqlType::LongVarBinary => -4,
            SqlType::Null => 0,
            SqlType::Other => 1111,
            SqlType::JavaObject => 2000,
            SqlType::Distinct => 2001,
            SqlType::Struct => 2002,
            SqlType::Array => 2003,
            SqlType::Blob => 2004,
            SqlType::Clob => 2005,
            SqlType::Ref => 2006,
            SqlType::DataLink => 70,
            SqlType::Boolean => 16,
            SqlType::NChar => -15,
            SqlType::NVarchar => -9,
            SqlType::NClob => 2011,
            SqlType::TimeWithTimezone => 2013,
            SqlType::TimestampWithTimezone => 2014,
        }
    }
}

/// Auto generated keys requested by the `*_with_keys` execute variants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GeneratedKeys {
    Return,
    NoReturn,
    /// 1-based column indexes.
    ColumnIndexes(Vec<usize>),
    ColumnNames(Vec<String>),
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum FetchDirection {
    #[default]
    Forward,
    Reverse,
    Unknown,
}

/// A statement prepared against a [`crate::Connection`], with positional
/// parameters addressed from 1.
///
/// Execution is asynchronous, everything else is a plain call. Parameters
/// stay bound across executions until replaced or cleared.
///
/// `Display` renders something useful for logging, drivers typically show the
/// SQL text while [`crate::DebuggableStatement`] shows it with the bound values.
pub trait PreparedStatement: Send + Display {
    /// Run the statement, `true` when it produced a result set.
    fn execute(&mut self) -> impl Future<Output = Result<bool>> + Send;
    fn execute_query(&mut self) -> impl Future<Output = Result<ResultSet>> + Send;
    /// Number of rows affected.
    fn execute_update(&mut self) -> impl Future<Output = Result<u64>> + Send;
    /// Run every parameter set queued with `add_batch`, then clear the batch.
    fn execute_batch(&mut self) -> impl Future<Output = Result<Vec<u64>>> + Send;
    /// Run `sql` on the statement's connection, ignoring the bound parameters.
    fn execute_sql(&mut self, sql: &str) -> impl Future<Output = Result<bool>> + Send;
    fn execute_query_sql(&mut self, sql: &str) -> impl Future<Output = Result<ResultSet>> + Send;
    fn execute_update_sql(&mut self, sql: &str) -> impl Future<Output = Result<u64>> + Send;
    fn execute_sql_with_keys(
        &mut self,
        sql: &str,
        keys: GeneratedKeys,
    ) -> impl Future<Output = Result<bool>> + Send;
    fn execute_update_sql_with_keys(
        &mut self,
        sql: &str,
        keys: GeneratedKeys,
    ) -> impl Future<Output = Result<u64>> + Send;

    fn set_null(&mut self, index: usize, sql_type: SqlType) -> Result<()>;
    /// Null of a user defined or reference type.
    fn set_null_with_type_name(
        &mut self,
        index: usize,
        sql_type: SqlType,
        type_name: &str,
    ) -> Result<()>;
    fn set_boolean(&mut self, index: usize, value: bool) -> Result<()>;
    fn set_byte(&mut self, index: usize, value: i8) -> Result<()>;
    fn set_short(&mut self, index: usize, value: i16) -> Result<()>;
    fn set_int(&mut self, index: usize, value: i32) -> Result<()>;
    fn set_long(&mut self, index: usize, value: i64) -> Result<()>;
    fn set_float(&mut self, index: usize, value: f32) -> Result<()>;
    fn set_double(&mut self, index: usize, value: f64) -> Result<()>;
    fn set_decimal(&mut self, index: usize, value: Decimal) -> Result<()>;
    fn set_string(&mut self, index: usize, value: &str) -> Result<()>;
    fn set_nstring(&mut self, index: usize, value: &str) -> Result<()>;
    /// `None` binds a null.
    fn set_bytes(&mut self, index: usize, value: Option<&[u8]>) -> Result<()>;
    fn set_date(&mut self, index: usize, value: Date) -> Result<()>;
    fn set_time(&mut self, index: usize, value: Time) -> Result<()>;
    fn set_timestamp(&mut self, index: usize, value: PrimitiveDateTime) -> Result<()>;
    /// Date interpreted in the zone identified by `offset`.
    fn set_date_with_offset(&mut self, index: usize, value: Date, offset: UtcOffset)
    -> Result<()>;
    fn set_time_with_offset(&mut self, index: usize, value: Time, offset: UtcOffset)
    -> Result<()>;
    fn set_timestamp_with_offset(
        &mut self,
        index: usize,
        value: PrimitiveDateTime,
        offset: UtcOffset,
    ) -> Result<()>;
    /// `length` is the number of bytes to read, `None` reads to the end.
    fn set_ascii_stream(
        &mut self,
        index: usize,
        stream: Option<Stream>,
        length: Option<u64>,
    ) -> Result<()>;
    fn set_binary_stream(
        &mut self,
        index: usize,
        stream: Option<Stream>,
        length: Option<u64>,
    ) -> Result<()>;
    /// `length` is the number of characters to read, `None` reads to the end.
    fn set_character_stream(
        &mut self,
        index: usize,
        stream: Option<Stream>,
        length: Option<u64>,
    ) -> Result<()>;
    fn set_blob(&mut self, index: usize, value: Arc<dyn Blob>) -> Result<()>;
    fn set_clob(&mut self, index: usize, value: Arc<dyn Clob>) -> Result<()>;
    fn set_array(&mut self, index: usize, value: Arc<dyn SqlArray>) -> Result<()>;
    fn set_ref(&mut self, index: usize, value: Arc<dyn SqlRef>) -> Result<()>;
    fn set_url(&mut self, index: usize, value: &Url) -> Result<()>;
    /// `None` binds a null.
    fn set_object(&mut self, index: usize, value: Option<SqlObject>) -> Result<()>;
    fn set_object_with_type(
        &mut self,
        index: usize,
        value: Option<SqlObject>,
        sql_type: SqlType,
    ) -> Result<()>;
    /// `scale` is the number of digits after the decimal point for numeric types.
    fn set_object_with_scale(
        &mut self,
        index: usize,
        value: Option<SqlObject>,
        sql_type: SqlType,
        scale: u32,
    ) -> Result<()>;
    fn clear_parameters(&mut self) -> Result<()>;

    /// Queue the current parameters for `execute_batch`.
    fn add_batch(&mut self) -> Result<()>;
    fn add_batch_sql(&mut self, sql: &str) -> Result<()>;
    fn clear_batch(&mut self) -> Result<()>;
    /// Abort the running execution, if any.
    fn cancel(&mut self) -> Result<()>;
    fn warnings(&self) -> Result<Vec<String>>;
    fn clear_warnings(&mut self) -> Result<()>;
    fn close(&mut self) -> Result<()>;
    fn is_closed(&self) -> bool;
    fn fetch_direction(&self) -> Result<FetchDirection>;
    fn set_fetch_direction(&mut self, direction: FetchDirection) -> Result<()>;
    fn fetch_size(&self) -> Result<u32>;
    fn set_fetch_size(&mut self, rows: u32) -> Result<()>;
    /// Limit in bytes for character and binary columns, `0` means unlimited.
    fn max_field_size(&self) -> Result<usize>;
    fn set_max_field_size(&mut self, max: usize) -> Result<()>;
    /// Limit on the number of rows returned, `0` means unlimited.
    fn max_rows(&self) -> Result<u64>;
    fn set_max_rows(&mut self, max: u64) -> Result<()>;
    fn query_timeout(&self) -> Result<Duration>;
    fn set_query_timeout(&mut self, timeout: Duration) -> Result<()>;
    fn more_results(&mut self) -> Result<bool>;
    /// Result set of the last execution, if it produced one that was not consumed yet.
    fn result_set(&mut self) -> Result<Option<ResultSet>>;
    /// Rows affected by the last execution, `None` when it produced a result set.
    fn update_count(&self) -> Result<Option<u64>>;
    fn generated_keys(&mut self) -> Result<ResultSet>;
    /// Column labels of the result set this statement produces.
    fn metadata(&self) -> Result<Vec<String>>;
    /// Number of parameters as reported by the driver.
    fn parameter_count(&self) -> Result<usize>;
    fn set_cursor_name(&mut self, name: &str) -> Result<()>;
    fn set_escape_processing(&mut self, enable: bool) -> Result<()>;
    fn is_poolable(&self) -> Result<bool>;
    fn set_poolable(&mut self, poolable: bool) -> Result<()>;
    fn is_close_on_completion(&self) -> Result<bool>;
    fn close_on_completion(&mut self) -> Result<()>;
}
