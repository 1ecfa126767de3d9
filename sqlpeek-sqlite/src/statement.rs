use crate::{
    CBox, connection::prepare,
    extract::{extract_name, extract_value},
    sqlite_error,
};
use libsqlite3_sys::*;
use rust_decimal::{Decimal, prelude::ToPrimitive};
use sqlpeek_core::{
    AsValue, BaseSqlFormatter, Blob, Clob, Context, Error, FetchDirection, GeneratedKeys,
    PreparedStatement, Result, ResultSet, Row, RowNames, SqlArray, SqlObject, SqlRef, SqlType,
    StatementError, Stream, Value, truncate_long,
};
use std::{
    ffi::c_int,
    fmt::{self, Display},
    future::Future,
    io::Read,
    mem,
    os::raw::{c_char, c_void},
    sync::Arc,
    time::Duration,
};
use time::{Date, OffsetDateTime, PrimitiveDateTime, Time, UtcOffset};
use url::Url;

/// Parameter value in the storage classes sqlite knows about.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Binding {
    #[default]
    Null,
    Integer(i64),
    Real(f64),
    Text(String),
    Blob(Vec<u8>),
}

impl Binding {
    /// Storage class of `value`, temporal values are stored as ISO 8601 text.
    pub fn from_value(value: &Value) -> Result<Self> {
        Ok(match value {
            Value::Null => Binding::Null,
            Value::Boolean(v) => Binding::Integer(*v as i64),
            Value::Int8(v) => Binding::Integer(*v as i64),
            Value::Int16(v) => Binding::Integer(*v as i64),
            Value::Int32(v) => Binding::Integer(*v as i64),
            Value::Int64(v) => Binding::Integer(*v),
            Value::Float32(v) => Binding::Real(*v as f64),
            Value::Float64(v) => Binding::Real(*v),
            Value::Decimal(v) => Binding::Real(v.to_f64().ok_or_else(|| {
                Error::msg(format!("Cannot convert the Decimal value `{}` to f64", v))
            })?),
            Value::Varchar(v) => Binding::Text(v.clone()),
            Value::Date(..) | Value::Time(..) | Value::Timestamp(..) | Value::Calendar(..) => {
                let mut out = String::new();
                BaseSqlFormatter::new().write_value_plain(&mut out, value);
                Binding::Text(out)
            }
            Value::Blob(v) => Binding::Blob(v.bytes()?),
            Value::Clob(v) => Binding::Text(v.content()?),
            Value::Array(..) => return Err(unsupported("arrays")),
            Value::Ref(..) => return Err(unsupported("structured references")),
        })
    }

    fn bind(&self, statement: *mut sqlite3_stmt, index: c_int) -> c_int {
        unsafe {
            match self {
                Binding::Null => sqlite3_bind_null(statement, index),
                Binding::Integer(v) => sqlite3_bind_int64(statement, index, *v),
                Binding::Real(v) => sqlite3_bind_double(statement, index, *v),
                Binding::Text(v) => sqlite3_bind_text(
                    statement,
                    index,
                    v.as_ptr() as *const c_char,
                    v.len() as c_int,
                    SQLITE_TRANSIENT(),
                ),
                Binding::Blob(v) => sqlite3_bind_blob(
                    statement,
                    index,
                    v.as_ptr() as *const c_void,
                    v.len() as c_int,
                    SQLITE_TRANSIENT(),
                ),
            }
        }
    }
}

fn unsupported(feature: &'static str) -> Error {
    let error = Error::new(StatementError::Unsupported(feature)).context("SQLite driver");
    log::error!("{:#}", error);
    error
}

#[derive(Debug, Clone)]
enum Batched {
    Parameters(Box<[Binding]>),
    Sql(String),
}

#[derive(Debug, Clone)]
struct Options {
    fetch_direction: FetchDirection,
    fetch_size: u32,
    max_field_size: usize,
    max_rows: u64,
    query_timeout: Duration,
    cursor_name: Option<String>,
    escape_processing: bool,
    poolable: bool,
    close_on_completion: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            fetch_direction: FetchDirection::Forward,
            fetch_size: 0,
            max_field_size: 0,
            max_rows: 0,
            query_timeout: Duration::ZERO,
            cursor_name: None,
            escape_processing: true,
            poolable: true,
            close_on_completion: false,
        }
    }
}

/// Statement prepared on a [`crate::SqliteConnection`].
///
/// Parameters are kept on the Rust side and bound right before each execution.
pub struct SqliteStatement {
    // Declared before `connection`, finalized first
    statement: Option<CBox<*mut sqlite3_stmt>>,
    connection: Arc<CBox<*mut sqlite3>>,
    sql: String,
    bindings: Box<[Binding]>,
    batch: Vec<Batched>,
    current: Option<ResultSet>,
    update_count: Option<u64>,
    generated_key: Option<i64>,
    options: Options,
}

impl SqliteStatement {
    pub(crate) fn new(
        connection: Arc<CBox<*mut sqlite3>>,
        statement: CBox<*mut sqlite3_stmt>,
        sql: String,
    ) -> Self {
        let count = unsafe { sqlite3_bind_parameter_count(*statement) } as usize;
        Self {
            statement: Some(statement),
            connection,
            sql,
            bindings: vec![Binding::Null; count].into_boxed_slice(),
            batch: Vec::new(),
            current: None,
            update_count: None,
            generated_key: None,
            options: Default::default(),
        }
    }

    pub fn sql(&self) -> &str {
        &self.sql
    }

    /// Parameters that will be bound on the next execution.
    pub fn bindings(&self) -> &[Binding] {
        &self.bindings
    }

    pub fn cursor_name(&self) -> Option<&str> {
        self.options.cursor_name.as_deref()
    }

    pub fn escape_processing(&self) -> bool {
        self.options.escape_processing
    }

    fn handle(&self) -> Result<*mut sqlite3_stmt> {
        match &self.statement {
            Some(v) => Ok(**v),
            None => {
                let error = Error::msg("The statement is closed")
                    .context(format!("In:\n{}", truncate_long!(self.sql)));
                log::error!("{:#}", error);
                Err(error)
            }
        }
    }

    fn set(&mut self, index: usize, binding: Binding) -> Result<()> {
        self.handle()?;
        let count = self.bindings.len();
        if index == 0 || index > count {
            let error = Error::new(StatementError::ParameterIndexOutOfBounds { index, count });
            log::error!("{:#}\nIn:\n{}", error, truncate_long!(self.sql));
            return Err(error);
        }
        self.bindings[index - 1] = binding;
        Ok(())
    }

    fn set_value(&mut self, index: usize, value: Value) -> Result<()> {
        let binding = Binding::from_value(&value)?;
        self.set(index, binding)
    }

    fn bind_all(&self, statement: *mut sqlite3_stmt, bindings: &[Binding]) -> Result<()> {
        unsafe {
            sqlite3_reset(statement);
            sqlite3_clear_bindings(statement);
        }
        for (i, binding) in bindings.iter().enumerate() {
            if binding.bind(statement, i as c_int + 1) != SQLITE_OK {
                let error = sqlite_error(**self.connection).context(format!(
                    "Cannot bind parameter {} to query:\n{}",
                    i + 1,
                    truncate_long!(self.sql)
                ));
                log::error!("{:#}", error);
                return Err(error);
            }
        }
        Ok(())
    }

    /// Step `statement` to completion, rows are collected when it has columns.
    fn run(&self, statement: *mut sqlite3_stmt, sql: &str) -> Result<Option<ResultSet>> {
        let options = &self.options;
        unsafe {
            let count = sqlite3_column_count(statement);
            let labels = (0..count)
                .map(|i| extract_name(statement, i))
                .collect::<Result<RowNames>>()?;
            let mut rows = Vec::new();
            let result = loop {
                match sqlite3_step(statement) {
                    SQLITE_DONE => break Ok(()),
                    SQLITE_ROW => {
                        if options.max_rows != 0 && rows.len() as u64 >= options.max_rows {
                            continue;
                        }
                        match (0..count)
                            .map(|i| extract_value(statement, i, options.max_field_size))
                            .collect::<Result<Row>>()
                        {
                            Ok(row) => rows.push(row),
                            Err(e) => break Err(e),
                        }
                    }
                    _ => {
                        break Err(sqlite_error(**self.connection)
                            .context(format!("While executing:\n{}", truncate_long!(sql))));
                    }
                }
            };
            sqlite3_reset(statement);
            if let Err(e) = result {
                log::error!("{:#}", e);
                return Err(e);
            }
            Ok((count > 0).then(|| ResultSet::new(labels, rows)))
        }
    }

    fn changes(&self) -> u64 {
        unsafe { sqlite3_changes64(**self.connection) as u64 }
    }

    fn record(&mut self, result: Option<ResultSet>) -> bool {
        self.generated_key = None;
        match result {
            Some(v) => {
                self.current = Some(v);
                self.update_count = None;
                true
            }
            None => {
                self.current = None;
                self.update_count = Some(self.changes());
                false
            }
        }
    }

    fn execute_prepared(&mut self) -> Result<bool> {
        let statement = self.handle()?;
        self.bind_all(statement, &self.bindings)?;
        let result = self.run(statement, &self.sql)?;
        Ok(self.record(result))
    }

    fn execute_other(&mut self, sql: &str) -> Result<bool> {
        self.handle()?;
        let statement = prepare(**self.connection, sql)?;
        let result = self.run(*statement, sql)?;
        Ok(self.record(result))
    }

    fn take_result_set(&mut self, produced: bool, sql: &str) -> Result<ResultSet> {
        match self.current.take() {
            Some(v) if produced => {
                if self.options.close_on_completion {
                    self.close()?;
                }
                Ok(v)
            }
            _ => {
                let error = Error::msg("The statement did not produce a result set")
                    .context(format!("While executing:\n{}", truncate_long!(sql)));
                log::error!("{:#}", error);
                Err(error)
            }
        }
    }

    fn take_update_count(&mut self, produced: bool, sql: &str) -> Result<u64> {
        match self.update_count {
            Some(v) if !produced => Ok(v),
            _ => {
                self.current = None;
                let error = Error::msg("The statement produced a result set")
                    .context(format!("While executing:\n{}", truncate_long!(sql)));
                log::error!("{:#}", error);
                Err(error)
            }
        }
    }

    fn request_keys(&mut self, keys: &GeneratedKeys) {
        self.generated_key = match keys {
            GeneratedKeys::NoReturn => None,
            _ => Some(unsafe { sqlite3_last_insert_rowid(**self.connection) }),
        };
    }

    fn read_stream(stream: Option<Stream>, length: Option<u64>) -> Result<Option<Vec<u8>>> {
        let Some(mut stream) = stream else {
            return Ok(None);
        };
        let mut buffer = Vec::new();
        match length {
            Some(length) => stream.take(length).read_to_end(&mut buffer),
            None => stream.read_to_end(&mut buffer),
        }
        .context("While reading the parameter stream")?;
        Ok(Some(buffer))
    }

    fn object_value(object: &SqlObject) -> Result<Value> {
        macro_rules! downcast {
            ($($ty:ty),+ $(,)?) => {
                $(
                    if let Some(v) = object.downcast_ref::<$ty>() {
                        return Ok(v.clone().as_value());
                    }
                )+
            };
        }
        if let Some(v) = object.downcast_ref::<Value>() {
            return Ok(v.clone());
        }
        if let Some(v) = object.downcast_ref::<&'static str>() {
            return Ok(Value::Varchar(v.to_string()));
        }
        downcast!(
            bool,
            i8,
            i16,
            i32,
            i64,
            f32,
            f64,
            Decimal,
            String,
            Vec<u8>,
            Date,
            Time,
            PrimitiveDateTime,
            OffsetDateTime,
        );
        let error = Error::new(StatementError::Unsupported("object type"))
            .context(format!("Cannot bind a `{}`", object.type_name()));
        log::error!("{:#}", error);
        Err(error)
    }

    fn set_object_value(
        &mut self,
        index: usize,
        value: Option<SqlObject>,
        scale: Option<u32>,
    ) -> Result<()> {
        let mut value = match value {
            Some(v) => Self::object_value(&v)?,
            None => Value::Null,
        };
        if let (Value::Decimal(v), Some(scale)) = (&mut value, scale) {
            *v = v.round_dp(scale);
        }
        self.set_value(index, value)
    }
}

impl Display for SqliteStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.sql)
    }
}

impl PreparedStatement for SqliteStatement {
    fn execute(&mut self) -> impl Future<Output = Result<bool>> + Send {
        async move { self.execute_prepared() }
    }

    fn execute_query(&mut self) -> impl Future<Output = Result<ResultSet>> + Send {
        async move {
            let produced = self.execute_prepared()?;
            let sql = self.sql.clone();
            self.take_result_set(produced, &sql)
        }
    }

    fn execute_update(&mut self) -> impl Future<Output = Result<u64>> + Send {
        async move {
            let produced = self.execute_prepared()?;
            let sql = self.sql.clone();
            self.take_update_count(produced, &sql)
        }
    }

    fn execute_batch(&mut self) -> impl Future<Output = Result<Vec<u64>>> + Send {
        async move {
            let statement = self.handle()?;
            let batch = mem::take(&mut self.batch);
            let mut counts = Vec::with_capacity(batch.len());
            for item in batch {
                match item {
                    Batched::Parameters(bindings) => {
                        self.bind_all(statement, &bindings)?;
                        self.run(statement, &self.sql)?;
                    }
                    Batched::Sql(sql) => {
                        let other = prepare(**self.connection, &sql)?;
                        self.run(*other, &sql)?;
                    }
                }
                counts.push(self.changes());
            }
            self.current = None;
            self.update_count = None;
            Ok(counts)
        }
    }

    fn execute_sql(&mut self, sql: &str) -> impl Future<Output = Result<bool>> + Send {
        async move { self.execute_other(sql) }
    }

    fn execute_query_sql(&mut self, sql: &str) -> impl Future<Output = Result<ResultSet>> + Send {
        async move {
            let produced = self.execute_other(sql)?;
            self.take_result_set(produced, sql)
        }
    }

    fn execute_update_sql(&mut self, sql: &str) -> impl Future<Output = Result<u64>> + Send {
        async move {
            let produced = self.execute_other(sql)?;
            self.take_update_count(produced, sql)
        }
    }

    fn execute_sql_with_keys(
        &mut self,
        sql: &str,
        keys: GeneratedKeys,
    ) -> impl Future<Output = Result<bool>> + Send {
        async move {
            let produced = self.execute_other(sql)?;
            self.request_keys(&keys);
            Ok(produced)
        }
    }

    fn execute_update_sql_with_keys(
        &mut self,
        sql: &str,
        keys: GeneratedKeys,
    ) -> impl Future<Output = Result<u64>> + Send {
        async move {
            let produced = self.execute_other(sql)?;
            let count = self.take_update_count(produced, sql)?;
            self.request_keys(&keys);
            Ok(count)
        }
    }

    fn set_null(&mut self, index: usize, _sql_type: SqlType) -> Result<()> {
        self.set(index, Binding::Null)
    }

    fn set_null_with_type_name(
        &mut self,
        index: usize,
        _sql_type: SqlType,
        _type_name: &str,
    ) -> Result<()> {
        self.set(index, Binding::Null)
    }

    fn set_boolean(&mut self, index: usize, value: bool) -> Result<()> {
        self.set(index, Binding::Integer(value as i64))
    }

    fn set_byte(&mut self, index: usize, value: i8) -> Result<()> {
        self.set(index, Binding::Integer(value as i64))
    }

    fn set_short(&mut self, index: usize, value: i16) -> Result<()> {
        self.set(index, Binding::Integer(value as i64))
    }

    fn set_int(&mut self, index: usize, value: i32) -> Result<()> {
        self.set(index, Binding::Integer(value as i64))
    }

    fn set_long(&mut self, index: usize, value: i64) -> Result<()> {
        self.set(index, Binding::Integer(value))
    }

    fn set_float(&mut self, index: usize, value: f32) -> Result<()> {
        self.set(index, Binding::Real(value as f64))
    }

    fn set_double(&mut self, index: usize, value: f64) -> Result<()> {
        self.set(index, Binding::Real(value))
    }

    fn set_decimal(&mut self, index: usize, value: Decimal) -> Result<()> {
        self.set_value(index, Value::Decimal(value))
    }

    fn set_string(&mut self, index: usize, value: &str) -> Result<()> {
        self.set(index, Binding::Text(value.into()))
    }

    fn set_nstring(&mut self, index: usize, value: &str) -> Result<()> {
        self.set(index, Binding::Text(value.into()))
    }

    fn set_bytes(&mut self, index: usize, value: Option<&[u8]>) -> Result<()> {
        self.set(
            index,
            value.map_or(Binding::Null, |v| Binding::Blob(v.to_vec())),
        )
    }

    fn set_date(&mut self, index: usize, value: Date) -> Result<()> {
        self.set_value(index, Value::Date(value))
    }

    fn set_time(&mut self, index: usize, value: Time) -> Result<()> {
        self.set_value(index, Value::Time(value))
    }

    fn set_timestamp(&mut self, index: usize, value: PrimitiveDateTime) -> Result<()> {
        self.set_value(index, Value::Timestamp(value))
    }

    fn set_date_with_offset(
        &mut self,
        index: usize,
        value: Date,
        offset: UtcOffset,
    ) -> Result<()> {
        self.set_value(
            index,
            Value::Calendar(value.midnight().assume_offset(offset)),
        )
    }

    fn set_time_with_offset(
        &mut self,
        index: usize,
        value: Time,
        offset: UtcOffset,
    ) -> Result<()> {
        self.set_value(
            index,
            Value::Calendar(
                PrimitiveDateTime::new(OffsetDateTime::UNIX_EPOCH.date(), value)
                    .assume_offset(offset),
            ),
        )
    }

    fn set_timestamp_with_offset(
        &mut self,
        index: usize,
        value: PrimitiveDateTime,
        offset: UtcOffset,
    ) -> Result<()> {
        self.set_value(index, Value::Calendar(value.assume_offset(offset)))
    }

    fn set_ascii_stream(
        &mut self,
        index: usize,
        stream: Option<Stream>,
        length: Option<u64>,
    ) -> Result<()> {
        let binding = match Self::read_stream(stream, length)? {
            Some(v) => Binding::Text(String::from_utf8_lossy(&v).into_owned()),
            None => Binding::Null,
        };
        self.set(index, binding)
    }

    fn set_binary_stream(
        &mut self,
        index: usize,
        stream: Option<Stream>,
        length: Option<u64>,
    ) -> Result<()> {
        let binding = match Self::read_stream(stream, length)? {
            Some(v) => Binding::Blob(v),
            None => Binding::Null,
        };
        self.set(index, binding)
    }

    fn set_character_stream(
        &mut self,
        index: usize,
        stream: Option<Stream>,
        length: Option<u64>,
    ) -> Result<()> {
        let binding = match Self::read_stream(stream, None)? {
            Some(v) => {
                let text = String::from_utf8_lossy(&v);
                Binding::Text(match length {
                    Some(length) => text.chars().take(length as usize).collect(),
                    None => text.into_owned(),
                })
            }
            None => Binding::Null,
        };
        self.set(index, binding)
    }

    fn set_blob(&mut self, index: usize, value: Arc<dyn Blob>) -> Result<()> {
        self.set_value(index, Value::Blob(value))
    }

    fn set_clob(&mut self, index: usize, value: Arc<dyn Clob>) -> Result<()> {
        self.set_value(index, Value::Clob(value))
    }

    fn set_array(&mut self, _index: usize, _value: Arc<dyn SqlArray>) -> Result<()> {
        Err(unsupported("arrays"))
    }

    fn set_ref(&mut self, _index: usize, _value: Arc<dyn SqlRef>) -> Result<()> {
        Err(unsupported("structured references"))
    }

    fn set_url(&mut self, index: usize, value: &Url) -> Result<()> {
        self.set(index, Binding::Text(value.as_str().into()))
    }

    fn set_object(&mut self, index: usize, value: Option<SqlObject>) -> Result<()> {
        self.set_object_value(index, value, None)
    }

    fn set_object_with_type(
        &mut self,
        index: usize,
        value: Option<SqlObject>,
        _sql_type: SqlType,
    ) -> Result<()> {
        self.set_object_value(index, value, None)
    }

    fn set_object_with_scale(
        &mut self,
        index: usize,
        value: Option<SqlObject>,
        sql_type: SqlType,
        scale: u32,
    ) -> Result<()> {
        let scale = matches!(sql_type, SqlType::Decimal | SqlType::Numeric).then_some(scale);
        self.set_object_value(index, value, scale)
    }

    fn clear_parameters(&mut self) -> Result<()> {
        self.handle()?;
        self.bindings.fill(Binding::Null);
        Ok(())
    }

    fn add_batch(&mut self) -> Result<()> {
        self.handle()?;
        self.batch.push(Batched::Parameters(self.bindings.clone()));
        Ok(())
    }

    fn add_batch_sql(&mut self, sql: &str) -> Result<()> {
        self.handle()?;
        self.batch.push(Batched::Sql(sql.into()));
        Ok(())
    }

    fn clear_batch(&mut self) -> Result<()> {
        self.batch.clear();
        Ok(())
    }

    fn cancel(&mut self) -> Result<()> {
        unsafe { sqlite3_interrupt(**self.connection) };
        Ok(())
    }

    fn warnings(&self) -> Result<Vec<String>> {
        self.handle()?;
        Ok(Vec::new())
    }

    fn clear_warnings(&mut self) -> Result<()> {
        Ok(())
    }

    fn close(&mut self) -> Result<()> {
        self.statement = None;
        self.current = None;
        self.batch.clear();
        Ok(())
    }

    fn is_closed(&self) -> bool {
        self.statement.is_none()
    }

    fn fetch_direction(&self) -> Result<FetchDirection> {
        Ok(self.options.fetch_direction)
    }

    fn set_fetch_direction(&mut self, direction: FetchDirection) -> Result<()> {
        self.options.fetch_direction = direction;
        Ok(())
    }

    fn fetch_size(&self) -> Result<u32> {
        Ok(self.options.fetch_size)
    }

    fn set_fetch_size(&mut self, rows: u32) -> Result<()> {
        self.options.fetch_size = rows;
        Ok(())
    }

    fn max_field_size(&self) -> Result<usize> {
        Ok(self.options.max_field_size)
    }

    fn set_max_field_size(&mut self, max: usize) -> Result<()> {
        self.options.max_field_size = max;
        Ok(())
    }

    fn max_rows(&self) -> Result<u64> {
        Ok(self.options.max_rows)
    }

    fn set_max_rows(&mut self, max: u64) -> Result<()> {
        self.options.max_rows = max;
        Ok(())
    }

    fn query_timeout(&self) -> Result<Duration> {
        Ok(self.options.query_timeout)
    }

    /// Applied as the busy timeout of the whole connection.
    fn set_query_timeout(&mut self, timeout: Duration) -> Result<()> {
        let millis = timeout.as_millis().min(c_int::MAX as u128) as c_int;
        if unsafe { sqlite3_busy_timeout(**self.connection, millis) } != SQLITE_OK {
            let error = sqlite_error(**self.connection).context("While setting the busy timeout");
            log::error!("{:#}", error);
            return Err(error);
        }
        self.options.query_timeout = timeout;
        Ok(())
    }

    fn more_results(&mut self) -> Result<bool> {
        self.current = None;
        self.update_count = None;
        Ok(false)
    }

    fn result_set(&mut self) -> Result<Option<ResultSet>> {
        Ok(self.current.take())
    }

    fn update_count(&self) -> Result<Option<u64>> {
        Ok(self.update_count)
    }

    fn generated_keys(&mut self) -> Result<ResultSet> {
        Ok(ResultSet::new(
            Arc::new(["rowid".to_string()]),
            self.generated_key
                .map(|v| Box::new([Value::Int64(v)]) as Row)
                .into_iter()
                .collect(),
        ))
    }

    fn metadata(&self) -> Result<Vec<String>> {
        let statement = self.handle()?;
        let count = unsafe { sqlite3_column_count(statement) };
        (0..count).map(|i| extract_name(statement, i)).collect()
    }

    fn parameter_count(&self) -> Result<usize> {
        let statement = self.handle()?;
        Ok(unsafe { sqlite3_bind_parameter_count(statement) } as usize)
    }

    fn set_cursor_name(&mut self, name: &str) -> Result<()> {
        self.options.cursor_name = Some(name.into());
        Ok(())
    }

    fn set_escape_processing(&mut self, enable: bool) -> Result<()> {
        self.options.escape_processing = enable;
        Ok(())
    }

    fn is_poolable(&self) -> Result<bool> {
        Ok(self.options.poolable)
    }

    fn set_poolable(&mut self, poolable: bool) -> Result<()> {
        self.options.poolable = poolable;
        Ok(())
    }

    fn is_close_on_completion(&self) -> Result<bool> {
        Ok(self.options.close_on_completion)
    }

    fn close_on_completion(&mut self) -> Result<()> {
        self.options.close_on_completion = true;
        Ok(())
    }
}
