use crate::{
    Blob, Clob, Connection, DebugLevel, Error, FetchDirection, FilteredSql, GeneratedKeys,
    PreparedStatement, Result, ResultSet, SqlArray, SqlFormatter, SqlObject, SqlRef, SqlType,
    StatementError, Stream, Value, truncate_long,
};
use rust_decimal::Decimal;
use std::{
    fmt::{self, Display, Write},
    future::Future,
    sync::Arc,
    time::{Duration, Instant},
};
use time::{Date, OffsetDateTime, PrimitiveDateTime, Time, UtcOffset};
use url::Url;

/// Value captured for one positional parameter.
#[derive(Debug, Clone, PartialEq)]
pub struct BoundParameter {
    index: usize,
    value: Option<Value>,
}

impl BoundParameter {
    /// 1-based position.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Captured value, `None` until the parameter is set.
    pub fn value(&self) -> Option<&Value> {
        self.value.as_ref()
    }

    pub fn is_set(&self) -> bool {
        self.value.is_some()
    }
}

/// Prepared statement proxy that remembers the bound parameters in order to
/// show the SQL the way it is executed by the database.
///
/// Every call is forwarded to the wrapped statement, errors included. The
/// rendering is obtained through `Display`:
/// ```rust,ignore
/// let mut statement = DebuggableStatement::prepare(
///     &mut connection,
///     "SELECT DUMMY FROM DUAL WHERE DUMMY = ?",
///     registry.formatter_for(&connection)?,
///     DebugLevel::On,
/// )
/// .await?;
/// statement.set_string(1, "X")?;
/// assert_eq!(statement.render_sql(), "SELECT DUMMY FROM DUAL WHERE DUMMY = 'X'");
/// ```
pub struct DebuggableStatement<S: PreparedStatement> {
    statement: S,
    sql: String,
    filtered: FilteredSql,
    parameters: Box<[BoundParameter]>,
    debug_level: DebugLevel,
    formatter: Arc<dyn SqlFormatter>,
    elapsed: Option<Duration>,
}

macro_rules! timed {
    ($self:ident, $call:expr) => {{
        if $self.debug_level == DebugLevel::Verbose {
            let start = Instant::now();
            let result = $call.await;
            let elapsed = start.elapsed();
            $self.elapsed = Some(elapsed);
            log::debug!(
                "Executed in {} ms:\n{}",
                elapsed.as_millis(),
                truncate_long!($self.render_sql())
            );
            result
        } else {
            $call.await
        }
    }};
}

impl<S: PreparedStatement> DebuggableStatement<S> {
    /// Prepare `sql` on `connection` and wrap the resulting statement.
    ///
    /// `DebugLevel::Off` is treated like `On`, the proxy is being asked for
    /// explicitly.
    pub async fn prepare<C>(
        connection: &mut C,
        sql: &str,
        formatter: Arc<dyn SqlFormatter>,
        debug_level: DebugLevel,
    ) -> Result<Self>
    where
        C: Connection<Statement = S>,
    {
        if connection.is_closed() {
            let error = Error::new(StatementError::ConnectionClosed)
                .context(format!("While preparing:\n{}", truncate_long!(sql)));
            log::error!("{:#}", error);
            return Err(error);
        }
        let statement = match connection.prepare_statement(sql).await {
            Ok(v) => v,
            Err(e) => {
                log::error!("{:#}\nWhile preparing:\n{}", e, truncate_long!(sql));
                return Err(e);
            }
        };
        Ok(Self::new(statement, sql, formatter, debug_level))
    }

    /// Wrap a statement that was already prepared from `sql`.
    pub fn new(
        statement: S,
        sql: impl Into<String>,
        formatter: Arc<dyn SqlFormatter>,
        debug_level: DebugLevel,
    ) -> Self {
        let sql = sql.into();
        let filtered = FilteredSql::new(&sql);
        let count = filtered.placeholder_count();
        log::debug!(
            "{} placeholders found in:\n{}",
            count,
            truncate_long!(sql)
        );
        let parameters = (1..=count)
            .map(|index| BoundParameter { index, value: None })
            .collect();
        Self {
            statement,
            sql,
            filtered,
            parameters,
            debug_level,
            formatter,
            elapsed: None,
        }
    }

    /// The SQL text as it was prepared.
    pub fn sql(&self) -> &str {
        &self.sql
    }

    pub fn formatter(&self) -> &Arc<dyn SqlFormatter> {
        &self.formatter
    }

    /// Used from the next rendering on.
    pub fn set_formatter(&mut self, formatter: Arc<dyn SqlFormatter>) {
        self.formatter = formatter;
    }

    pub fn debug_level(&self) -> DebugLevel {
        self.debug_level
    }

    /// Number of placeholders found in the SQL text.
    pub fn placeholder_count(&self) -> usize {
        self.parameters.len()
    }

    pub fn parameters(&self) -> &[BoundParameter] {
        &self.parameters
    }

    /// Duration of the last execution, recorded only in verbose mode.
    pub fn elapsed(&self) -> Option<Duration> {
        self.elapsed
    }

    pub fn inner(&self) -> &S {
        &self.statement
    }

    pub fn inner_mut(&mut self) -> &mut S {
        &mut self.statement
    }

    pub fn into_inner(self) -> S {
        self.statement
    }

    /// The SQL text with every placeholder replaced by the literal of the
    /// value bound to it, or by `? (missing variable # n)` when unset.
    pub fn render_sql(&self) -> String {
        let mut out = String::with_capacity(self.sql.len() + self.parameters.len() * 16);
        let mut segments = self.filtered.segments();
        if let Some(first) = segments.next() {
            out.push_str(first);
        }
        for (parameter, segment) in self.parameters.iter().zip(segments) {
            match &parameter.value {
                Some(value) => {
                    let len = out.len();
                    if let Err(e) = self.formatter.write_value(&mut out, value) {
                        out.truncate(len);
                        let _ = write!(out, "<format error: {:#}>", e);
                    }
                }
                None => {
                    let _ = write!(out, "? (missing variable # {})", parameter.index);
                }
            }
            out.push_str(segment);
        }
        FilteredSql::unmask(&out)
    }

    fn check_index(&self, index: usize) -> Result<()> {
        let count = self.parameters.len();
        if index == 0 || index > count {
            let error = Error::new(StatementError::ParameterIndexOutOfBounds { index, count });
            log::error!("{:#}\nIn:\n{}", error, truncate_long!(self.sql));
            return Err(error);
        }
        Ok(())
    }

    fn save(&mut self, index: usize, value: Value) -> Result<()> {
        self.check_index(index)?;
        log::trace!("Parameter #{} = {:?}", index, value);
        self.parameters[index - 1].value = Some(value);
        Ok(())
    }

    fn save_stream(&mut self, index: usize, present: bool, length: Option<u64>) -> Result<()> {
        match (present, length) {
            (_, None) => self.check_index(index),
            (false, Some(..)) => self.save(index, Value::Null),
            (true, Some(length)) => {
                self.save(index, Value::Varchar(format!("<stream length= {}>", length)))
            }
        }
    }

    fn save_object(&mut self, index: usize, value: Option<&SqlObject>) -> Result<()> {
        let value = match value {
            Some(v) => Value::Varchar(v.type_name().into()),
            None => Value::Null,
        };
        self.save(index, value)
    }

    fn save_calendar(
        &mut self,
        index: usize,
        value: PrimitiveDateTime,
        offset: UtcOffset,
    ) -> Result<()> {
        self.save(index, Value::Calendar(value.assume_offset(offset)))
    }
}

impl<S: PreparedStatement> Display for DebuggableStatement<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render_sql())?;
        match self.elapsed {
            Some(elapsed) if !log::log_enabled!(log::Level::Debug) => write!(
                f,
                "\n\nquery executed in {} milliseconds\n",
                elapsed.as_millis()
            ),
            _ => Ok(()),
        }
    }
}

impl<S: PreparedStatement> PreparedStatement for DebuggableStatement<S> {
    fn execute(&mut self) -> impl Future<Output = Result<bool>> + Send {
        async move { timed!(self, self.statement.execute()) }
    }

    fn execute_query(&mut self) -> impl Future<Output = Result<ResultSet>> + Send {
        async move { timed!(self, self.statement.execute_query()) }
    }

    fn execute_update(&mut self) -> impl Future<Output = Result<u64>> + Send {
        async move { timed!(self, self.statement.execute_update()) }
    }

    fn execute_batch(&mut self) -> impl Future<Output = Result<Vec<u64>>> + Send {
        async move { timed!(self, self.statement.execute_batch()) }
    }

    fn execute_sql(&mut self, sql: &str) -> impl Future<Output = Result<bool>> + Send {
        async move { timed!(self, self.statement.execute_sql(sql)) }
    }

    fn execute_query_sql(&mut self, sql: &str) -> impl Future<Output = Result<ResultSet>> + Send {
        async move { timed!(self, self.statement.execute_query_sql(sql)) }
    }

    fn execute_update_sql(&mut self, sql: &str) -> impl Future<Output = Result<u64>> + Send {
        async move { timed!(self, self.statement.execute_update_sql(sql)) }
    }

    fn execute_sql_with_keys(
        &mut self,
        sql: &str,
        keys: GeneratedKeys,
    ) -> impl Future<Output = Result<bool>> + Send {
        self.statement.execute_sql_with_keys(sql, keys)
    }

    fn execute_update_sql_with_keys(
        &mut self,
        sql: &str,
        keys: GeneratedKeys,
    ) -> impl Future<Output = Result<u64>> + Send {
        self.statement.execute_update_sql_with_keys(sql, keys)
    }

    fn set_null(&mut self, index: usize, sql_type: SqlType) -> Result<()> {
        self.save(index, Value::Null)?;
        self.statement.set_null(index, sql_type)
    }

    fn set_null_with_type_name(
        &mut self,
        index: usize,
        sql_type: SqlType,
        type_name: &str,
    ) -> Result<()> {
        self.save(index, Value::Null)?;
        self.statement
            .set_null_with_type_name(index, sql_type, type_name)
    }

    fn set_boolean(&mut self, index: usize, value: bool) -> Result<()> {
        self.save(index, Value::Boolean(value))?;
        self.statement.set_boolean(index, value)
    }

    fn set_byte(&mut self, index: usize, value: i8) -> Result<()> {
        self.save(index, Value::Int8(value))?;
        self.statement.set_byte(index, value)
    }

    fn set_short(&mut self, index: usize, value: i16) -> Result<()> {
        self.save(index, Value::Int16(value))?;
        self.statement.set_short(index, value)
    }

    fn set_int(&mut self, index: usize, value: i32) -> Result<()> {
        self.save(index, Value::Int32(value))?;
        self.statement.set_int(index, value)
    }

    fn set_long(&mut self, index: usize, value: i64) -> Result<()> {
        self.save(index, Value::Int64(value))?;
        self.statement.set_long(index, value)
    }

    fn set_float(&mut self, index: usize, value: f32) -> Result<()> {
        self.save(index, Value::Float32(value))?;
        self.statement.set_float(index, value)
    }

    fn set_double(&mut self, index: usize, value: f64) -> Result<()> {
        self.save(index, Value::Float64(value))?;
        self.statement.set_double(index, value)
    }

    fn set_decimal(&mut self, index: usize, value: Decimal) -> Result<()> {
        self.save(index, Value::Decimal(value))?;
        self.statement.set_decimal(index, value)
    }

    fn set_string(&mut self, index: usize, value: &str) -> Result<()> {
        self.save(index, Value::Varchar(value.into()))?;
        self.statement.set_string(index, value)
    }

    fn set_nstring(&mut self, index: usize, value: &str) -> Result<()> {
        self.save(index, Value::Varchar(value.into()))?;
        self.statement.set_nstring(index, value)
    }

    fn set_bytes(&mut self, index: usize, value: Option<&[u8]>) -> Result<()> {
        let captured = match value {
            Some(v) => Value::Varchar(format!("byte[] length={}", v.len())),
            None => Value::Null,
        };
        self.save(index, captured)?;
        self.statement.set_bytes(index, value)
    }

    fn set_date(&mut self, index: usize, value: Date) -> Result<()> {
        self.save(index, Value::Date(value))?;
        self.statement.set_date(index, value)
    }

    fn set_time(&mut self, index: usize, value: Time) -> Result<()> {
        self.save(index, Value::Time(value))?;
        self.statement.set_time(index, value)
    }

    fn set_timestamp(&mut self, index: usize, value: PrimitiveDateTime) -> Result<()> {
        self.save(index, Value::Timestamp(value))?;
        self.statement.set_timestamp(index, value)
    }

    fn set_date_with_offset(
        &mut self,
        index: usize,
        value: Date,
        offset: UtcOffset,
    ) -> Result<()> {
        self.save_calendar(index, value.midnight(), offset)?;
        self.statement.set_date_with_offset(index, value, offset)
    }

    fn set_time_with_offset(
        &mut self,
        index: usize,
        value: Time,
        offset: UtcOffset,
    ) -> Result<()> {
        self.save_calendar(
            index,
            PrimitiveDateTime::new(OffsetDateTime::UNIX_EPOCH.date(), value),
            offset,
        )?;
        self.statement.set_time_with_offset(index, value, offset)
    }

    fn set_timestamp_with_offset(
        &mut self,
        index: usize,
        value: PrimitiveDateTime,
        offset: UtcOffset,
    ) -> Result<()> {
        self.save_calendar(index, value, offset)?;
        self.statement
            .set_timestamp_with_offset(index, value, offset)
    }

    fn set_ascii_stream(
        &mut self,
        index: usize,
        stream: Option<Stream>,
        length: Option<u64>,
    ) -> Result<()> {
        self.save_stream(index, stream.is_some(), length)?;
        self.statement.set_ascii_stream(index, stream, length)
    }

    fn set_binary_stream(
        &mut self,
        index: usize,
        stream: Option<Stream>,
        length: Option<u64>,
    ) -> Result<()> {
        self.save_stream(index, stream.is_some(), length)?;
        self.statement.set_binary_stream(index, stream, length)
    }

    fn set_character_stream(
        &mut self,
        index: usize,
        stream: Option<Stream>,
        length: Option<u64>,
    ) -> Result<()> {
        self.save_stream(index, stream.is_some(), length)?;
        self.statement.set_character_stream(index, stream, length)
    }

    fn set_blob(&mut self, index: usize, value: Arc<dyn Blob>) -> Result<()> {
        self.save(index, Value::Blob(value.clone()))?;
        self.statement.set_blob(index, value)
    }

    fn set_clob(&mut self, index: usize, value: Arc<dyn Clob>) -> Result<()> {
        self.save(index, Value::Clob(value.clone()))?;
        self.statement.set_clob(index, value)
    }

    fn set_array(&mut self, index: usize, value: Arc<dyn SqlArray>) -> Result<()> {
        self.save(index, Value::Array(value.clone()))?;
        self.statement.set_array(index, value)
    }

    fn set_ref(&mut self, index: usize, value: Arc<dyn SqlRef>) -> Result<()> {
        self.save(index, Value::Ref(value.clone()))?;
        self.statement.set_ref(index, value)
    }

    /// Not captured, the index is still checked here so a bad one never
    /// reaches the driver. Streams without a length behave the same.
    fn set_url(&mut self, index: usize, value: &Url) -> Result<()> {
        self.check_index(index)?;
        self.statement.set_url(index, value)
    }

    fn set_object(&mut self, index: usize, value: Option<SqlObject>) -> Result<()> {
        self.save_object(index, value.as_ref())?;
        self.statement.set_object(index, value)
    }

    fn set_object_with_type(
        &mut self,
        index: usize,
        value: Option<SqlObject>,
        sql_type: SqlType,
    ) -> Result<()> {
        self.save_object(index, value.as_ref())?;
        self.statement.set_object_with_type(index, value, sql_type)
    }

    fn set_object_with_scale(
        &mut self,
        index: usize,
        value: Option<SqlObject>,
        sql_type: SqlType,
        scale: u32,
    ) -> Result<()> {
        self.save_object(index, value.as_ref())?;
        self.statement
            .set_object_with_scale(index, value, sql_type, scale)
    }

    fn clear_parameters(&mut self) -> Result<()> {
        self.parameters.iter_mut().for_each(|v| v.value = None);
        self.statement.clear_parameters()
    }

    fn add_batch(&mut self) -> Result<()> {
        self.statement.add_batch()
    }

    fn add_batch_sql(&mut self, sql: &str) -> Result<()> {
        self.statement.add_batch_sql(sql)
    }

    fn clear_batch(&mut self) -> Result<()> {
        self.statement.clear_batch()
    }

    fn cancel(&mut self) -> Result<()> {
        self.statement.cancel()
    }

    fn warnings(&self) -> Result<Vec<String>> {
        self.statement.warnings()
    }

    fn clear_warnings(&mut self) -> Result<()> {
        self.statement.clear_warnings()
    }

    fn close(&mut self) -> Result<()> {
        self.statement.close()
    }

    fn is_closed(&self) -> bool {
        self.statement.is_closed()
    }

    fn fetch_direction(&self) -> Result<FetchDirection> {
        self.statement.fetch_direction()
    }

    fn set_fetch_direction(&mut self, direction: FetchDirection) -> Result<()> {
        self.statement.set_fetch_direction(direction)
    }

    fn fetch_size(&self) -> Result<u32> {
        self.statement.fetch_size()
    }

    fn set_fetch_size(&mut self, rows: u32) -> Result<()> {
        self.statement.set_fetch_size(rows)
    }

    fn max_field_size(&self) -> Result<usize> {
        self.statement.max_field_size()
    }

    fn set_max_field_size(&mut self, max: usize) -> Result<()> {
        self.statement.set_max_field_size(max)
    }

    fn max_rows(&self) -> Result<u64> {
        self.statement.max_rows()
    }

    fn set_max_rows(&mut self, max: u64) -> Result<()> {
        self.statement.set_max_rows(max)
    }

    fn query_timeout(&self) -> Result<Duration> {
        self.statement.query_timeout()
    }

    fn set_query_timeout(&mut self, timeout: Duration) -> Result<()> {
        self.statement.set_query_timeout(timeout)
    }

    fn more_results(&mut self) -> Result<bool> {
        self.statement.more_results()
    }

    fn result_set(&mut self) -> Result<Option<ResultSet>> {
        self.statement.result_set()
    }

    fn update_count(&self) -> Result<Option<u64>> {
        self.statement.update_count()
    }

    fn generated_keys(&mut self) -> Result<ResultSet> {
        self.statement.generated_keys()
    }

    fn metadata(&self) -> Result<Vec<String>> {
        self.statement.metadata()
    }

    fn parameter_count(&self) -> Result<usize> {
        self.statement.parameter_count()
    }

    fn set_cursor_name(&mut self, name: &str) -> Result<()> {
        self.statement.set_cursor_name(name)
    }

    fn set_escape_processing(&mut self, enable: bool) -> Result<()> {
        self.statement.set_escape_processing(enable)
    }

    fn is_poolable(&self) -> Result<bool> {
        self.statement.is_poolable()
    }

    fn set_poolable(&mut self, poolable: bool) -> Result<()> {
        self.statement.set_poolable(poolable)
    }

    fn is_close_on_completion(&self) -> Result<bool> {
        self.statement.is_close_on_completion()
    }

    fn close_on_completion(&mut self) -> Result<()> {
        self.statement.close_on_completion()
    }
}
