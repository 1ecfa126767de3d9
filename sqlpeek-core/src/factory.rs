use crate::{
    Blob, Clob, Connection, DebugLevel, DebuggableStatement, FetchDirection, FormatterRegistry,
    GeneratedKeys, PreparedStatement, Result, ResultSet, SqlArray, SqlFormatter, SqlObject,
    SqlRef, SqlType, Stream,
};
use rust_decimal::Decimal;
use std::{
    fmt::{self, Display},
    future::Future,
    sync::Arc,
    time::Duration,
};
use time::{Date, PrimitiveDateTime, Time, UtcOffset};
use url::Url;

/// Creates statements according to a default [`DebugLevel`] and picks the
/// formatter from the database product.
///
/// Meant to be built once at startup and handed to whoever prepares statements.
#[derive(Debug, Clone, Default)]
pub struct StatementFactory {
    default_debug: DebugLevel,
    registry: Arc<FormatterRegistry>,
}

impl StatementFactory {
    pub fn new(default_debug: DebugLevel, registry: Arc<FormatterRegistry>) -> Self {
        Self {
            default_debug,
            registry,
        }
    }

    /// Default level from the `SQLPEEK_DEBUG` environment variable, default registry.
    pub fn from_env() -> Result<Self> {
        Ok(Self::new(DebugLevel::from_env()?, Default::default()))
    }

    pub fn default_debug(&self) -> DebugLevel {
        self.default_debug
    }

    /// Applies to the statements created from now on.
    pub fn set_default_debug(&mut self, level: DebugLevel) {
        self.default_debug = level;
    }

    pub fn registry(&self) -> &Arc<FormatterRegistry> {
        &self.registry
    }

    pub async fn statement<C: Connection>(
        &self,
        connection: &mut C,
        sql: &str,
    ) -> Result<Statement<C::Statement>> {
        self.statement_with_level(connection, sql, self.default_debug)
            .await
    }

    pub async fn statement_with_level<C: Connection>(
        &self,
        connection: &mut C,
        sql: &str,
        level: DebugLevel,
    ) -> Result<Statement<C::Statement>> {
        if !level.is_enabled() {
            return Ok(Statement::Direct(connection.prepare_statement(sql).await?));
        }
        let formatter = self.registry.formatter_for(connection)?;
        self.statement_with(connection, sql, formatter, level).await
    }

    pub async fn statement_with_formatter<C: Connection>(
        &self,
        connection: &mut C,
        sql: &str,
        formatter: Arc<dyn SqlFormatter>,
    ) -> Result<Statement<C::Statement>> {
        self.statement_with(connection, sql, formatter, self.default_debug)
            .await
    }

    pub async fn statement_with<C: Connection>(
        &self,
        connection: &mut C,
        sql: &str,
        formatter: Arc<dyn SqlFormatter>,
        level: DebugLevel,
    ) -> Result<Statement<C::Statement>> {
        Ok(if level.is_enabled() {
            Statement::Debuggable(
                DebuggableStatement::prepare(connection, sql, formatter, level).await?,
            )
        } else {
            Statement::Direct(connection.prepare_statement(sql).await?)
        })
    }
}

/// Statement returned by [`StatementFactory`], the driver one when debugging
/// is off.
pub enum Statement<S: PreparedStatement> {
    Direct(S),
    Debuggable(DebuggableStatement<S>),
}

impl<S: PreparedStatement> Statement<S> {
    pub fn is_debuggable(&self) -> bool {
        matches!(self, Statement::Debuggable(..))
    }

    pub fn as_debuggable(&self) -> Option<&DebuggableStatement<S>> {
        match self {
            Statement::Debuggable(v) => Some(v),
            Statement::Direct(..) => None,
        }
    }

    pub fn as_debuggable_mut(&mut self) -> Option<&mut DebuggableStatement<S>> {
        match self {
            Statement::Debuggable(v) => Some(v),
            Statement::Direct(..) => None,
        }
    }

    /// The driver statement.
    pub fn inner(&self) -> &S {
        match self {
            Statement::Direct(v) => v,
            Statement::Debuggable(v) => v.inner(),
        }
    }
}

impl<S: PreparedStatement> Display for Statement<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Statement::Direct(v) => v.fmt(f),
            Statement::Debuggable(v) => v.fmt(f),
        }
    }
}

macro_rules! dispatch {
    ($self:ident, $v:ident => $call:expr) => {
        match $self {
            Statement::Direct($v) => $call,
            Statement::Debuggable($v) => $call,
        }
    };
}

impl<S: PreparedStatement> PreparedStatement for Statement<S> {
    fn execute(&mut self) -> impl Future<Output = Result<bool>> + Send {
        async move { dispatch!(self, v => v.execute().await) }
    }

    fn execute_query(&mut self) -> impl Future<Output = Result<ResultSet>> + Send {
        async move { dispatch!(self, v => v.execute_query().await) }
    }

    fn execute_update(&mut self) -> impl Future<Output = Result<u64>> + Send {
        async move { dispatch!(self, v => v.execute_update().await) }
    }

    fn execute_batch(&mut self) -> impl Future<Output = Result<Vec<u64>>> + Send {
        async move { dispatch!(self, v => v.execute_batch().await) }
    }

    fn execute_sql(&mut self, sql: &str) -> impl Future<Output = Result<bool>> + Send {
        async move { dispatch!(self, v => v.execute_sql(sql).await) }
    }

    fn execute_query_sql(&mut self, sql: &str) -> impl Future<Output = Result<ResultSet>> + Send {
        async move { dispatch!(self, v => v.execute_query_sql(sql).await) }
    }

    fn execute_update_sql(&mut self, sql: &str) -> impl Future<Output = Result<u64>> + Send {
        async move { dispatch!(self, v => v.execute_update_sql(sql).await) }
    }

    fn execute_sql_with_keys(
        &mut self,
        sql: &str,
        keys: GeneratedKeys,
    ) -> impl Future<Output = Result<bool>> + Send {
        async move { dispatch!(self, v => v.execute_sql_with_keys(sql, keys).await) }
    }

    fn execute_update_sql_with_keys(
        &mut self,
        sql: &str,
        keys: GeneratedKeys,
    ) -> impl Future<Output = Result<u64>> + Send {
        async move { dispatch!(self, v => v.execute_update_sql_with_keys(sql, keys).await) }
    }

    fn set_null(&mut self, index: usize, sql_type: SqlType) -> Result<()> {
        dispatch!(self, v => v.set_null(index, sql_type))
    }

    fn set_null_with_type_name(
        &mut self,
        index: usize,
        sql_type: SqlType,
        type_name: &str,
    ) -> Result<()> {
        dispatch!(self, v => v.set_null_with_type_name(index, sql_type, type_name))
    }

    fn set_boolean(&mut self, index: usize, value: bool) -> Result<()> {
        dispatch!(self, v => v.set_boolean(index, value))
    }

    fn set_byte(&mut self, index: usize, value: i8) -> Result<()> {
        dispatch!(self, v => v.set_byte(index, value))
    }

    fn set_short(&mut self, index: usize, value: i16) -> Result<()> {
        dispatch!(self, v => v.set_short(index, value))
    }

    fn set_int(&mut self, index: usize, value: i32) -> Result<()> {
        dispatch!(self, v => v.set_int(index, value))
    }

    fn set_long(&mut self, index: usize, value: i64) -> Result<()> {
        dispatch!(self, v => v.set_long(index, value))
    }

    fn set_float(&mut self, index: usize, value: f32) -> Result<()> {
        dispatch!(self, v => v.set_float(index, value))
    }

    fn set_double(&mut self, index: usize, value: f64) -> Result<()> {
        dispatch!(self, v => v.set_double(index, value))
    }

    fn set_decimal(&mut self, index: usize, value: Decimal) -> Result<()> {
        dispatch!(self, v => v.set_decimal(index, value))
    }

    fn set_string(&mut self, index: usize, value: &str) -> Result<()> {
        dispatch!(self, v => v.set_string(index, value))
    }

    fn set_nstring(&mut self, index: usize, value: &str) -> Result<()> {
        dispatch!(self, v => v.set_nstring(index, value))
    }

    fn set_bytes(&mut self, index: usize, value: Option<&[u8]>) -> Result<()> {
        dispatch!(self, v => v.set_bytes(index, value))
    }

    fn set_date(&mut self, index: usize, value: Date) -> Result<()> {
        dispatch!(self, v => v.set_date(index, value))
    }

    fn set_time(&mut self, index: usize, value: Time) -> Result<()> {
        dispatch!(self, v => v.set_time(index, value))
    }

    fn set_timestamp(&mut self, index: usize, value: PrimitiveDateTime) -> Result<()> {
        dispatch!(self, v => v.set_timestamp(index, value))
    }

    fn set_date_with_offset(
        &mut self,
        index: usize,
        value: Date,
        offset: UtcOffset,
    ) -> Result<()> {
        dispatch!(self, v => v.set_date_with_offset(index, value, offset))
    }

    fn set_time_with_offset(
        &mut self,
        index: usize,
        value: Time,
        offset: UtcOffset,
    ) -> Result<()> {
        dispatch!(self, v => v.set_time_with_offset(index, value, offset))
    }

    fn set_timestamp_with_offset(
        &mut self,
        index: usize,
        value: PrimitiveDateTime,
        offset: UtcOffset,
    ) -> Result<()> {
        dispatch!(self, v => v.set_timestamp_with_offset(index, value, offset))
    }

    fn set_ascii_stream(
        &mut self,
        index: usize,
        stream: Option<Stream>,
        length: Option<u64>,
    ) -> Result<()> {
        dispatch!(self, v => v.set_ascii_stream(index, stream, length))
    }

    fn set_binary_stream(
        &mut self,
        index: usize,
        stream: Option<Stream>,
        length: Option<u64>,
    ) -> Result<()> {
        dispatch!(self, v => v.set_binary_stream(index, stream, length))
    }

    fn set_character_stream(
        &mut self,
        index: usize,
        stream: Option<Stream>,
        length: Option<u64>,
    ) -> Result<()> {
        dispatch!(self, v => v.set_character_stream(index, stream, length))
    }

    fn set_blob(&mut self, index: usize, value: Arc<dyn Blob>) -> Result<()> {
        dispatch!(self, v => v.set_blob(index, value))
    }

    fn set_clob(&mut self, index: usize, value: Arc<dyn Clob>) -> Result<()> {
        dispatch!(self, v => v.set_clob(index, value))
    }

    fn set_array(&mut self, index: usize, value: Arc<dyn SqlArray>) -> Result<()> {
        dispatch!(self, v => v.set_array(index, value))
    }

    fn set_ref(&mut self, index: usize, value: Arc<dyn SqlRef>) -> Result<()> {
        dispatch!(self, v => v.set_ref(index, value))
    }

    fn set_url(&mut self, index: usize, value: &Url) -> Result<()> {
        dispatch!(self, v => v.set_url(index, value))
    }

    fn set_object(&mut self, index: usize, value: Option<SqlObject>) -> Result<()> {
        dispatch!(self, v => v.set_object(index, value))
    }

    fn set_object_with_type(
        &mut self,
        index: usize,
        value: Option<SqlObject>,
        sql_type: SqlType,
    ) -> Result<()> {
        dispatch!(self, v => v.set_object_with_type(index, value, sql_type))
    }

    fn set_object_with_scale(
        &mut self,
        index: usize,
        value: Option<SqlObject>,
        sql_type: SqlType,
        scale: u32,
    ) -> Result<()> {
        dispatch!(self, v => v.set_object_with_scale(index, value, sql_type, scale))
    }

    fn clear_parameters(&mut self) -> Result<()> {
        dispatch!(self, v => v.clear_parameters())
    }

    fn add_batch(&mut self) -> Result<()> {
        dispatch!(self, v => v.add_batch())
    }

    fn add_batch_sql(&mut self, sql: &str) -> Result<()> {
        dispatch!(self, v => v.add_batch_sql(sql))
    }

    fn clear_batch(&mut self) -> Result<()> {
        dispatch!(self, v => v.clear_batch())
    }

    fn cancel(&mut self) -> Result<()> {
        dispatch!(self, v => v.cancel())
    }

    fn warnings(&self) -> Result<Vec<String>> {
        dispatch!(self, v => v.warnings())
    }

    fn clear_warnings(&mut self) -> Result<()> {
        dispatch!(self, v => v.clear_warnings())
    }

    fn close(&mut self) -> Result<()> {
        dispatch!(self, v => v.close())
    }

    fn is_closed(&self) -> bool {
        dispatch!(self, v => v.is_closed())
    }

    fn fetch_direction(&self) -> Result<FetchDirection> {
        dispatch!(self, v => v.fetch_direction())
    }

    fn set_fetch_direction(&mut self, direction: FetchDirection) -> Result<()> {
        dispatch!(self, v => v.set_fetch_direction(direction))
    }

    fn fetch_size(&self) -> Result<u32> {
        dispatch!(self, v => v.fetch_size())
    }

    fn set_fetch_size(&mut self, rows: u32) -> Result<()> {
        dispatch!(self, v => v.set_fetch_size(rows))
    }

    fn max_field_size(&self) -> Result<usize> {
        dispatch!(self, v => v.max_field_size())
    }

    fn set_max_field_size(&mut self, max: usize) -> Result<()> {
        dispatch!(self, v => v.set_max_field_size(max))
    }

    fn max_rows(&self) -> Result<u64> {
        dispatch!(self, v => v.max_rows())
    }

    fn set_max_rows(&mut self, max: u64) -> Result<()> {
        dispatch!(self, v => v.set_max_rows(max))
    }

    fn query_timeout(&self) -> Result<Duration> {
        dispatch!(self, v => v.query_timeout())
    }

    fn set_query_timeout(&mut self, timeout: Duration) -> Result<()> {
        dispatch!(self, v => v.set_query_timeout(timeout))
    }

    fn more_results(&mut self) -> Result<bool> {
        dispatch!(self, v => v.more_results())
    }

    fn result_set(&mut self) -> Result<Option<ResultSet>> {
        dispatch!(self, v => v.result_set())
    }

    fn update_count(&self) -> Result<Option<u64>> {
        dispatch!(self, v => v.update_count())
    }

    fn generated_keys(&mut self) -> Result<ResultSet> {
        dispatch!(self, v => v.generated_keys())
    }

    fn metadata(&self) -> Result<Vec<String>> {
        dispatch!(self, v => v.metadata())
    }

    fn parameter_count(&self) -> Result<usize> {
        dispatch!(self, v => v.parameter_count())
    }

    fn set_cursor_name(&mut self, name: &str) -> Result<()> {
        dispatch!(self, v => v.set_cursor_name(name))
    }

    fn set_escape_processing(&mut self, enable: bool) -> Result<()> {
        dispatch!(self, v => v.set_escape_processing(enable))
    }

    fn is_poolable(&self) -> Result<bool> {
        dispatch!(self, v => v.is_poolable())
    }

    fn set_poolable(&mut self, poolable: bool) -> Result<()> {
        dispatch!(self, v => v.set_poolable(poolable))
    }

    fn is_close_on_completion(&self) -> Result<bool> {
        dispatch!(self, v => v.is_close_on_completion())
    }

    fn close_on_completion(&mut self) -> Result<()> {
        dispatch!(self, v => v.close_on_completion())
    }
}
