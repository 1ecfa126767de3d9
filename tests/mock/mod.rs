#![allow(dead_code)]

use log::LevelFilter;
use sqlpeek::{
    Blob, Clob, Connection, Error, FetchDirection, FilteredSql, GeneratedKeys, PreparedStatement,
    Result, ResultSet, SqlArray, SqlObject, SqlRef, SqlType, StatementError, Stream, Value,
};
use rust_decimal::Decimal;
use std::{
    env,
    fmt::{self, Display},
    future::Future,
    sync::{Arc, Mutex},
    time::Duration,
};
use time::{Date, PrimitiveDateTime, Time, UtcOffset};
use url::Url;

pub fn init_logs() {
    let mut logger = env_logger::builder();
    logger
        .is_test(true)
        .format_file(true)
        .format_line_number(true);
    if env::var("RUST_LOG").is_err() {
        logger.filter_level(LevelFilter::Warn);
    }
    let _ = logger.try_init();
}

#[macro_export]
macro_rules! silent_logs {
    ($($code:tt)+) => {{
        let level = log::max_level();
        log::set_max_level(log::LevelFilter::Off);
        $($code)+
        log::set_max_level(level);
    }};
}

/// Names of the driver calls, shared between a connection and its statements.
pub type Calls = Arc<Mutex<Vec<String>>>;

/// Connection that records what it is asked to do without any database.
#[derive(Debug, Default)]
pub struct MockConnection {
    pub product: String,
    pub closed: bool,
    pub fail_prepare: bool,
    /// Statements prepared from now on fail every call.
    pub fail_statements: bool,
    /// Execution time of the statements prepared from now on.
    pub delay: Duration,
    pub calls: Calls,
}

impl MockConnection {
    pub fn new(product: &str) -> Self {
        Self {
            product: product.into(),
            ..Default::default()
        }
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

impl Connection for MockConnection {
    type Statement = MockStatement;

    async fn connect(url: &str) -> Result<Self> {
        let Some(product) = url.strip_prefix("mock://") else {
            return Err(Error::msg(format!("Unexpected url `{}`", url)));
        };
        Ok(Self::new(product))
    }

    async fn prepare_statement(&mut self, sql: &str) -> Result<MockStatement> {
        self.calls.lock().unwrap().push(format!("prepare {}", sql));
        if self.fail_prepare {
            return Err(Error::msg("ORA-00900: invalid SQL statement"));
        }
        Ok(MockStatement {
            sql: sql.into(),
            parameters: FilteredSql::new(sql).placeholder_count(),
            fail: self.fail_statements,
            delay: self.delay,
            closed: false,
            calls: self.calls.clone(),
            fetch_size: 0,
            max_rows: 0,
        })
    }

    fn database_product_name(&self) -> Result<String> {
        Ok(self.product.clone())
    }

    fn is_closed(&self) -> bool {
        self.closed
    }

    fn close(&mut self) -> Result<()> {
        self.closed = true;
        Ok(())
    }
}

#[derive(Debug)]
pub struct MockStatement {
    pub sql: String,
    pub parameters: usize,
    pub fail: bool,
    pub delay: Duration,
    pub closed: bool,
    pub calls: Calls,
    fetch_size: u32,
    max_rows: u64,
}

impl MockStatement {
    fn call(&self, name: impl Into<String>) -> Result<()> {
        self.calls.lock().unwrap().push(name.into());
        if self.fail {
            return Err(Error::msg("driver failure"));
        }
        Ok(())
    }

    fn set(&self, name: &str, index: usize) -> Result<()> {
        self.call(format!("{}({})", name, index))?;
        if index == 0 || index > self.parameters {
            return Err(Error::new(StatementError::ParameterIndexOutOfBounds {
                index,
                count: self.parameters,
            }));
        }
        Ok(())
    }

    async fn run(&self, name: &str) -> Result<()> {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        self.call(name)
    }
}

impl Display for MockStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.sql)
    }
}

impl PreparedStatement for MockStatement {
    fn execute(&mut self) -> impl Future<Output = Result<bool>> + Send {
        async move {
            self.run("execute").await?;
            Ok(true)
        }
    }

    fn execute_query(&mut self) -> impl Future<Output = Result<ResultSet>> + Send {
        async move {
            self.run("execute_query").await?;
            Ok(ResultSet::new(
                Arc::new(["DUMMY".to_string()]),
                vec![Box::new([Value::Varchar("X".into())])],
            ))
        }
    }

    fn execute_update(&mut self) -> impl Future<Output = Result<u64>> + Send {
        async move {
            self.run("execute_update").await?;
            Ok(1)
        }
    }

    fn execute_batch(&mut self) -> impl Future<Output = Result<Vec<u64>>> + Send {
        async move {
            self.run("execute_batch").await?;
            Ok(vec![1, 1])
        }
    }

    fn execute_sql(&mut self, sql: &str) -> impl Future<Output = Result<bool>> + Send {
        async move {
            self.run(&format!("execute_sql {}", sql)).await?;
            Ok(false)
        }
    }

    fn execute_query_sql(&mut self, sql: &str) -> impl Future<Output = Result<ResultSet>> + Send {
        async move {
            self.run(&format!("execute_query_sql {}", sql)).await?;
            Ok(ResultSet::default())
        }
    }

    fn execute_update_sql(&mut self, sql: &str) -> impl Future<Output = Result<u64>> + Send {
        async move {
            self.run(&format!("execute_update_sql {}", sql)).await?;
            Ok(3)
        }
    }

    fn execute_sql_with_keys(
        &mut self,
        sql: &str,
        _keys: GeneratedKeys,
    ) -> impl Future<Output = Result<bool>> + Send {
        async move {
            self.run(&format!("execute_sql_with_keys {}", sql)).await?;
            Ok(false)
        }
    }

    fn execute_update_sql_with_keys(
        &mut self,
        sql: &str,
        _keys: GeneratedKeys,
    ) -> impl Future<Output = Result<u64>> + Send {
        async move {
            self.run(&format!("execute_update_sql_with_keys {}", sql))
                .await?;
            Ok(1)
        }
    }

    fn set_null(&mut self, index: usize, _sql_type: SqlType) -> Result<()> {
        self.set("set_null", index)
    }

    fn set_null_with_type_name(
        &mut self,
        index: usize,
        _sql_type: SqlType,
        _type_name: &str,
    ) -> Result<()> {
        self.set("set_null_with_type_name", index)
    }

    fn set_boolean(&mut self, index: usize, _value: bool) -> Result<()> {
        self.set("set_boolean", index)
    }

    fn set_byte(&mut self, index: usize, _value: i8) -> Result<()> {
        self.set("set_byte", index)
    }

    fn set_short(&mut self, index: usize, _value: i16) -> Result<()> {
        self.set("set_short", index)
    }

    fn set_int(&mut self, index: usize, _value: i32) -> Result<()> {
        self.set("set_int", index)
    }

    fn set_long(&mut self, index: usize, _value: i64) -> Result<()> {
        self.set("set_long", index)
    }

    fn set_float(&mut self, index: usize, _value: f32) -> Result<()> {
        self.set("set_float", index)
    }

    fn set_double(&mut self, index: usize, _value: f64) -> Result<()> {
        self.set("set_double", index)
    }

    fn set_decimal(&mut self, index: usize, _value: Decimal) -> Result<()> {
        self.set("set_decimal", index)
    }

    fn set_string(&mut self, index: usize, _value: &str) -> Result<()> {
        self.set("set_string", index)
    }

    fn set_nstring(&mut self, index: usize, _value: &str) -> Result<()> {
        self.set("set_nstring", index)
    }

    fn set_bytes(&mut self, index: usize, _value: Option<&[u8]>) -> Result<()> {
        self.set("set_bytes", index)
    }

    fn set_date(&mut self, index: usize, _value: Date) -> Result<()> {
        self.set("set_date", index)
    }

    fn set_time(&mut self, index: usize, _value: Time) -> Result<()> {
        self.set("set_time", index)
    }

    fn set_timestamp(&mut self, index: usize, _value: PrimitiveDateTime) -> Result<()> {
        self.set("set_timestamp", index)
    }

    fn set_date_with_offset(
        &mut self,
        index: usize,
        _value: Date,
        _offset: UtcOffset,
    ) -> Result<()> {
        self.set("set_date_with_offset", index)
    }

    fn set_time_with_offset(
        &mut self,
        index: usize,
        _value: Time,
        _offset: UtcOffset,
    ) -> Result<()> {
        self.set("set_time_with_offset", index)
    }

    fn set_timestamp_with_offset(
        &mut self,
        index: usize,
        _value: PrimitiveDateTime,
        _offset: UtcOffset,
    ) -> Result<()> {
        self.set("set_timestamp_with_offset", index)
    }

    fn set_ascii_stream(
        &mut self,
        index: usize,
        _stream: Option<Stream>,
        _length: Option<u64>,
    ) -> Result<()> {
        self.set("set_ascii_stream", index)
    }

    fn set_binary_stream(
        &mut self,
        index: usize,
        _stream: Option<Stream>,
        _length: Option<u64>,
    ) -> Result<()> {
        self.set("set_binary_stream", index)
    }

    fn set_character_stream(
        &mut self,
        index: usize,
        _stream: Option<Stream>,
        _length: Option<u64>,
    ) -> Result<()> {
        self.set("set_character_stream", index)
    }

    fn set_blob(&mut self, index: usize, _value: Arc<dyn Blob>) -> Result<()> {
        self.set("set_blob", index)
    }

    fn set_clob(&mut self, index: usize, _value: Arc<dyn Clob>) -> Result<()> {
        self.set("set_clob", index)
    }

    fn set_array(&mut self, index: usize, _value: Arc<dyn SqlArray>) -> Result<()> {
        self.set("set_array", index)
    }

    fn set_ref(&mut self, index: usize, _value: Arc<dyn SqlRef>) -> Result<()> {
        self.set("set_ref", index)
    }

    fn set_url(&mut self, index: usize, _value: &Url) -> Result<()> {
        self.set("set_url", index)
    }

    fn set_object(&mut self, index: usize, _value: Option<SqlObject>) -> Result<()> {
        self.set("set_object", index)
    }

    fn set_object_with_type(
        &mut self,
        index: usize,
        _value: Option<SqlObject>,
        _sql_type: SqlType,
    ) -> Result<()> {
        self.set("set_object_with_type", index)
    }

    fn set_object_with_scale(
        &mut self,
        index: usize,
        _value: Option<SqlObject>,
        _sql_type: SqlType,
        _scale: u32,
    ) -> Result<()> {
        self.set("set_object_with_scale", index)
    }

    fn clear_parameters(&mut self) -> Result<()> {
        self.call("clear_parameters")
    }

    fn add_batch(&mut self) -> Result<()> {
        self.call("add_batch")
    }

    fn add_batch_sql(&mut self, sql: &str) -> Result<()> {
        self.call(format!("add_batch_sql {}", sql))
    }

    fn clear_batch(&mut self) -> Result<()> {
        self.call("clear_batch")
    }

    fn cancel(&mut self) -> Result<()> {
        self.call("cancel")
    }

    fn warnings(&self) -> Result<Vec<String>> {
        self.call("warnings")?;
        Ok(vec!["01000: mock warning".into()])
    }

    fn clear_warnings(&mut self) -> Result<()> {
        self.call("clear_warnings")
    }

    fn close(&mut self) -> Result<()> {
        self.call("close")?;
        self.closed = true;
        Ok(())
    }

    fn is_closed(&self) -> bool {
        self.closed
    }

    fn fetch_direction(&self) -> Result<FetchDirection> {
        self.call("fetch_direction")?;
        Ok(FetchDirection::Forward)
    }

    fn set_fetch_direction(&mut self, _direction: FetchDirection) -> Result<()> {
        self.call("set_fetch_direction")
    }

    fn fetch_size(&self) -> Result<u32> {
        self.call("fetch_size")?;
        Ok(self.fetch_size)
    }

    fn set_fetch_size(&mut self, rows: u32) -> Result<()> {
        self.call("set_fetch_size")?;
        self.fetch_size = rows;
        Ok(())
    }

    fn max_field_size(&self) -> Result<usize> {
        self.call("max_field_size")?;
        Ok(0)
    }

    fn set_max_field_size(&mut self, _max: usize) -> Result<()> {
        self.call("set_max_field_size")
    }

    fn max_rows(&self) -> Result<u64> {
        self.call("max_rows")?;
        Ok(self.max_rows)
    }

    fn set_max_rows(&mut self, max: u64) -> Result<()> {
        self.call("set_max_rows")?;
        self.max_rows = max;
        Ok(())
    }

    fn query_timeout(&self) -> Result<Duration> {
        self.call("query_timeout")?;
        Ok(Duration::ZERO)
    }

    fn set_query_timeout(&mut self, _timeout: Duration) -> Result<()> {
        self.call("set_query_timeout")
    }

    fn more_results(&mut self) -> Result<bool> {
        self.call("more_results")?;
        Ok(false)
    }

    fn result_set(&mut self) -> Result<Option<ResultSet>> {
        self.call("result_set")?;
        Ok(None)
    }

    fn update_count(&self) -> Result<Option<u64>> {
        self.call("update_count")?;
        Ok(Some(7))
    }

    fn generated_keys(&mut self) -> Result<ResultSet> {
        self.call("generated_keys")?;
        Ok(ResultSet::default())
    }

    fn metadata(&self) -> Result<Vec<String>> {
        self.call("metadata")?;
        Ok(vec!["DUMMY".into()])
    }

    fn parameter_count(&self) -> Result<usize> {
        self.call("parameter_count")?;
        Ok(self.parameters)
    }

    fn set_cursor_name(&mut self, name: &str) -> Result<()> {
        self.call(format!("set_cursor_name {}", name))
    }

    fn set_escape_processing(&mut self, _enable: bool) -> Result<()> {
        self.call("set_escape_processing")
    }

    fn is_poolable(&self) -> Result<bool> {
        self.call("is_poolable")?;
        Ok(false)
    }

    fn set_poolable(&mut self, _poolable: bool) -> Result<()> {
        self.call("set_poolable")
    }

    fn is_close_on_completion(&self) -> Result<bool> {
        self.call("is_close_on_completion")?;
        Ok(false)
    }

    fn close_on_completion(&mut self) -> Result<()> {
        self.call("close_on_completion")
    }
}
