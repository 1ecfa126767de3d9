use crate::{PreparedStatement, Result};
use std::future::Future;

/// An open database connection, the source of prepared statements.
pub trait Connection: Send {
    type Statement: PreparedStatement;

    /// Open a connection to the database identified by `url`.
    fn connect(url: &str) -> impl Future<Output = Result<Self>> + Send
    where
        Self: Sized;

    fn prepare_statement(
        &mut self,
        sql: &str,
    ) -> impl Future<Output = Result<Self::Statement>> + Send;

    /// Product name as reported by the database, used to pick the formatter.
    fn database_product_name(&self) -> Result<String>;

    fn is_closed(&self) -> bool;

    fn close(&mut self) -> Result<()>;
}
