mod as_value;
mod connection;
mod debug_level;
mod debuggable;
mod dialect;
mod error;
mod factory;
mod filtered_sql;
mod formatter;
mod registry;
mod result_set;
mod statement;
mod util;
mod value;

pub use ::anyhow::Context;
pub use as_value::*;
pub use connection::*;
pub use debug_level::*;
pub use debuggable::*;
pub use dialect::*;
pub use error::*;
pub use factory::*;
pub use filtered_sql::*;
pub use formatter::*;
pub use registry::*;
pub use result_set::*;
pub use statement::*;
pub use util::*;
pub use value::*;

pub type Result<T> = anyhow::Result<T>;
pub type Error = anyhow::Error;
