//! Prepared statements that can show the SQL the database actually ran.
//!
//! Wrap a driver statement in a [`DebuggableStatement`] (or let a
//! [`StatementFactory`] decide based on the configured [`DebugLevel`]), bind
//! parameters as usual and print it: every placeholder is replaced by the
//! literal of the bound value, written in the dialect of the database.
pub use ::sqlpeek_core::*;
