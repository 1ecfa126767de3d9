use thiserror::Error;

/// Errors raised by sqlpeek itself, as opposed to the ones coming from a driver.
///
/// They travel inside [`crate::Error`], use `downcast_ref::<StatementError>()`
/// to recognize them.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StatementError {
    #[error("Connection is closed")]
    ConnectionClosed,

    #[error("Parameter index of {index} exceeds actual parameter count of {count}")]
    ParameterIndexOutOfBounds { index: usize, count: usize },

    #[error("Could not format the value: {0}")]
    Format(String),

    #[error("Unsupported operation: {0}")]
    Unsupported(&'static str),
}
