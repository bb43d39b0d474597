//! Protocol error types.

use thiserror::Error;

/// Protocol errors.
#[derive(Debug, Error)]
pub enum ProtocolError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("declared body length {declared} exceeds maximum {max}")]
    BodyTooLarge { declared: usize, max: usize },
}
