//! Client error types.

use thiserror::Error;

/// Client errors.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The TCP connection could not be established. `details` carries the
    /// errno-catalog text (see [`crate::errno::describe`]).
    #[error("unable to connect to {host}:{port}: {details}")]
    Connect {
        host: String,
        port: u16,
        code: i32,
        details: String,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("protocol error: {0}")]
    Protocol(#[from] fsesl_protocol::ProtocolError),

    /// The first frame after connecting was not an auth challenge.
    #[error("did not receive auth challenge from the switch")]
    MissingChallenge,

    /// The switch answered the auth command without the accept marker.
    /// `reply` carries the server's `Reply-Text` when present.
    #[error("authentication rejected by the switch: {reply}")]
    AuthRejected { reply: String },

    #[error("not connected")]
    NotConnected,
}

impl ClientError {
    /// Returns whether a fresh attempt could plausibly succeed.
    ///
    /// Caller guidance only: the client itself never retries.
    pub fn is_retryable(&self) -> bool {
        matches!(self, ClientError::Connect { .. } | ClientError::Io(_))
    }
}
