//! Wire command lines.
//!
//! A command is a single text line; the session layer appends the `\n\n`
//! terminator when writing. `Debug` and `Display` render the password as
//! `[REDACTED]` so commands can appear in logs without leaking credentials.
//! Values are interpolated verbatim (trusted-input API, no escaping).

use std::fmt;

/// A command line understood by the event socket.
#[derive(Clone, PartialEq, Eq)]
pub enum Command {
    /// `auth <password>` - answers the authentication challenge.
    Auth { password: String },
    /// `api <command>` - runs an api command, answered by one reply frame.
    Api { command: String },
}

impl Command {
    /// The wire line for this command, without the frame terminator.
    pub fn line(&self) -> String {
        match self {
            Command::Auth { password } => format!("auth {}", password),
            Command::Api { command } => format!("api {}", command),
        }
    }
}

impl fmt::Debug for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Command::Auth { .. } => f
                .debug_struct("Auth")
                .field("password", &"[REDACTED]")
                .finish(),
            Command::Api { command } => {
                f.debug_struct("Api").field("command", command).finish()
            }
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Command::Auth { .. } => write!(f, "auth [REDACTED]"),
            Command::Api { command } => write!(f, "api {}", command),
        }
    }
}
