//! # fsesl-protocol
//!
//! Wire protocol implementation for the FreeSWITCH Event Socket (ESL).
//!
//! This crate provides:
//! - Content-Length framing: a header block terminated by a blank line,
//!   optionally followed by a body of a declared byte count
//! - Header/body splitting for api response extraction
//! - Command line formatting with credential redaction
//! - Protocol constants

pub mod command;
pub mod error;
pub mod frame;

pub use command::Command;
pub use error::ProtocolError;
pub use frame::{split_header_body, Frame};

/// Default port of the event socket.
pub const DEFAULT_PORT: u16 = 8021;

/// Terminator written after every command line, and separating a header
/// block from the body.
pub const HEADER_TERMINATOR: &str = "\n\n";

/// Header line identifying the server's authentication challenge.
pub const AUTH_REQUEST_MARKER: &str = "Content-Type: auth/request";

/// Header line identifying a command reply.
pub const COMMAND_REPLY_MARKER: &str = "Content-Type: command/reply";

/// Header line confirming a successful authentication.
pub const AUTH_ACCEPTED_MARKER: &str = "Reply-Text: +OK accepted";

/// Name of the header carrying a command reply's status text.
pub const HEADER_REPLY_TEXT: &str = "Reply-Text";

/// Maximum accepted declared body size (8 MiB). The largest real responses,
/// full `show channels` dumps, stay well under 2 MiB.
pub const MAX_BODY_SIZE: usize = 8 * 1024 * 1024;
