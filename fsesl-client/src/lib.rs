//! # fsesl-client
//!
//! Synchronous client for the FreeSWITCH Event Socket (ESL).
//!
//! This crate provides:
//! - Blocking TCP sessions with a bounded connect timeout
//! - The challenge/response authentication handshake
//! - `api` command execution with Content-Length framed replies
//! - A [`Client`] facade naming the common status commands
//!
//! # Example
//!
//! ```no_run
//! use fsesl_client::{Client, ConnectionConfig};
//!
//! let config = ConnectionConfig::new("127.0.0.1", 8021, "ClueCon");
//! let mut client = Client::new(config);
//! client.connect()?;
//!
//! let status = client.status()?;
//! println!("{}", status);
//!
//! client.disconnect();
//! # Ok::<(), fsesl_client::ClientError>(())
//! ```
//!
//! All I/O blocks the calling thread. With no read timeout configured a
//! read against an unresponsive peer blocks indefinitely; see
//! [`ConnectionConfig::with_read_timeout`].

pub mod client;
pub mod config;
pub mod connection;
pub mod errno;
pub mod error;

pub use client::Client;
pub use config::ConnectionConfig;
pub use connection::{Connection, SessionState};
pub use error::ClientError;
