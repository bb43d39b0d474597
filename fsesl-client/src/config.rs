//! Session configuration.

use fsesl_protocol::DEFAULT_PORT;
use std::fmt;
use std::time::Duration;

/// Default connect timeout (10 seconds).
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Password the switch ships with.
pub const DEFAULT_PASSWORD: &str = "ClueCon";

/// Connection configuration.
///
/// With `read_timeout` unset, every socket read blocks until the peer
/// replies; `connect()` (after the TCP open) and `execute()` can then block
/// indefinitely on an unresponsive peer. Setting a read timeout surfaces
/// stalled reads as `ClientError::Io`.
#[derive(Clone)]
pub struct ConnectionConfig {
    /// Switch hostname or IP address.
    pub host: String,
    /// Event socket port.
    pub port: u16,
    /// Shared secret for the authentication handshake.
    pub password: String,
    /// Bound on the TCP connect.
    pub connect_timeout: Duration,
    /// Bound on each socket read. `None` blocks indefinitely.
    pub read_timeout: Option<Duration>,
    /// Reconnect (and re-authenticate) inside `execute()` when the session
    /// is down.
    pub auto_reconnect: bool,
}

impl ConnectionConfig {
    pub fn new(host: impl Into<String>, port: u16, password: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            port,
            password: password.into(),
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
            read_timeout: None,
            auto_reconnect: true,
        }
    }

    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    pub fn with_read_timeout(mut self, timeout: Duration) -> Self {
        self.read_timeout = Some(timeout);
        self
    }

    pub fn with_auto_reconnect(mut self, auto_reconnect: bool) -> Self {
        self.auto_reconnect = auto_reconnect;
        self
    }
}

impl Default for ConnectionConfig {
    /// The switch's stock event socket endpoint: `127.0.0.1:8021`,
    /// password `ClueCon`.
    fn default() -> Self {
        Self::new("127.0.0.1", DEFAULT_PORT, DEFAULT_PASSWORD)
    }
}

impl fmt::Debug for ConnectionConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConnectionConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("password", &"[REDACTED]")
            .field("connect_timeout", &self.connect_timeout)
            .field("read_timeout", &self.read_timeout)
            .field("auto_reconnect", &self.auto_reconnect)
            .finish()
    }
}
