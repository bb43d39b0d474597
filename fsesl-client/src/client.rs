//! High-level client API.

use crate::config::ConnectionConfig;
use crate::connection::{Connection, SessionState};
use crate::error::ClientError;

/// High-level client for the event socket.
///
/// Owns one [`Connection`] and layers the named api commands on top of it.
/// Every command returns the reply body as a trimmed string; no further
/// parsing is applied.
pub struct Client {
    conn: Connection,
}

impl Client {
    /// Creates a new client with the given configuration.
    pub fn new(config: ConnectionConfig) -> Self {
        Self {
            conn: Connection::new(config),
        }
    }

    /// Connects to the switch and authenticates.
    pub fn connect(&mut self) -> Result<(), ClientError> {
        self.conn.connect()
    }

    /// Returns whether the session is authenticated and ready.
    pub fn is_connected(&self) -> bool {
        self.conn.is_connected()
    }

    /// Current session state.
    pub fn state(&self) -> SessionState {
        self.conn.state()
    }

    /// Closes the connection. Idempotent.
    pub fn disconnect(&mut self) {
        self.conn.disconnect()
    }

    /// Returns the underlying session (for raw frame access).
    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    /// Mutable access to the underlying session.
    pub fn connection_mut(&mut self) -> &mut Connection {
        &mut self.conn
    }

    /// Runs an arbitrary api command and returns the trimmed reply body.
    pub fn execute(&mut self, command: &str) -> Result<String, ClientError> {
        self.conn.execute(command)
    }

    // =========================================================================
    // Named commands
    // =========================================================================

    /// Overall switch status (`api status`).
    pub fn status(&mut self) -> Result<String, ClientError> {
        self.execute("status")
    }

    /// Active channel table (`api show channels`).
    pub fn show_channels(&mut self) -> Result<String, ClientError> {
        self.execute("show channels")
    }

    /// Active call table (`api show calls`).
    pub fn show_calls(&mut self) -> Result<String, ClientError> {
        self.execute("show calls")
    }

    /// SIP stack summary (`api sofia status`).
    pub fn sofia_status(&mut self) -> Result<String, ClientError> {
        self.execute("sofia status")
    }

    /// SIP stack detail for one profile (`api sofia status profile <name>`).
    pub fn sofia_status_profile(&mut self, profile: &str) -> Result<String, ClientError> {
        self.execute(&format!("sofia status profile {profile}"))
    }
}
