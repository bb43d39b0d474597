//! Connection management.
//!
//! A [`Connection`] walks a session through the auth handshake and into the
//! command/reply loop:
//!
//! ```text
//! Disconnected --connect()--> Authenticating --accept--> Ready
//!       ^                           |
//!       +---- any handshake failure +
//! ```
//!
//! All I/O blocks the calling thread. The TCP open is bounded by
//! `connect_timeout`; reads are bounded by `read_timeout` when set and
//! block indefinitely otherwise.

use crate::config::ConnectionConfig;
use crate::errno;
use crate::error::ClientError;
use fsesl_protocol::{
    split_header_body, Command, Frame, ProtocolError, AUTH_ACCEPTED_MARKER, AUTH_REQUEST_MARKER,
    COMMAND_REPLY_MARKER, HEADER_REPLY_TEXT, HEADER_TERMINATOR,
};
use std::io::{BufReader, Write};
use std::net::{Shutdown, TcpStream, ToSocketAddrs};

/// Session lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// No open socket.
    Disconnected,
    /// Socket open, handshake in flight.
    Authenticating,
    /// Handshake accepted; api commands can be issued.
    Ready,
}

/// A session with the event socket.
///
/// One socket is owned exclusively by one `Connection`, and every method
/// takes `&mut self`; callers that need concurrency use one session per
/// thread. The socket is closed on drop.
pub struct Connection {
    config: ConnectionConfig,
    stream: Option<BufReader<TcpStream>>,
    state: SessionState,
}

impl Connection {
    /// Creates a new session (not yet connected). No I/O happens here.
    pub fn new(config: ConnectionConfig) -> Self {
        Self {
            config,
            stream: None,
            state: SessionState::Disconnected,
        }
    }

    /// Replaces host, port and password wholesale.
    ///
    /// A live socket is not touched; the new endpoint takes effect on the
    /// next [`connect`](Self::connect).
    pub fn rebind(&mut self, host: impl Into<String>, port: u16, password: impl Into<String>) {
        self.config.host = host.into();
        self.config.port = port;
        self.config.password = password.into();
    }

    /// Opens the socket and runs the auth handshake.
    ///
    /// An already-open session is disconnected first. On any failure the
    /// socket is closed and the state returns to
    /// [`SessionState::Disconnected`].
    pub fn connect(&mut self) -> Result<(), ClientError> {
        if self.stream.is_some() {
            tracing::debug!("connect() on a live session, disconnecting first");
            self.disconnect();
        }

        tracing::debug!("Connecting to {}:{}...", self.config.host, self.config.port);
        let stream = self.open_socket()?;
        stream.set_read_timeout(self.config.read_timeout)?;
        stream.set_nodelay(true).ok();

        self.stream = Some(BufReader::new(stream));
        self.state = SessionState::Authenticating;

        tracing::debug!("TCP connected, authenticating...");
        if let Err(e) = self.authenticate() {
            self.disconnect();
            return Err(e);
        }

        self.state = SessionState::Ready;
        tracing::debug!("Authentication accepted, session ready");
        Ok(())
    }

    /// Resolves the endpoint and opens the TCP socket, applying the connect
    /// timeout to each candidate address.
    fn open_socket(&self) -> Result<TcpStream, ClientError> {
        let addrs = (self.config.host.as_str(), self.config.port)
            .to_socket_addrs()
            .map_err(|e| self.connect_error(e))?;

        let mut last_err = None;
        for addr in addrs {
            match TcpStream::connect_timeout(&addr, self.config.connect_timeout) {
                Ok(stream) => return Ok(stream),
                Err(e) => last_err = Some(e),
            }
        }

        let err = last_err.unwrap_or_else(|| {
            std::io::Error::new(
                std::io::ErrorKind::AddrNotAvailable,
                "host resolved to no addresses",
            )
        });
        Err(self.connect_error(err))
    }

    fn connect_error(&self, err: std::io::Error) -> ClientError {
        let code = err.raw_os_error().unwrap_or(0);
        ClientError::Connect {
            host: self.config.host.clone(),
            port: self.config.port,
            code,
            details: errno::describe(code, &err.to_string()),
        }
    }

    /// Runs the challenge/response handshake, exactly once.
    fn authenticate(&mut self) -> Result<(), ClientError> {
        let challenge = self.read_frame()?;
        if !challenge.header_contains(AUTH_REQUEST_MARKER) {
            tracing::warn!("First frame is not an auth challenge");
            return Err(ClientError::MissingChallenge);
        }

        let auth = Command::Auth {
            password: self.config.password.clone(),
        };
        self.send(&auth)?;

        let reply = self.read_frame()?;
        if !reply.header_contains(COMMAND_REPLY_MARKER)
            || !reply.header_contains(AUTH_ACCEPTED_MARKER)
        {
            let text = reply
                .header_value(HEADER_REPLY_TEXT)
                .unwrap_or("(no Reply-Text)")
                .to_string();
            tracing::warn!("Authentication rejected: {}", text);
            return Err(ClientError::AuthRejected { reply: text });
        }

        Ok(())
    }

    /// Sends a typed command, logging it with credentials redacted.
    fn send(&mut self, command: &Command) -> Result<(), ClientError> {
        tracing::debug!("Sending command: {}", command);
        self.send_command(&command.line())
    }

    /// Writes `command + "\n\n"` to the open socket.
    ///
    /// A pure write: no reply is awaited. Callers using this directly own
    /// the follow-up [`read_frame`](Self::read_frame).
    pub fn send_command(&mut self, command: &str) -> Result<(), ClientError> {
        let stream = self.stream.as_mut().ok_or(ClientError::NotConnected)?;

        let mut wire = String::with_capacity(command.len() + HEADER_TERMINATOR.len());
        wire.push_str(command);
        wire.push_str(HEADER_TERMINATOR);

        let mut writer = stream.get_ref();
        writer.write_all(wire.as_bytes())?;
        Ok(())
    }

    /// Reads one frame from the open socket.
    ///
    /// Blocks until a frame arrives, the read timeout (if configured)
    /// expires, or the peer closes the stream. A closed stream yields an
    /// empty frame, not an error.
    pub fn read_frame(&mut self) -> Result<Frame, ClientError> {
        let stream = self.stream.as_mut().ok_or(ClientError::NotConnected)?;
        let frame = Frame::read_from(stream).map_err(|e| match e {
            ProtocolError::Io(e) => ClientError::Io(e),
            other => ClientError::Protocol(other),
        })?;
        tracing::debug!(
            "Read frame: {} header bytes, {} body bytes",
            frame.header().len(),
            frame.body().len()
        );
        Ok(frame)
    }

    /// Runs an api command and returns the reply body, trimmed.
    ///
    /// With `auto_reconnect` enabled (the default) a session that is not
    /// ready is connected first, re-running the full handshake; with it
    /// disabled the call fails with [`ClientError::NotConnected`].
    ///
    /// Transport failures during the reply read propagate. The session is
    /// left as-is either way; the caller decides whether to disconnect.
    pub fn execute(&mut self, command: &str) -> Result<String, ClientError> {
        if self.state != SessionState::Ready {
            if !self.config.auto_reconnect {
                return Err(ClientError::NotConnected);
            }
            tracing::debug!("execute() without a ready session, connecting first");
            self.connect()?;
        }

        let api = Command::Api {
            command: command.to_string(),
        };
        self.send(&api)?;

        let frame = self.read_frame()?;
        let raw = frame.raw();
        let (_, body) = split_header_body(&raw);
        Ok(String::from_utf8_lossy(body).trim().to_string())
    }

    /// Closes the socket if open. Idempotent; never fails.
    pub fn disconnect(&mut self) {
        if let Some(stream) = self.stream.take() {
            tracing::debug!(
                "Disconnecting from {}:{}",
                self.config.host,
                self.config.port
            );
            let _ = stream.get_ref().shutdown(Shutdown::Both);
        }
        self.state = SessionState::Disconnected;
    }

    /// Current lifecycle state.
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// True when the handshake has completed on the open socket.
    pub fn is_connected(&self) -> bool {
        self.stream.is_some() && self.state == SessionState::Ready
    }

    /// The configuration this session was built with.
    pub fn config(&self) -> &ConnectionConfig {
        &self.config
    }
}

impl Drop for Connection {
    /// Closes the socket exactly once even when an explicit
    /// [`disconnect`](Self::disconnect) already ran: the `Option::take`
    /// inside leaves nothing behind for this second pass.
    fn drop(&mut self) {
        self.disconnect();
    }
}
