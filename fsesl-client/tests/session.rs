//! Integration tests against a scripted in-process switch.
//!
//! Each test spawns a listener thread that plays one side of the event
//! socket dialogue and records every command line it receives. Joining the
//! thread doubles as proof that the client closed its socket: the scripts
//! end by reading to end of stream.

use fsesl_client::{Client, ClientError, Connection, ConnectionConfig, SessionState};
use std::io::{BufRead, BufReader, Read, Write};
use std::net::{Shutdown, TcpListener, TcpStream};
use std::thread::{self, JoinHandle};
use std::time::Duration;

const AUTH_CHALLENGE: &str = "Content-Type: auth/request\n\n";
const AUTH_OK: &str = "Content-Type: command/reply\nReply-Text: +OK accepted\n\n";

fn api_response(body: &str) -> String {
    format!(
        "Content-Type: api/response\nContent-Length: {}\n\n{}",
        body.len(),
        body
    )
}

fn test_config(port: u16) -> ConnectionConfig {
    ConnectionConfig::new("127.0.0.1", port, "secret")
        .with_connect_timeout(Duration::from_secs(5))
        .with_read_timeout(Duration::from_secs(5))
}

/// One accepted connection, switch side.
struct SwitchSession {
    reader: BufReader<TcpStream>,
    commands: Vec<String>,
}

impl SwitchSession {
    fn new(stream: TcpStream) -> Self {
        Self {
            reader: BufReader::new(stream),
            commands: Vec::new(),
        }
    }

    fn send(&mut self, data: &str) {
        let mut writer = self.reader.get_ref();
        writer.write_all(data.as_bytes()).unwrap();
    }

    /// Reads one `<line>\n\n` command; false at end of stream.
    fn read_command(&mut self) -> bool {
        let mut line = String::new();
        if self.reader.read_line(&mut line).unwrap() == 0 {
            return false;
        }
        let mut blank = String::new();
        self.reader.read_line(&mut blank).unwrap();
        self.commands.push(line.trim_end().to_string());
        true
    }

    /// Drains the socket until the peer closes it. Tolerates a reset.
    fn read_to_eof(&mut self) {
        let mut sink = Vec::new();
        let _ = self.reader.read_to_end(&mut sink);
    }

    /// Half-close: stops sending, keeps reading.
    fn shutdown_write(&mut self) {
        self.reader.get_ref().shutdown(Shutdown::Write).unwrap();
    }
}

/// A scripted switch on an ephemeral port.
struct MockSwitch {
    port: u16,
    handle: JoinHandle<Vec<String>>,
}

impl MockSwitch {
    fn spawn(script: impl FnOnce(&mut SwitchSession) + Send + 'static) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let port = listener.local_addr().unwrap().port();
        let handle = thread::spawn(move || {
            let (stream, _) = listener.accept().unwrap();
            let mut session = SwitchSession::new(stream);
            script(&mut session);
            session.commands
        });
        Self { port, handle }
    }

    /// Challenge, accept the auth, then answer each command with the next
    /// canned reply.
    fn accepting(replies: Vec<String>) -> Self {
        Self::spawn(move |s| {
            s.send(AUTH_CHALLENGE);
            s.read_command();
            s.send(AUTH_OK);
            for reply in replies {
                if !s.read_command() {
                    return;
                }
                s.send(&reply);
            }
            s.read_to_eof();
        })
    }

    /// Challenge, then turn the auth down with the given reply text.
    fn rejecting(reply_text: &'static str) -> Self {
        Self::spawn(move |s| {
            s.send(AUTH_CHALLENGE);
            s.read_command();
            s.send(&format!(
                "Content-Type: command/reply\nReply-Text: {reply_text}\n\n"
            ));
            s.read_to_eof();
        })
    }

    /// Waits for the client to close, then yields the recorded commands.
    fn commands(self) -> Vec<String> {
        self.handle.join().unwrap()
    }
}

#[test]
fn test_connect_authenticates_and_reaches_ready() {
    let mock = MockSwitch::accepting(vec![]);
    let mut conn = Connection::new(test_config(mock.port));

    conn.connect().unwrap();
    assert_eq!(conn.state(), SessionState::Ready);
    assert!(conn.is_connected());

    conn.disconnect();
    assert_eq!(mock.commands(), ["auth secret"]);
}

#[test]
fn test_auth_rejected_closes_socket() {
    let mock = MockSwitch::rejecting("-ERR invalid");
    let mut conn = Connection::new(test_config(mock.port));

    let err = conn.connect().unwrap_err();
    match &err {
        ClientError::AuthRejected { reply } => assert_eq!(reply, "-ERR invalid"),
        other => panic!("expected AuthRejected, got {other:?}"),
    }
    assert!(!err.is_retryable());
    assert_eq!(conn.state(), SessionState::Disconnected);

    // The script reads to end of stream, so joining proves the client
    // closed the socket after the rejection.
    assert_eq!(mock.commands(), ["auth secret"]);
}

#[test]
fn test_missing_challenge() {
    let mock = MockSwitch::spawn(|s| {
        s.send("Content-Type: command/reply\nReply-Text: +OK accepted\n\n");
        s.read_to_eof();
    });
    let mut conn = Connection::new(test_config(mock.port));

    let err = conn.connect().unwrap_err();
    assert!(matches!(err, ClientError::MissingChallenge));
    assert_eq!(conn.state(), SessionState::Disconnected);
    assert!(mock.commands().is_empty());
}

#[test]
fn test_execute_status_returns_exact_body() {
    let body = "UP 0 years, 0 days, 4 hours, 22 minutes\n1 session since startup";
    let mock = MockSwitch::accepting(vec![api_response(body)]);
    let mut conn = Connection::new(test_config(mock.port));

    conn.connect().unwrap();
    let reply = conn.execute("status").unwrap();
    assert_eq!(reply, body);

    conn.disconnect();
    assert_eq!(mock.commands(), ["auth secret", "api status"]);
}

#[test]
fn test_execute_trims_surrounding_whitespace() {
    let mock = MockSwitch::accepting(vec![api_response("\n+OK\n\n")]);
    let mut conn = Connection::new(test_config(mock.port));

    conn.connect().unwrap();
    assert_eq!(conn.execute("uptime").unwrap(), "+OK");
    conn.disconnect();
    mock.commands();
}

#[test]
fn test_execute_preserves_blank_lines_inside_body() {
    let body = "profile: internal\n\nprofile: external";
    let mock = MockSwitch::accepting(vec![api_response(body)]);
    let mut conn = Connection::new(test_config(mock.port));

    conn.connect().unwrap();
    assert_eq!(conn.execute("sofia status").unwrap(), body);
    conn.disconnect();
    mock.commands();
}

#[test]
fn test_execute_cold_session_connects_first() {
    let mock = MockSwitch::accepting(vec![api_response("+OK")]);
    let mut conn = Connection::new(test_config(mock.port));

    // No explicit connect(): the default policy dials and authenticates.
    let reply = conn.execute("status").unwrap();
    assert_eq!(reply, "+OK");
    assert!(conn.is_connected());

    conn.disconnect();
    assert_eq!(mock.commands(), ["auth secret", "api status"]);
}

#[test]
fn test_execute_strict_mode_after_disconnect() {
    let mock = MockSwitch::accepting(vec![]);
    let config = test_config(mock.port).with_auto_reconnect(false);
    let mut conn = Connection::new(config);

    conn.connect().unwrap();
    conn.disconnect();

    let err = conn.execute("status").unwrap_err();
    assert!(matches!(err, ClientError::NotConnected));
    assert_eq!(mock.commands(), ["auth secret"]);
}

#[test]
fn test_disconnect_twice_is_noop() {
    let mock = MockSwitch::accepting(vec![]);
    let mut conn = Connection::new(test_config(mock.port));

    conn.connect().unwrap();
    conn.disconnect();
    conn.disconnect();
    assert_eq!(conn.state(), SessionState::Disconnected);
    mock.commands();
}

#[test]
fn test_drop_closes_socket() {
    let mock = MockSwitch::accepting(vec![]);
    {
        let mut conn = Connection::new(test_config(mock.port));
        conn.connect().unwrap();
    }
    // Joining only returns once the script hits end of stream.
    assert_eq!(mock.commands(), ["auth secret"]);
}

#[test]
fn test_connect_while_open_replaces_the_socket() {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();

    let handle = thread::spawn(move || {
        let mut sessions = Vec::new();
        for _ in 0..2 {
            let (stream, _) = listener.accept().unwrap();
            let mut session = SwitchSession::new(stream);
            session.send(AUTH_CHALLENGE);
            session.read_command();
            session.send(AUTH_OK);
            sessions.push(session);
        }
        // The second dial must have closed the first socket.
        sessions[0].read_to_eof();
        sessions
            .into_iter()
            .flat_map(|s| s.commands)
            .collect::<Vec<_>>()
    });

    let mut conn = Connection::new(test_config(port));
    conn.connect().unwrap();
    conn.connect().unwrap();
    assert!(conn.is_connected());
    drop(conn);

    assert_eq!(handle.join().unwrap(), ["auth secret", "auth secret"]);
}

#[test]
fn test_read_timeout_surfaces_as_io() {
    // Accepts, then goes silent: no challenge ever arrives.
    let mock = MockSwitch::spawn(|s| {
        s.read_to_eof();
    });
    let config = ConnectionConfig::new("127.0.0.1", mock.port, "secret")
        .with_connect_timeout(Duration::from_secs(5))
        .with_read_timeout(Duration::from_millis(100));
    let mut conn = Connection::new(config);

    let err = conn.connect().unwrap_err();
    assert!(matches!(err, ClientError::Io(_)));
    assert!(err.is_retryable());
    assert_eq!(conn.state(), SessionState::Disconnected);
    mock.commands();
}

#[test]
fn test_connect_refused_reports_errno() {
    // Bind then drop: nothing listens on the port anymore.
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);

    let mut conn = Connection::new(test_config(port));
    let err = conn.connect().unwrap_err();
    match &err {
        ClientError::Connect {
            host,
            port: reported,
            code,
            details,
        } => {
            assert_eq!(host, "127.0.0.1");
            assert_eq!(*reported, port);
            assert!(
                *code == fsesl_client::errno::ECONNREFUSED_BSD
                    || *code == fsesl_client::errno::ECONNREFUSED_LINUX,
                "unexpected errno {code}"
            );
            assert!(details.contains("Connection refused"), "details: {details}");
        }
        other => panic!("expected Connect, got {other:?}"),
    }
    assert!(err.is_retryable());
}

#[test]
fn test_execute_after_server_close_returns_empty() {
    let mock = MockSwitch::spawn(|s| {
        s.send(AUTH_CHALLENGE);
        s.read_command();
        s.send(AUTH_OK);
        s.shutdown_write();
        s.read_command();
        s.read_to_eof();
    });
    let mut conn = Connection::new(test_config(mock.port));

    conn.connect().unwrap();
    // The peer half-closed: the reply read hits end of stream, which the
    // framing layer reports as an empty frame rather than an error.
    let reply = conn.execute("status").unwrap();
    assert_eq!(reply, "");
    assert!(conn.is_connected());

    drop(conn);
    assert_eq!(mock.commands(), ["auth secret", "api status"]);
}

#[test]
fn test_send_command_and_read_frame_raw() {
    let mock = MockSwitch::accepting(vec![api_response("+OK rawhide")]);
    let mut conn = Connection::new(test_config(mock.port));

    conn.connect().unwrap();
    conn.send_command("api uptime").unwrap();
    let frame = conn.read_frame().unwrap();

    assert!(frame.header_contains("Content-Type: api/response"));
    assert_eq!(frame.body_str(), "+OK rawhide");
    assert_eq!(frame.declared_len(), 11);

    conn.disconnect();
    assert_eq!(mock.commands(), ["auth secret", "api uptime"]);
}

#[test]
fn test_client_named_commands_send_expected_lines() {
    let replies = (0..6).map(|_| api_response("+OK")).collect();
    let mock = MockSwitch::accepting(replies);
    let mut client = Client::new(test_config(mock.port));

    client.connect().unwrap();
    client.status().unwrap();
    client.show_channels().unwrap();
    client.show_calls().unwrap();
    client.sofia_status().unwrap();
    client.sofia_status_profile("internal").unwrap();
    client.execute("uptime").unwrap();
    client.disconnect();

    assert_eq!(
        mock.commands(),
        [
            "auth secret",
            "api status",
            "api show channels",
            "api show calls",
            "api sofia status",
            "api sofia status profile internal",
            "api uptime",
        ]
    );
}
