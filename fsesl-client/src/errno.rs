//! Diagnostic text for well-known socket error codes.
//!
//! Connect failures carry a raw OS errno. The codes that dominate support
//! traffic get a fuller explanation than the one-line system message; the
//! rest fall through to whatever the OS said.

/// `ETIMEDOUT` on macOS and the BSDs.
pub const ETIMEDOUT_BSD: i32 = 60;

/// `ECONNREFUSED` on macOS and the BSDs.
pub const ECONNREFUSED_BSD: i32 = 61;

/// `ECONNREFUSED` on Linux.
pub const ECONNREFUSED_LINUX: i32 = 111;

/// Returns a human-oriented description of `code`.
///
/// Codes outside the catalog render as `"(<code>) <fallback>"`, with
/// `fallback` typically the OS error message.
pub fn describe(code: i32, fallback: &str) -> String {
    match code {
        ETIMEDOUT_BSD => format!(
            "({}) Operation timed out. This often means a firewall is silently \
             blocking the connection or the destination server is not reachable.",
            code
        ),
        ECONNREFUSED_BSD | ECONNREFUSED_LINUX => format!(
            "({}) Connection refused. The server is reachable, but no service is \
             listening on the specified port, or a firewall is actively rejecting \
             the connection.",
            code
        ),
        _ => format!("({}) {}", code, fallback),
    }
}
