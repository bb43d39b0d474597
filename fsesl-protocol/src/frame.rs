//! Content-Length framing for the event socket.
//!
//! A frame on the wire is a header block terminated by a blank line,
//! optionally followed by a body whose size is declared in a
//! `Content-Length` header:
//!
//! ```text
//! Content-Type: api/response\n
//! Content-Length: 14\n
//! \n
//! UP 0 years ...
//! ```
//!
//! The body has no terminator of its own; exactly `Content-Length` bytes
//! follow the blank line. Frames without a `Content-Length` header (the
//! auth challenge, most command replies) consist of the header block alone.

use crate::error::ProtocolError;
use crate::MAX_BODY_SIZE;
use std::borrow::Cow;
use std::io::{BufRead, Read};

/// Header key declaring the body length.
const CONTENT_LENGTH_KEY: &str = "Content-Length:";

/// One event socket frame: raw header block plus body, as delivered.
#[derive(Debug, Clone)]
pub struct Frame {
    header: Vec<u8>,
    body: Vec<u8>,
    declared_len: usize,
}

impl Frame {
    /// Reads one frame from a buffered source.
    ///
    /// Header lines are accumulated byte for byte (blank terminator
    /// included) until the terminator or end of stream. If a
    /// `Content-Length` header was seen, the body is read to the declared
    /// count, stopping early only at end of stream. When the same header
    /// appears more than once, the last occurrence wins.
    ///
    /// End of stream is not an error: the caller gets whatever was
    /// accumulated (an empty frame when the stream was already exhausted)
    /// and decides what that means. Only I/O failures and a declared
    /// length above [`MAX_BODY_SIZE`] fail.
    pub fn read_from<R: BufRead>(source: &mut R) -> Result<Self, ProtocolError> {
        let mut header = Vec::new();
        let mut declared_len = 0usize;
        let mut line = Vec::new();

        loop {
            line.clear();
            if source.read_until(b'\n', &mut line)? == 0 {
                break; // end of stream
            }
            header.extend_from_slice(&line);

            let trimmed = line.trim_ascii();
            if trimmed.is_empty() {
                break; // blank separator: end of headers
            }
            if let Ok(text) = std::str::from_utf8(trimmed) {
                if let Some(value) = text.strip_prefix(CONTENT_LENGTH_KEY) {
                    declared_len = value.trim().parse().unwrap_or(0);
                }
            }
        }

        if declared_len > MAX_BODY_SIZE {
            return Err(ProtocolError::BodyTooLarge {
                declared: declared_len,
                max: MAX_BODY_SIZE,
            });
        }

        let mut body = Vec::with_capacity(declared_len);
        if declared_len > 0 {
            source
                .by_ref()
                .take(declared_len as u64)
                .read_to_end(&mut body)?;
        }

        Ok(Self {
            header,
            body,
            declared_len,
        })
    }

    /// Raw header block, including the terminating blank line.
    pub fn header(&self) -> &[u8] {
        &self.header
    }

    /// Header block as text (lossy).
    pub fn header_str(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.header)
    }

    /// Body bytes exactly as delivered.
    pub fn body(&self) -> &[u8] {
        &self.body
    }

    /// Body as text (lossy).
    pub fn body_str(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.body)
    }

    /// Declared `Content-Length` value, 0 when the header was absent.
    pub fn declared_len(&self) -> usize {
        self.declared_len
    }

    /// Header block and body reassembled into the original wire bytes.
    pub fn raw(&self) -> Vec<u8> {
        let mut raw = Vec::with_capacity(self.header.len() + self.body.len());
        raw.extend_from_slice(&self.header);
        raw.extend_from_slice(&self.body);
        raw
    }

    /// True when nothing was read (the stream was already at end of
    /// stream).
    pub fn is_empty(&self) -> bool {
        self.header.is_empty() && self.body.is_empty()
    }

    /// True if the header block contains `needle` anywhere.
    pub fn header_contains(&self, needle: &str) -> bool {
        let needle = needle.as_bytes();
        needle.is_empty() || self.header.windows(needle.len()).any(|w| w == needle)
    }

    /// Value of the first `name: value` header line, trimmed.
    pub fn header_value(&self, name: &str) -> Option<&str> {
        self.header
            .split(|&b| b == b'\n')
            .filter_map(|line| std::str::from_utf8(line.trim_ascii()).ok())
            .find_map(|line| {
                let value = line.strip_prefix(name)?.strip_prefix(':')?;
                Some(value.trim())
            })
    }
}

/// Splits a raw frame at the first blank-line delimiter.
///
/// The delimiter belongs to neither part. With no delimiter present the
/// body is empty (never an error). Later `\n\n` sequences inside the body
/// are preserved.
pub fn split_header_body(raw: &[u8]) -> (&[u8], &[u8]) {
    match raw.windows(2).position(|w| w == b"\n\n") {
        Some(i) => (&raw[..i], &raw[i + 2..]),
        None => (raw, &[]),
    }
}
