//! Request Line Parser
//!
//! Requests are plain text, one command per line:
//!
//! ```text
//! SET greeting hello world\n
//! ```
//!
//! A line is split on single spaces into a command name followed by its
//! arguments. Consecutive spaces produce empty arguments, which lets `SET`
//! rebuild a value with its original spacing. A trailing `\r` is dropped so
//! that telnet-style clients work too.
//!
//! ## How the Parser Works
//!
//! [`parse_message`] looks at the front of a read buffer and returns either:
//! - `Some((Ok(request), consumed))` - a complete line was parsed
//! - `Some((Err(error), consumed))` - a complete but malformed line; the
//!   caller reports the error and carries on with the next line
//! - `None` - no newline yet, the caller should read more data
//!
//! In both `Some` cases the caller advances the buffer by `consumed` bytes.

use crate::protocol::types::LF;
use thiserror::Error;

/// Errors that can occur while parsing a request line.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// The line has no command name
    #[error("empty command")]
    EmptyCommand,

    /// The line is not valid UTF-8
    #[error("invalid UTF-8 in request line")]
    InvalidUtf8,
}

/// Result type for parsing operations.
pub type ParseResult<T> = Result<T, ParseError>;

/// A parsed request line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    /// Command name exactly as sent (case is normalized by the dispatcher)
    pub command: String,
    /// Arguments following the command
    pub args: Vec<String>,
}

impl Request {
    /// Splits one line (without its terminator) into command and arguments.
    ///
    /// # Example
    /// ```
    /// use linekv::protocol::Request;
    ///
    /// let request = Request::from_line("SET name Ariz").unwrap();
    /// assert_eq!(request.command, "SET");
    /// assert_eq!(request.args, vec!["name", "Ariz"]);
    /// ```
    pub fn from_line(line: &str) -> ParseResult<Self> {
        let line = line.strip_suffix('\r').unwrap_or(line);

        let mut parts = line.split(' ');
        let command = match parts.next() {
            Some(command) if !command.is_empty() => command.to_string(),
            _ => return Err(ParseError::EmptyCommand),
        };

        Ok(Self {
            command,
            args: parts.map(str::to_string).collect(),
        })
    }
}

/// Attempts to parse one request line from the front of `buf`.
pub fn parse_message(buf: &[u8]) -> Option<(ParseResult<Request>, usize)> {
    let end = buf.iter().position(|&b| b == LF)?;
    let consumed = end + 1;

    let result = std::str::from_utf8(&buf[..end])
        .map_err(|_| ParseError::InvalidUtf8)
        .and_then(Request::from_line);

    Some((result, consumed))
}

/// Parses the bytes left over when the client closes without a final `\n`.
///
/// The remainder is treated as one last line.
pub fn parse_final_line(buf: &[u8]) -> ParseResult<Request> {
    std::str::from_utf8(buf)
        .map_err(|_| ParseError::InvalidUtf8)
        .and_then(Request::from_line)
}
