//! Reply Types
//!
//! Every request gets exactly one reply line. This module defines the closed
//! set of reply kinds and how each one is rendered on the wire.
//!
//! ## Line Format
//!
//! | Reply     | Wire line            |
//! |-----------|----------------------|
//! | Status    | `OK`                 |
//! | Value     | `"hello"`            |
//! | Integer   | `(integer) 42`       |
//! | Array     | `1) "a" 2) "b"`      |
//! | Empty     | `(empty)`            |
//! | Nil       | `(nil)`              |
//! | Error     | `ERROR: message`     |
//!
//! Every line is terminated with a single `\n`. Values are quoted so that an
//! empty string (`""`) can never be confused with nil or empty.

use std::fmt;

/// The line terminator used by the protocol
pub const LF: u8 = b'\n';

/// Prefix carried by every error line
pub const ERROR_PREFIX: &str = "ERROR: ";

/// A reply to one command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// A bare status word such as `OK`, `PONG` or a type name.
    Status(String),

    /// A string value. Rendered quoted.
    Value(String),

    /// A numeric result. Every command returning a number uses this.
    Integer(i64),

    /// A sequence of values rendered on one line.
    Array(Vec<String>),

    /// A range or collection that exists but selects nothing.
    Empty,

    /// No such key.
    Nil,

    /// A protocol or semantic error. The connection stays open.
    Error(String),
}

impl Reply {
    /// Creates a status reply.
    pub fn status(s: impl Into<String>) -> Self {
        Reply::Status(s.into())
    }

    /// Creates a value reply.
    ///
    /// # Example
    /// ```
    /// use linekv::protocol::Reply;
    /// assert_eq!(Reply::value("hello").to_string(), "\"hello\"");
    /// ```
    pub fn value(s: impl Into<String>) -> Self {
        Reply::Value(s.into())
    }

    /// Creates an error reply.
    ///
    /// # Example
    /// ```
    /// use linekv::protocol::Reply;
    /// let err = Reply::error("unknown command 'FOO'");
    /// assert_eq!(err.to_string(), "ERROR: unknown command 'FOO'");
    /// ```
    pub fn error(s: impl Into<String>) -> Self {
        Reply::Error(s.into())
    }

    pub fn integer(n: i64) -> Self {
        Reply::Integer(n)
    }

    /// Creates an array reply, or `Empty` if there is nothing in it.
    pub fn array(values: Vec<String>) -> Self {
        if values.is_empty() {
            Reply::Empty
        } else {
            Reply::Array(values)
        }
    }

    pub fn nil() -> Self {
        Reply::Nil
    }

    pub fn empty() -> Self {
        Reply::Empty
    }

    /// Common reply for successful operations
    pub fn ok() -> Self {
        Reply::Status("OK".to_string())
    }

    pub fn pong() -> Self {
        Reply::Status("PONG".to_string())
    }

    /// Serializes the reply to one newline-terminated line.
    pub fn serialize(&self) -> Vec<u8> {
        let mut buf = Vec::new();
        self.serialize_into(&mut buf);
        buf
    }

    /// Serializes the reply into an existing buffer.
    pub fn serialize_into(&self, buf: &mut Vec<u8>) {
        buf.extend_from_slice(self.to_string().as_bytes());
        buf.push(LF);
    }

    /// Returns true if this reply is nil.
    pub fn is_nil(&self) -> bool {
        matches!(self, Reply::Nil)
    }

    /// Returns true if this reply is an error.
    pub fn is_error(&self) -> bool {
        matches!(self, Reply::Error(_))
    }
}

/// Writes `s` as a quoted string, escaping anything that would break the line.
fn write_quoted(f: &mut fmt::Formatter<'_>, s: &str) -> fmt::Result {
    f.write_str("\"")?;
    for ch in s.chars() {
        match ch {
            '"' => f.write_str("\\\"")?,
            '\\' => f.write_str("\\\\")?,
            '\n' => f.write_str("\\n")?,
            '\r' => f.write_str("\\r")?,
            _ => write!(f, "{}", ch)?,
        }
    }
    f.write_str("\"")
}

/// Writes `s` unquoted with line breaks flattened to spaces.
fn write_bare(f: &mut fmt::Formatter<'_>, s: &str) -> fmt::Result {
    for ch in s.chars() {
        match ch {
            '\n' | '\r' => f.write_str(" ")?,
            _ => write!(f, "{}", ch)?,
        }
    }
    Ok(())
}

impl fmt::Display for Reply {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reply::Status(s) => write_bare(f, s),
            Reply::Value(s) => write_quoted(f, s),
            Reply::Integer(n) => write!(f, "(integer) {}", n),
            Reply::Array(values) if values.is_empty() => f.write_str("(empty)"),
            Reply::Array(values) => {
                for (i, value) in values.iter().enumerate() {
                    if i > 0 {
                        f.write_str(" ")?;
                    }
                    write!(f, "{}) ", i + 1)?;
                    write_quoted(f, value)?;
                }
                Ok(())
            }
            Reply::Empty => f.write_str("(empty)"),
            Reply::Nil => f.write_str("(nil)"),
            Reply::Error(s) => {
                f.write_str(ERROR_PREFIX)?;
                write_bare(f, s)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_serialize() {
        assert_eq!(Reply::ok().serialize(), b"OK\n");
        assert_eq!(Reply::pong().serialize(), b"PONG\n");
        assert_eq!(Reply::status("list").serialize(), b"list\n");
    }

    #[test]
    fn test_value_serialize() {
        assert_eq!(Reply::value("hello world").serialize(), b"\"hello world\"\n");
        assert_eq!(Reply::value("").serialize(), b"\"\"\n");
    }

    #[test]
    fn test_value_escaping() {
        assert_eq!(
            Reply::value("say \"hi\"\\").to_string(),
            r#""say \"hi\"\\""#
        );
        assert_eq!(Reply::value("a\nb").to_string(), r#""a\nb""#);
    }

    #[test]
    fn test_integer_serialize() {
        assert_eq!(Reply::integer(1000).serialize(), b"(integer) 1000\n");
        assert_eq!(Reply::integer(-42).serialize(), b"(integer) -42\n");
    }

    #[test]
    fn test_nil_and_empty_differ() {
        assert_eq!(Reply::nil().serialize(), b"(nil)\n");
        assert_eq!(Reply::empty().serialize(), b"(empty)\n");
        assert_ne!(Reply::nil().to_string(), Reply::empty().to_string());
        assert!(Reply::nil().is_nil());
        assert!(!Reply::empty().is_nil());
        assert!(!Reply::value("").is_nil());
    }

    #[test]
    fn test_array_serialize() {
        let reply = Reply::array(vec!["a".to_string(), "b c".to_string()]);
        assert_eq!(reply.serialize(), b"1) \"a\" 2) \"b c\"\n");
    }

    #[test]
    fn test_empty_array_is_empty() {
        assert_eq!(Reply::array(vec![]), Reply::Empty);
        assert_eq!(Reply::Array(vec![]).to_string(), "(empty)");
    }

    #[test]
    fn test_error_serialize() {
        let reply = Reply::error("unknown command 'FOO'");
        assert_eq!(reply.serialize(), b"ERROR: unknown command 'FOO'\n");
        assert!(reply.is_error());
        assert!(reply.to_string().contains("ERROR"));
    }

    #[test]
    fn test_single_line_guarantee() {
        let replies = [
            Reply::status("multi\nline"),
            Reply::value("multi\nline"),
            Reply::error("multi\r\nline"),
            Reply::array(vec!["x\ny".to_string()]),
        ];

        for reply in replies {
            let bytes = reply.serialize();
            let newlines = bytes.iter().filter(|&&b| b == LF).count();
            assert_eq!(newlines, 1, "reply {:?} spans lines", reply);
        }
    }
}
