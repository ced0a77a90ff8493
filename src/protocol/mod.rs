//! Line Protocol Implementation
//!
//! LineKV speaks a plain-text protocol: the client sends one command per
//! line and the server answers with exactly one line.
//!
//! ```text
//! client: SET name Ariz\n
//! server: OK\n
//! client: GET name\n
//! server: "Ariz"\n
//! client: INCR visits\n
//! server: (integer) 1\n
//! ```
//!
//! ## Modules
//!
//! - `parser`: splits request lines into a command and its arguments
//! - `types`: defines the `Reply` enum and its line rendering

pub mod parser;
pub mod types;

// Re-export commonly used types for convenience
pub use parser::{parse_final_line, parse_message, ParseError, ParseResult, Request};
pub use types::Reply;
