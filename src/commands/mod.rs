//! Command Handler Module
//!
//! This module implements the command processing layer for LineKV.
//! It receives parsed request lines, executes them against the storage
//! engine, and returns a one-line reply.
//!
//! ## Architecture
//!
//! ```text
//! Client Request
//!       │
//!       ▼
//! ┌─────────────────┐
//! │  Line Parser    │  (protocol module)
//! └────────┬────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │ CommandHandler  │  (this module)
//! │                 │
//! │  - Resolve      │
//! │  - Validate     │
//! │  - Execute      │
//! └────────┬────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │ StorageEngine   │  (storage module)
//! └─────────────────┘
//! ```
//!
//! ## Supported Commands
//!
//! - Strings: `SET`, `GET`, `DEL`, `INCR`, `INCRBY`, `DECR`, `DECRBY`
//! - Lists: `LPUSH`, `RPUSH`, `LPOP`, `RPOP`, `LRANGE`, `LLEN`
//! - Sets: `SADD`, `SREM`, `SISMEMBER`, `SMEMBERS`, `SCARD`
//! - Keys: `EXISTS`, `TYPE`
//! - Server: `PING`, `ECHO`, `INFO`, `DBSIZE`, `FLUSHDB`, `QUIT`

pub mod handler;

// Re-export the main command handler
pub use handler::{CommandHandler, CommandKind};
