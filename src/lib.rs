//! # LineKV - An In-Memory Key-Value Store over a Line Protocol
//!
//! LineKV is a small Redis-style key-value store. Clients send one command
//! per line over TCP and get exactly one human-readable line back. Values
//! can be strings, lists or sets.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                              LineKV                                     │
//! │                                                                         │
//! │  ┌─────────────┐    ┌─────────────┐    ┌─────────────┐                  │
//! │  │ TCP Server  │───>│ Connection  │───>│  Command    │                  │
//! │  │ (Listener)  │    │  Handler    │    │  Handler    │                  │
//! │  └─────────────┘    └──────┬──────┘    └──────┬──────┘                  │
//! │                            │                  │                         │
//! │                            ▼                  ▼                         │
//! │  ┌─────────────┐    ┌──────────────────────────────────────────────┐    │
//! │  │   Line      │    │              StorageEngine                   │    │
//! │  │   Parser    │    │  ┌────────┐ ┌────────┐ ┌────────┐ ┌────────┐ │    │
//! │  │             │    │  │Shard 0 │ │Shard 1 │ │Shard 2 │ │...N    │ │    │
//! │  └─────────────┘    │  │RwLock  │ │RwLock  │ │RwLock  │ │shards  │ │    │
//! │                     │  └────────┘ └────────┘ └────────┘ └────────┘ │    │
//! │                     └──────────────────────────────────────────────┘    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```ignore
//! use linekv::commands::CommandHandler;
//! use linekv::connection::{handle_connection, ConnectionStats};
//! use linekv::storage::StorageEngine;
//! use std::sync::Arc;
//! use tokio::net::TcpListener;
//!
//! #[tokio::main]
//! async fn main() {
//!     let storage = Arc::new(StorageEngine::new());
//!     let handler = CommandHandler::new(Arc::clone(&storage));
//!     let stats = Arc::new(ConnectionStats::new());
//!
//!     let listener = TcpListener::bind("127.0.0.1:6379").await.unwrap();
//!
//!     loop {
//!         let (stream, addr) = listener.accept().await.unwrap();
//!         tokio::spawn(handle_connection(stream, addr, handler.clone(), Arc::clone(&stats)));
//!     }
//! }
//! ```
//!
//! ## Module Overview
//!
//! - [`protocol`]: request line parsing and reply rendering
//! - [`storage`]: thread-safe storage engine for strings, lists and sets
//! - [`commands`]: command resolution, arity checks and execution
//! - [`connection`]: client connection management
//! - [`client`]: line client used by `linekv-cli`
//! - [`config`]: server command-line options
//!
//! ## Design Highlights
//!
//! ### Thread Safety
//!
//! The storage engine uses a sharded design with 64 independent RwLocks.
//! Each shard holds all three value namespaces for its keys, so every
//! operation on one key, including `INCR`'s read-modify-write, runs under a
//! single lock.
//!
//! ### One Kind per Key
//!
//! A key holds a string, a list or a set, never more than one. Using a key
//! as the wrong kind returns a `WRONGTYPE` error instead of silently
//! creating a second value.

pub mod client;
pub mod commands;
pub mod config;
pub mod connection;
pub mod protocol;
pub mod storage;

// Re-export commonly used types for convenience
pub use client::{Client, ClientError};
pub use commands::{CommandHandler, CommandKind};
pub use config::ServerConfig;
pub use connection::{handle_connection, ConnectionStats};
pub use protocol::{ParseError, Reply, Request};
pub use storage::{StorageEngine, StorageStats, StoreError};

/// The default port LineKV listens on (same as Redis)
pub const DEFAULT_PORT: u16 = 6379;

/// The default host LineKV binds to
pub const DEFAULT_HOST: &str = "127.0.0.1";

/// Version of LineKV
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
