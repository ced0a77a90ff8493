//! Storage Engine Module
//!
//! This module provides the core storage functionality for LineKV: a
//! thread-safe, sharded store holding strings, lists and sets.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                     StorageEngine                           │
//! │  ┌─────────┐ ┌─────────┐ ┌─────────┐ ┌─────────┐            │
//! │  │ Shard 0 │ │ Shard 1 │ │ Shard 2 │ │...64    │            │
//! │  │ RwLock  │ │ RwLock  │ │ RwLock  │ │ shards  │            │
//! │  └────┬────┘ └─────────┘ └─────────┘ └─────────┘            │
//! │       │                                                     │
//! │       ▼                                                     │
//! │  ┌─────────────────────────────┐                            │
//! │  │ Keyspace                    │                            │
//! │  │  strings: key -> String     │                            │
//! │  │  lists:   key -> VecDeque   │                            │
//! │  │  sets:    key -> HashSet    │                            │
//! │  └─────────────────────────────┘                            │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example
//!
//! ```
//! use linekv::storage::{StorageEngine, StoreError};
//!
//! let engine = StorageEngine::new();
//!
//! engine.lpush("letters", ["a", "b", "c"]).unwrap();
//! assert_eq!(
//!     engine.lrange("letters", 0, -1),
//!     Ok(Some(vec!["a".to_string(), "b".to_string(), "c".to_string()]))
//! );
//!
//! // Keys hold exactly one kind of value
//! assert_eq!(engine.get("letters"), Err(StoreError::WrongType));
//! ```

pub mod engine;
pub mod keyspace;

// Re-export commonly used types
pub use engine::{StorageEngine, StorageStats};
pub use keyspace::{KeyKind, StoreError};
