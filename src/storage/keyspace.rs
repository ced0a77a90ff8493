//! Per-Shard Keyspace
//!
//! A `Keyspace` holds the three value namespaces (strings, lists, sets) for
//! every key that hashes to one shard. Keeping all three behind the same lock
//! lets the engine check a key's type and mutate it in one critical section.
//!
//! ## Key-Type Policy
//!
//! A key lives in at most one namespace at a time:
//!
//! - Reading or writing a key of the wrong kind fails with
//!   [`StoreError::WrongType`].
//! - `SET` replaces a key of any kind.
//! - `DEL` removes the key from whichever namespace holds it.
//!
//! Lists and sets are dropped as soon as they become empty, so an empty
//! collection and a missing key look the same to every command.

use std::collections::{HashMap, HashSet, VecDeque};

/// The kind of value stored under a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyKind {
    String,
    List,
    Set,
}

impl KeyKind {
    /// Name reported by the `TYPE` command.
    pub fn as_str(self) -> &'static str {
        match self {
            KeyKind::String => "string",
            KeyKind::List => "list",
            KeyKind::Set => "set",
        }
    }
}

/// Errors returned by storage operations.
///
/// These are ordinary results, never panics: the command layer turns them
/// into error replies and the store is left unchanged.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    /// The key exists but holds a different kind of value.
    #[error("WRONGTYPE operation against a key holding the wrong kind of value")]
    WrongType,

    /// The stored string cannot be parsed as a 64-bit integer.
    #[error("value is not an integer or out of range")]
    NotAnInteger,

    /// The increment would leave the 64-bit integer range.
    #[error("increment or decrement would overflow")]
    Overflow,
}

/// The three namespaces for one shard.
#[derive(Debug, Default)]
pub(crate) struct Keyspace {
    pub(crate) strings: HashMap<String, String>,
    pub(crate) lists: HashMap<String, VecDeque<String>>,
    pub(crate) sets: HashMap<String, HashSet<String>>,
}

impl Keyspace {
    /// Returns the kind of value stored under `key`, if any.
    pub(crate) fn kind_of(&self, key: &str) -> Option<KeyKind> {
        if self.strings.contains_key(key) {
            Some(KeyKind::String)
        } else if self.lists.contains_key(key) {
            Some(KeyKind::List)
        } else if self.sets.contains_key(key) {
            Some(KeyKind::Set)
        } else {
            None
        }
    }

    /// Succeeds when `key` is absent or already holds `expected`.
    pub(crate) fn expect_kind(&self, key: &str, expected: KeyKind) -> Result<(), StoreError> {
        match self.kind_of(key) {
            Some(kind) if kind != expected => Err(StoreError::WrongType),
            _ => Ok(()),
        }
    }

    /// Removes `key` from every namespace. Returns `true` if anything was removed.
    pub(crate) fn remove(&mut self, key: &str) -> bool {
        let string = self.strings.remove(key).is_some();
        let list = self.lists.remove(key).is_some();
        let set = self.sets.remove(key).is_some();
        string || list || set
    }

    /// Number of keys across all three namespaces.
    pub(crate) fn len(&self) -> usize {
        self.strings.len() + self.lists.len() + self.sets.len()
    }

    pub(crate) fn clear(&mut self) {
        self.strings.clear();
        self.lists.clear();
        self.sets.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_of() {
        let mut space = Keyspace::default();
        assert_eq!(space.kind_of("k"), None);

        space.strings.insert("s".into(), "v".into());
        space.lists.insert("l".into(), VecDeque::from(vec!["a".to_string()]));
        space.sets.insert("m".into(), HashSet::from(["x".to_string()]));

        assert_eq!(space.kind_of("s"), Some(KeyKind::String));
        assert_eq!(space.kind_of("l"), Some(KeyKind::List));
        assert_eq!(space.kind_of("m"), Some(KeyKind::Set));
        assert_eq!(space.len(), 3);
    }

    #[test]
    fn test_expect_kind() {
        let mut space = Keyspace::default();
        assert_eq!(space.expect_kind("missing", KeyKind::List), Ok(()));

        space.strings.insert("s".into(), "v".into());
        assert_eq!(space.expect_kind("s", KeyKind::String), Ok(()));
        assert_eq!(
            space.expect_kind("s", KeyKind::Set),
            Err(StoreError::WrongType)
        );
    }

    #[test]
    fn test_remove_and_clear() {
        let mut space = Keyspace::default();
        space.strings.insert("a".into(), "1".into());
        space.lists.insert("b".into(), VecDeque::from(vec!["x".to_string()]));

        assert!(space.remove("b"));
        assert!(!space.remove("b"));
        assert_eq!(space.len(), 1);

        space.clear();
        assert_eq!(space.len(), 0);
    }

    #[test]
    fn test_kind_names() {
        assert_eq!(KeyKind::String.as_str(), "string");
        assert_eq!(KeyKind::List.as_str(), "list");
        assert_eq!(KeyKind::Set.as_str(), "set");
    }
}
