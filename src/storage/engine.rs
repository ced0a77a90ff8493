//! Thread-Safe Storage Engine
//!
//! This module implements the core storage engine for LineKV. It owns every
//! key across the string, list and set namespaces and implements the value
//! semantics of each command.
//!
//! ## Design Decisions
//!
//! 1. **Sharded Locks**: The keyspace is split into shards so that unrelated
//!    keys do not contend on a single lock.
//! 2. **One Lock per Key**: A shard holds all three namespaces for its keys
//!    behind one `RwLock`. Type checks and read-modify-write operations such
//!    as `INCR` therefore run in a single critical section.
//! 3. **Synchronous API**: No method awaits or performs I/O while holding a
//!    lock. Callers in async code invoke the engine directly.
//!
//! ## Concurrency Model
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                     StorageEngine                           │
//! │  ┌──────────┐ ┌──────────┐ ┌──────────┐ ┌──────────┐        │
//! │  │ Shard 0  │ │ Shard 1  │ │ Shard 2  │ │ Shard N  │        │
//! │  │ RwLock   │ │ RwLock   │ │ RwLock   │ │ RwLock   │        │
//! │  │ strings  │ │ strings  │ │ strings  │ │ strings  │        │
//! │  │ lists    │ │ lists    │ │ lists    │ │ lists    │        │
//! │  │ sets     │ │ sets     │ │ sets     │ │ sets     │        │
//! │  └──────────┘ └──────────┘ └──────────┘ └──────────┘        │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! A key always hashes to the same shard, so operations on one key are
//! linearized by that shard's lock.

use crate::storage::keyspace::{KeyKind, Keyspace, StoreError};
use std::collections::VecDeque;
use std::hash::{DefaultHasher, Hash, Hasher};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Number of shards for the storage engine.
const NUM_SHARDS: usize = 64;

/// A single shard containing a portion of the keyspace.
#[derive(Debug, Default)]
struct Shard {
    keyspace: RwLock<Keyspace>,
}

impl Shard {
    // Every mutation completes before its guard drops, so a poisoned lock
    // still guards consistent maps.
    fn read(&self) -> RwLockReadGuard<'_, Keyspace> {
        self.keyspace.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Keyspace> {
        self.keyspace.write().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Snapshot of engine statistics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StorageStats {
    /// Number of keys across all namespaces
    pub keys: u64,
    /// GET operations
    pub get_ops: u64,
    /// SET operations
    pub set_ops: u64,
    /// DEL operations
    pub del_ops: u64,
    /// List operations (push, pop, range)
    pub list_ops: u64,
    /// Set operations (add, remove, membership)
    pub set_member_ops: u64,
    /// INCR/DECR family operations
    pub incr_ops: u64,
}

/// The main storage engine for LineKV.
///
/// Wrap it in an `Arc` and share it across all connection tasks. All
/// operations are thread-safe and none of them panic on bad input: missing
/// keys, wrong types and unparsable integers come back as values.
///
/// # Example
///
/// ```
/// use linekv::storage::StorageEngine;
///
/// let engine = StorageEngine::new();
///
/// engine.set("name", "Ariz");
/// assert_eq!(engine.get("name"), Ok(Some("Ariz".to_string())));
///
/// assert_eq!(engine.incr("visits"), Ok(1));
/// assert_eq!(engine.rpush("queue", ["a", "b"]), Ok(2));
/// ```
pub struct StorageEngine {
    shards: Vec<Shard>,
    get_count: AtomicU64,
    set_count: AtomicU64,
    del_count: AtomicU64,
    list_op_count: AtomicU64,
    set_op_count: AtomicU64,
    incr_count: AtomicU64,
}

impl std::fmt::Debug for StorageEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StorageEngine")
            .field("shards", &self.shards.len())
            .field("get_count", &self.get_count.load(Ordering::Relaxed))
            .field("set_count", &self.set_count.load(Ordering::Relaxed))
            .finish()
    }
}

impl Default for StorageEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl StorageEngine {
    /// Creates a new, empty storage engine.
    pub fn new() -> Self {
        let shards = (0..NUM_SHARDS).map(|_| Shard::default()).collect();

        Self {
            shards,
            get_count: AtomicU64::new(0),
            set_count: AtomicU64::new(0),
            del_count: AtomicU64::new(0),
            list_op_count: AtomicU64::new(0),
            set_op_count: AtomicU64::new(0),
            incr_count: AtomicU64::new(0),
        }
    }

    /// Determines which shard a key belongs to.
    #[inline]
    fn shard_index(&self, key: &str) -> usize {
        let mut hasher = DefaultHasher::new();
        key.hash(&mut hasher);
        (hasher.finish() as usize) % NUM_SHARDS
    }

    #[inline]
    fn shard_for(&self, key: &str) -> &Shard {
        &self.shards[self.shard_index(key)]
    }

    // ========================================================================
    // STRING OPERATIONS
    // ========================================================================

    /// Stores `value` under `key`, replacing a value of any kind.
    pub fn set(&self, key: &str, value: impl Into<String>) {
        self.set_count.fetch_add(1, Ordering::Relaxed);

        let mut space = self.shard_for(key).write();
        space.lists.remove(key);
        space.sets.remove(key);
        space.strings.insert(key.to_owned(), value.into());
    }

    /// Gets the string stored under `key`.
    ///
    /// Returns `Ok(None)` if the key doesn't exist. An empty string is a
    /// present value and comes back as `Ok(Some(""))`.
    pub fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        self.get_count.fetch_add(1, Ordering::Relaxed);

        let space = self.shard_for(key).read();
        space.expect_kind(key, KeyKind::String)?;
        Ok(space.strings.get(key).cloned())
    }

    /// Deletes a key of any kind.
    ///
    /// # Returns
    ///
    /// Returns `true` if the key was deleted, `false` if it didn't exist.
    pub fn delete(&self, key: &str) -> bool {
        self.del_count.fetch_add(1, Ordering::Relaxed);

        self.shard_for(key).write().remove(key)
    }

    /// Increments an integer value by 1.
    ///
    /// If the key doesn't exist, it's treated as 0 before the operation.
    pub fn incr(&self, key: &str) -> Result<i64, StoreError> {
        self.incr_by(key, 1)
    }

    /// Decrements an integer value by 1.
    pub fn decr(&self, key: &str) -> Result<i64, StoreError> {
        self.incr_by(key, -1)
    }

    /// Decrements an integer value by a specified amount.
    pub fn decr_by(&self, key: &str, delta: i64) -> Result<i64, StoreError> {
        let delta = delta.checked_neg().ok_or(StoreError::Overflow)?;
        self.incr_by(key, delta)
    }

    /// Adds a signed delta to an integer value.
    ///
    /// The read, the arithmetic and the write all happen under the shard's
    /// write lock, so concurrent increments on one key never lose updates.
    pub fn incr_by(&self, key: &str, delta: i64) -> Result<i64, StoreError> {
        self.incr_count.fetch_add(1, Ordering::Relaxed);

        let mut space = self.shard_for(key).write();
        space.expect_kind(key, KeyKind::String)?;

        let current = match space.strings.get(key) {
            Some(value) => value
                .parse::<i64>()
                .map_err(|_| StoreError::NotAnInteger)?,
            None => 0,
        };
        let new_value = current.checked_add(delta).ok_or(StoreError::Overflow)?;

        space.strings.insert(key.to_owned(), new_value.to_string());
        Ok(new_value)
    }

    // ========================================================================
    // KEY OPERATIONS
    // ========================================================================

    /// Checks if a key exists in any namespace.
    pub fn exists(&self, key: &str) -> bool {
        self.shard_for(key).read().kind_of(key).is_some()
    }

    /// Returns the type name of a key: "string", "list", "set", or "none".
    pub fn key_type(&self, key: &str) -> &'static str {
        self.shard_for(key)
            .read()
            .kind_of(key)
            .map(KeyKind::as_str)
            .unwrap_or("none")
    }

    /// Returns the number of keys in the database.
    pub fn len(&self) -> usize {
        self.shards.iter().map(|shard| shard.read().len()).sum()
    }

    /// Returns true if the database is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Clears all data from the database.
    pub fn flush(&self) {
        for shard in &self.shards {
            shard.write().clear();
        }
    }

    /// Returns database statistics.
    pub fn stats(&self) -> StorageStats {
        StorageStats {
            keys: self.len() as u64,
            get_ops: self.get_count.load(Ordering::Relaxed),
            set_ops: self.set_count.load(Ordering::Relaxed),
            del_ops: self.del_count.load(Ordering::Relaxed),
            list_ops: self.list_op_count.load(Ordering::Relaxed),
            set_member_ops: self.set_op_count.load(Ordering::Relaxed),
            incr_ops: self.incr_count.load(Ordering::Relaxed),
        }
    }

    // ========================================================================
    // LIST OPERATIONS
    // ========================================================================

    /// Pushes values to the head of a list, creating it if needed.
    ///
    /// The values keep the order they were given in: pushing `a b c` onto an
    /// empty key yields `[a, b, c]`. Pushing no values leaves the list (or
    /// its absence) untouched.
    ///
    /// # Returns
    /// The length of the list after the push.
    pub fn lpush<I, S>(&self, key: &str, values: I) -> Result<usize, StoreError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let values: Vec<String> = values.into_iter().map(Into::into).collect();
        self.push(key, values, |list, values| {
            for value in values.into_iter().rev() {
                list.push_front(value);
            }
        })
    }

    /// Pushes values to the tail of a list, creating it if needed.
    ///
    /// # Returns
    /// The length of the list after the push.
    pub fn rpush<I, S>(&self, key: &str, values: I) -> Result<usize, StoreError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let values: Vec<String> = values.into_iter().map(Into::into).collect();
        self.push(key, values, |list, values| list.extend(values))
    }

    fn push(
        &self,
        key: &str,
        values: Vec<String>,
        insert: impl FnOnce(&mut VecDeque<String>, Vec<String>),
    ) -> Result<usize, StoreError> {
        self.list_op_count.fetch_add(1, Ordering::Relaxed);

        let mut space = self.shard_for(key).write();
        space.expect_kind(key, KeyKind::List)?;

        if values.is_empty() {
            return Ok(space.lists.get(key).map_or(0, VecDeque::len));
        }

        let list = space.lists.entry(key.to_owned()).or_default();
        insert(list, values);
        Ok(list.len())
    }

    /// Removes and returns the first element of a list.
    ///
    /// Returns `Ok(None)` if the list doesn't exist. The key is removed once
    /// its last element is popped.
    pub fn lpop(&self, key: &str) -> Result<Option<String>, StoreError> {
        self.pop(key, VecDeque::pop_front)
    }

    /// Removes and returns the last element of a list.
    pub fn rpop(&self, key: &str) -> Result<Option<String>, StoreError> {
        self.pop(key, VecDeque::pop_back)
    }

    fn pop(
        &self,
        key: &str,
        take: impl FnOnce(&mut VecDeque<String>) -> Option<String>,
    ) -> Result<Option<String>, StoreError> {
        self.list_op_count.fetch_add(1, Ordering::Relaxed);

        let mut space = self.shard_for(key).write();
        space.expect_kind(key, KeyKind::List)?;

        let Some(list) = space.lists.get_mut(key) else {
            return Ok(None);
        };
        let value = take(list);

        if list.is_empty() {
            space.lists.remove(key);
        }

        Ok(value)
    }

    /// Returns the length of a list, or 0 if it doesn't exist.
    pub fn llen(&self, key: &str) -> Result<usize, StoreError> {
        let space = self.shard_for(key).read();
        space.expect_kind(key, KeyKind::List)?;
        Ok(space.lists.get(key).map_or(0, VecDeque::len))
    }

    /// Returns a range of elements from a list.
    ///
    /// Both `start` and `stop` are inclusive; negative indices count from the
    /// end (-1 is the last element). After resolving negatives, `start` is
    /// clamped to 0 and `stop` to the last index.
    ///
    /// # Returns
    /// - `Ok(None)` if the list doesn't exist
    /// - `Ok(Some(vec![]))` if the range selects nothing
    pub fn lrange(
        &self,
        key: &str,
        start: i64,
        stop: i64,
    ) -> Result<Option<Vec<String>>, StoreError> {
        self.list_op_count.fetch_add(1, Ordering::Relaxed);

        let space = self.shard_for(key).read();
        space.expect_kind(key, KeyKind::List)?;

        let Some(list) = space.lists.get(key) else {
            return Ok(None);
        };

        let len = list.len() as i64;
        let start = (if start < 0 { len.saturating_add(start) } else { start }).max(0);
        let stop = (if stop < 0 { len.saturating_add(stop) } else { stop }).min(len - 1);

        if start > stop || start >= len {
            return Ok(Some(Vec::new()));
        }

        Ok(Some(
            list.iter()
                .skip(start as usize)
                .take((stop - start + 1) as usize)
                .cloned()
                .collect(),
        ))
    }

    // ========================================================================
    // SET OPERATIONS
    // ========================================================================

    /// Adds members to a set, creating it if needed.
    ///
    /// # Returns
    /// The number of members that were not already present.
    pub fn sadd<I, S>(&self, key: &str, members: I) -> Result<usize, StoreError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.set_op_count.fetch_add(1, Ordering::Relaxed);

        let members: Vec<String> = members.into_iter().map(Into::into).collect();

        let mut space = self.shard_for(key).write();
        space.expect_kind(key, KeyKind::Set)?;

        if members.is_empty() {
            return Ok(0);
        }

        let set = space.sets.entry(key.to_owned()).or_default();
        let mut added = 0;
        for member in members {
            if set.insert(member) {
                added += 1;
            }
        }
        Ok(added)
    }

    /// Removes members from a set.
    ///
    /// # Returns
    /// The number of members actually removed; 0 if the set doesn't exist.
    pub fn srem<I, S>(&self, key: &str, members: I) -> Result<usize, StoreError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.set_op_count.fetch_add(1, Ordering::Relaxed);

        let mut space = self.shard_for(key).write();
        space.expect_kind(key, KeyKind::Set)?;

        let Some(set) = space.sets.get_mut(key) else {
            return Ok(0);
        };
        let removed = members
            .into_iter()
            .filter(|member| {
                let member: &str = member.as_ref();
                set.remove(member)
            })
            .count();

        if set.is_empty() {
            space.sets.remove(key);
        }

        Ok(removed)
    }

    /// Checks whether `member` belongs to the set at `key`.
    ///
    /// A missing key is an empty set.
    pub fn sismember(&self, key: &str, member: &str) -> Result<bool, StoreError> {
        self.set_op_count.fetch_add(1, Ordering::Relaxed);

        let space = self.shard_for(key).read();
        space.expect_kind(key, KeyKind::Set)?;
        Ok(space
            .sets
            .get(key)
            .is_some_and(|set| set.contains(member)))
    }

    /// Returns every member of a set in unspecified order.
    ///
    /// Returns `Ok(None)` if the set doesn't exist.
    pub fn smembers(&self, key: &str) -> Result<Option<Vec<String>>, StoreError> {
        self.set_op_count.fetch_add(1, Ordering::Relaxed);

        let space = self.shard_for(key).read();
        space.expect_kind(key, KeyKind::Set)?;
        Ok(space
            .sets
            .get(key)
            .map(|set| set.iter().cloned().collect()))
    }

    /// Returns the cardinality of a set, or 0 if it doesn't exist.
    pub fn scard(&self, key: &str) -> Result<usize, StoreError> {
        let space = self.shard_for(key).read();
        space.expect_kind(key, KeyKind::Set)?;
        Ok(space.sets.get(key).map_or(0, |set| set.len()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    fn list(values: &[&str]) -> Option<Vec<String>> {
        Some(values.iter().map(|v| v.to_string()).collect())
    }

    #[test]
    fn test_set_and_get() {
        let engine = StorageEngine::new();

        engine.set("key", "value");
        assert_eq!(engine.get("key"), Ok(Some("value".to_string())));

        engine.set("key", "other");
        assert_eq!(engine.get("key"), Ok(Some("other".to_string())));
    }

    #[test]
    fn test_get_nonexistent() {
        let engine = StorageEngine::new();
        assert_eq!(engine.get("nonexistent"), Ok(None));

        engine.set("empty", "");
        assert_eq!(engine.get("empty"), Ok(Some(String::new())));
    }

    #[test]
    fn test_delete() {
        let engine = StorageEngine::new();

        engine.set("key", "value");
        assert!(engine.delete("key"));
        assert!(!engine.delete("key"));
        assert_eq!(engine.get("key"), Ok(None));
    }

    #[test]
    fn test_delete_any_kind() {
        let engine = StorageEngine::new();

        engine.rpush("list", ["a"]).unwrap();
        engine.sadd("set", ["x"]).unwrap();

        assert!(engine.delete("list"));
        assert!(engine.delete("set"));
        assert!(engine.is_empty());
    }

    #[test]
    fn test_incr_family() {
        let engine = StorageEngine::new();

        assert_eq!(engine.incr("counter"), Ok(1));
        assert_eq!(engine.incr("counter"), Ok(2));
        assert_eq!(engine.decr("counter"), Ok(1));
        assert_eq!(engine.incr_by("counter", 10), Ok(11));
        assert_eq!(engine.decr_by("counter", 20), Ok(-9));
        assert_eq!(engine.get("counter"), Ok(Some("-9".to_string())));

        assert_eq!(engine.decr("fresh"), Ok(-1));
    }

    #[test]
    fn test_incr_not_an_integer() {
        let engine = StorageEngine::new();

        engine.set("name", "Ariz");
        assert_eq!(engine.incr("name"), Err(StoreError::NotAnInteger));
        assert_eq!(engine.get("name"), Ok(Some("Ariz".to_string())));

        engine.set("padded", " 5");
        assert_eq!(engine.incr("padded"), Err(StoreError::NotAnInteger));
    }

    #[test]
    fn test_incr_overflow() {
        let engine = StorageEngine::new();

        engine.set("max", i64::MAX.to_string());
        assert_eq!(engine.incr("max"), Err(StoreError::Overflow));
        assert_eq!(engine.get("max"), Ok(Some(i64::MAX.to_string())));

        assert_eq!(engine.decr_by("k", i64::MIN), Err(StoreError::Overflow));
        assert!(!engine.exists("k"));
    }

    #[test]
    fn test_concurrent_incr() {
        let engine = Arc::new(StorageEngine::new());
        let mut handles = vec![];

        for _ in 0..8 {
            let engine = Arc::clone(&engine);
            handles.push(thread::spawn(move || {
                for _ in 0..250 {
                    engine.incr("hits").unwrap();
                }
            }));
        }

        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(engine.get("hits"), Ok(Some("2000".to_string())));
    }

    #[test]
    fn test_concurrent_mixed_deltas() {
        let engine = Arc::new(StorageEngine::new());
        let mut handles = vec![];

        for i in 0..6 {
            let engine = Arc::clone(&engine);
            handles.push(thread::spawn(move || {
                for _ in 0..100 {
                    if i % 2 == 0 {
                        engine.incr_by("balance", 5).unwrap();
                    } else {
                        engine.decr_by("balance", 2).unwrap();
                    }
                }
            }));
        }

        for handle in handles {
            handle.join().unwrap();
        }

        // 3 threads * 100 * 5 - 3 threads * 100 * 2
        assert_eq!(engine.get("balance"), Ok(Some("900".to_string())));
    }

    #[test]
    fn test_concurrent_access() {
        let engine = Arc::new(StorageEngine::new());
        let mut handles = vec![];

        for i in 0..10 {
            let engine = Arc::clone(&engine);
            handles.push(thread::spawn(move || {
                for j in 0..100 {
                    let key = format!("key-{}-{}", i, j);
                    engine.set(&key, "value");
                    engine.get(&key).unwrap();
                }
            }));
        }

        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(engine.len(), 1000);
    }

    #[test]
    fn test_lpush_rpush() {
        let engine = StorageEngine::new();

        assert_eq!(engine.lpush("mylist", ["a", "b", "c"]), Ok(3));
        assert_eq!(engine.lrange("mylist", 0, -1), Ok(list(&["a", "b", "c"])));

        assert_eq!(engine.rpush("mylist", ["d"]), Ok(4));
        assert_eq!(
            engine.lrange("mylist", 0, -1),
            Ok(list(&["a", "b", "c", "d"]))
        );

        assert_eq!(engine.lpush("mylist", ["y", "z"]), Ok(6));
        assert_eq!(
            engine.lrange("mylist", 0, 2),
            Ok(list(&["y", "z", "a"]))
        );
    }

    #[test]
    fn test_push_nothing() {
        let engine = StorageEngine::new();

        assert_eq!(engine.lpush("mylist", Vec::<String>::new()), Ok(0));
        assert!(!engine.exists("mylist"));

        engine.rpush("mylist", ["a", "b"]).unwrap();
        assert_eq!(engine.rpush("mylist", Vec::<String>::new()), Ok(2));
    }

    #[test]
    fn test_lpop_rpop() {
        let engine = StorageEngine::new();

        engine.rpush("mylist", ["a", "b", "c"]).unwrap();

        assert_eq!(engine.lpop("mylist"), Ok(Some("a".to_string())));
        assert_eq!(engine.rpop("mylist"), Ok(Some("c".to_string())));
        assert_eq!(engine.llen("mylist"), Ok(1));
        assert_eq!(engine.lpop("mylist"), Ok(Some("b".to_string())));

        // Popping the last element removes the key
        assert!(!engine.exists("mylist"));
        assert_eq!(engine.lpop("mylist"), Ok(None));
        assert_eq!(engine.rpop("mylist"), Ok(None));
        assert_eq!(engine.lrange("mylist", 0, -1), Ok(None));
    }

    #[test]
    fn test_lrange() {
        let engine = StorageEngine::new();

        engine.rpush("mylist", ["a", "b", "c", "d", "e"]).unwrap();

        assert_eq!(engine.lrange("mylist", 1, 3), Ok(list(&["b", "c", "d"])));
        assert_eq!(engine.lrange("mylist", -2, -1), Ok(list(&["d", "e"])));
        assert_eq!(
            engine.lrange("mylist", -100, 100),
            Ok(list(&["a", "b", "c", "d", "e"]))
        );
        assert_eq!(engine.lrange("mylist", 4, 4), Ok(list(&["e"])));

        // Empty ranges
        assert_eq!(engine.lrange("mylist", 3, 1), Ok(Some(vec![])));
        assert_eq!(engine.lrange("mylist", 5, 10), Ok(Some(vec![])));
        assert_eq!(engine.lrange("mylist", 0, -10), Ok(Some(vec![])));

        // Missing key is nil, not empty
        assert_eq!(engine.lrange("missing", 0, -1), Ok(None));
    }

    #[test]
    fn test_lrange_extreme_indices() {
        let engine = StorageEngine::new();

        engine.rpush("mylist", ["a", "b"]).unwrap();
        assert_eq!(
            engine.lrange("mylist", i64::MIN, i64::MAX),
            Ok(list(&["a", "b"]))
        );
        assert_eq!(engine.lrange("mylist", i64::MAX, i64::MIN), Ok(Some(vec![])));
    }

    #[test]
    fn test_sadd_srem() {
        let engine = StorageEngine::new();

        assert_eq!(engine.sadd("myset", ["x", "y"]), Ok(2));
        assert_eq!(engine.sadd("myset", ["x"]), Ok(0));
        assert_eq!(engine.sadd("myset", ["z", "z"]), Ok(1));
        assert_eq!(engine.scard("myset"), Ok(3));

        assert_eq!(engine.sismember("myset", "x"), Ok(true));
        assert_eq!(engine.srem("myset", ["x"]), Ok(1));
        assert_eq!(engine.sismember("myset", "x"), Ok(false));
        assert_eq!(engine.srem("myset", ["x", "nope"]), Ok(0));
    }

    #[test]
    fn test_set_missing_key() {
        let engine = StorageEngine::new();

        assert_eq!(engine.srem("missing", ["a"]), Ok(0));
        assert_eq!(engine.sismember("missing", "a"), Ok(false));
        assert_eq!(engine.smembers("missing"), Ok(None));
        assert_eq!(engine.scard("missing"), Ok(0));
        assert_eq!(engine.sadd("missing", Vec::<String>::new()), Ok(0));
        assert!(!engine.exists("missing"));
    }

    #[test]
    fn test_smembers() {
        let engine = StorageEngine::new();

        engine.sadd("myset", ["b", "a", "c"]).unwrap();

        let mut members = engine.smembers("myset").unwrap().unwrap();
        members.sort();
        assert_eq!(members, vec!["a", "b", "c"]);

        // Removing the last member removes the key
        engine.srem("myset", ["a", "b", "c"]).unwrap();
        assert_eq!(engine.smembers("myset"), Ok(None));
        assert!(!engine.exists("myset"));
    }

    #[test]
    fn test_wrong_type() {
        let engine = StorageEngine::new();

        engine.set("str", "value");
        engine.rpush("list", ["a"]).unwrap();
        engine.sadd("set", ["x"]).unwrap();

        assert_eq!(engine.lpush("str", ["a"]), Err(StoreError::WrongType));
        assert_eq!(engine.lrange("str", 0, -1), Err(StoreError::WrongType));
        assert_eq!(engine.sadd("str", ["a"]), Err(StoreError::WrongType));
        assert_eq!(engine.get("list"), Err(StoreError::WrongType));
        assert_eq!(engine.incr("list"), Err(StoreError::WrongType));
        assert_eq!(engine.sismember("list", "a"), Err(StoreError::WrongType));
        assert_eq!(engine.lpop("set"), Err(StoreError::WrongType));
        assert_eq!(engine.llen("set"), Err(StoreError::WrongType));

        // Failed commands leave the data alone
        assert_eq!(engine.get("str"), Ok(Some("value".to_string())));
        assert_eq!(engine.llen("list"), Ok(1));
        assert_eq!(engine.scard("set"), Ok(1));
    }

    #[test]
    fn test_set_replaces_any_kind() {
        let engine = StorageEngine::new();

        engine.rpush("key", ["a", "b"]).unwrap();
        engine.set("key", "plain");

        assert_eq!(engine.key_type("key"), "string");
        assert_eq!(engine.get("key"), Ok(Some("plain".to_string())));
        assert_eq!(engine.len(), 1);
    }

    #[test]
    fn test_key_type() {
        let engine = StorageEngine::new();

        engine.set("s", "v");
        engine.lpush("l", ["a"]).unwrap();
        engine.sadd("m", ["x"]).unwrap();

        assert_eq!(engine.key_type("s"), "string");
        assert_eq!(engine.key_type("l"), "list");
        assert_eq!(engine.key_type("m"), "set");
        assert_eq!(engine.key_type("none"), "none");
    }

    #[test]
    fn test_flush() {
        let engine = StorageEngine::new();

        engine.set("key1", "value1");
        engine.rpush("key2", ["a"]).unwrap();
        engine.sadd("key3", ["x"]).unwrap();
        assert_eq!(engine.len(), 3);

        engine.flush();

        assert!(engine.is_empty());
        assert_eq!(engine.get("key1"), Ok(None));
    }

    #[test]
    fn test_stats() {
        let engine = StorageEngine::new();

        engine.set("a", "1");
        engine.get("a").unwrap();
        engine.get("b").unwrap();
        engine.incr("a").unwrap();
        engine.rpush("l", ["x"]).unwrap();
        engine.sadd("s", ["y"]).unwrap();
        engine.delete("a");

        let stats = engine.stats();
        assert_eq!(stats.keys, 2);
        assert_eq!(stats.get_ops, 2);
        assert_eq!(stats.set_ops, 1);
        assert_eq!(stats.del_ops, 1);
        assert_eq!(stats.incr_ops, 1);
        assert_eq!(stats.list_ops, 1);
        assert_eq!(stats.set_member_ops, 1);
    }
}
