//! Command Handler Module
//!
//! This module implements every LineKV command. It resolves a command name
//! to a [`CommandKind`], checks the argument count, runs the matching
//! storage operation and formats the result as a [`Reply`].
//!
//! ## Supported Commands
//!
//! ### String Commands
//! - `SET key value...` - Set a key (the value may contain spaces)
//! - `GET key` - Get a key's value
//! - `DEL key` - Delete a key
//! - `INCR key` / `DECR key` - Increment or decrement by one
//! - `INCRBY key n` / `DECRBY key n` - Increment or decrement by `n`
//!
//! ### List Commands
//! - `LPUSH key [value ...]` - Push values to the head, keeping their order
//! - `RPUSH key [value ...]` - Push values to the tail
//! - `LPOP key` / `RPOP key` - Remove and return the first / last element
//! - `LRANGE key start stop` - Get a range of elements
//! - `LLEN key` - Get the length of a list
//!
//! ### Set Commands
//! - `SADD key [member ...]` - Add members
//! - `SREM key [member ...]` - Remove members
//! - `SISMEMBER key member` - Test membership
//! - `SMEMBERS key` - List members
//! - `SCARD key` - Count members
//!
//! ### Key and Server Commands
//! - `EXISTS key`, `TYPE key`
//! - `PING [message]`, `ECHO message`, `INFO`
//! - `DBSIZE`, `FLUSHDB`, `QUIT`
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                     CommandHandler                          │
//! │                                                             │
//! │  ┌─────────────┐    ┌─────────────┐    ┌─────────────┐      │
//! │  │  resolve()  │───>│   arity     │───>│  dispatch() │      │
//! │  └─────────────┘    └─────────────┘    └─────────────┘      │
//! │                                               │             │
//! │                                               ▼             │
//! │                                      StorageEngine          │
//! └─────────────────────────────────────────────────────────────┘
//! ```

use crate::protocol::{Reply, Request};
use crate::storage::{StorageEngine, StoreError};
use std::sync::Arc;
use std::time::Instant;

/// Every command the server understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandKind {
    // String commands
    Set,
    Get,
    Del,
    Incr,
    Decr,
    IncrBy,
    DecrBy,

    // List commands
    LPush,
    RPush,
    LPop,
    RPop,
    LRange,
    LLen,

    // Set commands
    SAdd,
    SRem,
    SIsMember,
    SMembers,
    SCard,

    // Key commands
    Exists,
    Type,

    // Server commands
    Ping,
    Echo,
    Info,
    DbSize,
    FlushDb,
    Quit,
}

impl CommandKind {
    /// Resolves a command name, ignoring case.
    ///
    /// # Example
    /// ```
    /// use linekv::commands::CommandKind;
    ///
    /// assert_eq!(CommandKind::from_name("lpush"), Some(CommandKind::LPush));
    /// assert_eq!(CommandKind::from_name("FOO"), None);
    /// ```
    pub fn from_name(name: &str) -> Option<Self> {
        let kind = match name.to_ascii_uppercase().as_str() {
            "SET" => CommandKind::Set,
            "GET" => CommandKind::Get,
            "DEL" => CommandKind::Del,
            "INCR" => CommandKind::Incr,
            "DECR" => CommandKind::Decr,
            "INCRBY" => CommandKind::IncrBy,
            "DECRBY" => CommandKind::DecrBy,
            "LPUSH" => CommandKind::LPush,
            "RPUSH" => CommandKind::RPush,
            "LPOP" => CommandKind::LPop,
            "RPOP" => CommandKind::RPop,
            "LRANGE" => CommandKind::LRange,
            "LLEN" => CommandKind::LLen,
            "SADD" => CommandKind::SAdd,
            "SREM" => CommandKind::SRem,
            "SISMEMBER" => CommandKind::SIsMember,
            "SMEMBERS" => CommandKind::SMembers,
            "SCARD" => CommandKind::SCard,
            "EXISTS" => CommandKind::Exists,
            "TYPE" => CommandKind::Type,
            "PING" => CommandKind::Ping,
            "ECHO" => CommandKind::Echo,
            "INFO" => CommandKind::Info,
            "DBSIZE" => CommandKind::DbSize,
            "FLUSHDB" | "FLUSHALL" => CommandKind::FlushDb,
            "QUIT" => CommandKind::Quit,
            _ => return None,
        };
        Some(kind)
    }

    /// Canonical upper-case name, used in error messages.
    pub fn name(self) -> &'static str {
        match self {
            CommandKind::Set => "SET",
            CommandKind::Get => "GET",
            CommandKind::Del => "DEL",
            CommandKind::Incr => "INCR",
            CommandKind::Decr => "DECR",
            CommandKind::IncrBy => "INCRBY",
            CommandKind::DecrBy => "DECRBY",
            CommandKind::LPush => "LPUSH",
            CommandKind::RPush => "RPUSH",
            CommandKind::LPop => "LPOP",
            CommandKind::RPop => "RPOP",
            CommandKind::LRange => "LRANGE",
            CommandKind::LLen => "LLEN",
            CommandKind::SAdd => "SADD",
            CommandKind::SRem => "SREM",
            CommandKind::SIsMember => "SISMEMBER",
            CommandKind::SMembers => "SMEMBERS",
            CommandKind::SCard => "SCARD",
            CommandKind::Exists => "EXISTS",
            CommandKind::Type => "TYPE",
            CommandKind::Ping => "PING",
            CommandKind::Echo => "ECHO",
            CommandKind::Info => "INFO",
            CommandKind::DbSize => "DBSIZE",
            CommandKind::FlushDb => "FLUSHDB",
            CommandKind::Quit => "QUIT",
        }
    }

    /// Minimum number of arguments after the command name.
    ///
    /// Variadic commands (LPUSH, RPUSH, SADD, SREM) only require the key.
    /// Extra arguments beyond what a command reads are ignored.
    pub fn min_args(self) -> usize {
        match self {
            CommandKind::Set
            | CommandKind::IncrBy
            | CommandKind::DecrBy
            | CommandKind::SIsMember => 2,
            CommandKind::LRange => 3,
            CommandKind::Get
            | CommandKind::Del
            | CommandKind::Incr
            | CommandKind::Decr
            | CommandKind::LPush
            | CommandKind::RPush
            | CommandKind::LPop
            | CommandKind::RPop
            | CommandKind::LLen
            | CommandKind::SAdd
            | CommandKind::SRem
            | CommandKind::SMembers
            | CommandKind::SCard
            | CommandKind::Exists
            | CommandKind::Type
            | CommandKind::Echo => 1,
            CommandKind::Ping
            | CommandKind::Info
            | CommandKind::DbSize
            | CommandKind::FlushDb
            | CommandKind::Quit => 0,
        }
    }
}

/// Handles commands by dispatching them to the storage engine.
#[derive(Clone)]
pub struct CommandHandler {
    /// The storage engine
    storage: Arc<StorageEngine>,
    /// Server start time for INFO command
    start_time: Instant,
}

impl CommandHandler {
    /// Creates a new command handler with the given storage engine.
    pub fn new(storage: Arc<StorageEngine>) -> Self {
        Self {
            storage,
            start_time: Instant::now(),
        }
    }

    /// Executes a parsed request line.
    pub fn execute_request(&self, request: &Request) -> Reply {
        self.execute(&request.command, &request.args)
    }

    /// Executes a command and returns the reply.
    ///
    /// Unknown commands and missing arguments are reported as error replies
    /// without touching the store.
    ///
    /// # Example
    /// ```
    /// use linekv::commands::CommandHandler;
    /// use linekv::protocol::Reply;
    /// use linekv::storage::StorageEngine;
    /// use std::sync::Arc;
    ///
    /// let handler = CommandHandler::new(Arc::new(StorageEngine::new()));
    /// let args = vec!["greeting".to_string(), "hello".to_string(), "world".to_string()];
    ///
    /// assert_eq!(handler.execute("set", &args), Reply::ok());
    /// assert_eq!(
    ///     handler.execute("GET", &args[..1]),
    ///     Reply::value("hello world")
    /// );
    /// ```
    pub fn execute(&self, command: &str, args: &[String]) -> Reply {
        let Some(kind) = CommandKind::from_name(command) else {
            return Reply::error(format!("unknown command '{}'", command.to_uppercase()));
        };

        let min_args = kind.min_args();
        if args.is_empty() && min_args > 0 {
            return Reply::error(format!("missing arguments for '{}' command", kind.name()));
        }
        if args.len() < min_args {
            return Reply::error(format!(
                "wrong number of arguments for '{}' command",
                kind.name()
            ));
        }

        self.dispatch(kind, args)
    }

    /// Dispatches a command to its handler. Arity has already been checked.
    fn dispatch(&self, kind: CommandKind, args: &[String]) -> Reply {
        match kind {
            // String commands
            CommandKind::Set => self.cmd_set(args),
            CommandKind::Get => self.cmd_get(args),
            CommandKind::Del => self.cmd_del(args),
            CommandKind::Incr => self.cmd_incr_by(args, 1),
            CommandKind::Decr => self.cmd_incr_by(args, -1),
            CommandKind::IncrBy => self.cmd_incrby(args),
            CommandKind::DecrBy => self.cmd_decrby(args),

            // List commands
            CommandKind::LPush => self.cmd_lpush(args),
            CommandKind::RPush => self.cmd_rpush(args),
            CommandKind::LPop => self.cmd_lpop(args),
            CommandKind::RPop => self.cmd_rpop(args),
            CommandKind::LRange => self.cmd_lrange(args),
            CommandKind::LLen => self.cmd_llen(args),

            // Set commands
            CommandKind::SAdd => self.cmd_sadd(args),
            CommandKind::SRem => self.cmd_srem(args),
            CommandKind::SIsMember => self.cmd_sismember(args),
            CommandKind::SMembers => self.cmd_smembers(args),
            CommandKind::SCard => self.cmd_scard(args),

            // Key commands
            CommandKind::Exists => Reply::integer(self.storage.exists(&args[0]) as i64),
            CommandKind::Type => Reply::status(self.storage.key_type(&args[0])),

            // Server commands
            CommandKind::Ping => self.cmd_ping(args),
            CommandKind::Echo => Reply::value(args.join(" ")),
            CommandKind::Info => self.cmd_info(),
            CommandKind::DbSize => Reply::integer(self.storage.len() as i64),
            CommandKind::FlushDb => {
                self.storage.flush();
                Reply::ok()
            }
            CommandKind::Quit => Reply::ok(),
        }
    }

    // ========================================================================
    // Helper functions
    // ========================================================================

    /// Parses an integer argument.
    fn get_integer(value: &str) -> Result<i64, Reply> {
        value
            .parse()
            .map_err(|_| Reply::error(StoreError::NotAnInteger.to_string()))
    }

    /// Turns a storage result into a reply.
    fn reply<T>(result: Result<T, StoreError>, format: impl FnOnce(T) -> Reply) -> Reply {
        match result {
            Ok(value) => format(value),
            Err(e) => Reply::error(e.to_string()),
        }
    }

    fn optional_value(value: Option<String>) -> Reply {
        value.map_or_else(Reply::nil, Reply::value)
    }

    fn optional_array(values: Option<Vec<String>>) -> Reply {
        values.map_or_else(Reply::nil, Reply::array)
    }

    // ========================================================================
    // String Commands
    // ========================================================================

    /// SET key value [value ...]
    ///
    /// Everything after the key is joined with single spaces.
    fn cmd_set(&self, args: &[String]) -> Reply {
        self.storage.set(&args[0], args[1..].join(" "));
        Reply::ok()
    }

    /// GET key
    fn cmd_get(&self, args: &[String]) -> Reply {
        Self::reply(self.storage.get(&args[0]), Self::optional_value)
    }

    /// DEL key
    fn cmd_del(&self, args: &[String]) -> Reply {
        Reply::integer(self.storage.delete(&args[0]) as i64)
    }

    /// INCR key / DECR key
    fn cmd_incr_by(&self, args: &[String], delta: i64) -> Reply {
        Self::reply(self.storage.incr_by(&args[0], delta), Reply::integer)
    }

    /// INCRBY key increment
    fn cmd_incrby(&self, args: &[String]) -> Reply {
        match Self::get_integer(&args[1]) {
            Ok(delta) => self.cmd_incr_by(args, delta),
            Err(reply) => reply,
        }
    }

    /// DECRBY key decrement
    fn cmd_decrby(&self, args: &[String]) -> Reply {
        match Self::get_integer(&args[1]) {
            Ok(delta) => Self::reply(self.storage.decr_by(&args[0], delta), Reply::integer),
            Err(reply) => reply,
        }
    }

    // ========================================================================
    // List Commands
    // ========================================================================

    /// LPUSH key [value ...]
    fn cmd_lpush(&self, args: &[String]) -> Reply {
        let len = self.storage.lpush(&args[0], args[1..].iter().cloned());
        Self::reply(len, |len| Reply::integer(len as i64))
    }

    /// RPUSH key [value ...]
    fn cmd_rpush(&self, args: &[String]) -> Reply {
        let len = self.storage.rpush(&args[0], args[1..].iter().cloned());
        Self::reply(len, |len| Reply::integer(len as i64))
    }

    /// LPOP key
    fn cmd_lpop(&self, args: &[String]) -> Reply {
        Self::reply(self.storage.lpop(&args[0]), Self::optional_value)
    }

    /// RPOP key
    fn cmd_rpop(&self, args: &[String]) -> Reply {
        Self::reply(self.storage.rpop(&args[0]), Self::optional_value)
    }

    /// LRANGE key start stop
    fn cmd_lrange(&self, args: &[String]) -> Reply {
        let (start, stop) = match (Self::get_integer(&args[1]), Self::get_integer(&args[2])) {
            (Ok(start), Ok(stop)) => (start, stop),
            (Err(reply), _) | (_, Err(reply)) => return reply,
        };

        Self::reply(
            self.storage.lrange(&args[0], start, stop),
            Self::optional_array,
        )
    }

    /// LLEN key
    fn cmd_llen(&self, args: &[String]) -> Reply {
        Self::reply(self.storage.llen(&args[0]), |len| Reply::integer(len as i64))
    }

    // ========================================================================
    // Set Commands
    // ========================================================================

    /// SADD key [member ...]
    fn cmd_sadd(&self, args: &[String]) -> Reply {
        let added = self.storage.sadd(&args[0], args[1..].iter().cloned());
        Self::reply(added, |n| Reply::integer(n as i64))
    }

    /// SREM key [member ...]
    fn cmd_srem(&self, args: &[String]) -> Reply {
        let removed = self.storage.srem(&args[0], &args[1..]);
        Self::reply(removed, |n| Reply::integer(n as i64))
    }

    /// SISMEMBER key member
    fn cmd_sismember(&self, args: &[String]) -> Reply {
        Self::reply(self.storage.sismember(&args[0], &args[1]), |found| {
            Reply::integer(found as i64)
        })
    }

    /// SMEMBERS key
    fn cmd_smembers(&self, args: &[String]) -> Reply {
        Self::reply(self.storage.smembers(&args[0]), Self::optional_array)
    }

    /// SCARD key
    fn cmd_scard(&self, args: &[String]) -> Reply {
        Self::reply(self.storage.scard(&args[0]), |n| Reply::integer(n as i64))
    }

    // ========================================================================
    // Server Commands
    // ========================================================================

    /// PING [message]
    fn cmd_ping(&self, args: &[String]) -> Reply {
        if args.is_empty() {
            Reply::pong()
        } else {
            Reply::value(args.join(" "))
        }
    }

    /// INFO
    fn cmd_info(&self) -> Reply {
        let stats = self.storage.stats();
        Reply::value(format!(
            "version:{} uptime_secs:{} keys:{} get_ops:{} set_ops:{} del_ops:{} list_ops:{} set_member_ops:{} incr_ops:{}",
            crate::VERSION,
            self.start_time.elapsed().as_secs(),
            stats.keys,
            stats.get_ops,
            stats.set_ops,
            stats.del_ops,
            stats.list_ops,
            stats.set_member_ops,
            stats.incr_ops,
        ))
    }
}
