//! Service settings. Every field has a default so partial sources (env, override maps) merge cleanly.

use serde::{Deserialize, Serialize};
use std::net::SocketAddr;

pub const DEFAULT_DATABASE_URL: &str = "sqlite://blog.db?mode=rwc";
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;
pub const DEFAULT_BODY_LIMIT_BYTES: usize = 64 * 1024;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// `postgres://...` or `sqlite:...`; `sqlite::memory:` gives an isolated in-memory store.
    pub database_url: String,
    pub bind_addr: SocketAddr,
    pub max_connections: u32,
    /// Request bodies above this size are rejected with 413.
    pub body_limit_bytes: usize,
    /// Raises the crate's log level to `debug`.
    pub debug: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_url: DEFAULT_DATABASE_URL.to_string(),
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 5000)),
            max_connections: DEFAULT_MAX_CONNECTIONS,
            body_limit_bytes: DEFAULT_BODY_LIMIT_BYTES,
            debug: false,
        }
    }
}

impl Config {
    /// Log directive for this crate matching the `debug` flag.
    pub fn log_directive(&self) -> &'static str {
        if self.debug {
            "blog_api=debug"
        } else {
            "blog_api=info"
        }
    }
}
