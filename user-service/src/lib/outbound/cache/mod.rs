//! User cache adapters.
//!
//! Redis is shared across instances; the in-memory cache is per process and
//! is selected when no Redis URL is configured.

pub mod memory;
pub mod redis;

pub use self::memory::InMemoryUserCache;
pub use self::redis::RedisUserCache;
