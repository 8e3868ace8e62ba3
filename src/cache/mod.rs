// Key-value cache — trait-based abstraction over the store.
//
// The Cache trait defines the interface. RedisCache implements it against a
// real Redis; MemoryCache is the in-process stand-in for tests and
// cache-less dev runs. Values are JSON strings with a per-entry TTL.

pub mod memory;
pub mod redis;
pub mod traits;
