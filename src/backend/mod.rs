// Credvault — Backend Module
//
// The key-value service both adapters persist into. The handle is injected
// and shared as `Arc<dyn KvBackend>`; neither adapter owns or closes it.

mod error;
mod memory;
#[cfg(feature = "redis")]
mod redis_kv;

use std::time::Duration;

pub use error::BackendError;
pub use memory::MemoryBackend;
#[cfg(feature = "redis")]
pub use redis_kv::RedisBackend;

/// Byte-addressed key-value service.
///
/// Implementations must be safe to share between callers on multiple threads.
pub trait KvBackend: Send + Sync {
    /// Write `value` under `key`. A `ttl` of `None` means the entry never expires.
    fn set(&self, key: &str, value: &[u8], ttl: Option<Duration>) -> Result<(), BackendError>;

    /// Read the value under `key`. `Ok(None)` signals that the key is absent,
    /// which callers must keep distinct from a transport failure.
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, BackendError>;

    /// Remove `key`. Returns true if an entry existed.
    fn delete(&self, key: &str) -> Result<bool, BackendError>;
}
