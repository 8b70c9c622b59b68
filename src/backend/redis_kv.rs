// Credvault — Redis Backend
//
// `KvBackend` over a shared `redis::Client`. A connection is opened per call,
// so the client handle can be cloned freely and is never closed here.

use std::time::Duration;

use redis::Commands;

use super::{BackendError, KvBackend};

#[derive(Clone)]
pub struct RedisBackend {
    client: redis::Client,
}

impl RedisBackend {
    /// Wrap an already-constructed client.
    pub fn new(client: redis::Client) -> Self {
        Self { client }
    }

    /// Build a client from a `redis://` URL. No connection is made until first use.
    pub fn open(url: &str) -> Result<Self, BackendError> {
        Ok(Self::new(redis::Client::open(url)?))
    }

    fn connection(&self) -> Result<redis::Connection, BackendError> {
        Ok(self.client.get_connection()?)
    }
}

impl KvBackend for RedisBackend {
    fn set(&self, key: &str, value: &[u8], ttl: Option<Duration>) -> Result<(), BackendError> {
        let mut conn = self.connection()?;
        match ttl {
            // SET EX rejects zero, and sub-second precision is not needed here.
            Some(ttl) => conn.set_ex::<_, _, ()>(key, value, ttl.as_secs().max(1))?,
            None => conn.set::<_, _, ()>(key, value)?,
        }
        tracing::debug!(key = %key, bytes = value.len(), "Redis SET");
        Ok(())
    }

    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, BackendError> {
        let mut conn = self.connection()?;
        let value: Option<Vec<u8>> = conn.get(key)?;
        tracing::debug!(key = %key, hit = value.is_some(), "Redis GET");
        Ok(value)
    }

    fn delete(&self, key: &str) -> Result<bool, BackendError> {
        let mut conn = self.connection()?;
        let removed: usize = conn.del(key)?;
        Ok(removed > 0)
    }
}
