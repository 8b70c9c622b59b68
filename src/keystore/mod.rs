// Credvault — Key Store Module
//
// Holds opaque cryptographic key objects indexed by their subject key
// identifier (SKI). Reads are served from process memory only; the backend
// receives a presence marker per key and is never read back.

mod error;
mod mirrored;

use std::sync::Arc;

pub use error::KeyStoreError;
pub use mirrored::{MirroredKeyStore, PRESENCE_MARKER};

/// A key object that can report its subject key identifier.
pub trait KeyObject: Send + Sync {
    fn ski(&self) -> Vec<u8>;
}

/// Storage for key objects, addressed by SKI.
pub trait KeyStore {
    /// Whether the store refuses writes.
    fn read_only(&self) -> bool;

    /// Fetch the key object registered under `ski`.
    fn get_key(&self, ski: &[u8]) -> Result<Arc<dyn KeyObject>, KeyStoreError>;

    /// Register `key` under its own SKI, replacing any previous entry.
    fn store_key(&self, key: Arc<dyn KeyObject>) -> Result<(), KeyStoreError>;
}
