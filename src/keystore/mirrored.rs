// Credvault — Mirrored Key Store
//
// Key objects are not byte-serializable, so the backend only ever learns that
// a key exists: `store_key` writes a marker under the hex SKI, `get_key` never
// looks at the backend. Keys do not survive a process restart.
//
// A failed marker write leaves the local entry in place; the caller sees the
// backend error and the local map and backend have diverged.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use super::{KeyObject, KeyStore, KeyStoreError};
use crate::backend::KvBackend;

/// Value written to the backend for every stored key.
pub const PRESENCE_MARKER: &[u8] = b"stored";

pub struct MirroredKeyStore {
    keys: Mutex<HashMap<String, Arc<dyn KeyObject>>>,
    backend: Arc<dyn KvBackend>,
}

impl MirroredKeyStore {
    pub fn new(backend: Arc<dyn KvBackend>) -> Self {
        Self {
            keys: Mutex::new(HashMap::new()),
            backend,
        }
    }

    // Entries are independent, so a poisoned lock still guards a consistent map.
    fn keys(&self) -> MutexGuard<'_, HashMap<String, Arc<dyn KeyObject>>> {
        self.keys.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Number of keys held in memory.
    pub fn len(&self) -> usize {
        self.keys().len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys().is_empty()
    }
}

impl KeyStore for MirroredKeyStore {
    fn read_only(&self) -> bool {
        false
    }

    fn get_key(&self, ski: &[u8]) -> Result<Arc<dyn KeyObject>, KeyStoreError> {
        self.keys()
            .get(&hex::encode(ski))
            .cloned()
            .ok_or_else(|| KeyStoreError::KeyNotFound { ski: ski.to_vec() })
    }

    fn store_key(&self, key: Arc<dyn KeyObject>) -> Result<(), KeyStoreError> {
        let ski = hex::encode(key.ski());
        self.keys().insert(ski.clone(), key);

        if let Err(e) = self.backend.set(&ski, PRESENCE_MARKER, None) {
            tracing::warn!(ski = %ski, error = %e, "Key kept in memory but backend marker write failed");
            return Err(e.into());
        }

        tracing::debug!(ski = %ski, "Key stored");
        Ok(())
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use std::thread;
    use std::time::Duration;

    use super::*;
    use crate::backend::{BackendError, MemoryBackend};

    struct FixedKey {
        ski: Vec<u8>,
    }

    impl KeyObject for FixedKey {
        fn ski(&self) -> Vec<u8> {
            self.ski.clone()
        }
    }

    fn key(ski: &[u8]) -> Arc<dyn KeyObject> {
        Arc::new(FixedKey { ski: ski.to_vec() })
    }

    struct UnreachableBackend;

    impl KvBackend for UnreachableBackend {
        fn set(&self, _: &str, _: &[u8], _: Option<Duration>) -> Result<(), BackendError> {
            Err(BackendError::Transport("connection refused".to_string()))
        }

        fn get(&self, _: &str) -> Result<Option<Vec<u8>>, BackendError> {
            Err(BackendError::Transport("connection refused".to_string()))
        }

        fn delete(&self, _: &str) -> Result<bool, BackendError> {
            Err(BackendError::Transport("connection refused".to_string()))
        }
    }

    #[test]
    fn test_store_then_get_returns_same_object() {
        let store = MirroredKeyStore::new(Arc::new(MemoryBackend::new()));
        let original = key(&[0xDE, 0xAD, 0xBE, 0xEF]);
        store.store_key(original.clone()).unwrap();

        let fetched = store.get_key(&[0xDE, 0xAD, 0xBE, 0xEF]).unwrap();
        assert!(
            Arc::ptr_eq(&original, &fetched),
            "GetKey must return the exact object passed to StoreKey"
        );
    }

    #[test]
    fn test_get_unknown_ski_reports_ski() {
        let store = MirroredKeyStore::new(Arc::new(MemoryBackend::new()));
        match store.get_key(&[0x01, 0x02]) {
            Err(KeyStoreError::KeyNotFound { ski }) => assert_eq!(ski, vec![0x01, 0x02]),
            Err(e) => panic!("unexpected error: {}", e),
            Ok(_) => panic!("expected KeyNotFound"),
        }
    }

    #[test]
    fn test_not_found_message_is_hex() {
        let err = KeyStoreError::KeyNotFound { ski: vec![0xAB, 0x01] };
        assert_eq!(err.to_string(), "Key not found [ab01]");
    }

    #[test]
    fn test_store_writes_marker_under_hex_ski() {
        let backend = Arc::new(MemoryBackend::new());
        let store = MirroredKeyStore::new(backend.clone());
        store.store_key(key(&[0xAB, 0xCD])).unwrap();

        assert_eq!(
            backend.get("abcd").unwrap().as_deref(),
            Some(PRESENCE_MARKER),
            "Backend must receive the presence marker under the hex SKI"
        );
    }

    #[test]
    fn test_store_overwrites_previous_entry() {
        let store = MirroredKeyStore::new(Arc::new(MemoryBackend::new()));
        store.store_key(key(&[0x01])).unwrap();
        let replacement = key(&[0x01]);
        store.store_key(replacement.clone()).unwrap();

        assert_eq!(store.len(), 1);
        assert!(Arc::ptr_eq(&store.get_key(&[0x01]).unwrap(), &replacement));
    }

    #[test]
    fn test_get_never_reads_backend() {
        let backend = Arc::new(MemoryBackend::new());
        backend.set("0102", PRESENCE_MARKER, None).unwrap();
        let store = MirroredKeyStore::new(backend);

        assert!(
            matches!(store.get_key(&[0x01, 0x02]), Err(KeyStoreError::KeyNotFound { .. })),
            "A marker in the backend must not make a key retrievable"
        );
    }

    #[test]
    fn test_backend_failure_is_returned_and_local_entry_kept() {
        let store = MirroredKeyStore::new(Arc::new(UnreachableBackend));
        let original = key(&[0x07]);

        match store.store_key(original.clone()) {
            Err(KeyStoreError::Backend(BackendError::Transport(msg))) => {
                assert_eq!(msg, "connection refused")
            }
            other => panic!("expected backend transport error, got {:?}", other.err()),
        }
        assert!(Arc::ptr_eq(&store.get_key(&[0x07]).unwrap(), &original));
    }

    #[test]
    fn test_read_only_is_false() {
        let store = MirroredKeyStore::new(Arc::new(MemoryBackend::new()));
        assert!(!store.read_only());
        assert!(store.is_empty());
    }

    #[test]
    fn test_concurrent_store_and_get() {
        let store = Arc::new(MirroredKeyStore::new(Arc::new(MemoryBackend::new())));

        let handles: Vec<_> = (0u8..8)
            .map(|t| {
                let store = Arc::clone(&store);
                thread::spawn(move || {
                    for i in 0u8..32 {
                        let ski = [t, i];
                        store.store_key(key(&ski)).unwrap();
                        assert!(store.get_key(&ski).is_ok());
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }
        assert_eq!(store.len(), 8 * 32);
    }
}
