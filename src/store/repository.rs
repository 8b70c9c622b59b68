// Credvault — Identity Credential Repository
//
// Store: lookup key = hex(SHA-256(id@org)), value = sealed certificate.
// Load reverses it. A missing key is `UserNotFound`; a transport failure is
// passed through as `Backend` so callers can tell the two apart.

use std::fmt;
use std::sync::Arc;

use super::models::{CredentialRecord, IdentityIdentifier};
use super::StoreError;
use crate::backend::KvBackend;
use crate::codec::{DerivedKey, EnvelopeCodec};

// ─── Trait ───────────────────────────────────────────────────────────────────

/// Abstraction over identity credential storage.
pub trait UserStore {
    /// Seal and persist the record's certificate, replacing any previous one.
    fn store(&self, record: &CredentialRecord) -> Result<(), StoreError>;

    /// Fetch and open the certificate for `identifier`.
    fn load(&self, identifier: &IdentityIdentifier) -> Result<CredentialRecord, StoreError>;

    /// Remove the stored certificate. Returns true if one existed.
    fn delete(&self, identifier: &IdentityIdentifier) -> Result<bool, StoreError>;
}

// ─── Backend Implementation ─────────────────────────────────────────────────

pub struct BackendUserStore {
    backend: Arc<dyn KvBackend>,
    key: DerivedKey,
}

impl BackendUserStore {
    /// Derive the sealing key from `passphrase` once; only the derived key is kept.
    pub fn new(
        backend: Arc<dyn KvBackend>,
        passphrase: &str,
        codec: &EnvelopeCodec,
    ) -> Result<Self, StoreError> {
        let key = codec.derive_key(passphrase)?;
        Ok(Self { backend, key })
    }
}

impl fmt::Debug for BackendUserStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BackendUserStore")
            .field("key", &self.key)
            .finish_non_exhaustive()
    }
}

impl UserStore for BackendUserStore {
    fn store(&self, record: &CredentialRecord) -> Result<(), StoreError> {
        let lookup_key = record.identifier().lookup_key();
        let envelope = EnvelopeCodec::seal_with_key(&self.key, &record.certificate)?;

        self.backend.set(&lookup_key, &envelope, None)?;

        tracing::info!(
            id = %record.id,
            org_id = %record.org_id,
            "Credential stored successfully"
        );
        Ok(())
    }

    fn load(&self, identifier: &IdentityIdentifier) -> Result<CredentialRecord, StoreError> {
        let lookup_key = identifier.lookup_key();

        let envelope = match self.backend.get(&lookup_key)? {
            Some(envelope) => envelope,
            None => {
                tracing::debug!(%identifier, "No credential stored for identity");
                return Err(StoreError::UserNotFound {
                    id: identifier.id.clone(),
                    org_id: identifier.org_id.clone(),
                });
            }
        };

        let certificate = EnvelopeCodec::open_with_key(&self.key, &envelope)?;
        tracing::debug!(%identifier, "Credential loaded");

        Ok(CredentialRecord::new(identifier.clone(), certificate))
    }

    fn delete(&self, identifier: &IdentityIdentifier) -> Result<bool, StoreError> {
        let removed = self.backend.delete(&identifier.lookup_key())?;
        if removed {
            tracing::info!(%identifier, "Credential deleted");
        }
        Ok(removed)
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
