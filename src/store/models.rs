// Credvault — Identity data models
//
// SECURITY: The certificate bytes are never included in Debug output or log
// messages; only their length is shown.

use std::fmt;

use crate::codec::lookup_digest;

/// Names an identity within an organization. Supplied by the caller per call.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct IdentityIdentifier {
    pub id: String,
    pub org_id: String,
}

impl IdentityIdentifier {
    pub fn new(id: impl Into<String>, org_id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            org_id: org_id.into(),
        }
    }

    /// The backend key for this identity: hex(SHA-256(id || "@" || org_id)).
    ///
    /// The separator is not escaped, so `("a@b", "c")` and `("a", "b@c")`
    /// share a key.
    pub fn lookup_key(&self) -> String {
        lookup_digest(&format!("{}@{}", self.id, self.org_id))
    }
}

impl fmt::Display for IdentityIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.id, self.org_id)
    }
}

/// An identity together with its enrollment certificate.
#[derive(Clone, PartialEq, Eq)]
pub struct CredentialRecord {
    pub id: String,
    pub org_id: String,
    pub certificate: Vec<u8>,
}

impl CredentialRecord {
    pub fn new(identifier: IdentityIdentifier, certificate: impl Into<Vec<u8>>) -> Self {
        Self {
            id: identifier.id,
            org_id: identifier.org_id,
            certificate: certificate.into(),
        }
    }

    pub fn identifier(&self) -> IdentityIdentifier {
        IdentityIdentifier::new(self.id.clone(), self.org_id.clone())
    }
}

/// Custom Debug implementation that NEVER reveals the certificate.
impl fmt::Debug for CredentialRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CredentialRecord")
            .field("id", &self.id)
            .field("org_id", &self.org_id)
            .field("certificate", &format_args!("[{} bytes]", self.certificate.len()))
            .finish()
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
