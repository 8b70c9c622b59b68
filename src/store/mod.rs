// Credvault — Store Module
//
// Identity credential storage over a key-value backend. Enrollment
// certificates are sealed with ChaCha20-Poly1305 before they leave the process,
// and backend keys are digests of the identity, never the identity itself.

mod error;
mod models;
mod repository;

pub use error::StoreError;
pub use models::{CredentialRecord, IdentityIdentifier};
pub use repository::{BackendUserStore, UserStore};
