// Credvault — Store error types

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("User not found: {id}@{org_id}")]
    UserNotFound { id: String, org_id: String },

    #[error("Backend error: {0}")]
    Backend(#[from] crate::backend::BackendError),

    #[error("Codec error: {0}")]
    Codec(#[from] crate::codec::CodecError),
}
