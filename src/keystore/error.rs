// Credvault — Key store error types

use thiserror::Error;

#[derive(Debug, Error)]
pub enum KeyStoreError {
    #[error("Key not found [{}]", hex::encode(.ski))]
    KeyNotFound { ski: Vec<u8> },

    #[error("Backend error: {0}")]
    Backend(#[from] crate::backend::BackendError),
}
