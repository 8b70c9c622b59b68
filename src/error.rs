// Credvault — Top-level error types
//
// Aggregates errors from the backend, codec, key store, and credential store
// modules into a single error enum for the application boundary.

use thiserror::Error;

/// Top-level error type for all Credvault operations.
#[derive(Debug, Error)]
pub enum CredvaultError {
    #[error("Backend error: {0}")]
    Backend(#[from] crate::backend::BackendError),

    #[error("Codec error: {0}")]
    Codec(#[from] crate::codec::CodecError),

    #[error("Key store error: {0}")]
    KeyStore(#[from] crate::keystore::KeyStoreError),

    #[error("Store error: {0}")]
    Store(#[from] crate::store::StoreError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, CredvaultError>;
