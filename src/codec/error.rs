// Credvault — Codec error types
//
// Every crypto failure is an ordinary error value. A failed seal or open fails
// that operation only.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CodecError {
    #[error("Key derivation error: {0}")]
    KeyDerivation(String),

    #[error("KDF salt too short ({len} bytes, expected at least {min})")]
    InvalidSalt { len: usize, min: usize },

    #[error("Cipher setup failed: {0}")]
    CipherSetup(String),

    #[error("Encryption failed: {0}")]
    Seal(String),

    #[error("Malformed envelope: {len} bytes, expected at least {min}")]
    MalformedEnvelope { len: usize, min: usize },

    #[error("Envelope authentication failed — wrong passphrase or tampered data")]
    Authentication,
}
