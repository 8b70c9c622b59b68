// Credvault — Library root
//
// Re-exports the backend, codec, key store, credential store, and CLI modules.

pub mod backend;
pub mod cli;
pub mod codec;
pub mod error;
pub mod keystore;
pub mod store;

pub use error::{CredvaultError, Result};
