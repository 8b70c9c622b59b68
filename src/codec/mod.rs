// Credvault — Codec Module
//
// Everything that touches secret material: Argon2id key derivation from the
// store passphrase, the ChaCha20-Poly1305 envelope that credentials are sealed
// in, and the plain SHA-256 digest used to obfuscate backend lookup keys.

mod digest;
mod envelope;
mod error;
mod kdf;

pub use digest::lookup_digest;
pub use envelope::{EnvelopeCodec, NONCE_LEN, TAG_LEN};
pub use error::CodecError;
pub use kdf::{DerivedKey, KdfParams, KeyDeriver, KEY_LEN, MIN_SALT_LEN};

/// A codec with the cheapest Argon2 parameters, so tests don't pay 64 MiB per derivation.
#[cfg(test)]
pub(crate) fn test_codec() -> EnvelopeCodec {
    let params = KdfParams {
        memory_kib: 8,
        iterations: 1,
        parallelism: 1,
    };
    EnvelopeCodec::new(KeyDeriver::for_namespace("credvault-test", params).unwrap())
}
