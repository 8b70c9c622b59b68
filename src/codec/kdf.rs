// Credvault — Passphrase Key Derivation
//
// Turns the store passphrase into the 32-byte ChaCha20-Poly1305 key.
//
// Flow:
//   1. `KeyDeriver::for_namespace()` — builds the per-deployment salt and validates Argon2id params
//   2. `derive()` — runs Argon2id over the passphrase into a zeroizing buffer
//   3. The caller holds the `DerivedKey` for as long as it seals or opens envelopes

use std::fmt;

use argon2::{Algorithm, Argon2, Params, Version};
use sha2::{Digest, Sha256};
use zeroize::Zeroizing;

use super::CodecError;

// ─── Constants ───────────────────────────────────────────────────────────────

/// Length of the derived cipher key in bytes (256-bit for ChaCha20-Poly1305).
pub const KEY_LEN: usize = 32;

/// Shortest salt Argon2 accepts.
pub const MIN_SALT_LEN: usize = 8;

/// Domain label mixed into namespace salts so they never match another tool's.
const SALT_DOMAIN: &str = "credvault";

// Argon2id parameters: strong defaults for a security application.
// m=65536 (64 MiB), t=3 (3 iterations), p=4 (4 parallelism lanes)
const ARGON2_M_COST: u32 = 65536;
const ARGON2_T_COST: u32 = 3;
const ARGON2_P_COST: u32 = 4;

// ─── Parameters ──────────────────────────────────────────────────────────────

/// Argon2id cost parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KdfParams {
    pub memory_kib: u32,
    pub iterations: u32,
    pub parallelism: u32,
}

impl Default for KdfParams {
    fn default() -> Self {
        Self {
            memory_kib: ARGON2_M_COST,
            iterations: ARGON2_T_COST,
            parallelism: ARGON2_P_COST,
        }
    }
}

impl KdfParams {
    fn to_argon2(self) -> Result<Params, CodecError> {
        Params::new(self.memory_kib, self.iterations, self.parallelism, Some(KEY_LEN))
            .map_err(|e| CodecError::KeyDerivation(format!("invalid Argon2 params: {}", e)))
    }
}

// ─── Derived key ─────────────────────────────────────────────────────────────

/// A symmetric key derived from a passphrase. Zeroized on drop, never printed.
#[derive(Clone)]
pub struct DerivedKey(Zeroizing<[u8; KEY_LEN]>);

impl DerivedKey {
    pub fn as_bytes(&self) -> &[u8; KEY_LEN] {
        &self.0
    }
}

impl fmt::Debug for DerivedKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("DerivedKey([REDACTED])")
    }
}

// ─── Deriver ─────────────────────────────────────────────────────────────────

/// Deterministic passphrase → key derivation with a fixed per-deployment salt.
/// The same passphrase, salt and params always produce the same key.
#[derive(Clone)]
pub struct KeyDeriver {
    params: Params,
    salt: Vec<u8>,
}

impl KeyDeriver {
    /// Create a deriver with an explicit salt.
    pub fn new(params: KdfParams, salt: impl Into<Vec<u8>>) -> Result<Self, CodecError> {
        let salt = salt.into();
        if salt.len() < MIN_SALT_LEN {
            return Err(CodecError::InvalidSalt {
                len: salt.len(),
                min: MIN_SALT_LEN,
            });
        }
        Ok(Self {
            params: params.to_argon2()?,
            salt,
        })
    }

    /// Create a deriver whose salt is bound to a deployment namespace.
    /// Salt = SHA-256("credvault" || "::" || namespace)
    pub fn for_namespace(namespace: &str, params: KdfParams) -> Result<Self, CodecError> {
        Self::new(params, Self::build_salt(namespace))
    }

    fn build_salt(namespace: &str) -> Vec<u8> {
        let mut hasher = Sha256::new();
        hasher.update(SALT_DOMAIN.as_bytes());
        hasher.update(b"::");
        hasher.update(namespace.as_bytes());
        hasher.finalize().to_vec()
    }

    /// Derive the cipher key for `passphrase`.
    pub fn derive(&self, passphrase: &str) -> Result<DerivedKey, CodecError> {
        let argon2 = Argon2::new(Algorithm::Argon2id, Version::V0x13, self.params.clone());

        let mut key = Zeroizing::new([0u8; KEY_LEN]);
        argon2
            .hash_password_into(passphrase.as_bytes(), &self.salt, &mut key[..])
            .map_err(|e| CodecError::KeyDerivation(format!("Argon2id hash failed: {}", e)))?;

        Ok(DerivedKey(key))
    }
}

impl fmt::Debug for KeyDeriver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyDeriver")
            .field("memory_kib", &self.params.m_cost())
            .field("iterations", &self.params.t_cost())
            .field("parallelism", &self.params.p_cost())
            .field("salt_len", &self.salt.len())
            .finish()
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
