// Credvault — Lookup digest
//
// Backend keys for identities are hex(SHA-256(input)). This is obfuscation of a
// non-secret identifier and is deliberately separate from key derivation.

use sha2::{Digest, Sha256};

/// Hex-encoded SHA-256 of `input`: 64 lowercase hex characters.
pub fn lookup_digest(input: &str) -> String {
    hex::encode(Sha256::digest(input.as_bytes()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_digest_is_deterministic() {
        assert_eq!(lookup_digest("alice@org1"), lookup_digest("alice@org1"));
    }

    #[test]
    fn test_lookup_digest_known_vector() {
        assert_eq!(
            lookup_digest("abc"),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn test_lookup_digest_distinguishes_inputs() {
        assert_ne!(lookup_digest("alice@org1"), lookup_digest("alice@org2"));
        assert_eq!(lookup_digest("").len(), 64);
    }
}
