// Credvault — Credential Envelope
//
// Layout: nonce (12) || ciphertext || Poly1305 tag (16). A fresh random nonce
// is drawn for every seal; reusing one under the same key breaks ChaCha20-Poly1305.

use chacha20poly1305::{aead::Aead, ChaCha20Poly1305, KeyInit, Nonce};
use rand::RngCore;

use super::{CodecError, DerivedKey, KeyDeriver};

/// Nonce length for ChaCha20-Poly1305 (12 bytes).
pub const NONCE_LEN: usize = 12;

/// ChaCha20-Poly1305 auth tag length (16 bytes).
pub const TAG_LEN: usize = 16;

/// Seals and opens byte payloads under passphrase-derived keys.
#[derive(Debug, Clone)]
pub struct EnvelopeCodec {
    deriver: KeyDeriver,
}

impl EnvelopeCodec {
    pub fn new(deriver: KeyDeriver) -> Self {
        Self { deriver }
    }

    pub fn derive_key(&self, passphrase: &str) -> Result<DerivedKey, CodecError> {
        self.deriver.derive(passphrase)
    }

    /// Derive the key for `passphrase` and seal `plaintext` under it.
    pub fn seal(&self, plaintext: &[u8], passphrase: &str) -> Result<Vec<u8>, CodecError> {
        let key = self.derive_key(passphrase)?;
        Self::seal_with_key(&key, plaintext)
    }

    /// Derive the key for `passphrase` and open `envelope` with it.
    pub fn open(&self, envelope: &[u8], passphrase: &str) -> Result<Vec<u8>, CodecError> {
        let key = self.derive_key(passphrase)?;
        Self::open_with_key(&key, envelope)
    }

    pub fn seal_with_key(key: &DerivedKey, plaintext: &[u8]) -> Result<Vec<u8>, CodecError> {
        let cipher = Self::cipher(key)?;

        let mut nonce = [0u8; NONCE_LEN];
        rand::rng().fill_bytes(&mut nonce);

        let ciphertext = cipher
            .encrypt(Nonce::from_slice(&nonce), plaintext)
            .map_err(|e| CodecError::Seal(e.to_string()))?;

        let mut envelope = Vec::with_capacity(NONCE_LEN + ciphertext.len());
        envelope.extend_from_slice(&nonce);
        envelope.extend_from_slice(&ciphertext);
        Ok(envelope)
    }

    pub fn open_with_key(key: &DerivedKey, envelope: &[u8]) -> Result<Vec<u8>, CodecError> {
        // Anything shorter cannot even carry a nonce and an empty payload's tag.
        if envelope.len() < NONCE_LEN + TAG_LEN {
            return Err(CodecError::MalformedEnvelope {
                len: envelope.len(),
                min: NONCE_LEN + TAG_LEN,
            });
        }

        let cipher = Self::cipher(key)?;
        let (nonce, ciphertext) = envelope.split_at(NONCE_LEN);

        cipher
            .decrypt(Nonce::from_slice(nonce), ciphertext)
            .map_err(|_| CodecError::Authentication)
    }

    fn cipher(key: &DerivedKey) -> Result<ChaCha20Poly1305, CodecError> {
        ChaCha20Poly1305::new_from_slice(key.as_bytes())
            .map_err(|e| CodecError::CipherSetup(e.to_string()))
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::test_codec;

    #[test]
    fn test_seal_open_round_trip() {
        let codec = test_codec();
        for plaintext in [&b""[..], &b"CERT-BYTES"[..], &[0xABu8; 4096][..]] {
            let envelope = codec.seal(plaintext, "secret").unwrap();
            let opened = codec.open(&envelope, "secret").unwrap();
            assert_eq!(opened, plaintext, "Open(Seal(C, P), P) must return C");
        }
    }

    #[test]
    fn test_envelope_length_is_nonce_plus_ciphertext_plus_tag() {
        let codec = test_codec();
        let envelope = codec.seal(b"CERT-BYTES", "secret").unwrap();
        assert_eq!(envelope.len(), NONCE_LEN + b"CERT-BYTES".len() + TAG_LEN);
    }

    #[test]
    fn test_seal_uses_fresh_nonce() {
        let codec = test_codec();
        let a = codec.seal(b"CERT-BYTES", "secret").unwrap();
        let b = codec.seal(b"CERT-BYTES", "secret").unwrap();
        assert_ne!(a[..NONCE_LEN], b[..NONCE_LEN], "Each seal must draw a new nonce");
        assert_ne!(a, b, "Identical inputs must still produce different envelopes");
    }

    #[test]
    fn test_wrong_passphrase_rejected() {
        let codec = test_codec();
        let envelope = codec.seal(b"CERT-BYTES", "secret").unwrap();
        assert!(matches!(
            codec.open(&envelope, "wrong"),
            Err(CodecError::Authentication)
        ));
    }

    #[test]
    fn test_tampered_envelope_rejected() {
        let codec = test_codec();
        let key = codec.derive_key("secret").unwrap();
        let mut envelope = EnvelopeCodec::seal_with_key(&key, b"CERT-BYTES").unwrap();
        let last = envelope.len() - 1;
        envelope[last] ^= 0x01;
        assert!(matches!(
            EnvelopeCodec::open_with_key(&key, &envelope),
            Err(CodecError::Authentication)
        ));
    }

    #[test]
    fn test_short_envelope_is_malformed_not_panic() {
        let codec = test_codec();
        let key = codec.derive_key("secret").unwrap();
        for len in [0, 5, NONCE_LEN, NONCE_LEN + TAG_LEN - 1] {
            match EnvelopeCodec::open_with_key(&key, &vec![0u8; len]) {
                Err(CodecError::MalformedEnvelope { len: got, min }) => {
                    assert_eq!(got, len);
                    assert_eq!(min, NONCE_LEN + TAG_LEN);
                }
                other => panic!("expected MalformedEnvelope for {} bytes, got {:?}", len, other),
            }
        }
    }

    #[test]
    fn test_minimum_length_garbage_fails_authentication() {
        let codec = test_codec();
        let key = codec.derive_key("secret").unwrap();
        assert!(matches!(
            EnvelopeCodec::open_with_key(&key, &[0u8; NONCE_LEN + TAG_LEN]),
            Err(CodecError::Authentication)
        ));
    }
}
