//! ChaCha20-Poly1305 (RFC 8439): 32-byte key, 12-byte nonce, detached
//! 16-byte Poly1305 tag.
//!
//! Availability is a property of the build (`chacha20poly1305` feature).
//! Construction fails with [`CipherError::Unsupported`] when the backend
//! lacks it, so callers can fall back to AES-GCM instead of retrying.

use tlsym_core::algorithm::Algorithm;

use crate::backend;
use crate::cipher::{check_key_iv, require_tag, AeadCipher, Cipher, Encrypted};
use crate::error::{CipherError, CipherResult};

const ALGORITHM: Algorithm = Algorithm::ChaCha20Poly1305;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChaCha20Poly1305 {
    _probed: (),
}

impl ChaCha20Poly1305 {
    pub fn new() -> CipherResult<Self> {
        if !backend::supports(ALGORITHM) {
            return Err(CipherError::Unsupported(ALGORITHM.name()));
        }
        Ok(Self { _probed: () })
    }
}

impl Cipher for ChaCha20Poly1305 {
    fn algorithm(&self) -> Algorithm {
        ALGORITHM
    }

    fn encrypt(&self, plaintext: &[u8], key: &[u8], iv: &[u8]) -> CipherResult<Encrypted> {
        self.encrypt_with_aad(plaintext, key, iv, &[])
    }

    fn decrypt(
        &self,
        ciphertext: &[u8],
        key: &[u8],
        iv: &[u8],
        tag: Option<&[u8]>,
    ) -> CipherResult<Vec<u8>> {
        self.decrypt_with_aad(ciphertext, key, iv, &[], tag)
    }
}

impl AeadCipher for ChaCha20Poly1305 {
    fn encrypt_with_aad(
        &self,
        plaintext: &[u8],
        key: &[u8],
        iv: &[u8],
        aad: &[u8],
    ) -> CipherResult<Encrypted> {
        check_key_iv(ALGORITHM, key, iv)?;
        let (ciphertext, tag) = backend::seal(ALGORITHM, key, iv, aad, plaintext)?;
        Ok(Encrypted::authenticated(ciphertext, tag))
    }

    fn decrypt_with_aad(
        &self,
        ciphertext: &[u8],
        key: &[u8],
        iv: &[u8],
        aad: &[u8],
        tag: Option<&[u8]>,
    ) -> CipherResult<Vec<u8>> {
        check_key_iv(ALGORITHM, key, iv)?;
        let tag = require_tag(ALGORITHM, tag)?;
        backend::open(ALGORITHM, key, iv, aad, ciphertext, tag)
    }
}
