//! AES in CBC mode with PKCS#7 padding.
//!
//! Ciphertext is always a whole number of 16-byte blocks and at least one
//! block long: an empty plaintext encrypts to a single block of padding.
//! CBC is not authenticated; pair it with a MAC or prefer [`crate::AesGcm`].

use tlsym_core::algorithm::{Algorithm, Mode};

use crate::backend;
use crate::cipher::{check_key_iv, reject_tag, Cipher, Encrypted};
use crate::error::{CipherError, CipherResult};
use crate::AES_KEY_SIZES;

/// AES-CBC with a key size chosen at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AesCbc {
    algorithm: Algorithm,
}

impl AesCbc {
    /// `key_bits` must be 128, 192 or 256.
    pub fn new(key_bits: usize) -> CipherResult<Self> {
        let algorithm =
            Algorithm::aes(Mode::Cbc, key_bits).ok_or(CipherError::InvalidKeySize {
                family: "AES",
                bits: key_bits,
                supported: AES_KEY_SIZES,
            })?;
        Ok(Self { algorithm })
    }
}

impl Default for AesCbc {
    fn default() -> Self {
        Self {
            algorithm: Algorithm::Aes256Cbc,
        }
    }
}

impl Cipher for AesCbc {
    fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    fn encrypt(&self, plaintext: &[u8], key: &[u8], iv: &[u8]) -> CipherResult<Encrypted> {
        check_key_iv(self.algorithm, key, iv)?;
        let ciphertext = backend::encrypt_unauthenticated(self.algorithm, key, iv, plaintext)?;
        Ok(Encrypted::unauthenticated(ciphertext))
    }

    fn decrypt(
        &self,
        ciphertext: &[u8],
        key: &[u8],
        iv: &[u8],
        tag: Option<&[u8]>,
    ) -> CipherResult<Vec<u8>> {
        check_key_iv(self.algorithm, key, iv)?;
        reject_tag(self.algorithm, tag)?;
        backend::decrypt_unauthenticated(self.algorithm, key, iv, ciphertext)
    }
}
