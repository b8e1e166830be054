//! AES in CTR mode.
//!
//! The 16-byte IV is the initial counter block, incremented as a 128-bit
//! big-endian integer. No padding: ciphertext length equals plaintext
//! length, and any prefix of a ciphertext decrypts to the same prefix of
//! the plaintext.

use tlsym_core::algorithm::{Algorithm, Mode};

use crate::backend;
use crate::cipher::{check_key_iv, reject_tag, Cipher, Encrypted};
use crate::error::{CipherError, CipherResult};
use crate::AES_KEY_SIZES;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AesCtr {
    algorithm: Algorithm,
}

impl AesCtr {
    /// `key_bits` must be 128, 192 or 256.
    pub fn new(key_bits: usize) -> CipherResult<Self> {
        let algorithm =
            Algorithm::aes(Mode::Ctr, key_bits).ok_or(CipherError::InvalidKeySize {
                family: "AES",
                bits: key_bits,
                supported: AES_KEY_SIZES,
            })?;
        Ok(Self { algorithm })
    }
}

impl Default for AesCtr {
    fn default() -> Self {
        Self {
            algorithm: Algorithm::Aes256Ctr,
        }
    }
}

impl Cipher for AesCtr {
    fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    fn encrypt(&self, plaintext: &[u8], key: &[u8], iv: &[u8]) -> CipherResult<Encrypted> {
        check_key_iv(self.algorithm, key, iv)?;
        backend::encrypt_unauthenticated(self.algorithm, key, iv, plaintext)
            .map(Encrypted::unauthenticated)
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::test_util::random_bytes;

    #[test]
    fn test_descriptors() {
        for (bits, name, key_len) in [
            (128, "aes-128-ctr", 16),
            (192, "aes-192-ctr", 24),
            (256, "aes-256-ctr", 32),
        ] {
            let cipher = AesCtr::new(bits).unwrap();
            assert_eq!(cipher.name(), name);
            assert_eq!(cipher.key_len(), key_len);
            assert_eq!(cipher.iv_len(), 16);
            assert_eq!(cipher.block_size(), 16);
        }
    }

    #[test]
    fn test_roundtrip_preserves_length() {
        let cipher = AesCtr::new(128).unwrap();
        let key = random_bytes(16);
        let iv = random_bytes(16);
        let plaintext = b"Test CTR encryption";

        let enc = cipher.encrypt(plaintext, &key, &iv).unwrap();
        assert_eq!(enc.ciphertext.len(), plaintext.len());
        assert_ne!(&enc.ciphertext[..], &plaintext[..]);
        assert!(enc.tag.is_none());

        let dec = cipher.decrypt(&enc.ciphertext, &key, &iv, None).unwrap();
        assert_eq!(dec, plaintext);
    }

    #[test]
    fn test_partial_decryption() {
        let cipher = AesCtr::default();
        let key = random_bytes(32);
        let iv = random_bytes(16);
        let plaintext = b"This is a test of partial decryption in CTR mode.";

        let enc = cipher.encrypt(plaintext, &key, &iv).unwrap();
        let partial = cipher.decrypt(&enc.ciphertext[..10], &key, &iv, None).unwrap();
        assert_eq!(partial, &plaintext[..10]);
    }

    #[test]
    fn test_block_aligned_range_needs_advanced_counter() {
        let cipher = AesCtr::default();
        let key = random_bytes(32);
        let iv = [0u8; 16];
        let plaintext = b"0123456789abcdefFEDCBA9876543210 and a tail";

        let enc = cipher.encrypt(plaintext, &key, &iv).unwrap();
        let range = &enc.ciphertext[16..32];

        let next_iv = 1u128.to_be_bytes();
        let dec = cipher.decrypt(range, &key, &next_iv, None).unwrap();
        assert_eq!(dec, &plaintext[16..32]);

        let misaligned = cipher.decrypt(range, &key, &iv, None).unwrap();
        assert_ne!(misaligned, &plaintext[16..32]);
    }

    #[test]
    fn test_empty_plaintext() {
        let cipher = AesCtr::default();
        let key = random_bytes(32);
        let iv = random_bytes(16);

        let enc = cipher.encrypt(b"", &key, &iv).unwrap();
        assert!(enc.ciphertext.is_empty());
        assert!(cipher.decrypt(&enc.ciphertext, &key, &iv, None).unwrap().is_empty());
    }

    #[test]
    fn test_different_ivs_differ() {
        let cipher = AesCtr::default();
        let key = random_bytes(32);
        let a = cipher.encrypt(b"Hello, World!", &key, &random_bytes(16)).unwrap();
        let b = cipher.encrypt(b"Hello, World!", &key, &random_bytes(16)).unwrap();
        assert_ne!(a.ciphertext, b.ciphertext);
    }

    #[test]
    fn test_invalid_key_size() {
        assert_eq!(AesCtr::new(123).unwrap_err().kind(), ErrorKind::Configuration);
        assert_eq!(AesCtr::new(512).unwrap_err().kind(), ErrorKind::Configuration);
        assert_eq!(
            AesCtr::new(64).unwrap_err(),
            CipherError::InvalidKeySize {
                family: "AES",
                bits: 64,
                supported: AES_KEY_SIZES,
            }
        );
        assert_eq!(AesCtr::new(192).unwrap().name(), "aes-192-ctr");
    }

    #[test]
    fn test_validation_precedes_primitive() {
        let cipher = AesCtr::default();
        let err = cipher
            .encrypt(b"x", &random_bytes(32), &random_bytes(15))
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);

        let err = cipher
            .decrypt(b"x", &random_bytes(32), &random_bytes(16), Some(&[1u8; 16]))
            .unwrap_err();
        assert_eq!(err, CipherError::UnexpectedTag("aes-256-ctr"));
    }
}
