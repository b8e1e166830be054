//! Triple DES in CBC mode with PKCS#7 padding. Legacy interop only.
//!
//! - 192-bit keys select full three-key EDE (`des-ede3-cbc`).
//! - 128-bit keys select two-key EDE (`des-ede-cbc`), where the third DES
//!   pass reuses the first key.

use tlsym_core::algorithm::Algorithm;

use crate::backend;
use crate::cipher::{check_key_iv, reject_tag, Cipher, Encrypted};
use crate::error::{CipherError, CipherResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TripleDes {
    algorithm: Algorithm,
}

impl TripleDes {
    /// `key_bits` must be 128 or 192.
    pub fn new(key_bits: usize) -> CipherResult<Self> {
        let algorithm = Algorithm::triple_des(key_bits).ok_or(CipherError::InvalidKeySize {
            family: "3DES",
            bits: key_bits,
            supported: "128 or 192",
        })?;
        if algorithm == Algorithm::DesEdeCbc {
            tracing::warn!("two-key 3DES selected; use only for compatibility with legacy peers");
        }
        Ok(Self { algorithm })
    }
}

impl Default for TripleDes {
    fn default() -> Self {
        Self {
            algorithm: Algorithm::DesEde3Cbc,
        }
    }
}

impl Cipher for TripleDes {
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::test_util::random_bytes;

    const PLAINTEXT: &[u8] = b"This is a test string for TripleDES encryption.";

    #[test]
    fn test_three_key() {
        let cipher = TripleDes::new(192).unwrap();
        assert_eq!(cipher.name(), "des-ede3-cbc");
        assert_eq!(cipher.key_len(), 24);
        assert_eq!(cipher.iv_len(), 8);
        assert_eq!(cipher.block_size(), 8);

        let key = random_bytes(24);
        let iv = random_bytes(8);
        let enc = cipher.encrypt(PLAINTEXT, &key, &iv).unwrap();
        assert!(enc.tag.is_none());
        // 47 bytes pad up to 48
        assert_eq!(enc.ciphertext.len(), 48);
        assert_eq!(cipher.decrypt(&enc.ciphertext, &key, &iv, None).unwrap(), PLAINTEXT);
    }

    #[test]
    fn test_two_key() {
        let cipher = TripleDes::new(128).unwrap();
        assert_eq!(cipher.name(), "des-ede-cbc");
        assert_eq!(cipher.key_len(), 16);

        let key = random_bytes(16);
        let iv = random_bytes(8);
        let enc = cipher.encrypt(PLAINTEXT, &key, &iv).unwrap();
        assert_eq!(cipher.decrypt(&enc.ciphertext, &key, &iv, None).unwrap(), PLAINTEXT);
    }

    #[test]
    fn test_default_is_three_key() {
        assert_eq!(TripleDes::default(), TripleDes::new(192).unwrap());
    }

    #[test]
    fn test_empty_plaintext() {
        let cipher = TripleDes::default();
        let key = random_bytes(24);
        let iv = random_bytes(8);
        let enc = cipher.encrypt(b"", &key, &iv).unwrap();
        assert_eq!(enc.ciphertext.len(), 8);
        assert!(cipher.decrypt(&enc.ciphertext, &key, &iv, None).unwrap().is_empty());
    }

    #[test]
    fn test_invalid_key_sizes() {
        for bits in [64, 123, 256] {
            let err = TripleDes::new(bits).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::Configuration);
        }
        assert!(TripleDes::new(256).unwrap_err().to_string().contains("3DES"));
    }

    #[test]
    fn test_length_mismatches() {
        let cipher = TripleDes::default();
        let err = cipher.encrypt(PLAINTEXT, &random_bytes(16), &random_bytes(8)).unwrap_err();
        assert!(matches!(err, CipherError::KeyLength { expected: 24, actual: 16, .. }));

        let err = cipher.encrypt(PLAINTEXT, &random_bytes(24), &random_bytes(16)).unwrap_err();
        assert!(matches!(err, CipherError::IvLength { expected: 8, actual: 16, .. }));
    }

    #[test]
    fn test_different_keys_and_ivs() {
        let cipher = TripleDes::default();
        let key = random_bytes(24);
        let iv = random_bytes(8);
        let base = cipher.encrypt(PLAINTEXT, &key, &iv).unwrap();

        let other_key = cipher.encrypt(PLAINTEXT, &random_bytes(24), &iv).unwrap();
        assert_ne!(base.ciphertext, other_key.ciphertext);

        let other_iv = cipher.encrypt(PLAINTEXT, &key, &random_bytes(8)).unwrap();
        assert_ne!(base.ciphertext, other_iv.ciphertext);
    }
}
