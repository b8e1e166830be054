//! AES-GCM with a 12-byte nonce and a detached 16-byte tag.
//!
//! Other GCM nonce lengths are deliberately not accepted. The tag is never
//! appended to the ciphertext; it is returned in [`Encrypted::tag`] and must
//! be handed back on decryption.

use tlsym_core::algorithm::{Algorithm, Mode};

use crate::backend;
use crate::cipher::{check_key_iv, require_tag, AeadCipher, Cipher, Encrypted};
use crate::error::{CipherError, CipherResult};
use crate::AES_KEY_SIZES;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AesGcm {
    algorithm: Algorithm,
}

impl AesGcm {
    /// `key_bits` must be 128, 192 or 256.
    pub fn new(key_bits: usize) -> CipherResult<Self> {
        let algorithm =
            Algorithm::aes(Mode::Gcm, key_bits).ok_or(CipherError::InvalidKeySize {
                family: "AES",
                bits: key_bits,
                supported: AES_KEY_SIZES,
            })?;
        Ok(Self { algorithm })
    }
}

impl Default for AesGcm {
    fn default() -> Self {
        Self {
            algorithm: Algorithm::Aes256Gcm,
        }
    }
}

impl Cipher for AesGcm {
    fn algorithm(&self) -> Algorithm {
        self.algorithm
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

impl AeadCipher for AesGcm {
    fn encrypt_with_aad(
        &self,
        plaintext: &[u8],
        key: &[u8],
        iv: &[u8],
        aad: &[u8],
    ) -> CipherResult<Encrypted> {
        check_key_iv(self.algorithm, key, iv)?;
        let (ciphertext, tag) = backend::seal(self.algorithm, key, iv, aad, plaintext)?;
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
        check_key_iv(self.algorithm, key, iv)?;
        let tag = require_tag(self.algorithm, tag)?;
        backend::open(self.algorithm, key, iv, aad, ciphertext, tag)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::test_util::random_bytes;
    use tlsym_core::algorithm::TAG_LEN;

    struct Fixture {
        cipher: AesGcm,
        key: Vec<u8>,
        iv: Vec<u8>,
    }

    fn fixture(bits: usize) -> Fixture {
        let cipher = AesGcm::new(bits).unwrap();
        Fixture {
            key: random_bytes(cipher.key_len()),
            iv: random_bytes(cipher.iv_len()),
            cipher,
        }
    }

    #[test]
    fn test_descriptors() {
        let cipher = AesGcm::new(128).unwrap();
        assert_eq!(cipher.name(), "aes-128-gcm");
        assert_eq!(cipher.key_len(), 16);
        assert_eq!(cipher.iv_len(), 12);
        assert_eq!(cipher.block_size(), 16);
        assert_eq!(cipher.tag_len(), TAG_LEN);

        assert_eq!(AesGcm::new(192).unwrap().name(), "aes-192-gcm");
        assert_eq!(AesGcm::default().name(), "aes-256-gcm");
    }

    #[test]
    fn test_hello_world_with_aad() {
        let f = fixture(256);
        let enc = f
            .cipher
            .encrypt_with_aad(b"Hello, World!", &f.key, &f.iv, b"Additional Data")
            .unwrap();

        assert_eq!(enc.ciphertext.len(), 13);
        assert_eq!(enc.tag().map(<[u8]>::len), Some(16));

        let dec = f
            .cipher
            .decrypt_with_aad(&enc.ciphertext, &f.key, &f.iv, b"Additional Data", enc.tag())
            .unwrap();
        assert_eq!(dec, b"Hello, World!");
    }

    #[test]
    fn test_plain_encrypt_authenticates_empty_aad() {
        let f = fixture(192);
        let enc = f.cipher.encrypt(b"no aad", &f.key, &f.iv).unwrap();
        assert!(enc.tag.is_some());

        // Same as explicit empty AAD
        let explicit = f.cipher.encrypt_with_aad(b"no aad", &f.key, &f.iv, b"").unwrap();
        assert_eq!(enc, explicit);

        let dec = f.cipher.decrypt(&enc.ciphertext, &f.key, &f.iv, enc.tag()).unwrap();
        assert_eq!(dec, b"no aad");
    }

    #[test]
    fn test_empty_plaintext_still_tagged() {
        let f = fixture(128);
        let enc = f.cipher.encrypt_with_aad(b"", &f.key, &f.iv, b"").unwrap();
        assert!(enc.ciphertext.is_empty());
        assert!(enc.tag.is_some());

        let dec = f
            .cipher
            .decrypt_with_aad(&enc.ciphertext, &f.key, &f.iv, b"", enc.tag())
            .unwrap();
        assert!(dec.is_empty());
    }

    #[test]
    fn test_missing_tag_is_validation_error() {
        let f = fixture(256);
        let enc = f.cipher.encrypt(b"secret", &f.key, &f.iv).unwrap();

        let err = f.cipher.decrypt(&enc.ciphertext, &f.key, &f.iv, None).unwrap_err();
        assert_eq!(err, CipherError::MissingTag("aes-256-gcm"));
        assert_eq!(err.kind(), ErrorKind::Validation);
    }

    #[test]
    fn test_short_tag_is_validation_error() {
        let f = fixture(256);
        let enc = f.cipher.encrypt(b"secret", &f.key, &f.iv).unwrap();
        let tag = enc.tag().unwrap();

        let err = f
            .cipher
            .decrypt(&enc.ciphertext, &f.key, &f.iv, Some(&tag[..12]))
            .unwrap_err();
        assert!(matches!(err, CipherError::TagLength { expected: 16, actual: 12, .. }));
    }

    #[test]
    fn test_tampering_fails_authentication() {
        let f = fixture(256);
        let enc = f
            .cipher
            .encrypt_with_aad(b"Hello, World!", &f.key, &f.iv, b"Additional Data")
            .unwrap();

        let mut ct = enc.ciphertext.clone();
        ct[0] ^= 0x01;
        let err = f
            .cipher
            .decrypt_with_aad(&ct, &f.key, &f.iv, b"Additional Data", enc.tag())
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Operation);

        let err = f
            .cipher
            .decrypt_with_aad(&enc.ciphertext, &f.key, &f.iv, b"Additional Datb", enc.tag())
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Operation);

        let mut tag = enc.tag.unwrap();
        tag[15] ^= 0x80;
        let err = f
            .cipher
            .decrypt_with_aad(&enc.ciphertext, &f.key, &f.iv, b"Additional Data", Some(&tag))
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Operation);
    }

    #[test]
    fn test_wrong_key_fails() {
        let f = fixture(256);
        let enc = f.cipher.encrypt(b"secret", &f.key, &f.iv).unwrap();
        let other = random_bytes(32);
        assert!(f.cipher.decrypt(&enc.ciphertext, &other, &f.iv, enc.tag()).is_err());
    }

    #[test]
    fn test_invalid_key_size_and_lengths() {
        assert_eq!(AesGcm::new(123).unwrap_err().kind(), ErrorKind::Configuration);

        let f = fixture(256);
        let err = f.cipher.encrypt(b"x", &f.key[..16], &f.iv).unwrap_err();
        assert!(matches!(err, CipherError::KeyLength { .. }));

        let err = f.cipher.encrypt(b"x", &f.key, &random_bytes(16)).unwrap_err();
        assert!(matches!(err, CipherError::IvLength { expected: 12, actual: 16, .. }));
    }
}
