//! The cipher contract shared by every variant.
//!
//! Two capability sets:
//! - [`Cipher`]: encrypt/decrypt with key and IV. Non-AEAD variants never
//!   produce a tag and refuse one on decryption.
//! - [`AeadCipher`]: adds associated data and the detached 16-byte tag.
//!   Passing AAD to a cipher that cannot authenticate it does not compile.

use tlsym_core::algorithm::{Algorithm, TAG_LEN};

use crate::error::{CipherError, CipherResult};

/// A detached AEAD authentication tag.
pub type Tag = [u8; TAG_LEN];

/// Output of an encryption call.
///
/// The tag never travels inside `ciphertext`: for AEAD variants
/// `ciphertext.len() == plaintext.len()` and the tag is carried alongside.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Encrypted {
    pub ciphertext: Vec<u8>,
    pub tag: Option<Tag>,
}

impl Encrypted {
    pub(crate) fn unauthenticated(ciphertext: Vec<u8>) -> Self {
        Self {
            ciphertext,
            tag: None,
        }
    }

    pub(crate) fn authenticated(ciphertext: Vec<u8>, tag: Tag) -> Self {
        Self {
            ciphertext,
            tag: Some(tag),
        }
    }

    /// The tag as a byte slice, in the shape `decrypt` accepts it.
    pub fn tag(&self) -> Option<&[u8]> {
        self.tag.as_ref().map(|t| t.as_slice())
    }
}

/// Capabilities every cipher variant provides.
///
/// Implementations are immutable after construction; every call is
/// independent, so a single instance can be shared between threads.
pub trait Cipher: Send + Sync {
    /// The algorithm this instance was configured for.
    fn algorithm(&self) -> Algorithm;

    /// Canonical lowercase identifier, e.g. `aes-128-ctr`.
    fn name(&self) -> &'static str {
        self.algorithm().name()
    }

    /// Required key length in bytes.
    fn key_len(&self) -> usize {
        self.algorithm().key_len()
    }

    /// Required IV / nonce length in bytes.
    fn iv_len(&self) -> usize {
        self.algorithm().iv_len()
    }

    /// Block size in bytes (1 for stream-like AEAD ciphers).
    fn block_size(&self) -> usize {
        self.algorithm().block_size()
    }

    /// Encrypt `plaintext`. AEAD variants authenticate an empty AAD and
    /// always return a tag; the others never do.
    ///
    /// The caller must not reuse an IV under the same key.
    fn encrypt(&self, plaintext: &[u8], key: &[u8], iv: &[u8]) -> CipherResult<Encrypted>;

    /// Decrypt `ciphertext`. AEAD variants require `tag`; non-AEAD variants
    /// reject one with [`CipherError::UnexpectedTag`].
    fn decrypt(
        &self,
        ciphertext: &[u8],
        key: &[u8],
        iv: &[u8],
        tag: Option<&[u8]>,
    ) -> CipherResult<Vec<u8>>;
}

/// Authenticated encryption with associated data.
pub trait AeadCipher: Cipher {
    /// Length of the authentication tag in bytes.
    fn tag_len(&self) -> usize {
        TAG_LEN
    }

    /// Encrypt and authenticate `plaintext` together with `aad`.
    /// The returned [`Encrypted`] always carries a tag.
    fn encrypt_with_aad(
        &self,
        plaintext: &[u8],
        key: &[u8],
        iv: &[u8],
        aad: &[u8],
    ) -> CipherResult<Encrypted>;

    /// Verify `tag` over `ciphertext` and `aad`, then decrypt.
    ///
    /// A missing tag is a validation error raised before any primitive
    /// runs. A tag that does not verify yields an operation error and no
    /// plaintext.
    fn decrypt_with_aad(
        &self,
        ciphertext: &[u8],
        key: &[u8],
        iv: &[u8],
        aad: &[u8],
        tag: Option<&[u8]>,
    ) -> CipherResult<Vec<u8>>;
}

/// Check key and IV lengths against the algorithm's fixed shape.
pub(crate) fn check_key_iv(algorithm: Algorithm, key: &[u8], iv: &[u8]) -> CipherResult<()> {
    if key.len() != algorithm.key_len() {
        return Err(CipherError::KeyLength {
            algorithm: algorithm.name(),
            expected: algorithm.key_len(),
            actual: key.len(),
        });
    }
    if iv.len() != algorithm.iv_len() {
        return Err(CipherError::IvLength {
            algorithm: algorithm.name(),
            expected: algorithm.iv_len(),
            actual: iv.len(),
        });
    }
    Ok(())
}

/// Require a tag of exactly [`TAG_LEN`] bytes.
pub(crate) fn require_tag(algorithm: Algorithm, tag: Option<&[u8]>) -> CipherResult<&Tag> {
    let tag = tag.ok_or(CipherError::MissingTag(algorithm.name()))?;
    <&Tag>::try_from(tag).map_err(|_| CipherError::TagLength {
        algorithm: algorithm.name(),
        expected: TAG_LEN,
        actual: tag.len(),
    })
}

/// Refuse a tag handed to a cipher that cannot verify it.
pub(crate) fn reject_tag(algorithm: Algorithm, tag: Option<&[u8]>) -> CipherResult<()> {
    match tag {
        Some(_) => Err(CipherError::UnexpectedTag(algorithm.name())),
        None => Ok(()),
    }
}
