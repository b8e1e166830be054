//! Algorithm dispatch and the JSON envelope printed by `tlsym encrypt`.

use anyhow::{bail, Context, Result};
use base64::engine::general_purpose::STANDARD as B64;
use base64::Engine as _;
use rand::RngCore;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tlsym_crypto::{
    AeadCipher, AesCbc, AesCtr, AesGcm, Algorithm, ChaCha20Poly1305, Cipher, CipherResult,
    Encrypted, Mode, TripleDes,
};

/// A constructed cipher, keeping the AEAD capability visible to the caller.
pub enum CipherHandle {
    Plain(Box<dyn Cipher>),
    Aead(Box<dyn AeadCipher>),
}

impl CipherHandle {
    pub fn for_algorithm(algorithm: Algorithm) -> CipherResult<Self> {
        let bits = algorithm.key_len() * 8;
        let handle = match algorithm.mode() {
            Some(Mode::Cbc) => Self::Plain(Box::new(AesCbc::new(bits)?)),
            Some(Mode::Ctr) => Self::Plain(Box::new(AesCtr::new(bits)?)),
            Some(Mode::Gcm) => Self::Aead(Box::new(AesGcm::new(bits)?)),
            None if algorithm == Algorithm::ChaCha20Poly1305 => {
                Self::Aead(Box::new(ChaCha20Poly1305::new()?))
            }
            None => Self::Plain(Box::new(TripleDes::new(bits)?)),
        };
        Ok(handle)
    }

    pub fn algorithm(&self) -> Algorithm {
        match self {
            Self::Plain(c) => c.algorithm(),
            Self::Aead(c) => c.algorithm(),
        }
    }

    pub fn encrypt(
        &self,
        plaintext: &[u8],
        key: &[u8],
        iv: &[u8],
        aad: Option<&[u8]>,
    ) -> Result<Encrypted> {
        let enc = match (self, aad) {
            (Self::Plain(c), None) => c.encrypt(plaintext, key, iv)?,
            (Self::Plain(c), Some(_)) => {
                bail!("{} does not authenticate associated data", c.name())
            }
            (Self::Aead(c), aad) => {
                c.encrypt_with_aad(plaintext, key, iv, aad.unwrap_or_default())?
            }
        };
        Ok(enc)
    }

    pub fn decrypt(
        &self,
        ciphertext: &[u8],
        key: &[u8],
        iv: &[u8],
        aad: Option<&[u8]>,
        tag: Option<&[u8]>,
    ) -> Result<Vec<u8>> {
        let plaintext = match (self, aad) {
            (Self::Plain(c), None) => c.decrypt(ciphertext, key, iv, tag)?,
            (Self::Plain(c), Some(_)) => {
                bail!("{} does not authenticate associated data", c.name())
            }
            (Self::Aead(c), aad) => {
                c.decrypt_with_aad(ciphertext, key, iv, aad.unwrap_or_default(), tag)?
            }
        };
        Ok(plaintext)
    }
}

/// Fresh random IV of `len` bytes.
pub fn random_iv(len: usize) -> Vec<u8> {
    let mut iv = vec![0u8; len];
    rand::thread_rng().fill_bytes(&mut iv);
    iv
}

pub fn decode_b64(what: &str, value: &str) -> Result<Vec<u8>> {
    B64.decode(value.trim())
        .with_context(|| format!("{what} is not valid base64"))
}

/// Everything needed to decrypt, base64-encoded.
///
/// `ciphertext` is omitted when the ciphertext was written to a file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope {
    pub algorithm: Algorithm,
    pub iv: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ciphertext: Option<String>,
}

impl Envelope {
    pub fn new(algorithm: Algorithm, iv: &[u8], enc: &Encrypted, with_ciphertext: bool) -> Self {
        Self {
            algorithm,
            iv: B64.encode(iv),
            tag: enc.tag().map(|t| B64.encode(t)),
            ciphertext: with_ciphertext.then(|| B64.encode(&enc.ciphertext)),
        }
    }

    pub fn iv(&self) -> Result<Vec<u8>> {
        decode_b64("envelope iv", &self.iv)
    }

    pub fn tag(&self) -> Result<Option<Vec<u8>>> {
        self.tag
            .as_deref()
            .map(|t| decode_b64("envelope tag", t))
            .transpose()
    }

    /// The embedded ciphertext, or the contents of `detached` when the
    /// envelope was written alongside an `encrypt --output` file.
    pub fn ciphertext(&self, detached: Option<&Path>) -> Result<Vec<u8>> {
        match (self.ciphertext.as_deref(), detached) {
            (Some(ct), None) => decode_b64("envelope ciphertext", ct),
            (None, Some(path)) => {
                std::fs::read(path).with_context(|| format!("reading {}", path.display()))
            }
            (Some(_), Some(_)) => {
                bail!("envelope already carries the ciphertext; drop --ciphertext")
            }
            (None, None) => bail!(
                "envelope carries no ciphertext; pass the file written by \
                 `tlsym encrypt --output` with --ciphertext"
            ),
        }
    }
}
