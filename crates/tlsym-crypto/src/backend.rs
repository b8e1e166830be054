//! Primitive executor: maps an [`Algorithm`] onto the RustCrypto type that
//! implements it.
//!
//! Callers reach this module only after key and IV lengths have been
//! validated. The mapping is a pure function of the algorithm; nothing here
//! holds state between calls.

use aes::{Aes128, Aes192, Aes256};
use aes_gcm::aead::consts::U12;
use aes_gcm::aead::generic_array::typenum::Unsigned;
use aes_gcm::aead::generic_array::GenericArray;
use aes_gcm::aead::{AeadInPlace, KeyInit};
use aes_gcm::{Aes128Gcm, Aes256Gcm, AesGcm};
use cbc::cipher::block_padding::Pkcs7;
use cbc::cipher::{BlockDecryptMut, BlockEncryptMut, KeyIvInit, StreamCipher};
use des::{TdesEde2, TdesEde3};
use tlsym_core::algorithm::Algorithm;
use zeroize::Zeroize;

use crate::cipher::Tag;
use crate::error::{CipherError, CipherResult, Operation};

type Aes192GcmCipher = AesGcm<Aes192, U12>;
type Aes128CtrCipher = ctr::Ctr128BE<Aes128>;
type Aes192CtrCipher = ctr::Ctr128BE<Aes192>;
type Aes256CtrCipher = ctr::Ctr128BE<Aes256>;

const INVALID_LENGTH: &str = "invalid key or IV length";
const BAD_PADDING: &str = "invalid padding or ciphertext length";
const AUTH_FAILED: &str = "authentication failed: wrong key, tampered data, AAD or tag";

/// Whether the active backend can run `algorithm`.
///
/// ChaCha20-Poly1305 is available only when the crate is built with the
/// `chacha20poly1305` feature (on by default).
pub fn supports(algorithm: Algorithm) -> bool {
    match algorithm {
        Algorithm::ChaCha20Poly1305 => cfg!(feature = "chacha20poly1305"),
        _ => true,
    }
}

/// Run a non-AEAD algorithm forward. CBC pads with PKCS#7; CTR does not pad.
pub(crate) fn encrypt_unauthenticated(
    algorithm: Algorithm,
    key: &[u8],
    iv: &[u8],
    plaintext: &[u8],
) -> CipherResult<Vec<u8>> {
    let result = match algorithm {
        Algorithm::Aes128Cbc => cbc_encrypt::<cbc::Encryptor<Aes128>>(key, iv, plaintext),
        Algorithm::Aes192Cbc => cbc_encrypt::<cbc::Encryptor<Aes192>>(key, iv, plaintext),
        Algorithm::Aes256Cbc => cbc_encrypt::<cbc::Encryptor<Aes256>>(key, iv, plaintext),
        Algorithm::DesEdeCbc => cbc_encrypt::<cbc::Encryptor<TdesEde2>>(key, iv, plaintext),
        Algorithm::DesEde3Cbc => cbc_encrypt::<cbc::Encryptor<TdesEde3>>(key, iv, plaintext),
        Algorithm::Aes128Ctr => ctr_apply::<Aes128CtrCipher>(key, iv, plaintext),
        Algorithm::Aes192Ctr => ctr_apply::<Aes192CtrCipher>(key, iv, plaintext),
        Algorithm::Aes256Ctr => ctr_apply::<Aes256CtrCipher>(key, iv, plaintext),
        Algorithm::Aes128Gcm
        | Algorithm::Aes192Gcm
        | Algorithm::Aes256Gcm
        | Algorithm::ChaCha20Poly1305 => Err("AEAD algorithm needs a tag"),
    };
    result.map_err(|reason| failed(algorithm, Operation::Encrypt, reason))
}

/// Inverse of [`encrypt_unauthenticated`].
pub(crate) fn decrypt_unauthenticated(
    algorithm: Algorithm,
    key: &[u8],
    iv: &[u8],
    ciphertext: &[u8],
) -> CipherResult<Vec<u8>> {
    let result = match algorithm {
        Algorithm::Aes128Cbc => cbc_decrypt::<cbc::Decryptor<Aes128>>(key, iv, ciphertext),
        Algorithm::Aes192Cbc => cbc_decrypt::<cbc::Decryptor<Aes192>>(key, iv, ciphertext),
        Algorithm::Aes256Cbc => cbc_decrypt::<cbc::Decryptor<Aes256>>(key, iv, ciphertext),
        Algorithm::DesEdeCbc => cbc_decrypt::<cbc::Decryptor<TdesEde2>>(key, iv, ciphertext),
        Algorithm::DesEde3Cbc => cbc_decrypt::<cbc::Decryptor<TdesEde3>>(key, iv, ciphertext),
        // CTR decryption is the same keystream XOR as encryption
        Algorithm::Aes128Ctr => ctr_apply::<Aes128CtrCipher>(key, iv, ciphertext),
        Algorithm::Aes192Ctr => ctr_apply::<Aes192CtrCipher>(key, iv, ciphertext),
        Algorithm::Aes256Ctr => ctr_apply::<Aes256CtrCipher>(key, iv, ciphertext),
        Algorithm::Aes128Gcm
        | Algorithm::Aes192Gcm
        | Algorithm::Aes256Gcm
        | Algorithm::ChaCha20Poly1305 => Err("AEAD algorithm needs a tag"),
    };
    result.map_err(|reason| failed(algorithm, Operation::Decrypt, reason))
}

/// AEAD encryption with a detached tag.
pub(crate) fn seal(
    algorithm: Algorithm,
    key: &[u8],
    nonce: &[u8],
    aad: &[u8],
    plaintext: &[u8],
) -> CipherResult<(Vec<u8>, Tag)> {
    let result = match algorithm {
        Algorithm::Aes128Gcm => aead_seal::<Aes128Gcm>(key, nonce, aad, plaintext),
        Algorithm::Aes192Gcm => aead_seal::<Aes192GcmCipher>(key, nonce, aad, plaintext),
        Algorithm::Aes256Gcm => aead_seal::<Aes256Gcm>(key, nonce, aad, plaintext),
        #[cfg(feature = "chacha20poly1305")]
        Algorithm::ChaCha20Poly1305 => {
            aead_seal::<chacha20poly1305::ChaCha20Poly1305>(key, nonce, aad, plaintext)
        }
        #[cfg(not(feature = "chacha20poly1305"))]
        Algorithm::ChaCha20Poly1305 => {
            return Err(CipherError::Unsupported(algorithm.name()));
        }
        _ => Err("not an AEAD algorithm"),
    };
    result.map_err(|reason| failed(algorithm, Operation::Encrypt, reason))
}

/// AEAD verification and decryption. No plaintext is returned unless the
/// tag verifies.
pub(crate) fn open(
    algorithm: Algorithm,
    key: &[u8],
    nonce: &[u8],
    aad: &[u8],
    ciphertext: &[u8],
    tag: &Tag,
) -> CipherResult<Vec<u8>> {
    let result = match algorithm {
        Algorithm::Aes128Gcm => aead_open::<Aes128Gcm>(key, nonce, aad, ciphertext, tag),
        Algorithm::Aes192Gcm => aead_open::<Aes192GcmCipher>(key, nonce, aad, ciphertext, tag),
        Algorithm::Aes256Gcm => aead_open::<Aes256Gcm>(key, nonce, aad, ciphertext, tag),
        #[cfg(feature = "chacha20poly1305")]
        Algorithm::ChaCha20Poly1305 => {
            aead_open::<chacha20poly1305::ChaCha20Poly1305>(key, nonce, aad, ciphertext, tag)
        }
        #[cfg(not(feature = "chacha20poly1305"))]
        Algorithm::ChaCha20Poly1305 => {
            return Err(CipherError::Unsupported(algorithm.name()));
        }
        _ => Err("not an AEAD algorithm"),
    };
    result.map_err(|reason| failed(algorithm, Operation::Decrypt, reason))
}

fn failed(algorithm: Algorithm, operation: Operation, reason: &'static str) -> CipherError {
    tracing::debug!(algorithm = algorithm.name(), %operation, reason, "primitive failed");
    CipherError::operation(algorithm.name(), operation, reason)
}

fn cbc_encrypt<E>(key: &[u8], iv: &[u8], plaintext: &[u8]) -> Result<Vec<u8>, &'static str>
where
    E: KeyIvInit + BlockEncryptMut,
{
    let encryptor = E::new_from_slices(key, iv).map_err(|_| INVALID_LENGTH)?;
    Ok(encryptor.encrypt_padded_vec_mut::<Pkcs7>(plaintext))
}

fn cbc_decrypt<D>(key: &[u8], iv: &[u8], ciphertext: &[u8]) -> Result<Vec<u8>, &'static str>
where
    D: KeyIvInit + BlockDecryptMut,
{
    let decryptor = D::new_from_slices(key, iv).map_err(|_| INVALID_LENGTH)?;
    let mut buffer = ciphertext.to_vec();
    match decryptor
        .decrypt_padded_mut::<Pkcs7>(&mut buffer)
        .map(<[u8]>::len)
    {
        Ok(len) => {
            buffer.truncate(len);
            Ok(buffer)
        }
        Err(_) => {
            // The buffer now holds unverified plaintext
            buffer.zeroize();
            Err(BAD_PADDING)
        }
    }
}

fn ctr_apply<C>(key: &[u8], iv: &[u8], data: &[u8]) -> Result<Vec<u8>, &'static str>
where
    C: KeyIvInit + StreamCipher,
{
    let mut cipher = C::new_from_slices(key, iv).map_err(|_| INVALID_LENGTH)?;
    let mut buffer = data.to_vec();
    cipher
        .try_apply_keystream(&mut buffer)
        .map_err(|_| "keystream exhausted")?;
    Ok(buffer)
}

fn aead_seal<C>(
    key: &[u8],
    nonce: &[u8],
    aad: &[u8],
    plaintext: &[u8],
) -> Result<(Vec<u8>, Tag), &'static str>
where
    C: KeyInit + AeadInPlace,
{
    if nonce.len() != C::NonceSize::USIZE {
        return Err(INVALID_LENGTH);
    }
    let cipher = C::new_from_slice(key).map_err(|_| INVALID_LENGTH)?;
    let mut buffer = plaintext.to_vec();
    let tag = cipher
        .encrypt_in_place_detached(GenericArray::from_slice(nonce), aad, &mut buffer)
        .map_err(|_| "AEAD encryption failed")?;
    let tag = Tag::try_from(tag.as_slice()).map_err(|_| "unexpected tag length")?;
    Ok((buffer, tag))
}

fn aead_open<C>(
    key: &[u8],
    nonce: &[u8],
    aad: &[u8],
    ciphertext: &[u8],
    tag: &Tag,
) -> Result<Vec<u8>, &'static str>
where
    C: KeyInit + AeadInPlace,
{
    if nonce.len() != C::NonceSize::USIZE || tag.len() != C::TagSize::USIZE {
        return Err(INVALID_LENGTH);
    }
    let cipher = C::new_from_slice(key).map_err(|_| INVALID_LENGTH)?;
    let mut buffer = ciphertext.to_vec();
    match cipher.decrypt_in_place_detached(
        GenericArray::from_slice(nonce),
        aad,
        &mut buffer,
        GenericArray::from_slice(tag.as_slice()),
    ) {
        Ok(()) => Ok(buffer),
        Err(_) => {
            buffer.zeroize();
            Err(AUTH_FAILED)
        }
    }
}
