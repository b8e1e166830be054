//! tlsym-crypto: one contract over several symmetric ciphers
//!
//! Variants validate key, IV and tag shapes, then hand the bytes to a vetted
//! RustCrypto primitive. Nothing here implements cipher rounds, GHASH or
//! Poly1305 itself.
//!
//! ```text
//! Cipher (name, key_len, iv_len, block_size, encrypt, decrypt)
//!   ├── AesCbc      aes-{128,192,256}-cbc    PKCS#7
//!   ├── AesCtr      aes-{128,192,256}-ctr    length-preserving
//!   ├── TripleDes   des-ede-cbc, des-ede3-cbc
//!   └── AeadCipher (encrypt_with_aad, decrypt_with_aad, detached 16-byte tag)
//!         ├── AesGcm            aes-{128,192,256}-gcm
//!         └── ChaCha20Poly1305  chacha20-poly1305
//! ```
//!
//! Validation errors are raised before any primitive runs. IV uniqueness
//! under a key is the caller's responsibility and is not checked.

pub mod aes_cbc;
pub mod aes_ctr;
pub mod backend;
pub mod chacha;
pub mod cipher;
pub mod error;
pub mod gcm;
pub mod triple_des;

pub use aes_cbc::AesCbc;
pub use aes_ctr::AesCtr;
pub use chacha::ChaCha20Poly1305;
pub use cipher::{AeadCipher, Cipher, Encrypted, Tag};
pub use error::{CipherError, CipherResult, ErrorKind, Operation};
pub use gcm::AesGcm;
pub use tlsym_core::algorithm::{Algorithm, Mode, TAG_LEN};
pub use triple_des::TripleDes;

/// Key sizes (bits) accepted by every AES variant.
pub(crate) const AES_KEY_SIZES: &str = "128, 192 or 256";
