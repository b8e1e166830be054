//! Algorithm identifiers and their fixed parameter shapes.
//!
//! The canonical names are the OpenSSL cipher method strings, so a ciphertext
//! produced here can be checked against `openssl enc` or any other backend
//! that selects primitives by the same names.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::TlsymError;

/// Length of every AEAD authentication tag produced here (128-bit).
pub const TAG_LEN: usize = 16;

/// Block cipher mode for the AES family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mode {
    Cbc,
    Ctr,
    Gcm,
}

/// A concrete algorithm/mode/key-size combination.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Algorithm {
    #[serde(rename = "aes-128-cbc")]
    Aes128Cbc,
    #[serde(rename = "aes-192-cbc")]
    Aes192Cbc,
    #[serde(rename = "aes-256-cbc")]
    Aes256Cbc,
    #[serde(rename = "aes-128-ctr")]
    Aes128Ctr,
    #[serde(rename = "aes-192-ctr")]
    Aes192Ctr,
    #[serde(rename = "aes-256-ctr")]
    Aes256Ctr,
    #[serde(rename = "aes-128-gcm")]
    Aes128Gcm,
    #[serde(rename = "aes-192-gcm")]
    Aes192Gcm,
    #[default]
    #[serde(rename = "aes-256-gcm")]
    Aes256Gcm,
    #[serde(rename = "chacha20-poly1305")]
    ChaCha20Poly1305,
    /// Two-key 3DES (K3 = K1), kept for compatibility only.
    #[serde(rename = "des-ede-cbc")]
    DesEdeCbc,
    #[serde(rename = "des-ede3-cbc")]
    DesEde3Cbc,
}

impl Algorithm {
    pub const ALL: [Algorithm; 12] = [
        Algorithm::Aes128Cbc,
        Algorithm::Aes192Cbc,
        Algorithm::Aes256Cbc,
        Algorithm::Aes128Ctr,
        Algorithm::Aes192Ctr,
        Algorithm::Aes256Ctr,
        Algorithm::Aes128Gcm,
        Algorithm::Aes192Gcm,
        Algorithm::Aes256Gcm,
        Algorithm::ChaCha20Poly1305,
        Algorithm::DesEdeCbc,
        Algorithm::DesEde3Cbc,
    ];

    /// Select an AES algorithm from a mode and a key size in bits.
    ///
    /// Returns `None` for key sizes other than 128, 192 or 256.
    pub const fn aes(mode: Mode, key_bits: usize) -> Option<Self> {
        use Algorithm::*;
        match (mode, key_bits) {
            (Mode::Cbc, 128) => Some(Aes128Cbc),
            (Mode::Cbc, 192) => Some(Aes192Cbc),
            (Mode::Cbc, 256) => Some(Aes256Cbc),
            (Mode::Ctr, 128) => Some(Aes128Ctr),
            (Mode::Ctr, 192) => Some(Aes192Ctr),
            (Mode::Ctr, 256) => Some(Aes256Ctr),
            (Mode::Gcm, 128) => Some(Aes128Gcm),
            (Mode::Gcm, 192) => Some(Aes192Gcm),
            (Mode::Gcm, 256) => Some(Aes256Gcm),
            _ => None,
        }
    }

    /// Select a 3DES-CBC algorithm from a key size in bits (128 or 192).
    pub const fn triple_des(key_bits: usize) -> Option<Self> {
        match key_bits {
            128 => Some(Algorithm::DesEdeCbc),
            192 => Some(Algorithm::DesEde3Cbc),
            _ => None,
        }
    }

    /// The AES mode, or `None` outside the AES family.
    pub const fn mode(self) -> Option<Mode> {
        use Algorithm::*;
        match self {
            Aes128Cbc | Aes192Cbc | Aes256Cbc => Some(Mode::Cbc),
            Aes128Ctr | Aes192Ctr | Aes256Ctr => Some(Mode::Ctr),
            Aes128Gcm | Aes192Gcm | Aes256Gcm => Some(Mode::Gcm),
            ChaCha20Poly1305 | DesEdeCbc | DesEde3Cbc => None,
        }
    }

    pub const fn name(self) -> &'static str {
        use Algorithm::*;
        match self {
            Aes128Cbc => "aes-128-cbc",
            Aes192Cbc => "aes-192-cbc",
            Aes256Cbc => "aes-256-cbc",
            Aes128Ctr => "aes-128-ctr",
            Aes192Ctr => "aes-192-ctr",
            Aes256Ctr => "aes-256-ctr",
            Aes128Gcm => "aes-128-gcm",
            Aes192Gcm => "aes-192-gcm",
            Aes256Gcm => "aes-256-gcm",
            ChaCha20Poly1305 => "chacha20-poly1305",
            DesEdeCbc => "des-ede-cbc",
            DesEde3Cbc => "des-ede3-cbc",
        }
    }

    /// Required key length in bytes.
    pub const fn key_len(self) -> usize {
        use Algorithm::*;
        match self {
            Aes128Cbc | Aes128Ctr | Aes128Gcm | DesEdeCbc => 16,
            Aes192Cbc | Aes192Ctr | Aes192Gcm | DesEde3Cbc => 24,
            Aes256Cbc | Aes256Ctr | Aes256Gcm | ChaCha20Poly1305 => 32,
        }
    }

    /// Required IV / nonce length in bytes.
    pub const fn iv_len(self) -> usize {
        use Algorithm::*;
        match self {
            Aes128Cbc | Aes192Cbc | Aes256Cbc | Aes128Ctr | Aes192Ctr | Aes256Ctr => 16,
            Aes128Gcm | Aes192Gcm | Aes256Gcm | ChaCha20Poly1305 => 12,
            DesEdeCbc | DesEde3Cbc => 8,
        }
    }

    /// Block size in bytes; 1 for ChaCha20-Poly1305, which has no blocks
    /// a caller could meaningfully align to.
    pub const fn block_size(self) -> usize {
        use Algorithm::*;
        match self {
            ChaCha20Poly1305 => 1,
            DesEdeCbc | DesEde3Cbc => 8,
            _ => 16,
        }
    }

    pub const fn is_aead(self) -> bool {
        matches!(
            self,
            Algorithm::Aes128Gcm
                | Algorithm::Aes192Gcm
                | Algorithm::Aes256Gcm
                | Algorithm::ChaCha20Poly1305
        )
    }

    /// Tag length for AEAD algorithms, `None` otherwise.
    pub const fn tag_len(self) -> Option<usize> {
        if self.is_aead() {
            Some(TAG_LEN)
        } else {
            None
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Algorithm {
    type Err = TlsymError;

    /// Parse a canonical name. Matching is case-insensitive; names are
    /// always reported back in lowercase.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Algorithm::ALL
            .into_iter()
            .find(|alg| alg.name() == wanted)
            .ok_or_else(|| TlsymError::UnknownAlgorithm(s.to_string()))
    }
}
