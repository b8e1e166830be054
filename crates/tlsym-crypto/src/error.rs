use std::fmt;

use thiserror::Error;

pub type CipherResult<T> = Result<T, CipherError>;

/// Which side of a call failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Encrypt,
    Decrypt,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operation::Encrypt => f.write_str("encryption"),
            Operation::Decrypt => f.write_str("decryption"),
        }
    }
}

/// Coarse error category, for callers that react to the class of failure
/// rather than to the specific variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Bad construction parameters (unsupported key size).
    Configuration,
    /// Bad call arguments, detected before any primitive runs.
    Validation,
    /// The algorithm is not available in this build.
    Capability,
    /// The primitive itself failed, authentication failures included.
    Operation,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CipherError {
    #[error("invalid {family} key size: {bits} bits (supported: {supported})")]
    InvalidKeySize {
        family: &'static str,
        bits: usize,
        supported: &'static str,
    },

    #[error("{algorithm}: key length mismatch: expected {expected} bytes, got {actual}")]
    KeyLength {
        algorithm: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("{algorithm}: IV length mismatch: expected {expected} bytes, got {actual}")]
    IvLength {
        algorithm: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("{algorithm}: tag length mismatch: expected {expected} bytes, got {actual}")]
    TagLength {
        algorithm: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("{0}: decryption requires an authentication tag")]
    MissingTag(&'static str),

    #[error("{0}: not an authenticated cipher, a tag cannot be verified")]
    UnexpectedTag(&'static str),

    #[error("{0} is not supported by the active crypto backend")]
    Unsupported(&'static str),

    #[error("{algorithm} {operation} failed: {reason}")]
    Operation {
        algorithm: &'static str,
        operation: Operation,
        reason: String,
    },
}

impl CipherError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            CipherError::InvalidKeySize { .. } => ErrorKind::Configuration,
            CipherError::KeyLength { .. }
            | CipherError::IvLength { .. }
            | CipherError::TagLength { .. }
            | CipherError::MissingTag(_)
            | CipherError::UnexpectedTag(_) => ErrorKind::Validation,
            CipherError::Unsupported(_) => ErrorKind::Capability,
            CipherError::Operation { .. } => ErrorKind::Operation,
        }
    }

    pub(crate) fn operation(
        algorithm: &'static str,
        operation: Operation,
        reason: impl Into<String>,
    ) -> Self {
        CipherError::Operation {
            algorithm,
            operation,
            reason: reason.into(),
        }
    }
}
