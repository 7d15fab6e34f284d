// hdkey-core/src/error.rs

use thiserror::Error;

pub type KeyResult<T> = std::result::Result<T, KeyError>;

/// Coarse failure class, independent of which component raised the error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Malformed input or a destination buffer of the wrong size.
    /// Detected before any cryptographic work is done.
    InputValidation,
    /// The curve family cannot perform the requested derivation
    /// (non-hardened index on an Edwards curve).
    UnsupportedOperation,
    /// A scalar fell outside `[1, N-1]`.
    InvalidKeyMaterial,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum KeyError {
    #[error("Mnemonic Error: {0}")]
    Mnemonic(#[from] MnemonicError),

    #[error("Path Error: {0}")]
    Path(#[from] PathError),

    #[error("Cryptography Error: {0}")]
    Crypto(#[from] CryptoError),

    #[error("Validation Error: {0}")]
    Validation(String),
}

impl KeyError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            KeyError::Mnemonic(_) | KeyError::Path(_) | KeyError::Validation(_) => {
                ErrorKind::InputValidation
            }
            KeyError::Crypto(e) => e.kind(),
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum MnemonicError {
    #[error("Mnemonic must not be empty.")]
    Empty,

    #[error("Invalid seed destination: expected {expected} bytes, got {actual}.")]
    DestinationLength { expected: usize, actual: usize },
}

/// Path parsing failures. `segment` is the 0-based position after the leading `m`.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PathError {
    #[error("Derivation path is empty")]
    Empty,

    #[error("Derivation path must start with 'm'")]
    MissingRoot,

    #[error("Empty segment at index {segment}")]
    EmptySegment { segment: usize },

    #[error("Failed to parse segment at index {segment}: '{text}'")]
    InvalidSegment { segment: usize, text: String },

    #[error("Segment at index {segment} is out of range (must be below 2^31): '{text}'")]
    IndexOutOfRange { segment: usize, text: String },

    #[error("Destination must hold exactly {expected} indices, got {actual}")]
    DestinationLength { expected: usize, actual: usize },
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CryptoError {
    #[error("Key derivation failed: {0}")]
    DerivationFailed(String),

    #[error("{curve} requires hardened derivation, got index {index}")]
    NonHardenedIndex { curve: &'static str, index: u32 },

    #[error("Operation not supported on {curve}: {operation}")]
    Unsupported {
        curve: &'static str,
        operation: &'static str,
    },

    #[error("Invalid private key: {0}")]
    InvalidPrivateKey(String),

    #[error("No valid scalar after {attempts} attempts")]
    RetryLimitExceeded { attempts: u32 },

    #[error("Invalid key format: {0}")]
    InvalidKeyFormat(String),

    #[error("Invalid buffer length: expected {expected} bytes, got {actual}")]
    BufferLength { expected: usize, actual: usize },

    #[error("Signing failed: {0}")]
    SigningFailed(String),
}

impl CryptoError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            CryptoError::NonHardenedIndex { .. } | CryptoError::Unsupported { .. } => {
                ErrorKind::UnsupportedOperation
            }
            CryptoError::InvalidPrivateKey(_) | CryptoError::RetryLimitExceeded { .. } => {
                ErrorKind::InvalidKeyMaterial
            }
            CryptoError::BufferLength { .. } | CryptoError::InvalidKeyFormat(_) => {
                ErrorKind::InputValidation
            }
            CryptoError::DerivationFailed(_) | CryptoError::SigningFailed(_) => {
                ErrorKind::InvalidKeyMaterial
            }
        }
    }
}
