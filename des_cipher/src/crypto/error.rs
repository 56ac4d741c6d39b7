//! Error types for key handling and stream processing.
//!
//! Wrong block or schedule lengths handed to the cipher core are programming
//! errors and panic instead of showing up here.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CipherError {
    #[error("Invalid key length: expected {expected} bytes, got {actual}")]
    InvalidKeyLength { expected: usize, actual: usize },

    #[error("Invalid key count {0}. Allowed one or three keys")]
    InvalidKeyCount(usize),

    #[error("Key {0} is not a valid hexadecimal value")]
    InvalidHexKey(String),

    #[error("Cipher key is required for operation decrypt")]
    MissingKey,

    #[error("Ciphertext of {0} bytes is not a whole number of blocks plus a pad byte")]
    TruncatedCiphertext(usize),

    #[error("Invalid pad length {0} (must be 1..=8)")]
    InvalidPadding(u8),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Background task failed: {0}")]
    Task(String),
}

pub type Result<T> = std::result::Result<T, CipherError>;
