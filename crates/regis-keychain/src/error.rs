use std::path::PathBuf;

use regis_crypto::CipherError;
use regis_format::FormatError;

/// Errors from keychain load and save.
#[derive(Debug, thiserror::Error)]
pub enum KeychainError {
    #[error("keychain file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("keychain file not writable: {0}")]
    FileNotWritable(PathBuf),

    /// Decryption failures are passed through unchanged.
    #[error(transparent)]
    Cipher(#[from] CipherError),

    #[error(transparent)]
    Format(#[from] FormatError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type KeychainResult<T> = Result<T, KeychainError>;
