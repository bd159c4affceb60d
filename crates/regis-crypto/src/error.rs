use std::path::PathBuf;

/// Errors from decrypting keychain text or handling key material.
#[derive(Debug, thiserror::Error)]
pub enum CipherError {
    #[error("ciphertext is not valid hex: {0}")]
    InvalidEncoding(#[from] hex::FromHexError),

    #[error("ciphertext too short: {len} bytes, need at least {min}")]
    Truncated { len: usize, min: usize },

    #[error("authentication failed: wrong key or tampered data")]
    AuthenticationFailed,

    #[error("invalid key: {0}")]
    InvalidKey(String),

    #[error("decrypted text is not valid UTF-8")]
    Utf8(#[from] std::string::FromUtf8Error),

    #[error("cannot access key file {path}: {source}")]
    KeyFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
