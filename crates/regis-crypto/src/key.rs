use std::path::Path;

use rand::RngCore;

use crate::error::CipherError;

/// Length of a secret key in bytes.
pub const KEY_LEN: usize = 32;

const FINGERPRINT_CONTEXT: &str = "regis-keychain-key-fingerprint-v1";

/// 32-byte symmetric key for [`SecretBoxCipher`](crate::SecretBoxCipher).
///
/// Key files hold the key as a single line of lowercase hex.
#[derive(Clone, PartialEq, Eq)]
pub struct SecretKey([u8; KEY_LEN]);

impl SecretKey {
    /// Generate a new random key.
    pub fn generate() -> Self {
        let mut bytes = [0u8; KEY_LEN];
        rand::thread_rng().fill_bytes(&mut bytes);
        Self(bytes)
    }

    pub fn from_bytes(bytes: [u8; KEY_LEN]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; KEY_LEN] {
        &self.0
    }

    /// Parse a hex-encoded key. Surrounding whitespace is ignored.
    pub fn from_hex(text: &str) -> Result<Self, CipherError> {
        let bytes = hex::decode(text.trim())
            .map_err(|e| CipherError::InvalidKey(format!("not hex: {e}")))?;
        let bytes: [u8; KEY_LEN] = bytes.try_into().map_err(|b: Vec<u8>| {
            CipherError::InvalidKey(format!("expected {KEY_LEN} bytes, got {}", b.len()))
        })?;
        Ok(Self(bytes))
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Read a key file.
    pub fn read_from(path: impl AsRef<Path>) -> Result<Self, CipherError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| CipherError::KeyFile {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_hex(&text)
    }

    /// Write the key to `path` as hex, replacing any existing file.
    pub fn write_to(&self, path: impl AsRef<Path>) -> Result<(), CipherError> {
        let path = path.as_ref();
        std::fs::write(path, format!("{}\n", self.to_hex())).map_err(|source| {
            CipherError::KeyFile {
                path: path.to_path_buf(),
                source,
            }
        })
    }

    /// Short public identifier for the key: the first 8 bytes of a
    /// domain-separated BLAKE3 derivation, as hex.
    pub fn fingerprint(&self) -> String {
        let digest = blake3::derive_key(FINGERPRINT_CONTEXT, &self.0);
        hex::encode(&digest[..8])
    }
}

impl std::fmt::Debug for SecretKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SecretKey(<redacted>)")
    }
}
