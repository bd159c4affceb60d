use chacha20poly1305::aead::{Aead, KeyInit};
use chacha20poly1305::{Key, XChaCha20Poly1305, XNonce};
use rand::RngCore;
use tracing::warn;

use crate::cipher::Cipher;
use crate::error::CipherError;
use crate::key::SecretKey;

/// XChaCha20-Poly1305 nonce length.
pub const NONCE_LEN: usize = 24;
/// Poly1305 tag length.
pub const TAG_LEN: usize = 16;

/// Authenticated symmetric cipher for keychain files.
///
/// Each call to `encrypt` draws a fresh random nonce, so sealing the same
/// text twice yields different output. The output is hex of
/// `nonce || ciphertext || tag`.
pub struct SecretBoxCipher {
    aead: XChaCha20Poly1305,
}

impl SecretBoxCipher {
    pub fn new(key: &SecretKey) -> Self {
        Self {
            aead: XChaCha20Poly1305::new(Key::from_slice(key.as_bytes())),
        }
    }
}

impl Cipher for SecretBoxCipher {
    fn encrypt(&self, plaintext: &str) -> Option<String> {
        let mut nonce = [0u8; NONCE_LEN];
        rand::thread_rng().fill_bytes(&mut nonce);
        match self
            .aead
            .encrypt(XNonce::from_slice(&nonce), plaintext.as_bytes())
        {
            Ok(sealed) => {
                let mut out = Vec::with_capacity(NONCE_LEN + sealed.len());
                out.extend_from_slice(&nonce);
                out.extend_from_slice(&sealed);
                Some(hex::encode(out))
            }
            Err(_) => {
                warn!("secret box encryption failed");
                None
            }
        }
    }

    fn decrypt(&self, ciphertext: &str) -> Result<String, CipherError> {
        let bytes = hex::decode(ciphertext.trim())?;
        let min = NONCE_LEN + TAG_LEN;
        if bytes.len() < min {
            return Err(CipherError::Truncated {
                len: bytes.len(),
                min,
            });
        }
        let (nonce, sealed) = bytes.split_at(NONCE_LEN);
        let plain = self
            .aead
            .decrypt(XNonce::from_slice(nonce), sealed)
            .map_err(|_| CipherError::AuthenticationFailed)?;
        Ok(String::from_utf8(plain)?)
    }
}

impl std::fmt::Debug for SecretBoxCipher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SecretBoxCipher(<redacted>)")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn seal_and_open() {
        let cipher = SecretBoxCipher::new(&SecretKey::generate());
        let sealed = cipher.encrypt(r#"{"db":{"password":"s3cret"}}"#).unwrap();
        assert!(!sealed.contains("s3cret"));
        assert_eq!(
            cipher.decrypt(&sealed).unwrap(),
            r#"{"db":{"password":"s3cret"}}"#
        );
    }

    #[test]
    fn nonces_are_fresh() {
        let cipher = SecretBoxCipher::new(&SecretKey::generate());
        assert_ne!(cipher.encrypt("same"), cipher.encrypt("same"));
    }

    #[test]
    fn wrong_key_fails_authentication() {
        let sealed = SecretBoxCipher::new(&SecretKey::generate())
            .encrypt("payload")
            .unwrap();
        let other = SecretBoxCipher::new(&SecretKey::generate());
        assert!(matches!(
            other.decrypt(&sealed),
            Err(CipherError::AuthenticationFailed)
        ));
    }

    #[test]
    fn tampering_is_detected() {
        let cipher = SecretBoxCipher::new(&SecretKey::generate());
        let mut bytes = hex::decode(cipher.encrypt("payload").unwrap()).unwrap();
        let last = bytes.len() - 1;
        bytes[last] ^= 0x01;
        assert!(matches!(
            cipher.decrypt(&hex::encode(bytes)),
            Err(CipherError::AuthenticationFailed)
        ));
    }

    #[test]
    fn malformed_input() {
        let cipher = SecretBoxCipher::new(&SecretKey::generate());
        assert!(matches!(
            cipher.decrypt("not hex at all"),
            Err(CipherError::InvalidEncoding(_))
        ));
        assert!(matches!(
            cipher.decrypt("00ff"),
            Err(CipherError::Truncated { len: 2, .. })
        ));
    }

    #[test]
    fn debug_redacts() {
        let cipher = SecretBoxCipher::new(&SecretKey::generate());
        assert_eq!(format!("{cipher:?}"), "SecretBoxCipher(<redacted>)");
    }

    proptest! {
        #[test]
        fn any_text_roundtrips(text in ".{0,64}") {
            let cipher = SecretBoxCipher::new(&SecretKey::from_bytes([42u8; 32]));
            let sealed = cipher.encrypt(&text).unwrap();
            prop_assert_eq!(cipher.decrypt(&sealed).unwrap(), text);
        }
    }
}
