use crate::error::CipherError;

/// Encrypt/decrypt capability injected into a keychain.
///
/// `encrypt` reports failure as `None` so that callers can degrade to a
/// "not saved" result; `decrypt` failures carry a reason.
pub trait Cipher: Send + Sync {
    fn encrypt(&self, plaintext: &str) -> Option<String>;

    fn decrypt(&self, ciphertext: &str) -> Result<String, CipherError>;
}

impl<C: Cipher + ?Sized> Cipher for Box<C> {
    fn encrypt(&self, plaintext: &str) -> Option<String> {
        (**self).encrypt(plaintext)
    }

    fn decrypt(&self, ciphertext: &str) -> Result<String, CipherError> {
        (**self).decrypt(ciphertext)
    }
}

/// Identity cipher: stores text as-is.
#[derive(Clone, Copy, Debug, Default)]
pub struct PassthroughCipher;

impl Cipher for PassthroughCipher {
    fn encrypt(&self, plaintext: &str) -> Option<String> {
        Some(plaintext.to_string())
    }

    fn decrypt(&self, ciphertext: &str) -> Result<String, CipherError> {
        Ok(ciphertext.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn passthrough_is_identity() {
        let c = PassthroughCipher;
        let sealed = c.encrypt(r#"{"a":"b"}"#).unwrap();
        assert_eq!(sealed, r#"{"a":"b"}"#);
        assert_eq!(c.decrypt(&sealed).unwrap(), r#"{"a":"b"}"#);
    }

    #[test]
    fn boxed_cipher_delegates() {
        let c: Box<dyn Cipher> = Box::new(PassthroughCipher);
        assert_eq!(c.encrypt("x").as_deref(), Some("x"));
        assert_eq!(c.decrypt("x").unwrap(), "x");
    }
}
