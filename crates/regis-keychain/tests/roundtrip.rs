use regis_crypto::{Cipher, CipherError, PassthroughCipher};
use regis_keychain::{Keychain, KeychainState};
use regis_types::Value;

/// Reverses the text, so the file is not plain JSON but decoding is trivial.
struct Mirror;

impl Cipher for Mirror {
    fn encrypt(&self, plaintext: &str) -> Option<String> {
        Some(plaintext.chars().rev().collect())
    }

    fn decrypt(&self, ciphertext: &str) -> Result<String, CipherError> {
        Ok(ciphertext.chars().rev().collect())
    }
}

#[test]
fn identity_cipher_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("app.keychain");

    let mut keychain = Keychain::new(PassthroughCipher);
    keychain.set("k", "v");
    assert!(keychain.save_keychain(&path).unwrap());

    let mut fresh = Keychain::new(PassthroughCipher);
    fresh.load_keychain(&path).unwrap();
    assert_eq!(fresh.get("k"), Some(&Value::from("v")));
    assert_eq!(fresh.state(), KeychainState::Loaded);
}

#[test]
fn repeated_saves_after_load() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("app.keychain");

    let mut keychain = Keychain::new(Mirror);
    keychain.set("db.user", "admin");
    keychain.set("db.password", "s3cret");
    assert!(keychain.save_keychain(&path).unwrap());
    assert!(std::fs::read_to_string(&path).unwrap().starts_with('}'));

    let mut editor = Keychain::new(Mirror);
    editor.load_keychain(&path).unwrap();
    editor.set("db.password", "rotated");
    editor.delete_value("db.user");
    assert!(editor.save_keychain(&path).unwrap());
    assert!(editor.save_keychain(&path).unwrap());
    assert_eq!(editor.state(), KeychainState::Saved);

    let mut reader = Keychain::new(Mirror);
    reader.load_keychain(&path).unwrap();
    assert_eq!(reader.get("db.password"), Some(&Value::from("rotated")));
    assert!(!reader.exists("db.user"));
    assert_eq!(reader.count(), 1);
}
