//! Encrypted-at-rest registry for Regis secrets.
//!
//! A [`Keychain`] is a [`Registry`](regis_registry::Registry) that persists
//! itself as the cipher output of its compact JSON. The cipher is injected
//! at construction; see `regis-crypto` for the available implementations.
//!
//! ```
//! use regis_crypto::PassthroughCipher;
//! use regis_keychain::Keychain;
//!
//! let dir = tempfile::tempdir().unwrap();
//! let path = dir.path().join("secrets.keychain");
//!
//! let mut keychain = Keychain::new(PassthroughCipher);
//! keychain.set("db.password", "hunter2");
//! assert!(keychain.save_keychain(&path).unwrap());
//!
//! let mut reopened = Keychain::new(PassthroughCipher);
//! reopened.load_keychain(&path).unwrap();
//! assert_eq!(reopened.get("db.password").and_then(|v| v.as_str()), Some("hunter2"));
//! ```

pub mod error;
pub mod keychain;

pub use error::{KeychainError, KeychainResult};
pub use keychain::{Keychain, KeychainState};
