//! Ciphers for Regis keychains.
//!
//! A keychain never encrypts anything itself; it is handed a [`Cipher`] and
//! calls it on the serialized registry text. This crate provides the
//! capability and two implementations:
//!
//! - [`PassthroughCipher`] returns its input unchanged (tests, plain files)
//! - [`SecretBoxCipher`] seals text with XChaCha20-Poly1305 under a
//!   [`SecretKey`], emitting hex of `nonce || ciphertext`
//!
//! All crypto operations wrap established libraries; nothing here implements
//! a primitive.

pub mod cipher;
pub mod error;
pub mod key;
pub mod secretbox;

pub use cipher::{Cipher, PassthroughCipher};
pub use error::CipherError;
pub use key::SecretKey;
pub use secretbox::SecretBoxCipher;
