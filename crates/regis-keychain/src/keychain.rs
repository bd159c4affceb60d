use std::ops::{Deref, DerefMut};
use std::path::Path;

use tracing::{debug, warn};

use regis_crypto::Cipher;
use regis_format::{Format, FormatOptions, JsonFormat};
use regis_registry::Registry;
use regis_types::Value;

use crate::error::{KeychainError, KeychainResult};

/// Where a keychain is in its load/save cycle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum KeychainState {
    /// Nothing has been read from disk.
    #[default]
    Unloaded,
    /// Contents were read and decrypted.
    Loaded,
    /// Contents were encrypted and written.
    Saved,
}

/// A [`Registry`] persisted through an injected [`Cipher`].
///
/// Dereferences to the inner registry, so `get`, `set`, `exists`,
/// `to_array` and the rest are called directly on the keychain.
pub struct Keychain {
    registry: Registry,
    cipher: Box<dyn Cipher>,
    state: KeychainState,
}

impl Keychain {
    /// An empty, unloaded keychain.
    pub fn new(cipher: impl Cipher + 'static) -> Self {
        Self::with_registry(Registry::new(), cipher)
    }

    /// A keychain seeded with existing entries.
    pub fn with_registry(registry: Registry, cipher: impl Cipher + 'static) -> Self {
        Self {
            registry,
            cipher: Box::new(cipher),
            state: KeychainState::Unloaded,
        }
    }

    pub fn state(&self) -> KeychainState {
        self.state
    }

    pub fn into_registry(self) -> Registry {
        self.registry
    }

    /// Read, decrypt and load the keychain file at `path`.
    ///
    /// Entries are merged into whatever the keychain already holds.
    pub fn load_keychain(&mut self, path: impl AsRef<Path>) -> KeychainResult<&mut Self> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(KeychainError::FileNotFound(path.to_path_buf()));
        }
        let sealed = std::fs::read_to_string(path)?;
        let plain = self.cipher.decrypt(&sealed)?;
        let data = JsonFormat.decode(&plain, &FormatOptions::default())?;
        debug!(path = %path.display(), entries = data.len(), "loaded keychain");
        self.registry.load_array(data, false);
        self.state = KeychainState::Loaded;
        Ok(self)
    }

    /// Encrypt and write the keychain to `path`.
    ///
    /// Returns `Ok(false)` when the cipher produces no output or the write
    /// itself fails; the file is left as it was in the first case.
    pub fn save_keychain(&mut self, path: impl AsRef<Path>) -> KeychainResult<bool> {
        let path = path.as_ref();
        ensure_writable(path)?;

        let plain = JsonFormat.encode(self.registry.as_map(), &FormatOptions::default())?;
        let Some(sealed) = self.cipher.encrypt(&plain) else {
            warn!(path = %path.display(), "cipher produced no output; keychain not saved");
            return Ok(false);
        };
        if let Err(e) = std::fs::write(path, sealed) {
            warn!(path = %path.display(), error = %e, "failed to write keychain");
            return Ok(false);
        }
        debug!(path = %path.display(), entries = self.registry.as_map().len(), "saved keychain");
        self.state = KeychainState::Saved;
        Ok(true)
    }

    /// Remove an entry, returning its previous value.
    pub fn delete_value(&mut self, key: &str) -> Option<Value> {
        self.registry.remove(key)
    }
}

fn ensure_writable(path: &Path) -> KeychainResult<()> {
    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    if !parent.is_dir() {
        return Err(KeychainError::FileNotWritable(path.to_path_buf()));
    }
    match std::fs::metadata(path) {
        Ok(meta) if meta.is_dir() || meta.permissions().readonly() => {
            Err(KeychainError::FileNotWritable(path.to_path_buf()))
        }
        _ => Ok(()),
    }
}

impl Deref for Keychain {
    type Target = Registry;

    fn deref(&self) -> &Registry {
        &self.registry
    }
}

impl DerefMut for Keychain {
    fn deref_mut(&mut self) -> &mut Registry {
        &mut self.registry
    }
}

impl std::fmt::Debug for Keychain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Keychain")
            .field("entries", &self.registry.count())
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}
