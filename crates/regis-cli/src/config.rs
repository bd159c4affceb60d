use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::Deserialize;
use tracing::debug;

use regis_format::{CodecRegistry, FormatOptions};
use regis_registry::Registry;

/// Environment variable naming the config file.
pub const CONFIG_ENV: &str = "REGIS_CONFIG";
/// Config file picked up from the working directory when present.
pub const DEFAULT_CONFIG: &str = "regis.toml";

/// Settings read from the TOML config file. Command-line flags win.
#[derive(Debug, Default, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    pub keychain: Option<PathBuf>,
    pub key_file: Option<PathBuf>,
    /// Default output format for `convert`.
    pub format: Option<String>,
    pub pretty: bool,
}

impl CliConfig {
    /// Load from `explicit`, else `$REGIS_CONFIG`, else `./regis.toml`.
    /// No config file at all yields the defaults.
    pub fn load(explicit: Option<&Path>) -> anyhow::Result<Self> {
        let path = match explicit {
            Some(path) => Some(path.to_path_buf()),
            None => std::env::var_os(CONFIG_ENV).map(PathBuf::from).or_else(|| {
                let path = PathBuf::from(DEFAULT_CONFIG);
                path.is_file().then_some(path)
            }),
        };
        match path {
            Some(path) => Self::from_file(&path),
            None => Ok(Self::default()),
        }
    }

    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let codecs = CodecRegistry::with_defaults();
        let mut registry = Registry::new();
        registry
            .load_file(&codecs, path, "toml", &FormatOptions::default())
            .with_context(|| format!("failed to read config {}", path.display()))?;
        debug!(path = %path.display(), "loaded config");
        registry
            .to_object()
            .with_context(|| format!("invalid config {}", path.display()))
    }
}
