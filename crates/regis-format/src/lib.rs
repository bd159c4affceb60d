//! Text formats for Regis.
//!
//! A format (codec) translates between a registry's root [`Map`] and a
//! textual representation. Formats are selected by name through an explicit
//! [`CodecRegistry`]; there is no process-wide codec cache.
//!
//! # Formats
//!
//! - [`JsonFormat`]: `json`; non-JSON input falls back to INI decoding
//! - [`IniFormat`]: `ini`; optional `[section]` nesting and `key[]` arrays
//! - [`PhpFormat`]: `php`; encode-only PHP class source
//! - [`YamlFormat`]: `yaml` / `yml`
//! - [`TomlFormat`]: `toml`
//!
//! [`Map`]: regis_types::Map

pub mod error;
pub mod format;
pub mod formats;
pub mod options;
pub mod registry;

pub use error::{FormatError, FormatResult};
pub use format::Format;
pub use formats::{IniFormat, JsonFormat, PhpFormat, TomlFormat, YamlFormat};
pub use options::FormatOptions;
pub use registry::CodecRegistry;
