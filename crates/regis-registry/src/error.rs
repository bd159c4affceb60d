use std::path::PathBuf;

use regis_format::FormatError;

/// Errors from registry load, conversion and serialization operations.
///
/// Path lookups and mutations never fail; only I/O, codecs and typed
/// conversion do.
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    /// Codec lookup, decoding or encoding failed.
    #[error(transparent)]
    Format(#[from] FormatError),

    /// Reading a source file failed.
    #[error("cannot read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Converting between registry data and a typed value failed.
    #[error("conversion error: {0}")]
    Conversion(String),
}

/// Result alias for registry operations.
pub type RegistryResult<T> = Result<T, RegistryError>;
