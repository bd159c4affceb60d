use std::fmt;

/// Errors from encoding, decoding or codec lookup.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormatError {
    /// No codec is registered under the requested name.
    #[error("unsupported format: {name}")]
    Unsupported { name: String },

    /// The input is not valid for the format that tried to decode it.
    #[error("malformed {format} input: {message}")]
    Malformed {
        format: &'static str,
        message: String,
    },

    /// The data cannot be represented in the target format.
    #[error("cannot encode as {format}: {message}")]
    Encode {
        format: &'static str,
        message: String,
    },
}

impl FormatError {
    pub(crate) fn malformed(format: &'static str, message: impl fmt::Display) -> Self {
        Self::Malformed {
            format,
            message: message.to_string(),
        }
    }

    pub(crate) fn encode(format: &'static str, message: impl fmt::Display) -> Self {
        Self::Encode {
            format,
            message: message.to_string(),
        }
    }
}

/// Result alias for format operations.
pub type FormatResult<T> = Result<T, FormatError>;
