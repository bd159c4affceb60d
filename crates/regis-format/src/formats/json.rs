//! JSON codec.
//!
//! Output escapes `/` as `\/` and non-ASCII characters as `\uXXXX` unless
//! the corresponding [`FormatOptions`] toggle is set. Both escapes can only
//! occur inside JSON strings, so they are applied to the serialized text.

use std::fmt::Write as _;

use serde::Serialize;
use tracing::debug;

use regis_types::{Map, Value};

use crate::error::{FormatError, FormatResult};
use crate::format::Format;
use crate::formats::ini;
use crate::options::FormatOptions;

/// JSON codec (`json`).
#[derive(Clone, Copy, Debug, Default)]
pub struct JsonFormat;

impl Format for JsonFormat {
    fn name(&self) -> &'static str {
        "json"
    }

    fn extensions(&self) -> &'static [&'static str] {
        &["json"]
    }

    fn encode(&self, data: &Map, options: &FormatOptions) -> FormatResult<String> {
        let raw = if options.pretty_print {
            let mut buf = Vec::new();
            let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
            let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
            data.serialize(&mut ser)
                .map_err(|e| FormatError::encode("json", e))?;
            String::from_utf8(buf).map_err(|e| FormatError::encode("json", e))?
        } else {
            serde_json::to_string(data).map_err(|e| FormatError::encode("json", e))?
        };
        Ok(escape(raw, options))
    }

    /// Decode a JSON object or array.
    ///
    /// Input that does not start with `{` or `[` is handed to the INI
    /// decoder. A top-level array becomes a map keyed by index.
    fn decode(&self, text: &str, options: &FormatOptions) -> FormatResult<Map> {
        let trimmed = text.trim();
        if !(trimmed.starts_with('{') || trimmed.starts_with('[')) {
            debug!("input is not a JSON document, decoding as INI");
            return ini::decode(trimmed, options);
        }
        let value: Value =
            serde_json::from_str(trimmed).map_err(|e| FormatError::malformed("json", e))?;
        value
            .into_keyed()
            .ok_or_else(|| FormatError::malformed("json", "expected an object or array"))
    }
}

fn escape(raw: String, options: &FormatOptions) -> String {
    if options.unescaped_slashes && options.unescaped_unicode {
        return raw;
    }
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '/' if !options.unescaped_slashes => out.push_str("\\/"),
            c if !c.is_ascii() && !options.unescaped_unicode => {
                let mut units = [0u16; 2];
                for unit in c.encode_utf16(&mut units) {
                    let _ = write!(out, "\\u{unit:04x}");
                }
            }
            c => out.push(c),
        }
    }
    out
}
