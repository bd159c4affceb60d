//! YAML codec backed by `serde_yaml`.

use regis_types::{Map, Value};

use crate::error::{FormatError, FormatResult};
use crate::format::Format;
use crate::options::FormatOptions;

/// YAML codec (`yaml`, alias `yml`).
#[derive(Clone, Copy, Debug, Default)]
pub struct YamlFormat;

impl Format for YamlFormat {
    fn name(&self) -> &'static str {
        "yaml"
    }

    fn aliases(&self) -> &'static [&'static str] {
        &["yml"]
    }

    fn extensions(&self) -> &'static [&'static str] {
        &["yaml", "yml"]
    }

    fn encode(&self, data: &Map, _options: &FormatOptions) -> FormatResult<String> {
        serde_yaml::to_string(data).map_err(|e| FormatError::encode("yaml", e))
    }

    /// An empty or `null` document decodes to an empty map; a top-level
    /// sequence is keyed by index.
    fn decode(&self, text: &str, _options: &FormatOptions) -> FormatResult<Map> {
        if text.trim().is_empty() {
            return Ok(Map::new());
        }
        let value: Value =
            serde_yaml::from_str(text).map_err(|e| FormatError::malformed("yaml", e))?;
        match value {
            Value::Null => Ok(Map::new()),
            other => {
                let found = other.type_name();
                other.into_keyed().ok_or_else(|| {
                    FormatError::malformed("yaml", format!("expected a mapping, found {found}"))
                })
            }
        }
    }
}
