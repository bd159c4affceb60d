use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use tracing::debug;

use regis_types::Map;

use crate::error::{FormatError, FormatResult};
use crate::format::Format;
use crate::formats::{IniFormat, JsonFormat, PhpFormat, TomlFormat, YamlFormat};
use crate::options::FormatOptions;

/// Named lookup of formats.
///
/// Built once by the application (usually via [`CodecRegistry::with_defaults`])
/// and passed by reference to whatever needs to encode or decode. Names are
/// matched case-insensitively.
#[derive(Clone, Default)]
pub struct CodecRegistry {
    formats: HashMap<String, Arc<dyn Format>>,
}

impl CodecRegistry {
    /// An empty registry with no formats.
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry holding every built-in format.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(JsonFormat);
        registry.register(IniFormat);
        registry.register(PhpFormat);
        registry.register(YamlFormat);
        registry.register(TomlFormat);
        registry
    }

    /// Register a format under its name and aliases, replacing any previous
    /// format with the same names.
    pub fn register<F: Format + 'static>(&mut self, format: F) {
        self.register_shared(Arc::new(format));
    }

    /// Register an already shared format.
    pub fn register_shared(&mut self, format: Arc<dyn Format>) {
        debug!(format = format.name(), "registering format");
        for alias in format.aliases() {
            self.formats.insert(alias.to_ascii_lowercase(), Arc::clone(&format));
        }
        self.formats
            .insert(format.name().to_ascii_lowercase(), format);
    }

    /// Look up a format by name or alias.
    pub fn get(&self, name: &str) -> FormatResult<Arc<dyn Format>> {
        self.formats
            .get(&name.to_ascii_lowercase())
            .cloned()
            .ok_or_else(|| FormatError::Unsupported {
                name: name.to_string(),
            })
    }

    /// Returns `true` if a format is registered under `name`.
    pub fn contains(&self, name: &str) -> bool {
        self.formats.contains_key(&name.to_ascii_lowercase())
    }

    /// Sorted list of registered names, aliases included.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.formats.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Pick a format from a file's extension.
    pub fn for_path(&self, path: &Path) -> FormatResult<Arc<dyn Format>> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();
        self.formats
            .values()
            .find(|f| f.extensions().contains(&ext.as_str()))
            .cloned()
            .ok_or_else(|| FormatError::Unsupported {
                name: if ext.is_empty() {
                    path.display().to_string()
                } else {
                    ext
                },
            })
    }

    /// Encode with the named format.
    pub fn encode(&self, name: &str, data: &Map, options: &FormatOptions) -> FormatResult<String> {
        self.get(name)?.encode(data, options)
    }

    /// Decode with the named format.
    pub fn decode(&self, name: &str, text: &str, options: &FormatOptions) -> FormatResult<Map> {
        self.get(name)?.decode(text, options)
    }
}

impl std::fmt::Debug for CodecRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CodecRegistry")
            .field("formats", &self.names())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use regis_types::Value;

    #[test]
    fn defaults_cover_builtin_formats() {
        let codecs = CodecRegistry::with_defaults();
        assert_eq!(codecs.names(), ["ini", "json", "php", "toml", "yaml", "yml"]);
    }

    #[test]
    fn lookup_is_case_insensitive() {
        let codecs = CodecRegistry::with_defaults();
        assert_eq!(codecs.get("JSON").unwrap().name(), "json");
        assert_eq!(codecs.get("Yml").unwrap().name(), "yaml");
    }

    #[test]
    fn unknown_format_is_unsupported() {
        let codecs = CodecRegistry::with_defaults();
        let err = codecs.get("xml").err().unwrap();
        assert_eq!(err, FormatError::Unsupported { name: "xml".into() });
        assert!(!codecs.contains("xml"));
    }

    #[test]
    fn empty_registry_has_nothing() {
        let codecs = CodecRegistry::new();
        assert!(codecs.get("json").is_err());
    }

    #[test]
    fn for_path_uses_extension() {
        let codecs = CodecRegistry::with_defaults();
        assert_eq!(codecs.for_path(Path::new("conf/app.YML")).unwrap().name(), "yaml");
        assert_eq!(codecs.for_path(Path::new("site.cfg")).unwrap().name(), "ini");
        assert!(codecs.for_path(Path::new("README")).is_err());
        assert!(codecs.for_path(Path::new("data.xml")).is_err());
    }

    #[test]
    fn encode_decode_by_name() {
        let codecs = CodecRegistry::with_defaults();
        let mut map = Map::new();
        map.insert("k".into(), Value::from("v"));
        let text = codecs.encode("json", &map, &FormatOptions::default()).unwrap();
        assert_eq!(text, r#"{"k":"v"}"#);
        assert_eq!(
            codecs.decode("json", &text, &FormatOptions::default()).unwrap(),
            map
        );
    }

    #[derive(Debug)]
    struct Shouting;

    impl Format for Shouting {
        fn name(&self) -> &'static str {
            "json"
        }

        fn extensions(&self) -> &'static [&'static str] {
            &[]
        }

        fn encode(&self, _data: &Map, _options: &FormatOptions) -> FormatResult<String> {
            Ok("LOUD".into())
        }

        fn decode(&self, _text: &str, _options: &FormatOptions) -> FormatResult<Map> {
            Ok(Map::new())
        }
    }

    #[test]
    fn register_replaces_existing_name() {
        let mut codecs = CodecRegistry::with_defaults();
        codecs.register(Shouting);
        let text = codecs.encode("json", &Map::new(), &FormatOptions::default()).unwrap();
        assert_eq!(text, "LOUD");
    }
}
