use std::fmt;
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use tracing::debug;

use regis_format::{CodecRegistry, Format, FormatOptions, JsonFormat};
use regis_types::{Map, Value};

use crate::error::{RegistryError, RegistryResult};
use crate::ops;
use crate::path::{self, DEFAULT_SEPARATOR};

/// Hierarchical key-value store addressed by separator-delimited paths.
///
/// Path operations never fail. A missing or blank value reads as `None`
/// (or the supplied default), and writes create whatever intermediate maps
/// they need. The path methods stand in for array-style access:
/// `registry["a.b"]` reads as [`get`](Self::get), assignment as
/// [`set`](Self::set), `isset` as [`exists`](Self::exists) and `unset` as
/// [`remove`](Self::remove).
///
/// # Examples
///
/// ```
/// use regis_registry::Registry;
///
/// let mut registry = Registry::new();
/// registry.set("db.host", "localhost");
/// registry.set("db.port", 5432);
///
/// assert!(registry.exists("db"));
/// assert_eq!(registry.get("db.port").and_then(|v| v.as_i64()), Some(5432));
/// assert_eq!(registry.get_or("db.user", "root").as_str(), Some("root"));
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct Registry {
    data: Map,
    separator: String,
}

impl Registry {
    /// An empty registry using `.` as the separator.
    pub fn new() -> Self {
        Self::with_separator(DEFAULT_SEPARATOR)
    }

    /// An empty registry using a custom path separator.
    pub fn with_separator(separator: impl Into<String>) -> Self {
        Self {
            data: Map::new(),
            separator: separator.into(),
        }
    }

    /// Parse JSON (or INI, via the JSON decoder's fallback) into a registry.
    pub fn from_json(text: &str) -> RegistryResult<Self> {
        let data = JsonFormat.decode(text, &FormatOptions::default())?;
        Ok(Self::from(data))
    }

    /// The path separator.
    pub fn separator(&self) -> &str {
        &self.separator
    }

    /// Change the path separator for subsequent operations.
    pub fn set_separator(&mut self, separator: impl Into<String>) {
        self.separator = separator.into();
    }

    /// Returns `true` if no top-level key is stored.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Borrow the root map.
    pub fn as_map(&self) -> &Map {
        &self.data
    }

    /// Iterate over top-level entries in insertion order.
    pub fn iter(&self) -> indexmap::map::Iter<'_, String, Value> {
        self.data.iter()
    }

    // -----------------------------------------------------------------------
    // Path access
    // -----------------------------------------------------------------------

    /// Returns `true` if a non-null value is stored at `path`.
    pub fn exists(&self, path: &str) -> bool {
        self.lookup(path).is_some_and(|v| !v.is_null())
    }

    /// Value at `path`, or `None` if it is missing, `Null` or `""`.
    ///
    /// `0` and `false` are returned as stored.
    pub fn get(&self, path: &str) -> Option<&Value> {
        self.lookup(path).filter(|v| !v.is_blank())
    }

    /// Value at `path`, or `default` if it is missing, `Null` or `""`.
    pub fn get_or(&self, path: &str, default: impl Into<Value>) -> Value {
        match self.get(path) {
            Some(value) => value.clone(),
            None => default.into(),
        }
    }

    /// Value at `path` converted to `T`; `None` if missing, blank or not
    /// convertible.
    pub fn get_as<T: DeserializeOwned>(&self, path: &str) -> Option<T> {
        serde_json::from_value(self.get(path)?.to_json()).ok()
    }

    /// Store `value` at `path`, returning the previous value.
    ///
    /// Intermediate keys that are missing or hold non-map values become
    /// maps, so `set("a.b", ..)` over a scalar `a` replaces it. An empty path
    /// stores nothing.
    pub fn set(&mut self, path: &str, value: impl Into<Value>) -> Option<Value> {
        path::set(&mut self.data, path, &self.separator, value.into())
    }

    /// Push `value` onto the list at `path`; any non-list value there
    /// (or none) is replaced by `value`.
    pub fn append(&mut self, path: &str, value: impl Into<Value>) {
        path::append(&mut self.data, path, &self.separator, value.into());
    }

    /// Remove the value at `path`, returning it. Creates nothing.
    pub fn remove(&mut self, path: &str) -> Option<Value> {
        path::remove(&mut self.data, path, &self.separator)
    }

    /// Return the value at `path`, first storing `default` there if the
    /// current value is missing or blank.
    pub fn def(&mut self, path: &str, default: impl Into<Value>) -> Value {
        if let Some(value) = self.get(path) {
            return value.clone();
        }
        let value = default.into();
        self.set(path, value.clone());
        value
    }

    fn lookup(&self, path: &str) -> Option<&Value> {
        path::get(&self.data, path, &self.separator)
    }

    // -----------------------------------------------------------------------
    // Whole-tree operations
    // -----------------------------------------------------------------------

    /// Merge `source` into this registry.
    ///
    /// Each top-level key of `source` overwrites the same key here. With
    /// `recursive`, maps present on both sides are merged key by key instead
    /// of replaced. Where one side holds a map and the other does not, the
    /// source value wins. Blank source values (`Null`, `""`) are skipped.
    pub fn merge(&mut self, source: &Registry, recursive: bool) -> &mut Self {
        ops::bind(&mut self.data, source.data.clone(), recursive, false);
        self
    }

    /// A new registry holding a copy of the map at `path`.
    ///
    /// Returns an empty registry when `path` is missing or not a map.
    /// Opaque objects inside the subtree are shared with this registry.
    pub fn extract(&self, path: &str) -> Registry {
        let data = match self.lookup(path) {
            Some(Value::Map(map)) => map.clone(),
            _ => Map::new(),
        };
        Self {
            data,
            separator: self.separator.clone(),
        }
    }

    /// Copy of the root map. Opaque handles are shared, not cloned.
    pub fn to_array(&self) -> Map {
        self.data.clone()
    }

    /// Convert the whole tree into a typed value.
    pub fn to_object<T: DeserializeOwned>(&self) -> RegistryResult<T> {
        let json = serde_json::Value::Object(
            self.data
                .iter()
                .map(|(k, v)| (k.clone(), v.to_json()))
                .collect(),
        );
        serde_json::from_value(json).map_err(|e| RegistryError::Conversion(e.to_string()))
    }

    /// Single-level map from full key paths to leaf values.
    ///
    /// Keys are joined with `separator` (default: this registry's). Maps
    /// and lists are descended; opaque objects are leaves.
    pub fn flatten(&self, separator: Option<&str>) -> Map {
        ops::flatten(&self.data, separator.unwrap_or(&self.separator))
    }

    /// Number of leaf values in the tree.
    pub fn count(&self) -> usize {
        ops::count_leaves(&self.data)
    }

    // -----------------------------------------------------------------------
    // Loading
    // -----------------------------------------------------------------------

    /// Load a map.
    ///
    /// Without `flattened`, nested maps are merged recursively into the
    /// existing tree. With `flattened`, every key is treated as a path and
    /// stored through [`set`](Self::set).
    pub fn load_array(&mut self, data: Map, flattened: bool) -> &mut Self {
        if flattened {
            for (key, value) in data {
                self.set(&key, value);
            }
        } else {
            ops::bind(&mut self.data, data, true, true);
        }
        self
    }

    /// Load a map or list (keyed by index). Scalars and objects are ignored.
    pub fn load_value(&mut self, value: Value) -> &mut Self {
        if let Some(data) = value.into_keyed() {
            ops::bind(&mut self.data, data, true, true);
        }
        self
    }

    /// Load the serialized form of any struct or map.
    pub fn load_object<T: Serialize + ?Sized>(
        &mut self,
        object: &T,
    ) -> RegistryResult<&mut Self> {
        let json =
            serde_json::to_value(object).map_err(|e| RegistryError::Conversion(e.to_string()))?;
        let data = Value::from(json).into_keyed().ok_or_else(|| {
            RegistryError::Conversion("expected a struct, map or sequence".into())
        })?;
        ops::bind(&mut self.data, data, true, true);
        Ok(self)
    }

    /// Decode `text` with the named format and load the result.
    pub fn load_string(
        &mut self,
        codecs: &CodecRegistry,
        text: &str,
        format: &str,
        options: &FormatOptions,
    ) -> RegistryResult<&mut Self> {
        let data = codecs.decode(format, text, options)?;
        debug!(format, keys = data.len(), "loaded registry data");
        ops::bind(&mut self.data, data, true, true);
        Ok(self)
    }

    /// Read `path` and load it with the named format.
    pub fn load_file(
        &mut self,
        codecs: &CodecRegistry,
        path: impl AsRef<Path>,
        format: &str,
        options: &FormatOptions,
    ) -> RegistryResult<&mut Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| RegistryError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), format, "loading registry file");
        self.load_string(codecs, &text, format, options)
    }

    /// Read `path` and load it with the format matching its extension.
    pub fn load_path(
        &mut self,
        codecs: &CodecRegistry,
        path: impl AsRef<Path>,
        options: &FormatOptions,
    ) -> RegistryResult<&mut Self> {
        let path = path.as_ref();
        let format = codecs.for_path(path)?;
        self.load_file(codecs, path, format.name(), options)
    }

    // -----------------------------------------------------------------------
    // Serialization
    // -----------------------------------------------------------------------

    /// Encode the tree with the named format.
    pub fn to_string_as(
        &self,
        codecs: &CodecRegistry,
        format: &str,
        options: &FormatOptions,
    ) -> RegistryResult<String> {
        Ok(codecs.encode(format, &self.data, options)?)
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Map> for Registry {
    fn from(data: Map) -> Self {
        Self {
            data,
            separator: DEFAULT_SEPARATOR.to_string(),
        }
    }
}

impl From<Value> for Registry {
    fn from(value: Value) -> Self {
        let mut registry = Self::new();
        registry.load_value(value);
        registry
    }
}

impl<'a> IntoIterator for &'a Registry {
    type Item = (&'a String, &'a Value);
    type IntoIter = indexmap::map::Iter<'a, String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Compact JSON.
impl fmt::Display for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = JsonFormat
            .encode(&self.data, &FormatOptions::default())
            .map_err(|_| fmt::Error)?;
        f.write_str(&text)
    }
}

impl Serialize for Registry {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.data.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Registry {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Map::deserialize(deserializer).map(Self::from)
    }
}
