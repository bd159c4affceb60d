use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use tracing::debug;

use regis_format::{CodecRegistry, Format, FormatOptions, JsonFormat};
use regis_types::{Map, Value};

use crate::error::RegistryResult;
use crate::ops;
use crate::path::{self, DEFAULT_SEPARATOR};
use crate::Registry;

/// Registry whose keys are stored verbatim.
///
/// `"db.host"` is one top-level key here, not a path. Dotted keys only become
/// nesting when loaded with `flattened = true`, after which the nested
/// structure is reachable through [`flatten`](Self::flatten) or by
/// converting into a [`Registry`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FlatRegistry {
    data: Map,
}

impl FlatRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn as_map(&self) -> &Map {
        &self.data
    }

    pub fn iter(&self) -> indexmap::map::Iter<'_, String, Value> {
        self.data.iter()
    }

    /// Returns `true` if `key` holds a non-null value.
    pub fn exists(&self, key: &str) -> bool {
        self.data.get(key).is_some_and(|v| !v.is_null())
    }

    /// Value under `key`, or `None` if it is missing or blank.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.data.get(key).filter(|v| !v.is_blank())
    }

    pub fn get_or(&self, key: &str, default: impl Into<Value>) -> Value {
        match self.get(key) {
            Some(value) => value.clone(),
            None => default.into(),
        }
    }

    /// Store `value` under `key`. An empty key stores nothing.
    pub fn set(&mut self, key: &str, value: impl Into<Value>) -> Option<Value> {
        if key.is_empty() {
            return None;
        }
        self.data.insert(key.to_string(), value.into())
    }

    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.data.shift_remove(key)
    }

    pub fn def(&mut self, key: &str, default: impl Into<Value>) -> Value {
        if let Some(value) = self.get(key) {
            return value.clone();
        }
        let value = default.into();
        self.set(key, value.clone());
        value
    }

    /// Load a map. With `flattened`, dotted keys are split into nested maps.
    pub fn load_array(&mut self, data: Map, flattened: bool) -> &mut Self {
        if flattened {
            for (key, value) in data {
                path::set(&mut self.data, &key, DEFAULT_SEPARATOR, value);
            }
        } else {
            ops::bind(&mut self.data, data, true, true);
        }
        self
    }

    /// Decode `text` with the named format and load it without splitting keys.
    pub fn load_string(
        &mut self,
        codecs: &CodecRegistry,
        text: &str,
        format: &str,
        options: &FormatOptions,
    ) -> RegistryResult<&mut Self> {
        let data = codecs.decode(format, text, options)?;
        debug!(format, keys = data.len(), "loaded flat registry data");
        ops::bind(&mut self.data, data, true, true);
        Ok(self)
    }

    /// Overwrite top-level keys with those of `source`, skipping blank values.
    pub fn merge(&mut self, source: &FlatRegistry, recursive: bool) -> &mut Self {
        ops::bind(&mut self.data, source.data.clone(), recursive, false);
        self
    }

    pub fn to_array(&self) -> Map {
        self.data.clone()
    }

    pub fn flatten(&self, separator: Option<&str>) -> Map {
        ops::flatten(&self.data, separator.unwrap_or(DEFAULT_SEPARATOR))
    }

    pub fn count(&self) -> usize {
        ops::count_leaves(&self.data)
    }

    pub fn to_string_as(
        &self,
        codecs: &CodecRegistry,
        format: &str,
        options: &FormatOptions,
    ) -> RegistryResult<String> {
        Ok(codecs.encode(format, &self.data, options)?)
    }
}

impl From<Map> for FlatRegistry {
    fn from(data: Map) -> Self {
        Self { data }
    }
}

impl From<FlatRegistry> for Registry {
    fn from(flat: FlatRegistry) -> Self {
        Registry::from(flat.data)
    }
}

impl<'a> IntoIterator for &'a FlatRegistry {
    type Item = (&'a String, &'a Value);
    type IntoIter = indexmap::map::Iter<'a, String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Compact JSON.
impl fmt::Display for FlatRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = JsonFormat
            .encode(&self.data, &FormatOptions::default())
            .map_err(|_| fmt::Error)?;
        f.write_str(&text)
    }
}

impl Serialize for FlatRegistry {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.data.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for FlatRegistry {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Map::deserialize(deserializer).map(Self::from)
    }
}
