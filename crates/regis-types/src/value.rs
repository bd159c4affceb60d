use std::fmt;

use indexmap::IndexMap;

use crate::error::TypeError;
use crate::opaque::Opaque;

/// Insertion-ordered mapping used for every nested level of a registry.
pub type Map = IndexMap<String, Value>;

/// A value stored in a registry.
///
/// Scalars, lists and nested maps are plain data. [`Value::Object`] holds an
/// [`Opaque`] handle: it is stored, copied and returned by reference and is
/// never descended into by path lookups, merges or flattening.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
    List(Vec<Value>),
    Map(Map),
    Object(Opaque),
}

impl Value {
    /// An empty nested map.
    pub fn map() -> Self {
        Value::Map(Map::new())
    }

    /// Short name of the variant, used in error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::String(_) => "string",
            Value::List(_) => "list",
            Value::Map(_) => "map",
            Value::Object(_) => "object",
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// `Null` or the empty string. Registries treat blank values as unset.
    pub fn is_blank(&self) -> bool {
        match self {
            Value::Null => true,
            Value::String(s) => s.is_empty(),
            _ => false,
        }
    }

    /// Scalars are everything except lists, maps and objects.
    pub fn is_scalar(&self) -> bool {
        !matches!(self, Value::List(_) | Value::Map(_) | Value::Object(_))
    }

    pub fn is_map(&self) -> bool {
        matches!(self, Value::Map(_))
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// Numeric value as a float. Integers are widened.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Int(i) => Some(*i as f64),
            Value::Float(f) => Some(*f),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&Map> {
        match self {
            Value::Map(map) => Some(map),
            _ => None,
        }
    }

    pub fn as_map_mut(&mut self) -> Option<&mut Map> {
        match self {
            Value::Map(map) => Some(map),
            _ => None,
        }
    }

    /// Borrow as a map, first replacing any non-map value with an empty one.
    pub fn coerce_map(&mut self) -> &mut Map {
        if !self.is_map() {
            *self = Value::map();
        }
        match self {
            Value::Map(map) => map,
            _ => unreachable!("value was just replaced by a map"),
        }
    }

    pub fn as_object(&self) -> Option<&Opaque> {
        match self {
            Value::Object(handle) => Some(handle),
            _ => None,
        }
    }

    /// Consume the value as a map, failing for any other variant.
    pub fn into_map(self) -> Result<Map, TypeError> {
        match self {
            Value::Map(map) => Ok(map),
            other => Err(TypeError::UnexpectedType {
                expected: "map",
                actual: other.type_name(),
            }),
        }
    }

    /// Map view of a container value: maps as-is, lists keyed by index.
    ///
    /// Returns `None` for scalars and objects.
    pub fn into_keyed(self) -> Option<Map> {
        match self {
            Value::Map(map) => Some(map),
            Value::List(items) => Some(
                items
                    .into_iter()
                    .enumerate()
                    .map(|(i, v)| (i.to_string(), v))
                    .collect(),
            ),
            _ => None,
        }
    }

    /// Text form of a scalar, as used by text formats and the CLI.
    ///
    /// Booleans render as `true`/`false`, `Null` as the empty string.
    /// Returns `None` for containers and objects.
    pub fn to_text(&self) -> Option<String> {
        match self {
            Value::Null => Some(String::new()),
            Value::Bool(b) => Some(b.to_string()),
            Value::Int(i) => Some(i.to_string()),
            Value::Float(f) => Some(f.to_string()),
            Value::String(s) => Some(s.clone()),
            _ => None,
        }
    }

    /// Convert to a `serde_json::Value`. Objects contribute their export.
    pub fn to_json(&self) -> serde_json::Value {
        use serde_json::Value as Json;
        match self {
            Value::Null => Json::Null,
            Value::Bool(b) => Json::Bool(*b),
            Value::Int(i) => Json::from(*i),
            Value::Float(f) => serde_json::Number::from_f64(*f)
                .map(Json::Number)
                .unwrap_or(Json::Null),
            Value::String(s) => Json::String(s.clone()),
            Value::List(items) => Json::Array(items.iter().map(Value::to_json).collect()),
            Value::Map(map) => Json::Object(
                map.iter()
                    .map(|(k, v)| (k.clone(), v.to_json()))
                    .collect(),
            ),
            Value::Object(handle) => handle.export().to_json(),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.to_text() {
            Some(text) => f.write_str(&text),
            None => write!(f, "{}", self.to_json()),
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

macro_rules! from_int {
    ($($t:ty),*) => {
        $(impl From<$t> for Value {
            fn from(i: $t) -> Self {
                Value::Int(i64::from(i))
            }
        })*
    };
}

from_int!(i8, i16, i32, i64, u8, u16, u32);

impl From<f32> for Value {
    fn from(f: f32) -> Self {
        Value::Float(f64::from(f))
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float(f)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<Map> for Value {
    fn from(map: Map) -> Self {
        Value::Map(map)
    }
}

impl From<Opaque> for Value {
    fn from(handle: Opaque) -> Self {
        Value::Object(handle)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Value::List(items.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(opt: Option<T>) -> Self {
        opt.map_or(Value::Null, Into::into)
    }
}

impl From<serde_json::Value> for Value {
    fn from(json: serde_json::Value) -> Self {
        use serde_json::Value as Json;
        match json {
            Json::Null => Value::Null,
            Json::Bool(b) => Value::Bool(b),
            Json::Number(n) => match n.as_i64() {
                Some(i) => Value::Int(i),
                None => Value::Float(n.as_f64().unwrap_or(f64::NAN)),
            },
            Json::String(s) => Value::String(s),
            Json::Array(items) => Value::List(items.into_iter().map(Value::from).collect()),
            Json::Object(map) => Value::Map(
                map.into_iter()
                    .map(|(k, v)| (k, Value::from(v)))
                    .collect(),
            ),
        }
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Value {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Value::Map(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::opaque::Object;
    use serde_json::json;

    #[derive(Debug)]
    struct Handle;

    impl Object for Handle {}

    #[test]
    fn blank_values() {
        assert!(Value::Null.is_blank());
        assert!(Value::from("").is_blank());
        assert!(!Value::from(0).is_blank());
        assert!(!Value::from(false).is_blank());
        assert!(!Value::from("0").is_blank());
        assert!(!Value::map().is_blank());
    }

    #[test]
    fn json_conversion_keeps_key_order() {
        let value: Value = [("zeta", 1), ("alpha", 2), ("mid", 3)].into_iter().collect();
        let keys: Vec<&str> = value.as_map().unwrap().keys().map(String::as_str).collect();
        assert_eq!(keys, ["zeta", "alpha", "mid"]);
        assert_eq!(value.to_json(), json!({"zeta": 1, "alpha": 2, "mid": 3}));
    }

    #[test]
    fn from_json_object_keeps_key_order() {
        let json: serde_json::Value =
            serde_json::from_str(r#"{"zeta": 1, "alpha": {"y": 2, "b": 3}}"#).unwrap();
        let value = Value::from(json);
        let map = value.as_map().unwrap();
        assert_eq!(map.keys().collect::<Vec<_>>(), ["zeta", "alpha"]);
        let inner = map["alpha"].as_map().unwrap();
        assert_eq!(inner.keys().collect::<Vec<_>>(), ["y", "b"]);
    }

    #[test]
    fn from_json_numbers() {
        assert_eq!(Value::from(json!(42)), Value::Int(42));
        assert_eq!(Value::from(json!(1.5)), Value::Float(1.5));
        assert_eq!(Value::from(json!(null)), Value::Null);
    }

    #[test]
    fn into_keyed_indexes_lists() {
        let keyed = Value::from(vec!["a", "b"]).into_keyed().unwrap();
        assert_eq!(keyed.get("0"), Some(&Value::from("a")));
        assert_eq!(keyed.get("1"), Some(&Value::from("b")));
        assert!(Value::from(3).into_keyed().is_none());
    }

    #[test]
    fn into_map_rejects_scalars() {
        let err = Value::from("x").into_map().unwrap_err();
        assert_eq!(
            err,
            TypeError::UnexpectedType {
                expected: "map",
                actual: "string"
            }
        );
    }

    #[test]
    fn object_exports_null_by_default() {
        let value = Value::from(Opaque::new(Handle));
        assert_eq!(value.to_json(), json!(null));
        assert!(!value.is_scalar());
    }

    #[test]
    fn display_scalars_and_containers() {
        assert_eq!(Value::from(true).to_string(), "true");
        assert_eq!(Value::from(7).to_string(), "7");
        assert_eq!(Value::from(vec![1, 2]).to_string(), "[1,2]");
    }
}
