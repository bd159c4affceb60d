//! TOML codec backed by the `toml` crate.

use regis_types::{Map, Value};

use crate::error::{FormatError, FormatResult};
use crate::format::Format;
use crate::options::FormatOptions;

/// Key the `toml` deserializer uses to carry datetimes through serde.
const DATETIME_KEY: &str = "$__toml_private_datetime";

/// TOML codec (`toml`).
///
/// TOML has no null: encoding a map containing `Null` fails with
/// [`FormatError::Encode`]. Datetimes decode as their string form.
#[derive(Clone, Copy, Debug, Default)]
pub struct TomlFormat;

impl Format for TomlFormat {
    fn name(&self) -> &'static str {
        "toml"
    }

    fn extensions(&self) -> &'static [&'static str] {
        &["toml"]
    }

    fn encode(&self, data: &Map, options: &FormatOptions) -> FormatResult<String> {
        let result = if options.pretty_print {
            ::toml::to_string_pretty(data)
        } else {
            ::toml::to_string(data)
        };
        result.map_err(|e| FormatError::encode("toml", e))
    }

    fn decode(&self, text: &str, _options: &FormatOptions) -> FormatResult<Map> {
        let mut value: Value =
            ::toml::from_str(text).map_err(|e| FormatError::malformed("toml", e))?;
        unwrap_datetimes(&mut value);
        value
            .into_map()
            .map_err(|e| FormatError::malformed("toml", e))
    }
}

fn unwrap_datetimes(value: &mut Value) {
    match value {
        Value::Map(map) => {
            if map.len() == 1 {
                if let Some(Value::String(text)) = map.get(DATETIME_KEY) {
                    *value = Value::String(text.clone());
                    return;
                }
            }
            map.values_mut().for_each(unwrap_datetimes);
        }
        Value::List(items) => items.iter_mut().for_each(unwrap_datetimes),
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_tables_and_datetimes() {
        let text = r#"
title = "demo"
released = 1979-05-27T07:32:00Z

[server]
port = 8080
hosts = ["a", "b"]
"#;
        let map = TomlFormat.decode(text, &FormatOptions::default()).unwrap();
        assert_eq!(map.get("title"), Some(&Value::from("demo")));
        assert_eq!(map.get("released"), Some(&Value::from("1979-05-27T07:32:00Z")));
        let server = map.get("server").and_then(Value::as_map).unwrap();
        assert_eq!(server.get("port"), Some(&Value::from(8080)));
        assert_eq!(server.get("hosts"), Some(&Value::from(vec!["a", "b"])));
    }

    #[test]
    fn encode_then_decode() {
        let mut server = Map::new();
        server.insert("port".into(), Value::from(8080));
        let mut map = Map::new();
        map.insert("name".into(), Value::from("svc"));
        map.insert("server".into(), Value::Map(server));

        let opts = FormatOptions::default();
        let text = TomlFormat.encode(&map, &opts).unwrap();
        assert_eq!(TomlFormat.decode(&text, &opts).unwrap(), map);
    }

    #[test]
    fn null_cannot_be_encoded() {
        let mut map = Map::new();
        map.insert("missing".into(), Value::Null);
        let err = TomlFormat.encode(&map, &FormatOptions::default()).unwrap_err();
        assert!(matches!(err, FormatError::Encode { format: "toml", .. }));
    }

    #[test]
    fn malformed_input() {
        let err = TomlFormat.decode("key = ", &FormatOptions::default()).unwrap_err();
        assert!(matches!(err, FormatError::Malformed { format: "toml", .. }));
    }
}
