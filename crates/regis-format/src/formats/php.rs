//! PHP-source codec.
//!
//! Encodes the root map as a PHP class whose public properties hold the
//! top-level values; nested lists and maps become `array(...)` expressions.
//! The codec is write-only: decoding always yields an empty map.

use std::fmt::Write as _;

use tracing::debug;

use regis_types::{Map, Value};

use crate::error::FormatResult;
use crate::format::Format;
use crate::options::FormatOptions;

const DEFAULT_CLASS: &str = "Registry";

/// PHP class-source codec (`php`).
#[derive(Clone, Copy, Debug, Default)]
pub struct PhpFormat;

impl Format for PhpFormat {
    fn name(&self) -> &'static str {
        "php"
    }

    fn extensions(&self) -> &'static [&'static str] {
        &["php"]
    }

    fn encode(&self, data: &Map, options: &FormatOptions) -> FormatResult<String> {
        let class = options.class.as_deref().unwrap_or(DEFAULT_CLASS);
        let mut out = String::from("<?php\n");
        if let Some(namespace) = &options.namespace {
            let _ = writeln!(out, "namespace {namespace};");
        }
        let _ = writeln!(out, "\nclass {class} {{");
        for (key, value) in data {
            if !is_identifier(key) {
                debug!(key = %key, "skipping key that is not a valid PHP property name");
                continue;
            }
            let _ = writeln!(out, "\tpublic ${key} = {};", literal(value));
        }
        out.push_str("}\n");
        if options.closing_tag {
            out.push_str("?>\n");
        }
        Ok(out)
    }

    fn decode(&self, _text: &str, _options: &FormatOptions) -> FormatResult<Map> {
        Ok(Map::new())
    }
}

fn is_identifier(key: &str) -> bool {
    let mut chars = key.chars();
    matches!(chars.next(), Some(c) if c == '_' || c.is_ascii_alphabetic())
        && chars.all(|c| c == '_' || c.is_ascii_alphanumeric())
}

fn literal(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Int(i) => i.to_string(),
        Value::Float(f) => format!("{f:?}"),
        Value::String(s) => quote(s),
        Value::List(items) => {
            let parts: Vec<String> = items.iter().map(literal).collect();
            format!("array({})", parts.join(", "))
        }
        Value::Map(map) => {
            let parts: Vec<String> = map
                .iter()
                .map(|(k, v)| format!("{} => {}", quote(k), literal(v)))
                .collect();
            format!("array({})", parts.join(", "))
        }
        Value::Object(handle) => literal(&handle.export()),
    }
}

fn quote(s: &str) -> String {
    format!("'{}'", s.replace('\\', "\\\\").replace('\'', "\\'"))
}
