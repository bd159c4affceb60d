//! INI codec.
//!
//! Line-oriented `key = value` text with `;` or `#` comments. Section headers
//! nest their entries one level deep when `process_sections` is set, and are
//! ignored otherwise. With `support_array_values`, `key[] = v` appends to a
//! list and `key[sub] = v` fills a map.
//!
//! Values decode as `true`/`false`, `null`, integers, floats, double-quoted
//! strings (`\"`, `\\`, `\n`, `\t` escapes), single-quoted literals or bare
//! strings with any trailing `;` comment removed.

use std::fmt::Write as _;

use tracing::debug;

use regis_types::{Map, Value};

use crate::error::{FormatError, FormatResult};
use crate::format::Format;
use crate::options::FormatOptions;

/// INI codec (`ini`).
#[derive(Clone, Copy, Debug, Default)]
pub struct IniFormat;

impl Format for IniFormat {
    fn name(&self) -> &'static str {
        "ini"
    }

    fn extensions(&self) -> &'static [&'static str] {
        &["ini", "cfg"]
    }

    fn encode(&self, data: &Map, options: &FormatOptions) -> FormatResult<String> {
        Ok(encode(data, options))
    }

    fn decode(&self, text: &str, options: &FormatOptions) -> FormatResult<Map> {
        decode(text, options)
    }
}

pub(crate) fn decode(text: &str, options: &FormatOptions) -> FormatResult<Map> {
    let mut root = Map::new();
    let mut section: Option<String> = None;

    for (idx, raw) in text.lines().enumerate() {
        let line = raw.trim();
        let lineno = idx + 1;
        if line.is_empty() || line.starts_with(';') || line.starts_with('#') {
            continue;
        }

        if let Some(rest) = line.strip_prefix('[') {
            let name = rest
                .strip_suffix(']')
                .ok_or_else(|| malformed(lineno, "unterminated section header"))?
                .trim();
            if options.process_sections {
                root.entry(name.to_string())
                    .or_insert_with(Value::map)
                    .coerce_map();
                section = Some(name.to_string());
            }
            continue;
        }

        let (key, raw_value) = line
            .split_once('=')
            .ok_or_else(|| malformed(lineno, "expected `key = value`"))?;
        let key = key.trim();
        if key.is_empty() {
            return Err(malformed(lineno, "empty key"));
        }
        let value = parse_value(raw_value.trim()).map_err(|reason| malformed(lineno, reason))?;

        let target = match &section {
            Some(name) => root
                .entry(name.clone())
                .or_insert_with(Value::map)
                .coerce_map(),
            None => &mut root,
        };
        insert_entry(target, key, value, options.support_array_values);
    }

    Ok(root)
}

fn malformed(line: usize, reason: &str) -> FormatError {
    FormatError::malformed("ini", format!("line {line}: {reason}"))
}

fn insert_entry(target: &mut Map, key: &str, value: Value, arrays: bool) {
    if arrays {
        if let Some(name) = key.strip_suffix("[]") {
            let slot = target.entry(name.trim().to_string()).or_insert(Value::Null);
            match slot {
                Value::List(items) => items.push(value),
                other => *other = Value::List(vec![value]),
            }
            return;
        }
        if let Some((name, sub)) = key
            .strip_suffix(']')
            .and_then(|k| k.split_once('['))
        {
            target
                .entry(name.trim().to_string())
                .or_insert_with(Value::map)
                .coerce_map()
                .insert(sub.trim().to_string(), value);
            return;
        }
    }
    target.insert(key.to_string(), value);
}

fn parse_value(raw: &str) -> Result<Value, &'static str> {
    if let Some(rest) = raw.strip_prefix('"') {
        let mut out = String::new();
        let mut chars = rest.char_indices();
        while let Some((i, ch)) = chars.next() {
            match ch {
                '\\' => match chars.next() {
                    Some((_, 'n')) => out.push('\n'),
                    Some((_, 't')) => out.push('\t'),
                    Some((_, c)) => out.push(c),
                    None => return Err("unterminated quoted value"),
                },
                '"' => {
                    check_trailing(&rest[i + 1..])?;
                    return Ok(Value::String(out));
                }
                c => out.push(c),
            }
        }
        return Err("unterminated quoted value");
    }

    if let Some(rest) = raw.strip_prefix('\'') {
        let end = rest.find('\'').ok_or("unterminated quoted value")?;
        check_trailing(&rest[end + 1..])?;
        return Ok(Value::String(rest[..end].to_string()));
    }

    let bare = raw.split(';').next().unwrap_or_default().trim();
    Ok(parse_bare(bare))
}

fn check_trailing(rest: &str) -> Result<(), &'static str> {
    let rest = rest.trim();
    if rest.is_empty() || rest.starts_with(';') || rest.starts_with('#') {
        Ok(())
    } else {
        Err("unexpected text after quoted value")
    }
}

fn parse_bare(bare: &str) -> Value {
    if bare.eq_ignore_ascii_case("true") {
        return Value::Bool(true);
    }
    if bare.eq_ignore_ascii_case("false") {
        return Value::Bool(false);
    }
    if bare.eq_ignore_ascii_case("null") {
        return Value::Null;
    }
    if let Ok(i) = bare.parse::<i64>() {
        return Value::Int(i);
    }
    let numeric = !bare.is_empty()
        && bare.bytes().any(|b| b.is_ascii_digit())
        && bare
            .bytes()
            .all(|b| b.is_ascii_digit() || matches!(b, b'.' | b'e' | b'E' | b'+' | b'-'));
    if numeric {
        if let Ok(f) = bare.parse::<f64>() {
            return Value::Float(f);
        }
    }
    Value::String(bare.to_string())
}

pub(crate) fn encode(data: &Map, options: &FormatOptions) -> String {
    let mut globals = String::new();
    let mut sections = String::new();

    for (key, value) in data {
        match value {
            Value::Map(section) => {
                let _ = writeln!(sections, "\n[{key}]");
                for (sub_key, sub_value) in section {
                    write_entry(&mut sections, sub_key, sub_value, options);
                }
            }
            other => write_entry(&mut globals, key, other, options),
        }
    }

    let mut out = globals;
    if out.is_empty() {
        out = sections.trim_start_matches('\n').to_string();
    } else {
        out.push_str(&sections);
    }
    out
}

fn write_entry(out: &mut String, key: &str, value: &Value, options: &FormatOptions) {
    match value {
        Value::Object(handle) => write_entry(out, key, &handle.export(), options),
        Value::List(items) if options.support_array_values => {
            for item in items {
                match literal(item) {
                    Some(item) => {
                        let _ = writeln!(out, "{key}[]={item}");
                    }
                    None => skipped(key, item),
                }
            }
        }
        Value::Map(map) if options.support_array_values => {
            for (sub, item) in map {
                match literal(item) {
                    Some(text) => {
                        let _ = writeln!(out, "{key}[{sub}]={text}");
                    }
                    None => skipped(key, item),
                }
            }
        }
        other => match literal(other) {
            Some(text) => {
                let _ = writeln!(out, "{key}={text}");
            }
            None => skipped(key, other),
        },
    }
}

fn skipped(key: &str, value: &Value) {
    debug!(key = %key, kind = value.type_name(), "skipping value that INI cannot represent");
}

/// INI literal for a scalar; `None` for containers.
fn literal(value: &Value) -> Option<String> {
    match value {
        Value::Null => Some("null".to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Int(i) => Some(i.to_string()),
        Value::Float(f) => Some(format!("{f:?}")),
        Value::String(s) => {
            let escaped = s
                .replace('\\', "\\\\")
                .replace('"', "\\\"")
                .replace('\n', "\\n");
            Some(format!("\"{escaped}\""))
        }
        Value::Object(handle) => literal(&handle.export()),
        Value::List(_) | Value::Map(_) => None,
    }
}
