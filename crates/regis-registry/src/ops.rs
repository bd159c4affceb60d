//! Tree algorithms shared by [`Registry`](crate::Registry) and
//! [`FlatRegistry`](crate::FlatRegistry).

use regis_types::{Map, Value};

/// Copy `source` into `target`.
///
/// With `recursive`, a non-empty source map is merged key by key into the
/// target's map at the same key (a non-map target value is replaced first).
/// Everything else, including lists and opaque handles, overwrites the
/// target entry. Blank source values are skipped unless `allow_blank`.
pub(crate) fn bind(target: &mut Map, source: Map, recursive: bool, allow_blank: bool) {
    for (key, value) in source {
        if !allow_blank && value.is_blank() {
            continue;
        }
        match value {
            Value::Map(inner) if recursive && !inner.is_empty() => {
                let slot = target.entry(key).or_insert_with(Value::map).coerce_map();
                bind(slot, inner, recursive, allow_blank);
            }
            other => {
                target.insert(key, other);
            }
        }
    }
}

/// Single-level map from joined key paths to leaf values.
///
/// Maps and lists are descended (list items keyed by index); every other
/// value, opaque objects included, is a leaf. Empty containers produce no
/// entries.
pub(crate) fn flatten(root: &Map, separator: &str) -> Map {
    let mut out = Map::new();
    for (key, value) in root {
        flatten_value(&mut out, key.clone(), value, separator);
    }
    out
}

fn flatten_value(out: &mut Map, key: String, value: &Value, separator: &str) {
    match value {
        Value::Map(map) => {
            for (sub, item) in map {
                flatten_value(out, format!("{key}{separator}{sub}"), item, separator);
            }
        }
        Value::List(items) => {
            for (i, item) in items.iter().enumerate() {
                flatten_value(out, format!("{key}{separator}{i}"), item, separator);
            }
        }
        leaf => {
            out.insert(key, leaf.clone());
        }
    }
}

/// Number of leaves, counted the way [`flatten`] would emit them.
pub(crate) fn count_leaves(root: &Map) -> usize {
    root.values().map(leaves).sum()
}

fn leaves(value: &Value) -> usize {
    match value {
        Value::Map(map) => map.values().map(leaves).sum(),
        Value::List(items) => items.iter().map(leaves).sum(),
        _ => 1,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn map(json: serde_json::Value) -> Map {
        Value::from(json).into_map().unwrap()
    }

    #[test]
    fn bind_recursive_merges_nested_maps() {
        let mut target = map(json!({"db": {"host": "a", "port": 1}}));
        bind(&mut target, map(json!({"db": {"host": "b"}})), true, true);
        assert_eq!(target, map(json!({"db": {"host": "b", "port": 1}})));
    }

    #[test]
    fn bind_shallow_replaces_nested_maps() {
        let mut target = map(json!({"db": {"host": "a", "port": 1}}));
        bind(&mut target, map(json!({"db": {"host": "b"}})), false, true);
        assert_eq!(target, map(json!({"db": {"host": "b"}})));
    }

    #[test]
    fn bind_recursive_replaces_scalar_with_map() {
        let mut target = map(json!({"db": "sqlite"}));
        bind(&mut target, map(json!({"db": {"host": "b"}})), true, true);
        assert_eq!(target, map(json!({"db": {"host": "b"}})));
    }

    #[test]
    fn bind_empty_map_replaces_even_when_recursive() {
        let mut target = map(json!({"db": {"host": "a"}}));
        bind(&mut target, map(json!({"db": {}})), true, true);
        assert_eq!(target, map(json!({"db": {}})));
    }

    #[test]
    fn bind_skips_blank_when_disallowed() {
        let mut target = map(json!({"a": "keep", "b": "keep", "c": 1}));
        bind(
            &mut target,
            map(json!({"a": null, "b": "", "c": 0})),
            false,
            false,
        );
        assert_eq!(target, map(json!({"a": "keep", "b": "keep", "c": 0})));
    }

    #[test]
    fn flatten_descends_maps_and_lists() {
        let root = map(json!({"a": {"b": 1, "c": [true, {"d": null}]}, "e": "x", "f": {}}));
        let flat = flatten(&root, ".");
        assert_eq!(
            flat,
            map(json!({"a.b": 1, "a.c.0": true, "a.c.1.d": null, "e": "x"}))
        );
        assert_eq!(count_leaves(&root), flat.len());
    }

    #[test]
    fn flatten_custom_separator() {
        let root = map(json!({"a": {"b": 1}}));
        assert_eq!(flatten(&root, "/"), map(json!({"a/b": 1})));
    }
}
