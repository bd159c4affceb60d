//! Path splitting and traversal over nested maps.
//!
//! A path is split on the separator and empty segments are dropped, so
//! `"a..b"` and `".a.b."` both address `a` → `b`. A path with no segments
//! left (including `""`) addresses nothing: reads miss and writes are no-ops.
//!
//! Only [`Value::Map`] nodes are descended. Lists are never indexed by path
//! and numeric-looking segments are ordinary string keys.

use regis_types::{Map, Value};

/// Separator used when none is configured.
pub const DEFAULT_SEPARATOR: &str = ".";

/// Split `path` into non-empty segments.
///
/// Returns `None` when no segment remains. An empty separator means the whole
/// path is a single key.
pub fn segments<'p>(path: &'p str, separator: &str) -> Option<Vec<&'p str>> {
    if separator.is_empty() {
        return (!path.is_empty()).then(|| vec![path]);
    }
    let parts: Vec<&str> = path.split(separator).filter(|s| !s.is_empty()).collect();
    (!parts.is_empty()).then_some(parts)
}

/// Follow `segments` from `root` without creating anything.
pub fn lookup<'a>(root: &'a Map, segments: &[&str]) -> Option<&'a Value> {
    let (last, parents) = segments.split_last()?;
    parent(root, parents)?.get(*last)
}

/// The map reached by following `parents`, if every step is a map.
pub fn parent<'a>(root: &'a Map, parents: &[&str]) -> Option<&'a Map> {
    let mut node = root;
    for segment in parents {
        node = node.get(*segment)?.as_map()?;
    }
    Some(node)
}

/// Mutable variant of [`parent`]; creates nothing.
pub fn parent_mut<'a>(root: &'a mut Map, parents: &[&str]) -> Option<&'a mut Map> {
    let mut node = root;
    for segment in parents {
        node = node.get_mut(*segment)?.as_map_mut()?;
    }
    Some(node)
}

/// Follow `parents`, creating maps where keys are missing and replacing
/// any non-map value in the way with an empty map.
pub fn parent_mut_or_create<'a>(root: &'a mut Map, parents: &[&str]) -> &'a mut Map {
    let mut node = root;
    for segment in parents {
        node = node
            .entry((*segment).to_string())
            .or_insert_with(Value::map)
            .coerce_map();
    }
    node
}

/// Value at `path`, if present.
pub fn get<'a>(root: &'a Map, path: &str, separator: &str) -> Option<&'a Value> {
    lookup(root, &segments(path, separator)?)
}

/// Assign `value` at `path`, creating intermediate maps. Returns the
/// previous value. Empty paths are ignored.
pub fn set(root: &mut Map, path: &str, separator: &str, value: Value) -> Option<Value> {
    let segments = segments(path, separator)?;
    let (last, parents) = segments.split_last()?;
    parent_mut_or_create(root, parents).insert((*last).to_string(), value)
}

/// Push onto the list at `path`, or replace whatever is there (or absent)
/// with `value` when it is not a list.
pub fn append(root: &mut Map, path: &str, separator: &str, value: Value) {
    let Some(segments) = segments(path, separator) else {
        return;
    };
    let Some((last, parents)) = segments.split_last() else {
        return;
    };
    let parent = parent_mut_or_create(root, parents);
    match parent.get_mut(*last) {
        Some(Value::List(items)) => items.push(value),
        _ => {
            parent.insert((*last).to_string(), value);
        }
    }
}

/// Remove the value at `path`, keeping the order of its siblings.
pub fn remove(root: &mut Map, path: &str, separator: &str) -> Option<Value> {
    let segments = segments(path, separator)?;
    let (last, parents) = segments.split_last()?;
    parent_mut(root, parents)?.shift_remove(*last)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Map {
        let mut root = Map::new();
        set(&mut root, "a.b.c", ".", Value::from(1));
        set(&mut root, "scalar", ".", Value::from("x"));
        set(&mut root, "list", ".", Value::from(vec![1, 2]));
        root
    }

    #[test]
    fn segments_drop_empty_parts() {
        assert_eq!(segments("a.b.c", "."), Some(vec!["a", "b", "c"]));
        assert_eq!(segments("a..b", "."), Some(vec!["a", "b"]));
        assert_eq!(segments(".a.", "."), Some(vec!["a"]));
        assert_eq!(segments("", "."), None);
        assert_eq!(segments("...", "."), None);
    }

    #[test]
    fn custom_and_empty_separators() {
        assert_eq!(segments("a/b", "/"), Some(vec!["a", "b"]));
        assert_eq!(segments("a::b", "::"), Some(vec!["a", "b"]));
        assert_eq!(segments("a.b", ""), Some(vec!["a.b"]));
        assert_eq!(segments("", ""), None);
    }

    #[test]
    fn get_follows_maps_only() {
        let root = sample();
        assert_eq!(get(&root, "a.b.c", "."), Some(&Value::from(1)));
        assert!(get(&root, "a.b", ".").unwrap().is_map());
        assert_eq!(get(&root, "scalar.deeper", "."), None);
        assert_eq!(get(&root, "list.0", "."), None);
        assert_eq!(get(&root, "", "."), None);
    }

    #[test]
    fn set_replaces_scalar_in_the_way() {
        let mut root = sample();
        set(&mut root, "scalar.inner", ".", Value::from(true));
        assert_eq!(get(&root, "scalar.inner", "."), Some(&Value::from(true)));
    }

    #[test]
    fn set_with_empty_path_is_noop() {
        let mut root = Map::new();
        assert_eq!(set(&mut root, "", ".", Value::from(1)), None);
        assert!(root.is_empty());
    }

    #[test]
    fn set_returns_previous() {
        let mut root = sample();
        let old = set(&mut root, "a.b.c", ".", Value::from(2));
        assert_eq!(old, Some(Value::from(1)));
    }

    #[test]
    fn numeric_segments_are_keys() {
        let mut root = Map::new();
        set(&mut root, "servers.0.host", ".", Value::from("h"));
        let servers = get(&root, "servers", ".").and_then(Value::as_map).unwrap();
        assert!(servers.contains_key("0"));
    }

    #[test]
    fn append_pushes_or_replaces() {
        let mut root = sample();
        append(&mut root, "list", ".", Value::from(3));
        assert_eq!(get(&root, "list", "."), Some(&Value::from(vec![1, 2, 3])));

        append(&mut root, "scalar", ".", Value::from("y"));
        assert_eq!(get(&root, "scalar", "."), Some(&Value::from("y")));

        append(&mut root, "fresh.key", ".", Value::from(5));
        assert_eq!(get(&root, "fresh.key", "."), Some(&Value::from(5)));
    }

    #[test]
    fn remove_does_not_create() {
        let mut root = sample();
        assert_eq!(remove(&mut root, "missing.deep.key", "."), None);
        assert!(!root.contains_key("missing"));
        assert_eq!(remove(&mut root, "", "."), None);
    }

    #[test]
    fn remove_keeps_sibling_order() {
        let mut root = Map::new();
        for key in ["x", "y", "z"] {
            set(&mut root, key, ".", Value::from(key));
        }
        assert_eq!(remove(&mut root, "y", "."), Some(Value::from("y")));
        assert_eq!(root.keys().collect::<Vec<_>>(), ["x", "z"]);
    }

    #[test]
    fn parent_mut_stops_at_scalars() {
        let mut root = sample();
        assert!(parent_mut(&mut root, &["scalar"]).is_none());
        assert!(parent_mut(&mut root, &["a", "b"]).is_some());
    }
}
