//! Dotted-path access into a configuration tree.

use serde_json::{Map, Value};

/// Look up a value by dotted path, e.g. `logging.level`.
///
/// Returns `None` when any segment is missing or when a segment lands on a
/// non-object partway through the path.
pub fn get_path<'a>(tree: &'a Value, path: &str) -> Option<&'a Value> {
    let mut current = tree;
    for segment in path.split('.') {
        current = current.as_object()?.get(segment)?;
    }
    Some(current)
}

/// Write a value at a dotted path, creating intermediate objects as needed.
///
/// The path is forced to exist: a scalar or array in the way of an
/// intermediate segment is overwritten with an object. The tree is not
/// re-validated; callers that care can check via the resolver's `info()`.
pub fn set_path(tree: &mut Value, path: &str, value: Value) {
    if !tree.is_object() {
        *tree = Value::Object(Map::new());
    }
    if let Value::Object(map) = tree {
        match path.split_once('.') {
            Some((head, rest)) => {
                let child = map.entry(head).or_insert(Value::Null);
                set_path(child, rest, value);
            }
            None => {
                map.insert(path.to_string(), value);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_get_nested_value() {
        let tree = json!({"logging": {"level": "warn"}});
        assert_eq!(get_path(&tree, "logging.level"), Some(&json!("warn")));
        assert_eq!(get_path(&tree, "logging"), Some(&json!({"level": "warn"})));
    }

    #[test]
    fn test_get_missing_segment_is_none() {
        let tree = json!({"logging": {"level": "warn"}});
        assert_eq!(get_path(&tree, "logging.format"), None);
        assert_eq!(get_path(&tree, "server.port"), None);
    }

    #[test]
    fn test_get_through_scalar_is_none() {
        let tree = json!({"logging": "off"});
        assert_eq!(get_path(&tree, "logging.level"), None);
    }

    #[test]
    fn test_set_creates_intermediate_objects() {
        let mut tree = json!({});
        set_path(&mut tree, "server.tls.cert", json!("/etc/cert.pem"));
        assert_eq!(tree, json!({"server": {"tls": {"cert": "/etc/cert.pem"}}}));
    }

    #[test]
    fn test_set_overwrites_scalar_intermediate() {
        let mut tree = json!({"server": "disabled"});
        set_path(&mut tree, "server.port", json!(8080));
        assert_eq!(tree, json!({"server": {"port": 8080}}));
    }

    #[test]
    fn test_set_top_level_key() {
        let mut tree = json!({"a": 1});
        set_path(&mut tree, "b", json!(2));
        assert_eq!(tree, json!({"a": 1, "b": 2}));
    }
}
