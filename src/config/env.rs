//! Environment variable configuration layer.

use serde::Serialize;
use serde_json::Value;

/// One environment variable that contributed to the configuration.
#[derive(Debug, Clone, Serialize)]
pub struct EnvOverride {
    /// Configuration key derived from the variable name.
    pub key: String,
    /// Raw value as found in the environment.
    pub raw: String,
}

/// Build the environment layer from a variable snapshot.
///
/// Variables carrying `prefix` are turned into top-level keys: the prefix is
/// stripped and the remainder lowercased, so `MYAPP_LOGGING_LEVEL` with
/// prefix `MYAPP_` becomes `logging_level`. Keys stay flat; underscores are
/// never expanded into nested paths, so `logging.level` is untouched by that
/// variable. Values that parse as JSON are taken as their parsed type,
/// anything else is kept as a string.
///
/// Returns the layer and the matched variables sorted by key.
pub fn env_layer(
    vars: impl IntoIterator<Item = (String, String)>,
    prefix: &str,
) -> (Value, Vec<EnvOverride>) {
    let mut layer = serde_json::Map::new();
    let mut overrides = Vec::new();

    for (name, raw) in vars {
        let Some(remainder) = name.strip_prefix(prefix) else {
            continue;
        };
        if remainder.is_empty() {
            continue;
        }
        let key = remainder.to_lowercase();
        let value = serde_json::from_str(&raw).unwrap_or_else(|_| Value::String(raw.clone()));
        layer.insert(key.clone(), value);
        overrides.push(EnvOverride { key, raw });
    }

    overrides.sort_by(|a, b| a.key.cmp(&b.key));
    (Value::Object(layer), overrides)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn vars(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(name, value)| (name.to_string(), value.to_string()))
            .collect()
    }

    #[test]
    fn test_prefix_stripped_and_lowercased() {
        let (layer, overrides) = env_layer(vars(&[("MYAPP_TIMEOUT", "30")]), "MYAPP_");
        assert_eq!(layer, json!({"timeout": 30}));
        assert_eq!(overrides.len(), 1);
        assert_eq!(overrides[0].key, "timeout");
        assert_eq!(overrides[0].raw, "30");
    }

    #[test]
    fn test_keys_stay_flat() {
        let (layer, _) = env_layer(vars(&[("MYAPP_LOGGING_LEVEL", "error")]), "MYAPP_");
        // The variable maps to a single flat key, not logging.level.
        assert_eq!(layer, json!({"logging_level": "error"}));
    }

    #[test]
    fn test_json_values_parsed() {
        let (layer, _) = env_layer(
            vars(&[
                ("MYAPP_DEBUG", "true"),
                ("MYAPP_PORTS", "[80, 443]"),
                ("MYAPP_RATIO", "0.5"),
            ]),
            "MYAPP_",
        );
        assert_eq!(
            layer,
            json!({"debug": true, "ports": [80, 443], "ratio": 0.5})
        );
    }

    #[test]
    fn test_non_json_values_kept_as_strings() {
        let (layer, _) = env_layer(vars(&[("MYAPP_LEVEL", "warn")]), "MYAPP_");
        assert_eq!(layer, json!({"level": "warn"}));
    }

    #[test]
    fn test_unprefixed_variables_ignored() {
        let (layer, overrides) = env_layer(
            vars(&[("PATH", "/usr/bin"), ("OTHER_LEVEL", "debug")]),
            "MYAPP_",
        );
        assert_eq!(layer, json!({}));
        assert!(overrides.is_empty());
    }

    #[test]
    fn test_bare_prefix_ignored() {
        let (layer, overrides) = env_layer(vars(&[("MYAPP_", "oops")]), "MYAPP_");
        assert_eq!(layer, json!({}));
        assert!(overrides.is_empty());
    }

    #[test]
    fn test_overrides_sorted_by_key() {
        let (_, overrides) = env_layer(
            vars(&[("MYAPP_ZETA", "1"), ("MYAPP_ALPHA", "2")]),
            "MYAPP_",
        );
        let keys: Vec<&str> = overrides.iter().map(|o| o.key.as_str()).collect();
        assert_eq!(keys, vec!["alpha", "zeta"]);
    }
}
