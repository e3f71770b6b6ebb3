//! Schema tree types and loading.

use crate::error::{ConfigError, ConfigResult};
use crate::format::FileFormat;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;

/// The JSON value types a schema node can require.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SchemaType {
    String,
    Number,
    Boolean,
    Object,
    Array,
    Null,
}

impl SchemaType {
    /// Check whether a value has this type.
    pub fn matches(self, value: &Value) -> bool {
        match self {
            SchemaType::String => value.is_string(),
            SchemaType::Number => value.is_number(),
            SchemaType::Boolean => value.is_boolean(),
            SchemaType::Object => value.is_object(),
            SchemaType::Array => value.is_array(),
            SchemaType::Null => value.is_null(),
        }
    }
}

impl fmt::Display for SchemaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SchemaType::String => "string",
            SchemaType::Number => "number",
            SchemaType::Boolean => "boolean",
            SchemaType::Object => "object",
            SchemaType::Array => "array",
            SchemaType::Null => "null",
        };
        write!(f, "{name}")
    }
}

/// The type name of a JSON value, as used in validation messages.
pub fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// One node of the configuration schema.
///
/// Every field is optional; an empty node accepts any value. Unknown keys in
/// the schema document are ignored so schemas written for richer validators
/// still load.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SchemaNode {
    /// Required value type. A mismatch suppresses all other checks on the node.
    #[serde(rename = "type")]
    pub kind: Option<SchemaType>,
    /// Child schemas, keyed by property name.
    pub properties: Option<BTreeMap<String, SchemaNode>>,
    /// Default value, applied only for top-level properties.
    pub default: Option<Value>,
    /// Closed set of allowed values.
    #[serde(rename = "enum")]
    pub allowed: Option<Vec<Value>>,
    /// Inclusive lower bound for numbers.
    pub minimum: Option<f64>,
    /// Inclusive upper bound for numbers.
    pub maximum: Option<f64>,
    /// Minimum string length in characters.
    pub min_length: Option<u64>,
    /// Regular expression the string must match.
    pub pattern: Option<String>,
    /// Whether the property must be present in its parent object.
    pub required: bool,
    /// When `Some(false)`, keys not listed in `properties` are rejected.
    pub additional_properties: Option<bool>,
}

impl SchemaNode {
    /// Load a schema document from disk, detecting the format from the
    /// file extension.
    pub fn load(path: &Path) -> ConfigResult<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|err| ConfigError::Schema(format!("{}: {}", path.display(), err)))?;
        Self::parse(&content, FileFormat::from_path(path))
    }

    /// Parse a schema document from a string.
    pub fn parse(content: &str, format: FileFormat) -> ConfigResult<Self> {
        let value = format.parse(content).map_err(ConfigError::schema)?;
        serde_json::from_value(value).map_err(ConfigError::schema)
    }

    /// Build the defaults layer: an object holding the `default` of every
    /// top-level property that declares one.
    ///
    /// Defaults on nested nodes are not collected. A deep default tree
    /// would mask whether a nested value came from a real layer or from the
    /// schema, so only the first level seeds the merge.
    pub fn shallow_defaults(&self) -> Value {
        let mut defaults = serde_json::Map::new();
        if let Some(properties) = &self.properties {
            for (key, child) in properties {
                if let Some(default) = &child.default {
                    defaults.insert(key.clone(), default.clone());
                }
            }
        }
        Value::Object(defaults)
    }
}
