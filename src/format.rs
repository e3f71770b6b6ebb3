//! On-disk formats for configuration documents.

use serde_json::Value;
use std::path::Path;

/// Supported configuration document formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    Yaml,
    Json,
}

impl FileFormat {
    /// Detect the format from a file extension, defaulting to YAML.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => FileFormat::Json,
            _ => FileFormat::Yaml,
        }
    }

    /// Parse a document into a JSON value tree.
    ///
    /// YAML is deserialized directly into `serde_json::Value`, so one value
    /// type flows through merging and validation regardless of the on-disk
    /// format. An empty YAML document parses to `Value::Null`.
    pub fn parse(self, content: &str) -> anyhow::Result<Value> {
        let value = match self {
            FileFormat::Yaml => serde_yaml::from_str(content)?,
            FileFormat::Json => serde_json::from_str(content)?,
        };
        Ok(value)
    }

    /// Serialize a value tree for writing to disk.
    pub fn serialize(self, value: &Value) -> anyhow::Result<String> {
        let text = match self {
            FileFormat::Yaml => serde_yaml::to_string(value)?,
            FileFormat::Json => serde_json::to_string_pretty(value)?,
        };
        Ok(text)
    }
}
