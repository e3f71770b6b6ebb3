//! Validation of configuration trees against a schema.
//!
//! [`validate`] walks the tree and the schema together and collects every
//! violation it finds, so a caller can report all problems in one pass
//! instead of fixing them one at a time.

use crate::schema::types::{SchemaNode, kind_of};
use regex_lite::Regex;
use serde::Serialize;
use serde_json::Value;
use std::fmt;

/// One schema violation at a specific position in the tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationIssue {
    /// Dotted path from the root, e.g. `config.logging.level`.
    pub path: String,
    pub message: String,
}

impl ValidationIssue {
    fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path, self.message)
    }
}

/// Validate `value` against `schema`, reporting issues under `path`.
///
/// A type mismatch short-circuits the node: no other constraint is checked
/// against a value of the wrong shape. All other checks accumulate, both on
/// one node and across the tree.
pub fn validate(value: &Value, schema: &SchemaNode, path: &str) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();

    if let Some(kind) = schema.kind
        && !kind.matches(value)
    {
        issues.push(ValidationIssue::new(
            path,
            format!("expected {}, got {}", kind, kind_of(value)),
        ));
        return issues;
    }

    if let Some(map) = value.as_object() {
        if let Some(properties) = &schema.properties {
            for (key, child) in properties {
                match map.get(key) {
                    Some(nested) => {
                        issues.extend(validate(nested, child, &format!("{path}.{key}")));
                    }
                    None if child.required => {
                        issues.push(ValidationIssue::new(
                            format!("{path}.{key}"),
                            "required property missing",
                        ));
                    }
                    None => {}
                }
            }
        }
        // additionalProperties applies even when no properties are declared:
        // `false` with no property list rejects every key.
        if schema.additional_properties == Some(false) {
            for key in map.keys() {
                let declared = schema
                    .properties
                    .as_ref()
                    .is_some_and(|properties| properties.contains_key(key));
                if !declared {
                    issues.push(ValidationIssue::new(
                        format!("{path}.{key}"),
                        "additional property not allowed",
                    ));
                }
            }
        }
    }

    if let Some(allowed) = &schema.allowed
        && !allowed.contains(value)
    {
        let members = allowed
            .iter()
            .map(display_value)
            .collect::<Vec<_>>()
            .join(", ");
        issues.push(ValidationIssue::new(
            path,
            format!("value must be one of {members}"),
        ));
    }

    if let Some(number) = value.as_f64() {
        if let Some(minimum) = schema.minimum
            && number < minimum
        {
            issues.push(ValidationIssue::new(
                path,
                format!("value {number} is below minimum {minimum}"),
            ));
        }
        if let Some(maximum) = schema.maximum
            && number > maximum
        {
            issues.push(ValidationIssue::new(
                path,
                format!("value {number} is above maximum {maximum}"),
            ));
        }
    }

    if let Some(text) = value.as_str() {
        if let Some(min_length) = schema.min_length {
            let length = text.chars().count() as u64;
            if length < min_length {
                issues.push(ValidationIssue::new(
                    path,
                    format!("length {length} is below minimum length {min_length}"),
                ));
            }
        }
        if let Some(pattern) = &schema.pattern {
            match Regex::new(pattern) {
                Ok(regex) => {
                    if !regex.is_match(text) {
                        issues.push(ValidationIssue::new(
                            path,
                            format!("value does not match pattern {pattern}"),
                        ));
                    }
                }
                Err(err) => {
                    issues.push(ValidationIssue::new(
                        path,
                        format!("invalid pattern {pattern}: {err}"),
                    ));
                }
            }
        }
    }

    issues
}

/// Render an enum member for a message: strings bare, everything else as JSON.
fn display_value(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}
