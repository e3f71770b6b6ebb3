//! Structured error types for configuration resolution.

use crate::schema::ValidationIssue;
use std::fmt;
use thiserror::Error;

/// Errors surfaced by configuration resolution.
///
/// Layer files that are missing or fail to parse never appear here: a
/// missing file contributes nothing to the merge, and a malformed one is
/// skipped with a warning and recorded in the diagnostic snapshot. Only
/// schema problems, a merged tree that fails validation, and save failures
/// abort the caller.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Schema file missing, unreadable, or not parseable.
    #[error("schema error: {0}")]
    Schema(String),

    /// The merged tree failed schema validation. Carries every violation
    /// found, so a user can fix all problems in one pass.
    #[error("invalid configuration:\n{}", format_issues(.0))]
    Invalid(Vec<ValidationIssue>),

    /// Writing the configuration to disk failed.
    #[error("save error: {0}")]
    Save(String),
}

impl ConfigError {
    // Convenience constructors

    pub fn schema(err: impl fmt::Display) -> Self {
        ConfigError::Schema(err.to_string())
    }

    pub fn save(err: impl fmt::Display) -> Self {
        ConfigError::Save(err.to_string())
    }
}

fn format_issues(issues: &[ValidationIssue]) -> String {
    issues
        .iter()
        .map(|issue| issue.to_string())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Result type for configuration operations.
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;
