//! Configuration layers and their file locations.

use serde::Serialize;
use std::path::{Path, PathBuf};

/// Extensions tried when locating a layer file, in preference order.
const LAYER_EXTENSIONS: &[&str] = &["yaml", "yml", "json"];

/// Configuration layer priority (lowest to highest).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfigLayer {
    /// Schema defaults (lowest priority)
    Defaults = 0,
    /// Machine-wide config (global.*)
    Global = 1,
    /// Shared project config (project.*)
    Project = 2,
    /// Per-checkout overrides (local.*)
    Local = 3,
    /// Environment variables (highest priority)
    Environment = 4,
}

impl std::fmt::Display for ConfigLayer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigLayer::Defaults => write!(f, "defaults"),
            ConfigLayer::Global => write!(f, "global"),
            ConfigLayer::Project => write!(f, "project"),
            ConfigLayer::Local => write!(f, "local"),
            ConfigLayer::Environment => write!(f, "environment"),
        }
    }
}

/// Resolved file locations for the schema and the file-backed layers.
#[derive(Debug, Clone)]
pub struct LayerPaths {
    /// Schema document describing the configuration shape
    pub schema: PathBuf,
    /// Machine-wide configuration file
    pub global: PathBuf,
    /// Shared project configuration file
    pub project: PathBuf,
    /// Per-checkout configuration file
    pub local: PathBuf,
}

impl LayerPaths {
    /// Discover layer files under a base directory.
    ///
    /// For each document the extensions `.yaml`, `.yml`, `.json` are tried
    /// in order; the first existing file wins. When none exists the
    /// canonical `.yaml` name is kept, so a missing layer still has a
    /// reportable location.
    pub fn discover(base_dir: &Path) -> Self {
        Self {
            schema: find_variant(base_dir, "schema"),
            global: find_variant(base_dir, "global"),
            project: find_variant(base_dir, "project"),
            local: find_variant(base_dir, "local"),
        }
    }

    /// Create paths with explicit file locations.
    pub fn with_files(schema: PathBuf, global: PathBuf, project: PathBuf, local: PathBuf) -> Self {
        Self {
            schema,
            global,
            project,
            local,
        }
    }

    /// The file backing a layer, if the layer is file-based.
    pub fn file_for(&self, layer: ConfigLayer) -> Option<&Path> {
        match layer {
            ConfigLayer::Global => Some(&self.global),
            ConfigLayer::Project => Some(&self.project),
            ConfigLayer::Local => Some(&self.local),
            ConfigLayer::Defaults | ConfigLayer::Environment => None,
        }
    }
}

fn find_variant(base_dir: &Path, stem: &str) -> PathBuf {
    for extension in LAYER_EXTENSIONS {
        let candidate = base_dir.join(format!("{stem}.{extension}"));
        if candidate.exists() {
            return candidate;
        }
    }
    base_dir.join(format!("{stem}.yaml"))
}
