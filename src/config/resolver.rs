//! Configuration resolver with layer-based merging.
//!
//! Loads all five layers, merges them field-by-field, and validates the
//! result against the schema before exposing it.

use super::env::{EnvOverride, env_layer};
use super::layers::{ConfigLayer, LayerPaths};
use super::merge::deep_merge_all;
use super::path::{get_path, set_path};
use crate::error::{ConfigError, ConfigResult};
use crate::format::FileFormat;
use crate::schema::{SchemaNode, ValidationIssue, kind_of, validate};
use serde::Serialize;
use serde_json::Value;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Root segment used in validation issue paths.
const ROOT_PATH: &str = "config";

/// Load outcome of one layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LayerState {
    /// Layer contributed to the merge
    Loaded,
    /// File absent; layer contributed nothing
    Missing,
    /// File present but unusable; layer contributed nothing
    Skipped { reason: String },
}

/// Settings for constructing a [`ConfigResolver`].
#[derive(Debug, Clone)]
pub struct ResolverSettings {
    base_dir: PathBuf,
    env_prefix: String,
    paths: Option<LayerPaths>,
    env: Option<Vec<(String, String)>>,
}

impl ResolverSettings {
    pub fn new(base_dir: impl Into<PathBuf>, env_prefix: impl Into<String>) -> Self {
        Self {
            base_dir: base_dir.into(),
            env_prefix: env_prefix.into(),
            paths: None,
            env: None,
        }
    }

    /// Use explicit layer files instead of discovering them under the
    /// base directory.
    pub fn with_paths(mut self, paths: LayerPaths) -> Self {
        self.paths = Some(paths);
        self
    }

    /// Use a fixed variable snapshot instead of the process environment.
    ///
    /// `std::env::set_var` is unsafe in multi-threaded programs and races
    /// the parallel test runner, so tests inject a snapshot here instead of
    /// mutating the real environment.
    pub fn with_env(mut self, env: Vec<(String, String)>) -> Self {
        self.env = Some(env);
        self
    }
}

/// Resolved configuration: the merged tree plus where it came from.
#[derive(Debug, Clone)]
pub struct ConfigResolver {
    base_dir: PathBuf,
    env_prefix: String,
    paths: LayerPaths,
    schema: SchemaNode,
    tree: Value,
    layer_states: Vec<(ConfigLayer, LayerState)>,
    env_overrides: Vec<EnvOverride>,
}

impl ConfigResolver {
    /// Load configuration from all layers with proper merging.
    ///
    /// Layer files are discovered under `base_dir` and environment
    /// variables are read from the process environment.
    pub fn load(base_dir: &Path, env_prefix: &str) -> ConfigResult<Self> {
        Self::load_with(ResolverSettings::new(base_dir, env_prefix))
    }

    /// Load configuration with explicit settings.
    ///
    /// A missing or unreadable schema is fatal, as is a merged tree that
    /// fails validation. Missing layer files are not errors, and malformed
    /// ones are logged and skipped so one broken file cannot take the whole
    /// configuration down.
    pub fn load_with(settings: ResolverSettings) -> ConfigResult<Self> {
        let ResolverSettings {
            base_dir,
            env_prefix,
            paths,
            env,
        } = settings;
        let paths = paths.unwrap_or_else(|| LayerPaths::discover(&base_dir));
        let schema = SchemaNode::load(&paths.schema)?;

        // Collect layer trees from lowest to highest priority
        let mut layers: Vec<Value> = Vec::new();
        let mut layer_states: Vec<(ConfigLayer, LayerState)> = Vec::new();

        // Layer 1: Schema defaults
        layers.push(schema.shallow_defaults());
        layer_states.push((ConfigLayer::Defaults, LayerState::Loaded));

        // Layers 2-4: Global, project, local files
        for (layer, file) in [
            (ConfigLayer::Global, &paths.global),
            (ConfigLayer::Project, &paths.project),
            (ConfigLayer::Local, &paths.local),
        ] {
            match read_layer_file(file) {
                LayerRead::Loaded(value) => {
                    debug!("merging {} layer from {}", layer, file.display());
                    layers.push(value);
                    layer_states.push((layer, LayerState::Loaded));
                }
                LayerRead::Missing => {
                    layer_states.push((layer, LayerState::Missing));
                }
                LayerRead::Malformed(reason) => {
                    warn!("skipping {} layer {}: {}", layer, file.display(), reason);
                    layer_states.push((layer, LayerState::Skipped { reason }));
                }
            }
        }

        // Layer 5: Environment variables
        let vars = env.unwrap_or_else(|| std::env::vars().collect());
        let (env_values, env_overrides) = env_layer(vars, &env_prefix);
        debug!("merging {} environment override(s)", env_overrides.len());
        layers.push(env_values);
        layer_states.push((ConfigLayer::Environment, LayerState::Loaded));

        let tree = deep_merge_all(layers);

        let issues = validate(&tree, &schema, ROOT_PATH);
        if !issues.is_empty() {
            return Err(ConfigError::Invalid(issues));
        }

        Ok(Self {
            base_dir,
            env_prefix,
            paths,
            schema,
            tree,
            layer_states,
            env_overrides,
        })
    }

    /// Value at a dotted path in the merged tree.
    pub fn get(&self, path: &str) -> Option<&Value> {
        get_path(&self.tree, path)
    }

    /// Value at a dotted path, or `fallback` when the path is absent.
    pub fn get_or<'a>(&'a self, path: &str, fallback: &'a Value) -> &'a Value {
        self.get(path).unwrap_or(fallback)
    }

    /// Write a value at a dotted path, creating intermediate objects.
    ///
    /// The tree is not re-validated on write; [`info`](Self::info) reports
    /// the current validation status on demand.
    pub fn set(&mut self, path: &str, value: impl Into<Value>) {
        set_path(&mut self.tree, path, value.into());
    }

    /// Deep copy of the merged tree.
    pub fn get_all(&self) -> Value {
        self.tree.clone()
    }

    /// Borrow the merged tree.
    pub fn tree(&self) -> &Value {
        &self.tree
    }

    /// Base directory the layer files were discovered under.
    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Resolved layer file locations.
    pub fn paths(&self) -> &LayerPaths {
        &self.paths
    }

    /// Write the merged tree, or a subset of it, to a file. The format is
    /// picked from the target extension.
    pub fn save_config(&self, target: &Path, subset: Option<&Value>) -> ConfigResult<()> {
        let value = subset.unwrap_or(&self.tree);
        let text = FileFormat::from_path(target)
            .serialize(value)
            .map_err(ConfigError::save)?;
        std::fs::write(target, text)
            .map_err(|err| ConfigError::Save(format!("{}: {}", target.display(), err)))
    }

    /// Snapshot of where configuration came from and whether the current
    /// tree still validates.
    pub fn info(&self) -> ConfigInfo {
        let layers = self
            .layer_states
            .iter()
            .filter_map(|(layer, state)| {
                let file = self.paths.file_for(*layer)?;
                Some(LayerFileInfo {
                    layer: *layer,
                    file: file.to_path_buf(),
                    exists: file.exists(),
                    state: state.clone(),
                })
            })
            .collect();
        let issues = validate(&self.tree, &self.schema, ROOT_PATH);
        ConfigInfo {
            base_dir: self.base_dir.clone(),
            env_prefix: self.env_prefix.clone(),
            schema_file: self.paths.schema.clone(),
            layers,
            env_overrides: self.env_overrides.clone(),
            validation: ValidationStatus {
                valid: issues.is_empty(),
                issues,
            },
        }
    }
}

/// One file-backed layer in a [`ConfigInfo`] report.
#[derive(Debug, Clone, Serialize)]
pub struct LayerFileInfo {
    pub layer: ConfigLayer,
    pub file: PathBuf,
    pub exists: bool,
    pub state: LayerState,
}

/// Validation verdict for the current tree.
#[derive(Debug, Clone, Serialize)]
pub struct ValidationStatus {
    pub valid: bool,
    pub issues: Vec<ValidationIssue>,
}

/// Diagnostic report of the resolution.
#[derive(Debug, Clone, Serialize)]
pub struct ConfigInfo {
    pub base_dir: PathBuf,
    pub env_prefix: String,
    pub schema_file: PathBuf,
    pub layers: Vec<LayerFileInfo>,
    pub env_overrides: Vec<EnvOverride>,
    pub validation: ValidationStatus,
}

enum LayerRead {
    Loaded(Value),
    Missing,
    Malformed(String),
}

fn read_layer_file(path: &Path) -> LayerRead {
    if !path.exists() {
        return LayerRead::Missing;
    }
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(err) => return LayerRead::Malformed(err.to_string()),
    };
    match FileFormat::from_path(path).parse(&content) {
        // An empty document is an empty mapping, not a null overlay that
        // would wipe everything merged below it
        Ok(Value::Null) => LayerRead::Loaded(Value::Object(serde_json::Map::new())),
        Ok(Value::Object(map)) => LayerRead::Loaded(Value::Object(map)),
        Ok(other) => LayerRead::Malformed(format!(
            "expected a mapping at the document root, got {}",
            kind_of(&other)
        )),
        Err(err) => LayerRead::Malformed(err.to_string()),
    }
}
