//! Layered configuration resolution.
//!
//! Consolidates configuration from five layers with field-by-field merging:
//! 1. **Defaults** - Top-level `default` values from the schema
//! 2. **Global** - `global.{yaml,yml,json}` in the config directory
//! 3. **Project** - `project.{yaml,yml,json}`
//! 4. **Local** - `local.{yaml,yml,json}`
//! 5. **Environment** - Variables carrying the configured prefix
//!
//! ## Merge Strategy
//! - Objects: Deep merge field-by-field, later layers win
//! - Arrays, scalars, nulls: Replaced entirely by the later layer
//! - Missing layer files are skipped; malformed ones are logged and skipped
//!
//! The merged tree is validated against the schema before it is exposed, so
//! a [`ConfigResolver`] never hands out a tree that failed validation at
//! load time.

mod env;
mod layers;
mod merge;
mod path;
mod resolver;

pub use env::{EnvOverride, env_layer};
pub use layers::{ConfigLayer, LayerPaths};
pub use merge::{deep_merge, deep_merge_all};
pub use path::{get_path, set_path};
pub use resolver::{
    ConfigInfo, ConfigResolver, LayerFileInfo, LayerState, ResolverSettings, ValidationStatus,
};
