//! Declarative configuration schema.
//!
//! A schema is a tree of [`SchemaNode`]s loaded from YAML or JSON. Each node
//! constrains one position in the configuration tree: its type, its allowed
//! values, numeric bounds, string constraints, and which child properties
//! exist. Validation walks the merged configuration against this tree and
//! collects every [`ValidationIssue`] instead of stopping at the first.

mod types;
mod validator;

pub use types::{SchemaNode, SchemaType, kind_of};
pub use validator::{ValidationIssue, validate};
