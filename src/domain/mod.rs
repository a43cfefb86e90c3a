//! Domain layer: the tree model and the builder that produces it
//!
//! This layer works on already-parsed JSON values only (no I/O, no CLI, no config loading).

pub mod builder;
pub mod error;
pub mod node;
pub mod path;
pub mod tree;

pub use builder::{TreeBuilder, Walked};
pub use error::{ConfigurationError, Issue, TreeResult};
pub use node::{Children, JsonKind, NodeSpec};
pub use path::NodePath;
pub use tree::Tree;
