//! looptree: builds name trees from nested JSON node documents.
//!
//! Nodes carry a `name` and optional `children`; a `{"loop": true}` child marks
//! its parent as looping instead of adding a node.
//!
//! ```
//! use looptree::TreeBuilder;
//! use serde_json::json;
//!
//! let root = json!({"name": "package", "children": [{"name": "class"}, {"loop": true}]});
//! let tree = TreeBuilder::new().build(&root).unwrap();
//!
//! assert_eq!(tree.root(), "package");
//! assert_eq!(tree.children("package"), ["class"]);
//! assert!(tree.is_loop("package"));
//! ```

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod infrastructure;
pub mod util;

pub use domain::{ConfigurationError, Tree, TreeBuilder};
