//! Domain-level errors (no I/O concerns)

use thiserror::Error;

use crate::domain::node::JsonKind;
use crate::domain::path::NodePath;

/// What is structurally wrong with an input node.
///
/// The `Display` output is the message part of a [`ConfigurationError`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Issue {
    #[error("node without name")]
    NodeWithoutName,

    #[error("LOOP IN ROOT")]
    LoopInRoot,

    #[error("children must be array: {0}")]
    ChildrenMustBeArray(JsonKind),

    #[error("node must be object: {0}")]
    NodeMustBeObject(JsonKind),

    #[error("maximum depth {0} exceeded")]
    MaxDepthExceeded(usize),

    #[error("duplicate node name: {0}")]
    DuplicateName(String),
}

/// A structurally invalid input node, located by the dotted names of its ancestors.
///
/// Renders as `[<path>] <message>`; the path is empty for violations found at the root.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("[{path}] {issue}")]
pub struct ConfigurationError {
    path: String,
    issue: Issue,
}

impl ConfigurationError {
    pub fn new(path: &NodePath<'_>, issue: Issue) -> Self {
        Self {
            path: path.to_string(),
            issue,
        }
    }

    /// Dot-joined names from the root down to where the violation was found.
    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn issue(&self) -> &Issue {
        &self.issue
    }

    pub fn message(&self) -> String {
        self.issue.to_string()
    }
}

/// Result type for tree building.
pub type TreeResult<T> = Result<T, ConfigurationError>;
