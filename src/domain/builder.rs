//! Tree builder: walks a parsed JSON node and collects child lists and loop parents.

use std::collections::{BTreeSet, HashMap, HashSet};

use serde_json::Value;
use tracing::{debug, instrument, trace};

use crate::domain::error::{ConfigurationError, Issue, TreeResult};
use crate::domain::node::{Children, NodeSpec};
use crate::domain::path::NodePath;
use crate::domain::tree::Tree;

/// Outcome of walking one node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Walked {
    Named(String),
    /// Loop markers are leaves; they only flag their parent.
    LoopMarker,
}

/// Output collected during a single `build`.
#[derive(Debug, Default)]
struct Collected {
    children_of: HashMap<String, Vec<String>>,
    loops: BTreeSet<String>,
    /// Only filled when duplicate names are rejected.
    seen: HashSet<String>,
}

/// Constructs [`Tree`]s from JSON node objects.
///
/// Holds options only, so one builder can serve any number of builds.
#[derive(Debug, Clone, Copy, Default)]
pub struct TreeBuilder {
    max_depth: Option<usize>,
    reject_duplicate_names: bool,
}

impl TreeBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail on nodes nested deeper than `max_depth` levels (root is level 1).
    pub fn with_max_depth(mut self, max_depth: Option<usize>) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Fail on a second node with an already used name instead of overwriting its children.
    pub fn reject_duplicate_names(mut self, reject: bool) -> Self {
        self.reject_duplicate_names = reject;
        self
    }

    /// Build a tree from the root node object.
    #[instrument(level = "debug", skip(self, root))]
    pub fn build(&self, root: &Value) -> TreeResult<Tree> {
        let mut collected = Collected::default();
        let path = NodePath::root();

        match self.walk(root, &path, &mut collected)? {
            Walked::Named(name) => {
                debug!(
                    root = %name,
                    nodes = collected.children_of.len(),
                    loops = collected.loops.len(),
                    "tree built"
                );
                Ok(Tree::new(name, collected.children_of, collected.loops))
            }
            // walk already rejects a loop marker with an empty path
            Walked::LoopMarker => Err(ConfigurationError::new(&path, Issue::LoopInRoot)),
        }
    }

    fn walk(
        &self,
        node: &Value,
        path: &NodePath<'_>,
        collected: &mut Collected,
    ) -> TreeResult<Walked> {
        let spec = NodeSpec::from_value(node)
            .map_err(|kind| ConfigurationError::new(path, Issue::NodeMustBeObject(kind)))?;

        if spec.is_loop {
            let parent = path
                .innermost()
                .ok_or_else(|| ConfigurationError::new(path, Issue::LoopInRoot))?;
            trace!(parent = %parent, "loop marker");
            collected.loops.insert(parent.to_string());
            return Ok(Walked::LoopMarker);
        }

        let name = spec
            .name
            .ok_or_else(|| ConfigurationError::new(path, Issue::NodeWithoutName))?;
        let here = path.child(name);

        if let Some(max_depth) = self.max_depth {
            if here.depth() > max_depth {
                return Err(ConfigurationError::new(
                    &here,
                    Issue::MaxDepthExceeded(max_depth),
                ));
            }
        }
        if self.reject_duplicate_names && !collected.seen.insert(name.to_string()) {
            return Err(ConfigurationError::new(
                &here,
                Issue::DuplicateName(name.to_string()),
            ));
        }

        let elements = match spec.children {
            Children::Absent | Children::Null => &[][..],
            Children::Array(elements) => elements,
            Children::Invalid(kind) => {
                return Err(ConfigurationError::new(
                    &here,
                    Issue::ChildrenMustBeArray(kind),
                ))
            }
        };

        let mut child_names = Vec::with_capacity(elements.len());
        for element in elements {
            if let Walked::Named(child) = self.walk(element, &here, collected)? {
                child_names.push(child);
            }
        }

        trace!(path = %here, children = child_names.len(), "node walked");
        // last write wins for duplicate names
        collected.children_of.insert(name.to_string(), child_names);
        Ok(Walked::Named(name.to_string()))
    }
}
