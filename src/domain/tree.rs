use std::collections::{BTreeSet, HashMap, HashSet};

use itertools::Itertools;
use tracing::instrument;

/// Tree of node names, built once by [`crate::domain::TreeBuilder`] and read-only afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tree {
    root: String,
    /// Child names per walked node, in document order. Loop markers never appear here.
    children_of: HashMap<String, Vec<String>>,
    /// Names of nodes with at least one loop marker directly beneath them.
    loops: BTreeSet<String>,
}

impl Tree {
    pub(crate) fn new(
        root: String,
        children_of: HashMap<String, Vec<String>>,
        loops: BTreeSet<String>,
    ) -> Self {
        Self {
            root,
            children_of,
            loops,
        }
    }

    pub fn root(&self) -> &str {
        &self.root
    }

    pub fn loops(&self) -> &BTreeSet<String> {
        &self.loops
    }

    /// Child names of `name` in document order; empty for unknown names.
    pub fn children(&self, name: &str) -> &[String] {
        self.children_of
            .get(name)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn is_loop(&self, name: &str) -> bool {
        self.loops.contains(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.children_of.contains_key(name)
    }

    /// Number of distinct named nodes.
    pub fn node_count(&self) -> usize {
        self.children_of.len()
    }

    /// Number of levels from the root to the deepest node.
    #[instrument(level = "debug", skip(self))]
    pub fn depth(&self) -> usize {
        let mut branch = Vec::new();
        let mut memo = HashMap::new();
        self.depth_from(&self.root, &mut branch, &mut memo)
    }

    // `branch` holds the names above `name`; a repeat means duplicate names formed a cycle.
    // `memo` keeps every name at one walk, so shared subtrees are measured once.
    fn depth_from<'t>(
        &'t self,
        name: &'t str,
        branch: &mut Vec<&'t str>,
        memo: &mut HashMap<&'t str, usize>,
    ) -> usize {
        if branch.contains(&name) {
            return 0;
        }
        if let Some(&depth) = memo.get(name) {
            return depth;
        }
        branch.push(name);
        let depth = 1 + self
            .children(name)
            .iter()
            .map(|child| self.depth_from(child, branch, memo))
            .max()
            .unwrap_or(0);
        branch.pop();
        memo.insert(name, depth);
        depth
    }

    /// Render from the root, suffixing loop parents with `loop_marker`.
    ///
    /// Each node with children is expanded once; later occurrences of the
    /// same name print as `name (see above)`.
    #[instrument(level = "debug", skip(self))]
    pub fn to_termtree(&self, loop_marker: &str) -> termtree::Tree<String> {
        let mut branch = Vec::new();
        let mut expanded = HashSet::new();
        self.subtree(&self.root, &mut branch, &mut expanded, loop_marker)
    }

    fn subtree<'t>(
        &'t self,
        name: &'t str,
        branch: &mut Vec<&'t str>,
        expanded: &mut HashSet<&'t str>,
        loop_marker: &str,
    ) -> termtree::Tree<String> {
        if branch.contains(&name) {
            return termtree::Tree::new(format!("{name} (cycle)"));
        }
        let children = self.children(name);
        if !children.is_empty() && !expanded.insert(name) {
            return termtree::Tree::new(format!("{name} (see above)"));
        }
        let label = if self.is_loop(name) {
            format!("{name} {loop_marker}")
        } else {
            name.to_string()
        };

        branch.push(name);
        let leaves: Vec<_> = children
            .iter()
            .map(|child| self.subtree(child, branch, expanded, loop_marker))
            .collect();
        branch.pop();

        termtree::Tree::new(label).with_leaves(leaves)
    }

    /// Plain-text dump: root, loops, then one `children(..)` line per node, depth first.
    ///
    /// Every name is listed once, at its first occurrence.
    ///
    /// ```text
    /// root == package
    /// loops == [package]
    /// children(package) == [class]
    /// children(class) == []
    /// ```
    pub fn listing(&self) -> Vec<String> {
        let mut lines = vec![
            format!("root == {}", self.root),
            format!("loops == [{}]", self.loops.iter().join(", ")),
        ];
        let mut listed = HashSet::new();
        self.list_children(&self.root, &mut listed, &mut lines);
        lines
    }

    fn list_children<'t>(
        &'t self,
        name: &'t str,
        listed: &mut HashSet<&'t str>,
        lines: &mut Vec<String>,
    ) {
        if !listed.insert(name) {
            return;
        }
        let children = self.children(name);
        lines.push(format!("children({name}) == [{}]", children.iter().join(", ")));

        for child in children {
            self.list_children(child, listed, lines);
        }
    }
}
