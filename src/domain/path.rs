//! Ancestor path of the node currently being walked.

use std::fmt;

use itertools::Itertools;

/// Immutable chain of node names from the root down to the current node.
///
/// Each level borrows its parent, so extending a path never touches the
/// ancestors; the walk hands a fresh value to every recursive call.
#[derive(Debug, Clone, Copy, Default)]
pub struct NodePath<'a> {
    frame: Option<Frame<'a>>,
}

#[derive(Debug, Clone, Copy)]
struct Frame<'a> {
    name: &'a str,
    parent: &'a NodePath<'a>,
    depth: usize,
}

impl<'a> NodePath<'a> {
    /// The empty path, used while the root node itself is inspected.
    pub const fn root() -> Self {
        Self { frame: None }
    }

    pub fn child(&'a self, name: &'a str) -> NodePath<'a> {
        NodePath {
            frame: Some(Frame {
                name,
                parent: self,
                depth: self.depth() + 1,
            }),
        }
    }

    pub fn depth(&self) -> usize {
        self.frame.map_or(0, |frame| frame.depth)
    }

    pub fn is_empty(&self) -> bool {
        self.frame.is_none()
    }

    /// Name of the deepest node on the path.
    pub fn innermost(&self) -> Option<&'a str> {
        self.frame.map(|frame| frame.name)
    }

    /// Names from outermost to innermost.
    pub fn names(&self) -> Vec<&'a str> {
        let mut names = Vec::with_capacity(self.depth());
        let mut current = self.frame;
        while let Some(frame) = current {
            names.push(frame.name);
            current = frame.parent.frame;
        }
        names.reverse();
        names
    }
}

impl fmt::Display for NodePath<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.names().iter().join("."))
    }
}
