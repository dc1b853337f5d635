//! The capability interface scope resolution consumes.
//!
//! Anything that can answer these questions about a parent-linked tree can
//! be resolved against; `NodeArena` is the in-crate implementation.

use crate::base::NodeIndex;
use crate::syntax_kind::SyntaxKind;

pub trait SyntaxTree {
    /// Grammar production of `node`, `None` for an out-of-range handle.
    fn kind(&self, node: NodeIndex) -> Option<SyntaxKind>;

    /// Immediate ancestor of `node`, `NodeIndex::NONE` at the root.
    fn parent(&self, node: NodeIndex) -> NodeIndex;

    /// Direct children in source order.
    fn children(&self, node: NodeIndex) -> &[NodeIndex];

    /// Variable name of a binding node. Absent for non-binding nodes and
    /// for bindings recovered from a parse error.
    fn variable_name(&self, node: NodeIndex) -> Option<&str>;

    fn namespace_prefix(&self, node: NodeIndex) -> Option<&str>;

    fn namespace_uri(&self, node: NodeIndex) -> Option<&str>;

    /// Predefined namespace declarations attached to a module root.
    fn static_context(&self, _node: NodeIndex) -> &[NodeIndex] {
        &[]
    }

    /// Nodes sharing `node`'s parent, `node` included, in source order.
    fn siblings(&self, node: NodeIndex) -> &[NodeIndex] {
        let parent = self.parent(node);
        if parent.is_none() {
            &[]
        } else {
            self.children(parent)
        }
    }

    /// The sibling written immediately before `node`.
    fn prev_sibling(&self, node: NodeIndex) -> NodeIndex {
        let siblings = self.siblings(node);
        match siblings.iter().position(|&sibling| sibling == node) {
            Some(pos) if pos > 0 => siblings[pos - 1],
            _ => NodeIndex::NONE,
        }
    }

    #[inline]
    fn is_kind(&self, node: NodeIndex, kind: SyntaxKind) -> bool {
        self.kind(node) == Some(kind)
    }

    /// First direct child of the given kind.
    fn child_of_kind(&self, node: NodeIndex, kind: SyntaxKind) -> NodeIndex {
        self.children(node)
            .iter()
            .copied()
            .find(|&child| self.is_kind(child, kind))
            .unwrap_or(NodeIndex::NONE)
    }
}
