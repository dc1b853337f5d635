//! Tree traversal primitives shared by both resolvers.

use std::iter::FusedIterator;

use xqs_syntax::{NodeIndex, SyntaxTree};

/// Ancestors of a node, nearest first, excluding the start node.
pub struct Ancestors<'a, T: SyntaxTree + ?Sized> {
    tree: &'a T,
    next: NodeIndex,
}

pub fn ancestors<T: SyntaxTree + ?Sized>(tree: &T, start: NodeIndex) -> Ancestors<'_, T> {
    Ancestors {
        tree,
        next: tree.parent(start),
    }
}

impl<T: SyntaxTree + ?Sized> Iterator for Ancestors<'_, T> {
    type Item = NodeIndex;

    fn next(&mut self) -> Option<NodeIndex> {
        let current = self.next.into_option()?;
        self.next = self.tree.parent(current);
        Some(current)
    }
}

impl<T: SyntaxTree + ?Sized> FusedIterator for Ancestors<'_, T> {}

/// How the scope walk reached a node.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Step {
    /// The node precedes the previous one under the same parent.
    Sibling,
    /// The node is an ancestor of the start node.
    Parent,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Visit {
    pub node: NodeIndex,
    pub step: Step,
    /// For parent steps, the child on the path from the start node. For
    /// sibling steps, the nearest ancestor-or-self of the start that shares
    /// `node`'s parent.
    pub from: NodeIndex,
}

/// Walk over the preceding-sibling-or-ancestor axis.
///
/// From each node the walk moves to its previous sibling, or to its parent
/// once the first sibling is reached. Preceding siblings are not descended
/// into. Parent steps visit exactly the nodes `ancestors` yields, in the
/// same order.
pub struct ScopeWalk<'a, T: SyntaxTree + ?Sized> {
    tree: &'a T,
    current: NodeIndex,
    /// Ancestor-or-self of the start node whose siblings are being walked.
    anchor: NodeIndex,
}

pub fn scope_walk<T: SyntaxTree + ?Sized>(tree: &T, start: NodeIndex) -> ScopeWalk<'_, T> {
    ScopeWalk {
        tree,
        current: start,
        anchor: start,
    }
}

impl<T: SyntaxTree + ?Sized> Iterator for ScopeWalk<'_, T> {
    type Item = Visit;

    fn next(&mut self) -> Option<Visit> {
        if self.current.is_none() {
            return None;
        }

        let prev = self.tree.prev_sibling(self.current);
        if prev.is_some() {
            self.current = prev;
            return Some(Visit {
                node: prev,
                step: Step::Sibling,
                from: self.anchor,
            });
        }

        let parent = self.tree.parent(self.current);
        let from = self.anchor;
        self.current = parent;
        self.anchor = parent;
        parent.into_option().map(|node| Visit {
            node,
            step: Step::Parent,
            from,
        })
    }
}

impl<T: SyntaxTree + ?Sized> FusedIterator for ScopeWalk<'_, T> {}
