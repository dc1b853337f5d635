//! Programmatic tree construction.
//!
//! Parsers and tests build trees top-down: create the root, then push each
//! child under an already-created parent. Source order is push order.

use crate::base::NodeIndex;
use crate::node::{Node, NodeArena, NodeData};
use crate::static_context::StaticContext;
use crate::syntax_kind::SyntaxKind;

#[derive(Debug)]
pub struct TreeBuilder {
    arena: NodeArena,
}

impl TreeBuilder {
    pub fn new(root_kind: SyntaxKind) -> TreeBuilder {
        let mut arena = NodeArena::new();
        arena.add(Node::new(root_kind, NodeData::None));
        TreeBuilder { arena }
    }

    pub fn root(&self) -> NodeIndex {
        NodeIndex(0)
    }

    /// Install predefined namespaces on the root.
    pub fn with_static_context(mut self, context: &StaticContext) -> TreeBuilder {
        self.set_static_context(context);
        self
    }

    pub fn set_static_context(&mut self, context: &StaticContext) {
        self.arena.static_context.clear();
        for binding in context.bindings() {
            let node = self.arena.add(Node::new(
                SyntaxKind::StaticNamespace,
                NodeData::Namespace {
                    prefix: Some(binding.prefix.clone()),
                    uri: Some(binding.uri.clone()),
                },
            ));
            self.arena.static_context.push(node);
        }
    }

    /// Push a node without payload.
    pub fn push(&mut self, parent: NodeIndex, kind: SyntaxKind) -> NodeIndex {
        self.push_with(parent, kind, NodeData::None)
    }

    pub fn push_binding(
        &mut self,
        parent: NodeIndex,
        kind: SyntaxKind,
        name: impl Into<String>,
    ) -> NodeIndex {
        self.push_with(
            parent,
            kind,
            NodeData::Variable {
                name: Some(name.into()),
            },
        )
    }

    /// Push a binding whose name failed to parse.
    pub fn push_unnamed_binding(&mut self, parent: NodeIndex, kind: SyntaxKind) -> NodeIndex {
        self.push_with(parent, kind, NodeData::Variable { name: None })
    }

    pub fn push_namespace(
        &mut self,
        parent: NodeIndex,
        kind: SyntaxKind,
        prefix: Option<&str>,
        uri: Option<&str>,
    ) -> NodeIndex {
        self.push_with(
            parent,
            kind,
            NodeData::Namespace {
                prefix: prefix.map(str::to_string),
                uri: uri.map(str::to_string),
            },
        )
    }

    pub fn push_with(&mut self, parent: NodeIndex, kind: SyntaxKind, data: NodeData) -> NodeIndex {
        let node = self.arena.add(Node::new(kind, data));
        self.arena.attach(parent, node);
        node
    }

    /// Replace the payload of an existing node.
    pub fn set_data(&mut self, node: NodeIndex, data: NodeData) {
        if let Some(n) = self.arena.get_mut(node) {
            n.data = data;
        }
    }

    pub fn arena(&self) -> &NodeArena {
        &self.arena
    }

    pub fn finish(self) -> NodeArena {
        self.arena
    }
}
