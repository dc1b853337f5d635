//! Arena storage for syntax trees.

use crate::access::SyntaxTree;
use crate::base::NodeIndex;
use crate::syntax_kind::SyntaxKind;
use serde::Serialize;

/// Kind-specific payload of a node.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub enum NodeData {
    #[default]
    None,
    /// Variable-binding capability.
    Variable { name: Option<String> },
    /// Namespace-declaration capability.
    Namespace {
        prefix: Option<String>,
        uri: Option<String>,
    },
}

#[derive(Clone, Debug, Serialize)]
pub struct Node {
    pub kind: SyntaxKind,
    pub parent: NodeIndex,
    pub children: Vec<NodeIndex>,
    /// Position of this node in its parent's `children`.
    pub slot: u32,
    pub data: NodeData,
}

impl Node {
    pub fn new(kind: SyntaxKind, data: NodeData) -> Node {
        Node {
            kind,
            parent: NodeIndex::NONE,
            children: Vec::new(),
            slot: 0,
            data,
        }
    }
}

/// Arena-based storage for syntax nodes.
/// Nodes are stored contiguously and referenced by index; the first node
/// added is the root.
#[derive(Debug, Default, Serialize)]
pub struct NodeArena {
    pub nodes: Vec<Node>,
    /// Detached `StaticNamespace` nodes visible from the root.
    pub static_context: Vec<NodeIndex>,
}

impl NodeArena {
    pub fn new() -> NodeArena {
        NodeArena::default()
    }

    pub fn with_capacity(capacity: usize) -> NodeArena {
        NodeArena {
            nodes: Vec::with_capacity(capacity),
            static_context: Vec::new(),
        }
    }

    /// The root node, `NodeIndex::NONE` for an empty arena.
    pub fn root(&self) -> NodeIndex {
        if self.nodes.is_empty() {
            NodeIndex::NONE
        } else {
            NodeIndex(0)
        }
    }

    /// Add a detached node and return its index
    pub fn add(&mut self, node: Node) -> NodeIndex {
        let index = self.nodes.len() as u32;
        self.nodes.push(node);
        NodeIndex(index)
    }

    /// Link `child` as the last child of `parent`.
    /// Out-of-range handles leave the arena untouched.
    pub fn attach(&mut self, parent: NodeIndex, child: NodeIndex) {
        let Some(slot) = self.get(parent).map(|p| p.children.len() as u32) else {
            return;
        };
        let Some(child_node) = self.get_mut(child) else {
            return;
        };
        child_node.parent = parent;
        child_node.slot = slot;
        if let Some(parent_node) = self.get_mut(parent) {
            parent_node.children.push(child);
        }
    }

    /// Get a node by index
    pub fn get(&self, index: NodeIndex) -> Option<&Node> {
        if index.is_none() {
            None
        } else {
            self.nodes.get(index.0 as usize)
        }
    }

    pub fn get_mut(&mut self, index: NodeIndex) -> Option<&mut Node> {
        if index.is_none() {
            None
        } else {
            self.nodes.get_mut(index.0 as usize)
        }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

impl SyntaxTree for NodeArena {
    fn kind(&self, node: NodeIndex) -> Option<SyntaxKind> {
        self.get(node).map(|n| n.kind)
    }

    fn parent(&self, node: NodeIndex) -> NodeIndex {
        self.get(node).map_or(NodeIndex::NONE, |n| n.parent)
    }

    fn children(&self, node: NodeIndex) -> &[NodeIndex] {
        self.get(node).map_or(&[], |n| n.children.as_slice())
    }

    fn variable_name(&self, node: NodeIndex) -> Option<&str> {
        match &self.get(node)?.data {
            NodeData::Variable { name } => name.as_deref(),
            _ => None,
        }
    }

    fn namespace_prefix(&self, node: NodeIndex) -> Option<&str> {
        match &self.get(node)?.data {
            NodeData::Namespace { prefix, .. } => prefix.as_deref(),
            _ => None,
        }
    }

    fn namespace_uri(&self, node: NodeIndex) -> Option<&str> {
        match &self.get(node)?.data {
            NodeData::Namespace { uri, .. } => uri.as_deref(),
            _ => None,
        }
    }

    fn static_context(&self, node: NodeIndex) -> &[NodeIndex] {
        if node == self.root() {
            &self.static_context
        } else {
            &[]
        }
    }

    // O(1) through the stored slot instead of scanning the siblings.
    fn prev_sibling(&self, node: NodeIndex) -> NodeIndex {
        let Some(n) = self.get(node) else {
            return NodeIndex::NONE;
        };
        if n.parent.is_none() || n.slot == 0 {
            return NodeIndex::NONE;
        }
        self.children(n.parent)
            .get(n.slot as usize - 1)
            .copied()
            .unwrap_or(NodeIndex::NONE)
    }
}
