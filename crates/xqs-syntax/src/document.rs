//! JSON tree documents.
//!
//! A document describes a tree the way an external parser would hand it
//! over: a recursive node list with kinds, binding names and namespace
//! payloads. Nodes can carry a `label` so tools can address a position
//! without knowing arena indices.
//!
//! ```json
//! {
//!   "static_context": "xquery",
//!   "root": {
//!     "kind": "Module",
//!     "children": [
//!       { "kind": "ForClause", "children": [
//!         { "kind": "ForBinding", "name": "x", "children": [{ "kind": "Expr" }] }
//!       ]},
//!       { "kind": "ReturnClause", "children": [{ "kind": "Expr", "label": "ret" }] }
//!     ]
//!   }
//! }
//! ```

use std::path::Path;

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::base::NodeIndex;
use crate::builder::TreeBuilder;
use crate::error::TreeError;
use crate::node::{NodeArena, NodeData};
use crate::static_context::{StaticBinding, StaticContext};
use crate::syntax_kind::SyntaxKind;

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StaticContextSpec {
    /// Name of a built-in preset.
    Preset(String),
    Explicit(Vec<StaticBinding>),
}

impl StaticContextSpec {
    pub fn to_context(&self) -> Result<StaticContext, TreeError> {
        match self {
            StaticContextSpec::Preset(name) => StaticContext::preset(name)
                .ok_or_else(|| TreeError::InvalidStaticContext(name.clone())),
            StaticContextSpec::Explicit(bindings) => Ok(StaticContext::from(bindings.clone())),
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct NodeSpec {
    pub kind: SyntaxKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prefix: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uri: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<NodeSpec>,
}

impl NodeSpec {
    /// Payload for the node's capability; fields that do not apply to the
    /// kind are ignored.
    fn take_data(&mut self) -> NodeData {
        if self.kind.is_variable_binding() {
            NodeData::Variable {
                name: self.name.take(),
            }
        } else if self.kind.is_namespace_declaration() {
            NodeData::Namespace {
                prefix: self.prefix.take(),
                uri: self.uri.take(),
            }
        } else {
            NodeData::None
        }
    }

    fn take_children(&mut self) -> Vec<NodeSpec> {
        std::mem::take(&mut self.children)
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TreeDocument {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub static_context: Option<StaticContextSpec>,
    pub root: NodeSpec,
}

/// A loaded tree plus its label table.
#[derive(Debug)]
pub struct LoadedTree {
    pub arena: NodeArena,
    pub labels: FxHashMap<String, NodeIndex>,
}

impl LoadedTree {
    pub fn node(&self, label: &str) -> Result<NodeIndex, TreeError> {
        self.labels
            .get(label)
            .copied()
            .ok_or_else(|| TreeError::UnknownLabel(label.to_string()))
    }

    /// Labels ordered by the node they address (document order).
    pub fn sorted_labels(&self) -> Vec<(&str, NodeIndex)> {
        let mut labels: Vec<_> = self
            .labels
            .iter()
            .map(|(label, &node)| (label.as_str(), node))
            .collect();
        labels.sort_by_key(|&(_, node)| node);
        labels
    }
}

impl TreeDocument {
    pub fn from_json(text: &str) -> Result<TreeDocument, TreeError> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn from_path(path: &Path) -> Result<TreeDocument, TreeError> {
        let text = std::fs::read_to_string(path).map_err(|source| TreeError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        TreeDocument::from_json(&text)
    }

    /// Build the arena. Nodes are numbered in document order, root first.
    pub fn load(self) -> Result<LoadedTree, TreeError> {
        let TreeDocument {
            static_context,
            mut root,
        } = self;
        if root.kind == SyntaxKind::StaticNamespace {
            return Err(TreeError::DetachedKind(root.kind));
        }

        let mut builder = TreeBuilder::new(root.kind);
        let mut labels = FxHashMap::default();
        let root_node = builder.root();
        register(&mut builder, &mut labels, root_node, &mut root)?;

        // Each stack entry holds the not-yet-attached children of `parent`
        // in reverse source order, so `pop` yields the next one to attach.
        let mut stack = vec![(reversed(root.take_children()), root_node)];
        while let Some((mut pending, parent)) = stack.pop() {
            let Some(mut spec) = pending.pop() else {
                continue;
            };
            if spec.kind == SyntaxKind::StaticNamespace {
                return Err(TreeError::DetachedKind(spec.kind));
            }
            let node = builder.push(parent, spec.kind);
            register(&mut builder, &mut labels, node, &mut spec)?;
            let children = spec.take_children();
            stack.push((pending, parent));
            if !children.is_empty() {
                stack.push((reversed(children), node));
            }
        }

        // Detached static-context nodes go after the tree so tree nodes
        // keep document-order numbering.
        if let Some(spec) = &static_context {
            builder.set_static_context(&spec.to_context()?);
        }

        let arena = builder.finish();
        debug!(
            nodes = arena.len(),
            labels = labels.len(),
            "loaded tree document"
        );
        Ok(LoadedTree { arena, labels })
    }
}

fn reversed(mut specs: Vec<NodeSpec>) -> Vec<NodeSpec> {
    specs.reverse();
    specs
}

fn register(
    builder: &mut TreeBuilder,
    labels: &mut FxHashMap<String, NodeIndex>,
    node: NodeIndex,
    spec: &mut NodeSpec,
) -> Result<(), TreeError> {
    builder.set_data(node, spec.take_data());
    if let Some(label) = spec.label.take() {
        if labels.contains_key(&label) {
            return Err(TreeError::DuplicateLabel(label));
        }
        labels.insert(label, node);
    }
    Ok(())
}
