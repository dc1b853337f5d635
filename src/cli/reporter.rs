//! Rendering of resolution results for the command line.

use rustc_hash::FxHashMap;
use serde::Serialize;
use std::fmt::Write;

use xqs_scope::{NamespaceDeclaration, VariableBinding};
use xqs_syntax::{LoadedTree, NodeIndex, SyntaxKind, SyntaxTree};

use super::args::OutputFormat;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VariableEntry<'a> {
    pub name: &'a str,
    pub kind: SyntaxKind,
    pub node: NodeIndex,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<&'a str>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NamespaceEntry<'a> {
    pub prefix: &'a str,
    pub uri: &'a str,
    pub kind: SyntaxKind,
    pub node: NodeIndex,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<&'a str>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LabelEntry<'a> {
    pub label: &'a str,
    pub kind: SyntaxKind,
    pub node: NodeIndex,
}

/// Builds report entries for one loaded tree, naming nodes by their label
/// where they have one.
pub struct Reporter<'a> {
    tree: &'a LoadedTree,
    labels_by_node: FxHashMap<NodeIndex, &'a str>,
}

impl<'a> Reporter<'a> {
    pub fn new(tree: &'a LoadedTree) -> Self {
        let labels_by_node = tree
            .labels
            .iter()
            .map(|(label, &node)| (node, label.as_str()))
            .collect();
        Reporter {
            tree,
            labels_by_node,
        }
    }

    fn kind(&self, node: NodeIndex) -> SyntaxKind {
        self.tree.arena.kind(node).unwrap_or(SyntaxKind::Error)
    }

    fn label(&self, node: NodeIndex) -> Option<&'a str> {
        self.labels_by_node.get(&node).copied()
    }

    pub fn variable(&self, binding: VariableBinding<'a>) -> VariableEntry<'a> {
        VariableEntry {
            name: binding.name,
            kind: self.kind(binding.node),
            node: binding.node,
            label: self.label(binding.node),
        }
    }

    pub fn namespace(&self, decl: NamespaceDeclaration<'a>) -> NamespaceEntry<'a> {
        NamespaceEntry {
            prefix: decl.prefix,
            uri: decl.uri,
            kind: self.kind(decl.node),
            node: decl.node,
            label: self.label(decl.node),
        }
    }

    pub fn labels(&self) -> Vec<LabelEntry<'a>> {
        self.tree
            .sorted_labels()
            .into_iter()
            .map(|(label, node)| LabelEntry {
                label,
                kind: self.kind(node),
                node,
            })
            .collect()
    }
}

pub fn render_variables(
    entries: &[VariableEntry<'_>],
    format: OutputFormat,
) -> serde_json::Result<String> {
    match format {
        OutputFormat::Json => to_json(entries),
        OutputFormat::Text => {
            let width = entries
                .iter()
                .map(|e| e.name.len() + 1)
                .max()
                .unwrap_or(0);
            let mut out = String::new();
            for entry in entries {
                let name = format!("${}", entry.name);
                let _ = write!(out, "{name:<width$}  {:?} #{}", entry.kind, entry.node.0);
                push_label(&mut out, entry.label);
            }
            Ok(out)
        }
    }
}

pub fn render_namespaces(
    entries: &[NamespaceEntry<'_>],
    format: OutputFormat,
) -> serde_json::Result<String> {
    match format {
        OutputFormat::Json => to_json(entries),
        OutputFormat::Text => {
            let width = entries.iter().map(|e| e.prefix.len()).max().unwrap_or(0);
            let mut out = String::new();
            for entry in entries {
                let _ = write!(
                    out,
                    "{:<width$} = {}  {:?} #{}",
                    entry.prefix, entry.uri, entry.kind, entry.node.0
                );
                push_label(&mut out, entry.label);
            }
            Ok(out)
        }
    }
}

pub fn render_labels(
    entries: &[LabelEntry<'_>],
    format: OutputFormat,
) -> serde_json::Result<String> {
    match format {
        OutputFormat::Json => to_json(entries),
        OutputFormat::Text => {
            let width = entries.iter().map(|e| e.label.len()).max().unwrap_or(0);
            let mut out = String::new();
            for entry in entries {
                let _ = writeln!(
                    out,
                    "{:<width$}  {:?} #{}",
                    entry.label, entry.kind, entry.node.0
                );
            }
            Ok(out)
        }
    }
}

fn push_label(out: &mut String, label: Option<&str>) {
    if let Some(label) = label {
        let _ = write!(out, " ({label})");
    }
    out.push('\n');
}

fn to_json<T: Serialize + ?Sized>(value: &T) -> serde_json::Result<String> {
    let mut json = serde_json::to_string_pretty(value)?;
    json.push('\n');
    Ok(json)
}
