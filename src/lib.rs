//! xqs: static scope resolution for XQuery syntax trees.
//!
//! This crate ties the workspace together:
//! - [`xqs_syntax`] - the node model, arena, builder and JSON tree documents
//! - [`xqs_scope`] - in-scope variable and namespace resolution
//! - `tracing_config` - opt-in logging for the `xqs` binary
//! - `cli` - argument parsing, driver and rendering for the `xqs` binary

pub use xqs_scope::{
    InScopeNamespaces, InScopeVariables, NamespaceDeclaration, VariableBinding,
    in_scope_namespaces, in_scope_variables, resolve_prefix, resolve_variable,
};
pub use xqs_syntax::{
    LoadedTree, NodeArena, NodeIndex, StaticContext, SyntaxKind, SyntaxTree, TreeBuilder,
    TreeDocument, TreeError,
};

pub mod tracing_config;

#[cfg(feature = "cli")]
pub mod cli;
