//! Syntax node model for the xqs scope resolver.
//!
//! This crate provides the tree the resolvers walk:
//! - `SyntaxKind` - closed set of grammar productions
//! - `NodeIndex` - `Copy` node handles
//! - `SyntaxTree` - the capability interface (kind, parent, children,
//!   siblings, binding names, namespace payloads)
//! - `NodeArena` / `TreeBuilder` - arena storage and construction
//! - `StaticContext` - predefined namespace bindings
//! - `TreeDocument` - JSON tree documents for tools and fixtures

pub mod base;
pub use base::NodeIndex;

pub mod syntax_kind;
pub use syntax_kind::SyntaxKind;

pub mod access;
pub use access::SyntaxTree;

pub mod node;
pub use node::{Node, NodeArena, NodeData};

pub mod builder;
pub use builder::TreeBuilder;

pub mod static_context;
pub use static_context::{StaticBinding, StaticContext};

pub mod error;
pub use error::TreeError;

pub mod document;
pub use document::{LoadedTree, NodeSpec, StaticContextSpec, TreeDocument};

#[cfg(test)]
#[path = "../tests/arena_tests.rs"]
mod arena_tests;

#[cfg(test)]
#[path = "../tests/document_tests.rs"]
mod document_tests;
