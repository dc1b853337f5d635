//! Static scope resolution for XQuery syntax trees.
//!
//! Two independent resolvers answer "what is visible here?" for any node of
//! a tree exposed through [`xqs_syntax::SyntaxTree`]:
//! - [`in_scope_variables`] - variable bindings (FLWOR clauses, quantified
//!   expressions, typeswitch branches, parameters, block declarations and
//!   module variables), nearest first
//! - [`in_scope_namespaces`] - namespace prefix bindings (prolog
//!   declarations, direct element constructors, the static context)
//!
//! Both are pure, lazy iterators over an immutable tree. Each call owns its
//! traversal state, so calls can run concurrently over a shared tree.

mod state;
pub mod walk;
pub use walk::{Ancestors, ScopeWalk, Step, Visit, ancestors, scope_walk};

pub mod variables;
pub use variables::{InScopeVariables, VariableBinding, in_scope_variables};

pub mod namespaces;
pub use namespaces::{InScopeNamespaces, NamespaceDeclaration, in_scope_namespaces};

use xqs_syntax::{NodeIndex, SyntaxTree};

/// The binding a reference to `$name` at `start` resolves to.
pub fn resolve_variable<'a, T: SyntaxTree + ?Sized>(
    tree: &'a T,
    start: NodeIndex,
    name: &str,
) -> Option<VariableBinding<'a>> {
    in_scope_variables(tree, start).find(|binding| binding.name == name)
}

/// The declaration a `prefix:` at `start` resolves to.
pub fn resolve_prefix<'a, T: SyntaxTree + ?Sized>(
    tree: &'a T,
    start: NodeIndex,
    prefix: &str,
) -> Option<NamespaceDeclaration<'a>> {
    in_scope_namespaces(tree, start).find(|decl| decl.prefix == prefix)
}

#[cfg(test)]
#[path = "../tests/walk_tests.rs"]
mod walk_tests;

#[cfg(test)]
#[path = "../tests/variables_tests.rs"]
mod variables_tests;

#[cfg(test)]
#[path = "../tests/namespaces_tests.rs"]
mod namespaces_tests;

#[cfg(test)]
#[path = "../tests/state_tests.rs"]
mod state_tests;
