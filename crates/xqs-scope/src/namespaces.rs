//! In-scope namespace resolution.
//!
//! Namespace declarations are visible throughout their containing construct,
//! themselves included, so unlike variable resolution there is no
//! self-reference handling. The same declaration can be reached more than
//! once (as a preceding sibling and again through its prolog); only the
//! first sighting is yielded.

use rustc_hash::FxHashSet;
use smallvec::SmallVec;
use tracing::{debug, trace};
use xqs_syntax::{NodeIndex, SyntaxKind, SyntaxTree};

use crate::walk::{ScopeWalk, Step, Visit, scope_walk};

/// A namespace prefix binding visible at the start position.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NamespaceDeclaration<'a> {
    pub node: NodeIndex,
    pub prefix: &'a str,
    pub uri: &'a str,
}

/// Iterator returned by [`in_scope_namespaces`].
pub struct InScopeNamespaces<'a, T: SyntaxTree + ?Sized> {
    tree: &'a T,
    walk: ScopeWalk<'a, T>,
    seen: FxHashSet<NodeIndex>,
    level: SmallVec<[NodeIndex; 8]>,
    cursor: usize,
}

/// Namespace declarations in scope at `start`, nearest first.
///
/// Declarations missing a prefix or a URI are never yielded.
pub fn in_scope_namespaces<T: SyntaxTree + ?Sized>(
    tree: &T,
    start: NodeIndex,
) -> InScopeNamespaces<'_, T> {
    debug!(start = start.0, "resolving in-scope namespaces");
    InScopeNamespaces {
        tree,
        walk: scope_walk(tree, start),
        seen: FxHashSet::default(),
        level: SmallVec::new(),
        cursor: 0,
    }
}

impl<'a, T: SyntaxTree + ?Sized> Iterator for InScopeNamespaces<'a, T> {
    type Item = NamespaceDeclaration<'a>;

    fn next(&mut self) -> Option<NamespaceDeclaration<'a>> {
        let tree = self.tree;
        loop {
            while let Some(&node) = self.level.get(self.cursor) {
                self.cursor += 1;
                if !self.seen.insert(node) {
                    continue;
                }
                match (tree.namespace_prefix(node), tree.namespace_uri(node)) {
                    (Some(prefix), Some(uri)) => {
                        return Some(NamespaceDeclaration { node, prefix, uri });
                    }
                    _ => trace!(node = node.0, "skipping incomplete namespace declaration"),
                }
            }

            let visit = self.walk.next()?;
            self.level.clear();
            self.cursor = 0;
            self.visit(visit);
        }
    }
}

impl<T: SyntaxTree + ?Sized> std::iter::FusedIterator for InScopeNamespaces<'_, T> {}

impl<T: SyntaxTree + ?Sized> InScopeNamespaces<'_, T> {
    fn visit(&mut self, visit: Visit) {
        let tree = self.tree;
        let node = visit.node;
        let Some(kind) = tree.kind(node) else {
            return;
        };

        match kind {
            SyntaxKind::ModuleDecl
            | SyntaxKind::NamespaceDecl
            | SyntaxKind::DefaultNamespaceDecl
            | SyntaxKind::ModuleImport
            | SyntaxKind::DirNamespaceAttribute
            | SyntaxKind::StaticNamespace => self.level.push(node),
            // An element's namespaces cover its own attributes and content,
            // never the expressions written after it.
            SyntaxKind::DirElemConstructor if visit.step == Step::Parent => {
                // Attributes apply in the order they were written.
                let attributes = tree.child_of_kind(node, SyntaxKind::DirAttributeList);
                self.level.extend(
                    tree.children(attributes)
                        .iter()
                        .copied()
                        .filter(|&attr| tree.is_kind(attr, SyntaxKind::DirNamespaceAttribute)),
                );
            }
            SyntaxKind::Prolog => {
                // Later prolog declarations shadow earlier ones.
                self.level.extend(
                    tree.children(node)
                        .iter()
                        .rev()
                        .copied()
                        .filter(|&decl| {
                            tree.kind(decl)
                                .is_some_and(SyntaxKind::is_namespace_declaration)
                        }),
                );
            }
            SyntaxKind::Module => {
                self.level
                    .extend(tree.static_context(node).iter().rev().copied());
            }

            SyntaxKind::DirElemConstructor
            | SyntaxKind::MainModule
            | SyntaxKind::LibraryModule
            | SyntaxKind::VarDecl
            | SyntaxKind::FunctionDecl
            | SyntaxKind::InlineFunctionExpr
            | SyntaxKind::ParamList
            | SyntaxKind::Param
            | SyntaxKind::FunctionBody
            | SyntaxKind::QueryBody
            | SyntaxKind::FlworExpr
            | SyntaxKind::ForClause
            | SyntaxKind::ForBinding
            | SyntaxKind::PositionalVar
            | SyntaxKind::LetClause
            | SyntaxKind::LetBinding
            | SyntaxKind::IntermediateClause
            | SyntaxKind::CountClause
            | SyntaxKind::WhereClause
            | SyntaxKind::OrderByClause
            | SyntaxKind::GroupByClause
            | SyntaxKind::GroupingSpecList
            | SyntaxKind::GroupingSpec
            | SyntaxKind::SlidingWindowClause
            | SyntaxKind::TumblingWindowClause
            | SyntaxKind::WindowStartCondition
            | SyntaxKind::WindowEndCondition
            | SyntaxKind::CurrentItem
            | SyntaxKind::PreviousItem
            | SyntaxKind::NextItem
            | SyntaxKind::ReturnClause
            | SyntaxKind::QuantifiedExpr
            | SyntaxKind::QuantifiedBinding
            | SyntaxKind::TypeswitchExpr
            | SyntaxKind::CaseClause
            | SyntaxKind::DefaultCaseClause
            | SyntaxKind::Block
            | SyntaxKind::BlockDecls
            | SyntaxKind::BlockVarDecl
            | SyntaxKind::BlockVarDeclEntry
            | SyntaxKind::BlockBody
            | SyntaxKind::DirAttributeList
            | SyntaxKind::DirAttribute
            | SyntaxKind::DirElemContent
            | SyntaxKind::Expr
            | SyntaxKind::VarRef
            | SyntaxKind::FunctionCall
            | SyntaxKind::Other
            | SyntaxKind::Error => {}
        }

        if !self.level.is_empty() {
            trace!(
                node = node.0,
                ?kind,
                declarations = self.level.len(),
                "namespaces in scope"
            );
        }
    }
}
