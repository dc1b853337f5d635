//! In-scope variable resolution.
//!
//! The resolver walks the preceding-sibling-or-ancestor axis from the start
//! node and asks each visited node which bindings it puts in scope. A
//! `return` clause sees the clauses written before it; a binding's own
//! defining expression sees the bindings before it but not the binding
//! itself.
//!
//! Emission is lazy per visited node: at most one node's bindings are
//! buffered, so `find` by name stops the walk at the first match.

use smallvec::SmallVec;
use tracing::{debug, trace};
use xqs_syntax::{NodeIndex, SyntaxKind, SyntaxTree};

use crate::state::{VisitationState, take};
use crate::walk::{ScopeWalk, Step, Visit, scope_walk};

/// A named variable binding visible at the start position.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct VariableBinding<'a> {
    pub node: NodeIndex,
    pub name: &'a str,
}

/// Iterator returned by [`in_scope_variables`].
pub struct InScopeVariables<'a, T: SyntaxTree + ?Sized> {
    tree: &'a T,
    walk: ScopeWalk<'a, T>,
    state: VisitationState,
    /// Bindings contributed by the most recently visited node.
    level: SmallVec<[NodeIndex; 8]>,
    cursor: usize,
    finished: bool,
}

/// Variable bindings in scope at `start`, nearest first.
///
/// When two bindings share a name the first one yielded shadows the other.
/// Bindings without a name (error recovery) are never yielded.
pub fn in_scope_variables<T: SyntaxTree + ?Sized>(
    tree: &T,
    start: NodeIndex,
) -> InScopeVariables<'_, T> {
    debug!(start = start.0, "resolving in-scope variables");
    InScopeVariables {
        tree,
        walk: scope_walk(tree, start),
        state: VisitationState::new(),
        level: SmallVec::new(),
        cursor: 0,
        finished: false,
    }
}

impl<'a, T: SyntaxTree + ?Sized> Iterator for InScopeVariables<'a, T> {
    type Item = VariableBinding<'a>;

    fn next(&mut self) -> Option<VariableBinding<'a>> {
        let tree = self.tree;
        loop {
            while let Some(&node) = self.level.get(self.cursor) {
                self.cursor += 1;
                match tree.variable_name(node) {
                    Some(name) => return Some(VariableBinding { node, name }),
                    None => trace!(node = node.0, "skipping binding without a name"),
                }
            }

            if self.finished {
                return None;
            }
            let Some(visit) = self.walk.next() else {
                self.finished = true;
                return None;
            };
            self.level.clear();
            self.cursor = 0;
            self.visit(visit);
        }
    }
}

impl<T: SyntaxTree + ?Sized> std::iter::FusedIterator for InScopeVariables<'_, T> {}

impl<T: SyntaxTree + ?Sized> InScopeVariables<'_, T> {
    fn visit(&mut self, visit: Visit) {
        let tree = self.tree;
        let node = visit.node;
        let Some(kind) = tree.kind(node) else {
            return;
        };
        if visit.step == Step::Parent {
            self.state.enter_from_child(tree, node, kind, visit.from);
        }

        match kind {
            SyntaxKind::Prolog => {
                // Module-level variables are the outermost scope.
                self.finished = true;
                self.prolog(node);
            }
            SyntaxKind::ForClause | SyntaxKind::LetClause => self.flwor_clause(node),
            SyntaxKind::ForBinding | SyntaxKind::LetBinding | SyntaxKind::GroupingSpec => {
                self.state.flwor_binding_visited = true;
                self.flwor_binding(node);
            }
            SyntaxKind::SlidingWindowClause | SyntaxKind::TumblingWindowClause => {
                self.window_clause(node, visit.from)
            }
            SyntaxKind::GroupByClause => self.group_by_clause(node),
            SyntaxKind::CountClause => self.count_clause(node),
            SyntaxKind::IntermediateClause => self.intermediate_clause(node),
            SyntaxKind::QuantifiedBinding => {
                if !self.state.take_self_reference(node) {
                    self.level.push(node);
                }
            }
            SyntaxKind::CaseClause | SyntaxKind::DefaultCaseClause => {
                // Only the branch containing the start sees its variable.
                if !self.state.typeswitch_resolved {
                    self.state.typeswitch_resolved = true;
                    self.level.push(node);
                }
            }
            SyntaxKind::TypeswitchExpr => self.state.typeswitch_resolved = false,
            SyntaxKind::ParamList => self.push_children_of_kind(node, SyntaxKind::Param),
            SyntaxKind::BlockVarDeclEntry => {
                self.state.block_entry_visited = true;
                if !self.state.take_self_reference(node) {
                    self.level.push(node);
                }
            }
            SyntaxKind::BlockVarDecl => self.block_var_decl(node),
            SyntaxKind::BlockDecls => self.block_decls(node),

            SyntaxKind::Module
            | SyntaxKind::MainModule
            | SyntaxKind::LibraryModule
            | SyntaxKind::ModuleDecl
            | SyntaxKind::NamespaceDecl
            | SyntaxKind::DefaultNamespaceDecl
            | SyntaxKind::ModuleImport
            | SyntaxKind::VarDecl
            | SyntaxKind::FunctionDecl
            | SyntaxKind::InlineFunctionExpr
            | SyntaxKind::Param
            | SyntaxKind::FunctionBody
            | SyntaxKind::QueryBody
            | SyntaxKind::FlworExpr
            | SyntaxKind::PositionalVar
            | SyntaxKind::WhereClause
            | SyntaxKind::OrderByClause
            | SyntaxKind::GroupingSpecList
            | SyntaxKind::WindowStartCondition
            | SyntaxKind::WindowEndCondition
            | SyntaxKind::CurrentItem
            | SyntaxKind::PreviousItem
            | SyntaxKind::NextItem
            | SyntaxKind::ReturnClause
            | SyntaxKind::QuantifiedExpr
            | SyntaxKind::Block
            | SyntaxKind::BlockBody
            | SyntaxKind::DirElemConstructor
            | SyntaxKind::DirAttributeList
            | SyntaxKind::DirAttribute
            | SyntaxKind::DirNamespaceAttribute
            | SyntaxKind::DirElemContent
            | SyntaxKind::StaticNamespace
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
                step = ?visit.step,
                bindings = self.level.len(),
                "bindings in scope"
            );
        }
    }

    /// Direct children of `node` with the given kind, last written first.
    fn push_children_of_kind(&mut self, node: NodeIndex, kind: SyntaxKind) {
        let tree = self.tree;
        self.level.extend(
            tree.children(node)
                .iter()
                .rev()
                .copied()
                .filter(|&child| tree.is_kind(child, kind)),
        );
    }

    fn prolog(&mut self, prolog: NodeIndex) {
        let tree = self.tree;
        for &decl in tree.children(prolog).iter().rev() {
            if tree.is_kind(decl, SyntaxKind::VarDecl) && !self.state.take_self_reference(decl) {
                self.level.push(decl);
            }
        }
    }

    fn flwor_clause(&mut self, clause: NodeIndex) {
        let chained = take(&mut self.state.chained_clause_handled);
        let walked = take(&mut self.state.flwor_binding_visited);
        if chained || walked {
            return;
        }
        let tree = self.tree;
        for &child in tree.children(clause).iter().rev() {
            if matches!(
                tree.kind(child),
                Some(SyntaxKind::ForBinding | SyntaxKind::LetBinding)
            ) {
                self.flwor_binding(child);
            }
        }
    }

    fn flwor_binding(&mut self, binding: NodeIndex) {
        if self.state.take_self_reference(binding) {
            return;
        }
        self.level.push(binding);
        let positional = self
            .tree
            .child_of_kind(binding, SyntaxKind::PositionalVar);
        if positional.is_some() {
            self.level.push(positional);
        }
    }

    /// `from` is the child the walk came up from, if any.
    fn window_clause(&mut self, clause: NodeIndex, from: NodeIndex) {
        if take(&mut self.state.chained_clause_handled) {
            return;
        }
        if !self.state.take_self_reference(clause) {
            self.level.push(clause);
        }
        if take(&mut self.state.window_conditions_resolved) {
            return;
        }
        let tree = self.tree;
        // The start condition cannot see the end condition's variables.
        let conditions: &[SyntaxKind] = if tree.is_kind(from, SyntaxKind::WindowStartCondition) {
            &[SyntaxKind::WindowStartCondition]
        } else {
            &[
                SyntaxKind::WindowStartCondition,
                SyntaxKind::WindowEndCondition,
            ]
        };
        for &condition_kind in conditions {
            let condition = tree.child_of_kind(clause, condition_kind);
            self.level.extend(
                tree.children(condition)
                    .iter()
                    .copied()
                    .filter(|&var| tree.kind(var).is_some_and(SyntaxKind::is_window_var)),
            );
        }
    }

    fn group_by_clause(&mut self, clause: NodeIndex) {
        let chained = take(&mut self.state.chained_clause_handled);
        let walked = take(&mut self.state.flwor_binding_visited);
        if chained || walked {
            return;
        }
        let tree = self.tree;
        let specs = tree.child_of_kind(clause, SyntaxKind::GroupingSpecList);
        for &spec in tree.children(specs).iter().rev() {
            if tree.is_kind(spec, SyntaxKind::GroupingSpec) {
                self.flwor_binding(spec);
            }
        }
    }

    fn count_clause(&mut self, clause: NodeIndex) {
        if !take(&mut self.state.chained_clause_handled) {
            self.level.push(clause);
        }
    }

    fn intermediate_clause(&mut self, intermediate: NodeIndex) {
        let tree = self.tree;
        let wrapped = tree
            .children(intermediate)
            .iter()
            .copied()
            .find(|&child| tree.kind(child).is_some_and(SyntaxKind::is_flwor_clause));
        if let Some(clause) = wrapped {
            match tree.kind(clause) {
                Some(SyntaxKind::ForClause | SyntaxKind::LetClause) => self.flwor_clause(clause),
                Some(SyntaxKind::SlidingWindowClause | SyntaxKind::TumblingWindowClause) => {
                    self.window_clause(clause, NodeIndex::NONE)
                }
                Some(SyntaxKind::GroupByClause) => self.group_by_clause(clause),
                Some(SyntaxKind::CountClause) => self.count_clause(clause),
                _ => {}
            }
        }
        // where/order-by wrappers never consume the flag.
        self.state.chained_clause_handled = false;
    }

    fn block_var_decl(&mut self, decl: NodeIndex) {
        let entries_walked = take(&mut self.state.block_entry_visited);
        self.state.block_declaration_visited = true;
        if entries_walked {
            return;
        }
        let tree = self.tree;
        for &entry in tree.children(decl).iter().rev() {
            if tree.is_kind(entry, SyntaxKind::BlockVarDeclEntry)
                && !self.state.take_self_reference(entry)
            {
                self.level.push(entry);
            }
        }
    }

    fn block_decls(&mut self, decls: NodeIndex) {
        if take(&mut self.state.block_declaration_visited) {
            return;
        }
        let tree = self.tree;
        for &decl in tree.children(decls).iter().rev() {
            if tree.is_kind(decl, SyntaxKind::BlockVarDecl) {
                self.push_children_of_kind(decl, SyntaxKind::BlockVarDeclEntry);
            }
        }
    }
}
