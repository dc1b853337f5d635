//! Per-call suppression flags for in-scope variable resolution.
//!
//! Every flag has exactly one setter and one consumer. A flag left set by
//! the wrong rule shows up as a missing or duplicated binding, so each
//! pairing is listed on the field.

use xqs_syntax::{NodeIndex, SyntaxKind, SyntaxTree};

#[derive(Debug, Default)]
pub(crate) struct VisitationState {
    /// Binding whose own defining expression contains the start position.
    ///
    /// Set: `enter_from_child`, when the walk steps up into a binding-bearing
    /// node (for a window clause, only from its source expression), or into
    /// a prolog from one of its variable declarations.
    /// Consumed: the binding rule of that node (or of the prolog).
    pub(crate) self_reference: Option<NodeIndex>,

    /// The walk already passed a for/let binding or grouping spec of the
    /// clause above it, so that clause must not rescan its bindings.
    ///
    /// Set: the for/let/grouping-spec rule.
    /// Consumed: the next for/let clause or group-by clause rule.
    pub(crate) flwor_binding_visited: bool,

    /// The start position lies inside the clause an intermediate clause
    /// wraps; that clause was already walked from inside.
    ///
    /// Set: `enter_from_child`, stepping up into an `IntermediateClause`.
    /// Consumed: the wrapped clause's rule when the intermediate clause
    /// delegates to it (or the intermediate rule itself when the wrapped
    /// clause binds nothing).
    pub(crate) chained_clause_handled: bool,

    /// The start position lies in a window clause's source expression, so
    /// the start/end condition variables are not yet in scope.
    ///
    /// Set: `enter_from_child`, stepping up into a window clause from any
    /// child other than its conditions.
    /// Consumed: the window clause rule.
    pub(crate) window_conditions_resolved: bool,

    /// One case/default clause of the innermost typeswitch has been yielded.
    ///
    /// Set: the case/default clause rule.
    /// Consumed: cleared by the enclosing `TypeswitchExpr`.
    pub(crate) typeswitch_resolved: bool,

    /// The walk passed an entry of the block declaration above it.
    ///
    /// Set: the block entry rule.
    /// Consumed: the `BlockVarDecl` rule.
    pub(crate) block_entry_visited: bool,

    /// The walk passed a declaration group of the declaration list above it.
    ///
    /// Set: the `BlockVarDecl` rule.
    /// Consumed: the `BlockDecls` rule.
    pub(crate) block_declaration_visited: bool,
}

impl VisitationState {
    pub(crate) fn new() -> VisitationState {
        VisitationState::default()
    }

    /// Record what stepping from `child` up into `node` means for scoping.
    pub(crate) fn enter_from_child<T: SyntaxTree + ?Sized>(
        &mut self,
        tree: &T,
        node: NodeIndex,
        kind: SyntaxKind,
        child: NodeIndex,
    ) {
        match kind {
            SyntaxKind::SlidingWindowClause | SyntaxKind::TumblingWindowClause => {
                let from_condition = matches!(
                    tree.kind(child),
                    Some(SyntaxKind::WindowStartCondition | SyntaxKind::WindowEndCondition)
                );
                if !from_condition {
                    self.self_reference = Some(node);
                    self.window_conditions_resolved = true;
                }
            }
            SyntaxKind::IntermediateClause => {
                self.chained_clause_handled = true;
            }
            SyntaxKind::Prolog => {
                if tree.is_kind(child, SyntaxKind::VarDecl) {
                    self.self_reference = Some(child);
                }
            }
            _ if kind.is_binding_bearing() => {
                self.self_reference = Some(node);
            }
            _ => {}
        }
    }

    /// Consume the self-reference marker if it names `node`.
    pub(crate) fn take_self_reference(&mut self, node: NodeIndex) -> bool {
        if self.self_reference == Some(node) {
            self.self_reference = None;
            true
        } else {
            false
        }
    }
}

#[inline]
pub(crate) fn take(flag: &mut bool) -> bool {
    std::mem::take(flag)
}
