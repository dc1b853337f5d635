//! Grammar productions the scope resolvers distinguish.
//!
//! The set is closed: resolvers match on it exhaustively (through the
//! predicates below or directly), so adding a clause kind surfaces every
//! dispatch site that has to learn about it.

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u16)]
pub enum SyntaxKind {
    // Module structure
    Module,
    MainModule,
    LibraryModule,
    ModuleDecl,
    Prolog,
    NamespaceDecl,
    DefaultNamespaceDecl,
    ModuleImport,
    VarDecl,
    FunctionDecl,
    InlineFunctionExpr,
    ParamList,
    Param,
    FunctionBody,
    QueryBody,

    // FLWOR
    FlworExpr,
    ForClause,
    ForBinding,
    PositionalVar,
    LetClause,
    LetBinding,
    IntermediateClause,
    CountClause,
    WhereClause,
    OrderByClause,
    GroupByClause,
    GroupingSpecList,
    GroupingSpec,
    SlidingWindowClause,
    TumblingWindowClause,
    WindowStartCondition,
    WindowEndCondition,
    CurrentItem,
    PreviousItem,
    NextItem,
    ReturnClause,

    // Quantified expressions
    QuantifiedExpr,
    QuantifiedBinding,

    // Typeswitch
    TypeswitchExpr,
    CaseClause,
    DefaultCaseClause,

    // Scripting blocks
    Block,
    BlockDecls,
    BlockVarDecl,
    BlockVarDeclEntry,
    BlockBody,

    // Direct constructors
    DirElemConstructor,
    DirAttributeList,
    DirAttribute,
    DirNamespaceAttribute,
    DirElemContent,

    /// Predefined namespace binding from the static context. Never part of
    /// the parsed tree; attached to the module root instead.
    StaticNamespace,

    // Generic nodes
    Expr,
    VarRef,
    FunctionCall,
    Other,
    Error,
}

impl SyntaxKind {
    /// Nodes that carry the variable-binding capability (a possibly absent
    /// variable name).
    pub const fn is_variable_binding(self) -> bool {
        matches!(
            self,
            SyntaxKind::VarDecl
                | SyntaxKind::Param
                | SyntaxKind::ForBinding
                | SyntaxKind::PositionalVar
                | SyntaxKind::LetBinding
                | SyntaxKind::CountClause
                | SyntaxKind::GroupingSpec
                | SyntaxKind::SlidingWindowClause
                | SyntaxKind::TumblingWindowClause
                | SyntaxKind::CurrentItem
                | SyntaxKind::PreviousItem
                | SyntaxKind::NextItem
                | SyntaxKind::QuantifiedBinding
                | SyntaxKind::CaseClause
                | SyntaxKind::DefaultCaseClause
                | SyntaxKind::BlockVarDeclEntry
        )
    }

    /// Nodes that carry the namespace-declaration capability (possibly
    /// absent prefix and URI).
    pub const fn is_namespace_declaration(self) -> bool {
        matches!(
            self,
            SyntaxKind::ModuleDecl
                | SyntaxKind::NamespaceDecl
                | SyntaxKind::DefaultNamespaceDecl
                | SyntaxKind::ModuleImport
                | SyntaxKind::DirNamespaceAttribute
                | SyntaxKind::StaticNamespace
        )
    }

    /// FLWOR clauses that introduce variables and can therefore appear
    /// under an `IntermediateClause`.
    pub const fn is_binding_clause(self) -> bool {
        matches!(
            self,
            SyntaxKind::ForClause
                | SyntaxKind::LetClause
                | SyntaxKind::CountClause
                | SyntaxKind::GroupByClause
                | SyntaxKind::SlidingWindowClause
                | SyntaxKind::TumblingWindowClause
        )
    }

    /// Any FLWOR clause, binding or not.
    pub const fn is_flwor_clause(self) -> bool {
        self.is_binding_clause()
            || matches!(
                self,
                SyntaxKind::WhereClause | SyntaxKind::OrderByClause | SyntaxKind::ReturnClause
            )
    }

    pub const fn is_window_clause(self) -> bool {
        matches!(
            self,
            SyntaxKind::SlidingWindowClause | SyntaxKind::TumblingWindowClause
        )
    }

    /// Variables declared by a window start or end condition.
    pub const fn is_window_var(self) -> bool {
        matches!(
            self,
            SyntaxKind::CurrentItem
                | SyntaxKind::PositionalVar
                | SyntaxKind::PreviousItem
                | SyntaxKind::NextItem
        )
    }

    /// Bindings whose children form their own defining expression. A
    /// position under one of these must not see the binding itself.
    pub const fn is_binding_bearing(self) -> bool {
        matches!(
            self,
            SyntaxKind::ForBinding
                | SyntaxKind::LetBinding
                | SyntaxKind::GroupingSpec
                | SyntaxKind::QuantifiedBinding
                | SyntaxKind::SlidingWindowClause
                | SyntaxKind::TumblingWindowClause
                | SyntaxKind::BlockVarDeclEntry
        )
    }
}
