//! Tests for in-scope variable resolution.

use std::cell::Cell;

use crate::{in_scope_variables, resolve_variable};
use xqs_syntax::{NodeArena, NodeIndex, SyntaxKind, SyntaxTree, TreeBuilder};

fn names<T: SyntaxTree + ?Sized>(tree: &T, at: NodeIndex) -> Vec<&str> {
    in_scope_variables(tree, at).map(|b| b.name).collect()
}

/// `for $x in (1,2,3) return $x`
#[test]
fn test_for_clause_scenario() {
    let mut b = TreeBuilder::new(SyntaxKind::Module);
    let body = b.push(b.root(), SyntaxKind::QueryBody);
    let flwor = b.push(body, SyntaxKind::FlworExpr);
    let for_clause = b.push(flwor, SyntaxKind::ForClause);
    let x = b.push_binding(for_clause, SyntaxKind::ForBinding, "x");
    let source = b.push(x, SyntaxKind::Expr);
    let ret_clause = b.push(flwor, SyntaxKind::ReturnClause);
    let ret = b.push(ret_clause, SyntaxKind::Expr);
    let arena = b.finish();

    assert_eq!(names(&arena, ret), vec!["x"]);
    assert!(names(&arena, source).is_empty());
    assert_eq!(
        in_scope_variables(&arena, ret).next().map(|b| b.node),
        Some(x)
    );
}

/// `let $a := 1 let $b := $a return $b`
#[test]
fn test_chained_let_scenario() {
    let mut b = TreeBuilder::new(SyntaxKind::Module);
    let flwor = b.push(b.root(), SyntaxKind::FlworExpr);
    let let1 = b.push(flwor, SyntaxKind::LetClause);
    let a = b.push_binding(let1, SyntaxKind::LetBinding, "a");
    let a_init = b.push(a, SyntaxKind::Expr);
    let intermediate = b.push(flwor, SyntaxKind::IntermediateClause);
    let let2 = b.push(intermediate, SyntaxKind::LetClause);
    let b_binding = b.push_binding(let2, SyntaxKind::LetBinding, "b");
    let b_init = b.push(b_binding, SyntaxKind::Expr);
    let ret_clause = b.push(flwor, SyntaxKind::ReturnClause);
    let ret = b.push(ret_clause, SyntaxKind::Expr);
    let arena = b.finish();

    assert!(names(&arena, a_init).is_empty());
    assert_eq!(names(&arena, b_init), vec!["a"]);
    assert_eq!(names(&arena, ret), vec!["b", "a"]);
}

/// A reference nested below the initializer still does not see its own
/// binding.
#[test]
fn test_self_reference_suppressed_at_any_depth() {
    let mut b = TreeBuilder::new(SyntaxKind::FlworExpr);
    let flwor = b.root();
    let let1 = b.push(flwor, SyntaxKind::LetClause);
    let a = b.push_binding(let1, SyntaxKind::LetBinding, "a");
    let init = b.push(a, SyntaxKind::Expr);
    let call = b.push(init, SyntaxKind::FunctionCall);
    let arg = b.push(call, SyntaxKind::Expr);
    let var_ref = b.push(arg, SyntaxKind::VarRef);
    let arena = b.finish();

    assert!(names(&arena, var_ref).is_empty());
}

#[test]
fn test_multiple_bindings_in_one_clause() {
    // for $x in A, $y in B return ...
    let mut b = TreeBuilder::new(SyntaxKind::FlworExpr);
    let flwor = b.root();
    let clause = b.push(flwor, SyntaxKind::ForClause);
    let x = b.push_binding(clause, SyntaxKind::ForBinding, "x");
    let x_src = b.push(x, SyntaxKind::Expr);
    let y = b.push_binding(clause, SyntaxKind::ForBinding, "y");
    let y_src = b.push(y, SyntaxKind::Expr);
    let ret_clause = b.push(flwor, SyntaxKind::ReturnClause);
    let ret = b.push(ret_clause, SyntaxKind::Expr);
    let arena = b.finish();

    assert!(names(&arena, x_src).is_empty());
    assert_eq!(names(&arena, y_src), vec!["x"]);
    assert_eq!(names(&arena, ret), vec!["y", "x"]);
}

#[test]
fn test_positional_variable() {
    // for $x at $i in A return ...
    let mut b = TreeBuilder::new(SyntaxKind::FlworExpr);
    let flwor = b.root();
    let clause = b.push(flwor, SyntaxKind::ForClause);
    let x = b.push_binding(clause, SyntaxKind::ForBinding, "x");
    let i = b.push_binding(x, SyntaxKind::PositionalVar, "i");
    let source = b.push(x, SyntaxKind::Expr);
    let ret_clause = b.push(flwor, SyntaxKind::ReturnClause);
    let ret = b.push(ret_clause, SyntaxKind::Expr);
    let arena = b.finish();

    assert_eq!(names(&arena, ret), vec!["x", "i"]);
    assert!(names(&arena, source).is_empty());
    assert!(names(&arena, i).is_empty());
}

/// `declare variable $g := 1; declare function f() { $g }; ...`
#[test]
fn test_module_variable_from_function_body() {
    let mut b = TreeBuilder::new(SyntaxKind::Module);
    let main = b.push(b.root(), SyntaxKind::MainModule);
    let prolog = b.push(main, SyntaxKind::Prolog);
    let g = b.push_binding(prolog, SyntaxKind::VarDecl, "g");
    b.push(g, SyntaxKind::Expr);
    let func = b.push(prolog, SyntaxKind::FunctionDecl);
    b.push(func, SyntaxKind::ParamList);
    let func_body = b.push(func, SyntaxKind::FunctionBody);
    let in_func = b.push(func_body, SyntaxKind::Expr);
    let query = b.push(main, SyntaxKind::QueryBody);
    let in_query = b.push(query, SyntaxKind::Expr);
    let arena = b.finish();

    assert_eq!(names(&arena, in_func), vec!["g"]);
    assert_eq!(names(&arena, in_query), vec!["g"]);
}

#[test]
fn test_parameters_shadow_module_variables() {
    let mut b = TreeBuilder::new(SyntaxKind::Module);
    let prolog = b.push(b.root(), SyntaxKind::Prolog);
    let global = b.push_binding(prolog, SyntaxKind::VarDecl, "x");
    let func = b.push(prolog, SyntaxKind::FunctionDecl);
    let params = b.push(func, SyntaxKind::ParamList);
    let px = b.push_binding(params, SyntaxKind::Param, "x");
    b.push_binding(params, SyntaxKind::Param, "y");
    let func_body = b.push(func, SyntaxKind::FunctionBody);
    let start = b.push(func_body, SyntaxKind::VarRef);
    let arena = b.finish();

    assert_eq!(names(&arena, start), vec!["y", "x", "x"]);
    assert_eq!(resolve_variable(&arena, start, "x").map(|b| b.node), Some(px));
    assert_ne!(resolve_variable(&arena, start, "x").map(|b| b.node), Some(global));
}

#[test]
fn test_module_variables_are_the_outermost_scope() {
    // A prolog reached from inside stops the walk even if something odd
    // sits above it.
    let mut b = TreeBuilder::new(SyntaxKind::FlworExpr);
    let outer = b.root();
    let clause = b.push(outer, SyntaxKind::LetClause);
    b.push_binding(clause, SyntaxKind::LetBinding, "outer");
    let prolog = b.push(outer, SyntaxKind::Prolog);
    b.push_binding(prolog, SyntaxKind::VarDecl, "g");
    let func = b.push(prolog, SyntaxKind::FunctionDecl);
    let func_body = b.push(func, SyntaxKind::FunctionBody);
    let start = b.push(func_body, SyntaxKind::Expr);
    let arena = b.finish();

    assert_eq!(names(&arena, start), vec!["g"]);
}

/// `declare variable $g := $g; declare variable $h := $g; ...`
///
/// Every other prolog variable stays visible, later ones included.
#[test]
fn test_module_variable_not_visible_in_own_initializer() {
    let mut b = TreeBuilder::new(SyntaxKind::Module);
    let main = b.push(b.root(), SyntaxKind::MainModule);
    let prolog = b.push(main, SyntaxKind::Prolog);
    let g = b.push_binding(prolog, SyntaxKind::VarDecl, "g");
    let g_init = b.push(g, SyntaxKind::Expr);
    let g_ref = b.push(g_init, SyntaxKind::VarRef);
    let h = b.push_binding(prolog, SyntaxKind::VarDecl, "h");
    let h_init = b.push(h, SyntaxKind::Expr);
    let query = b.push(main, SyntaxKind::QueryBody);
    let in_query = b.push(query, SyntaxKind::Expr);
    let arena = b.finish();

    assert_eq!(names(&arena, g_init), vec!["h"]);
    assert_eq!(names(&arena, g_ref), vec!["h"]);
    assert_eq!(resolve_variable(&arena, g_ref, "g"), None);
    assert_eq!(names(&arena, h_init), vec!["g"]);
    assert_eq!(names(&arena, in_query), vec!["h", "g"]);
}

#[test]
fn test_inline_function_parameters() {
    // let $f := function($p) { $p } return $f
    let mut b = TreeBuilder::new(SyntaxKind::FlworExpr);
    let flwor = b.root();
    let clause = b.push(flwor, SyntaxKind::LetClause);
    let f = b.push_binding(clause, SyntaxKind::LetBinding, "f");
    let init = b.push(f, SyntaxKind::Expr);
    let inline = b.push(init, SyntaxKind::InlineFunctionExpr);
    let params = b.push(inline, SyntaxKind::ParamList);
    b.push_binding(params, SyntaxKind::Param, "p");
    let func_body = b.push(inline, SyntaxKind::FunctionBody);
    let in_body = b.push(func_body, SyntaxKind::VarRef);
    let ret_clause = b.push(flwor, SyntaxKind::ReturnClause);
    let ret = b.push(ret_clause, SyntaxKind::Expr);
    let arena = b.finish();

    assert_eq!(names(&arena, in_body), vec!["p"]);
    assert_eq!(names(&arena, ret), vec!["f"]);
}

struct WindowFixture {
    arena: NodeArena,
    source: NodeIndex,
    start_when: NodeIndex,
    end_when: NodeIndex,
    ret: NodeIndex,
}

/// ```text
/// for sliding window $w in SOURCE
///     start $s at $spos when START_WHEN
///     end $e next $enext when END_WHEN
/// return RET
/// ```
fn window_fixture(wrapped: bool) -> WindowFixture {
    let mut b = TreeBuilder::new(SyntaxKind::FlworExpr);
    let flwor = b.root();
    let first = b.push(flwor, SyntaxKind::LetClause);
    b.push_binding(first, SyntaxKind::LetBinding, "seq");
    let window_parent = if wrapped {
        b.push(flwor, SyntaxKind::IntermediateClause)
    } else {
        flwor
    };
    let window = b.push_binding(window_parent, SyntaxKind::SlidingWindowClause, "w");
    let source = b.push(window, SyntaxKind::Expr);
    let start = b.push(window, SyntaxKind::WindowStartCondition);
    b.push_binding(start, SyntaxKind::CurrentItem, "s");
    b.push_binding(start, SyntaxKind::PositionalVar, "spos");
    let start_when = b.push(start, SyntaxKind::Expr);
    let end = b.push(window, SyntaxKind::WindowEndCondition);
    b.push_binding(end, SyntaxKind::CurrentItem, "e");
    b.push_binding(end, SyntaxKind::NextItem, "enext");
    let end_when = b.push(end, SyntaxKind::Expr);
    let ret_clause = b.push(flwor, SyntaxKind::ReturnClause);
    let ret = b.push(ret_clause, SyntaxKind::Expr);
    WindowFixture {
        arena: b.finish(),
        source,
        start_when,
        end_when,
        ret,
    }
}

#[test]
fn test_window_clause() {
    for wrapped in [false, true] {
        let f = window_fixture(wrapped);
        assert_eq!(
            names(&f.arena, f.ret),
            vec!["w", "s", "spos", "e", "enext", "seq"],
            "wrapped: {wrapped}"
        );
        assert_eq!(names(&f.arena, f.source), vec!["seq"], "wrapped: {wrapped}");
    }
}

#[test]
fn test_window_conditions_see_window_variables() {
    for wrapped in [false, true] {
        let f = window_fixture(wrapped);
        assert_eq!(
            names(&f.arena, f.end_when),
            vec!["w", "s", "spos", "e", "enext", "seq"],
            "wrapped: {wrapped}"
        );
    }
}

#[test]
fn test_start_condition_does_not_see_end_condition_variables() {
    for wrapped in [false, true] {
        let f = window_fixture(wrapped);
        let found = names(&f.arena, f.start_when);
        assert_eq!(found, vec!["w", "s", "spos", "seq"], "wrapped: {wrapped}");
        assert!(!found.contains(&"e"));
        assert!(!found.contains(&"enext"));
    }
}

#[test]
fn test_group_by_clause() {
    // for $x in A group by $k1 := X, $k2 := Y return ...
    let mut b = TreeBuilder::new(SyntaxKind::FlworExpr);
    let flwor = b.root();
    let for_clause = b.push(flwor, SyntaxKind::ForClause);
    b.push_binding(for_clause, SyntaxKind::ForBinding, "x");
    let intermediate = b.push(flwor, SyntaxKind::IntermediateClause);
    let group_by = b.push(intermediate, SyntaxKind::GroupByClause);
    let specs = b.push(group_by, SyntaxKind::GroupingSpecList);
    let k1 = b.push_binding(specs, SyntaxKind::GroupingSpec, "k1");
    let k1_expr = b.push(k1, SyntaxKind::Expr);
    let k2 = b.push_binding(specs, SyntaxKind::GroupingSpec, "k2");
    let k2_expr = b.push(k2, SyntaxKind::Expr);
    let ret_clause = b.push(flwor, SyntaxKind::ReturnClause);
    let ret = b.push(ret_clause, SyntaxKind::Expr);
    let arena = b.finish();

    assert_eq!(names(&arena, k1_expr), vec!["x"]);
    assert_eq!(names(&arena, k2_expr), vec!["k1", "x"]);
    assert_eq!(names(&arena, ret), vec!["k2", "k1", "x"]);
}

#[test]
fn test_count_where_and_order_by_clauses() {
    // for $x in A where W count $c order by O return R
    let mut b = TreeBuilder::new(SyntaxKind::FlworExpr);
    let flwor = b.root();
    let for_clause = b.push(flwor, SyntaxKind::ForClause);
    b.push_binding(for_clause, SyntaxKind::ForBinding, "x");
    let where_wrapper = b.push(flwor, SyntaxKind::IntermediateClause);
    let where_clause = b.push(where_wrapper, SyntaxKind::WhereClause);
    let in_where = b.push(where_clause, SyntaxKind::Expr);
    let count_wrapper = b.push(flwor, SyntaxKind::IntermediateClause);
    b.push_binding(count_wrapper, SyntaxKind::CountClause, "c");
    let order_wrapper = b.push(flwor, SyntaxKind::IntermediateClause);
    let order_by = b.push(order_wrapper, SyntaxKind::OrderByClause);
    let in_order = b.push(order_by, SyntaxKind::Expr);
    let ret_clause = b.push(flwor, SyntaxKind::ReturnClause);
    let ret = b.push(ret_clause, SyntaxKind::Expr);
    let arena = b.finish();

    assert_eq!(names(&arena, in_where), vec!["x"]);
    assert_eq!(names(&arena, in_order), vec!["c", "x"]);
    assert_eq!(names(&arena, ret), vec!["c", "x"]);
}

#[test]
fn test_quantified_expression() {
    // some $a in A, $b in B satisfies S
    let mut b = TreeBuilder::new(SyntaxKind::QuantifiedExpr);
    let quantified = b.root();
    let a = b.push_binding(quantified, SyntaxKind::QuantifiedBinding, "a");
    let a_src = b.push(a, SyntaxKind::Expr);
    let b_binding = b.push_binding(quantified, SyntaxKind::QuantifiedBinding, "b");
    let b_src = b.push(b_binding, SyntaxKind::Expr);
    let satisfies = b.push(quantified, SyntaxKind::Expr);
    let arena = b.finish();

    assert!(names(&arena, a_src).is_empty());
    assert_eq!(names(&arena, b_src), vec!["a"]);
    assert_eq!(names(&arena, satisfies), vec!["b", "a"]);
}

struct TypeswitchFixture {
    arena: NodeArena,
    operand: NodeIndex,
    a_ret: NodeIndex,
    b_ret: NodeIndex,
    d_ret: NodeIndex,
}

fn typeswitch_fixture() -> TypeswitchFixture {
    let mut b = TreeBuilder::new(SyntaxKind::TypeswitchExpr);
    let typeswitch = b.root();
    let operand = b.push(typeswitch, SyntaxKind::Expr);
    let case_a = b.push_binding(typeswitch, SyntaxKind::CaseClause, "a");
    let a_ret = b.push(case_a, SyntaxKind::Expr);
    let case_b = b.push_binding(typeswitch, SyntaxKind::CaseClause, "b");
    let b_ret = b.push(case_b, SyntaxKind::Expr);
    let default = b.push_binding(typeswitch, SyntaxKind::DefaultCaseClause, "d");
    let d_ret = b.push(default, SyntaxKind::Expr);
    TypeswitchFixture {
        arena: b.finish(),
        operand,
        a_ret,
        b_ret,
        d_ret,
    }
}

#[test]
fn test_typeswitch_branch_exclusivity() {
    let f = typeswitch_fixture();
    assert!(names(&f.arena, f.operand).is_empty());
    assert_eq!(names(&f.arena, f.a_ret), vec!["a"]);
    assert_eq!(names(&f.arena, f.b_ret), vec!["b"]);
    assert_eq!(names(&f.arena, f.d_ret), vec!["d"]);
}

#[test]
fn test_nested_typeswitch_resolves_independently() {
    let mut b = TreeBuilder::new(SyntaxKind::TypeswitchExpr);
    let outer = b.root();
    b.push(outer, SyntaxKind::Expr);
    let case_a = b.push_binding(outer, SyntaxKind::CaseClause, "a");
    let inner = b.push(case_a, SyntaxKind::TypeswitchExpr);
    b.push(inner, SyntaxKind::Expr);
    let case_x = b.push_binding(inner, SyntaxKind::CaseClause, "x");
    b.push(case_x, SyntaxKind::Expr);
    let case_y = b.push_binding(inner, SyntaxKind::CaseClause, "y");
    let y_ret = b.push(case_y, SyntaxKind::Expr);
    let case_b = b.push_binding(outer, SyntaxKind::CaseClause, "b");
    b.push(case_b, SyntaxKind::Expr);
    let arena = b.finish();

    assert_eq!(names(&arena, y_ret), vec!["y", "a"]);
}

#[test]
fn test_case_without_variable_still_resolves_branch() {
    let mut b = TreeBuilder::new(SyntaxKind::TypeswitchExpr);
    let typeswitch = b.root();
    b.push(typeswitch, SyntaxKind::Expr);
    let case_a = b.push_binding(typeswitch, SyntaxKind::CaseClause, "a");
    b.push(case_a, SyntaxKind::Expr);
    let case_plain = b.push(typeswitch, SyntaxKind::CaseClause);
    let plain_ret = b.push(case_plain, SyntaxKind::Expr);
    let arena = b.finish();

    assert!(names(&arena, plain_ret).is_empty());
}

struct BlockFixture {
    arena: NodeArena,
    a_init: NodeIndex,
    b_init: NodeIndex,
    c_init: NodeIndex,
    body: NodeIndex,
}

/// ```text
/// {
///   declare $a := A_INIT, $b := B_INIT;
///   declare $c := C_INIT;
///   BODY
/// }
/// ```
fn block_fixture() -> BlockFixture {
    let mut b = TreeBuilder::new(SyntaxKind::Block);
    let block = b.root();
    let decls = b.push(block, SyntaxKind::BlockDecls);
    let group1 = b.push(decls, SyntaxKind::BlockVarDecl);
    let a = b.push_binding(group1, SyntaxKind::BlockVarDeclEntry, "a");
    let a_init = b.push(a, SyntaxKind::Expr);
    let b_entry = b.push_binding(group1, SyntaxKind::BlockVarDeclEntry, "b");
    let b_init = b.push(b_entry, SyntaxKind::Expr);
    let group2 = b.push(decls, SyntaxKind::BlockVarDecl);
    let c = b.push_binding(group2, SyntaxKind::BlockVarDeclEntry, "c");
    let c_init = b.push(c, SyntaxKind::Expr);
    let block_body = b.push(block, SyntaxKind::BlockBody);
    let body = b.push(block_body, SyntaxKind::Expr);
    BlockFixture {
        arena: b.finish(),
        a_init,
        b_init,
        c_init,
        body,
    }
}

#[test]
fn test_block_declarations() {
    let f = block_fixture();
    assert!(names(&f.arena, f.a_init).is_empty());
    assert_eq!(names(&f.arena, f.b_init), vec!["a"]);
    assert_eq!(names(&f.arena, f.c_init), vec!["b", "a"]);
    assert_eq!(names(&f.arena, f.body), vec!["c", "b", "a"]);
}

#[test]
fn test_nameless_bindings_are_filtered() {
    let mut b = TreeBuilder::new(SyntaxKind::FlworExpr);
    let flwor = b.root();
    let clause = b.push(flwor, SyntaxKind::LetClause);
    b.push_binding(clause, SyntaxKind::LetBinding, "a");
    b.push_unnamed_binding(clause, SyntaxKind::LetBinding);
    let ret_clause = b.push(flwor, SyntaxKind::ReturnClause);
    let ret = b.push(ret_clause, SyntaxKind::Expr);
    let arena = b.finish();

    let bindings: Vec<_> = in_scope_variables(&arena, ret).collect();
    assert_eq!(bindings.len(), 1);
    assert_eq!(bindings[0].name, "a");
}

#[test]
fn test_malformed_clauses_contribute_nothing() {
    let mut b = TreeBuilder::new(SyntaxKind::FlworExpr);
    let flwor = b.root();
    b.push(flwor, SyntaxKind::ForClause);
    b.push(flwor, SyntaxKind::IntermediateClause);
    let group_by = b.push(flwor, SyntaxKind::GroupByClause);
    b.push(group_by, SyntaxKind::Error);
    b.push(flwor, SyntaxKind::SlidingWindowClause);
    let ret_clause = b.push(flwor, SyntaxKind::ReturnClause);
    let ret = b.push(ret_clause, SyntaxKind::Expr);
    let arena = b.finish();

    assert!(names(&arena, ret).is_empty());
    assert!(names(&arena, NodeIndex(9999)).is_empty());
    assert!(names(&arena, NodeIndex::NONE).is_empty());
}

#[test]
fn test_shadowing_nearest_first() {
    // let $x := 1 for $x in $x return $x
    let mut b = TreeBuilder::new(SyntaxKind::FlworExpr);
    let flwor = b.root();
    let let_clause = b.push(flwor, SyntaxKind::LetClause);
    let outer = b.push_binding(let_clause, SyntaxKind::LetBinding, "x");
    let intermediate = b.push(flwor, SyntaxKind::IntermediateClause);
    let for_clause = b.push(intermediate, SyntaxKind::ForClause);
    let inner = b.push_binding(for_clause, SyntaxKind::ForBinding, "x");
    let source = b.push(inner, SyntaxKind::Expr);
    let ret_clause = b.push(flwor, SyntaxKind::ReturnClause);
    let ret = b.push(ret_clause, SyntaxKind::Expr);
    let arena = b.finish();

    assert_eq!(resolve_variable(&arena, ret, "x").map(|b| b.node), Some(inner));
    assert_eq!(resolve_variable(&arena, source, "x").map(|b| b.node), Some(outer));
    assert_eq!(resolve_variable(&arena, ret, "y"), None);
}

#[test]
fn test_resolution_is_deterministic() {
    let f = block_fixture();
    let first: Vec<_> = in_scope_variables(&f.arena, f.body).collect();
    let second: Vec<_> = in_scope_variables(&f.arena, f.body).collect();
    assert_eq!(first, second);
}

#[test]
fn test_concurrent_resolution_over_shared_tree() {
    let f = window_fixture(true);
    let expected = names(&f.arena, f.ret);
    std::thread::scope(|scope| {
        let handles: Vec<_> = (0..4)
            .map(|_| scope.spawn(|| names(&f.arena, f.ret)))
            .collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap(), expected);
        }
    });
}

/// Counts `kind` lookups so tests can tell how far a walk went.
struct CountingTree<'a> {
    inner: &'a NodeArena,
    kind_calls: Cell<usize>,
}

impl SyntaxTree for CountingTree<'_> {
    fn kind(&self, node: NodeIndex) -> Option<SyntaxKind> {
        self.kind_calls.set(self.kind_calls.get() + 1);
        self.inner.kind(node)
    }
    fn parent(&self, node: NodeIndex) -> NodeIndex {
        self.inner.parent(node)
    }
    fn children(&self, node: NodeIndex) -> &[NodeIndex] {
        self.inner.children(node)
    }
    fn variable_name(&self, node: NodeIndex) -> Option<&str> {
        self.inner.variable_name(node)
    }
    fn namespace_prefix(&self, node: NodeIndex) -> Option<&str> {
        self.inner.namespace_prefix(node)
    }
    fn namespace_uri(&self, node: NodeIndex) -> Option<&str> {
        self.inner.namespace_uri(node)
    }
}

#[test]
fn test_first_match_does_not_walk_to_the_root() {
    let mut b = TreeBuilder::new(SyntaxKind::Module);
    let prolog = b.push(b.root(), SyntaxKind::Prolog);
    b.push_binding(prolog, SyntaxKind::VarDecl, "g");
    let mut parent = b.push(b.root(), SyntaxKind::QueryBody);
    for _ in 0..200 {
        parent = b.push(parent, SyntaxKind::Expr);
    }
    let flwor = b.push(parent, SyntaxKind::FlworExpr);
    let clause = b.push(flwor, SyntaxKind::LetClause);
    b.push_binding(clause, SyntaxKind::LetBinding, "near");
    let ret_clause = b.push(flwor, SyntaxKind::ReturnClause);
    let ret = b.push(ret_clause, SyntaxKind::Expr);
    let arena = b.finish();

    let tree = CountingTree {
        inner: &arena,
        kind_calls: Cell::new(0),
    };
    let first = in_scope_variables(&tree, ret).next();
    assert_eq!(first.map(|b| b.name), Some("near"));
    let lazy_calls = tree.kind_calls.get();
    assert!(lazy_calls < 20, "walked too far: {lazy_calls} kind lookups");

    tree.kind_calls.set(0);
    let all: Vec<_> = in_scope_variables(&tree, ret).map(|b| b.name).collect();
    assert_eq!(all, vec!["near", "g"]);
    assert!(tree.kind_calls.get() > 200);
}
