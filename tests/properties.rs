//! Property-based tests for the quantified invariants in spec.md §8: P2
//! (flattening idempotence), P3 (concrete agreement), P6 (path-condition
//! monotonicity), and P7 (determinism).

use proptest::prelude::*;

use see_reach::context::Context;
use see_reach::executor::{execute, NoPruning};
use see_reach::hl_ast::{Expression, Operator, Program, Value};
use see_reach::result::EvalResult;
use see_reach::sym_ast::SymExpr;

/// A small arithmetic expression tree over concrete integer literals,
/// bounded in depth so generated cases stay cheap.
fn concrete_int_expr() -> impl Strategy<Value = Expression> {
    let leaf = any::<i8>().prop_map(|v| Expression::Literal(Value::Integer(v as i64)));
    leaf.prop_recursive(4, 32, 4, |inner| {
        (inner.clone(), inner, prop_oneof![
            Just(Operator::Add),
            Just(Operator::Sub),
            Just(Operator::Mul),
        ])
        .prop_map(|(left, right, op)| Expression::BinaryOp {
            left: left.rc(),
            op,
            right: right.rc(),
        })
    })
}

/// Evaluates `expr` the ordinary way: no forking is possible since every
/// leaf is concrete, so this just folds the arithmetic directly.
fn concrete_eval(expr: &Expression) -> i64 {
    match expr {
        Expression::Literal(Value::Integer(v)) => *v,
        Expression::BinaryOp { left, op, right } => {
            let l = concrete_eval(left);
            let r = concrete_eval(right);
            match op {
                Operator::Add => l.wrapping_add(r),
                Operator::Sub => l.wrapping_sub(r),
                Operator::Mul => l.wrapping_mul(r),
                _ => unreachable!("concrete_int_expr only generates Add/Sub/Mul"),
            }
        }
        _ => unreachable!("concrete_int_expr only generates Literal/BinaryOp"),
    }
}

proptest! {
    /// P3: a purely concrete expression always yields exactly one result,
    /// with an empty path condition, matching ordinary evaluation.
    #[test]
    fn concrete_agreement(expr in concrete_int_expr()) {
        let program = Program::new("none");
        let mut ctx = Context::new();
        let results = execute(&expr, &mut ctx, &program, &NoPruning).unwrap();

        prop_assert_eq!(results.len(), 1);
        prop_assert!(results[0].path_condition.is_empty());
        prop_assert_eq!((*results[0].value).clone(), SymExpr::Integer(concrete_eval(&expr)));
    }

    /// P7: repeated invocations on the same input yield identically
    /// ordered result lists.
    #[test]
    fn determinism_across_repeated_invocations(expr in concrete_int_expr()) {
        let program = Program::new("none");

        let mut first_ctx = Context::new();
        let first = execute(&expr, &mut first_ctx, &program, &NoPruning).unwrap();

        let mut second_ctx = Context::new();
        let second = execute(&expr, &mut second_ctx, &program, &NoPruning).unwrap();

        prop_assert_eq!(first, second);
    }

    /// P2: flattening an already-flat result is the identity, for any
    /// concrete value and any-length path condition prefix.
    #[test]
    fn flatten_idempotence(v in any::<i64>(), names in proptest::collection::vec("[a-z]{1,4}", 0..4)) {
        let path_condition: Vec<_> = names
            .into_iter()
            .map(|name| {
                SymExpr::Variable {
                    name,
                    var_type: see_reach::hl_ast::Type::Boolean,
                }
                .rc()
            })
            .collect();
        let result = EvalResult::new(SymExpr::Integer(v).rc(), path_condition);
        prop_assert_eq!(result.clone().flatten(), result.flatten().flatten());
    }
}

/// P6: along a root-to-leaf traversal through a chain of nested
/// conditionals on a symbolic boolean, every result's path condition is a
/// strict supersequence of its parent context's, conditions only ever
/// grow by append, never shrink or reorder their existing prefix.
#[test]
fn path_condition_only_grows_through_nested_conditionals() {
    use see_reach::hl_ast::{Type, TypedVariable};

    fn nested(depth: u32) -> Expression {
        if depth == 0 {
            return Expression::Literal(Value::Integer(0));
        }
        Expression::Conditional {
            cond: Expression::Symbolic(TypedVariable::new(format!("s{depth}"), Type::Boolean)).rc(),
            then_branch: nested(depth - 1).rc(),
            else_branch: Expression::Literal(Value::Integer(-1)).rc(),
        }
    }

    let expr = nested(3);
    let program = Program::new("none");
    let mut ctx = Context::new();
    let results = execute(&expr, &mut ctx, &program, &NoPruning).unwrap();

    // Every result whose path condition has length k>1 must have, as its
    // first k-1 conditions, exactly one of the prefixes produced by a
    // shallower fork, i.e. conditions strictly grow by append along the
    // tree, never by replacement.
    for result in &results {
        for window in 1..result.path_condition.len() {
            let shorter = &result.path_condition[..window];
            let matches_some_result = results
                .iter()
                .any(|other| other.path_condition == *shorter || other.path_condition.starts_with(shorter));
            assert!(matches_some_result);
        }
    }
}
