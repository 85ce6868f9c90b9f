//! End-to-end seed scenarios (spec.md §8's seed suite), run against the
//! public driver API.

#[path = "../demos/absolute_value.rs"]
mod absolute_value;
#[path = "../demos/saturating_controller.rs"]
mod saturating_controller;

use see_reach::driver::function_symbolic_execution_unpruned;
use see_reach::hl_ast::{Expression, Function, Operator, Program, Type, TypedVariable, Value};
use see_reach::sym_ast::SymExpr;

#[test]
fn absolute_value_sign_forks_into_three_paths() {
    let program = absolute_value::build();
    let results = function_symbolic_execution_unpruned(&program, "abs_sign", None).unwrap();

    assert_eq!(results.len(), 3);
    assert_eq!(*results[0].value, SymExpr::Integer(-1));
    assert_eq!(*results[1].value, SymExpr::Integer(0));
    assert_eq!(*results[2].value, SymExpr::Integer(5));

    assert_eq!(results[0].path_condition.len(), 1);
    assert_eq!(results[1].path_condition.len(), 2);
    assert_eq!(results[2].path_condition.len(), 2);
}

#[test]
fn saturating_controller_forks_into_three_paths() {
    let program = saturating_controller::build();
    let results = function_symbolic_execution_unpruned(&program, "controller", None).unwrap();

    assert_eq!(results.len(), 3);
    assert_eq!(*results[0].value, SymExpr::Real(-5.0));
    assert_eq!(*results[1].value, SymExpr::Real(5.0));
    // Third path's value is the unsimplified product `(-1.0 * x)`, since
    // this crate performs no algebraic simplification beyond concrete
    // folding, it is algebraically `-x` but not textually so.
    match results[2].value.as_ref() {
        SymExpr::BinaryOp {
            op: Operator::Mul, ..
        } => {}
        other => panic!("expected an unevaluated product, found {other:?}"),
    }

    assert_eq!(results[0].path_condition.len(), 1);
    assert_eq!(results[1].path_condition.len(), 2);
    assert_eq!(results[2].path_condition.len(), 2);
}

#[test]
fn call_site_reuse_folds_wherever_operands_are_concrete() {
    let mut program = Program::new("outer");
    program.define(Function {
        name: "bar".to_string(),
        parameters: vec![TypedVariable::new("x", Type::Integer)],
        return_type: Type::Integer,
        body: Expression::Return(Expression::Literal(Value::Integer(10)).rc()).rc(),
    });
    program.define(Function {
        name: "outer".to_string(),
        parameters: vec![TypedVariable::new("x", Type::Integer)],
        return_type: Type::Integer,
        body: Expression::Return(
            Expression::BinaryOp {
                left: Expression::Variable("x".to_string()).rc(),
                op: Operator::Add,
                right: Expression::FunctionCall {
                    name: "bar".to_string(),
                    args: vec![Expression::Variable("x".to_string()).rc()],
                }
                .rc(),
            }
            .rc(),
        )
        .rc(),
    });

    let results = function_symbolic_execution_unpruned(
        &program,
        "outer",
        Some(vec![Expression::Literal(Value::Integer(7))]),
    )
    .unwrap();

    assert_eq!(results.len(), 1);
    assert_eq!(*results[0].value, SymExpr::Integer(17));
    assert!(results[0].path_condition.is_empty());
}

#[test]
fn tuple_cartesian_combination_yields_four_results() {
    let mut program = Program::new("pair");
    program.define(Function {
        name: "pair".to_string(),
        parameters: vec![TypedVariable::new("s", Type::Boolean)],
        return_type: Type::Tuple,
        body: Expression::Return(
            Expression::TupleExpression(vec![
                Expression::Conditional {
                    cond: Expression::Variable("s".to_string()).rc(),
                    then_branch: Expression::Literal(Value::Integer(1)).rc(),
                    else_branch: Expression::Literal(Value::Integer(2)).rc(),
                }
                .rc(),
                Expression::Conditional {
                    cond: Expression::Variable("s".to_string()).rc(),
                    then_branch: Expression::Literal(Value::Integer(3)).rc(),
                    else_branch: Expression::Literal(Value::Integer(4)).rc(),
                }
                .rc(),
            ])
            .rc(),
        )
        .rc(),
    });

    let results = function_symbolic_execution_unpruned(&program, "pair", None).unwrap();
    assert_eq!(results.len(), 4);
}

#[test]
fn concrete_folding_returns_one_result() {
    let mut program = Program::new("sum");
    program.define(Function {
        name: "sum".to_string(),
        parameters: vec![],
        return_type: Type::Integer,
        body: Expression::Return(
            Expression::BinaryOp {
                left: Expression::Literal(Value::Integer(2)).rc(),
                op: Operator::Add,
                right: Expression::Literal(Value::Integer(3)).rc(),
            }
            .rc(),
        )
        .rc(),
    });

    let results = function_symbolic_execution_unpruned(&program, "sum", None).unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(*results[0].value, SymExpr::Integer(5));
    assert!(results[0].path_condition.is_empty());
}

#[cfg(feature = "smt")]
#[test]
fn infeasible_branch_is_pruned_by_the_smt_bridge() {
    use see_reach::smt::{SolverConfig, Z3Oracle};

    let mut program = Program::new("nested");
    program.define(Function {
        name: "nested".to_string(),
        parameters: vec![TypedVariable::new("x", Type::Integer)],
        return_type: Type::Integer,
        body: Expression::Return(
            Expression::Conditional {
                cond: Expression::BinaryOp {
                    left: Expression::Variable("x".to_string()).rc(),
                    op: Operator::Less,
                    right: Expression::Literal(Value::Integer(0)).rc(),
                }
                .rc(),
                then_branch: Expression::Conditional {
                    cond: Expression::BinaryOp {
                        left: Expression::Variable("x".to_string()).rc(),
                        op: Operator::Greater,
                        right: Expression::Literal(Value::Integer(10)).rc(),
                    }
                    .rc(),
                    then_branch: Expression::Literal(Value::Integer(1)).rc(),
                    else_branch: Expression::Literal(Value::Integer(2)).rc(),
                }
                .rc(),
                else_branch: Expression::Literal(Value::Integer(3)).rc(),
            }
            .rc(),
        )
        .rc(),
    });

    let oracle = Z3Oracle::new(SolverConfig::default());
    let results = see_reach::driver::function_symbolic_execution(&program, "nested", None, &oracle)
        .unwrap();

    // The `x<0 && x>10` branch (value 1) is unsatisfiable and must be pruned.
    assert!(results.iter().all(|r| *r.value != SymExpr::Integer(1)));
    assert_eq!(results.len(), 2);
}
