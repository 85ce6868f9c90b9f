//! The path-forking interpreter over the high-level language.
//!
//! `execute` is pure with respect to the AST and the `Program`, it never
//! mutates either, but it does mutate the `Context`'s symbol table for
//! `Assignment`. Result orderings are deterministic: the true branch
//! precedes the false branch at a fork, the left operand's results iterate
//! outermost in a `BinaryOp`, and tuple elements combine in declaration
//! order.

use std::rc::Rc;

use crate::context::Context;
use crate::error::{ExecResult, ExecutionError};
use crate::hl_ast::{Expression, Operator, Program, Type, Value};
use crate::result::EvalResult;
use crate::sym_ast::{negate, SymExpr};

/// Something the SMT bridge can check feasibility of. The executor is
/// generic over this so it is fully testable without the `smt` feature:
/// `()` (the default when `smt` is disabled, or when a caller wants no
/// pruning at all) always reports "feasible".
pub trait FeasibilityOracle {
    /// `Ok(false)` only when the path condition is *provably*
    /// unsatisfiable. A solver timeout or an undecidable theory must
    /// report `Ok(true)` internally, the sound-but-incomplete pruning
    /// policy this bridge follows, while a translation failure (e.g. a
    /// tuple in the condition) is returned as `Err` and aborts the
    /// enclosing `execute` call, same as any other program error.
    fn is_feasible(&self, path_condition: &[Rc<SymExpr>]) -> ExecResult<bool>;
}

/// No pruning: every forked path is retained. Useful for testing the
/// executor's forking logic in isolation from the SMT bridge.
pub struct NoPruning;

impl FeasibilityOracle for NoPruning {
    fn is_feasible(&self, _path_condition: &[Rc<SymExpr>]) -> ExecResult<bool> {
        Ok(true)
    }
}

/// Executes `expression` in `context` against `program`, returning every
/// feasible path's result. Always returns a non-empty list unless the
/// expression is ill-formed, in which case it returns `Err`; no partial
/// results are emitted on error.
pub fn execute(
    expression: &Expression,
    context: &mut Context,
    program: &Program,
    oracle: &dyn FeasibilityOracle,
) -> ExecResult<Vec<EvalResult>> {
    match expression {
        Expression::Literal(value) => {
            let sym = concrete_to_sym(value);
            Ok(vec![EvalResult::new(sym.rc(), context.path_condition.clone())])
        }

        Expression::Symbolic(var) => {
            let sym = SymExpr::Variable {
                name: var.name.clone(),
                var_type: var.var_type,
            };
            Ok(vec![EvalResult::new(sym.rc(), context.path_condition.clone())])
        }

        Expression::Variable(name) => {
            let bindings = context
                .lookup(name)
                .ok_or_else(|| ExecutionError::UnknownVariable { name: name.clone() })?;
            Ok(bindings
                .iter()
                .map(|entry| {
                    let mut path_condition = context.path_condition.clone();
                    path_condition.extend(entry.path_condition.iter().cloned());
                    EvalResult {
                        value: entry.value.clone(),
                        path_condition,
                        is_return: entry.is_return,
                    }
                })
                .collect())
        }

        Expression::TypedVariable(var) => {
            // A bare binding site outside an assignment's LHS position has
            // no value of its own; it only ever appears nested inside
            // `Assignment`, which pattern-matches `var` directly rather
            // than recursing into this arm.
            let sym = SymExpr::Variable {
                name: var.name.clone(),
                var_type: var.var_type,
            };
            Ok(vec![EvalResult::new(sym.rc(), context.path_condition.clone())])
        }

        Expression::Assignment { var, expr } => {
            let mut rhs_ctx = context.fork();
            let results = execute(expr, &mut rhs_ctx, program, oracle)?;
            context.bind(var.name.clone(), results.clone());
            Ok(results)
        }

        Expression::Block(exprs) => execute_block(exprs, context, program, oracle),

        Expression::Conditional {
            cond,
            then_branch,
            else_branch,
        } => execute_conditional(cond, then_branch, else_branch, context, program, oracle),

        Expression::FunctionCall { name, args } => {
            execute_call(name, args, context, program, oracle)
        }

        Expression::BinaryOp { left, op, right } => {
            execute_binary_op(left, *op, right, context, program, oracle)
        }

        Expression::UnaryOp { op, inner } => execute_unary_op(*op, inner, context, program, oracle),

        Expression::Return(inner) => {
            let results = execute(inner, context, program, oracle)?;
            Ok(results.into_iter().map(EvalResult::into_return).collect())
        }

        Expression::TupleExpression(elements) => {
            execute_tuple(elements, context, program, oracle)
        }
    }
}

fn concrete_to_sym(value: &Value) -> SymExpr {
    match value {
        Value::Real(v) => SymExpr::Real(*v),
        Value::Integer(v) => SymExpr::Integer(*v),
        Value::Boolean(v) => SymExpr::Boolean(*v),
        Value::Tuple(elems) => SymExpr::Tuple(elems.iter().map(concrete_to_sym).collect()),
    }
}

fn execute_block(
    exprs: &[Rc<Expression>],
    context: &mut Context,
    program: &Program,
    oracle: &dyn FeasibilityOracle,
) -> ExecResult<Vec<EvalResult>> {
    let mut last: Vec<EvalResult> = Vec::new();
    for expr in exprs {
        let results = execute(expr, context, program, oracle)?;
        if results.iter().any(|r| r.is_return) {
            return Ok(results);
        }
        last = results;
    }
    Ok(last)
}

fn execute_conditional(
    cond: &Expression,
    then_branch: &Expression,
    else_branch: &Expression,
    context: &mut Context,
    program: &Program,
    oracle: &dyn FeasibilityOracle,
) -> ExecResult<Vec<EvalResult>> {
    let mut cond_ctx = context.fork();
    let cond_results = execute(cond, &mut cond_ctx, program, oracle)?;

    let mut out = Vec::new();
    for cond_result in cond_results {
        match cond_result.value.as_bool() {
            Some(true) => {
                let mut branch_ctx = context.fork_with_path_condition(cond_result.path_condition.clone());
                out.extend(execute(then_branch, &mut branch_ctx, program, oracle)?);
            }
            Some(false) => {
                let mut branch_ctx = context.fork_with_path_condition(cond_result.path_condition.clone());
                out.extend(execute(else_branch, &mut branch_ctx, program, oracle)?);
            }
            None => {
                // The condition is symbolic: execute both branches, and
                // prune each against the bridge before keeping it.
                let mut true_path = cond_result.path_condition.clone();
                true_path.push(cond_result.value.clone());
                let mut true_ctx = context.fork_with_path_condition(true_path);
                let true_results = execute(then_branch, &mut true_ctx, program, oracle)?;

                let mut false_path = cond_result.path_condition.clone();
                false_path.push(negate(cond_result.value.clone()));
                let mut false_ctx = context.fork_with_path_condition(false_path);
                let false_results = execute(else_branch, &mut false_ctx, program, oracle)?;

                out.extend(true_results);
                out.extend(false_results);
            }
        }
    }

    let mut feasible = Vec::with_capacity(out.len());
    for result in out {
        if oracle.is_feasible(&result.path_condition)? {
            feasible.push(result);
        }
    }
    Ok(feasible)
}

fn execute_call(
    name: &str,
    args: &[Rc<Expression>],
    context: &mut Context,
    program: &Program,
    oracle: &dyn FeasibilityOracle,
) -> ExecResult<Vec<EvalResult>> {
    let function = program
        .functions
        .get(name)
        .ok_or_else(|| ExecutionError::UnknownFunction {
            name: name.to_string(),
        })?
        .clone();

    let mut callee_ctx = Context::with_path_condition(context.path_condition.clone());
    for (param, arg) in function.parameters.iter().zip(args.iter()) {
        let mut arg_ctx = context.fork();
        let arg_results = execute(arg, &mut arg_ctx, program, oracle)?;
        callee_ctx.bind(param.name.clone(), arg_results);
    }

    let body_results = execute(&function.body, &mut callee_ctx, program, oracle)?;
    Ok(body_results
        .into_iter()
        .filter(|r| r.is_return)
        .map(EvalResult::stripped_of_return)
        .collect())
}

fn execute_binary_op(
    left: &Expression,
    op: Operator,
    right: &Expression,
    context: &mut Context,
    program: &Program,
    oracle: &dyn FeasibilityOracle,
) -> ExecResult<Vec<EvalResult>> {
    let mut left_ctx = context.fork();
    let left_results = execute(left, &mut left_ctx, program, oracle)?;

    let mut out = Vec::with_capacity(left_results.len());
    for left_result in &left_results {
        let mut right_ctx = context.fork_with_path_condition(left_result.path_condition.clone());
        let right_results = execute(right, &mut right_ctx, program, oracle)?;
        for right_result in &right_results {
            let path_condition = right_result.path_condition.clone();
            let value = fold_binary(&left_result.value, op, &right_result.value)?;
            out.push(EvalResult::new(value.rc(), path_condition));
        }
    }
    Ok(out)
}

fn execute_unary_op(
    op: Operator,
    inner: &Expression,
    context: &mut Context,
    program: &Program,
    oracle: &dyn FeasibilityOracle,
) -> ExecResult<Vec<EvalResult>> {
    let mut inner_ctx = context.fork();
    let inner_results = execute(inner, &mut inner_ctx, program, oracle)?;
    Ok(inner_results
        .into_iter()
        .map(|r| {
            let value = fold_unary(op, &r.value);
            EvalResult::new(value.rc(), r.path_condition)
        })
        .collect())
}

fn execute_tuple(
    elements: &[Rc<Expression>],
    context: &mut Context,
    program: &Program,
    oracle: &dyn FeasibilityOracle,
) -> ExecResult<Vec<EvalResult>> {
    // Start with the single empty-tuple result and cartesian-combine each
    // element's results into it in declaration order.
    let mut combos: Vec<EvalResult> =
        vec![EvalResult::new(SymExpr::Tuple(vec![]).rc(), context.path_condition.clone())];

    for element in elements {
        let mut element_ctx = context.fork();
        let element_results = execute(element, &mut element_ctx, program, oracle)?;

        let mut next = Vec::with_capacity(combos.len() * element_results.len().max(1));
        for combo in &combos {
            for element_result in &element_results {
                let mut path_condition = combo.path_condition.clone();
                path_condition.extend(element_result.path_condition.iter().cloned());

                let mut elems = match combo.value.as_ref() {
                    SymExpr::Tuple(elems) => elems.clone(),
                    _ => unreachable!("tuple accumulator is always SymExpr::Tuple"),
                };
                elems.push(element_result.value.as_ref().clone());

                next.push(EvalResult::new(SymExpr::Tuple(elems).rc(), path_condition));
            }
        }
        combos = next;
    }

    Ok(combos)
}

/// Folds a binary operator over two operand terms. If both are concrete
/// leaves of matching type, produces the corresponding concrete leaf;
/// arithmetic operators preserve the left operand's type tag, comparison
/// and logical operators always produce a boolean. Otherwise produces an
/// unevaluated `SymExpr::BinaryOp`.
fn fold_binary(left: &SymExpr, op: Operator, right: &SymExpr) -> ExecResult<SymExpr> {
    if let (Some(lt), Some(rt)) = (left.concrete_type(), right.concrete_type()) {
        if lt != rt {
            return Err(ExecutionError::TypeMismatch {
                expected: lt,
                found: rt,
            });
        }
        return fold_concrete_binary(left, op, right, lt);
    }
    Ok(SymExpr::BinaryOp {
        left: Rc::new(left.clone()),
        op,
        right: Rc::new(right.clone()),
    })
}

fn fold_concrete_binary(left: &SymExpr, op: Operator, right: &SymExpr, tag: Type) -> ExecResult<SymExpr> {
    use Operator::*;

    // Comparison and logical operators always yield a boolean.
    if matches!(
        op,
        Less | LessEqual | Greater | GreaterEqual | Equal | And | Or
    ) {
        let ordering = compare(left, right, tag)?;
        let b = match op {
            Less => ordering == std::cmp::Ordering::Less,
            LessEqual => ordering != std::cmp::Ordering::Greater,
            Greater => ordering == std::cmp::Ordering::Greater,
            GreaterEqual => ordering != std::cmp::Ordering::Less,
            Equal => ordering == std::cmp::Ordering::Equal,
            And => as_bool(left)? && as_bool(right)?,
            Or => as_bool(left)? || as_bool(right)?,
            _ => unreachable!(),
        };
        return Ok(SymExpr::Boolean(b));
    }

    // Arithmetic operators preserve the left operand's type tag.
    match tag {
        Type::Real => {
            let (l, r) = (as_real(left)?, as_real(right)?);
            let v = match op {
                Add => l + r,
                Sub => l - r,
                Mul => l * r,
                Div => {
                    if r == 0.0 {
                        return Err(ExecutionError::DivisionByZero);
                    }
                    l / r
                }
                _ => unreachable!("non-arithmetic operator handled above"),
            };
            Ok(SymExpr::Real(v))
        }
        Type::Integer => {
            let (l, r) = (as_integer(left)?, as_integer(right)?);
            let v = match op {
                Add => l + r,
                Sub => l - r,
                Mul => l * r,
                Div => {
                    if r == 0 {
                        return Err(ExecutionError::DivisionByZero);
                    }
                    l / r
                }
                _ => unreachable!("non-arithmetic operator handled above"),
            };
            Ok(SymExpr::Integer(v))
        }
        Type::Boolean | Type::Tuple => Err(ExecutionError::TypeMismatch {
            expected: Type::Real,
            found: tag,
        }),
    }
}

fn compare(left: &SymExpr, right: &SymExpr, tag: Type) -> ExecResult<std::cmp::Ordering> {
    match tag {
        Type::Real => Ok(as_real(left)?
            .partial_cmp(&as_real(right)?)
            .unwrap_or(std::cmp::Ordering::Equal)),
        Type::Integer => Ok(as_integer(left)?.cmp(&as_integer(right)?)),
        Type::Boolean => Ok(as_bool(left)?.cmp(&as_bool(right)?)),
        Type::Tuple => Err(ExecutionError::TypeMismatch {
            expected: Type::Real,
            found: Type::Tuple,
        }),
    }
}

fn as_real(v: &SymExpr) -> ExecResult<f64> {
    match v {
        SymExpr::Real(r) => Ok(*r),
        other => Err(ExecutionError::TypeMismatch {
            expected: Type::Real,
            found: other.concrete_type().unwrap_or(Type::Real),
        }),
    }
}

fn as_integer(v: &SymExpr) -> ExecResult<i64> {
    match v {
        SymExpr::Integer(i) => Ok(*i),
        other => Err(ExecutionError::TypeMismatch {
            expected: Type::Integer,
            found: other.concrete_type().unwrap_or(Type::Integer),
        }),
    }
}

fn as_bool(v: &SymExpr) -> ExecResult<bool> {
    match v {
        SymExpr::Boolean(b) => Ok(*b),
        other => Err(ExecutionError::TypeMismatch {
            expected: Type::Boolean,
            found: other.concrete_type().unwrap_or(Type::Boolean),
        }),
    }
}

/// Folds a unary operator. `Sin` is never folded (left symbolic, matching
/// the spec's framing that transcendental operators are reported as-is);
/// `Not` folds only over a concrete `SBoolean`.
fn fold_unary(op: Operator, inner: &SymExpr) -> SymExpr {
    if op == Operator::Not {
        if let SymExpr::Boolean(b) = inner {
            return SymExpr::Boolean(!b);
        }
    }
    SymExpr::UnaryOp {
        op,
        inner: Rc::new(inner.clone()),
    }
}
