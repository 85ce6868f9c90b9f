//! The SMT bridge: a `FeasibilityOracle` backed by `z3`.
//!
//! Grounded in `original_source/seereach/z3convert.py`'s `Z3SatConverter`,
//! which runs in two passes: collect every distinct variable (and its
//! declared type) reachable from the path condition, declare one solver
//! constant per variable, then structurally translate each conjunct and
//! assert it. This module keeps that two-pass shape; only the target
//! changes, from a Python `z3` binding to the `z3` crate.
//!
//! Feature-gated behind `smt` (default-on): a caller that does not need
//! pruning, or cannot link `z3`, can disable the feature and fall back to
//! [`crate::executor::NoPruning`].

use std::collections::HashMap;
use std::rc::Rc;

use z3::ast::{Ast, Bool, Int, Real};
use z3::{Config, Context as Z3Context, SatResult, Solver};

use crate::error::{BridgeError, ExecResult, ExecutionError};
use crate::executor::FeasibilityOracle;
use crate::hl_ast::{Name, Operator, Type};
use crate::sym_ast::SymExpr;

/// Tuning knobs for the underlying solver. A fresh [`Solver`] is built per
/// query, so there is no state to reset between calls.
#[derive(Debug, Clone, Copy)]
pub struct SolverConfig {
    /// Passed to z3's `timeout` parameter. A query that hits the timeout
    /// reports [`SatResult::Unknown`], which this bridge treats as
    /// feasible rather than as an error, the sound-but-incomplete pruning
    /// policy this crate follows.
    pub timeout_ms: u32,
}

impl Default for SolverConfig {
    fn default() -> Self {
        SolverConfig { timeout_ms: 1_000 }
    }
}

/// A [`FeasibilityOracle`] that asks z3 whether a path condition is
/// satisfiable.
pub struct Z3Oracle {
    config: SolverConfig,
}

impl Z3Oracle {
    pub fn new(config: SolverConfig) -> Self {
        Z3Oracle { config }
    }
}

impl Default for Z3Oracle {
    fn default() -> Self {
        Z3Oracle::new(SolverConfig::default())
    }
}

impl FeasibilityOracle for Z3Oracle {
    fn is_feasible(&self, path_condition: &[Rc<SymExpr>]) -> ExecResult<bool> {
        is_sat(path_condition, &self.config).map_err(ExecutionError::from)
    }
}

/// One solver-side value, sort-tagged the way `SymExpr`'s concrete leaves
/// are tagged, since the z3 crate's `Dynamic` erases sort at the type
/// level and this bridge never needs that generality.
enum Term<'ctx> {
    Real(Real<'ctx>),
    Int(Int<'ctx>),
    Bool(Bool<'ctx>),
}

impl<'ctx> Term<'ctx> {
    fn as_bool(&self) -> Result<&Bool<'ctx>, BridgeError> {
        match self {
            Term::Bool(b) => Ok(b),
            _ => Err(BridgeError::TupleInCondition),
        }
    }
}

/// Runs the two-pass translation and checks satisfiability. Returns
/// `Ok(true)` for SAT and UNKNOWN, `Ok(false)` for UNSAT, and `Err` only
/// when a conjunct cannot be translated at all (a tuple-valued term, or a
/// variable used under two different types).
pub fn is_sat(path_condition: &[Rc<SymExpr>], config: &SolverConfig) -> Result<bool, BridgeError> {
    if path_condition.is_empty() {
        return Ok(true);
    }

    let mut cfg = Config::new();
    cfg.set_timeout_msec(u64::from(config.timeout_ms));
    let ctx = Z3Context::new(&cfg);
    let solver = Solver::new(&ctx);

    let mut declared: HashMap<Name, (Type, Term<'_>)> = HashMap::new();
    for conjunct in path_condition {
        declare_variables(&ctx, conjunct, &mut declared)?;
    }

    for conjunct in path_condition {
        let term = convert(&ctx, conjunct, &declared)?;
        solver.assert(term.as_bool()?);
    }

    match solver.check() {
        SatResult::Sat | SatResult::Unknown => Ok(true),
        SatResult::Unsat => Ok(false),
    }
}

fn declare_variables<'ctx>(
    ctx: &'ctx Z3Context,
    expr: &SymExpr,
    declared: &mut HashMap<Name, (Type, Term<'ctx>)>,
) -> Result<(), BridgeError> {
    let mut vars = Vec::new();
    expr.variables(&mut vars);
    for (name, var_type) in vars {
        match declared.get(&name) {
            Some((existing_type, _)) if *existing_type != var_type => {
                return Err(BridgeError::InconsistentVariableType { name });
            }
            Some(_) => continue,
            None => {
                let term = match var_type {
                    Type::Real => Term::Real(Real::new_const(ctx, name.as_str())),
                    Type::Integer => Term::Int(Int::new_const(ctx, name.as_str())),
                    Type::Boolean => Term::Bool(Bool::new_const(ctx, name.as_str())),
                    Type::Tuple => return Err(BridgeError::TupleInCondition),
                };
                declared.insert(name, (var_type, term));
            }
        }
    }
    Ok(())
}

/// Structurally translates a `SymExpr` into a solver term, one node at a
/// time, the same shape as `Z3SatConverter.convert`'s recursive descent.
fn convert<'ctx>(
    ctx: &'ctx Z3Context,
    expr: &SymExpr,
    declared: &HashMap<Name, (Type, Term<'ctx>)>,
) -> Result<Term<'ctx>, BridgeError> {
    match expr {
        SymExpr::Real(v) => Ok(Term::Real(real_from_f64(ctx, *v))),
        SymExpr::Integer(v) => Ok(Term::Int(Int::from_i64(ctx, *v))),
        SymExpr::Boolean(v) => Ok(Term::Bool(Bool::from_bool(ctx, *v))),
        SymExpr::Tuple(_) => Err(BridgeError::TupleInCondition),
        SymExpr::Variable { name, .. } => {
            let (_, term) = declared
                .get(name)
                .expect("declare_variables ran over every conjunct before convert");
            Ok(match term {
                Term::Real(r) => Term::Real(r.clone()),
                Term::Int(i) => Term::Int(i.clone()),
                Term::Bool(b) => Term::Bool(b.clone()),
            })
        }
        SymExpr::BinaryOp { left, op, right } => {
            convert_binary(ctx, left, *op, right, declared)
        }
        SymExpr::UnaryOp { op, inner } => convert_unary(ctx, *op, inner, declared),
    }
}

fn convert_binary<'ctx>(
    ctx: &'ctx Z3Context,
    left: &SymExpr,
    op: Operator,
    right: &SymExpr,
    declared: &HashMap<Name, (Type, Term<'ctx>)>,
) -> Result<Term<'ctx>, BridgeError> {
    let l = convert(ctx, left, declared)?;
    let r = convert(ctx, right, declared)?;

    use Operator::*;
    match (l, r) {
        (Term::Real(l), Term::Real(r)) => match op {
            Add => Ok(Term::Real(&l + &r)),
            Sub => Ok(Term::Real(&l - &r)),
            Mul => Ok(Term::Real(&l * &r)),
            Div => Ok(Term::Real(&l / &r)),
            Less => Ok(Term::Bool(l.lt(&r))),
            LessEqual => Ok(Term::Bool(l.le(&r))),
            Greater => Ok(Term::Bool(l.gt(&r))),
            GreaterEqual => Ok(Term::Bool(l.ge(&r))),
            Equal => Ok(Term::Bool(l._eq(&r))),
            And | Or | Not | Sin => Err(BridgeError::TupleInCondition),
        },
        (Term::Int(l), Term::Int(r)) => match op {
            Add => Ok(Term::Int(&l + &r)),
            Sub => Ok(Term::Int(&l - &r)),
            Mul => Ok(Term::Int(&l * &r)),
            Div => Ok(Term::Int(&l / &r)),
            Less => Ok(Term::Bool(l.lt(&r))),
            LessEqual => Ok(Term::Bool(l.le(&r))),
            Greater => Ok(Term::Bool(l.gt(&r))),
            GreaterEqual => Ok(Term::Bool(l.ge(&r))),
            Equal => Ok(Term::Bool(l._eq(&r))),
            And | Or | Not | Sin => Err(BridgeError::TupleInCondition),
        },
        (Term::Bool(l), Term::Bool(r)) => match op {
            And => Ok(Term::Bool(Bool::and(ctx, &[&l, &r]))),
            Or => Ok(Term::Bool(Bool::or(ctx, &[&l, &r]))),
            Equal => Ok(Term::Bool(l._eq(&r))),
            Add | Sub | Mul | Div | Less | LessEqual | Greater | GreaterEqual | Not | Sin => {
                Err(BridgeError::TupleInCondition)
            }
        },
        _ => Err(BridgeError::TupleInCondition),
    }
}

/// Converts an `f64` into a z3 rational by scaling to a fixed-point
/// numerator over a constant denominator, the simplest encoding that
/// avoids z3's `from_real` losing precision outside the `i32` range.
fn real_from_f64<'ctx>(ctx: &'ctx Z3Context, v: f64) -> Real<'ctx> {
    const SCALE: f64 = 1_000_000_000.0;
    let numerator = (v * SCALE).round() as i64;
    Real::from_real_str(ctx, &numerator.to_string(), "1000000000")
        .expect("fixed-point decimal string is always a valid rational literal")
}

fn convert_unary<'ctx>(
    ctx: &'ctx Z3Context,
    op: Operator,
    inner: &SymExpr,
    declared: &HashMap<Name, (Type, Term<'ctx>)>,
) -> Result<Term<'ctx>, BridgeError> {
    let inner = convert(ctx, inner, declared)?;
    match (op, inner) {
        (Operator::Not, Term::Bool(b)) => Ok(Term::Bool(b.not())),
        (Operator::Sin, Term::Real(_)) => {
            // z3 has no transcendental theory reachable from this crate's
            // linear/integer arithmetic setup; a `Sin` conjunct in a path
            // condition is translated as an opaque fresh boolean so the
            // query stays decidable rather than erroring the whole branch.
            Ok(Term::Bool(Bool::fresh_const(ctx, "sin")))
        }
        _ => Err(BridgeError::TupleInCondition),
    }
}
