//! The symbolic expression algebra: what execution results live in.
//!
//! `SymExpr` is a tree parallel to `Expression` (`src/hl_ast.rs`) but
//! contains no control flow, it is a pure algebraic term. Nothing here
//! ever wraps an `Expression`; `src/executor.rs` is the only place that
//! reads the high-level language, and it always produces `SymExpr` leaves
//! or combinators on the way back out.

use std::fmt;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

use crate::hl_ast::{Name, Operator, Type};

/// A symbolic algebraic term.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SymExpr {
    Real(f64),
    Integer(i64),
    Boolean(bool),
    /// A free variable standing for an unknown input of the given type,
    /// the root of every non-trivial path condition.
    Variable { name: Name, var_type: Type },
    Tuple(Vec<SymExpr>),
    BinaryOp {
        left: Rc<SymExpr>,
        op: Operator,
        right: Rc<SymExpr>,
    },
    UnaryOp { op: Operator, inner: Rc<SymExpr> },
}

impl SymExpr {
    pub fn rc(self) -> Rc<SymExpr> {
        Rc::new(self)
    }

    /// The tag this term carries when fully concrete; `None` for anything
    /// containing a free variable, since nominal typing only applies to
    /// the leaves the spec's data model actually tags.
    pub fn concrete_type(&self) -> Option<Type> {
        match self {
            SymExpr::Real(_) => Some(Type::Real),
            SymExpr::Integer(_) => Some(Type::Integer),
            SymExpr::Boolean(_) => Some(Type::Boolean),
            SymExpr::Tuple(_) => Some(Type::Tuple),
            SymExpr::Variable { .. } | SymExpr::BinaryOp { .. } | SymExpr::UnaryOp { .. } => None,
        }
    }

    /// `true` for the three literal leaf variants (not `Variable`, whose
    /// value is unknown even though it is also a leaf).
    pub fn is_concrete_leaf(&self) -> bool {
        matches!(
            self,
            SymExpr::Real(_) | SymExpr::Integer(_) | SymExpr::Boolean(_)
        )
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            SymExpr::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    /// Every `Variable` leaf reachable from this term, used by the SMT
    /// bridge to declare one solver constant per distinct name.
    pub fn variables(&self, out: &mut Vec<(Name, Type)>) {
        match self {
            SymExpr::Variable { name, var_type } => out.push((name.clone(), *var_type)),
            SymExpr::BinaryOp { left, right, .. } => {
                left.variables(out);
                right.variables(out);
            }
            SymExpr::UnaryOp { inner, .. } => inner.variables(out),
            SymExpr::Tuple(elems) => elems.iter().for_each(|e| e.variables(out)),
            SymExpr::Real(_) | SymExpr::Integer(_) | SymExpr::Boolean(_) => {}
        }
    }
}

impl fmt::Display for SymExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SymExpr::Real(v) => write!(f, "{v}"),
            SymExpr::Integer(v) => write!(f, "{v}"),
            SymExpr::Boolean(v) => write!(f, "{v}"),
            SymExpr::Variable { name, .. } => write!(f, "{name}"),
            SymExpr::Tuple(elems) => {
                write!(f, "(")?;
                for (i, e) in elems.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{e}")?;
                }
                write!(f, ")")
            }
            SymExpr::BinaryOp { left, op, right } => {
                write!(f, "({left} {} {right})", op.symbol())
            }
            SymExpr::UnaryOp { op, inner } => match op {
                Operator::Not => write!(f, "!{inner}"),
                _ => write!(f, "{}({inner})", op.symbol()),
            },
        }
    }
}

/// Builds `Not(inner)`, the only unary negation the spec's `Conditional`
/// rule needs when forking on a symbolic condition.
pub fn negate(inner: Rc<SymExpr>) -> Rc<SymExpr> {
    SymExpr::UnaryOp {
        op: Operator::Not,
        inner,
    }
    .rc()
}
