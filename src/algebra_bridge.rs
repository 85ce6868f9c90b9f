//! Computer-algebra bridge: out of scope as a feature (see `DESIGN.md`). A
//! real implementation would hand a `SymExpr` to a CAS for simplification
//! (e.g. constant folding across a path condition, or canonicalizing
//! `sin`/`cos` identities) and parse its answer back into a `SymExpr`.
//! This crate's executor never simplifies beyond the concrete folding its
//! own binary-operator rules perform, so this module is a sketch of the
//! seam, not a working translation.

use crate::error::{ExecResult, ExecutionError};
use crate::sym_ast::SymExpr;

/// Simplifies `expr` via an external computer-algebra system.
///
/// Not implemented: no CAS dependency is part of this crate's stack.
pub fn simplify(_expr: &SymExpr) -> ExecResult<SymExpr> {
    Err(ExecutionError::Unimplemented {
        collaborator: "algebra_bridge::simplify",
    })
}
