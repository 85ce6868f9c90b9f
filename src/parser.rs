//! Surface-syntax parser: out of scope as a feature (see `DESIGN.md`). The
//! grammar sketch below documents the contract this module would
//! implement; the function itself reports
//! [`ExecutionError::Unimplemented`] rather than a working parser.
//!
//! ```text
//! fn name(x: type, …) -> type { body }
//! name: type = expr
//! if cond { then } else { else }
//! { e1; e2; … }
//! types: real | int | bool | tuple
//! operators: + - * / < > <= >= == && || ! sin(expr)
//! ```

use crate::error::{ExecResult, ExecutionError};
use crate::hl_ast::Program;

/// Parses `source` in the surface syntax sketched above into a [`Program`].
///
/// Not implemented: this crate's in-scope surface is the two typed ASTs and
/// the executor that walks them, not the grammar that would produce one
/// from text.
pub fn parse_program(_source: &str) -> ExecResult<Program> {
    Err(ExecutionError::Unimplemented {
        collaborator: "parser::parse_program",
    })
}
