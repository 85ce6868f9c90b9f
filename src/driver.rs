//! The entry point: runs one function of a `Program` symbolically.
//!
//! Grounded in `original_source/seereach/fanalysis.py`'s
//! `function_symbolic_execution`: build a `FunctionCall` to the named entry
//! point, synthesize one fresh symbolic argument per parameter when the
//! caller supplies none, and hand the call to the executor.

use crate::context::Context;
use crate::error::{ExecResult, ExecutionError};
use crate::executor::{self, FeasibilityOracle, NoPruning};
use crate::hl_ast::{Expression, Program};
use crate::result::EvalResult;

/// Symbolically executes `program`'s function named `entry_name`.
///
/// If `symbolic_args` is `None`, one fresh [`Expression::Symbolic`] is
/// synthesized per declared parameter, using the parameter's own name and
/// type, the function is explored over its full signature. If `Some`, the
/// given expressions are used as the call's arguments verbatim, letting a
/// caller mix concrete and symbolic inputs.
pub fn function_symbolic_execution(
    program: &Program,
    entry_name: &str,
    symbolic_args: Option<Vec<Expression>>,
    oracle: &dyn FeasibilityOracle,
) -> ExecResult<Vec<EvalResult>> {
    let function = program
        .functions
        .get(entry_name)
        .ok_or_else(|| ExecutionError::UnknownFunction {
            name: entry_name.to_string(),
        })?;

    let args = match symbolic_args {
        Some(args) => args.into_iter().map(Expression::rc).collect(),
        None => function
            .parameters
            .iter()
            .map(|param| Expression::Symbolic(param.clone()).rc())
            .collect(),
    };

    let call = Expression::FunctionCall {
        name: entry_name.to_string(),
        args,
    };

    let mut context = Context::new();
    executor::execute(&call, &mut context, program, oracle)
}

/// [`function_symbolic_execution`] with no SMT pruning, for callers that
/// only need the forked path enumeration.
pub fn function_symbolic_execution_unpruned(
    program: &Program,
    entry_name: &str,
    symbolic_args: Option<Vec<Expression>>,
) -> ExecResult<Vec<EvalResult>> {
    function_symbolic_execution(program, entry_name, symbolic_args, &NoPruning)
}
