//! Error types for symbolic execution.
//!
//! This module defines the error types produced while walking the HL-AST
//! (`ExecutionError`) and while bridging a path condition to the SMT solver
//! (`BridgeError`). Errors carry the offending name where one is available:
//! failures are descriptive enough to point a caller at the broken function
//! or variable without re-walking the program.

use std::fmt;
use std::result;

use crate::hl_ast::{Name, Type};

/// Result type used throughout the executor.
pub type ExecResult<T> = result::Result<T, ExecutionError>;

/// Errors that can abort an `execute` call.
///
/// Every variant here corresponds to one row of the failure-semantics table:
/// an unknown name, a type mismatch during concrete folding, or a concrete
/// division by zero. All of them are fatal to the enclosing `execute` call;
/// none are retried or repaired internally.
#[derive(Debug, Clone, PartialEq)]
pub enum ExecutionError {
    /// A `Variable` expression referenced a name with no binding in scope.
    UnknownVariable {
        /// The name that was looked up.
        name: Name,
    },
    /// A `FunctionCall` targeted a function absent from the program.
    UnknownFunction {
        /// The name that was called.
        name: Name,
    },
    /// A concrete operator fold was attempted on operands of the wrong type.
    TypeMismatch {
        /// What the operator expected.
        expected: Type,
        /// What it actually got.
        found: Type,
    },
    /// A concrete `DIV` was attempted with a concrete zero divisor.
    DivisionByZero,
    /// A collaborator (surface parser, algebra bridge) that this crate
    /// sketches but does not implement.
    Unimplemented {
        /// Which collaborator was invoked.
        collaborator: &'static str,
    },
    /// The SMT bridge failed to translate a path condition.
    Bridge(BridgeError),
}

impl fmt::Display for ExecutionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExecutionError::UnknownVariable { name } => {
                write!(f, "unknown variable: '{name}'")
            }
            ExecutionError::UnknownFunction { name } => {
                write!(f, "unknown function: '{name}'")
            }
            ExecutionError::TypeMismatch { expected, found } => {
                write!(f, "type mismatch: expected {expected:?}, found {found:?}")
            }
            ExecutionError::DivisionByZero => write!(f, "division by zero"),
            ExecutionError::Unimplemented { collaborator } => {
                write!(f, "'{collaborator}' is not implemented by this crate")
            }
            ExecutionError::Bridge(err) => write!(f, "SMT bridge error: {err}"),
        }
    }
}

impl std::error::Error for ExecutionError {}

impl From<BridgeError> for ExecutionError {
    fn from(err: BridgeError) -> Self {
        ExecutionError::Bridge(err)
    }
}

/// Errors raised while converting a path condition into a solver query.
#[derive(Debug, Clone, PartialEq)]
pub enum BridgeError {
    /// A tuple-valued term appeared in a path condition. Branch conditions
    /// are always boolean-valued; the spec forbids guessing a tuple
    /// encoding rather than reproducing the source's broken one.
    TupleInCondition,
    /// A symbolic variable was referenced under two different declared
    /// types, which would require two different solver sorts for one name.
    InconsistentVariableType {
        /// The variable's name.
        name: Name,
    },
}

impl fmt::Display for BridgeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BridgeError::TupleInCondition => {
                write!(f, "tuple-valued term in a path condition")
            }
            BridgeError::InconsistentVariableType { name } => {
                write!(f, "variable '{name}' used with two different types")
            }
        }
    }
}

impl std::error::Error for BridgeError {}
