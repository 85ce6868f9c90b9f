#![doc = r#"
# see-reach

A symbolic execution engine for a small typed expression language: real,
integer, boolean, and tuple values; arithmetic, comparison, and logical
operators; conditionals, blocks, assignment, and function calls.

Execution walks the high-level AST ([`hl_ast::Expression`]) and produces,
for each feasible path, a pair of a symbolic value
([`sym_ast::SymExpr`]) and the path condition that must hold to reach it
([`result::EvalResult`]). A conditional on a symbolic value forks
execution into both branches; the optional `smt` feature (on by default)
prunes branches whose path condition is unsatisfiable, via [`smt::Z3Oracle`].

## Quick start

```rust
use see_reach::driver::function_symbolic_execution_unpruned;
use see_reach::hl_ast::{Expression, Function, Operator, Program, Type, TypedVariable, Value};

fn main() {
    let mut program = Program::new("abs_sign");
    program.define(Function {
        name: "abs_sign".to_string(),
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
                then_branch: Expression::Literal(Value::Integer(-1)).rc(),
                else_branch: Expression::Literal(Value::Integer(1)).rc(),
            }
            .rc(),
        )
        .rc(),
    });

    let results = function_symbolic_execution_unpruned(&program, "abs_sign", None).unwrap();
    assert_eq!(results.len(), 2);
}
```
"#]

pub mod algebra_bridge;
pub mod context;
pub mod driver;
pub mod error;
pub mod executor;
pub mod hl_ast;
pub mod parser;
pub mod printer;
pub mod result;
pub mod sym_ast;

#[cfg(feature = "smt")]
pub mod smt;

pub use error::{BridgeError, ExecResult, ExecutionError};
pub use executor::{execute, FeasibilityOracle, NoPruning};
pub use hl_ast::{Expression, Function, Name, Operator, Program, Type, TypedVariable, Value};
pub use result::EvalResult;
pub use sym_ast::SymExpr;
