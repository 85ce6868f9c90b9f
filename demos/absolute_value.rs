//! Builds the "absolute-value sign" seed program: a three-way sign
//! function whose return value depends on two nested comparisons against a
//! symbolic integer.
//!
//! ```text
//! fn abs_sign(x: int) -> int {
//!     return if x < 0 { -1 } else { if x == 0 { 0 } else { 5 } }
//! }
//! ```

use see_reach::hl_ast::{Expression, Function, Operator, Program, Type, TypedVariable, Value};

pub fn build() -> Program {
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
                else_branch: Expression::Conditional {
                    cond: Expression::BinaryOp {
                        left: Expression::Variable("x".to_string()).rc(),
                        op: Operator::Equal,
                        right: Expression::Literal(Value::Integer(0)).rc(),
                    }
                    .rc(),
                    then_branch: Expression::Literal(Value::Integer(0)).rc(),
                    else_branch: Expression::Literal(Value::Integer(5)).rc(),
                }
                .rc(),
            }
            .rc(),
        )
        .rc(),
    });
    program
}
