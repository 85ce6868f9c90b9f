//! Builds the "saturating controller" seed program: a control law that
//! inverts and saturates its input into `[-5, 5]`.
//!
//! ```text
//! fn controller(x: real) -> real {
//!     u: real = -1.0 * x;
//!     return if u < -5.0 { -5.0 } else { if u > 5.0 { 5.0 } else { u } }
//! }
//! ```

use see_reach::hl_ast::{Expression, Function, Operator, Program, Type, TypedVariable, Value};

pub fn build() -> Program {
    let mut program = Program::new("controller");
    program.define(Function {
        name: "controller".to_string(),
        parameters: vec![TypedVariable::new("x", Type::Real)],
        return_type: Type::Real,
        body: Expression::Block(vec![
            Expression::Assignment {
                var: TypedVariable::new("u", Type::Real),
                expr: Expression::BinaryOp {
                    left: Expression::Literal(Value::Real(-1.0)).rc(),
                    op: Operator::Mul,
                    right: Expression::Variable("x".to_string()).rc(),
                }
                .rc(),
            }
            .rc(),
            Expression::Return(
                Expression::Conditional {
                    cond: Expression::BinaryOp {
                        left: Expression::Variable("u".to_string()).rc(),
                        op: Operator::Less,
                        right: Expression::Literal(Value::Real(-5.0)).rc(),
                    }
                    .rc(),
                    then_branch: Expression::Literal(Value::Real(-5.0)).rc(),
                    else_branch: Expression::Conditional {
                        cond: Expression::BinaryOp {
                            left: Expression::Variable("u".to_string()).rc(),
                            op: Operator::Greater,
                            right: Expression::Literal(Value::Real(5.0)).rc(),
                        }
                        .rc(),
                        then_branch: Expression::Literal(Value::Real(5.0)).rc(),
                        else_branch: Expression::Variable("u".to_string()).rc(),
                    }
                    .rc(),
                }
                .rc(),
            )
            .rc(),
        ])
        .rc(),
    });
    program
}
