//! Textual rendering: `EvalResult` in the report format this crate's output
//! contract mandates, and `Program`/`Function` in the surface syntax
//! sketched for `src/parser.rs`'s grammar.
//!
//! This is a pure tree-walk with no parsing responsibility. The inverse
//! direction (`src/parser.rs`) is out of scope, so there is no round-trip
//! to maintain here beyond matching the format the grammar sketch implies.

use std::fmt;

use crate::hl_ast::{Expression, Function, Operator, Program, TypedVariable, Type};
use crate::result::EvalResult;

/// Renders one `EvalResult` as:
/// ```text
/// Expr: <value>
/// Path Condition(s):
/// <conjunct>
/// <conjunct>
/// ```
/// or `<NONE>` in place of the conjunct list when the path condition is
/// empty.
pub fn format_result(result: &EvalResult) -> String {
    let mut out = format!("Expr: {}\n", result.value);
    out.push_str("Path Condition(s):\n");
    if result.path_condition.is_empty() {
        out.push_str("<NONE>\n");
    } else {
        for conjunct in &result.path_condition {
            out.push_str(&format!("{conjunct}\n"));
        }
    }
    out
}

/// Renders every result in `results`, separated by a blank line.
pub fn format_results(results: &[EvalResult]) -> String {
    results
        .iter()
        .map(format_result)
        .collect::<Vec<_>>()
        .join("\n")
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Type::Real => "real",
            Type::Integer => "int",
            Type::Boolean => "bool",
            Type::Tuple => "tuple",
        };
        write!(f, "{name}")
    }
}

impl fmt::Display for TypedVariable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.name, self.var_type)
    }
}

impl fmt::Display for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "fn {}(", self.name)?;
        for (i, param) in self.parameters.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{param}")?;
        }
        write!(f, ") -> {} {{ {} }}", self.return_type, self.body)
    }
}

impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<&String> = self.functions.keys().collect();
        names.sort();
        for (i, name) in names.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{}", self.functions[*name])?;
        }
        Ok(())
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expression::Literal(value) => write!(f, "{value}"),
            Expression::Variable(name) => write!(f, "{name}"),
            Expression::TypedVariable(var) | Expression::Symbolic(var) => write!(f, "{var}"),
            Expression::BinaryOp { left, op, right } => {
                write!(f, "({left} {} {right})", op.symbol())
            }
            Expression::UnaryOp { op, inner } => match op {
                Operator::Not => write!(f, "!{inner}"),
                _ => write!(f, "{}({inner})", op.symbol()),
            },
            Expression::FunctionCall { name, args } => {
                write!(f, "{name}(")?;
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{arg}")?;
                }
                write!(f, ")")
            }
            Expression::Conditional {
                cond,
                then_branch,
                else_branch,
            } => write!(f, "if {cond} {{ {then_branch} }} else {{ {else_branch} }}"),
            Expression::Block(exprs) => {
                write!(f, "{{ ")?;
                for (i, e) in exprs.iter().enumerate() {
                    if i > 0 {
                        write!(f, "; ")?;
                    }
                    write!(f, "{e}")?;
                }
                write!(f, " }}")
            }
            Expression::Assignment { var, expr } => write!(f, "{var} = {expr}"),
            Expression::Return(inner) => write!(f, "return {inner}"),
            Expression::TupleExpression(elements) => {
                write!(f, "(")?;
                for (i, e) in elements.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{e}")?;
                }
                write!(f, ")")
            }
        }
    }
}
