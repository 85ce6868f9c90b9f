//! The typed high-level language: the AST a program is written in.
//!
//! This is the tree the executor walks. It is built once (by a driver, or by
//! one of the `demos/` builders) and shared read-only by every `Context`
//! created while executing it. Subexpressions are `Rc`-wrapped so that
//! forking a context never deep-copies the tree it points into.

use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

/// An identifier: a variable, parameter, or function name.
pub type Name = String;

/// The closed tag set every concrete value and every symbolic term carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Type {
    Real,
    Integer,
    Boolean,
    Tuple,
}

/// A concrete value: a tag paired with its payload.
///
/// All typing in this language is nominal via `Type`; nothing here infers a
/// type from the payload's shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Value {
    Real(f64),
    Integer(i64),
    Boolean(bool),
    Tuple(Vec<Value>),
}

impl Value {
    /// The tag this value carries.
    pub fn value_type(&self) -> Type {
        match self {
            Value::Real(_) => Type::Real,
            Value::Integer(_) => Type::Integer,
            Value::Boolean(_) => Type::Boolean,
            Value::Tuple(_) => Type::Tuple,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Real(v) => write!(f, "{v}"),
            Value::Integer(v) => write!(f, "{v}"),
            Value::Boolean(v) => write!(f, "{v}"),
            Value::Tuple(elems) => {
                write!(f, "(")?;
                for (i, e) in elems.iter().enumerate() {
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

/// The pure operator set. All operators are total except `DIV`, which fails
/// on a concrete zero divisor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Operator {
    Add,
    Sub,
    Mul,
    Div,
    Less,
    LessEqual,
    Greater,
    GreaterEqual,
    Equal,
    And,
    Or,
    Not,
    Sin,
}

impl Operator {
    /// `true` for the operators that take two operands.
    pub fn is_binary(self) -> bool {
        !matches!(self, Operator::Not | Operator::Sin)
    }

    /// The infix/prefix symbol used by the printer and by the surface
    /// grammar sketch in `src/parser.rs`.
    pub fn symbol(self) -> &'static str {
        match self {
            Operator::Add => "+",
            Operator::Sub => "-",
            Operator::Mul => "*",
            Operator::Div => "/",
            Operator::Less => "<",
            Operator::LessEqual => "<=",
            Operator::Greater => ">",
            Operator::GreaterEqual => ">=",
            Operator::Equal => "==",
            Operator::And => "&&",
            Operator::Or => "||",
            Operator::Not => "!",
            Operator::Sin => "sin",
        }
    }
}

/// A binding site: a parameter, or the left-hand side of an assignment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypedVariable {
    pub name: Name,
    pub var_type: Type,
}

impl TypedVariable {
    pub fn new(name: impl Into<Name>, var_type: Type) -> Self {
        TypedVariable {
            name: name.into(),
            var_type,
        }
    }
}

/// One node of the high-level expression tree.
///
/// This is a closed sum type: adding a variant means updating every match
/// over `Expression` in `src/executor.rs`, which is the point. There is no
/// open class hierarchy to silently miss a case in.
#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    /// A constant.
    Literal(Value),
    /// A lookup in the symbol table.
    Variable(Name),
    /// A binding site appearing in an assignment's left-hand side.
    TypedVariable(TypedVariable),
    /// A symbolic input injected directly into an expression position,
    /// how a driver feeds a free variable as a function argument instead
    /// of a concrete `Literal`. Carries its own type since, unlike
    /// `Variable`, it has no prior binding to recover one from.
    Symbolic(TypedVariable),
    /// A pure binary expression.
    BinaryOp {
        left: Rc<Expression>,
        op: Operator,
        right: Rc<Expression>,
    },
    /// A pure unary expression (`Not` or `Sin`).
    UnaryOp { op: Operator, inner: Rc<Expression> },
    /// An applicative call to a function in the enclosing `Program`.
    FunctionCall {
        name: Name,
        args: Vec<Rc<Expression>>,
    },
    /// A three-way node: both branches are expressions.
    Conditional {
        cond: Rc<Expression>,
        then_branch: Rc<Expression>,
        else_branch: Rc<Expression>,
    },
    /// Sequential evaluation; value is the last non-`Return` expression's
    /// value, unless an internal `Return` short-circuits the block.
    Block(Vec<Rc<Expression>>),
    /// Binds `expr`'s value under `var.name` in the current symbol table.
    /// The assignment's own value is `expr`'s value, per the Block
    /// semantics that depend on it.
    Assignment {
        var: TypedVariable,
        expr: Rc<Expression>,
    },
    /// Marks its value as a return from the enclosing function.
    Return(Rc<Expression>),
    /// A cartesian combination of sub-results, in declaration order.
    TupleExpression(Vec<Rc<Expression>>),
}

impl Expression {
    /// Wraps this expression in an `Rc`, the shape every constructor field
    /// above expects.
    pub fn rc(self) -> Rc<Expression> {
        Rc::new(self)
    }
}

/// A pure function: a name, its typed parameters, its declared return type,
/// and its body expression.
#[derive(Debug, Clone, PartialEq)]
pub struct Function {
    pub name: Name,
    pub parameters: Vec<TypedVariable>,
    pub return_type: Type,
    pub body: Rc<Expression>,
}

/// A program: a keyed mapping from function name to function, plus a
/// designated entry point. Function names are globally unique within a
/// program.
#[derive(Debug, Clone, Default)]
pub struct Program {
    pub functions: HashMap<Name, Rc<Function>>,
    pub entry: Name,
}

impl Program {
    pub fn new(entry: impl Into<Name>) -> Self {
        Program {
            functions: HashMap::new(),
            entry: entry.into(),
        }
    }

    /// Registers a function, keyed by its own name.
    pub fn define(&mut self, function: Function) -> &mut Self {
        self.functions.insert(function.name.clone(), Rc::new(function));
        self
    }

    pub fn entry_function(&self) -> Option<&Rc<Function>> {
        self.functions.get(&self.entry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn value_type_tags_match_payload() {
        assert_eq!(Value::Real(1.0).value_type(), Type::Real);
        assert_eq!(Value::Integer(1).value_type(), Type::Integer);
        assert_eq!(Value::Boolean(true).value_type(), Type::Boolean);
        assert_eq!(
            Value::Tuple(vec![Value::Integer(1)]).value_type(),
            Type::Tuple
        );
    }

    #[test]
    fn program_entry_lookup() {
        let mut program = Program::new("foo");
        program.define(Function {
            name: "foo".to_string(),
            parameters: vec![],
            return_type: Type::Integer,
            body: Expression::Return(Expression::Literal(Value::Integer(1)).rc()).rc(),
        });
        assert!(program.entry_function().is_some());
        assert!(program.functions.get("bar").is_none());
    }
}
