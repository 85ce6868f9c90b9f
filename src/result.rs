//! The per-path evaluation result: a symbolic value paired with the branch
//! conditions that must hold to reach it.

use std::rc::Rc;

use crate::sym_ast::SymExpr;

/// One feasible path's outcome.
///
/// `path_condition` is interpreted as a conjunction; its order is the order
/// conditions were discovered in, not a claim about semantics. `is_return`
/// is transient: set while a `Return` propagates up through a `Block`, and
/// cleared at the `FunctionCall` boundary that returns control to a caller.
#[derive(Debug, Clone, PartialEq)]
pub struct EvalResult {
    pub value: Rc<SymExpr>,
    pub path_condition: Vec<Rc<SymExpr>>,
    pub is_return: bool,
}

impl EvalResult {
    pub fn new(value: Rc<SymExpr>, path_condition: Vec<Rc<SymExpr>>) -> Self {
        EvalResult {
            value,
            path_condition,
            is_return: false,
        }
    }

    /// Returns a copy of this result with `is_return` set, used by the
    /// `Return` rule.
    pub fn into_return(mut self) -> Self {
        self.is_return = true;
        self
    }

    /// Returns a copy of this result with `is_return` cleared, used at a
    /// `FunctionCall` boundary before a return-marked result is handed back
    /// to the caller.
    pub fn stripped_of_return(mut self) -> Self {
        self.is_return = false;
        self
    }

    /// Returns a copy of this result with `extra` appended to its path
    /// condition. Path-condition lists are treated as append-only via
    /// cloning on extension, no two results ever share a mutable tail.
    pub fn extend_condition(&self, extra: &[Rc<SymExpr>]) -> Self {
        let mut path_condition = self.path_condition.clone();
        path_condition.extend(extra.iter().cloned());
        EvalResult {
            value: self.value.clone(),
            path_condition,
            is_return: self.is_return,
        }
    }

    /// Returns a copy of this result with one extra conjunct appended.
    pub fn push_condition(&self, extra: Rc<SymExpr>) -> Self {
        self.extend_condition(std::slice::from_ref(&extra))
    }

    /// The flattening law: in a well-typed implementation `value` is never
    /// itself a nested result (there is no Rust type that would let it be,
    /// `SymExpr` cannot wrap an `EvalResult`), so this is the identity
    /// function. It exists, and is tested for idempotence below, purely to
    /// keep the safety-net operation the interpreter's contract mandates
    /// representable even though this crate's executor never needs it.
    pub fn flatten(self) -> Self {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hl_ast::Type;

    fn var(name: &str) -> Rc<SymExpr> {
        SymExpr::Variable {
            name: name.to_string(),
            var_type: Type::Integer,
        }
        .rc()
    }

    #[test]
    fn flatten_is_idempotent() {
        let r = EvalResult::new(SymExpr::Integer(5).rc(), vec![var("x")]);
        assert_eq!(r.clone().flatten(), r.clone().flatten().flatten());
    }

    #[test]
    fn extend_condition_does_not_mutate_the_original() {
        let r = EvalResult::new(SymExpr::Integer(5).rc(), vec![var("x")]);
        let extended = r.push_condition(var("y"));
        assert_eq!(r.path_condition.len(), 1);
        assert_eq!(extended.path_condition.len(), 2);
    }

    #[test]
    fn return_mark_round_trips() {
        let r = EvalResult::new(SymExpr::Integer(1).rc(), vec![]);
        assert!(!r.is_return);
        let marked = r.into_return();
        assert!(marked.is_return);
        let stripped = marked.stripped_of_return();
        assert!(!stripped.is_return);
    }
}
