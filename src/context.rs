//! The executor's environment: a multi-valued symbol table plus the path
//! condition accumulated to reach the point currently being evaluated.

use std::collections::HashMap;
use std::rc::Rc;

use crate::hl_ast::Name;
use crate::result::EvalResult;
use crate::sym_ast::SymExpr;

/// The executor's environment at one point in the evaluation tree.
///
/// A `Context` is created by shallow-copying its parent's symbol table and
/// path condition on entry to a subexpression or a forked branch; each
/// `Context` exclusively owns its own copy from then on. Parent linkage is
/// not retained, what matters is that the copy happened, not a chain back
/// to where it happened.
///
/// The value bound to a name is a *list* of `EvalResult`s, one per path that
/// produced a value for it. This is load-bearing, not an optimization: an
/// assignment whose right-hand side forked must let every one of its paths
/// reach later reads of the variable without re-running the right-hand
/// side. Collapsing this to a single value silently drops paths.
#[derive(Debug, Clone, Default)]
pub struct Context {
    symbol_table: HashMap<Name, Vec<EvalResult>>,
    pub path_condition: Vec<Rc<SymExpr>>,
}

impl Context {
    pub fn new() -> Self {
        Context {
            symbol_table: HashMap::new(),
            path_condition: Vec::new(),
        }
    }

    /// A context that inherits `path_condition` but starts with an empty
    /// symbol table, the shape a `FunctionCall` hands to a callee: the
    /// caller's table is not visible inside the function body, only its
    /// accumulated path condition is.
    pub fn with_path_condition(path_condition: Vec<Rc<SymExpr>>) -> Self {
        Context {
            symbol_table: HashMap::new(),
            path_condition,
        }
    }

    /// Binds `name` to the full list of results `value` evaluated to,
    /// replacing any previous binding.
    pub fn bind(&mut self, name: Name, value: Vec<EvalResult>) {
        self.symbol_table.insert(name, value);
    }

    /// The list of results previously bound to `name`, if any.
    pub fn lookup(&self, name: &str) -> Option<&[EvalResult]> {
        self.symbol_table.get(name).map(Vec::as_slice)
    }

    /// A child context for a subexpression: same table, same path
    /// condition, independently owned from here on.
    pub fn fork(&self) -> Self {
        self.clone()
    }

    /// A child context for a branch whose condition pushed one more
    /// conjunct onto the path.
    pub fn fork_with_condition(&self, extra: Rc<SymExpr>) -> Self {
        let mut child = self.clone();
        child.path_condition.push(extra);
        child
    }

    /// A child context sharing this context's symbol table but replacing
    /// its path condition outright, the shape needed when a subexpression
    /// (e.g. a conditional's branch) picked up its own condition-result
    /// path before the parent's table was consulted again.
    pub fn fork_with_path_condition(&self, path_condition: Vec<Rc<SymExpr>>) -> Self {
        let mut child = self.clone();
        child.path_condition = path_condition;
        child
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hl_ast::Type;

    fn dummy_result() -> EvalResult {
        EvalResult::new(SymExpr::Integer(1).rc(), vec![])
    }

    #[test]
    fn fork_does_not_share_a_mutable_table_with_parent() {
        let mut parent = Context::new();
        parent.bind("x".to_string(), vec![dummy_result()]);

        let mut child = parent.fork();
        child.bind("y".to_string(), vec![dummy_result()]);

        assert!(parent.lookup("y").is_none());
        assert!(child.lookup("x").is_some());
    }

    #[test]
    fn fork_with_condition_appends_without_mutating_parent() {
        let parent = Context::new();
        let cond = SymExpr::Variable {
            name: "b".to_string(),
            var_type: Type::Boolean,
        }
        .rc();

        let child = parent.fork_with_condition(cond);
        assert!(parent.path_condition.is_empty());
        assert_eq!(child.path_condition.len(), 1);
    }

    #[test]
    fn rebinding_a_name_replaces_the_whole_list() {
        let mut ctx = Context::new();
        ctx.bind("x".to_string(), vec![dummy_result(), dummy_result()]);
        assert_eq!(ctx.lookup("x").unwrap().len(), 2);
        ctx.bind("x".to_string(), vec![dummy_result()]);
        assert_eq!(ctx.lookup("x").unwrap().len(), 1);
    }
}
