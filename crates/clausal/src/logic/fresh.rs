//! Fresh symbol generation for Skolemization and variable renaming

use super::core::term::{Term, Variable};

/// Prefix reserved for generated names.
///
/// Parser-supplied names never start with it, so generated symbols cannot
/// collide with user symbols.
pub const RESERVED_PREFIX: char = '$';

/// Monotonic generator of fresh variable and Skolem names.
///
/// One generator is threaded through a whole `normalize`/`prove` session;
/// every name it hands out is unique within that session.
#[derive(Debug, Clone, Default)]
pub struct FreshNames {
    skolem_counter: usize,
    variable_counter: usize,
}

impl FreshNames {
    pub fn new() -> Self {
        Self::default()
    }

    /// A fresh Skolem symbol name
    pub fn skolem_name(&mut self) -> String {
        let name = format!("{}sk{}", RESERVED_PREFIX, self.skolem_counter);
        self.skolem_counter += 1;
        name
    }

    /// A fresh Skolem term over `universals` (a constant when there are none)
    pub fn skolem_term(&mut self, universals: &[Variable]) -> Term {
        let name = self.skolem_name();
        if universals.is_empty() {
            Term::constant(name)
        } else {
            Term::function(name, universals.iter().cloned().map(Term::Variable).collect())
        }
    }

    /// A fresh variable
    pub fn variable(&mut self) -> Variable {
        let var = Variable::new(format!("{}v{}", RESERVED_PREFIX, self.variable_counter));
        self.variable_counter += 1;
        var
    }

    /// Number of Skolem symbols introduced so far
    pub fn skolem_count(&self) -> usize {
        self.skolem_counter
    }

    /// Whether `name` was (or could have been) produced by a generator
    pub fn is_reserved(name: &str) -> bool {
        name.starts_with(RESERVED_PREFIX)
    }
}
