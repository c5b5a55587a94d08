//! Variable substitutions

use crate::logic::core::clause::{Clause, ClauseSet};
use crate::logic::core::literal::{Atom, Literal};
use crate::logic::core::term::{Term, Variable};
use std::collections::HashMap;
use std::fmt;

/// A finite substitution mapping variables to terms.
///
/// Application is simultaneous: every variable in the domain is replaced in
/// one pass, and the replacement terms are not rewritten again.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Substitution {
    pub map: HashMap<Variable, Term>,
}

impl Substitution {
    /// Create a new empty substitution
    pub fn new() -> Self {
        Substitution {
            map: HashMap::new(),
        }
    }

    /// The one-binding substitution `{var ↦ term}`
    pub fn singleton(var: Variable, term: Term) -> Self {
        let mut subst = Substitution::new();
        subst.insert(var, term);
        subst
    }

    /// Add a variable -> term mapping
    pub fn insert(&mut self, var: Variable, term: Term) {
        self.map.insert(var, term);
    }

    /// Compose two substitutions: the result applied to a term equals
    /// applying `self` first and then `other`.
    ///
    /// A variable bound by both keeps the binding of `self` (with `other`
    /// applied to it), since `other` never sees that variable.
    pub fn compose(&self, other: &Substitution) -> Substitution {
        let mut result = Substitution::new();

        // Apply other to all terms in self
        for (var, term) in &self.map {
            let term = term.apply_substitution(other);
            // x ↦ x bindings are identities and are dropped
            if term.as_variable() != Some(var) {
                result.insert(var.clone(), term);
            }
        }

        // Add mappings from other that aren't in self
        for (var, term) in &other.map {
            if !self.map.contains_key(var) {
                result.insert(var.clone(), term.clone());
            }
        }

        result
    }

    /// Get the term for a variable, if bound
    pub fn get(&self, var: &Variable) -> Option<&Term> {
        self.map.get(var)
    }

    /// Check if a variable is bound
    pub fn contains(&self, var: &Variable) -> bool {
        self.map.contains_key(var)
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Check whether applying this substitution twice equals applying it once
    pub fn is_idempotent(&self) -> bool {
        self.map
            .values()
            .all(|term| term.variables().iter().all(|v| !self.contains(v)))
    }
}

impl fmt::Display for Substitution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut bindings: Vec<_> = self.map.iter().collect();
        bindings.sort();
        write!(f, "{{")?;
        for (i, (var, term)) in bindings.into_iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{} ↦ {}", var, term)?;
        }
        write!(f, "}}")
    }
}

impl Term {
    /// Apply a substitution to this term
    pub fn apply_substitution(&self, subst: &Substitution) -> Term {
        match self {
            Term::Variable(v) => subst.map.get(v).cloned().unwrap_or_else(|| self.clone()),
            Term::Function(f, args) => {
                let new_args = args
                    .iter()
                    .map(|arg| arg.apply_substitution(subst))
                    .collect();
                Term::Function(f.clone(), new_args)
            }
        }
    }
}

impl Atom {
    /// Apply a substitution to this atom
    pub fn apply_substitution(&self, subst: &Substitution) -> Atom {
        Atom {
            predicate: self.predicate.clone(),
            args: self
                .args
                .iter()
                .map(|arg| arg.apply_substitution(subst))
                .collect(),
        }
    }
}

impl Literal {
    /// Apply a substitution to this literal
    pub fn apply_substitution(&self, subst: &Substitution) -> Literal {
        Literal {
            atom: self.atom.apply_substitution(subst),
            polarity: self.polarity,
        }
    }
}

impl Clause {
    /// Apply a substitution to this clause; literals that become equal merge
    pub fn apply_substitution(&self, subst: &Substitution) -> Clause {
        Clause {
            literals: self
                .literals
                .iter()
                .map(|lit| lit.apply_substitution(subst))
                .collect(),
        }
    }
}

/// Apply a substitution pointwise to a clause set
pub fn apply_to_clause_set(clauses: &ClauseSet, subst: &Substitution) -> ClauseSet {
    clauses
        .iter()
        .map(|clause| clause.apply_substitution(subst))
        .collect()
}
