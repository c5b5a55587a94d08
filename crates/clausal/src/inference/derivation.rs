//! Clause derivation tracking.
//!
//! Records how each clause was derived (inference rule + premises).

use crate::logic::{Clause, ClauseSet};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Inference rules of the resolution calculus
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Rule {
    Axiom,
    Factorization,
    Resolution,
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Rule::Axiom => "Axiom",
            Rule::Factorization => "Factorization",
            Rule::Resolution => "Resolution",
        };
        write!(f, "{}", name)
    }
}

/// How a clause was derived: the rule and the indices of its premises in the
/// [`ProofTrace`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Derivation {
    pub rule: Rule,
    pub premises: Vec<usize>,
}

impl Derivation {
    /// An input clause (no premises)
    pub fn axiom() -> Self {
        Derivation {
            rule: Rule::Axiom,
            premises: vec![],
        }
    }

    pub fn factorization(premise: usize) -> Self {
        Derivation {
            rule: Rule::Factorization,
            premises: vec![premise],
        }
    }

    pub fn resolution(left: usize, right: usize) -> Self {
        Derivation {
            rule: Rule::Resolution,
            premises: vec![left, right],
        }
    }
}

/// Every clause seen during saturation with the first justification found
/// for it.
///
/// Clauses are indexed in insertion order; premises always have smaller
/// indices than the clauses derived from them.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProofTrace {
    clauses: ClauseSet,
    derivations: Vec<Derivation>,
}

impl ProofTrace {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `clause` unless it is already present. Returns its index when
    /// it was new.
    pub fn record(&mut self, clause: Clause, derivation: Derivation) -> Option<usize> {
        let (idx, inserted) = self.clauses.insert_full(clause);
        if inserted {
            self.derivations.push(derivation);
            Some(idx)
        } else {
            None
        }
    }

    pub fn index_of(&self, clause: &Clause) -> Option<usize> {
        self.clauses.get_index_of(clause)
    }

    pub fn clause(&self, idx: usize) -> Option<&Clause> {
        self.clauses.get_index(idx)
    }

    pub fn derivation(&self, idx: usize) -> Option<&Derivation> {
        self.derivations.get(idx)
    }

    pub fn contains(&self, clause: &Clause) -> bool {
        self.clauses.contains(clause)
    }

    /// All clauses, in the order they were recorded
    pub fn clauses(&self) -> &ClauseSet {
        &self.clauses
    }

    pub fn len(&self) -> usize {
        self.clauses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    pub fn into_clauses(self) -> ClauseSet {
        self.clauses
    }
}
