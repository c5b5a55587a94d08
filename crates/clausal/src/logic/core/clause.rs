//! Clauses and clause sets

use super::literal::Literal;
use super::term::Variable;
use indexmap::IndexSet;
use serde::{Deserialize, Serialize};
use std::collections::{btree_set, BTreeSet};
use std::fmt;

/// A clause: a set of literals read as their disjunction.
///
/// Literals are kept in a `BTreeSet`, so duplicates collapse and two clauses
/// with the same literals compare and hash equal regardless of build order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Clause {
    pub literals: BTreeSet<Literal>,
}

/// A clause set: a conjunction of clauses, in insertion order.
pub type ClauseSet = IndexSet<Clause>;

impl Clause {
    /// Create a new clause from literals
    pub fn new(literals: impl IntoIterator<Item = Literal>) -> Self {
        Clause {
            literals: literals.into_iter().collect(),
        }
    }

    /// The empty clause (falsum)
    pub fn empty() -> Self {
        Clause::default()
    }

    pub fn unit(literal: Literal) -> Self {
        Clause::new([literal])
    }

    /// Check if this clause is empty (contradiction)
    pub fn is_empty(&self) -> bool {
        self.literals.is_empty()
    }

    pub fn is_unit(&self) -> bool {
        self.literals.len() == 1
    }

    /// The literal of a unit clause
    pub fn unit_literal(&self) -> Option<&Literal> {
        if self.is_unit() {
            self.literals.iter().next()
        } else {
            None
        }
    }

    pub fn len(&self) -> usize {
        self.literals.len()
    }

    pub fn contains(&self, literal: &Literal) -> bool {
        self.literals.contains(literal)
    }

    pub fn iter(&self) -> btree_set::Iter<'_, Literal> {
        self.literals.iter()
    }

    /// This clause with `literal` removed
    pub fn without(&self, literal: &Literal) -> Clause {
        Clause {
            literals: self.literals.iter().filter(|l| *l != literal).cloned().collect(),
        }
    }

    /// Disjunction of two clauses
    pub fn union(&self, other: &Clause) -> Clause {
        Clause {
            literals: self.literals.union(&other.literals).cloned().collect(),
        }
    }

    /// Check for a literal together with its exact complement
    pub fn is_tautology(&self) -> bool {
        self.literals
            .iter()
            .filter(|l| l.polarity)
            .any(|l| self.literals.contains(&l.complement()))
    }

    /// All variables of this clause
    pub fn variables(&self) -> BTreeSet<Variable> {
        let mut vars = BTreeSet::new();
        for lit in &self.literals {
            lit.collect_variables(&mut vars);
        }
        vars
    }
}

impl FromIterator<Literal> for Clause {
    fn from_iter<I: IntoIterator<Item = Literal>>(iter: I) -> Self {
        Clause::new(iter)
    }
}

impl<'a> IntoIterator for &'a Clause {
    type Item = &'a Literal;
    type IntoIter = btree_set::Iter<'a, Literal>;

    fn into_iter(self) -> Self::IntoIter {
        self.literals.iter()
    }
}

impl fmt::Display for Clause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            write!(f, "⊥")
        } else {
            for (i, lit) in self.literals.iter().enumerate() {
                if i > 0 {
                    write!(f, " ∨ ")?;
                }
                write!(f, "{}", lit)?;
            }
            Ok(())
        }
    }
}
