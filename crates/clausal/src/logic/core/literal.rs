//! Atoms and literals in first-order logic

use super::term::{Term, Variable};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// A predicate symbol with arity
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PredicateSymbol {
    pub name: String,
    pub arity: usize,
}

impl PredicateSymbol {
    pub fn new(name: impl Into<String>, arity: usize) -> Self {
        PredicateSymbol {
            name: name.into(),
            arity,
        }
    }
}

/// An atomic formula (predicate applied to terms).
///
/// A propositional variable is a 0-ary atom.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Atom {
    pub predicate: PredicateSymbol,
    pub args: Vec<Term>,
}

impl Atom {
    /// Create an atom; the arity is taken from `args`
    pub fn new(name: impl Into<String>, args: Vec<Term>) -> Self {
        Atom {
            predicate: PredicateSymbol::new(name, args.len()),
            args,
        }
    }

    /// Create a propositional variable
    pub fn proposition(name: impl Into<String>) -> Self {
        Atom::new(name, Vec::new())
    }

    pub fn is_propositional(&self) -> bool {
        self.args.is_empty()
    }

    pub fn is_ground(&self) -> bool {
        self.args.iter().all(Term::is_ground)
    }

    /// Collect all variables in this atom
    pub fn collect_variables(&self, vars: &mut BTreeSet<Variable>) {
        for term in &self.args {
            term.collect_variables(vars);
        }
    }

    /// Call `f` on every variable occurrence, left to right
    pub fn visit_variables<F: FnMut(&Variable)>(&self, f: &mut F) {
        for term in &self.args {
            term.visit_variables(f);
        }
    }
}

/// A literal (positive or negative atom)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Literal {
    pub atom: Atom,
    pub polarity: bool, // true = positive, false = negative
}

impl Literal {
    /// Create a new positive literal
    pub fn positive(atom: Atom) -> Self {
        Literal {
            atom,
            polarity: true,
        }
    }

    /// Create a new negative literal
    pub fn negative(atom: Atom) -> Self {
        Literal {
            atom,
            polarity: false,
        }
    }

    /// Positive propositional literal `+name`
    pub fn pos(name: impl Into<String>) -> Self {
        Literal::positive(Atom::proposition(name))
    }

    /// Negative propositional literal `-name`
    pub fn neg(name: impl Into<String>) -> Self {
        Literal::negative(Atom::proposition(name))
    }

    /// Get the complement of this literal
    pub fn complement(&self) -> Literal {
        Literal {
            atom: self.atom.clone(),
            polarity: !self.polarity,
        }
    }

    /// Exact syntactic complement check (no unification)
    pub fn is_complement_of(&self, other: &Literal) -> bool {
        self.polarity != other.polarity && self.atom == other.atom
    }

    /// Collect all variables in this literal
    pub fn collect_variables(&self, vars: &mut BTreeSet<Variable>) {
        self.atom.collect_variables(vars);
    }
}

impl fmt::Display for Atom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.predicate.name)?;
        if !self.args.is_empty() {
            write!(f, "(")?;
            for (i, arg) in self.args.iter().enumerate() {
                if i > 0 {
                    write!(f, ",")?;
                }
                write!(f, "{}", arg)?;
            }
            write!(f, ")")?;
        }
        Ok(())
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.polarity {
            write!(f, "¬")?;
        }
        write!(f, "{}", self.atom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_complement() {
        let p = Literal::pos("p");
        assert_eq!(p.complement(), Literal::neg("p"));
        assert_eq!(p.complement().complement(), p);
        assert!(p.is_complement_of(&Literal::neg("p")));
        assert!(!p.is_complement_of(&Literal::neg("q")));
    }

    #[test]
    fn test_display() {
        let atom = Atom::new("Child", vec![Term::var("y"), Term::constant("bob")]);
        assert_eq!(Literal::negative(atom).to_string(), "¬Child(y,bob)");
        assert_eq!(Literal::pos("p").to_string(), "p");
    }
}
