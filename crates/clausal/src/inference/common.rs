//! Common types and utilities for inference rules

use super::derivation::Derivation;
use crate::logic::{Atom, Clause, FreshNames, Literal, Substitution, Term, Variable};
use std::collections::HashMap;

/// Result of an inference rule application
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InferenceResult {
    pub derivation: Derivation,
    pub conclusion: Clause,
}

/// Rename all variables in a clause to fresh ones
pub fn rename_apart(clause: &Clause, fresh: &mut FreshNames) -> Clause {
    let mut subst = Substitution::new();
    for var in clause.variables() {
        subst.insert(var, Term::Variable(fresh.variable()));
    }
    clause.apply_substitution(&subst)
}

/// Rename the variables of a clause to `$x0`, `$x1`, ... in order of first
/// occurrence, so that clauses differing only in variable names usually
/// become equal.
///
/// Literals are visited in the order of their variable-free skeleton. Two
/// literals with the same skeleton keep their relative order, which can leave
/// a few variants with different canonical forms; that costs duplicate work,
/// never soundness.
pub fn canonicalize(clause: &Clause) -> Clause {
    let mut literals: Vec<&Literal> = clause.iter().collect();
    literals.sort_by_cached_key(|lit| skeleton(lit));

    let mut names: HashMap<Variable, Term> = HashMap::new();
    for lit in &literals {
        lit.atom.visit_variables(&mut |v: &Variable| {
            let next = names.len();
            names
                .entry(v.clone())
                .or_insert_with(|| Term::var(format!("$x{}", next)));
        });
    }

    let subst = Substitution { map: names };
    clause.apply_substitution(&subst)
}

/// The literal with every variable replaced by one placeholder
fn skeleton(lit: &Literal) -> Literal {
    fn mask(term: &Term) -> Term {
        match term {
            Term::Variable(_) => Term::var("$"),
            Term::Function(f, args) => Term::Function(f.clone(), args.iter().map(mask).collect()),
        }
    }
    Literal {
        atom: Atom {
            predicate: lit.atom.predicate.clone(),
            args: lit.atom.args.iter().map(mask).collect(),
        },
        polarity: lit.polarity,
    }
}
