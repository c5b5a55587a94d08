//! Most General Unifier (MGU) computation

use super::substitution::Substitution;
use crate::logic::core::literal::{Atom, PredicateSymbol};
use crate::logic::core::term::{FunctionSymbol, Term, Variable};
use thiserror::Error;

/// Result of a unification attempt
pub type UnificationResult = Result<Substitution, UnificationError>;

/// Reasons two terms fail to unify. These are ordinary outcomes, not faults.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UnificationError {
    /// Occurs check failed - variable occurs in term
    #[error("occurs check: {0} occurs in {1}")]
    OccursCheck(Variable, Term),
    /// Head symbols or arities differ
    #[error("symbol mismatch: {}/{} vs {}/{}", .left.name, .left.arity, .right.name, .right.arity)]
    SymbolMismatch {
        left: FunctionSymbol,
        right: FunctionSymbol,
    },
    /// Predicate symbols or arities differ
    #[error("predicate mismatch: {}/{} vs {}/{}", .left.name, .left.arity, .right.name, .right.arity)]
    PredicateMismatch {
        left: PredicateSymbol,
        right: PredicateSymbol,
    },
}

/// Unify two terms, returning a most general unifier (MGU) if one exists
pub fn unify(term1: &Term, term2: &Term) -> UnificationResult {
    unify_many(vec![(term1.clone(), term2.clone())])
}

/// Unify two atoms argument-wise
pub fn unify_atoms(atom1: &Atom, atom2: &Atom) -> UnificationResult {
    if atom1.predicate != atom2.predicate {
        return Err(UnificationError::PredicateMismatch {
            left: atom1.predicate.clone(),
            right: atom2.predicate.clone(),
        });
    }
    unify_many(
        atom1
            .args
            .iter()
            .cloned()
            .zip(atom2.args.iter().cloned())
            .collect(),
    )
}

/// Solve a system of equations with a Robinson-style worklist.
///
/// Each binding `x ↦ t` is applied to the pending equations and to the
/// accumulated substitution as soon as it is made, so the result is
/// idempotent.
pub fn unify_many(mut equations: Vec<(Term, Term)>) -> UnificationResult {
    let mut subst = Substitution::new();

    while let Some((left, right)) = equations.pop() {
        if left == right {
            continue;
        }
        match (left, right) {
            (Term::Variable(v), t) | (t, Term::Variable(v)) => {
                if t.contains_variable(&v) {
                    return Err(UnificationError::OccursCheck(v, t));
                }
                let binding = Substitution::singleton(v, t);
                for (a, b) in equations.iter_mut() {
                    *a = a.apply_substitution(&binding);
                    *b = b.apply_substitution(&binding);
                }
                subst = subst.compose(&binding);
            }
            (Term::Function(f1, args1), Term::Function(f2, args2)) => {
                if f1 != f2 || args1.len() != args2.len() {
                    return Err(UnificationError::SymbolMismatch {
                        left: f1,
                        right: f2,
                    });
                }
                equations.extend(args1.into_iter().zip(args2));
            }
        }
    }

    Ok(subst)
}

/// Check if variable occurs in term (occurs check)
pub fn occurs_check(var: &Variable, term: &Term) -> bool {
    term.contains_variable(var)
}
