//! Tautology deletion.
//!
//! Deletes clauses that contain a literal together with its exact complement.
//! Complements are compared syntactically, without unification.

use crate::logic::{Clause, ClauseSet};

/// Check if a clause is a tautology
pub fn is_tautology(clause: &Clause) -> bool {
    clause.is_tautology()
}

/// Drop every tautological clause, keeping the order of the rest
pub fn remove_tautologies(mut clauses: ClauseSet) -> ClauseSet {
    clauses.retain(|clause| !is_tautology(clause));
    clauses
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::{Atom, Literal, Term};

    #[test]
    fn test_removes_exact_complements_only() {
        let px = Atom::new("P", vec![Term::var("x")]);
        let py = Atom::new("P", vec![Term::var("y")]);
        let tautology = Clause::new([Literal::positive(px.clone()), Literal::negative(px.clone())]);
        // P(x) ∨ ¬P(y) is not a tautology: x and y may differ
        let unifiable = Clause::new([Literal::positive(px), Literal::negative(py)]);

        let clauses = ClauseSet::from([tautology, unifiable.clone(), Clause::empty()]);
        let kept = remove_tautologies(clauses);
        assert_eq!(kept.len(), 2);
        assert_eq!(kept.get_index(0), Some(&unifiable));
        assert!(kept.contains(&Clause::empty()));
    }
}
