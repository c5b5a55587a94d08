//! Factorization inference rule

use crate::logic::{unify_atoms, Clause, ClauseSet};

/// All factors of `clause`: for every pair of distinct literals of the same
/// polarity whose atoms unify via `μ`, the clause `μ(clause)`.
pub fn factorize(clause: &Clause) -> ClauseSet {
    let mut results = ClauseSet::new();
    let literals: Vec<_> = clause.iter().collect();

    for (i, lit1) in literals.iter().enumerate() {
        for lit2 in &literals[i + 1..] {
            // Must have same polarity and predicate
            if lit1.polarity != lit2.polarity || lit1.atom.predicate != lit2.atom.predicate {
                continue;
            }
            if let Ok(mgu) = unify_atoms(&lit1.atom, &lit2.atom) {
                results.insert(clause.apply_substitution(&mgu));
            }
        }
    }

    results
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::{Atom, Literal, Term};

    #[test]
    fn test_factor_merges_literals() {
        // P(x) ∨ P(a) ∨ Q(x)  factors to  P(a) ∨ Q(a)
        let clause = Clause::new([
            Literal::positive(Atom::new("P", vec![Term::var("x")])),
            Literal::positive(Atom::new("P", vec![Term::constant("a")])),
            Literal::positive(Atom::new("Q", vec![Term::var("x")])),
        ]);
        let factors = factorize(&clause);
        assert_eq!(factors.len(), 1);
        assert!(factors.contains(&Clause::new([
            Literal::positive(Atom::new("P", vec![Term::constant("a")])),
            Literal::positive(Atom::new("Q", vec![Term::constant("a")])),
        ])));
    }

    #[test]
    fn test_no_factor_across_polarity() {
        let clause = Clause::new([
            Literal::positive(Atom::new("P", vec![Term::var("x")])),
            Literal::negative(Atom::new("P", vec![Term::var("y")])),
        ]);
        assert!(factorize(&clause).is_empty());
    }

    #[test]
    fn test_non_unifiable_literals() {
        let clause = Clause::new([
            Literal::positive(Atom::new("P", vec![Term::constant("a")])),
            Literal::positive(Atom::new("P", vec![Term::constant("b")])),
        ]);
        assert!(factorize(&clause).is_empty());
    }
}
