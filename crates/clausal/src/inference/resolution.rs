//! Binary resolution inference rule

use super::common::rename_apart;
use crate::logic::{unify_atoms, Clause, ClauseSet, FreshNames};

/// All resolvents of `clause1` and `clause2` with at most `max_literals`
/// literals.
///
/// `clause2` is renamed apart first, so a clause may be resolved with itself.
pub fn resolve(
    clause1: &Clause,
    clause2: &Clause,
    fresh: &mut FreshNames,
    max_literals: usize,
) -> ClauseSet {
    let mut results = ClauseSet::new();

    // Rename variables in clause2 to avoid conflicts
    let renamed_clause2 = rename_apart(clause2, fresh);

    for lit1 in clause1 {
        for lit2 in &renamed_clause2 {
            // Check if literals have opposite polarity and same predicate
            if lit1.polarity == lit2.polarity || lit1.atom.predicate != lit2.atom.predicate {
                continue;
            }
            if let Ok(mgu) = unify_atoms(&lit1.atom, &lit2.atom) {
                let resolvent = clause1
                    .without(lit1)
                    .union(&renamed_clause2.without(lit2))
                    .apply_substitution(&mgu);
                if resolvent.len() <= max_literals {
                    results.insert(resolvent);
                }
            }
        }
    }

    results
}
