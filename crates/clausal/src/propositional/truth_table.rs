//! Truth-table checks for propositional formulas

use crate::error::NormalizeError;
use crate::normalize::Formula;
use std::collections::HashSet;

/// Search all interpretations of the formula's variables for one that makes
/// it false. `None` means the formula is a tautology.
///
/// Interpretations are enumerated in binary counting order over the sorted
/// variable names, so the first counterexample found is deterministic.
pub fn find_counterexample(formula: &Formula) -> Result<Option<HashSet<String>>, NormalizeError> {
    let names: Vec<String> = formula.propositional_variables().into_iter().collect();
    let count = names.len();
    if count >= usize::BITS as usize {
        return Err(NormalizeError::TooManyVariables { count });
    }
    for bits in 0..(1usize << count) {
        let interpretation: HashSet<String> = names
            .iter()
            .enumerate()
            .filter(|(i, _)| bits & (1 << i) != 0)
            .map(|(_, name)| name.clone())
            .collect();
        if !formula.evaluate(&interpretation)? {
            return Ok(Some(interpretation));
        }
    }
    Ok(None)
}

/// Check whether a propositional formula is true under every interpretation
pub fn is_tautology(formula: &Formula) -> Result<bool, NormalizeError> {
    Ok(find_counterexample(formula)?.is_none())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_de_morgan_is_tautology() {
        // ¬(p ∨ q) ↔ ¬p ∧ ¬q
        let f = Formula::iff(
            Formula::not(Formula::or(Formula::prop("p"), Formula::prop("q"))),
            Formula::and(Formula::not(Formula::prop("p")), Formula::not(Formula::prop("q"))),
        );
        assert!(is_tautology(&f).unwrap());
    }

    #[test]
    fn test_counterexample() {
        // (p → q) → (¬p → q) → q holds, p → q does not
        let p = Formula::prop("p");
        let q = Formula::prop("q");
        let valid = Formula::implies(
            Formula::implies(p.clone(), q.clone()),
            Formula::implies(Formula::implies(Formula::not(p.clone()), q.clone()), q.clone()),
        );
        assert!(is_tautology(&valid).unwrap());

        let counterexample = find_counterexample(&Formula::implies(p, q)).unwrap().unwrap();
        assert!(counterexample.contains("p"));
        assert!(!counterexample.contains("q"));
    }

    #[test]
    fn test_rejects_first_order() {
        let f = Formula::forall("x", Formula::atom("P", vec![crate::logic::Term::var("x")]));
        assert!(find_counterexample(&f).is_err());
    }

    #[test]
    fn test_rejects_oversized_truth_table() {
        let f = (0..usize::BITS)
            .map(|i| Formula::prop(format!("p{}", i)))
            .reduce(Formula::or)
            .unwrap();
        assert_eq!(
            find_counterexample(&f),
            Err(NormalizeError::TooManyVariables {
                count: usize::BITS as usize
            })
        );
    }
}
