//! Property-based tests for the Davis–Putnam solver using proptest.

use super::solve;
use crate::config::ProverConfig;
use crate::logic::{Clause, ClauseSet, Literal};
use crate::prover::prove_clauses;
use proptest::prelude::*;
use std::collections::HashSet;

const NAMES: [&str; 3] = ["p", "q", "r"];

fn arb_literal() -> impl Strategy<Value = Literal> {
    (0..NAMES.len(), any::<bool>()).prop_map(|(i, positive)| {
        if positive {
            Literal::pos(NAMES[i])
        } else {
            Literal::neg(NAMES[i])
        }
    })
}

fn arb_clause_set() -> impl Strategy<Value = ClauseSet> {
    prop::collection::vec(prop::collection::vec(arb_literal(), 1..=3), 1..8)
        .prop_map(|clauses| clauses.into_iter().map(Clause::new).collect())
}

fn brute_force_satisfiable(clauses: &ClauseSet) -> bool {
    (0..1u32 << NAMES.len()).any(|bits| {
        clauses.iter().all(|clause| {
            clause.iter().any(|lit| {
                let i = NAMES
                    .iter()
                    .position(|name| *name == lit.atom.predicate.name)
                    .unwrap_or(0);
                (bits & (1 << i) != 0) == lit.polarity
            })
        })
    })
}

proptest! {
    /// The solver agrees with an exhaustive truth table
    #[test]
    fn solve_matches_truth_table(clauses in arb_clause_set()) {
        let solution = solve(&clauses, &HashSet::new());
        prop_assert_eq!(solution.is_satisfiable(), brute_force_satisfiable(&clauses));
    }

    /// Every input clause contains a literal asserted by the model
    #[test]
    fn model_satisfies_input(clauses in arb_clause_set()) {
        if let Some(model) = solve(&clauses, &HashSet::new()).model() {
            for clause in &clauses {
                prop_assert!(clause.iter().any(|lit| model.contains(&Clause::unit(lit.clone()))));
            }
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Without a length cap, resolution refutes exactly the unsatisfiable sets
    #[test]
    fn resolution_agrees_with_solver(clauses in arb_clause_set()) {
        let config = ProverConfig {
            max_resolvent_literals: 2 * NAMES.len(),
            ..ProverConfig::default()
        };
        let refuted = prove_clauses(&clauses, &config).is_ok();
        prop_assert_eq!(refuted, !solve(&clauses, &HashSet::new()).is_satisfiable());
    }
}
