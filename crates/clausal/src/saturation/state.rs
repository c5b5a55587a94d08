//! Saturation state and algorithm
//!
//! The loop works in rounds. Each round forms every resolvent between two
//! clauses of the current set (a clause may be paired with itself) and every
//! factor, and records the conclusions not seen before together with their
//! first justification. It stops when the empty clause appears or when a round
//! adds nothing.
//!
//! ## Incremental rounds
//!
//! A pair of clauses that were both present in an earlier round produces
//! nothing new, so each round only pairs clauses where at least one side was
//! added by the previous round. With canonical variable names for derived
//! clauses this reaches the same fixed point as re-running all pairs.
//!
//! There is no clause selection, subsumption or resource limit. On problems
//! with infinitely many distinct consequences the loop does not terminate.

use crate::config::ProverConfig;
use crate::inference::{
    canonicalize, factorize, resolve, Derivation, InferenceResult, ProofTrace,
};
use crate::logic::{Clause, ClauseSet, FreshNames};
use tracing::{debug, info};

/// Result of saturation
#[derive(Debug, Clone)]
pub enum SaturationResult {
    /// Empty clause derived
    Refutation(ProofTrace),
    /// Fixed point reached without the empty clause
    Saturated(ProofTrace),
}

impl SaturationResult {
    pub fn is_refutation(&self) -> bool {
        matches!(self, SaturationResult::Refutation(_))
    }

    pub fn trace(&self) -> &ProofTrace {
        match self {
            SaturationResult::Refutation(trace) | SaturationResult::Saturated(trace) => trace,
        }
    }

    pub fn into_trace(self) -> ProofTrace {
        match self {
            SaturationResult::Refutation(trace) | SaturationResult::Saturated(trace) => trace,
        }
    }
}

/// All conclusions of one inference step over `clauses`.
///
/// Premise indices refer to positions in `clauses`.
pub fn infer(clauses: &ClauseSet, fresh: &mut FreshNames, config: &ProverConfig) -> Vec<InferenceResult> {
    infer_from(clauses, 0, fresh, config)
}

/// Inferences in which at least one premise has index `>= first_new`
fn infer_from(
    clauses: &ClauseSet,
    first_new: usize,
    fresh: &mut FreshNames,
    config: &ProverConfig,
) -> Vec<InferenceResult> {
    let mut results = Vec::new();
    let finish = |clause: Clause| {
        if config.canonicalize_derived {
            canonicalize(&clause)
        } else {
            clause
        }
    };

    for (i, c1) in clauses.iter().enumerate() {
        for (j, c2) in clauses.iter().enumerate() {
            if i < first_new && j < first_new {
                continue;
            }
            for conclusion in resolve(c1, c2, fresh, config.max_resolvent_literals) {
                results.push(InferenceResult {
                    derivation: Derivation::resolution(i, j),
                    conclusion: finish(conclusion),
                });
            }
        }
    }

    for (i, clause) in clauses.iter().enumerate().skip(first_new) {
        for conclusion in factorize(clause) {
            results.push(InferenceResult {
                derivation: Derivation::factorization(i),
                conclusion: finish(conclusion),
            });
        }
    }

    results
}

/// Saturation state: the proof trace plus the bookkeeping for incremental
/// rounds
pub struct SaturationState<'a> {
    trace: ProofTrace,
    /// Trace indices below this were already paired with each other
    processed: usize,
    round: usize,
    config: ProverConfig,
    fresh: &'a mut FreshNames,
}

impl<'a> SaturationState<'a> {
    /// Start from the given input clauses
    pub fn new(clauses: &ClauseSet, config: ProverConfig, fresh: &'a mut FreshNames) -> Self {
        let mut trace = ProofTrace::new();
        for clause in clauses {
            trace.record(clause.clone(), Derivation::axiom());
        }
        SaturationState {
            trace,
            processed: 0,
            round: 0,
            config,
            fresh,
        }
    }

    pub fn trace(&self) -> &ProofTrace {
        &self.trace
    }

    /// Number of completed rounds
    pub fn rounds(&self) -> usize {
        self.round
    }

    fn has_empty_clause(&self) -> bool {
        self.trace.contains(&Clause::empty())
    }

    /// Run one round; returns the number of new clauses
    pub fn step(&mut self) -> usize {
        let first_new = self.processed;
        self.processed = self.trace.len();
        self.round += 1;

        let inferences = infer_from(self.trace.clauses(), first_new, self.fresh, &self.config);

        let mut added = 0;
        for InferenceResult { derivation, conclusion } in inferences {
            let is_empty = conclusion.is_empty();
            if self.trace.record(conclusion, derivation).is_some() {
                added += 1;
                if is_empty {
                    break;
                }
            }
        }

        debug!(
            round = self.round,
            clauses = self.trace.len(),
            added,
            "saturation round"
        );
        added
    }

    /// Run rounds until the empty clause appears or nothing new is derived
    pub fn saturate(mut self) -> SaturationResult {
        loop {
            if self.has_empty_clause() {
                info!(rounds = self.round, clauses = self.trace.len(), "refutation found");
                return SaturationResult::Refutation(self.trace);
            }
            if self.step() == 0 {
                info!(rounds = self.round, clauses = self.trace.len(), "saturated without refutation");
                return SaturationResult::Saturated(self.trace);
            }
        }
    }
}

/// Saturate `clauses` under resolution and factorization
pub fn saturate(clauses: &ClauseSet, config: &ProverConfig, fresh: &mut FreshNames) -> SaturationResult {
    SaturationState::new(clauses, config.clone(), fresh).saturate()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inference::Rule;
    use crate::logic::{Atom, Literal, Term};

    fn lit(positive: bool, name: &str, args: Vec<Term>) -> Literal {
        let atom = Atom::new(name, args);
        if positive {
            Literal::positive(atom)
        } else {
            Literal::negative(atom)
        }
    }

    #[test]
    fn test_infer_records_premises() {
        let clauses = ClauseSet::from([
            Clause::unit(lit(true, "P", vec![Term::constant("a")])),
            Clause::new([
                lit(false, "P", vec![Term::var("x")]),
                lit(true, "Q", vec![Term::var("x")]),
            ]),
        ]);
        let results = infer(&clauses, &mut FreshNames::new(), &ProverConfig::default());
        let q_a = Clause::unit(lit(true, "Q", vec![Term::constant("a")]));
        assert!(results
            .iter()
            .any(|r| r.conclusion == q_a && r.derivation == Derivation::resolution(0, 1)));
    }

    #[test]
    fn test_refutation() {
        let clauses = ClauseSet::from([
            Clause::unit(lit(true, "P", vec![Term::var("x")])),
            Clause::unit(lit(false, "P", vec![Term::constant("a")])),
        ]);
        let result = saturate(&clauses, &ProverConfig::default(), &mut FreshNames::new());
        assert!(result.is_refutation());
        let trace = result.trace();
        let idx = trace.index_of(&Clause::empty()).unwrap();
        assert_eq!(trace.derivation(idx).unwrap().rule, Rule::Resolution);
    }

    #[test]
    fn test_fixed_point_is_reported() {
        let clauses = ClauseSet::from([
            Clause::unit(lit(true, "P", vec![Term::constant("a")])),
            Clause::unit(lit(true, "Q", vec![Term::constant("b")])),
        ]);
        let mut fresh = FreshNames::new();
        let mut state = SaturationState::new(&clauses, ProverConfig::default(), &mut fresh);
        assert_eq!(state.step(), 0);
        assert_eq!(state.rounds(), 1);
        assert!(matches!(state.saturate(), SaturationResult::Saturated(_)));
    }

    #[test]
    fn test_variants_reach_fixed_point() {
        let clauses = ClauseSet::from([
            Clause::new([
                lit(false, "P", vec![Term::var("x")]),
                lit(true, "Q", vec![Term::var("x")]),
            ]),
            Clause::new([
                lit(false, "Q", vec![Term::var("y")]),
                lit(true, "R", vec![Term::var("y")]),
            ]),
        ]);
        let result = saturate(&clauses, &ProverConfig::default(), &mut FreshNames::new());
        let trace = result.trace();
        assert!(!result.is_refutation());
        // ¬P(x) ∨ R(x) is derived in both argument orders but recorded once
        assert_eq!(trace.len(), 3);
        assert_eq!(trace.derivation(2), Some(&Derivation::resolution(0, 1)));
    }
}
