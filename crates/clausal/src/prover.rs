//! Refutation prover: normalizes axioms and the negated claim, saturates the
//! resulting clause set and reconstructs the proof of the empty clause.
//!
//! One [`FreshNames`] generator is shared by every formula of a problem, so
//! Skolem symbols introduced for different axioms never collide.

use crate::config::ProverConfig;
use crate::error::{ProveError, Result};
use crate::inference::{construct_proof, Proof};
use crate::logic::{Clause, ClauseSet, FreshNames};
use crate::normalize::{Formula, Normalizer};
use crate::saturation::{saturate, SaturationResult};
use tracing::info;

/// Normalize every formula into one clause set
pub fn clausify(formulas: &[Formula], config: &ProverConfig, fresh: &mut FreshNames) -> Result<ClauseSet> {
    let mut normalizer = Normalizer::with_config(fresh, config);
    let mut clauses = ClauseSet::new();
    for formula in formulas {
        clauses.extend(normalizer.normalize(formula)?);
    }
    Ok(clauses)
}

/// Prove `claim` from `axioms` with the default configuration
pub fn prove(axioms: &[Formula], claim: &Formula) -> Result<Proof> {
    prove_with_config(axioms, claim, &ProverConfig::default())
}

pub fn prove_with_config(axioms: &[Formula], claim: &Formula, config: &ProverConfig) -> Result<Proof> {
    let mut fresh = FreshNames::new();
    let mut formulas = axioms.to_vec();
    formulas.push(Formula::not(claim.clone()));
    let clauses = clausify(&formulas, config, &mut fresh)?;
    info!(axioms = axioms.len(), clauses = clauses.len(), "starting refutation");
    refute(&clauses, config, &mut fresh)
}

/// Saturate an already clausal problem and return the refutation proof
pub fn prove_clauses(clauses: &ClauseSet, config: &ProverConfig) -> Result<Proof> {
    let mut fresh = FreshNames::new();
    refute(clauses, config, &mut fresh)
}

/// Saturate `clauses` with a generator that already produced their fresh
/// names, and return the refutation proof
pub fn refute(clauses: &ClauseSet, config: &ProverConfig, fresh: &mut FreshNames) -> Result<Proof> {
    match saturate(clauses, config, fresh) {
        SaturationResult::Refutation(trace) => construct_proof(&Clause::empty(), &trace),
        SaturationResult::Saturated(trace) => Err(ProveError::SaturationDivergence {
            clauses: trace.len(),
        }),
    }
}
