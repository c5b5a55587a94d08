//! clausal: clause normalization and saturation for propositional and
//! first-order logic
//!
//! Formulas are normalized into clause sets (conditional elimination, NNF,
//! prenex form, Skolemization, CNF). Propositional clause sets are decided by
//! Davis–Putnam search; first-order problems are refuted by resolution and
//! factorization saturation, with the proof of the empty clause reconstructed
//! from the derivation trace.

pub mod config;
pub mod error;
pub mod inference;
pub mod json;
pub mod logic;
pub mod normalize;
pub mod propositional;
pub mod prover;
pub mod saturation;
pub mod simplifying;

pub use config::ProverConfig;
pub use error::{NormalizeError, ProveError};

// Re-export commonly used types from logic
pub use logic::{
    Atom, Clause, ClauseSet, FreshNames, FunctionSymbol, Literal, PredicateSymbol, Substitution,
    Term, Variable,
};
pub use logic::{unify, unify_atoms, UnificationError, UnificationResult};

pub use inference::{
    canonicalize, construct_proof, factorize, rename_apart, resolve, Derivation, InferenceResult,
    Proof, ProofLine, ProofTrace, Rule,
};

pub use normalize::{normalize, Formula, Normalizer, Quantifier};
pub use propositional::{solve, Solution};
pub use prover::{clausify, prove, prove_clauses, prove_with_config};
pub use saturation::{SaturationResult, SaturationState};
