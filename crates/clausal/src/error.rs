//! Error types for clausal

use crate::logic::Clause;
use std::io;
use thiserror::Error;

/// A formula reached a pipeline stage in a shape an earlier stage should
/// have removed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NormalizeError {
    #[error("Malformed formula in {stage}: unexpected {found}")]
    MalformedFormula { stage: &'static str, found: String },

    /// The truth table of this many propositional variables cannot be
    /// enumerated
    #[error("Too many propositional variables for a truth table: {count}")]
    TooManyVariables { count: usize },
}

#[derive(Error, Debug)]
pub enum ProveError {
    #[error("Normalization failed: {0}")]
    Normalize(#[from] NormalizeError),

    /// Saturation reached a fixed point without deriving the empty clause.
    /// This is inconclusive, not a proof of satisfiability.
    #[error("No refutation found: saturated at {clauses} clauses")]
    SaturationDivergence { clauses: usize },

    #[error("No justification recorded for clause {0}")]
    MissingJustification(Clause),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

pub type Result<T> = std::result::Result<T, ProveError>;
