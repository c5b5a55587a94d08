//! Inference rules for first-order resolution theorem proving

pub mod common;
pub mod derivation;
pub mod factoring;
pub mod proof;
pub mod resolution;


pub use common::{canonicalize, rename_apart, InferenceResult};
pub use derivation::{Derivation, ProofTrace, Rule};
pub use factoring::factorize;
pub use proof::{construct_proof, Proof, ProofLine};
pub use resolution::resolve;
