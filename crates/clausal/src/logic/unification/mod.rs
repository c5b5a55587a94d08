//! Unification and substitution for first-order terms

pub mod mgu;
pub mod substitution;


pub use mgu::{occurs_check, unify, unify_atoms, unify_many, UnificationError, UnificationResult};
pub use substitution::{apply_to_clause_set, Substitution};
