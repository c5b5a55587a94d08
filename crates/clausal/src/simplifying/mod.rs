//! Simplification rules applied to clause sets

pub mod tautology;

pub use tautology::{is_tautology, remove_tautologies};
