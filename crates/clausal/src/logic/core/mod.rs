//! Core data model: terms, atoms, literals and clauses

pub mod clause;
pub mod literal;
pub mod term;
