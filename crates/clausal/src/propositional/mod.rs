//! Propositional reasoning: Davis–Putnam search and truth tables

pub mod davis_putnam;
pub mod truth_table;

#[cfg(test)]
mod proptest_tests;

pub use davis_putnam::{falsum, reduce, saturate, solve, Solution};
pub use truth_table::{find_counterexample, is_tautology};
