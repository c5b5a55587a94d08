//! Saturation-based refutation

pub mod state;

pub use state::{infer, saturate, SaturationResult, SaturationState};
