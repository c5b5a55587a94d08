//! Prover configuration types.

use serde::{Deserialize, Serialize};

/// Configuration for normalization and the resolution loop.
///
/// There are deliberately no timeouts or iteration limits: saturation runs
/// until it finds the empty clause or reaches a fixed point.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProverConfig {
    /// Resolvents with more literals than this are discarded
    pub max_resolvent_literals: usize,
    /// Drop clauses containing complementary literals after CNF
    pub remove_tautologies: bool,
    /// Rename derived clause variables to a canonical form so that variants
    /// are recognized as the same clause
    pub canonicalize_derived: bool,
}

impl Default for ProverConfig {
    fn default() -> Self {
        ProverConfig {
            max_resolvent_literals: 3,
            remove_tautologies: true,
            canonicalize_derived: true,
        }
    }
}
