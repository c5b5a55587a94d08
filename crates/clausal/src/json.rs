//! JSON shapes for problems, proofs and models

use crate::config::ProverConfig;
use crate::inference::{Proof, ProofLine};
use crate::logic::{Clause, ClauseSet};
use crate::normalize::Formula;
use crate::propositional::Solution;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Problem input: formulas to refute, or clauses given directly
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ProblemJson {
    pub axioms: Vec<Formula>,
    /// Claim to prove; when absent the axioms alone are refuted
    pub claim: Option<Formula>,
    /// Extra input clauses, added after the normalized formulas
    pub clauses: Vec<Clause>,
    pub config: ProverConfig,
}

/// JSON representation of a proof line, with clauses rendered as text
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProofLineJson {
    pub rule: String,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub premises: Vec<String>,
    pub conclusion: String,
}

impl From<&ProofLine> for ProofLineJson {
    fn from(line: &ProofLine) -> Self {
        ProofLineJson {
            rule: line.rule.to_string(),
            premises: line.premises.iter().map(|c| c.to_string()).collect(),
            conclusion: line.conclusion.to_string(),
        }
    }
}

/// JSON representation of a proof
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProofJson {
    pub lines: Vec<ProofLineJson>,
}

impl From<&Proof> for ProofJson {
    fn from(proof: &Proof) -> Self {
        ProofJson {
            lines: proof.lines.iter().map(ProofLineJson::from).collect(),
        }
    }
}

/// JSON representation of a refutation attempt
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "result")]
pub enum ProveResultJson {
    Proof { proof: ProofJson },
    Saturated { clauses: usize },
}

/// JSON representation of a Davis–Putnam result
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelJson {
    pub satisfiable: bool,
    /// Atom (rendered as text) to truth value; empty when unsatisfiable
    #[serde(default)]
    pub assignment: BTreeMap<String, bool>,
}

impl From<&Solution> for ModelJson {
    fn from(solution: &Solution) -> Self {
        let assignment = solution
            .assignment()
            .map(|model| {
                model
                    .into_iter()
                    .map(|(atom, value)| (atom.to_string(), value))
                    .collect()
            })
            .unwrap_or_default();
        ModelJson {
            satisfiable: solution.is_satisfiable(),
            assignment,
        }
    }
}

/// A clause set both as data and as text
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClauseSetJson {
    pub clauses: Vec<Clause>,
    pub rendered: Vec<String>,
}

impl From<&ClauseSet> for ClauseSetJson {
    fn from(clauses: &ClauseSet) -> Self {
        ClauseSetJson {
            clauses: clauses.iter().cloned().collect(),
            rendered: clauses.iter().map(|c| c.to_string()).collect(),
        }
    }
}
