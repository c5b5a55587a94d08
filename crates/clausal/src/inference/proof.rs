//! Proof reconstruction from a derivation trace

use super::derivation::{Derivation, ProofTrace, Rule};
use crate::error::ProveError;
use crate::logic::Clause;
use indexmap::IndexSet;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// One inference step: the premises it used and the clause it produced
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProofLine {
    pub rule: Rule,
    pub premises: Vec<Clause>,
    pub conclusion: Clause,
}

/// A proof is a sequence of lines from axioms to the final conclusion.
/// Every premise of a line is the conclusion of an earlier line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Proof {
    pub lines: Vec<ProofLine>,
}

impl Proof {
    /// The clause proved by the last line
    pub fn conclusion(&self) -> Option<&Clause> {
        self.lines.last().map(|line| &line.conclusion)
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Input clauses the proof depends on
    pub fn axioms(&self) -> impl Iterator<Item = &Clause> {
        self.lines
            .iter()
            .filter(|line| line.rule == Rule::Axiom)
            .map(|line| &line.conclusion)
    }
}

const INDENT: &str = "            ";

impl fmt::Display for ProofLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.rule, self.premises.as_slice()) {
            (Rule::Axiom, _) => write!(f, "Axiom:       {}", self.conclusion),
            (Rule::Factorization, [premise]) => {
                write!(f, "Factorization: {} \n⊢{}{}", premise, INDENT, self.conclusion)
            }
            (Rule::Resolution, [left, right]) => write!(
                f,
                "Resolution:  {},\n {}{}  \n⊢{}{}",
                left, INDENT, right, INDENT, self.conclusion
            ),
            (rule, premises) => {
                write!(f, "{}:", rule)?;
                for premise in premises {
                    write!(f, " {}", premise)?;
                }
                write!(f, "\n⊢{}{}", INDENT, self.conclusion)
            }
        }
    }
}

impl fmt::Display for Proof {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, line) in self.lines.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{}", line)?;
        }
        Ok(())
    }
}

/// Unfold the justifications of `clause` back to axioms.
///
/// A resolution step places the lines of its left premise first, then the
/// lines of its right premise that are not already present, then itself.
pub fn construct_proof(clause: &Clause, trace: &ProofTrace) -> Result<Proof, ProveError> {
    let root = trace
        .index_of(clause)
        .ok_or_else(|| ProveError::MissingJustification(clause.clone()))?;

    let mut memo: HashMap<usize, IndexSet<usize>> = HashMap::new();
    let order = proof_order(root, trace, &mut memo)?;

    let mut lines = Vec::with_capacity(order.len());
    for idx in order {
        let (conclusion, derivation) = lookup(idx, trace)?;
        let premises = derivation
            .premises
            .iter()
            .map(|&p| lookup(p, trace).map(|(c, _)| c.clone()))
            .collect::<Result<Vec<_>, _>>()?;
        lines.push(ProofLine {
            rule: derivation.rule,
            premises,
            conclusion: conclusion.clone(),
        });
    }
    Ok(Proof { lines })
}

fn lookup(
    idx: usize,
    trace: &ProofTrace,
) -> Result<(&Clause, &Derivation), ProveError> {
    match (trace.clause(idx), trace.derivation(idx)) {
        (Some(clause), Some(derivation)) => Ok((clause, derivation)),
        (Some(clause), None) => Err(ProveError::MissingJustification(clause.clone())),
        (None, _) => Err(ProveError::MissingJustification(Clause::empty())),
    }
}

fn proof_order(
    idx: usize,
    trace: &ProofTrace,
    memo: &mut HashMap<usize, IndexSet<usize>>,
) -> Result<IndexSet<usize>, ProveError> {
    if let Some(done) = memo.get(&idx) {
        return Ok(done.clone());
    }
    let (clause, derivation) = lookup(idx, trace)?;

    let mut order = IndexSet::new();
    for &premise in &derivation.premises {
        // Premises are recorded before their conclusions
        if premise >= idx {
            return Err(ProveError::MissingJustification(clause.clone()));
        }
        order.extend(proof_order(premise, trace, memo)?);
    }
    order.insert(idx);

    memo.insert(idx, order.clone());
    Ok(order)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::Literal;

    fn unit(lit: Literal) -> Clause {
        Clause::unit(lit)
    }

    /// p, p → q, ¬q  refuted by two resolution steps
    fn refutation_trace() -> ProofTrace {
        let mut trace = ProofTrace::new();
        trace.record(unit(Literal::pos("p")), Derivation::axiom());
        trace.record(Clause::new([Literal::neg("p"), Literal::pos("q")]), Derivation::axiom());
        trace.record(unit(Literal::neg("q")), Derivation::axiom());
        trace.record(unit(Literal::pos("r")), Derivation::axiom());
        trace.record(unit(Literal::pos("q")), Derivation::resolution(0, 1));
        trace.record(Clause::empty(), Derivation::resolution(4, 2));
        trace
    }

    #[test]
    fn test_proof_order() {
        let proof = construct_proof(&Clause::empty(), &refutation_trace()).unwrap();
        let conclusions: Vec<String> = proof.lines.iter().map(|l| l.conclusion.to_string()).collect();
        assert_eq!(conclusions, vec!["p", "¬p ∨ q", "q", "¬q", "⊥"]);
        assert_eq!(proof.conclusion(), Some(&Clause::empty()));
        // The unused axiom r does not appear
        assert_eq!(proof.axioms().count(), 3);
    }

    #[test]
    fn test_shared_premises_appear_once() {
        let mut trace = ProofTrace::new();
        trace.record(unit(Literal::pos("p")), Derivation::axiom());
        trace.record(Clause::new([Literal::neg("p"), Literal::pos("q")]), Derivation::axiom());
        trace.record(Clause::new([Literal::neg("p"), Literal::neg("q")]), Derivation::axiom());
        trace.record(unit(Literal::pos("q")), Derivation::resolution(0, 1));
        trace.record(unit(Literal::neg("q")), Derivation::resolution(0, 2));
        trace.record(Clause::empty(), Derivation::resolution(3, 4));

        let proof = construct_proof(&Clause::empty(), &trace).unwrap();
        assert_eq!(proof.len(), 6);
        let axiom_p = proof
            .lines
            .iter()
            .filter(|l| l.conclusion == unit(Literal::pos("p")))
            .count();
        assert_eq!(axiom_p, 1);
    }

    #[test]
    fn test_line_format() {
        let proof = construct_proof(&Clause::empty(), &refutation_trace()).unwrap();
        assert_eq!(proof.lines[0].to_string(), "Axiom:       p");
        assert_eq!(
            proof.lines[2].to_string(),
            "Resolution:  p,\n             ¬p ∨ q  \n⊢            q"
        );
        let factor = ProofLine {
            rule: Rule::Factorization,
            premises: vec![Clause::unit(Literal::pos("p"))],
            conclusion: Clause::unit(Literal::pos("p")),
        };
        assert_eq!(factor.to_string(), "Factorization: p \n⊢            p");
    }

    #[test]
    fn test_missing_clause() {
        let trace = ProofTrace::new();
        assert!(matches!(
            construct_proof(&Clause::empty(), &trace),
            Err(ProveError::MissingJustification(_))
        ));
    }

    #[test]
    fn test_json_roundtrip() {
        let proof = construct_proof(&Clause::empty(), &refutation_trace()).unwrap();
        let json = serde_json::to_string(&proof).unwrap();
        let parsed: Proof = serde_json::from_str(&json).unwrap();
        assert_eq!(proof, parsed);
    }
}
