//! Davis–Putnam satisfiability search
//!
//! The solver alternates unit propagation ([`saturate`]) with case splits on
//! a literal. Each branch owns its copy of the clause set and of the set of
//! literals already split on.

use crate::logic::{Atom, Clause, ClauseSet, Literal};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use tracing::{debug, trace};

/// Outcome of [`solve`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Solution {
    /// A set of unit clauses with no complementary pair. Every clause of the
    /// input is satisfied by making these literals true.
    Satisfiable(ClauseSet),
    Unsatisfiable,
}

impl Solution {
    pub fn is_satisfiable(&self) -> bool {
        matches!(self, Solution::Satisfiable(_))
    }

    /// The unit clauses of a satisfiable result
    pub fn model(&self) -> Option<&ClauseSet> {
        match self {
            Solution::Satisfiable(model) => Some(model),
            Solution::Unsatisfiable => None,
        }
    }

    /// Truth value of each atom fixed by the model. Atoms the model does not
    /// mention may take either value.
    pub fn assignment(&self) -> Option<BTreeMap<Atom, bool>> {
        self.model().map(|model| {
            model
                .iter()
                .flat_map(|clause| clause.iter())
                .map(|lit| (lit.atom.clone(), lit.polarity))
                .collect()
        })
    }

    /// The model, or the falsum set `{{}}` when unsatisfiable
    pub fn into_clause_set(self) -> ClauseSet {
        match self {
            Solution::Satisfiable(model) => model,
            Solution::Unsatisfiable => falsum(),
        }
    }
}

/// The clause set containing only the empty clause
pub fn falsum() -> ClauseSet {
    ClauseSet::from([Clause::empty()])
}

/// Unit reduction with `literal`: remove its complement from every clause,
/// delete every other clause containing it, and keep `{literal}`.
pub fn reduce(clauses: &ClauseSet, literal: &Literal) -> ClauseSet {
    let complement = literal.complement();
    let mut reduced = ClauseSet::with_capacity(clauses.len());
    for clause in clauses {
        if clause.contains(&complement) {
            reduced.insert(clause.without(&complement));
        } else if !clause.contains(literal) {
            reduced.insert(clause.clone());
        }
    }
    reduced.insert(Clause::unit(literal.clone()));
    reduced
}

/// Apply [`reduce`] with every unit clause until no unused unit remains or
/// the empty clause appears.
///
/// Units are queued in a worklist consumed by index; a literal is reduced
/// with at most once.
pub fn saturate(clauses: &ClauseSet) -> ClauseSet {
    let mut clauses = clauses.clone();
    let mut queue: Vec<Literal> = Vec::new();
    let mut queued: HashSet<Literal> = HashSet::new();
    enqueue_units(&clauses, &mut queue, &mut queued);

    let mut next = 0;
    while next < queue.len() {
        let literal = queue[next].clone();
        next += 1;
        clauses = reduce(&clauses, &literal);
        trace!(%literal, clauses = clauses.len(), "unit reduction");
        if clauses.contains(&Clause::empty()) {
            break;
        }
        enqueue_units(&clauses, &mut queue, &mut queued);
    }
    clauses
}

fn enqueue_units(clauses: &ClauseSet, queue: &mut Vec<Literal>, queued: &mut HashSet<Literal>) {
    for clause in clauses {
        if let Some(unit) = clause.unit_literal() {
            if queued.insert(unit.clone()) {
                queue.push(unit.clone());
            }
        }
    }
}

/// Search for a model of `clauses`.
///
/// `used` holds the literals already split on; pass an empty set at the top
/// level.
pub fn solve(clauses: &ClauseSet, used: &HashSet<Literal>) -> Solution {
    search(clauses, used, 0)
}

fn search(clauses: &ClauseSet, used: &HashSet<Literal>, depth: usize) -> Solution {
    let clauses = saturate(clauses);
    if clauses.contains(&Clause::empty()) {
        return Solution::Unsatisfiable;
    }
    if clauses.iter().all(Clause::is_unit) {
        return Solution::Satisfiable(clauses);
    }
    // Neither the empty clause nor only units, so a clause with two or more
    // literals exists and a literal is always found.
    let Some(literal) = select_literal(&clauses, used) else {
        return Solution::Satisfiable(clauses);
    };
    debug!(%literal, depth, "split");

    for branch in [literal.clone(), literal.complement()] {
        let mut used = used.clone();
        used.insert(branch.clone());
        let mut extended = clauses.clone();
        extended.insert(Clause::unit(branch));
        if let solution @ Solution::Satisfiable(_) = search(&extended, &used, depth + 1) {
            return solution;
        }
    }
    Solution::Unsatisfiable
}

/// Pick a literal from a non-unit clause, preferring one whose atom has not
/// been split on. Literals in `used` that were never asserted as units can
/// leave no such choice; any literal of a non-unit clause is taken then.
fn select_literal(clauses: &ClauseSet, used: &HashSet<Literal>) -> Option<Literal> {
    let mut candidates = clauses
        .iter()
        .filter(|clause| !clause.is_unit())
        .flat_map(|clause| clause.iter());
    let fallback = candidates.clone().next();
    candidates
        .find(|lit| !used.contains(*lit) && !used.contains(&lit.complement()))
        .or(fallback)
        .cloned()
}
