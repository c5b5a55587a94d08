//! First-order formula representation
//!
//! Formulas arrive as an already-parsed AST (for example deserialized from
//! JSON). Names are opaque strings; the normalization pipeline in
//! [`super::cnf_conversion`] turns a formula into a clause set.

use crate::error::NormalizeError;
use crate::logic::{Atom, Substitution, Term, Variable};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashSet};

/// Quantifier type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Quantifier {
    Forall,
    Exists,
}

impl Quantifier {
    /// The dual quantifier, used when negation is pushed inwards
    pub fn dual(self) -> Quantifier {
        match self {
            Quantifier::Forall => Quantifier::Exists,
            Quantifier::Exists => Quantifier::Forall,
        }
    }
}

/// First-order formula
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Formula {
    /// Verum
    True,
    /// Falsum
    False,
    /// Atomic formula
    Atom(Atom),
    /// Negation
    Not(Box<Formula>),
    /// Conjunction
    And(Box<Formula>, Box<Formula>),
    /// Disjunction
    Or(Box<Formula>, Box<Formula>),
    /// Implication
    Implies(Box<Formula>, Box<Formula>),
    /// Biconditional
    Iff(Box<Formula>, Box<Formula>),
    /// XOR (exclusive or)
    Xor(Box<Formula>, Box<Formula>),
    /// Quantified formula
    Quantified(Quantifier, Variable, Box<Formula>),
}

impl Formula {
    pub fn atom(name: impl Into<String>, args: Vec<Term>) -> Formula {
        Formula::Atom(Atom::new(name, args))
    }

    /// Propositional variable
    pub fn prop(name: impl Into<String>) -> Formula {
        Formula::Atom(Atom::proposition(name))
    }

    pub fn not(f: Formula) -> Formula {
        Formula::Not(Box::new(f))
    }

    pub fn and(f: Formula, g: Formula) -> Formula {
        Formula::And(Box::new(f), Box::new(g))
    }

    pub fn or(f: Formula, g: Formula) -> Formula {
        Formula::Or(Box::new(f), Box::new(g))
    }

    pub fn implies(f: Formula, g: Formula) -> Formula {
        Formula::Implies(Box::new(f), Box::new(g))
    }

    pub fn iff(f: Formula, g: Formula) -> Formula {
        Formula::Iff(Box::new(f), Box::new(g))
    }

    pub fn xor(f: Formula, g: Formula) -> Formula {
        Formula::Xor(Box::new(f), Box::new(g))
    }

    pub fn forall(var: impl Into<String>, f: Formula) -> Formula {
        Formula::Quantified(Quantifier::Forall, Variable::new(var), Box::new(f))
    }

    pub fn exists(var: impl Into<String>, f: Formula) -> Formula {
        Formula::Quantified(Quantifier::Exists, Variable::new(var), Box::new(f))
    }

    /// Name of the top-level connective, for diagnostics
    pub fn kind(&self) -> &'static str {
        match self {
            Formula::True => "⊤",
            Formula::False => "⊥",
            Formula::Atom(_) => "atom",
            Formula::Not(_) => "¬",
            Formula::And(..) => "∧",
            Formula::Or(..) => "∨",
            Formula::Implies(..) => "→",
            Formula::Iff(..) => "↔",
            Formula::Xor(..) => "⊕",
            Formula::Quantified(Quantifier::Forall, ..) => "∀",
            Formula::Quantified(Quantifier::Exists, ..) => "∃",
        }
    }

    /// Check whether this is an atom or a negated atom
    pub fn is_literal(&self) -> bool {
        match self {
            Formula::Atom(_) => true,
            Formula::Not(f) => matches!(**f, Formula::Atom(_)),
            _ => false,
        }
    }

    /// Get all free variables in the formula
    pub fn free_variables(&self) -> BTreeSet<Variable> {
        match self {
            Formula::True | Formula::False => BTreeSet::new(),
            Formula::Atom(atom) => {
                let mut vars = BTreeSet::new();
                atom.collect_variables(&mut vars);
                vars
            }
            Formula::Not(f) => f.free_variables(),
            Formula::And(f1, f2)
            | Formula::Or(f1, f2)
            | Formula::Implies(f1, f2)
            | Formula::Iff(f1, f2)
            | Formula::Xor(f1, f2) => {
                let mut vars = f1.free_variables();
                vars.extend(f2.free_variables());
                vars
            }
            Formula::Quantified(_, var, f) => {
                let mut vars = f.free_variables();
                vars.remove(var);
                vars
            }
        }
    }

    /// Get all variables bound by some quantifier in the formula
    pub fn bound_variables(&self) -> BTreeSet<Variable> {
        let mut vars = BTreeSet::new();
        self.collect_bound_variables(&mut vars);
        vars
    }

    fn collect_bound_variables(&self, vars: &mut BTreeSet<Variable>) {
        match self {
            Formula::True | Formula::False | Formula::Atom(_) => {}
            Formula::Not(f) => f.collect_bound_variables(vars),
            Formula::And(f1, f2)
            | Formula::Or(f1, f2)
            | Formula::Implies(f1, f2)
            | Formula::Iff(f1, f2)
            | Formula::Xor(f1, f2) => {
                f1.collect_bound_variables(vars);
                f2.collect_bound_variables(vars);
            }
            Formula::Quantified(_, var, f) => {
                vars.insert(var.clone());
                f.collect_bound_variables(vars);
            }
        }
    }

    /// Check if the formula is closed (no free variables)
    pub fn is_closed(&self) -> bool {
        self.free_variables().is_empty()
    }

    /// Check whether the formula contains a quantifier
    pub fn has_quantifier(&self) -> bool {
        match self {
            Formula::True | Formula::False | Formula::Atom(_) => false,
            Formula::Not(f) => f.has_quantifier(),
            Formula::And(f1, f2)
            | Formula::Or(f1, f2)
            | Formula::Implies(f1, f2)
            | Formula::Iff(f1, f2)
            | Formula::Xor(f1, f2) => f1.has_quantifier() || f2.has_quantifier(),
            Formula::Quantified(..) => true,
        }
    }

    /// Apply `subst` to the free variable occurrences of the formula.
    ///
    /// A quantifier shadows its variable. The terms in `subst` must not
    /// mention variables bound inside the formula.
    pub fn substitute_free(&self, subst: &Substitution) -> Formula {
        if subst.is_empty() {
            return self.clone();
        }
        match self {
            Formula::True => Formula::True,
            Formula::False => Formula::False,
            Formula::Atom(atom) => Formula::Atom(atom.apply_substitution(subst)),
            Formula::Not(f) => Formula::not(f.substitute_free(subst)),
            Formula::And(f1, f2) => Formula::and(f1.substitute_free(subst), f2.substitute_free(subst)),
            Formula::Or(f1, f2) => Formula::or(f1.substitute_free(subst), f2.substitute_free(subst)),
            Formula::Implies(f1, f2) => {
                Formula::implies(f1.substitute_free(subst), f2.substitute_free(subst))
            }
            Formula::Iff(f1, f2) => Formula::iff(f1.substitute_free(subst), f2.substitute_free(subst)),
            Formula::Xor(f1, f2) => Formula::xor(f1.substitute_free(subst), f2.substitute_free(subst)),
            Formula::Quantified(q, var, f) => {
                let body = if subst.contains(var) {
                    let mut inner = subst.clone();
                    inner.map.remove(var);
                    f.substitute_free(&inner)
                } else {
                    f.substitute_free(subst)
                };
                Formula::Quantified(*q, var.clone(), Box::new(body))
            }
        }
    }

    /// Names of the propositional variables occurring in the formula
    pub fn propositional_variables(&self) -> BTreeSet<String> {
        let mut names = BTreeSet::new();
        self.collect_propositional_variables(&mut names);
        names
    }

    fn collect_propositional_variables(&self, names: &mut BTreeSet<String>) {
        match self {
            Formula::True | Formula::False => {}
            Formula::Atom(atom) => {
                names.insert(atom.predicate.name.clone());
            }
            Formula::Not(f) | Formula::Quantified(_, _, f) => {
                f.collect_propositional_variables(names)
            }
            Formula::And(f1, f2)
            | Formula::Or(f1, f2)
            | Formula::Implies(f1, f2)
            | Formula::Iff(f1, f2)
            | Formula::Xor(f1, f2) => {
                f1.collect_propositional_variables(names);
                f2.collect_propositional_variables(names);
            }
        }
    }

    /// Evaluate a propositional formula; `interpretation` holds the names of
    /// the variables that are true.
    pub fn evaluate(&self, interpretation: &HashSet<String>) -> Result<bool, NormalizeError> {
        Ok(match self {
            Formula::True => true,
            Formula::False => false,
            Formula::Atom(atom) if atom.is_propositional() => {
                interpretation.contains(&atom.predicate.name)
            }
            Formula::Not(f) => !f.evaluate(interpretation)?,
            Formula::And(f1, f2) => f1.evaluate(interpretation)? && f2.evaluate(interpretation)?,
            Formula::Or(f1, f2) => f1.evaluate(interpretation)? || f2.evaluate(interpretation)?,
            Formula::Implies(f1, f2) => !f1.evaluate(interpretation)? || f2.evaluate(interpretation)?,
            Formula::Iff(f1, f2) => f1.evaluate(interpretation)? == f2.evaluate(interpretation)?,
            Formula::Xor(f1, f2) => f1.evaluate(interpretation)? != f2.evaluate(interpretation)?,
            Formula::Atom(atom) => {
                return Err(NormalizeError::MalformedFormula {
                    stage: "evaluate",
                    found: format!("non-propositional atom {}", atom),
                })
            }
            Formula::Quantified(..) => {
                return Err(NormalizeError::MalformedFormula {
                    stage: "evaluate",
                    found: self.kind().to_string(),
                })
            }
        })
    }
}
