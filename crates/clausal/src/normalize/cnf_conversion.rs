//! Conversion from first-order formulas to clause sets
//!
//! The pipeline runs these stages in a fixed order:
//!
//! 1. biconditional (and exclusive-or) elimination
//! 2. conditional elimination
//! 3. negation normal form
//! 4. quantifier extraction into a prenex prefix
//! 5. Skolemization
//! 6. CNF flattening by distribution
//! 7. tautology removal
//!
//! Before quantifier extraction every bound variable is renamed apart, so that
//! pulling quantifiers outward can never capture a variable.
//!
//! Each stage expects the output shape of the previous one and reports
//! [`NormalizeError::MalformedFormula`] when handed anything else.

use super::fof::{Formula, Quantifier};
use crate::config::ProverConfig;
use crate::error::NormalizeError;
use crate::logic::{Clause, ClauseSet, FreshNames, Literal, Substitution, Term, Variable};
use crate::simplifying::tautology::remove_tautologies;
use std::collections::BTreeSet;
use tracing::trace;

fn malformed(stage: &'static str, formula: &Formula) -> NormalizeError {
    NormalizeError::MalformedFormula {
        stage,
        found: formula.kind().to_string(),
    }
}

/// Stage 1: replace `g ↔ h` by `(g → h) ∧ (h → g)` and `g ⊕ h` by
/// `(g ∨ h) ∧ (¬g ∨ ¬h)`.
///
/// The duplicated copy has its bound variables renamed to fresh ones.
pub fn eliminate_biconditional(formula: &Formula, fresh: &mut FreshNames) -> Formula {
    match formula {
        Formula::Iff(g, h) => {
            let ge = eliminate_biconditional(g, fresh);
            let he = eliminate_biconditional(h, fresh);
            let forward = Formula::implies(ge.clone(), he.clone());
            let backward = rename_bound_variables(&Formula::implies(he, ge), fresh);
            Formula::and(forward, backward)
        }
        Formula::Xor(g, h) => {
            let ge = eliminate_biconditional(g, fresh);
            let he = eliminate_biconditional(h, fresh);
            let some = Formula::or(ge.clone(), he.clone());
            let not_both = rename_bound_variables(
                &Formula::or(Formula::not(ge), Formula::not(he)),
                fresh,
            );
            Formula::and(some, not_both)
        }
        Formula::True | Formula::False | Formula::Atom(_) => formula.clone(),
        Formula::Not(g) => Formula::not(eliminate_biconditional(g, fresh)),
        Formula::And(g, h) => {
            Formula::and(eliminate_biconditional(g, fresh), eliminate_biconditional(h, fresh))
        }
        Formula::Or(g, h) => {
            Formula::or(eliminate_biconditional(g, fresh), eliminate_biconditional(h, fresh))
        }
        Formula::Implies(g, h) => {
            Formula::implies(eliminate_biconditional(g, fresh), eliminate_biconditional(h, fresh))
        }
        Formula::Quantified(q, x, g) => {
            Formula::Quantified(*q, x.clone(), Box::new(eliminate_biconditional(g, fresh)))
        }
    }
}

/// Rename every bound variable of `formula` to a fresh variable
pub fn rename_bound_variables(formula: &Formula, fresh: &mut FreshNames) -> Formula {
    match formula {
        Formula::True | Formula::False | Formula::Atom(_) => formula.clone(),
        Formula::Not(g) => Formula::not(rename_bound_variables(g, fresh)),
        Formula::And(g, h) => {
            Formula::and(rename_bound_variables(g, fresh), rename_bound_variables(h, fresh))
        }
        Formula::Or(g, h) => {
            Formula::or(rename_bound_variables(g, fresh), rename_bound_variables(h, fresh))
        }
        Formula::Implies(g, h) => {
            Formula::implies(rename_bound_variables(g, fresh), rename_bound_variables(h, fresh))
        }
        Formula::Iff(g, h) => {
            Formula::iff(rename_bound_variables(g, fresh), rename_bound_variables(h, fresh))
        }
        Formula::Xor(g, h) => {
            Formula::xor(rename_bound_variables(g, fresh), rename_bound_variables(h, fresh))
        }
        Formula::Quantified(q, x, g) => {
            let y = fresh.variable();
            let renamed = g.substitute_free(&Substitution::singleton(x.clone(), Term::Variable(y.clone())));
            Formula::Quantified(*q, y, Box::new(rename_bound_variables(&renamed, fresh)))
        }
    }
}

/// Stage 2: replace `g → h` by `¬g ∨ h`
pub fn eliminate_conditional(formula: &Formula) -> Result<Formula, NormalizeError> {
    Ok(match formula {
        Formula::Implies(g, h) => {
            Formula::or(Formula::not(eliminate_conditional(g)?), eliminate_conditional(h)?)
        }
        Formula::True | Formula::False | Formula::Atom(_) => formula.clone(),
        Formula::Not(g) => Formula::not(eliminate_conditional(g)?),
        Formula::And(g, h) => Formula::and(eliminate_conditional(g)?, eliminate_conditional(h)?),
        Formula::Or(g, h) => Formula::or(eliminate_conditional(g)?, eliminate_conditional(h)?),
        Formula::Quantified(q, x, g) => {
            Formula::Quantified(*q, x.clone(), Box::new(eliminate_conditional(g)?))
        }
        Formula::Iff(..) | Formula::Xor(..) => return Err(malformed("eliminate_conditional", formula)),
    })
}

/// Stage 3: negation normal form. Negation ends up only directly above atoms.
pub fn nnf(formula: &Formula) -> Result<Formula, NormalizeError> {
    Ok(match formula {
        Formula::True | Formula::False | Formula::Atom(_) => formula.clone(),
        Formula::Not(g) => neg(g)?,
        Formula::And(g, h) => Formula::and(nnf(g)?, nnf(h)?),
        Formula::Or(g, h) => Formula::or(nnf(g)?, nnf(h)?),
        Formula::Quantified(q, x, g) => Formula::Quantified(*q, x.clone(), Box::new(nnf(g)?)),
        Formula::Implies(..) | Formula::Iff(..) | Formula::Xor(..) => {
            return Err(malformed("nnf", formula))
        }
    })
}

/// Negation normal form of `¬formula`
pub fn neg(formula: &Formula) -> Result<Formula, NormalizeError> {
    Ok(match formula {
        Formula::True => Formula::False,
        Formula::False => Formula::True,
        Formula::Atom(_) => Formula::not(formula.clone()),
        Formula::Not(g) => nnf(g)?,
        Formula::And(g, h) => Formula::or(neg(g)?, neg(h)?),
        Formula::Or(g, h) => Formula::and(neg(g)?, neg(h)?),
        Formula::Quantified(q, x, g) => Formula::Quantified(q.dual(), x.clone(), Box::new(neg(g)?)),
        Formula::Implies(..) | Formula::Iff(..) | Formula::Xor(..) => {
            return Err(malformed("nnf", formula))
        }
    })
}

/// Rename bound variables so that no two quantifiers bind the same name and
/// no bound name coincides with a free variable.
///
/// The first binder of each name keeps it; later ones get fresh variables.
pub fn standardize_apart(formula: &Formula, fresh: &mut FreshNames) -> Formula {
    let mut seen = formula.free_variables();
    standardize(formula, fresh, &mut seen)
}

fn standardize(formula: &Formula, fresh: &mut FreshNames, seen: &mut BTreeSet<Variable>) -> Formula {
    match formula {
        Formula::True | Formula::False | Formula::Atom(_) => formula.clone(),
        Formula::Not(g) => Formula::not(standardize(g, fresh, seen)),
        Formula::And(g, h) => {
            let g = standardize(g, fresh, seen);
            Formula::and(g, standardize(h, fresh, seen))
        }
        Formula::Or(g, h) => {
            let g = standardize(g, fresh, seen);
            Formula::or(g, standardize(h, fresh, seen))
        }
        Formula::Implies(g, h) => {
            let g = standardize(g, fresh, seen);
            Formula::implies(g, standardize(h, fresh, seen))
        }
        Formula::Iff(g, h) => {
            let g = standardize(g, fresh, seen);
            Formula::iff(g, standardize(h, fresh, seen))
        }
        Formula::Xor(g, h) => {
            let g = standardize(g, fresh, seen);
            Formula::xor(g, standardize(h, fresh, seen))
        }
        Formula::Quantified(q, x, g) => {
            if seen.insert(x.clone()) {
                Formula::Quantified(*q, x.clone(), Box::new(standardize(g, fresh, seen)))
            } else {
                let y = fresh.variable();
                seen.insert(y.clone());
                let renamed =
                    g.substitute_free(&Substitution::singleton(x.clone(), Term::Variable(y.clone())));
                Formula::Quantified(*q, y, Box::new(standardize(&renamed, fresh, seen)))
            }
        }
    }
}

/// A quantifier prefix (outermost first) over a quantifier-free matrix
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prenex {
    pub prefix: Vec<(Quantifier, Variable)>,
    pub matrix: Formula,
}

impl Prenex {
    /// Attach the prefix back onto the matrix
    pub fn into_formula(self) -> Formula {
        self.prefix
            .into_iter()
            .rev()
            .fold(self.matrix, |body, (q, x)| Formula::Quantified(q, x, Box::new(body)))
    }
}

/// Stage 4: pull all quantifiers of an NNF formula to the front.
///
/// Requires bound variables to be distinct and disjoint from the free ones.
pub fn extract_quantifiers(formula: &Formula) -> Result<Prenex, NormalizeError> {
    match formula {
        Formula::True | Formula::False | Formula::Atom(_) => Ok(Prenex {
            prefix: Vec::new(),
            matrix: formula.clone(),
        }),
        Formula::Not(g) => match **g {
            Formula::Atom(_) => Ok(Prenex {
                prefix: Vec::new(),
                matrix: formula.clone(),
            }),
            _ => Err(malformed("extract_quantifiers", formula)),
        },
        Formula::And(g, h) | Formula::Or(g, h) => {
            let pg = extract_quantifiers(g)?;
            let ph = extract_quantifiers(h)?;
            let matrix = if matches!(formula, Formula::And(..)) {
                Formula::and(pg.matrix, ph.matrix)
            } else {
                Formula::or(pg.matrix, ph.matrix)
            };
            Ok(Prenex {
                prefix: merge_quantifiers(pg.prefix, ph.prefix),
                matrix,
            })
        }
        Formula::Quantified(q, x, g) => {
            let inner = extract_quantifiers(g)?;
            let mut prefix = Vec::with_capacity(inner.prefix.len() + 1);
            prefix.push((*q, x.clone()));
            prefix.extend(inner.prefix);
            Ok(Prenex {
                prefix,
                matrix: inner.matrix,
            })
        }
        Formula::Implies(..) | Formula::Iff(..) | Formula::Xor(..) => {
            Err(malformed("extract_quantifiers", formula))
        }
    }
}

/// Interleave two prefixes, keeping each one's internal order and taking
/// existential quantifiers first whenever either prefix offers one.
///
/// Fewer universals in front of an ∃ means smaller Skolem functions.
pub fn merge_quantifiers(
    left: Vec<(Quantifier, Variable)>,
    right: Vec<(Quantifier, Variable)>,
) -> Vec<(Quantifier, Variable)> {
    let mut merged = Vec::with_capacity(left.len() + right.len());
    let mut left = left.into_iter().peekable();
    let mut right = right.into_iter().peekable();
    loop {
        let take_left = match (left.peek(), right.peek()) {
            (None, None) => break,
            (Some(_), None) => true,
            (None, Some(_)) => false,
            (Some((Quantifier::Exists, _)), Some(_)) => true,
            (Some(_), Some((Quantifier::Exists, _))) => false,
            (Some(_), Some(_)) => true,
        };
        let next = if take_left { left.next() } else { right.next() };
        merged.extend(next);
    }
    merged
}

/// Stage 5: replace each ∃-variable by a Skolem term over the universals in
/// scope and drop the prefix.
pub fn skolemize(prenex: Prenex, fresh: &mut FreshNames) -> Formula {
    let mut universals = Vec::new();
    let mut subst = Substitution::new();
    for (q, x) in prenex.prefix {
        match q {
            Quantifier::Forall => universals.push(x),
            Quantifier::Exists => {
                let skolem = fresh.skolem_term(&universals);
                subst.insert(x, skolem);
            }
        }
    }
    prenex.matrix.substitute_free(&subst)
}

/// Stage 6: flatten a quantifier-free NNF formula into clauses
pub fn cnf(formula: Formula) -> Result<ClauseSet, NormalizeError> {
    enum WorkItem {
        Process(Formula),
        CombineAnd,     // Union of clause sets
        CombineOrCross, // Pairwise unions of clauses
    }

    let mut stack: Vec<WorkItem> = vec![WorkItem::Process(formula)];
    let mut results: Vec<ClauseSet> = Vec::new();

    fn pop(results: &mut Vec<ClauseSet>) -> Result<ClauseSet, NormalizeError> {
        results.pop().ok_or(NormalizeError::MalformedFormula {
            stage: "cnf",
            found: "missing operand".to_string(),
        })
    }

    while let Some(item) = stack.pop() {
        match item {
            WorkItem::Process(f) => match f {
                Formula::True => results.push(ClauseSet::new()),
                Formula::False => results.push(ClauseSet::from([Clause::empty()])),
                Formula::Atom(atom) => {
                    results.push(ClauseSet::from([Clause::unit(Literal::positive(atom))]))
                }
                Formula::Not(g) => match *g {
                    Formula::Atom(atom) => {
                        results.push(ClauseSet::from([Clause::unit(Literal::negative(atom))]))
                    }
                    other => return Err(malformed("cnf", &Formula::not(other))),
                },
                Formula::And(g, h) => {
                    stack.push(WorkItem::CombineAnd);
                    stack.push(WorkItem::Process(*h));
                    stack.push(WorkItem::Process(*g));
                }
                Formula::Or(g, h) => {
                    stack.push(WorkItem::CombineOrCross);
                    stack.push(WorkItem::Process(*h));
                    stack.push(WorkItem::Process(*g));
                }
                other => return Err(malformed("cnf", &other)),
            },

            WorkItem::CombineAnd => {
                let right = pop(&mut results)?;
                let mut left = pop(&mut results)?;
                left.extend(right);
                results.push(left);
            }

            WorkItem::CombineOrCross => {
                let right = pop(&mut results)?;
                let left = pop(&mut results)?;
                let mut combined = ClauseSet::new();
                for c1 in &left {
                    for c2 in &right {
                        combined.insert(c1.union(c2));
                    }
                }
                results.push(combined);
            }
        }
    }

    pop(&mut results)
}

/// Runs the full pipeline with a session-wide fresh-name generator
pub struct Normalizer<'a> {
    fresh: &'a mut FreshNames,
    remove_tautologies: bool,
}

impl<'a> Normalizer<'a> {
    pub fn new(fresh: &'a mut FreshNames) -> Self {
        Normalizer {
            fresh,
            remove_tautologies: true,
        }
    }

    pub fn with_config(fresh: &'a mut FreshNames, config: &ProverConfig) -> Self {
        Normalizer {
            fresh,
            remove_tautologies: config.remove_tautologies,
        }
    }

    pub fn normalize(&mut self, formula: &Formula) -> Result<ClauseSet, NormalizeError> {
        let f1 = eliminate_biconditional(formula, self.fresh);
        let f2 = eliminate_conditional(&f1)?;
        let f3 = nnf(&f2)?;
        let f3 = standardize_apart(&f3, self.fresh);
        let prenex = extract_quantifiers(&f3)?;
        let f5 = skolemize(prenex, self.fresh);
        let clauses = cnf(f5)?;
        let before = clauses.len();
        let clauses = if self.remove_tautologies {
            remove_tautologies(clauses)
        } else {
            clauses
        };
        trace!(
            clauses = clauses.len(),
            tautologies = before - clauses.len(),
            "normalized formula"
        );
        Ok(clauses)
    }
}

/// Normalize one formula into a clause set
pub fn normalize(formula: &Formula, fresh: &mut FreshNames) -> Result<ClauseSet, NormalizeError> {
    Normalizer::new(fresh).normalize(formula)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(x: &str) -> Formula {
        Formula::atom("P", vec![Term::var(x)])
    }

    fn q(x: &str) -> Formula {
        Formula::atom("Q", vec![Term::var(x)])
    }

    fn lit(name: &str, positive: bool) -> Literal {
        if positive {
            Literal::pos(name)
        } else {
            Literal::neg(name)
        }
    }

    #[test]
    fn test_de_morgan_biconditional_is_tautology() {
        // ¬(p ∨ q) ↔ ¬p ∧ ¬q
        let f = Formula::iff(
            Formula::not(Formula::or(Formula::prop("p"), Formula::prop("q"))),
            Formula::and(Formula::not(Formula::prop("p")), Formula::not(Formula::prop("q"))),
        );
        let mut fresh = FreshNames::new();
        let clauses = normalize(&f, &mut fresh).unwrap();
        assert!(clauses.is_empty());
    }

    #[test]
    fn test_implication_clause() {
        // p → q  gives  {¬p ∨ q}
        let f = Formula::implies(Formula::prop("p"), Formula::prop("q"));
        let clauses = normalize(&f, &mut FreshNames::new()).unwrap();
        assert_eq!(clauses.len(), 1);
        assert!(clauses.contains(&Clause::new([lit("p", false), lit("q", true)])));
    }

    #[test]
    fn test_xor_clauses() {
        let f = Formula::xor(Formula::prop("p"), Formula::prop("q"));
        let clauses = normalize(&f, &mut FreshNames::new()).unwrap();
        assert_eq!(clauses.len(), 2);
        assert!(clauses.contains(&Clause::new([lit("p", true), lit("q", true)])));
        assert!(clauses.contains(&Clause::new([lit("p", false), lit("q", false)])));
    }

    #[test]
    fn test_truth_constants() {
        let mut fresh = FreshNames::new();
        assert!(normalize(&Formula::True, &mut fresh).unwrap().is_empty());
        let falsum = normalize(&Formula::False, &mut fresh).unwrap();
        assert_eq!(falsum, ClauseSet::from([Clause::empty()]));
        // p ∨ ⊤ is valid, p ∧ ⊥ is unsatisfiable
        assert!(normalize(&Formula::or(Formula::prop("p"), Formula::True), &mut fresh)
            .unwrap()
            .is_empty());
        assert_eq!(
            normalize(&Formula::and(Formula::prop("p"), Formula::False), &mut fresh).unwrap(),
            ClauseSet::from([Clause::unit(lit("p", true)), Clause::empty()])
        );
    }

    #[test]
    fn test_nnf_pushes_negation_through_quantifiers() {
        // ¬∀x: (P(x) ∧ ¬Q(x))  becomes  ∃x: (¬P(x) ∨ Q(x))
        let f = Formula::not(Formula::forall("x", Formula::and(p("x"), Formula::not(q("x")))));
        let expected = Formula::exists("x", Formula::or(Formula::not(p("x")), q("x")));
        assert_eq!(nnf(&f).unwrap(), expected);
    }

    #[test]
    fn test_nnf_rejects_conditionals() {
        let f = Formula::implies(Formula::prop("p"), Formula::prop("q"));
        assert!(matches!(
            nnf(&f),
            Err(NormalizeError::MalformedFormula { stage: "nnf", .. })
        ));
    }

    #[test]
    fn test_merge_prefers_existentials() {
        let x = Variable::new("x");
        let y = Variable::new("y");
        let z = Variable::new("z");
        let merged = merge_quantifiers(
            vec![(Quantifier::Forall, x.clone()), (Quantifier::Exists, y.clone())],
            vec![(Quantifier::Exists, z.clone())],
        );
        assert_eq!(
            merged,
            vec![
                (Quantifier::Exists, z),
                (Quantifier::Forall, x),
                (Quantifier::Exists, y),
            ]
        );
    }

    #[test]
    fn test_skolem_constant_when_no_universal_in_scope() {
        // ∃y: P(y)  gives  {P($sk0)}
        let mut fresh = FreshNames::new();
        let clauses = normalize(&Formula::exists("y", p("y")), &mut fresh).unwrap();
        let clause = clauses.first().unwrap();
        let literal = clause.unit_literal().unwrap();
        assert!(literal.atom.is_ground());
        assert_eq!(fresh.skolem_count(), 1);
    }

    #[test]
    fn test_skolem_function_over_universals() {
        // ∀x: ∃y: R(x, y)  gives  {R(x, sk(x))}
        let f = Formula::forall(
            "x",
            Formula::exists("y", Formula::atom("R", vec![Term::var("x"), Term::var("y")])),
        );
        let mut fresh = FreshNames::new();
        let clauses = normalize(&f, &mut fresh).unwrap();
        let literal = clauses.first().unwrap().unit_literal().unwrap().clone();
        match &literal.atom.args[1] {
            Term::Function(sym, args) => {
                assert!(FreshNames::is_reserved(&sym.name));
                assert_eq!(args, &vec![Term::var("x")]);
            }
            Term::Variable(_) => panic!("expected Skolem term"),
        }
    }

    #[test]
    fn test_sibling_quantifiers_are_not_merged() {
        // (∃x: P(x)) ∧ (∃x: Q(x)) must use two different Skolem constants
        let f = Formula::and(Formula::exists("x", p("x")), Formula::exists("x", q("x")));
        let mut fresh = FreshNames::new();
        let clauses = normalize(&f, &mut fresh).unwrap();
        assert_eq!(clauses.len(), 2);
        assert_eq!(fresh.skolem_count(), 2);
        let constants: BTreeSet<_> = clauses
            .iter()
            .map(|c| c.unit_literal().unwrap().atom.args[0].clone())
            .collect();
        assert_eq!(constants.len(), 2);
    }

    #[test]
    fn test_biconditional_copy_is_renamed() {
        // (∀x: P(x)) ↔ q: the backward copy binds a fresh variable
        let f = Formula::iff(Formula::forall("x", p("x")), Formula::prop("q"));
        let mut fresh = FreshNames::new();
        let eliminated = eliminate_biconditional(&f, &mut fresh);
        match eliminated {
            Formula::And(forward, backward) => {
                assert!(forward.bound_variables().contains(&Variable::new("x")));
                assert!(!backward.bound_variables().contains(&Variable::new("x")));
            }
            other => panic!("expected conjunction, got {:?}", other),
        }
    }

    #[test]
    fn test_grandparent_definition() {
        // ∀g: ∀c: (Grandparent(g, c) ↔ ∃p: (Parent(g, p) ∧ Parent(p, c)))
        let parent = |a: &str, b: &str| Formula::atom("Parent", vec![Term::var(a), Term::var(b)]);
        let f = Formula::forall(
            "g",
            Formula::forall(
                "c",
                Formula::iff(
                    Formula::atom("Grandparent", vec![Term::var("g"), Term::var("c")]),
                    Formula::exists("p", Formula::and(parent("g", "p"), parent("p", "c"))),
                ),
            ),
        );
        let mut fresh = FreshNames::new();
        let clauses = normalize(&f, &mut fresh).unwrap();
        // Two clauses for the forward direction, one for the backward one
        assert_eq!(clauses.len(), 3);
        assert_eq!(fresh.skolem_count(), 1);
        assert!(clauses.iter().any(|c| c.len() == 3));
    }

    #[test]
    fn test_cnf_rejects_quantifier() {
        let f = Formula::forall("x", p("x"));
        assert!(matches!(cnf(f), Err(NormalizeError::MalformedFormula { stage: "cnf", .. })));
    }

    #[test]
    fn test_keeps_tautologies_when_disabled() {
        let f = Formula::or(Formula::prop("p"), Formula::not(Formula::prop("p")));
        let mut fresh = FreshNames::new();
        let config = ProverConfig {
            remove_tautologies: false,
            ..ProverConfig::default()
        };
        let clauses = Normalizer::with_config(&mut fresh, &config).normalize(&f).unwrap();
        assert_eq!(clauses.len(), 1);
        assert!(normalize(&f, &mut fresh).unwrap().is_empty());
    }

    #[test]
    fn test_prenex_into_formula() {
        // ∀x: (P(x) ∨ ∃y: Q(y))  becomes  ∀x ∃y: (P(x) ∨ Q(y))
        let f = Formula::forall("x", Formula::or(p("x"), Formula::exists("y", q("y"))));
        let prenex = extract_quantifiers(&f).unwrap();
        assert_eq!(
            prenex.prefix,
            vec![
                (Quantifier::Forall, Variable::new("x")),
                (Quantifier::Exists, Variable::new("y")),
            ]
        );
        assert!(!prenex.matrix.has_quantifier());
        assert_eq!(
            prenex.into_formula(),
            Formula::forall("x", Formula::exists("y", Formula::or(p("x"), q("y"))))
        );
    }
}
