//! Formula AST and the clause normalization pipeline

pub mod cnf_conversion;
pub mod fof;


pub use cnf_conversion::{
    cnf, eliminate_biconditional, eliminate_conditional, extract_quantifiers, merge_quantifiers,
    neg, nnf, normalize, rename_bound_variables, skolemize, standardize_apart, Normalizer, Prenex,
};
pub use fof::{Formula, Quantifier};
