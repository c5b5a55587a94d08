//! First-order logic: data model, fresh names and unification

pub mod core;
pub mod fresh;
pub mod unification;

pub use self::core::clause::{Clause, ClauseSet};
pub use self::core::literal::{Atom, Literal, PredicateSymbol};
pub use self::core::term::{FunctionSymbol, Term, Variable};
pub use fresh::FreshNames;
pub use unification::{unify, unify_atoms, Substitution, UnificationError, UnificationResult};
