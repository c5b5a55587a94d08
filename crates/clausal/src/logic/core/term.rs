//! Terms in first-order logic

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// A variable in first-order logic
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Variable {
    pub name: String,
}

impl Variable {
    pub fn new(name: impl Into<String>) -> Self {
        Variable { name: name.into() }
    }
}

/// A function symbol with arity. Constants are 0-ary function symbols.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct FunctionSymbol {
    pub name: String,
    pub arity: usize,
}

impl FunctionSymbol {
    pub fn new(name: impl Into<String>, arity: usize) -> Self {
        FunctionSymbol {
            name: name.into(),
            arity,
        }
    }
}

/// A term in first-order logic
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Term {
    Variable(Variable),
    Function(FunctionSymbol, Vec<Term>),
}

impl Term {
    /// Create a variable term
    pub fn var(name: impl Into<String>) -> Self {
        Term::Variable(Variable::new(name))
    }

    /// Create a constant (0-ary application)
    pub fn constant(name: impl Into<String>) -> Self {
        Term::Function(FunctionSymbol::new(name, 0), Vec::new())
    }

    /// Create a function application; the arity is taken from `args`
    pub fn function(name: impl Into<String>, args: Vec<Term>) -> Self {
        Term::Function(FunctionSymbol::new(name, args.len()), args)
    }

    pub fn is_variable(&self) -> bool {
        matches!(self, Term::Variable(_))
    }

    pub fn as_variable(&self) -> Option<&Variable> {
        match self {
            Term::Variable(v) => Some(v),
            Term::Function(..) => None,
        }
    }

    /// Check whether `var` occurs anywhere inside this term
    pub fn contains_variable(&self, var: &Variable) -> bool {
        match self {
            Term::Variable(v) => v == var,
            Term::Function(_, args) => args.iter().any(|arg| arg.contains_variable(var)),
        }
    }

    /// Get all variables in this term, in order of first occurrence
    pub fn variables(&self) -> Vec<Variable> {
        let mut vars = Vec::new();
        self.visit_variables(&mut |v| {
            if !vars.contains(v) {
                vars.push(v.clone());
            }
        });
        vars
    }

    /// Collect all variables in this term
    pub fn collect_variables(&self, vars: &mut BTreeSet<Variable>) {
        self.visit_variables(&mut |v| {
            vars.insert(v.clone());
        });
    }

    /// Call `f` on every variable occurrence, left to right
    pub fn visit_variables<F: FnMut(&Variable)>(&self, f: &mut F) {
        match self {
            Term::Variable(v) => f(v),
            Term::Function(_, args) => {
                for arg in args {
                    arg.visit_variables(f);
                }
            }
        }
    }

    pub fn is_ground(&self) -> bool {
        match self {
            Term::Variable(_) => false,
            Term::Function(_, args) => args.iter().all(Term::is_ground),
        }
    }

    /// Nesting depth; variables and constants have depth 1
    pub fn depth(&self) -> usize {
        match self {
            Term::Variable(_) => 1,
            Term::Function(_, args) => 1 + args.iter().map(Term::depth).max().unwrap_or(0),
        }
    }
}

impl fmt::Display for Variable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Term::Variable(v) => write!(f, "{}", v),
            Term::Function(func, args) => {
                write!(f, "{}", func.name)?;
                if !args.is_empty() {
                    write!(f, "(")?;
                    for (i, arg) in args.iter().enumerate() {
                        if i > 0 {
                            write!(f, ",")?;
                        }
                        write!(f, "{}", arg)?;
                    }
                    write!(f, ")")?;
                }
                Ok(())
            }
        }
    }
}
