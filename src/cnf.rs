//! In-memory CNF model and its DIMACS serialization.
//!
//! # DIMACS Format
//!
//! ```text
//! p cnf <num_vars> <num_clauses>
//! 1 2 3 4 0
//! -1 -2 0
//! ...
//! ```
//!
//! Clause lines are separated by `\n`, and the last clause is not followed by
//! a newline, so the output of [`Cnf::to_dimacs`] is byte-stable for a given
//! model.

use std::fmt;
use std::io;

use crate::types::Lit;

/// A disjunction of literals, kept in insertion order.
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub struct Clause(Vec<Lit>);

impl Clause {
    pub fn new(lits: Vec<Lit>) -> Self {
        assert!(!lits.is_empty(), "clause must not be empty");
        Self(lits)
    }

    pub fn lits(&self) -> &[Lit] {
        &self.0
    }

    /// Evaluates the clause under a total assignment.
    ///
    /// `value(var_id)` must return the truth value of the variable.
    pub fn eval(&self, value: impl Fn(u32) -> bool) -> bool {
        self.0.iter().any(|&lit| value(lit.var().id()) == lit.is_positive())
    }
}

impl FromIterator<Lit> for Clause {
    fn from_iter<I: IntoIterator<Item = Lit>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl fmt::Display for Clause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for lit in &self.0 {
            write!(f, "{} ", lit)?;
        }
        write!(f, "0")
    }
}

/// A CNF formula: clause list plus the number of allocated variables.
#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct Cnf {
    num_vars: u32,
    clauses: Vec<Clause>,
}

impl Cnf {
    pub fn new(num_vars: u32, clauses: Vec<Clause>) -> Self {
        Self { num_vars, clauses }
    }

    pub fn num_vars(&self) -> u32 {
        self.num_vars
    }

    pub fn num_clauses(&self) -> usize {
        self.clauses.len()
    }

    pub fn clauses(&self) -> &[Clause] {
        &self.clauses
    }

    /// Whether every clause is satisfied by `value`.
    pub fn is_satisfied_by(&self, value: impl Fn(u32) -> bool) -> bool {
        self.clauses.iter().all(|clause| clause.eval(&value))
    }

    /// Converts the model to DIMACS format.
    pub fn to_dimacs(&self) -> String {
        self.to_string()
    }

    /// Writes the DIMACS representation into `writer`.
    pub fn write_dimacs<W: io::Write>(&self, mut writer: W) -> io::Result<()> {
        write!(writer, "{}", self)?;
        writer.flush()
    }
}

impl fmt::Display for Cnf {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "p cnf {} {}", self.num_vars, self.clauses.len())?;
        for clause in &self.clauses {
            write!(f, "\n{}", clause)?;
        }
        Ok(())
    }
}
