//! Error types for encoding, decoding and running the external solver.

use std::io;
use std::path::PathBuf;
use std::process::ExitStatus;

use thiserror::Error;

use crate::letter::Letter;
use crate::types::Var;

/// Top-level error of the crate.
#[derive(Debug, Error)]
pub enum Error {
    /// Problem parameters rejected before encoding begins.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
    #[error(transparent)]
    Decode(#[from] DecodeError),
    #[error(transparent)]
    Solver(#[from] SolverError),
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Malformed solver output, detected while classifying its lines.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("line {line}: invalid literal `{token}`")]
    InvalidLiteral { line: usize, token: String },
    #[error("line {line}: variable {var} is assigned both true and false")]
    Conflict { line: usize, var: Var },
    /// `var` is the absolute value of the literal, so `-2147483648` fits.
    #[error("line {line}: variable {var} exceeds the {max} encoded variables")]
    VariableOutOfRange { line: usize, var: u32, max: u32 },
}

/// The solver output does not describe a model of the encoding.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error("solver reported UNSATISFIABLE")]
    Unsatisfiable,
    #[error("solver reported unknown status `{0}`")]
    UnknownStatus(String),
    #[error("solver output contains no assignment")]
    NoAssignment,
    #[error("assignment does not cover variable {0}")]
    MissingVariable(Var),
    #[error("word {word}, position {pos}: no letter is assigned true")]
    NoLetter { word: usize, pos: usize },
    #[error("word {word}, position {pos}: both {first} and {second} are assigned true")]
    AmbiguousLetter {
        word: usize,
        pos: usize,
        first: Letter,
        second: Letter,
    },
}

/// Failure of the external solver process.
///
/// Never to be confused with an UNSAT answer, which is a normal exit.
#[derive(Debug, Error)]
pub enum SolverError {
    #[error("failed to run solver `{}`: {source}", path.display())]
    Spawn {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("solver `{}` exited with {status}", path.display())]
    Failed { path: PathBuf, status: ExitStatus },
}

/// A string that is not a word over `{A, C, G, T}` of the fixed length.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseWordError {
    #[error("word `{word}` has length {len}, expected {expected}")]
    Length { word: String, len: usize, expected: usize },
    #[error("word `{word}` contains invalid letter `{letter}`")]
    Letter { word: String, letter: char },
}
