//! Invocation of an external SAT solver process.
//!
//! The solver is called MiniSat/Glucose style:
//!
//! ```text
//! <solver> -model <file.cnf> -verb=<0|1>
//! ```
//!
//! and is expected to print its answer in SAT competition format on stdout.
//! Exit codes 10 (SAT) and 20 (UNSAT) follow the competition convention; 0 is
//! accepted as well. The process is waited for without a timeout.

use std::path::{Path, PathBuf};
use std::process::Command;

use log::{debug, info};

use crate::error::SolverError;

/// Exit codes that mean "the solver finished normally".
const ACCEPTED_EXIT_CODES: [i32; 3] = [0, 10, 20];

#[derive(Debug, Clone)]
pub struct Solver {
    path: PathBuf,
    verbose: bool,
}

impl Solver {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            verbose: false,
        }
    }

    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Builds the command line for solving `cnf_path`.
    pub fn command(&self, cnf_path: &Path) -> Command {
        let mut command = Command::new(&self.path);
        command
            .arg("-model")
            .arg(cnf_path)
            .arg(format!("-verb={}", if self.verbose { 1 } else { 0 }));
        command
    }

    /// Runs the solver on `cnf_path` and returns its stdout.
    ///
    /// The answer itself (SAT/UNSAT) is left to the decoder; only process
    /// level failures are reported here.
    pub fn run(&self, cnf_path: &Path) -> Result<String, SolverError> {
        info!("Running solver {} on {}", self.path.display(), cnf_path.display());
        let output = self.command(cnf_path).output().map_err(|source| SolverError::Spawn {
            path: self.path.clone(),
            source,
        })?;
        debug!("solver exited with {}", output.status);

        match output.status.code() {
            Some(code) if ACCEPTED_EXIT_CODES.contains(&code) => {
                Ok(String::from_utf8_lossy(&output.stdout).into_owned())
            }
            _ => Err(SolverError::Failed {
                path: self.path.clone(),
                status: output.status,
            }),
        }
    }
}
