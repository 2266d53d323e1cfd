//! Direct re-verification of decoded words.
//!
//! Recomputes the balance, distance and reverse-complement properties from the
//! words themselves, independently of the CNF clauses.

use std::fmt;

use log::{debug, warn};

use crate::encoder::{CG_COUNT, MIN_DISTANCE};
use crate::letter::{Word, WORD_LENGTH};

#[derive(Debug, Clone, Eq, PartialEq)]
pub enum Violation {
    /// Word does not have exactly [`CG_COUNT`] `C`/`G` letters.
    Balance { word: usize, cg: usize },
    /// Two distinct words are too close.
    Distance {
        w1: usize,
        w2: usize,
        positions: Vec<usize>,
    },
    /// `reverse(w1)` is too close to `complement(w2)`.
    ReverseComplement {
        w1: usize,
        w2: usize,
        positions: Vec<usize>,
    },
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Words and positions are reported 1-based.
        let list = |positions: &[usize]| {
            positions
                .iter()
                .map(|p| (p + 1).to_string())
                .collect::<Vec<_>>()
                .join(" ")
        };
        match self {
            Violation::Balance { word, cg } => write!(
                f,
                "word {}: {} C/G and {} A/T letters, expected {} C/G",
                word + 1,
                cg,
                WORD_LENGTH - cg,
                CG_COUNT
            ),
            Violation::Distance { w1, w2, positions } => write!(
                f,
                "words {} and {}: distance {} < {}, differing positions: {}",
                w1 + 1,
                w2 + 1,
                positions.len(),
                MIN_DISTANCE,
                list(positions)
            ),
            Violation::ReverseComplement { w1, w2, positions } => write!(
                f,
                "word {} reverse vs word {} complement: distance {} < {}, differing positions: {}",
                w1 + 1,
                w2 + 1,
                positions.len(),
                MIN_DISTANCE,
                list(positions)
            ),
        }
    }
}

#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct Report {
    pub violations: Vec<Violation>,
}

impl Report {
    pub fn is_valid(&self) -> bool {
        self.violations.is_empty()
    }

    pub fn balance_ok(&self) -> bool {
        !self.violations.iter().any(|v| matches!(v, Violation::Balance { .. }))
    }

    pub fn distance_ok(&self) -> bool {
        !self.violations.iter().any(|v| matches!(v, Violation::Distance { .. }))
    }

    pub fn reverse_complement_ok(&self) -> bool {
        !self
            .violations
            .iter()
            .any(|v| matches!(v, Violation::ReverseComplement { .. }))
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_valid() {
            return write!(f, "All constraints satisfied!");
        }
        write!(f, "Some constraints were violated!")?;
        if !self.balance_ok() {
            write!(f, "\n- C/G letter constraint violated")?;
        }
        if !self.distance_ok() {
            write!(f, "\n- Distance constraint violated")?;
        }
        if !self.reverse_complement_ok() {
            write!(f, "\n- Reverse-complement constraint violated")?;
        }
        Ok(())
    }
}

/// Every word has exactly [`CG_COUNT`] `C`/`G` letters.
pub fn check_balance(words: &[Word]) -> Vec<Violation> {
    let mut violations = Vec::new();
    for (i, word) in words.iter().enumerate() {
        let cg = word.cg_count();
        debug!("word {}: {} (C/G: {}, A/T: {})", i + 1, word, cg, WORD_LENGTH - cg);
        if cg != CG_COUNT {
            violations.push(Violation::Balance { word: i, cg });
        }
    }
    violations
}

/// Every two distinct words differ in at least [`MIN_DISTANCE`] positions.
pub fn check_distance(words: &[Word]) -> Vec<Violation> {
    let mut violations = Vec::new();
    for (i, w1) in words.iter().enumerate() {
        for (j, w2) in words.iter().enumerate().skip(i + 1) {
            let positions: Vec<usize> = w1.differing_positions(w2).collect();
            debug!("words {} and {}: {} vs {}, distance {}", i + 1, j + 1, w1, w2, positions.len());
            if positions.len() < MIN_DISTANCE {
                violations.push(Violation::Distance { w1: i, w2: j, positions });
            }
        }
    }
    violations
}

/// For every ordered pair, `reverse(w1)` and `complement(w2)` differ in at
/// least [`MIN_DISTANCE`] positions.
pub fn check_reverse_complement(words: &[Word]) -> Vec<Violation> {
    let mut violations = Vec::new();
    for (i, w1) in words.iter().enumerate() {
        let rev = w1.reversed();
        for (j, w2) in words.iter().enumerate() {
            let compl = w2.complement();
            let positions: Vec<usize> = rev.differing_positions(&compl).collect();
            debug!(
                "word {} reverse vs word {} complement: {} vs {}, distance {}",
                i + 1,
                j + 1,
                rev,
                compl,
                positions.len()
            );
            if positions.len() < MIN_DISTANCE {
                violations.push(Violation::ReverseComplement { w1: i, w2: j, positions });
            }
        }
    }
    violations
}

/// Runs all checks.
pub fn validate_all(words: &[Word]) -> Report {
    let mut violations = check_balance(words);
    violations.extend(check_distance(words));
    violations.extend(check_reverse_complement(words));
    for v in &violations {
        warn!("constraint violation: {}", v);
    }
    Report { violations }
}
