//! DNA letters and fixed-length words.

use std::fmt;
use std::ops::Index;
use std::str::FromStr;

use crate::error::ParseWordError;

/// Length of every word.
pub const WORD_LENGTH: usize = 8;

/// A nucleotide.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum Letter {
    A,
    C,
    G,
    T,
}

/// The alphabet, in the fixed order used by every encoding pass.
pub const ALPHABET: [Letter; 4] = [Letter::A, Letter::C, Letter::G, Letter::T];

impl Letter {
    /// Position of the letter in [`ALPHABET`].
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Watson–Crick complement: `A <-> T`, `C <-> G`.
    pub const fn complement(self) -> Self {
        match self {
            Letter::A => Letter::T,
            Letter::C => Letter::G,
            Letter::G => Letter::C,
            Letter::T => Letter::A,
        }
    }

    pub const fn is_cg(self) -> bool {
        matches!(self, Letter::C | Letter::G)
    }

    pub const fn to_char(self) -> char {
        match self {
            Letter::A => 'A',
            Letter::C => 'C',
            Letter::G => 'G',
            Letter::T => 'T',
        }
    }

    pub const fn from_char(c: char) -> Option<Self> {
        match c {
            'A' => Some(Letter::A),
            'C' => Some(Letter::C),
            'G' => Some(Letter::G),
            'T' => Some(Letter::T),
            _ => None,
        }
    }
}

impl fmt::Display for Letter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_char())
    }
}

/// A word of exactly [`WORD_LENGTH`] letters.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Word([Letter; WORD_LENGTH]);

impl Word {
    pub const fn new(letters: [Letter; WORD_LENGTH]) -> Self {
        Self(letters)
    }

    pub fn letters(&self) -> &[Letter; WORD_LENGTH] {
        &self.0
    }

    pub fn reversed(&self) -> Self {
        let mut letters = self.0;
        letters.reverse();
        Self(letters)
    }

    pub fn complement(&self) -> Self {
        Self(self.0.map(Letter::complement))
    }

    /// Number of positions carrying `C` or `G`.
    pub fn cg_count(&self) -> usize {
        self.0.iter().filter(|l| l.is_cg()).count()
    }

    /// Hamming distance to another word.
    pub fn distance(&self, other: &Word) -> usize {
        self.differing_positions(other).count()
    }

    /// Positions (0-based) at which the two words differ.
    pub fn differing_positions<'a>(&'a self, other: &'a Word) -> impl Iterator<Item = usize> + 'a {
        (0..WORD_LENGTH).filter(move |&pos| self.0[pos] != other.0[pos])
    }
}

impl Index<usize> for Word {
    type Output = Letter;

    fn index(&self, pos: usize) -> &Self::Output {
        &self.0[pos]
    }
}

impl fmt::Display for Word {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for letter in &self.0 {
            write!(f, "{}", letter)?;
        }
        Ok(())
    }
}

impl FromStr for Word {
    type Err = ParseWordError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let len = s.chars().count();
        if len != WORD_LENGTH {
            return Err(ParseWordError::Length {
                word: s.to_string(),
                len,
                expected: WORD_LENGTH,
            });
        }
        let mut letters = [Letter::A; WORD_LENGTH];
        for (slot, c) in letters.iter_mut().zip(s.chars()) {
            *slot = Letter::from_char(c).ok_or_else(|| ParseWordError::Letter {
                word: s.to_string(),
                letter: c,
            })?;
        }
        Ok(Self(letters))
    }
}
