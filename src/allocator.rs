//! Variable allocation for the word design encoding.
//!
//! Letter variables `(word, pos, letter)` live in a flat table of shape
//! `num_words × WORD_LENGTH × 4`. Each slot holds the allocated variable ID,
//! with 0 meaning "not allocated yet" (variable IDs are 1-indexed).
//! Auxiliary variables are taken from the same monotonic counter.

use crate::letter::{Letter, ALPHABET, WORD_LENGTH};
use crate::types::Var;

#[derive(Debug, Clone)]
pub struct VarAllocator {
    num_words: usize,
    /// Flat letter table, 0 for unallocated slots.
    letters: Vec<u32>,
    /// Number of allocated variables (the last allocated ID).
    num_vars: u32,
}

impl VarAllocator {
    pub fn new(num_words: usize) -> Self {
        Self {
            num_words,
            letters: vec![0; num_words * WORD_LENGTH * ALPHABET.len()],
            num_vars: 0,
        }
    }

    pub fn num_words(&self) -> usize {
        self.num_words
    }

    /// Number of allocated variables, letter and auxiliary alike.
    pub fn num_vars(&self) -> u32 {
        self.num_vars
    }

    /// Number of letter variables allocated so far.
    pub fn num_letter_vars(&self) -> usize {
        self.letters.iter().filter(|&&id| id != 0).count()
    }

    fn slot(&self, word: usize, pos: usize, letter: Letter) -> usize {
        assert!(word < self.num_words, "word {} out of range 0..{}", word, self.num_words);
        assert!(pos < WORD_LENGTH, "position {} out of range 0..{}", pos, WORD_LENGTH);
        (word * WORD_LENGTH + pos) * ALPHABET.len() + letter.index()
    }

    fn fresh(&mut self) -> Var {
        self.num_vars += 1;
        Var::new(self.num_vars)
    }

    /// Returns the variable for "`word` has `letter` at `pos`", allocating it on first use.
    ///
    /// # Panics
    ///
    /// Panics if `word` or `pos` is out of range.
    pub fn get_var(&mut self, word: usize, pos: usize, letter: Letter) -> Var {
        let slot = self.slot(word, pos, letter);
        if self.letters[slot] == 0 {
            let var = self.fresh();
            self.letters[slot] = var.id();
        }
        Var::new(self.letters[slot])
    }

    /// Looks up a letter variable without allocating it.
    pub fn letter_var(&self, word: usize, pos: usize, letter: Letter) -> Option<Var> {
        match self.letters[self.slot(word, pos, letter)] {
            0 => None,
            id => Some(Var::new(id)),
        }
    }

    /// Allocates a fresh auxiliary variable.
    pub fn new_aux_var(&mut self) -> Var {
        self.fresh()
    }
}
