//! CNF encoding of the word design problem.
//!
//! Find `N` words of length 8 over `{A, C, G, T}` such that:
//!
//! - each word has exactly 4 letters from `{C, G}`,
//! - every two distinct words differ in at least 4 positions,
//! - for every ordered pair `(w1, w2)`, including `w1 = w2`, the reverse of
//!   `w1` differs from the Watson–Crick complement of `w2` in at least 4
//!   positions.
//!
//! The encoding runs four passes in a fixed order, each iterating words,
//! positions and letters in ascending order, so the emitted CNF is
//! deterministic:
//!
//! 1. one-hot letters per position,
//! 2. CG balance via `is_cg`/`is_at` auxiliaries,
//! 3. pairwise distance via `same` auxiliaries,
//! 4. reverse-complement distance via `same` auxiliaries.
//!
//! Cardinality constraints ("at most `k` of `n` are true") use the naive
//! encoding: one clause per `(k+1)`-subset, forbidding all of them at once.
//!
//! # Examples
//!
//! ```
//! use word_design::encoder::Encoder;
//!
//! let encoding = Encoder::new(1).unwrap().encode();
//! assert_eq!(encoding.cnf().num_vars(), 56);
//! assert_eq!(encoding.cnf().num_clauses(), 496);
//! ```

use itertools::Itertools;
use log::{debug, info};

use crate::allocator::VarAllocator;
use crate::cnf::{Clause, Cnf};
use crate::error::Error;
use crate::letter::{Letter, Word, ALPHABET, WORD_LENGTH};
use crate::solution::Assignment;
use crate::types::{Lit, Var};

/// Number of `C`/`G` letters required in every word.
pub const CG_COUNT: usize = 4;

/// Minimal Hamming distance for both distance families.
pub const MIN_DISTANCE: usize = 4;

/// Meaning of an auxiliary variable, in terms of letter variables.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum AuxDef {
    /// `word[pos] ∈ {C, G}`
    IsCg { word: usize, pos: usize },
    /// `word[pos] ∈ {A, T}`
    IsAt { word: usize, pos: usize },
    /// `w1[pos] = w2[pos]`
    Same { w1: usize, w2: usize, pos: usize },
    /// `w1[L-1-pos] = comp(w2[pos])`
    RevCompSame { w1: usize, w2: usize, pos: usize },
}

impl AuxDef {
    /// Evaluates the definition on concrete words.
    pub fn eval(&self, words: &[Word]) -> bool {
        match *self {
            AuxDef::IsCg { word, pos } => words[word][pos].is_cg(),
            AuxDef::IsAt { word, pos } => !words[word][pos].is_cg(),
            AuxDef::Same { w1, w2, pos } => words[w1][pos] == words[w2][pos],
            AuxDef::RevCompSame { w1, w2, pos } => {
                words[w1][WORD_LENGTH - 1 - pos] == words[w2][pos].complement()
            }
        }
    }
}

pub struct Encoder {
    num_words: usize,
    vars: VarAllocator,
    clauses: Vec<Clause>,
    aux: Vec<(Var, AuxDef)>,
}

impl Encoder {
    /// Creates an encoder for `num_words` words.
    ///
    /// Returns [`Error::InvalidParameter`] if `num_words == 0`.
    pub fn new(num_words: usize) -> Result<Self, Error> {
        if num_words == 0 {
            return Err(Error::InvalidParameter(
                "number of words must be positive".to_string(),
            ));
        }
        Ok(Self {
            num_words,
            vars: VarAllocator::new(num_words),
            clauses: Vec::new(),
            aux: Vec::new(),
        })
    }

    pub fn num_words(&self) -> usize {
        self.num_words
    }

    /// Runs all encoding passes and returns the finished model.
    pub fn encode(mut self) -> Encoding {
        self.run_pass("one-hot", Self::exactly_one_letter_per_position);
        self.run_pass("cg-balance", Self::exactly_four_cg_letters);
        self.run_pass("distance", Self::distance_constraint);
        self.run_pass("reverse-complement", Self::reverse_complement_constraint);

        info!(
            "Encoded {} words: {} variables, {} clauses",
            self.num_words,
            self.vars.num_vars(),
            self.clauses.len()
        );

        Encoding {
            cnf: Cnf::new(self.vars.num_vars(), self.clauses),
            vars: self.vars,
            aux: self.aux,
        }
    }

    fn run_pass(&mut self, name: &str, pass: fn(&mut Self)) {
        let vars_before = self.vars.num_vars();
        let clauses_before = self.clauses.len();
        pass(self);
        debug!(
            "pass {}: +{} vars, +{} clauses",
            name,
            self.vars.num_vars() - vars_before,
            self.clauses.len() - clauses_before
        );
    }

    fn add_clause(&mut self, lits: impl IntoIterator<Item = Lit>) {
        self.clauses.push(lits.into_iter().collect());
    }

    fn new_aux(&mut self, def: AuxDef) -> Var {
        let var = self.vars.new_aux_var();
        self.aux.push((var, def));
        var
    }

    /// Letter variables of `word[pos]`, in alphabet order.
    fn letter_vars(&mut self, word: usize, pos: usize) -> [Var; 4] {
        ALPHABET.map(|letter| self.vars.get_var(word, pos, letter))
    }

    /// At most `k` of `vars` are true: forbid every `(k+1)`-subset.
    fn at_most_k(&mut self, vars: &[Var], k: usize) {
        for subset in vars.iter().combinations(k + 1) {
            self.add_clause(subset.into_iter().map(|v| v.neg()));
        }
    }

    /// `(c | g | a | t)` and the four `{C, G}` vs `{A, T}` exclusions.
    fn cg_at_partition(&mut self, [a, c, g, t]: [Var; 4]) {
        self.add_clause([c.pos(), g.pos(), a.pos(), t.pos()]);
        self.add_clause([c.neg(), a.neg()]);
        self.add_clause([c.neg(), t.neg()]);
        self.add_clause([g.neg(), a.neg()]);
        self.add_clause([g.neg(), t.neg()]);
    }

    /// Each position of each word holds exactly one letter.
    fn exactly_one_letter_per_position(&mut self) {
        for word in 0..self.num_words {
            for pos in 0..WORD_LENGTH {
                let vars = self.letter_vars(word, pos);
                self.add_clause(vars.map(Var::pos));
                for (x, y) in vars.into_iter().tuple_combinations() {
                    self.add_clause([x.neg(), y.neg()]);
                }
            }
        }
    }

    /// Each word has exactly four `C`/`G` letters.
    ///
    /// Encoded as "at most 4 `is_cg`" plus "at most 4 `is_at`", with `is_cg`
    /// and `is_at` exclusive and exhaustive at every position.
    fn exactly_four_cg_letters(&mut self) {
        for word in 0..self.num_words {
            let mut cg_vars = Vec::with_capacity(WORD_LENGTH);
            for pos in 0..WORD_LENGTH {
                let letters = self.letter_vars(word, pos);
                let [_, c, g, _] = letters;
                let is_cg = self.new_aux(AuxDef::IsCg { word, pos });
                cg_vars.push(is_cg);

                // is_cg <-> (c | g)
                self.add_clause([is_cg.neg(), c.pos(), g.pos()]);
                self.add_clause([c.neg(), is_cg.pos()]);
                self.add_clause([g.neg(), is_cg.pos()]);

                self.cg_at_partition(letters);
            }
            self.at_most_k(&cg_vars, CG_COUNT);

            let mut at_vars = Vec::with_capacity(WORD_LENGTH);
            for pos in 0..WORD_LENGTH {
                let [a, _, _, t] = self.letter_vars(word, pos);
                let is_at = self.new_aux(AuxDef::IsAt { word, pos });
                at_vars.push(is_at);

                // is_at <-> (a | t)
                self.add_clause([is_at.neg(), a.pos(), t.pos()]);
                self.add_clause([a.neg(), is_at.pos()]);
                self.add_clause([t.neg(), is_at.pos()]);

                // is_cg xor is_at
                self.add_clause([cg_vars[pos].pos(), is_at.pos()]);
                self.add_clause([cg_vars[pos].neg(), is_at.neg()]);
            }
            self.at_most_k(&at_vars, WORD_LENGTH - CG_COUNT);

            for pos in 0..WORD_LENGTH {
                let letters = self.letter_vars(word, pos);
                self.cg_at_partition(letters);
            }
        }
    }

    /// Every two distinct words differ in at least [`MIN_DISTANCE`] positions.
    fn distance_constraint(&mut self) {
        for (w1, w2) in (0..self.num_words).tuple_combinations() {
            let mut same_vars = Vec::with_capacity(WORD_LENGTH);
            for pos in 0..WORD_LENGTH {
                // same <-> (w1[pos] = w2[pos])
                let same = self.new_aux(AuxDef::Same { w1, w2, pos });
                same_vars.push(same);

                for (l1, l2) in ALPHABET.into_iter().cartesian_product(ALPHABET) {
                    let x = self.vars.get_var(w1, pos, l1);
                    let y = self.vars.get_var(w2, pos, l2);
                    let s = if l1 == l2 { same.pos() } else { same.neg() };
                    self.add_clause([x.neg(), y.neg(), s]);
                }
            }
            self.at_most_k(&same_vars, WORD_LENGTH - MIN_DISTANCE);
        }
    }

    /// For every ordered pair `(w1, w2)`, the reverse of `w1` differs from
    /// the complement of `w2` in at least [`MIN_DISTANCE`] positions.
    fn reverse_complement_constraint(&mut self) {
        for w1 in 0..self.num_words {
            for w2 in 0..self.num_words {
                let mut same_vars = Vec::with_capacity(WORD_LENGTH);
                for pos in 0..WORD_LENGTH {
                    // same <-> (w1[rev_pos] = comp(w2[pos]))
                    let same = self.new_aux(AuxDef::RevCompSame { w1, w2, pos });
                    same_vars.push(same);
                    let rev_pos = WORD_LENGTH - 1 - pos;

                    for letter in ALPHABET {
                        let x = self.vars.get_var(w1, rev_pos, letter);
                        let compl = letter.complement();
                        let y = self.vars.get_var(w2, pos, compl);
                        self.add_clause([x.neg(), y.neg(), same.pos()]);

                        for wrong in ALPHABET.into_iter().filter(|&m| m != compl) {
                            let y = self.vars.get_var(w2, pos, wrong);
                            self.add_clause([x.neg(), y.neg(), same.neg()]);
                        }
                    }
                }
                self.at_most_k(&same_vars, WORD_LENGTH - MIN_DISTANCE);
            }
        }
    }
}

/// Result of [`Encoder::encode`]: the CNF plus the variable mapping needed to
/// decode solutions.
#[derive(Debug, Clone)]
pub struct Encoding {
    cnf: Cnf,
    vars: VarAllocator,
    aux: Vec<(Var, AuxDef)>,
}

impl Encoding {
    pub fn cnf(&self) -> &Cnf {
        &self.cnf
    }

    pub fn vars(&self) -> &VarAllocator {
        &self.vars
    }

    pub fn num_words(&self) -> usize {
        self.vars.num_words()
    }

    /// Auxiliary variables with their definitions, in allocation order.
    pub fn aux_vars(&self) -> &[(Var, AuxDef)] {
        &self.aux
    }

    /// Letter variable of `word[pos] = letter`.
    ///
    /// # Panics
    ///
    /// Panics if the indices are out of range.
    pub fn letter_var(&self, word: usize, pos: usize, letter: Letter) -> Var {
        self.vars
            .letter_var(word, pos, letter)
            .expect("every letter variable is allocated by the one-hot pass")
    }

    /// Builds the total assignment that represents `words`.
    ///
    /// Letter variables follow the words, auxiliary variables follow their
    /// definitions. The result satisfies the CNF iff `words` is a solution.
    ///
    /// # Panics
    ///
    /// Panics if `words.len()` differs from the number of encoded words.
    pub fn assignment_for(&self, words: &[Word]) -> Assignment {
        assert_eq!(words.len(), self.num_words(), "wrong number of words");
        let mut assignment = Assignment::new(self.cnf.num_vars());
        for (w, word) in words.iter().enumerate() {
            for pos in 0..WORD_LENGTH {
                for letter in ALPHABET {
                    assignment.set(self.letter_var(w, pos, letter), word[pos] == letter);
                }
            }
        }
        for &(var, def) in &self.aux {
            assignment.set(var, def.eval(words));
        }
        assignment
    }

    /// Whether `words` (lifted via [`Encoding::assignment_for`]) satisfies every clause.
    pub fn admits(&self, words: &[Word]) -> bool {
        let assignment = self.assignment_for(words);
        self.cnf
            .is_satisfied_by(|v| assignment.value(Var::new(v)).unwrap_or(false))
    }
}
