//! # word-design: DNA word design as SAT
//!
//! **`word-design`** encodes [CSPlib problem 033](https://www.csplib.org/Problems/prob033/)
//! into CNF and decodes SAT solver models back into words.
//!
//! ## The Problem
//!
//! Find `N` words of length 8 over the alphabet `{A, C, G, T}` such that:
//!
//! - each word has exactly 4 symbols from `{C, G}`,
//! - each pair of distinct words differs in at least 4 positions,
//! - for each ordered pair of words `(x, y)`, including `x = y`, the reverse of `x`
//!   and the Watson–Crick complement of `y` differ in at least 4 positions.
//!
//! ## Key Features
//!
//! - **Deterministic Encoding**: Passes iterate words, positions and letters in a fixed order,
//!   so the emitted DIMACS is byte-stable.
//! - **1-Based Variables**: Letter variables come first (`(word * 8 + pos) * 4 + letter + 1`),
//!   auxiliary variables follow.
//! - **Strict Decoding**: A model that leaves a variable unset, or breaks the one-hot letter
//!   invariant, is rejected instead of silently producing a word.
//!
//! ## Basic Usage
//!
//! ```rust
//! use word_design::decoder::Decoder;
//! use word_design::encoder::Encoder;
//! use word_design::letter::Word;
//!
//! // 1. Encode the problem for two words
//! let encoding = Encoder::new(2).unwrap().encode();
//! let dimacs = encoding.cnf().to_dimacs();
//! assert!(dimacs.starts_with("p cnf"));
//!
//! // 2. Pretend a solver found this pair
//! let words: Vec<Word> = vec!["AAAAGGGG".parse().unwrap(), "AAGGGGAA".parse().unwrap()];
//! let output = format!("s SATISFIABLE\n{}", encoding.assignment_for(&words));
//!
//! // 3. Decode the model back
//! let decoded = Decoder::new(&encoding).decode(&output).unwrap();
//! assert_eq!(decoded, words);
//! ```
//!
//! ## Core Components
//!
//! - **[`encoder`]**: The four encoding passes and the [`Encoding`][crate::encoder::Encoding] result.
//! - **[`decoder`]**: Model to words.
//! - **[`solution`]**: Solver output parsing.
//! - **[`validate`]**: Independent re-check of decoded words.
//! - **[`solver`]**: Running an external SAT solver.

pub mod allocator;
pub mod cnf;
pub mod decoder;
pub mod encoder;
pub mod error;
pub mod letter;
pub mod solution;
pub mod solver;
pub mod types;
pub mod validate;
