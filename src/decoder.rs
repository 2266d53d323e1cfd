//! Decoding of solver models back into words.

use log::info;

use crate::encoder::Encoding;
use crate::error::DecodeError;
use crate::letter::{Letter, Word, ALPHABET, WORD_LENGTH};
use crate::solution::{Assignment, SolverOutput, Status};

pub struct Decoder<'a> {
    encoding: &'a Encoding,
}

impl<'a> Decoder<'a> {
    pub fn new(encoding: &'a Encoding) -> Self {
        Self { encoding }
    }

    /// Parses raw solver output and decodes the words.
    ///
    /// Literals over variables the encoding never allocated are rejected.
    pub fn decode(&self, text: &str) -> Result<Vec<Word>, DecodeError> {
        let output = SolverOutput::parse_with_limit(text, self.encoding.cnf().num_vars())?;
        self.decode_output(&output)
    }

    /// Decodes already parsed solver output.
    ///
    /// A missing status line is accepted as long as an assignment is present.
    pub fn decode_output(&self, output: &SolverOutput) -> Result<Vec<Word>, DecodeError> {
        match &output.status {
            Some(Status::Satisfiable) => info!("SATISFIABLE"),
            Some(Status::Unsatisfiable) => return Err(DecodeError::Unsatisfiable),
            Some(Status::Unknown(s)) => return Err(DecodeError::UnknownStatus(s.clone())),
            None => {}
        }
        let assignment = output.assignment.as_ref().ok_or(DecodeError::NoAssignment)?;
        self.decode_assignment(assignment)
    }

    /// Decodes a model.
    ///
    /// Every allocated variable must be assigned, and every position must have
    /// exactly one true letter variable.
    pub fn decode_assignment(&self, assignment: &Assignment) -> Result<Vec<Word>, DecodeError> {
        if let Some(var) = assignment.first_unset(self.encoding.cnf().num_vars()) {
            return Err(DecodeError::MissingVariable(var));
        }

        (0..self.encoding.num_words())
            .map(|word| -> Result<Word, DecodeError> {
                let mut letters = [Letter::A; WORD_LENGTH];
                for (pos, slot) in letters.iter_mut().enumerate() {
                    *slot = self.decode_letter(assignment, word, pos)?;
                }
                Ok(Word::new(letters))
            })
            .collect()
    }

    fn decode_letter(
        &self,
        assignment: &Assignment,
        word: usize,
        pos: usize,
    ) -> Result<Letter, DecodeError> {
        let mut chosen = None;
        for letter in ALPHABET {
            let var = self.encoding.letter_var(word, pos, letter);
            if assignment.value(var) == Some(true) {
                match chosen {
                    None => chosen = Some(letter),
                    Some(first) => {
                        return Err(DecodeError::AmbiguousLetter {
                            word,
                            pos,
                            first,
                            second: letter,
                        })
                    }
                }
            }
        }
        chosen.ok_or(DecodeError::NoLetter { word, pos })
    }
}

#[cfg(test)]
mod tests {
    use test_log::test;

    use super::*;
    use crate::encoder::Encoder;
    use crate::error::ParseError;

    fn words(ws: &[&str]) -> Vec<Word> {
        ws.iter().map(|w| w.parse().unwrap()).collect()
    }

    #[test]
    fn test_roundtrip() {
        let encoding = Encoder::new(2).unwrap().encode();
        let ws = words(&["AAAAGGGG", "AAGGGGAA"]);
        let assignment = encoding.assignment_for(&ws);
        let text = format!("c test\ns SATISFIABLE\n{}\n", assignment);
        let decoded = Decoder::new(&encoding).decode(&text).unwrap();
        assert_eq!(decoded, ws);
    }

    #[test]
    fn test_missing_variable() {
        let encoding = Encoder::new(1).unwrap().encode();
        let mut assignment = encoding.assignment_for(&words(&["AAAAGGGG"]));
        let last = crate::types::Var::new(encoding.cnf().num_vars());
        assignment.unset(last);
        let text = format!("s SATISFIABLE\n{}", assignment);
        assert_eq!(
            Decoder::new(&encoding).decode(&text),
            Err(DecodeError::MissingVariable(last))
        );
    }

    #[test]
    fn test_truncated_assignment() {
        let encoding = Encoder::new(1).unwrap().encode();
        let text = "s SATISFIABLE\nv 1 -2 -3 -4 0";
        assert_eq!(
            Decoder::new(&encoding).decode(text),
            Err(DecodeError::MissingVariable(crate::types::Var::new(5)))
        );
    }

    #[test]
    fn test_no_letter() {
        let encoding = Encoder::new(1).unwrap().encode();
        let mut assignment = encoding.assignment_for(&words(&["AAAAGGGG"]));
        // Position 0 of word 0 is `A`; clear it.
        assignment.set(encoding.letter_var(0, 0, Letter::A), false);
        assert_eq!(
            Decoder::new(&encoding).decode_assignment(&assignment),
            Err(DecodeError::NoLetter { word: 0, pos: 0 })
        );
    }

    #[test]
    fn test_ambiguous_letter() {
        let encoding = Encoder::new(1).unwrap().encode();
        let mut assignment = encoding.assignment_for(&words(&["AAAAGGGG"]));
        assignment.set(encoding.letter_var(0, 5, Letter::T), true);
        assert_eq!(
            Decoder::new(&encoding).decode_assignment(&assignment),
            Err(DecodeError::AmbiguousLetter {
                word: 0,
                pos: 5,
                first: Letter::G,
                second: Letter::T,
            })
        );
    }

    #[test]
    fn test_unsatisfiable() {
        let encoding = Encoder::new(1).unwrap().encode();
        let decoder = Decoder::new(&encoding);
        assert_eq!(decoder.decode("s UNSATISFIABLE"), Err(DecodeError::Unsatisfiable));
        assert_eq!(
            decoder.decode("s UNKNOWN"),
            Err(DecodeError::UnknownStatus("UNKNOWN".to_string()))
        );
        assert_eq!(decoder.decode("c nothing\n"), Err(DecodeError::NoAssignment));
    }

    #[test]
    fn test_malformed_literal() {
        let encoding = Encoder::new(1).unwrap().encode();
        assert_eq!(
            Decoder::new(&encoding).decode("s SATISFIABLE\nv 1 two 0"),
            Err(DecodeError::Parse(ParseError::InvalidLiteral {
                line: 2,
                token: "two".to_string()
            }))
        );
    }

    #[test]
    fn test_huge_variable_rejected() {
        let encoding = Encoder::new(1).unwrap().encode();
        let decoder = Decoder::new(&encoding);
        for (text, var) in [
            ("s SATISFIABLE\nv 2147483647 0", 2147483647),
            ("s SATISFIABLE\nv -2147483648 0", 2147483648),
        ] {
            assert_eq!(
                decoder.decode(text),
                Err(DecodeError::Parse(ParseError::VariableOutOfRange { line: 2, var, max: 56 }))
            );
        }
    }

    #[test]
    fn test_without_status_line() {
        let encoding = Encoder::new(1).unwrap().encode();
        let ws = words(&["GGGGAAAA"]);
        let text = encoding.assignment_for(&ws).to_string();
        assert_eq!(Decoder::new(&encoding).decode(&text).unwrap(), ws);
    }
}
