//! Solver output parsing.
//!
//! SAT competition style output is line-oriented:
//!
//! ```text
//! c comment
//! s SATISFIABLE
//! v 1 -2 3 -4
//! v 5 -6 0
//! ```
//!
//! Every line is first classified by [`Line::classify`], and an
//! [`OutputParser`] consumes the classified lines to build a structured
//! [`SolverOutput`]. Lines that fit no category (solver chatter) are skipped.

use std::fmt;

use log::trace;

use crate::error::ParseError;
use crate::types::{Lit, Var};

/// Answer reported on the `s` line.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum Status {
    Satisfiable,
    Unsatisfiable,
    Unknown(String),
}

impl Status {
    fn parse(s: &str) -> Self {
        match s {
            "SATISFIABLE" => Status::Satisfiable,
            "UNSATISFIABLE" => Status::Unsatisfiable,
            other => Status::Unknown(other.to_string()),
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Status::Satisfiable => write!(f, "SATISFIABLE"),
            Status::Unsatisfiable => write!(f, "UNSATISFIABLE"),
            Status::Unknown(s) => write!(f, "{}", s),
        }
    }
}

/// A classified line of solver output.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum Line<'a> {
    Blank,
    Comment(&'a str),
    Status(Status),
    /// Payload of a `v` line: whitespace separated literals.
    Values(&'a str),
    Other(&'a str),
}

impl<'a> Line<'a> {
    pub fn classify(line: &'a str) -> Self {
        let line = line.trim_end();
        match line.chars().next() {
            None => Line::Blank,
            Some('c') => Line::Comment(line[1..].trim()),
            Some('s') => Line::Status(Status::parse(line[1..].trim())),
            Some('v') => Line::Values(&line[1..]),
            Some(_) => Line::Other(line),
        }
    }
}

/// Tri-state assignment: every variable is true, false, or unset.
///
/// Indexed by variable ID, starting from 1.
#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct Assignment {
    values: Vec<Option<bool>>,
}

impl Assignment {
    /// Creates an assignment with `num_vars` unset variables.
    pub fn new(num_vars: u32) -> Self {
        Self {
            values: vec![None; num_vars as usize],
        }
    }

    /// Largest variable ID the assignment has room for.
    pub fn num_vars(&self) -> u32 {
        self.values.len() as u32
    }

    pub fn value(&self, var: Var) -> Option<bool> {
        self.values.get(var.id() as usize - 1).copied().flatten()
    }

    /// Sets the value of `var`, growing the assignment if needed.
    pub fn set(&mut self, var: Var, value: bool) {
        let index = var.id() as usize - 1;
        if index >= self.values.len() {
            self.values.resize(index + 1, None);
        }
        self.values[index] = Some(value);
    }

    pub fn unset(&mut self, var: Var) {
        if let Some(slot) = self.values.get_mut(var.id() as usize - 1) {
            *slot = None;
        }
    }

    /// The first variable in `1..=num_vars` without a value.
    pub fn first_unset(&self, num_vars: u32) -> Option<Var> {
        (1..=num_vars).map(Var::new).find(|&v| self.value(v).is_none())
    }

    /// Assigned literals, in variable order.
    pub fn lits(&self) -> impl Iterator<Item = Lit> + '_ {
        self.values.iter().enumerate().filter_map(|(i, value)| {
            let var = Var::new(i as u32 + 1);
            value.map(|b| if b { var.pos() } else { var.neg() })
        })
    }
}

impl FromIterator<Lit> for Assignment {
    fn from_iter<I: IntoIterator<Item = Lit>>(iter: I) -> Self {
        let mut assignment = Assignment::default();
        for lit in iter {
            assignment.set(lit.var(), lit.is_positive());
        }
        assignment
    }
}

/// Renders the assignment as a single terminated `v` line.
impl fmt::Display for Assignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "v")?;
        for lit in self.lits() {
            write!(f, " {}", lit)?;
        }
        write!(f, " 0")
    }
}

/// Structured solver output.
#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct SolverOutput {
    pub status: Option<Status>,
    /// Present iff at least one `v` line was seen.
    pub assignment: Option<Assignment>,
}

impl SolverOutput {
    /// Parses output without bounding the variable IDs.
    ///
    /// The assignment grows up to the largest ID seen, so untrusted output
    /// should go through [`SolverOutput::parse_with_limit`].
    pub fn parse(text: &str) -> Result<Self, ParseError> {
        Self::from_lines(text.lines())
    }

    /// Parses output, rejecting any literal whose variable exceeds `max_var`.
    pub fn parse_with_limit(text: &str, max_var: u32) -> Result<Self, ParseError> {
        OutputParser::with_limit(max_var).run(text.lines())
    }

    pub fn from_lines<I, S>(lines: I) -> Result<Self, ParseError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        OutputParser::default().run(lines)
    }
}

/// Line-by-line state machine behind [`SolverOutput::from_lines`].
#[derive(Debug, Default)]
pub struct OutputParser {
    status: Option<Status>,
    assignment: Option<Assignment>,
    /// Set once the `0` terminator has been read.
    terminated: bool,
    max_var: Option<u32>,
}

impl OutputParser {
    /// Parser that rejects variables above `max_var` instead of storing them.
    pub fn with_limit(max_var: u32) -> Self {
        Self {
            max_var: Some(max_var),
            ..Self::default()
        }
    }

    fn run<I, S>(mut self, lines: I) -> Result<SolverOutput, ParseError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for (i, line) in lines.into_iter().enumerate() {
            self.feed(i + 1, Line::classify(line.as_ref()))?;
        }
        Ok(self.finish())
    }

    /// Consumes one classified line; `line_no` is 1-based and used in errors.
    pub fn feed(&mut self, line_no: usize, line: Line<'_>) -> Result<(), ParseError> {
        match line {
            Line::Blank | Line::Comment(_) => {}
            Line::Other(text) => trace!("skipping solver output line {}: {}", line_no, text),
            Line::Status(status) => self.status = Some(status),
            Line::Values(payload) => self.feed_values(line_no, payload)?,
        }
        Ok(())
    }

    fn feed_values(&mut self, line_no: usize, payload: &str) -> Result<(), ParseError> {
        let assignment = self.assignment.get_or_insert_with(Assignment::default);
        for token in payload.split_whitespace() {
            if self.terminated {
                trace!("ignoring literal `{}` after terminator on line {}", token, line_no);
                continue;
            }
            let value: i32 = token.parse().map_err(|_| ParseError::InvalidLiteral {
                line: line_no,
                token: token.to_string(),
            })?;
            if value == 0 {
                self.terminated = true;
                continue;
            }
            if let Some(max) = self.max_var {
                if value.unsigned_abs() > max {
                    return Err(ParseError::VariableOutOfRange {
                        line: line_no,
                        var: value.unsigned_abs(),
                        max,
                    });
                }
            }
            let lit = Lit::from_dimacs(value);
            match assignment.value(lit.var()) {
                Some(b) if b != lit.is_positive() => {
                    return Err(ParseError::Conflict {
                        line: line_no,
                        var: lit.var(),
                    });
                }
                _ => assignment.set(lit.var(), lit.is_positive()),
            }
        }
        Ok(())
    }

    pub fn finish(self) -> SolverOutput {
        SolverOutput {
            status: self.status,
            assignment: self.assignment,
        }
    }
}

#[cfg(test)]
mod tests {
    use test_log::test;

    use super::*;

    #[test]
    fn test_classify() {
        assert_eq!(Line::classify(""), Line::Blank);
        assert_eq!(Line::classify("   "), Line::Blank);
        assert_eq!(Line::classify("c hello"), Line::Comment("hello"));
        assert_eq!(Line::classify("s SATISFIABLE"), Line::Status(Status::Satisfiable));
        assert_eq!(Line::classify("s UNSATISFIABLE"), Line::Status(Status::Unsatisfiable));
        assert_eq!(
            Line::classify("s INDETERMINATE"),
            Line::Status(Status::Unknown("INDETERMINATE".to_string()))
        );
        assert_eq!(Line::classify("v 1 -2 0"), Line::Values(" 1 -2 0"));
        assert_eq!(Line::classify("restarts: 3"), Line::Other("restarts: 3"));
    }

    #[test]
    fn test_parse_multiline() {
        let text = "c solver v1.0\nrandom chatter\ns SATISFIABLE\nv 1 -2\nv -3 4 0\n";
        let output = SolverOutput::parse(text).unwrap();
        assert_eq!(output.status, Some(Status::Satisfiable));
        let assignment = output.assignment.unwrap();
        assert_eq!(assignment.num_vars(), 4);
        assert_eq!(assignment.value(Var::new(1)), Some(true));
        assert_eq!(assignment.value(Var::new(2)), Some(false));
        assert_eq!(assignment.value(Var::new(3)), Some(false));
        assert_eq!(assignment.value(Var::new(4)), Some(true));
        assert_eq!(assignment.value(Var::new(5)), None);
    }

    #[test]
    fn test_parse_after_terminator() {
        let output = SolverOutput::parse("v 1 0\nv 2 0").unwrap();
        let assignment = output.assignment.unwrap();
        assert_eq!(assignment.value(Var::new(1)), Some(true));
        assert_eq!(assignment.value(Var::new(2)), None);
    }

    #[test]
    fn test_parse_unsat() {
        let output = SolverOutput::parse("c\ns UNSATISFIABLE\n").unwrap();
        assert_eq!(output.status, Some(Status::Unsatisfiable));
        assert_eq!(output.assignment, None);
    }

    #[test]
    fn test_parse_invalid_literal() {
        let err = SolverOutput::parse("s SATISFIABLE\nv 1 x2 0").unwrap_err();
        assert_eq!(
            err,
            ParseError::InvalidLiteral {
                line: 2,
                token: "x2".to_string()
            }
        );
    }

    #[test]
    fn test_parse_conflict() {
        let err = SolverOutput::parse("v 1 2 -1 0").unwrap_err();
        assert_eq!(err, ParseError::Conflict { line: 1, var: Var::new(1) });
    }

    #[test]
    fn test_parse_variable_out_of_range() {
        for (text, var) in [("v 2147483647 0", 2147483647), ("v -2147483648 0", 2147483648)] {
            let err = SolverOutput::parse_with_limit(text, 56).unwrap_err();
            assert_eq!(err, ParseError::VariableOutOfRange { line: 1, var, max: 56 });
        }
        let err = SolverOutput::parse_with_limit("s SATISFIABLE\nv 1 -2\nv 5 0", 4).unwrap_err();
        assert_eq!(err, ParseError::VariableOutOfRange { line: 3, var: 5, max: 4 });
    }

    #[test]
    fn test_parse_with_limit_accepts_bound() {
        let output = SolverOutput::parse_with_limit("v 1 -4 0\nv 99 0", 4).unwrap();
        let assignment = output.assignment.unwrap();
        assert_eq!(assignment.num_vars(), 4);
        assert_eq!(assignment.value(Var::new(4)), Some(false));
    }

    #[test]
    fn test_assignment_display() {
        let assignment: Assignment = [1, -2, 4].into_iter().map(Lit::from_dimacs).collect();
        assert_eq!(assignment.to_string(), "v 1 -2 4 0");
        assert_eq!(assignment.first_unset(4), Some(Var::new(3)));
        assert_eq!(assignment.first_unset(2), None);
        let reparsed = SolverOutput::parse(&assignment.to_string()).unwrap();
        assert_eq!(reparsed.assignment, Some(assignment));
    }
}
