use word_design::decoder::Decoder;
use word_design::encoder::{AuxDef, Encoder};
use word_design::error::DecodeError;
use word_design::letter::{Word, ALPHABET, WORD_LENGTH};
use word_design::solution::SolverOutput;
use word_design::validate::validate_all;

fn words(ws: &[&str]) -> Vec<Word> {
    ws.iter().map(|w| w.parse().unwrap()).collect()
}

#[test]
fn test_known_solution_roundtrip() {
    let ws = words(&["AAAAGGGG", "AAGGGGAA", "GGAAAAGG"]);
    assert!(validate_all(&ws).is_valid());

    let encoding = Encoder::new(ws.len()).unwrap().encode();
    assert!(encoding.admits(&ws));

    let assignment = encoding.assignment_for(&ws);
    let text = format!("c fake solver\ns SATISFIABLE\n{}\n", assignment);
    let decoded = Decoder::new(&encoding).decode(&text).unwrap();
    assert_eq!(decoded, ws);
    assert!(validate_all(&decoded).is_valid());
}

#[test]
fn test_split_value_lines() {
    let ws = words(&["AAAAGGGG", "AAGGGGAA"]);
    let encoding = Encoder::new(ws.len()).unwrap().encode();
    let lits: Vec<String> = encoding
        .assignment_for(&ws)
        .lits()
        .map(|lit| lit.to_string())
        .collect();

    // Solvers wrap long models over several `v` lines.
    let mut text = String::from("s SATISFIABLE\n");
    for chunk in lits.chunks(10) {
        text.push_str(&format!("v {}\n", chunk.join(" ")));
    }
    text.push_str("v 0\n");

    let output = SolverOutput::parse(&text).unwrap();
    let decoded = Decoder::new(&encoding).decode_output(&output).unwrap();
    assert_eq!(decoded, ws);
}

#[test]
fn test_violating_words_are_rejected_by_clauses() {
    let encoding = Encoder::new(2).unwrap().encode();
    let ws = words(&["ACGTACGT", "TGCATGCA"]);
    assert!(!encoding.admits(&ws));
    assert!(!validate_all(&ws).is_valid());
}

#[test]
fn test_clauses_reference_allocated_vars() {
    let encoding = Encoder::new(3).unwrap().encode();
    let cnf = encoding.cnf();
    for clause in cnf.clauses() {
        for lit in clause.lits() {
            assert!(lit.var().id() >= 1 && lit.var().id() <= cnf.num_vars());
        }
    }
}

#[test]
fn test_single_word_families() {
    let encoding = Encoder::new(1).unwrap().encode();
    let letters = WORD_LENGTH * ALPHABET.len();
    assert_eq!(encoding.vars().num_letter_vars(), letters);

    let mut cg = 0;
    let mut at = 0;
    let mut rev = 0;
    for (_, def) in encoding.aux_vars() {
        match def {
            AuxDef::IsCg { .. } => cg += 1,
            AuxDef::IsAt { .. } => at += 1,
            AuxDef::RevCompSame { w1, w2, .. } => {
                assert_eq!((*w1, *w2), (0, 0));
                rev += 1;
            }
            AuxDef::Same { .. } => panic!("no pairwise distance auxiliaries for a single word"),
        }
    }
    assert_eq!((cg, at, rev), (WORD_LENGTH, WORD_LENGTH, WORD_LENGTH));
}

#[test]
fn test_missing_variable_never_fabricates() {
    let encoding = Encoder::new(2).unwrap().encode();
    let decoder = Decoder::new(&encoding);
    // Only the letters of the first word are given.
    let text: String = std::iter::once("s SATISFIABLE\nv".to_string())
        .chain((1..=32).map(|v| format!(" {}", if v % 4 == 1 { v } else { -v })))
        .chain(std::iter::once(" 0".to_string()))
        .collect();
    match decoder.decode(&text) {
        Err(DecodeError::MissingVariable(var)) => assert_eq!(var.id(), 33),
        other => panic!("unexpected result: {:?}", other),
    }
}

#[cfg(unix)]
mod cli {
    use std::fs;
    use std::os::unix::fs::PermissionsExt;
    use std::path::{Path, PathBuf};
    use std::process::Command;

    use super::*;

    const BIN: &str = env!("CARGO_BIN_EXE_word-design");

    fn fake_solver(dir: &Path, stdout: &str, code: i32) -> PathBuf {
        let out = dir.join("solver.out");
        fs::write(&out, stdout).unwrap();
        let path = dir.join("solver.sh");
        fs::write(&path, format!("#!/bin/sh\ncat '{}'\nexit {}\n", out.display(), code)).unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
        path
    }

    #[test]
    fn test_without_solver() {
        let dir = tempfile::tempdir().unwrap();
        let cnf = dir.path().join("out.cnf");
        let output = Command::new(BIN).arg("2").arg("--output").arg(&cnf).output().unwrap();
        assert!(output.status.success());
        assert!(String::from_utf8_lossy(&output.stdout).contains("No solver specified. Exiting."));
        let dimacs = fs::read_to_string(&cnf).unwrap();
        assert!(dimacs.starts_with("p cnf 136 1544\n1 2 3 4 0\n"));
    }

    #[test]
    fn test_zero_words_fails() {
        let dir = tempfile::tempdir().unwrap();
        let output = Command::new(BIN)
            .arg("0")
            .arg("--output")
            .arg(dir.path().join("out.cnf"))
            .output()
            .unwrap();
        assert!(!output.status.success());
    }

    #[test]
    fn test_with_fake_solver() {
        let ws = words(&["AAAAGGGG", "AAGGGGAA"]);
        let encoding = Encoder::new(ws.len()).unwrap().encode();
        let model = format!("s SATISFIABLE\n{}\n", encoding.assignment_for(&ws));

        let dir = tempfile::tempdir().unwrap();
        let solver = fake_solver(dir.path(), &model, 10);
        let output = Command::new(BIN)
            .arg("2")
            .arg("--solver")
            .arg(&solver)
            .arg("--output")
            .arg(dir.path().join("out.cnf"))
            .arg("--validate")
            .output()
            .unwrap();
        assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
        let stdout = String::from_utf8_lossy(&output.stdout);
        let printed: Vec<&str> = stdout.lines().filter(|l| l.len() == WORD_LENGTH).collect();
        assert_eq!(printed, vec!["AAAAGGGG", "AAGGGGAA"]);
        assert!(stdout.contains("All constraints satisfied!"));
    }

    #[test]
    fn test_unsat_and_crash_fail() {
        let dir = tempfile::tempdir().unwrap();
        for (stdout, code) in [("s UNSATISFIABLE\n", 20), ("s UNSATISFIABLE\n", 139)] {
            let solver = fake_solver(dir.path(), stdout, code);
            let output = Command::new(BIN)
                .arg("1")
                .arg("--solver")
                .arg(&solver)
                .arg("--output")
                .arg(dir.path().join("out.cnf"))
                .output()
                .unwrap();
            assert!(!output.status.success());
        }
    }
}
