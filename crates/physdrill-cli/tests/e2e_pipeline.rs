//! End-to-end: generate a worksheet, answer it, grade it.

use std::path::{Path, PathBuf};

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

use physdrill_core::model::ExpectedAnswer;
use physdrill_core::responses::{Response, ResponseSheet};
use physdrill_core::worksheet::Worksheet;

fn physdrill(dir: &TempDir) -> Command {
    #[allow(deprecated)]
    let mut cmd = Command::cargo_bin("physdrill").unwrap();
    cmd.current_dir(dir.path())
        .env("HOME", dir.path())
        .env_remove("PHYSDRILL_SEED")
        .env_remove("PHYSDRILL_TOLERANCE");
    cmd
}

/// Generate a JSON worksheet into `dir` and return its path.
fn generate(dir: &TempDir, topic: &str, kind: &str, difficulty: &str, seed: &str) -> PathBuf {
    physdrill(dir)
        .args([
            "generate",
            "--topic",
            topic,
            "--kind",
            kind,
            "--difficulty",
            difficulty,
            "--count",
            "5",
            "--seed",
            seed,
            "--output",
            "out",
        ])
        .assert()
        .success();

    std::fs::read_dir(dir.path().join("out"))
        .unwrap()
        .map(|e| e.unwrap().path())
        .find(|p| p.extension().is_some_and(|e| e == "json"))
        .expect("worksheet JSON was written")
}

fn correct_answer(answer: &ExpectedAnswer) -> String {
    match answer {
        ExpectedAnswer::Numeric { value, .. } => value.to_string(),
        ExpectedAnswer::Text { value, .. } => value.clone(),
        ExpectedAnswer::Choice { index, .. } => (index + 1).to_string(),
    }
}

fn write_responses(path: &Path, worksheet: &Worksheet, answer: impl Fn(&ExpectedAnswer) -> String) {
    let sheet = ResponseSheet {
        worksheet: Some(worksheet.id),
        responses: worksheet
            .problems
            .iter()
            .enumerate()
            .map(|(i, p)| Response {
                number: i + 1,
                answers: p.answers.iter().map(&answer).collect(),
            })
            .collect(),
    };
    sheet.save(path).unwrap();
}

#[test]
fn perfect_answers_score_full_marks() {
    let cases = [
        ("linear-motion", "mixed", "hard"),
        ("projectile", "angled", "hard"),
        ("compounds", "mixed", "hard"),
        ("motion-graphs", "velocity-time", "medium"),
    ];

    for (topic, kind, difficulty) in cases {
        let dir = TempDir::new().unwrap();
        let worksheet_path = generate(&dir, topic, kind, difficulty, "21");
        let worksheet = Worksheet::load_json(&worksheet_path).unwrap();
        assert_eq!(worksheet.problems.len(), 5);

        let responses = dir.path().join("answers.toml");
        write_responses(&responses, &worksheet, correct_answer);

        let output = physdrill(&dir)
            .args(["check", "--format", "json", "--fail-under", "100", "--worksheet"])
            .arg(&worksheet_path)
            .arg("--responses")
            .arg(&responses)
            .output()
            .unwrap();
        assert!(output.status.success(), "{topic}/{kind} did not pass");

        let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
        assert_eq!(report["correct"], 5);
        assert_eq!(report["attempts"], 5);
        assert_eq!(report["percentage"], 100.0);
    }
}

#[test]
fn blank_answer_sheet_fails_threshold() {
    let dir = TempDir::new().unwrap();
    let worksheet_path = generate(&dir, "forces", "force", "easy", "2");
    let blank = std::fs::read_dir(dir.path().join("out"))
        .unwrap()
        .map(|e| e.unwrap().path())
        .find(|p| p.extension().is_some_and(|e| e == "toml"))
        .expect("blank answer sheet was written");

    physdrill(&dir)
        .args(["check", "--fail-under", "50", "--worksheet"])
        .arg(&worksheet_path)
        .arg("--responses")
        .arg(&blank)
        .assert()
        .failure()
        .stdout(predicate::str::contains("Score: 0/5 (0.0%)"))
        .stderr(predicate::str::contains("below the required 50.0%"));
}

#[test]
fn partial_answers_are_graded_per_problem() {
    let dir = TempDir::new().unwrap();
    let worksheet_path = generate(&dir, "energy", "work", "easy", "9");
    let worksheet = Worksheet::load_json(&worksheet_path).unwrap();

    let responses = dir.path().join("answers.toml");
    let mut sheet = ResponseSheet {
        worksheet: Some(worksheet.id),
        responses: Vec::new(),
    };
    for (i, problem) in worksheet.problems.iter().enumerate().take(3) {
        sheet.responses.push(Response {
            number: i + 1,
            answers: problem.answers.iter().map(correct_answer).collect(),
        });
    }
    sheet.save(&responses).unwrap();

    physdrill(&dir)
        .args(["check", "--format", "markdown", "--worksheet"])
        .arg(&worksheet_path)
        .arg("--responses")
        .arg(&responses)
        .assert()
        .success()
        .stdout(predicate::str::contains("**Score:** 3/5 (60.0%)"))
        .stderr(predicate::str::contains("no response for problem 4"));
}

#[test]
fn mismatched_worksheet_id_is_warned() {
    let dir = TempDir::new().unwrap();
    let worksheet_path = generate(&dir, "algebra", "rearrange", "easy", "4");
    let worksheet = Worksheet::load_json(&worksheet_path).unwrap();

    let responses = dir.path().join("answers.toml");
    let mut other = worksheet.clone();
    other.id = Worksheet::from_problems("copy", None, Vec::new()).id;
    write_responses(&responses, &other, correct_answer);

    physdrill(&dir)
        .args(["check", "--worksheet"])
        .arg(&worksheet_path)
        .arg("--responses")
        .arg(&responses)
        .assert()
        .success()
        .stderr(predicate::str::contains("responses are for worksheet"))
        .stdout(predicate::str::contains("algebra"))
        .stdout(predicate::str::contains("Score: 5/5 (100.0%)"));
}
