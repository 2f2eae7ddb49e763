//! Answer checking.
//!
//! Raw learner input is parsed against the expected answer's shape into a
//! [`Submission`], then compared: numbers within a [`Tolerance`], names
//! after normalization, choices by index.

use serde::{Deserialize, Serialize};

use crate::error::DrillError;
use crate::model::{choice_letter, ExpectedAnswer, Problem};

/// Acceptance window for numeric answers.
///
/// A submission is accepted when it lies within
/// `max(relative * |expected|, absolute)` of the expected value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Tolerance {
    pub relative: f64,
    pub absolute: f64,
}

impl Default for Tolerance {
    fn default() -> Self {
        Self {
            relative: 0.05,
            absolute: 0.01,
        }
    }
}

impl Tolerance {
    pub fn new(relative: f64, absolute: f64) -> Self {
        Self {
            relative: relative.abs(),
            absolute: absolute.abs(),
        }
    }

    pub fn accepts(&self, expected: f64, submitted: f64) -> bool {
        let window = (self.relative * expected.abs()).max(self.absolute);
        (submitted - expected).abs() <= window
    }
}

/// One parsed answer.
#[derive(Debug, Clone, PartialEq)]
pub enum Submission {
    Number(f64),
    Text(String),
    /// Zero-based option index.
    Choice(usize),
}

impl Submission {
    /// Parse `raw` into the shape `expected` asks for.
    pub fn parse(raw: &str, expected: &ExpectedAnswer) -> Result<Self, DrillError> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Err(DrillError::MissingAnswer);
        }
        match expected {
            ExpectedAnswer::Numeric { .. } => parse_number(raw).map(Submission::Number),
            ExpectedAnswer::Text { .. } => Ok(Submission::Text(raw.to_string())),
            ExpectedAnswer::Choice { options, .. } => {
                parse_choice(raw, options).map(Submission::Choice)
            }
        }
    }
}

/// Accepts a bare number or a number followed by a unit ("12.5 m/s").
/// Digit-group commas are ignored ("1,250 m").
fn parse_number(raw: &str) -> Result<f64, DrillError> {
    let cleaned = strip_group_commas(raw);
    let candidate = cleaned
        .parse::<f64>()
        .ok()
        .or_else(|| cleaned.split_whitespace().next()?.parse::<f64>().ok());
    match candidate {
        Some(v) if v.is_finite() => Ok(v),
        _ => Err(DrillError::InvalidNumber(raw.to_string())),
    }
}

/// Accepts a 1-based option number, an option letter, or the option text.
fn parse_choice(raw: &str, options: &[String]) -> Result<usize, DrillError> {
    let invalid = || DrillError::InvalidChoice {
        input: raw.to_string(),
        options: options.len(),
    };
    if let Ok(n) = raw.parse::<usize>() {
        return if (1..=options.len()).contains(&n) {
            Ok(n - 1)
        } else {
            Err(invalid())
        };
    }
    let letter = raw.trim_end_matches(')');
    if letter.chars().count() == 1 {
        let upper = letter.to_ascii_uppercase();
        if let Some(i) = (0..options.len()).find(|i| upper == choice_letter(*i).to_string()) {
            return Ok(i);
        }
    }
    let wanted = normalize_text(raw);
    options
        .iter()
        .position(|o| normalize_text(o) == wanted)
        .ok_or_else(invalid)
}

/// Lowercase with whitespace and hyphens removed, so "Carbon Monoxide",
/// "carbon monoxide" and "carbon-monoxide" compare equal.
pub fn normalize_text(s: &str) -> String {
    s.chars()
        .filter(|c| !c.is_whitespace() && *c != '-')
        .flat_map(char::to_lowercase)
        .collect()
}

/// Whether the `,` at byte `i` separates digit groups, as in "1,250".
fn is_group_comma(s: &str, i: usize) -> bool {
    let bytes = s.as_bytes();
    let digit = |j: usize| bytes.get(j).is_some_and(|b| b.is_ascii_digit());
    i > 0 && digit(i - 1) && (1..=3).all(|k| digit(i + k)) && !digit(i + 4)
}

fn strip_group_commas(raw: &str) -> String {
    raw.char_indices()
        .filter(|(i, c)| !(*c == ',' && is_group_comma(raw, *i)))
        .map(|(_, c)| c)
        .collect()
}

/// Split one input line into per-answer fields on `;` or `,`. A comma
/// between a digit and exactly three more digits is a digit-group
/// separator and stays inside its field.
pub fn split_answers(line: &str) -> Vec<&str> {
    let mut fields = Vec::new();
    let mut start = 0;
    for (i, c) in line.char_indices() {
        if c == ';' || (c == ',' && !is_group_comma(line, i)) {
            fields.push(line[start..i].trim());
            start = i + 1;
        }
    }
    fields.push(line[start..].trim());
    fields
}

/// Parse one raw field per expected answer.
pub fn parse_submissions(problem: &Problem, raw: &[&str]) -> Result<Vec<Submission>, DrillError> {
    if raw.iter().all(|r| r.trim().is_empty()) {
        return Err(DrillError::MissingAnswer);
    }
    if raw.len() != problem.answers.len() {
        return Err(DrillError::AnswerCountMismatch {
            expected: problem.answers.len(),
            got: raw.len(),
        });
    }
    raw.iter()
        .zip(&problem.answers)
        .map(|(r, expected)| Submission::parse(r, expected))
        .collect()
}

/// Whether `submission` matches `expected`.
pub fn check_answer(expected: &ExpectedAnswer, submission: &Submission, tolerance: &Tolerance) -> bool {
    match (expected, submission) {
        (ExpectedAnswer::Numeric { value, .. }, Submission::Number(got)) => {
            tolerance.accepts(*value, *got)
        }
        (ExpectedAnswer::Text { value, .. }, Submission::Text(got)) => {
            normalize_text(value) == normalize_text(got)
        }
        (ExpectedAnswer::Choice { index, .. }, Submission::Choice(got)) => index == got,
        _ => false,
    }
}

/// Outcome of grading one submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Verdict {
    /// Every answer was accepted.
    pub correct: bool,
    /// Acceptance of each answer, in problem order.
    pub per_answer: Vec<bool>,
    /// Message shown to the learner.
    pub feedback: String,
}

/// Grade parsed submissions against a problem. A problem with several
/// answers is correct only when all of them are.
pub fn grade(
    problem: &Problem,
    submissions: &[Submission],
    tolerance: &Tolerance,
) -> Result<Verdict, DrillError> {
    if submissions.len() != problem.answers.len() {
        return Err(DrillError::AnswerCountMismatch {
            expected: problem.answers.len(),
            got: submissions.len(),
        });
    }
    let per_answer: Vec<bool> = problem
        .answers
        .iter()
        .zip(submissions)
        .map(|(expected, got)| check_answer(expected, got, tolerance))
        .collect();
    let correct = per_answer.iter().all(|ok| *ok);
    let feedback = if correct {
        "Correct!".to_string()
    } else {
        format!(
            "Incorrect. The correct answer is {}.",
            answer_key(&problem.answers)
        )
    };
    Ok(Verdict {
        correct,
        per_answer,
        feedback,
    })
}

/// Parse and grade raw input in one step.
pub fn grade_input(problem: &Problem, raw: &[&str], tolerance: &Tolerance) -> Result<Verdict, DrillError> {
    let submissions = parse_submissions(problem, raw)?;
    grade(problem, &submissions, tolerance)
}

/// All expected answers joined with "and", e.g. "12.00 m/s and 30.00 degrees".
pub fn answer_key(answers: &[ExpectedAnswer]) -> String {
    answers
        .iter()
        .map(ExpectedAnswer::display_value)
        .collect::<Vec<_>>()
        .join(" and ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Difficulty, Topic};

    fn two_answer_problem() -> Problem {
        Problem::new(
            Topic::Projectile,
            "angled",
            Difficulty::Easy,
            "How far and how high?",
            vec![
                ExpectedAnswer::numeric(120.0, "meters"),
                ExpectedAnswer::numeric(45.0, "meters"),
            ],
        )
    }

    fn choice() -> ExpectedAnswer {
        ExpectedAnswer::Choice {
            label: "Direction".into(),
            options: vec!["Forward".into(), "Backward".into()],
            index: 1,
        }
    }

    #[test]
    fn tolerance_window() {
        let t = Tolerance::default();
        assert!(t.accepts(100.0, 105.0));
        assert!(t.accepts(100.0, 95.0));
        assert!(!t.accepts(100.0, 105.5));
        assert!(t.accepts(-20.0, -19.2));
        assert!(!t.accepts(-20.0, 20.0));
    }

    #[test]
    fn zero_expected_uses_absolute_floor() {
        let t = Tolerance::default();
        assert!(t.accepts(0.0, 0.0));
        assert!(t.accepts(0.0, 0.005));
        assert!(!t.accepts(0.0, 0.5));
    }

    #[test]
    fn numbers_parse_with_trailing_units() {
        let expected = ExpectedAnswer::numeric(12.5, "m/s");
        assert_eq!(
            Submission::parse(" 12.5 m/s ", &expected).unwrap(),
            Submission::Number(12.5)
        );
        assert_eq!(
            Submission::parse("twelve", &expected),
            Err(DrillError::InvalidNumber("twelve".into()))
        );
        assert!(Submission::parse("NaN", &expected).is_err());
        assert_eq!(
            Submission::parse("   ", &expected),
            Err(DrillError::MissingAnswer)
        );
    }

    #[test]
    fn choices_accept_number_letter_or_text() {
        let expected = choice();
        assert_eq!(Submission::parse("2", &expected).unwrap(), Submission::Choice(1));
        assert_eq!(Submission::parse("b", &expected).unwrap(), Submission::Choice(1));
        assert_eq!(Submission::parse("A)", &expected).unwrap(), Submission::Choice(0));
        assert_eq!(
            Submission::parse("backward", &expected).unwrap(),
            Submission::Choice(1)
        );
        assert!(matches!(
            Submission::parse("3", &expected),
            Err(DrillError::InvalidChoice { options: 2, .. })
        ));
        assert!(Submission::parse("z", &expected).is_err());
    }

    #[test]
    fn text_comparison_ignores_case_spaces_and_hyphens() {
        let expected = ExpectedAnswer::Text {
            value: "Carbon monoxide".into(),
            label: "Name".into(),
        };
        for input in ["carbon monoxide", "CarbonMonoxide", "carbon-monoxide"] {
            let sub = Submission::parse(input, &expected).unwrap();
            assert!(check_answer(&expected, &sub, &Tolerance::default()), "{input}");
        }
        let wrong = Submission::parse("carbon dioxide", &expected).unwrap();
        assert!(!check_answer(&expected, &wrong, &Tolerance::default()));
    }

    #[test]
    fn all_answers_must_be_correct() {
        let problem = two_answer_problem();
        let t = Tolerance::default();

        let verdict = grade_input(&problem, &["120", "45"], &t).unwrap();
        assert!(verdict.correct);
        assert_eq!(verdict.feedback, "Correct!");

        let verdict = grade_input(&problem, &["120", "60"], &t).unwrap();
        assert!(!verdict.correct);
        assert_eq!(verdict.per_answer, vec![true, false]);
        assert_eq!(
            verdict.feedback,
            "Incorrect. The correct answer is 120.00 meters and 45.00 meters."
        );
    }

    #[test]
    fn input_errors() {
        let problem = two_answer_problem();
        let t = Tolerance::default();
        assert_eq!(
            grade_input(&problem, &["", ""], &t),
            Err(DrillError::MissingAnswer)
        );
        assert_eq!(
            grade_input(&problem, &["120"], &t),
            Err(DrillError::AnswerCountMismatch {
                expected: 2,
                got: 1
            })
        );
        assert_eq!(
            grade_input(&problem, &["120", ""], &t),
            Err(DrillError::MissingAnswer)
        );
    }

    #[test]
    fn split_answers_trims_fields() {
        assert_eq!(split_answers("12, 30 ;4"), vec!["12", "30", "4"]);
        assert_eq!(split_answers("iron(iii) oxide"), vec!["iron(iii) oxide"]);
    }

    #[test]
    fn digit_group_commas_stay_in_one_number() {
        assert_eq!(split_answers("1,250"), vec!["1,250"]);
        assert_eq!(split_answers("1,250, 36.87"), vec!["1,250", "36.87"]);
        assert_eq!(split_answers("2,500,000;4"), vec!["2,500,000", "4"]);
        assert_eq!(split_answers("12,30"), vec!["12", "30"]);
        assert_eq!(split_answers("3,4567"), vec!["3", "4567"]);

        let expected = ExpectedAnswer::numeric(1250.0, "meters");
        assert_eq!(
            Submission::parse("1,250 m", &expected),
            Ok(Submission::Number(1250.0))
        );
        assert_eq!(
            Submission::parse("2,500,000", &expected),
            Ok(Submission::Number(2_500_000.0))
        );
        assert!(Submission::parse("1,25", &expected).is_err());
    }
}
