//! TOML answer sheets for worksheets.
//!
//! ```toml
//! worksheet = "0b5c3f0e-..."   # optional
//!
//! [[responses]]
//! number = 1
//! answers = ["12", "30"]
//! ```

use std::collections::HashSet;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::worksheet::Worksheet;

/// A learner's answers to a worksheet.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResponseSheet {
    /// Id of the worksheet these answers belong to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub worksheet: Option<Uuid>,
    #[serde(default)]
    pub responses: Vec<Response>,
}

/// Answers to one numbered problem.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Response {
    /// 1-based problem number.
    pub number: usize,
    #[serde(default)]
    pub answers: Vec<String>,
}

impl ResponseSheet {
    /// A blank sheet with one empty entry per problem.
    pub fn blank_for(worksheet: &Worksheet) -> Self {
        Self {
            worksheet: Some(worksheet.id),
            responses: (1..=worksheet.problems.len())
                .map(|number| Response {
                    number,
                    answers: Vec::new(),
                })
                .collect(),
        }
    }

    /// The first response for problem `number`.
    pub fn get(&self, number: usize) -> Option<&Response> {
        self.responses.iter().find(|r| r.number == number)
    }

    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("failed to serialize responses")
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let content = self.to_toml()?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, content)
            .with_context(|| format!("failed to write responses to {}", path.display()))
    }
}

/// Parse a response sheet file.
pub fn parse_responses(path: &Path) -> Result<ResponseSheet> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read responses file: {}", path.display()))?;

    parse_responses_str(&content, path)
}

/// Parse a response sheet from a TOML string (useful for testing).
pub fn parse_responses_str(content: &str, source_path: &Path) -> Result<ResponseSheet> {
    toml::from_str(content)
        .with_context(|| format!("failed to parse TOML: {}", source_path.display()))
}

/// A warning from response sheet validation.
#[derive(Debug, Clone)]
pub struct ValidationWarning {
    /// The problem number (if applicable).
    pub number: Option<usize>,
    /// Warning message.
    pub message: String,
}

/// Check a response sheet against the worksheet it answers.
pub fn validate_responses(sheet: &ResponseSheet, worksheet: &Worksheet) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();

    if let Some(id) = sheet.worksheet {
        if id != worksheet.id {
            warnings.push(ValidationWarning {
                number: None,
                message: format!("responses are for worksheet {id}, not {}", worksheet.id),
            });
        }
    }

    let mut seen = HashSet::new();
    for response in &sheet.responses {
        if !seen.insert(response.number) {
            warnings.push(ValidationWarning {
                number: Some(response.number),
                message: format!(
                    "duplicate response for problem {}; only the first is graded",
                    response.number
                ),
            });
        }

        match worksheet.problem(response.number) {
            None => warnings.push(ValidationWarning {
                number: Some(response.number),
                message: format!(
                    "worksheet has no problem {} (it has {})",
                    response.number,
                    worksheet.problems.len()
                ),
            }),
            Some(problem) if problem.answers.len() != response.answers.len() => {
                warnings.push(ValidationWarning {
                    number: Some(response.number),
                    message: format!(
                        "problem {} expects {} answer(s), got {}",
                        response.number,
                        problem.answers.len(),
                        response.answers.len()
                    ),
                })
            }
            Some(_) => {}
        }
    }

    for number in 1..=worksheet.problems.len() {
        if !seen.contains(&number) {
            warnings.push(ValidationWarning {
                number: Some(number),
                message: format!("no response for problem {number}"),
            });
        }
    }

    warnings
}
