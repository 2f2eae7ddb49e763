//! Worksheets: batches of generated problems with JSON persistence and
//! answer-sheet grading.

use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::catalog::Catalog;
use crate::error::DrillError;
use crate::grading::{grade_input, Tolerance, Verdict};
use crate::model::{Difficulty, Problem, Topic};
use crate::performance::Performance;
use crate::responses::ResponseSheet;

/// What to put on a worksheet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorksheetSpec {
    pub topic: Topic,
    /// `None` uses the topic's first kind.
    pub kind: Option<String>,
    pub difficulty: Difficulty,
    pub count: usize,
}

/// A serialized batch of generated problems.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Worksheet {
    /// Unique worksheet identifier.
    pub id: Uuid,
    /// When the worksheet was generated.
    pub created_at: DateTime<Utc>,
    pub title: String,
    /// Seed the problems were drawn with, when one was given.
    #[serde(default)]
    pub seed: Option<u64>,
    pub problems: Vec<Problem>,
}

impl Worksheet {
    pub fn from_problems(title: impl Into<String>, seed: Option<u64>, problems: Vec<Problem>) -> Self {
        Self {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            title: title.into(),
            seed,
            problems,
        }
    }

    /// Draw `spec.count` problems from `catalog`.
    pub fn generate(catalog: &Catalog, spec: &WorksheetSpec, seed: Option<u64>) -> Result<Self, DrillError> {
        let generator = catalog.get(spec.topic)?;
        let kind = spec
            .kind
            .as_deref()
            .unwrap_or_else(|| generator.default_kind());
        generator.ensure_supported(kind, spec.difficulty)?;

        let mut rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let problems = (0..spec.count)
            .map(|_| catalog.generate(spec.topic, Some(kind), spec.difficulty, &mut rng))
            .collect::<Result<Vec<_>, _>>()?;

        tracing::info!(
            topic = %spec.topic,
            kind,
            difficulty = %spec.difficulty,
            count = problems.len(),
            "generated worksheet"
        );
        let title = format!("{}: {kind} ({})", spec.topic.title(), spec.difficulty);
        Ok(Self::from_problems(title, seed, problems))
    }

    /// Problem by 1-based number.
    pub fn problem(&self, number: usize) -> Option<&Problem> {
        number.checked_sub(1).and_then(|i| self.problems.get(i))
    }

    /// Save the worksheet as JSON to a file.
    pub fn save_json(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("failed to serialize worksheet")?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, json)
            .with_context(|| format!("failed to write worksheet to {}", path.display()))?;
        Ok(())
    }

    /// Load a worksheet from a JSON file.
    pub fn load_json(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read worksheet from {}", path.display()))?;
        let worksheet: Worksheet =
            serde_json::from_str(&content).context("failed to parse worksheet JSON")?;
        Ok(worksheet)
    }
}

/// Grading outcome for one worksheet problem.
#[derive(Debug, Clone, PartialEq)]
pub struct GradedResponse {
    /// 1-based problem number.
    pub number: usize,
    pub kind: String,
    pub difficulty: Difficulty,
    /// `None` when the response was missing or could not be parsed.
    pub verdict: Option<Verdict>,
    /// Why there is no verdict.
    pub error: Option<String>,
}

impl GradedResponse {
    pub fn is_correct(&self) -> bool {
        self.verdict.as_ref().is_some_and(|v| v.correct)
    }
}

/// Every problem's outcome plus the resulting tally.
#[derive(Debug, Clone)]
pub struct WorksheetResult {
    pub responses: Vec<GradedResponse>,
    pub performance: Performance,
}

impl WorksheetResult {
    /// Percentage of problems answered correctly.
    pub fn percentage(&self) -> f64 {
        self.performance.total().percentage()
    }
}

/// Grade an answer sheet. Every worksheet problem counts as one attempt;
/// missing or unparseable responses count as incorrect.
pub fn grade_responses(
    worksheet: &Worksheet,
    responses: &ResponseSheet,
    tolerance: &Tolerance,
) -> WorksheetResult {
    let mut performance = Performance::new();
    let graded = worksheet
        .problems
        .iter()
        .enumerate()
        .map(|(i, problem)| {
            let number = i + 1;
            let outcome = match responses.get(number) {
                Some(response) => {
                    let raw: Vec<&str> = response.answers.iter().map(String::as_str).collect();
                    grade_input(problem, &raw, tolerance).map_err(|e| e.to_string())
                }
                None => Err("no response".to_string()),
            };
            let (verdict, error) = match outcome {
                Ok(verdict) => (Some(verdict), None),
                Err(e) => {
                    tracing::debug!(number, "ungraded: {e}");
                    (None, Some(e))
                }
            };
            let graded = GradedResponse {
                number,
                kind: problem.kind.clone(),
                difficulty: problem.difficulty,
                verdict,
                error,
            };
            performance.record(
                problem.topic,
                &problem.kind,
                problem.difficulty,
                graded.is_correct(),
            );
            graded
        })
        .collect();

    WorksheetResult {
        responses: graded,
        performance,
    }
}
