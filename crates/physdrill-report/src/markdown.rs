//! Markdown worksheets and graded-results summaries.

use anyhow::{Context, Result};
use std::path::Path;

use physdrill_core::grading::answer_key;
use physdrill_core::model::{choice_letter, ExpectedAnswer, Problem};
use physdrill_core::worksheet::{Worksheet, WorksheetResult};

const CHART_WIDTH: usize = 40;
const CHART_HEIGHT: usize = 10;

/// Format a worksheet as markdown. Graphs are drawn as character plots.
pub fn generate_markdown(worksheet: &Worksheet, include_answers: bool) -> String {
    let mut md = String::new();

    md.push_str(&format!("# {}\n\n", worksheet.title));
    md.push_str(&format!(
        "_{} problems | generated {}",
        worksheet.problems.len(),
        worksheet.created_at.format("%Y-%m-%d %H:%M UTC")
    ));
    if let Some(seed) = worksheet.seed {
        md.push_str(&format!(" | seed {seed}"));
    }
    md.push_str("_\n\n");

    for (i, problem) in worksheet.problems.iter().enumerate() {
        md.push_str(&problem_markdown(i + 1, problem));
    }

    if include_answers {
        md.push_str("## Answer Key\n\n");
        md.push_str("| # | Kind | Difficulty | Answer | Solution |\n");
        md.push_str("|---|------|------------|--------|----------|\n");
        for (i, problem) in worksheet.problems.iter().enumerate() {
            md.push_str(&format!(
                "| {} | {} | {} | {} | {} |\n",
                i + 1,
                problem.kind,
                problem.difficulty,
                cell(&answer_key(&problem.answers)),
                cell(problem.solution.as_deref().unwrap_or("-"))
            ));
        }
    }

    md
}

fn problem_markdown(number: usize, problem: &Problem) -> String {
    let mut md = format!("## Problem {number}\n\n{}\n\n", problem.question);
    if let Some(latex) = &problem.latex {
        md.push_str(&format!("$$\n{latex}\n$$\n\n"));
    }
    for chart in &problem.charts {
        md.push_str("```text\n");
        md.push_str(&chart.render_ascii(CHART_WIDTH, CHART_HEIGHT));
        md.push_str("\n```\n\n");
    }
    for answer in &problem.answers {
        match answer {
            ExpectedAnswer::Choice { label, options, .. } => {
                md.push_str(&format!("**{label}:**\n\n"));
                for (i, option) in options.iter().enumerate() {
                    md.push_str(&format!("- {}) {option}\n", choice_letter(i)));
                }
                md.push('\n');
            }
            other => md.push_str(&format!("- ________ {}\n", other.label())),
        }
    }
    md.push('\n');
    md
}

/// Escape pipes so free text stays inside one table cell.
fn cell(s: &str) -> String {
    s.replace('|', "\\|")
}

/// Format a graded answer sheet as markdown.
pub fn results_markdown(worksheet: &Worksheet, result: &WorksheetResult) -> String {
    let mut md = String::new();
    let total = result.performance.total();

    md.push_str(&format!("# Results: {}\n\n", worksheet.title));
    md.push_str(&format!(
        "**Score:** {}/{} ({:.1}%)\n\n",
        total.correct,
        total.attempts,
        total.percentage()
    ));

    md.push_str("| # | Kind | Difficulty | Result | Feedback |\n");
    md.push_str("|---|------|------------|--------|----------|\n");
    for graded in &result.responses {
        let (status, feedback) = match (&graded.verdict, &graded.error) {
            (Some(v), _) if v.correct => ("correct", v.feedback.clone()),
            (Some(v), _) => ("incorrect", v.feedback.clone()),
            (None, error) => ("ungraded", error.clone().unwrap_or_default()),
        };
        md.push_str(&format!(
            "| {} | {} | {} | {} | {} |\n",
            graded.number,
            graded.kind,
            graded.difficulty,
            status,
            cell(&feedback)
        ));
    }

    md
}

/// Write a markdown worksheet to a file.
pub fn write_markdown_worksheet(worksheet: &Worksheet, path: &Path, include_answers: bool) -> Result<()> {
    let md = generate_markdown(worksheet, include_answers);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, md)
        .with_context(|| format!("failed to write worksheet to {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use physdrill_core::grading::Tolerance;
    use physdrill_core::model::{Chart, Difficulty, Topic};
    use physdrill_core::responses::{Response, ResponseSheet};
    use physdrill_core::worksheet::grade_responses;

    fn make_worksheet() -> Worksheet {
        let algebra = Problem::new(
            Topic::Algebra,
            "rearrange",
            Difficulty::Easy,
            "Select the correct sequence of steps to solve y = ((x · 3) + 2) for x.",
            vec![ExpectedAnswer::Choice {
                label: "Steps".into(),
                options: vec!["Subtract 2 → Divide by 3".into(), "Add 2 → Divide by 3".into()],
                index: 0,
            }],
        )
        .with_latex("y = \\left(\\left(x \\cdot 3\\right) + 2\\right)")
        .with_solution("x = ((y - 2) / 3)");
        let graph = Problem::new(
            Topic::MotionGraphs,
            "position-time",
            Difficulty::Easy,
            "Study the position-time graph below.",
            vec![ExpectedAnswer::Choice {
                label: "Direction".into(),
                options: vec!["Forward".into(), "Backward".into()],
                index: 0,
            }],
        )
        .with_charts(vec![Chart {
            title: "Position-Time Graph".into(),
            x_label: "Time (s)".into(),
            y_label: "Position (m)".into(),
            points: (0..=5).map(|t| (t as f64, t as f64)).collect(),
        }]);
        let energy = Problem::new(
            Topic::Energy,
            "work",
            Difficulty::Easy,
            "How much work is done?",
            vec![ExpectedAnswer::numeric(20.0, "Joules")],
        );
        Worksheet::from_problems("Practice", Some(3), vec![algebra, graph, energy])
    }

    #[test]
    fn markdown_lists_problems_and_options() {
        let md = generate_markdown(&make_worksheet(), false);
        assert!(md.starts_with("# Practice"));
        assert!(md.contains("seed 3"));
        assert!(md.contains("## Problem 3"));
        assert!(md.contains("- A) Subtract 2 → Divide by 3"));
        assert!(md.contains("$$\ny = "));
        assert!(md.contains("```text\nPosition-Time Graph"));
        assert!(md.contains("- ________ Joules"));
        assert!(!md.contains("Answer Key"));
    }

    #[test]
    fn answer_key_table() {
        let md = generate_markdown(&make_worksheet(), true);
        assert!(md.contains("## Answer Key"));
        assert!(md.contains("| 3 | work | easy | 20.00 Joules | - |"));
        assert!(md.contains("x = ((y - 2) / 3)"));
    }

    #[test]
    fn results_summary() {
        let ws = make_worksheet();
        let sheet = ResponseSheet {
            worksheet: Some(ws.id),
            responses: vec![
                Response {
                    number: 1,
                    answers: vec!["a".into()],
                },
                Response {
                    number: 2,
                    answers: vec!["backward".into()],
                },
            ],
        };
        let result = grade_responses(&ws, &sheet, &Tolerance::default());
        let md = results_markdown(&ws, &result);
        assert!(md.contains("**Score:** 1/3 (33.3%)"));
        assert!(md.contains("| 1 | rearrange | easy | correct | Correct! |"));
        assert!(md.contains("| 2 | position-time | easy | incorrect |"));
        assert!(md.contains("| 3 | work | easy | ungraded | no response |"));
    }

    #[test]
    fn markdown_write_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("worksheet.md");
        write_markdown_worksheet(&make_worksheet(), &path, false).unwrap();
        assert!(std::fs::read_to_string(&path).unwrap().contains("## Problem 1"));
    }
}
