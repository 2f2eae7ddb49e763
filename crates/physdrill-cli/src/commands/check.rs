//! The `physdrill check` command.

use std::path::PathBuf;

use anyhow::Result;
use comfy_table::{Cell, Table};

use physdrill_core::config::load_config_from;
use physdrill_core::model::Difficulty;
use physdrill_core::responses::{parse_responses, validate_responses};
use physdrill_core::worksheet::{grade_responses, Worksheet, WorksheetResult};
use physdrill_report::markdown::results_markdown;

use super::performance_table;

pub fn execute(
    worksheet_path: PathBuf,
    responses_path: PathBuf,
    fail_under: Option<f64>,
    format: String,
    config_path: Option<PathBuf>,
) -> Result<()> {
    if let Some(threshold) = fail_under {
        anyhow::ensure!(
            (0.0..=100.0).contains(&threshold),
            "fail-under must be a percentage between 0 and 100"
        );
    }

    let config = load_config_from(config_path.as_deref())?;
    let worksheet = Worksheet::load_json(&worksheet_path)?;
    let sheet = parse_responses(&responses_path)?;

    for w in validate_responses(&sheet, &worksheet) {
        let prefix = w
            .number
            .map(|n| format!("  [#{n}]"))
            .unwrap_or_else(|| "  ".to_string());
        eprintln!("{prefix} WARNING: {}", w.message);
    }

    let result = grade_responses(&worksheet, &sheet, &config.tolerance());

    match format.as_str() {
        "markdown" | "md" => {
            println!("{}", results_markdown(&worksheet, &result));
        }
        "json" => {
            println!("{}", serde_json::to_string_pretty(&results_json(&worksheet, &result))?);
        }
        _ => print_text(&worksheet, &result),
    }

    if let Some(threshold) = fail_under {
        if result.percentage() < threshold {
            eprintln!(
                "Score {:.1}% is below the required {threshold:.1}%",
                result.percentage()
            );
            std::process::exit(1);
        }
    }

    Ok(())
}

fn print_text(worksheet: &Worksheet, result: &WorksheetResult) {
    println!("{}", worksheet.title);

    let mut table = Table::new();
    table.set_header(vec!["#", "Kind", "Difficulty", "Result", "Feedback"]);
    for graded in &result.responses {
        let (status, feedback) = match (&graded.verdict, &graded.error) {
            (Some(v), _) if v.correct => ("OK", v.feedback.clone()),
            (Some(v), _) => ("WRONG", v.feedback.clone()),
            (None, error) => ("-", error.clone().unwrap_or_default()),
        };
        table.add_row(vec![
            Cell::new(graded.number),
            Cell::new(&graded.kind),
            Cell::new(graded.difficulty),
            Cell::new(status),
            Cell::new(feedback),
        ]);
    }
    println!("{table}");

    let mut difficulties: Vec<Difficulty> = result.responses.iter().map(|r| r.difficulty).collect();
    difficulties.sort();
    difficulties.dedup();
    let rows = result.performance.pivot_all(&difficulties);
    println!("{}", performance_table(rows, &difficulties));

    println!("Score: {}", result.performance.total().display());
}

fn results_json(worksheet: &Worksheet, result: &WorksheetResult) -> serde_json::Value {
    let total = result.performance.total();
    serde_json::json!({
        "worksheet": worksheet.id,
        "title": worksheet.title,
        "correct": total.correct,
        "attempts": total.attempts,
        "percentage": total.percentage(),
        "responses": result.responses.iter().map(|r| serde_json::json!({
            "number": r.number,
            "kind": r.kind,
            "difficulty": r.difficulty,
            "verdict": r.verdict,
            "error": r.error,
        })).collect::<Vec<_>>(),
    })
}
