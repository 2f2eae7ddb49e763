//! The `physdrill generate` command.

use std::path::PathBuf;

use anyhow::Result;

use physdrill_core::catalog::Catalog;
use physdrill_core::config::load_config_from;
use physdrill_core::model::{Difficulty, Topic};
use physdrill_core::responses::ResponseSheet;
use physdrill_core::worksheet::{Worksheet, WorksheetSpec};
use physdrill_report::html::write_html_worksheet;
use physdrill_report::markdown::write_markdown_worksheet;

#[allow(clippy::too_many_arguments)]
pub fn execute(
    topic: Option<Topic>,
    kind: Option<String>,
    difficulty: Option<Difficulty>,
    count: usize,
    seed: Option<u64>,
    format: String,
    output: Option<PathBuf>,
    answers: bool,
    config_path: Option<PathBuf>,
) -> Result<()> {
    anyhow::ensure!(count >= 1, "count must be at least 1");

    let config = load_config_from(config_path.as_deref())?;
    let catalog = Catalog::from_config(&config);

    let spec = WorksheetSpec {
        topic: topic.unwrap_or(config.default_topic),
        kind,
        difficulty: difficulty.unwrap_or(config.default_difficulty),
        count,
    };
    let worksheet = Worksheet::generate(&catalog, &spec, seed.or(config.seed))?;

    let output = output.unwrap_or(config.output_dir);
    std::fs::create_dir_all(&output)?;
    let timestamp = chrono::Utc::now().format("%Y-%m-%dT%H%M%S");
    let stem = format!("worksheet-{}-{timestamp}", spec.topic);

    let formats: Vec<&str> = if format == "all" {
        vec!["json", "markdown", "html"]
    } else {
        format.split(',').map(str::trim).collect()
    };

    for fmt in &formats {
        match *fmt {
            "json" => {
                let path = output.join(format!("{stem}.json"));
                worksheet.save_json(&path)?;
                eprintln!("Worksheet saved to: {}", path.display());
            }
            "markdown" | "md" => {
                let path = output.join(format!("{stem}.md"));
                write_markdown_worksheet(&worksheet, &path, false)?;
                eprintln!("Markdown worksheet: {}", path.display());
                if answers {
                    let path = output.join(format!("{stem}-key.md"));
                    write_markdown_worksheet(&worksheet, &path, true)?;
                    eprintln!("Markdown answer key: {}", path.display());
                }
            }
            "html" => {
                let path = output.join(format!("{stem}.html"));
                write_html_worksheet(&worksheet, &path, false)?;
                eprintln!("HTML worksheet: {}", path.display());
                if answers {
                    let path = output.join(format!("{stem}-key.html"));
                    write_html_worksheet(&worksheet, &path, true)?;
                    eprintln!("HTML answer key: {}", path.display());
                }
            }
            _ => {
                eprintln!("Unknown format: {fmt}");
            }
        }
    }

    let sheet_path = output.join(format!("{stem}-responses.toml"));
    ResponseSheet::blank_for(&worksheet).save(&sheet_path)?;
    eprintln!("Answer sheet: {}", sheet_path.display());

    println!(
        "Generated {} problem(s): {}",
        worksheet.problems.len(),
        worksheet.title
    );

    Ok(())
}
