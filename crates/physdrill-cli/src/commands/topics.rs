//! The `physdrill topics` command.

use anyhow::Result;
use comfy_table::Table;

use physdrill_core::catalog::Catalog;
use physdrill_core::model::{Difficulty, Topic};

fn join_difficulties(difficulties: &[Difficulty]) -> String {
    difficulties
        .iter()
        .map(|d| d.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

pub fn execute(topic: Option<Topic>) -> Result<()> {
    let catalog = Catalog::default();

    if let Some(topic) = topic {
        let generator = catalog.get(topic)?;
        println!("{} ({topic})", topic.title());
        println!("\nKinds:");
        for kind in generator.kinds() {
            let marker = if *kind == generator.default_kind() {
                " (default)"
            } else {
                ""
            };
            println!("  {kind}{marker}");
        }
        println!(
            "\nDifficulties: {}",
            join_difficulties(generator.difficulties())
        );
        return Ok(());
    }

    let mut table = Table::new();
    table.set_header(vec!["Topic", "Title", "Kinds", "Difficulties"]);
    for topic in catalog.topics() {
        let generator = catalog.get(topic)?;
        table.add_row(vec![
            topic.to_string(),
            topic.title().to_string(),
            generator.kinds().join(", "),
            join_difficulties(generator.difficulties()),
        ]);
    }
    println!("{table}");

    Ok(())
}
