//! The `physdrill init` command.

use anyhow::{Context, Result};

use physdrill_core::config::STARTER_CONFIG;

pub fn execute() -> Result<()> {
    let path = std::path::Path::new("physdrill.toml");
    if path.exists() {
        println!("physdrill.toml already exists, skipping.");
    } else {
        std::fs::write(path, STARTER_CONFIG).context("failed to write physdrill.toml")?;
        println!("Created physdrill.toml");
    }

    println!("\nNext steps:");
    println!("  1. Edit physdrill.toml to pick your default topic and difficulty");
    println!("  2. Run: physdrill practice");
    println!("  3. Run: physdrill generate --count 10 --format all");

    Ok(())
}
