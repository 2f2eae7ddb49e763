//! Practice configuration.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::grading::Tolerance;
use crate::model::{Difficulty, Topic};

/// Top-level physdrill configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PracticeConfig {
    /// Topic used when none is given on the command line.
    #[serde(default = "default_topic")]
    pub default_topic: Topic,
    /// Difficulty used when none is given on the command line.
    #[serde(default = "default_difficulty")]
    pub default_difficulty: Difficulty,
    /// Accepted relative error for numeric answers (0.05 = ±5%).
    #[serde(default = "default_relative_tolerance")]
    pub relative_tolerance: f64,
    /// Accepted absolute error, so an expected value of zero is answerable.
    #[serde(default = "default_absolute_tolerance")]
    pub absolute_tolerance: f64,
    /// Fixed RNG seed; `None` draws from entropy.
    #[serde(default)]
    pub seed: Option<u64>,
    /// Offer polyatomic compounds in mixed naming below Hard.
    #[serde(default)]
    pub include_polyatomic: bool,
    /// Where `generate` writes worksheets.
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
}

fn default_topic() -> Topic {
    Topic::LinearMotion
}
fn default_difficulty() -> Difficulty {
    Difficulty::Easy
}
fn default_relative_tolerance() -> f64 {
    0.05
}
fn default_absolute_tolerance() -> f64 {
    0.01
}
fn default_output_dir() -> PathBuf {
    PathBuf::from("./worksheets")
}

impl Default for PracticeConfig {
    fn default() -> Self {
        Self {
            default_topic: default_topic(),
            default_difficulty: default_difficulty(),
            relative_tolerance: default_relative_tolerance(),
            absolute_tolerance: default_absolute_tolerance(),
            seed: None,
            include_polyatomic: false,
            output_dir: default_output_dir(),
        }
    }
}

impl PracticeConfig {
    /// The answer tolerance this configuration grades with.
    pub fn tolerance(&self) -> Tolerance {
        Tolerance::new(self.relative_tolerance, self.absolute_tolerance)
    }

    /// Apply `PHYSDRILL_SEED` and `PHYSDRILL_TOLERANCE` from `lookup`.
    ///
    /// Unparseable values are logged and ignored.
    pub fn apply_env_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(raw) = lookup("PHYSDRILL_SEED") {
            match raw.trim().parse::<u64>() {
                Ok(seed) => self.seed = Some(seed),
                Err(_) => tracing::warn!("ignoring PHYSDRILL_SEED={raw}: not an unsigned integer"),
            }
        }
        if let Some(raw) = lookup("PHYSDRILL_TOLERANCE") {
            match raw.trim().parse::<f64>() {
                Ok(t) if t.is_finite() && t >= 0.0 => self.relative_tolerance = t,
                _ => tracing::warn!("ignoring PHYSDRILL_TOLERANCE={raw}: not a non-negative number"),
            }
        }
    }
}

/// Starter configuration written by `physdrill init`.
pub const STARTER_CONFIG: &str = r#"# physdrill configuration

# Topic and difficulty used when the command line names none.
default_topic = "linear-motion"
default_difficulty = "easy"

# Numeric answers are accepted within max(relative * |expected|, absolute).
relative_tolerance = 0.05
absolute_tolerance = 0.01

# Uncomment to make every session reproducible.
# seed = 42

# Offer polyatomic ions in mixed compound naming below Hard.
include_polyatomic = false

output_dir = "./worksheets"
"#;

/// Load configuration from well-known paths.
///
/// Search order:
/// 1. `physdrill.toml` in the current directory
/// 2. `~/.config/physdrill/config.toml`
///
/// Environment variable overrides: `PHYSDRILL_SEED`, `PHYSDRILL_TOLERANCE`.
pub fn load_config() -> Result<PracticeConfig> {
    load_config_from(None)
}

/// Load config from an explicit path, or search the default locations.
pub fn load_config_from(path: Option<&Path>) -> Result<PracticeConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("physdrill.toml");
        if local.exists() {
            Some(local)
        } else if let Some(home) = dirs_path() {
            let global = home.join("config.toml");
            if global.exists() {
                Some(global)
            } else {
                None
            }
        } else {
            None
        }
    };

    let mut config = match config_path {
        Some(path) => {
            tracing::debug!("loading config from {}", path.display());
            parse_config_file(&path)?
        }
        None => PracticeConfig::default(),
    };

    config.apply_env_overrides(|key| std::env::var(key).ok());
    Ok(config)
}

fn parse_config_file(path: &Path) -> Result<PracticeConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config: {}", path.display()))?;
    toml::from_str::<PracticeConfig>(&content)
        .with_context(|| format!("failed to parse config: {}", path.display()))
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("physdrill"))
}
