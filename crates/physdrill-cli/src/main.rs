//! physdrill CLI: randomized physics and chemistry practice problems.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

use physdrill_core::model::{Difficulty, Topic};

mod commands;

#[derive(Parser)]
#[command(
    name = "physdrill",
    version,
    about = "Randomized physics and chemistry practice problems"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Practice interactively in the terminal
    Practice {
        /// Topic (e.g. linear-motion, projectile, compounds)
        #[arg(long)]
        topic: Option<Topic>,

        /// Problem kind within the topic (default: the topic's first kind)
        #[arg(long)]
        kind: Option<String>,

        /// Difficulty: easy, medium, hard, extra-hard
        #[arg(long)]
        difficulty: Option<Difficulty>,

        /// RNG seed for a reproducible session
        #[arg(long)]
        seed: Option<u64>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Generate a worksheet
    Generate {
        /// Topic (e.g. linear-motion, projectile, compounds)
        #[arg(long)]
        topic: Option<Topic>,

        /// Problem kind within the topic (default: the topic's first kind)
        #[arg(long)]
        kind: Option<String>,

        /// Difficulty: easy, medium, hard, extra-hard
        #[arg(long)]
        difficulty: Option<Difficulty>,

        /// Number of problems
        #[arg(long, default_value = "10")]
        count: usize,

        /// RNG seed for a reproducible worksheet
        #[arg(long)]
        seed: Option<u64>,

        /// Output format: json, markdown, html, all
        #[arg(long, default_value = "json")]
        format: String,

        /// Output directory (default: output_dir from config)
        #[arg(long)]
        output: Option<PathBuf>,

        /// Also write answer keys
        #[arg(long)]
        answers: bool,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Grade an answer sheet against a worksheet
    Check {
        /// Worksheet JSON written by `generate`
        #[arg(long)]
        worksheet: PathBuf,

        /// Answer sheet TOML
        #[arg(long)]
        responses: PathBuf,

        /// Exit code 1 if the score is below this percentage
        #[arg(long)]
        fail_under: Option<f64>,

        /// Output format: text, markdown, json
        #[arg(long, default_value = "text")]
        format: String,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Build a compound's formula and name from chosen elements or ions
    Explore {
        /// Cation: a metal symbol or name, or ammonium
        #[arg(long, visible_alias = "metal")]
        cation: Option<String>,

        /// Charge of a metal that forms more than one ion (e.g. 3 for iron(III))
        #[arg(long)]
        charge: Option<i64>,

        /// Anion: a nonmetal symbol or name, or a polyatomic ion (e.g. O, chloride, sulfate)
        #[arg(long)]
        anion: Option<String>,

        /// First nonmetal of a molecular compound with its count (e.g. N2)
        #[arg(long)]
        first: Option<String>,

        /// Second nonmetal of a molecular compound with its count (e.g. O4)
        #[arg(long)]
        second: Option<String>,
    },

    /// List topics, problem kinds and difficulties
    Topics {
        /// Show one topic in detail
        #[arg(long)]
        topic: Option<Topic>,
    },

    /// Create a starter physdrill.toml
    Init,
}

fn main() {
    let mut filter = tracing_subscriber::EnvFilter::from_default_env();
    if let Ok(directive) = "physdrill_core=info".parse() {
        filter = filter.add_directive(directive);
    }
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Practice {
            topic,
            kind,
            difficulty,
            seed,
            config,
        } => commands::practice::execute(topic, kind, difficulty, seed, config),
        Commands::Generate {
            topic,
            kind,
            difficulty,
            count,
            seed,
            format,
            output,
            answers,
            config,
        } => commands::generate::execute(
            topic, kind, difficulty, count, seed, format, output, answers, config,
        ),
        Commands::Check {
            worksheet,
            responses,
            fail_under,
            format,
            config,
        } => commands::check::execute(worksheet, responses, fail_under, format, config),
        Commands::Explore {
            cation,
            charge,
            anion,
            first,
            second,
        } => commands::explore::execute(cation, charge, anion, first, second),
        Commands::Topics { topic } => commands::topics::execute(topic),
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
