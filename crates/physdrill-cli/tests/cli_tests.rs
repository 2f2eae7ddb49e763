//! CLI integration tests using assert_cmd.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// The binary run inside `dir` with no user config or environment overrides.
fn physdrill(dir: &TempDir) -> Command {
    #[allow(deprecated)]
    let mut cmd = Command::cargo_bin("physdrill").unwrap();
    cmd.current_dir(dir.path())
        .env("HOME", dir.path())
        .env_remove("PHYSDRILL_SEED")
        .env_remove("PHYSDRILL_TOLERANCE");
    cmd
}

fn files_with_extension(dir: &std::path::Path, ext: &str) -> Vec<std::path::PathBuf> {
    let mut files: Vec<_> = std::fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().path())
        .filter(|p| p.extension().is_some_and(|e| e == ext))
        .collect();
    files.sort();
    files
}

#[test]
fn help_output() {
    let dir = TempDir::new().unwrap();
    physdrill(&dir)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Randomized physics and chemistry practice problems",
        ));
}

#[test]
fn version_output() {
    let dir = TempDir::new().unwrap();
    physdrill(&dir)
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("physdrill"));
}

#[test]
fn topics_lists_every_topic() {
    let dir = TempDir::new().unwrap();
    physdrill(&dir)
        .arg("topics")
        .assert()
        .success()
        .stdout(predicate::str::contains("linear-motion"))
        .stdout(predicate::str::contains("Compound Naming"))
        .stdout(predicate::str::contains("motion-graphs"));
}

#[test]
fn topics_detail_marks_default_kind() {
    let dir = TempDir::new().unwrap();
    physdrill(&dir)
        .args(["topics", "--topic", "projectiles"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Projectile Motion (projectile)"))
        .stdout(predicate::str::contains("horizontal (default)"))
        .stdout(predicate::str::contains("Difficulties: easy, hard"));
}

#[test]
fn unknown_topic_is_rejected() {
    let dir = TempDir::new().unwrap();
    physdrill(&dir)
        .args(["topics", "--topic", "astrology"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown topic: astrology"));
}

#[test]
fn init_creates_config() {
    let dir = TempDir::new().unwrap();

    physdrill(&dir)
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Created physdrill.toml"));

    let content = std::fs::read_to_string(dir.path().join("physdrill.toml")).unwrap();
    assert!(content.contains("relative_tolerance = 0.05"));
}

#[test]
fn init_skips_existing() {
    let dir = TempDir::new().unwrap();

    physdrill(&dir).arg("init").assert().success();

    physdrill(&dir)
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("already exists"));
}

#[test]
fn generate_writes_all_formats() {
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("out");

    physdrill(&dir)
        .args([
            "generate",
            "--topic",
            "energy",
            "--kind",
            "mixed",
            "--difficulty",
            "hard",
            "--count",
            "4",
            "--seed",
            "3",
            "--format",
            "all",
            "--answers",
            "--output",
        ])
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains("Generated 4 problem(s): Energy: mixed (hard)"));

    assert_eq!(files_with_extension(&out, "json").len(), 1);
    assert_eq!(files_with_extension(&out, "md").len(), 2);
    assert_eq!(files_with_extension(&out, "html").len(), 2);
    assert_eq!(files_with_extension(&out, "toml").len(), 1);
}

#[test]
fn generate_uses_config_defaults() {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join("physdrill.toml"),
        "default_topic = \"compounds\"\ndefault_difficulty = \"medium\"\noutput_dir = \"sheets\"\n",
    )
    .unwrap();

    physdrill(&dir)
        .args(["generate", "--count", "2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Compound Naming: ionic (medium)"));

    assert_eq!(files_with_extension(&dir.path().join("sheets"), "json").len(), 1);
}

#[test]
fn generate_rejects_unsupported_difficulty() {
    let dir = TempDir::new().unwrap();
    physdrill(&dir)
        .args(["generate", "--topic", "collisions", "--difficulty", "hard"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error: collision has no hard problems"));
}

#[test]
fn generate_rejects_missing_config() {
    let dir = TempDir::new().unwrap();
    physdrill(&dir)
        .args(["generate", "--config", "nope.toml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("config file not found"));
}

#[test]
fn check_nonexistent_worksheet() {
    let dir = TempDir::new().unwrap();
    physdrill(&dir)
        .args([
            "check",
            "--worksheet",
            "no_such_file.json",
            "--responses",
            "also_no_file.toml",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to read worksheet"));
}

#[test]
fn practice_reads_answers_from_stdin() {
    let dir = TempDir::new().unwrap();
    physdrill(&dir)
        .args([
            "practice", "--topic", "forces", "--kind", "force", "--seed", "8",
        ])
        .write_stdin("-987654\nr\nq\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Question 1 [forces / force / easy]"))
        .stdout(predicate::str::contains("Incorrect. The correct answer is"))
        .stdout(predicate::str::contains("Performance reset."))
        .stdout(predicate::str::contains("No answers submitted yet."));
}

#[test]
fn practice_ends_cleanly_at_end_of_input() {
    let dir = TempDir::new().unwrap();
    physdrill(&dir)
        .args(["practice", "--topic", "graphs", "--kind", "match"])
        .write_stdin("")
        .assert()
        .success()
        .stdout(predicate::str::contains("Matching graph"));
}

#[test]
fn explore_names_an_ionic_compound() {
    let dir = TempDir::new().unwrap();
    physdrill(&dir)
        .args(["explore", "--metal", "Fe", "--charge", "3", "--anion", "O"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Formula: Fe₂O₃"))
        .stdout(predicate::str::contains("Name:    Iron(III) oxide"))
        .stdout(predicate::str::contains("\\text{Fe}_{2}"));
}

#[test]
fn explore_names_molecular_and_polyatomic_compounds() {
    let dir = TempDir::new().unwrap();
    physdrill(&dir)
        .args(["explore", "--first", "N2", "--second", "O4"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Dinitrogen tetroxide"));
    physdrill(&dir)
        .args(["explore", "--cation", "ammonium", "--anion", "S"])
        .assert()
        .success()
        .stdout(predicate::str::contains("(NH₄)₂S"))
        .stdout(predicate::str::contains("Ammonium sulfide"));
}

#[test]
fn explore_needs_a_charge_for_multivalent_metals() {
    let dir = TempDir::new().unwrap();
    physdrill(&dir)
        .args(["explore", "--metal", "Fe", "--anion", "O"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Iron forms more than one ion"));
    physdrill(&dir)
        .args(["explore", "--metal", "Fe"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("give --cation and --anion"));
}
