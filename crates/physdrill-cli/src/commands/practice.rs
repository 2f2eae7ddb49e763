//! The `physdrill practice` command.

use std::io::{BufRead, Write};
use std::path::PathBuf;

use anyhow::Result;

use physdrill_core::catalog::Catalog;
use physdrill_core::config::load_config_from;
use physdrill_core::grading::split_answers;
use physdrill_core::model::{choice_letter, Difficulty, ExpectedAnswer, Problem, Topic};
use physdrill_core::session::PracticeSession;

use super::performance_table;

const CHART_WIDTH: usize = 40;
const CHART_HEIGHT: usize = 10;

const HELP: &str = "\
Type your answer and press enter. Separate several answers with ; or a
comma (1,250 is one number).
  n            new question
  d <level>    change difficulty (easy, medium, hard, extra-hard)
  k <kind>     change problem kind
  t <topic>    change topic
  s            show performance
  r            reset performance
  h            this help
  q            quit";

pub fn execute(
    topic: Option<Topic>,
    kind: Option<String>,
    difficulty: Option<Difficulty>,
    seed: Option<u64>,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;
    let session = PracticeSession::new(
        Catalog::from_config(&config),
        topic.unwrap_or(config.default_topic),
        kind.as_deref(),
        difficulty.unwrap_or(config.default_difficulty),
        config.tolerance(),
        seed.or(config.seed),
    )?;

    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    run(session, stdin.lock(), stdout.lock())
}

/// Drive a session from line-oriented input until `q` or end of input.
fn run(mut session: PracticeSession, input: impl BufRead, mut out: impl Write) -> Result<()> {
    writeln!(out, "{HELP}\n")?;
    print_problem(&session, &mut out)?;

    for line in input.lines() {
        let line = line?;
        let line = line.trim();
        let (command, arg) = match line.split_once(' ') {
            Some((c, a)) => (c, a.trim()),
            None => (line, ""),
        };

        match (command, arg) {
            ("", _) => {
                writeln!(out, "Please enter an answer before submitting.")?;
            }
            ("q" | "quit", "") => break,
            ("h" | "help", "") => writeln!(out, "{HELP}")?,
            ("n" | "next", "") => {
                session.next_problem()?;
                print_problem(&session, &mut out)?;
                continue;
            }
            ("s" | "stats", "") => print_stats(&session, &mut out)?,
            ("r" | "reset", "") => {
                session.reset_performance();
                writeln!(out, "Performance reset.")?;
            }
            ("d", level) if !level.is_empty() => match level.parse::<Difficulty>() {
                Ok(difficulty) => {
                    let selection = session.selection().clone();
                    reselect(
                        &mut session,
                        selection.topic,
                        Some(selection.kind.as_str()),
                        difficulty,
                        &mut out,
                    )?;
                    continue;
                }
                Err(e) => writeln!(out, "{e}")?,
            },
            ("k", kind) if !kind.is_empty() => {
                let selection = session.selection().clone();
                reselect(
                    &mut session,
                    selection.topic,
                    Some(kind),
                    selection.difficulty,
                    &mut out,
                )?;
                continue;
            }
            ("t", topic) if !topic.is_empty() => match topic.parse::<Topic>() {
                Ok(topic) => {
                    let difficulty = session.selection().difficulty;
                    reselect(&mut session, topic, None, difficulty, &mut out)?;
                    continue;
                }
                Err(e) => writeln!(out, "{e}")?,
            },
            _ => {
                let fields = split_answers(line);
                match session.submit(&fields) {
                    Ok(verdict) => {
                        writeln!(out, "{}", verdict.feedback)?;
                        if verdict.correct {
                            if let Some(solution) = &session.problem().solution {
                                writeln!(out, "Solution: {solution}")?;
                            }
                        }
                        writeln!(out, "(n for a new question)")?;
                    }
                    Err(e) if e.is_input_error() => writeln!(out, "{e}")?,
                    Err(e) => return Err(e.into()),
                }
            }
        }
        write!(out, "> ")?;
        out.flush()?;
    }

    writeln!(out)?;
    print_stats(&session, &mut out)?;
    Ok(())
}

/// Switch selection; a rejected selection keeps the current problem.
fn reselect(
    session: &mut PracticeSession,
    topic: Topic,
    kind: Option<&str>,
    difficulty: Difficulty,
    out: &mut impl Write,
) -> Result<()> {
    match session.select(topic, kind, difficulty) {
        Ok(_) => print_problem(session, out),
        Err(e) => {
            writeln!(out, "{e}")?;
            write!(out, "> ")?;
            out.flush()?;
            Ok(())
        }
    }
}

fn print_problem(session: &PracticeSession, out: &mut impl Write) -> Result<()> {
    let problem = session.problem();
    let selection = session.selection();
    writeln!(
        out,
        "Question {} [{} / {} / {}]",
        session.question_id(),
        selection.topic,
        selection.kind,
        selection.difficulty
    )?;
    writeln!(out, "{}", problem.question)?;
    if let Some(latex) = &problem.latex {
        writeln!(out, "  {latex}")?;
    }
    for chart in &problem.charts {
        writeln!(out, "\n{}", chart.render_ascii(CHART_WIDTH, CHART_HEIGHT))?;
    }
    print_prompts(problem, out)?;
    write!(out, "> ")?;
    out.flush()?;
    Ok(())
}

fn print_prompts(problem: &Problem, out: &mut impl Write) -> Result<()> {
    let count = problem.answers.len();
    for (i, answer) in problem.answers.iter().enumerate() {
        let position = if count > 1 {
            format!("Answer {}: ", i + 1)
        } else {
            String::new()
        };
        match answer {
            ExpectedAnswer::Choice { label, options, .. } => {
                writeln!(out, "{position}{label}")?;
                for (j, option) in options.iter().enumerate() {
                    writeln!(out, "  {}) {option}", choice_letter(j))?;
                }
            }
            other => writeln!(out, "{position}({})", other.label())?,
        }
    }
    Ok(())
}

fn print_stats(session: &PracticeSession, out: &mut impl Write) -> Result<()> {
    let performance = session.performance();
    if performance.is_empty() {
        writeln!(out, "No answers submitted yet.")?;
        return Ok(());
    }
    let topic = session.selection().topic;
    let generator = session.catalog().get(topic)?;
    let difficulties = generator.difficulties();
    let table = performance_table(
        performance.pivot(topic, generator.kinds(), difficulties),
        difficulties,
    );
    writeln!(out, "{table}")?;
    writeln!(out, "Overall: {}", performance.total().display())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use physdrill_core::grading::Tolerance;

    fn session(topic: Topic, kind: &str) -> PracticeSession {
        PracticeSession::new(
            Catalog::default(),
            topic,
            Some(kind),
            Difficulty::Easy,
            Tolerance::default(),
            Some(5),
        )
        .unwrap()
    }

    fn drive(session: PracticeSession, input: &str) -> String {
        let mut out = Vec::new();
        run(session, input.as_bytes(), &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn wrong_answer_then_stats() {
        let output = drive(session(Topic::Forces, "force"), "-1\ns\nq\n");
        assert!(output.contains("Question 1 [forces / force / easy]"));
        assert!(output.contains("(Newtons)"));
        assert!(output.contains("Incorrect. The correct answer is"));
        assert!(output.contains("0/1 (0.0%)"));
    }

    #[test]
    fn input_errors_are_reported_not_fatal() {
        let output = drive(session(Topic::Forces, "acceleration"), "abc\n\nq\n");
        assert!(output.contains("not a number: abc"));
        assert!(output.contains("Please enter an answer"));
        assert!(output.contains("No answers submitted yet."));
    }

    #[test]
    fn commands_change_the_question() {
        let output = drive(
            session(Topic::Energy, "work"),
            "n\nd medium\nk kinetic\nt compounds\nd impossible\nq\n",
        );
        assert!(output.contains("Question 2 [energy / work / easy]"));
        assert!(output.contains("Question 3 [energy / work / medium]"));
        assert!(output.contains("Question 4 [energy / kinetic / medium]"));
        assert!(output.contains("Question 5 [compounds / ionic / medium]"));
        assert!(output.contains("unknown difficulty: impossible"));
    }

    #[test]
    fn unsupported_selection_keeps_the_question() {
        let output = drive(session(Topic::Collision, "elastic"), "d hard\nq\n");
        assert!(output.contains("collision has no hard problems"));
        assert!(!output.contains("Question 2"));
    }

    #[test]
    fn choice_problems_list_options() {
        let output = drive(session(Topic::MotionGraphs, "velocity-time"), "q\n");
        assert!(output.contains("Answer 1: Direction"));
        assert!(output.contains("  B) Backward"));
        assert!(output.contains("Velocity-Time Graph"));
    }
}
