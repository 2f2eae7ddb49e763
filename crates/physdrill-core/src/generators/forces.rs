//! Newton's second law, F = ma.

use rand::{Rng, RngCore};

use super::numeric_problem;
use super::words::random_noun;
use crate::error::DrillError;
use crate::model::{Difficulty, Problem, Topic};
use crate::traits::ProblemGenerator;

const KINDS: &[&str] = &["force", "acceleration"];

const DIFFICULTIES: &[Difficulty] = &[Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

#[derive(Debug, Default, Clone, Copy)]
pub struct Forces;

impl ProblemGenerator for Forces {
    fn topic(&self) -> Topic {
        Topic::Forces
    }

    fn kinds(&self) -> &'static [&'static str] {
        KINDS
    }

    fn difficulties(&self) -> &'static [Difficulty] {
        DIFFICULTIES
    }

    fn generate(
        &self,
        kind: &str,
        difficulty: Difficulty,
        rng: &mut dyn RngCore,
    ) -> Result<Problem, DrillError> {
        self.ensure_supported(kind, difficulty)?;
        let range = difficulty.range();
        let noun = random_noun(rng);

        let (question, answer) = if kind == "force" {
            let mass = rng.gen_range(1..=range);
            let accel = rng.gen_range(1..=range);
            (
                format!(
                    "If a {mass} kg {noun} is accelerated at {accel} m/s², what is the net \
                     force applied?"
                ),
                (mass * accel) as f64,
            )
        } else {
            let force = rng.gen_range(10..=10 * range);
            let mass = rng.gen_range(1..=range);
            (
                format!(
                    "If a net force of {force} N is applied to a {mass} kg {noun}, what is its \
                     acceleration?"
                ),
                force as f64 / mass as f64,
            )
        };
        let unit = if kind == "force" { "Newtons" } else { "m/s²" };
        Ok(
            numeric_problem(Topic::Forces, kind, difficulty, question, vec![(answer, unit)])
                .with_solution("F = ma"),
        )
    }
}
