//! One-dimensional collisions between two objects.
//!
//! Masses and velocities are built from small integer factors so momentum,
//! kinetic energy and impulse all come out whole:
//! `m₂ = m₁gh`, `v₂ = j(1 + gh)`, `v₁ = g·v₂`.

use rand::{Rng, RngCore};

use super::numeric_problem;
use super::words::noun_pair;
use crate::error::DrillError;
use crate::model::{Difficulty, Problem, Topic};
use crate::traits::ProblemGenerator;

const KINDS: &[&str] = &["elastic", "inelastic"];

const DIFFICULTIES: &[Difficulty] = &[Difficulty::Easy, Difficulty::Medium];

const FRAME: &str = "Velocities to the right are positive.";

#[derive(Debug, Default, Clone, Copy)]
pub struct Collision;

impl ProblemGenerator for Collision {
    fn topic(&self) -> Topic {
        Topic::Collision
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
        let (question, answer, solution) = if kind == "elastic" {
            elastic_question(difficulty, rng)
        } else {
            inelastic_question(difficulty, rng)
        };
        Ok(numeric_problem(
            Topic::Collision,
            kind,
            difficulty,
            question,
            vec![(answer as f64, "m/s")],
        )
        .with_solution(solution))
    }
}

/// Every quantity of one collision, before and after.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Collided {
    pub m1: i64,
    pub v1: i64,
    pub m2: i64,
    pub v2: i64,
    /// Velocities after a perfectly elastic collision.
    pub v1_after: i64,
    pub v2_after: i64,
    /// Shared velocity after a perfectly inelastic collision.
    pub v_combined: i64,
    /// Impulse delivered to the first object in the elastic collision.
    pub impulse_1: i64,
    /// Contact time exponent: the collision lasts 10^exp seconds.
    pub time_exp: i32,
}

impl Collided {
    /// Average force on the first object, exact since the contact time is a
    /// power of ten no greater than one.
    pub fn force_1(&self) -> i64 {
        self.impulse_1 * 10_i64.pow(self.time_exp.unsigned_abs())
    }

    pub fn contact_time(&self) -> String {
        match self.time_exp {
            0 => "1".to_string(),
            exp => format!("0.{}1", "0".repeat(exp.unsigned_abs() as usize - 1)),
        }
    }
}

pub(crate) fn collision_numbers(range: i64, rng: &mut dyn RngCore) -> Collided {
    let range = range.max(2);
    let sign = if rng.gen_bool(0.5) { -1 } else { 1 };
    let m1 = rng.gen_range(1..=range);
    let g = sign * rng.gen_range(2..=range);
    let h = sign * rng.gen_range(1..=range);
    let j = sign * rng.gen_range(1..=range);

    let m2 = m1 * g * h;
    let v2 = j * (1 + g * h);
    let impulse_2 = m2 * 2 * j * (g - 1);
    Collided {
        m1,
        v1: g * v2,
        m2,
        v2,
        v1_after: g * j * (2 * h - g * h + 1),
        v2_after: j * (2 * g + g * h - 1),
        v_combined: g * j * (h + 1),
        impulse_1: -impulse_2,
        time_exp: -rng.gen_range(0..=2),
    }
}

fn verb_for(c: &Collided) -> &'static str {
    if c.v2 < 0 {
        "collides head on into"
    } else {
        "rear ends"
    }
}

fn elastic_question(difficulty: Difficulty, rng: &mut dyn RngCore) -> (String, i64, String) {
    let c = collision_numbers(difficulty.base_range() / 2, rng);
    let (first, second) = noun_pair(rng);
    let verb = verb_for(&c);
    let Collided { m1, v1, m2, v2, v1_after, v2_after, .. } = c;

    if difficulty == Difficulty::Easy {
        return (
            format!(
                "{FRAME} A {m1} kg {first} moving at {v1} m/s {verb} a {m2} kg {second} moving \
                 at {v2} m/s. The {first} is moving at {v1_after} m/s after the collision. What \
                 is the velocity of the {second} after the collision?"
            ),
            v2_after,
            "Momentum is conserved: m₁v₁ + m₂v₂ = m₁v₁' + m₂v₂'.".to_string(),
        );
    }

    let force = c.force_1().abs();
    let time = c.contact_time();
    (
        format!(
            "{FRAME} A {m1} kg {first} moving at {v1} m/s {verb} a {m2} kg {second} moving at \
             {v2} m/s. They push on each other with a force of {force} Newtons, and the \
             collision lasts {time} seconds. What is the velocity of the {first} after the \
             collision?"
        ),
        v1_after,
        "The impulse Ft equals the change in momentum of each object.".to_string(),
    )
}

fn inelastic_question(difficulty: Difficulty, rng: &mut dyn RngCore) -> (String, i64, String) {
    let c = collision_numbers(difficulty.base_range(), rng);
    let (first, second) = noun_pair(rng);
    let verb = verb_for(&c);
    let Collided { m1, v1, m2, v2, v_combined, .. } = c;
    let solution = "Momentum is conserved: m₁v₁ + m₂v₂ = (m₁ + m₂)v.".to_string();

    if difficulty == Difficulty::Easy {
        return (
            format!(
                "{FRAME} A {m1} kg {first} moving at {v1} m/s {verb} a {m2} kg {second} moving \
                 at {v2} m/s. They stick together. What is their velocity after the collision?"
            ),
            v_combined,
            solution,
        );
    }

    (
        format!(
            "{FRAME} A {m1} kg {first} moving at {v1} m/s {verb} a {m2} kg {second}. They stick \
             together and move with a combined velocity of {v_combined} m/s. What was the \
             velocity of the {second} before the collision?"
        ),
        v2,
        solution,
    )
}
