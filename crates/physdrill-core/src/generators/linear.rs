//! One-dimensional kinematics under constant acceleration.
//!
//! Each kind leaves one of the five kinematic quantities out of the
//! problem, so exactly one of the constant-acceleration equations applies:
//!
//! | kind                | equation                |
//! |---------------------|-------------------------|
//! | `no-time`           | v_f² = v_i² + 2ax       |
//! | `no-distance`       | v_f = v_i + at          |
//! | `no-acceleration`   | x = (v_f + v_i)t / 2    |
//! | `no-final-velocity` | x = v_i t + ½at²        |

use rand::{Rng, RngCore};

use super::words::random_noun;
use super::{divisor_pairs, numeric_problem};
use crate::error::DrillError;
use crate::model::{Difficulty, Problem, Topic};
use crate::traits::ProblemGenerator;

const KINDS: &[&str] = &[
    "no-time",
    "no-distance",
    "no-acceleration",
    "no-final-velocity",
    "mixed",
];

const DIFFICULTIES: &[Difficulty] = &[Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

const ACCEL: &str = "m/s²";
const SPEED: &str = "m/s";
const DIST: &str = "meters";
const TIME: &str = "seconds";

/// Attempts at drawing a slowed-but-not-reversed no-final-velocity problem.
const MAX_DRAWS: usize = 256;

/// A question with a single numeric answer.
type Rendered = (String, i64, &'static str);

#[derive(Debug, Default, Clone, Copy)]
pub struct LinearMotion;

impl ProblemGenerator for LinearMotion {
    fn topic(&self) -> Topic {
        Topic::LinearMotion
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
        let (question, answer, unit, equation) = match kind {
            "no-time" => with_eq(no_time_question(difficulty, rng), 0),
            "no-distance" => with_eq(no_distance_question(difficulty, rng), 1),
            "no-acceleration" => with_eq(no_acceleration_question(difficulty, rng), 2),
            "no-final-velocity" => with_eq(no_final_velocity_question(difficulty, rng)?, 3),
            _ => mixed_question(difficulty, rng)?,
        };
        Ok(numeric_problem(
            Topic::LinearMotion,
            kind,
            difficulty,
            question,
            vec![(answer as f64, unit)],
        )
        .with_solution(format!("Use {equation}.")))
    }
}

const EQUATIONS: [&str; 4] = [
    "v_f² = v_i² + 2ax",
    "v_f = v_i + at",
    "x = (v_f + v_i)t / 2",
    "x = v_i t + ½at²",
];

fn with_eq((q, a, u): Rendered, which: usize) -> (String, i64, &'static str, &'static str) {
    (q, a, u, EQUATIONS[which])
}

fn mixed_question(
    difficulty: Difficulty,
    rng: &mut dyn RngCore,
) -> Result<(String, i64, &'static str, &'static str), DrillError> {
    Ok(match rng.gen_range(0..4) {
        0 => with_eq(no_time_question(difficulty, rng), 0),
        1 => with_eq(no_distance_question(difficulty, rng), 1),
        2 => with_eq(no_acceleration_question(difficulty, rng), 2),
        _ => {
            let tier = if difficulty == Difficulty::Hard && rng.gen_bool(0.5) {
                Difficulty::Medium
            } else {
                difficulty
            };
            with_eq(no_final_velocity_question(tier, rng)?, 3)
        }
    })
}

// ---------------------------------------------------------------------------
// Parameter draws
// ---------------------------------------------------------------------------

/// Returns `(v_f, v_i, a, x)` with `v_f > v_i >= 0` and `a, x > 0`.
///
/// `v_i = m² − n²` and `v_f = m² + n²` make `v_f² − v_i² = 4m²n²`, so any
/// divisor pair of `2m²n²` is a valid `(a, x)`.
pub(crate) fn no_time_numbers(difficulty: Difficulty, rng: &mut dyn RngCore) -> (i64, i64, i64, i64) {
    let range = difficulty.range();
    let m = rng.gen_range(3..=range);
    let n = if difficulty == Difficulty::Hard {
        rng.gen_range(1..m)
    } else {
        m
    };
    let v_i = m * m - n * n;
    let v_f = m * m + n * n;
    let pairs = divisor_pairs(2 * m * m * n * n, 2);
    let (a, x) = pairs[rng.gen_range(0..pairs.len())];
    (v_f, v_i, a, x)
}

/// Returns `(v_f, v_i, a, t)`. At Hard the acceleration opposes the initial
/// velocity strongly enough to reverse the object.
pub(crate) fn no_distance_numbers(
    difficulty: Difficulty,
    rng: &mut dyn RngCore,
) -> (i64, i64, i64, i64) {
    let range = difficulty.range();
    let t = rng.gen_range(2..=range);
    let (v_i, a) = match difficulty {
        Difficulty::Easy => (0, rng.gen_range(1..=range)),
        Difficulty::Medium => (rng.gen_range(1..=range), rng.gen_range(1..=range)),
        _ => {
            let v_i = rng.gen_range(1..=range);
            let base = v_i / t;
            (v_i, -rng.gen_range(base + 1..=3 * (base + 2)))
        }
    };
    (v_i + a * t, v_i, a, t)
}

/// Returns `(x, v_f, v_i, t)`. Hard reverses direction without the final
/// velocity being equal and opposite to the initial one.
pub(crate) fn no_acceleration_numbers(
    difficulty: Difficulty,
    rng: &mut dyn RngCore,
) -> (i64, i64, i64, i64) {
    let range = difficulty.range();
    let (v_i, v_f) = match difficulty {
        Difficulty::Easy => (0, rng.gen_range(1..=range)),
        Difficulty::Medium => {
            let v_i = rng.gen_range(1..=range);
            (v_i, rng.gen_range(v_i + 1..=v_i + range))
        }
        _ => {
            let v_i = rng.gen_range(3..=range);
            let v_f = if rng.gen_bool(0.5) {
                -rng.gen_range(1..v_i)
            } else {
                -rng.gen_range(v_i + 1..=v_i + range)
            };
            (v_i, v_f)
        }
    };
    let t = if (v_f + v_i) % 2 == 0 {
        rng.gen_range(2..=range)
    } else {
        2 * rng.gen_range(1..=range / 2)
    };
    ((v_f + v_i) * t / 2, v_f, v_i, t)
}

/// Returns `(x, v_i, t, a)`. Odd times double both `a` and `v_i` so the
/// distance stays whole. Hard slows the object without reversing it.
pub(crate) fn no_final_velocity_numbers(
    difficulty: Difficulty,
    rng: &mut dyn RngCore,
) -> Result<(i64, i64, i64, i64), DrillError> {
    let range = difficulty.range();
    for _ in 0..MAX_DRAWS {
        let t = rng.gen_range(2..=range);
        let mult = if t % 2 == 0 { 1 } else { 2 };
        let (v_i, a) = match difficulty {
            Difficulty::Easy => (0, rng.gen_range(1..=range)),
            Difficulty::Medium => (rng.gen_range(1..=range), rng.gen_range(1..=range)),
            _ => {
                let v_i = rng.gen_range(1..=range);
                (v_i, -rng.gen_range(1..=2 * v_i / t + 2))
            }
        };
        let (v_i, a) = (v_i * mult, a * mult);
        let x = v_i * t + a * t * t / 2;
        if difficulty != Difficulty::Hard || (v_i + a * t >= 0 && x > 0) {
            return Ok((x, v_i, t, a));
        }
    }
    Err(DrillError::ConstraintUnsatisfied(
        "slowed object reverses within the time interval".into(),
    ))
}

// ---------------------------------------------------------------------------
// Questions
// ---------------------------------------------------------------------------

fn no_time_question(difficulty: Difficulty, rng: &mut dyn RngCore) -> Rendered {
    let noun = random_noun(rng);
    let speeding = rng.gen_bool(0.5);
    let roll = rng.gen_range(0..4);
    let (v_f, v_i, a, x) = no_time_numbers(difficulty, rng);

    if difficulty != Difficulty::Hard {
        return match (roll, speeding) {
            (0, true) => (
                format!(
                    "What acceleration would a {noun} at rest need to experience for it to \
                     reach a velocity of {v_f} m/s over a distance of {x} meters?"
                ),
                a,
                ACCEL,
            ),
            (0, false) => (
                format!(
                    "How much deceleration would a {noun} moving at {v_f} m/s need in order \
                     to come to rest over a distance of {x} meters?"
                ),
                a,
                ACCEL,
            ),
            (1 | 2, true) => (
                format!(
                    "If a {noun} starts from rest and accelerates at {a} m/s² over a \
                     distance of {x} meters, what velocity does it reach?"
                ),
                v_f,
                SPEED,
            ),
            (1 | 2, false) => (
                format!(
                    "If a {noun} decelerates at {a} m/s² to rest over {x} meters, what was \
                     its initial velocity?"
                ),
                v_f,
                SPEED,
            ),
            (_, true) => (
                format!(
                    "A {noun} at rest accelerates at {a} m/s² to a velocity of {v_f} m/s. \
                     How far did it travel during this time?"
                ),
                x,
                DIST,
            ),
            (_, false) => (
                format!(
                    "A {noun} decelerates at {a} m/s² from {v_f} m/s to rest. How far did it \
                     travel during this time?"
                ),
                x,
                DIST,
            ),
        };
    }

    match (roll, speeding) {
        (0, true) => (
            format!(
                "What acceleration would a {noun} moving at {v_i} m/s need to experience for \
                 it to speed up to {v_f} m/s over a distance of {x} meters?"
            ),
            a,
            ACCEL,
        ),
        (0, false) => (
            format!(
                "How much deceleration would a {noun} moving at {v_f} m/s need to experience \
                 to slow down to {v_i} m/s over a distance of {x} meters?"
            ),
            a,
            ACCEL,
        ),
        (1, true) => (
            format!(
                "If a {noun} starts at {v_i} m/s and accelerates at {a} m/s² over {x} meters, \
                 what velocity does it reach?"
            ),
            v_f,
            SPEED,
        ),
        (1, false) => (
            format!(
                "If a {noun} moving at {v_f} m/s decelerates at {a} m/s² over {x} meters, \
                 what is its final velocity?"
            ),
            v_i,
            SPEED,
        ),
        (2, true) => (
            format!(
                "If a {noun} accelerates at {a} m/s² to {v_f} m/s over {x} meters, what was \
                 its initial velocity?"
            ),
            v_i,
            SPEED,
        ),
        (2, false) => (
            format!(
                "If a {noun} decelerates at {a} m/s² to {v_i} m/s over {x} meters, what was \
                 its initial velocity?"
            ),
            v_f,
            SPEED,
        ),
        (_, true) => (
            format!(
                "A {noun} accelerates from {v_i} m/s to {v_f} m/s at {a} m/s². How far did \
                 it travel?"
            ),
            x,
            DIST,
        ),
        (_, false) => (
            format!(
                "A {noun} decelerates from {v_f} m/s to {v_i} m/s at {a} m/s². How far did \
                 it travel?"
            ),
            x,
            DIST,
        ),
    }
}

fn no_distance_question(difficulty: Difficulty, rng: &mut dyn RngCore) -> Rendered {
    let (v_f, v_i, a, t) = no_distance_numbers(difficulty, rng);
    let noun = random_noun(rng);
    let speeding = rng.gen_bool(0.5);
    let roll = rng.gen_range(0..4);

    match difficulty {
        Difficulty::Easy => match (roll, speeding) {
            (0, true) => (
                format!(
                    "What acceleration would a {noun} initially at rest need to experience \
                     to get to {v_f} m/s in {t} seconds?"
                ),
                a,
                ACCEL,
            ),
            (0, false) => (
                format!(
                    "How much deceleration would a {noun} initially moving at {v_f} m/s need \
                     to come to rest in {t} seconds?"
                ),
                a,
                ACCEL,
            ),
            (1 | 2, true) => (
                format!(
                    "If a {noun} starts at rest and accelerates at {a} m/s² for {t} seconds, \
                     what velocity does it reach?"
                ),
                v_f,
                SPEED,
            ),
            (1 | 2, false) => (
                format!(
                    "If a {noun} decelerates at {a} m/s² for {t} seconds in order to come to \
                     rest, what velocity did it start with?"
                ),
                v_f,
                SPEED,
            ),
            (_, true) => (
                format!(
                    "A {noun} accelerates from rest at {a} m/s², reaching {v_f} m/s. How \
                     long does it take?"
                ),
                t,
                TIME,
            ),
            (_, false) => (
                format!(
                    "A {noun} decelerates from {v_f} m/s to rest at a rate of {a} m/s². How \
                     long does it take?"
                ),
                t,
                TIME,
            ),
        },
        Difficulty::Medium => match (roll, speeding) {
            (0, true) => (
                format!(
                    "Determine the acceleration required for a {noun} moving at {v_i} m/s to \
                     speed up to {v_f} m/s in {t} seconds."
                ),
                a,
                ACCEL,
            ),
            (0, false) => (
                format!(
                    "Determine how much deceleration is required for a {noun} moving at \
                     {v_f} m/s to slow to {v_i} m/s in {t} seconds."
                ),
                a,
                ACCEL,
            ),
            (1 | 2, true) => (
                format!(
                    "A {noun} starts at {v_i} m/s and accelerates at {a} m/s² for {t} \
                     seconds. What is its final velocity?"
                ),
                v_f,
                SPEED,
            ),
            (1 | 2, false) => (
                format!(
                    "A {noun} slows to {v_i} m/s after decelerating at {a} m/s² for {t} \
                     seconds. What was its initial velocity?"
                ),
                v_f,
                SPEED,
            ),
            (_, true) => (
                format!(
                    "A {noun} accelerates from {v_i} m/s to {v_f} m/s with an acceleration \
                     of {a} m/s². How much time does it take?"
                ),
                t,
                TIME,
            ),
            (_, false) => (
                format!(
                    "A {noun} decelerates from {v_f} m/s to {v_i} m/s at a rate of {a} m/s². \
                     How much time does it take?"
                ),
                t,
                TIME,
            ),
        },
        _ => {
            // mirrored problems start moving left
            let sign = if speeding { 1 } else { -1 };
            let (v_f, v_i, a) = (sign * v_f, sign * v_i, sign * a);
            let frame = "Take motion to the right as positive.";
            match roll {
                0 => (
                    format!(
                        "{frame} What acceleration would a {noun} moving at {v_i} m/s need \
                         to experience to reach {v_f} m/s in {t} seconds?"
                    ),
                    a,
                    ACCEL,
                ),
                1 => (
                    format!(
                        "{frame} If a {noun} starts at {v_i} m/s and accelerates at {a} m/s² \
                         for {t} seconds, what velocity does it reach?"
                    ),
                    v_f,
                    SPEED,
                ),
                2 => (
                    format!(
                        "{frame} If a {noun} accelerates at {a} m/s² to reach {v_f} m/s in \
                         {t} seconds, what was its initial velocity?"
                    ),
                    v_i,
                    SPEED,
                ),
                _ => (
                    format!(
                        "{frame} A {noun} accelerates at {a} m/s² from {v_i} m/s to {v_f} \
                         m/s. How long does it take?"
                    ),
                    t,
                    TIME,
                ),
            }
        }
    }
}

fn no_acceleration_question(difficulty: Difficulty, rng: &mut dyn RngCore) -> Rendered {
    let (x, v_f, v_i, t) = no_acceleration_numbers(difficulty, rng);
    let noun = random_noun(rng);
    let speeding = rng.gen_bool(0.5);
    let roll = rng.gen_range(0..3);

    match difficulty {
        Difficulty::Easy => match (roll, speeding) {
            (0, true) => (
                format!(
                    "A {noun} initially at rest accelerates at a constant rate over a \
                     distance of {x} meters. If it reached a velocity of {v_f} m/s, how much \
                     time did it take to get up to that speed?"
                ),
                t,
                TIME,
            ),
            (0, false) => (
                format!(
                    "A {noun} initially moving at {v_f} m/s decelerates at a constant rate \
                     until it is at a full stop. If this occurred over a distance of {x} \
                     meters, how much time did it take?"
                ),
                t,
                TIME,
            ),
            (1, true) => (
                format!(
                    "A {noun} initially at rest accelerates at a constant rate for {t} \
                     seconds. If it reached a velocity of {v_f} m/s, how much distance did it \
                     cover during that time?"
                ),
                x,
                DIST,
            ),
            (1, false) => (
                format!(
                    "A {noun} initially moving at {v_f} m/s decelerates at a constant rate \
                     until it is at a full stop. If this occurred over {t} seconds, how much \
                     distance did it cover?"
                ),
                x,
                DIST,
            ),
            (_, true) => (
                format!(
                    "A {noun} initially at rest accelerates at a constant rate for {t} \
                     seconds. If this occurred over {x} meters, what velocity did the {noun} \
                     reach?"
                ),
                v_f,
                SPEED,
            ),
            (_, false) => (
                format!(
                    "A {noun} comes to rest after decelerating at a constant rate for {t} \
                     seconds. If this occurred over {x} meters, what velocity did the {noun} \
                     start with?"
                ),
                v_f,
                SPEED,
            ),
        },
        Difficulty::Medium => match (roll, speeding) {
            (0, true) => (
                format!(
                    "A {noun} initially moving at {v_i} m/s accelerates at a constant rate \
                     over a distance of {x} meters. If it reaches a final velocity of {v_f} \
                     m/s, how much time did it take to get up to that speed?"
                ),
                t,
                TIME,
            ),
            (0, false) => (
                format!(
                    "A {noun} initially moving at {v_f} m/s decelerates at a constant rate \
                     until it is at a new velocity of {v_i} m/s. If this occurred over a \
                     distance of {x} meters, how much time did it take?"
                ),
                t,
                TIME,
            ),
            (1, true) => (
                format!(
                    "A {noun} initially moving at {v_i} m/s accelerates at a constant rate \
                     for {t} seconds. If it reaches a final velocity of {v_f} m/s, how much \
                     distance did it cover during that time?"
                ),
                x,
                DIST,
            ),
            (1, false) => (
                format!(
                    "A {noun} initially moving at {v_f} m/s decelerates at a constant rate \
                     until it is at a new velocity of {v_i} m/s. If this occurred over {t} \
                     seconds, how much distance did it cover?"
                ),
                x,
                DIST,
            ),
            (_, true) => (
                format!(
                    "A {noun} initially moving at {v_i} m/s accelerates at a constant rate \
                     for {t} seconds. If this occurred over a distance of {x} meters, what \
                     velocity did it reach?"
                ),
                v_f,
                SPEED,
            ),
            (_, false) => (
                format!(
                    "A {noun} initially moving at {v_f} m/s decelerates at a constant rate \
                     for {t} seconds. If this occurred over a distance of {x} meters, what \
                     velocity did it reach?"
                ),
                v_i,
                SPEED,
            ),
        },
        _ => {
            let heading = if x > 0 { "to the right" } else { "to the left" };
            let frame = "Take motion to the right as positive.";
            let distance = x.abs();
            // the reversed trip runs the same velocities backwards in time
            let (start, start_dir, end, end_dir, final_velocity) = if speeding {
                (v_i, "right", -v_f, "left", v_f)
            } else {
                (-v_f, "left", v_i, "right", v_i)
            };
            match roll {
                0 => (
                    format!(
                        "A {noun}, initially moving at {start} m/s to the {start_dir}, slows \
                         all the way down and gets back up to {end} m/s to the {end_dir}. The \
                         {noun} travels {distance} meters {heading} in the process. How much \
                         time did this take?"
                    ),
                    t,
                    TIME,
                ),
                1 => (
                    format!(
                        "{frame} A {noun}, initially moving at {start} m/s to the \
                         {start_dir}, slows all the way down and gets back up to {end} m/s to \
                         the {end_dir} in {t} seconds. What is the {noun}'s displacement?"
                    ),
                    x,
                    DIST,
                ),
                _ => (
                    format!(
                        "{frame} A {noun}, initially moving at {start} m/s to the \
                         {start_dir}, experiences a constant acceleration that slows it all \
                         the way down and speeds it back up to the {end_dir}. The acceleration \
                         was applied for {t} seconds, and the {noun} ended up {distance} \
                         meters {heading} of where it started. What is the final velocity of \
                         the {noun}?"
                    ),
                    final_velocity,
                    SPEED,
                ),
            }
        }
    }
}

fn no_final_velocity_question(
    difficulty: Difficulty,
    rng: &mut dyn RngCore,
) -> Result<Rendered, DrillError> {
    if difficulty == Difficulty::Hard && rng.gen_range(0..3) == 0 {
        return no_final_velocity_question(Difficulty::Medium, rng);
    }
    let (x, v_i, t, a) = no_final_velocity_numbers(difficulty, rng)?;
    let noun = random_noun(rng);

    Ok(match difficulty {
        Difficulty::Easy => match rng.gen_range(0..3) {
            0 => (
                format!(
                    "A {noun}, initially at rest, accelerates at a rate of {a} m/s² for {t} \
                     seconds. How far does it go during this time?"
                ),
                x,
                DIST,
            ),
            1 => (
                format!(
                    "A {noun}, initially at rest, accelerates at a rate of {a} m/s² over {x} \
                     meters. How long does this take?"
                ),
                t,
                TIME,
            ),
            _ => (
                format!(
                    "A {noun}, initially at rest, accelerates at a constant rate for {t} \
                     seconds over {x} meters. How big was the acceleration?"
                ),
                a,
                ACCEL,
            ),
        },
        Difficulty::Medium => match rng.gen_range(0..3) {
            0 => (
                format!(
                    "A {noun}, initially moving at {v_i} m/s, accelerates at a rate of {a} \
                     m/s² for {t} seconds. How far does it go during this time?"
                ),
                x,
                DIST,
            ),
            1 => (
                format!(
                    "A {noun}, initially moving to the right, accelerates at a rate of {a} \
                     m/s² for {t} seconds. The {noun} covers {x} meters. How fast was it \
                     initially moving?"
                ),
                v_i,
                SPEED,
            ),
            _ => (
                format!(
                    "A {noun}, initially moving at {v_i} m/s, accelerates at a constant rate \
                     for {t} seconds over {x} meters. How big was the acceleration?"
                ),
                a,
                ACCEL,
            ),
        },
        _ => {
            let slowing = -a;
            match rng.gen_range(0..4) {
                0 => (
                    format!(
                        "A {noun} is initially moving at {v_i} m/s to the right, but is \
                         slowed by an acceleration of {slowing} m/s² to the left for {t} \
                         seconds. How far does it go during this time?"
                    ),
                    x,
                    DIST,
                ),
                1 => (
                    format!(
                        "A {noun}, initially moving to the right, is slowed at a rate of \
                         {slowing} m/s² for {t} seconds. Despite this, the {noun} covers {x} \
                         meters. How fast was it initially moving?"
                    ),
                    v_i,
                    SPEED,
                ),
                2 => (
                    format!(
                        "Take motion to the right as positive. A {noun}, initially moving at \
                         {v_i} m/s to the right, is slowed at a constant rate for {t} seconds \
                         over {x} meters. What was the acceleration?"
                    ),
                    a,
                    ACCEL,
                ),
                _ => (
                    format!(
                        "A {noun}, initially moving at {v_i} m/s to the right, is slowed at a \
                         constant rate of {slowing} m/s². How much time does it take for the \
                         {noun} to cover {x} meters?"
                    ),
                    t,
                    TIME,
                ),
            }
        }
    })
}
