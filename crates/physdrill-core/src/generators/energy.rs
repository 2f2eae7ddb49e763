//! Kinetic, gravitational and elastic energy, work, and conversions
//! between them.

use rand::{Rng, RngCore};

use super::numeric_problem;
use super::words::random_noun;
use crate::error::DrillError;
use crate::model::{Difficulty, Problem, Topic};
use crate::traits::{fmt_num, ProblemGenerator};

const KINDS: &[&str] = &[
    "kinetic",
    "gravitational",
    "elastic",
    "work",
    "kinetic-gravitational",
    "elastic-gravitational",
    "elastic-kinetic",
    "mixed",
];

const DIFFICULTIES: &[Difficulty] = &[Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

type Rendered = (String, f64, &'static str, &'static str);

#[derive(Debug, Default, Clone, Copy)]
pub struct Energy;

impl ProblemGenerator for Energy {
    fn topic(&self) -> Topic {
        Topic::Energy
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
        let kind_drawn = if kind == "mixed" {
            KINDS[rng.gen_range(0..KINDS.len() - 1)]
        } else {
            kind
        };
        let (question, answer, unit, solution) = match kind_drawn {
            "kinetic" => kinetic_question(difficulty, rng),
            "gravitational" => gravitational_question(difficulty, rng),
            "elastic" => elastic_question(difficulty, rng),
            "work" => work_question(difficulty, rng),
            "kinetic-gravitational" => kinetic_gravitational_question(difficulty, rng),
            "elastic-gravitational" => elastic_gravitational_question(difficulty, rng),
            _ => elastic_kinetic_question(difficulty, rng),
        };
        Ok(
            numeric_problem(Topic::Energy, kind, difficulty, question, vec![(answer, unit)])
                .with_solution(solution),
        )
    }
}

// ---------------------------------------------------------------------------
// Parameter draws
// ---------------------------------------------------------------------------

/// `(mass, velocity, KE)`; one factor is doubled so ½mv² is whole.
pub(crate) fn kinetic_numbers(difficulty: Difficulty, rng: &mut dyn RngCore) -> (i64, i64, i64) {
    let (m, v) = doubled_pair(difficulty, rng);
    (m, v, m * v * v / 2)
}

/// `(mass, height, GPE)`.
pub(crate) fn gravitational_numbers(
    difficulty: Difficulty,
    rng: &mut dyn RngCore,
) -> (i64, i64, i64) {
    let range = difficulty.range();
    let m = rng.gen_range(1..=range);
    let h = rng.gen_range(1..=range);
    (m, h, 10 * m * h)
}

/// `(spring constant, displacement, EPE)`; one factor is doubled so ½kx²
/// is whole.
pub(crate) fn elastic_numbers(difficulty: Difficulty, rng: &mut dyn RngCore) -> (i64, i64, i64) {
    let (k, x) = doubled_pair(difficulty, rng);
    (k, x, k * x * x / 2)
}

/// `(force, distance, work)`.
pub(crate) fn work_numbers(difficulty: Difficulty, rng: &mut dyn RngCore) -> (i64, i64, i64) {
    let range = difficulty.range();
    let f = rng.gen_range(1..=range);
    let d = rng.gen_range(1..=range);
    (f, d, f * d)
}

/// `(spring constant, displacement, mass, height)` with mgh = ½kx² and every
/// quantity whole: the energy is a multiple of 10 and the mass divides E/10.
pub(crate) fn elastic_gravitational_numbers(
    difficulty: Difficulty,
    rng: &mut dyn RngCore,
) -> (i64, i64, i64, i64) {
    let range = difficulty.range();
    loop {
        let (k, x, epe) = elastic_numbers(difficulty, rng);
        if epe % 10 != 0 {
            continue;
        }
        let mh = epe / 10;
        let masses: Vec<i64> = (1..=range).filter(|m| mh % m == 0).collect();
        let m = masses[rng.gen_range(0..masses.len())];
        return (k, x, m, mh / m);
    }
}

/// `(spring constant, displacement, mass, speed)` with ½mv² = ½kx²; k is m
/// times a perfect square so the speed is whole.
pub(crate) fn elastic_kinetic_numbers(
    difficulty: Difficulty,
    rng: &mut dyn RngCore,
) -> (i64, i64, i64, i64) {
    let range = difficulty.range();
    let m = rng.gen_range(1..=range);
    let x = rng.gen_range(1..=range);
    let max_ratio = (1..=range).take_while(|r| m * r * r <= 2 * range).last().unwrap_or(1);
    let r = rng.gen_range(1..=max_ratio);
    (m * r * r, x, m, x * r)
}

fn doubled_pair(difficulty: Difficulty, rng: &mut dyn RngCore) -> (i64, i64) {
    let range = difficulty.range();
    let a = rng.gen_range(1..=range);
    let b = rng.gen_range(1..=range);
    if rng.gen_bool(0.5) {
        (2 * a, b)
    } else {
        (a, 2 * b)
    }
}

// ---------------------------------------------------------------------------
// Single-quantity problems
// ---------------------------------------------------------------------------

fn kinetic_question(difficulty: Difficulty, rng: &mut dyn RngCore) -> Rendered {
    let (m, v, ke) = kinetic_numbers(difficulty, rng);
    let noun = random_noun(rng);
    let solution = "KE = ½mv²";
    match rng.gen_range(0..3) {
        0 => (
            format!("How much kinetic energy does a {m} kg {noun} moving at {v} m/s have?"),
            ke as f64,
            "Joules",
            solution,
        ),
        1 => (
            format!(
                "How fast would a {m} kg {noun} have to move to have {ke} Joules of kinetic \
                 energy?"
            ),
            v as f64,
            "m/s",
            solution,
        ),
        _ => (
            format!(
                "How much mass would a {noun} moving at {v} m/s need to have to contain {ke} \
                 Joules of kinetic energy?"
            ),
            m as f64,
            "kg",
            solution,
        ),
    }
}

fn gravitational_question(difficulty: Difficulty, rng: &mut dyn RngCore) -> Rendered {
    let (m, h, gpe) = gravitational_numbers(difficulty, rng);
    let noun = random_noun(rng);
    let solution = "GPE = mgh with g = 10 m/s²";
    match rng.gen_range(0..3) {
        0 => (
            format!(
                "How much gravitational potential energy does a {m} kg {noun} held {h} meters \
                 above the ground have?"
            ),
            gpe as f64,
            "Joules",
            solution,
        ),
        1 => (
            format!(
                "How high up would a {m} kg {noun} have to be to have {gpe} Joules of \
                 gravitational potential energy?"
            ),
            h as f64,
            "meters",
            solution,
        ),
        _ => (
            format!(
                "How much mass would a {noun} at a height of {h} meters need to have to \
                 contain {gpe} Joules of gravitational potential energy?"
            ),
            m as f64,
            "kg",
            solution,
        ),
    }
}

fn elastic_question(difficulty: Difficulty, rng: &mut dyn RngCore) -> Rendered {
    let (k, x, epe) = elastic_numbers(difficulty, rng);
    let how = if rng.gen_bool(0.5) {
        "compressed"
    } else {
        "stretched"
    };
    let solution = "EPE = ½kx²";
    match rng.gen_range(0..3) {
        0 => (
            format!(
                "A spring with strength {k} N/m is {how} by {x} meters. What is the amount of \
                 elastic potential energy held in the spring?"
            ),
            epe as f64,
            "Joules",
            solution,
        ),
        1 => (
            format!(
                "A spring with strength {k} N/m contains {epe} Joules of elastic potential \
                 energy. How far was this spring {how}?"
            ),
            x as f64,
            "meters",
            solution,
        ),
        _ => (
            format!(
                "A spring is {how} by {x} meters, and contains {epe} Joules of elastic \
                 potential energy. What is the spring constant?"
            ),
            k as f64,
            "N/m",
            solution,
        ),
    }
}

fn work_question(difficulty: Difficulty, rng: &mut dyn RngCore) -> Rendered {
    let (f, d, w) = work_numbers(difficulty, rng);
    let noun = random_noun(rng);
    let solution = "W = Fd";
    match rng.gen_range(0..3) {
        0 => (
            format!("A {noun} is moved {d} meters by a {f} Newton force. How much work was done?"),
            w as f64,
            "Joules",
            solution,
        ),
        1 => (
            format!(
                "Over how much distance would a {f} Newton force have to push a {noun} before \
                 it did {w} Joules of work?"
            ),
            d as f64,
            "meters",
            solution,
        ),
        _ => (
            format!(
                "{w} Joules of work are done on a {noun} over a distance of {d} meters. How \
                 much force was applied?"
            ),
            f as f64,
            "Newtons",
            solution,
        ),
    }
}

// ---------------------------------------------------------------------------
// Conversions
// ---------------------------------------------------------------------------

fn kinetic_gravitational_question(difficulty: Difficulty, rng: &mut dyn RngCore) -> Rendered {
    let (m, v, _) = kinetic_numbers(difficulty, rng);
    let h = (v * v) as f64 / 20.0;
    let noun = random_noun(rng);
    let solution = "mgh = ½mv², so the mass cancels";
    if rng.gen_bool(0.5) {
        (
            format!(
                "A {m} kg {noun} is dropped from a height of {} meters. How fast is it moving \
                 when it hits the ground?",
                fmt_num(h)
            ),
            v as f64,
            "m/s",
            solution,
        )
    } else {
        (
            format!(
                "A {m} kg {noun} is released from rest and hits the ground at {v} m/s. How \
                 high up was it dropped from?"
            ),
            h,
            "meters",
            solution,
        )
    }
}

fn elastic_gravitational_question(difficulty: Difficulty, rng: &mut dyn RngCore) -> Rendered {
    let (k, x, m, h) = elastic_gravitational_numbers(difficulty, rng);
    let noun = random_noun(rng);
    let solution = "mgh = ½kx²";
    match rng.gen_range(0..4) {
        0 => (
            format!(
                "A {m} kg {noun} is dropped from a height of {h} meters onto a spring. The \
                 spring has to compress by {x} meters to stop it. What is the spring constant?"
            ),
            k as f64,
            "N/m",
            solution,
        ),
        1 => (
            format!(
                "A {m} kg {noun} is released from rest and dropped on a spring of strength {k} \
                 N/m. If the spring compresses {x} meters before the {noun} comes to rest, how \
                 high up was it dropped from?"
            ),
            h as f64,
            "meters",
            solution,
        ),
        2 => (
            format!(
                "A {m} kg {noun} is dropped from {h} meters onto a spring of strength {k} \
                 N/m. How much does the spring have to compress to bring the {noun} to rest?"
            ),
            x as f64,
            "meters",
            solution,
        ),
        _ => (
            format!(
                "A {noun} is dropped from {h} meters onto a spring of strength {k} N/m. If \
                 the spring compresses by {x} meters to bring the {noun} to rest, how much mass \
                 does the {noun} have?"
            ),
            m as f64,
            "kg",
            solution,
        ),
    }
}

fn elastic_kinetic_question(difficulty: Difficulty, rng: &mut dyn RngCore) -> Rendered {
    let (k, x, m, v) = elastic_kinetic_numbers(difficulty, rng);
    let noun = random_noun(rng);
    let solution = "½mv² = ½kx²";
    match rng.gen_range(0..4) {
        0 => (
            format!(
                "A {m} kg {noun} strikes a spring while moving at {v} m/s. The spring has to \
                 compress by {x} meters to stop it. What is the spring constant?"
            ),
            k as f64,
            "N/m",
            solution,
        ),
        1 => (
            format!(
                "A {m} kg {noun} hits a spring of strength {k} N/m. If the spring compresses \
                 {x} meters before the {noun} comes to rest, how fast was the {noun} initially \
                 moving?"
            ),
            v as f64,
            "m/s",
            solution,
        ),
        2 => (
            format!(
                "A {m} kg {noun} moving at {v} m/s hits a spring of strength {k} N/m. How \
                 much does the spring have to compress to bring the {noun} to rest?"
            ),
            x as f64,
            "meters",
            solution,
        ),
        _ => (
            format!(
                "A {noun} moving at {v} m/s hits a spring of strength {k} N/m. If the spring \
                 compresses by {x} meters to bring the {noun} to rest, how much mass does the \
                 {noun} have?"
            ),
            m as f64,
            "kg",
            solution,
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grading::Tolerance;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn energies_are_whole() {
        let mut rng = StdRng::seed_from_u64(30);
        for _ in 0..200 {
            let (m, v, ke) = kinetic_numbers(Difficulty::Medium, &mut rng);
            assert_eq!(2 * ke, m * v * v);
            let (k, x, epe) = elastic_numbers(Difficulty::Hard, &mut rng);
            assert_eq!(2 * epe, k * x * x);
            let (m, h, gpe) = gravitational_numbers(Difficulty::Easy, &mut rng);
            assert!(m <= 5 && h <= 5);
            assert_eq!(gpe, 10 * m * h);
        }
    }

    #[test]
    fn spring_conversion_numbers_balance_exactly() {
        let mut rng = StdRng::seed_from_u64(31);
        for difficulty in DIFFICULTIES.iter().copied() {
            let range = difficulty.range();
            for _ in 0..200 {
                let (k, x, m, h) = elastic_gravitational_numbers(difficulty, &mut rng);
                assert!(k > 0 && x > 0 && h > 0);
                assert!((1..=range).contains(&m));
                assert_eq!(20 * m * h, k * x * x);

                let (k, x, m, v) = elastic_kinetic_numbers(difficulty, &mut rng);
                assert!(k <= 2 * range && x <= range && m <= range);
                assert_eq!(m * v * v, k * x * x);
            }
        }
    }

    fn shown_numbers(question: &str) -> Vec<f64> {
        question
            .split_whitespace()
            .filter_map(|w| {
                w.trim_end_matches(|c| c == '.' || c == '?' || c == ',')
                    .parse::<f64>()
                    .ok()
            })
            .collect()
    }

    #[test]
    fn elastic_gravitational_recomputes_from_shown_numbers() {
        let tolerance = Tolerance::default();
        let mut rng = StdRng::seed_from_u64(34);
        for difficulty in DIFFICULTIES.iter().copied() {
            for _ in 0..300 {
                let (question, answer, unit, _) =
                    elastic_gravitational_question(difficulty, &mut rng);
                let n = shown_numbers(&question);
                assert_eq!(n.len(), 3, "{question}");
                assert!(n.iter().all(|v| v.fract() == 0.0), "{question}");
                let derived = match unit {
                    // m, h, x
                    "N/m" => 20.0 * n[0] * n[1] / (n[2] * n[2]),
                    // m, k, x or h, k, x
                    "kg" => n[1] * n[2] * n[2] / (20.0 * n[0]),
                    _ if question.contains("how high") => n[1] * n[2] * n[2] / (20.0 * n[0]),
                    // m, h, k
                    _ => (20.0 * n[0] * n[1] / n[2]).sqrt(),
                };
                assert!(
                    tolerance.accepts(answer, derived),
                    "{question}: expected {answer}, derived {derived}"
                );
                assert_eq!(answer.fract(), 0.0);
            }
        }
    }

    #[test]
    fn elastic_kinetic_recomputes_from_shown_numbers() {
        let tolerance = Tolerance::default();
        let mut rng = StdRng::seed_from_u64(35);
        for difficulty in DIFFICULTIES.iter().copied() {
            for _ in 0..300 {
                let (question, answer, unit, _) = elastic_kinetic_question(difficulty, &mut rng);
                let n = shown_numbers(&question);
                assert_eq!(n.len(), 3, "{question}");
                assert!(n.iter().all(|v| v.fract() == 0.0), "{question}");
                let derived = match unit {
                    // m, v, x
                    "N/m" => n[0] * n[1] * n[1] / (n[2] * n[2]),
                    // m, k, x
                    "m/s" => n[2] * (n[1] / n[0]).sqrt(),
                    // m, v, k
                    "meters" => n[1] * (n[0] / n[2]).sqrt(),
                    // v, k, x
                    _ => n[1] * n[2] * n[2] / (n[0] * n[0]),
                };
                assert!(
                    tolerance.accepts(answer, derived),
                    "{question}: expected {answer}, derived {derived}"
                );
            }
        }
    }

    #[test]
    fn mixed_keeps_its_kind_label() {
        let mut rng = StdRng::seed_from_u64(32);
        for _ in 0..50 {
            let problem = Energy.generate("mixed", Difficulty::Hard, &mut rng).unwrap();
            assert_eq!(problem.kind, "mixed");
            assert_eq!(problem.answers.len(), 1);
        }
    }

    #[test]
    fn every_kind_generates() {
        let mut rng = StdRng::seed_from_u64(33);
        for kind in KINDS {
            for difficulty in DIFFICULTIES.iter().copied() {
                let problem = Energy.generate(kind, difficulty, &mut rng).unwrap();
                assert!(problem.solution.is_some());
            }
        }
    }
}
