//! Topic generators.
//!
//! Each generator draws integer parameters under a divisibility or
//! Pythagorean constraint so the derived quantities come out as round
//! numbers, then renders a question around one hidden quantity.

pub mod algebra;
pub mod collision;
pub mod compounds;
pub mod energy;
pub mod forces;
pub mod graphs;
pub mod linear;
pub mod projectile;
pub mod words;

pub use algebra::Algebra;
pub use collision::Collision;
pub use compounds::Compounds;
pub use energy::Energy;
pub use forces::Forces;
pub use graphs::MotionGraphs;
pub use linear::LinearMotion;
pub use projectile::Projectile;

use crate::model::{Difficulty, ExpectedAnswer, Problem, Topic};
use crate::traits::squash;

/// Wrap rendered question text and `(value, unit)` answers into a problem.
pub(crate) fn numeric_problem(
    topic: Topic,
    kind: &str,
    difficulty: Difficulty,
    question: String,
    answers: Vec<(f64, &str)>,
) -> Problem {
    let answers = answers
        .into_iter()
        .map(|(value, unit)| ExpectedAnswer::numeric(value, unit))
        .collect();
    Problem::new(topic, kind, difficulty, squash(&question), answers)
}

/// Every `(i, n / i)` with `i >= min` and `i` dividing `n`, in increasing
/// order of `i`.
pub(crate) fn divisor_pairs(n: i64, min: i64) -> Vec<(i64, i64)> {
    let mut small = Vec::new();
    let mut large = Vec::new();
    let mut i = 1;
    while i * i <= n {
        if n % i == 0 {
            small.push(i);
            if i != n / i {
                large.push(n / i);
            }
        }
        i += 1;
    }
    small
        .into_iter()
        .chain(large.into_iter().rev())
        .filter(|d| *d >= min)
        .map(|d| (d, n / d))
        .collect()
}
