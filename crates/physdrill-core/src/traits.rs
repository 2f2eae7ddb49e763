//! The generator trait every topic implements, plus shared rendering
//! helpers for question text.

use rand::RngCore;

use crate::error::DrillError;
use crate::model::{Difficulty, Problem, Topic};

// ---------------------------------------------------------------------------
// Problem generator trait
// ---------------------------------------------------------------------------

/// A topic's problem generator.
///
/// Implementations are stateless apart from configuration; all randomness
/// comes from the `rng` argument so a seeded RNG reproduces a session.
pub trait ProblemGenerator: Send + Sync {
    /// The topic this generator serves.
    fn topic(&self) -> Topic;

    /// Problem kinds accepted by [`ProblemGenerator::generate`].
    fn kinds(&self) -> &'static [&'static str];

    /// Difficulty tiers with question templates.
    fn difficulties(&self) -> &'static [Difficulty];

    /// Draw parameters and render one problem.
    fn generate(
        &self,
        kind: &str,
        difficulty: Difficulty,
        rng: &mut dyn RngCore,
    ) -> Result<Problem, DrillError>;

    /// The kind used when none is requested.
    fn default_kind(&self) -> &'static str {
        self.kinds()[0]
    }

    /// Check that `kind` and `difficulty` name a supported selection.
    fn ensure_supported(&self, kind: &str, difficulty: Difficulty) -> Result<(), DrillError> {
        if !self.kinds().contains(&kind) {
            return Err(DrillError::UnknownKind {
                topic: self.topic(),
                kind: kind.to_string(),
            });
        }
        if !self.difficulties().contains(&difficulty) {
            return Err(DrillError::UnsupportedDifficulty {
                topic: self.topic(),
                difficulty,
            });
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Number rendering
// ---------------------------------------------------------------------------

/// Render a quantity for question text: whole numbers without decimals,
/// everything else to two places.
pub fn fmt_num(value: f64) -> String {
    let rounded = value.round();
    if (value - rounded).abs() < 1e-9 {
        // avoid "-0"
        format!("{}", rounded as i64)
    } else {
        format!("{value:.2}")
    }
}

/// Angle in degrees from the horizontal for a velocity `(vx, vy)`, rounded
/// to four places.
pub fn angle_deg(vx: f64, vy: f64) -> f64 {
    let deg = (vy / vx).atan().to_degrees();
    (deg * 10_000.0).round() / 10_000.0
}

/// Collapse runs of whitespace so multi-line templates read as one line.
pub fn squash(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
