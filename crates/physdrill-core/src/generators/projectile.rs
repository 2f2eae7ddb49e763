//! Two-dimensional projectile motion with g = 10 m/s².
//!
//! Launch velocities come from Euclid's formula, `v_x = m² − n²`,
//! `v_y = 2mn`, `v = m² + n²`, with 5 dividing m or n so every flight
//! time is a whole number of seconds.

use rand::{Rng, RngCore};

use super::numeric_problem;
use super::words::{random_noun, random_projectile_verb};
use crate::error::DrillError;
use crate::model::{Difficulty, Problem, Topic};
use crate::traits::{angle_deg, fmt_num, ProblemGenerator};

const KINDS: &[&str] = &["horizontal", "angled", "cliff"];

const DIFFICULTIES: &[Difficulty] = &[Difficulty::Easy, Difficulty::Hard];

const SOLUTION: &str = "Split the motion into components: the horizontal velocity stays \
                        constant while the vertical velocity changes by 10 m/s every second.";

type Answers = Vec<(f64, &'static str)>;

#[derive(Debug, Default, Clone, Copy)]
pub struct Projectile;

impl ProblemGenerator for Projectile {
    fn topic(&self) -> Topic {
        Topic::Projectile
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
        let (question, answers) = match kind {
            "horizontal" => horizontal_question(difficulty, rng),
            "angled" => angled_question(difficulty, rng),
            _ => {
                if rng.gen_bool(0.5) {
                    high_to_low_question(difficulty, rng)
                } else {
                    low_to_high_question(difficulty, rng)
                }
            }
        };
        Ok(numeric_problem(Topic::Projectile, kind, difficulty, question, answers).with_solution(SOLUTION))
    }
}

/// Launch velocity components shared by every kind.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Launch {
    pub v_x: i64,
    pub v_y: i64,
    pub v_r: i64,
    pub theta: f64,
}

/// Every `(m, n)` with `1 <= n < m <= max` and 5 dividing m or n.
pub(crate) fn m_n_table(max: i64) -> Vec<(i64, i64)> {
    (2..=max)
        .flat_map(|m| (1..m).map(move |n| (m, n)))
        .filter(|(m, n)| m % 5 == 0 || n % 5 == 0)
        .collect()
}

pub(crate) fn draw_launch(difficulty: Difficulty, rng: &mut dyn RngCore) -> Launch {
    let table = m_n_table(difficulty.range());
    let (m, n) = table[rng.gen_range(0..table.len())];
    let v_x = m * m - n * n;
    let v_y = 2 * m * n;
    Launch {
        v_x,
        v_y,
        v_r: m * m + n * n,
        theta: angle_deg(v_x as f64, v_y as f64),
    }
}

// ---------------------------------------------------------------------------
// Horizontal launch off a cliff
// ---------------------------------------------------------------------------

fn horizontal_question(difficulty: Difficulty, rng: &mut dyn RngCore) -> (String, Answers) {
    let Launch { v_x, v_y, v_r, theta } = draw_launch(difficulty, rng);
    // v_y is the vertical speed at impact
    let d_x = v_x * v_y / 10;
    let d_y = v_y * v_y / 20;
    let noun = random_noun(rng);
    let verb = random_projectile_verb(rng);
    let theta_s = fmt_num(theta);

    if difficulty == Difficulty::Easy {
        return match rng.gen_range(0..3) {
            0 => (
                format!(
                    "If a {noun} is {verb} horizontally off of a {d_y} m cliff with an \
                     initial velocity of {v_x} m/s, how far away does it land?"
                ),
                vec![(d_x as f64, "meters")],
            ),
            1 => (
                format!(
                    "If a {noun} is {verb} horizontally off of a cliff at {v_x} m/s, and \
                     lands {d_x} m away, what was the height of the cliff?"
                ),
                vec![(d_y as f64, "meters")],
            ),
            _ => (
                format!(
                    "If a {noun} is {verb} horizontally off of a {d_y} m cliff, and lands \
                     {d_x} m away, how fast was it {verb}?"
                ),
                vec![(v_x as f64, "m/s")],
            ),
        };
    }

    match rng.gen_range(0..3) {
        0 => (
            format!(
                "If a {noun} was {verb} horizontally off of a cliff and lands at {v_r} m/s at \
                 a {theta_s} degree angle, how fast was it {verb}, and from how high?"
            ),
            vec![(v_x as f64, "m/s"), (d_y as f64, "meters")],
        ),
        1 => (
            format!(
                "If a {noun} is {verb} horizontally off of a cliff at {v_x} m/s, and lands \
                 {d_x} m away, what speed and angle does it land with?"
            ),
            vec![(v_r as f64, "m/s"), (theta, "degrees")],
        ),
        _ => (
            format!(
                "A {noun} is {verb} horizontally off of a {d_y} m cliff, and lands at a \
                 {theta_s} degree angle. With what speed did it land, and how far from the \
                 base of the cliff?"
            ),
            vec![(v_r as f64, "m/s"), (d_x as f64, "meters")],
        ),
    }
}

// ---------------------------------------------------------------------------
// Angled launch over level ground
// ---------------------------------------------------------------------------

fn angled_question(difficulty: Difficulty, rng: &mut dyn RngCore) -> (String, Answers) {
    let Launch { v_x, v_y, v_r, theta } = draw_launch(difficulty, rng);
    let d_x = v_x * v_y / 5;
    let d_y = v_y * v_y / 20;
    let noun = random_noun(rng);
    let verb = random_projectile_verb(rng);
    let theta_s = fmt_num(theta);

    if difficulty == Difficulty::Easy {
        return (
            format!(
                "If a {noun} is {verb} at {v_r} m/s at an angle of {theta_s} degrees, how far \
                 away does it land, and what is its maximum height?"
            ),
            vec![(d_x as f64, "meters"), (d_y as f64, "meters")],
        );
    }

    match rng.gen_range(0..3) {
        0 => (
            format!(
                "A {noun} is {verb} and reaches a maximum height of {d_y} m, landing {d_x} m \
                 away from where it started. What speed and angle was it launched at?"
            ),
            vec![(v_r as f64, "m/s"), (theta, "degrees")],
        ),
        1 => (
            format!(
                "A {noun} is {verb} at {theta_s} degrees, and reaches a maximum height of \
                 {d_y} m. What was its initial speed, and how far away does it land?"
            ),
            vec![(v_r as f64, "m/s"), (d_x as f64, "meters")],
        ),
        _ => (
            format!(
                "A {noun} is {verb} at {v_r} m/s, and reaches a maximum height of {d_y} m. \
                 What angle was it launched at, and how far away does it land?"
            ),
            vec![(theta, "degrees"), (d_x as f64, "meters")],
        ),
    }
}

// ---------------------------------------------------------------------------
// Cliffs
// ---------------------------------------------------------------------------

/// Launched upward from a cliff top, landing below.
#[derive(Debug, Clone, Copy)]
pub(crate) struct HighToLow {
    pub launch: Launch,
    /// Cliff height.
    pub d_y: i64,
    /// Total flight time.
    pub t: i64,
    /// Time to come back down to launch height.
    pub t_level: i64,
    /// Distance from the landing point to the base of the cliff.
    pub d_x: i64,
    /// Launch setback from the cliff edge.
    pub x_back: i64,
    pub v_yf: i64,
}

impl HighToLow {
    pub fn impact_speed(&self) -> f64 {
        ((self.launch.v_x.pow(2) + self.v_yf.pow(2)) as f64).sqrt()
    }
}

pub(crate) fn high_to_low_numbers(difficulty: Difficulty, rng: &mut dyn RngCore) -> HighToLow {
    let launch = draw_launch(difficulty, rng);
    let c = rng.gen_range(1..=difficulty.range());
    let t_level = launch.v_y / 5;
    let t = t_level + c;
    let t_x = if difficulty == Difficulty::Hard {
        rng.gen_range(0..t_level)
    } else {
        0
    };
    HighToLow {
        launch,
        d_y: c * (launch.v_y + 5 * c),
        t,
        t_level,
        d_x: launch.v_x * (t - t_x),
        x_back: launch.v_x * t_x,
        v_yf: launch.v_y - 10 * t,
    }
}

fn high_to_low_question(difficulty: Difficulty, rng: &mut dyn RngCore) -> (String, Answers) {
    let shot = high_to_low_numbers(difficulty, rng);
    let Launch { v_r, theta, .. } = shot.launch;
    let HighToLow { d_y, d_x, .. } = shot;
    let noun = random_noun(rng);
    let verb = random_projectile_verb(rng);
    let theta_s = fmt_num(theta);

    if difficulty == Difficulty::Easy {
        return (
            format!(
                "A {noun} is {verb} off the edge of a {d_y} m high cliff at a {theta_s} degree \
                 angle at {v_r} m/s. How far from the base of the cliff does the {noun} land, \
                 and how fast is it moving when it hits the ground?"
            ),
            vec![(d_x as f64, "meters"), (shot.impact_speed(), "m/s")],
        );
    }

    (
        format!(
            "A {noun} is {verb} from the top of a {d_y} m high cliff at {v_r} m/s at a \
             {theta_s} degree angle. It lands {d_x} m from the base of the cliff. How far back \
             from the cliff's edge was it {verb}, and how long after launch was it back at \
             the height of the cliff?"
        ),
        vec![(shot.x_back as f64, "meters"), (shot.t_level as f64, "seconds")],
    )
}

/// Launched from the ground, landing on top of a cliff.
#[derive(Debug, Clone, Copy)]
pub(crate) struct LowToHigh {
    pub launch: Launch,
    /// First time the projectile reaches cliff height.
    pub t_1: i64,
    /// Landing time, on the way down.
    pub t_2: i64,
    pub d_y: i64,
    /// Horizontal distance from launch to the cliff face.
    pub d_x: i64,
    /// Landing distance past the cliff edge.
    pub x_back: i64,
    pub v_yf: i64,
}

impl LowToHigh {
    pub fn landing_speed(&self) -> f64 {
        ((self.launch.v_x.pow(2) + self.v_yf.pow(2)) as f64).sqrt()
    }

    /// Landing angle below the horizontal.
    pub fn landing_angle(&self) -> f64 {
        angle_deg(self.launch.v_x as f64, self.v_yf as f64).abs()
    }
}

/// With `s = t₁ + t₂` odd, `v_y = 5s`, `v_x = (s² − 25)/2` and
/// `v = v_x + 25` form an exact Pythagorean triple.
pub(crate) fn low_to_high_numbers(difficulty: Difficulty, rng: &mut dyn RngCore) -> LowToHigh {
    let range = difficulty.range();
    let t_1 = rng.gen_range(1..=(range / 2).max(1));
    let k = rng.gen_range(1..=(range / 5).max(1));
    let t_2 = t_1 + 5 * (2 * k - 1);
    let s = t_1 + t_2;
    let v_y = 5 * s;
    let v_x = (s * s - 25) / 2;
    let v_r = v_x + 25;
    let t_x = if difficulty == Difficulty::Hard {
        rng.gen_range(t_1..t_2)
    } else {
        t_2
    };
    LowToHigh {
        launch: Launch {
            v_x,
            v_y,
            v_r,
            theta: angle_deg(v_x as f64, v_y as f64),
        },
        t_1,
        t_2,
        d_y: 5 * t_1 * t_2,
        d_x: v_x * t_x,
        x_back: v_x * (t_2 - t_x),
        v_yf: 5 * (t_1 - t_2),
    }
}

fn low_to_high_question(difficulty: Difficulty, rng: &mut dyn RngCore) -> (String, Answers) {
    let shot = low_to_high_numbers(difficulty, rng);
    let Launch { v_r, theta, .. } = shot.launch;
    let LowToHigh { d_y, d_x, t_1, x_back, .. } = shot;
    let noun = random_noun(rng);
    let verb = random_projectile_verb(rng);
    let theta_s = fmt_num(theta);

    if difficulty == Difficulty::Easy {
        return if rng.gen_bool(0.5) {
            (
                format!(
                    "A {noun} is {verb} at {v_r} m/s at a {theta_s} degree angle so that it \
                     lands on top of a {d_y} m high cliff. It just barely lands on the edge of \
                     the cliff. How far from the base of the cliff was it {verb}, and at what \
                     angle below the horizontal does it land?"
                ),
                vec![(d_x as f64, "meters"), (shot.landing_angle(), "degrees")],
            )
        } else {
            (
                format!(
                    "A {noun} is {verb} at {v_r} m/s at a {theta_s} degree angle, {d_x} m from \
                     the base of a cliff. It just barely lands on the cliff's edge. How high is \
                     the cliff, and how fast is the {noun} moving when it lands?"
                ),
                vec![(d_y as f64, "meters"), (shot.landing_speed(), "m/s")],
            )
        };
    }

    (
        format!(
            "A {noun} is {verb} at {v_r} m/s toward a {d_y} m high cliff, and first reaches \
             the height of the cliff top after {t_1} seconds. It lands on top, {x_back} m from \
             the edge. What angle was it launched at, and how far from the base of the cliff \
             was it {verb}?"
        ),
        vec![(theta, "degrees"), (d_x as f64, "meters")],
    )
}
