//! Reading direction and state of motion off position-time and
//! velocity-time graphs.

use rand::seq::SliceRandom;
use rand::{Rng, RngCore};

use crate::error::DrillError;
use crate::model::{choice_letter, Chart, Difficulty, ExpectedAnswer, Problem, Topic};
use crate::traits::ProblemGenerator;

const KINDS: &[&str] = &["position-time", "velocity-time", "match"];

const DIFFICULTIES: &[Difficulty] = &[Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

pub const DIRECTIONS: [&str; 2] = ["Forward", "Backward"];

pub const STATES: [&str; 3] = [
    "Constant Velocity",
    "Accelerating (positive)",
    "Accelerating (negative)",
];

/// Samples per second along the time axis.
const SAMPLES_PER_SECOND: usize = 4;
const DURATION: f64 = 5.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GraphKind {
    PositionTime,
    VelocityTime,
}

impl GraphKind {
    pub fn title(self) -> &'static str {
        match self {
            GraphKind::PositionTime => "Position-Time Graph",
            GraphKind::VelocityTime => "Velocity-Time Graph",
        }
    }

    fn y_label(self) -> &'static str {
        match self {
            GraphKind::PositionTime => "Position (m)",
            GraphKind::VelocityTime => "Velocity (m/s)",
        }
    }

    fn other(self) -> GraphKind {
        match self {
            GraphKind::PositionTime => GraphKind::VelocityTime,
            GraphKind::VelocityTime => GraphKind::PositionTime,
        }
    }
}

/// One of the four motions every graph kind can show. The index into
/// [`DIRECTIONS`] and [`STATES`] is fixed per motion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Motion {
    ConstantForward,
    ConstantBackward,
    SpeedingForward,
    SpeedingBackward,
}

impl Motion {
    pub const ALL: [Motion; 4] = [
        Motion::ConstantForward,
        Motion::ConstantBackward,
        Motion::SpeedingForward,
        Motion::SpeedingBackward,
    ];

    pub fn direction(self) -> usize {
        match self {
            Motion::ConstantForward | Motion::SpeedingForward => 0,
            Motion::ConstantBackward | Motion::SpeedingBackward => 1,
        }
    }

    pub fn state(self) -> usize {
        match self {
            Motion::ConstantForward | Motion::ConstantBackward => 0,
            Motion::SpeedingForward => 1,
            Motion::SpeedingBackward => 2,
        }
    }

    /// The curve plotted for this motion on a graph of `kind`.
    pub fn value_at(self, kind: GraphKind, t: f64) -> f64 {
        match (kind, self) {
            (GraphKind::PositionTime, Motion::ConstantForward) => 2.0 * t + 1.0,
            (GraphKind::PositionTime, Motion::ConstantBackward) => -1.5 * t + 5.0,
            (GraphKind::PositionTime, Motion::SpeedingForward) => t * t,
            (GraphKind::PositionTime, Motion::SpeedingBackward) => -0.5 * t * t + 5.0,
            (GraphKind::VelocityTime, Motion::ConstantForward) => 2.0,
            (GraphKind::VelocityTime, Motion::ConstantBackward) => -1.5,
            (GraphKind::VelocityTime, Motion::SpeedingForward) => t,
            (GraphKind::VelocityTime, Motion::SpeedingBackward) => -0.5 * t - 1.0,
        }
    }

    pub fn chart(self, kind: GraphKind, title: impl Into<String>) -> Chart {
        let steps = (DURATION as usize) * SAMPLES_PER_SECOND;
        let points = (0..=steps)
            .map(|i| {
                let t = i as f64 / SAMPLES_PER_SECOND as f64;
                (t, self.value_at(kind, t))
            })
            .collect();
        Chart {
            title: title.into(),
            x_label: "Time (s)".to_string(),
            y_label: kind.y_label().to_string(),
            points,
        }
    }
}

fn choice(label: &str, options: &[&str], index: usize) -> ExpectedAnswer {
    ExpectedAnswer::Choice {
        label: label.to_string(),
        options: options.iter().map(|o| o.to_string()).collect(),
        index,
    }
}

fn pick_motion(rng: &mut dyn RngCore) -> Motion {
    Motion::ALL[rng.gen_range(0..Motion::ALL.len())]
}

fn read_graph(kind: GraphKind, rng: &mut dyn RngCore) -> (String, Vec<ExpectedAnswer>, Vec<Chart>) {
    let motion = pick_motion(rng);
    (
        format!(
            "Study the {} below. What is the direction of motion, and what is the state of \
             motion?",
            kind.title().to_lowercase()
        ),
        vec![
            choice("Direction", &DIRECTIONS, motion.direction()),
            choice("State", &STATES, motion.state()),
        ],
        vec![motion.chart(kind, kind.title())],
    )
}

/// One graph of one kind and three of the other; exactly one option shows
/// the same motion.
fn match_graphs(rng: &mut dyn RngCore) -> (String, Vec<ExpectedAnswer>, Vec<Chart>) {
    let shown = if rng.gen_bool(0.5) {
        GraphKind::PositionTime
    } else {
        GraphKind::VelocityTime
    };
    let offered = shown.other();
    let motion = pick_motion(rng);

    let mut options: Vec<Motion> = Motion::ALL
        .iter()
        .copied()
        .filter(|m| *m != motion)
        .collect::<Vec<_>>()
        .choose_multiple(rng, 2)
        .copied()
        .collect();
    options.push(motion);
    options.shuffle(rng);
    let index = options.iter().position(|m| *m == motion).unwrap_or(0);

    let mut charts = vec![motion.chart(shown, shown.title())];
    let mut labels = Vec::with_capacity(options.len());
    for (i, m) in options.iter().enumerate() {
        let label = format!("Graph {}", choice_letter(i));
        charts.push(m.chart(offered, format!("{label}: {}", offered.title())));
        labels.push(label);
    }

    (
        format!(
            "The first graph is a {}. Which of the {}s that follow describes the same \
             motion?",
            shown.title().to_lowercase(),
            offered.title().to_lowercase()
        ),
        vec![ExpectedAnswer::Choice {
            label: "Matching graph".to_string(),
            options: labels,
            index,
        }],
        charts,
    )
}

#[derive(Debug, Default, Clone, Copy)]
pub struct MotionGraphs;

impl ProblemGenerator for MotionGraphs {
    fn topic(&self) -> Topic {
        Topic::MotionGraphs
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
        let (question, answers, charts) = match kind {
            "position-time" => read_graph(GraphKind::PositionTime, rng),
            "velocity-time" => read_graph(GraphKind::VelocityTime, rng),
            _ => match_graphs(rng),
        };
        Ok(
            Problem::new(Topic::MotionGraphs, kind, difficulty, question, answers)
                .with_charts(charts)
                .with_solution(
                    "On a position-time graph the slope is the velocity; on a velocity-time \
                     graph the sign of the value is the direction and the slope is the \
                     acceleration.",
                ),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    /// Direction and state read back from sampled points, the way a learner
    /// reads them off the plot.
    fn classify(kind: GraphKind, chart: &Chart) -> (usize, usize) {
        let velocity: Vec<f64> = match kind {
            GraphKind::VelocityTime => chart.points.iter().map(|p| p.1).collect(),
            GraphKind::PositionTime => chart
                .points
                .windows(2)
                .map(|w| (w[1].1 - w[0].1) / (w[1].0 - w[0].0))
                .collect(),
        };
        let direction = if velocity[velocity.len() - 1] > 0.0 { 0 } else { 1 };
        let change = velocity[velocity.len() - 1] - velocity[0];
        let state = if change.abs() < 1e-9 {
            0
        } else if change > 0.0 {
            1
        } else {
            2
        };
        (direction, state)
    }

    #[test]
    fn curves_agree_with_their_labels() {
        for kind in [GraphKind::PositionTime, GraphKind::VelocityTime] {
            for motion in Motion::ALL {
                let chart = motion.chart(kind, "t");
                assert_eq!(chart.points.len(), 21);
                assert_eq!(
                    classify(kind, &chart),
                    (motion.direction(), motion.state()),
                    "{motion:?} on {kind:?}"
                );
            }
        }
    }

    #[test]
    fn reading_problems_ask_direction_and_state() {
        let mut rng = StdRng::seed_from_u64(70);
        let problem = MotionGraphs
            .generate("velocity-time", Difficulty::Easy, &mut rng)
            .unwrap();
        assert_eq!(problem.answers.len(), 2);
        assert_eq!(problem.charts.len(), 1);
        assert_eq!(problem.answers[0].label(), "Direction");
    }

    #[test]
    fn match_has_exactly_one_matching_option() {
        let mut rng = StdRng::seed_from_u64(71);
        for _ in 0..100 {
            let problem = MotionGraphs
                .generate("match", Difficulty::Medium, &mut rng)
                .unwrap();
            assert_eq!(problem.charts.len(), 4);
            let shown_kind = if problem.charts[0].title.starts_with("Position") {
                GraphKind::PositionTime
            } else {
                GraphKind::VelocityTime
            };
            let target = classify(shown_kind, &problem.charts[0]);
            let matches: Vec<usize> = problem.charts[1..]
                .iter()
                .enumerate()
                .filter(|(_, c)| classify(shown_kind.other(), c) == target)
                .map(|(i, _)| i)
                .collect();
            let ExpectedAnswer::Choice { index, options, .. } = &problem.answers[0] else {
                panic!("expected a choice");
            };
            assert_eq!(options.len(), 3);
            assert_eq!(matches, vec![*index]);
        }
    }
}
