//! Core data model types for physdrill.
//!
//! These are the types every generator produces and every consumer (the
//! practice session, worksheets, reports) reads.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Difficulty tier selected by the learner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
    ExtraHard,
}

impl Difficulty {
    /// Every tier, in increasing order.
    pub const ALL: [Difficulty; 4] = [
        Difficulty::Easy,
        Difficulty::Medium,
        Difficulty::Hard,
        Difficulty::ExtraHard,
    ];

    /// Upper bound for random draws in the kinematics, energy and force
    /// generators.
    pub fn range(self) -> i64 {
        match self {
            Difficulty::Easy => 5,
            Difficulty::Medium => 10,
            Difficulty::Hard | Difficulty::ExtraHard => 20,
        }
    }

    /// Upper bound for random draws in the collision generator.
    pub fn base_range(self) -> i64 {
        match self {
            Difficulty::Easy => 10,
            Difficulty::Medium => 20,
            Difficulty::Hard | Difficulty::ExtraHard => 50,
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Difficulty::Easy => write!(f, "easy"),
            Difficulty::Medium => write!(f, "medium"),
            Difficulty::Hard => write!(f, "hard"),
            Difficulty::ExtraHard => write!(f, "extra-hard"),
        }
    }
}

impl FromStr for Difficulty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "easy" | "e" => Ok(Difficulty::Easy),
            "medium" | "m" => Ok(Difficulty::Medium),
            "hard" | "h" => Ok(Difficulty::Hard),
            "extra-hard" | "extra_hard" | "extrahard" | "xh" => Ok(Difficulty::ExtraHard),
            other => Err(format!("unknown difficulty: {other}")),
        }
    }
}

/// A family of practice problems.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Topic {
    LinearMotion,
    Projectile,
    Collision,
    Energy,
    Forces,
    Algebra,
    Compounds,
    MotionGraphs,
}

impl Topic {
    pub const ALL: [Topic; 8] = [
        Topic::LinearMotion,
        Topic::Projectile,
        Topic::Collision,
        Topic::Energy,
        Topic::Forces,
        Topic::Algebra,
        Topic::Compounds,
        Topic::MotionGraphs,
    ];

    /// Human-readable title used in headings.
    pub fn title(self) -> &'static str {
        match self {
            Topic::LinearMotion => "Linear Motion",
            Topic::Projectile => "Projectile Motion",
            Topic::Collision => "Collisions",
            Topic::Energy => "Energy",
            Topic::Forces => "Forces",
            Topic::Algebra => "Algebraic Manipulation",
            Topic::Compounds => "Compound Naming",
            Topic::MotionGraphs => "Motion Graphs",
        }
    }
}

impl fmt::Display for Topic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Topic::LinearMotion => write!(f, "linear-motion"),
            Topic::Projectile => write!(f, "projectile"),
            Topic::Collision => write!(f, "collision"),
            Topic::Energy => write!(f, "energy"),
            Topic::Forces => write!(f, "forces"),
            Topic::Algebra => write!(f, "algebra"),
            Topic::Compounds => write!(f, "compounds"),
            Topic::MotionGraphs => write!(f, "motion-graphs"),
        }
    }
}

impl FromStr for Topic {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('_', "-").as_str() {
            "linear-motion" | "linear" | "kinematics" | "1d" => Ok(Topic::LinearMotion),
            "projectile" | "projectiles" => Ok(Topic::Projectile),
            "collision" | "collisions" | "momentum" => Ok(Topic::Collision),
            "energy" => Ok(Topic::Energy),
            "forces" | "force" | "newton" => Ok(Topic::Forces),
            "algebra" => Ok(Topic::Algebra),
            "compounds" | "compound" | "naming" | "chemistry" => Ok(Topic::Compounds),
            "motion-graphs" | "graphs" | "graph" => Ok(Topic::MotionGraphs),
            other => Err(format!("unknown topic: {other}")),
        }
    }
}

/// One hidden quantity the learner has to supply.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ExpectedAnswer {
    /// A number checked against a tolerance.
    Numeric { value: f64, unit: String },
    /// A name compared after normalization.
    Text { value: String, label: String },
    /// A selection from a fixed list of options.
    Choice {
        label: String,
        options: Vec<String>,
        index: usize,
    },
}

impl ExpectedAnswer {
    pub fn numeric(value: f64, unit: impl Into<String>) -> Self {
        ExpectedAnswer::Numeric {
            value,
            unit: unit.into(),
        }
    }

    /// Prompt label shown next to the input for this answer.
    pub fn label(&self) -> &str {
        match self {
            ExpectedAnswer::Numeric { unit, .. } => unit,
            ExpectedAnswer::Text { label, .. } => label,
            ExpectedAnswer::Choice { label, .. } => label,
        }
    }

    /// The correct answer formatted for feedback and answer keys.
    pub fn display_value(&self) -> String {
        match self {
            ExpectedAnswer::Numeric { value, unit } => format!("{value:.2} {unit}"),
            ExpectedAnswer::Text { value, .. } => value.clone(),
            ExpectedAnswer::Choice { options, index, .. } => {
                let option = options.get(*index).map(String::as_str).unwrap_or("?");
                format!("{}) {option}", choice_letter(*index))
            }
        }
    }
}

/// Letter label for a zero-based option index ("A", "B", ...).
pub fn choice_letter(index: usize) -> char {
    char::from(b'A' + (index % 26) as u8)
}

/// A plotted curve attached to a problem.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chart {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub points: Vec<(f64, f64)>,
}

impl Chart {
    /// Render the curve as a character plot of `width` x `height` cells.
    ///
    /// The y axis is scaled to the sampled range; a horizontal rule marks
    /// zero when it falls inside that range. A chart without points
    /// renders as its title alone.
    pub fn render_ascii(&self, width: usize, height: usize) -> String {
        if self.points.is_empty() {
            return self.title.clone();
        }
        let width = width.max(8);
        let height = height.max(4);
        let mut grid = vec![vec![' '; width]; height];

        let (x_min, x_max) = bounds(self.points.iter().map(|p| p.0));
        let (mut y_min, mut y_max) = bounds(self.points.iter().map(|p| p.1));
        if (y_max - y_min).abs() < f64::EPSILON {
            y_min -= 1.0;
            y_max += 1.0;
        }

        let row_of = |y: f64| -> usize {
            let frac = (y - y_min) / (y_max - y_min);
            let row = ((1.0 - frac) * (height - 1) as f64).round() as usize;
            row.min(height - 1)
        };
        let col_of = |x: f64| -> usize {
            let span = (x_max - x_min).max(f64::EPSILON);
            let col = ((x - x_min) / span * (width - 1) as f64).round() as usize;
            col.min(width - 1)
        };

        if y_min < 0.0 && y_max > 0.0 {
            let zero = row_of(0.0);
            for cell in grid[zero].iter_mut() {
                *cell = '-';
            }
        }
        for &(x, y) in &self.points {
            grid[row_of(y)][col_of(x)] = '*';
        }

        let mut out = String::new();
        out.push_str(&format!("{}\n", self.title));
        out.push_str(&format!("{} ({y_max:.1} .. {y_min:.1})\n", self.y_label));
        for row in grid {
            out.push('|');
            out.extend(row);
            out.push('\n');
        }
        out.push('+');
        out.push_str(&"-".repeat(width));
        out.push('\n');
        out.push_str(&format!("{} ({x_min:.1} .. {x_max:.1})", self.x_label));
        out
    }
}

fn bounds(values: impl Iterator<Item = f64>) -> (f64, f64) {
    values.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
        (lo.min(v), hi.max(v))
    })
}

/// A single generated practice problem.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Problem {
    /// Unique identifier for this problem.
    pub id: Uuid,
    /// Topic the problem belongs to.
    pub topic: Topic,
    /// Problem kind within the topic (e.g. "no-time").
    pub kind: String,
    /// Difficulty the problem was generated at.
    pub difficulty: Difficulty,
    /// The natural-language question.
    pub question: String,
    /// Hidden quantities, in the order the learner should supply them.
    pub answers: Vec<ExpectedAnswer>,
    /// Graphs the question refers to.
    #[serde(default)]
    pub charts: Vec<Chart>,
    /// LaTeX rendering of a formula or equation shown with the question.
    #[serde(default)]
    pub latex: Option<String>,
    /// Worked solution, revealed after a correct answer.
    #[serde(default)]
    pub solution: Option<String>,
}

impl Problem {
    pub fn new(
        topic: Topic,
        kind: impl Into<String>,
        difficulty: Difficulty,
        question: impl Into<String>,
        answers: Vec<ExpectedAnswer>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            topic,
            kind: kind.into(),
            difficulty,
            question: question.into(),
            answers,
            charts: Vec::new(),
            latex: None,
            solution: None,
        }
    }

    pub fn with_charts(mut self, charts: Vec<Chart>) -> Self {
        self.charts = charts;
        self
    }

    pub fn with_latex(mut self, latex: impl Into<String>) -> Self {
        self.latex = Some(latex.into());
        self
    }

    pub fn with_solution(mut self, solution: impl Into<String>) -> Self {
        self.solution = Some(solution.into());
        self
    }
}
