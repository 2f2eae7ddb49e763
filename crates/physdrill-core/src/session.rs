//! Interactive practice state: the current selection, the current problem,
//! and the learner's running performance.

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::catalog::Catalog;
use crate::error::DrillError;
use crate::grading::{grade_input, Tolerance, Verdict};
use crate::model::{Difficulty, Problem, Topic};
use crate::performance::Performance;

/// What the learner asked to practice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    pub topic: Topic,
    pub kind: String,
    pub difficulty: Difficulty,
}

pub struct PracticeSession {
    catalog: Catalog,
    rng: StdRng,
    tolerance: Tolerance,
    selection: Selection,
    problem: Problem,
    question_id: u64,
    submitted: bool,
    performance: Performance,
}

impl PracticeSession {
    /// Start a session and generate its first problem. `kind` defaults to
    /// the topic's first kind; `seed` makes the session reproducible.
    pub fn new(
        catalog: Catalog,
        topic: Topic,
        kind: Option<&str>,
        difficulty: Difficulty,
        tolerance: Tolerance,
        seed: Option<u64>,
    ) -> Result<Self, DrillError> {
        let mut rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let kind = match kind {
            Some(k) => k.to_string(),
            None => catalog.get(topic)?.default_kind().to_string(),
        };
        let problem = catalog.generate(topic, Some(kind.as_str()), difficulty, &mut rng)?;
        Ok(Self {
            catalog,
            rng,
            tolerance,
            selection: Selection {
                topic,
                kind,
                difficulty,
            },
            problem,
            question_id: 1,
            submitted: false,
            performance: Performance::new(),
        })
    }

    pub fn problem(&self) -> &Problem {
        &self.problem
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Increments every time a new problem is drawn.
    pub fn question_id(&self) -> u64 {
        self.question_id
    }

    /// Whether the current problem already counted toward performance.
    pub fn is_submitted(&self) -> bool {
        self.submitted
    }

    pub fn performance(&self) -> &Performance {
        &self.performance
    }

    pub fn reset_performance(&mut self) {
        self.performance.reset();
    }

    /// Draw a new problem for the current selection.
    pub fn next_problem(&mut self) -> Result<&Problem, DrillError> {
        let Selection {
            topic,
            kind,
            difficulty,
        } = &self.selection;
        self.problem = self
            .catalog
            .generate(*topic, Some(kind.as_str()), *difficulty, &mut self.rng)?;
        self.question_id += 1;
        self.submitted = false;
        Ok(&self.problem)
    }

    /// Change topic, kind or difficulty and draw a problem for it. The
    /// previous selection is kept when the new one is rejected.
    pub fn select(
        &mut self,
        topic: Topic,
        kind: Option<&str>,
        difficulty: Difficulty,
    ) -> Result<&Problem, DrillError> {
        let generator = self.catalog.get(topic)?;
        let kind = kind.unwrap_or_else(|| generator.default_kind()).to_string();
        generator.ensure_supported(&kind, difficulty)?;
        self.selection = Selection {
            topic,
            kind,
            difficulty,
        };
        self.next_problem()
    }

    /// Grade raw answers for the current problem. Only the first graded
    /// submission of a problem counts toward performance; input errors
    /// never do.
    pub fn submit(&mut self, raw: &[&str]) -> Result<Verdict, DrillError> {
        let verdict = grade_input(&self.problem, raw, &self.tolerance)?;
        if !self.submitted {
            self.performance.record(
                self.problem.topic,
                &self.problem.kind,
                self.problem.difficulty,
                verdict.correct,
            );
            self.submitted = true;
        } else {
            tracing::debug!(
                question_id = self.question_id,
                "re-submission not counted toward performance"
            );
        }
        Ok(verdict)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ExpectedAnswer;

    fn session(topic: Topic, kind: &str) -> PracticeSession {
        PracticeSession::new(
            Catalog::default(),
            topic,
            Some(kind),
            Difficulty::Easy,
            Tolerance::default(),
            Some(11),
        )
        .unwrap()
    }

    fn correct_input(problem: &Problem) -> Vec<String> {
        problem
            .answers
            .iter()
            .map(|a| match a {
                ExpectedAnswer::Numeric { value, .. } => value.to_string(),
                ExpectedAnswer::Text { value, .. } => value.clone(),
                ExpectedAnswer::Choice { index, .. } => (index + 1).to_string(),
            })
            .collect()
    }

    #[test]
    fn only_first_submission_counts() {
        let mut s = session(Topic::Forces, "force");
        let verdict = s.submit(&["-1"]).unwrap();
        assert!(!verdict.correct);
        assert!(s.is_submitted());

        let answers = correct_input(s.problem());
        let refs: Vec<&str> = answers.iter().map(String::as_str).collect();
        let verdict = s.submit(&refs).unwrap();
        assert!(verdict.correct);

        let total = s.performance().total();
        assert_eq!((total.attempts, total.correct), (1, 0));
    }

    #[test]
    fn input_errors_leave_the_question_open() {
        let mut s = session(Topic::Forces, "acceleration");
        assert_eq!(s.submit(&[""]), Err(DrillError::MissingAnswer));
        assert!(!s.is_submitted());
        assert!(s.performance().is_empty());
    }

    #[test]
    fn new_question_clears_the_submitted_flag() {
        let mut s = session(Topic::MotionGraphs, "position-time");
        let answers = correct_input(s.problem());
        let refs: Vec<&str> = answers.iter().map(String::as_str).collect();
        assert!(s.submit(&refs).unwrap().correct);
        assert_eq!(s.question_id(), 1);

        s.next_problem().unwrap();
        assert_eq!(s.question_id(), 2);
        assert!(!s.is_submitted());
        assert_eq!(
            s.performance()
                .cell_display(Topic::MotionGraphs, "position-time", Difficulty::Easy),
            "1/1 (100.0%)"
        );
    }

    #[test]
    fn select_changes_topic_or_keeps_previous() {
        let mut s = session(Topic::Energy, "work");
        s.select(Topic::Compounds, Some("covalent"), Difficulty::Medium)
            .unwrap();
        assert_eq!(s.problem().topic, Topic::Compounds);
        assert_eq!(s.selection().kind, "covalent");
        assert_eq!(s.question_id(), 2);

        let err = s
            .select(Topic::Projectile, None, Difficulty::Medium)
            .unwrap_err();
        assert!(matches!(err, DrillError::UnsupportedDifficulty { .. }));
        assert_eq!(s.selection().topic, Topic::Compounds);
        assert_eq!(s.question_id(), 2);
    }

    #[test]
    fn reset_clears_performance() {
        let mut s = session(Topic::Forces, "force");
        s.submit(&["0"]).unwrap();
        s.reset_performance();
        assert!(s.performance().is_empty());
    }

    #[test]
    fn switching_topics_keeps_shared_kind_names_apart() {
        let mut s = session(Topic::Collision, "elastic");
        assert!(!s.submit(&["-987654"]).unwrap().correct);

        s.select(Topic::Energy, Some("elastic"), Difficulty::Easy)
            .unwrap();
        let answers = correct_input(s.problem());
        let refs: Vec<&str> = answers.iter().map(String::as_str).collect();
        assert!(s.submit(&refs).unwrap().correct);

        let perf = s.performance();
        assert_eq!(
            perf.cell_display(Topic::Collision, "elastic", Difficulty::Easy),
            "0/1 (0.0%)"
        );
        assert_eq!(
            perf.cell_display(Topic::Energy, "elastic", Difficulty::Easy),
            "1/1 (100.0%)"
        );
        assert_eq!(perf.total().attempts, 2);
    }
}
