//! Error types for problem generation and answer checking.

use thiserror::Error;

use crate::model::{Difficulty, Topic};

/// Errors raised while generating problems or grading submissions.
#[derive(Debug, Error, PartialEq)]
pub enum DrillError {
    /// The topic has no question templates for this difficulty.
    #[error("{topic} has no {difficulty} problems")]
    UnsupportedDifficulty { topic: Topic, difficulty: Difficulty },

    /// The problem kind is not offered by the topic.
    #[error("unknown {topic} problem kind: {kind}")]
    UnknownKind { topic: Topic, kind: String },

    /// No generator is registered for the topic.
    #[error("no generator registered for topic: {0}")]
    UnknownTopic(String),

    /// The learner submitted nothing.
    #[error("please enter an answer before submitting")]
    MissingAnswer,

    /// Too few or too many answers for the problem.
    #[error("expected {expected} answer(s), got {got}")]
    AnswerCountMismatch { expected: usize, got: usize },

    /// A numeric answer did not parse.
    #[error("not a number: {0}")]
    InvalidNumber(String),

    /// A multiple-choice answer named no option.
    #[error("'{input}' is not one of the {options} options")]
    InvalidChoice { input: String, options: usize },

    /// Parameter drawing could not satisfy the generator's constraints.
    #[error("could not satisfy generator constraints: {0}")]
    ConstraintUnsatisfied(String),

    /// The chosen elements, ions or charges do not make a compound.
    #[error("invalid compound: {0}")]
    InvalidCompound(String),
}

impl DrillError {
    /// Returns `true` if the error came from learner input rather than from
    /// the generator selection.
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            DrillError::MissingAnswer
                | DrillError::AnswerCountMismatch { .. }
                | DrillError::InvalidNumber(_)
                | DrillError::InvalidChoice { .. }
                | DrillError::InvalidCompound(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_selection() {
        let err = DrillError::UnsupportedDifficulty {
            topic: Topic::Collision,
            difficulty: Difficulty::Hard,
        };
        assert_eq!(err.to_string(), "collision has no hard problems");
        assert!(!err.is_input_error());
        assert!(DrillError::MissingAnswer.is_input_error());
    }
}
