//! Quiz error types.
//!
//! Every variant is a programmer or configuration error raised synchronously
//! at the point of resolution. Navigation past either end of the quiz is
//! clamped and never produces an error.

use thiserror::Error;

/// Errors raised while building or driving a quiz.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum QuizError {
    /// Every candidate passed to [`pick`](crate::resolve::pick) was absent.
    #[error("setting '{setting}' could not be resolved: every candidate is absent, provide a built-in default as the last candidate")]
    Unresolved { setting: &'static str },

    /// A stage index outside the quiz was addressed.
    #[error("stage {index} is out of range (quiz has {count} stages)")]
    StageOutOfRange { index: usize, count: usize },

    /// A toggled value does not belong to the stage's options.
    #[error("stage {stage} has no option with value '{value}'")]
    UnknownOption { stage: usize, value: String },

    /// Two options of the same stage share a value.
    #[error("stage {stage} declares option value '{value}' more than once")]
    DuplicateOption { stage: usize, value: String },

    /// `required_answers` exceeds `max_answers`.
    #[error("stage {stage} requires {required} answers but accepts at most {max}")]
    RequiredExceedsMax {
        stage: usize,
        required: usize,
        max: usize,
    },
}

impl QuizError {
    /// Returns the stage index the error refers to, if any.
    pub fn stage(&self) -> Option<usize> {
        match self {
            QuizError::Unresolved { .. } => None,
            QuizError::StageOutOfRange { index, .. } => Some(*index),
            QuizError::UnknownOption { stage, .. }
            | QuizError::DuplicateOption { stage, .. }
            | QuizError::RequiredExceedsMax { stage, .. } => Some(*stage),
        }
    }
}
