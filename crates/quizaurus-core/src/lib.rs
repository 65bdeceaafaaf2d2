//! quizaurus-core: choice state, pagination and scoring for quizzes.
//!
//! This crate owns the quiz logic: toggling selections, validating them
//! against the expected answers, paging through stages and computing scores.
//! Rendering is left to the caller through [`render::QuizRenderer`].

pub mod choice;
pub mod error;
pub mod model;
pub mod pagination;
pub mod parser;
pub mod quiz;
pub mod render;
pub mod resolve;
pub mod scoring;
pub mod traits;

pub use choice::{toggle_choice, validate, Choice};
pub use error::QuizError;
pub use model::{Expected, NavigationLabels, QuizOption, QuizSetup, ScoreSetup, Stage};
pub use pagination::{PageState, PageTransition, StagePagination};
pub use quiz::Quiz;
pub use render::{NavigationView, OptionView, PageView, QuizRenderer, StageView};
pub use scoring::{score, QuizScore, ScoreSettings, StageScore};
pub use traits::{ChoiceTransformer, ChoiceValidator, LogicSetup, ScoreEvaluator, Weights};
