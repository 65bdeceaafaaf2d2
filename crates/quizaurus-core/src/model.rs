//! Declarative quiz definition types.
//!
//! A [`QuizSetup`] is what the embedding application hands to the quiz
//! controller. Optional fields are resolved later, stage first, then quiz,
//! then the built-in default (see [`crate::resolve`]).

use serde::{Deserialize, Serialize};

use crate::traits::LogicSetup;

/// Complete description of a quiz.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct QuizSetup {
    /// Optional heading shown above every page.
    #[serde(default)]
    pub title: Option<String>,
    /// Stages in display order.
    #[serde(default)]
    pub stages: Vec<Stage>,
    /// How many stages to display per page (default: 1).
    #[serde(default)]
    pub stages_per_page: Option<usize>,
    /// Whether the user may advance with unanswered stages (default: true).
    #[serde(default)]
    pub allow_incomplete_answers: Option<bool>,
    /// Reveal correctness as soon as an option is selected (default: false).
    #[serde(default)]
    pub instant_feedback: Option<bool>,
    /// Quiz-wide scoring settings.
    #[serde(default)]
    pub score: ScoreSetup,
    /// Navigation button labels.
    #[serde(default)]
    pub navigation: NavigationLabels,
    /// Quiz-wide strategies. Not part of the declarative format.
    #[serde(skip)]
    pub logic: LogicSetup,
}

/// A single question of the quiz.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Stage {
    /// Title content passed to the renderer.
    pub title: String,
    /// Optional description shown below the title.
    #[serde(default)]
    pub description: Option<String>,
    /// Options presented to the user.
    #[serde(default)]
    pub options: Vec<QuizOption>,
    /// Value(s) a choice is compared against, after transformation.
    pub correct_answer: Expected,
    /// How many options the user may select (default: 1, valid range `[1, ∞)`).
    #[serde(default)]
    pub max_answers: Option<usize>,
    /// How many options must be selected before the page can be left
    /// (default: 1). Only enforced when incomplete answers are disallowed.
    #[serde(default)]
    pub required_answers: Option<usize>,
    /// Rescale this stage's score so that its maximum equals this value.
    #[serde(default)]
    pub remap_score: Option<f64>,
    /// Stage-level override of [`QuizSetup::instant_feedback`].
    #[serde(default)]
    pub instant_feedback: Option<bool>,
    /// Stage-level scoring overrides.
    #[serde(default)]
    pub score: ScoreSetup,
    /// Stage-level strategies.
    #[serde(skip)]
    pub logic: LogicSetup,
}

impl Stage {
    /// Creates a stage with the given title and expected answer and every
    /// optional setting left unresolved.
    pub fn new(title: impl Into<String>, correct_answer: impl Into<Expected>) -> Self {
        Self {
            title: title.into(),
            description: None,
            options: Vec::new(),
            correct_answer: correct_answer.into(),
            max_answers: None,
            required_answers: None,
            remap_score: None,
            instant_feedback: None,
            score: ScoreSetup::default(),
            logic: LogicSetup::default(),
        }
    }

    /// Appends an option with the default weight.
    pub fn with_option(mut self, value: impl Into<String>, content: impl Into<String>) -> Self {
        self.options.push(QuizOption::new(value, content));
        self
    }

    /// Appends an option with an explicit score weight.
    pub fn with_weighted_option(
        mut self,
        value: impl Into<String>,
        content: impl Into<String>,
        score: f64,
    ) -> Self {
        let mut option = QuizOption::new(value, content);
        option.score = Some(score);
        self.options.push(option);
        self
    }

    /// Returns the option with the given value, if any.
    pub fn option(&self, value: &str) -> Option<&QuizOption> {
        self.options.iter().find(|o| o.value == value)
    }
}

/// An answer the user can pick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuizOption {
    /// Identifier unique within the stage.
    pub value: String,
    /// Display content passed to the renderer untouched.
    #[serde(default)]
    pub content: String,
    /// Weight used by the scoring engine (default: 1).
    #[serde(default)]
    pub score: Option<f64>,
}

impl QuizOption {
    pub fn new(value: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            content: content.into(),
            score: None,
        }
    }

    /// The option's scoring weight, defaulting to 1.
    pub fn weight(&self) -> f64 {
        self.score.unwrap_or(1.0)
    }
}

/// The correct answer of a stage: one value or a set of values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Expected {
    One(String),
    Many(Vec<String>),
}

impl Expected {
    /// The expected values as a slice; a single value becomes a one-element set.
    pub fn values(&self) -> &[String] {
        match self {
            Expected::One(value) => std::slice::from_ref(value),
            Expected::Many(values) => values,
        }
    }

    /// Whether `key` is one of the expected values.
    pub fn contains(&self, key: &str) -> bool {
        match self {
            Expected::One(value) => value == key,
            Expected::Many(values) => values.iter().any(|v| v == key),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.values().is_empty()
    }
}

impl From<&str> for Expected {
    fn from(value: &str) -> Self {
        Expected::One(value.to_string())
    }
}

impl From<String> for Expected {
    fn from(value: String) -> Self {
        Expected::One(value)
    }
}

impl From<Vec<String>> for Expected {
    fn from(values: Vec<String>) -> Self {
        Expected::Many(values)
    }
}

impl From<Vec<&str>> for Expected {
    fn from(values: Vec<&str>) -> Self {
        Expected::Many(values.into_iter().map(str::to_string).collect())
    }
}

impl<const N: usize> From<[&str; N]> for Expected {
    fn from(values: [&str; N]) -> Self {
        Expected::Many(values.iter().map(|v| v.to_string()).collect())
    }
}

/// Scoring settings. Every field is optional so that stage-level values can
/// overlay quiz-level ones.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScoreSetup {
    /// Keep negative stage scores instead of clamping them at 0 (default: false).
    #[serde(default)]
    pub allow_negative: Option<bool>,
    /// Multiplier applied to the weight of expected answers left unselected (default: 1).
    #[serde(default)]
    pub missing_answer_mult: Option<f64>,
    /// Multiplier applied to the weight of selected incorrect answers (default: 1).
    #[serde(default)]
    pub incorrect_answer_mult: Option<f64>,
}

/// Labels for the navigation affordances.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NavigationLabels {
    #[serde(default)]
    pub previous: Option<String>,
    #[serde(default)]
    pub next: Option<String>,
    /// Label of the button that leaves the last content page.
    #[serde(default)]
    pub results: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expected_single_is_one_element_set() {
        let expected = Expected::from("2");
        assert_eq!(expected.values(), &["2".to_string()]);
        assert!(expected.contains("2"));
        assert!(!expected.contains("3"));
    }

    #[test]
    fn expected_deserializes_string_or_list() {
        let one: Expected = serde_json::from_str(r#""a""#).unwrap();
        assert_eq!(one, Expected::One("a".into()));

        let many: Expected = serde_json::from_str(r#"["a", "b"]"#).unwrap();
        assert_eq!(many, Expected::from(["a", "b"]));
        assert!(many.contains("b"));
    }

    #[test]
    fn option_weight_defaults_to_one() {
        let plain = QuizOption::new("a", "Alpha");
        assert_eq!(plain.weight(), 1.0);

        let stage = Stage::new("Q", "a").with_weighted_option("b", "Beta", 3.0);
        assert_eq!(stage.option("b").map(QuizOption::weight), Some(3.0));
        assert!(stage.option("zzz").is_none());
    }

    #[test]
    fn stage_builder_leaves_settings_unresolved() {
        let stage = Stage::new("1. What is π approximately equal to?", "1")
            .with_option("1", "3.14")
            .with_option("2", "4.14");
        assert_eq!(stage.options.len(), 2);
        assert!(stage.max_answers.is_none());
        assert!(stage.required_answers.is_none());
        assert_eq!(stage.score, ScoreSetup::default());
    }
}
