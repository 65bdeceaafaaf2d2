//! Weighted scoring of stage choices.
//!
//! A stage score is the weight of the correct picks minus penalties for
//! incorrect picks and for expected answers that were left out:
//!
//! `raw = Σw(correct) − incorrect_mult·Σw(incorrect) − missing_mult·Σw(missing)`
//!
//! Unless negative scores are allowed, the result is clamped at 0.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::choice::Choice;
use crate::model::{Expected, QuizOption};
use crate::traits::{ChoiceTransformer, ScoreEvaluator, Weights};

/// Fully resolved scoring settings of one stage.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreSettings {
    pub allow_negative: bool,
    pub missing_answer_mult: f64,
    pub incorrect_answer_mult: f64,
}

impl Default for ScoreSettings {
    fn default() -> Self {
        Self {
            allow_negative: false,
            missing_answer_mult: 1.0,
            incorrect_answer_mult: 1.0,
        }
    }
}

/// Every item weighs 1: pure answer counting.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnitWeights;

impl Weights for UnitWeights {
    fn weight_of(&self, _key: &str) -> f64 {
        1.0
    }
}

/// Option weights keyed by transformed option value. Unknown keys weigh 1.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OptionWeights {
    by_key: HashMap<String, f64>,
}

impl OptionWeights {
    pub fn from_options(options: &[QuizOption], transformer: &dyn ChoiceTransformer) -> Self {
        let by_key = options
            .iter()
            .map(|o| (transformer.transform(&o.value), o.weight()))
            .collect();
        Self { by_key }
    }
}

impl Weights for OptionWeights {
    fn weight_of(&self, key: &str) -> f64 {
        self.by_key.get(key).copied().unwrap_or(1.0)
    }
}

/// Scores `choice` against `expected`.
pub fn score(
    settings: &ScoreSettings,
    choice: &Choice,
    expected: &Expected,
    transformer: &dyn ChoiceTransformer,
    weights: &dyn Weights,
) -> f64 {
    let keys: Vec<String> = choice.iter().map(|v| transformer.transform(v)).collect();

    let (correct, incorrect): (Vec<&String>, Vec<&String>) =
        keys.iter().partition(|key| expected.contains(key));

    let missing = expected.values().iter().filter(|e| !keys.contains(e));

    let raw = total_weight(correct, weights)
        - settings.incorrect_answer_mult * total_weight(incorrect, weights)
        - settings.missing_answer_mult * total_weight(missing, weights);

    if settings.allow_negative {
        raw
    } else {
        raw.max(0.0)
    }
}

fn total_weight<'a>(keys: impl IntoIterator<Item = &'a String>, weights: &dyn Weights) -> f64 {
    keys.into_iter().map(|key| weights.weight_of(key)).sum()
}

/// Highest score a stage can yield: the total weight of its expected answers.
pub fn max_score(expected: &Expected, weights: &dyn Weights) -> f64 {
    expected.values().iter().map(|e| weights.weight_of(e)).sum()
}

/// The default [`ScoreEvaluator`], delegating to [`score`].
#[derive(Debug, Clone, Copy, Default)]
pub struct WeightedScoreEvaluator;

impl ScoreEvaluator for WeightedScoreEvaluator {
    fn evaluate(
        &self,
        settings: &ScoreSettings,
        choice: &Choice,
        expected: &Expected,
        transformer: &dyn ChoiceTransformer,
        weights: &dyn Weights,
    ) -> f64 {
        score(settings, choice, expected, transformer, weights)
    }
}

/// Score of a single stage, "`score` out of `max_score`".
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StageScore {
    pub score: f64,
    pub max_score: f64,
}

impl StageScore {
    pub fn new(score: f64, max_score: f64) -> Self {
        Self { score, max_score }
    }

    /// Rescales the score so that the maximum becomes `target`.
    ///
    /// A stage whose maximum is 0 remaps to a score of 0.
    pub fn remapped(self, target: Option<f64>) -> Self {
        match target {
            None => self,
            Some(target) if self.max_score == 0.0 => Self::new(0.0, target),
            Some(target) => Self::new(self.score / self.max_score * target, target),
        }
    }
}

/// Per-stage and total scores of a finished quiz.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuizScore {
    pub stages: Vec<StageScore>,
    pub score: f64,
    pub max_score: f64,
}

impl QuizScore {
    pub fn from_stages(stages: Vec<StageScore>) -> Self {
        let score = stages.iter().map(|s| s.score).sum();
        let max_score = stages.iter().map(|s| s.max_score).sum();
        Self {
            stages,
            score,
            max_score,
        }
    }

    /// Fraction of the maximum that was reached, 0 for an empty quiz.
    pub fn ratio(&self) -> f64 {
        if self.max_score == 0.0 {
            0.0
        } else {
            self.score / self.max_score
        }
    }
}
