//! Setting resolution: stage value, then quiz value, then built-in default.
//!
//! Everything a stage needs at runtime is resolved once, when the quiz is
//! built, into a [`ResolvedStage`]. Nothing downstream looks settings up again.

use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

use crate::choice::{Choice, DefaultValidator, IdentityTransformer};
use crate::error::QuizError;
use crate::model::{Expected, QuizSetup, ScoreSetup, Stage};
use crate::scoring::{max_score, OptionWeights, ScoreSettings, StageScore, WeightedScoreEvaluator};
use crate::traits::{ChoiceTransformer, ChoiceValidator, ScoreEvaluator};

pub const DEFAULT_PREVIOUS_LABEL: &str = "Previous";
pub const DEFAULT_NEXT_LABEL: &str = "Next";
pub const DEFAULT_RESULTS_LABEL: &str = "Show results";

/// Returns the first present candidate, left to right.
///
/// Callers put the built-in default last. If every candidate is absent the
/// configuration is incomplete and `setting` is reported back.
pub fn pick<T>(
    setting: &'static str,
    candidates: impl IntoIterator<Item = Option<T>>,
) -> Result<T, QuizError> {
    candidates
        .into_iter()
        .flatten()
        .next()
        .ok_or(QuizError::Unresolved { setting })
}

/// Overlays stage scoring settings on quiz settings on the defaults.
pub fn resolve_score_settings(
    stage: &ScoreSetup,
    quiz: &ScoreSetup,
) -> Result<ScoreSettings, QuizError> {
    let defaults = ScoreSettings::default();
    Ok(ScoreSettings {
        allow_negative: pick(
            "allow_negative",
            [
                stage.allow_negative,
                quiz.allow_negative,
                Some(defaults.allow_negative),
            ],
        )?,
        missing_answer_mult: pick(
            "missing_answer_mult",
            [
                stage.missing_answer_mult,
                quiz.missing_answer_mult,
                Some(defaults.missing_answer_mult),
            ],
        )?,
        incorrect_answer_mult: pick(
            "incorrect_answer_mult",
            [
                stage.incorrect_answer_mult,
                quiz.incorrect_answer_mult,
                Some(defaults.incorrect_answer_mult),
            ],
        )?,
    })
}

/// Quiz-wide settings.
#[derive(Debug, Clone, PartialEq)]
pub struct QuizSettings {
    pub stages_per_page: usize,
    pub allow_incomplete_answers: bool,
    pub previous_label: String,
    pub next_label: String,
    pub results_label: String,
}

impl QuizSettings {
    pub fn resolve(setup: &QuizSetup) -> Result<Self, QuizError> {
        let labels = &setup.navigation;
        Ok(Self {
            stages_per_page: pick("stages_per_page", [setup.stages_per_page, Some(1)])?.max(1),
            allow_incomplete_answers: pick(
                "allow_incomplete_answers",
                [setup.allow_incomplete_answers, Some(true)],
            )?,
            previous_label: pick(
                "navigation.previous",
                [labels.previous.clone(), Some(DEFAULT_PREVIOUS_LABEL.into())],
            )?,
            next_label: pick(
                "navigation.next",
                [labels.next.clone(), Some(DEFAULT_NEXT_LABEL.into())],
            )?,
            results_label: pick(
                "navigation.results",
                [labels.results.clone(), Some(DEFAULT_RESULTS_LABEL.into())],
            )?,
        })
    }
}

/// A stage with every setting and strategy resolved.
#[derive(Clone)]
pub struct ResolvedStage {
    pub index: usize,
    pub expected: Expected,
    pub max_answers: usize,
    pub required_answers: usize,
    pub remap_score: Option<f64>,
    pub instant_feedback: bool,
    pub score: ScoreSettings,
    pub transformer: Arc<dyn ChoiceTransformer>,
    pub validator: Arc<dyn ChoiceValidator>,
    pub evaluator: Arc<dyn ScoreEvaluator>,
    pub weights: OptionWeights,
}

impl ResolvedStage {
    /// Resolves `stage` (at position `index`) against the quiz-level setup.
    ///
    /// Fails when the stage breaks an invariant the choice model relies on:
    /// unique option values and `required_answers <= max_answers`.
    pub fn resolve(index: usize, stage: &Stage, quiz: &QuizSetup) -> Result<Self, QuizError> {
        let mut seen = HashSet::new();
        for option in &stage.options {
            if !seen.insert(option.value.as_str()) {
                return Err(QuizError::DuplicateOption {
                    stage: index,
                    value: option.value.clone(),
                });
            }
        }

        let max_answers = pick("max_answers", [stage.max_answers, Some(1)])?.max(1);
        let required_answers = pick("required_answers", [stage.required_answers, Some(1)])?;
        if required_answers > max_answers {
            return Err(QuizError::RequiredExceedsMax {
                stage: index,
                required: required_answers,
                max: max_answers,
            });
        }

        let transformer: Arc<dyn ChoiceTransformer> = pick(
            "transformer",
            [
                stage.logic.transformer.clone(),
                quiz.logic.transformer.clone(),
                Some(Arc::new(IdentityTransformer) as Arc<dyn ChoiceTransformer>),
            ],
        )?;
        let validator: Arc<dyn ChoiceValidator> = pick(
            "validator",
            [
                stage.logic.validator.clone(),
                quiz.logic.validator.clone(),
                Some(Arc::new(DefaultValidator) as Arc<dyn ChoiceValidator>),
            ],
        )?;
        let evaluator: Arc<dyn ScoreEvaluator> = pick(
            "evaluator",
            [
                stage.logic.evaluator.clone(),
                quiz.logic.evaluator.clone(),
                Some(Arc::new(WeightedScoreEvaluator) as Arc<dyn ScoreEvaluator>),
            ],
        )?;
        let weights = OptionWeights::from_options(&stage.options, transformer.as_ref());

        Ok(Self {
            index,
            expected: stage.correct_answer.clone(),
            max_answers,
            required_answers,
            remap_score: stage.remap_score,
            instant_feedback: pick(
                "instant_feedback",
                [stage.instant_feedback, quiz.instant_feedback, Some(false)],
            )?,
            score: resolve_score_settings(&stage.score, &quiz.score)?,
            transformer,
            validator,
            evaluator,
            weights,
        })
    }

    /// Selections can be withdrawn unless correctness is revealed instantly.
    pub fn can_deselect(&self) -> bool {
        !self.instant_feedback
    }

    pub fn is_complete(&self, choice: &Choice) -> bool {
        choice.len() >= self.required_answers
    }

    /// Whether a single option value is correct.
    pub fn validate(&self, value: &str) -> bool {
        self.validator
            .validate(value, &self.expected, self.transformer.as_ref())
    }

    /// Scores `choice`, applying the stage's remap target.
    pub fn evaluate(&self, choice: &Choice) -> StageScore {
        let raw = self.evaluator.evaluate(
            &self.score,
            choice,
            &self.expected,
            self.transformer.as_ref(),
            &self.weights,
        );
        StageScore::new(raw, max_score(&self.expected, &self.weights)).remapped(self.remap_score)
    }
}

impl fmt::Debug for ResolvedStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResolvedStage")
            .field("index", &self.index)
            .field("expected", &self.expected)
            .field("max_answers", &self.max_answers)
            .field("required_answers", &self.required_answers)
            .field("remap_score", &self.remap_score)
            .field("instant_feedback", &self.instant_feedback)
            .field("score", &self.score)
            .finish_non_exhaustive()
    }
}
