//! Strategy traits for the pluggable parts of the quiz logic.
//!
//! Strategies can be set on the quiz or on a single stage through a
//! [`LogicSetup`]; the stage value wins, then the quiz value, then the
//! built-in default from [`crate::choice`] or [`crate::scoring`].

use std::fmt;
use std::sync::Arc;

use crate::choice::Choice;
use crate::model::Expected;
use crate::scoring::ScoreSettings;

// ---------------------------------------------------------------------------
// Choice strategies
// ---------------------------------------------------------------------------

/// Maps a raw option value to the key it is compared under.
///
/// The identity transform is the default. A hashing transform lets the quiz
/// definition carry hashed correct answers so the answer key cannot be read
/// straight out of the rendered output.
pub trait ChoiceTransformer: Send + Sync {
    fn transform(&self, value: &str) -> String;
}

impl<F> ChoiceTransformer for F
where
    F: Fn(&str) -> String + Send + Sync,
{
    fn transform(&self, value: &str) -> String {
        self(value)
    }
}

/// Decides whether a single option value is correct.
pub trait ChoiceValidator: Send + Sync {
    fn validate(
        &self,
        value: &str,
        expected: &Expected,
        transformer: &dyn ChoiceTransformer,
    ) -> bool;
}

impl<F> ChoiceValidator for F
where
    F: Fn(&str, &Expected, &dyn ChoiceTransformer) -> bool + Send + Sync,
{
    fn validate(
        &self,
        value: &str,
        expected: &Expected,
        transformer: &dyn ChoiceTransformer,
    ) -> bool {
        self(value, expected, transformer)
    }
}

// ---------------------------------------------------------------------------
// Scoring strategies
// ---------------------------------------------------------------------------

/// Weight lookup keyed by the transformed option value.
pub trait Weights {
    fn weight_of(&self, key: &str) -> f64;
}

/// Computes the score of one stage's choice.
pub trait ScoreEvaluator: Send + Sync {
    fn evaluate(
        &self,
        settings: &ScoreSettings,
        choice: &Choice,
        expected: &Expected,
        transformer: &dyn ChoiceTransformer,
        weights: &dyn Weights,
    ) -> f64;
}

impl<F> ScoreEvaluator for F
where
    F: Fn(&ScoreSettings, &Choice, &Expected, &dyn ChoiceTransformer, &dyn Weights) -> f64
        + Send
        + Sync,
{
    fn evaluate(
        &self,
        settings: &ScoreSettings,
        choice: &Choice,
        expected: &Expected,
        transformer: &dyn ChoiceTransformer,
        weights: &dyn Weights,
    ) -> f64 {
        self(settings, choice, expected, transformer, weights)
    }
}

// ---------------------------------------------------------------------------
// Strategy bundle
// ---------------------------------------------------------------------------

/// Strategies attached to a quiz or to a single stage.
#[derive(Clone, Default)]
pub struct LogicSetup {
    pub transformer: Option<Arc<dyn ChoiceTransformer>>,
    pub validator: Option<Arc<dyn ChoiceValidator>>,
    pub evaluator: Option<Arc<dyn ScoreEvaluator>>,
}

impl LogicSetup {
    pub fn with_transformer(mut self, transformer: impl ChoiceTransformer + 'static) -> Self {
        self.transformer = Some(Arc::new(transformer));
        self
    }

    pub fn with_validator(mut self, validator: impl ChoiceValidator + 'static) -> Self {
        self.validator = Some(Arc::new(validator));
        self
    }

    pub fn with_evaluator(mut self, evaluator: impl ScoreEvaluator + 'static) -> Self {
        self.evaluator = Some(Arc::new(evaluator));
        self
    }
}

// Strategies are opaque; only report which ones are overridden.
impl fmt::Debug for LogicSetup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = |set: bool| if set { "custom" } else { "inherited" };
        f.debug_struct("LogicSetup")
            .field("transformer", &label(self.transformer.is_some()))
            .field("validator", &label(self.validator.is_some()))
            .field("evaluator", &label(self.evaluator.is_some()))
            .finish()
    }
}
