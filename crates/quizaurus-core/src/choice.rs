//! Choice model: selection toggling and answer validation.

use serde::Serialize;

use crate::model::Expected;
use crate::traits::{ChoiceTransformer, ChoiceValidator};

/// The option values currently selected for one stage.
///
/// Behaves as a set; insertion order is kept only so renderers see a stable
/// sequence.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Choice(Vec<String>);

impl Choice {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, value: &str) -> bool {
        self.0.iter().any(|v| v == value)
    }

    pub fn values(&self) -> &[String] {
        &self.0
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

impl<S: Into<String>> FromIterator<S> for Choice {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut values: Vec<String> = Vec::new();
        for value in iter {
            let value = value.into();
            if !values.contains(&value) {
                values.push(value);
            }
        }
        Choice(values)
    }
}

/// Returns the choice that results from the user toggling `value`.
///
/// - A present value is removed only when `can_deselect` is set and more than
///   one answer is allowed. Single-answer stages behave like radio buttons:
///   the selection can be replaced but never cleared.
/// - An absent value is appended while the choice is below `max`. At the cap a
///   single-answer stage replaces its selection (if deselection is allowed);
///   a multi-answer stage ignores the click instead of evicting older picks.
///
/// A `max` of 0 is treated as 1. The input is never modified.
pub fn toggle_choice(current: &Choice, value: &str, max: usize, can_deselect: bool) -> Choice {
    let max = max.max(1);

    if current.contains(value) {
        if can_deselect && max != 1 {
            return current.iter().filter(|v| *v != value).collect();
        }
        return current.clone();
    }

    if current.len() < max {
        let mut next = current.clone();
        next.0.push(value.to_string());
        return next;
    }

    if max == 1 && (can_deselect || current.is_empty()) {
        return Choice(vec![value.to_string()]);
    }

    current.clone()
}

/// The default transformer: values are compared as they are.
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentityTransformer;

impl ChoiceTransformer for IdentityTransformer {
    fn transform(&self, value: &str) -> String {
        value.to_string()
    }
}

/// The default validator, delegating to [`validate`].
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultValidator;

impl ChoiceValidator for DefaultValidator {
    fn validate(
        &self,
        value: &str,
        expected: &Expected,
        transformer: &dyn ChoiceTransformer,
    ) -> bool {
        validate(value, expected, transformer)
    }
}

/// Whether `value`, once transformed, is (one of) the expected answer(s).
///
/// Assumes option values and expected values are each unique.
pub fn validate(value: &str, expected: &Expected, transformer: &dyn ChoiceTransformer) -> bool {
    expected.contains(&transformer.transform(value))
}
