//! Read-only projections handed to the rendering layer.
//!
//! The core never draws anything. A [`QuizRenderer`] receives plain views and
//! returns whatever its output type is (markup, terminal lines, widgets).

use serde::Serialize;

use crate::choice::Choice;
use crate::scoring::{QuizScore, StageScore};

/// One option as the renderer sees it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OptionView<'a> {
    /// 1-based position within the stage, handy for keyboard input.
    pub position: usize,
    pub value: &'a str,
    pub content: &'a str,
    pub selected: bool,
    /// `Some` only when correctness is revealed, and only for options that
    /// are selected or correct. Unselected wrong options stay unmarked.
    pub correctness: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StageView<'a> {
    pub index: usize,
    pub title: &'a str,
    pub description: Option<&'a str>,
    pub options: Vec<OptionView<'a>>,
    pub choice: &'a Choice,
    pub max_answers: usize,
    pub required_answers: usize,
    /// Whether the selection satisfies `required_answers`.
    pub is_complete: bool,
    /// Whether toggles on this stage are still accepted.
    pub interactive: bool,
    /// Present once the quiz is finished.
    pub score: Option<StageScore>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NavigationView<'a> {
    pub can_go_previous: bool,
    pub can_go_next: bool,
    pub is_final_step: bool,
    pub previous_label: &'a str,
    /// "Next" label, or the results label on the final step.
    pub next_label: &'a str,
}

/// Everything needed to draw the current page.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageView<'a> {
    pub title: Option<&'a str>,
    pub page: usize,
    pub page_count: usize,
    pub show_results: bool,
    pub stages: Vec<StageView<'a>>,
    pub navigation: NavigationView<'a>,
    pub score: Option<&'a QuizScore>,
}

/// Caller-supplied rendering.
pub trait QuizRenderer {
    type Output;

    fn render_heading(&mut self, title: &str) -> Self::Output;

    fn render_title(&mut self, stage: &StageView<'_>) -> Self::Output;

    fn render_description(&mut self, stage: &StageView<'_>, description: &str) -> Self::Output;

    fn render_option(&mut self, stage: &StageView<'_>, option: &OptionView<'_>) -> Self::Output;

    fn render_score(&mut self, score: &QuizScore) -> Self::Output;

    fn render_navigation(&mut self, navigation: &NavigationView<'_>) -> Self::Output;
}

/// Drives `renderer` over a page in layout order: heading, then per stage
/// title, description and options, then the score (on results) and finally
/// the navigation.
pub fn render_page<R: QuizRenderer>(view: &PageView<'_>, renderer: &mut R) -> Vec<R::Output> {
    let mut out = Vec::new();

    if let Some(title) = view.title {
        out.push(renderer.render_heading(title));
    }

    for stage in &view.stages {
        out.push(renderer.render_title(stage));
        if let Some(description) = stage.description {
            out.push(renderer.render_description(stage, description));
        }
        for option in &stage.options {
            out.push(renderer.render_option(stage, option));
        }
    }

    if let Some(score) = view.score {
        out.push(renderer.render_score(score));
    }

    out.push(renderer.render_navigation(&view.navigation));
    out
}
