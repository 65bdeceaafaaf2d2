//! Plain-text renderer for terminal sessions.

use quizaurus_core::render::{NavigationView, OptionView, QuizRenderer, StageView};
use quizaurus_core::scoring::QuizScore;

pub struct TextRenderer;

impl QuizRenderer for TextRenderer {
    type Output = String;

    fn render_heading(&mut self, title: &str) -> String {
        format!("== {title} ==")
    }

    fn render_title(&mut self, stage: &StageView<'_>) -> String {
        let mut line = format!("\nStage {}: {}", stage.index + 1, stage.title);
        if stage.max_answers > 1 {
            line.push_str(&format!(" (choose up to {})", stage.max_answers));
        }
        if let Some(score) = stage.score {
            line.push_str(&format!(
                " [{} / {}]",
                format_points(score.score),
                format_points(score.max_score)
            ));
        }
        line
    }

    fn render_description(&mut self, _stage: &StageView<'_>, description: &str) -> String {
        format!("  {description}")
    }

    fn render_option(&mut self, _stage: &StageView<'_>, option: &OptionView<'_>) -> String {
        let mark = if option.selected { "x" } else { " " };
        let verdict = match option.correctness {
            Some(true) => "  (correct)",
            Some(false) => "  (wrong)",
            None => "",
        };
        format!("  {}) [{mark}] {}{verdict}", option.position, option.content)
    }

    fn render_score(&mut self, score: &QuizScore) -> String {
        format!(
            "\nScore: {} / {}",
            format_points(score.score),
            format_points(score.max_score)
        )
    }

    fn render_navigation(&mut self, navigation: &NavigationView<'_>) -> String {
        let button = |key: &str, label: &str, enabled: bool| {
            if enabled {
                format!("[{key}] {label}")
            } else {
                format!("({key}) {label}")
            }
        };
        format!(
            "\n{}   {}   [q] Quit",
            button("p", navigation.previous_label, navigation.can_go_previous),
            button("n", navigation.next_label, navigation.can_go_next),
        )
    }
}

/// Formats a score without a trailing `.0` for whole numbers.
pub fn format_points(points: f64) -> String {
    if points.fract() == 0.0 {
        format!("{points:.0}")
    } else {
        format!("{points:.2}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn whole_points_have_no_decimals() {
        assert_eq!(format_points(3.0), "3");
        assert_eq!(format_points(-1.0), "-1");
        assert_eq!(format_points(33.333), "33.33");
    }
}
