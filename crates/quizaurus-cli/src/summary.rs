//! Score summaries for finished quizzes.

use comfy_table::{Cell, Table};
use serde::Serialize;

use quizaurus_core::Quiz;

use crate::text::format_points;

#[derive(Debug, Serialize)]
pub struct ScoreReport {
    pub title: Option<String>,
    pub stages: Vec<StageReport>,
    pub score: f64,
    pub max_score: f64,
}

#[derive(Debug, Serialize)]
pub struct StageReport {
    /// 1-based stage number.
    pub stage: usize,
    pub title: String,
    pub selected: Vec<String>,
    pub score: f64,
    pub max_score: f64,
}

/// Builds the report of a finished quiz, `None` while it is still running.
pub fn build_report(quiz: &Quiz) -> Option<ScoreReport> {
    let outcome = quiz.score()?;
    let setup = quiz.setup();

    let stages = setup
        .stages
        .iter()
        .zip(quiz.choices())
        .zip(&outcome.stages)
        .enumerate()
        .map(|(index, ((stage, choice), score))| StageReport {
            stage: index + 1,
            title: stage.title.clone(),
            selected: choice.values().to_vec(),
            score: score.score,
            max_score: score.max_score,
        })
        .collect();

    Some(ScoreReport {
        title: setup.title.clone(),
        stages,
        score: outcome.score,
        max_score: outcome.max_score,
    })
}

pub fn render_table(report: &ScoreReport) -> Table {
    let mut table = Table::new();
    table.set_header(vec!["#", "Stage", "Selected", "Score", "Max"]);

    for stage in &report.stages {
        table.add_row(vec![
            Cell::new(stage.stage),
            Cell::new(&stage.title),
            Cell::new(stage.selected.join(", ")),
            Cell::new(format_points(stage.score)),
            Cell::new(format_points(stage.max_score)),
        ]);
    }

    table.add_row(vec![
        Cell::new(""),
        Cell::new("Total"),
        Cell::new(""),
        Cell::new(format_points(report.score)),
        Cell::new(format_points(report.max_score)),
    ]);

    table
}
