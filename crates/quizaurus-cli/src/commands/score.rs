//! The `quizaurus score` command.

use std::collections::HashSet;
use std::path::PathBuf;

use anyhow::{Context, Result};

use quizaurus_core::parser::{self, AnswerSheet};
use quizaurus_core::Quiz;

use crate::summary::{build_report, render_table};

pub fn execute(quiz_path: PathBuf, answers_path: PathBuf, format: String) -> Result<()> {
    let setup = parser::parse_quiz_setup(&quiz_path)?;
    let sheet = parser::parse_answer_sheet(&answers_path)?;

    let mut quiz = Quiz::new(setup)
        .with_context(|| format!("invalid quiz: {}", quiz_path.display()))?;

    apply_answers(&mut quiz, &sheet)
        .with_context(|| format!("failed to apply {}", answers_path.display()))?;

    if quiz.advance_to_results().is_none() {
        let window = quiz.pagination().window();
        anyhow::bail!(
            "answers are incomplete: stages {}-{} need more selections",
            window.start + 1,
            window.end
        );
    }

    let report = build_report(&quiz).context("quiz did not finish")?;

    match format.as_str() {
        "json" => {
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        "table" => {
            println!("{}", render_table(&report));
        }
        other => anyhow::bail!("unknown format: {other}"),
    }

    Ok(())
}

/// Selects every value of the sheet.
///
/// Values are selections, not clicks: a stage may appear once, a value once
/// per stage, and a stage may not list more values than it accepts.
fn apply_answers(quiz: &mut Quiz, sheet: &AnswerSheet) -> Result<()> {
    let mut stages = HashSet::new();

    for answer in &sheet.answers {
        let number = answer.stage + 1;
        let max_answers = quiz.stage(answer.stage)?.max_answers;

        if !stages.insert(answer.stage) {
            anyhow::bail!("stage {number} is answered more than once");
        }
        if answer.values.len() > max_answers {
            anyhow::bail!(
                "stage {number} accepts at most {max_answers} answer(s), got {}",
                answer.values.len()
            );
        }

        let mut seen = HashSet::new();
        for value in &answer.values {
            if !seen.insert(value.as_str()) {
                anyhow::bail!("stage {number} lists '{value}' more than once");
            }
            tracing::debug!(stage = answer.stage, value = %value, "applying answer");
            quiz.toggle(answer.stage, value)?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use quizaurus_core::parser::StageAnswer;
    use quizaurus_core::{QuizSetup, Stage};

    fn quiz() -> Quiz {
        let mut multi = Stage::new("Pick two", ["a", "b"])
            .with_option("a", "A")
            .with_option("b", "B")
            .with_option("c", "C");
        multi.max_answers = Some(2);
        Quiz::new(QuizSetup {
            stages: vec![
                Stage::new("Pick one", "a")
                    .with_option("a", "A")
                    .with_option("b", "B"),
                multi,
            ],
            ..Default::default()
        })
        .unwrap()
    }

    fn sheet(answers: &[(usize, &[&str])]) -> AnswerSheet {
        AnswerSheet {
            answers: answers
                .iter()
                .map(|(stage, values)| StageAnswer {
                    stage: *stage,
                    values: values.iter().map(|v| v.to_string()).collect(),
                })
                .collect(),
        }
    }

    #[test]
    fn applies_every_value() {
        let mut quiz = quiz();
        apply_answers(&mut quiz, &sheet(&[(0, &["a"]), (1, &["a", "c"])])).unwrap();
        assert_eq!(quiz.choice(0).unwrap().values(), &["a".to_string()]);
        assert_eq!(quiz.choice(1).unwrap().len(), 2);
    }

    #[test]
    fn rejects_repeated_value() {
        let mut quiz = quiz();
        let err = apply_answers(&mut quiz, &sheet(&[(1, &["a", "a"])])).unwrap_err();
        assert!(err.to_string().contains("lists 'a' more than once"));
    }

    #[test]
    fn rejects_more_values_than_accepted() {
        let mut quiz = quiz();
        let err = apply_answers(&mut quiz, &sheet(&[(0, &["a", "b"])])).unwrap_err();
        assert!(err.to_string().contains("accepts at most 1 answer(s), got 2"));
        assert!(quiz.choice(0).unwrap().is_empty());
    }

    #[test]
    fn rejects_repeated_stage() {
        let mut quiz = quiz();
        let err = apply_answers(&mut quiz, &sheet(&[(0, &["a"]), (0, &["b"])])).unwrap_err();
        assert!(err.to_string().contains("stage 1 is answered more than once"));
    }

    #[test]
    fn rejects_unknown_stage() {
        let mut quiz = quiz();
        assert!(apply_answers(&mut quiz, &sheet(&[(5, &["a"])])).is_err());
    }
}
