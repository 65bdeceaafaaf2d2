//! TOML quiz definition parser.
//!
//! Loads quiz setups and answer sheets from TOML files and directories, and
//! checks setups for common mistakes.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::model::{NavigationLabels, QuizSetup, ScoreSetup, Stage};
use crate::traits::LogicSetup;

/// Intermediate TOML structure for quiz files.
#[derive(Debug, Deserialize)]
struct TomlQuizFile {
    #[serde(default)]
    quiz: TomlQuizHeader,
    #[serde(default)]
    stages: Vec<Stage>,
}

#[derive(Debug, Default, Deserialize)]
struct TomlQuizHeader {
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    stages_per_page: Option<usize>,
    #[serde(default)]
    allow_incomplete_answers: Option<bool>,
    #[serde(default)]
    instant_feedback: Option<bool>,
    #[serde(default)]
    score: ScoreSetup,
    #[serde(default)]
    navigation: NavigationLabels,
}

/// Parse a single TOML file into a `QuizSetup`.
pub fn parse_quiz_setup(path: &Path) -> Result<QuizSetup> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read quiz file: {}", path.display()))?;

    parse_quiz_setup_str(&content, path)
}

/// Parse a TOML string into a `QuizSetup` (useful for testing).
pub fn parse_quiz_setup_str(content: &str, source_path: &Path) -> Result<QuizSetup> {
    let parsed: TomlQuizFile = toml::from_str(content)
        .with_context(|| format!("failed to parse TOML: {}", source_path.display()))?;

    let header = parsed.quiz;
    Ok(QuizSetup {
        title: header.title,
        stages: parsed.stages,
        stages_per_page: header.stages_per_page,
        allow_incomplete_answers: header.allow_incomplete_answers,
        instant_feedback: header.instant_feedback,
        score: header.score,
        navigation: header.navigation,
        logic: LogicSetup::default(),
    })
}

/// Recursively load all `.toml` quiz files from a directory.
///
/// Files that fail to parse are logged and skipped.
pub fn load_quiz_directory(dir: &Path) -> Result<Vec<(PathBuf, QuizSetup)>> {
    let mut quizzes = Vec::new();

    if !dir.is_dir() {
        anyhow::bail!("not a directory: {}", dir.display());
    }

    let mut entries = std::fs::read_dir(dir)
        .with_context(|| format!("failed to read directory: {}", dir.display()))?
        .collect::<std::io::Result<Vec<_>>>()?;
    entries.sort_by_key(|e| e.path());

    for entry in entries {
        let path = entry.path();

        if path.is_dir() {
            quizzes.extend(load_quiz_directory(&path)?);
        } else if path.extension().is_some_and(|ext| ext == "toml") {
            match parse_quiz_setup(&path) {
                Ok(setup) => quizzes.push((path, setup)),
                Err(e) => {
                    tracing::warn!("skipping {}: {:#}", path.display(), e);
                }
            }
        }
    }

    Ok(quizzes)
}

/// Selections to apply to a quiz, one entry per answered stage.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AnswerSheet {
    #[serde(default)]
    pub answers: Vec<StageAnswer>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StageAnswer {
    /// 0-based stage index.
    pub stage: usize,
    /// Option values, toggled in order.
    #[serde(default)]
    pub values: Vec<String>,
}

/// Parse an answer sheet file.
pub fn parse_answer_sheet(path: &Path) -> Result<AnswerSheet> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read answer sheet: {}", path.display()))?;

    toml::from_str(&content)
        .with_context(|| format!("failed to parse TOML: {}", path.display()))
}

/// A warning from quiz validation.
#[derive(Debug, Clone)]
pub struct ValidationWarning {
    /// The stage index (if applicable).
    pub stage: Option<usize>,
    /// Warning message.
    pub message: String,
}

impl ValidationWarning {
    fn stage(stage: usize, message: impl Into<String>) -> Self {
        Self {
            stage: Some(stage),
            message: message.into(),
        }
    }
}

/// Validate a quiz setup for common issues.
///
/// Correct answers are compared to the raw option values, so quizzes that rely
/// on a custom transformer may see false "matches no option" warnings.
pub fn validate_quiz_setup(setup: &QuizSetup) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();

    if setup.stages.is_empty() {
        warnings.push(ValidationWarning {
            stage: None,
            message: "quiz has no stages".into(),
        });
    }

    if setup.stages_per_page == Some(0) {
        warnings.push(ValidationWarning {
            stage: None,
            message: "stages_per_page is 0, treated as 1".into(),
        });
    }

    for (index, stage) in setup.stages.iter().enumerate() {
        if stage.options.is_empty() {
            warnings.push(ValidationWarning::stage(index, "stage has no options"));
        }

        // Check for duplicate option values
        let mut seen = HashSet::new();
        for option in &stage.options {
            if !seen.insert(option.value.as_str()) {
                warnings.push(ValidationWarning::stage(
                    index,
                    format!("duplicate option value: {}", option.value),
                ));
            }
        }

        if stage.max_answers == Some(0) {
            warnings.push(ValidationWarning::stage(index, "max_answers is 0, treated as 1"));
        }

        let max = stage.max_answers.unwrap_or(1).max(1);
        let required = stage.required_answers.unwrap_or(1);
        if required > max {
            warnings.push(ValidationWarning::stage(
                index,
                format!("required_answers ({required}) exceeds max_answers ({max})"),
            ));
        }

        if !stage.options.is_empty() && required > stage.options.len() {
            warnings.push(ValidationWarning::stage(
                index,
                format!(
                    "required_answers ({required}) exceeds the {} available option(s), stage can never be completed",
                    stage.options.len()
                ),
            ));
        }

        for expected in stage.correct_answer.values() {
            if !stage.options.is_empty() && stage.option(expected).is_none() {
                warnings.push(ValidationWarning::stage(
                    index,
                    format!("correct answer '{expected}' matches no option"),
                ));
            }
        }

        if stage.correct_answer.values().len() > max {
            warnings.push(ValidationWarning::stage(
                index,
                format!(
                    "{} correct answers but max_answers is {max}",
                    stage.correct_answer.values().len()
                ),
            ));
        }

        if stage.remap_score.is_some() {
            let max_score: f64 = stage
                .correct_answer
                .values()
                .iter()
                .map(|e| stage.option(e).map_or(1.0, |o| o.weight()))
                .sum();
            if max_score == 0.0 {
                warnings.push(ValidationWarning::stage(
                    index,
                    "remap_score set but the correct answers weigh 0, stage will score 0",
                ));
            }
        }
    }

    warnings
}
