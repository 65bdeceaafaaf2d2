//! Quiz controller.
//!
//! Owns the choice of every stage and the page state. Callers only dispatch
//! intents (toggle, next, previous) and read views back; the score is taken
//! once, when the last content page is left, and frozen from then on.

use crate::choice::{toggle_choice, Choice};
use crate::error::QuizError;
use crate::model::QuizSetup;
use crate::pagination::{PageTransition, StagePagination};
use crate::render::{render_page, NavigationView, OptionView, PageView, QuizRenderer, StageView};
use crate::resolve::{QuizSettings, ResolvedStage};
use crate::scoring::QuizScore;

/// A running quiz.
#[derive(Debug, Clone)]
pub struct Quiz {
    setup: QuizSetup,
    settings: QuizSettings,
    stages: Vec<ResolvedStage>,
    choices: Vec<Choice>,
    pagination: StagePagination,
    outcome: Option<QuizScore>,
}

impl Quiz {
    /// Resolves every stage and starts with empty choices on the first page.
    pub fn new(setup: QuizSetup) -> Result<Self, QuizError> {
        let settings = QuizSettings::resolve(&setup)?;
        let stages = setup
            .stages
            .iter()
            .enumerate()
            .map(|(index, stage)| ResolvedStage::resolve(index, stage, &setup))
            .collect::<Result<Vec<_>, _>>()?;
        let choices = vec![Choice::new(); stages.len()];
        let pagination = StagePagination::new(stages.len(), settings.stages_per_page);

        tracing::debug!(
            stages = stages.len(),
            pages = pagination.page_count(),
            "quiz created"
        );

        Ok(Self {
            setup,
            settings,
            stages,
            choices,
            pagination,
            outcome: None,
        })
    }

    pub fn setup(&self) -> &QuizSetup {
        &self.setup
    }

    pub fn settings(&self) -> &QuizSettings {
        &self.settings
    }

    pub fn stage_count(&self) -> usize {
        self.stages.len()
    }

    pub fn stage(&self, index: usize) -> Result<&ResolvedStage, QuizError> {
        self.stages.get(index).ok_or(QuizError::StageOutOfRange {
            index,
            count: self.stages.len(),
        })
    }

    pub fn choices(&self) -> &[Choice] {
        &self.choices
    }

    pub fn choice(&self, index: usize) -> Result<&Choice, QuizError> {
        self.stage(index)?;
        Ok(&self.choices[index])
    }

    pub fn pagination(&self) -> &StagePagination {
        &self.pagination
    }

    pub fn is_finished(&self) -> bool {
        self.outcome.is_some()
    }

    /// The score snapshot, available once results are shown.
    pub fn score(&self) -> Option<&QuizScore> {
        self.outcome.as_ref()
    }

    /// Toggles `value` on stage `index`.
    ///
    /// Returns whether the choice changed. Once results are shown the choices
    /// are frozen and toggles are ignored.
    pub fn toggle(&mut self, index: usize, value: &str) -> Result<bool, QuizError> {
        let stage = self.stage(index)?;
        if self.setup.stages[index].option(value).is_none() {
            return Err(QuizError::UnknownOption {
                stage: index,
                value: value.to_string(),
            });
        }
        if self.is_finished() {
            tracing::debug!(stage = index, value, "toggle ignored, quiz finished");
            return Ok(false);
        }

        let next = toggle_choice(
            &self.choices[index],
            value,
            stage.max_answers,
            stage.can_deselect(),
        );
        let changed = next != self.choices[index];
        if changed {
            tracing::debug!(stage = index, value, selected = next.len(), "choice toggled");
            self.choices[index] = next;
        }
        Ok(changed)
    }

    /// Whether every stage on the current page satisfies the completeness
    /// gate. Always true when incomplete answers are allowed.
    pub fn page_complete(&self) -> bool {
        self.settings.allow_incomplete_answers
            || self
                .pagination
                .window()
                .all(|i| self.stages[i].is_complete(&self.choices[i]))
    }

    pub fn next(&mut self) -> PageTransition {
        let transition = self.pagination.next(self.page_complete());
        if transition == PageTransition::Finished {
            self.finish();
        }
        transition
    }

    pub fn previous(&mut self) -> PageTransition {
        self.pagination.previous()
    }

    /// Advances page by page until results are shown.
    ///
    /// Returns `None` if the completeness gate blocks on the way.
    pub fn advance_to_results(&mut self) -> Option<&QuizScore> {
        while !self.pagination.show_results() {
            if self.next() == PageTransition::Blocked {
                return None;
            }
        }
        self.outcome.as_ref()
    }

    /// Clears every choice and returns to the first content page.
    pub fn reset(&mut self) {
        self.choices = vec![Choice::new(); self.stages.len()];
        self.pagination.reset();
        self.outcome = None;
        tracing::debug!("quiz reset");
    }

    fn finish(&mut self) {
        if self.outcome.is_some() {
            return;
        }
        let stage_scores = self
            .stages
            .iter()
            .zip(&self.choices)
            .map(|(stage, choice)| stage.evaluate(choice))
            .collect();
        let outcome = QuizScore::from_stages(stage_scores);
        tracing::info!(
            score = outcome.score,
            max_score = outcome.max_score,
            "quiz finished"
        );
        self.outcome = Some(outcome);
    }

    /// Whether option `value` of stage `index` is correct.
    pub fn validate_option(&self, index: usize, value: &str) -> Result<bool, QuizError> {
        Ok(self.stage(index)?.validate(value))
    }

    /// Projection of the current page.
    pub fn view(&self) -> PageView<'_> {
        let show_results = self.pagination.show_results();
        let stages = self
            .pagination
            .window()
            .map(|index| self.stage_view(index, show_results))
            .collect();

        let is_final_step = self.pagination.is_final_step();
        let navigation = NavigationView {
            can_go_previous: self.pagination.can_go_previous(),
            can_go_next: self.pagination.can_go_next() && (show_results || self.page_complete()),
            is_final_step,
            previous_label: &self.settings.previous_label,
            next_label: if is_final_step {
                &self.settings.results_label
            } else {
                &self.settings.next_label
            },
        };

        PageView {
            title: self.setup.title.as_deref(),
            page: self.pagination.page(),
            page_count: self.pagination.page_count(),
            show_results,
            stages,
            navigation,
            score: self.outcome.as_ref(),
        }
    }

    fn stage_view(&self, index: usize, show_results: bool) -> StageView<'_> {
        let stage = &self.setup.stages[index];
        let resolved = &self.stages[index];
        let choice = &self.choices[index];
        let reveal = show_results || (resolved.instant_feedback && !choice.is_empty());

        let options = stage
            .options
            .iter()
            .enumerate()
            .map(|(i, option)| {
                let selected = choice.contains(&option.value);
                let correctness = if reveal {
                    let valid = resolved.validate(&option.value);
                    (valid || selected).then_some(valid)
                } else {
                    None
                };
                OptionView {
                    position: i + 1,
                    value: &option.value,
                    content: &option.content,
                    selected,
                    correctness,
                }
            })
            .collect();

        StageView {
            index,
            title: &stage.title,
            description: stage.description.as_deref(),
            options,
            choice,
            max_answers: resolved.max_answers,
            required_answers: resolved.required_answers,
            is_complete: resolved.is_complete(choice),
            interactive: !show_results,
            score: self.outcome.as_ref().map(|o| o.stages[index]),
        }
    }

    /// Renders the current page with a caller-supplied renderer.
    pub fn render<R: QuizRenderer>(&self, renderer: &mut R) -> Vec<R::Output> {
        render_page(&self.view(), renderer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Expected, ScoreSetup, Stage};
    use crate::pagination::PageState;
    use crate::scoring::{ScoreSettings, StageScore};
    use crate::traits::{ChoiceTransformer, LogicSetup, Weights};

    fn three_stage_setup() -> QuizSetup {
        QuizSetup {
            stages_per_page: Some(2),
            allow_incomplete_answers: Some(false),
            stages: vec![
                Stage::new("1. Which is prime?", "b")
                    .with_option("a", "4")
                    .with_option("b", "5"),
                Stage::new("2. Which is even?", "a")
                    .with_option("a", "2")
                    .with_option("b", "3"),
                Stage::new("3. Which is odd?", "b")
                    .with_option("a", "8")
                    .with_option("b", "9"),
            ],
            ..Default::default()
        }
    }

    #[test]
    fn pagination_scenario_with_completeness_gate() {
        let mut quiz = Quiz::new(three_stage_setup()).unwrap();
        assert_eq!(quiz.pagination().window(), 0..2);

        // Stage 0 unanswered: navigation blocked.
        quiz.toggle(1, "a").unwrap();
        assert_eq!(quiz.next(), PageTransition::Blocked);
        assert!(!quiz.view().navigation.can_go_next);
        assert_eq!(quiz.pagination().state(), PageState::Answering(0));

        quiz.toggle(0, "b").unwrap();
        assert_eq!(quiz.next(), PageTransition::Moved { from: 0, to: 1 });
        assert_eq!(quiz.pagination().window(), 2..3);
        assert!(quiz.view().navigation.is_final_step);

        quiz.toggle(2, "b").unwrap();
        assert!(quiz.score().is_none());
        assert_eq!(quiz.next(), PageTransition::Finished);
        assert_eq!(quiz.pagination().state(), PageState::Results(0));
        assert_eq!(quiz.score().map(|s| s.score), Some(3.0));

        // Paging through results never finishes twice.
        assert_eq!(quiz.next(), PageTransition::Moved { from: 0, to: 1 });
        assert_eq!(quiz.next(), PageTransition::Unchanged);
        assert_eq!(quiz.score().map(|s| s.score), Some(3.0));
    }

    #[test]
    fn incomplete_answers_allowed_by_default() {
        let mut setup = three_stage_setup();
        setup.allow_incomplete_answers = None;
        let mut quiz = Quiz::new(setup).unwrap();
        assert!(quiz.page_complete());
        assert_eq!(quiz.next(), PageTransition::Moved { from: 0, to: 1 });
        assert_eq!(quiz.next(), PageTransition::Finished);
        assert_eq!(quiz.score().map(|s| (s.score, s.max_score)), Some((0.0, 3.0)));
    }

    #[test]
    fn toggle_replaces_only_the_addressed_stage() {
        let mut quiz = Quiz::new(three_stage_setup()).unwrap();
        assert!(quiz.toggle(0, "a").unwrap());
        assert!(quiz.toggle(0, "b").unwrap());
        assert_eq!(quiz.choice(0).unwrap().values(), &["b".to_string()]);
        assert!(quiz.choice(1).unwrap().is_empty());
        assert!(quiz.choice(2).unwrap().is_empty());
    }

    #[test]
    fn toggle_rejects_unknown_targets() {
        let mut quiz = Quiz::new(three_stage_setup()).unwrap();
        assert_eq!(
            quiz.toggle(7, "a"),
            Err(QuizError::StageOutOfRange { index: 7, count: 3 })
        );
        assert_eq!(
            quiz.toggle(0, "zzz"),
            Err(QuizError::UnknownOption {
                stage: 0,
                value: "zzz".into()
            })
        );
    }

    #[test]
    fn instant_feedback_locks_answers_and_reveals_correctness() {
        let mut setup = three_stage_setup();
        setup.instant_feedback = Some(true);
        setup.stages_per_page = Some(1);
        let mut quiz = Quiz::new(setup).unwrap();

        let view = quiz.view();
        assert!(view.stages[0].options.iter().all(|o| o.correctness.is_none()));

        quiz.toggle(0, "a").unwrap();
        assert!(!quiz.toggle(0, "b").unwrap());

        let view = quiz.view();
        let options = &view.stages[0].options;
        assert_eq!(options[0].correctness, Some(false));
        assert_eq!(options[1].correctness, Some(true));
    }

    #[test]
    fn results_mark_selected_and_correct_options_only() {
        let setup = QuizSetup {
            stages: vec![Stage::new("Q", "b")
                .with_option("a", "A")
                .with_option("b", "B")
                .with_option("c", "C")],
            ..Default::default()
        };
        let mut quiz = Quiz::new(setup).unwrap();
        quiz.toggle(0, "a").unwrap();

        let before = quiz.view();
        assert!(before.stages[0].options.iter().all(|o| o.correctness.is_none()));

        quiz.next();
        let view = quiz.view();
        let marks: Vec<_> = view.stages[0]
            .options
            .iter()
            .map(|o| (o.value, o.selected, o.correctness))
            .collect();
        assert_eq!(
            marks,
            vec![
                ("a", true, Some(false)),
                ("b", false, Some(true)),
                ("c", false, None),
            ]
        );
        assert!(!view.stages[0].interactive);
        assert_eq!(view.stages[0].score, Some(StageScore::new(0.0, 1.0)));
    }

    #[test]
    fn score_is_frozen_after_finish() {
        let mut quiz = Quiz::new(three_stage_setup()).unwrap();
        quiz.toggle(0, "b").unwrap();
        quiz.toggle(1, "a").unwrap();
        quiz.toggle(2, "b").unwrap();
        let snapshot = quiz.advance_to_results().cloned().unwrap();

        assert!(!quiz.toggle(2, "a").unwrap());
        assert_eq!(quiz.previous(), PageTransition::Unchanged);
        quiz.next();
        assert_eq!(quiz.score(), Some(&snapshot));
    }

    #[test]
    fn advance_to_results_stops_at_gate() {
        let mut quiz = Quiz::new(three_stage_setup()).unwrap();
        assert!(quiz.advance_to_results().is_none());
        assert!(!quiz.is_finished());
    }

    #[test]
    fn remap_and_weights_flow_into_totals() {
        let mut weighted = Stage::new("Pick both", ["a", "b"])
            .with_option("a", "A")
            .with_option("b", "B")
            .with_option("c", "C");
        weighted.max_answers = Some(3);
        weighted.remap_score = Some(100.0);

        let setup = QuizSetup {
            score: ScoreSetup {
                allow_negative: Some(true),
                ..Default::default()
            },
            stages: vec![
                weighted,
                Stage::new("Weighted", "x")
                    .with_weighted_option("x", "X", 4.0)
                    .with_option("y", "Y"),
            ],
            ..Default::default()
        };
        let mut quiz = Quiz::new(setup).unwrap();
        quiz.toggle(0, "a").unwrap();
        quiz.toggle(0, "b").unwrap();
        quiz.toggle(0, "c").unwrap();
        quiz.toggle(1, "x").unwrap();

        let score = quiz.advance_to_results().unwrap();
        // (2 − 1) / 2 · 100 and 4 / 4
        assert_eq!(score.stages[0], StageScore::new(50.0, 100.0));
        assert_eq!(score.stages[1], StageScore::new(4.0, 4.0));
        assert_eq!(score.score, 54.0);
        assert_eq!(score.max_score, 104.0);
    }

    #[test]
    fn custom_validator_drives_correctness() {
        let setup = QuizSetup {
            logic: LogicSetup::default().with_validator(
                |value: &str, _: &Expected, _: &dyn ChoiceTransformer| value == "cheat",
            ),
            stages: vec![Stage::new("Q", "a")
                .with_option("a", "A")
                .with_option("cheat", "Cheat")],
            ..Default::default()
        };
        let quiz = Quiz::new(setup).unwrap();
        assert_eq!(quiz.validate_option(0, "cheat"), Ok(true));
        assert_eq!(quiz.validate_option(0, "a"), Ok(false));
    }

    #[test]
    fn stage_evaluator_overrides_quiz_evaluator() {
        let mut own = Stage::new("Own scoring", "a").with_option("a", "A");
        own.logic = LogicSetup::default().with_evaluator(
            |_: &ScoreSettings, _: &Choice, _: &Expected, _: &dyn ChoiceTransformer, _: &dyn Weights| {
                7.0
            },
        );
        let setup = QuizSetup {
            logic: LogicSetup::default().with_evaluator(
                |_: &ScoreSettings,
                 choice: &Choice,
                 _: &Expected,
                 _: &dyn ChoiceTransformer,
                 _: &dyn Weights| 3.0 + choice.len() as f64,
            ),
            stages: vec![own, Stage::new("Inherited", "a").with_option("a", "A")],
            ..Default::default()
        };
        let mut quiz = Quiz::new(setup).unwrap();
        quiz.toggle(1, "a").unwrap();

        let score = quiz.advance_to_results().unwrap();
        assert_eq!(score.stages[0].score, 7.0);
        assert_eq!(score.stages[1].score, 4.0);
        assert_eq!(score.score, 11.0);
        // The maximum still comes from the option weights.
        assert_eq!(score.max_score, 2.0);
    }

    #[test]
    fn navigation_labels_follow_setup() {
        let mut setup = three_stage_setup();
        setup.navigation.results = Some("Finish".into());
        setup.allow_incomplete_answers = Some(true);
        let mut quiz = Quiz::new(setup).unwrap();

        let view = quiz.view();
        assert_eq!(
            view.navigation,
            NavigationView {
                can_go_previous: false,
                can_go_next: true,
                is_final_step: false,
                previous_label: "Previous",
                next_label: "Next",
            }
        );
        quiz.next();
        assert_eq!(quiz.view().navigation.next_label, "Finish");
    }

    #[test]
    fn reset_starts_over() {
        let mut quiz = Quiz::new(three_stage_setup()).unwrap();
        quiz.toggle(0, "b").unwrap();
        quiz.toggle(1, "a").unwrap();
        quiz.toggle(2, "a").unwrap();
        quiz.advance_to_results();
        quiz.reset();

        assert!(!quiz.is_finished());
        assert!(quiz.choices().iter().all(Choice::is_empty));
        assert_eq!(quiz.pagination().state(), PageState::Answering(0));
    }

    #[test]
    fn invalid_stage_rejected_at_construction() {
        let mut setup = three_stage_setup();
        setup.stages[1].required_answers = Some(2);
        assert!(matches!(
            Quiz::new(setup),
            Err(QuizError::RequiredExceedsMax { stage: 1, .. })
        ));
    }

    struct LineRenderer;

    impl QuizRenderer for LineRenderer {
        type Output = String;

        fn render_heading(&mut self, title: &str) -> String {
            format!("# {title}")
        }

        fn render_title(&mut self, stage: &StageView<'_>) -> String {
            format!("## {}", stage.title)
        }

        fn render_description(&mut self, _: &StageView<'_>, description: &str) -> String {
            description.to_string()
        }

        fn render_option(&mut self, _: &StageView<'_>, option: &OptionView<'_>) -> String {
            let mark = if option.selected { "x" } else { " " };
            format!("[{mark}] {}", option.content)
        }

        fn render_score(&mut self, score: &QuizScore) -> String {
            format!("{}/{}", score.score, score.max_score)
        }

        fn render_navigation(&mut self, navigation: &NavigationView<'_>) -> String {
            format!("<{}> <{}>", navigation.previous_label, navigation.next_label)
        }
    }

    #[test]
    fn render_delegates_in_layout_order() {
        let mut setup = three_stage_setup();
        setup.title = Some("Numbers".into());
        setup.stages[0].description = Some("Think".into());
        let mut quiz = Quiz::new(setup).unwrap();
        quiz.toggle(0, "b").unwrap();

        let lines = quiz.render(&mut LineRenderer);
        assert_eq!(
            lines,
            vec![
                "# Numbers",
                "## 1. Which is prime?",
                "Think",
                "[ ] 4",
                "[x] 5",
                "## 2. Which is even?",
                "[ ] 2",
                "[ ] 3",
                "<Previous> <Next>",
            ]
        );
    }
}
