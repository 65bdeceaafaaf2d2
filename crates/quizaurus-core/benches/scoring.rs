use criterion::{black_box, criterion_group, criterion_main, Criterion};

use quizaurus_core::choice::{toggle_choice, Choice, IdentityTransformer};
use quizaurus_core::model::{Expected, QuizSetup, Stage};
use quizaurus_core::quiz::Quiz;
use quizaurus_core::scoring::{score, ScoreSettings, UnitWeights};

fn make_choice(n: usize) -> Choice {
    (0..n).map(|i| format!("opt-{i}")).collect()
}

fn make_expected(n: usize) -> Expected {
    Expected::Many((0..n).step_by(2).map(|i| format!("opt-{i}")).collect())
}

fn bench_toggle(c: &mut Criterion) {
    let mut group = c.benchmark_group("toggle_choice");

    group.bench_function("single_replace", |b| {
        let current = make_choice(1);
        b.iter(|| toggle_choice(black_box(&current), black_box("opt-9"), 1, true))
    });

    group.bench_function("multi_append", |b| {
        let current = make_choice(10);
        b.iter(|| toggle_choice(black_box(&current), black_box("opt-99"), 20, true))
    });

    group.bench_function("multi_remove", |b| {
        let current = make_choice(10);
        b.iter(|| toggle_choice(black_box(&current), black_box("opt-5"), 20, true))
    });

    group.finish();
}

fn bench_score(c: &mut Criterion) {
    let mut group = c.benchmark_group("score");
    let settings = ScoreSettings::default();

    for n in [4usize, 32, 256] {
        let choice = make_choice(n);
        let expected = make_expected(n);
        group.bench_function(format!("n={n}"), |b| {
            b.iter(|| {
                score(
                    black_box(&settings),
                    black_box(&choice),
                    black_box(&expected),
                    &IdentityTransformer,
                    &UnitWeights,
                )
            })
        });
    }

    group.finish();
}

fn bench_finish(c: &mut Criterion) {
    let stages = (0..50)
        .map(|i| {
            let mut stage = Stage::new(format!("Question {i}"), ["a", "c"]);
            for value in ["a", "b", "c", "d"] {
                stage = stage.with_option(value, value.to_uppercase());
            }
            stage.max_answers = Some(2);
            stage
        })
        .collect();
    let setup = QuizSetup {
        stages,
        stages_per_page: Some(5),
        ..Default::default()
    };

    c.bench_function("quiz_to_results_50_stages", |b| {
        b.iter(|| {
            let mut quiz = Quiz::new(setup.clone()).unwrap();
            for i in 0..50 {
                quiz.toggle(i, "a").unwrap();
                quiz.toggle(i, "b").unwrap();
            }
            quiz.advance_to_results().map(|s| s.score)
        })
    });
}

criterion_group!(benches, bench_toggle, bench_score, bench_finish);
criterion_main!(benches);
