//! The `quizaurus play` command.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};

use quizaurus_core::{parser, PageTransition, Quiz};

use crate::summary::{build_report, render_table};
use crate::text::TextRenderer;

const HELP: &str = "Commands: N toggles option N, S.N toggles option N of stage S, \
                    n next, p previous, q quit";

pub fn execute(quiz_path: PathBuf) -> Result<()> {
    let setup = parser::parse_quiz_setup(&quiz_path)?;
    let mut quiz = Quiz::new(setup)
        .with_context(|| format!("invalid quiz: {}", quiz_path.display()))?;

    let stdin = io::stdin();
    let stdout = io::stdout();
    run_session(&mut quiz, stdin.lock(), stdout.lock())
}

#[derive(Debug, PartialEq)]
enum Command {
    /// 1-based stage number (if given) and option position.
    Select { stage: Option<usize>, position: usize },
    Next,
    Previous,
    Help,
    Quit,
    Empty,
    Invalid,
}

fn parse_command(line: &str) -> Command {
    match line {
        "" => Command::Empty,
        "n" | "next" => Command::Next,
        "p" | "prev" | "previous" => Command::Previous,
        "h" | "help" | "?" => Command::Help,
        "q" | "quit" => Command::Quit,
        _ => {
            let parsed = match line.split_once('.') {
                Some((stage, position)) => stage
                    .parse()
                    .ok()
                    .zip(position.parse().ok())
                    .map(|(stage, position)| (Some(stage), position)),
                None => line.parse().ok().map(|position| (None, position)),
            };
            match parsed {
                Some((stage, position)) if position > 0 && stage != Some(0) => {
                    Command::Select { stage, position }
                }
                _ => Command::Invalid,
            }
        }
    }
}

/// Drives a quiz from line-based input until it is quit or the input ends.
///
/// The score table is printed at the end if results were reached.
pub fn run_session<R: BufRead, W: Write>(quiz: &mut Quiz, input: R, mut output: W) -> Result<()> {
    let mut renderer = TextRenderer;
    print_page(quiz, &mut renderer, &mut output)?;
    writeln!(output, "{HELP}")?;

    let mut lines = input.lines();
    loop {
        write!(output, "> ")?;
        output.flush()?;

        let Some(line) = lines.next() else {
            writeln!(output)?;
            break;
        };
        let line = line?;

        match parse_command(line.trim()) {
            Command::Empty => {}
            Command::Help => writeln!(output, "{HELP}")?,
            Command::Quit => break,
            Command::Invalid => writeln!(output, "Unknown command: {}", line.trim())?,
            Command::Next => match quiz.next() {
                PageTransition::Moved { .. } | PageTransition::Finished => {
                    print_page(quiz, &mut renderer, &mut output)?
                }
                PageTransition::Blocked => {
                    writeln!(output, "Answer every stage on this page before continuing.")?
                }
                PageTransition::Unchanged => writeln!(output, "Already on the last page.")?,
            },
            Command::Previous => match quiz.previous() {
                PageTransition::Moved { .. } => print_page(quiz, &mut renderer, &mut output)?,
                _ => writeln!(output, "Already on the first page.")?,
            },
            Command::Select { stage, position } => {
                match select(quiz, stage, position) {
                    Ok(true) => print_page(quiz, &mut renderer, &mut output)?,
                    Ok(false) => writeln!(output, "Selection unchanged.")?,
                    Err(message) => writeln!(output, "{message}")?,
                }
            }
        }
    }

    if let Some(report) = build_report(quiz) {
        writeln!(output, "{}", render_table(&report))?;
    }

    Ok(())
}

/// Toggles the option at `position` of a stage on the current page.
fn select(quiz: &mut Quiz, stage: Option<usize>, position: usize) -> Result<bool, String> {
    if quiz.is_finished() {
        return Err("Results are final.".into());
    }

    let window = quiz.pagination().window();
    let index = match stage {
        Some(number) => number - 1,
        None if window.len() == 1 => window.start,
        None => {
            return Err("Several stages on this page, use STAGE.OPTION (e.g. 2.1).".into());
        }
    };
    if !window.contains(&index) {
        return Err(format!("Stage {} is not on this page.", index + 1));
    }

    let value = quiz.setup().stages[index]
        .options
        .get(position - 1)
        .map(|option| option.value.clone())
        .ok_or_else(|| format!("Stage {} has no option {position}.", index + 1))?;

    quiz.toggle(index, &value).map_err(|e| e.to_string())
}

fn print_page<W: Write>(quiz: &Quiz, renderer: &mut TextRenderer, output: &mut W) -> Result<()> {
    writeln!(output)?;
    for line in quiz.render(renderer) {
        writeln!(output, "{line}")?;
    }
    Ok(())
}
