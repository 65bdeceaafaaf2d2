//! The `quizaurus validate` command.

use std::path::PathBuf;

use anyhow::Result;

use quizaurus_core::parser;

pub fn execute(quiz_path: PathBuf) -> Result<()> {
    let quizzes = if quiz_path.is_dir() {
        parser::load_quiz_directory(&quiz_path)?
    } else {
        vec![(quiz_path.clone(), parser::parse_quiz_setup(&quiz_path)?)]
    };

    let mut total_warnings = 0;

    for (path, setup) in &quizzes {
        let name = setup
            .title
            .clone()
            .unwrap_or_else(|| path.display().to_string());
        println!("Quiz: {} ({} stages)", name, setup.stages.len());

        let warnings = parser::validate_quiz_setup(setup);
        for w in &warnings {
            let prefix = w
                .stage
                .map(|stage| format!("  [stage {}]", stage + 1))
                .unwrap_or_else(|| "  ".to_string());
            println!("{prefix} WARNING: {}", w.message);
        }
        total_warnings += warnings.len();
    }

    if total_warnings == 0 {
        println!("All quizzes valid.");
    } else {
        println!("\n{total_warnings} warning(s) found.");
    }

    Ok(())
}
