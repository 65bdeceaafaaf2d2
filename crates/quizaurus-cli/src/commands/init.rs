//! The `quizaurus init` command.

use std::path::Path;

use anyhow::Result;

pub fn execute() -> Result<()> {
    write_if_missing(Path::new("quiz.toml"), EXAMPLE_QUIZ)?;
    write_if_missing(Path::new("answers.toml"), EXAMPLE_ANSWERS)?;

    println!("\nNext steps:");
    println!("  1. Edit quiz.toml with your own stages");
    println!("  2. Run: quizaurus validate --quiz quiz.toml");
    println!("  3. Run: quizaurus play --quiz quiz.toml");
    println!("  4. Run: quizaurus score --quiz quiz.toml --answers answers.toml");

    Ok(())
}

fn write_if_missing(path: &Path, content: &str) -> Result<()> {
    if path.exists() {
        println!("{} already exists, skipping.", path.display());
    } else {
        std::fs::write(path, content)?;
        println!("Created {}", path.display());
    }
    Ok(())
}

const EXAMPLE_QUIZ: &str = r#"[quiz]
title = "Example Quiz"
stages_per_page = 2
allow_incomplete_answers = false

[quiz.navigation]
results = "Show results"

[[stages]]
title = "Which planet is closest to the sun?"
correct_answer = "mercury"

[[stages.options]]
value = "venus"
content = "Venus"

[[stages.options]]
value = "mercury"
content = "Mercury"

[[stages.options]]
value = "mars"
content = "Mars"

[[stages]]
title = "Which of these are primary colors?"
description = "Pick every primary color."
correct_answer = ["red", "blue"]
max_answers = 3
remap_score = 10.0

[stages.score]
allow_negative = false
incorrect_answer_mult = 1.0

[[stages.options]]
value = "red"
content = "Red"

[[stages.options]]
value = "green"
content = "Green"

[[stages.options]]
value = "blue"
content = "Blue"

[[stages]]
title = "How many legs does a spider have?"
correct_answer = "8"
instant_feedback = true

[[stages.options]]
value = "6"
content = "Six"

[[stages.options]]
value = "8"
content = "Eight"
"#;

const EXAMPLE_ANSWERS: &str = r#"# Stages are numbered from 0.

[[answers]]
stage = 0
values = ["mercury"]

[[answers]]
stage = 1
values = ["red", "green"]

[[answers]]
stage = 2
values = ["8"]
"#;
