//! quizaurus CLI: validate, play and score quizzes from the terminal.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

mod commands;
mod summary;
mod text;

#[derive(Parser)]
#[command(name = "quizaurus", version, about = "Configurable quiz engine")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate quiz TOML files
    Validate {
        /// Path to quiz file or directory
        #[arg(long)]
        quiz: PathBuf,
    },

    /// Take a quiz interactively
    Play {
        /// Path to quiz file
        #[arg(long)]
        quiz: PathBuf,
    },

    /// Score an answer sheet against a quiz
    Score {
        /// Path to quiz file
        #[arg(long)]
        quiz: PathBuf,

        /// Path to answer sheet TOML
        #[arg(long)]
        answers: PathBuf,

        /// Output format: table, json
        #[arg(long, default_value = "table")]
        format: String,
    },

    /// Create an example quiz
    Init,
}

fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Validate { quiz } => commands::validate::execute(quiz),
        Commands::Play { quiz } => commands::play::execute(quiz),
        Commands::Score {
            quiz,
            answers,
            format,
        } => commands::score::execute(quiz, answers, format),
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
