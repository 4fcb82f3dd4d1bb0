use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use aptitude_quiz::{Category, Quiz, QuizError, TimerConfig, DEFAULT_HINT_DELAY, DEFAULT_TIME_LIMIT};
use clap::Parser;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// JSON file to load the questions from (defaults to the bundled set)
    #[arg(short, long)]
    questions: Option<PathBuf>,

    /// Category to preselect: "Logical Thinking", "DSA" or "JavaScript Concepts"
    #[arg(short, long)]
    category: Option<Category>,

    /// Seconds allowed per question
    #[arg(long, default_value_t = DEFAULT_TIME_LIMIT)]
    time_limit: u32,

    /// Seconds before the hint is revealed
    #[arg(long, default_value_t = DEFAULT_HINT_DELAY)]
    hint_delay: u32,

    /// Write logs to this file (the terminal is owned by the quiz)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    if let Some(path) = &args.log_file {
        if let Err(e) = init_logging(path) {
            eprintln!("Failed to open log file {}: {}", path.display(), e);
            std::process::exit(1);
        }
    }

    if let Err(e) = run(args).await {
        tracing::error!(error = %e, "quiz failed");
        eprintln!("Error running quiz: {}", e);
        std::process::exit(1);
    }
}

async fn run(args: Args) -> Result<(), QuizError> {
    let quiz = match &args.questions {
        Some(path) => Quiz::from_json(path)?,
        None => Quiz::builtin()?,
    };

    let mut quiz = quiz.with_timer(TimerConfig::new(args.time_limit, args.hint_delay)?);
    if let Some(category) = args.category {
        quiz = quiz.with_category(category);
    }

    tracing::info!(questions = quiz.questions().len(), "starting quiz");
    quiz.run().await
}

fn init_logging(path: &Path) -> std::io::Result<()> {
    let file = File::create(path)?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .init();
    Ok(())
}
