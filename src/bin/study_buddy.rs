//! Interactive terminal front end: pick a topic, answer the questions, get a
//! score and an optional CSV export.

use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use study_buddy::clients::{GroqClient, GroqConfig, GroqModel};
use study_buddy::config::KeyFromEnv;
use study_buddy::generator::{GeneratorConfig, QuestionGenerator, DEFAULT_DIFFICULTY};
use study_buddy::questions::Question;
use study_buddy::quiz::{QuestionKind, QuizManager};

/// Generate and take an AI-powered quiz from your terminal
#[derive(Debug, Parser)]
#[command(name = "study-buddy", version)]
struct Args {
    /// Quiz topic
    #[arg(short, long, default_value = "general knowledge")]
    topic: String,

    /// Difficulty level (easy, medium, hard)
    #[arg(short, long, default_value = DEFAULT_DIFFICULTY)]
    difficulty: String,

    /// Question kind: mcq or fill-blank
    #[arg(short = 'k', long, default_value = "mcq", value_parser = QuestionKind::parse)]
    kind: QuestionKind,

    /// Number of questions to generate
    #[arg(short = 'n', long, default_value_t = 5)]
    questions: usize,

    /// Override the Groq model id
    #[arg(short, long)]
    model: Option<String>,

    /// Maximum generation attempts per question
    #[arg(long, default_value_t = 3)]
    max_retries: usize,

    /// Directory to write the results CSV into (no export when omitted)
    #[arg(long)]
    results_dir: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = Args::parse();

    let mut config = GroqConfig {
        api_key: GroqClient::find_key_with_user(),
        ..GroqConfig::default()
    };
    if let Some(model) = args.model.clone() {
        config.model = GroqModel::Override(model);
    }
    let generator = QuestionGenerator::new(
        GroqClient::new(config),
        GeneratorConfig { max_retries: args.max_retries },
    );

    println!(
        "Generating {} {} question(s) about {}...",
        args.questions, args.kind, args.topic
    );
    let mut quiz = QuizManager::new();
    quiz.generate_questions(&generator, &args.topic, args.kind, &args.difficulty, args.questions)
        .await
        .context("could not generate quiz")?;

    let questions: Vec<Question> = quiz.questions().cloned().collect();
    for (i, question) in questions.iter().enumerate() {
        println!();
        println!("Question {}: {}", i + 1, question.text());
        if let Some(options) = question.options() {
            for (n, option) in options.iter().enumerate() {
                println!("  {}. {}", n + 1, option);
            }
        }
        let answer = read_answer(question)?;
        quiz.record_answer(i, answer);
    }

    println!();
    let score = quiz.score();
    println!(
        "You scored {} out of {} ({:.0}%)",
        score.correct,
        score.total,
        score.percentage()
    );
    for result in quiz.results() {
        if result.is_correct {
            println!("Question {}: {} - Correct", result.question_number, result.question);
        } else {
            println!(
                "Question {}: {} - Incorrect. Correct answer: {}",
                result.question_number, result.question, result.correct_answer
            );
            println!("  Your answer: {}", result.user_answer);
        }
    }

    if let Some(dir) = args.results_dir {
        let path = quiz.save_results_csv(&dir).context("could not save results")?;
        println!();
        println!("Results saved to {}", path.display());
    }

    Ok(())
}

/// Read one answer from stdin; for MCQ a digit 1-4 selects the option,
/// anything else is taken as the literal answer text.
fn read_answer(question: &Question) -> anyhow::Result<String> {
    print!("Your answer: ");
    io::stdout().flush()?;

    let mut input = String::new();
    io::stdin().read_line(&mut input).context("failed to read answer")?;
    let input = input.trim().to_string();

    if let Some(options) = question.options() {
        if let Ok(choice) = input.parse::<usize>() {
            if (1..=options.len()).contains(&choice) {
                return Ok(options[choice - 1].clone());
            }
        }
    }
    Ok(input)
}
