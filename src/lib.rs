pub mod clients;
pub mod config;
pub mod error;
pub mod generator;
pub mod parser;
pub mod prompts;
pub mod questions;
pub mod quiz;

// Convenient re-exports
pub use generator::{GeneratorConfig, QuestionGenerator, DEFAULT_DIFFICULTY};
pub use questions::{FillBlankQuestion, McqQuestion, Question};
pub use quiz::{QuestionKind, QuizManager};
