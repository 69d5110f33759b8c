//! Quiz session state: generated questions, user answers, scoring, and the
//! results CSV export.

use std::fmt;
use std::path::{Path, PathBuf};

use chrono::Local;
use serde::Serialize;
use tracing::{info, instrument};

use crate::clients::ModelClient;
use crate::error::{ExportError, GenerationError};
use crate::generator::QuestionGenerator;
use crate::questions::Question;

/// Which shape of question a quiz session asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuestionKind {
    MultipleChoice,
    FillBlank,
}

impl QuestionKind {
    /// Parse a question kind from string (case insensitive)
    pub fn parse(s: &str) -> Result<Self, String> {
        match s.to_lowercase().as_str() {
            "mcq" | "multiple-choice" | "multiple_choice" | "multiple choice" => {
                Ok(Self::MultipleChoice)
            }
            "fill-blank" | "fill_blank" | "fill in the blanks" | "fill-in-the-blank" => {
                Ok(Self::FillBlank)
            }
            _ => Err(format!(
                "Unknown question kind: '{}'. Supported: mcq, fill-blank",
                s
            )),
        }
    }
}

impl fmt::Display for QuestionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MultipleChoice => write!(f, "Multiple Choice"),
            Self::FillBlank => write!(f, "Fill in the Blank"),
        }
    }
}

/// One evaluated question, as rendered to the user and written to the CSV.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuestionResult {
    pub question_number: usize,
    pub question: String,
    pub question_type: String,
    pub user_answer: String,
    pub correct_answer: String,
    pub is_correct: bool,
}

/// Session score summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuizScore {
    pub correct: usize,
    pub total: usize,
}

impl QuizScore {
    pub fn percentage(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.correct as f64 / self.total as f64 * 100.0
        }
    }
}

#[derive(Debug, Clone)]
struct QuizEntry {
    question: Question,
    user_answer: Option<String>,
}

/// Holds one quiz session: generated questions and the answers given so far.
///
/// Presentation is the front end's job; this type only stores and scores.
#[derive(Debug, Default)]
pub struct QuizManager {
    entries: Vec<QuizEntry>,
}

impl QuizManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Generate a fresh batch of questions, replacing any previous session.
    ///
    /// Questions are generated strictly one after another; the first failure
    /// aborts the batch and leaves the session empty.
    #[instrument(target = "study_buddy::quiz", skip(self, generator))]
    pub async fn generate_questions<C: ModelClient>(
        &mut self,
        generator: &QuestionGenerator<C>,
        topic: &str,
        kind: QuestionKind,
        difficulty: &str,
        count: usize,
    ) -> Result<(), GenerationError> {
        self.entries.clear();

        let mut entries = Vec::with_capacity(count);
        for _ in 0..count {
            let question = match kind {
                QuestionKind::MultipleChoice => {
                    Question::MultipleChoice(generator.generate_mcq(topic, difficulty).await?)
                }
                QuestionKind::FillBlank => {
                    Question::FillBlank(generator.generate_fill_blank(topic, difficulty).await?)
                }
            };
            entries.push(QuizEntry { question, user_answer: None });
        }
        self.entries = entries;

        info!(count = self.entries.len(), topic, "Quiz generated");
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn questions(&self) -> impl Iterator<Item = &Question> {
        self.entries.iter().map(|entry| &entry.question)
    }

    /// Record the user's answer for question `index`. Returns false when the
    /// index is out of range.
    pub fn record_answer(&mut self, index: usize, answer: impl Into<String>) -> bool {
        match self.entries.get_mut(index) {
            Some(entry) => {
                entry.user_answer = Some(answer.into());
                true
            }
            None => false,
        }
    }

    /// Evaluate every question against its recorded answer.
    ///
    /// MCQ answers must match the correct option verbatim; fill-blank answers
    /// are compared trimmed and case-insensitively. Unanswered questions
    /// count as incorrect.
    pub fn results(&self) -> Vec<QuestionResult> {
        self.entries
            .iter()
            .enumerate()
            .map(|(i, entry)| {
                let user_answer = entry.user_answer.clone().unwrap_or_default();
                let kind = match entry.question {
                    Question::MultipleChoice(_) => QuestionKind::MultipleChoice,
                    Question::FillBlank(_) => QuestionKind::FillBlank,
                };
                QuestionResult {
                    question_number: i + 1,
                    question: entry.question.text().to_string(),
                    question_type: kind.to_string(),
                    is_correct: Self::is_correct(&entry.question, &user_answer),
                    correct_answer: entry.question.expected_answer().to_string(),
                    user_answer,
                }
            })
            .collect()
    }

    /// Correct/total summary over the current session.
    pub fn score(&self) -> QuizScore {
        let results = self.results();
        QuizScore {
            correct: results.iter().filter(|r| r.is_correct).count(),
            total: results.len(),
        }
    }

    /// Write the evaluated results to a timestamped CSV under `dir`,
    /// returning the file path.
    pub fn save_results_csv(&self, dir: &Path) -> Result<PathBuf, ExportError> {
        let results = self.results();
        if results.is_empty() {
            return Err(ExportError::Empty);
        }

        std::fs::create_dir_all(dir)?;
        let filename = format!("quiz_results_{}.csv", Local::now().format("%Y%m%d_%H%M%S"));
        let path = dir.join(filename);

        let mut writer = csv::Writer::from_path(&path)?;
        for result in &results {
            writer.serialize(result)?;
        }
        writer.flush()?;

        info!(path = %path.display(), rows = results.len(), "Saved quiz results");
        Ok(path)
    }

    fn is_correct(question: &Question, user_answer: &str) -> bool {
        match question {
            Question::MultipleChoice(q) => user_answer == q.correct_answer,
            Question::FillBlank(q) => user_answer.trim().eq_ignore_ascii_case(q.answer.trim()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::questions::{FillBlankQuestion, McqQuestion};

    fn sample_mcq() -> Question {
        Question::MultipleChoice(McqQuestion {
            question: "Capital of France?".into(),
            options: vec!["Paris".into(), "Rome".into(), "Berlin".into(), "Madrid".into()],
            correct_answer: "Paris".into(),
        })
    }

    fn sample_blank() -> Question {
        Question::FillBlank(FillBlankQuestion {
            question: "The capital of France is _____.".into(),
            answer: "Paris".into(),
        })
    }

    fn manager_with(questions: Vec<Question>) -> QuizManager {
        QuizManager {
            entries: questions
                .into_iter()
                .map(|question| QuizEntry { question, user_answer: None })
                .collect(),
        }
    }

    #[test]
    fn question_kind_parsing() {
        assert!(matches!(QuestionKind::parse("mcq"), Ok(QuestionKind::MultipleChoice)));
        assert!(matches!(
            QuestionKind::parse("Multiple Choice"),
            Ok(QuestionKind::MultipleChoice)
        ));
        assert!(matches!(QuestionKind::parse("fill-blank"), Ok(QuestionKind::FillBlank)));
        assert!(QuestionKind::parse("essay").is_err());
    }

    #[test]
    fn mcq_answers_compare_verbatim() {
        let mut quiz = manager_with(vec![sample_mcq()]);
        quiz.record_answer(0, "paris");
        assert!(!quiz.results()[0].is_correct);

        quiz.record_answer(0, "Paris");
        assert!(quiz.results()[0].is_correct);
    }

    #[test]
    fn fill_blank_answers_compare_loosely() {
        let mut quiz = manager_with(vec![sample_blank()]);
        quiz.record_answer(0, "  pArIs ");
        let results = quiz.results();
        assert!(results[0].is_correct);
        assert_eq!(results[0].question_type, "Fill in the Blank");
    }

    #[test]
    fn unanswered_questions_count_as_incorrect() {
        let mut quiz = manager_with(vec![sample_mcq(), sample_blank()]);
        quiz.record_answer(0, "Paris");

        let score = quiz.score();
        assert_eq!(score.correct, 1);
        assert_eq!(score.total, 2);
        assert_eq!(score.percentage(), 50.0);
    }

    #[test]
    fn record_answer_rejects_out_of_range_index() {
        let mut quiz = manager_with(vec![sample_mcq()]);
        assert!(!quiz.record_answer(5, "Paris"));
    }

    #[test]
    fn empty_session_exports_nothing() {
        let quiz = QuizManager::new();
        assert!(matches!(
            quiz.save_results_csv(Path::new("/tmp")),
            Err(ExportError::Empty)
        ));
    }

    #[test]
    fn csv_export_writes_one_row_per_question() {
        let mut quiz = manager_with(vec![sample_mcq(), sample_blank()]);
        quiz.record_answer(0, "Paris");
        quiz.record_answer(1, "Rome");

        let dir = std::env::temp_dir().join(format!("study_buddy_test_{}", std::process::id()));
        let path = quiz.save_results_csv(&dir).unwrap();
        let content = std::fs::read_to_string(&path).unwrap();
        let _ = std::fs::remove_dir_all(&dir);

        let mut lines = content.lines();
        assert_eq!(
            lines.next().unwrap(),
            "question_number,question,question_type,user_answer,correct_answer,is_correct"
        );
        assert_eq!(lines.clone().count(), 2);
        assert!(lines.any(|line| line.contains("Rome") && line.ends_with("false")));
    }
}
