//! Question data model: the two shapes the generator can produce, plus the
//! `Question` enum the session layer stores.
//!
//! Field descriptions are carried as schemars descriptions so the generated
//! JSON Schema steers the model toward the expected encoding.

use schemars::JsonSchema;
use serde::{Deserialize, Deserializer, Serialize};

/// Number of options every multiple-choice question must carry.
pub const MCQ_OPTION_COUNT: usize = 4;

/// Normalize the model's `question` field at deserialization time.
///
/// Models occasionally return a nested object such as
/// `{"description": "What is 2+2?"}` instead of a plain string. A string
/// passes through unchanged; an object yields its `"description"` entry when
/// that entry is a string, otherwise the whole value is stringified.
fn question_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::String(text) => text,
        serde_json::Value::Object(ref fields) => match fields.get("description") {
            Some(serde_json::Value::String(text)) => text.clone(),
            Some(other) => other.to_string(),
            None => value.to_string(),
        },
        other => other.to_string(),
    })
}

/// A multiple-choice question with exactly four options.
///
/// The option count and answer membership are semantic invariants enforced by
/// the generator after parsing; the schema alone cannot express them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[schemars(title = "Multiple Choice Question")]
pub struct McqQuestion {
    #[schemars(description = "The question text.")]
    #[serde(deserialize_with = "question_text")]
    pub question: String,
    #[schemars(description = "List of 4 options.")]
    pub options: Vec<String>,
    #[schemars(description = "The correct answer from the options.")]
    pub correct_answer: String,
}

/// A fill-in-the-blank question whose text marks the blank with `_____`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[schemars(title = "Fill in the Blank Question")]
pub struct FillBlankQuestion {
    #[schemars(description = "The question text with a blank represented by '_____'.")]
    #[serde(deserialize_with = "question_text")]
    pub question: String,
    #[schemars(description = "The correct answer to fill in the blank.")]
    pub answer: String,
}

/// A generated question of either kind, as stored by the quiz session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Question {
    MultipleChoice(McqQuestion),
    FillBlank(FillBlankQuestion),
}

impl Question {
    /// Display text of the question.
    pub fn text(&self) -> &str {
        match self {
            Self::MultipleChoice(q) => &q.question,
            Self::FillBlank(q) => &q.question,
        }
    }

    /// The answer the quiz scores against.
    pub fn expected_answer(&self) -> &str {
        match self {
            Self::MultipleChoice(q) => &q.correct_answer,
            Self::FillBlank(q) => &q.answer,
        }
    }

    /// Answer options, present only for multiple-choice questions.
    pub fn options(&self) -> Option<&[String]> {
        match self {
            Self::MultipleChoice(q) => Some(&q.options),
            Self::FillBlank(_) => None,
        }
    }
}
