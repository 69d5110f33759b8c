//! Prompt templates for the two question kinds. Each template takes the topic
//! and difficulty as substitution values and embeds the parser's format
//! instructions so the model is steered toward the expected JSON encoding.

/// Prompt for one multiple-choice question.
pub fn mcq_prompt(topic: &str, difficulty: &str, format_instructions: &str) -> String {
    format!(
        "Generate one {difficulty} difficulty multiple-choice quiz question about {topic}.\n\
         Provide exactly 4 answer options, and the correct answer must be copied verbatim \
         from the options.\n\n{format_instructions}"
    )
}

/// Prompt for one fill-in-the-blank question.
pub fn fill_blank_prompt(topic: &str, difficulty: &str, format_instructions: &str) -> String {
    format!(
        "Generate one {difficulty} difficulty fill-in-the-blank quiz question about {topic}.\n\
         The question text must contain a blank represented by '_____' and the answer must \
         be the word or phrase that fills it.\n\n{format_instructions}"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn templates_substitute_topic_and_difficulty() {
        let prompt = mcq_prompt("Geography", "easy", "## Response Format");
        assert!(prompt.contains("Geography"));
        assert!(prompt.contains("easy"));
        assert!(prompt.ends_with("## Response Format"));

        let prompt = fill_blank_prompt("Rust", "hard", "## Response Format");
        assert!(prompt.contains("'_____'"));
        assert!(prompt.contains("Rust"));
    }
}
