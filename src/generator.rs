//! Question generation: drive a model client through a bounded retry loop,
//! parse each response against the target schema, and validate the result.
//!
//! Each `generate_*` call is one synchronous sequence of attempts; the first
//! successful parse wins and no further attempts are made. There is no
//! backoff, no caching across calls, and no shared mutable state.

use schemars::JsonSchema;
use serde::de::DeserializeOwned;
use tracing::{error, info, instrument, warn};

use crate::clients::ModelClient;
use crate::error::{AttemptError, GenerationError, McqViolation};
use crate::parser::QuestionParser;
use crate::prompts;
use crate::questions::{FillBlankQuestion, McqQuestion, MCQ_OPTION_COUNT};

/// Difficulty used when the caller has no preference.
pub const DEFAULT_DIFFICULTY: &str = "medium";

/// Generation settings, injected at construction so tests can pin the bound.
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    /// Maximum attempts per `generate_*` call. Values below 1 count as 1.
    pub max_retries: usize,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self { max_retries: 3 }
    }
}

/// Produces one validated question per call by prompting a model client.
#[derive(Debug, Clone)]
pub struct QuestionGenerator<C: ModelClient> {
    client: C,
    config: GeneratorConfig,
}

impl<C: ModelClient> QuestionGenerator<C> {
    pub fn new(client: C, config: GeneratorConfig) -> Self {
        info!(max_retries = config.max_retries, "Creating new QuestionGenerator");
        Self { client, config }
    }

    /// Get a reference to the underlying client
    pub fn client(&self) -> &C {
        &self.client
    }

    /// Get a reference to the generation settings
    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Generate one multiple-choice question about `topic`.
    ///
    /// After a successful parse the semantic invariant is enforced: exactly
    /// four options, correct answer among them. A violation is terminal for
    /// this call and is not retried.
    #[instrument(target = "study_buddy::generator", skip(self))]
    pub async fn generate_mcq(
        &self,
        topic: &str,
        difficulty: &str,
    ) -> Result<McqQuestion, GenerationError> {
        let parser = QuestionParser::<McqQuestion>::new();
        let prompt = prompts::mcq_prompt(topic, difficulty, &parser.format_instructions());

        let question = self.retry_and_parse(&prompt, &parser, topic, difficulty).await?;

        if question.options.len() != MCQ_OPTION_COUNT {
            error!(options = question.options.len(), "MCQ option count violation");
            return Err(McqViolation::OptionCount(question.options.len()).into());
        }
        if !question.options.contains(&question.correct_answer) {
            error!(correct_answer = %question.correct_answer, "MCQ correct answer not in options");
            return Err(McqViolation::AnswerNotInOptions {
                answer: question.correct_answer.clone(),
            }
            .into());
        }

        info!("Generated a valid MCQ question");
        Ok(question)
    }

    /// Generate one fill-in-the-blank question about `topic`.
    ///
    /// No post-parse invariant beyond successful structured parsing; blank
    /// marker presence is requested by the prompt but not enforced.
    #[instrument(target = "study_buddy::generator", skip(self))]
    pub async fn generate_fill_blank(
        &self,
        topic: &str,
        difficulty: &str,
    ) -> Result<FillBlankQuestion, GenerationError> {
        let parser = QuestionParser::<FillBlankQuestion>::new();
        let prompt = prompts::fill_blank_prompt(topic, difficulty, &parser.format_instructions());

        let question = self.retry_and_parse(&prompt, &parser, topic, difficulty).await?;

        info!("Generated a valid fill in the blank question");
        Ok(question)
    }

    /// Bounded retry loop: invoke the client, parse, return the first success.
    ///
    /// Every attempt's outcome is an explicit `Result` inspected here; failed
    /// attempts are logged and retried immediately until the budget runs out,
    /// at which point the final cause is wrapped and surfaced.
    async fn retry_and_parse<T>(
        &self,
        prompt: &str,
        parser: &QuestionParser<T>,
        topic: &str,
        difficulty: &str,
    ) -> Result<T, GenerationError>
    where
        T: DeserializeOwned + JsonSchema,
    {
        let budget = self.config.max_retries.max(1);
        let mut attempt = 0;

        loop {
            attempt += 1;
            info!(attempt, topic, difficulty, "Generating question");

            match self.attempt(prompt, parser).await {
                Ok(parsed) => {
                    info!(attempt, "Successfully parsed question");
                    return Ok(parsed);
                }
                Err(cause) => {
                    warn!(attempt, error = %cause, "Generation attempt failed");
                    if attempt >= budget {
                        error!(attempts = attempt, "Retry budget exhausted");
                        return Err(GenerationError::RetriesExhausted { attempts: attempt, cause });
                    }
                }
            }
        }
    }

    /// One attempt: a blocking round trip to the client, then a parse.
    async fn attempt<T>(&self, prompt: &str, parser: &QuestionParser<T>) -> Result<T, AttemptError>
    where
        T: DeserializeOwned + JsonSchema,
    {
        let raw = self.client.invoke(prompt.to_string()).await?;
        Ok(parser.parse(&raw)?)
    }
}
