use thiserror::Error;

/// Provider-level failures from a model client call. Always retryable.
#[derive(Error, Debug)]
pub enum AIError {
    #[error("Groq API error: {0}")]
    Groq(#[from] GroqError),
    #[error("Mock client error: {0}")]
    Mock(String),
}

#[derive(Error, Debug)]
pub enum GroqError {
    #[error("HTTP error: {0}")]
    Http(String),
    #[error("API error: {0}")]
    Api(String),
    #[error("Rate limit exceeded")]
    RateLimit,
    #[error("Authentication failed")]
    Authentication,
}

/// Failures decoding a raw model response into the target schema. Retryable.
#[derive(Error, Debug)]
pub enum ParseError {
    #[error("no JSON structure found in model response")]
    NoJson { raw: String },
    #[error("response JSON does not match the expected schema: {source}")]
    SchemaMismatch {
        #[source]
        source: serde_json::Error,
        raw: String,
    },
}

/// Outcome tag for a single generation attempt, inspected by the retry loop.
#[derive(Error, Debug)]
pub enum AttemptError {
    #[error(transparent)]
    Ai(#[from] AIError),
    #[error(transparent)]
    Parse(#[from] ParseError),
}

/// Terminal failure surfaced to the caller of `generate_mcq` / `generate_fill_blank`.
#[derive(Error, Debug)]
pub enum GenerationError {
    #[error("failed to generate question after {attempts} attempts")]
    RetriesExhausted {
        attempts: usize,
        #[source]
        cause: AttemptError,
    },
    #[error("invalid MCQ: {0}")]
    InvalidMcq(#[from] McqViolation),
}

/// Semantic invariant violations a schema-valid MCQ can still carry.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum McqViolation {
    #[error("expected exactly 4 options, got {0}")]
    OptionCount(usize),
    #[error("correct answer {answer:?} is not one of the options")]
    AnswerNotInOptions { answer: String },
}

/// Failures writing the quiz results CSV.
#[derive(Error, Debug)]
pub enum ExportError {
    #[error("no results to export")]
    Empty,
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
