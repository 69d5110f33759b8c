//! Structured-output parsing: scan the raw model text for JSON structures and
//! deserialize the first one that matches the target schema.
//!
//! Models wrap their JSON in prose, code fences, or stray brackets; the
//! scanner is string-aware and escape-aware so braces inside JSON strings do
//! not confuse it.

use std::marker::PhantomData;

use schemars::{schema_for, JsonSchema};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::error::ParseError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SpanKind {
    Object,
    Array,
}

/// Byte coordinates of one JSON structure, `end` inclusive of the closing
/// bracket. Children are nested structures, used as fallback parse targets.
#[derive(Debug, Clone)]
struct JsonSpan {
    start: usize,
    end: usize,
    children: Vec<JsonSpan>,
}

#[derive(Debug)]
struct Frame {
    start: usize,
    kind: SpanKind,
    children: Vec<JsonSpan>,
}

/// Find all root-level JSON object/array structures in the given text.
fn find_json_spans(text: &str) -> Vec<JsonSpan> {
    let bytes = text.as_bytes();
    let mut roots: Vec<JsonSpan> = Vec::new();
    let mut stack: Vec<Frame> = Vec::new();

    let mut in_string = false;
    let mut escape = false;

    for (i, &b) in bytes.iter().enumerate() {
        if in_string {
            if escape {
                escape = false;
                continue;
            }
            match b {
                b'\\' => escape = true,
                b'"' => in_string = false,
                _ => {}
            }
            continue;
        }

        match b {
            b'"' => in_string = true,
            b'{' => stack.push(Frame { start: i, kind: SpanKind::Object, children: Vec::new() }),
            b'[' => stack.push(Frame { start: i, kind: SpanKind::Array, children: Vec::new() }),
            b'}' | b']' => {
                let expected = if b == b'}' { SpanKind::Object } else { SpanKind::Array };
                if let Some(frame) = stack.pop() {
                    if frame.kind == expected {
                        let span = JsonSpan { start: frame.start, end: i, children: frame.children };
                        if let Some(parent) = stack.last_mut() {
                            parent.children.push(span);
                        } else {
                            roots.push(span);
                        }
                    }
                    // Mismatched bracket: drop the unbalanced frame
                }
            }
            _ => {}
        }
    }

    debug!(target: "study_buddy::parser", count = roots.len(), "found root JSON structures");
    roots
}

/// Try to deserialize a span as `T`; on failure record the error and descend
/// into the span's children. First success wins.
fn deserialize_span<T: DeserializeOwned>(
    text: &str,
    span: &JsonSpan,
    last_error: &mut Option<serde_json::Error>,
) -> Option<T> {
    let candidate = &text[span.start..=span.end];
    match serde_json::from_str::<T>(candidate) {
        Ok(parsed) => return Some(parsed),
        Err(e) => *last_error = Some(e),
    }
    for child in &span.children {
        if let Some(parsed) = deserialize_span(text, child, last_error) {
            return Some(parsed);
        }
    }
    None
}

/// Schema-aware parser for one question shape, instantiated per schema.
///
/// `format_instructions` renders the schema for the prompt; `parse` decodes a
/// raw response into a validated `T` or reports why it could not.
#[derive(Debug, Clone, Default)]
pub struct QuestionParser<T> {
    _schema: PhantomData<T>,
}

impl<T: DeserializeOwned + JsonSchema> QuestionParser<T> {
    pub fn new() -> Self {
        Self { _schema: PhantomData }
    }

    /// Response-format section appended to prompts, carrying the JSON Schema for `T`.
    pub fn format_instructions(&self) -> String {
        let schema = schema_for!(T);
        let schema_json = serde_json::to_string_pretty(&schema)
            .unwrap_or_else(|_| "Schema serialization failed".to_string());

        format!(
            "## Response Format\nRespond with valid JSON matching this schema (other text may surround it):\n```json\n{}\n```",
            schema_json
        )
    }

    /// Decode a raw model response into a validated `T`.
    pub fn parse(&self, raw: &str) -> Result<T, ParseError> {
        let spans = find_json_spans(raw);
        if spans.is_empty() {
            return Err(ParseError::NoJson { raw: raw.to_string() });
        }

        let mut last_error: Option<serde_json::Error> = None;
        for span in &spans {
            if let Some(parsed) = deserialize_span::<T>(raw, span, &mut last_error) {
                return Ok(parsed);
            }
        }

        match last_error {
            Some(source) => Err(ParseError::SchemaMismatch { source, raw: raw.to_string() }),
            // Unreachable in practice: a non-empty span list always yields at
            // least one deserialization attempt.
            None => Err(ParseError::NoJson { raw: raw.to_string() }),
        }
    }
}
