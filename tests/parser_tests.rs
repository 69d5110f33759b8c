use study_buddy::error::ParseError;
use study_buddy::parser::QuestionParser;
use study_buddy::questions::{FillBlankQuestion, McqQuestion};

fn mcq_parser() -> QuestionParser<McqQuestion> {
    QuestionParser::new()
}

#[test]
fn parse_plain_json_object() {
    let raw = r#"{"question":"Capital of France?","options":["Paris","Rome","Berlin","Madrid"],"correct_answer":"Paris"}"#;
    let q = mcq_parser().parse(raw).unwrap();
    assert_eq!(q.question, "Capital of France?");
    assert_eq!(q.options.len(), 4);
    assert_eq!(q.correct_answer, "Paris");
}

#[test]
fn parse_json_embedded_in_prose() {
    let raw = r#"Sure! Here is your question:
{"question":"Capital of France?","options":["Paris","Rome","Berlin","Madrid"],"correct_answer":"Paris"}
Good luck!"#;
    let q = mcq_parser().parse(raw).unwrap();
    assert_eq!(q.correct_answer, "Paris");
}

#[test]
fn parse_json_inside_code_fence() {
    let raw = "```json\n{\"question\":\"The capital of France is _____.\",\"answer\":\"Paris\"}\n```";
    let parser: QuestionParser<FillBlankQuestion> = QuestionParser::new();
    let q = parser.parse(raw).unwrap();
    assert_eq!(q.answer, "Paris");
}

#[test]
fn parse_returns_first_matching_structure() {
    let raw = r#"
{"question":"First?","options":["a","b","c","d"],"correct_answer":"a"}
{"question":"Second?","options":["e","f","g","h"],"correct_answer":"e"}
"#;
    let q = mcq_parser().parse(raw).unwrap();
    assert_eq!(q.question, "First?");
}

#[test]
fn parse_descends_into_wrapper_objects() {
    let raw = r#"{"result":{"question":"Capital of France?","options":["Paris","Rome","Berlin","Madrid"],"correct_answer":"Paris"}}"#;
    let q = mcq_parser().parse(raw).unwrap();
    assert_eq!(q.correct_answer, "Paris");
}

#[test]
fn braces_inside_json_strings_do_not_confuse_the_scanner() {
    let raw = r#"{"question":"What do { and } delimit in JSON?","options":["objects","arrays","strings","numbers"],"correct_answer":"objects"}"#;
    let q = mcq_parser().parse(raw).unwrap();
    assert_eq!(q.question, "What do { and } delimit in JSON?");
}

#[test]
fn missing_json_is_a_no_json_error() {
    let err = mcq_parser().parse("I could not come up with a question.").unwrap_err();
    match err {
        ParseError::NoJson { raw } => assert!(raw.contains("could not")),
        other => panic!("expected NoJson, got {other:?}"),
    }
}

#[test]
fn wrong_shape_is_a_schema_mismatch() {
    let raw = r#"{"answer":"Paris"}"#;
    let err = mcq_parser().parse(raw).unwrap_err();
    match err {
        ParseError::SchemaMismatch { raw: reported, .. } => assert_eq!(reported, raw),
        other => panic!("expected SchemaMismatch, got {other:?}"),
    }
}

#[test]
fn format_instructions_carry_the_schema() {
    let instructions = mcq_parser().format_instructions();
    assert!(instructions.contains("## Response Format"));
    assert!(instructions.contains("Multiple Choice Question"));
    assert!(instructions.contains("correct_answer"));

    let blank: QuestionParser<FillBlankQuestion> = QuestionParser::new();
    assert!(blank.format_instructions().contains("Fill in the Blank Question"));
}
