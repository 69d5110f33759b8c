use study_buddy::clients::mock::{MockClient, MockResponse};
use study_buddy::error::GenerationError;
use study_buddy::generator::{GeneratorConfig, QuestionGenerator};
use study_buddy::questions::Question;
use study_buddy::quiz::{QuestionKind, QuizManager};

fn mcq_response(question: &str, options: [&str; 4], correct: &str) -> MockResponse {
    MockResponse::Success(
        serde_json::json!({
            "question": question,
            "options": options,
            "correct_answer": correct,
        })
        .to_string(),
    )
}

#[tokio::test]
async fn full_session_generate_answer_score() {
    let (client, handle) = MockClient::with_responses(vec![
        mcq_response("Capital of France?", ["Paris", "Rome", "Berlin", "Madrid"], "Paris"),
        mcq_response("Capital of Italy?", ["Paris", "Rome", "Berlin", "Madrid"], "Rome"),
    ]);
    let generator = QuestionGenerator::new(client, GeneratorConfig::default());
    let mut quiz = QuizManager::new();

    quiz.generate_questions(&generator, "Geography", QuestionKind::MultipleChoice, "easy", 2)
        .await
        .unwrap();

    assert_eq!(quiz.len(), 2);
    assert_eq!(handle.call_count(), 2);
    assert!(quiz.questions().all(|q| matches!(q, Question::MultipleChoice(_))));

    quiz.record_answer(0, "Paris");
    quiz.record_answer(1, "Berlin");

    let results = quiz.results();
    assert!(results[0].is_correct);
    assert!(!results[1].is_correct);
    assert_eq!(results[1].correct_answer, "Rome");
    assert_eq!(results[1].user_answer, "Berlin");

    let score = quiz.score();
    assert_eq!(score.correct, 1);
    assert_eq!(score.total, 2);
}

#[tokio::test]
async fn fill_blank_session_scores_loosely() {
    let (client, _handle) = MockClient::with_responses(vec![MockResponse::Success(
        r#"{"question":"The largest planet is _____.","answer":"Jupiter"}"#.to_string(),
    )]);
    let generator = QuestionGenerator::new(client, GeneratorConfig::default());
    let mut quiz = QuizManager::new();

    quiz.generate_questions(&generator, "Astronomy", QuestionKind::FillBlank, "easy", 1)
        .await
        .unwrap();

    quiz.record_answer(0, "jupiter ");
    assert!(quiz.results()[0].is_correct);
}

#[tokio::test]
async fn failed_generation_leaves_the_session_empty() {
    // First question succeeds, second exhausts its budget
    let (client, handle) = MockClient::with_responses(vec![mcq_response(
        "Capital of France?",
        ["Paris", "Rome", "Berlin", "Madrid"],
        "Paris",
    )]);
    let generator = QuestionGenerator::new(client, GeneratorConfig { max_retries: 2 });
    let mut quiz = QuizManager::new();

    let err = quiz
        .generate_questions(&generator, "Geography", QuestionKind::MultipleChoice, "easy", 2)
        .await
        .unwrap_err();

    assert!(matches!(err, GenerationError::RetriesExhausted { .. }));
    assert_eq!(handle.call_count(), 3);
    assert!(quiz.is_empty());
    assert!(quiz.results().is_empty());
}

#[tokio::test]
async fn regenerating_replaces_the_previous_session() {
    let (client, _handle) = MockClient::with_responses(vec![
        mcq_response("Capital of France?", ["Paris", "Rome", "Berlin", "Madrid"], "Paris"),
        mcq_response("Capital of Italy?", ["Paris", "Rome", "Berlin", "Madrid"], "Rome"),
    ]);
    let generator = QuestionGenerator::new(client, GeneratorConfig::default());
    let mut quiz = QuizManager::new();

    quiz.generate_questions(&generator, "Geography", QuestionKind::MultipleChoice, "easy", 1)
        .await
        .unwrap();
    quiz.record_answer(0, "Paris");

    quiz.generate_questions(&generator, "Geography", QuestionKind::MultipleChoice, "easy", 1)
        .await
        .unwrap();

    assert_eq!(quiz.len(), 1);
    let results = quiz.results();
    assert_eq!(results[0].question, "Capital of Italy?");
    // The old answer does not leak into the new session
    assert_eq!(results[0].user_answer, "");
}
