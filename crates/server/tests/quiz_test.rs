//! # Quiz E2E Tests
//!
//! Covers quiz generation (including the mixed-difficulty band fan-out),
//! answer recording, and the performance stats endpoint.

mod common;

use anyhow::Result;
use common::{ai_response, TestApp, TestDataBuilder};
use httpmock::prelude::*;
use serde_json::{json, Value};

const MATH_NOTES: &str = "Addition combines numbers. Multiplication is repeated addition.";

/// A model reply carrying `count` valid questions at the given difficulty.
fn band_payload(difficulty: &str, count: usize) -> String {
    let questions: Vec<Value> = (0..count)
        .map(|i| {
            json!({
                "question": format!("A {difficulty} question number {i}?"),
                "options": ["a", "b", "c", "d"],
                "correct_answer": 1,
                "difficulty": difficulty,
                "topic": "General"
            })
        })
        .collect();
    json!({ "questions": questions }).to_string()
}

#[tokio::test]
async fn test_mixed_quiz_generates_one_call_per_band() -> Result<()> {
    let app = TestApp::spawn().await?;
    let builder = TestDataBuilder::new(&app).await?;
    let document_id = builder.add_document("math.pdf", MATH_NOTES, None).await?;

    // The band goal lives in the system prompt, so it discriminates the calls.
    let easy_mock = app.mock_server.mock(|when, then| {
        when.method(POST)
            .path("/v1/chat/completions")
            .body_contains("Test basic recall and understanding.");
        then.status(200).json_body(ai_response(&band_payload("easy", 2)));
    });
    let medium_mock = app.mock_server.mock(|when, then| {
        when.method(POST)
            .path("/v1/chat/completions")
            .body_contains("Test application and analysis.");
        then.status(200)
            .json_body(ai_response(&band_payload("medium", 2)));
    });
    let hard_mock = app.mock_server.mock(|when, then| {
        when.method(POST)
            .path("/v1/chat/completions")
            .body_contains("Test synthesis, evaluation, and deep understanding.");
        then.status(200).json_body(ai_response(&band_payload("hard", 2)));
    });

    let body: Value = app
        .client
        .post(format!("{}/quiz/generate", app.address))
        .json(&json!({ "document_id": document_id, "num_questions": 6 }))
        .send()
        .await?
        .error_for_status()?
        .json()
        .await?;

    let result = &body["result"];
    assert_eq!(result["degraded"], false);
    let questions = result["questions"].as_array().expect("questions array");
    assert_eq!(questions.len(), 6);
    let difficulties: Vec<&str> = questions
        .iter()
        .filter_map(|q| q["difficulty"].as_str())
        .collect();
    assert_eq!(difficulties.iter().filter(|d| **d == "easy").count(), 2);
    assert_eq!(difficulties.iter().filter(|d| **d == "hard").count(), 2);

    easy_mock.assert();
    medium_mock.assert();
    hard_mock.assert();
    Ok(())
}

#[tokio::test]
async fn test_answering_records_attempts_and_updates_stats() -> Result<()> {
    let app = TestApp::spawn().await?;
    let builder = TestDataBuilder::new(&app).await?;
    let document_id = builder.add_document("math.pdf", MATH_NOTES, None).await?;
    let quiz_id = builder
        .add_quiz_question(document_id, "What is 2 + 2?", &["3", "4", "5", "6"], 1, "easy")
        .await?;

    // One correct answer.
    let correct: Value = app
        .client
        .post(format!("{}/quiz/answer", app.address))
        .json(&json!({ "quiz_id": quiz_id, "answer": 1 }))
        .send()
        .await?
        .error_for_status()?
        .json()
        .await?;
    assert_eq!(correct["result"]["is_correct"], true);
    assert_eq!(correct["result"]["correct_answer"], 1);

    // One wrong answer.
    let wrong: Value = app
        .client
        .post(format!("{}/quiz/answer", app.address))
        .json(&json!({ "quiz_id": quiz_id, "answer": 3 }))
        .send()
        .await?
        .error_for_status()?
        .json()
        .await?;
    assert_eq!(wrong["result"]["is_correct"], false);

    let stats: Value = app
        .client
        .get(format!("{}/quiz/stats?document_id={document_id}", app.address))
        .send()
        .await?
        .error_for_status()?
        .json()
        .await?;
    let result = &stats["result"];
    assert_eq!(result["total_attempts"], 2);
    assert_eq!(result["correct_answers"], 1);
    assert_eq!(result["accuracy"], 50.0);
    assert_eq!(result["by_difficulty"][0]["difficulty"], "easy");
    assert_eq!(
        result["recommendation"],
        "Good progress. Focus on the topics where you made mistakes."
    );
    Ok(())
}

#[tokio::test]
async fn test_listing_filters_by_document_and_difficulty() -> Result<()> {
    let app = TestApp::spawn().await?;
    let builder = TestDataBuilder::new(&app).await?;
    let document_id = builder.add_document("math.pdf", MATH_NOTES, None).await?;
    builder
        .add_quiz_question(document_id, "What is 2 + 2?", &["3", "4", "5", "6"], 1, "easy")
        .await?;
    builder
        .add_quiz_question(
            document_id,
            "Why is multiplication repeated addition?",
            &["a", "b", "c", "d"],
            0,
            "hard",
        )
        .await?;
    let other_doc = builder.add_document("other.pdf", "Unrelated.", None).await?;
    builder
        .add_quiz_question(other_doc, "Unrelated?", &["a", "b", "c", "d"], 2, "easy")
        .await?;

    let listed: Value = app
        .client
        .get(format!("{}/quiz?document_id={document_id}", app.address))
        .send()
        .await?
        .error_for_status()?
        .json()
        .await?;
    let questions = listed["result"].as_array().expect("questions array");
    assert_eq!(questions.len(), 2);
    assert_eq!(questions[0]["question"], "What is 2 + 2?");
    assert_eq!(questions[0]["options"], json!(["3", "4", "5", "6"]));

    let easy_only: Value = app
        .client
        .get(format!(
            "{}/quiz?document_id={document_id}&difficulty=easy",
            app.address
        ))
        .send()
        .await?
        .error_for_status()?
        .json()
        .await?;
    assert_eq!(easy_only["result"].as_array().expect("questions array").len(), 1);
    Ok(())
}

#[tokio::test]
async fn test_answer_for_unknown_quiz_is_404() -> Result<()> {
    let app = TestApp::spawn().await?;

    let response = app
        .client
        .post(format!("{}/quiz/answer", app.address))
        .json(&json!({ "quiz_id": 99, "answer": 0 }))
        .send()
        .await?;

    assert_eq!(response.status(), 404);
    let body: Value = response.json().await?;
    assert_eq!(body["error"], "Quiz question not found: 99");
    Ok(())
}

#[tokio::test]
async fn test_stats_without_document_cover_the_whole_store() -> Result<()> {
    let app = TestApp::spawn().await?;

    let stats: Value = app
        .client
        .get(format!("{}/quiz/stats", app.address))
        .send()
        .await?
        .error_for_status()?
        .json()
        .await?;

    let result = &stats["result"];
    assert_eq!(result["total_attempts"], 0);
    assert_eq!(result["correct_answers"], 0);
    assert_eq!(result["accuracy"], 0.0);
    assert_eq!(
        result["recommendation"],
        "Take some quizzes to see your performance analysis."
    );
    Ok(())
}
