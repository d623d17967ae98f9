//! # Chat Agent Tests

mod common;

use crate::common::{setup_provider, setup_tracing, MockAiProvider};
use studykit::agents::{
    chat::{ask, summarize},
    AgentError,
};
use studykit::memory;

#[tokio::test]
async fn test_ask_answers_from_the_document_and_persists() {
    setup_tracing();
    let provider = setup_provider().await;
    let db = &provider.db;

    let doc_id = memory::insert_document(
        db,
        "biology.pdf",
        "Photosynthesis converts light into chemical energy.",
        None,
    )
    .await
    .expect("insert failed");

    let ai = MockAiProvider::new(vec!["It converts light into chemical energy.".to_string()]);

    let answer = ask(db, &ai, doc_id, "What does photosynthesis do?", true)
        .await
        .expect("ask failed");

    assert_eq!(answer.document_id, doc_id);
    assert_eq!(answer.answer, "It converts light into chemical energy.");

    // The document content is in the prompt; with no prior exchanges there
    // is no history block.
    let calls = ai.call_history.read().unwrap();
    assert_eq!(calls.len(), 1);
    assert!(calls[0].1.contains("Photosynthesis converts light"));
    assert!(calls[0].1.contains("# Question: What does photosynthesis do?"));
    assert!(!calls[0].1.contains("Previous Q&A:"));

    // The exchange lands in the history.
    let history = memory::get_chat_history(db, doc_id, 10)
        .await
        .expect("history failed");
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].question, "What does photosynthesis do?");
    assert_eq!(history[0].answer, "It converts light into chemical energy.");
}

#[tokio::test]
async fn test_follow_up_replays_clipped_history() {
    setup_tracing();
    let provider = setup_provider().await;
    let db = &provider.db;

    let doc_id = memory::insert_document(db, "notes.pdf", "content", None)
        .await
        .expect("insert failed");

    let long_answer = "y".repeat(300);
    let ai = MockAiProvider::new(vec![long_answer.clone(), "Short.".to_string()]);

    ask(db, &ai, doc_id, "first question?", true)
        .await
        .expect("ask failed");
    ask(db, &ai, doc_id, "and a follow-up?", true)
        .await
        .expect("ask failed");

    let calls = ai.call_history.read().unwrap();
    let follow_up_prompt = &calls[1].1;
    assert!(follow_up_prompt.contains("Previous Q&A:"));
    assert!(follow_up_prompt.contains("Q: first question?"));
    // The replayed answer is clipped to 200 characters with an ellipsis.
    assert!(follow_up_prompt.contains(&format!("A: {}...", "y".repeat(200))));
    assert!(!follow_up_prompt.contains(&"y".repeat(201)));
}

#[tokio::test]
async fn test_history_can_be_disabled() {
    setup_tracing();
    let provider = setup_provider().await;
    let db = &provider.db;

    let doc_id = memory::insert_document(db, "notes.pdf", "content", None)
        .await
        .expect("insert failed");
    memory::insert_chat_message(db, doc_id, "earlier question?", "earlier answer")
        .await
        .expect("insert failed");

    let ai = MockAiProvider::new(vec!["Answer.".to_string()]);
    ask(db, &ai, doc_id, "fresh question?", false)
        .await
        .expect("ask failed");

    let calls = ai.call_history.read().unwrap();
    assert!(!calls[0].1.contains("Previous Q&A:"));
    assert!(!calls[0].1.contains("earlier question?"));
}

#[tokio::test]
async fn test_summarize_returns_text_without_persisting() {
    setup_tracing();
    let provider = setup_provider().await;
    let db = &provider.db;

    let doc_id = memory::insert_document(db, "notes.pdf", "The Krebs cycle is central.", None)
        .await
        .expect("insert failed");

    let ai = MockAiProvider::new(vec!["A tidy summary.".to_string()]);
    let summary = summarize(db, &ai, doc_id, Some("Krebs cycle"))
        .await
        .expect("summarize failed");

    assert_eq!(summary, "A tidy summary.");

    let calls = ai.call_history.read().unwrap();
    assert!(calls[0].0.contains("study summaries"));
    assert!(calls[0].1.contains("Focus on the topic \"Krebs cycle\""));
    assert!(calls[0].1.contains("The Krebs cycle is central."));

    // Summaries are on demand only; the chat history stays empty.
    let history = memory::get_chat_history(db, doc_id, 10)
        .await
        .expect("history failed");
    assert!(history.is_empty());
}

#[tokio::test]
async fn test_ask_for_unknown_document_is_an_error() {
    setup_tracing();
    let provider = setup_provider().await;

    let ai = MockAiProvider::new(vec![]);
    match ask(&provider.db, &ai, 7, "anyone home?", true).await {
        Err(AgentError::DocumentNotFound(7)) => {}
        other => panic!("Expected DocumentNotFound, got {other:?}"),
    }
    assert_eq!(ai.call_count(), 0);
}
