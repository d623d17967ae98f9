//! # Flashcard Agent Tests

mod common;

use crate::common::{setup_provider, setup_tracing, MockAiProvider};
use serde_json::json;
use studykit::agents::{flashcard::generate_flashcards, AgentError};
use studykit::memory;

#[tokio::test]
async fn test_generates_and_stores_flashcards() {
    setup_tracing();
    let provider = setup_provider().await;
    let db = &provider.db;

    let doc_id = memory::insert_document(db, "biology.pdf", "Cells are the unit of life.", None)
        .await
        .expect("insert failed");

    let response = json!({
        "flashcards": [
            {"question": "What is a cell?", "answer": "The basic unit of life.", "topic": "Cells", "difficulty": "easy"},
            {"question": "What does ATP do?", "answer": "Stores and transfers energy.", "topic": "Energy"}
        ]
    })
    .to_string();
    let ai = MockAiProvider::new(vec![response]);

    let set = generate_flashcards(db, &ai, doc_id, 2, None)
        .await
        .expect("generation failed");

    assert!(!set.degraded);
    assert_eq!(set.cards.len(), 2);
    // Missing difficulty falls back to medium.
    assert_eq!(set.cards[1].difficulty, "medium");
    assert!(set.cards[0].id > 0);

    // The cards are persisted with their returned ids.
    let stored = memory::get_flashcards(db, Some(doc_id), None, None)
        .await
        .expect("get failed");
    assert_eq!(stored.len(), 2);
    assert_eq!(stored[0].id, set.cards[0].id);
    assert_eq!(stored[0].question, "What is a cell?");

    // The prompt carries the requested count and the document content.
    let calls = ai.call_history.read().unwrap();
    assert_eq!(calls.len(), 1);
    assert!(calls[0].1.contains("Create 2 flashcards"));
    assert!(calls[0].1.contains("Cells are the unit of life."));
}

#[tokio::test]
async fn test_incomplete_cards_are_dropped() {
    setup_tracing();
    let provider = setup_provider().await;
    let db = &provider.db;

    let doc_id = memory::insert_document(db, "notes.pdf", "content", None)
        .await
        .expect("insert failed");

    let response = json!({
        "flashcards": [
            {"question": "Valid?", "answer": "Yes."},
            {"question": "", "answer": "Orphan answer."},
            {"question": "No answer at all"}
        ]
    })
    .to_string();
    let ai = MockAiProvider::new(vec![response]);

    let set = generate_flashcards(db, &ai, doc_id, 3, None)
        .await
        .expect("generation failed");

    assert!(!set.degraded);
    assert_eq!(set.cards.len(), 1);
    assert_eq!(set.cards[0].question, "Valid?");

    let stored = memory::get_flashcards(db, Some(doc_id), None, None)
        .await
        .expect("get failed");
    assert_eq!(stored.len(), 1);
}

#[tokio::test]
async fn test_unparseable_response_degrades_to_empty_set() {
    setup_tracing();
    let provider = setup_provider().await;
    let db = &provider.db;

    let doc_id = memory::insert_document(db, "notes.pdf", "content", None)
        .await
        .expect("insert failed");

    // Both the first attempt and the retry return prose.
    let ai = MockAiProvider::new(vec![
        "Flashcards are a great idea! Here are some thoughts...".to_string(),
        "Sorry, I still prefer prose.".to_string(),
    ]);

    let set = generate_flashcards(db, &ai, doc_id, 5, None)
        .await
        .expect("shape failure must not be an error");

    assert!(set.degraded);
    assert!(set.cards.is_empty());
    assert_eq!(ai.call_count(), 2);

    // Nothing half-parsed is persisted.
    let stored = memory::get_flashcards(db, Some(doc_id), None, None)
        .await
        .expect("get failed");
    assert!(stored.is_empty());
}

#[tokio::test]
async fn test_topic_restriction_reaches_the_prompt() {
    setup_tracing();
    let provider = setup_provider().await;
    let db = &provider.db;

    let doc_id = memory::insert_document(db, "notes.pdf", "content", None)
        .await
        .expect("insert failed");

    let response = json!({"flashcards": []}).to_string();
    let ai = MockAiProvider::new(vec![response]);

    generate_flashcards(db, &ai, doc_id, 4, Some("Photosynthesis"))
        .await
        .expect("generation failed");

    let calls = ai.call_history.read().unwrap();
    assert!(calls[0].1.contains("Focus only on the topic \"Photosynthesis\""));
}

#[tokio::test]
async fn test_unknown_document_is_an_error() {
    setup_tracing();
    let provider = setup_provider().await;

    let ai = MockAiProvider::new(vec![]);
    let result = generate_flashcards(&provider.db, &ai, 42, 5, None).await;

    match result {
        Err(AgentError::DocumentNotFound(42)) => {}
        other => panic!("Expected DocumentNotFound, got {other:?}"),
    }
    // No model call is made for a missing document.
    assert_eq!(ai.call_count(), 0);
}
