//! # Study Agents
//!
//! One module per agent: flashcards, quizzes, revision planning, and chat.
//! Each agent follows the same pipeline: load the document, build a prompt
//! from its content, call the model, validate what came back, and persist the
//! result. Responses that fail validation degrade to an explicit empty or
//! fallback result; they never escape as errors.

pub mod chat;
pub mod flashcard;
pub mod planner;
pub mod quiz;

use crate::{
    errors::PromptError,
    memory::{self, DocumentRecord, MemoryError},
};
use thiserror::Error;
use turso::Database;

#[derive(Error, Debug)]
pub enum AgentError {
    #[error("Document not found: {0}")]
    DocumentNotFound(i64),
    #[error("Quiz question not found: {0}")]
    QuizNotFound(i64),
    #[error("Storage error: {0}")]
    Memory(#[from] MemoryError),
    #[error("LLM processing failed: {0}")]
    Llm(#[from] PromptError),
    #[error("Failed to serialize generated data: {0}")]
    Json(#[from] serde_json::Error),
}

/// Loads a document or fails with `DocumentNotFound`.
pub(crate) async fn require_document(
    db: &Database,
    document_id: i64,
) -> Result<DocumentRecord, AgentError> {
    memory::get_document(db, document_id)
        .await?
        .ok_or(AgentError::DocumentNotFound(document_id))
}
