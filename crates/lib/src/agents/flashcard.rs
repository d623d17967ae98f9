//! # Flashcard Agent
//!
//! Generates question/answer flashcards from a stored document and persists
//! them. Cards the model returns without a usable question or answer are
//! dropped rather than stored half-empty.

use super::{require_document, AgentError};
use crate::{
    constants::FLASHCARD_CONTEXT_CHARS,
    memory::{self, NewFlashcard},
    prompts::{
        excerpt,
        flashcard::{FLASHCARD_SYSTEM_PROMPT, FLASHCARD_TOPIC_INSTRUCTION, FLASHCARD_USER_PROMPT},
    },
    providers::ai::{AiProvider, GenerationOptions},
    structured::generate_structured,
};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use turso::Database;

#[derive(Deserialize, Debug)]
struct FlashcardPayload {
    #[serde(default)]
    flashcards: Vec<ParsedFlashcard>,
}

#[derive(Deserialize, Debug)]
struct ParsedFlashcard {
    #[serde(default)]
    question: String,
    #[serde(default)]
    answer: String,
    #[serde(default)]
    topic: Option<String>,
    #[serde(default = "default_difficulty")]
    difficulty: String,
}

fn default_difficulty() -> String {
    "medium".to_string()
}

/// A flashcard that was just generated and stored.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct GeneratedFlashcard {
    pub id: i64,
    pub question: String,
    pub answer: String,
    pub topic: Option<String>,
    pub difficulty: String,
}

/// The result of one generation run.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct FlashcardSet {
    pub document_id: i64,
    pub cards: Vec<GeneratedFlashcard>,
    pub degraded: bool,
}

/// Generates `count` flashcards from a document and stores the usable ones.
///
/// An unparseable model reply yields an empty, degraded set. Provider and
/// storage failures are real errors.
pub async fn generate_flashcards(
    db: &Database,
    ai_provider: &dyn AiProvider,
    document_id: i64,
    count: usize,
    topic: Option<&str>,
) -> Result<FlashcardSet, AgentError> {
    let document = require_document(db, document_id).await?;
    info!(document_id, count, "Generating flashcards");

    let topic_instruction = topic
        .map(|t| FLASHCARD_TOPIC_INSTRUCTION.replace("{topic}", t))
        .unwrap_or_default();
    let user_prompt = FLASHCARD_USER_PROMPT
        .replace("{count}", &count.to_string())
        .replace("{topic_instruction}", &topic_instruction)
        .replace(
            "{content}",
            excerpt(&document.content, FLASHCARD_CONTEXT_CHARS),
        );

    let options = GenerationOptions {
        temperature: 0.7,
        max_tokens: 4096,
    };
    let generated = generate_structured::<FlashcardPayload>(
        ai_provider,
        FLASHCARD_SYSTEM_PROMPT,
        &user_prompt,
        &options,
    )
    .await?;

    let Some(payload) = generated.value else {
        warn!(document_id, "Flashcard generation produced no usable JSON");
        return Ok(FlashcardSet {
            document_id,
            cards: Vec::new(),
            degraded: true,
        });
    };

    let parsed_count = payload.flashcards.len();
    let new_cards: Vec<NewFlashcard> = payload
        .flashcards
        .into_iter()
        .filter_map(|card| {
            if card.question.trim().is_empty() || card.answer.trim().is_empty() {
                warn!("Dropping flashcard with a missing question or answer");
                return None;
            }
            Some(NewFlashcard {
                question: card.question,
                answer: card.answer,
                topic: card.topic.filter(|t| !t.trim().is_empty()),
                difficulty: card.difficulty,
            })
        })
        .collect();

    if new_cards.len() < parsed_count {
        warn!(
            document_id,
            kept = new_cards.len(),
            parsed = parsed_count,
            "Some flashcards failed validation"
        );
    }

    let ids = memory::insert_flashcards(db, document_id, &new_cards).await?;
    let cards = ids
        .into_iter()
        .zip(new_cards)
        .map(|(id, card)| GeneratedFlashcard {
            id,
            question: card.question,
            answer: card.answer,
            topic: card.topic,
            difficulty: card.difficulty,
        })
        .collect::<Vec<_>>();

    info!(document_id, stored = cards.len(), "Flashcards stored");
    Ok(FlashcardSet {
        document_id,
        cards,
        degraded: false,
    })
}
