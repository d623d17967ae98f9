//! # Chat Agent
//!
//! Answers questions about a stored document, optionally replaying the recent
//! history so follow-ups work, and produces on-demand study summaries. These
//! are free-text calls; nothing here goes through structured parsing.

use super::{require_document, AgentError};
use crate::{
    constants::{
        CHAT_CONTEXT_CHARS, CHAT_HISTORY_TURNS, HISTORY_ANSWER_CHARS, SUMMARY_CONTEXT_CHARS,
    },
    memory::{self, ChatMessage},
    prompts::{
        chat::{
            CHAT_HISTORY_HEADER, CHAT_SYSTEM_PROMPT, CHAT_USER_PROMPT, SUMMARY_FOCUS_INSTRUCTION,
            SUMMARY_SYSTEM_PROMPT, SUMMARY_USER_PROMPT,
        },
        excerpt,
    },
    providers::ai::{AiProvider, GenerationOptions},
};
use serde::{Deserialize, Serialize};
use tracing::info;
use turso::Database;

/// An answered question, as persisted to the chat history.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct ChatAnswer {
    pub document_id: i64,
    pub question: String,
    pub answer: String,
}

/// Answers a question from the document's content and records the exchange.
///
/// With `use_history`, the last few exchanges are replayed into the prompt so
/// the model can resolve follow-ups ("what about the second one?").
pub async fn ask(
    db: &Database,
    ai_provider: &dyn AiProvider,
    document_id: i64,
    question: &str,
    use_history: bool,
) -> Result<ChatAnswer, AgentError> {
    let document = require_document(db, document_id).await?;
    info!(document_id, use_history, "Answering chat question");

    let history = if use_history {
        let messages = memory::get_chat_history(db, document_id, CHAT_HISTORY_TURNS).await?;
        format_history(&messages)
    } else {
        String::new()
    };

    let user_prompt = CHAT_USER_PROMPT
        .replace("{context}", excerpt(&document.content, CHAT_CONTEXT_CHARS))
        .replace("{history}", &history)
        .replace("{question}", question);

    let options = GenerationOptions {
        temperature: 0.7,
        max_tokens: 1000,
    };
    let answer = ai_provider
        .generate_with(CHAT_SYSTEM_PROMPT, &user_prompt, &options)
        .await?;

    memory::insert_chat_message(db, document_id, question, &answer).await?;

    Ok(ChatAnswer {
        document_id,
        question: question.to_string(),
        answer,
    })
}

/// Renders past exchanges for the prompt, oldest first, answers clipped.
fn format_history(messages: &[ChatMessage]) -> String {
    if messages.is_empty() {
        return String::new();
    }
    let mut block = String::from(CHAT_HISTORY_HEADER);
    for message in messages {
        let clipped = excerpt(&message.answer, HISTORY_ANSWER_CHARS);
        block.push_str(&format!("Q: {}\nA: {}...\n\n", message.question, clipped));
    }
    block
}

/// Produces a study summary of the document, optionally focused on one topic.
/// The summary is returned to the caller and deliberately not persisted.
pub async fn summarize(
    db: &Database,
    ai_provider: &dyn AiProvider,
    document_id: i64,
    focus_topic: Option<&str>,
) -> Result<String, AgentError> {
    let document = require_document(db, document_id).await?;
    info!(document_id, ?focus_topic, "Summarizing document");

    let focus_instruction = focus_topic
        .map(|t| SUMMARY_FOCUS_INSTRUCTION.replace("{topic}", t))
        .unwrap_or_default();
    let user_prompt = SUMMARY_USER_PROMPT
        .replace("{focus_instruction}", &focus_instruction)
        .replace(
            "{content}",
            excerpt(&document.content, SUMMARY_CONTEXT_CHARS),
        );

    let options = GenerationOptions {
        temperature: 0.5,
        max_tokens: 2000,
    };
    let summary = ai_provider
        .generate_with(SUMMARY_SYSTEM_PROMPT, &user_prompt, &options)
        .await?;

    Ok(summary)
}
