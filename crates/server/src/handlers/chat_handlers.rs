//! # Chat Route Handlers
//!
//! This module contains handlers for document Q&A, on-demand summaries, and
//! the stored chat history.

use super::{wrap_response, ApiResponse, AppError, AppState, DebugParams};
use axum::{
    extract::{Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use studykit::{
    agents::chat::{self, ChatAnswer},
    memory::{self, ChatMessage},
};
use tracing::info;

fn default_use_history() -> bool {
    true
}

fn default_history_limit() -> usize {
    50
}

#[derive(Deserialize, Debug)]
pub struct ChatAskRequest {
    pub document_id: i64,
    pub question: String,
    #[serde(default = "default_use_history")]
    pub use_history: bool,
}

#[derive(Deserialize, Debug)]
pub struct ChatSummarizeRequest {
    pub document_id: i64,
    pub focus_topic: Option<String>,
}

#[derive(Deserialize, Debug)]
pub struct ChatHistoryParams {
    pub document_id: i64,
    #[serde(default = "default_history_limit")]
    pub limit: usize,
}

/// The response body for the `/chat/summarize` endpoint.
#[derive(Serialize, Deserialize, Debug)]
pub struct SummaryResponse {
    pub document_id: i64,
    pub summary: String,
}

/// Handler for the `/chat/ask` endpoint. Answers a question from the
/// document's content and records the exchange.
pub async fn chat_ask_handler(
    State(app_state): State<AppState>,
    debug_params: Query<DebugParams>,
    Json(payload): Json<ChatAskRequest>,
) -> Result<Json<ApiResponse<ChatAnswer>>, AppError> {
    info!(
        "Received chat question for document {}",
        payload.document_id
    );

    let answer = chat::ask(
        &app_state.sqlite_provider.db,
        app_state.ai_provider.as_ref(),
        payload.document_id,
        &payload.question,
        payload.use_history,
    )
    .await?;

    let debug_info = json!({
        "document_id": payload.document_id,
        "use_history": payload.use_history,
        "answer_length": answer.answer.len(),
    });

    Ok(wrap_response(answer, debug_params, Some(debug_info)))
}

/// Handler for the `/chat/summarize` endpoint. The summary is returned but
/// not persisted.
pub async fn chat_summarize_handler(
    State(app_state): State<AppState>,
    debug_params: Query<DebugParams>,
    Json(payload): Json<ChatSummarizeRequest>,
) -> Result<Json<ApiResponse<SummaryResponse>>, AppError> {
    info!("Received summary request for document {}", payload.document_id);

    let summary = chat::summarize(
        &app_state.sqlite_provider.db,
        app_state.ai_provider.as_ref(),
        payload.document_id,
        payload.focus_topic.as_deref(),
    )
    .await?;

    let debug_info = json!({
        "document_id": payload.document_id,
        "focus_topic": payload.focus_topic,
        "summary_length": summary.len(),
    });

    let response = SummaryResponse {
        document_id: payload.document_id,
        summary,
    };
    Ok(wrap_response(response, debug_params, Some(debug_info)))
}

/// Handler for the `/chat/history` endpoint, returning the most recent
/// exchanges for a document in chronological order.
pub async fn chat_history_handler(
    State(app_state): State<AppState>,
    Query(params): Query<ChatHistoryParams>,
    debug_params: Query<DebugParams>,
) -> Result<Json<ApiResponse<Vec<ChatMessage>>>, AppError> {
    let messages =
        memory::get_chat_history(&app_state.sqlite_provider.db, params.document_id, params.limit)
            .await?;

    let debug_info = json!({
        "document_id": params.document_id,
        "count": messages.len(),
    });

    Ok(wrap_response(messages, debug_params, Some(debug_info)))
}
