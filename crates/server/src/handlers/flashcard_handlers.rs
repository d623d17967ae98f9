//! # Flashcard Route Handlers
//!
//! This module contains handlers for generating flashcards from a stored
//! document and for listing the cards that already exist.

use super::{wrap_response, ApiResponse, AppError, AppState, DebugParams};
use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;
use serde_json::json;
use studykit::{
    agents::flashcard::{generate_flashcards, FlashcardSet},
    memory::{self, Flashcard},
};
use tracing::info;

fn default_count() -> usize {
    10
}

#[derive(Deserialize, Debug)]
pub struct GenerateFlashcardsRequest {
    pub document_id: i64,
    #[serde(default = "default_count")]
    pub count: usize,
    pub topic: Option<String>,
}

#[derive(Deserialize, Debug, Default)]
pub struct ListFlashcardsParams {
    pub document_id: Option<i64>,
    pub difficulty: Option<String>,
    pub topic: Option<String>,
}

/// Handler for the `/flashcards/generate` endpoint.
pub async fn generate_flashcards_handler(
    State(app_state): State<AppState>,
    debug_params: Query<DebugParams>,
    Json(payload): Json<GenerateFlashcardsRequest>,
) -> Result<Json<ApiResponse<FlashcardSet>>, AppError> {
    info!("Received flashcard generation request: {payload:?}");

    let set = generate_flashcards(
        &app_state.sqlite_provider.db,
        app_state.ai_provider.as_ref(),
        payload.document_id,
        payload.count,
        payload.topic.as_deref(),
    )
    .await?;

    let debug_info = json!({
        "document_id": payload.document_id,
        "requested": payload.count,
        "stored": set.cards.len(),
        "degraded": set.degraded,
    });

    Ok(wrap_response(set, debug_params, Some(debug_info)))
}

/// Handler for the `/flashcards` endpoint, listing stored cards with optional
/// document, difficulty, and topic filters.
pub async fn list_flashcards_handler(
    State(app_state): State<AppState>,
    Query(params): Query<ListFlashcardsParams>,
    debug_params: Query<DebugParams>,
) -> Result<Json<ApiResponse<Vec<Flashcard>>>, AppError> {
    let cards = memory::get_flashcards(
        &app_state.sqlite_provider.db,
        params.document_id,
        params.difficulty.as_deref(),
        params.topic.as_deref(),
    )
    .await?;

    let debug_info = json!({
        "count": cards.len(),
        "document_id": params.document_id,
    });

    Ok(wrap_response(cards, debug_params, Some(debug_info)))
}
