//! # Quiz Route Handlers
//!
//! This module contains handlers for generating quizzes, listing stored
//! questions, grading submitted answers, and reporting accumulated
//! performance.

use super::{wrap_response, ApiResponse, AppError, AppState, DebugParams};
use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;
use serde_json::json;
use studykit::{
    agents::quiz::{self, AnswerOutcome, PerformanceReport, QuizDifficulty, QuizSet},
    memory::{self, QuizQuestion},
};
use tracing::info;

fn default_num_questions() -> usize {
    10
}

#[derive(Deserialize, Debug)]
pub struct GenerateQuizRequest {
    pub document_id: i64,
    #[serde(default = "default_num_questions")]
    pub num_questions: usize,
    #[serde(default)]
    pub difficulty: QuizDifficulty,
    pub topic: Option<String>,
}

#[derive(Deserialize, Debug)]
pub struct AnswerQuizRequest {
    pub quiz_id: i64,
    pub answer: i64,
}

#[derive(Deserialize, Debug, Default)]
pub struct ListQuizzesParams {
    pub document_id: Option<i64>,
    pub difficulty: Option<String>,
    pub topic: Option<String>,
}

#[derive(Deserialize, Debug, Default)]
pub struct QuizStatsParams {
    pub document_id: Option<i64>,
}

/// Handler for the `/quiz/generate` endpoint.
pub async fn generate_quiz_handler(
    State(app_state): State<AppState>,
    debug_params: Query<DebugParams>,
    Json(payload): Json<GenerateQuizRequest>,
) -> Result<Json<ApiResponse<QuizSet>>, AppError> {
    info!("Received quiz generation request: {payload:?}");

    let set = quiz::generate_quiz(
        &app_state.sqlite_provider.db,
        app_state.ai_provider.as_ref(),
        payload.document_id,
        payload.num_questions,
        payload.difficulty,
        payload.topic.as_deref(),
    )
    .await?;

    let debug_info = json!({
        "document_id": payload.document_id,
        "requested": payload.num_questions,
        "stored": set.questions.len(),
        "degraded": set.degraded,
    });

    Ok(wrap_response(set, debug_params, Some(debug_info)))
}

/// Handler for the `/quiz` endpoint, listing stored questions with optional
/// document, difficulty, and topic filters.
pub async fn list_quizzes_handler(
    State(app_state): State<AppState>,
    Query(params): Query<ListQuizzesParams>,
    debug_params: Query<DebugParams>,
) -> Result<Json<ApiResponse<Vec<QuizQuestion>>>, AppError> {
    let questions = memory::get_quiz_questions(
        &app_state.sqlite_provider.db,
        params.document_id,
        params.difficulty.as_deref(),
        params.topic.as_deref(),
    )
    .await?;

    let debug_info = json!({
        "count": questions.len(),
        "document_id": params.document_id,
    });

    Ok(wrap_response(questions, debug_params, Some(debug_info)))
}

/// Handler for the `/quiz/answer` endpoint. Grades one answer and records
/// the attempt.
pub async fn answer_quiz_handler(
    State(app_state): State<AppState>,
    debug_params: Query<DebugParams>,
    Json(payload): Json<AnswerQuizRequest>,
) -> Result<Json<ApiResponse<AnswerOutcome>>, AppError> {
    let outcome =
        quiz::submit_answer(&app_state.sqlite_provider.db, payload.quiz_id, payload.answer).await?;

    let debug_info = json!({
        "quiz_id": payload.quiz_id,
        "submitted": payload.answer,
    });

    Ok(wrap_response(outcome, debug_params, Some(debug_info)))
}

/// Handler for the `/quiz/stats` endpoint. Without a `document_id` the report
/// covers every attempt in the store.
pub async fn quiz_stats_handler(
    State(app_state): State<AppState>,
    Query(params): Query<QuizStatsParams>,
    debug_params: Query<DebugParams>,
) -> Result<Json<ApiResponse<PerformanceReport>>, AppError> {
    let report = quiz::performance(&app_state.sqlite_provider.db, params.document_id).await?;

    let debug_info = json!({
        "document_id": params.document_id,
        "total_attempts": report.stats.total_attempts,
    });

    Ok(wrap_response(report, debug_params, Some(debug_info)))
}
