//! # Revision Plan Route Handlers
//!
//! This module contains handlers for generating revision plans and listing
//! the plans stored for a document.

use super::{wrap_response, ApiResponse, AppError, AppState, DebugParams};
use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;
use serde_json::json;
use studykit::{
    agents::planner::{generate_revision_plan, PlanResult},
    memory::{self, RevisionPlanRecord},
};
use tracing::info;

fn default_days_until_exam() -> u32 {
    7
}

fn default_hours_per_day() -> f64 {
    2.0
}

#[derive(Deserialize, Debug)]
pub struct GeneratePlanRequest {
    pub document_id: i64,
    #[serde(default = "default_days_until_exam")]
    pub days_until_exam: u32,
    #[serde(default = "default_hours_per_day")]
    pub hours_per_day: f64,
    pub focus_topics: Option<Vec<String>>,
}

#[derive(Deserialize, Debug)]
pub struct ListPlansParams {
    pub document_id: i64,
}

/// Handler for the `/plan/generate` endpoint.
pub async fn generate_plan_handler(
    State(app_state): State<AppState>,
    debug_params: Query<DebugParams>,
    Json(payload): Json<GeneratePlanRequest>,
) -> Result<Json<ApiResponse<PlanResult>>, AppError> {
    info!("Received revision plan request: {payload:?}");

    let result = generate_revision_plan(
        &app_state.sqlite_provider.db,
        app_state.ai_provider.as_ref(),
        payload.document_id,
        payload.days_until_exam,
        payload.hours_per_day,
        payload.focus_topics,
    )
    .await?;

    let debug_info = json!({
        "document_id": payload.document_id,
        "plan_id": result.plan_id,
        "days": result.plan.schedule.len(),
        "degraded": result.degraded,
    });

    Ok(wrap_response(result, debug_params, Some(debug_info)))
}

/// Handler for the `/plans` endpoint, listing a document's stored plans
/// newest first.
pub async fn list_plans_handler(
    State(app_state): State<AppState>,
    Query(params): Query<ListPlansParams>,
    debug_params: Query<DebugParams>,
) -> Result<Json<ApiResponse<Vec<RevisionPlanRecord>>>, AppError> {
    let plans =
        memory::get_revision_plans(&app_state.sqlite_provider.db, params.document_id).await?;

    let debug_info = json!({
        "document_id": params.document_id,
        "count": plans.len(),
    });

    Ok(wrap_response(plans, debug_params, Some(debug_info)))
}
