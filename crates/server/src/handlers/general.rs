//! # General Route Handlers
//!
//! This module contains the general-purpose Axum handlers for the
//! `studykit-server`: the root banner and the health check.

use axum::Json;
use serde_json::{json, Value};

/// The handler for the root (`/`) endpoint.
pub async fn root() -> Json<Value> {
    Json(json!({
        "name": "studykit-server",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// The handler for the health check (`/health`) endpoint.
pub async fn health_check() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}
