//! # Server Surface Tests
//!
//! Covers the root banner, the health check, the `?debug=true` gating of the
//! standard response envelope, and routing of unknown paths.

mod common;

use anyhow::Result;
use common::{TestApp, TestDataBuilder};
use serde_json::Value;

#[tokio::test]
async fn test_root_banner_reports_name_and_version() -> Result<()> {
    let app = TestApp::spawn().await?;

    let body: Value = app
        .client
        .get(&app.address)
        .send()
        .await?
        .error_for_status()?
        .json()
        .await?;

    assert_eq!(body["name"], "studykit-server");
    assert!(body["version"].as_str().is_some_and(|v| !v.is_empty()));
    Ok(())
}

#[tokio::test]
async fn test_health_check_is_ok() -> Result<()> {
    let app = TestApp::spawn().await?;

    let response = app
        .client
        .get(format!("{}/health", app.address))
        .send()
        .await?;

    assert_eq!(response.status(), 200);
    let body: Value = response.json().await?;
    assert_eq!(body["status"], "ok");
    Ok(())
}

#[tokio::test]
async fn test_debug_info_is_gated_by_query_param() -> Result<()> {
    let app = TestApp::spawn().await?;
    let builder = TestDataBuilder::new(&app).await?;
    builder
        .add_document("notes.pdf", "Some study content.", None)
        .await?;

    let plain: Value = app
        .client
        .get(format!("{}/documents", app.address))
        .send()
        .await?
        .error_for_status()?
        .json()
        .await?;
    assert!(plain.get("debug").is_none());
    assert_eq!(plain["result"].as_array().map(Vec::len), Some(1));

    let debugged: Value = app
        .client
        .get(format!("{}/documents?debug=true", app.address))
        .send()
        .await?
        .error_for_status()?
        .json()
        .await?;
    assert_eq!(debugged["debug"]["count"], 1);
    Ok(())
}

#[tokio::test]
async fn test_unknown_route_is_a_404() -> Result<()> {
    let app = TestApp::spawn().await?;

    let response = app
        .client
        .get(format!("{}/unknown", app.address))
        .send()
        .await?;

    assert_eq!(response.status(), 404);
    Ok(())
}
