//! # Document Route Handlers
//!
//! This module contains handlers for uploading PDF documents and listing the
//! documents already in the store.

use super::{wrap_response, ApiResponse, AppError, AppState, DebugParams};
use axum::{
    extract::{Query, State},
    Json,
};
use axum_extra::extract::Multipart;
use serde_json::json;
use studykit::memory::{self, DocumentSummary};
use studykit_pdf::{process_pdf, ProcessedDocument};
use tracing::{info, warn};

/// Handler for the `/documents/upload` endpoint.
///
/// Accepts a multipart form with a `file` part holding the PDF bytes. An
/// optional `filename` part overrides the name taken from the upload itself.
pub async fn upload_document_handler(
    State(app_state): State<AppState>,
    debug_params: Query<DebugParams>,
    mut multipart: Multipart,
) -> Result<Json<ApiResponse<ProcessedDocument>>, AppError> {
    let mut pdf_data: Option<Vec<u8>> = None;
    let mut filename: Option<String> = None;

    while let Some(field) = multipart.next_field().await.map_err(anyhow::Error::from)? {
        let name = field.name().unwrap_or("").to_string();
        match name.as_str() {
            "file" => {
                if filename.is_none() {
                    filename = field.file_name().map(str::to_string);
                }
                pdf_data = Some(field.bytes().await.map_err(anyhow::Error::from)?.to_vec());
            }
            "filename" => {
                let text = field.text().await.map_err(anyhow::Error::from)?;
                if !text.trim().is_empty() {
                    filename = Some(text);
                }
            }
            _ => warn!("Ignoring unknown multipart field: {name}"),
        }
    }

    let pdf_data = pdf_data.ok_or_else(|| {
        AppError::Internal(anyhow::anyhow!(
            "PDF data not found in request. Provide a 'file' part."
        ))
    })?;
    let filename = filename.unwrap_or_else(|| "uploaded_file.pdf".to_string());
    info!("Received PDF upload '{}' ({} bytes)", filename, pdf_data.len());

    let processed = process_pdf(
        &app_state.sqlite_provider.db,
        app_state.ai_provider.as_ref(),
        &pdf_data,
        &filename,
    )
    .await?;

    let debug_info = json!({
        "filename": filename,
        "size": pdf_data.len(),
        "degraded": processed.degraded,
    });

    Ok(wrap_response(processed, debug_params, Some(debug_info)))
}

/// Handler for the `/documents` endpoint, listing stored documents newest first.
pub async fn list_documents_handler(
    State(app_state): State<AppState>,
    debug_params: Query<DebugParams>,
) -> Result<Json<ApiResponse<Vec<DocumentSummary>>>, AppError> {
    let documents = memory::list_documents(&app_state.sqlite_provider.db).await?;

    let debug_info = json!({ "count": documents.len() });
    Ok(wrap_response(documents, debug_params, Some(debug_info)))
}
