use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use studykit::{agents::AgentError, memory::MemoryError, PromptError};
use studykit_pdf::ReaderError;
use tracing::error;

/// A custom error type for the server application.
///
/// This enum encapsulates different kinds of errors that can occur within the server,
/// allowing them to be converted into appropriate HTTP responses.
pub enum AppError {
    /// Errors originating from the study agents.
    Agent(AgentError),
    /// Errors originating from the PDF reading pipeline.
    Reader(ReaderError),
    /// Errors originating from the AI provider client.
    Prompt(PromptError),
    /// Errors originating from the storage layer.
    Memory(MemoryError),
    /// Generic internal server errors.
    Internal(anyhow::Error),
}

impl From<AgentError> for AppError {
    fn from(err: AgentError) -> Self {
        AppError::Agent(err)
    }
}

impl From<ReaderError> for AppError {
    fn from(err: ReaderError) -> Self {
        AppError::Reader(err)
    }
}

impl From<PromptError> for AppError {
    fn from(err: PromptError) -> Self {
        AppError::Prompt(err)
    }
}

impl From<MemoryError> for AppError {
    fn from(err: MemoryError) -> Self {
        AppError::Memory(err)
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::Internal(err)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status_code, error_message) = match self {
            AppError::Agent(err) => {
                error!("AgentError: {:?}", err);
                match err {
                    AgentError::DocumentNotFound(id) => {
                        (StatusCode::NOT_FOUND, format!("Document not found: {id}"))
                    }
                    AgentError::QuizNotFound(id) => (
                        StatusCode::NOT_FOUND,
                        format!("Quiz question not found: {id}"),
                    ),
                    AgentError::Llm(e) => prompt_error_response(e),
                    AgentError::Memory(e) => (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        format!("Storage error: {e}"),
                    ),
                    AgentError::Json(e) => (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        format!("Failed to serialize generated data: {e}"),
                    ),
                }
            }
            AppError::Reader(err) => {
                error!("ReaderError: {:?}", err);
                match err {
                    ReaderError::Parse(e) => {
                        (StatusCode::BAD_REQUEST, format!("Failed to parse PDF: {e}"))
                    }
                    ReaderError::EmptyDocument => (
                        StatusCode::BAD_REQUEST,
                        "No text could be extracted from the PDF.".to_string(),
                    ),
                    ReaderError::Llm(e) => prompt_error_response(e),
                    ReaderError::Memory(e) => (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        format!("Storage error: {e}"),
                    ),
                    ReaderError::Json(e) => (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        format!("Failed to serialize document metadata: {e}"),
                    ),
                }
            }
            AppError::Prompt(err) => {
                error!("PromptError: {:?}", err);
                prompt_error_response(err)
            }
            AppError::Memory(err) => {
                error!("MemoryError: {:?}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    format!("Storage error: {err}"),
                )
            }
            AppError::Internal(err) => {
                error!("Internal server error: {:?}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An internal server error occurred.".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": error_message,
        }));

        (status_code, body).into_response()
    }
}

/// Maps provider client errors onto HTTP statuses. Failures reaching or
/// reading the upstream API are gateway errors; everything else is internal.
fn prompt_error_response(err: PromptError) -> (StatusCode, String) {
    match err {
        PromptError::AiRequest(e) => (
            StatusCode::BAD_GATEWAY,
            format!("Request to AI provider failed: {e}"),
        ),
        PromptError::AiDeserialization(e) => (
            StatusCode::BAD_GATEWAY,
            format!("Failed to deserialize AI provider response: {e}"),
        ),
        PromptError::AiApi(e) => (StatusCode::BAD_GATEWAY, format!("AI provider error: {e}")),
        PromptError::ReqwestClientBuild(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Failed to build HTTP client: {e}"),
        ),
        PromptError::StorageConnection(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Storage provider connection error: {e}"),
        ),
        PromptError::StorageOperationFailed(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Storage operation failed: {e}"),
        ),
        PromptError::JsonSerialization(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Failed to serialize result: {e}"),
        ),
        PromptError::Regex(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Internal regex error: {e}"),
        ),
    }
}
