use thiserror::Error;

/// Errors raised while talking to the AI provider.
#[derive(Error, Debug)]
pub enum PromptError {
    #[error("Failed to build Reqwest client: {0}")]
    ReqwestClientBuild(reqwest::Error),
    #[error("Failed to send request to AI API: {0}")]
    AiRequest(reqwest::Error),
    #[error("Failed to deserialize AI API response: {0}")]
    AiDeserialization(reqwest::Error),
    #[error("AI API returned an error: {0}")]
    AiApi(String),
    #[error("Storage connection failed: {0}")]
    StorageConnection(String),
    #[error("Storage operation failed: {0}")]
    StorageOperationFailed(String),
    #[error("Failed to serialize data to JSON: {0}")]
    JsonSerialization(#[from] serde_json::Error),
    #[error("Regex error: {0}")]
    Regex(#[from] regex::Error),
}
