//! # Application Configuration
//!
//! This module defines the configuration for the `studykit-server` and the
//! logic for loading it from environment variables. A `.env` file is picked up
//! at startup when present, so local development needs nothing exported.

use std::env;
use std::fmt;
use studykit::constants::{DEFAULT_AI_API_URL, DEFAULT_AI_MODEL, DEFAULT_DB_FILE};

/// The port the server binds to when `PORT` is not set.
const DEFAULT_PORT: u16 = 9090;

/// The application's runtime configuration.
#[derive(Clone)]
pub struct Config {
    /// The port the HTTP server listens on.
    pub port: u16,
    /// Path to the SQLite database file, or `:memory:`.
    pub db_url: String,
    /// The chat completions endpoint of the AI provider.
    pub ai_api_url: String,
    /// Optional API key sent as a bearer token. Without it, requests go out
    /// unauthenticated and the provider decides what to make of them.
    pub ai_api_key: Option<String>,
    /// The model identifier sent with every generation request.
    pub ai_model: String,
}

// The API key must never appear in logs, so Debug renders it redacted.
impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("port", &self.port)
            .field("db_url", &self.db_url)
            .field("ai_api_url", &self.ai_api_url)
            .field("ai_api_key", &self.ai_api_key.as_ref().map(|_| "[redacted]"))
            .field("ai_model", &self.ai_model)
            .finish()
    }
}

/// An error raised when an environment variable holds an unusable value.
#[derive(Debug)]
pub struct ConfigError {
    name: &'static str,
    value: String,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Invalid value '{}' for {}", self.value, self.name)
    }
}

impl std::error::Error for ConfigError {}

/// Loads the configuration from the environment.
///
/// Every variable has a default, so a bare environment yields a working local
/// setup pointed at the hosted AI provider. An empty `AI_API_KEY` is treated
/// as absent.
pub fn get_config() -> Result<Config, ConfigError> {
    let port = match env::var("PORT") {
        Ok(value) => value.parse().map_err(|_| ConfigError {
            name: "PORT",
            value,
        })?,
        Err(_) => DEFAULT_PORT,
    };

    Ok(Config {
        port,
        db_url: env::var("DB_URL").unwrap_or_else(|_| DEFAULT_DB_FILE.to_string()),
        ai_api_url: env::var("AI_API_URL").unwrap_or_else(|_| DEFAULT_AI_API_URL.to_string()),
        ai_api_key: env::var("AI_API_KEY").ok().filter(|key| !key.is_empty()),
        ai_model: env::var("AI_MODEL").unwrap_or_else(|_| DEFAULT_AI_MODEL.to_string()),
    })
}
