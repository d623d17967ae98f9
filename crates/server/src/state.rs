//! # Application State
//!
//! This module defines the shared application state (`AppState`) and the logic
//! for building it at startup. The `AppState` holds all shared resources, such
//! as the configuration, the database provider, and the AI provider client,
//! making them accessible to all request handlers.

use crate::config::Config;
use anyhow::Context;
use std::{fs, path::Path, sync::Arc};
use studykit::{providers::ai::groq::GroqProvider, AiProvider, SqliteProvider};
use tracing::info;

/// The shared application state.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub sqlite_provider: Arc<SqliteProvider>,
    pub ai_provider: Arc<dyn AiProvider>,
}

/// Builds the shared application state from the configuration.
///
/// This sets up the SQLite database (creating its parent directory and schema
/// on first run) and the AI provider client.
pub async fn build_app_state(config: Config) -> anyhow::Result<AppState> {
    if config.db_url != ":memory:" {
        if let Some(parent) = Path::new(&config.db_url).parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).with_context(|| {
                    format!("Failed to create database directory for '{}'", config.db_url)
                })?;
            }
        }
    }

    let sqlite_provider = SqliteProvider::new(&config.db_url).await?;
    sqlite_provider.initialize_schema().await?;
    info!("Database ready at '{}'", config.db_url);

    let ai_provider = GroqProvider::new(
        config.ai_api_url.clone(),
        config.ai_api_key.clone(),
        Some(config.ai_model.clone()),
    )?;

    Ok(AppState {
        config: Arc::new(config),
        sqlite_provider: Arc::new(sqlite_provider),
        ai_provider: Arc::new(ai_provider),
    })
}
