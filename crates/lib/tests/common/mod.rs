#![allow(dead_code)]
//! # Common Test Utilities
//!
//! Shared helpers for the integration tests: tracing setup, an in-memory
//! database with the application schema applied, and a scripted mock AI
//! provider so agent logic can be tested without a live endpoint.

use async_trait::async_trait;
use std::sync::{Arc, Once, RwLock};
use studykit::providers::ai::{AiProvider, GenerationOptions};
use studykit::{PromptError, SqliteProvider};

static INIT: Once = Once::new();

/// Initializes the tracing subscriber for tests.
pub fn setup_tracing() {
    INIT.call_once(|| {
        tracing_subscriber::fmt::init();
    });
}

/// Creates an in-memory database with all application tables created.
pub async fn setup_provider() -> SqliteProvider {
    let provider = SqliteProvider::new(":memory:")
        .await
        .expect("Failed to create SqliteProvider");
    provider
        .initialize_schema()
        .await
        .expect("Failed to initialize schema");
    provider
}

// --- Mock AI Provider for Logic Testing ---

/// Replays a scripted list of responses in order and records every prompt
/// pair it was called with.
#[derive(Clone, Debug)]
pub struct MockAiProvider {
    pub call_history: Arc<RwLock<Vec<(String, String)>>>,
    pub responses: Arc<RwLock<Vec<String>>>,
}

impl MockAiProvider {
    pub fn new(responses: Vec<String>) -> Self {
        Self {
            call_history: Arc::new(RwLock::new(Vec::new())),
            responses: Arc::new(RwLock::new(responses.into_iter().rev().collect())),
        }
    }

    pub fn call_count(&self) -> usize {
        self.call_history.read().unwrap().len()
    }
}

#[async_trait]
impl AiProvider for MockAiProvider {
    async fn generate_with(
        &self,
        system_prompt: &str,
        user_prompt: &str,
        _options: &GenerationOptions,
    ) -> Result<String, PromptError> {
        self.call_history
            .write()
            .unwrap()
            .push((system_prompt.to_string(), user_prompt.to_string()));

        if let Some(response) = self.responses.write().unwrap().pop() {
            Ok(response)
        } else {
            Ok("Default mock response".to_string())
        }
    }
}
