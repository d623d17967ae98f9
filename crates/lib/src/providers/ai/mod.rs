pub mod groq;

use crate::errors::PromptError;
use async_trait::async_trait;
use dyn_clone::DynClone;
use std::fmt::Debug;

/// Per-call generation settings.
///
/// Each agent tunes these: creative tasks run warm, structured extraction runs
/// cooler with a tighter token budget.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GenerationOptions {
    pub temperature: f32,
    pub max_tokens: u32,
}

impl Default for GenerationOptions {
    fn default() -> Self {
        Self {
            temperature: 0.7,
            max_tokens: 4096,
        }
    }
}

/// A trait for interacting with an AI provider.
///
/// This trait defines a common interface for generating text from a system and
/// user prompt pair using a hosted Large Language Model.
#[async_trait]
pub trait AiProvider: Send + Sync + Debug + DynClone {
    /// Generates a response with explicit generation settings.
    async fn generate_with(
        &self,
        system_prompt: &str,
        user_prompt: &str,
        options: &GenerationOptions,
    ) -> Result<String, PromptError>;

    /// Generates a response with the default settings.
    async fn generate(
        &self,
        system_prompt: &str,
        user_prompt: &str,
    ) -> Result<String, PromptError> {
        self.generate_with(system_prompt, user_prompt, &GenerationOptions::default())
            .await
    }
}

dyn_clone::clone_trait_object!(AiProvider);
