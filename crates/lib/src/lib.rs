//! # Study Material Generation
//!
//! This crate turns uploaded course documents into study aids. It provides the
//! storage layer for documents and everything generated from them, an AI provider
//! abstraction for the hosted model, and the agents that produce flashcards,
//! quizzes, revision plans, and contextual answers.

pub mod agents;
pub mod constants;
pub mod errors;
pub mod memory;
pub mod prompts;
pub mod providers;
pub mod structured;

pub use errors::PromptError;
pub use providers::ai::{groq::GroqProvider, AiProvider, GenerationOptions};
pub use providers::db::sqlite::SqliteProvider;
pub use structured::Structured;
