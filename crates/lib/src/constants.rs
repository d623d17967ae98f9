//! # Shared Constants
//!
//! This module provides a centralized location for constants that are shared across
//! multiple crates in the `studykit` workspace. Using these constants helps to avoid
//! "magic strings" and ensures consistency.

/// The root directory for all local databases.
pub const DB_DIR: &str = "db";

/// The default path for the main application SQLite database.
pub const DEFAULT_DB_FILE: &str = "db/studykit.db";

/// The default chat completions endpoint for the hosted AI provider.
pub const DEFAULT_AI_API_URL: &str = "https://api.groq.com/openai/v1/chat/completions";

/// The default model used for all generation calls.
pub const DEFAULT_AI_MODEL: &str = "llama-3.3-70b-versatile";

/// How much document text is handed to the analysis call during ingestion.
pub const ANALYSIS_CONTEXT_CHARS: usize = 15_000;

/// How much document text the flashcard generator sees.
pub const FLASHCARD_CONTEXT_CHARS: usize = 12_000;

/// How much document text the quiz generator sees.
pub const QUIZ_CONTEXT_CHARS: usize = 12_000;

/// How much document text a chat question is answered from.
pub const CHAT_CONTEXT_CHARS: usize = 10_000;

/// How much document text the summarizer sees.
pub const SUMMARY_CONTEXT_CHARS: usize = 15_000;

/// How much document text the revision planner quotes in its prompt.
pub const PLANNER_CONTEXT_CHARS: usize = 3_000;

/// Stored answers are clipped to this length when replayed as chat context.
pub const HISTORY_ANSWER_CHARS: usize = 200;

/// How many past exchanges are replayed into a history-aware chat prompt.
pub const CHAT_HISTORY_TURNS: usize = 3;

/// Upper bound on topics pulled from flashcards when planning revision.
pub const MAX_PLAN_TOPICS: usize = 5;
