//! # Core Prompts
//!
//! Prompt fragments shared by every structured generation call in the
//! `studykit` library.

/// Appended to the user prompt of every call that must return JSON.
pub const JSON_ONLY_INSTRUCTION: &str = "\n\nRespond with valid JSON only, no additional text.";

/// The replacement system prompt for the single corrective retry after a
/// response failed to parse. It drops all task framing in favour of format
/// discipline.
pub const JSON_RETRY_SYSTEM_PROMPT: &str = "You are a JSON generator. Your entire response must be a single valid JSON document. Do not use markdown code fences. Do not add explanations, apologies, or any text before or after the JSON.";
