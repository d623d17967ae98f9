//! # Chat Prompts
//!
//! Prompts for document Q&A and on-demand summaries. These calls return free
//! text, not JSON.

/// The system prompt for answering questions about a document.
pub const CHAT_SYSTEM_PROMPT: &str = "You are a helpful study assistant. Answer the student's question based on the provided document content. If the answer is not in the document, say so clearly instead of guessing.";

/// The user prompt for answering questions about a document.
/// Placeholders: `{context}`, `{history}`, `{question}`
pub const CHAT_USER_PROMPT: &str = r#"# Document content:
{context}{history}

# Question: {question}"#;

/// The heading under which past exchanges are replayed into the prompt.
pub const CHAT_HISTORY_HEADER: &str = "\n\nPrevious Q&A:\n";

/// The system prompt for the document summarizer.
pub const SUMMARY_SYSTEM_PROMPT: &str = "You are an expert at creating study summaries. Produce a well-structured summary a student can revise from: lead with the main ideas, then the supporting details, using short headed sections or bullet points.";

/// The user prompt for the document summarizer.
/// Placeholders: `{focus_instruction}`, `{content}`
pub const SUMMARY_USER_PROMPT: &str = r#"Summarize the following study material.{focus_instruction}

# Content:
{content}
"#;

/// Inserted into the summary prompt when the caller asks to focus on one topic.
/// Placeholder: `{topic}`
pub const SUMMARY_FOCUS_INSTRUCTION: &str = " Focus on the topic \"{topic}\".";
