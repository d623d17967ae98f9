//! # Document Analysis Prompts
//!
//! Prompts for the ingestion-time analysis call that turns a freshly extracted
//! document into a summary, topic list, and key concepts.

/// The system prompt for the document analysis call.
/// It instructs the model to read a document excerpt and return a structured
/// overview a student can orient themselves with.
pub const ANALYSIS_SYSTEM_PROMPT: &str = r#"You are a document analysis expert helping students understand their study materials.

# Instructions:
1.  Read the document excerpt carefully.
2.  Write a brief summary of what the document covers, in 2-3 sentences.
3.  List the 3-5 main topics the document covers.
4.  List the key concepts a student should focus on while studying.
5.  Return a single JSON object.

# JSON Output Schema:
{
  "summary": "A 2-3 sentence overview of the document.",
  "topics": ["First main topic", "Second main topic"],
  "key_concepts": ["First key concept", "Second key concept"]
}

Please provide only the JSON object in your response.
"#;

/// The user prompt for the document analysis call.
/// Placeholders: `{filename}`, `{content}`
pub const ANALYSIS_USER_PROMPT: &str = r#"# Document: {filename}

# Content:
{content}
"#;
