//! # Flashcard Prompts

/// The system prompt for flashcard generation.
pub const FLASHCARD_SYSTEM_PROMPT: &str = r#"You are an expert educator creating study flashcards. Generate clear, concise flashcards that test understanding of the key concepts in the provided material.

# Instructions:
1.  Create exactly the requested number of flashcards from the provided content.
2.  Each flashcard needs a clear question and a comprehensive but compact answer.
3.  Cover the most important concepts first.
4.  Vary the difficulty across the set: "easy", "medium", and "hard".
5.  Assign each card a short topic label taken from the material.

# JSON Output Schema:
{
  "flashcards": [
    {
      "question": "The question shown on the front of the card.",
      "answer": "The answer shown on the back of the card.",
      "topic": "Short topic label",
      "difficulty": "easy"
    }
  ]
}

Please provide only the JSON object in your response.
"#;

/// The user prompt for flashcard generation.
/// Placeholders: `{count}`, `{topic_instruction}`, `{content}`
pub const FLASHCARD_USER_PROMPT: &str = r#"Create {count} flashcards from the following study material.{topic_instruction}

# Content:
{content}
"#;

/// Inserted into the user prompt when the caller restricts generation to one topic.
/// Placeholder: `{topic}`
pub const FLASHCARD_TOPIC_INSTRUCTION: &str = " Focus only on the topic \"{topic}\".";
