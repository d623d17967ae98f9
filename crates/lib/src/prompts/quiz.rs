//! # Quiz Prompts
//!
//! The quiz system prompt is parameterized by difficulty: mixed-difficulty
//! quizzes are generated band by band, each band getting its own goal line.

/// The system prompt for quiz generation.
/// Placeholder: `{difficulty_goal}`
pub const QUIZ_SYSTEM_PROMPT: &str = r#"You are an expert quiz creator making multiple-choice questions from study material. {difficulty_goal}

# Instructions:
1.  Create exactly the requested number of multiple-choice questions.
2.  Every question must have exactly 4 answer options.
3.  "correct_answer" is the zero-based index of the right option (0, 1, 2, or 3).
4.  Wrong options must be plausible, not throwaway.
5.  Assign each question a short topic label taken from the material.

# JSON Output Schema:
{
  "questions": [
    {
      "question": "The question text.",
      "options": ["First option", "Second option", "Third option", "Fourth option"],
      "correct_answer": 0,
      "difficulty": "easy",
      "topic": "Short topic label"
    }
  ]
}

Please provide only the JSON object in your response.
"#;

/// The goal line substituted into the system prompt for easy questions.
pub const QUIZ_GOAL_EASY: &str = "Test basic recall and understanding.";

/// The goal line substituted into the system prompt for medium questions.
pub const QUIZ_GOAL_MEDIUM: &str = "Test application and analysis.";

/// The goal line substituted into the system prompt for hard questions.
pub const QUIZ_GOAL_HARD: &str = "Test synthesis, evaluation, and deep understanding.";

/// The user prompt for quiz generation.
/// Placeholders: `{count}`, `{difficulty}`, `{topic_instruction}`, `{content}`
pub const QUIZ_USER_PROMPT: &str = r#"Create {count} {difficulty} multiple-choice questions from the following study material.{topic_instruction}

# Content:
{content}
"#;

/// Inserted into the user prompt when the caller restricts generation to one topic.
/// Placeholder: `{topic}`
pub const QUIZ_TOPIC_INSTRUCTION: &str = " Focus only on the topic \"{topic}\".";
