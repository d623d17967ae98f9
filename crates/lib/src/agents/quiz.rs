//! # Quiz Agent
//!
//! Generates multiple-choice questions, records answer attempts, and reports
//! accuracy. Every stored question is validated to have exactly four options
//! and an in-range correct index; the model's word is never trusted on that.

use super::{require_document, AgentError};
use crate::{
    constants::QUIZ_CONTEXT_CHARS,
    memory::{self, NewQuizQuestion, PerformanceStats},
    prompts::{
        excerpt,
        quiz::{
            QUIZ_GOAL_EASY, QUIZ_GOAL_HARD, QUIZ_GOAL_MEDIUM, QUIZ_SYSTEM_PROMPT,
            QUIZ_TOPIC_INSTRUCTION, QUIZ_USER_PROMPT,
        },
    },
    providers::ai::{AiProvider, GenerationOptions},
    structured::generate_structured,
};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use turso::Database;

/// How many answer options every stored question must have.
pub const OPTIONS_PER_QUESTION: usize = 4;

/// The difficulty a quiz is requested at. `Mixed` spreads the question count
/// across the three bands.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum QuizDifficulty {
    Easy,
    Medium,
    Hard,
    #[default]
    Mixed,
}

/// A single difficulty band, used for generation and storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Band {
    Easy,
    Medium,
    Hard,
}

impl Band {
    pub fn as_str(&self) -> &'static str {
        match self {
            Band::Easy => "easy",
            Band::Medium => "medium",
            Band::Hard => "hard",
        }
    }

    fn goal(&self) -> &'static str {
        match self {
            Band::Easy => QUIZ_GOAL_EASY,
            Band::Medium => QUIZ_GOAL_MEDIUM,
            Band::Hard => QUIZ_GOAL_HARD,
        }
    }
}

/// Splits a request into per-band counts. `Mixed` gives each band a third,
/// with the remainder going to the hard band, so the bands never differ by
/// more than one.
fn band_counts(difficulty: QuizDifficulty, total: usize) -> Vec<(Band, usize)> {
    match difficulty {
        QuizDifficulty::Easy => vec![(Band::Easy, total)],
        QuizDifficulty::Medium => vec![(Band::Medium, total)],
        QuizDifficulty::Hard => vec![(Band::Hard, total)],
        QuizDifficulty::Mixed => {
            let easy = total / 3;
            let medium = total / 3;
            let hard = total - easy - medium;
            vec![(Band::Easy, easy), (Band::Medium, medium), (Band::Hard, hard)]
        }
    }
}

#[derive(Deserialize, Debug)]
struct QuizPayload {
    #[serde(default)]
    questions: Vec<serde_json::Value>,
}

#[derive(Deserialize, Debug)]
struct ParsedQuizQuestion {
    #[serde(default)]
    question: String,
    #[serde(default)]
    options: Vec<String>,
    correct_answer: Option<i64>,
    #[serde(default)]
    difficulty: Option<String>,
    #[serde(default)]
    topic: Option<String>,
}

/// A question that was just generated and stored. `correct_answer` is
/// included so a client can grade locally; recording still goes through
/// [`submit_answer`].
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct GeneratedQuizQuestion {
    pub id: i64,
    pub question: String,
    pub options: Vec<String>,
    pub correct_answer: i64,
    pub difficulty: String,
    pub topic: Option<String>,
}

/// The result of one quiz generation run.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct QuizSet {
    pub document_id: i64,
    pub questions: Vec<GeneratedQuizQuestion>,
    pub degraded: bool,
}

/// The outcome of answering one question.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct AnswerOutcome {
    pub quiz_id: i64,
    pub is_correct: bool,
    pub correct_answer: i64,
}

/// Quiz performance plus a one-line study recommendation.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct PerformanceReport {
    #[serde(flatten)]
    pub stats: PerformanceStats,
    pub recommendation: String,
}

/// Checks one parsed question against the storage invariants. Returns the
/// storable form, or `None` (with a log line) when the question is unusable.
fn validate_question(raw: serde_json::Value, band: Band) -> Option<NewQuizQuestion> {
    let parsed: ParsedQuizQuestion = match serde_json::from_value(raw) {
        Ok(parsed) => parsed,
        Err(e) => {
            warn!("Dropping quiz question that failed to deserialize: {e}");
            return None;
        }
    };

    if parsed.question.trim().is_empty() {
        warn!("Dropping quiz question with empty text");
        return None;
    }
    if parsed.options.len() != OPTIONS_PER_QUESTION {
        warn!(
            options = parsed.options.len(),
            "Dropping quiz question without exactly {OPTIONS_PER_QUESTION} options"
        );
        return None;
    }
    let correct_answer = match parsed.correct_answer {
        Some(idx) if (0..OPTIONS_PER_QUESTION as i64).contains(&idx) => idx,
        other => {
            warn!(?other, "Dropping quiz question with out-of-range answer index");
            return None;
        }
    };

    Some(NewQuizQuestion {
        question: parsed.question,
        options: parsed.options,
        correct_answer,
        difficulty: parsed
            .difficulty
            .filter(|d| !d.trim().is_empty())
            .unwrap_or_else(|| band.as_str().to_string()),
        topic: parsed.topic.filter(|t| !t.trim().is_empty()),
    })
}

/// Generates a quiz from a document and stores every question that survives
/// validation. Mixed difficulty makes one generation call per band.
pub async fn generate_quiz(
    db: &Database,
    ai_provider: &dyn AiProvider,
    document_id: i64,
    num_questions: usize,
    difficulty: QuizDifficulty,
    topic: Option<&str>,
) -> Result<QuizSet, AgentError> {
    let document = require_document(db, document_id).await?;
    info!(document_id, num_questions, ?difficulty, "Generating quiz");

    let content = excerpt(&document.content, QUIZ_CONTEXT_CHARS);
    let topic_instruction = topic
        .map(|t| QUIZ_TOPIC_INSTRUCTION.replace("{topic}", t))
        .unwrap_or_default();
    let options = GenerationOptions {
        temperature: 0.7,
        max_tokens: 4096,
    };

    let mut validated = Vec::new();
    let mut degraded = false;
    for (band, count) in band_counts(difficulty, num_questions) {
        if count == 0 {
            continue;
        }
        let system_prompt = QUIZ_SYSTEM_PROMPT.replace("{difficulty_goal}", band.goal());
        let user_prompt = QUIZ_USER_PROMPT
            .replace("{count}", &count.to_string())
            .replace("{difficulty}", band.as_str())
            .replace("{topic_instruction}", &topic_instruction)
            .replace("{content}", content);

        let generated = generate_structured::<QuizPayload>(
            ai_provider,
            &system_prompt,
            &user_prompt,
            &options,
        )
        .await?;

        match generated.value {
            Some(payload) => {
                validated.extend(
                    payload
                        .questions
                        .into_iter()
                        .filter_map(|raw| validate_question(raw, band)),
                );
            }
            None => {
                warn!(document_id, band = band.as_str(), "Quiz band produced no usable JSON");
                degraded = true;
            }
        }
    }

    let ids = memory::insert_quiz_questions(db, document_id, &validated).await?;
    let questions = ids
        .into_iter()
        .zip(validated)
        .map(|(id, question)| GeneratedQuizQuestion {
            id,
            question: question.question,
            options: question.options,
            correct_answer: question.correct_answer,
            difficulty: question.difficulty,
            topic: question.topic,
        })
        .collect::<Vec<_>>();

    info!(document_id, stored = questions.len(), "Quiz stored");
    Ok(QuizSet {
        document_id,
        questions,
        degraded,
    })
}

/// Grades and records one answer. Correctness is a plain index comparison,
/// done here once; out-of-range submissions are recorded as incorrect.
pub async fn submit_answer(
    db: &Database,
    quiz_id: i64,
    answer: i64,
) -> Result<AnswerOutcome, AgentError> {
    let question = memory::get_quiz_question(db, quiz_id)
        .await?
        .ok_or(AgentError::QuizNotFound(quiz_id))?;

    let is_correct = answer == question.correct_answer;
    memory::insert_quiz_attempt(db, quiz_id, answer, is_correct).await?;

    Ok(AnswerOutcome {
        quiz_id,
        is_correct,
        correct_answer: question.correct_answer,
    })
}

/// Aggregated accuracy for one document, or the whole store, with a study
/// recommendation attached.
pub async fn performance(
    db: &Database,
    document_id: Option<i64>,
) -> Result<PerformanceReport, AgentError> {
    let stats = memory::get_performance_stats(db, document_id).await?;
    let recommendation = recommend(&stats).to_string();
    Ok(PerformanceReport {
        stats,
        recommendation,
    })
}

fn recommend(stats: &PerformanceStats) -> &'static str {
    if stats.total_attempts == 0 {
        "Take some quizzes to see your performance analysis."
    } else if stats.accuracy < 50.0 {
        "Review the material more thoroughly before attempting more quizzes."
    } else if stats.accuracy < 70.0 {
        "Good progress. Focus on the topics where you made mistakes."
    } else {
        "Excellent performance. You are ready for the exam."
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mixed_split_adds_up_and_stays_balanced() {
        for total in 1..=30 {
            let bands = band_counts(QuizDifficulty::Mixed, total);
            let sum: usize = bands.iter().map(|(_, n)| n).sum();
            assert_eq!(sum, total);

            let counts: Vec<usize> = bands.iter().map(|(_, n)| *n).collect();
            let max = counts.iter().max().unwrap();
            let min = counts.iter().min().unwrap();
            assert!(max - min <= 1, "unbalanced split for {total}: {counts:?}");
        }
    }

    #[test]
    fn single_difficulty_is_one_band() {
        let bands = band_counts(QuizDifficulty::Hard, 10);
        assert_eq!(bands, vec![(Band::Hard, 10)]);
    }

    #[test]
    fn validation_drops_wrong_option_counts() {
        let raw = serde_json::json!({
            "question": "Pick one",
            "options": ["a", "b", "c"],
            "correct_answer": 0,
        });
        assert!(validate_question(raw, Band::Easy).is_none());
    }

    #[test]
    fn validation_drops_out_of_range_answers() {
        let raw = serde_json::json!({
            "question": "Pick one",
            "options": ["a", "b", "c", "d"],
            "correct_answer": 4,
        });
        assert!(validate_question(raw, Band::Easy).is_none());
    }

    #[test]
    fn validation_defaults_difficulty_to_the_band() {
        let raw = serde_json::json!({
            "question": "Pick one",
            "options": ["a", "b", "c", "d"],
            "correct_answer": 2,
        });
        let question = validate_question(raw, Band::Hard).unwrap();
        assert_eq!(question.difficulty, "hard");
        assert_eq!(question.correct_answer, 2);
    }
}
