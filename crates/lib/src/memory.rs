//! # Study Memory
//!
//! This module is the persistence layer for everything the agents produce:
//! uploaded documents, flashcards, quiz questions and attempts, revision plans,
//! and the chat history. All writes are inserts; rows are never updated or
//! deleted once created, so a study session only ever accumulates.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use tracing::debug;
use turso::{params, Database, Value as TursoValue};

// --- Error Definitions ---

#[derive(Error, Debug)]
pub enum MemoryError {
    #[error("Database error: {0}")]
    Database(#[from] turso::Error),
    #[error("Failed to parse stored JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Failed to convert database value: unexpected column type.")]
    TypeConversion,
}

// --- Data Structures ---

/// A fully loaded document row, including the extracted text.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct DocumentRecord {
    pub id: i64,
    pub filename: String,
    pub content: String,
    pub metadata: Option<Value>,
    pub uploaded_at: String,
}

/// A document row without its content, for listings.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct DocumentSummary {
    pub id: i64,
    pub filename: String,
    pub metadata: Option<Value>,
    pub uploaded_at: String,
    pub content_length: i64,
}

/// A flashcard ready to be inserted.
#[derive(Debug, Clone)]
pub struct NewFlashcard {
    pub question: String,
    pub answer: String,
    pub topic: Option<String>,
    pub difficulty: String,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Flashcard {
    pub id: i64,
    pub document_id: i64,
    pub question: String,
    pub answer: String,
    pub topic: Option<String>,
    pub difficulty: String,
    pub created_at: String,
}

/// A validated multiple-choice question ready to be inserted.
#[derive(Debug, Clone)]
pub struct NewQuizQuestion {
    pub question: String,
    pub options: Vec<String>,
    pub correct_answer: i64,
    pub difficulty: String,
    pub topic: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct QuizQuestion {
    pub id: i64,
    pub document_id: i64,
    pub question: String,
    pub options: Vec<String>,
    pub correct_answer: i64,
    pub difficulty: String,
    pub topic: Option<String>,
    pub created_at: String,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct ChatMessage {
    pub id: i64,
    pub document_id: i64,
    pub question: String,
    pub answer: String,
    pub asked_at: String,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RevisionPlanRecord {
    pub id: i64,
    pub document_id: i64,
    pub plan_data: Value,
    pub created_at: String,
}

/// Aggregated quiz performance, overall and per difficulty band.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct PerformanceStats {
    pub total_attempts: i64,
    pub correct_answers: i64,
    pub accuracy: f64,
    pub by_difficulty: Vec<DifficultyStats>,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct DifficultyStats {
    pub difficulty: String,
    pub attempts: i64,
    pub correct: i64,
    pub accuracy: f64,
}

/// Percentage accuracy rounded to two decimals, `0.0` when nothing was attempted.
fn accuracy_percent(correct: i64, total: i64) -> f64 {
    if total == 0 {
        return 0.0;
    }
    ((correct as f64 / total as f64) * 10_000.0).round() / 100.0
}

fn optional_text(value: TursoValue) -> Option<String> {
    match value {
        TursoValue::Text(s) => Some(s),
        _ => None,
    }
}

/// Parses a nullable TEXT column holding serialized JSON.
fn optional_json(value: TursoValue) -> Result<Option<Value>, MemoryError> {
    match value {
        TursoValue::Text(s) => Ok(Some(serde_json::from_str(&s)?)),
        TursoValue::Null => Ok(None),
        _ => Err(MemoryError::TypeConversion),
    }
}

fn sum_as_i64(value: TursoValue) -> i64 {
    // SUM() over zero rows yields NULL.
    match value {
        TursoValue::Integer(i) => i,
        _ => 0,
    }
}

// --- Documents ---

pub async fn insert_document(
    db: &Database,
    filename: &str,
    content: &str,
    metadata: Option<&Value>,
) -> Result<i64, MemoryError> {
    let conn = db.connect()?;
    let metadata_json = metadata.map(serde_json::to_string).transpose()?;
    conn.execute(
        "INSERT INTO documents (filename, content, metadata) VALUES (?, ?, ?)",
        params![filename, content, metadata_json],
    )
    .await?;
    let document_id = conn.last_insert_rowid();
    debug!(document_id, filename, "Stored document");
    Ok(document_id)
}

pub async fn get_document(
    db: &Database,
    document_id: i64,
) -> Result<Option<DocumentRecord>, MemoryError> {
    let conn = db.connect()?;
    let mut rows = conn
        .query(
            "SELECT id, filename, content, metadata, uploaded_at FROM documents WHERE id = ?",
            params![document_id],
        )
        .await?;

    match rows.next().await? {
        Some(row) => Ok(Some(DocumentRecord {
            id: row.get(0)?,
            filename: row.get(1)?,
            content: row.get(2)?,
            metadata: optional_json(row.get_value(3)?)?,
            uploaded_at: row.get(4)?,
        })),
        None => Ok(None),
    }
}

/// Lists all documents, newest first, without loading their content.
pub async fn list_documents(db: &Database) -> Result<Vec<DocumentSummary>, MemoryError> {
    let conn = db.connect()?;
    let mut rows = conn
        .query(
            "SELECT id, filename, metadata, uploaded_at, LENGTH(content)
             FROM documents ORDER BY id DESC",
            (),
        )
        .await?;

    let mut documents = Vec::new();
    while let Some(row) = rows.next().await? {
        documents.push(DocumentSummary {
            id: row.get(0)?,
            filename: row.get(1)?,
            metadata: optional_json(row.get_value(2)?)?,
            uploaded_at: row.get(3)?,
            content_length: row.get(4)?,
        });
    }
    Ok(documents)
}

// --- Flashcards ---

/// Inserts a batch of flashcards in one transaction and returns their new ids,
/// in input order.
pub async fn insert_flashcards(
    db: &Database,
    document_id: i64,
    cards: &[NewFlashcard],
) -> Result<Vec<i64>, MemoryError> {
    let conn = db.connect()?;
    conn.execute("BEGIN TRANSACTION", ()).await?;
    let mut stmt = conn
        .prepare(
            "INSERT INTO flashcards (document_id, question, answer, topic, difficulty)
             VALUES (?, ?, ?, ?, ?)",
        )
        .await?;

    let mut ids = Vec::with_capacity(cards.len());
    for card in cards {
        stmt.execute(params![
            document_id,
            card.question.clone(),
            card.answer.clone(),
            card.topic.clone(),
            card.difficulty.clone()
        ])
        .await?;
        ids.push(conn.last_insert_rowid());
    }
    conn.execute("COMMIT", ()).await?;
    debug!(document_id, count = ids.len(), "Stored flashcards");
    Ok(ids)
}

pub async fn get_flashcards(
    db: &Database,
    document_id: Option<i64>,
    difficulty: Option<&str>,
    topic: Option<&str>,
) -> Result<Vec<Flashcard>, MemoryError> {
    let conn = db.connect()?;

    let mut conditions: Vec<&str> = Vec::new();
    let mut query_params: Vec<TursoValue> = Vec::new();
    if let Some(id) = document_id {
        conditions.push("document_id = ?");
        query_params.push(TursoValue::Integer(id));
    }
    if let Some(difficulty) = difficulty {
        conditions.push("difficulty = ?");
        query_params.push(TursoValue::Text(difficulty.to_string()));
    }
    if let Some(topic) = topic {
        conditions.push("topic = ?");
        query_params.push(TursoValue::Text(topic.to_string()));
    }

    let mut sql = String::from(
        "SELECT id, document_id, question, answer, topic, difficulty, created_at FROM flashcards",
    );
    if !conditions.is_empty() {
        sql.push_str(&format!(" WHERE {}", conditions.join(" AND ")));
    }
    sql.push_str(" ORDER BY id");

    let mut rows = conn.query(&sql, query_params).await?;
    let mut cards = Vec::new();
    while let Some(row) = rows.next().await? {
        cards.push(Flashcard {
            id: row.get(0)?,
            document_id: row.get(1)?,
            question: row.get(2)?,
            answer: row.get(3)?,
            topic: optional_text(row.get_value(4)?),
            difficulty: row.get(5)?,
            created_at: row.get(6)?,
        });
    }
    Ok(cards)
}

/// Distinct non-null flashcard topics for a document, used to seed revision plans.
pub async fn distinct_flashcard_topics(
    db: &Database,
    document_id: i64,
) -> Result<Vec<String>, MemoryError> {
    let conn = db.connect()?;
    let mut rows = conn
        .query(
            "SELECT DISTINCT topic FROM flashcards
             WHERE document_id = ? AND topic IS NOT NULL ORDER BY topic",
            params![document_id],
        )
        .await?;

    let mut topics = Vec::new();
    while let Some(row) = rows.next().await? {
        if let Some(topic) = optional_text(row.get_value(0)?) {
            topics.push(topic);
        }
    }
    Ok(topics)
}

// --- Quizzes ---

/// Inserts a batch of quiz questions in one transaction and returns their new
/// ids, in input order. Callers hand these ids out so answers can be matched
/// back to their question.
pub async fn insert_quiz_questions(
    db: &Database,
    document_id: i64,
    questions: &[NewQuizQuestion],
) -> Result<Vec<i64>, MemoryError> {
    let conn = db.connect()?;
    conn.execute("BEGIN TRANSACTION", ()).await?;
    let mut stmt = conn
        .prepare(
            "INSERT INTO quizzes (document_id, question, options, correct_answer, difficulty, topic)
             VALUES (?, ?, ?, ?, ?, ?)",
        )
        .await?;

    let mut ids = Vec::with_capacity(questions.len());
    for question in questions {
        let options_json = serde_json::to_string(&question.options)?;
        stmt.execute(params![
            document_id,
            question.question.clone(),
            options_json,
            question.correct_answer,
            question.difficulty.clone(),
            question.topic.clone()
        ])
        .await?;
        ids.push(conn.last_insert_rowid());
    }
    conn.execute("COMMIT", ()).await?;
    debug!(document_id, count = ids.len(), "Stored quiz questions");
    Ok(ids)
}

fn row_to_quiz_question(row: &turso::Row) -> Result<QuizQuestion, MemoryError> {
    let options_json: String = row.get(3)?;
    Ok(QuizQuestion {
        id: row.get(0)?,
        document_id: row.get(1)?,
        question: row.get(2)?,
        options: serde_json::from_str(&options_json)?,
        correct_answer: row.get(4)?,
        difficulty: row.get(5)?,
        topic: optional_text(row.get_value(6)?),
        created_at: row.get(7)?,
    })
}

const QUIZ_QUESTION_COLUMNS: &str =
    "id, document_id, question, options, correct_answer, difficulty, topic, created_at";

pub async fn get_quiz_question(
    db: &Database,
    quiz_id: i64,
) -> Result<Option<QuizQuestion>, MemoryError> {
    let conn = db.connect()?;
    let mut rows = conn
        .query(
            &format!("SELECT {QUIZ_QUESTION_COLUMNS} FROM quizzes WHERE id = ?"),
            params![quiz_id],
        )
        .await?;

    match rows.next().await? {
        Some(row) => Ok(Some(row_to_quiz_question(&row)?)),
        None => Ok(None),
    }
}

pub async fn get_quiz_questions(
    db: &Database,
    document_id: Option<i64>,
    difficulty: Option<&str>,
    topic: Option<&str>,
) -> Result<Vec<QuizQuestion>, MemoryError> {
    let conn = db.connect()?;

    let mut conditions: Vec<&str> = Vec::new();
    let mut query_params: Vec<TursoValue> = Vec::new();
    if let Some(id) = document_id {
        conditions.push("document_id = ?");
        query_params.push(TursoValue::Integer(id));
    }
    if let Some(difficulty) = difficulty {
        conditions.push("difficulty = ?");
        query_params.push(TursoValue::Text(difficulty.to_string()));
    }
    if let Some(topic) = topic {
        conditions.push("topic = ?");
        query_params.push(TursoValue::Text(topic.to_string()));
    }

    let mut sql = format!("SELECT {QUIZ_QUESTION_COLUMNS} FROM quizzes");
    if !conditions.is_empty() {
        sql.push_str(&format!(" WHERE {}", conditions.join(" AND ")));
    }
    sql.push_str(" ORDER BY id");

    let mut rows = conn.query(&sql, query_params).await?;
    let mut questions = Vec::new();
    while let Some(row) = rows.next().await? {
        questions.push(row_to_quiz_question(&row)?);
    }
    Ok(questions)
}

/// Records one answer attempt. `is_correct` is decided here, once, by the
/// caller comparing the submitted index against the stored question.
pub async fn insert_quiz_attempt(
    db: &Database,
    quiz_id: i64,
    user_answer: i64,
    is_correct: bool,
) -> Result<i64, MemoryError> {
    let conn = db.connect()?;
    conn.execute(
        "INSERT INTO quiz_attempts (quiz_id, user_answer, is_correct) VALUES (?, ?, ?)",
        params![quiz_id, user_answer, i64::from(is_correct)],
    )
    .await?;
    Ok(conn.last_insert_rowid())
}

/// Aggregates attempts into overall and per-difficulty accuracy. With no
/// attempts recorded everything reports zero.
pub async fn get_performance_stats(
    db: &Database,
    document_id: Option<i64>,
) -> Result<PerformanceStats, MemoryError> {
    let conn = db.connect()?;

    let (overall_sql, breakdown_sql, query_params) = match document_id {
        Some(id) => (
            "SELECT COUNT(a.id), SUM(a.is_correct)
             FROM quiz_attempts a JOIN quizzes q ON a.quiz_id = q.id
             WHERE q.document_id = ?",
            "SELECT q.difficulty, COUNT(a.id), SUM(a.is_correct)
             FROM quiz_attempts a JOIN quizzes q ON a.quiz_id = q.id
             WHERE q.document_id = ?
             GROUP BY q.difficulty ORDER BY q.difficulty",
            vec![TursoValue::Integer(id)],
        ),
        None => (
            "SELECT COUNT(a.id), SUM(a.is_correct)
             FROM quiz_attempts a JOIN quizzes q ON a.quiz_id = q.id",
            "SELECT q.difficulty, COUNT(a.id), SUM(a.is_correct)
             FROM quiz_attempts a JOIN quizzes q ON a.quiz_id = q.id
             GROUP BY q.difficulty ORDER BY q.difficulty",
            Vec::new(),
        ),
    };

    let mut rows = conn.query(overall_sql, query_params.clone()).await?;
    let (total_attempts, correct_answers) = match rows.next().await? {
        Some(row) => (row.get(0)?, sum_as_i64(row.get_value(1)?)),
        None => (0, 0),
    };

    let mut by_difficulty = Vec::new();
    let mut rows = conn.query(breakdown_sql, query_params).await?;
    while let Some(row) = rows.next().await? {
        let difficulty: String = row.get(0)?;
        let attempts: i64 = row.get(1)?;
        let correct = sum_as_i64(row.get_value(2)?);
        by_difficulty.push(DifficultyStats {
            difficulty,
            attempts,
            correct,
            accuracy: accuracy_percent(correct, attempts),
        });
    }

    Ok(PerformanceStats {
        total_attempts,
        correct_answers,
        accuracy: accuracy_percent(correct_answers, total_attempts),
        by_difficulty,
    })
}

// --- Revision Plans ---

pub async fn insert_revision_plan(
    db: &Database,
    document_id: i64,
    plan: &Value,
) -> Result<i64, MemoryError> {
    let conn = db.connect()?;
    let plan_json = serde_json::to_string(plan)?;
    conn.execute(
        "INSERT INTO revision_plans (document_id, plan_data) VALUES (?, ?)",
        params![document_id, plan_json],
    )
    .await?;
    Ok(conn.last_insert_rowid())
}

/// All stored plans for a document, newest first.
pub async fn get_revision_plans(
    db: &Database,
    document_id: i64,
) -> Result<Vec<RevisionPlanRecord>, MemoryError> {
    let conn = db.connect()?;
    let mut rows = conn
        .query(
            "SELECT id, document_id, plan_data, created_at
             FROM revision_plans WHERE document_id = ? ORDER BY id DESC",
            params![document_id],
        )
        .await?;

    let mut plans = Vec::new();
    while let Some(row) = rows.next().await? {
        let plan_json: String = row.get(2)?;
        plans.push(RevisionPlanRecord {
            id: row.get(0)?,
            document_id: row.get(1)?,
            plan_data: serde_json::from_str(&plan_json)?,
            created_at: row.get(3)?,
        });
    }
    Ok(plans)
}

// --- Chat History ---

pub async fn insert_chat_message(
    db: &Database,
    document_id: i64,
    question: &str,
    answer: &str,
) -> Result<i64, MemoryError> {
    let conn = db.connect()?;
    conn.execute(
        "INSERT INTO chat_history (document_id, question, answer) VALUES (?, ?, ?)",
        params![document_id, question, answer],
    )
    .await?;
    Ok(conn.last_insert_rowid())
}

/// The most recent `limit` exchanges for a document, in chronological order.
pub async fn get_chat_history(
    db: &Database,
    document_id: i64,
    limit: usize,
) -> Result<Vec<ChatMessage>, MemoryError> {
    let conn = db.connect()?;
    let mut rows = conn
        .query(
            "SELECT id, document_id, question, answer, asked_at
             FROM chat_history WHERE document_id = ? ORDER BY id DESC LIMIT ?",
            params![document_id, limit as i64],
        )
        .await?;

    let mut messages = Vec::new();
    while let Some(row) = rows.next().await? {
        messages.push(ChatMessage {
            id: row.get(0)?,
            document_id: row.get(1)?,
            question: row.get(2)?,
            answer: row.get(3)?,
            asked_at: row.get(4)?,
        });
    }
    // Fetched newest-first to apply the limit; flip back to chronological.
    messages.reverse();
    Ok(messages)
}
