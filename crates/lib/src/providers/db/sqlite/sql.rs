//! # SQLite Specific SQL Queries
//!
//! This module centralizes the table definitions for the SQLite provider.
//! This makes the core logic cleaner and isolates database-specific syntax.

/// Uploaded documents. `content` holds the full extracted text, untruncated;
/// `metadata` is a JSON object (page count, word count, analysis fields).
pub const CREATE_DOCUMENTS_TABLE: &str = "
    CREATE TABLE IF NOT EXISTS documents (
        id INTEGER PRIMARY KEY,
        filename TEXT NOT NULL,
        content TEXT NOT NULL,
        metadata TEXT,
        uploaded_at DATETIME DEFAULT CURRENT_TIMESTAMP
    );";

pub const CREATE_FLASHCARDS_TABLE: &str = "
    CREATE TABLE IF NOT EXISTS flashcards (
        id INTEGER PRIMARY KEY,
        document_id INTEGER NOT NULL,
        question TEXT NOT NULL,
        answer TEXT NOT NULL,
        topic TEXT,
        difficulty TEXT DEFAULT 'medium',
        created_at DATETIME DEFAULT CURRENT_TIMESTAMP,
        FOREIGN KEY (document_id) REFERENCES documents(id)
    );";

/// Multiple-choice questions. `options` is a JSON array of exactly four strings
/// and `correct_answer` indexes into it.
pub const CREATE_QUIZZES_TABLE: &str = "
    CREATE TABLE IF NOT EXISTS quizzes (
        id INTEGER PRIMARY KEY,
        document_id INTEGER NOT NULL,
        question TEXT NOT NULL,
        options TEXT NOT NULL,
        correct_answer INTEGER NOT NULL,
        difficulty TEXT DEFAULT 'medium',
        topic TEXT,
        created_at DATETIME DEFAULT CURRENT_TIMESTAMP,
        FOREIGN KEY (document_id) REFERENCES documents(id)
    );";

/// One row per submitted answer. `is_correct` is decided at insert time and
/// never recomputed.
pub const CREATE_QUIZ_ATTEMPTS_TABLE: &str = "
    CREATE TABLE IF NOT EXISTS quiz_attempts (
        id INTEGER PRIMARY KEY,
        quiz_id INTEGER NOT NULL,
        user_answer INTEGER NOT NULL,
        is_correct INTEGER NOT NULL,
        attempted_at DATETIME DEFAULT CURRENT_TIMESTAMP,
        FOREIGN KEY (quiz_id) REFERENCES quizzes(id)
    );";

/// `plan_data` is the full plan as a JSON document.
pub const CREATE_REVISION_PLANS_TABLE: &str = "
    CREATE TABLE IF NOT EXISTS revision_plans (
        id INTEGER PRIMARY KEY,
        document_id INTEGER NOT NULL,
        plan_data TEXT NOT NULL,
        created_at DATETIME DEFAULT CURRENT_TIMESTAMP,
        FOREIGN KEY (document_id) REFERENCES documents(id)
    );";

pub const CREATE_CHAT_HISTORY_TABLE: &str = "
    CREATE TABLE IF NOT EXISTS chat_history (
        id INTEGER PRIMARY KEY,
        document_id INTEGER NOT NULL,
        question TEXT NOT NULL,
        answer TEXT NOT NULL,
        asked_at DATETIME DEFAULT CURRENT_TIMESTAMP,
        FOREIGN KEY (document_id) REFERENCES documents(id)
    );";

/// Every table the application needs, in creation order.
pub const ALL_TABLE_CREATION_SQL: &[&str] = &[
    CREATE_DOCUMENTS_TABLE,
    CREATE_FLASHCARDS_TABLE,
    CREATE_QUIZZES_TABLE,
    CREATE_QUIZ_ATTEMPTS_TABLE,
    CREATE_REVISION_PLANS_TABLE,
    CREATE_CHAT_HISTORY_TABLE,
];
