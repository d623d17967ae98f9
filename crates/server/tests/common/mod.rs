//! # Common Test Utilities
//!
//! This module centralizes the test harness and helpers used across the
//! `studykit-server` integration tests. It includes:
//!
//! - `TestApp`: A full application harness that spawns a real server on a random
//!   port, backed by a temporary SQLite database and a mock AI endpoint.
//! - `TestDataBuilder`: A fluent builder that seeds rows straight into the
//!   database behind the running server.
//! - `ai_response`: The OpenAI-compatible completion body the mock AI returns.

// Allow unused code because this is a test utility module, and not all
// functions might be used by every test file that includes it.
#![allow(unused)]

use anyhow::Result;
use axum::serve;
use httpmock::MockServer;
use reqwest::Client;
use serde_json::{json, Value};
use std::{net::SocketAddr, path::PathBuf};
use studykit_server::{
    config::Config,
    router,
    state::{build_app_state, AppState},
};
use tempfile::NamedTempFile;
use tokio::{net::TcpListener, task::JoinHandle};

// --- Full Application Test Harness ---

/// A harness for end-to-end testing of the Axum server.
///
/// This struct spawns the server on a random available port, sets up a temporary
/// SQLite database, and points the AI provider at an `httpmock::MockServer`
/// instance.
pub struct TestApp {
    pub address: String,
    pub client: Client,
    pub mock_server: MockServer,
    pub db_path: PathBuf,
    pub app_state: AppState,
    _db_file: Option<NamedTempFile>,
    _server_handle: JoinHandle<()>,
    shutdown_tx: Option<tokio::sync::oneshot::Sender<()>>,
}

impl TestApp {
    /// Spawns the application server and returns a `TestApp` instance.
    pub async fn spawn() -> Result<Self> {
        let mock_server = MockServer::start();
        let db_file = NamedTempFile::new()?;
        let db_path = db_file.path().to_path_buf();

        // Built directly rather than from the environment so parallel tests
        // cannot race each other through process-wide env vars.
        let config = Config {
            port: 0,
            db_url: db_path.to_string_lossy().to_string(),
            ai_api_url: mock_server.url("/v1/chat/completions"),
            ai_api_key: None,
            ai_model: "mock-chat-model".to_string(),
        };
        let app_state = build_app_state(config).await?;

        let mut app = TestApp::spawn_with_state(app_state, mock_server).await?;
        app._db_file = Some(db_file);
        Ok(app)
    }

    pub async fn spawn_with_state(app_state: AppState, mock_server: MockServer) -> Result<Self> {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .compact()
            .try_init();

        let db_path = PathBuf::from(&app_state.config.db_url);
        let app_state_for_harness = app_state.clone();

        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr: SocketAddr = listener.local_addr()?;
        let address = format!("http://{addr}");

        let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel();
        let server_handle = tokio::spawn(async move {
            let app = router::create_router(app_state);
            let server = serve(listener, app).with_graceful_shutdown(async {
                shutdown_rx.await.ok();
            });
            if let Err(e) = server.await {
                tracing::error!("[TestApp] Server error: {}", e);
            }
        });

        tokio::time::sleep(tokio::time::Duration::from_millis(100)).await;

        Ok(Self {
            address,
            client: Client::new(),
            mock_server,
            db_path,
            app_state: app_state_for_harness,
            _db_file: None,
            _server_handle: server_handle,
            shutdown_tx: Some(shutdown_tx),
        })
    }
}

impl Drop for TestApp {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

// --- Test Data Builder ---

/// A fluent builder for creating test data in the database.
pub struct TestDataBuilder<'a> {
    // We hold a reference to the TestApp to ensure the database file outlives the builder.
    _app: &'a TestApp,
    conn: turso::Connection,
}

impl<'a> TestDataBuilder<'a> {
    /// Creates a new TestDataBuilder.
    pub async fn new(app: &'a TestApp) -> Result<Self> {
        let db = turso::Builder::new_local(app.db_path.to_str().unwrap())
            .build()
            .await?;
        let conn = db.connect()?;
        Ok(Self { _app: app, conn })
    }

    /// Adds a document and returns its id.
    pub async fn add_document(
        &self,
        filename: &str,
        content: &str,
        metadata: Option<&Value>,
    ) -> Result<i64> {
        let metadata_json = metadata.map(|m| m.to_string());
        self.conn
            .execute(
                "INSERT INTO documents (filename, content, metadata) VALUES (?, ?, ?)",
                turso::params![filename, content, metadata_json],
            )
            .await?;
        Ok(self.conn.last_insert_rowid())
    }

    /// Adds a flashcard and returns its id.
    pub async fn add_flashcard(
        &self,
        document_id: i64,
        question: &str,
        answer: &str,
        topic: Option<&str>,
        difficulty: &str,
    ) -> Result<i64> {
        self.conn
            .execute(
                "INSERT INTO flashcards (document_id, question, answer, topic, difficulty)
                 VALUES (?, ?, ?, ?, ?)",
                turso::params![
                    document_id,
                    question,
                    answer,
                    topic.map(str::to_string),
                    difficulty
                ],
            )
            .await?;
        Ok(self.conn.last_insert_rowid())
    }

    /// Adds a four-option quiz question and returns its id.
    pub async fn add_quiz_question(
        &self,
        document_id: i64,
        question: &str,
        options: &[&str; 4],
        correct_answer: i64,
        difficulty: &str,
    ) -> Result<i64> {
        let options_json = serde_json::to_string(options)?;
        self.conn
            .execute(
                "INSERT INTO quizzes (document_id, question, options, correct_answer, difficulty)
                 VALUES (?, ?, ?, ?, ?)",
                turso::params![document_id, question, options_json, correct_answer, difficulty],
            )
            .await?;
        Ok(self.conn.last_insert_rowid())
    }

    /// Adds a chat exchange and returns its id.
    pub async fn add_chat_message(
        &self,
        document_id: i64,
        question: &str,
        answer: &str,
    ) -> Result<i64> {
        self.conn
            .execute(
                "INSERT INTO chat_history (document_id, question, answer) VALUES (?, ?, ?)",
                turso::params![document_id, question, answer],
            )
            .await?;
        Ok(self.conn.last_insert_rowid())
    }
}

// --- Mock Data Helpers ---

/// Builds the OpenAI-compatible completion body the mock AI endpoint returns.
pub fn ai_response(content: &str) -> Value {
    json!({
        "choices": [{
            "message": {
                "role": "assistant",
                "content": content
            }
        }]
    })
}
