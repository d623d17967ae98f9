use super::{handlers, state::AppState};
use axum::extract::DefaultBodyLimit;
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

/// Creates the Axum router with all the application routes.
pub fn create_router(app_state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::root))
        .route("/health", get(handlers::health_check))
        .route(
            "/documents/upload",
            post(handlers::upload_document_handler).layer(DefaultBodyLimit::max(10 * 1024 * 1024)),
        )
        .route("/documents", get(handlers::list_documents_handler))
        .route(
            "/flashcards/generate",
            post(handlers::generate_flashcards_handler),
        )
        .route("/flashcards", get(handlers::list_flashcards_handler))
        .route("/quiz/generate", post(handlers::generate_quiz_handler))
        .route("/quiz", get(handlers::list_quizzes_handler))
        .route("/quiz/answer", post(handlers::answer_quiz_handler))
        .route("/quiz/stats", get(handlers::quiz_stats_handler))
        .route("/plan/generate", post(handlers::generate_plan_handler))
        .route("/plans", get(handlers::list_plans_handler))
        .route("/chat/ask", post(handlers::chat_ask_handler))
        .route("/chat/summarize", post(handlers::chat_summarize_handler))
        .route("/chat/history", get(handlers::chat_history_handler))
        .with_state(app_state)
        .layer(TraceLayer::new_for_http())
}
