pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::interview::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Stateless parsing
        .route("/api/v1/resume/parse", post(handlers::handle_parse_resume))
        // Interview sessions
        .route("/api/v1/sessions", post(handlers::handle_create_session))
        .route(
            "/api/v1/sessions/:id",
            get(handlers::handle_get_session).delete(handlers::handle_delete_session),
        )
        .route(
            "/api/v1/sessions/:id/resume",
            post(handlers::handle_upload_resume)
                .layer(DefaultBodyLimit::max(handlers::MAX_UPLOAD_BYTES)),
        )
        .route("/api/v1/sessions/:id/answer", post(handlers::handle_answer))
        .route(
            "/api/v1/sessions/:id/transcript",
            post(handlers::handle_transcript),
        )
        .route("/api/v1/sessions/:id/cancel", post(handlers::handle_cancel))
        .route(
            "/api/v1/sessions/:id/questions",
            get(handlers::handle_suggested_questions),
        )
        .with_state(state)
}
