use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::state::AppState;

/// GET /health
/// Returns a simple status object with service version and answer mode.
pub async fn health_handler(State(state): State<AppState>) -> Json<Value> {
    let llm = if state.config.llm_api_key.is_some() {
        "live"
    } else {
        "offline"
    };
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "service": "mock-interview",
        "llm": llm
    }))
}
