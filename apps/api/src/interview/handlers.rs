use std::sync::Arc;

use anyhow::anyhow;
use axum::{
    extract::{Multipart, Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::extraction::{self, Document, ExtractionError};
use crate::interview::session::{InterviewSession, SessionSnapshot, Transcript};
use crate::models::resume::ResumeRecord;
use crate::parser;
use crate::state::AppState;

/// Upload size cap for résumé files.
pub const MAX_UPLOAD_BYTES: usize = 5 * 1024 * 1024;

pub const EMPTY_UPLOAD_MESSAGE: &str = "Please upload a file or enter resume text.";

#[derive(Deserialize)]
pub struct ParseRequest {
    pub text: String,
}

#[derive(Deserialize)]
pub struct AnswerRequest {
    pub question: String,
}

#[derive(Serialize)]
pub struct AnswerResponse {
    pub answer: String,
}

#[derive(Serialize)]
pub struct TranscriptResponse {
    /// `None` for interim transcripts.
    pub answer: Option<String>,
}

#[derive(Serialize)]
pub struct CancelResponse {
    pub cancelled: bool,
}

#[derive(Serialize)]
pub struct UploadResponse {
    pub resume: ResumeRecord,
    /// True when no section yielded anything; the candidate will lean on defaults.
    pub sparse: bool,
    pub suggested_questions: Vec<String>,
}

fn find_session(state: &AppState, id: Uuid) -> Result<Arc<InterviewSession>, AppError> {
    state
        .sessions
        .get(id)
        .ok_or_else(|| AppError::NotFound(format!("Session {id} not found")))
}

/// POST /api/v1/resume/parse
pub async fn handle_parse_resume(Json(req): Json<ParseRequest>) -> Result<Json<ResumeRecord>, AppError> {
    if req.text.trim().is_empty() {
        return Err(AppError::Validation(EMPTY_UPLOAD_MESSAGE.to_string()));
    }
    Ok(Json(parser::parse(&req.text)))
}

/// POST /api/v1/sessions
pub async fn handle_create_session(
    State(state): State<AppState>,
) -> (StatusCode, Json<SessionSnapshot>) {
    let session = state.sessions.create();
    info!("Created interview session {}", session.id());
    (StatusCode::CREATED, Json(session.snapshot()))
}

/// GET /api/v1/sessions/:id
pub async fn handle_get_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SessionSnapshot>, AppError> {
    Ok(Json(find_session(&state, id)?.snapshot()))
}

/// DELETE /api/v1/sessions/:id
pub async fn handle_delete_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    state
        .sessions
        .remove(id)
        .ok_or_else(|| AppError::NotFound(format!("Session {id} not found")))?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/sessions/:id/resume
///
/// Multipart with a `file` field, a `text` field, or both. A non-empty file
/// wins over pasted text.
pub async fn handle_upload_resume(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>, AppError> {
    let session = find_session(&state, id)?;

    let mut document: Option<Document> = None;
    let mut pasted: Option<String> = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Malformed upload: {e}")))?
    {
        match field.name() {
            Some("file") => {
                let file_name = field.file_name().map(str::to_string);
                let content_type = field.content_type().map(str::to_string);
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| ExtractionError::Read(e.to_string()))?;
                if !bytes.is_empty() {
                    document = Some(Document {
                        file_name,
                        content_type,
                        ..Document::new(bytes)
                    });
                }
            }
            Some("text") => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| AppError::Validation(format!("Malformed resume text: {e}")))?;
                if !text.trim().is_empty() {
                    pasted = Some(text);
                }
            }
            _ => {}
        }
    }

    let raw_text = match (document, pasted) {
        (Some(document), _) => {
            let extractor = state.page_extractor.clone();
            tokio::task::spawn_blocking(move || extraction::extract_text(&document, extractor.as_ref()))
                .await
                .map_err(|e| AppError::Internal(anyhow!("spawn_blocking failed in extraction: {e}")))?
        }
        (None, Some(text)) => text,
        (None, None) => return Err(AppError::Validation(EMPTY_UPLOAD_MESSAGE.to_string())),
    };

    let record = parser::parse(&raw_text);
    let sparse = record.is_sparse();
    session.install_resume(record.clone());

    Ok(Json(UploadResponse {
        resume: record,
        sparse,
        suggested_questions: session.suggested_questions(),
    }))
}

/// POST /api/v1/sessions/:id/answer
pub async fn handle_answer(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<AnswerRequest>,
) -> Result<Json<AnswerResponse>, AppError> {
    let session = find_session(&state, id)?;
    let answer = session.ask(&req.question).await?;
    Ok(Json(AnswerResponse { answer }))
}

/// POST /api/v1/sessions/:id/transcript
pub async fn handle_transcript(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(transcript): Json<Transcript>,
) -> Result<Json<TranscriptResponse>, AppError> {
    let session = find_session(&state, id)?;
    let answer = session.submit_transcript(&transcript).await?;
    Ok(Json(TranscriptResponse { answer }))
}

/// POST /api/v1/sessions/:id/cancel
pub async fn handle_cancel(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<CancelResponse>, AppError> {
    let session = find_session(&state, id)?;
    Ok(Json(CancelResponse {
        cancelled: session.cancel(),
    }))
}

/// GET /api/v1/sessions/:id/questions
pub async fn handle_suggested_questions(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<String>>, AppError> {
    Ok(Json(find_session(&state, id)?.suggested_questions()))
}
