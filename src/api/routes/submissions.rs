//! Submission Routes
//!
//! - GET /api/v1/submissions - Last read history
//! - POST /api/v1/submissions - Submit a note or message
//! - POST /api/v1/submissions/refresh - Re-read the history

use axum::{extract::State, http::StatusCode, Json};
use std::sync::Arc;

use crate::api::dto::{
    NoteInput, RefreshResponse, SubmissionDto, SubmissionsResponse, SubmitRequest, SubmitResponse,
};
use crate::api::error::{ApiError, ApiResult};
use crate::api::state::AppState;
use crate::notation::{parse_note, summary};
use crate::portal::Payload;

/// GET /api/v1/submissions
pub async fn list_submissions(State(state): State<Arc<AppState>>) -> Json<SubmissionsResponse> {
    let submissions = state.client.submissions().await;
    let kind = state.client.kind();

    Json(SubmissionsResponse {
        kind: kind.to_string(),
        count: submissions.len(),
        summary: summary(submissions.len(), kind),
        submissions: submissions.iter().map(SubmissionDto::from).collect(),
    })
}

/// POST /api/v1/submissions/refresh
pub async fn refresh(State(state): State<Arc<AppState>>) -> ApiResult<Json<RefreshResponse>> {
    let count = state.client.refresh().await?;

    Ok(Json(RefreshResponse {
        status: "ok".to_string(),
        count,
    }))
}

/// POST /api/v1/submissions
///
/// Runs the full write cycle: send, wait for inclusion, refresh.
/// Returns 409 while another submission is in flight.
pub async fn submit(
    State(state): State<Arc<AppState>>,
    Json(req): Json<SubmitRequest>,
) -> ApiResult<(StatusCode, Json<SubmitResponse>)> {
    let payload = payload_from_request(req)?;

    let receipt = state.client.submit(payload).await?;
    let count = state.client.submissions().await.len();

    tracing::info!(tx_hash = %receipt.tx_hash, count, "Submission confirmed");

    Ok((
        StatusCode::CREATED,
        Json(SubmitResponse {
            status: "mined".to_string(),
            tx_hash: receipt.tx_hash.to_string(),
            block_number: receipt.block_number,
            count,
        }),
    ))
}

fn payload_from_request(req: SubmitRequest) -> ApiResult<Payload> {
    match (req.note, req.message) {
        (Some(_), Some(_)) => Err(ApiError::Validation(
            "Provide either note or message, not both".to_string(),
        )),
        (None, None) => Err(ApiError::Validation(
            "Provide a note or a message".to_string(),
        )),
        (Some(NoteInput::Number(n)), None) => Ok(Payload::Note(n)),
        (Some(NoteInput::Name(name)), None) => parse_note(&name)
            .map(Payload::Note)
            .ok_or_else(|| ApiError::Validation(format!("Unrecognised note: {}", name))),
        (None, Some(message)) => Ok(Payload::Message(message)),
    }
}
