//! Notation Routes
//!
//! - GET /api/v1/notation - ABC tune, playback schedule and key colours for
//!   the current note history

use axum::{extract::State, Json};
use std::sync::Arc;

use crate::api::dto::{KeyDto, NotationResponse};
use crate::api::error::{ApiError, ApiResult};
use crate::api::state::AppState;
use crate::notation::{note_name, playback_schedule, tune, KeyColor, NoteRange};
use crate::portal::PortalKind;

/// GET /api/v1/notation
///
/// Only meaningful for the note portal.
pub async fn get_notation(State(state): State<Arc<AppState>>) -> ApiResult<Json<NotationResponse>> {
    if state.client.kind() != PortalKind::Note {
        return Err(ApiError::Validation(
            "Notation is only available for the note portal".to_string(),
        ));
    }

    let notes: Vec<u8> = state
        .client
        .submissions()
        .await
        .iter()
        .filter_map(|s| s.payload.note())
        .collect();

    let keys = notes
        .iter()
        .map(|n| KeyDto {
            note: *n,
            name: note_name(*n),
            color: KeyColor::for_note(*n),
        })
        .collect();

    Ok(Json(NotationResponse {
        abc: tune(&notes),
        schedule: playback_schedule(&notes),
        keys,
        range: NoteRange::default(),
    }))
}
