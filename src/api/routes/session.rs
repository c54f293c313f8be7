//! Session Routes
//!
//! - GET /api/v1/session - Current account and pending flag
//! - POST /api/v1/session/connect - Request wallet authorization

use axum::{extract::State, Json};
use std::sync::Arc;

use crate::api::dto::{ConnectResponse, SessionResponse};
use crate::api::error::ApiResult;
use crate::api::state::AppState;

/// GET /api/v1/session
pub async fn get_session(State(state): State<Arc<AppState>>) -> Json<SessionResponse> {
    let session = state.client.session().await;

    Json(SessionResponse {
        account: session.account.to_string(),
        pending: session.pending,
        kind: state.client.kind().to_string(),
        wallet_present: state.client.has_wallet(),
    })
}

/// POST /api/v1/session/connect
///
/// Explicit connect. Fails with 503 when no wallet provider is configured.
pub async fn connect(State(state): State<Arc<AppState>>) -> ApiResult<Json<ConnectResponse>> {
    let account = state.client.connect_explicitly().await?;
    let count = state.client.submissions().await.len();

    Ok(Json(ConnectResponse {
        account: account.to_string(),
        count,
    }))
}
