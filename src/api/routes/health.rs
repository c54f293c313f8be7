//! Health Routes
//!
//! Health check endpoints for monitoring and Kubernetes probes.
//!
//! - GET /health/live - Liveness probe (process is alive)
//! - GET /health/ready - Readiness probe (a wallet provider is configured)
//! - GET /health - Full health status

use axum::{extract::State, http::StatusCode, Json};
use std::sync::Arc;

use crate::api::dto::HealthResponse;
use crate::api::state::AppState;
use crate::portal::AccountState;

/// GET /health/live
///
/// Kubernetes liveness probe.
/// Returns 200 if the process is alive, no dependency checks.
pub async fn liveness() -> StatusCode {
    StatusCode::OK
}

/// GET /health/ready
///
/// Returns 200 once a wallet provider is configured. Without one, reads and
/// writes cannot succeed.
pub async fn readiness(State(state): State<Arc<AppState>>) -> StatusCode {
    if state.client.has_wallet() {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    }
}

/// GET /health
///
/// Full health status with wallet details.
pub async fn full_health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let wallet = if !state.client.has_wallet() {
        "absent"
    } else {
        match state.client.account().await {
            AccountState::Connected(_) => "connected",
            AccountState::WalletNeeded => AccountState::WALLET_NEEDED,
            AccountState::Unknown => "unknown",
        }
    };

    let status = if wallet == "connected" {
        "healthy"
    } else {
        "degraded"
    };

    Json(HealthResponse {
        status: status.to_string(),
        wallet: wallet.to_string(),
        kind: state.client.kind().to_string(),
        uptime_seconds: state.uptime_seconds(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_liveness() {
        let status = liveness().await;
        assert_eq!(status, StatusCode::OK);
    }
}
