//! NotePortal REST API
//!
//! HTTP API layer over the [`SubmissionClient`](crate::portal::SubmissionClient),
//! built with Axum.
//!
//! # Endpoints
//!
//! ## Session
//! - `GET /api/v1/session` - Current account and pending flag
//! - `POST /api/v1/session/connect` - Request wallet authorization
//!
//! ## Submissions
//! - `GET /api/v1/submissions` - Last read history
//! - `POST /api/v1/submissions` - Submit a note or message
//! - `POST /api/v1/submissions/refresh` - Re-read the history
//!
//! ## Notation
//! - `GET /api/v1/notation` - ABC tune, playback schedule, key colours
//!
//! ## Health
//! - `GET /health/live` - Liveness probe
//! - `GET /health/ready` - Readiness probe
//! - `GET /health` - Full health status
//!
//! # Example
//!
//! ```rust,ignore
//! use noteportal::api::{serve, ApiConfig, AppState};
//! use noteportal::portal::{Backend, ClientConfig, RpcPortal, SubmissionClient};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let portal = Arc::new(RpcPortal::connect(rpc_config)?);
//!     let client = Arc::new(SubmissionClient::new(
//!         Some(Backend::shared(portal)),
//!         ClientConfig::default(),
//!     ));
//!     client.check_silently().await;
//!
//!     let config = ApiConfig::default();
//!     serve(AppState::new(client, config.clone()), &config).await?;
//!
//!     Ok(())
//! }
//! ```

pub mod dto;
pub mod error;
pub mod routes;
pub mod state;

pub use error::{ApiError, ApiResult};
pub use state::{ApiConfig, AppState};

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

/// Build the API router with all routes and middleware
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        // Session routes
        .route("/session", get(routes::session::get_session))
        .route("/session/connect", post(routes::session::connect))
        // Submission routes
        .route(
            "/submissions",
            get(routes::submissions::list_submissions).post(routes::submissions::submit),
        )
        .route("/submissions/refresh", post(routes::submissions::refresh))
        // Notation routes
        .route("/notation", get(routes::notation::get_notation));

    let health_routes = Router::new()
        .route("/live", get(routes::health::liveness))
        .route("/ready", get(routes::health::readiness))
        .route("/", get(routes::health::full_health));

    let shared_state = Arc::new(state);

    Router::new()
        .nest("/api/v1", api_routes)
        .nest("/health", health_routes)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(shared_state)
}

/// Start the API server
pub async fn serve(state: AppState, config: &ApiConfig) -> Result<(), ApiError> {
    let router = build_router(state);

    let addr = config.addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("NotePortal API listening on {}", addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| ApiError::Internal(format!("Server error: {}", e)))?;

    tracing::info!("NotePortal API shut down gracefully");
    Ok(())
}

/// Wait for shutdown signal
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install signal handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::dto::{SessionResponse, SubmissionsResponse, SubmitResponse};
    use crate::portal::testing::{client_with, connected_wallet, MockContract, MockWallet};
    use crate::portal::{ClientConfig, PortalKind, RawRecord, SubmissionClient};
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use tower::util::ServiceExt;

    async fn create_test_app(kind: PortalKind) -> (Router, Arc<MockContract>) {
        let contract = Arc::new(MockContract::default());
        let client = Arc::new(client_with(connected_wallet(), contract.clone(), kind));
        client.check_silently().await;

        let state = AppState::new(client, ApiConfig::default());
        (build_router(state), contract)
    }

    fn app_without_wallet() -> Router {
        let client = Arc::new(SubmissionClient::new(None, ClientConfig::default()));
        build_router(AppState::new(client, ApiConfig::default()))
    }

    async fn body_json<T: serde::de::DeserializeOwned>(response: axum::response::Response) -> T {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn post_json(uri: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("Content-Type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn get_request(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    #[tokio::test]
    async fn test_health_live() {
        let (app, _contract) = create_test_app(PortalKind::Note).await;

        let response = app.oneshot(get_request("/health/live")).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_health_ready_without_wallet() {
        let response = app_without_wallet()
            .oneshot(get_request("/health/ready"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[tokio::test]
    async fn test_health_full() {
        let (app, _contract) = create_test_app(PortalKind::Note).await;

        let response = app.oneshot(get_request("/health")).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_session() {
        let (app, _contract) = create_test_app(PortalKind::Note).await;

        let response = app.oneshot(get_request("/api/v1/session")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let session: SessionResponse = body_json(response).await;
        assert_eq!(
            session.account,
            crate::portal::testing::ALICE.to_string()
        );
        assert!(!session.pending);
        assert_eq!(session.kind, "note");
    }

    #[tokio::test]
    async fn test_connect_without_wallet() {
        let response = app_without_wallet()
            .oneshot(post_json("/api/v1/session/connect", ""))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[tokio::test]
    async fn test_submit_note_and_list() {
        let (app, contract) = create_test_app(PortalKind::Note).await;

        let response = app
            .clone()
            .oneshot(post_json("/api/v1/submissions", r#"{"note": "C4"}"#))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);

        let submitted: SubmitResponse = body_json(response).await;
        assert_eq!(submitted.count, 1);
        assert_eq!(contract.records.lock().unwrap()[0].payload, "60");

        let response = app.oneshot(get_request("/api/v1/submissions")).await.unwrap();
        let list: SubmissionsResponse = body_json(response).await;
        assert_eq!(list.count, 1);
        assert_eq!(list.summary, "1 note played!");
        assert_eq!(list.submissions[0].note, Some(60));
        assert_eq!(list.submissions[0].note_name.as_deref(), Some("C4"));
    }

    #[tokio::test]
    async fn test_submit_message_to_note_portal() {
        let (app, _contract) = create_test_app(PortalKind::Note).await;

        let response = app
            .oneshot(post_json("/api/v1/submissions", r#"{"message": "gm"}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_submit_invalid_json() {
        let (app, _contract) = create_test_app(PortalKind::Note).await;

        let response = app
            .oneshot(post_json("/api/v1/submissions", "not json"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_submit_without_account() {
        let contract = Arc::new(MockContract::default());
        let client = Arc::new(client_with(MockWallet::default(), contract, PortalKind::Wave));
        client.check_silently().await;
        let app = build_router(AppState::new(client, ApiConfig::default()));

        let response = app
            .oneshot(post_json("/api/v1/submissions", r#"{"message": "gm"}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_refresh() {
        let (app, contract) = create_test_app(PortalKind::Wave).await;
        contract.records.lock().unwrap().push(RawRecord::new(
            crate::portal::testing::BOB,
            "hello",
            1_700_000_000,
        ));

        let response = app
            .clone()
            .oneshot(post_json("/api/v1/submissions/refresh", ""))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let response = app.oneshot(get_request("/api/v1/submissions")).await.unwrap();
        let list: SubmissionsResponse = body_json(response).await;
        assert_eq!(list.summary, "1 wave sent!");
        assert_eq!(list.submissions[0].message.as_deref(), Some("hello"));
    }

    #[tokio::test]
    async fn test_notation() {
        let (app, contract) = create_test_app(PortalKind::Note).await;
        {
            let mut records = contract.records.lock().unwrap();
            records.push(RawRecord::new(crate::portal::testing::ALICE, "60", 1));
            records.push(RawRecord::new(crate::portal::testing::ALICE, "61", 2));
        }

        app.clone()
            .oneshot(post_json("/api/v1/submissions/refresh", ""))
            .await
            .unwrap();

        let response = app.oneshot(get_request("/api/v1/notation")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json: serde_json::Value = body_json(response).await;
        assert_eq!(json["abc"], "\nM:4/4\n C2 _D2");
        assert_eq!(json["keys"][1]["name"], "Db4");
        assert_eq!(json["keys"][1]["color"]["background"], "#555");
        assert_eq!(json["schedule"][1]["time"], 0.5);
        assert_eq!(json["range"]["first"], 60);
    }

    #[tokio::test]
    async fn test_notation_rejected_for_wave() {
        let (app, _contract) = create_test_app(PortalKind::Wave).await;

        let response = app.oneshot(get_request("/api/v1/notation")).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
