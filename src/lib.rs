//! # NotePortal
//!
//! Wallet-backed client for the note and wave portal contracts. Submit a
//! musical note or a short message on-chain, then read back every
//! submission as piano keys, sheet music or a message list.
//!
//! ## Features
//!
//! - **Wallet session**: silent account check on load, explicit connect on demand
//! - **Contract reader**: full history re-read, projected to typed submissions
//! - **Contract writer**: single-flight submissions with a fixed gas-limit override
//! - **Notation**: note names, ABC tune text and playback timing for renderers
//! - **REST API**: the session and history over HTTP for a front-end
//!
//! ## Modules
//!
//! - [`portal`]: Wallet/contract boundaries and the submission client
//! - [`notation`]: MIDI naming, ABC conversion, playback schedule
//! - [`api`]: REST API server with Axum
//! - [`config`]: TOML + environment configuration
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use noteportal::portal::*;
//! use std::sync::Arc;
//! use std::time::Duration;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let portal = RpcPortal::connect(RpcConfig {
//!         rpc_url: "http://127.0.0.1:8545".to_string(),
//!         contract: "0x0Ac0754D287C67cACD6B6C067db89243902C0654".parse()?,
//!         kind: PortalKind::Note,
//!         request_timeout: Duration::from_secs(30),
//!         confirmation_timeout: Some(Duration::from_secs(120)),
//!         confirmations: 1,
//!     })?;
//!
//!     let client = SubmissionClient::new(
//!         Some(Backend::shared(Arc::new(portal))),
//!         ClientConfig::for_kind(PortalKind::Note),
//!     );
//!
//!     // Adopt an already-authorized account
//!     client.check_silently().await;
//!
//!     // Play middle C and wait for it to be mined
//!     let receipt = client.submit(Payload::Note(60)).await?;
//!     println!("Mined in {}", receipt.tx_hash);
//!
//!     for s in client.submissions().await {
//!         println!("{} {} {:?}", s.timestamp, s.address, s.payload);
//!     }
//!
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod config;
pub mod notation;
pub mod portal;

// Re-export top-level types for convenience
pub use portal::{
    AccountState, Backend, ClientConfig, Payload, PortalContract, PortalError, PortalKind,
    PortalResult, RawRecord, RpcConfig, RpcPortal, SessionSnapshot, Submission, SubmissionClient,
    SubmitReceipt, WalletProvider,
};

pub use notation::{KeyColor, NoteRange, PlaybackEvent};

pub use api::{build_router, serve, ApiConfig, ApiError, AppState};

pub use config::{
    generate_default_config, Config, ConfigError, LoggingConfig, PortalConfig, WalletConfig,
};
