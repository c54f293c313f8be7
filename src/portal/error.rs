//! Portal error types
//!
//! Every failure of the wallet session, contract reader and contract writer.

use alloy::providers::PendingTransactionError;
use alloy::transports::{RpcError, TransportErrorKind};
use thiserror::Error;

/// Errors that can occur while talking to the wallet or the contract
#[derive(Error, Debug)]
pub enum PortalError {
    /// No wallet provider is configured
    #[error("No wallet provider available")]
    WalletAbsent,

    /// The wallet returned no authorized account
    #[error("Wallet returned no accounts")]
    NoAccounts,

    /// A write was attempted before an account was adopted
    #[error("No connected account")]
    NotConnected,

    /// Another write is still waiting for confirmation
    #[error("A submission is already in flight")]
    WriteInFlight,

    /// Payload does not match the portal kind or is out of range
    #[error("Invalid payload: {0}")]
    InvalidPayload(String),

    /// JSON-RPC transport or node error
    #[error("RPC error: {0}")]
    Rpc(String),

    /// Waiting for block inclusion failed or timed out
    #[error("Confirmation error: {0}")]
    Confirmation(String),

    /// The transaction was mined but reverted
    #[error("Transaction reverted: {0}")]
    Reverted(String),

    /// Contract return data could not be decoded
    #[error("Decode error: {0}")]
    Decode(String),

    /// On-chain timestamp does not fit a date
    #[error("Timestamp out of range: {0}")]
    Timestamp(String),
}

impl From<RpcError<TransportErrorKind>> for PortalError {
    fn from(err: RpcError<TransportErrorKind>) -> Self {
        PortalError::Rpc(err.to_string())
    }
}

impl From<PendingTransactionError> for PortalError {
    fn from(err: PendingTransactionError) -> Self {
        PortalError::Confirmation(err.to_string())
    }
}

impl From<alloy::sol_types::Error> for PortalError {
    fn from(err: alloy::sol_types::Error) -> Self {
        PortalError::Decode(err.to_string())
    }
}

/// Result type alias for portal operations
pub type PortalResult<T> = Result<T, PortalError>;
