//! Wallet and contract boundaries
//!
//! The Submission Client only sees these two traits. The JSON-RPC
//! implementation lives in [`super::rpc`]; tests substitute in-memory ones.

use alloy::primitives::Address;
use async_trait::async_trait;
use std::sync::Arc;

use super::error::PortalResult;
use super::types::{RawRecord, SubmitReceipt};

/// Account authorization side of the wallet
#[async_trait]
pub trait WalletProvider: Send + Sync {
    /// Accounts already authorized, without prompting (`eth_accounts`)
    async fn silent_accounts(&self) -> PortalResult<Vec<Address>>;

    /// Ask the wallet for authorization, may prompt (`eth_requestAccounts`)
    async fn request_accounts(&self) -> PortalResult<Vec<Address>>;
}

/// The three contract entry points the client consumes
#[async_trait]
pub trait PortalContract: Send + Sync {
    /// Full submission history in insertion order
    async fn read_all(&self) -> PortalResult<Vec<RawRecord>>;

    /// Total number of submissions
    async fn total_count(&self) -> PortalResult<u64>;

    /// Send one submission from `from` and wait for block inclusion
    async fn submit(
        &self,
        from: Address,
        payload: &str,
        gas_limit: Option<u64>,
    ) -> PortalResult<SubmitReceipt>;
}

/// A wallet paired with the contract it signs for
#[derive(Clone)]
pub struct Backend {
    pub wallet: Arc<dyn WalletProvider>,
    pub contract: Arc<dyn PortalContract>,
}

impl Backend {
    pub fn new(wallet: Arc<dyn WalletProvider>, contract: Arc<dyn PortalContract>) -> Self {
        Self { wallet, contract }
    }

    /// Backend where a single object plays both roles
    pub fn shared<T>(inner: Arc<T>) -> Self
    where
        T: WalletProvider + PortalContract + 'static,
    {
        Self {
            wallet: inner.clone(),
            contract: inner,
        }
    }
}
