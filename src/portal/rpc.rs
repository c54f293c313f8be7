//! JSON-RPC backend
//!
//! Talks to an Ethereum node over HTTP. The node holds the keys and signs
//! `eth_sendTransaction` for its unlocked accounts, which is the role an
//! injected browser wallet plays.

use alloy::network::{ReceiptResponse, TransactionBuilder};
use alloy::primitives::{Address, Bytes};
use alloy::providers::{Provider, ProviderBuilder, RootProvider};
use alloy::rpc::client::RpcClient;
use alloy::rpc::types::TransactionRequest;
use alloy::sol_types::SolCall;
use alloy::transports::http::{reqwest, Client, Http};
use async_trait::async_trait;
use std::time::Duration;

use super::abi::{NotePortal, WavePortal};
use super::backend::{PortalContract, WalletProvider};
use super::error::{PortalError, PortalResult};
use super::types::{PortalKind, RawRecord, SubmitReceipt};

/// Connection settings for [`RpcPortal`]
#[derive(Debug, Clone)]
pub struct RpcConfig {
    /// Node URL (e.g., "http://127.0.0.1:8545")
    pub rpc_url: String,
    /// Deployed portal contract
    pub contract: Address,
    /// Which ABI the contract speaks
    pub kind: PortalKind,
    /// Per-request HTTP timeout
    pub request_timeout: Duration,
    /// Upper bound on waiting for block inclusion
    pub confirmation_timeout: Option<Duration>,
    /// Blocks to wait for after inclusion
    pub confirmations: u64,
}

/// Wallet + contract backend over one HTTP provider
pub struct RpcPortal {
    provider: RootProvider<Http<Client>>,
    config: RpcConfig,
}

impl RpcPortal {
    /// Build the provider. No request is sent until the first call.
    pub fn connect(config: RpcConfig) -> PortalResult<Self> {
        let url: reqwest::Url = config
            .rpc_url
            .parse()
            .map_err(|e| PortalError::Rpc(format!("invalid rpc url {}: {}", config.rpc_url, e)))?;

        let client = Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| PortalError::Rpc(format!("failed to build http client: {}", e)))?;

        let transport = Http::with_client(client, url);
        let rpc_client = RpcClient::new(transport, false);
        let provider = ProviderBuilder::new().on_client(rpc_client);

        tracing::debug!(
            rpc_url = %config.rpc_url,
            contract = %config.contract,
            kind = %config.kind,
            "RPC portal configured"
        );

        Ok(Self { provider, config })
    }

    /// `eth_call` against the portal and decode the return data
    async fn view<C: SolCall>(&self, call: C) -> PortalResult<C::Return> {
        let tx = TransactionRequest::default()
            .with_to(self.config.contract)
            .with_input(call.abi_encode());

        let raw: Bytes = self.provider.call(&tx).await?;
        let decoded = C::abi_decode_returns(&raw, true)?;
        Ok(decoded)
    }

    fn write_input(&self, payload: &str) -> Vec<u8> {
        match self.config.kind {
            PortalKind::Note => NotePortal::playNoteCall {
                _note: payload.to_string(),
            }
            .abi_encode(),
            PortalKind::Wave => WavePortal::waveCall {
                _message: payload.to_string(),
            }
            .abi_encode(),
        }
    }
}

#[async_trait]
impl WalletProvider for RpcPortal {
    async fn silent_accounts(&self) -> PortalResult<Vec<Address>> {
        let accounts = self.provider.get_accounts().await?;
        Ok(accounts)
    }

    async fn request_accounts(&self) -> PortalResult<Vec<Address>> {
        let accounts: Vec<Address> = self
            .provider
            .raw_request("eth_requestAccounts".into(), ())
            .await?;
        Ok(accounts)
    }
}

#[async_trait]
impl PortalContract for RpcPortal {
    async fn read_all(&self) -> PortalResult<Vec<RawRecord>> {
        let records = match self.config.kind {
            PortalKind::Note => self
                .view(NotePortal::getAllNotesCall {})
                .await?
                ._0
                .into_iter()
                .map(|n| RawRecord {
                    author: n.player,
                    payload: n.note,
                    timestamp: n.timestamp,
                })
                .collect(),
            PortalKind::Wave => self
                .view(WavePortal::getAllWavesCall {})
                .await?
                ._0
                .into_iter()
                .map(|w| RawRecord {
                    author: w.waver,
                    payload: w.message,
                    timestamp: w.timestamp,
                })
                .collect(),
        };

        Ok(records)
    }

    async fn total_count(&self) -> PortalResult<u64> {
        let total = match self.config.kind {
            PortalKind::Note => self.view(NotePortal::getTotalNotesCall {}).await?._0,
            PortalKind::Wave => self.view(WavePortal::getTotalWavesCall {}).await?._0,
        };

        u64::try_from(total).map_err(|_| PortalError::Decode(format!("count {} overflows u64", total)))
    }

    async fn submit(
        &self,
        from: Address,
        payload: &str,
        gas_limit: Option<u64>,
    ) -> PortalResult<SubmitReceipt> {
        let mut tx = TransactionRequest::default()
            .with_from(from)
            .with_to(self.config.contract)
            .with_input(self.write_input(payload));

        if let Some(limit) = gas_limit {
            tx = tx.with_gas_limit(limit);
        }

        let pending = self.provider.send_transaction(tx).await?;
        let tx_hash = *pending.tx_hash();
        tracing::info!(tx_hash = %tx_hash, "Mining...");

        let receipt = pending
            .with_required_confirmations(self.config.confirmations.max(1))
            .with_timeout(self.config.confirmation_timeout)
            .get_receipt()
            .await?;

        if !receipt.status() {
            return Err(PortalError::Reverted(tx_hash.to_string()));
        }

        tracing::info!(tx_hash = %tx_hash, block = ?receipt.block_number, "Mined");

        Ok(SubmitReceipt {
            tx_hash,
            block_number: receipt.block_number,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::primitives::address;

    const TEST_RPC_URL: &str = "http://127.0.0.1:8545";

    fn test_config(kind: PortalKind) -> RpcConfig {
        RpcConfig {
            rpc_url: TEST_RPC_URL.to_string(),
            contract: address!("0Ac0754D287C67cACD6B6C067db89243902C0654"),
            kind,
            request_timeout: Duration::from_secs(5),
            confirmation_timeout: Some(Duration::from_secs(30)),
            confirmations: 1,
        }
    }

    #[test]
    fn test_invalid_url_rejected() {
        let mut config = test_config(PortalKind::Note);
        config.rpc_url = "not a url".to_string();

        assert!(matches!(RpcPortal::connect(config), Err(PortalError::Rpc(_))));
    }

    #[test]
    fn test_write_input_selects_abi() {
        let note = RpcPortal::connect(test_config(PortalKind::Note)).unwrap();
        let input = note.write_input("60");
        assert_eq!(&input[..4], NotePortal::playNoteCall::SELECTOR.as_slice());

        let wave = RpcPortal::connect(test_config(PortalKind::Wave)).unwrap();
        let input = wave.write_input("gm");
        assert_eq!(&input[..4], WavePortal::waveCall::SELECTOR.as_slice());
    }

    #[tokio::test]
    #[ignore = "requires local anvil instance"]
    async fn test_silent_accounts() {
        let portal = RpcPortal::connect(test_config(PortalKind::Note)).unwrap();
        let accounts = portal.silent_accounts().await.unwrap();
        assert!(!accounts.is_empty());
    }
}
