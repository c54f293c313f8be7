//! In-memory wallet and contract used by unit tests.

use alloy::primitives::{address, Address, TxHash};
use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::Notify;

use super::backend::{Backend, PortalContract, WalletProvider};
use super::client::{ClientConfig, SubmissionClient};
use super::error::{PortalError, PortalResult};
use super::types::{PortalKind, RawRecord, SubmitReceipt};

pub const ALICE: Address = address!("00000000000000000000000000000000000000a1");
pub const BOB: Address = address!("00000000000000000000000000000000000000b0");

#[derive(Default)]
pub struct MockWallet {
    pub silent: Vec<Address>,
    pub requested: Vec<Address>,
    pub reject: bool,
}

#[async_trait]
impl WalletProvider for MockWallet {
    async fn silent_accounts(&self) -> PortalResult<Vec<Address>> {
        if self.reject {
            return Err(PortalError::Rpc("wallet locked".to_string()));
        }
        Ok(self.silent.clone())
    }

    async fn request_accounts(&self) -> PortalResult<Vec<Address>> {
        if self.reject {
            return Err(PortalError::Rpc("User rejected the request".to_string()));
        }
        Ok(self.requested.clone())
    }
}

/// In-memory portal; block time advances by one second per write
#[derive(Default)]
pub struct MockContract {
    pub records: Mutex<Vec<RawRecord>>,
    pub reads: AtomicUsize,
    pub writes: AtomicUsize,
    pub revert: bool,
    pub fail_reads: AtomicBool,
    pub counts: AtomicUsize,
    pub fail_counts: AtomicBool,
    pub gas_limits: Mutex<Vec<Option<u64>>>,
    /// Holds the next write open between the two signals
    pub hold: Option<(Arc<Notify>, Arc<Notify>)>,
    /// Holds the next read open after the records are copied
    pub hold_read: Mutex<Option<(Arc<Notify>, Arc<Notify>)>>,
}

#[async_trait]
impl PortalContract for MockContract {
    async fn read_all(&self) -> PortalResult<Vec<RawRecord>> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(PortalError::Rpc("network down".to_string()));
        }

        let records = self.records.lock().unwrap().clone();
        let hold = self.hold_read.lock().unwrap().take();

        if let Some((entered, release)) = hold {
            entered.notify_one();
            release.notified().await;
        }

        Ok(records)
    }

    async fn total_count(&self) -> PortalResult<u64> {
        self.counts.fetch_add(1, Ordering::SeqCst);
        if self.fail_counts.load(Ordering::SeqCst) {
            return Err(PortalError::Rpc("count unavailable".to_string()));
        }
        Ok(self.records.lock().unwrap().len() as u64)
    }

    async fn submit(
        &self,
        from: Address,
        payload: &str,
        gas_limit: Option<u64>,
    ) -> PortalResult<SubmitReceipt> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        self.gas_limits.lock().unwrap().push(gas_limit);

        if let Some((entered, release)) = &self.hold {
            entered.notify_one();
            release.notified().await;
        }

        if self.revert {
            return Err(PortalError::Reverted("0xdead".to_string()));
        }

        let mut records = self.records.lock().unwrap();
        let timestamp = 1_700_000_000 + records.len() as u64;
        records.push(RawRecord::new(from, payload, timestamp));

        Ok(SubmitReceipt {
            tx_hash: TxHash::with_last_byte(records.len() as u8),
            block_number: Some(records.len() as u64),
        })
    }
}

pub fn client_with(
    wallet: MockWallet,
    contract: Arc<MockContract>,
    kind: PortalKind,
) -> SubmissionClient {
    let backend = Backend::new(Arc::new(wallet), contract);
    SubmissionClient::new(Some(backend), ClientConfig::for_kind(kind))
}

pub fn connected_wallet() -> MockWallet {
    MockWallet {
        silent: vec![ALICE, BOB],
        requested: vec![ALICE],
        reject: false,
    }
}

