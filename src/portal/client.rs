//! Submission Client
//!
//! Chains the three responsibilities of the portal:
//!
//! 1. **Wallet Session**: silent account check on load, explicit connect on demand
//! 2. **Contract Reader**: re-fetch the whole history and project it
//! 3. **Contract Writer**: one submission at a time, then refresh
//!
//! ## Single-flight writes
//!
//! The pending flag is claimed with a compare-exchange before the first
//! `.await` of [`SubmissionClient::submit`]. A second call that arrives while
//! the flag is held gets [`PortalError::WriteInFlight`]. The flag is released
//! by [`PendingGuard`] on every exit path.

use alloy::primitives::Address;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use tokio::sync::{Mutex, RwLock};

use super::backend::Backend;
use super::error::{PortalError, PortalResult};
use super::reader::map_records;
use super::types::{AccountState, Payload, PortalKind, Submission, SubmitReceipt};

/// Client-side settings for the write path
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Contract variant
    pub kind: PortalKind,
    /// Gas-limit override for writes (None lets the wallet estimate)
    pub gas_limit: Option<u64>,
    /// Read the total count before and after each write, for logging
    pub log_counts: bool,
}

impl ClientConfig {
    /// Config with the kind's default gas limit
    pub fn for_kind(kind: PortalKind) -> Self {
        Self {
            kind,
            gas_limit: kind.default_gas_limit(),
            log_counts: true,
        }
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::for_kind(PortalKind::Note)
    }
}

/// Point-in-time view of the session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSnapshot {
    pub account: AccountState,
    pub pending: bool,
}

/// Wallet session + contract reader + contract writer
pub struct SubmissionClient {
    backend: Option<Backend>,
    config: ClientConfig,
    account: RwLock<AccountState>,
    submissions: RwLock<Vec<Submission>>,
    /// Serializes read-then-store so an older read never replaces a newer list
    refresh_lock: Mutex<()>,
    pending: AtomicBool,
    refreshes: AtomicU64,
}

/// Releases the pending flag when dropped
struct PendingGuard<'a> {
    flag: &'a AtomicBool,
}

impl<'a> PendingGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self { flag })
    }
}

impl Drop for PendingGuard<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}

impl SubmissionClient {
    /// Create a client. `backend` is `None` when no wallet is present.
    pub fn new(backend: Option<Backend>, config: ClientConfig) -> Self {
        Self {
            backend,
            config,
            account: RwLock::new(AccountState::Unknown),
            submissions: RwLock::new(Vec::new()),
            refresh_lock: Mutex::new(()),
            pending: AtomicBool::new(false),
            refreshes: AtomicU64::new(0),
        }
    }

    pub fn kind(&self) -> PortalKind {
        self.config.kind
    }

    /// Whether a wallet provider is configured
    pub fn has_wallet(&self) -> bool {
        self.backend.is_some()
    }

    /// Whether a write is waiting for confirmation
    pub fn is_pending(&self) -> bool {
        self.pending.load(Ordering::Acquire)
    }

    /// Number of completed reader runs
    pub fn refresh_count(&self) -> u64 {
        self.refreshes.load(Ordering::Relaxed)
    }

    pub async fn account(&self) -> AccountState {
        *self.account.read().await
    }

    pub async fn session(&self) -> SessionSnapshot {
        SessionSnapshot {
            account: self.account().await,
            pending: self.is_pending(),
        }
    }

    /// Last successfully read history
    pub async fn submissions(&self) -> Vec<Submission> {
        self.submissions.read().await.clone()
    }

    // ============================================
    // Wallet Session
    // ============================================

    /// Adopt an already-authorized account without prompting.
    ///
    /// Failures are logged only; the returned state is whatever the session
    /// holds afterwards.
    pub async fn check_silently(&self) -> AccountState {
        let Some(backend) = &self.backend else {
            tracing::info!("No wallet provider configured");
            return self.account().await;
        };

        let accounts = match backend.wallet.silent_accounts().await {
            Ok(accounts) => accounts,
            Err(e) => {
                tracing::warn!(error = %e, "Silent account check failed");
                return self.account().await;
            }
        };

        let state = AccountState::from_accounts(&accounts);
        *self.account.write().await = state;

        match state {
            AccountState::Connected(account) => {
                tracing::info!(account = %account, "Found an authorized account");
                self.refresh_logged().await;
            }
            _ => tracing::info!("No authorized account found"),
        }

        state
    }

    /// Request authorization from the wallet and adopt the first account
    pub async fn connect_explicitly(&self) -> PortalResult<Address> {
        let backend = self.backend.as_ref().ok_or_else(|| {
            tracing::warn!("Connect requested but no wallet provider is configured");
            PortalError::WalletAbsent
        })?;

        let accounts = backend.wallet.request_accounts().await.map_err(|e| {
            tracing::warn!(error = %e, "Account request failed");
            e
        })?;

        let account = match AccountState::from_accounts(&accounts) {
            AccountState::Connected(account) => account,
            _ => {
                tracing::warn!("Wallet granted no accounts");
                *self.account.write().await = AccountState::WalletNeeded;
                return Err(PortalError::NoAccounts);
            }
        };

        *self.account.write().await = AccountState::Connected(account);
        tracing::info!(account = %account, "Connected");

        self.refresh_logged().await;
        Ok(account)
    }

    // ============================================
    // Contract Reader
    // ============================================

    /// Re-fetch the full history and replace the cached list.
    ///
    /// On failure the cached list is left as it was. Concurrent refreshes
    /// run one after another.
    pub async fn refresh(&self) -> PortalResult<usize> {
        let backend = self.backend.as_ref().ok_or(PortalError::WalletAbsent)?;

        let _serial = self.refresh_lock.lock().await;

        let raws = backend.contract.read_all().await?;
        let submissions = map_records(self.config.kind, raws);
        let count = submissions.len();

        *self.submissions.write().await = submissions;
        self.refreshes.fetch_add(1, Ordering::Relaxed);

        tracing::debug!(count, kind = %self.config.kind, "Submissions refreshed");
        Ok(count)
    }

    async fn refresh_logged(&self) {
        if let Err(e) = self.refresh().await {
            tracing::warn!(error = %e, "Failed to refresh submissions");
        }
    }

    // ============================================
    // Contract Writer
    // ============================================

    /// Submit one payload, wait for inclusion, then refresh the history.
    pub async fn submit(&self, payload: Payload) -> PortalResult<SubmitReceipt> {
        let _guard = PendingGuard::acquire(&self.pending).ok_or(PortalError::WriteInFlight)?;

        payload.validate(self.config.kind)?;

        let backend = self.backend.as_ref().ok_or(PortalError::WalletAbsent)?;
        let from = self.account().await.account().ok_or(PortalError::NotConnected)?;

        if self.config.log_counts {
            self.log_total(backend, "before write").await;
        }

        let receipt = backend
            .contract
            .submit(from, &payload.to_contract_arg(), self.config.gas_limit)
            .await
            .map_err(|e| {
                tracing::warn!(error = %e, "Submission failed");
                e
            })?;

        if self.config.log_counts {
            self.log_total(backend, "after write").await;
        }

        self.refresh_logged().await;
        Ok(receipt)
    }

    async fn log_total(&self, backend: &Backend, stage: &str) {
        match backend.contract.total_count().await {
            Ok(total) => tracing::info!(total, stage, "Retrieved total {} count", self.config.kind),
            Err(e) => tracing::warn!(error = %e, stage, "Failed to read total count"),
        }
    }
}
