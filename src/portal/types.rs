//! Core portal types
//!
//! Defines the fundamental data structures:
//! - [`PortalKind`]: Which contract variant the client talks to
//! - [`Payload`]: What a single submission carries
//! - [`Submission`]: One record read back from the contract
//! - [`AccountState`]: Where the wallet session stands

use alloy::primitives::{Address, TxHash, U256};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::error::{PortalError, PortalResult};

/// Contract variant.
///
/// Both variants share the same lifecycle; they differ in payload type,
/// ABI and the default gas-limit override.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PortalKind {
    /// Musical note portal: payload is a MIDI note number
    Note,
    /// Wave portal: payload is a free-form message
    Wave,
}

impl PortalKind {
    /// Gas limit used when none is configured
    pub fn default_gas_limit(&self) -> Option<u64> {
        match self {
            PortalKind::Note => Some(300_000),
            PortalKind::Wave => None,
        }
    }

    /// Singular noun for one submission of this kind
    pub fn noun(&self) -> &'static str {
        match self {
            PortalKind::Note => "note",
            PortalKind::Wave => "wave",
        }
    }
}

impl fmt::Display for PortalKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.noun())
    }
}

impl FromStr for PortalKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "note" | "notes" => Ok(PortalKind::Note),
            "wave" | "waves" => Ok(PortalKind::Wave),
            _ => Err(format!("Unknown portal kind: {}", s)),
        }
    }
}

/// Content of a single submission
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Payload {
    /// MIDI note number (0-127)
    Note(u8),
    /// Text message
    Message(String),
}

impl Payload {
    /// Check the payload fits the portal kind
    pub fn validate(&self, kind: PortalKind) -> PortalResult<()> {
        match (kind, self) {
            (PortalKind::Note, Payload::Note(n)) if *n > 127 => Err(PortalError::InvalidPayload(
                format!("note {} is not a MIDI number", n),
            )),
            (PortalKind::Note, Payload::Note(_)) => Ok(()),
            (PortalKind::Wave, Payload::Message(_)) => Ok(()),
            (kind, payload) => Err(PortalError::InvalidPayload(format!(
                "{} portal does not accept {}",
                kind,
                payload.describe()
            ))),
        }
    }

    /// String argument sent to the contract
    pub fn to_contract_arg(&self) -> String {
        match self {
            Payload::Note(n) => n.to_string(),
            Payload::Message(m) => m.clone(),
        }
    }

    /// MIDI note number, if this is a note
    pub fn note(&self) -> Option<u8> {
        match self {
            Payload::Note(n) => Some(*n),
            Payload::Message(_) => None,
        }
    }

    fn describe(&self) -> &'static str {
        match self {
            Payload::Note(_) => "a note",
            Payload::Message(_) => "a message",
        }
    }
}

/// One submission as read back from the contract.
///
/// Immutable once read; list order is the contract's insertion order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Submission {
    /// Submitter's wallet address
    pub address: Address,
    /// Block time of the submission
    pub timestamp: DateTime<Utc>,
    /// Note or message
    pub payload: Payload,
}

/// Record exactly as the contract returns it, before projection
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRecord {
    /// `player` / `waver`
    pub author: Address,
    /// `note` / `message`, always a string on-chain
    pub payload: String,
    /// Epoch seconds
    pub timestamp: U256,
}

impl RawRecord {
    pub fn new(author: Address, payload: impl Into<String>, timestamp: u64) -> Self {
        Self {
            author,
            payload: payload.into(),
            timestamp: U256::from(timestamp),
        }
    }
}

/// Wallet session account state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AccountState {
    /// Silent check has not completed (or no wallet is present)
    #[default]
    Unknown,
    /// The wallet has no authorized account; user must connect
    WalletNeeded,
    /// An authorized account is in use
    Connected(Address),
}

impl AccountState {
    /// Sentinel shown when the user still has to connect
    pub const WALLET_NEEDED: &'static str = "wallet-needed";

    /// Adopt the first account of a provider response
    pub fn from_accounts(accounts: &[Address]) -> Self {
        match accounts.first() {
            Some(account) => AccountState::Connected(*account),
            None => AccountState::WalletNeeded,
        }
    }

    pub fn account(&self) -> Option<Address> {
        match self {
            AccountState::Connected(addr) => Some(*addr),
            _ => None,
        }
    }
}

impl fmt::Display for AccountState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AccountState::Unknown => Ok(()),
            AccountState::WalletNeeded => f.write_str(Self::WALLET_NEEDED),
            AccountState::Connected(addr) => write!(f, "{}", addr),
        }
    }
}

/// Outcome of a confirmed write
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubmitReceipt {
    pub tx_hash: TxHash,
    pub block_number: Option<u64>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::primitives::address;

    #[test]
    fn test_portal_kind_parse() {
        assert_eq!("note".parse::<PortalKind>().unwrap(), PortalKind::Note);
        assert_eq!("Waves".parse::<PortalKind>().unwrap(), PortalKind::Wave);
        assert!("piano".parse::<PortalKind>().is_err());
    }

    #[test]
    fn test_default_gas_limit() {
        assert_eq!(PortalKind::Note.default_gas_limit(), Some(300_000));
        assert_eq!(PortalKind::Wave.default_gas_limit(), None);
    }

    #[test]
    fn test_payload_validation() {
        assert!(Payload::Note(60).validate(PortalKind::Note).is_ok());
        assert!(Payload::Note(128).validate(PortalKind::Note).is_err());
        assert!(Payload::Message("hi".into()).validate(PortalKind::Wave).is_ok());
        assert!(matches!(
            Payload::Message("hi".into()).validate(PortalKind::Note),
            Err(PortalError::InvalidPayload(_))
        ));
        assert!(Payload::Note(60).validate(PortalKind::Wave).is_err());
    }

    #[test]
    fn test_contract_arg() {
        assert_eq!(Payload::Note(60).to_contract_arg(), "60");
        assert_eq!(Payload::Message("gm".into()).to_contract_arg(), "gm");
    }

    #[test]
    fn test_account_state_adopts_first() {
        let a = address!("1111111111111111111111111111111111111111");
        let b = address!("2222222222222222222222222222222222222222");

        assert_eq!(AccountState::from_accounts(&[a, b]), AccountState::Connected(a));
        assert_eq!(AccountState::from_accounts(&[b]), AccountState::Connected(b));
    }

    #[test]
    fn test_account_state_empty_is_wallet_needed() {
        let state = AccountState::from_accounts(&[]);
        assert_eq!(state, AccountState::WalletNeeded);
        assert_eq!(state.to_string(), "wallet-needed");
        assert_eq!(state.account(), None);
        assert_eq!(AccountState::Unknown.to_string(), "");
    }
}
