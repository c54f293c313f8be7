//! Portal client
//!
//! Wallet session, contract reader and contract writer for the note and
//! wave portal contracts.
//!
//! ## Architecture
//!
//! - **Backend**: [`WalletProvider`] + [`PortalContract`] traits, with the
//!   JSON-RPC implementation in [`RpcPortal`]
//! - **Reader**: projection of raw contract records into [`Submission`]s
//! - **SubmissionClient**: session state and the single-flight write cycle
//!
//! ## Write cycle
//!
//! 1. Claim the pending flag (rejects concurrent writes)
//! 2. Validate the payload against the portal kind
//! 3. Send the transaction and wait for inclusion
//! 4. Re-read the full history
//! 5. Release the pending flag

pub mod abi;
mod backend;
mod client;
mod error;
mod reader;
mod rpc;
mod types;

#[cfg(test)]
pub(crate) mod testing;

pub use backend::{Backend, PortalContract, WalletProvider};
pub use client::{ClientConfig, SessionSnapshot, SubmissionClient};
pub use error::{PortalError, PortalResult};
pub use reader::{map_record, map_records};
pub use rpc::{RpcConfig, RpcPortal};
pub use types::{AccountState, Payload, PortalKind, RawRecord, Submission, SubmitReceipt};
