//! Data Transfer Objects
//!
//! Request and response types for the API endpoints.
//! These types are serialized/deserialized to/from JSON.

use serde::{Deserialize, Serialize};

use crate::notation::{KeyColor, NoteRange, PlaybackEvent};
use crate::portal::{Payload, Submission};

// ============================================
// SESSION DTOs
// ============================================

/// Session state response
#[derive(Debug, Serialize, Deserialize)]
pub struct SessionResponse {
    /// Connected address, "wallet-needed", or empty before the first check
    pub account: String,
    /// Whether a write is waiting for confirmation
    pub pending: bool,
    /// Portal kind: note or wave
    pub kind: String,
    /// Whether a wallet provider is configured
    pub wallet_present: bool,
}

/// Explicit connect response
#[derive(Debug, Serialize, Deserialize)]
pub struct ConnectResponse {
    pub account: String,
    /// Submissions loaded after connecting
    pub count: usize,
}

// ============================================
// SUBMISSION DTOs
// ============================================

/// Note given as a MIDI number or a name such as "C4"
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum NoteInput {
    Number(u8),
    Name(String),
}

/// Submit request: exactly one of `note` or `message`
#[derive(Debug, Deserialize)]
pub struct SubmitRequest {
    #[serde(default)]
    pub note: Option<NoteInput>,
    #[serde(default)]
    pub message: Option<String>,
}

/// Submit response
#[derive(Debug, Serialize, Deserialize)]
pub struct SubmitResponse {
    pub status: String,
    pub tx_hash: String,
    pub block_number: Option<u64>,
    /// Submissions after the post-write refresh
    pub count: usize,
}

/// One submission as shown to clients
#[derive(Debug, Serialize, Deserialize)]
pub struct SubmissionDto {
    pub address: String,
    /// RFC 3339
    pub timestamp: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<u8>,
    /// Scientific pitch name (e.g., "Db4")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl From<&Submission> for SubmissionDto {
    fn from(s: &Submission) -> Self {
        let (note, message) = match &s.payload {
            Payload::Note(n) => (Some(*n), None),
            Payload::Message(m) => (None, Some(m.clone())),
        };

        Self {
            address: s.address.to_string(),
            timestamp: s.timestamp.to_rfc3339(),
            note,
            note_name: note.map(crate::notation::note_name),
            message,
        }
    }
}

/// Submission list response
#[derive(Debug, Serialize, Deserialize)]
pub struct SubmissionsResponse {
    pub kind: String,
    pub count: usize,
    /// e.g. "3 notes played!"
    pub summary: String,
    pub submissions: Vec<SubmissionDto>,
}

/// Refresh response
#[derive(Debug, Serialize, Deserialize)]
pub struct RefreshResponse {
    pub status: String,
    pub count: usize,
}

// ============================================
// NOTATION DTOs
// ============================================

/// One rendered key in submission order
#[derive(Debug, Serialize)]
pub struct KeyDto {
    pub note: u8,
    pub name: String,
    pub color: KeyColor,
}

/// Notation response for the note portal
#[derive(Debug, Serialize)]
pub struct NotationResponse {
    /// ABC tune for the notation renderer
    pub abc: String,
    /// Playback timing for the soundfont player
    pub schedule: Vec<PlaybackEvent>,
    pub keys: Vec<KeyDto>,
    /// Playable keyboard range
    pub range: NoteRange,
}

// ============================================
// HEALTH DTOs
// ============================================

/// Health check response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Overall status: healthy, degraded
    pub status: String,
    /// Wallet status: connected, wallet-needed, unknown, absent
    pub wallet: String,
    /// Portal kind
    pub kind: String,
    /// Server uptime in seconds
    pub uptime_seconds: u64,
    /// Application version
    pub version: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::primitives::address;
    use chrono::{TimeZone, Utc};

    #[test]
    fn test_note_input_untagged() {
        let req: SubmitRequest = serde_json::from_str(r#"{"note": 60}"#).unwrap();
        assert!(matches!(req.note, Some(NoteInput::Number(60))));

        let req: SubmitRequest = serde_json::from_str(r#"{"note": "Db4"}"#).unwrap();
        assert!(matches!(req.note, Some(NoteInput::Name(ref n)) if n == "Db4"));

        let req: SubmitRequest = serde_json::from_str(r#"{"message": "gm"}"#).unwrap();
        assert!(req.note.is_none());
        assert_eq!(req.message.as_deref(), Some("gm"));
    }

    #[test]
    fn test_submission_dto() {
        let submission = Submission {
            address: address!("00000000000000000000000000000000000000aa"),
            timestamp: Utc.timestamp_opt(1_700_000_000, 0).unwrap(),
            payload: Payload::Note(61),
        };

        let dto = SubmissionDto::from(&submission);
        assert_eq!(dto.note, Some(61));
        assert_eq!(dto.note_name.as_deref(), Some("Db4"));
        assert_eq!(dto.timestamp, "2023-11-14T22:13:20+00:00");
        assert!(dto.message.is_none());

        let json = serde_json::to_value(&dto).unwrap();
        assert!(json.get("message").is_none());
    }
}
