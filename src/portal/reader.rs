//! Record projection
//!
//! Turns raw contract records into [`Submission`]s: the author becomes the
//! address, epoch seconds become a UTC date, the on-chain string becomes a
//! typed payload.

use chrono::{DateTime, Utc};

use crate::notation::midi::MAX_MIDI;

use super::error::{PortalError, PortalResult};
use super::types::{Payload, PortalKind, RawRecord, Submission};

/// Project one raw record
pub fn map_record(kind: PortalKind, raw: RawRecord) -> PortalResult<Submission> {
    let timestamp = epoch_to_datetime(&raw)?;

    let payload = match kind {
        PortalKind::Note => {
            let note = raw
                .payload
                .trim()
                .parse::<u8>()
                .ok()
                .filter(|n| *n <= MAX_MIDI)
                .ok_or_else(|| {
                    PortalError::Decode(format!("note {:?} is not a MIDI number", raw.payload))
                })?;
            Payload::Note(note)
        }
        PortalKind::Wave => Payload::Message(raw.payload),
    };

    Ok(Submission {
        address: raw.author,
        timestamp,
        payload,
    })
}

/// Project a full history, keeping contract order.
///
/// Records that cannot be projected are logged and left out; one foreign
/// record on-chain must not hide the rest of the list.
pub fn map_records(kind: PortalKind, raws: Vec<RawRecord>) -> Vec<Submission> {
    let total = raws.len();
    let submissions: Vec<Submission> = raws
        .into_iter()
        .enumerate()
        .filter_map(|(index, raw)| match map_record(kind, raw) {
            Ok(submission) => Some(submission),
            Err(e) => {
                tracing::warn!(index, error = %e, "Skipping unreadable record");
                None
            }
        })
        .collect();

    if submissions.len() != total {
        tracing::debug!(
            kept = submissions.len(),
            total,
            "Some records were skipped during projection"
        );
    }

    submissions
}

fn epoch_to_datetime(raw: &RawRecord) -> PortalResult<DateTime<Utc>> {
    let secs = i64::try_from(raw.timestamp)
        .map_err(|_| PortalError::Timestamp(raw.timestamp.to_string()))?;

    DateTime::<Utc>::from_timestamp(secs, 0)
        .ok_or_else(|| PortalError::Timestamp(raw.timestamp.to_string()))
}
