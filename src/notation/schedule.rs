//! Playback schedule and display summary

use serde::Serialize;

use crate::portal::PortalKind;

/// Seconds between consecutive notes on playback
pub const NOTE_SPACING_SECS: f64 = 0.5;

/// One note start handed to the soundfont player
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PlaybackEvent {
    /// Offset from playback start, in seconds
    pub time: f64,
    /// MIDI note number
    pub note: u8,
}

/// Evenly spaced playback of the notes in submission order
pub fn playback_schedule(notes: &[u8]) -> Vec<PlaybackEvent> {
    notes
        .iter()
        .enumerate()
        .map(|(index, note)| PlaybackEvent {
            time: index as f64 * NOTE_SPACING_SECS,
            note: *note,
        })
        .collect()
}

/// Headline under the keyboard, e.g. "3 notes played!"
pub fn summary(count: usize, kind: PortalKind) -> String {
    let verb = match kind {
        PortalKind::Note => "played",
        PortalKind::Wave => "sent",
    };
    let plural = if count == 1 { "" } else { "s" };

    format!("{} {}{} {}!", count, kind.noun(), plural, verb)
}
