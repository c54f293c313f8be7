//! Notation helpers
//!
//! Pure data preparation for the external audio and notation renderers:
//! note names, keyboard range, ABC tune text and playback timing.

pub mod abc;
pub mod midi;
pub mod schedule;

pub use abc::{to_abc, tune};
pub use midi::{is_accidental, note_name, parse_note, KeyColor, NoteRange};
pub use schedule::{playback_schedule, summary, PlaybackEvent};
