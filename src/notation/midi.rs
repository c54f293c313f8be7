//! MIDI note naming
//!
//! Scientific pitch names with flat spelling (60 = `C4`, 61 = `Db4`),
//! keyboard ranges and key colours.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

/// Pitch classes, flat spelling
const PITCH_NAMES: [&str; 12] = [
    "C", "Db", "D", "Eb", "E", "F", "Gb", "G", "Ab", "A", "Bb", "B",
];

/// Semitone offset of each natural letter from C
fn letter_offset(letter: char) -> Option<i32> {
    match letter.to_ascii_uppercase() {
        'C' => Some(0),
        'D' => Some(2),
        'E' => Some(4),
        'F' => Some(5),
        'G' => Some(7),
        'A' => Some(9),
        'B' => Some(11),
        _ => None,
    }
}

/// Highest valid MIDI note number
pub const MAX_MIDI: u8 = 127;

/// Pitch class name without octave (e.g., "Db")
pub fn pitch_name(midi: u8) -> &'static str {
    PITCH_NAMES[(midi % 12) as usize]
}

/// Octave in scientific pitch notation (60 is in octave 4)
pub fn octave(midi: u8) -> i32 {
    (midi / 12) as i32 - 1
}

/// Scientific pitch name (e.g., 60 -> "C4", 70 -> "Bb4")
pub fn note_name(midi: u8) -> String {
    format!("{}{}", pitch_name(midi), octave(midi))
}

/// Black key on a piano
pub fn is_accidental(midi: u8) -> bool {
    pitch_name(midi).len() > 1
}

fn note_regex() -> Option<&'static Regex> {
    static RE: OnceLock<Option<Regex>> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^([A-Ga-g])(#{1,2}|b{1,2})?(-?\d)$").ok())
        .as_ref()
}

/// Parse a note given as a MIDI number ("60") or a scientific name
/// ("c4", "Db4", "F#5").
pub fn parse_note(input: &str) -> Option<u8> {
    let input = input.trim();

    if let Ok(n) = input.parse::<u8>() {
        return (n <= MAX_MIDI).then_some(n);
    }

    let caps = note_regex()?.captures(input)?;
    let letter = caps.get(1)?.as_str().chars().next()?;
    let accidental = caps.get(2).map(|m| m.as_str()).unwrap_or("");
    let octave: i32 = caps.get(3)?.as_str().parse().ok()?;

    let shift = match accidental.chars().next() {
        Some('#') => accidental.len() as i32,
        Some('b') => -(accidental.len() as i32),
        _ => 0,
    };

    let midi = (octave + 1) * 12 + letter_offset(letter)? + shift;
    u8::try_from(midi).ok().filter(|n| *n <= MAX_MIDI)
}

/// Background and text colour of a rendered key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct KeyColor {
    pub background: &'static str,
    pub font: &'static str,
}

const DARK: &str = "#555";
const LIGHT: &str = "#f6f5f3";

impl KeyColor {
    pub fn for_note(midi: u8) -> Self {
        if is_accidental(midi) {
            Self {
                background: DARK,
                font: LIGHT,
            }
        } else {
            Self {
                background: LIGHT,
                font: DARK,
            }
        }
    }
}

/// Inclusive keyboard range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoteRange {
    pub first: u8,
    pub last: u8,
}

impl Default for NoteRange {
    /// C4 to F5
    fn default() -> Self {
        Self {
            first: 60,
            last: 77,
        }
    }
}

impl NoteRange {
    pub fn contains(&self, midi: u8) -> bool {
        (self.first..=self.last).contains(&midi)
    }

    pub fn notes(&self) -> impl Iterator<Item = u8> {
        self.first..=self.last
    }

    pub fn len(&self) -> usize {
        if self.last < self.first {
            0
        } else {
            (self.last - self.first) as usize + 1
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_note_names() {
        assert_eq!(note_name(60), "C4");
        assert_eq!(note_name(61), "Db4");
        assert_eq!(note_name(70), "Bb4");
        assert_eq!(note_name(77), "F5");
        assert_eq!(note_name(21), "A0");
        assert_eq!(note_name(0), "C-1");
    }

    #[test]
    fn test_accidentals() {
        assert!(!is_accidental(60));
        assert!(is_accidental(61));
        assert!(is_accidental(66));
        assert!(!is_accidental(64));
    }

    #[test]
    fn test_parse_note() {
        assert_eq!(parse_note("60"), Some(60));
        assert_eq!(parse_note("c4"), Some(60));
        assert_eq!(parse_note("C4"), Some(60));
        assert_eq!(parse_note("Db4"), Some(61));
        assert_eq!(parse_note("C#4"), Some(61));
        assert_eq!(parse_note("f5"), Some(77));
        assert_eq!(parse_note("Cb4"), Some(59));
        assert_eq!(parse_note(" e4 "), Some(64));
    }

    #[test]
    fn test_parse_note_rejects() {
        assert_eq!(parse_note("200"), None);
        assert_eq!(parse_note("H4"), None);
        assert_eq!(parse_note("C"), None);
        assert_eq!(parse_note("Cb-1"), None);
        assert_eq!(parse_note(""), None);
    }

    #[test]
    fn test_key_color() {
        assert_eq!(KeyColor::for_note(61).background, "#555");
        assert_eq!(KeyColor::for_note(60).background, "#f6f5f3");
        assert_eq!(KeyColor::for_note(60).font, "#555");
    }

    #[test]
    fn test_default_range() {
        let range = NoteRange::default();
        assert!(range.contains(60));
        assert!(range.contains(77));
        assert!(!range.contains(78));
        assert_eq!(range.len(), 18);
        assert_eq!(range.notes().next(), Some(60));
    }
}
