//! ABC notation
//!
//! Converts MIDI notes to ABC pitch tokens and builds the tune string handed
//! to the notation renderer.

use super::midi::{octave, pitch_name};

/// ABC pitch for a MIDI note.
///
/// Flats become `_`, sharps `^`. Octave 4 is upper case (`C`), octave 5 lower
/// case (`c`). Higher octaves append `'`, lower ones append `,`.
pub fn to_abc(midi: u8) -> String {
    let name = pitch_name(midi);
    let oct = octave(midi);

    let mut chars = name.chars();
    let letter = chars.next().unwrap_or('C');
    let accidental: String = chars
        .map(|c| match c {
            'b' => '_',
            '#' => '^',
            other => other,
        })
        .collect();

    let letter = if oct > 4 {
        letter.to_ascii_lowercase()
    } else {
        letter
    };

    let marks = if oct > 4 {
        "'".repeat((oct - 5) as usize)
    } else {
        ",".repeat((4 - oct) as usize)
    };

    format!("{}{}{}", accidental, letter, marks)
}

/// 4/4 tune with every note as a half note
pub fn tune(notes: &[u8]) -> String {
    let body = notes
        .iter()
        .map(|n| format!("{}2", to_abc(*n)))
        .collect::<Vec<_>>()
        .join(" ");

    format!("\nM:4/4\n {}", body)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_octave_four_is_upper_case() {
        assert_eq!(to_abc(60), "C");
        assert_eq!(to_abc(71), "B");
    }

    #[test]
    fn test_octave_five_is_lower_case() {
        assert_eq!(to_abc(72), "c");
        assert_eq!(to_abc(77), "f");
    }

    #[test]
    fn test_octave_marks() {
        assert_eq!(to_abc(84), "c'");
        assert_eq!(to_abc(96), "c''");
        assert_eq!(to_abc(48), "C,");
        assert_eq!(to_abc(36), "C,,");
    }

    #[test]
    fn test_flats() {
        assert_eq!(to_abc(61), "_D");
        assert_eq!(to_abc(73), "_d");
        assert_eq!(to_abc(58), "_B,");
    }

    #[test]
    fn test_tune() {
        assert_eq!(tune(&[60, 62, 64]), "\nM:4/4\n C2 D2 E2");
        assert_eq!(tune(&[]), "\nM:4/4\n ");
    }
}
