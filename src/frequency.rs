//! # Note/Frequency Table
//!
//! Equal-tempered frequencies for every note in octaves 0-8.
//!
//! ## Tuning
//! - 12 semitones per octave, A4 = 440 Hz by default
//! - `f = reference * 2^((n - 69) / 12)` where `n` is the MIDI note number
//! - MIDI numbering: `n = 12 * (octave + 1) + semitone`, so C4 = 60 and A4 = 69
//!
//! ## Operations
//! - [`NoteTable::frequency`] - note to Hz, `OutOfRange` outside octaves 0-8
//! - [`NoteTable::transpose`] - add semitones, crossing octave boundaries
//! - [`NoteTable::nearest_note`] - Hz to the closest table note (diagnostics)
//!
//! The standard table is built once on first use and shared read-only:
//!
//! ```rust
//! use chordtone::{Note, NoteTable};
//!
//! let table = NoteTable::standard();
//! assert_eq!(table.frequency_of("A4").unwrap(), 440.0);
//!
//! let e5 = table.transpose("A4".parse::<Note>().unwrap(), 7).unwrap();
//! assert_eq!(e5.to_string(), "E5");
//! ```

use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use serde::{Serialize, Serializer};

use crate::error::ChordError;
use crate::pitch::{PitchClass, SEMITONES_PER_OCTAVE};

/// Lowest octave held by the table.
pub const MIN_OCTAVE: i32 = 0;
/// Highest octave held by the table.
pub const MAX_OCTAVE: i32 = 8;
/// Concert pitch of A4 in Hz.
pub const STANDARD_REFERENCE_HZ: f64 = 440.0;

const REFERENCE_MIDI: i32 = 69;

/// A pitch class placed in a concrete octave, e.g. `A4` or `C#2`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Note {
    pub pitch_class: PitchClass,
    pub octave: i32,
}

impl Note {
    pub fn new(pitch_class: PitchClass, octave: i32) -> Self {
        Self { pitch_class, octave }
    }

    /// MIDI note number (C4 = 60).
    pub fn midi(self) -> i32 {
        SEMITONES_PER_OCTAVE * (self.octave + 1) + self.pitch_class.semitone()
    }

    pub fn from_midi(midi: i32) -> Self {
        Self {
            pitch_class: PitchClass::from_semitone(midi),
            octave: midi.div_euclid(SEMITONES_PER_OCTAVE) - 1,
        }
    }

    /// Shift by `semitones` with no range check.
    pub fn transposed(self, semitones: i32) -> Self {
        Self::from_midi(self.midi() + semitones)
    }

    fn out_of_range(self) -> ChordError {
        ChordError::OutOfRange {
            note: self.pitch_class.to_string(),
            octave: self.octave,
        }
    }
}

impl fmt::Display for Note {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.pitch_class, self.octave)
    }
}

impl FromStr for Note {
    type Err = ChordError;

    /// Parse `<letter>[#|b]<octave>`. Flats are normalized to sharps (`Bb3` -> `A#3`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ChordError::InvalidNoteName(s.to_string());
        let trimmed = s.trim();
        let (pitch_class, len) = PitchClass::parse_prefix(trimmed).ok_or_else(invalid)?;
        let octave_str = &trimmed[len..];
        let digits = octave_str.strip_prefix('-').unwrap_or(octave_str);
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }
        let octave = octave_str.parse::<i32>().map_err(|_| invalid())?;
        Ok(Note::new(pitch_class, octave))
    }
}

impl Serialize for Note {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Immutable note -> frequency table for octaves 0-8.
#[derive(Debug, Clone, PartialEq)]
pub struct NoteTable {
    reference_hz: f64,
    entries: Vec<f64>,
}

impl NoteTable {
    /// Build a table tuned so that A4 sounds at `reference_hz`.
    pub fn new(reference_hz: f64) -> Self {
        let low = Note::new(PitchClass::C, MIN_OCTAVE).midi();
        let high = Note::new(PitchClass::B, MAX_OCTAVE).midi();
        let entries = (low..=high)
            .map(|n| reference_hz * 2f64.powf((n - REFERENCE_MIDI) as f64 / 12.0))
            .collect();
        Self {
            reference_hz,
            entries,
        }
    }

    /// The process-wide A4 = 440 Hz table.
    pub fn standard() -> &'static NoteTable {
        static TABLE: OnceLock<NoteTable> = OnceLock::new();
        TABLE.get_or_init(|| NoteTable::new(STANDARD_REFERENCE_HZ))
    }

    pub fn reference_hz(&self) -> f64 {
        self.reference_hz
    }

    pub fn contains(&self, note: Note) -> bool {
        (MIN_OCTAVE..=MAX_OCTAVE).contains(&note.octave)
    }

    /// Frequency of `note` in Hz.
    pub fn frequency(&self, note: Note) -> Result<f64, ChordError> {
        if !self.contains(note) {
            return Err(note.out_of_range());
        }
        let index = note.midi() - Note::new(PitchClass::C, MIN_OCTAVE).midi();
        Ok(self.entries[index as usize])
    }

    /// Frequency of a note given by name, e.g. `"F#4"`.
    pub fn frequency_of(&self, name: &str) -> Result<f64, ChordError> {
        self.frequency(name.parse()?)
    }

    /// Move `note` by `semitones` (negative moves down). The result must stay in the table.
    pub fn transpose(&self, note: Note, semitones: i32) -> Result<Note, ChordError> {
        let moved = note.transposed(semitones);
        if !self.contains(moved) {
            return Err(moved.out_of_range());
        }
        Ok(moved)
    }

    /// The table note closest to `hz`, clamped to the table's span.
    ///
    /// Returns `None` for non-positive or non-finite input.
    pub fn nearest_note(&self, hz: f64) -> Option<Note> {
        if !hz.is_finite() || hz <= 0.0 {
            return None;
        }
        let low = Note::new(PitchClass::C, MIN_OCTAVE).midi();
        let high = Note::new(PitchClass::B, MAX_OCTAVE).midi();
        let midi = REFERENCE_MIDI as f64 + 12.0 * (hz / self.reference_hz).log2();
        let midi = (midi.round() as i64).clamp(low as i64, high as i64) as i32;
        Some(Note::from_midi(midi))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn note(s: &str) -> Note {
        s.parse().unwrap()
    }

    fn assert_close(a: f64, b: f64) {
        assert!((a - b).abs() < 1e-2, "{} != {}", a, b);
    }

    #[test]
    fn test_reference_pitches() {
        let table = NoteTable::standard();
        assert_eq!(table.frequency(note("A4")).unwrap(), 440.0);
        assert_close(table.frequency(note("A3")).unwrap(), 220.0);
        assert_close(table.frequency(note("C4")).unwrap(), 261.63);
        assert_close(table.frequency(note("G3")).unwrap(), 196.00);
        assert_close(table.frequency(note("F#4")).unwrap(), 369.99);
        assert_close(table.frequency(note("C2")).unwrap(), 65.41);
    }

    #[test]
    fn test_flat_and_sharp_names_share_a_frequency() {
        let table = NoteTable::standard();
        assert_eq!(
            table.frequency_of("Bb3").unwrap(),
            table.frequency_of("A#3").unwrap()
        );
        assert_eq!(note("Db5"), note("C#5"));
    }

    #[test]
    fn test_octave_bounds() {
        let table = NoteTable::standard();
        assert!(table.frequency(note("C0")).is_ok());
        assert!(table.frequency(note("B8")).is_ok());
        assert_eq!(
            table.frequency(note("C9")),
            Err(ChordError::OutOfRange {
                note: "C".to_string(),
                octave: 9
            })
        );
        assert!(matches!(
            table.frequency(note("B-1")),
            Err(ChordError::OutOfRange { octave: -1, .. })
        ));
    }

    #[test]
    fn test_invalid_note_names() {
        for bad in ["H4", "A", "4", "A#", "Ax4", "A4.5", "a4", ""] {
            assert!(
                matches!(bad.parse::<Note>(), Err(ChordError::InvalidNoteName(_))),
                "{} should not parse",
                bad
            );
        }
    }

    #[test]
    fn test_transpose_crosses_octaves() {
        let table = NoteTable::standard();
        assert_eq!(table.transpose(note("B3"), 1).unwrap(), note("C4"));
        assert_eq!(table.transpose(note("C4"), -1).unwrap(), note("B3"));
        assert_eq!(table.transpose(note("C3"), 24).unwrap(), note("C5"));
        assert_eq!(table.transpose(note("D3"), -12).unwrap(), note("D2"));
        assert!(table.transpose(note("A8"), 3).is_err());
        assert!(table.transpose(note("C0"), -1).is_err());
    }

    #[test]
    fn test_nearest_note() {
        let table = NoteTable::standard();
        assert_eq!(table.nearest_note(440.0), Some(note("A4")));
        assert_eq!(table.nearest_note(445.0), Some(note("A4")));
        assert_eq!(table.nearest_note(262.0), Some(note("C4")));
        assert_eq!(table.nearest_note(1.0), Some(note("C0")));
        assert_eq!(table.nearest_note(0.0), None);
        assert_eq!(table.nearest_note(f64::NAN), None);
    }

    #[test]
    fn test_every_entry_reverses() {
        let table = NoteTable::standard();
        for octave in MIN_OCTAVE..=MAX_OCTAVE {
            for pc in PitchClass::ALL {
                let n = Note::new(pc, octave);
                let hz = table.frequency(n).unwrap();
                assert_eq!(table.nearest_note(hz), Some(n));
            }
        }
    }

    #[test]
    fn test_custom_reference() {
        let table = NoteTable::new(432.0);
        assert_eq!(table.frequency(note("A4")).unwrap(), 432.0);
        assert_close(table.frequency(note("A5")).unwrap(), 864.0);
        assert_eq!(table.nearest_note(432.0), Some(note("A4")));
    }
}
