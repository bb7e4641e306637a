//! Pitch classes
//!
//! The twelve chromatic pitch classes, always spelled with sharps. Flat spellings
//! are accepted on input and normalized immediately; nothing downstream ever sees
//! a flat.

use std::fmt;
use std::str::FromStr;

use serde::{Serialize, Serializer};

use crate::error::ChordError;

/// Number of semitones in an octave.
pub const SEMITONES_PER_OCTAVE: i32 = 12;

/// One of the 12 chromatic pitch classes.
///
/// 0=C, 1=C#, 2=D, 3=D#, 4=E, 5=F, 6=F#, 7=G, 8=G#, 9=A, 10=A#, 11=B
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PitchClass {
    C,
    CSharp,
    D,
    DSharp,
    E,
    F,
    FSharp,
    G,
    GSharp,
    A,
    ASharp,
    B,
}

impl PitchClass {
    pub const ALL: [PitchClass; 12] = [
        PitchClass::C,
        PitchClass::CSharp,
        PitchClass::D,
        PitchClass::DSharp,
        PitchClass::E,
        PitchClass::F,
        PitchClass::FSharp,
        PitchClass::G,
        PitchClass::GSharp,
        PitchClass::A,
        PitchClass::ASharp,
        PitchClass::B,
    ];

    /// Semitone offset from C (0-11).
    pub fn semitone(self) -> i32 {
        self as i32
    }

    /// Pitch class for any semitone count; wraps in both directions.
    pub fn from_semitone(semitone: i32) -> Self {
        Self::ALL[semitone.rem_euclid(SEMITONES_PER_OCTAVE) as usize]
    }

    /// Canonical (sharp) spelling.
    pub fn name(self) -> &'static str {
        match self {
            PitchClass::C => "C",
            PitchClass::CSharp => "C#",
            PitchClass::D => "D",
            PitchClass::DSharp => "D#",
            PitchClass::E => "E",
            PitchClass::F => "F",
            PitchClass::FSharp => "F#",
            PitchClass::G => "G",
            PitchClass::GSharp => "G#",
            PitchClass::A => "A",
            PitchClass::ASharp => "A#",
            PitchClass::B => "B",
        }
    }

    /// Read a pitch class from the front of `s`.
    ///
    /// Accepts a letter `A`-`G` optionally followed by `#` or `b`. Returns the pitch
    /// class and the number of bytes consumed, or `None` if `s` does not start with
    /// a note letter.
    pub(crate) fn parse_prefix(s: &str) -> Option<(Self, usize)> {
        let bytes = s.as_bytes();
        let base = match bytes.first()? {
            b'C' => 0,
            b'D' => 2,
            b'E' => 4,
            b'F' => 5,
            b'G' => 7,
            b'A' => 9,
            b'B' => 11,
            _ => return None,
        };
        let (accidental, len) = match bytes.get(1) {
            Some(b'#') => (1, 2),
            Some(b'b') => (-1, 2),
            _ => (0, 1),
        };
        Some((Self::from_semitone(base + accidental), len))
    }

    /// Shift by `semitones`, wrapping around the octave.
    pub fn transpose(self, semitones: i32) -> Self {
        Self::from_semitone(self.semitone() + semitones)
    }
}

impl fmt::Display for PitchClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PitchClass {
    type Err = ChordError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match Self::parse_prefix(s) {
            Some((pc, len)) if len == s.len() => Ok(pc),
            _ => Err(ChordError::InvalidNoteName(s.to_string())),
        }
    }
}

impl Serialize for PitchClass {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flats_normalize_to_sharps() {
        assert_eq!("Db".parse::<PitchClass>().unwrap(), PitchClass::CSharp);
        assert_eq!("Eb".parse::<PitchClass>().unwrap(), PitchClass::DSharp);
        assert_eq!("Gb".parse::<PitchClass>().unwrap(), PitchClass::FSharp);
        assert_eq!("Ab".parse::<PitchClass>().unwrap(), PitchClass::GSharp);
        assert_eq!("Bb".parse::<PitchClass>().unwrap(), PitchClass::ASharp);
    }

    #[test]
    fn test_enharmonic_wraparound() {
        assert_eq!("Cb".parse::<PitchClass>().unwrap(), PitchClass::B);
        assert_eq!("B#".parse::<PitchClass>().unwrap(), PitchClass::C);
        assert_eq!("E#".parse::<PitchClass>().unwrap(), PitchClass::F);
        assert_eq!("Fb".parse::<PitchClass>().unwrap(), PitchClass::E);
    }

    #[test]
    fn test_one_name_per_semitone() {
        for (i, pc) in PitchClass::ALL.iter().enumerate() {
            assert_eq!(pc.semitone(), i as i32);
            assert_eq!(pc.name().parse::<PitchClass>().unwrap(), *pc);
            assert!(!pc.name().contains('b'));
        }
    }

    #[test]
    fn test_invalid_pitch_class() {
        assert!("H".parse::<PitchClass>().is_err());
        assert!("c".parse::<PitchClass>().is_err());
        assert!("C##".parse::<PitchClass>().is_err());
        assert!("".parse::<PitchClass>().is_err());
    }

    #[test]
    fn test_transpose_wraps() {
        assert_eq!(PitchClass::A.transpose(3), PitchClass::C);
        assert_eq!(PitchClass::C.transpose(-1), PitchClass::B);
        assert_eq!(PitchClass::G.transpose(24), PitchClass::G);
    }
}
