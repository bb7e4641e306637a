//! Interval catalog
//!
//! Named semitone offsets from a chord root. Chord formulas and voicing rules are
//! written against these names instead of bare integers.
//!
//! Intervals live in -12..=24: negative values are tones already folded below the
//! root, values above 12 are compound intervals (9ths, 11ths, 13ths). Equality is by
//! semitone value, so `DIMINISHED_FIFTH == AUGMENTED_FOURTH`.

use std::fmt;

use serde::Serialize;

/// A semitone offset relative to a chord root.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct Interval(i8);

impl Interval {
    pub const MIN: i8 = -12;
    pub const MAX: i8 = 24;

    pub const UNISON: Interval = Interval(0);
    pub const MINOR_SECOND: Interval = Interval(1);
    pub const MAJOR_SECOND: Interval = Interval(2);
    pub const MINOR_THIRD: Interval = Interval(3);
    pub const MAJOR_THIRD: Interval = Interval(4);
    pub const PERFECT_FOURTH: Interval = Interval(5);
    pub const AUGMENTED_FOURTH: Interval = Interval(6);
    pub const DIMINISHED_FIFTH: Interval = Interval(6);
    pub const PERFECT_FIFTH: Interval = Interval(7);
    pub const AUGMENTED_FIFTH: Interval = Interval(8);
    pub const MINOR_SIXTH: Interval = Interval(8);
    pub const MAJOR_SIXTH: Interval = Interval(9);
    pub const DIMINISHED_SEVENTH: Interval = Interval(9);
    pub const MINOR_SEVENTH: Interval = Interval(10);
    pub const MAJOR_SEVENTH: Interval = Interval(11);
    pub const OCTAVE: Interval = Interval(12);
    pub const MINOR_NINTH: Interval = Interval(13);
    pub const MAJOR_NINTH: Interval = Interval(14);
    pub const AUGMENTED_NINTH: Interval = Interval(15);
    pub const MAJOR_TENTH: Interval = Interval(16);
    pub const PERFECT_ELEVENTH: Interval = Interval(17);
    pub const AUGMENTED_ELEVENTH: Interval = Interval(18);
    pub const PERFECT_TWELFTH: Interval = Interval(19);
    pub const MINOR_THIRTEENTH: Interval = Interval(20);
    pub const MAJOR_THIRTEENTH: Interval = Interval(21);
    pub const AUGMENTED_THIRTEENTH: Interval = Interval(22);
    pub const DOUBLE_OCTAVE: Interval = Interval(24);

    /// Build an interval, or `None` outside -12..=24.
    pub fn new(semitones: i32) -> Option<Self> {
        if (Self::MIN as i32..=Self::MAX as i32).contains(&semitones) {
            Some(Interval(semitones as i8))
        } else {
            None
        }
    }

    pub fn semitones(self) -> i32 {
        self.0 as i32
    }

    /// Raise or lower by `delta` semitones, staying inside the catalog range.
    pub fn shifted(self, delta: i32) -> Option<Self> {
        Self::new(self.semitones() + delta)
    }

    /// Look up an interval by its short name (`P1`, `m3`, `M9`, `A11`, ...).
    pub fn from_name(name: &str) -> Option<Self> {
        NAMES
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, interval)| *interval)
    }

    /// Short name of this interval, if the catalog has one.
    ///
    /// Where two names share a value (`A4`/`d5`, `A5`/`m6`) the first listed wins.
    pub fn name(self) -> Option<&'static str> {
        NAMES
            .iter()
            .find(|(_, interval)| *interval == self)
            .map(|(n, _)| *n)
    }
}

/// Short names, in catalog order.
const NAMES: &[(&str, Interval)] = &[
    ("P1", Interval::UNISON),
    ("m2", Interval::MINOR_SECOND),
    ("M2", Interval::MAJOR_SECOND),
    ("m3", Interval::MINOR_THIRD),
    ("M3", Interval::MAJOR_THIRD),
    ("P4", Interval::PERFECT_FOURTH),
    ("d5", Interval::DIMINISHED_FIFTH),
    ("A4", Interval::AUGMENTED_FOURTH),
    ("P5", Interval::PERFECT_FIFTH),
    ("A5", Interval::AUGMENTED_FIFTH),
    ("m6", Interval::MINOR_SIXTH),
    ("M6", Interval::MAJOR_SIXTH),
    ("m7", Interval::MINOR_SEVENTH),
    ("M7", Interval::MAJOR_SEVENTH),
    ("P8", Interval::OCTAVE),
    ("m9", Interval::MINOR_NINTH),
    ("M9", Interval::MAJOR_NINTH),
    ("A9", Interval::AUGMENTED_NINTH),
    ("M10", Interval::MAJOR_TENTH),
    ("P11", Interval::PERFECT_ELEVENTH),
    ("A11", Interval::AUGMENTED_ELEVENTH),
    ("P12", Interval::PERFECT_TWELFTH),
    ("m13", Interval::MINOR_THIRTEENTH),
    ("M13", Interval::MAJOR_THIRTEENTH),
    ("A13", Interval::AUGMENTED_THIRTEENTH),
    ("P15", Interval::DOUBLE_OCTAVE),
];

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name() {
            Some(name) => f.write_str(name),
            None => write!(f, "{:+}", self.0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_range_bounds() {
        assert_eq!(Interval::new(-12), Some(Interval(-12)));
        assert_eq!(Interval::new(24), Some(Interval::DOUBLE_OCTAVE));
        assert_eq!(Interval::new(-13), None);
        assert_eq!(Interval::new(25), None);
    }

    #[test]
    fn test_equality_is_by_value() {
        assert_eq!(Interval::DIMINISHED_FIFTH, Interval::AUGMENTED_FOURTH);
        assert_eq!(Interval::AUGMENTED_FIFTH, Interval::MINOR_SIXTH);
        assert_eq!(Interval::MAJOR_SIXTH, Interval::DIMINISHED_SEVENTH);
    }

    #[test]
    fn test_name_lookup() {
        assert_eq!(Interval::from_name("P5"), Some(Interval::PERFECT_FIFTH));
        assert_eq!(Interval::from_name("m3"), Some(Interval::MINOR_THIRD));
        assert_eq!(Interval::from_name("M13"), Some(Interval::MAJOR_THIRTEENTH));
        assert_eq!(Interval::from_name("X9"), None);
        assert_eq!(Interval::MAJOR_NINTH.name(), Some("M9"));
        assert_eq!(Interval::DIMINISHED_FIFTH.name(), Some("d5"));
    }

    #[test]
    fn test_display_falls_back_to_offset() {
        assert_eq!(Interval::MINOR_SEVENTH.to_string(), "m7");
        assert_eq!(Interval::new(-5).unwrap().to_string(), "-5");
        assert_eq!(Interval::new(23).unwrap().to_string(), "+23");
    }

    #[test]
    fn test_shifted_stays_in_range() {
        assert_eq!(
            Interval::MAJOR_THIRTEENTH.shifted(1),
            Some(Interval::AUGMENTED_THIRTEENTH)
        );
        assert_eq!(Interval::DOUBLE_OCTAVE.shifted(1), None);
    }
}
