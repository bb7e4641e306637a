//! Chord type definitions
//!
//! A [`Chord`] is built by the parser, pruned in place by the voicing rules and
//! then read by the resolver.

use std::fmt;

use serde::{Serialize, Serializer};

use crate::interval::Interval;
use crate::pitch::PitchClass;
use crate::voicing::RuleSet;

/// Base chord quality: the triad, plus a seventh for the four seventh qualities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Quality {
    Major,
    Minor,
    Diminished,
    Augmented,
    Sus2,
    Sus4,
    Major7,
    Minor7,
    Diminished7,
    MinorMajor7,
}

impl Quality {
    /// Quality keywords, longest first so a prefix scan finds the longest match.
    pub(crate) const KEYWORDS: [(&'static str, Quality); 10] = [
        ("mmaj7", Quality::MinorMajor7),
        ("maj7", Quality::Major7),
        ("dim7", Quality::Diminished7),
        ("sus2", Quality::Sus2),
        ("sus4", Quality::Sus4),
        ("maj", Quality::Major),
        ("dim", Quality::Diminished),
        ("aug", Quality::Augmented),
        ("m7", Quality::Minor7),
        ("m", Quality::Minor),
    ];

    pub fn token(self) -> &'static str {
        match self {
            Quality::Major => "maj",
            Quality::Minor => "m",
            Quality::Diminished => "dim",
            Quality::Augmented => "aug",
            Quality::Sus2 => "sus2",
            Quality::Sus4 => "sus4",
            Quality::Major7 => "maj7",
            Quality::Minor7 => "m7",
            Quality::Diminished7 => "dim7",
            Quality::MinorMajor7 => "mmaj7",
        }
    }

    /// Root-relative formula for this quality.
    pub fn intervals(self) -> &'static [Interval] {
        use Interval as I;
        match self {
            Quality::Major => &[I::UNISON, I::MAJOR_THIRD, I::PERFECT_FIFTH],
            Quality::Minor => &[I::UNISON, I::MINOR_THIRD, I::PERFECT_FIFTH],
            Quality::Diminished => &[I::UNISON, I::MINOR_THIRD, I::DIMINISHED_FIFTH],
            Quality::Augmented => &[I::UNISON, I::MAJOR_THIRD, I::AUGMENTED_FIFTH],
            Quality::Sus2 => &[I::UNISON, I::MAJOR_SECOND, I::PERFECT_FIFTH],
            Quality::Sus4 => &[I::UNISON, I::PERFECT_FOURTH, I::PERFECT_FIFTH],
            Quality::Major7 => &[
                I::UNISON,
                I::MAJOR_THIRD,
                I::PERFECT_FIFTH,
                I::MAJOR_SEVENTH,
            ],
            Quality::Minor7 => &[
                I::UNISON,
                I::MINOR_THIRD,
                I::PERFECT_FIFTH,
                I::MINOR_SEVENTH,
            ],
            Quality::Diminished7 => &[
                I::UNISON,
                I::MINOR_THIRD,
                I::DIMINISHED_FIFTH,
                I::DIMINISHED_SEVENTH,
            ],
            Quality::MinorMajor7 => &[
                I::UNISON,
                I::MINOR_THIRD,
                I::PERFECT_FIFTH,
                I::MAJOR_SEVENTH,
            ],
        }
    }

    /// The seventh this quality already carries, if any.
    pub fn seventh(self) -> Option<Interval> {
        match self {
            Quality::Major7 | Quality::MinorMajor7 => Some(Interval::MAJOR_SEVENTH),
            Quality::Minor7 => Some(Interval::MINOR_SEVENTH),
            Quality::Diminished7 => Some(Interval::DIMINISHED_SEVENTH),
            _ => None,
        }
    }

    /// Keyword written before a 9/11/13: `maj9` and `m9` imply their seventh.
    fn stem(self) -> &'static str {
        match self {
            Quality::Major7 => "maj",
            Quality::Minor7 => "m",
            other => other.token(),
        }
    }
}

impl Serialize for Quality {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.token())
    }
}

/// Extension stacked on top of the quality.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Extension {
    Sixth,
    SixNine,
    Seventh,
    Major7,
    Ninth,
    Eleventh,
    Thirteenth,
}

impl Extension {
    /// Extension tokens, longest first.
    pub(crate) const TOKENS: [(&'static str, Extension); 7] = [
        ("maj7", Extension::Major7),
        ("69", Extension::SixNine),
        ("11", Extension::Eleventh),
        ("13", Extension::Thirteenth),
        ("6", Extension::Sixth),
        ("7", Extension::Seventh),
        ("9", Extension::Ninth),
    ];

    pub fn token(self) -> &'static str {
        match self {
            Extension::Sixth => "6",
            Extension::SixNine => "69",
            Extension::Seventh => "7",
            Extension::Major7 => "maj7",
            Extension::Ninth => "9",
            Extension::Eleventh => "11",
            Extension::Thirteenth => "13",
        }
    }

    /// Whether this extension stacks thirds past the seventh.
    pub fn is_upper(self) -> bool {
        matches!(
            self,
            Extension::Ninth | Extension::Eleventh | Extension::Thirteenth
        )
    }

    /// Tones this extension adds on top of `quality`.
    ///
    /// A seventh is only added when the quality has none of its own.
    pub fn tones(self, quality: Quality) -> Vec<Interval> {
        let seventh = |interval: Interval| match quality.seventh() {
            Some(_) => None,
            None => Some(interval),
        };
        let dominant = seventh(Interval::MINOR_SEVENTH);
        let mut tones = Vec::new();
        match self {
            Extension::Sixth => tones.push(Interval::MAJOR_SIXTH),
            Extension::SixNine => tones.extend([Interval::MAJOR_SIXTH, Interval::MAJOR_NINTH]),
            Extension::Seventh => tones.extend(dominant),
            Extension::Major7 => tones.extend(seventh(Interval::MAJOR_SEVENTH)),
            Extension::Ninth => {
                tones.extend(dominant);
                tones.push(Interval::MAJOR_NINTH);
            }
            Extension::Eleventh => {
                tones.extend(dominant);
                tones.extend([Interval::MAJOR_NINTH, Interval::PERFECT_ELEVENTH]);
            }
            Extension::Thirteenth => {
                tones.extend(dominant);
                tones.extend([Interval::MAJOR_NINTH, Interval::MAJOR_THIRTEENTH]);
            }
        }
        tones
    }
}

impl Serialize for Extension {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.token())
    }
}

/// Accidental on an alteration or addition degree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Accidental {
    Sharp,
    Flat,
    Natural,
}

impl Accidental {
    pub fn offset(self) -> i32 {
        match self {
            Accidental::Sharp => 1,
            Accidental::Flat => -1,
            Accidental::Natural => 0,
        }
    }

    fn symbol(self) -> &'static str {
        match self {
            Accidental::Sharp => "#",
            Accidental::Flat => "b",
            Accidental::Natural => "",
        }
    }
}

/// Degrees an alteration may target.
pub(crate) const ALTERABLE_DEGREES: [u8; 6] = [5, 6, 7, 9, 11, 13];

/// Natural interval of a scale degree as chord formulas spell it.
pub fn degree_interval(degree: u8) -> Option<Interval> {
    match degree {
        2 => Some(Interval::MAJOR_SECOND),
        4 => Some(Interval::PERFECT_FOURTH),
        5 => Some(Interval::PERFECT_FIFTH),
        6 => Some(Interval::MAJOR_SIXTH),
        7 => Some(Interval::MINOR_SEVENTH),
        9 => Some(Interval::MAJOR_NINTH),
        11 => Some(Interval::PERFECT_ELEVENTH),
        13 => Some(Interval::MAJOR_THIRTEENTH),
        _ => None,
    }
}

/// A degree with an accidental: `b5`, `#11`, or the `9` of `add9`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Alteration {
    pub accidental: Accidental,
    pub degree: u8,
}

impl Alteration {
    /// The unaltered interval this alteration targets.
    pub fn natural(self) -> Option<Interval> {
        degree_interval(self.degree)
    }

    /// The interval after applying the accidental.
    pub fn interval(self) -> Option<Interval> {
        self.natural()?.shifted(self.accidental.offset())
    }
}

impl fmt::Display for Alteration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.accidental.symbol(), self.degree)
    }
}

impl Serialize for Alteration {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// A parsed chord symbol.
///
/// # Fields
/// - `root`: harmonic root, always sharp-spelled
/// - `quality` / `extension`: what the symbol asked for
/// - `alterations` / `addition`: the modifier tokens, kept for display
/// - `bass`: slash bass, equal to `root` when the symbol has no `/`
/// - `tones`: root-relative intervals still sounding; voicing rules remove from here
/// - `rules`: the voicing rule list this chord is voiced with
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Chord {
    pub root: PitchClass,
    pub quality: Quality,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extension: Option<Extension>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub alterations: Vec<Alteration>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub addition: Option<Alteration>,
    pub bass: PitchClass,
    pub tones: Vec<Interval>,
    #[serde(skip)]
    pub rules: RuleSet,
}

impl Chord {
    pub fn has_interval(&self, interval: Interval) -> bool {
        self.tones.contains(&interval)
    }

    pub fn has_any(&self, intervals: &[Interval]) -> bool {
        intervals.iter().any(|i| self.has_interval(*i))
    }

    /// Remove every occurrence of `interval`. Absent intervals are a no-op.
    pub fn remove_tone(&mut self, interval: Interval) {
        self.tones.retain(|t| *t != interval);
    }

    /// Replace every occurrence of `from` with `to`; returns whether anything changed.
    pub fn replace_tone(&mut self, from: Interval, to: Interval) -> bool {
        let mut replaced = false;
        for tone in self.tones.iter_mut().filter(|t| **t == from) {
            *tone = to;
            replaced = true;
        }
        replaced
    }

    pub fn is_slash(&self) -> bool {
        self.bass != self.root
    }

    /// Combined quality keyword: `maj`, `m7`, `m69`, `maj9`, `13`, ...
    pub fn quality_name(&self) -> String {
        match (self.quality, self.extension) {
            (quality, None) => quality.token().to_string(),
            (Quality::Major, Some(ext)) => ext.token().to_string(),
            (quality, Some(ext)) if ext.is_upper() => format!("{}{}", quality.stem(), ext.token()),
            (quality, Some(ext)) => format!("{}{}", quality.token(), ext.token()),
        }
    }
}

impl fmt::Display for Chord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.root)?;
        let name = self.quality_name();
        if name != "maj" {
            f.write_str(&name)?;
        }
        for alteration in &self.alterations {
            write!(f, "{}", alteration)?;
        }
        if let Some(addition) = self.addition {
            write!(f, "add{}", addition)?;
        }
        if self.is_slash() {
            write!(f, "/{}", self.bass)?;
        }
        Ok(())
    }
}
