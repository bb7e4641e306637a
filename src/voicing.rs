//! # Voicing Rule Engine
//!
//! Prunes a chord's tone list the way a pianist would thin out a dense chord.
//!
//! Rules are `(condition, action)` pairs tested in list order, each exactly once,
//! against the tones left by the rules before it. There is no second pass.
//!
//! ## Default Rules
//! 1. A 9th (major or minor) drops the perfect 5th
//! 2. Otherwise a 13th (major or minor) drops the perfect 5th and the major 9th
//! 3. An altered 5th without a major 7th drops the perfect 5th
//! 4. A perfect 11th without a major 7th drops both 3rds
//! 5. Five or more tones drop the root, which the bass already sounds
//! 6. Five or more tones with no altered 5th drop the perfect 5th
//!
//! A 9th also counts when written an octave down as a 2nd, and a 13th as a 6th,
//! so `Csus2` and `C6` lose their fifth like `Cadd9` and `C7add13` do.
//!
//! Rule 5 runs before rule 6, so a chord that reaches exactly five tones loses its
//! root and keeps its fifth.

use std::fmt;

use tracing::debug;

use crate::chord::Chord;
use crate::interval::Interval;

const NINTHS: [Interval; 4] = [
    Interval::MINOR_SECOND,
    Interval::MAJOR_SECOND,
    Interval::MINOR_NINTH,
    Interval::MAJOR_NINTH,
];
const THIRTEENTHS: [Interval; 4] = [
    Interval::MINOR_SIXTH,
    Interval::MAJOR_SIXTH,
    Interval::MINOR_THIRTEENTH,
    Interval::MAJOR_THIRTEENTH,
];
const ALTERED_FIFTHS: [Interval; 2] = [Interval::DIMINISHED_FIFTH, Interval::AUGMENTED_FIFTH];
const THIRDS: [Interval; 2] = [Interval::MAJOR_THIRD, Interval::MINOR_THIRD];

/// Tone count at which rules 5 and 6 start thinning.
pub const CROWDED_TONE_COUNT: usize = 5;

/// One voicing rule. Both functions see only the chord's current tones.
#[derive(Clone, Copy)]
pub struct VoicingRule {
    pub name: &'static str,
    pub condition: fn(&Chord) -> bool,
    pub action: fn(&mut Chord),
}

impl fmt::Debug for VoicingRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VoicingRule").field("name", &self.name).finish()
    }
}

fn has_ninth(c: &Chord) -> bool {
    c.has_any(&NINTHS)
}

fn drop_fifth(c: &mut Chord) {
    c.remove_tone(Interval::PERFECT_FIFTH);
}

fn has_thirteenth_without_ninth(c: &Chord) -> bool {
    !has_ninth(c) && c.has_any(&THIRTEENTHS)
}

fn drop_fifth_and_ninth(c: &mut Chord) {
    c.remove_tone(Interval::PERFECT_FIFTH);
    c.remove_tone(Interval::MAJOR_NINTH);
}

fn has_altered_fifth_without_major_seventh(c: &Chord) -> bool {
    c.has_any(&ALTERED_FIFTHS) && !c.has_interval(Interval::MAJOR_SEVENTH)
}

fn has_eleventh_without_major_seventh(c: &Chord) -> bool {
    c.has_interval(Interval::PERFECT_ELEVENTH) && !c.has_interval(Interval::MAJOR_SEVENTH)
}

fn drop_thirds(c: &mut Chord) {
    for third in THIRDS {
        c.remove_tone(third);
    }
}

fn is_crowded_with_root(c: &Chord) -> bool {
    c.tones.len() >= CROWDED_TONE_COUNT && c.has_interval(Interval::UNISON)
}

fn drop_root(c: &mut Chord) {
    c.remove_tone(Interval::UNISON);
}

fn is_crowded_with_plain_fifth(c: &Chord) -> bool {
    c.tones.len() >= CROWDED_TONE_COUNT && !c.has_any(&ALTERED_FIFTHS)
}

/// The default rule list, in priority order.
pub static DEFAULT_RULES: [VoicingRule; 6] = [
    VoicingRule {
        name: "ninth-drops-fifth",
        condition: has_ninth,
        action: drop_fifth,
    },
    VoicingRule {
        name: "thirteenth-drops-fifth-and-ninth",
        condition: has_thirteenth_without_ninth,
        action: drop_fifth_and_ninth,
    },
    VoicingRule {
        name: "altered-fifth-drops-fifth",
        condition: has_altered_fifth_without_major_seventh,
        action: drop_fifth,
    },
    VoicingRule {
        name: "eleventh-drops-thirds",
        condition: has_eleventh_without_major_seventh,
        action: drop_thirds,
    },
    VoicingRule {
        name: "crowded-drops-root",
        condition: is_crowded_with_root,
        action: drop_root,
    },
    VoicingRule {
        name: "crowded-drops-fifth",
        condition: is_crowded_with_plain_fifth,
        action: drop_fifth,
    },
];

/// Shared, read-only handle to the rule list a chord is voiced with.
#[derive(Clone, Copy)]
pub struct RuleSet(&'static [VoicingRule]);

impl RuleSet {
    pub fn standard() -> Self {
        RuleSet(&DEFAULT_RULES)
    }

    pub fn custom(rules: &'static [VoicingRule]) -> Self {
        RuleSet(rules)
    }

    pub fn rules(self) -> &'static [VoicingRule] {
        self.0
    }
}

impl Default for RuleSet {
    fn default() -> Self {
        Self::standard()
    }
}

impl PartialEq for RuleSet {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.0, other.0)
    }
}

impl fmt::Debug for RuleSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.0.iter().map(|rule| rule.name))
            .finish()
    }
}

/// Voice `chord` in place with the rules it carries.
///
/// Returns the names of the rules whose condition held, in order.
///
/// # Example
/// ```
/// use chordtone::{apply_voicing, parse_chord, Interval};
///
/// let mut chord = parse_chord("C9").unwrap();
/// let fired = apply_voicing(&mut chord);
/// assert_eq!(fired, vec!["ninth-drops-fifth"]);
/// assert!(!chord.has_interval(Interval::PERFECT_FIFTH));
/// ```
pub fn apply_voicing(chord: &mut Chord) -> Vec<&'static str> {
    let rules = chord.rules.rules();
    apply_voicing_with(chord, rules)
}

/// Voice `chord` in place with an explicit rule list.
pub fn apply_voicing_with(chord: &mut Chord, rules: &[VoicingRule]) -> Vec<&'static str> {
    let mut fired = Vec::new();
    for rule in rules {
        if (rule.condition)(chord) {
            (rule.action)(chord);
            debug!(rule = rule.name, tones = ?chord.tones, "voicing rule applied");
            fired.push(rule.name);
        }
    }
    fired
}
