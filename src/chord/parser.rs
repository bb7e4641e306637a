//! Chord symbol parser
//!
//! Reads a symbol left to right, one optional segment at a time:
//!
//! ```text
//! root  quality  extension  alterations  addition  /bass
//! C     m        9          b5#11        add13     /G
//! ```
//!
//! Every segment except the root is optional. Keywords are matched greedily
//! (longest first) and segments never overlap. Nothing is computed until the whole
//! symbol has been read, so a symbol either yields a complete [`Chord`] or an
//! error, never a partial chord.

use tracing::{debug, trace};

use super::types::{
    degree_interval, Accidental, Alteration, Chord, Extension, Quality, ALTERABLE_DEGREES,
};
use crate::error::ChordError;
use crate::interval::Interval;
use crate::pitch::PitchClass;
use crate::voicing::RuleSet;

/// Parse a chord symbol such as `Cm7b5`, `F#13` or `Cm7/G`.
///
/// # Examples
/// ```
/// use chordtone::{parse_chord, Interval, PitchClass};
///
/// let chord = parse_chord("Dbm7/Ab").unwrap();
/// assert_eq!(chord.root, PitchClass::CSharp);
/// assert_eq!(chord.bass, PitchClass::GSharp);
/// assert_eq!(chord.quality_name(), "m7");
/// assert!(chord.has_interval(Interval::MINOR_SEVENTH));
/// ```
///
/// # Errors
/// - [`ChordError::MalformedChordSymbol`] when the symbol is not in the grammar
/// - [`ChordError::UnknownQuality`] for an unknown quality word (`min`), extension
///   (`5`) or degree (`#4`, `add3`)
pub fn parse_chord(symbol: &str) -> Result<Chord, ChordError> {
    let mut parser = SymbolParser::new(symbol);

    let root = parser.pitch_class().ok_or_else(|| parser.malformed())?;
    let quality = parser.quality()?;
    let extension = parser.extension()?;
    let alterations = parser.alterations()?;
    let addition = parser.addition()?;
    let bass = parser.bass()?.unwrap_or(root);

    if !parser.at_end() {
        return Err(parser.malformed());
    }

    if let (Some(Quality::Major), Some(Extension::Major7)) = (quality, extension) {
        // no spelling tells this apart from a plain maj7
        return Err(ChordError::UnknownQuality("majmaj7".to_string()));
    }

    let quality = match (quality, extension) {
        // maj9 and m9 imply the matching seventh
        (Some(Quality::Major), Some(ext)) if ext.is_upper() => Quality::Major7,
        (Some(Quality::Minor), Some(ext)) if ext.is_upper() => Quality::Minor7,
        (Some(q), _) => q,
        (None, _) => Quality::Major,
    };

    let mut tones = build_tones(quality, extension, &alterations);
    if let Some(interval) = addition.and_then(Alteration::interval) {
        tones.push(interval);
    }
    dedup_tones(&mut tones);

    let chord = Chord {
        root,
        quality,
        extension,
        alterations,
        addition,
        bass,
        tones,
        rules: RuleSet::standard(),
    };

    debug!(
        symbol = parser.raw,
        chord = %chord,
        tones = ?chord.tones,
        "parsed chord symbol"
    );
    Ok(chord)
}

/// Quality formula, then extension tones, then alterations in written order.
fn build_tones(
    quality: Quality,
    extension: Option<Extension>,
    alterations: &[Alteration],
) -> Vec<Interval> {
    let mut tones: Vec<Interval> = quality.intervals().to_vec();
    if let Some(ext) = extension {
        tones.extend(ext.tones(quality));
    }
    for alteration in alterations {
        let (Some(natural), Some(altered)) = (alteration.natural(), alteration.interval()) else {
            continue;
        };
        let mut replaced = false;
        for tone in tones.iter_mut().filter(|t| **t == natural) {
            *tone = altered;
            replaced = true;
        }
        if !replaced {
            // Alterations only rewrite tones the chord already has.
            trace!(alteration = %alteration, "alteration matched no tone");
        }
    }
    tones
}

/// Drop repeated intervals, keeping the first occurrence.
fn dedup_tones(tones: &mut Vec<Interval>) {
    let mut seen = Vec::with_capacity(tones.len());
    tones.retain(|t| {
        if seen.contains(t) {
            false
        } else {
            seen.push(*t);
            true
        }
    });
}

/// Cursor over the remaining, unparsed part of a symbol.
struct SymbolParser<'a> {
    raw: &'a str,
    rest: &'a str,
}

impl<'a> SymbolParser<'a> {
    fn new(raw: &'a str) -> Self {
        Self {
            raw,
            rest: raw.trim(),
        }
    }

    fn malformed(&self) -> ChordError {
        ChordError::MalformedChordSymbol(self.raw.to_string())
    }

    fn at_end(&self) -> bool {
        self.rest.is_empty()
    }

    fn advance(&mut self, len: usize) {
        self.rest = &self.rest[len..];
    }

    fn eat(&mut self, prefix: &str) -> bool {
        if self.rest.starts_with(prefix) {
            self.advance(prefix.len());
            true
        } else {
            false
        }
    }

    fn pitch_class(&mut self) -> Option<PitchClass> {
        let (pc, len) = PitchClass::parse_prefix(self.rest)?;
        self.advance(len);
        Some(pc)
    }

    /// Leading run of ASCII letters, used to name an unknown quality word.
    fn word_at(s: &str) -> &str {
        let end = s
            .find(|c: char| !c.is_ascii_alphabetic())
            .unwrap_or(s.len());
        &s[..end]
    }

    /// Whether `s` starts a lowercase word that no later segment can consume.
    fn starts_stray_word(s: &str) -> bool {
        let mut chars = s.chars();
        match chars.next() {
            Some('b') => !chars.next().is_some_and(|c| c.is_ascii_digit()),
            Some(c) if c.is_ascii_lowercase() => !s.starts_with("add") && !s.starts_with("maj7"),
            _ => false,
        }
    }

    fn quality(&mut self) -> Result<Option<Quality>, ChordError> {
        let start = self.rest;
        let matched = Quality::KEYWORDS
            .iter()
            .find(|(keyword, _)| start.starts_with(keyword));

        let quality = match matched {
            Some((keyword, quality)) => {
                self.advance(keyword.len());
                Some(*quality)
            }
            None => None,
        };

        if Self::starts_stray_word(self.rest) {
            // "min" is one unknown word, but "maj7sus" is maj7 followed by "sus"
            let ends_in_digit = matched.is_some_and(|(keyword, _)| {
                keyword.ends_with(|c: char| c.is_ascii_digit())
            });
            let word = if ends_in_digit {
                Self::word_at(self.rest)
            } else {
                Self::word_at(start)
            };
            return Err(ChordError::UnknownQuality(word.to_string()));
        }
        Ok(quality)
    }

    fn extension(&mut self) -> Result<Option<Extension>, ChordError> {
        let rest = self.rest;
        if let Some((token, ext)) = Extension::TOKENS
            .iter()
            .find(|(token, _)| rest.starts_with(token))
        {
            // the token must use up the whole digit run: "611" is not a sixth
            self.advance(token.len());
            if self.rest.starts_with(|c: char| c.is_ascii_digit()) {
                return Err(ChordError::UnknownQuality(format!(
                    "{}{}",
                    token,
                    Self::digits_at(self.rest)
                )));
            }
            return Ok(Some(*ext));
        }
        if rest.starts_with(|c: char| c.is_ascii_digit()) {
            return Err(ChordError::UnknownQuality(Self::digits_at(rest).to_string()));
        }
        Ok(None)
    }

    fn digits_at(s: &str) -> &str {
        let end = s.find(|c: char| !c.is_ascii_digit()).unwrap_or(s.len());
        &s[..end]
    }

    /// `#` or `b` followed by a degree number.
    fn degree(&mut self) -> Option<(Accidental, &'a str)> {
        let accidental = match self.rest.as_bytes().first() {
            Some(b'#') => Accidental::Sharp,
            Some(b'b') => Accidental::Flat,
            _ => return None,
        };
        let digits = Self::digits_at(&self.rest[1..]);
        if digits.is_empty() {
            return None;
        }
        let token = &self.rest[..1 + digits.len()];
        self.advance(token.len());
        Some((accidental, token))
    }

    fn alterations(&mut self) -> Result<Vec<Alteration>, ChordError> {
        let mut alterations = Vec::new();
        while let Some((accidental, token)) = self.degree() {
            let degree = token[1..]
                .parse::<u8>()
                .ok()
                .filter(|d| ALTERABLE_DEGREES.contains(d))
                .ok_or_else(|| ChordError::UnknownQuality(token.to_string()))?;
            alterations.push(Alteration { accidental, degree });
        }
        Ok(alterations)
    }

    fn addition(&mut self) -> Result<Option<Alteration>, ChordError> {
        if !self.eat("add") {
            return Ok(None);
        }
        let accidental = if self.eat("#") {
            Accidental::Sharp
        } else if self.eat("b") {
            Accidental::Flat
        } else {
            Accidental::Natural
        };
        let digits = Self::digits_at(self.rest);
        if digits.is_empty() {
            return Err(self.malformed());
        }
        let degree = digits
            .parse::<u8>()
            .ok()
            .filter(|d| degree_interval(*d).is_some())
            .ok_or_else(|| {
                let sign = match accidental {
                    Accidental::Sharp => "#",
                    Accidental::Flat => "b",
                    Accidental::Natural => "",
                };
                ChordError::UnknownQuality(format!("add{}{}", sign, digits))
            })?;
        self.advance(digits.len());
        Ok(Some(Alteration { accidental, degree }))
    }

    fn bass(&mut self) -> Result<Option<PitchClass>, ChordError> {
        if !self.eat("/") {
            return Ok(None);
        }
        self.pitch_class().map(Some).ok_or_else(|| self.malformed())
    }
}
