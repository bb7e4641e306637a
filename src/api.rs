//! # Public API
//!
//! Entry points that run the whole pipeline:
//!
//! ```text
//! symbol -> parse_chord -> apply_voicing -> Resolver::place -> Hz
//! ```
//!
//! ## Functions
//!
//! - [`voice_chord()`] - Full result: voiced chord, placed notes and frequencies
//! - [`chord_frequencies()`] - Just the frequencies, bass first
//! - [`note_frequency()`] - A single note name such as `A4`, bypassing the chord pipeline
//! - [`voice_sequence()`] - Several symbols, failing on the first bad one
//! - `*_with_config` variants take a [`ResolverConfig`]
//!
//! ## Typical Usage
//!
//! ```rust
//! use chordtone::voice_chord;
//!
//! let voicing = voice_chord("Cm7")?;
//! assert_eq!(voicing.note_names(), ["C2", "C4", "D#4", "G3", "A#3"]);
//! assert_eq!(voicing.frequencies.len(), 5);
//! # Ok::<(), chordtone::ChordError>(())
//! ```
//!
//! Every call is independent: the note table and the default rules are shared
//! read-only, so chords can be resolved from many threads at once.

use serde::Serialize;

use crate::chord::{parse_chord, Chord};
use crate::config::ResolverConfig;
use crate::error::ChordError;
use crate::frequency::{Note, NoteTable, STANDARD_REFERENCE_HZ};
use crate::resolve::Resolver;
use crate::voicing::apply_voicing;

/// A chord symbol taken all the way to sound.
///
/// # Fields
/// - `symbol`: the input as given
/// - `chord`: the chord after voicing (its `tones` are the survivors)
/// - `rules_applied`: names of the voicing rules that fired, in order
/// - `notes`: placed notes, bass first
/// - `frequencies`: Hz for each entry of `notes`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Voicing {
    pub symbol: String,
    pub chord: Chord,
    pub rules_applied: Vec<&'static str>,
    pub notes: Vec<Note>,
    pub frequencies: Vec<f64>,
}

impl Voicing {
    pub fn note_names(&self) -> Vec<String> {
        self.notes.iter().map(|n| n.to_string()).collect()
    }

    pub fn bass(&self) -> Note {
        self.notes[0]
    }
}

/// Parse, voice and place `symbol` with the standard resolver.
///
/// # Errors
/// Returns [`ChordError`] if the symbol does not parse.
pub fn voice_chord(symbol: &str) -> Result<Voicing, ChordError> {
    voice_chord_with(symbol, &Resolver::standard())
}

/// Parse, voice and place `symbol` with a specific resolver.
pub fn voice_chord_with(symbol: &str, resolver: &Resolver<'_>) -> Result<Voicing, ChordError> {
    let mut chord = parse_chord(symbol)?;
    let rules_applied = apply_voicing(&mut chord);
    let notes = resolver.place(&chord)?;
    let frequencies = notes
        .iter()
        .map(|note| resolver.table().frequency(*note))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Voicing {
        symbol: symbol.to_string(),
        chord,
        rules_applied,
        notes,
        frequencies,
    })
}

/// Parse, voice and place `symbol` under `config`.
pub fn voice_chord_with_config(
    symbol: &str,
    config: &ResolverConfig,
) -> Result<Voicing, ChordError> {
    with_resolver(config, |resolver| voice_chord_with(symbol, resolver))
}

/// Frequencies for `symbol` in Hz, bass first.
///
/// # Example
/// ```rust
/// use chordtone::{chord_frequencies, note_frequency};
///
/// let hz = chord_frequencies("Cm7/G")?;
/// assert_eq!(hz[0], note_frequency("G2")?);
/// # Ok::<(), chordtone::ChordError>(())
/// ```
pub fn chord_frequencies(symbol: &str) -> Result<Vec<f64>, ChordError> {
    Ok(voice_chord(symbol)?.frequencies)
}

/// Frequency of a single note name, e.g. `A4` -> 440.0.
pub fn note_frequency(name: &str) -> Result<f64, ChordError> {
    NoteTable::standard().frequency_of(name)
}

/// Frequency of a single note name under `config`'s tuning.
pub fn note_frequency_with_config(name: &str, config: &ResolverConfig) -> Result<f64, ChordError> {
    with_resolver(config, |resolver| resolver.table().frequency_of(name))
}

/// Voice several symbols in order. The first failure aborts the whole sequence.
pub fn voice_sequence<I, S>(symbols: I) -> Result<Vec<Voicing>, ChordError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    voice_sequence_with_config(symbols, &ResolverConfig::default())
}

/// Voice several symbols in order under `config`.
pub fn voice_sequence_with_config<I, S>(
    symbols: I,
    config: &ResolverConfig,
) -> Result<Vec<Voicing>, ChordError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    with_resolver(config, |resolver| {
        symbols
            .into_iter()
            .map(|symbol| voice_chord_with(symbol.as_ref(), resolver))
            .collect()
    })
}

/// Run `f` with a resolver for `config`, sharing the standard table for A440.
fn with_resolver<T>(
    config: &ResolverConfig,
    f: impl FnOnce(&Resolver<'_>) -> Result<T, ChordError>,
) -> Result<T, ChordError> {
    let custom;
    let table = if config.reference_pitch == STANDARD_REFERENCE_HZ {
        NoteTable::standard()
    } else {
        custom = NoteTable::new(config.reference_pitch);
        &custom
    };
    let resolver = Resolver::new(table, config.clone())?;
    f(&resolver)
}
