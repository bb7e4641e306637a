//! # Frequency Resolver
//!
//! Places a voiced chord in a concrete register.
//!
//! ## Placement
//! - Bass: the bass pitch class in the bass octave (default octave 2)
//! - Harmony: each surviving tone is transposed from the root in the harmony octave
//!   (default octave 3), then folded by whole octaves into the band
//!   (default G3 ..= F#4): above the band folds down, below the band folds up
//!
//! The output is the bass first, then harmony tones in the order they survived
//! voicing. Folding never takes more than [`MAX_FOLDS`] steps for a validated
//! configuration; needing more is a defect and panics.
//!
//! ## Example
//! ```rust
//! use chordtone::{apply_voicing, parse_chord, Resolver};
//!
//! let mut chord = parse_chord("Cmaj").unwrap();
//! apply_voicing(&mut chord);
//! let notes = Resolver::standard().place(&chord).unwrap();
//! let names: Vec<String> = notes.iter().map(|n| n.to_string()).collect();
//! assert_eq!(names, ["C2", "C4", "E4", "G3"]);
//! ```

use tracing::trace;

use crate::chord::Chord;
use crate::config::{ResolverConfig, MAX_FOLDS};
use crate::error::ChordError;
use crate::frequency::{Note, NoteTable};
use crate::interval::Interval;
use crate::pitch::SEMITONES_PER_OCTAVE;

/// Places chords against a note table using a validated configuration.
#[derive(Debug, Clone)]
pub struct Resolver<'t> {
    table: &'t NoteTable,
    config: ResolverConfig,
}

impl Resolver<'static> {
    /// A440 tuning with the default register.
    pub fn standard() -> Self {
        Self {
            table: NoteTable::standard(),
            config: ResolverConfig::default(),
        }
    }
}

impl<'t> Resolver<'t> {
    /// Build a resolver; the configuration is validated first.
    ///
    /// `table` must be tuned to `config.reference_pitch`.
    pub fn new(table: &'t NoteTable, config: ResolverConfig) -> Result<Self, ChordError> {
        config.validate()?;
        if table.reference_hz() != config.reference_pitch {
            return Err(ChordError::InvalidConfig(format!(
                "reference-pitch {} does not match the note table tuned to {}",
                config.reference_pitch,
                table.reference_hz()
            )));
        }
        Ok(Self { table, config })
    }

    pub fn table(&self) -> &'t NoteTable {
        self.table
    }

    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    /// Place the bass and every surviving tone, bass first.
    pub fn place(&self, chord: &Chord) -> Result<Vec<Note>, ChordError> {
        let bass = Note::new(chord.bass, self.config.bass_octave);
        self.table.frequency(bass)?;

        let reference = Note::new(chord.root, self.config.harmony_octave);
        let mut notes = Vec::with_capacity(chord.tones.len() + 1);
        notes.push(bass);
        for interval in &chord.tones {
            notes.push(self.fold(reference, *interval)?);
        }
        Ok(notes)
    }

    /// Frequencies in Hz, bass first.
    pub fn resolve(&self, chord: &Chord) -> Result<Vec<f64>, ChordError> {
        self.place(chord)?
            .into_iter()
            .map(|note| self.table.frequency(note))
            .collect()
    }

    /// Transpose `reference` by `interval` and fold the result into the band.
    pub fn fold(&self, reference: Note, interval: Interval) -> Result<Note, ChordError> {
        let low = self.table.frequency(self.config.band_low)?;
        let high = self.table.frequency(self.config.band_high)?;

        let mut semitones = interval.semitones();
        for _ in 0..=MAX_FOLDS {
            let note = self.table.transpose(reference, semitones)?;
            let hz = self.table.frequency(note)?;
            if hz > high {
                semitones -= SEMITONES_PER_OCTAVE;
            } else if hz < low {
                semitones += SEMITONES_PER_OCTAVE;
            } else {
                trace!(%reference, %interval, %note, hz, "placed tone");
                return Ok(note);
            }
        }
        panic!(
            "internal error: {} from {} did not fold into {}..={} within {} octaves",
            interval, reference, self.config.band_low, self.config.band_high, MAX_FOLDS
        );
    }
}
