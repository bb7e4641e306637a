pub mod api;
pub mod chord;
pub mod config;
pub mod error;
pub mod frequency;
pub mod interval;
pub mod pitch;
pub mod resolve;
pub mod voicing;

pub use api::{
    chord_frequencies, note_frequency, note_frequency_with_config, voice_chord,
    voice_chord_with, voice_chord_with_config, voice_sequence, voice_sequence_with_config,
    Voicing,
};
pub use chord::{parse_chord, Accidental, Alteration, Chord, Extension, Quality};
pub use config::ResolverConfig;
pub use error::*;
pub use frequency::{Note, NoteTable};
pub use interval::Interval;
pub use pitch::PitchClass;
pub use resolve::Resolver;
pub use voicing::{apply_voicing, apply_voicing_with, RuleSet, VoicingRule, DEFAULT_RULES};
