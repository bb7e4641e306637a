//! Resolver configuration
//!
//! Where the resolver places notes: tuning reference, bass and harmony octaves, and
//! the band harmony tones are folded into. Every field has a default, so an empty
//! YAML document is a valid configuration.
//!
//! ```yaml
//! reference-pitch: 440
//! bass-octave: 2
//! harmony-octave: 3
//! band-low: G3
//! band-high: F#4
//! ```

use serde::{Deserialize, Serialize};

use crate::error::ChordError;
use crate::frequency::{Note, MAX_OCTAVE, MIN_OCTAVE, STANDARD_REFERENCE_HZ};
use crate::interval::Interval;
use crate::pitch::{PitchClass, SEMITONES_PER_OCTAVE};

/// Most octave folds any tone may need to land in the band.
pub const MAX_FOLDS: i32 = 2;

/// Validated resolver settings.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct ResolverConfig {
    pub reference_pitch: f64,
    pub bass_octave: i32,
    pub harmony_octave: i32,
    pub band_low: Note,
    pub band_high: Note,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            reference_pitch: STANDARD_REFERENCE_HZ,
            bass_octave: 2,
            harmony_octave: 3,
            band_low: Note::new(PitchClass::G, 3),
            band_high: Note::new(PitchClass::FSharp, 4),
        }
    }
}

/// Raw configuration for YAML deserialization
#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct RawResolverConfig {
    pub reference_pitch: Option<f64>,
    pub bass_octave: Option<i32>,
    pub harmony_octave: Option<i32>,
    pub band_low: Option<String>,
    pub band_high: Option<String>,
}

impl ResolverConfig {
    /// Read and validate a YAML configuration document.
    pub fn from_yaml(content: &str) -> Result<Self, ChordError> {
        let raw: RawResolverConfig = if content.trim().is_empty() {
            RawResolverConfig::default()
        } else {
            serde_yaml::from_str(content).map_err(|e| ChordError::InvalidConfig(e.to_string()))?
        };
        Self::from_raw(raw)
    }

    pub fn from_raw(raw: RawResolverConfig) -> Result<Self, ChordError> {
        let defaults = Self::default();
        let parse_band = |value: Option<String>, default: Note| match value {
            Some(name) => name
                .parse::<Note>()
                .map_err(|e| ChordError::InvalidConfig(e.to_string())),
            None => Ok(default),
        };
        let config = Self {
            reference_pitch: raw.reference_pitch.unwrap_or(defaults.reference_pitch),
            bass_octave: raw.bass_octave.unwrap_or(defaults.bass_octave),
            harmony_octave: raw.harmony_octave.unwrap_or(defaults.harmony_octave),
            band_low: parse_band(raw.band_low, defaults.band_low)?,
            band_high: parse_band(raw.band_high, defaults.band_high)?,
        };
        config.validate()?;
        Ok(config)
    }

    /// Check that every tone the resolver can produce lands in the band within
    /// [`MAX_FOLDS`] folds and never leaves the frequency table.
    pub fn validate(&self) -> Result<(), ChordError> {
        let invalid = |message: String| Err(ChordError::InvalidConfig(message));

        if !self.reference_pitch.is_finite() || self.reference_pitch <= 0.0 {
            return invalid(format!(
                "reference-pitch must be a positive frequency, got {}",
                self.reference_pitch
            ));
        }
        if !(MIN_OCTAVE..=MAX_OCTAVE).contains(&self.bass_octave) {
            return invalid(format!(
                "bass-octave must be within {}..={}, got {}",
                MIN_OCTAVE, MAX_OCTAVE, self.bass_octave
            ));
        }
        for (field, note) in [("band-low", self.band_low), ("band-high", self.band_high)] {
            if !(MIN_OCTAVE..=MAX_OCTAVE).contains(&note.octave) {
                return invalid(format!("{} {} is outside the frequency table", field, note));
            }
        }

        let low = self.band_low.midi();
        let high = self.band_high.midi();
        if high - low < SEMITONES_PER_OCTAVE - 1 {
            return invalid(format!(
                "band {}..{} must span at least 11 semitones",
                self.band_low, self.band_high
            ));
        }

        let reference_c = Note::new(PitchClass::C, self.harmony_octave).midi();
        let lowest = reference_c + Interval::MIN as i32;
        let highest = reference_c + (SEMITONES_PER_OCTAVE - 1) + Interval::MAX as i32;
        let table_low = Note::new(PitchClass::C, MIN_OCTAVE).midi();
        let table_high = Note::new(PitchClass::B, MAX_OCTAVE).midi();
        let reach = MAX_FOLDS * SEMITONES_PER_OCTAVE;
        if lowest < table_low || highest > table_high {
            return invalid(format!(
                "harmony-octave {} puts tones outside the frequency table",
                self.harmony_octave
            ));
        }
        if lowest + reach < low || highest - reach > high {
            return invalid(format!(
                "harmony-octave {} is too far from band {}..{}",
                self.harmony_octave, self.band_low, self.band_high
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = ResolverConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(ResolverConfig::from_yaml("").unwrap(), config);
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let config = ResolverConfig::from_yaml("reference-pitch: 432\nband-low: Ab3\nband-high: G4\n")
            .unwrap();
        assert_eq!(config.reference_pitch, 432.0);
        assert_eq!(config.band_low, Note::new(PitchClass::GSharp, 3));
        assert_eq!(config.band_high, Note::new(PitchClass::G, 4));
        assert_eq!(config.bass_octave, 2);
        assert_eq!(config.harmony_octave, 3);
    }

    #[test]
    fn test_unknown_field_rejected() {
        let err = ResolverConfig::from_yaml("tempo: 120").unwrap_err();
        assert!(matches!(err, ChordError::InvalidConfig(_)));
    }

    #[test]
    fn test_narrow_band_rejected() {
        let err = ResolverConfig::from_yaml("band-low: A3\nband-high: F#4").unwrap_err();
        match err {
            ChordError::InvalidConfig(message) => assert!(message.contains("11 semitones")),
            other => panic!("Expected InvalidConfig, got {:?}", other),
        }
    }

    #[test]
    fn test_distant_harmony_octave_rejected() {
        assert!(ResolverConfig::from_yaml("harmony-octave: 5").is_err());
        assert!(ResolverConfig::from_yaml("harmony-octave: 0").is_err());
        assert!(ResolverConfig::from_yaml("harmony-octave: 2").is_err());
        assert!(ResolverConfig::from_yaml("harmony-octave: 4\nband-low: G4\nband-high: F#5").is_ok());
    }

    #[test]
    fn test_bad_values_rejected() {
        assert!(ResolverConfig::from_yaml("reference-pitch: -1").is_err());
        assert!(ResolverConfig::from_yaml("bass-octave: 9").is_err());
        assert!(ResolverConfig::from_yaml("band-low: H3").is_err());
        assert!(ResolverConfig::from_yaml("band-high: C12").is_err());
    }
}
