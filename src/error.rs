//! # Error Types
//!
//! This module defines all error types for the chord engine.
//!
//! Every error names the input that caused it so callers can report it back
//! verbatim. Errors are deterministic: the same input always fails the same way.
//!
//! ## Error Types
//! - `MalformedChordSymbol` - Input does not match the chord grammar
//! - `UnknownQuality` - A quality word or degree token is well-formed but unknown
//! - `InvalidNoteName` - A note name such as `A4` could not be read
//! - `OutOfRange` - A note falls outside the frequency table
//! - `InvalidConfig` - Resolver configuration is unreadable or inconsistent
//!
//! ## Usage
//! ```rust
//! use chordtone::{chord_frequencies, ChordError};
//!
//! match chord_frequencies("H7") {
//!     Ok(hz) => println!("{:?}", hz),
//!     Err(ChordError::MalformedChordSymbol(raw)) => eprintln!("not a chord: {}", raw),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ChordError {
    /// The symbol does not match the chord grammar.
    ///
    /// # Example
    /// ```
    /// # use chordtone::ChordError;
    /// let err = ChordError::MalformedChordSymbol("H7".to_string());
    /// assert_eq!(err.to_string(), "Malformed chord symbol: 'H7'");
    /// ```
    #[error("Malformed chord symbol: '{0}'")]
    MalformedChordSymbol(String),

    /// A quality word, extension or degree token that the engine has no table entry for.
    ///
    /// # Example
    /// ```
    /// # use chordtone::ChordError;
    /// let err = ChordError::UnknownQuality("min".to_string());
    /// assert_eq!(err.to_string(), "Unknown chord quality or degree: 'min'");
    /// ```
    #[error("Unknown chord quality or degree: '{0}'")]
    UnknownQuality(String),

    /// A note name (pitch class plus octave) could not be parsed.
    #[error("Invalid note name: '{0}'")]
    InvalidNoteName(String),

    /// A lookup or transposition left the supported octave span.
    ///
    /// # Example
    /// ```
    /// # use chordtone::ChordError;
    /// let err = ChordError::OutOfRange { note: "C".to_string(), octave: 9 };
    /// assert_eq!(err.to_string(), "Note C out of range at octave 9");
    /// ```
    #[error("Note {note} out of range at octave {octave}")]
    OutOfRange { note: String, octave: i32 },

    /// Resolver configuration could not be read or is inconsistent.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}
