//! # Chord Module
//!
//! Turns a chord symbol into a [`Chord`]: root, quality, optional slash bass and the
//! ordered list of root-relative tones the symbol implies.
//!
//! ## Sub-modules
//! - `types` - Chord, Quality, Extension, Alteration definitions
//! - `parser` - The symbol grammar
//!
//! ## Grammar
//! ```text
//! symbol    = root quality? extension? alteration* addition? ("/" root)?
//! root      = "A".."G" ("#" | "b")?
//! quality   = "mmaj7" | "maj7" | "dim7" | "sus2" | "sus4" | "maj" | "dim" | "aug" | "m7" | "m"
//! extension = "maj7" | "69" | "11" | "13" | "6" | "7" | "9"
//! alteration= ("#" | "b") ("5" | "6" | "7" | "9" | "11" | "13")
//! addition  = "add" ("#" | "b")? ("2" | "4" | "5" | "6" | "7" | "9" | "11" | "13")
//! ```
//!
//! ## Tone Construction
//! 1. Quality formula (`m7` -> P1 m3 P5 m7)
//! 2. Extension tones stacked in thirds (`9` -> m7 M9, `13` -> m7 M9 M13)
//! 3. Alterations replace the matching natural tone (`b5`: P5 -> d5); an alteration
//!    whose natural tone is missing changes nothing
//! 4. The addition is appended as is
//! 5. Duplicates are dropped, first occurrence wins
//!
//! ## Example
//! ```rust
//! use chordtone::{parse_chord, Interval};
//!
//! let chord = parse_chord("Cm7b5").unwrap();
//! assert_eq!(
//!     chord.tones,
//!     vec![
//!         Interval::UNISON,
//!         Interval::MINOR_THIRD,
//!         Interval::DIMINISHED_FIFTH,
//!         Interval::MINOR_SEVENTH,
//!     ]
//! );
//! ```

mod parser;
mod types;


pub use parser::parse_chord;
pub use types::{degree_interval, Accidental, Alteration, Chord, Extension, Quality};
