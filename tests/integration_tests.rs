//! Integration tests for chordtone
//!
//! Tests the full pipeline from chord symbol to placed notes and frequencies.

use chordtone::{
    chord_frequencies, note_frequency, parse_chord, voice_chord, voice_chord_with_config,
    voice_sequence, ChordError, ResolverConfig,
};
use pretty_assertions::assert_eq;

const TOLERANCE: f64 = 0.01;

fn assert_hz(actual: &[f64], expected: &[f64]) {
    assert_eq!(actual.len(), expected.len(), "{:?} vs {:?}", actual, expected);
    for (a, e) in actual.iter().zip(expected) {
        assert!((a - e).abs() < TOLERANCE, "{} != {} in {:?}", a, e, actual);
    }
}

#[test]
fn test_major_triad() {
    // Root only: C2 in the bass, C E G folded into G3..=F#4
    let voicing = voice_chord("Cmaj").unwrap();
    assert_eq!(voicing.note_names(), vec!["C2", "C4", "E4", "G3"]);
    assert_hz(&voicing.frequencies, &[65.41, 261.63, 329.63, 196.00]);
    assert!(voicing.rules_applied.is_empty());
}

#[test]
fn test_minor_seventh() {
    let voicing = voice_chord("Cm7").unwrap();
    assert_eq!(voicing.note_names(), vec!["C2", "C4", "D#4", "G3", "A#3"]);
    assert_hz(
        &voicing.frequencies,
        &[65.41, 261.63, 311.13, 196.00, 233.08],
    );
}

#[test]
fn test_ninth_drops_fifth() {
    let voicing = voice_chord("C9").unwrap();
    assert_eq!(voicing.note_names(), vec!["C2", "C4", "E4", "A#3", "D4"]);
    assert_eq!(voicing.rules_applied, vec!["ninth-drops-fifth"]);
}

#[test]
fn test_sixth_and_second_drop_fifth() {
    let voicing = voice_chord("C6").unwrap();
    assert_eq!(voicing.note_names(), vec!["C2", "C4", "E4", "A3"]);
    assert_eq!(voicing.rules_applied, vec!["thirteenth-drops-fifth-and-ninth"]);

    let voicing = voice_chord("Csus2").unwrap();
    assert_eq!(voicing.note_names(), vec!["C2", "C4", "D4"]);
    assert_eq!(voicing.rules_applied, vec!["ninth-drops-fifth"]);
}

#[test]
fn test_half_diminished_keeps_flat_fifth() {
    let voicing = voice_chord("Cm7b5").unwrap();
    assert_eq!(voicing.note_names(), vec!["C2", "C4", "D#4", "F#4", "A#3"]);
    assert_eq!(voicing.rules_applied, vec!["altered-fifth-drops-fifth"]);
}

#[test]
fn test_slash_chord_bass() {
    let hz = chord_frequencies("Cm7/G").unwrap();
    assert_eq!(hz[0], note_frequency("G2").unwrap());
    assert_hz(&hz[..1], &[98.00]);
    // upper tones are the same as without the slash
    assert_eq!(&hz[1..], &chord_frequencies("Cm7").unwrap()[1..]);
}

#[test]
fn test_harmony_stays_in_register() {
    let low = note_frequency("G3").unwrap();
    let high = note_frequency("F#4").unwrap();
    let roots = ["C", "C#", "D", "Eb", "E", "F", "F#", "G", "Ab", "A", "Bb", "B"];
    let suffixes = [
        "", "m", "dim", "aug", "sus2", "sus4", "6", "7", "maj7", "m7", "dim7", "mmaj7", "9",
        "maj9", "m9", "11", "m11", "13", "maj13", "69", "m69", "7b9", "9#11", "13b9",
        "7#5", "m7b5", "add9", "madd11", "7addb13", "/E",
    ];
    for root in roots {
        for suffix in suffixes {
            let symbol = format!("{}{}", root, suffix);
            let hz = chord_frequencies(&symbol).unwrap();
            for f in &hz[1..] {
                assert!(*f >= low && *f <= high, "{} placed {} Hz", symbol, f);
            }
        }
    }
}

#[test]
fn test_bass_is_always_in_bass_octave() {
    for symbol in ["C", "B13", "F#m7/C#", "Ab/Eb", "Gsus4/A"] {
        let voicing = voice_chord(symbol).unwrap();
        assert_eq!(voicing.bass().octave, 2, "{}", symbol);
        assert_eq!(voicing.bass().pitch_class, voicing.chord.bass);
    }
}

#[test]
fn test_enharmonic_spellings_voice_identically() {
    for (flat, sharp) in [("Dbm7", "C#m7"), ("Bb13", "A#13"), ("Eb/Bb", "D#/A#")] {
        assert_eq!(
            parse_chord(flat).unwrap(),
            parse_chord(sharp).unwrap(),
            "{}",
            flat
        );
        assert_eq!(
            chord_frequencies(flat).unwrap(),
            chord_frequencies(sharp).unwrap()
        );
    }
}

#[test]
fn test_voicing_is_idempotent() {
    for symbol in ["C9", "C13", "Cm11", "Cmaj13#11", "C7#5b9", "Cm7b5", "C69"] {
        let once = voice_chord(symbol).unwrap();
        let mut again = once.chord.clone();
        chordtone::apply_voicing(&mut again);
        assert_eq!(again.tones, once.chord.tones, "{}", symbol);
    }
}

#[test]
fn test_invalid_symbols() {
    assert_eq!(
        voice_chord("H7").unwrap_err(),
        ChordError::MalformedChordSymbol("H7".to_string())
    );
    assert_eq!(
        voice_chord("Cmin7").unwrap_err(),
        ChordError::UnknownQuality("min".to_string())
    );
    assert!(matches!(
        voice_chord(""),
        Err(ChordError::MalformedChordSymbol(_))
    ));
}

#[test]
fn test_note_frequencies() {
    assert_eq!(note_frequency("A4").unwrap(), 440.0);
    assert_hz(&[note_frequency("C4").unwrap()], &[261.63]);
    assert_eq!(note_frequency("A3").unwrap(), 220.0);
    assert_eq!(note_frequency("A5").unwrap(), 880.0);
    assert_eq!(note_frequency("Bb3").unwrap(), note_frequency("A#3").unwrap());
}

#[test]
fn test_sequence_in_order() {
    let voicings = voice_sequence(["Dm7", "G7", "Cmaj7"]).unwrap();
    let basses: Vec<String> = voicings.iter().map(|v| v.bass().to_string()).collect();
    assert_eq!(basses, vec!["D2", "G2", "C2"]);
}

#[test]
fn test_config_from_yaml() {
    let config = ResolverConfig::from_yaml(
        r#"
reference-pitch: 442
bass-octave: 1
"#,
    )
    .unwrap();
    let voicing = voice_chord_with_config("A", &config).unwrap();
    assert_eq!(voicing.note_names(), vec!["A1", "A3", "C#4", "E4"]);
    assert_hz(&voicing.frequencies[..1], &[55.25]);

    assert!(ResolverConfig::from_yaml("reference-pitch: -1").is_err());
    assert!(ResolverConfig::from_yaml("tempo: 120").is_err());
}

#[test]
fn test_concurrent_resolution() {
    let symbols = ["C", "Am7", "Dm9", "G13", "F#m7b5", "Bbmaj7/D"];
    let expected: Vec<Vec<f64>> = symbols
        .iter()
        .map(|s| chord_frequencies(s).unwrap())
        .collect();

    std::thread::scope(|scope| {
        let handles: Vec<_> = (0..8)
            .map(|_| scope.spawn(|| symbols.map(|s| chord_frequencies(s).unwrap())))
            .collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap().to_vec(), expected);
        }
    });
}
