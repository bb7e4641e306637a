use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use tracing::{debug, Level};

use chordtone::{
    note_frequency_with_config, voice_chord_with_config, voice_sequence_with_config,
    ResolverConfig, Voicing,
};

#[derive(Parser, Debug)]
#[command(name = "chordtone", about = "Resolve chord symbols into voiced frequencies")]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// YAML resolver configuration (tuning, octaves, band)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = Format::Text, global = true)]
    format: Format,

    /// Log parsing and voicing decisions to stderr
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Frequency of a single note, e.g. A4
    Note { name: String },
    /// Voice one chord symbol, e.g. Cm7b5 or F#13/A#
    Chord { symbol: String },
    /// Voice several chord symbols in order
    Sequence {
        #[arg(required = true)]
        symbols: Vec<String>,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Format {
    Text,
    Json,
    Yaml,
}

#[derive(Serialize)]
struct NoteOutput<'a> {
    note: &'a str,
    frequency: f64,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = match &cli.config {
        Some(path) => {
            let content = fs::read_to_string(path)
                .with_context(|| format!("reading config '{}'", path.display()))?;
            ResolverConfig::from_yaml(&content)?
        }
        None => ResolverConfig::default(),
    };
    debug!(?config, "resolver configuration");

    match &cli.command {
        Command::Note { name } => {
            let frequency = note_frequency_with_config(name, &config)?;
            let output = NoteOutput {
                note: name,
                frequency,
            };
            match cli.format {
                Format::Text => println!("{} {:.2}", name, frequency),
                format => emit(format, &output)?,
            }
        }
        Command::Chord { symbol } => {
            let voicing = voice_chord_with_config(symbol, &config)?;
            match cli.format {
                Format::Text => print_voicing(&voicing),
                format => emit(format, &voicing)?,
            }
        }
        Command::Sequence { symbols } => {
            let voicings = voice_sequence_with_config(symbols, &config)?;
            match cli.format {
                Format::Text => voicings.iter().for_each(print_voicing),
                format => emit(format, &voicings)?,
            }
        }
    }
    Ok(())
}

fn init_logging(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::WARN };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn print_voicing(voicing: &Voicing) {
    let placed: Vec<String> = voicing
        .notes
        .iter()
        .zip(&voicing.frequencies)
        .map(|(note, hz)| format!("{}={:.2}", note, hz))
        .collect();
    println!("{:<10} {}", voicing.chord.to_string(), placed.join(" "));
}

fn emit<T: Serialize>(format: Format, value: &T) -> Result<()> {
    let rendered = match format {
        Format::Json => serde_json::to_string_pretty(value)?,
        Format::Yaml | Format::Text => serde_yaml::to_string(value)?,
    };
    println!("{}", rendered.trim_end());
    Ok(())
}
