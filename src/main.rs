use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use std::fs;
use std::io::Read;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use notegen_core::{Event, MappingTable, TokenConverter};
use notegen_lib::input::{parse_indices, parse_tokens};
use notegen_lib::Pipeline;
use notegen_midi::{write_midi_file, MidiConfig, OutputFormatter};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Text,
    Json,
    Midi,
}

#[derive(Parser, Debug)]
#[command(name = "notegen")]
#[command(about = "Convert model class indices into notes, chords and MIDI", long_about = None)]
struct Args {
    /// Mapping table resource (JSON with parallel "keys" and "values" arrays)
    #[arg(short, long)]
    table: Option<PathBuf>,

    /// Read the sequence from this file (default: stdin)
    #[arg(short, long, conflicts_with = "sequence")]
    input: Option<PathBuf>,

    /// Sequence given inline, e.g. "12 4 33" (or "C4 4.7.11" with --tokens)
    #[arg(short, long)]
    sequence: Option<String>,

    /// Input is already a token sequence; skip index decoding
    #[arg(long)]
    tokens: bool,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    format: Format,

    /// Output file path (default: stdout; required for midi)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Tempo for MIDI output
    #[arg(long, default_value = "120")]
    tempo: f64,

    /// Length of each note in quarter notes for MIDI output
    #[arg(long, default_value = "1.0")]
    note_length: f64,

    /// Suppress informational messages (only errors)
    #[arg(short, long)]
    quiet: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .try_init()
        .ok();

    let args = Args::parse();

    let raw = read_sequence(&args)?;
    let events = build_events(&args, &raw)?;

    if !args.quiet {
        eprintln!("Converted {} events", events.len());
    }

    match args.format {
        Format::Midi => {
            let path = args
                .output
                .as_ref()
                .context("MIDI output needs --output <file>")?;
            let config = MidiConfig {
                tempo_bpm: args.tempo,
                note_length: args.note_length,
                ..MidiConfig::default()
            };
            write_midi_file(&events, path, &config).context("Failed to render MIDI")?;

            if !args.quiet {
                eprintln!("MIDI saved to {}", path.display());
            }
        }
        Format::Text | Format::Json => {
            let formatter = OutputFormatter::default();
            let output = if args.format == Format::Json {
                formatter.json(&events).context("Failed to serialize events")?
            } else {
                formatter.text(&events)
            };
            emit(&args, &output)?;
        }
    }

    Ok(())
}

fn read_sequence(args: &Args) -> Result<String> {
    if let Some(inline) = &args.sequence {
        return Ok(inline.clone());
    }

    if let Some(path) = &args.input {
        return fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()));
    }

    let mut buf = String::new();
    std::io::stdin()
        .read_to_string(&mut buf)
        .context("Failed to read sequence from stdin")?;
    Ok(buf)
}

fn build_events(args: &Args, raw: &str) -> Result<Vec<Event>> {
    if args.tokens {
        let tokens = parse_tokens(raw)?;
        return TokenConverter::new()
            .convert(&tokens)
            .context("Failed to convert tokens");
    }

    let table_path = args
        .table
        .as_ref()
        .context("Decoding indices needs --table <file> (or pass --tokens)")?;
    let table = MappingTable::load(table_path)
        .with_context(|| format!("Failed to load mapping table {}", table_path.display()))?;

    if !args.quiet {
        eprintln!("Loaded {} table entries from {}", table.len(), table_path.display());
    }

    let indices = parse_indices(raw)?;
    Pipeline::new(&table)
        .run(&indices)
        .context("Failed to decode sequence")
}

fn emit(args: &Args, output: &str) -> Result<()> {
    match &args.output {
        Some(path) => {
            fs::write(path, format!("{}\n", output))
                .with_context(|| format!("Failed to write {}", path.display()))?;
            if !args.quiet {
                eprintln!("Output saved to {}", path.display());
            }
        }
        None => println!("{}", output),
    }
    Ok(())
}
