//! Output for notegen events
//!
//! Renders converted note/chord events as a Standard MIDI File, as JSON or
//! as plain text.

pub mod midi;
pub mod output;

pub use midi::{write_midi, write_midi_file, MidiConfig, TICKS_PER_QUARTER};
pub use output::OutputFormatter;

use std::path::PathBuf;

/// MIDI rendering errors
#[derive(Debug, thiserror::Error)]
pub enum MidiError {
    #[error("Event {event} has a pitch outside the MIDI range: {pitch}")]
    PitchOutOfRange { event: usize, pitch: String },

    #[error("Invalid tempo: {0} BPM")]
    InvalidTempo(f64),

    #[error("Invalid note length: {0} quarter notes")]
    InvalidNoteLength(f64),

    #[error("Gap of {delta} ticks after tick {tick} does not fit in a MIDI delta time")]
    DeltaOverflow { tick: u64, delta: u64 },

    #[error("Failed to encode MIDI data: {0}")]
    Write(#[source] std::io::Error),

    #[error("Failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, MidiError>;
