use serde::Serialize;
use std::fmt;

use crate::instrument::Instrument;
use crate::pitch::{NoteName, PitchId};

/// One tone of a chord
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ChordTone {
    pub pitch: PitchId,
    pub instrument: Instrument,
}

/// A note or chord placed at an offset (in quarter notes)
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Event {
    Note {
        pitch: NoteName,
        offset: f64,
        instrument: Instrument,
    },
    Chord {
        notes: Vec<ChordTone>,
        offset: f64,
    },
}

impl Event {
    pub fn offset(&self) -> f64 {
        match self {
            Event::Note { offset, .. } | Event::Chord { offset, .. } => *offset,
        }
    }

    pub fn is_chord(&self) -> bool {
        matches!(self, Event::Chord { .. })
    }

    /// Instrument of the note, or of the chord's first tone
    pub fn instrument(&self) -> Option<Instrument> {
        match self {
            Event::Note { instrument, .. } => Some(*instrument),
            Event::Chord { notes, .. } => notes.first().map(|tone| tone.instrument),
        }
    }

    /// MIDI keys sounded by this event; `None` if any pitch is out of range
    pub fn midi_keys(&self) -> Option<Vec<u8>> {
        match self {
            Event::Note { pitch, .. } => pitch.to_midi().map(|key| vec![key]),
            Event::Chord { notes, .. } => notes.iter().map(|tone| tone.pitch.to_midi()).collect(),
        }
    }
}

/// Renders the pitch content: `C4` for notes, `<4.7.11>` for chords
impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Event::Note { pitch, .. } => write!(f, "{}", pitch),
            Event::Chord { notes, .. } => {
                let ids: Vec<String> = notes.iter().map(|tone| tone.pitch.to_string()).collect();
                write!(f, "<{}>", ids.join("."))
            }
        }
    }
}
