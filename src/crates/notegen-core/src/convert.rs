//! Token-to-event conversion
//!
//! Each token becomes exactly one event. Events are spaced [`OFFSET_STEP`]
//! quarter notes apart starting at 0, and every note carries the guitar tag.

use crate::error::ParseError;
use crate::event::{ChordTone, Event};
use crate::instrument::Instrument;
use crate::token::Token;

/// Distance between consecutive events, in quarter notes
pub const OFFSET_STEP: f64 = 0.7;

/// Offset of the `n`-th event (0-based)
pub fn offset_at(n: usize) -> f64 {
    OFFSET_STEP * n as f64
}

#[derive(Debug, Clone, Copy, Default)]
pub struct TokenConverter {
    instrument: Instrument,
}

impl TokenConverter {
    pub fn new() -> Self {
        Self {
            instrument: Instrument::GUITAR,
        }
    }

    pub fn instrument(&self) -> Instrument {
        self.instrument
    }

    /// Convert tokens to events, one per token, in order.
    ///
    /// The first malformed token aborts the conversion.
    pub fn convert<S: AsRef<str>>(&self, tokens: &[S]) -> Result<Vec<Event>, ParseError> {
        tracing::debug!(len = tokens.len(), "converting tokens");

        tokens
            .iter()
            .enumerate()
            .map(|(n, token)| self.convert_one(token.as_ref(), offset_at(n)))
            .collect()
    }

    /// Convert a single token into an event at `offset`
    pub fn convert_one(&self, token: &str, offset: f64) -> Result<Event, ParseError> {
        let event = match Token::parse(token)? {
            Token::Chord(pitches) => Event::Chord {
                notes: pitches
                    .into_iter()
                    .map(|pitch| ChordTone {
                        pitch,
                        instrument: self.instrument,
                    })
                    .collect(),
                offset,
            },
            Token::Note(pitch) => Event::Note {
                pitch,
                offset,
                instrument: self.instrument,
            },
        };

        tracing::trace!(token, offset, "converted");
        Ok(event)
    }
}
