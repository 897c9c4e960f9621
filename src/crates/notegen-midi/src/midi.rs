//! Standard MIDI File output
//!
//! Writes SMF format 1 with a tempo track and one instrument track. Event
//! offsets are in quarter notes; every note or chord tone sounds for
//! [`MidiConfig::note_length`] quarter notes. A key struck again while still
//! sounding is released at the new onset.

use midly::{
    num::{u15, u24, u28, u4, u7},
    Format, Header, MetaMessage, MidiMessage, Smf, Timing, Track, TrackEvent, TrackEventKind,
};
use std::collections::HashMap;
use std::path::Path;

use notegen_core::{Event, Instrument};

use crate::{MidiError, Result};

/// Ticks per quarter note in MIDI output
pub const TICKS_PER_QUARTER: u16 = 480;

const MAX_TEMPO_MICROS: u32 = 0x00FF_FFFF;

/// Largest delta time a track event can carry
const MAX_DELTA_TICKS: u64 = 0x0FFF_FFFF;

#[derive(Debug, Clone)]
pub struct MidiConfig {
    pub tempo_bpm: f64,
    /// Sounding length of each event, in quarter notes
    pub note_length: f64,
    pub velocity: u8,
    /// Zero-based MIDI channel
    pub channel: u8,
}

impl Default for MidiConfig {
    fn default() -> Self {
        Self {
            tempo_bpm: 120.0,
            note_length: 1.0,
            velocity: 90,
            channel: 0,
        }
    }
}

/// A single sounding key, in ticks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Sounding {
    start: u64,
    end: u64,
    key: u8,
}

fn quarters_to_ticks(quarters: f64) -> u64 {
    (quarters * TICKS_PER_QUARTER as f64).round().max(0.0) as u64
}

/// Render events to SMF bytes
pub fn write_midi(events: &[Event], config: &MidiConfig) -> Result<Vec<u8>> {
    let smf = events_to_smf(events, config)?;
    let mut buf = Vec::new();
    smf.write_std(&mut buf).map_err(MidiError::Write)?;

    tracing::debug!(events = events.len(), bytes = buf.len(), "wrote MIDI data");
    Ok(buf)
}

/// Render events and write them to `path`
pub fn write_midi_file(events: &[Event], path: &Path, config: &MidiConfig) -> Result<()> {
    let bytes = write_midi(events, config)?;
    std::fs::write(path, bytes).map_err(|source| MidiError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn events_to_smf(events: &[Event], config: &MidiConfig) -> Result<Smf<'static>> {
    if !(config.tempo_bpm.is_finite() && config.tempo_bpm > 0.0) {
        return Err(MidiError::InvalidTempo(config.tempo_bpm));
    }
    if !(config.note_length.is_finite() && config.note_length > 0.0) {
        return Err(MidiError::InvalidNoteLength(config.note_length));
    }

    let mut smf = Smf::new(Header::new(
        Format::Parallel,
        Timing::Metrical(u15::new(TICKS_PER_QUARTER)),
    ));

    // Track 0: tempo
    let tempo_micros = ((60_000_000.0 / config.tempo_bpm).round() as u32).clamp(1, MAX_TEMPO_MICROS);
    smf.tracks.push(vec![
        TrackEvent {
            delta: u28::new(0),
            kind: TrackEventKind::Meta(MetaMessage::Tempo(u24::new(tempo_micros))),
        },
        TrackEvent {
            delta: u28::new(0),
            kind: TrackEventKind::Meta(MetaMessage::EndOfTrack),
        },
    ]);

    let instrument = events
        .iter()
        .find_map(Event::instrument)
        .unwrap_or_default();
    let sounding = collect_sounding(events, config)?;
    smf.tracks.push(instrument_track(instrument, &sounding, config)?);

    Ok(smf)
}

fn collect_sounding(events: &[Event], config: &MidiConfig) -> Result<Vec<Sounding>> {
    let length = quarters_to_ticks(config.note_length).max(1);

    let mut onsets: Vec<(u64, u8)> = Vec::new();
    for (idx, event) in events.iter().enumerate() {
        let keys = event.midi_keys().ok_or_else(|| MidiError::PitchOutOfRange {
            event: idx,
            pitch: event.to_string(),
        })?;
        let start = quarters_to_ticks(event.offset());
        onsets.extend(keys.into_iter().map(|key| (start, key)));
    }
    onsets.sort_unstable();
    onsets.dedup();

    // Walk backwards so each onset knows when its key is next struck
    let mut next_strike: HashMap<u8, u64> = HashMap::new();
    let mut sounding: Vec<Sounding> = onsets
        .iter()
        .rev()
        .map(|&(start, key)| {
            let mut end = start.saturating_add(length);
            if let Some(&next) = next_strike.get(&key) {
                end = end.min(next);
            }
            next_strike.insert(key, start);
            Sounding { start, end, key }
        })
        .collect();
    sounding.reverse();

    Ok(sounding)
}

fn instrument_track(
    instrument: Instrument,
    sounding: &[Sounding],
    config: &MidiConfig,
) -> Result<Track<'static>> {
    let channel = u4::new(config.channel.min(15));
    let velocity = u7::new(config.velocity.min(127));

    let mut track: Track<'static> = vec![
        TrackEvent {
            delta: u28::new(0),
            kind: TrackEventKind::Meta(MetaMessage::TrackName(instrument.name.as_bytes())),
        },
        TrackEvent {
            delta: u28::new(0),
            kind: TrackEventKind::Midi {
                channel,
                message: MidiMessage::ProgramChange {
                    program: u7::new(instrument.program.min(127)),
                },
            },
        },
    ];

    // (tick, is_on, key): note-offs sort before note-ons at the same tick
    let mut messages: Vec<(u64, bool, u8)> = sounding
        .iter()
        .flat_map(|s| [(s.start, true, s.key), (s.end, false, s.key)])
        .collect();
    messages.sort_unstable();

    let mut last_tick = 0;
    for (tick, is_on, key) in messages {
        let key = u7::new(key);
        let message = if is_on {
            MidiMessage::NoteOn { key, vel: velocity }
        } else {
            MidiMessage::NoteOff { key, vel: u7::new(0) }
        };
        let delta = tick - last_tick;
        if delta > MAX_DELTA_TICKS {
            return Err(MidiError::DeltaOverflow { tick: last_tick, delta });
        }
        track.push(TrackEvent {
            delta: u28::new(delta as u32),
            kind: TrackEventKind::Midi { channel, message },
        });
        last_tick = tick;
    }

    track.push(TrackEvent {
        delta: u28::new(0),
        kind: TrackEventKind::Meta(MetaMessage::EndOfTrack),
    });
    Ok(track)
}
