//! Pitch identifiers and note names
//!
//! Chord tokens carry integer pitch identifiers. Identifiers `0..=11` are
//! pitch classes sounding in the implicit octave; anything else is read as a
//! MIDI key number. Note tokens carry names such as `C4`, `F#3` or `B-2`
//! (`-` is a flat, as is a `b` following the letter).

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ParseError;

/// Octave used when a name or pitch class carries none
pub const IMPLICIT_OCTAVE: i32 = 4;

const MAX_ACCIDENTALS: usize = 3;

/// Semitone offset of each natural letter from C
fn letter_semitone(letter: char) -> Option<i32> {
    match letter {
        'C' => Some(0),
        'D' => Some(2),
        'E' => Some(4),
        'F' => Some(5),
        'G' => Some(7),
        'A' => Some(9),
        'B' => Some(11),
        _ => None,
    }
}

/// Integer pitch identifier from a chord token segment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PitchId(pub i64);

impl PitchId {
    /// Whether the identifier is a bare pitch class
    pub fn is_pitch_class(self) -> bool {
        (0..12).contains(&self.0)
    }

    /// Resolve to a MIDI key number, if it falls in `0..=127`
    pub fn to_midi(self) -> Option<u8> {
        let key = if self.is_pitch_class() {
            i64::from(IMPLICIT_OCTAVE + 1) * 12 + self.0
        } else {
            self.0
        };
        u8::try_from(key).ok().filter(|k| *k <= 127)
    }
}

impl FromStr for PitchId {
    type Err = std::num::ParseIntError;

    /// Surrounding whitespace is ignored
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse::<i64>().map(PitchId)
    }
}

impl fmt::Display for PitchId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Parsed note name: letter, accidental and optional octave
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NoteName {
    /// Upper-case letter `A`..=`G`
    pub letter: char,
    /// Semitones of alteration, positive for sharps
    pub alter: i8,
    /// Explicit octave, if the name carried one
    pub octave: Option<i32>,
}

impl NoteName {
    /// Octave the note sounds in
    pub fn effective_octave(&self) -> i32 {
        self.octave.unwrap_or(IMPLICIT_OCTAVE)
    }

    /// MIDI key number, if it falls in `0..=127`
    pub fn to_midi(&self) -> Option<u8> {
        let base = letter_semitone(self.letter)?;
        let key = (self.effective_octave() + 1) * 12 + base + i32::from(self.alter);
        u8::try_from(key).ok().filter(|k| *k <= 127)
    }
}

impl FromStr for NoteName {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ParseError::invalid_note_name(s);

        let mut chars = s.chars();
        let letter = chars
            .next()
            .map(|c| c.to_ascii_uppercase())
            .filter(|c| letter_semitone(*c).is_some())
            .ok_or_else(invalid)?;

        let rest = chars.as_str();
        let accidentals_end = rest
            .find(|c: char| !matches!(c, '#' | '-' | 'b'))
            .unwrap_or(rest.len());
        let (accidentals, octave) = rest.split_at(accidentals_end);

        if accidentals.len() > MAX_ACCIDENTALS {
            return Err(invalid());
        }
        let sharps = accidentals.chars().filter(|c| *c == '#').count();
        if sharps != 0 && sharps != accidentals.len() {
            return Err(invalid());
        }
        let alter = if sharps > 0 {
            sharps as i8
        } else {
            -(accidentals.len() as i8)
        };

        let octave = if octave.is_empty() {
            None
        } else if octave.chars().all(|c| c.is_ascii_digit()) {
            Some(octave.parse::<i32>().map_err(|_| invalid())?)
        } else {
            return Err(invalid());
        };

        Ok(NoteName {
            letter,
            alter,
            octave,
        })
    }
}

impl fmt::Display for NoteName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter)?;
        let accidental = if self.alter >= 0 { "#" } else { "-" };
        for _ in 0..self.alter.unsigned_abs() {
            f.write_str(accidental)?;
        }
        if let Some(octave) = self.octave {
            write!(f, "{}", octave)?;
        }
        Ok(())
    }
}

impl Serialize for NoteName {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for NoteName {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_note_names() {
        let c4: NoteName = "C4".parse().unwrap();
        assert_eq!(c4.to_midi(), Some(60));
        assert_eq!(c4.to_string(), "C4");

        let f_sharp: NoteName = "F#3".parse().unwrap();
        assert_eq!(f_sharp.alter, 1);
        assert_eq!(f_sharp.to_midi(), Some(54));

        let b_flat: NoteName = "B-2".parse().unwrap();
        assert_eq!(b_flat.to_midi(), Some(46));
        assert_eq!(b_flat.to_string(), "B-2");

        let e_flat: NoteName = "eb5".parse().unwrap();
        assert_eq!(e_flat.to_string(), "E-5");
        assert_eq!(e_flat.to_midi(), Some(75));
    }

    #[test]
    fn test_implicit_octave() {
        let a: NoteName = "A".parse().unwrap();
        assert_eq!(a.octave, None);
        assert_eq!(a.to_midi(), Some(69));
        assert_eq!(a.to_string(), "A");
    }

    #[test]
    fn test_invalid_note_names() {
        for bad in ["", "H4", "C4x", "C#-4", "C####4", "4C", "C 4"] {
            assert!(bad.parse::<NoteName>().is_err(), "{bad:?} should not parse");
        }
    }

    #[test]
    fn test_pitch_id_midi() {
        assert_eq!(PitchId(0).to_midi(), Some(60));
        assert_eq!(PitchId(11).to_midi(), Some(71));
        assert_eq!(PitchId(77).to_midi(), Some(77));
        assert_eq!(PitchId(128).to_midi(), None);
        assert_eq!(PitchId(-3).to_midi(), None);
        assert_eq!(PitchId(3_000_000_000).to_midi(), None);
    }

    #[test]
    fn test_pitch_id_parsing() {
        assert_eq!(" 7".parse::<PitchId>(), Ok(PitchId(7)));
        assert_eq!("11 ".parse::<PitchId>(), Ok(PitchId(11)));
        assert_eq!("3000000000".parse::<PitchId>(), Ok(PitchId(3_000_000_000)));
        assert!("x".parse::<PitchId>().is_err());
        assert!("".parse::<PitchId>().is_err());
        assert!(" ".parse::<PitchId>().is_err());
    }
}
