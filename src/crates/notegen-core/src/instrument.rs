//! Instrument tags attached to generated notes

use serde::Serialize;
use std::fmt;

/// A named instrument with its General MIDI program
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Instrument {
    pub name: &'static str,
    /// General MIDI program number (0-127)
    pub program: u8,
}

impl Instrument {
    /// The instrument every generated note is tagged with
    pub const GUITAR: Instrument = Instrument {
        name: "Guitar",
        program: 24,
    };
}

impl Default for Instrument {
    fn default() -> Self {
        Instrument::GUITAR
    }
}

impl fmt::Display for Instrument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_guitar() {
        let guitar = Instrument::default();
        assert_eq!(guitar, Instrument::GUITAR);
        assert_eq!(guitar.to_string(), "Guitar");
        assert_eq!(guitar.program, 24);
    }
}
