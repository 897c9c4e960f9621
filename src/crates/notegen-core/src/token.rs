//! Token classification
//!
//! A token is either a note name (`"C4"`) or a chord of dot-separated pitch
//! identifiers (`"4.7.11"`). A token made only of digits with no dot is a
//! chord too: `"77"` becomes a single-tone chord rather than a note. That is
//! how the model's vocabulary has always been decoded, so it is kept as an
//! explicit rule here.

use serde::Serialize;

use crate::error::ParseError;
use crate::pitch::{NoteName, PitchId};

/// Which shape a token has, before any parsing of its contents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenKind {
    Chord,
    Note,
}

/// Classify a token. First matching rule wins:
/// contains `.` or is all digits -> chord, otherwise -> note.
pub fn classify(token: &str) -> TokenKind {
    let all_digits = !token.is_empty() && token.chars().all(|c| c.is_ascii_digit());
    if token.contains('.') || all_digits {
        TokenKind::Chord
    } else {
        TokenKind::Note
    }
}

/// A parsed token
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    Chord(Vec<PitchId>),
    Note(NoteName),
}

impl Token {
    /// Classify and parse a token string
    pub fn parse(token: &str) -> Result<Self, ParseError> {
        match classify(token) {
            TokenKind::Chord => token
                .split('.')
                .map(|segment| {
                    segment
                        .parse::<PitchId>()
                        .map_err(|_| ParseError::invalid_pitch_id(token, segment))
                })
                .collect::<Result<Vec<_>, _>>()
                .map(Token::Chord),
            TokenKind::Note => token.parse::<NoteName>().map(Token::Note),
        }
    }

    pub fn kind(&self) -> TokenKind {
        match self {
            Token::Chord(_) => TokenKind::Chord,
            Token::Note(_) => TokenKind::Note,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify() {
        assert_eq!(classify("4.7.11"), TokenKind::Chord);
        assert_eq!(classify("77"), TokenKind::Chord);
        assert_eq!(classify("4.x.5"), TokenKind::Chord);
        assert_eq!(classify("C4"), TokenKind::Note);
        assert_eq!(classify("B-3"), TokenKind::Note);
        assert_eq!(classify(""), TokenKind::Note);
    }

    #[test]
    fn test_parse_chord() {
        let token = Token::parse("4.7.11").unwrap();
        assert_eq!(
            token,
            Token::Chord(vec![PitchId(4), PitchId(7), PitchId(11)])
        );
        assert_eq!(token.kind(), TokenKind::Chord);
    }

    #[test]
    fn test_all_digit_token_is_single_tone_chord() {
        assert_eq!(Token::parse("77").unwrap(), Token::Chord(vec![PitchId(77)]));
    }

    #[test]
    fn test_bad_chord_segments() {
        assert_eq!(
            Token::parse("4.x.5").unwrap_err(),
            ParseError::invalid_pitch_id("4.x.5", "x")
        );
        assert_eq!(
            Token::parse("4..5").unwrap_err(),
            ParseError::invalid_pitch_id("4..5", "")
        );
    }

    #[test]
    fn test_chord_segments_ignore_padding_and_width() {
        assert_eq!(
            Token::parse("4. 7").unwrap(),
            Token::Chord(vec![PitchId(4), PitchId(7)])
        );
        assert_eq!(
            Token::parse("4.3000000000").unwrap(),
            Token::Chord(vec![PitchId(4), PitchId(3_000_000_000)])
        );
    }

    #[test]
    fn test_parse_note() {
        let token = Token::parse("C4").unwrap();
        assert_eq!(token.kind(), TokenKind::Note);
        assert!(matches!(token, Token::Note(name) if name.to_string() == "C4"));
    }

    #[test]
    fn test_empty_token_is_invalid_note() {
        assert_eq!(
            Token::parse("").unwrap_err(),
            ParseError::invalid_note_name("")
        );
    }
}
