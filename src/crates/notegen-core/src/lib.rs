//! Core conversions for generated music
//!
//! A sequence model emits class indices. This crate turns them back into
//! something playable in two steps:
//!
//! 1. [`IndexDecoder`] looks each index up in a [`MappingTable`] and yields
//!    symbolic tokens such as `"C4"` or `"4.7.11"`.
//! 2. [`TokenConverter`] turns tokens into [`Event`]s (notes or chords)
//!    spaced [`OFFSET_STEP`] quarter notes apart, all tagged as guitar.
//!
//! # Examples
//!
//! ```
//! use notegen_core::{IndexDecoder, MappingTable, TokenConverter};
//!
//! let table = MappingTable::from_arrays(
//!     vec![0, 1],
//!     vec!["4.7.11".to_string(), "C4".to_string()],
//! ).unwrap();
//!
//! let tokens = IndexDecoder::new(&table).decode(&[1, 0]).unwrap();
//! let events = TokenConverter::new().convert(&tokens).unwrap();
//! assert_eq!(events[1].offset(), 0.7);
//! ```

pub mod convert;
pub mod decoder;
pub mod error;
pub mod event;
pub mod instrument;
pub mod pitch;
pub mod table;
pub mod token;

pub use convert::{offset_at, TokenConverter, OFFSET_STEP};
pub use decoder::IndexDecoder;
pub use error::{DecodeError, ParseError, TableError};
pub use event::{ChordTone, Event};
pub use instrument::Instrument;
pub use pitch::{NoteName, PitchId};
pub use table::MappingTable;
pub use token::{classify, Token, TokenKind};
