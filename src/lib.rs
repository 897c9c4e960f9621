//! notegen: turn model class indices into note/chord events
//!
//! Ties [`notegen_core`] (decoding and conversion) to [`notegen_midi`]
//! (serialization) and provides the input readers used by the CLI.

pub mod input;
pub mod pipeline;

pub use notegen_core::{Event, MappingTable, TokenConverter};
pub use pipeline::{Pipeline, PipelineError};
