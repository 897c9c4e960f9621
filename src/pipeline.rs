//! Decode-then-convert pipeline
//!
//! Composes the index decoder and token converter over one borrowed table.

use notegen_core::{DecodeError, Event, IndexDecoder, MappingTable, ParseError, TokenConverter};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PipelineError {
    #[error(transparent)]
    Decode(#[from] DecodeError),

    #[error(transparent)]
    Parse(#[from] ParseError),
}

pub struct Pipeline<'a> {
    decoder: IndexDecoder<'a>,
    converter: TokenConverter,
}

impl<'a> Pipeline<'a> {
    pub fn new(table: &'a MappingTable) -> Self {
        Self {
            decoder: IndexDecoder::new(table),
            converter: TokenConverter::new(),
        }
    }

    /// Decode indices into tokens only
    pub fn tokens(&self, indices: &[i64]) -> Result<Vec<String>, PipelineError> {
        Ok(self.decoder.decode(indices)?)
    }

    /// Decode indices and convert the tokens to events
    pub fn run(&self, indices: &[i64]) -> Result<Vec<Event>, PipelineError> {
        let tokens = self.decoder.decode(indices)?;
        let events = self.converter.convert(&tokens)?;
        tracing::debug!(events = events.len(), "pipeline finished");
        Ok(events)
    }
}
