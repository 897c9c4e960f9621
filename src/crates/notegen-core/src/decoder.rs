//! Maps model class indices to token strings

use crate::error::DecodeError;
use crate::table::MappingTable;

/// Looks up each index in a borrowed [`MappingTable`]
#[derive(Debug, Clone, Copy)]
pub struct IndexDecoder<'a> {
    table: &'a MappingTable,
}

impl<'a> IndexDecoder<'a> {
    pub fn new(table: &'a MappingTable) -> Self {
        Self { table }
    }

    pub fn table(&self) -> &'a MappingTable {
        self.table
    }

    /// Look up a single index
    pub fn decode_one(&self, index: i64) -> Result<&'a str, DecodeError> {
        self.lookup(index, 0)
    }

    /// Decode a sequence of indices, preserving order and length.
    ///
    /// The first index missing from the table aborts the whole call.
    pub fn decode(&self, indices: &[i64]) -> Result<Vec<String>, DecodeError> {
        tracing::debug!(len = indices.len(), "decoding index sequence");

        indices
            .iter()
            .enumerate()
            .map(|(position, &index)| self.lookup(index, position).map(str::to_string))
            .collect()
    }

    fn lookup(&self, index: i64, position: usize) -> Result<&'a str, DecodeError> {
        let token = self
            .table
            .get(index)
            .ok_or(DecodeError::KeyNotFound { index, position })?;
        tracing::trace!(index, token, "decoded");
        Ok(token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn table() -> MappingTable {
        MappingTable::from_arrays(
            vec![0, 1, 2, 3],
            vec!["4.7.11".into(), "C4".into(), "77".into(), "E-5".into()],
        )
        .unwrap()
    }

    #[test]
    fn test_decode_in_order() {
        let table = table();
        let decoder = IndexDecoder::new(&table);
        assert_eq!(
            decoder.decode(&[1, 0, 1, 3]).unwrap(),
            vec!["C4", "4.7.11", "C4", "E-5"]
        );
    }

    #[test]
    fn test_decode_empty() {
        let table = table();
        assert!(IndexDecoder::new(&table).decode(&[]).unwrap().is_empty());
    }

    #[test]
    fn test_missing_key() {
        let table = table();
        let err = IndexDecoder::new(&table).decode(&[0, 1, 9, 2]).unwrap_err();
        assert_eq!(
            err,
            DecodeError::KeyNotFound {
                index: 9,
                position: 2
            }
        );
    }

    #[test]
    fn test_decode_one() {
        let table = table();
        let decoder = IndexDecoder::new(&table);
        assert_eq!(decoder.decode_one(2), Ok("77"));
        assert!(decoder.decode_one(-1).is_err());
    }

    proptest! {
        #[test]
        fn decode_matches_table(indices in proptest::collection::vec(0i64..4, 0..64)) {
            let table = table();
            let decoded = IndexDecoder::new(&table).decode(&indices).unwrap();
            prop_assert_eq!(decoded.len(), indices.len());
            for (token, index) in decoded.iter().zip(&indices) {
                prop_assert_eq!(Some(token.as_str()), table.get(*index));
            }
        }
    }
}
