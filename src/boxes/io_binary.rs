//! Binary passthrough: the whole dataset as one opaque blob.
//!
//! The dataset mapping is serialized with bincode, both record variants
//! with full field fidelity. There is no schema validation; round-trip
//! fidelity is the only contract. Useful as a fast cache between runs of
//! the same tooling.

use super::codec::{Codec, CodecOptions, Dataset, DatasetCodec};
use crate::error::BoxportError;

/// Registry factory for the `binary` format.
pub fn factory(_options: &CodecOptions) -> Result<Codec, BoxportError> {
    Ok(Codec::WholeDataset(Box::new(BinaryCodec)))
}

/// Whole-dataset bincode codec.
pub struct BinaryCodec;

impl DatasetCodec for BinaryCodec {
    fn serialize(&self, dataset: &Dataset) -> Result<Vec<u8>, BoxportError> {
        Ok(bincode::serialize(dataset)?)
    }

    fn deserialize(&self, content: &[u8]) -> Result<Dataset, BoxportError> {
        Ok(bincode::deserialize(content)?)
    }
}
