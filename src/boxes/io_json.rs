//! JSON rendition of the nested-document format.
//!
//! Identical document shape to [`io_yaml`](super::io_yaml), rendered as
//! pretty-printed JSON for tooling that prefers it.

use super::codec::{Codec, CodecOptions, Dataset, DatasetCodec};
use super::document::{
    annotations_to_document, detections_to_document, document_to_annotations,
    document_to_detections,
};
use crate::error::BoxportError;

/// Registry factory for the `anno-json` format.
pub fn anno_factory(_options: &CodecOptions) -> Result<Codec, BoxportError> {
    Ok(Codec::WholeDataset(Box::new(JsonAnnotationCodec)))
}

/// Registry factory for the `det-json` format.
pub fn det_factory(_options: &CodecOptions) -> Result<Codec, BoxportError> {
    Ok(Codec::WholeDataset(Box::new(JsonDetectionCodec)))
}

/// Ground-truth JSON codec.
pub struct JsonAnnotationCodec;

impl DatasetCodec for JsonAnnotationCodec {
    fn serialize(&self, dataset: &Dataset) -> Result<Vec<u8>, BoxportError> {
        let document = annotations_to_document(dataset);
        Ok(serde_json::to_vec_pretty(&document)?)
    }

    fn deserialize(&self, content: &[u8]) -> Result<Dataset, BoxportError> {
        let document = serde_json::from_slice(content)?;
        Ok(document_to_annotations(document))
    }
}

/// Prediction JSON codec.
pub struct JsonDetectionCodec;

impl DatasetCodec for JsonDetectionCodec {
    fn serialize(&self, dataset: &Dataset) -> Result<Vec<u8>, BoxportError> {
        let document = detections_to_document(dataset);
        Ok(serde_json::to_vec_pretty(&document)?)
    }

    fn deserialize(&self, content: &[u8]) -> Result<Dataset, BoxportError> {
        let document = serde_json::from_slice(content)?;
        Ok(document_to_detections(document))
    }
}
