//! YAML rendition of the nested-document format.
//!
//! The whole dataset is one YAML document keyed by image id; see
//! [`document`](super::document) for the shape.

use super::codec::{Codec, CodecOptions, Dataset, DatasetCodec};
use super::document::{
    annotations_to_document, detections_to_document, document_to_annotations,
    document_to_detections,
};
use crate::error::BoxportError;

/// Registry factory for the `anno-yaml` format.
pub fn anno_factory(_options: &CodecOptions) -> Result<Codec, BoxportError> {
    Ok(Codec::WholeDataset(Box::new(YamlAnnotationCodec)))
}

/// Registry factory for the `det-yaml` format.
pub fn det_factory(_options: &CodecOptions) -> Result<Codec, BoxportError> {
    Ok(Codec::WholeDataset(Box::new(YamlDetectionCodec)))
}

/// Ground-truth YAML codec.
pub struct YamlAnnotationCodec;

impl DatasetCodec for YamlAnnotationCodec {
    fn serialize(&self, dataset: &Dataset) -> Result<Vec<u8>, BoxportError> {
        let document = annotations_to_document(dataset);
        Ok(serde_yaml::to_string(&document)?.into_bytes())
    }

    fn deserialize(&self, content: &[u8]) -> Result<Dataset, BoxportError> {
        let document = serde_yaml::from_slice(content)?;
        Ok(document_to_annotations(document))
    }
}

/// Prediction YAML codec.
pub struct YamlDetectionCodec;

impl DatasetCodec for YamlDetectionCodec {
    fn serialize(&self, dataset: &Dataset) -> Result<Vec<u8>, BoxportError> {
        let document = detections_to_document(dataset);
        Ok(serde_yaml::to_string(&document)?.into_bytes())
    }

    fn deserialize(&self, content: &[u8]) -> Result<Dataset, BoxportError> {
        let document = serde_yaml::from_slice(content)?;
        Ok(document_to_detections(document))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::boxes::record::{Annotation, AnyBox, Detection};

    fn anno_dataset() -> Dataset {
        let plain = Annotation::new();
        let mut person = Annotation::new();
        person.geometry.class_label = "person".to_string();
        person.geometry.object_id = Some(1);
        person.difficult = true;

        let mut dataset = Dataset::new();
        dataset.insert(
            "img_1".to_string(),
            vec![plain.clone().into(), person.into()],
        );
        dataset.insert(
            "img_2".to_string(),
            vec![plain.clone().into(), plain.clone().into(), plain.into()],
        );
        dataset
    }

    #[test]
    fn annotation_document_roundtrips() {
        let codec = YamlAnnotationCodec;
        let dataset = anno_dataset();

        let content = codec.serialize(&dataset).expect("serialize");
        let parsed = codec.deserialize(&content).expect("deserialize");

        assert_eq!(parsed.len(), 2);
        assert_eq!(parsed["img_2"].len(), 3);

        // Label keys sort lexicographically, '?' before 'person'.
        let AnyBox::Annotation(first) = &parsed["img_1"][0] else {
            panic!("annotation codec produces annotations");
        };
        assert_eq!(first.geometry.class_label, "");

        let AnyBox::Annotation(second) = &parsed["img_1"][1] else {
            panic!("annotation codec produces annotations");
        };
        assert_eq!(second.geometry.class_label, "person");
        assert_eq!(second.geometry.object_id, Some(1));
        assert!(second.difficult);
    }

    #[test]
    fn serialized_yaml_uses_sorted_sentinel_keys_and_percentages() {
        let mut anno = Annotation::new();
        anno.occluded_fraction = 0.7;

        let mut dataset = Dataset::new();
        dataset.insert("img_1".to_string(), vec![anno.into()]);

        let content = YamlAnnotationCodec.serialize(&dataset).expect("serialize");
        let text = String::from_utf8(content).expect("yaml is utf-8");
        assert!(text.contains("img_1"));
        assert!(text.contains("'?'"));
        assert!(text.contains("occluded_fraction: 70.0"));
    }

    #[test]
    fn detection_document_roundtrips() {
        let mut det = Detection::new();
        det.geometry.class_label = "person".to_string();
        det.geometry.object_id = Some(1);
        det.confidence = 0.9;

        let mut dataset = Dataset::new();
        dataset.insert(
            "img_1".to_string(),
            vec![Detection::new().into(), det.into()],
        );

        let codec = YamlDetectionCodec;
        let content = codec.serialize(&dataset).expect("serialize");
        let parsed = codec.deserialize(&content).expect("deserialize");

        let AnyBox::Detection(parsed_det) = &parsed["img_1"][1] else {
            panic!("detection codec produces detections");
        };
        assert_eq!(parsed_det.geometry.class_label, "person");
        assert_eq!(parsed_det.geometry.object_id, Some(1));
        assert!((parsed_det.confidence - 0.9).abs() < 1e-9);
    }

    #[test]
    fn annotations_convert_to_detection_document() {
        let mut anno = Annotation::new();
        anno.geometry.class_label = "person".to_string();

        let mut dataset = Dataset::new();
        dataset.insert("img_1".to_string(), vec![anno.into()]);

        let content = YamlDetectionCodec.serialize(&dataset).expect("serialize");
        let text = String::from_utf8(content).expect("yaml is utf-8");
        // Ground truth is treated as maximally confident.
        assert!(text.contains("score: 100.0"));
    }

    #[test]
    fn malformed_yaml_is_a_hard_error() {
        let err = YamlAnnotationCodec
            .deserialize(b"img_1: [not, a, document")
            .unwrap_err();
        assert!(matches!(err, BoxportError::YamlCodec(_)));
    }
}
