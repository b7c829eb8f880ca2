//! Shared data model for the nested-document formats.
//!
//! The document shape is image id → class label → list of per-instance
//! entries. Label keys sort lexicographically, with the empty label stored
//! under the literal key `?`. Scalar fractions and confidences are stored
//! on a 0–100 percentage scale; reading divides by 100 without clamping,
//! so fractions above 1.0 survive a round trip.
//!
//! [`io_yaml`](super::io_yaml) and [`io_json`](super::io_json) render this
//! same model with different serializers.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::codec::Dataset;
use super::record::{Annotation, AnyBox, Detection};

/// Label key used for unlabeled instances.
const UNLABELED_KEY: &str = "?";

/// A whole-dataset document: image id → label → instances.
pub type Document<E> = BTreeMap<String, BTreeMap<String, Vec<E>>>;

/// One ground-truth instance in a document.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AnnotationEntry {
    /// `[x_top_left, y_top_left, width, height]` in pixels.
    pub coords: [f64; 4],
    pub difficult: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    pub lost: bool,
    /// Occluded fraction on the percentage scale.
    pub occluded_fraction: f64,
    /// Truncated fraction on the percentage scale.
    pub truncated_fraction: f64,
}

impl AnnotationEntry {
    /// Builds the `(label key, entry)` pair for one annotation.
    pub fn from_annotation(anno: &Annotation) -> (String, Self) {
        let entry = Self {
            coords: [
                anno.geometry.x_top_left,
                anno.geometry.y_top_left,
                anno.geometry.width,
                anno.geometry.height,
            ],
            difficult: anno.difficult,
            id: anno.geometry.object_id,
            lost: anno.lost,
            occluded_fraction: anno.occluded_fraction * 100.0,
            truncated_fraction: anno.truncated_fraction * 100.0,
        };
        (label_key(&anno.geometry.class_label), entry)
    }

    /// Rebuilds the annotation stored under `key`.
    pub fn into_annotation(self, key: &str) -> Annotation {
        let mut anno = Annotation::new();
        anno.geometry.class_label = key_label(key);
        anno.geometry.object_id = self.id;
        anno.geometry.x_top_left = self.coords[0];
        anno.geometry.y_top_left = self.coords[1];
        anno.geometry.width = self.coords[2];
        anno.geometry.height = self.coords[3];
        anno.difficult = self.difficult;
        anno.lost = self.lost;
        anno.occluded_fraction = self.occluded_fraction / 100.0;
        anno.truncated_fraction = self.truncated_fraction / 100.0;
        anno
    }
}

/// One prediction instance in a document.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DetectionEntry {
    /// `[x_top_left, y_top_left, width, height]` in pixels.
    pub coords: [f64; 4],
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    /// Confidence on the percentage scale.
    pub score: f64,
}

impl DetectionEntry {
    /// Builds the `(label key, entry)` pair for one detection.
    pub fn from_detection(det: &Detection) -> (String, Self) {
        let entry = Self {
            coords: [
                det.geometry.x_top_left,
                det.geometry.y_top_left,
                det.geometry.width,
                det.geometry.height,
            ],
            id: det.geometry.object_id,
            score: det.confidence * 100.0,
        };
        (label_key(&det.geometry.class_label), entry)
    }

    /// Rebuilds the detection stored under `key`.
    pub fn into_detection(self, key: &str) -> Detection {
        let mut det = Detection::new();
        det.geometry.class_label = key_label(key);
        det.geometry.object_id = self.id;
        det.geometry.x_top_left = self.coords[0];
        det.geometry.y_top_left = self.coords[1];
        det.geometry.width = self.coords[2];
        det.geometry.height = self.coords[3];
        det.confidence = self.score / 100.0;
        det
    }
}

fn label_key(class_label: &str) -> String {
    if class_label.is_empty() {
        UNLABELED_KEY.to_string()
    } else {
        class_label.to_string()
    }
}

fn key_label(key: &str) -> String {
    if key == UNLABELED_KEY {
        String::new()
    } else {
        key.to_string()
    }
}

/// Groups a dataset into an annotation document, converting records as
/// needed. Instance order within a label follows record order.
pub fn annotations_to_document(dataset: &Dataset) -> Document<AnnotationEntry> {
    let mut document = Document::new();
    for (image_id, records) in dataset {
        let image = document.entry(image_id.clone()).or_default();
        for record in records {
            let (key, entry) = AnnotationEntry::from_annotation(&Annotation::from_record(record));
            image.entry(key).or_default().push(entry);
        }
    }
    document
}

/// Flattens an annotation document back into a dataset. Records appear in
/// label-key order, preserving instance order within each label.
pub fn document_to_annotations(document: Document<AnnotationEntry>) -> Dataset {
    let mut dataset = Dataset::new();
    for (image_id, labels) in document {
        let records = labels
            .into_iter()
            .flat_map(|(key, entries)| {
                entries
                    .into_iter()
                    .map(move |entry| AnyBox::from(entry.into_annotation(&key)))
            })
            .collect();
        dataset.insert(image_id, records);
    }
    dataset
}

/// Groups a dataset into a detection document, converting records as
/// needed.
pub fn detections_to_document(dataset: &Dataset) -> Document<DetectionEntry> {
    let mut document = Document::new();
    for (image_id, records) in dataset {
        let image = document.entry(image_id.clone()).or_default();
        for record in records {
            let (key, entry) = DetectionEntry::from_detection(&Detection::from_record(record));
            image.entry(key).or_default().push(entry);
        }
    }
    document
}

/// Flattens a detection document back into a dataset.
pub fn document_to_detections(document: Document<DetectionEntry>) -> Dataset {
    let mut dataset = Dataset::new();
    for (image_id, labels) in document {
        let records = labels
            .into_iter()
            .flat_map(|(key, entries)| {
                entries
                    .into_iter()
                    .map(move |entry| AnyBox::from(entry.into_detection(&key)))
            })
            .collect();
        dataset.insert(image_id, records);
    }
    dataset
}
