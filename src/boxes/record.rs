//! Core record types for bounding-box annotations and detections.
//!
//! Every object instance in a dataset is either an [`Annotation`] (ground
//! truth) or a [`Detection`] (model prediction). Both embed the same
//! [`BoxGeometry`], and [`AnyBox`] is the closed union that flows through
//! datasets and codecs.
//!
//! # Design Principles
//!
//! 1. **Permissive Construction**: records allow "invalid" data to be
//!    represented (negative sizes, out-of-image coordinates), so that
//!    formats can round-trip malformed boxes rather than reject them.
//!
//! 2. **Derived flags**: `occluded`/`truncated` are accessors over the
//!    stored fractions, never independent state.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Geometric and identity fields shared by every record kind.
///
/// Coordinates are pixels with the origin at the top-left of the image.
/// Width and height may be negative; this layer does not reject malformed
/// boxes.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct BoxGeometry {
    /// Class label, empty when the instance is unlabeled.
    pub class_label: String,

    /// Optional track/object identity.
    pub object_id: Option<u64>,

    /// X coordinate of the top-left corner.
    pub x_top_left: f64,

    /// Y coordinate of the top-left corner.
    pub y_top_left: f64,

    /// Box width.
    pub width: f64,

    /// Box height.
    pub height: f64,
}

impl BoxGeometry {
    /// Creates a geometry with the given label and box.
    pub fn new(
        class_label: impl Into<String>,
        x_top_left: f64,
        y_top_left: f64,
        width: f64,
        height: f64,
    ) -> Self {
        Self {
            class_label: class_label.into(),
            object_id: None,
            x_top_left,
            y_top_left,
            width,
            height,
        }
    }

    /// X coordinate of the bottom-right corner.
    #[inline]
    pub fn x_bottom_right(&self) -> f64 {
        self.x_top_left + self.width
    }

    /// Y coordinate of the bottom-right corner.
    #[inline]
    pub fn y_bottom_right(&self) -> f64 {
        self.y_top_left + self.height
    }
}

impl fmt::Display for BoxGeometry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "'{}'", self.class_label)?;
        if let Some(id) = self.object_id {
            write!(f, " {}", id)?;
        }
        write!(
            f,
            ", [{}, {}, {}, {}]",
            self.x_top_left as i64, self.y_top_left as i64, self.width as i64, self.height as i64
        )
    }
}

/// A ground-truth record: one annotated object instance in one image.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Annotation {
    /// Shared geometric and identity fields.
    pub geometry: BoxGeometry,

    /// The instance is not actually visible/present in the image.
    pub lost: bool,

    /// The instance is considered difficult.
    pub difficult: bool,

    /// The instance should be ignored by consumers.
    pub ignore: bool,

    /// Fraction of the instance cut off by the image border.
    ///
    /// By convention in `[0, 1]`, but stored unclamped.
    pub truncated_fraction: f64,

    /// Fraction of the instance hidden behind other objects.
    ///
    /// By convention in `[0, 1]`, but stored unclamped.
    pub occluded_fraction: f64,

    /// X coordinate of the visible sub-region, independent of
    /// `occluded_fraction`.
    pub visible_x_top_left: f64,

    /// Y coordinate of the visible sub-region.
    pub visible_y_top_left: f64,

    /// Width of the visible sub-region.
    pub visible_width: f64,

    /// Height of the visible sub-region.
    pub visible_height: f64,
}

impl Annotation {
    /// Creates a fresh annotation with every field at its default.
    pub fn new() -> Self {
        Self::default()
    }

    /// Converts any record into an annotation.
    ///
    /// An annotation source yields a value-equal copy. A detection source
    /// contributes its geometry; every annotation-only field takes its
    /// default, so the result is not occluded.
    pub fn from_record(record: &AnyBox) -> Self {
        match record {
            AnyBox::Annotation(anno) => anno.clone(),
            AnyBox::Detection(det) => Self {
                geometry: det.geometry.clone(),
                ..Self::default()
            },
        }
    }

    /// Whether the instance is occluded at all.
    #[inline]
    pub fn occluded(&self) -> bool {
        self.occluded_fraction > 0.0
    }

    /// Marks the instance fully occluded (`true`) or unoccluded (`false`).
    pub fn set_occluded(&mut self, occluded: bool) {
        self.occluded_fraction = if occluded { 1.0 } else { 0.0 };
    }

    /// Whether the instance is truncated at all.
    #[inline]
    pub fn truncated(&self) -> bool {
        self.truncated_fraction > 0.0
    }

    /// Marks the instance fully truncated (`true`) or untruncated (`false`).
    pub fn set_truncated(&mut self, truncated: bool) {
        self.truncated_fraction = if truncated { 1.0 } else { 0.0 };
    }
}

impl fmt::Display for Annotation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Annotation {{{}", self.geometry)?;
        if self.difficult {
            write!(f, ", difficult")?;
        }
        if self.lost {
            write!(f, ", lost")?;
        }
        if self.ignore {
            write!(f, ", ignore")?;
        }
        if self.truncated() {
            write!(f, ", truncated {:.1}%", self.truncated_fraction * 100.0)?;
        }
        if self.occluded() {
            write!(f, ", occluded {:.1}%", self.occluded_fraction * 100.0)?;
        }
        write!(f, "}}")
    }
}

/// A prediction record: one detected object instance in one image.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Detection {
    /// Shared geometric and identity fields.
    pub geometry: BoxGeometry,

    /// Confidence score of the prediction, conceptually a probability.
    /// Not range-enforced at this layer.
    pub confidence: f64,
}

impl Detection {
    /// Creates a fresh detection with every field at its default.
    pub fn new() -> Self {
        Self::default()
    }

    /// Converts any record into a detection.
    ///
    /// A detection source yields a value-equal copy. An annotation source
    /// contributes its geometry and is treated as maximally confident
    /// (`confidence = 1.0`).
    pub fn from_record(record: &AnyBox) -> Self {
        match record {
            AnyBox::Detection(det) => det.clone(),
            AnyBox::Annotation(anno) => Self {
                geometry: anno.geometry.clone(),
                confidence: 1.0,
            },
        }
    }
}

impl fmt::Display for Detection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Detection {{{}, {:.1}%}}",
            self.geometry,
            self.confidence * 100.0
        )
    }
}

/// The closed union of record kinds stored in a dataset.
///
/// Codecs accept any variant on serialize (converting with
/// [`Annotation::from_record`] / [`Detection::from_record`] as needed) and
/// produce their declared variant on deserialize.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum AnyBox {
    /// A ground-truth annotation.
    Annotation(Annotation),
    /// A model prediction.
    Detection(Detection),
}

impl AnyBox {
    /// The shared geometric fields of either variant.
    pub fn geometry(&self) -> &BoxGeometry {
        match self {
            AnyBox::Annotation(anno) => &anno.geometry,
            AnyBox::Detection(det) => &det.geometry,
        }
    }

    /// Mutable access to the shared geometric fields.
    pub fn geometry_mut(&mut self) -> &mut BoxGeometry {
        match self {
            AnyBox::Annotation(anno) => &mut anno.geometry,
            AnyBox::Detection(det) => &mut det.geometry,
        }
    }
}

impl From<Annotation> for AnyBox {
    fn from(anno: Annotation) -> Self {
        AnyBox::Annotation(anno)
    }
}

impl From<Detection> for AnyBox {
    fn from(det: Detection) -> Self {
        AnyBox::Detection(det)
    }
}

impl fmt::Display for AnyBox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnyBox::Annotation(anno) => anno.fmt(f),
            AnyBox::Detection(det) => det.fmt(f),
        }
    }
}
