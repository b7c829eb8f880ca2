//! The format-codec contract and the static format registry.
//!
//! A codec is either per-image (one document per image, keyed by file stem)
//! or whole-dataset (the entire dataset in one document). The topology is
//! encoded structurally in [`Codec`], so the dispatcher never calls a
//! method a codec does not have.
//!
//! Adding a format means implementing one of the two traits and registering
//! a factory in [`FORMATS`]; the dispatcher itself never changes.

use std::collections::BTreeMap;

use super::record::AnyBox;
use super::{io_binary, io_darknet, io_json, io_yaml};
use crate::error::BoxportError;

/// A parsed dataset: image identifier to ordered record sequence.
pub type Dataset = BTreeMap<String, Vec<AnyBox>>;

/// A codec that stores one document per image.
pub trait ImageCodec {
    /// File extension (without dot) used for per-image documents.
    fn extension(&self) -> &'static str;

    /// Serializes the records of one image into one document.
    fn serialize(&self, records: &[AnyBox]) -> Result<Vec<u8>, BoxportError>;

    /// Deserializes one document into the records of one image.
    fn deserialize(&self, content: &[u8]) -> Result<Vec<AnyBox>, BoxportError>;
}

/// A codec that stores the whole dataset in one document.
pub trait DatasetCodec {
    /// Serializes the entire dataset mapping into one document.
    fn serialize(&self, dataset: &Dataset) -> Result<Vec<u8>, BoxportError>;

    /// Deserializes one document into the entire dataset mapping.
    fn deserialize(&self, content: &[u8]) -> Result<Dataset, BoxportError>;
}

/// A constructed codec with its topology.
pub enum Codec {
    /// One document per image (multi-file datasets).
    PerImage(Box<dyn ImageCodec>),
    /// One document for the whole dataset (single-file datasets).
    WholeDataset(Box<dyn DatasetCodec>),
}

impl std::fmt::Debug for Codec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Codec::PerImage(_) => f.write_str("Codec::PerImage(..)"),
            Codec::WholeDataset(_) => f.write_str("Codec::WholeDataset(..)"),
        }
    }
}

impl Codec {
    /// Whether this codec reads/writes one document per image.
    pub fn is_per_image(&self) -> bool {
        matches!(self, Codec::PerImage(_))
    }
}

/// Configuration options recognized by codec constructors.
///
/// Every codec draws from this fixed set; constructors validate their
/// required options eagerly, before any file I/O.
#[derive(Clone, Debug, Default)]
pub struct CodecOptions {
    /// Width of the images, for formats with relative coordinates.
    pub image_width: Option<f64>,

    /// Height of the images, for formats with relative coordinates.
    pub image_height: Option<f64>,

    /// Ordered class labels, for formats that store label indices.
    pub class_label_map: Option<Vec<String>>,
}

impl CodecOptions {
    /// Parses `KEY=VALUE` pairs as passed on the command line.
    ///
    /// `class_label_map` takes a comma-separated list. Unrecognized keys
    /// are rejected.
    pub fn from_kwargs(kwargs: &[String]) -> Result<Self, BoxportError> {
        let mut options = Self::default();

        for pair in kwargs {
            let (key, value) = pair.split_once('=').ok_or_else(|| {
                BoxportError::InvalidOption {
                    key: pair.clone(),
                    message: "expected KEY=VALUE".to_string(),
                }
            })?;

            match key {
                "image_width" => options.image_width = Some(parse_number(key, value)?),
                "image_height" => options.image_height = Some(parse_number(key, value)?),
                "class_label_map" => {
                    options.class_label_map =
                        Some(value.split(',').map(str::to_string).collect());
                }
                other => {
                    return Err(BoxportError::InvalidOption {
                        key: other.to_string(),
                        message: "unrecognized codec option".to_string(),
                    });
                }
            }
        }

        Ok(options)
    }
}

fn parse_number(key: &str, value: &str) -> Result<f64, BoxportError> {
    value
        .parse::<f64>()
        .map_err(|_| BoxportError::InvalidOption {
            key: key.to_string(),
            message: format!("'{value}' is not a number"),
        })
}

/// Constructs a codec for `options`, or fails fast on bad configuration.
pub type CodecFactory = fn(&CodecOptions) -> Result<Codec, BoxportError>;

/// The format registry: name to codec factory.
pub const FORMATS: &[(&str, CodecFactory)] = &[
    ("darknet", io_darknet::factory),
    ("anno-yaml", io_yaml::anno_factory),
    ("det-yaml", io_yaml::det_factory),
    ("anno-json", io_json::anno_factory),
    ("det-json", io_json::det_factory),
    ("binary", io_binary::factory),
];

/// Resolves a format name to a constructed codec.
pub fn make_codec(format: &str, options: &CodecOptions) -> Result<Codec, BoxportError> {
    FORMATS
        .iter()
        .find(|(name, _)| *name == format)
        .ok_or_else(|| BoxportError::UnknownFormat(format.to_string()))
        .and_then(|(_, factory)| factory(options))
}

/// The registered format names, in registry order.
pub fn format_names() -> Vec<&'static str> {
    FORMATS.iter().map(|(name, _)| *name).collect()
}
