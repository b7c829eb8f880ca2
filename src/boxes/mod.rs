//! Bounding-box records, format codecs, and dataset dispatch.
//!
//! This module is the heart of boxport: the canonical record types that
//! every format converts through, the codec contract with its two
//! topologies, and the `parse`/`generate` pair that drives a codec over a
//! whole dataset on disk.
//!
//! # Design Principles
//!
//! 1. **One canonical model**: codecs convert to and from [`AnyBox`]
//!    records; formats never talk to each other directly.
//!
//! 2. **Topology in the type**: per-image and whole-dataset codecs
//!    implement different traits, so the dispatcher cannot call the wrong
//!    shape.
//!
//! 3. **Fail fast, fail hard**: codec options are validated at
//!    construction, before any I/O, and a malformed record anywhere aborts
//!    the whole parse.
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//! use boxport::boxes::{parse, generate, CodecOptions};
//!
//! let options = CodecOptions {
//!     image_width: Some(1000.0),
//!     image_height: Some(500.0),
//!     class_label_map: Some(vec!["person".into(), "car".into()]),
//! };
//!
//! let dataset = parse("darknet", Path::new("labels/"), 1, 0, &options)?;
//! generate("anno-yaml", &dataset, Path::new("annotations.yaml"), &options)?;
//! # Ok::<(), boxport::BoxportError>(())
//! ```

pub mod codec;
pub mod dispatch;
pub mod document;
pub mod filters;
pub mod io_binary;
pub mod io_darknet;
pub mod io_json;
pub mod io_yaml;
pub mod record;

// Re-export core types for convenient access
pub use codec::{format_names, make_codec, Codec, CodecOptions, Dataset, DatasetCodec, ImageCodec};
pub use dispatch::{generate, parse};
pub use filters::{ImageBoundsFilter, OcclusionAreaFilter};
pub use record::{Annotation, AnyBox, BoxGeometry, Detection};
