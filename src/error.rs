use std::path::PathBuf;
use thiserror::Error;

/// The main error type for boxport operations.
#[derive(Debug, Error)]
pub enum BoxportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Unknown format: {0}")]
    UnknownFormat(String),

    #[error("{format} codec requires the '{option}' option")]
    MissingOption {
        format: &'static str,
        option: &'static str,
    },

    #[error("Invalid option '{key}': {message}")]
    InvalidOption { key: String, message: String },

    #[error("Class label '{label}' is not in the class label map")]
    LabelNotInMap { label: String },

    #[error("Class label '{label}' is not a base-10 integer and no class label map was given")]
    InvalidLabel { label: String },

    #[error("Malformed record on line {line}: {message}")]
    MalformedLine { line: usize, message: String },

    #[error("Input is not valid UTF-8")]
    NotUtf8,

    #[error("Failed to parse {path}: {source}")]
    ParseFile {
        path: PathBuf,
        #[source]
        source: Box<BoxportError>,
    },

    #[error("YAML codec error: {0}")]
    YamlCodec(#[from] serde_yaml::Error),

    #[error("JSON codec error: {0}")]
    JsonCodec(#[from] serde_json::Error),

    #[error("Binary codec error: {0}")]
    BinaryCodec(#[from] bincode::Error),

    #[error("Invalid glob pattern '{pattern}': {source}")]
    GlobPattern {
        pattern: String,
        #[source]
        source: glob::PatternError,
    },

    #[error("Multi-file format requires a directory output path, got {path}")]
    OutputNotDirectory { path: PathBuf },

    #[error("No input files found for '{path}'")]
    NoInputFiles { path: PathBuf },
}

impl BoxportError {
    /// Attaches the file being processed to a codec-level error.
    pub(crate) fn in_file(self, path: impl Into<PathBuf>) -> Self {
        BoxportError::ParseFile {
            path: path.into(),
            source: Box::new(self),
        }
    }
}
