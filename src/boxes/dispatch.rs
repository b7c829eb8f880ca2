//! Dataset-level parse/generate driving a codec over the filesystem.
//!
//! `parse` resolves a format name, expands the input path into the files
//! that make up the dataset, and assembles the image-id → records mapping.
//! `generate` is the mirror image. Single-file codecs see exactly one
//! read/write; multi-file codecs see one per image.

use std::fs;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use super::codec::{make_codec, Codec, CodecOptions, Dataset};
use crate::error::BoxportError;

/// Parses a dataset stored at `path` in the named format.
///
/// For multi-file formats, `path` may be a directory, a glob pattern, or a
/// printf-style `%d` sequence expression; `offset` and `stride` select
/// every `stride`-th file starting at `offset` from the expanded list.
/// Both are ignored for single-file formats.
pub fn parse(
    format: &str,
    path: &Path,
    stride: usize,
    offset: usize,
    options: &CodecOptions,
) -> Result<Dataset, BoxportError> {
    match make_codec(format, options)? {
        Codec::WholeDataset(codec) => {
            let content = fs::read(path)?;
            codec
                .deserialize(&content)
                .map_err(|err| err.in_file(path))
        }
        Codec::PerImage(codec) => {
            if stride == 0 {
                return Err(BoxportError::InvalidOption {
                    key: "stride".to_string(),
                    message: "stride must be at least 1".to_string(),
                });
            }

            let files = expand_input(path, codec.extension())?;
            let mut dataset = Dataset::new();

            for file in files.into_iter().skip(offset).step_by(stride) {
                let content = fs::read(&file)?;
                let records = codec
                    .deserialize(&content)
                    .map_err(|err| err.in_file(&file))?;
                dataset.insert(image_id_for(&file), records);
            }

            Ok(dataset)
        }
    }
}

/// Writes `dataset` to `path` in the named format.
///
/// Multi-file formats require `path` to be a directory: an existing
/// directory is used as-is, a missing one is created, and a path with a
/// filename suffix is rejected as a topology error. One file per image id
/// is written with the codec's extension.
pub fn generate(
    format: &str,
    dataset: &Dataset,
    path: &Path,
    options: &CodecOptions,
) -> Result<(), BoxportError> {
    match make_codec(format, options)? {
        Codec::WholeDataset(codec) => {
            let content = codec.serialize(dataset)?;
            fs::write(path, content)?;
            Ok(())
        }
        Codec::PerImage(codec) => {
            ensure_output_dir(path)?;

            for (image_id, records) in dataset {
                let content = codec.serialize(records)?;
                let file_path = path.join(format!("{}.{}", image_id, codec.extension()));
                if let Some(parent) = file_path.parent() {
                    fs::create_dir_all(parent)?;
                }
                fs::write(file_path, content)?;
            }

            Ok(())
        }
    }
}

/// Validates a multi-file output path, creating the directory if missing.
pub fn ensure_output_dir(path: &Path) -> Result<(), BoxportError> {
    if path.is_dir() {
        return Ok(());
    }
    if path.extension().is_some() {
        return Err(BoxportError::OutputNotDirectory {
            path: path.to_path_buf(),
        });
    }
    fs::create_dir_all(path)?;
    Ok(())
}

/// Expands a multi-file input path into an ordered list of files.
fn expand_input(path: &Path, extension: &str) -> Result<Vec<PathBuf>, BoxportError> {
    let files = if path.is_dir() {
        list_directory(path, extension)?
    } else {
        let pattern = path.to_string_lossy();
        if pattern.contains('%') {
            expand_sequence(&pattern)?
        } else if pattern.contains('*') || pattern.contains('?') || pattern.contains('[') {
            expand_glob(&pattern)?
        } else if path.is_file() {
            vec![path.to_path_buf()]
        } else {
            Vec::new()
        }
    };

    if files.is_empty() {
        return Err(BoxportError::NoInputFiles {
            path: path.to_path_buf(),
        });
    }

    Ok(files)
}

/// Non-recursive directory listing filtered by extension, sorted by name.
fn list_directory(dir: &Path, extension: &str) -> Result<Vec<PathBuf>, BoxportError> {
    let mut files = Vec::new();

    for entry in WalkDir::new(dir).min_depth(1).max_depth(1) {
        let entry = entry.map_err(|source| {
            BoxportError::Io(
                source
                    .into_io_error()
                    .unwrap_or_else(|| std::io::Error::other("directory traversal failed")),
            )
        })?;

        if entry.file_type().is_file() && has_extension(entry.path(), extension) {
            files.push(entry.path().to_path_buf());
        }
    }

    files.sort();
    Ok(files)
}

fn has_extension(path: &Path, extension: &str) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case(extension))
        .unwrap_or(false)
}

fn expand_glob(pattern: &str) -> Result<Vec<PathBuf>, BoxportError> {
    let paths = glob::glob(pattern).map_err(|source| BoxportError::GlobPattern {
        pattern: pattern.to_string(),
        source,
    })?;

    let mut files = Vec::new();
    for entry in paths {
        let file = entry.map_err(|err| BoxportError::Io(err.into_error()))?;
        if file.is_file() {
            files.push(file);
        }
    }

    files.sort();
    Ok(files)
}

/// Expands a `%d`-style sequence expression by probing indices from 0
/// until the first missing file.
fn expand_sequence(pattern: &str) -> Result<Vec<PathBuf>, BoxportError> {
    let mut files = Vec::new();

    for index in 0.. {
        let candidate = expand_sequence_token(pattern, index).ok_or_else(|| {
            BoxportError::InvalidOption {
                key: pattern.to_string(),
                message: "expected a %d or %0Nd sequence expression".to_string(),
            }
        })?;

        let candidate = PathBuf::from(candidate);
        if !candidate.is_file() {
            break;
        }
        files.push(candidate);
    }

    Ok(files)
}

/// Substitutes `index` into the first `%d` / `%0Nd` occurrence.
fn expand_sequence_token(pattern: &str, index: usize) -> Option<String> {
    let percent = pattern.find('%')?;
    let rest = &pattern[percent + 1..];

    let digits = rest.chars().take_while(|c| c.is_ascii_digit()).count();
    let (width_str, after) = rest.split_at(digits);
    let after = after.strip_prefix('d')?;

    let width: usize = if width_str.is_empty() {
        0
    } else {
        width_str.parse().ok()?
    };

    Some(format!(
        "{}{:0width$}{}",
        &pattern[..percent],
        index,
        after,
        width = width
    ))
}

fn image_id_for(file: &Path) -> String {
    file.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default()
}
