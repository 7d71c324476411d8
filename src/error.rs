use std::path::PathBuf;

use thiserror::Error;

/// Everything that can go wrong while loading, scanning or persisting a dataset.
///
/// All of these are configuration or input problems surfaced to the caller at
/// startup/scan time. Nothing here is transient, so nothing is retried.
#[derive(Debug, Error)]
pub enum DatasetError {
    /// The judgements file header does not match the data type's column set.
    #[error("judgements file {path} has columns {found:?}, expected {expected:?}")]
    Schema {
        path: PathBuf,
        expected: Vec<String>,
        found: Vec<String>,
    },

    /// The scan found no file matching the data type's patterns.
    #[error("no {patterns} files found in {directory}. Probably pointing at a wrong directory?")]
    EmptyDirectory { directory: PathBuf, patterns: String },

    /// `data_type` is not one of `images`, `text`, `object_detection`.
    #[error("unsupported data type: {0:?}")]
    UnsupportedDataType(String),

    /// A label was submitted for a path the scanner never produced.
    #[error("no sample with path {0:?} in the dataset")]
    UnknownPath(String),

    /// A row of the judgements file could not be interpreted.
    #[error("judgements row {row}: {reason}")]
    InvalidRecord { row: usize, reason: String },

    /// A scan pattern could not be compiled.
    #[error(transparent)]
    Pattern(#[from] glob::PatternError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error("failed to load image {path}: {source}")]
    Image {
        path: String,
        source: image::ImageError,
    },
}

pub type Result<T> = std::result::Result<T, DatasetError>;
