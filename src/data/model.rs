use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::DatasetError;

// ---------------------------------------------------------------------------
// Stage – which bucket a labelled sample belongs to
// ---------------------------------------------------------------------------

/// Lifecycle bucket of a judgement.
///
/// `Train` and `Test` are human judgements; `ModelLabelled` marks a label
/// that came from a model and has not been verified.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Stage {
    Train,
    Test,
    ModelLabelled,
}

impl Stage {
    pub fn as_str(self) -> &'static str {
        match self {
            Stage::Train => "TRAIN",
            Stage::Test => "TEST",
            Stage::ModelLabelled => "MODEL_LABELLED",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Stage {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "TRAIN" => Ok(Stage::Train),
            "TEST" => Ok(Stage::Test),
            "MODEL_LABELLED" => Ok(Stage::ModelLabelled),
            other => Err(format!("unknown stage {other:?}")),
        }
    }
}

// ---------------------------------------------------------------------------
// DataType – the closed set of dataset kinds
// ---------------------------------------------------------------------------

/// The kind of samples a dataset holds. Each variant carries its own
/// judgements-file schema and scan patterns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DataType {
    Images,
    Text,
    ObjectDetection,
}

const IMAGE_COLUMNS: &[&str] = &["label", "labelled_by", "path", "labelled", "stage"];
const TEXT_COLUMNS: &[&str] = &["label", "labelled_by", "path", "labelled", "stage", "text"];

const IMAGE_EXTENSIONS: &[&str] = &["jpg", "png"];
const TEXT_EXTENSIONS: &[&str] = &["txt"];

impl DataType {
    /// Parse the `data_type` configuration string.
    pub fn parse(s: &str) -> Result<Self, DatasetError> {
        match s {
            "images" | "image" => Ok(DataType::Images),
            "text" => Ok(DataType::Text),
            "object_detection" => Ok(DataType::ObjectDetection),
            other => Err(DatasetError::UnsupportedDataType(other.to_string())),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            DataType::Images => "images",
            DataType::Text => "text",
            DataType::ObjectDetection => "object_detection",
        }
    }

    /// Column set of the judgements file, in write order.
    pub fn columns(self) -> &'static [&'static str] {
        match self {
            DataType::Images | DataType::ObjectDetection => IMAGE_COLUMNS,
            DataType::Text => TEXT_COLUMNS,
        }
    }

    /// File extensions picked up by the unlabelled scan (`*.ext`).
    pub fn extensions(self) -> &'static [&'static str] {
        match self {
            DataType::Images | DataType::ObjectDetection => IMAGE_EXTENSIONS,
            DataType::Text => TEXT_EXTENSIONS,
        }
    }

    /// Whether the scan reads file contents into [`JudgementRecord::text`].
    pub fn carries_text(self) -> bool {
        matches!(self, DataType::Text)
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DataType {
    type Err = DatasetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DataType::parse(s)
    }
}

// ---------------------------------------------------------------------------
// JudgementRecord – one known sample
// ---------------------------------------------------------------------------

/// The label half of a record. Present only once a sample is labelled, so a
/// record is either fully labelled or fully unlabelled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Judgement {
    /// Opaque payload: a class string, a text label or a serialized box list.
    pub label: String,
    pub stage: Stage,
    pub labelled_by: String,
}

/// One row of the dataset, keyed by `path`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JudgementRecord {
    pub path: String,
    pub judgement: Option<Judgement>,
    /// Sample contents, only for text datasets.
    pub text: Option<String>,
}

impl JudgementRecord {
    pub fn unlabelled(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            judgement: None,
            text: None,
        }
    }

    pub fn is_labelled(&self) -> bool {
        self.judgement.is_some()
    }

    pub fn stage(&self) -> Option<Stage> {
        self.judgement.as_ref().map(|j| j.stage)
    }

    pub fn label(&self) -> Option<&str> {
        self.judgement.as_ref().map(|j| j.label.as_str())
    }
}

// ---------------------------------------------------------------------------
// Stats
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct LabelledStats {
    pub total: usize,
    pub train: usize,
    pub model_labelled: usize,
    pub test: usize,
}

/// Counts reported by [`crate::Dataset::stats`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Stats {
    pub labelled: LabelledStats,
    pub unlabelled: usize,
}

// ---------------------------------------------------------------------------
// ImageShape
// ---------------------------------------------------------------------------

/// Target size images are resized to before they are handed to a model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageShape {
    pub width: u32,
    pub height: u32,
}

impl Default for ImageShape {
    fn default() -> Self {
        Self {
            width: 128,
            height: 128,
        }
    }
}
