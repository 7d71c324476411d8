//! Static choice of the model family that trains on a dataset.

use std::fmt;
use std::str::FromStr;

use log::{debug, warn};
use serde::Serialize;

use crate::data::model::{DataType, ImageShape};

/// How the labels of a labelling task are shaped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LabelType {
    Binary,
    /// Token sequences drawn from `valid_tokens`.
    Sequence { valid_tokens: Vec<String> },
    ObjectDetection,
    /// Any label type without a dedicated model.
    Other(String),
}

impl LabelType {
    pub fn as_str(&self) -> &str {
        match self {
            LabelType::Binary => "binary",
            LabelType::Sequence { .. } => "sequence",
            LabelType::ObjectDetection => "object_detection",
            LabelType::Other(name) => name,
        }
    }
}

impl FromStr for LabelType {
    type Err = std::convert::Infallible;

    /// Sequence labels parse with no tokens; attach them afterwards.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "binary" => LabelType::Binary,
            "sequence" => LabelType::Sequence {
                valid_tokens: Vec::new(),
            },
            "object_detection" => LabelType::ObjectDetection,
            other => LabelType::Other(other.to_string()),
        })
    }
}

/// Model family handed to the training pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ModelKind {
    Cnn { input_shape: ImageShape },
    Detector,
    Rnn,
    SequenceTagger {
        valid_outputs: Vec<String>,
        seq2seq: bool,
        character_mode: bool,
    },
    /// No-op model for unmatched combinations. A default, not a failure.
    Stub,
}

impl ModelKind {
    pub fn is_stub(&self) -> bool {
        matches!(self, ModelKind::Stub)
    }
}

impl fmt::Display for ModelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModelKind::Cnn { input_shape } => {
                write!(f, "cnn({}x{})", input_shape.width, input_shape.height)
            }
            ModelKind::Detector => f.write_str("detector"),
            ModelKind::Rnn => f.write_str("rnn"),
            ModelKind::SequenceTagger { valid_outputs, .. } => {
                write!(f, "sequence-tagger({} outputs)", valid_outputs.len())
            }
            ModelKind::Stub => f.write_str("stub"),
        }
    }
}

/// Map a (dataset type, label type) pair to a model family.
///
/// Never fails: combinations without a dedicated model get [`ModelKind::Stub`].
/// The CNN input shape is fixed at 128×128 regardless of dataset config.
pub fn select(data_type: DataType, label_type: &LabelType) -> ModelKind {
    let kind = match (data_type, label_type) {
        (DataType::Images, LabelType::Binary) => ModelKind::Cnn {
            input_shape: ImageShape::default(),
        },
        (DataType::ObjectDetection, LabelType::ObjectDetection) => ModelKind::Detector,
        (DataType::Text, LabelType::Binary) => ModelKind::Rnn,
        (DataType::Text, LabelType::Sequence { valid_tokens }) => ModelKind::SequenceTagger {
            valid_outputs: valid_tokens.clone(),
            seq2seq: false,
            character_mode: false,
        },
        _ => ModelKind::Stub,
    };

    if kind.is_stub() {
        warn!(
            "no model for {data_type} with {} labels, using stub",
            label_type.as_str()
        );
    } else {
        debug!("selected {kind} for {data_type}/{}", label_type.as_str());
    }
    kind
}
