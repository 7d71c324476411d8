use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::data::model::{DataType, ImageShape};
use crate::error::Result;

/// Dataset configuration, usually read from a JSON file:
///
/// ```json
/// {
///   "data_type": "images",
///   "directory": "data/raw",
///   "judgements_file": "data/labels/judgements.csv",
///   "image_width": 64,
///   "image_height": 64
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// `images`, `text` or `object_detection`; validated by [`Config::data_type`].
    pub data_type: String,
    pub directory: PathBuf,
    pub judgements_file: PathBuf,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_width: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_height: Option<u32>,
}

impl Config {
    pub fn new(
        data_type: impl Into<String>,
        directory: impl Into<PathBuf>,
        judgements_file: impl Into<PathBuf>,
    ) -> Self {
        Self {
            data_type: data_type.into(),
            directory: directory.into(),
            judgements_file: judgements_file.into(),
            image_width: None,
            image_height: None,
        }
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&text)?)
    }

    pub fn data_type(&self) -> Result<DataType> {
        DataType::parse(&self.data_type)
    }

    /// Configured image size; 128×128 unless both dimensions are given and
    /// non-zero.
    pub fn image_shape(&self) -> ImageShape {
        match (self.image_width, self.image_height) {
            (Some(width), Some(height)) if width > 0 && height > 0 => ImageShape { width, height },
            _ => ImageShape::default(),
        }
    }
}
