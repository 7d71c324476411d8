use std::collections::BTreeMap;

use image::imageops::FilterType;

use super::model::ImageShape;
use crate::error::{DatasetError, Result};

// ---------------------------------------------------------------------------
// Loaded feature types
// ---------------------------------------------------------------------------

/// A decoded image resized to a fixed shape.
///
/// `pixels` is row-major RGB, `width * height * 3` values in `[0, 1]`.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageTensor {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<f32>,
}

/// One-hot encoded labels. `classes[i]` is the class of column `i`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OneHot {
    pub classes: Vec<String>,
    pub rows: Vec<Vec<f32>>,
}

// ---------------------------------------------------------------------------
// RawLoader – turns paths and labels into model inputs
// ---------------------------------------------------------------------------

/// Loads raw samples for training. Must be deterministic for the same input.
pub trait RawLoader: Send + Sync {
    fn load_images(&self, paths: &[String], shape: ImageShape) -> Result<Vec<ImageTensor>>;

    fn one_hot_encode(&self, labels: &[String]) -> OneHot {
        one_hot_encode(labels)
    }
}

/// Default loader backed by the `image` crate.
#[derive(Debug, Clone, Copy, Default)]
pub struct ImageFileLoader;

impl RawLoader for ImageFileLoader {
    fn load_images(&self, paths: &[String], shape: ImageShape) -> Result<Vec<ImageTensor>> {
        paths.iter().map(|path| load_image(path, shape)).collect()
    }
}

fn load_image(path: &str, shape: ImageShape) -> Result<ImageTensor> {
    let img = image::open(path).map_err(|source| DatasetError::Image {
        path: path.to_string(),
        source,
    })?;
    let rgb = img
        .resize_exact(shape.width, shape.height, FilterType::Triangle)
        .to_rgb8();

    Ok(ImageTensor {
        width: shape.width,
        height: shape.height,
        pixels: rgb.as_raw().iter().map(|&v| f32::from(v) / 255.0).collect(),
    })
}

/// Classes are ordered lexicographically, so the encoding depends only on the
/// set of labels present.
pub fn one_hot_encode(labels: &[String]) -> OneHot {
    let index: BTreeMap<&str, usize> = {
        let mut classes: Vec<&str> = labels.iter().map(String::as_str).collect();
        classes.sort_unstable();
        classes.dedup();
        classes.into_iter().enumerate().map(|(i, c)| (c, i)).collect()
    };

    let rows = labels
        .iter()
        .map(|label| {
            let mut row = vec![0.0; index.len()];
            if let Some(&i) = index.get(label.as_str()) {
                row[i] = 1.0;
            }
            row
        })
        .collect();

    OneHot {
        classes: index.keys().map(|c| c.to_string()).collect(),
        rows,
    }
}
