//! JSON encoding of object-detection labels.
//!
//! A label is a JSON array of box objects with the keys `class_label`,
//! `object_id`, `x_top_left`, `y_top_left`, `width` and `height`.
//! `object_id` is written but never read back: decoded boxes always carry
//! `object_id == 0`.

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// One annotated object in an image.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BoundingBox {
    pub class_label: String,
    pub object_id: u32,
    pub x_top_left: f64,
    pub y_top_left: f64,
    pub width: f64,
    pub height: f64,
}

/// Read side of [`BoundingBox`]; `object_id` and any other key are ignored.
#[derive(Deserialize)]
struct StoredBox {
    class_label: String,
    x_top_left: f64,
    y_top_left: f64,
    width: f64,
    height: f64,
}

impl From<StoredBox> for BoundingBox {
    fn from(b: StoredBox) -> Self {
        BoundingBox {
            class_label: b.class_label,
            object_id: 0,
            x_top_left: b.x_top_left,
            y_top_left: b.y_top_left,
            width: b.width,
            height: b.height,
        }
    }
}

pub fn encode_box(b: &BoundingBox) -> Result<String> {
    Ok(serde_json::to_string(b)?)
}

/// Encode a full label payload.
pub fn encode_boxes(boxes: &[BoundingBox]) -> Result<String> {
    Ok(serde_json::to_string(boxes)?)
}

pub fn decode_boxes(encoding: &str) -> Result<Vec<BoundingBox>> {
    let stored: Vec<StoredBox> = serde_json::from_str(encoding)?;
    Ok(stored.into_iter().map(BoundingBox::from).collect())
}
