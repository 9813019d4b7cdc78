//! Image records of the working set.

use serde::{Deserialize, Serialize};

use super::annotation::BoxAnnotation;
use crate::transform::DisplayRect;

/// Identifier of an image: CRC-32 of its original file name.
pub type ImageId = u32;

/// An image in the working set with its boxes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageRecord {
    pub id: ImageId,
    /// Original file name
    pub name: String,
    /// Opaque handle the host uses to display the image (URL, path, key)
    pub handle: String,
    /// Natural width in pixels, 0 until decoded
    pub width: u32,
    /// Natural height in pixels, 0 until decoded
    pub height: u32,
    /// Letterboxed placement, `None` until first computed
    #[serde(default)]
    pub display_rect: Option<DisplayRect>,
    /// Boxes in drawing order
    #[serde(default)]
    pub boxes: Vec<BoxAnnotation>,
}

impl ImageRecord {
    /// Create an undecoded record whose id is derived from `name`.
    pub fn new(name: impl Into<String>, handle: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            id: crate::source::image_id(&name),
            name,
            handle: handle.into(),
            width: 0,
            height: 0,
            display_rect: None,
            boxes: Vec::new(),
        }
    }

    /// Natural dimensions are known.
    pub fn is_decoded(&self) -> bool {
        self.width > 0 && self.height > 0
    }

    /// File name up to the first `.`; names the per-image export file.
    pub fn base_name(&self) -> &str {
        self.name.split('.').next().unwrap_or(&self.name)
    }

    pub fn labeled_boxes(&self) -> impl Iterator<Item = &BoxAnnotation> {
        self.boxes.iter().filter(|b| b.is_labeled())
    }
}
