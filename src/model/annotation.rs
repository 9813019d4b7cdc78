//! Box annotation data model.

use serde::{Deserialize, Serialize};

use super::image::ImageId;
use super::label::LabelId;
use crate::geometry::Rect;

/// A rectangular annotation drawn over an image.
///
/// `rect` is in display space and may be unsorted while a drag is running.
/// The three flags are transient UI state and are not exported.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoxAnnotation {
    /// Image this box was drawn on
    pub image_id: ImageId,
    /// Assigned label, if any
    pub label: Option<LabelId>,
    /// Corners in display coordinates
    pub rect: Rect,
    /// Pointer is near an edge of this box
    #[serde(skip)]
    pub hovered: bool,
    #[serde(skip)]
    pub selected: bool,
    /// Hidden boxes are not drawn
    #[serde(default = "default_visible")]
    pub visible: bool,
}

fn default_visible() -> bool {
    true
}

impl BoxAnnotation {
    /// Create a visible, unlabeled box.
    pub fn new(image_id: ImageId, rect: Rect) -> Self {
        Self {
            image_id,
            label: None,
            rect,
            hovered: false,
            selected: false,
            visible: true,
        }
    }

    pub fn with_label(mut self, label: Option<LabelId>) -> Self {
        self.label = label;
        self
    }

    pub fn is_labeled(&self) -> bool {
        self.label.is_some()
    }
}
