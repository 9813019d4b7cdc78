//! Data models for the annotation engine.

mod annotation;
mod image;
mod label;

pub use annotation::BoxAnnotation;
pub use image::{ImageId, ImageRecord};
pub use label::{HexColor, Label, LabelId};
