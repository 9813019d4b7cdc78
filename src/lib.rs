//! BBAT - Bounding Box Annotation Toolkit
//!
//! Engine for drawing bounding boxes over images and exporting them as a
//! YOLO-style dataset. A front end feeds pointer and resize events into
//! [`CanvasEngine`], draws what [`CanvasEngine::draw_list`] returns, and calls
//! [`export_dataset`] when the user wants the labels.

pub mod canvas;
pub mod color_utils;
pub mod config;
pub mod constants;
pub mod error;
pub mod export;
pub mod geometry;
pub mod hit_test;
pub mod model;
pub mod render;
pub mod source;
pub mod store;
pub mod transform;

pub use canvas::{CanvasEngine, Gesture, NoCapture, PointerCapture};
pub use config::AppConfig;
pub use error::{ExportError, SourceError};
pub use export::{ExportOptions, ExportResult, export_dataset, export_to_dir, write_archive};
pub use geometry::{Handle, Point, Rect};
pub use model::{BoxAnnotation, HexColor, ImageId, ImageRecord, Label, LabelId};
pub use store::AnnotationStore;
pub use transform::{DisplayRect, Viewport};
