//! Tests for dataset export and archive writing.

mod record_tests;

use crate::geometry::Rect;
use crate::model::{BoxAnnotation, ImageId, ImageRecord, LabelId};
use crate::store::AnnotationStore;

/// Add a decoded `width`x`height` image holding `boxes`.
fn add_image(
    store: &mut AnnotationStore,
    name: &str,
    size: (u32, u32),
    boxes: &[(Option<LabelId>, Rect)],
) -> ImageId {
    let record = ImageRecord::new(name, name);
    let id = record.id;
    store.add_images([record]);
    store.set_image_geometry(id, size.0, size.1, None);
    store.replace_boxes(
        id,
        boxes
            .iter()
            .map(|(label, rect)| BoxAnnotation::new(id, *rect).with_label(*label))
            .collect(),
    );
    id
}
