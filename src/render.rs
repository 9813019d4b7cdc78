//! Render model for the canvas.
//!
//! The engine does not draw. It hands the host a flat list of what to draw
//! for each visible box: the outline clamped to the image, the colors, and
//! the resize handle squares when the box is hovered.

use crate::constants::{BOX_FILL_ALPHA, BOX_STROKE_WIDTH, HANDLE_DRAW_SIZE};
use crate::geometry::{Rect, bounded_box, control_points};
use crate::model::{BoxAnnotation, HexColor};
use crate::store::AnnotationStore;

/// Drawing instructions for one box.
#[derive(Debug, Clone, PartialEq)]
pub struct BoxDrawInfo {
    /// Index of the box in the live list
    pub index: usize,
    /// Outline, normalized and clamped to the image
    pub rect: Rect,
    /// Outline color
    pub stroke: HexColor,
    /// Fill color as `rrggbbaa`
    pub fill: String,
    pub stroke_width: f64,
    /// Handle squares, empty unless the box is hovered
    pub handles: Vec<Rect>,
}

/// Square of side `HANDLE_DRAW_SIZE` centered on each control point.
pub fn handle_squares(rect: &Rect) -> Vec<Rect> {
    let half = HANDLE_DRAW_SIZE / 2.0;
    control_points(rect)
        .iter()
        .map(|p| Rect::new(p.x - half, p.y - half, p.x + half, p.y + half))
        .collect()
}

/// Build draw info for every visible box, in list order.
pub fn build_draw_list(
    boxes: &[BoxAnnotation],
    bounds: &Rect,
    store: &AnnotationStore,
) -> Vec<BoxDrawInfo> {
    boxes
        .iter()
        .enumerate()
        .filter(|(_, b)| b.visible)
        .map(|(index, b)| {
            let rect = bounded_box(&b.rect, bounds);
            let stroke = store.box_color(b);
            let fill = stroke.with_alpha(BOX_FILL_ALPHA);
            let handles = if b.hovered {
                handle_squares(&rect)
            } else {
                Vec::new()
            };
            BoxDrawInfo {
                index,
                rect,
                stroke,
                fill,
                stroke_width: BOX_STROKE_WIDTH,
                handles,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_draw_list_skips_hidden_and_clamps() {
        let mut store = AnnotationStore::new();
        let red = store.add_label_with_color("red", HexColor::parse("ff0000").unwrap());

        let mut hidden = BoxAnnotation::new(1, Rect::new(10.0, 10.0, 20.0, 20.0));
        hidden.visible = false;
        let shown = BoxAnnotation::new(1, Rect::new(150.0, 90.0, 50.0, -30.0)).with_label(Some(red));

        let bounds = Rect::new(0.0, 0.0, 100.0, 100.0);
        let list = build_draw_list(&[hidden, shown], &bounds, &store);

        assert_eq!(list.len(), 1);
        let info = &list[0];
        assert_eq!(info.index, 1);
        assert_eq!(info.rect, Rect::new(50.0, 0.0, 100.0, 90.0));
        assert_eq!(info.stroke.as_str(), "ff0000");
        assert_eq!(info.fill, "ff00003d");
        assert!(info.handles.is_empty());
    }

    #[test]
    fn test_hovered_box_gets_handles() {
        let store = AnnotationStore::new();
        let mut b = BoxAnnotation::new(1, Rect::new(10.0, 10.0, 50.0, 50.0));
        b.hovered = true;

        let list = build_draw_list(&[b], &Rect::new(0.0, 0.0, 100.0, 100.0), &store);
        let handles = &list[0].handles;
        assert_eq!(handles.len(), 8);
        assert_eq!(handles[0], Rect::new(5.0, 5.0, 15.0, 15.0));
        assert_eq!(list[0].stroke.as_str(), "ffffff");
    }
}
