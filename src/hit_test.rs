//! Pointer hit-testing against the boxes of the displayed image.
//!
//! Two kinds of hits exist. A *handle* hit (pointer within a square tolerance
//! of a control point) starts a resize. An *edge* hit (pointer close to an
//! outline) only drives hover feedback; it never starts a gesture by itself,
//! but a hovered box blocks creation of a new box underneath it.

use crate::geometry::{Handle, Point, Rect, bounded_box, control_points};
use crate::model::BoxAnnotation;

/// A control point hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HandleHit {
    pub box_index: usize,
    pub handle: Handle,
}

/// Result of testing a pointer position against a box list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hit {
    /// Over a control point of a box
    Handle(HandleHit),
    /// Near the outline of a box
    Edge { box_index: usize },
    /// Open space
    None,
}

/// Find the first control point within `tolerance` of `point`.
///
/// Boxes are tested in list order and, per box, handles in control-point
/// order. Control points are taken from each box's rectangle bounded by
/// `bounds`.
pub fn hit_test_handle(
    point: Point,
    boxes: &[BoxAnnotation],
    bounds: &Rect,
    tolerance: f64,
) -> Option<HandleHit> {
    boxes.iter().enumerate().find_map(|(box_index, b)| {
        let bounded = bounded_box(&b.rect, bounds);
        control_points(&bounded)
            .iter()
            .position(|cp| cp.within_square(&point, tolerance))
            .and_then(Handle::from_index)
            .map(|handle| HandleHit { box_index, handle })
    })
}

/// Hover predicate for one (already bounded) rectangle.
///
/// True when the pointer is within `tolerance` of the top or bottom edge
/// (and horizontally within the box plus tolerance), of the left or right
/// edge (and vertically within the box plus tolerance), or of the vertical
/// lines through `x1`/`x2` at any height.
pub fn is_near_edge(point: Point, rect: &Rect, tolerance: f64) -> bool {
    let Point { x, y } = point;
    let Rect { x1, y1, x2, y2 } = *rect;
    let t = tolerance;

    let near_horizontal_edge =
        x > x1 - t && x < x2 + t && ((y - y1).abs() < t || (y - y2).abs() < t);
    let near_vertical_edge =
        y > y1 - t && y < y2 + t && ((x - x1).abs() < t || (x - x2).abs() < t);
    let near_vertical_line = (x > x1 - t && x < x1 + t) || (x > x2 - t && x < x2 + t);

    near_horizontal_edge || near_vertical_edge || near_vertical_line
}

/// Full hit test: handles first, then edges.
pub fn hit_test(point: Point, boxes: &[BoxAnnotation], bounds: &Rect, tolerance: f64) -> Hit {
    if !bounds.contains(&point) {
        return Hit::None;
    }
    if let Some(hit) = hit_test_handle(point, boxes, bounds, tolerance) {
        return Hit::Handle(hit);
    }
    boxes
        .iter()
        .position(|b| is_near_edge(point, &bounded_box(&b.rect, bounds), tolerance))
        .map_or(Hit::None, |box_index| Hit::Edge { box_index })
}

/// Recompute the `hovered` flag of every box for a pointer at `point`.
///
/// A pointer outside `bounds` un-hovers everything. Returns whether any flag
/// changed.
pub fn update_hover(
    point: Point,
    boxes: &mut [BoxAnnotation],
    bounds: &Rect,
    tolerance: f64,
) -> bool {
    let inside = bounds.contains(&point);
    let mut changed = false;

    for b in boxes.iter_mut() {
        let hovered = inside && is_near_edge(point, &bounded_box(&b.rect, bounds), tolerance);
        if b.hovered != hovered {
            b.hovered = hovered;
            changed = true;
        }
    }

    changed
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOL: f64 = 5.0;

    fn bounds() -> Rect {
        Rect::new(0.0, 0.0, 800.0, 600.0)
    }

    fn boxes(rects: &[Rect]) -> Vec<BoxAnnotation> {
        rects.iter().map(|r| BoxAnnotation::new(1, *r)).collect()
    }

    #[test]
    fn test_handle_hit_on_corner() {
        let list = boxes(&[Rect::new(100.0, 100.0, 200.0, 200.0)]);
        let hit = hit_test_handle(Point::new(198.0, 203.0), &list, &bounds(), TOL);
        assert_eq!(
            hit,
            Some(HandleHit {
                box_index: 0,
                handle: Handle::SouthEast
            })
        );
    }

    #[test]
    fn test_handle_hit_on_midpoint() {
        let list = boxes(&[Rect::new(100.0, 100.0, 200.0, 200.0)]);
        let hit = hit_test_handle(Point::new(150.0, 101.0), &list, &bounds(), TOL).unwrap();
        assert_eq!(hit.handle, Handle::North);
    }

    #[test]
    fn test_handle_tolerance_is_exclusive() {
        let list = boxes(&[Rect::new(100.0, 100.0, 200.0, 200.0)]);
        assert!(hit_test_handle(Point::new(105.0, 100.0), &list, &bounds(), TOL).is_none());
    }

    #[test]
    fn test_first_box_wins() {
        let list = boxes(&[
            Rect::new(100.0, 100.0, 200.0, 200.0),
            Rect::new(100.0, 100.0, 300.0, 300.0),
        ]);
        let hit = hit_test_handle(Point::new(100.0, 100.0), &list, &bounds(), TOL).unwrap();
        assert_eq!(hit.box_index, 0);
        assert_eq!(hit.handle, Handle::NorthWest);
    }

    #[test]
    fn test_handles_use_bounded_rect() {
        // Box sticks out of the image on the right; its east handle sits on the bound.
        let list = boxes(&[Rect::new(700.0, 100.0, 900.0, 200.0)]);
        let hit = hit_test_handle(Point::new(799.0, 150.0), &list, &bounds(), TOL).unwrap();
        assert_eq!(hit.handle, Handle::East);
    }

    #[test]
    fn test_unsorted_rect_handles() {
        let list = boxes(&[Rect::new(200.0, 200.0, 100.0, 100.0)]);
        let hit = hit_test_handle(Point::new(100.0, 100.0), &list, &bounds(), TOL).unwrap();
        assert_eq!(hit.handle, Handle::NorthWest);
    }

    #[test]
    fn test_edge_proximity() {
        let r = Rect::new(100.0, 100.0, 200.0, 200.0);
        assert!(is_near_edge(Point::new(150.0, 103.0), &r, TOL));
        assert!(is_near_edge(Point::new(197.0, 150.0), &r, TOL));
        assert!(!is_near_edge(Point::new(150.0, 150.0), &r, TOL));
        assert!(!is_near_edge(Point::new(150.0, 120.0), &r, TOL));
    }

    #[test]
    fn test_vertical_line_counts_at_any_height() {
        let r = Rect::new(100.0, 100.0, 200.0, 200.0);
        assert!(is_near_edge(Point::new(102.0, 500.0), &r, TOL));
        assert!(!is_near_edge(Point::new(150.0, 500.0), &r, TOL));
    }

    #[test]
    fn test_hit_test_kinds() {
        let list = boxes(&[Rect::new(100.0, 100.0, 200.0, 200.0)]);
        assert!(matches!(
            hit_test(Point::new(100.0, 100.0), &list, &bounds(), TOL),
            Hit::Handle(_)
        ));
        assert_eq!(
            hit_test(Point::new(130.0, 198.0), &list, &bounds(), TOL),
            Hit::Edge { box_index: 0 }
        );
        assert_eq!(
            hit_test(Point::new(150.0, 150.0), &list, &bounds(), TOL),
            Hit::None
        );
        assert_eq!(
            hit_test(Point::new(-10.0, 100.0), &list, &bounds(), TOL),
            Hit::None
        );
    }

    #[test]
    fn test_update_hover_inside_and_outside() {
        let mut list = boxes(&[
            Rect::new(100.0, 100.0, 200.0, 200.0),
            Rect::new(400.0, 400.0, 500.0, 500.0),
        ]);
        let b = Rect::new(50.0, 50.0, 700.0, 550.0);

        assert!(update_hover(Point::new(150.0, 101.0), &mut list, &b, TOL));
        assert!(list[0].hovered);
        assert!(!list[1].hovered);

        assert!(!update_hover(Point::new(150.0, 102.0), &mut list, &b, TOL));

        // Leaving the display rect clears everything, even near a vertical line.
        assert!(update_hover(Point::new(101.0, 20.0), &mut list, &b, TOL));
        assert!(list.iter().all(|bx| !bx.hovered));
    }
}
