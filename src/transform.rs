//! Letterbox mapping between natural image space and display space.
//!
//! An image is drawn "contained" inside the viewport: scaled uniformly until
//! one axis fills the viewport, then centered along the other axis. The
//! resulting [`DisplayRect`] is the drawing area of the image and the bound
//! every box of that image is clamped against.

use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_VIEWPORT_SIZE;
use crate::geometry::{Point, Rect};

/// Size of the drawing surface the image is placed in.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Replace non-positive dimensions with `fallback`.
    ///
    /// Hosts report a zero size before layout has happened.
    pub fn or_fallback(self, fallback: f64) -> Self {
        let pick = |v: f64| if v > 0.0 { v } else { fallback };
        Self::new(pick(self.width), pick(self.height))
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(DEFAULT_VIEWPORT_SIZE, DEFAULT_VIEWPORT_SIZE)
    }
}

/// Placement of an image inside the viewport.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DisplayRect {
    pub offset_x: f64,
    pub offset_y: f64,
    pub draw_w: f64,
    pub draw_h: f64,
}

impl DisplayRect {
    /// The area covered by the image, as a clamping rectangle.
    pub fn bounds(&self) -> Rect {
        Rect::new(
            self.offset_x,
            self.offset_y,
            self.offset_x + self.draw_w,
            self.offset_y + self.draw_h,
        )
    }

    /// Display units per natural pixel along x and y.
    pub fn scale(&self, natural_w: f64, natural_h: f64) -> (f64, f64) {
        (self.draw_w / natural_w, self.draw_h / natural_h)
    }

    /// Map a display-space point back into natural pixel space.
    pub fn to_natural(&self, point: Point, natural_w: f64, natural_h: f64) -> Point {
        let (sx, sy) = self.scale(natural_w, natural_h);
        Point::new(
            (point.x - self.offset_x) / sx,
            (point.y - self.offset_y) / sy,
        )
    }

    /// Map a natural-space point into display space.
    pub fn to_display(&self, point: Point, natural_w: f64, natural_h: f64) -> Point {
        let (sx, sy) = self.scale(natural_w, natural_h);
        Point::new(point.x * sx + self.offset_x, point.y * sy + self.offset_y)
    }

    pub fn rect_to_natural(&self, rect: &Rect, natural_w: f64, natural_h: f64) -> Rect {
        let a = self.to_natural(Point::new(rect.x1, rect.y1), natural_w, natural_h);
        let b = self.to_natural(Point::new(rect.x2, rect.y2), natural_w, natural_h);
        Rect::from_corners(a, b)
    }

    pub fn rect_to_display(&self, rect: &Rect, natural_w: f64, natural_h: f64) -> Rect {
        let a = self.to_display(Point::new(rect.x1, rect.y1), natural_w, natural_h);
        let b = self.to_display(Point::new(rect.x2, rect.y2), natural_w, natural_h);
        Rect::from_corners(a, b)
    }
}

/// Compute where an image of natural size `natural_w`×`natural_h` is drawn
/// inside a `viewport_w`×`viewport_h` viewport.
///
/// When the viewport is relatively wider than the image, the image fills the
/// viewport height and is centered horizontally; otherwise it fills the width
/// and is centered vertically. Returns `None` for empty sizes.
pub fn compute_display_rect(
    natural_w: f64,
    natural_h: f64,
    viewport_w: f64,
    viewport_h: f64,
) -> Option<DisplayRect> {
    if natural_w <= 0.0 || natural_h <= 0.0 || viewport_w <= 0.0 || viewport_h <= 0.0 {
        return None;
    }

    let image_aspect = natural_w / natural_h;
    let viewport_aspect = viewport_w / viewport_h;

    let rect = if viewport_aspect > image_aspect {
        let draw_h = viewport_h;
        let draw_w = image_aspect * draw_h;
        DisplayRect {
            offset_x: (viewport_w - draw_w) / 2.0,
            offset_y: 0.0,
            draw_w,
            draw_h,
        }
    } else {
        let draw_w = viewport_w;
        let draw_h = draw_w / image_aspect;
        DisplayRect {
            offset_x: 0.0,
            offset_y: (viewport_h - draw_h) / 2.0,
            draw_w,
            draw_h,
        }
    };

    Some(rect)
}
