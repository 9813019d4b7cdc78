//! Interactive annotation canvas.
//!
//! [`CanvasEngine`] owns the live box list of the selected image and turns
//! pointer events into box creation and resizing. Between gestures the live
//! list and the store agree; during a gesture only the live list changes, and
//! the end of the gesture writes it back.
//!
//! ```text
//!            handle hit                 pointer up / abort
//!   Idle ─────────────────▶ Resizing ──────────────────────▶ Idle
//!     │    open space (no hovered box)
//!     └───────────────────▶ Creating ──────────────────────▶ Idle
//! ```
//!
//! A [`PointerCapture`] is acquired on leaving `Idle` and released on every
//! path back to it, including image switches and dropping the engine.

use std::fmt;

use crate::config::CanvasSettings;
use crate::geometry::{Handle, Point, Rect};
use crate::hit_test::{hit_test_handle, update_hover};
use crate::model::{BoxAnnotation, ImageId, LabelId};
use crate::render::{BoxDrawInfo, build_draw_list};
use crate::store::AnnotationStore;
use crate::transform::{DisplayRect, Viewport, compute_display_rect};

/// Pointer tracking outside the canvas for the duration of a gesture.
///
/// Hosts implement this to subscribe to document-level move/up events so a
/// drag keeps working when the pointer leaves the canvas.
pub trait PointerCapture {
    fn acquire(&mut self);
    fn release(&mut self);
}

/// Capture that does nothing, for hosts that deliver all events anyway.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoCapture;

impl PointerCapture for NoCapture {
    fn acquire(&mut self) {}
    fn release(&mut self) {}
}

/// Current pointer gesture.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Gesture {
    /// No button held.
    #[default]
    Idle,
    /// Dragging a control point of an existing box.
    Resizing { box_index: usize, handle: Handle },
    /// Dragging out a new box. `committed` is set once the drag passed the
    /// threshold and the box was appended to the live list.
    Creating {
        start: Point,
        committed: Option<usize>,
    },
}

impl Gesture {
    pub fn is_active(&self) -> bool {
        !matches!(self, Gesture::Idle)
    }
}

/// Pointer-driven box editor for one image at a time.
pub struct CanvasEngine {
    settings: CanvasSettings,
    viewport: Viewport,
    image_id: Option<ImageId>,
    natural_size: Option<(u32, u32)>,
    display: Option<DisplayRect>,
    boxes: Vec<BoxAnnotation>,
    gesture: Gesture,
    capture: Box<dyn PointerCapture>,
    captured: bool,
}

impl fmt::Debug for CanvasEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CanvasEngine")
            .field("viewport", &self.viewport)
            .field("image_id", &self.image_id)
            .field("natural_size", &self.natural_size)
            .field("display", &self.display)
            .field("boxes", &self.boxes.len())
            .field("gesture", &self.gesture)
            .field("captured", &self.captured)
            .finish_non_exhaustive()
    }
}

impl Default for CanvasEngine {
    fn default() -> Self {
        Self::new(CanvasSettings::default())
    }
}

impl CanvasEngine {
    pub fn new(settings: CanvasSettings) -> Self {
        Self::with_capture(settings, Box::new(NoCapture))
    }

    pub fn with_capture(settings: CanvasSettings, capture: Box<dyn PointerCapture>) -> Self {
        let viewport = Viewport::default().or_fallback(settings.fallback_viewport);
        Self {
            settings,
            viewport,
            image_id: None,
            natural_size: None,
            display: None,
            boxes: Vec::new(),
            gesture: Gesture::Idle,
            capture,
            captured: false,
        }
    }

    // ---- accessors ----

    pub fn settings(&self) -> &CanvasSettings {
        &self.settings
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn image_id(&self) -> Option<ImageId> {
        self.image_id
    }

    pub fn natural_size(&self) -> Option<(u32, u32)> {
        self.natural_size
    }

    pub fn display_rect(&self) -> Option<DisplayRect> {
        self.display
    }

    /// The clamping bound of the current image, once its geometry is known.
    pub fn bounds(&self) -> Option<Rect> {
        self.display.map(|d| d.bounds())
    }

    pub fn live_boxes(&self) -> &[BoxAnnotation] {
        &self.boxes
    }

    pub fn gesture(&self) -> Gesture {
        self.gesture
    }

    pub fn is_capturing(&self) -> bool {
        self.captured
    }

    /// Draw info for the visible live boxes; empty until geometry is known.
    pub fn draw_list(&self, store: &AnnotationStore) -> Vec<BoxDrawInfo> {
        match self.bounds() {
            Some(bounds) => build_draw_list(&self.boxes, &bounds, store),
            None => Vec::new(),
        }
    }

    // ---- image and viewport ----

    /// Make `id` the displayed image and load its boxes.
    ///
    /// A gesture still running on the previous image is ended and written
    /// back first. The new image has no geometry until [`Self::image_decoded`].
    pub fn select_image(&mut self, store: &mut AnnotationStore, id: ImageId) -> bool {
        if self.gesture.is_active() {
            log::debug!("Image switch during {:?}, ending gesture", self.gesture);
        }
        self.finish_gesture(store);

        self.display = None;
        self.natural_size = None;

        match store.image(id) {
            Some(img) => {
                self.image_id = Some(id);
                self.boxes = img.boxes.clone();
                for b in &mut self.boxes {
                    b.hovered = false;
                }
                log::debug!("Selected image '{}' ({} boxes)", img.name, self.boxes.len());
                true
            }
            None => {
                log::warn!("Cannot select unknown image {}", id);
                self.image_id = None;
                self.boxes.clear();
                false
            }
        }
    }

    /// Image `id` finished decoding with the given natural size.
    ///
    /// Decoding is asynchronous, so a completion for an image that is no
    /// longer selected is ignored.
    pub fn image_decoded(
        &mut self,
        store: &mut AnnotationStore,
        id: ImageId,
        width: u32,
        height: u32,
    ) {
        if self.image_id != Some(id) {
            log::trace!(
                "Ignoring decode of image {}, selected is {:?}",
                id,
                self.image_id
            );
            return;
        }
        self.natural_size = Some((width, height));
        self.recompute_display();
        store.set_image_geometry(id, width, height, self.display);
        log::debug!(
            "Image {} decoded at {}x{}, display {:?}",
            id,
            width,
            height,
            self.display
        );
    }

    /// The drawing surface changed size. Only the bound is recomputed; box
    /// coordinates are left as they are.
    pub fn resize_viewport(&mut self, store: &mut AnnotationStore, width: f64, height: f64) {
        self.viewport = Viewport::new(width, height).or_fallback(self.settings.fallback_viewport);
        if let (Some(id), Some((w, h))) = (self.image_id, self.natural_size) {
            self.recompute_display();
            store.set_image_geometry(id, w, h, self.display);
        }
    }

    fn recompute_display(&mut self) {
        self.display = self.natural_size.and_then(|(w, h)| {
            compute_display_rect(
                f64::from(w),
                f64::from(h),
                self.viewport.width,
                self.viewport.height,
            )
        });
    }

    // ---- pointer events ----

    /// Button pressed at `point`.
    pub fn pointer_down(&mut self, store: &mut AnnotationStore, point: Point) {
        if self.gesture.is_active() {
            log::warn!("Pointer down during {:?}, ending it first", self.gesture);
            self.finish_gesture(store);
        }

        let Some(bounds) = self.bounds() else {
            log::trace!("Pointer down before image geometry is known");
            return;
        };
        if !bounds.contains(&point) {
            return;
        }

        if let Some(hit) = hit_test_handle(point, &self.boxes, &bounds, self.settings.handle_tolerance)
        {
            log::debug!("Resizing box {} by {:?}", hit.box_index, hit.handle);
            // The handle was picked on the sorted rect; make the stored fields match.
            let b = &mut self.boxes[hit.box_index];
            b.rect = b.rect.normalized();
            self.enter(Gesture::Resizing {
                box_index: hit.box_index,
                handle: hit.handle,
            });
        } else if self.boxes.iter().any(|b| b.hovered) {
            log::trace!("Pointer down on a hovered box, not creating");
        } else {
            self.enter(Gesture::Creating {
                start: point,
                committed: None,
            });
        }
    }

    /// Pointer moved to `point`. Returns whether anything visible changed.
    pub fn pointer_move(&mut self, store: &AnnotationStore, point: Point) -> bool {
        let (Some(bounds), Some(image_id)) = (self.bounds(), self.image_id) else {
            return false;
        };

        match self.gesture {
            Gesture::Idle => update_hover(
                point,
                &mut self.boxes,
                &bounds,
                self.settings.handle_tolerance,
            ),
            Gesture::Resizing { box_index, handle } => match self.boxes.get_mut(box_index) {
                Some(b) => {
                    handle.apply(&mut b.rect, point);
                    b.rect.clamp_fields(&bounds);
                    true
                }
                None => false,
            },
            Gesture::Creating {
                start,
                committed: None,
            } => {
                let threshold = self.settings.drag_threshold;
                if (point.x - start.x).abs() <= threshold && (point.y - start.y).abs() <= threshold
                {
                    return false;
                }

                let mut b = BoxAnnotation::new(image_id, Rect::from_corners(start, point))
                    .with_label(store.current_label());
                b.hovered = true;
                b.rect.clamp_fields(&bounds);
                self.boxes.push(b);

                let index = self.boxes.len() - 1;
                log::debug!("Created box {} on image {}", index, image_id);
                self.gesture = Gesture::Creating {
                    start,
                    committed: Some(index),
                };
                true
            }
            Gesture::Creating {
                committed: Some(index),
                ..
            } => match self.boxes.get_mut(index) {
                Some(b) => {
                    let corner = bounds.clamp_point(point);
                    b.rect.x2 = corner.x;
                    b.rect.y2 = corner.y;
                    b.hovered = true;
                    b.label = store.current_label();
                    true
                }
                None => false,
            },
        }
    }

    /// Button released. Returns whether a gesture ended.
    pub fn pointer_up(&mut self, store: &mut AnnotationStore) -> bool {
        self.finish_gesture(store)
    }

    /// The host lost pointer focus mid-gesture (window blur, cancel).
    pub fn abort_gesture(&mut self, store: &mut AnnotationStore) -> bool {
        if self.gesture.is_active() {
            log::debug!("Aborting {:?}", self.gesture);
        }
        self.finish_gesture(store)
    }

    fn enter(&mut self, gesture: Gesture) {
        self.gesture = gesture;
        if !self.captured {
            self.capture.acquire();
            self.captured = true;
        }
    }

    fn release_capture(&mut self) {
        if self.captured {
            self.capture.release();
            self.captured = false;
        }
    }

    /// Single exit path of every gesture.
    fn finish_gesture(&mut self, store: &mut AnnotationStore) -> bool {
        let was_active = self.gesture.is_active();
        self.gesture = Gesture::Idle;
        self.release_capture();
        if was_active {
            // Corners may only be swapped while a drag is running.
            for b in &mut self.boxes {
                b.rect = b.rect.normalized();
            }
            self.commit(store);
        }
        was_active
    }

    fn commit(&self, store: &mut AnnotationStore) {
        if let Some(id) = self.image_id {
            store.replace_boxes(id, self.boxes.clone());
        }
    }

    // ---- box list operations ----

    /// Assign a label to a box; it also becomes the current label.
    pub fn set_box_label(
        &mut self,
        store: &mut AnnotationStore,
        index: usize,
        label: Option<LabelId>,
    ) -> bool {
        if !self.can_edit_list(index) {
            return false;
        }
        self.boxes[index].label = label;
        store.set_current_label(label);
        self.commit(store);
        true
    }

    pub fn toggle_box_visibility(&mut self, store: &mut AnnotationStore, index: usize) -> bool {
        if !self.can_edit_list(index) {
            return false;
        }
        let b = &mut self.boxes[index];
        b.visible = !b.visible;
        self.commit(store);
        true
    }

    pub fn delete_box(&mut self, store: &mut AnnotationStore, index: usize) -> bool {
        if !self.can_edit_list(index) {
            return false;
        }
        self.boxes.remove(index);
        log::debug!("Deleted box {}", index);
        self.commit(store);
        true
    }

    fn can_edit_list(&self, index: usize) -> bool {
        if self.gesture.is_active() {
            log::debug!("Box list edit refused during {:?}", self.gesture);
            return false;
        }
        index < self.boxes.len()
    }

    /// Drop references to labels the store no longer has.
    pub fn sync_labels(&mut self, store: &AnnotationStore) {
        for b in &mut self.boxes {
            if b.label.is_some() && store.resolve_label(b.label).is_none() {
                b.label = None;
            }
        }
    }
}

impl Drop for CanvasEngine {
    fn drop(&mut self) {
        self.release_capture();
    }
}
