//! Session store: the image working set and the label list.
//!
//! The canvas reads an image's boxes from here when it is selected and writes
//! them back at the end of every gesture. Label and image list panels mutate
//! the store directly through the methods below.

use std::cmp::Ordering;

use crate::color_utils::distinct_color;
use crate::constants::{DEFAULT_LABEL_NAME, NEUTRAL_COLOR};
use crate::model::{BoxAnnotation, HexColor, ImageId, ImageRecord, Label, LabelId};
use crate::transform::DisplayRect;

/// Direction of the image list sort.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Ascending,
    Descending,
}

impl SortOrder {
    pub fn toggled(self) -> Self {
        match self {
            SortOrder::Ascending => SortOrder::Descending,
            SortOrder::Descending => SortOrder::Ascending,
        }
    }
}

/// All images, boxes and labels of the running session.
#[derive(Debug, Clone, Default)]
pub struct AnnotationStore {
    images: Vec<ImageRecord>,
    labels: Vec<Label>,
    next_label_id: u32,
    current_label: Option<LabelId>,
    sort_order: SortOrder,
}

impl AnnotationStore {
    pub fn new() -> Self {
        Self::default()
    }

    // ---- images ----

    pub fn images(&self) -> &[ImageRecord] {
        &self.images
    }

    pub fn image(&self, id: ImageId) -> Option<&ImageRecord> {
        self.images.iter().find(|img| img.id == id)
    }

    pub fn image_mut(&mut self, id: ImageId) -> Option<&mut ImageRecord> {
        self.images.iter_mut().find(|img| img.id == id)
    }

    pub fn sort_order(&self) -> SortOrder {
        self.sort_order
    }

    /// Add uploaded images, skipping names already in the list, then re-sort
    /// ascending. Returns how many were added.
    pub fn add_images(&mut self, records: impl IntoIterator<Item = ImageRecord>) -> usize {
        let mut added = 0;
        for record in records {
            if self.images.iter().any(|img| img.name == record.name) {
                log::debug!("Image '{}' already loaded, skipping", record.name);
                continue;
            }
            self.images.push(record);
            added += 1;
        }
        self.sort_images(SortOrder::Ascending);
        log::info!(
            "Added {} images ({} total)",
            added,
            self.images.len()
        );
        added
    }

    /// Sort the image list by name using natural order.
    pub fn sort_images(&mut self, order: SortOrder) {
        self.sort_order = order;
        self.images.sort_by(|a, b| {
            let ord = natural_cmp(&a.name, &b.name);
            match order {
                SortOrder::Ascending => ord,
                SortOrder::Descending => ord.reverse(),
            }
        });
    }

    /// Flip the sort direction and re-sort.
    pub fn toggle_sort(&mut self) -> SortOrder {
        let order = self.sort_order.toggled();
        self.sort_images(order);
        order
    }

    pub fn remove_image(&mut self, id: ImageId) -> Option<ImageRecord> {
        let pos = self.images.iter().position(|img| img.id == id)?;
        let removed = self.images.remove(pos);
        log::debug!("Removed image '{}'", removed.name);
        Some(removed)
    }

    /// Record natural size and placement once the image has been decoded or
    /// the viewport changed.
    pub fn set_image_geometry(
        &mut self,
        id: ImageId,
        width: u32,
        height: u32,
        display_rect: Option<DisplayRect>,
    ) {
        if let Some(img) = self.image_mut(id) {
            img.width = width;
            img.height = height;
            img.display_rect = display_rect;
        }
    }

    /// Replace the box list of an image wholesale.
    pub fn replace_boxes(&mut self, id: ImageId, boxes: Vec<BoxAnnotation>) {
        match self.image_mut(id) {
            Some(img) => img.boxes = boxes,
            None => log::warn!("Dropping {} boxes for unknown image {}", boxes.len(), id),
        }
    }

    // ---- labels ----

    pub fn labels(&self) -> &[Label] {
        &self.labels
    }

    pub fn label(&self, id: LabelId) -> Option<&Label> {
        self.labels.iter().find(|l| l.id == id)
    }

    /// Current list position of a label; this is its export index.
    pub fn label_index(&self, id: LabelId) -> Option<usize> {
        self.labels.iter().position(|l| l.id == id)
    }

    /// Add a label with a generated color distinct from existing ones.
    /// An empty name becomes the default label name.
    pub fn add_label(&mut self, name: &str) -> LabelId {
        let existing: Vec<HexColor> = self.labels.iter().map(|l| l.color.clone()).collect();
        let color = distinct_color(&existing, self.next_label_id as usize);
        self.add_label_with_color(name, color)
    }

    pub fn add_label_with_color(&mut self, name: &str, color: HexColor) -> LabelId {
        let id = LabelId(self.next_label_id);
        self.next_label_id += 1;

        let name = if name.trim().is_empty() {
            DEFAULT_LABEL_NAME
        } else {
            name
        };
        log::debug!("Added label {} '{}' ({})", id, name, color);
        self.labels.push(Label::new(id, name, color));
        id
    }

    pub fn rename_label(&mut self, id: LabelId, name: &str) -> bool {
        match self.labels.iter_mut().find(|l| l.id == id) {
            Some(label) => {
                label.name = name.to_string();
                true
            }
            None => false,
        }
    }

    pub fn recolor_label(&mut self, id: LabelId, color: HexColor) -> bool {
        match self.labels.iter_mut().find(|l| l.id == id) {
            Some(label) => {
                label.color = color;
                true
            }
            None => false,
        }
    }

    /// Delete a label. Every box in every image that referenced it becomes
    /// unlabeled, and it stops being the current label.
    pub fn delete_label(&mut self, id: LabelId) -> Option<Label> {
        let pos = self.label_index(id)?;
        let removed = self.labels.remove(pos);

        let mut cleared = 0;
        for b in self.images.iter_mut().flat_map(|img| img.boxes.iter_mut()) {
            if b.label == Some(id) {
                b.label = None;
                cleared += 1;
            }
        }
        if self.current_label == Some(id) {
            self.current_label = None;
        }

        log::info!(
            "Deleted label '{}', {} boxes now unlabeled",
            removed.name,
            cleared
        );
        Some(removed)
    }

    /// Move the label at `from` to position `to`, shifting the rest.
    pub fn move_label(&mut self, from: usize, to: usize) -> bool {
        if from >= self.labels.len() || to >= self.labels.len() {
            return false;
        }
        let label = self.labels.remove(from);
        self.labels.insert(to, label);
        true
    }

    pub fn current_label(&self) -> Option<LabelId> {
        self.current_label
    }

    /// Set the label new boxes receive. Unknown ids clear it.
    pub fn set_current_label(&mut self, id: Option<LabelId>) {
        self.current_label = id.filter(|id| self.label(*id).is_some());
    }

    /// A label reference that still points at an existing label.
    pub fn resolve_label(&self, id: Option<LabelId>) -> Option<&Label> {
        id.and_then(|id| self.label(id))
    }

    /// Color to draw a box with: its label's color, or neutral white when
    /// unlabeled or when the label no longer exists.
    pub fn box_color(&self, b: &BoxAnnotation) -> HexColor {
        self.resolve_label(b.label)
            .map(|l| l.color.clone())
            .unwrap_or_else(neutral_color)
    }

    /// Labeled boxes whose label still exists, across all images.
    pub fn labeled_box_count(&self) -> usize {
        self.images
            .iter()
            .flat_map(|img| img.boxes.iter())
            .filter(|b| self.resolve_label(b.label).is_some())
            .count()
    }

    /// Boxes of an image, in display space.
    pub fn boxes(&self, id: ImageId) -> &[BoxAnnotation] {
        self.image(id).map(|img| img.boxes.as_slice()).unwrap_or(&[])
    }
}

fn neutral_color() -> HexColor {
    HexColor::parse(NEUTRAL_COLOR).unwrap_or_else(|| HexColor::from_rgb([0xff, 0xff, 0xff]))
}

/// Compare two names treating digit runs as numbers, ignoring case.
///
/// `img2.png` sorts before `img10.png`. Names that compare equal this way
/// fall back to a plain byte comparison so the order stays total.
pub fn natural_cmp(a: &str, b: &str) -> Ordering {
    let mut ca = Chunks::new(a);
    let mut cb = Chunks::new(b);

    loop {
        match (ca.next(), cb.next()) {
            (None, None) => return a.cmp(b),
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(x), Some(y)) => {
                let ord = compare_chunks(x, y);
                if ord != Ordering::Equal {
                    return ord;
                }
            }
        }
    }
}

fn compare_chunks(x: &str, y: &str) -> Ordering {
    let x_digits = x.starts_with(|c: char| c.is_ascii_digit());
    let y_digits = y.starts_with(|c: char| c.is_ascii_digit());

    match (x_digits, y_digits) {
        (true, true) => {
            let xs = x.trim_start_matches('0');
            let ys = y.trim_start_matches('0');
            xs.len().cmp(&ys.len()).then_with(|| xs.cmp(ys))
        }
        (true, false) => Ordering::Less,
        (false, true) => Ordering::Greater,
        (false, false) => x
            .chars()
            .flat_map(char::to_lowercase)
            .cmp(y.chars().flat_map(char::to_lowercase)),
    }
}

/// Splits a string into alternating digit and non-digit runs.
struct Chunks<'a> {
    rest: &'a str,
}

impl<'a> Chunks<'a> {
    fn new(s: &'a str) -> Self {
        Self { rest: s }
    }
}

impl<'a> Iterator for Chunks<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<&'a str> {
        let first = self.rest.chars().next()?;
        let digits = first.is_ascii_digit();
        let end = self
            .rest
            .find(|c: char| c.is_ascii_digit() != digits)
            .unwrap_or(self.rest.len());
        let (chunk, rest) = self.rest.split_at(end);
        self.rest = rest;
        Some(chunk)
    }
}
