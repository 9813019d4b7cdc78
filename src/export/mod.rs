//! Dataset export.
//!
//! Boxes are written in a YOLO-style text format: one file per image, one
//! line per labeled box,
//!
//! ```text
//! <label index> <x center> <y center> <width> <height>
//! ```
//!
//! with all four values divided by the image's natural width/height. The
//! label index is the label's position in the label list at export time.
//! `labels.txt` maps indices back to names. The files are finally bundled
//! into a zip archive by [`write_archive`].

mod archive;

#[cfg(test)]
mod tests;

use std::fmt;
use std::path::{Path, PathBuf};

pub use archive::{write_archive, write_archive_to_path};

use crate::config::ExportSettings;
use crate::constants::LABELS_FILE_NAME;
use crate::error::ExportError;
use crate::geometry::Rect;
use crate::model::ImageRecord;
use crate::store::AnnotationStore;

/// Options controlling export.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExportOptions {
    /// Map box rectangles from display space back to natural pixels before
    /// normalizing. Off by default, in which case the stored rectangle is
    /// divided by the natural size as is.
    pub natural_scale: bool,
}

impl From<&ExportSettings> for ExportOptions {
    fn from(settings: &ExportSettings) -> Self {
        Self {
            natural_scale: settings.natural_scale,
        }
    }
}

/// A generated text file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportFile {
    /// File name inside the archive
    pub name: String,
    pub contents: String,
}

/// Something the export skipped or could not do exactly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportWarning {
    /// Name of the image this warning relates to (if applicable).
    pub image: Option<String>,
    pub message: String,
}

impl ExportWarning {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            image: None,
            message: message.into(),
        }
    }

    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = Some(image.into());
        self
    }
}

impl fmt::Display for ExportWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.image {
            Some(image) => write!(f, "{}: {}", image, self.message),
            None => f.write_str(&self.message),
        }
    }
}

/// Output of [`export_dataset`].
#[derive(Debug, Clone, Default)]
pub struct ExportResult {
    /// `labels.txt` first, then one file per image in list order
    pub files: Vec<ExportFile>,
    pub warnings: Vec<ExportWarning>,
    /// Number of images that produced a file
    pub images_exported: usize,
    /// Number of records written
    pub annotations_exported: usize,
}

impl ExportResult {
    pub fn file(&self, name: &str) -> Option<&ExportFile> {
        self.files.iter().find(|f| f.name == name)
    }
}

/// One normalized record line, newline included.
///
/// `rect` must already be sorted; an unsorted one yields negative sizes.
pub fn format_record(label_index: usize, rect: &Rect, width: f64, height: f64) -> String {
    let center = rect.center();
    let x_center = center.x / width;
    let y_center = center.y / height;
    let w = rect.width() / width;
    let h = rect.height() / height;
    format!("{} {} {} {} {}\n", label_index, x_center, y_center, w, h)
}

/// `labels.txt` contents: `<index> <name>` per label, newline separated.
pub fn labels_file(store: &AnnotationStore) -> ExportFile {
    let contents = store
        .labels()
        .iter()
        .enumerate()
        .map(|(i, l)| format!("{} {}", i, l.name))
        .collect::<Vec<_>>()
        .join("\n");
    ExportFile {
        name: LABELS_FILE_NAME.to_string(),
        contents,
    }
}

/// Export file of one image, or `None` when it has nothing to write.
fn image_file(
    store: &AnnotationStore,
    image: &ImageRecord,
    options: &ExportOptions,
    warnings: &mut Vec<ExportWarning>,
) -> Option<(ExportFile, usize)> {
    // Corners may be stored swapped (box dragged up or left); sort them but
    // keep the values unclamped.
    let records: Vec<(usize, Rect)> = image
        .labeled_boxes()
        .filter_map(|b| {
            let index = store.label_index(b.label?)?;
            Some((index, b.rect.normalized()))
        })
        .collect();

    if records.is_empty() {
        return None;
    }

    if !image.is_decoded() {
        warnings.push(
            ExportWarning::new(format!(
                "Skipped {} labeled boxes: image dimensions unknown",
                records.len()
            ))
            .with_image(&image.name),
        );
        return None;
    }

    let width = f64::from(image.width);
    let height = f64::from(image.height);

    let display = match (options.natural_scale, image.display_rect) {
        (true, None) => {
            warnings.push(
                ExportWarning::new("No display placement known, exporting display coordinates")
                    .with_image(&image.name),
            );
            None
        }
        (true, display) => display,
        (false, _) => None,
    };

    let contents: String = records
        .iter()
        .map(|(index, rect)| {
            let rect = match &display {
                Some(d) => d.rect_to_natural(rect, width, height),
                None => *rect,
            };
            format_record(*index, &rect, width, height)
        })
        .collect();

    let file = ExportFile {
        name: format!("{}.txt", image.base_name()),
        contents,
    };
    Some((file, records.len()))
}

/// Serialize every labeled box in the store.
///
/// Boxes without a label, or whose label has since been deleted, are left
/// out. Images with no remaining records get no file. `labels.txt` is always
/// produced.
pub fn export_dataset(store: &AnnotationStore, options: &ExportOptions) -> ExportResult {
    let mut result = ExportResult {
        files: vec![labels_file(store)],
        ..Default::default()
    };

    for image in store.images() {
        if let Some((file, count)) = image_file(store, image, options, &mut result.warnings) {
            log::debug!("'{}': {} records", file.name, count);
            result.files.push(file);
            result.images_exported += 1;
            result.annotations_exported += count;
        }
    }

    for warning in &result.warnings {
        log::warn!("Export: {}", warning);
    }
    log::info!(
        "Exported {} images with {} annotations ({} warnings)",
        result.images_exported,
        result.annotations_exported,
        result.warnings.len()
    );

    result
}

/// Export the store with `settings` and write the archive into `dir`.
///
/// Returns the export result and the path of the written archive.
pub fn export_to_dir(
    store: &AnnotationStore,
    settings: &ExportSettings,
    dir: &Path,
) -> Result<(ExportResult, PathBuf), ExportError> {
    let result = export_dataset(store, &ExportOptions::from(settings));
    let path = settings.archive_path(dir);
    write_archive_to_path(&result, &path)?;
    Ok((result, path))
}
