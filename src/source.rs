//! Turning uploaded files into image records.
//!
//! Acquisition itself (file pickers, drag-and-drop) belongs to the host. This
//! module covers what the engine needs from it: filtering by file type, a
//! stable id per file name, and reading the natural size from the encoded
//! bytes once the host hands them over.

use std::io::Cursor;

use image::ImageReader;

use crate::error::SourceError;
use crate::model::{ImageId, ImageRecord};

/// Supported image extensions
pub const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "bmp", "gif", "webp", "tiff", "tif"];

/// Image data handed over by the host.
#[derive(Clone, Debug)]
pub struct LoadedImage {
    /// Filename of the image
    pub name: String,
    /// Raw image data bytes
    pub data: Vec<u8>,
}

impl LoadedImage {
    pub fn new(name: impl Into<String>, data: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            data,
        }
    }
}

/// Check if a filename has a supported image extension.
pub fn is_supported_filename(name: &str) -> bool {
    let lower = name.to_lowercase();
    IMAGE_EXTENSIONS
        .iter()
        .any(|ext| lower.ends_with(&format!(".{}", ext)))
}

/// Stable id of an image: CRC-32 of its file name.
pub fn image_id(name: &str) -> ImageId {
    crc32fast::hash(name.as_bytes())
}

/// Read the natural size of an encoded image without decoding its pixels.
pub fn decode_dimensions(name: &str, data: &[u8]) -> Result<(u32, u32), SourceError> {
    let reader = ImageReader::new(Cursor::new(data))
        .with_guessed_format()
        .map_err(|e| SourceError::decode(name, e))?;
    let dims = reader
        .into_dimensions()
        .map_err(|e| SourceError::decode(name, e))?;
    log::debug!("Decoded '{}': {}x{}", name, dims.0, dims.1);
    Ok(dims)
}

/// Build records for the supported files, with their natural size read from
/// the image header.
///
/// The file name doubles as the display handle; hosts that display through
/// URLs overwrite `handle` afterwards. Files with an unsupported extension or
/// an unreadable header come back as errors so the host can tell the user.
pub fn prepare_images(files: &[LoadedImage]) -> (Vec<ImageRecord>, Vec<SourceError>) {
    let mut records = Vec::new();
    let mut rejected = Vec::new();

    for file in files {
        if !is_supported_filename(&file.name) {
            log::warn!("Skipping non-image file '{}'", file.name);
            rejected.push(SourceError::unsupported_type(&file.name));
            continue;
        }

        match decode_dimensions(&file.name, &file.data) {
            Ok((width, height)) => {
                let mut record = ImageRecord::new(&file.name, &file.name);
                record.width = width;
                record.height = height;
                records.push(record);
            }
            Err(e) => {
                log::warn!("{}", e);
                rejected.push(e);
            }
        }
    }

    log::info!(
        "Prepared {} images ({} rejected)",
        records.len(),
        rejected.len()
    );
    (records, rejected)
}
