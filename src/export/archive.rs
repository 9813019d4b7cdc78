//! Zip bundling of export files.

use std::fs::File;
use std::io::{Seek, Write};
use std::path::Path;

use zip::CompressionMethod;
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

use super::ExportResult;
use crate::error::ExportError;

/// Write all export files into a deflate-compressed zip archive.
///
/// Returns the underlying writer once the archive is finished.
pub fn write_archive<W: Write + Seek>(result: &ExportResult, writer: W) -> Result<W, ExportError> {
    let mut zip = ZipWriter::new(writer);
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

    for file in &result.files {
        zip.start_file(file.name.as_str(), options)?;
        zip.write_all(file.contents.as_bytes())?;
    }

    let writer = zip.finish()?;
    log::debug!("Wrote archive with {} entries", result.files.len());
    Ok(writer)
}

/// Write the archive to a file at `path`.
pub fn write_archive_to_path(result: &ExportResult, path: &Path) -> Result<(), ExportError> {
    log::info!("Writing export archive to {:?}", path);
    let file = File::create(path)?;
    write_archive(result, file)?;
    Ok(())
}
