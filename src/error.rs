//! Error types for the fallible edges of the engine.
//!
//! The canvas itself never fails: missing geometry, out-of-bounds pointers
//! and dangling labels all degrade to no-ops or neutral defaults. Errors
//! only arise when bytes cross the crate boundary.

use thiserror::Error;

/// Errors that can occur while writing an export archive.
#[derive(Error, Debug)]
pub enum ExportError {
    /// I/O error while writing archive entries
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Zip container error
    #[error("Archive error: {0}")]
    Zip(#[from] zip::result::ZipError),
}

/// Errors that can occur while turning uploaded files into image records.
#[derive(Error, Debug)]
pub enum SourceError {
    /// File name does not carry a supported image extension
    #[error("Unsupported file type: {name}")]
    UnsupportedType {
        /// The rejected file name
        name: String,
    },

    /// Image header could not be read
    #[error("Failed to decode image '{name}': {message}")]
    Decode {
        /// File name of the image
        name: String,
        /// Decoder message
        message: String,
    },
}

impl SourceError {
    /// Create an unsupported type error.
    pub fn unsupported_type(name: impl Into<String>) -> Self {
        Self::UnsupportedType { name: name.into() }
    }

    /// Create a decode error.
    pub fn decode(name: impl Into<String>, message: impl ToString) -> Self {
        Self::Decode {
            name: name.into(),
            message: message.to_string(),
        }
    }
}
