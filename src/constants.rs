//! Global constants for the annotation engine

/// Half-width of the square around a control point that counts as a handle hit
pub const HANDLE_HIT_TOLERANCE: f64 = 5.0;

/// Pointer displacement (per axis) a drag must exceed before a box is created
pub const CREATE_DRAG_THRESHOLD: f64 = 3.0;

/// Viewport edge length used when the host reports a zero-sized canvas
pub const DEFAULT_VIEWPORT_SIZE: f64 = 600.0;

/// Edge length of a drawn handle square
pub const HANDLE_DRAW_SIZE: f64 = 10.0;

/// Stroke width of a drawn box outline
pub const BOX_STROKE_WIDTH: f64 = 2.0;

/// Alpha byte appended to a label color for the box fill
pub const BOX_FILL_ALPHA: u8 = 0x3D;

/// Color used for boxes without a (resolvable) label
pub const NEUTRAL_COLOR: &str = "ffffff";

/// Name given to labels created without an explicit name
pub const DEFAULT_LABEL_NAME: &str = "New Label";

/// Name of the label index file inside an export archive
pub const LABELS_FILE_NAME: &str = "labels.txt";

/// Default file name of the export archive
pub const DEFAULT_ARCHIVE_NAME: &str = "labels.zip";
