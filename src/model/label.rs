//! Label data model for box annotations.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Stable identifier of a label.
///
/// Boxes hold this key, never a list position, so renaming, reordering or
/// deleting other labels leaves every reference pointing at the same label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct LabelId(pub u32);

impl fmt::Display for LabelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// An RGB color as six lowercase hex digits, without a leading `#`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct HexColor(String);

impl HexColor {
    /// Parse `rrggbb` or `#rrggbb` (any case).
    pub fn parse(value: &str) -> Option<Self> {
        let digits = value.strip_prefix('#').unwrap_or(value);
        if digits.len() == 6 && digits.chars().all(|c| c.is_ascii_hexdigit()) {
            Some(Self(digits.to_ascii_lowercase()))
        } else {
            None
        }
    }

    pub fn from_rgb(rgb: [u8; 3]) -> Self {
        Self(format!("{:02x}{:02x}{:02x}", rgb[0], rgb[1], rgb[2]))
    }

    pub fn to_rgb(&self) -> [u8; 3] {
        let channel = |i: usize| u8::from_str_radix(&self.0[i..i + 2], 16).unwrap_or(0);
        [channel(0), channel(2), channel(4)]
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// `rrggbbaa` with the given alpha byte appended.
    pub fn with_alpha(&self, alpha: u8) -> String {
        format!("{}{:02x}", self.0, alpha)
    }

    /// CSS form with a leading `#`.
    pub fn to_css(&self) -> String {
        format!("#{}", self.0)
    }
}

impl fmt::Display for HexColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for HexColor {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        HexColor::parse(&value).ok_or_else(|| format!("invalid hex color '{}'", value))
    }
}

impl From<HexColor> for String {
    fn from(color: HexColor) -> Self {
        color.0
    }
}

/// A named, colored label that boxes can be assigned to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Label {
    /// Stable key referenced by boxes
    pub id: LabelId,
    /// Display name, also written to `labels.txt`
    pub name: String,
    /// Outline/fill color of boxes with this label
    pub color: HexColor,
}

impl Label {
    pub fn new(id: LabelId, name: impl Into<String>, color: HexColor) -> Self {
        Self {
            id,
            name: name.into(),
            color,
        }
    }
}
