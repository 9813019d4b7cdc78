//! Color utility functions shared across the engine.
//!
//! Label colors are generated by stepping the hue by the golden angle, which
//! spreads consecutive colors far apart on the color wheel.

use crate::model::HexColor;

/// Hue step between generated colors, in degrees.
const GOLDEN_ANGLE: f64 = 137.5;

/// Saturation/value pairs tried in turn once every hue of a pass is taken.
const TONES: &[(f64, f64)] = &[(0.7, 0.9), (0.9, 0.7), (0.5, 1.0), (1.0, 0.5)];

/// Distinct hues produced by the golden-angle walk before it repeats.
const HUES_PER_TONE: usize = 144;

/// Convert HSV to RGB.
///
/// # Arguments
/// * `h` - Hue in degrees (0-360)
/// * `s` - Saturation (0.0-1.0)
/// * `v` - Value/brightness (0.0-1.0)
///
/// # Returns
/// RGB tuple with values in range 0.0-1.0
pub fn hsv_to_rgb(h: f64, s: f64, v: f64) -> (f64, f64, f64) {
    let c = v * s;
    let x = c * (1.0 - ((h / 60.0) % 2.0 - 1.0).abs());
    let m = v - c;

    let (r, g, b) = if h < 60.0 {
        (c, x, 0.0)
    } else if h < 120.0 {
        (x, c, 0.0)
    } else if h < 180.0 {
        (0.0, c, x)
    } else if h < 240.0 {
        (0.0, x, c)
    } else if h < 300.0 {
        (x, 0.0, c)
    } else {
        (c, 0.0, x)
    };

    (r + m, g + m, b + m)
}

fn to_byte(channel: f64) -> u8 {
    (channel.clamp(0.0, 1.0) * 255.0).round() as u8
}

/// The `step`-th color of the golden-angle sequence.
pub fn palette_color(step: usize) -> HexColor {
    let (s, v) = TONES[(step / HUES_PER_TONE) % TONES.len()];
    let hue = (step as f64 * GOLDEN_ANGLE) % 360.0;
    let (r, g, b) = hsv_to_rgb(hue, s, v);
    HexColor::from_rgb([to_byte(r), to_byte(g), to_byte(b)])
}

/// Pick a color not present in `existing`, starting the walk at `start`.
///
/// Once the whole palette is in use the color at `start` is returned.
pub fn distinct_color(existing: &[HexColor], start: usize) -> HexColor {
    let palette_len = HUES_PER_TONE * TONES.len();
    (start..start + palette_len)
        .map(palette_color)
        .find(|c| !existing.contains(c))
        .unwrap_or_else(|| palette_color(start))
}
