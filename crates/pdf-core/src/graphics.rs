//! Vector graphics operators

use crate::document::Color;

/// Generate operators that fill a rectangle with a solid color
///
/// Coordinates are PDF coordinates: `(x, y)` is the lower-left corner.
pub fn generate_fill_rect_operators(x: f64, y: f64, width: f64, height: f64, color: Color) -> Vec<u8> {
    format!(
        "q\n{} {} {} rg\n{x} {y} {width} {height} re\nf\nQ\n",
        color.r, color.g, color.b
    )
    .into_bytes()
}

/// Generate operators that outline a rectangle
///
/// Coordinates are PDF coordinates: `(x, y)` is the lower-left corner.
pub fn generate_stroke_rect_operators(
    x: f64,
    y: f64,
    width: f64,
    height: f64,
    line_width: f64,
    color: Color,
) -> Vec<u8> {
    format!(
        "q\n{} {} {} RG\n{line_width} w\n{x} {y} {width} {height} re\nS\nQ\n",
        color.r, color.g, color.b
    )
    .into_bytes()
}
