//! Border shorthand helpers.

use super::pixel::parse_px;

/// Extracts the pixel width from a border shorthand (`"1px solid red"`).
///
/// Returns 0 for `none`, empty values, or shorthands without a pixel
/// token — border arithmetic treats all of those as "no border".
pub fn border_width(value: &str) -> f32 {
    value
        .split_whitespace()
        .find_map(|token| token.ends_with("px").then(|| parse_px(token)).flatten())
        .unwrap_or(0.0)
}
