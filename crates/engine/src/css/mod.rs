//! Shared CSS value primitives.
//!
//! Small, pure parsers and formatters used across the component catalog:
//! pixel and percent widths, spacing shorthands, border widths, and
//! background position/size values. Width arithmetic is done in `f32`
//! on purpose — column class names depend on 32-bit rounding behavior.

/// Background position/size parsing for sections.
pub mod background;
/// Border shorthand helpers.
pub mod border;
/// Pixel and percent width parsing.
pub mod pixel;
/// Padding/margin shorthand parsing.
pub mod spacing;

pub use background::{BackgroundSize, parse_position, parse_size};
pub use border::border_width;
pub use pixel::{Width, parse_px, parse_width};
pub use spacing::Spacing;

/// Shortest round-trip decimal form of an `f32`.
///
/// Rust's `Display` for floats already prints the shortest string that
/// parses back to the same value, which is exactly the `%g`-style form
/// the column classes need: `100.0 / 3.0` is `33.333332`, never
/// `33.333333333333336`.
pub fn format_f32(value: f32) -> String {
    format!("{value}")
}

/// `format_f32` with the decimal point replaced by a dash, the form used
/// inside CSS class names.
pub fn class_suffix(value: f32) -> String {
    format_f32(value).replace('.', "-")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_f32_is_shortest_round_trip() {
        assert_eq!(format_f32(100.0 / 3.0_f32), "33.333332");
        assert_eq!(format_f32(50.0), "50");
        assert_eq!(format_f32(0.5), "0.5");
        assert_eq!(format_f32(-0.5), "-0.5");
        assert_eq!(format_f32(0.0), "0");
    }

    #[test]
    fn class_suffix_replaces_decimal_point() {
        assert_eq!(class_suffix(100.0 / 3.0_f32), "33-333332");
        assert_eq!(class_suffix(100.0), "100");
        assert_eq!(class_suffix(12.5), "12-5");
    }
}
