//! Pixel and percent width parsing.

/// A width attribute value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Width {
    /// Absolute pixels.
    Px(f32),
    /// Percent of the container width.
    Percent(f32),
}

impl Width {
    /// Resolves the width against a container width, in pixels.
    pub fn to_px(self, container: f32) -> f32 {
        match self {
            Width::Px(px) => px,
            Width::Percent(pct) => container * pct / 100.0,
        }
    }
}

/// Parses `"600px"` or bare `"600"` into pixels.
pub fn parse_px(value: &str) -> Option<f32> {
    let value = value.trim();
    let number = value.strip_suffix("px").unwrap_or(value).trim();
    if number.is_empty() {
        return None;
    }
    number.parse::<f32>().ok()
}

/// Parses a width attribute (`"300px"`, `"300"`, `"50%"`).
pub fn parse_width(value: &str) -> Option<Width> {
    let value = value.trim();
    if let Some(pct) = value.strip_suffix('%') {
        return pct.trim().parse::<f32>().ok().map(Width::Percent);
    }
    parse_px(value).map(Width::Px)
}
