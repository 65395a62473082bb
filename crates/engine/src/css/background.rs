//! Background position and size parsing, plus the VML fill geometry
//! derived from them for Outlook's `<v:fill>` fallback.

/// A parsed `background-size` value.
#[derive(Debug, Clone, PartialEq)]
pub enum BackgroundSize {
    /// `auto` or absent.
    Auto,
    /// `cover`.
    Cover,
    /// `contain`.
    Contain,
    /// Explicit one- or two-value size, tokens kept verbatim.
    Explicit {
        /// Width token.
        width: String,
        /// Height token, when two values were given.
        height: Option<String>,
    },
}

/// Parses a `background-size` attribute.
pub fn parse_size(value: &str) -> BackgroundSize {
    match value.trim() {
        "" | "auto" => BackgroundSize::Auto,
        "cover" => BackgroundSize::Cover,
        "contain" => BackgroundSize::Contain,
        other => {
            let mut tokens = other.split_whitespace();
            let width = tokens.next().unwrap_or_default().to_string();
            let height = tokens.next().map(str::to_string);
            BackgroundSize::Explicit { width, height }
        }
    }
}

/// Maps one position token to its decimal: `left`/`top` ⇒ 0,
/// `center` ⇒ 0.5, `right`/`bottom` ⇒ 1, `N%` ⇒ N/100.
fn token_decimal(token: &str) -> f32 {
    match token {
        "left" | "top" => 0.0,
        "center" => 0.5,
        "right" | "bottom" => 1.0,
        other => other
            .strip_suffix('%')
            .and_then(|n| n.trim().parse::<f32>().ok())
            .map(|n| n / 100.0)
            .unwrap_or(0.0),
    }
}

/// Parses a `background-position` attribute into `(x, y)` decimals.
///
/// Follows the CSS axis rules: a lone axis keyword centers the other
/// axis, and a leading `top`/`bottom` (or trailing `left`/`right`)
/// means the tokens were written y-first.
pub fn parse_position(value: &str) -> (f32, f32) {
    let tokens: Vec<&str> = value.split_whitespace().collect();
    match tokens.as_slice() {
        [] => (0.5, 0.0),
        [single] => match *single {
            "top" | "bottom" => (0.5, token_decimal(single)),
            "left" | "right" => (token_decimal(single), 0.5),
            "center" => (0.5, 0.5),
            other => (token_decimal(other), 0.5),
        },
        [first, second, ..] => {
            let swapped = matches!(*first, "top" | "bottom") || matches!(*second, "left" | "right");
            if swapped {
                (token_decimal(second), token_decimal(first))
            } else {
                (token_decimal(first), token_decimal(second))
            }
        }
    }
}

/// Geometry of a `<v:fill>` element.
#[derive(Debug, Clone, PartialEq)]
pub struct VmlFill {
    /// `size` attribute value, when one is emitted.
    pub size: Option<String>,
    /// `aspect` attribute value, when one is emitted.
    pub aspect: Option<&'static str>,
    /// `type` attribute value: `frame` for no-repeat, `tile` otherwise.
    pub kind: &'static str,
    /// `position`/`origin` decimals, already offset for frame mode.
    pub origin: (f32, f32),
}

/// Derives the VML fill geometry from the resolved background values.
///
/// `cover` and `contain` are scaled relative to the shape, so their
/// origin is the shape center regardless of `background-position`; the
/// other sizes keep the author's position. Frame mode (no-repeat)
/// shifts both decimals by −0.5 because VML frames are center-anchored.
pub fn vml_fill(size: &BackgroundSize, no_repeat: bool, position: (f32, f32)) -> VmlFill {
    let (size_attr, aspect) = match size {
        BackgroundSize::Cover => (Some("1,1".to_string()), Some("atleast")),
        BackgroundSize::Contain => (Some("1,1".to_string()), Some("atmost")),
        BackgroundSize::Explicit {
            width,
            height: Some(height),
        } => (Some(format!("{width},{height}")), None),
        BackgroundSize::Explicit {
            width,
            height: None,
        } => (Some(width.clone()), Some("atmost")),
        BackgroundSize::Auto => (None, None),
    };
    let base = match size {
        BackgroundSize::Cover | BackgroundSize::Contain => (0.5, 0.5),
        _ => position,
    };
    let origin = if no_repeat {
        (base.0 - 0.5, base.1 - 0.5)
    } else {
        base
    };
    VmlFill {
        size: size_attr,
        aspect,
        kind: if no_repeat { "frame" } else { "tile" },
        origin,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_size_variants() {
        assert_eq!(parse_size("auto"), BackgroundSize::Auto);
        assert_eq!(parse_size(""), BackgroundSize::Auto);
        assert_eq!(parse_size("cover"), BackgroundSize::Cover);
        assert_eq!(parse_size("contain"), BackgroundSize::Contain);
        assert_eq!(
            parse_size("300px 200px"),
            BackgroundSize::Explicit {
                width: "300px".to_string(),
                height: Some("200px".to_string())
            }
        );
        assert_eq!(
            parse_size("50%"),
            BackgroundSize::Explicit {
                width: "50%".to_string(),
                height: None
            }
        );
    }

    #[test]
    fn parses_position_keywords_and_percents() {
        assert_eq!(parse_position("top center"), (0.5, 0.0));
        assert_eq!(parse_position("center"), (0.5, 0.5));
        assert_eq!(parse_position("left"), (0.0, 0.5));
        assert_eq!(parse_position("bottom right"), (1.0, 1.0));
        assert_eq!(parse_position("25% 75%"), (0.25, 0.75));
    }

    #[test]
    fn cover_no_repeat_centers_then_offsets_to_zero() {
        let fill = vml_fill(&BackgroundSize::Cover, true, parse_position("top center"));
        assert_eq!(fill.kind, "frame");
        assert_eq!(fill.size.as_deref(), Some("1,1"));
        assert_eq!(fill.aspect, Some("atleast"));
        assert_eq!(fill.origin, (0.0, 0.0));
    }

    #[test]
    fn contain_uses_atmost() {
        let fill = vml_fill(&BackgroundSize::Contain, false, (0.5, 0.0));
        assert_eq!(fill.kind, "tile");
        assert_eq!(fill.aspect, Some("atmost"));
        assert_eq!(fill.origin, (0.5, 0.5));
    }

    #[test]
    fn explicit_single_value_keeps_position() {
        let fill = vml_fill(
            &parse_size("300px"),
            false,
            parse_position("top center"),
        );
        assert_eq!(fill.size.as_deref(), Some("300px"));
        assert_eq!(fill.aspect, Some("atmost"));
        assert_eq!(fill.origin, (0.5, 0.0));
    }

    #[test]
    fn explicit_pair_has_no_aspect() {
        let fill = vml_fill(&parse_size("300px 200px"), false, (0.0, 0.0));
        assert_eq!(fill.size.as_deref(), Some("300px,200px"));
        assert_eq!(fill.aspect, None);
    }

    #[test]
    fn auto_omits_size_and_aspect() {
        let fill = vml_fill(&BackgroundSize::Auto, false, (1.0, 0.5));
        assert_eq!(fill.size, None);
        assert_eq!(fill.aspect, None);
        assert_eq!(fill.origin, (1.0, 0.5));
    }
}
