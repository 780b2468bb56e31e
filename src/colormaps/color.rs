//! Color specifications.
//!
//! Accepts the color strings matplotlib users pass around: CSS names and hex
//! codes, the single-letter base colors, grey levels written as a number in
//! `[0, 1]`, and `"none"`.

use colorgrad::Color;

use super::colormap::{Rgba, TRANSPARENT};
use crate::error::{Cmip6Error, Result};

/// Matplotlib single-letter base colors
const BASE_COLORS: [(&str, [f64; 3]); 8] = [
    ("b", [0.0, 0.0, 1.0]),
    ("g", [0.0, 0.5, 0.0]),
    ("r", [1.0, 0.0, 0.0]),
    ("c", [0.0, 0.75, 0.75]),
    ("m", [0.75, 0.0, 0.75]),
    ("y", [0.75, 0.75, 0.0]),
    ("k", [0.0, 0.0, 0.0]),
    ("w", [1.0, 1.0, 1.0]),
];

/// Parse a color specification into RGBA
pub fn parse_color(spec: &str) -> Result<Rgba> {
    let spec = spec.trim();

    if spec.eq_ignore_ascii_case("none") {
        return Ok(TRANSPARENT);
    }

    if let Some((_, [r, g, b])) = BASE_COLORS.iter().find(|(code, _)| *code == spec) {
        return Ok(Color::new(*r, *g, *b, 1.0).to_rgba8());
    }

    if let Ok(level) = spec.parse::<f64>() {
        if !(0.0..=1.0).contains(&level) {
            return Err(invalid_color(spec, "grey level must be within [0, 1]"));
        }
        return Ok(Color::new(level, level, level, 1.0).to_rgba8());
    }

    Color::from_html(spec)
        .map(|color| color.to_rgba8())
        .map_err(|e| invalid_color(spec, &e.to_string()))
}

/// Hex form of a color, `#rrggbb` or `#rrggbbaa` when not opaque
pub fn to_hex(color: Rgba) -> String {
    let [r, g, b, a] = color;
    if a == 255 {
        format!("#{:02x}{:02x}{:02x}", r, g, b)
    } else {
        format!("#{:02x}{:02x}{:02x}{:02x}", r, g, b, a)
    }
}

fn invalid_color(spec: &str, reason: &str) -> Cmip6Error {
    Cmip6Error::InvalidParameter {
        param: "color".to_string(),
        message: format!("Invalid color {:?}: {}", spec, reason),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_named_colors() {
        assert_eq!(parse_color("black").unwrap(), [0, 0, 0, 255]);
        assert_eq!(parse_color("white").unwrap(), [255, 255, 255, 255]);
        assert_eq!(parse_color("#ff0000").unwrap(), [255, 0, 0, 255]);
    }

    #[test]
    fn test_base_colors() {
        assert_eq!(parse_color("k").unwrap(), [0, 0, 0, 255]);
        assert_eq!(parse_color("r").unwrap(), [255, 0, 0, 255]);
    }

    #[test]
    fn test_grey_levels() {
        assert_eq!(parse_color("0").unwrap(), [0, 0, 0, 255]);
        assert_eq!(parse_color("1.0").unwrap(), [255, 255, 255, 255]);
        assert!(parse_color("1.5").is_err());
    }

    #[test]
    fn test_none_is_transparent() {
        assert_eq!(parse_color("none").unwrap(), TRANSPARENT);
    }

    #[test]
    fn test_invalid_color() {
        match parse_color("not-a-color") {
            Err(Cmip6Error::InvalidParameter { param, .. }) => assert_eq!(param, "color"),
            other => panic!("Expected InvalidParameter, got {:?}", other),
        }
    }

    #[test]
    fn test_to_hex() {
        assert_eq!(to_hex([68, 1, 84, 255]), "#440154");
        assert_eq!(to_hex([0, 0, 0, 0]), "#00000000");
    }
}
