//! Gradient-backed colormaps.
//!
//! Matplotlib names resolved to `colorgrad` presets. Sequential, diverging and
//! perceptually uniform maps all live here; only the maps `colorgrad` lacks
//! are tabulated in [`super::diverging`].

use colorgrad::{Color, CustomGradient, Gradient};

use crate::error::{Cmip6Error, Result};

/// Names accepted by [`preset`], spelled as matplotlib registers them
pub const PRESET_NAMES: &[&str] = &[
    "viridis", "plasma", "inferno", "magma", "cividis", "turbo", "gray", "grey", "Spectral",
    "RdBu", "RdYlBu", "RdYlGn", "RdGy", "BrBG", "PiYG", "PRGn", "PuOr", "Blues", "Greens",
    "Greys", "Oranges", "Purples", "Reds", "BuGn", "BuPu", "GnBu", "OrRd", "PuBu", "PuBuGn",
    "PuRd", "RdPu", "YlGn", "YlGnBu", "YlOrBr", "YlOrRd",
];

/// Gradient for a matplotlib colormap name, or `None` if the name is unknown.
///
/// Names are case-sensitive: `RdBu` resolves, `rdbu` does not.
pub fn preset(name: &str) -> Result<Option<Gradient>> {
    let gradient = match name {
        // perceptually uniform
        "viridis" => colorgrad::viridis(),
        "plasma" => colorgrad::plasma(),
        "inferno" => colorgrad::inferno(),
        "magma" => colorgrad::magma(),
        "cividis" => colorgrad::cividis(),
        "turbo" => colorgrad::turbo(),
        "gray" | "grey" => gray()?,

        // diverging
        "Spectral" => colorgrad::spectral(),
        "RdBu" => colorgrad::rd_bu(),
        "RdYlBu" => colorgrad::rd_yl_bu(),
        "RdYlGn" => colorgrad::rd_yl_gn(),
        "RdGy" => colorgrad::rd_gy(),
        "BrBG" => colorgrad::br_bg(),
        "PiYG" => colorgrad::pi_yg(),
        "PRGn" => colorgrad::pr_gn(),
        "PuOr" => colorgrad::pu_or(),

        // single and multi hue
        "Blues" => colorgrad::blues(),
        "Greens" => colorgrad::greens(),
        "Greys" => colorgrad::greys(),
        "Oranges" => colorgrad::oranges(),
        "Purples" => colorgrad::purples(),
        "Reds" => colorgrad::reds(),
        "BuGn" => colorgrad::bu_gn(),
        "BuPu" => colorgrad::bu_pu(),
        "GnBu" => colorgrad::gn_bu(),
        "OrRd" => colorgrad::or_rd(),
        "PuBu" => colorgrad::pu_bu(),
        "PuBuGn" => colorgrad::pu_bu_gn(),
        "PuRd" => colorgrad::pu_rd(),
        "RdPu" => colorgrad::rd_pu(),
        "YlGn" => colorgrad::yl_gn(),
        "YlGnBu" => colorgrad::yl_gn_bu(),
        "YlOrBr" => colorgrad::yl_or_br(),
        "YlOrRd" => colorgrad::yl_or_rd(),
        _ => return Ok(None),
    };
    Ok(Some(gradient))
}

/// Black to white
fn gray() -> Result<Gradient> {
    CustomGradient::new()
        .colors(&[
            Color::new(0.0, 0.0, 0.0, 1.0),
            Color::new(1.0, 1.0, 1.0, 1.0),
        ])
        .build()
        .map_err(|e| Cmip6Error::InvalidParameter {
            param: "colormap".to_string(),
            message: format!("Failed to build gray gradient: {}", e),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_presets_resolve() {
        for name in PRESET_NAMES {
            assert!(preset(name).unwrap().is_some(), "missing preset {}", name);
        }
        assert!(preset("jet").unwrap().is_none());
        assert!(preset("rdbu").unwrap().is_none());
        assert!(preset("VIRIDIS").unwrap().is_none());
    }

    #[test]
    fn test_viridis_endpoints() {
        let viridis = preset("viridis").unwrap().unwrap();
        let low = viridis.at(0.0).to_rgba8();
        let high = viridis.at(1.0).to_rgba8();

        // dark purple to yellow
        assert!(low[2] > low[1]);
        assert!(high[0] > 200 && high[1] > 200 && high[2] < 100);
    }

    #[test]
    fn test_gray_endpoints() {
        let gray = preset("gray").unwrap().unwrap();
        assert_eq!(gray.at(0.0).to_rgba8(), [0, 0, 0, 255]);
        assert_eq!(gray.at(1.0).to_rgba8(), [255, 255, 255, 255]);
    }
}
