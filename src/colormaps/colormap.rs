//! Colormap trait and utilities.
//!
//! This module defines the common interface for all colormaps and resolves
//! matplotlib colormap names to implementations.

use colorgrad::Gradient;

use super::{diverging, sequential};
use crate::error::{Cmip6Error, Result};

/// RGBA color with 8-bit channels
pub type Rgba = [u8; 4];

/// Color used for invalid values unless a colormap says otherwise
pub const TRANSPARENT: Rgba = [0, 0, 0, 0];

/// Suffix selecting the reversed version of a colormap
const REVERSED_SUFFIX: &str = "_r";

/// Trait for color mapping implementations
pub trait Colormap {
    /// Map a normalized value (0.0 to 1.0) to an RGBA color
    fn map_normalized(&self, value: f64) -> Rgba;

    /// Map a value to an RGBA color given the data range
    fn map(&self, value: f64, min: f64, max: f64) -> Rgba {
        let normalized = if max > min {
            (value - min) / (max - min)
        } else {
            0.5
        };
        self.map_normalized(normalized)
    }

    /// Get the name of this colormap
    fn name(&self) -> &str;
}

/// A continuous colormap backed by a `colorgrad` gradient
pub struct GradientColormap {
    name: String,
    gradient: Gradient,
}

impl GradientColormap {
    pub fn new(name: impl Into<String>, gradient: Gradient) -> Self {
        Self {
            name: name.into(),
            gradient,
        }
    }
}

impl Colormap for GradientColormap {
    fn map_normalized(&self, value: f64) -> Rgba {
        if value.is_nan() {
            return TRANSPARENT;
        }
        let (start, end) = self.gradient.domain();
        let t = start + value.clamp(0.0, 1.0) * (end - start);
        self.gradient.at(t).to_rgba8()
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// A colormap traversed from high to low
pub struct Reversed {
    inner: Box<dyn Colormap>,
    name: String,
}

impl Reversed {
    pub fn new(inner: Box<dyn Colormap>) -> Self {
        let name = format!("{}{}", inner.name(), REVERSED_SUFFIX);
        Self { inner, name }
    }
}

impl Colormap for Reversed {
    fn map_normalized(&self, value: f64) -> Rgba {
        self.inner.map_normalized(1.0 - value)
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// Get a colormap by name
///
/// Names follow matplotlib's spelling exactly (`viridis`, `RdBu`, `Blues`);
/// a `_r` suffix reverses the map.
pub fn get_colormap(name: &str) -> Result<Box<dyn Colormap>> {
    if let Some(base) = name.strip_suffix(REVERSED_SUFFIX) {
        return Ok(Box::new(Reversed::new(get_colormap(base)?)));
    }

    match name {
        "coolwarm" => return Ok(Box::new(diverging::Coolwarm)),
        "seismic" => return Ok(Box::new(diverging::Seismic)),
        _ => {}
    }

    match sequential::preset(name)? {
        Some(gradient) => Ok(Box::new(GradientColormap::new(name, gradient))),
        None => Err(Cmip6Error::InvalidParameter {
            param: "colormap".to_string(),
            message: format!("Unknown colormap: {}", name),
        }),
    }
}

/// Linear interpolation between two colors
pub fn lerp_color(c1: [u8; 3], c2: [u8; 3], t: f64) -> [u8; 3] {
    [
        (c1[0] as f64 * (1.0 - t) + c2[0] as f64 * t) as u8,
        (c1[1] as f64 * (1.0 - t) + c2[1] as f64 * t) as u8,
        (c1[2] as f64 * (1.0 - t) + c2[2] as f64 * t) as u8,
    ]
}

/// Sample a table of evenly spaced colors with linear interpolation
pub fn sample_table(colors: &[[u8; 3]], value: f64) -> Rgba {
    if value.is_nan() || colors.is_empty() {
        return TRANSPARENT;
    }

    let position = value.clamp(0.0, 1.0) * (colors.len() - 1) as f64;
    let index = position.floor() as usize;

    if index >= colors.len() - 1 {
        let last = colors[colors.len() - 1];
        return [last[0], last[1], last[2], 255];
    }

    let t = position - index as f64;
    let rgb = lerp_color(colors[index], colors[index + 1], t);
    [rgb[0], rgb[1], rgb[2], 255]
}
