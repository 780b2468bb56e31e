//! Discrete colormaps.
//!
//! A [`ListedColormap`] holds a fixed list of colors, one per bin, plus the
//! colors used for values below the range ("under"), above it ("over") and
//! for invalid values ("bad"). Unset, under and over fall back to the first
//! and last bin colors and bad is transparent.

use image::{Rgba as Pixel, RgbaImage};
use tracing::debug;

use super::color::{parse_color, to_hex};
use super::colormap::{get_colormap, Colormap, Rgba, TRANSPARENT};
use crate::error::{Cmip6Error, Result};

/// Default base colormap
pub const DEFAULT_COLORMAP: &str = "viridis";

/// Default number of discrete colors
pub const DEFAULT_STEPS: usize = 11;

/// A colormap with a finite number of color bins
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListedColormap {
    name: String,
    colors: Vec<Rgba>,
    under: Option<Rgba>,
    over: Option<Rgba>,
    bad: Option<Rgba>,
}

impl ListedColormap {
    /// Build a colormap from bin colors, low to high
    pub fn new(name: impl Into<String>, colors: Vec<Rgba>) -> Result<Self> {
        if colors.is_empty() {
            return Err(Cmip6Error::InvalidParameter {
                param: "colors".to_string(),
                message: "A listed colormap needs at least one color".to_string(),
            });
        }
        Ok(Self {
            name: name.into(),
            colors,
            under: None,
            over: None,
            bad: None,
        })
    }

    /// Number of bins
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    /// Always false; construction rejects empty color lists
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// Bin colors, low to high
    pub fn colors(&self) -> &[Rgba] {
        &self.colors
    }

    pub fn set_under(&mut self, color: Rgba) {
        self.under = Some(color);
    }

    pub fn set_over(&mut self, color: Rgba) {
        self.over = Some(color);
    }

    pub fn set_bad(&mut self, color: Rgba) {
        self.bad = Some(color);
    }

    /// Color for values below the range
    pub fn under(&self) -> Rgba {
        self.under.unwrap_or(self.colors[0])
    }

    /// Color for values above the range
    pub fn over(&self) -> Rgba {
        self.over.unwrap_or(self.colors[self.colors.len() - 1])
    }

    /// Color for invalid values
    pub fn bad(&self) -> Rgba {
        self.bad.unwrap_or(TRANSPARENT)
    }

    /// Whether an explicit under color was set
    pub fn has_under(&self) -> bool {
        self.under.is_some()
    }

    /// Whether an explicit over color was set
    pub fn has_over(&self) -> bool {
        self.over.is_some()
    }

    /// Bin colors as hex strings
    pub fn hex_colors(&self) -> Vec<String> {
        self.colors.iter().copied().map(to_hex).collect()
    }

    /// Render a horizontal colorbar.
    ///
    /// Explicit under/over colors get a square cap at the matching end.
    pub fn render_colorbar(&self, width: u32, height: u32) -> Result<RgbaImage> {
        let left = if self.has_under() { height } else { 0 };
        let right = if self.has_over() { height } else { 0 };

        let bar_width = width.saturating_sub(left + right);
        if bar_width == 0 || height == 0 {
            return Err(Cmip6Error::ImageGeneration {
                message: format!(
                    "Colorbar of {}x{} has no room for {} colors",
                    width,
                    height,
                    self.len()
                ),
            });
        }

        let bins = self.colors.len() as u64;
        let img = RgbaImage::from_fn(width, height, |x, _| {
            let color = if x < left {
                self.under()
            } else if x >= left + bar_width {
                self.over()
            } else {
                let index = (u64::from(x - left) * bins / u64::from(bar_width)) as usize;
                self.colors[index.min(self.colors.len() - 1)]
            };
            Pixel(color)
        });

        debug!(
            colormap = %self.name,
            width = width,
            height = height,
            bins = bins,
            "Rendered colorbar"
        );
        Ok(img)
    }
}

impl Colormap for ListedColormap {
    fn map_normalized(&self, value: f64) -> Rgba {
        if value.is_nan() {
            return self.bad();
        }
        if value < 0.0 {
            return self.under();
        }
        if value > 1.0 {
            return self.over();
        }
        let index = (value * self.colors.len() as f64) as usize;
        self.colors[index.min(self.colors.len() - 1)]
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// Builds a [`ListedColormap`] by sampling a continuous base colormap
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscreteColormapBuilder {
    base: String,
    steps: usize,
    under: Option<String>,
    over: Option<String>,
    bad: Option<String>,
}

impl Default for DiscreteColormapBuilder {
    fn default() -> Self {
        Self {
            base: DEFAULT_COLORMAP.to_string(),
            steps: DEFAULT_STEPS,
            under: None,
            over: None,
            bad: None,
        }
    }
}

impl DiscreteColormapBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Base colormap name
    pub fn base(mut self, name: impl Into<String>) -> Self {
        self.base = name.into();
        self
    }

    /// Number of discrete colors
    pub fn steps(mut self, steps: usize) -> Self {
        self.steps = steps;
        self
    }

    /// Color for values below the range
    pub fn under(mut self, color: Option<impl Into<String>>) -> Self {
        self.under = color.map(Into::into);
        self
    }

    /// Color for values above the range
    pub fn over(mut self, color: Option<impl Into<String>>) -> Self {
        self.over = color.map(Into::into);
        self
    }

    /// Color for invalid values
    pub fn bad(mut self, color: Option<impl Into<String>>) -> Self {
        self.bad = color.map(Into::into);
        self
    }

    /// Sample `steps` evenly spaced colors from the base colormap, both ends
    /// included.
    pub fn build(&self) -> Result<ListedColormap> {
        if self.steps == 0 {
            return Err(Cmip6Error::InvalidParameter {
                param: "steps".to_string(),
                message: "Step count must be at least 1".to_string(),
            });
        }

        let base = get_colormap(&self.base)?;
        let colors = linspace(self.steps)
            .map(|t| base.map_normalized(t))
            .collect();

        let mut colormap = ListedColormap::new(base.name(), colors)?;
        if let Some(under) = &self.under {
            colormap.set_under(parse_color(under)?);
        }
        if let Some(over) = &self.over {
            colormap.set_over(parse_color(over)?);
        }
        if let Some(bad) = &self.bad {
            colormap.set_bad(parse_color(bad)?);
        }

        debug!(
            base = %self.base,
            steps = self.steps,
            "Built discrete colormap"
        );
        Ok(colormap)
    }
}

/// Build a discrete colormap from `colormap` with `steps` colors
pub fn create_discrete_colormap(
    colormap: &str,
    steps: usize,
    under: Option<&str>,
    over: Option<&str>,
    bad: Option<&str>,
) -> Result<ListedColormap> {
    DiscreteColormapBuilder::new()
        .base(colormap)
        .steps(steps)
        .under(under)
        .over(over)
        .bad(bad)
        .build()
}

/// `steps` evenly spaced points in [0, 1]; a single step samples 0
fn linspace(steps: usize) -> impl Iterator<Item = f64> {
    let last = steps.saturating_sub(1).max(1) as f64;
    (0..steps).map(move |i| i as f64 / last)
}
