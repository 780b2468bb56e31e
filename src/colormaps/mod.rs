//! Colormaps for plotting climate fields.
//!
//! Continuous base colormaps follow matplotlib naming; [`listed`] turns them
//! into discrete colormaps with under/over/bad colors.

pub mod color;
pub mod colormap;
pub mod diverging;
pub mod listed;
pub mod sequential;

pub use color::{parse_color, to_hex};
pub use colormap::{get_colormap, Colormap, GradientColormap, Reversed, Rgba, TRANSPARENT};
pub use diverging::{Coolwarm, Seismic};
pub use listed::{
    create_discrete_colormap, DiscreteColormapBuilder, ListedColormap, DEFAULT_COLORMAP,
    DEFAULT_STEPS,
};
