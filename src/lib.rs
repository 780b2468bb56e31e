//! # cmip6kit
//!
//! Helpers for CMIP6 climate-model workflows.
//!
//! ## Key Features
//!
//! - **Catalog search summaries**: find the models, institutions and ensemble
//!   members that provide monthly output of a variable for a scenario
//! - **Discrete colormaps**: sample matplotlib-style colormaps into a fixed
//!   number of bins with under/over/bad colors
//!
//! ## Architecture
//!
//! - **Catalog layer**: in-memory Arrow tables loaded from ESM collection
//!   files, searched by facet
//! - **Summary layer**: reduces matching records to a [`SearchSummary`]
//! - **Dataset layer**: optional NetCDF reads for search diagnostics
//! - **Colormaps**: continuous base maps and [`ListedColormap`]

pub mod catalog;
pub mod colormaps;
pub mod config;
pub mod dataset;
pub mod error;
pub mod logging;
pub mod members;
pub mod query;
pub mod search;
pub mod summary;

pub use catalog::{Catalog, CatalogFrame, CatalogRecord, EsmCatalog};
pub use colormaps::{
    create_discrete_colormap, get_colormap, Colormap, DiscreteColormapBuilder, ListedColormap,
};
pub use config::Config;
pub use dataset::{Dataset, DatasetOpener};
#[cfg(feature = "netcdf")]
pub use dataset::NetcdfOpener;
pub use error::{Cmip6Error, Result};
pub use logging::{RecordingLogger, SearchLogger, TracingLogger};
pub use members::{sort_and_filter_members, MemberId};
pub use query::{Activity, SearchQuery};
pub use search::{search, CatalogSearch};
pub use summary::{most_frequent, InstitutionOverrides, SearchResult, SearchSummary};
