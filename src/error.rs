//! Error types for cmip6kit.
//!
//! Catalog searches distinguish an empty result from a malformed catalog and
//! from a failure while reading the diagnostic dataset. Callers that only want
//! the "all absent" behaviour can convert any of these into a
//! [`SearchResult`](crate::summary::SearchResult).

use thiserror::Error;

/// The main error type for cmip6kit operations.
#[derive(Error, Debug)]
pub enum Cmip6Error {
    /// NetCDF file operation errors
    #[cfg(feature = "netcdf")]
    #[error("NetCDF error: {0}")]
    NetCdf(#[from] netcdf::Error),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Arrow errors raised while building or filtering the catalog table
    #[error("Arrow error: {0}")]
    Arrow(#[from] arrow_schema::ArrowError),

    /// Configuration errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Invalid parameter errors
    #[error("Invalid parameter: {param} - {message}")]
    InvalidParameter { param: String, message: String },

    /// The catalog search matched no records
    #[error("No catalog records match query: {query}")]
    EmptyResult { query: String },

    /// A column required by the summary is missing or not a string column
    #[error("Catalog column missing or malformed: {column}")]
    MissingColumn { column: String },

    /// An ensemble member id without an `r<N>i<M>` prefix
    #[error("Malformed ensemble member id: {member}")]
    MalformedMember { member: String },

    /// Diagnostic dataset errors (missing variable, bad shape)
    #[error("Dataset error: {message}")]
    Dataset { message: String },

    /// Image generation errors
    #[error("Image generation error: {message}")]
    ImageGeneration { message: String },

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Cmip6Error {
    /// Whether this error means "the search found nothing usable" as opposed
    /// to an I/O or dataset failure.
    pub fn is_empty_result(&self) -> bool {
        matches!(
            self,
            Cmip6Error::EmptyResult { .. }
                | Cmip6Error::MissingColumn { .. }
                | Cmip6Error::MalformedMember { .. }
        )
    }
}

/// Convenience type alias for Results with Cmip6Error
pub type Result<T> = std::result::Result<T, Cmip6Error>;
