//! Error types for resolution and configuration.

use std::path::PathBuf;

use radiodns_bearer::{BearerError, CountryTableError};
use thiserror::Error;

/// The CNAME lookup failed for a reason other than "no record".
#[derive(Error, Debug)]
#[error("CNAME lookup for {fqdn} failed: {source}")]
pub struct LookupError {
    /// The name that was being looked up.
    pub fqdn: String,
    #[source]
    pub source: Box<dyn std::error::Error + Send + Sync>,
}

impl LookupError {
    pub fn new(
        fqdn: impl Into<String>,
        source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        Self {
            fqdn: fqdn.into(),
            source: source.into(),
        }
    }
}

/// Failure loading a [`ResolverConfig`](crate::ResolverConfig) or the
/// country table it names.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config: {0}")]
    Toml(#[from] toml::de::Error),

    #[error(transparent)]
    CountryTable(#[from] CountryTableError),

    /// Country tables must end in `.json` or `.csv`.
    #[error("Unsupported country table format: {}", .0.display())]
    UnsupportedTable(PathBuf),
}

/// Any failure of a resolution request.
#[derive(Error, Debug)]
pub enum ResolveError {
    /// The bearer could not be built or has no FQDN.
    #[error(transparent)]
    Bearer(#[from] BearerError),

    #[error(transparent)]
    Lookup(#[from] LookupError),
}
