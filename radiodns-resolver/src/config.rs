//! Resolver configuration file.
//!
//! ```toml
//! [fqdn]
//! suffix = "radiodns.org"
//!
//! [country]
//! table = "countries.json"   # or an upstream-format .csv
//!
//! [logging]
//! level = "info"
//! ```
//!
//! Every section and key is optional.

use std::borrow::Cow;
use std::path::{Path, PathBuf};

use radiodns_bearer::{CountryTable, DEFAULT_FQDN_SUFFIX};
use tracing::info;

use crate::error::ConfigError;

/// Configuration file format.
#[derive(Debug, Clone, serde::Deserialize, Default)]
pub struct ResolverConfig {
    #[serde(default)]
    pub fqdn: FqdnSection,
    #[serde(default)]
    pub country: CountrySection,
    #[serde(default)]
    pub logging: LoggingSection,
}

#[derive(Debug, Clone, serde::Deserialize, Default)]
pub struct FqdnSection {
    pub suffix: Option<String>,
}

#[derive(Debug, Clone, serde::Deserialize, Default)]
pub struct CountrySection {
    /// Replaces the builtin country table.
    pub table: Option<PathBuf>,
}

#[derive(Debug, Clone, serde::Deserialize, Default)]
pub struct LoggingSection {
    pub level: Option<String>,
}

impl ResolverConfig {
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(contents)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&contents)?;
        info!("Loaded config from: {}", path.display());
        Ok(config)
    }

    /// FQDN suffix, `radiodns.org` unless configured.
    pub fn suffix(&self) -> &str {
        self.fqdn.suffix.as_deref().unwrap_or(DEFAULT_FQDN_SUFFIX)
    }

    pub fn log_level(&self) -> &str {
        self.logging.level.as_deref().unwrap_or("info")
    }

    /// The configured country table, or the builtin one.
    ///
    /// The file format is chosen by extension: `.json` for the resolved
    /// format, `.csv` for the upstream one.
    pub fn country_table(&self) -> Result<Cow<'static, CountryTable>, ConfigError> {
        let Some(path) = &self.country.table else {
            return Ok(Cow::Borrowed(CountryTable::builtin()));
        };

        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.clone(),
            source,
        })?;
        let table = match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => CountryTable::from_json_str(&contents)?,
            Some("csv") => CountryTable::from_csv_str(&contents)?,
            _ => return Err(ConfigError::UnsupportedTable(path.clone())),
        };
        info!(
            "Loaded country table from {} ({} countries)",
            path.display(),
            table.len()
        );

        Ok(Cow::Owned(table))
    }
}
