//! Configuration management for cmip6kit.
//!
//! This module handles the layered configuration system with the following precedence:
//! 1. Command-line arguments (highest priority)
//! 2. Environment variables
//! 3. JSON config file
//! 4. Default values (lowest priority)

use clap::{Args as ClapArgs, Parser, Subcommand};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::colormaps::{DEFAULT_COLORMAP, DEFAULT_STEPS};
use crate::error::{Cmip6Error, Result};
use crate::members::DEFAULT_MAX_INITIALIZATION;
use crate::query::DEFAULT_FREQUENCY;
use crate::summary::InstitutionOverrides;

/// Command-line arguments for cmip6kit
#[derive(Parser, Debug)]
#[command(name = "cmip6kit")]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to JSON configuration file
    #[arg(short, long, env = "CMIP6KIT_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "CMIP6KIT_LOG_LEVEL", global = true)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

/// Subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Summarize the catalog entries for a scenario and variable
    Search(SearchArgs),
    /// Print a discrete colormap and optionally render it to PNG
    Colormap(ColormapArgs),
}

/// Arguments of `cmip6kit search`
#[derive(ClapArgs, Debug, Clone)]
pub struct SearchArgs {
    /// ESM collection JSON or catalog CSV
    #[arg(long, env = "CMIP6KIT_CATALOG")]
    pub catalog: Option<PathBuf>,

    /// Experiment id, e.g. ssp585 or historical
    #[arg(short, long)]
    pub scenario: String,

    /// Variable id, e.g. tas
    #[arg(long)]
    pub variable: String,

    /// Restrict to one model (source_id)
    #[arg(short, long)]
    pub model: Option<String>,

    /// Restrict to one ensemble member (member_id)
    #[arg(long)]
    pub member: Option<String>,

    /// Log search diagnostics, including the mean of the first matched file
    #[arg(short, long)]
    pub verbose: bool,
}

/// Arguments of `cmip6kit colormap`
#[derive(ClapArgs, Debug, Clone)]
pub struct ColormapArgs {
    /// Base colormap name
    #[arg(short, long)]
    pub name: Option<String>,

    /// Number of discrete colors
    #[arg(short, long)]
    pub steps: Option<usize>,

    /// Color for values below the range
    #[arg(long)]
    pub under: Option<String>,

    /// Color for values above the range
    #[arg(long)]
    pub over: Option<String>,

    /// Color for invalid values
    #[arg(long)]
    pub bad: Option<String>,

    /// Write a colorbar PNG to this path
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Colorbar width in pixels
    #[arg(long, default_value = "440")]
    pub width: u32,

    /// Colorbar height in pixels
    #[arg(long, default_value = "40")]
    pub height: u32,
}

/// Catalog configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// ESM collection JSON or catalog CSV
    #[serde(default)]
    pub path: Option<PathBuf>,
}

/// Search configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Output frequency to search for
    #[serde(default = "default_frequency")]
    pub frequency: String,

    /// Members with an initialization index at or above this are dropped
    #[serde(default = "default_max_initialization")]
    pub max_initialization: u64,

    /// Extra model → institution overrides, applied over the built-in ones
    #[serde(default = "InstitutionOverrides::empty")]
    pub institution_overrides: InstitutionOverrides,
}

/// Colormap configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColormapConfig {
    /// Base colormap name
    #[serde(default = "default_colormap")]
    pub name: String,

    /// Number of discrete colors
    #[serde(default = "default_steps")]
    pub steps: usize,
}

/// Complete configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub catalog: CatalogConfig,

    #[serde(default)]
    pub search: SearchConfig,

    #[serde(default)]
    pub colormap: ColormapConfig,

    /// Log level
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Config {
    /// Load configuration from all sources with proper precedence
    pub fn load() -> Result<(Self, Command)> {
        let args = Args::parse();
        let config = Self::from_args(&args)?;
        Ok((config, args.command))
    }

    /// Build the configuration for already parsed arguments
    pub fn from_args(args: &Args) -> Result<Self> {
        // Start with defaults
        let mut config = Config::default();

        // Load from JSON file if provided
        if let Some(config_path) = &args.config {
            let json_config = Self::load_from_file(config_path)?;
            config.merge(json_config);
        }

        // Override with command-line arguments
        if let Some(level) = &args.log_level {
            config.log_level = level.clone();
        }
        match &args.command {
            Command::Search(search) => {
                if search.catalog.is_some() {
                    config.catalog.path = search.catalog.clone();
                }
            }
            Command::Colormap(colormap) => {
                if let Some(name) = &colormap.name {
                    config.colormap.name = name.clone();
                }
                if let Some(steps) = colormap.steps {
                    config.colormap.steps = steps;
                }
            }
        }

        Ok(config)
    }

    /// Load configuration from a JSON file
    fn load_from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Merge another config into this one (other takes precedence)
    fn merge(&mut self, other: Config) {
        if other.catalog.path.is_some() {
            self.catalog.path = other.catalog.path;
        }
        self.search.frequency = other.search.frequency;
        self.search.max_initialization = other.search.max_initialization;
        self.search
            .institution_overrides
            .extend(&other.search.institution_overrides);
        self.colormap = other.colormap;
        self.log_level = other.log_level;
    }

    /// Built-in institution overrides with the configured ones applied on top
    pub fn institution_overrides(&self) -> InstitutionOverrides {
        let mut overrides = InstitutionOverrides::default();
        overrides.extend(&self.search.institution_overrides);
        overrides
    }

    /// Catalog path, required for searching
    pub fn catalog_path(&self) -> Result<&Path> {
        self.catalog
            .path
            .as_deref()
            .ok_or_else(|| Cmip6Error::Config {
                message: "No catalog given; use --catalog or CMIP6KIT_CATALOG".to_string(),
            })
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        match self.log_level.as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            _ => {
                return Err(Cmip6Error::Config {
                    message: format!(
                        "Invalid log level: {}. Must be one of: trace, debug, info, warn, error",
                        self.log_level
                    ),
                });
            }
        }

        if self.search.frequency.trim().is_empty() {
            return Err(Cmip6Error::Config {
                message: "Search frequency cannot be empty".to_string(),
            });
        }

        if self.colormap.steps == 0 {
            return Err(Cmip6Error::Config {
                message: "Colormap steps must be at least 1".to_string(),
            });
        }

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            catalog: CatalogConfig::default(),
            search: SearchConfig::default(),
            colormap: ColormapConfig::default(),
            log_level: default_log_level(),
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            frequency: default_frequency(),
            max_initialization: default_max_initialization(),
            institution_overrides: InstitutionOverrides::empty(),
        }
    }
}

impl Default for ColormapConfig {
    fn default() -> Self {
        Self {
            name: default_colormap(),
            steps: default_steps(),
        }
    }
}

// Default value functions for serde
fn default_frequency() -> String {
    DEFAULT_FREQUENCY.to_string()
}

fn default_max_initialization() -> u64 {
    DEFAULT_MAX_INITIALIZATION
}

fn default_colormap() -> String {
    DEFAULT_COLORMAP.to_string()
}

fn default_steps() -> usize {
    DEFAULT_STEPS
}

fn default_log_level() -> String {
    "info".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.search.frequency, "mon");
        assert_eq!(config.search.max_initialization, 10);
        assert_eq!(config.colormap.name, "viridis");
        assert_eq!(config.colormap.steps, 11);
        assert_eq!(config.log_level, "info");
        assert!(config.catalog.path.is_none());
    }

    #[test]
    fn test_config_merge() {
        let mut config1 = Config::default();
        let mut config2 = Config::default();

        config2.colormap.steps = 7;
        config2.catalog.path = Some(PathBuf::from("/data/cmip6.json"));
        config2
            .search
            .institution_overrides
            .insert("CESM2", "NCAR");

        config1.merge(config2);

        assert_eq!(config1.colormap.steps, 7);
        assert_eq!(config1.catalog.path, Some(PathBuf::from("/data/cmip6.json")));

        let overrides = config1.institution_overrides();
        assert_eq!(overrides.get("CESM2"), Some("NCAR"));
        assert_eq!(overrides.get("UKESM1-0-LL"), Some("MOHC"));
    }

    #[test]
    fn test_config_validation() {
        assert!(Config::default().validate().is_ok());

        let mut config = Config::default();
        config.log_level = "invalid".to_string();
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.search.frequency = " ".to_string();
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.colormap.steps = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_catalog_path_required() {
        assert!(matches!(
            Config::default().catalog_path(),
            Err(Cmip6Error::Config { .. })
        ));
    }

    #[test]
    fn test_args_override_file() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("cmip6kit.json");
        std::fs::write(
            &path,
            r#"{"colormap": {"name": "plasma", "steps": 9}, "log_level": "debug"}"#,
        )?;

        let args = Args::parse_from([
            "cmip6kit",
            "--config",
            path.to_str().unwrap(),
            "colormap",
            "--steps",
            "5",
        ]);
        let config = Config::from_args(&args)?;

        assert_eq!(config.colormap.name, "plasma");
        assert_eq!(config.colormap.steps, 5);
        assert_eq!(config.log_level, "debug");
        Ok(())
    }

    #[test]
    fn test_search_args() -> Result<()> {
        let args = Args::parse_from([
            "cmip6kit",
            "search",
            "--catalog",
            "/data/cmip6.json",
            "--scenario",
            "ssp585",
            "--variable",
            "tas",
            "--model",
            "CanESM5",
        ]);
        let config = Config::from_args(&args)?;
        assert_eq!(config.catalog_path()?, Path::new("/data/cmip6.json"));

        match args.command {
            Command::Search(search) => {
                assert_eq!(search.scenario, "ssp585");
                assert_eq!(search.variable, "tas");
                assert_eq!(search.model.as_deref(), Some("CanESM5"));
                assert!(search.member.is_none());
                assert!(!search.verbose);
            }
            other => panic!("Expected search command, got {:?}", other),
        }
        Ok(())
    }
}
