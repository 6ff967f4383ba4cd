//! Startup configuration for the diversity calculator.
//!
//! The configuration is a small YAML mapping whose two recognized keys keep
//! their historical, space-containing spellings: `data sources` (required)
//! and `custom age ranges` (optional). Everything downstream of the launcher
//! receives this object read-only, so it is loaded exactly once during
//! startup and shared from there.

use std::fs;
use std::path::{Path, PathBuf};

use directories::BaseDirs;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Folder name used beneath the user's home directory for application data.
const DATA_DIR_NAME: &str = ".diversity-calculator";
/// Configuration file name, looked up in the working directory first and the
/// application data directory second.
const CONFIG_FILE_NAME: &str = "config.yaml";

/// Failures while locating, reading, or parsing the configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The home directory could not be resolved, so the fallback location
    /// does not exist either.
    #[error("could not locate home directory")]
    NoHomeDir,
    /// No configuration file was found at any of the candidate locations.
    #[error("no configuration file found (looked for ./{CONFIG_FILE_NAME} and ~/{DATA_DIR_NAME}/{CONFIG_FILE_NAME})")]
    NotFound,
    /// The file exists but could not be read.
    #[error("failed to read {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// The file was read but is not a valid configuration mapping. A missing
    /// `data sources` key surfaces here, before any window is constructed.
    #[error("failed to parse {path}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yml::Error,
    },
}

/// One entry of the `data sources` list. Entries may be a bare name or a
/// mapping carrying a workbook path, so minimal configurations stay terse
/// while real deployments can point at their spreadsheet files.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DataSourceSpec {
    /// A name with no backing file. The model lists it as unloaded.
    Name(String),
    /// A named source backed by an Excel workbook on disk.
    Detailed {
        name: String,
        #[serde(default)]
        path: Option<PathBuf>,
        #[serde(default)]
        description: Option<String>,
    },
}

impl DataSourceSpec {
    /// Display name of the source, whichever form the entry took.
    pub fn name(&self) -> &str {
        match self {
            DataSourceSpec::Name(name) => name,
            DataSourceSpec::Detailed { name, .. } => name,
        }
    }

    /// Workbook path, when the entry provides one.
    pub fn path(&self) -> Option<&Path> {
        match self {
            DataSourceSpec::Name(_) => None,
            DataSourceSpec::Detailed { path, .. } => path.as_deref(),
        }
    }

    /// Free-form description, when the entry provides one.
    pub fn description(&self) -> Option<&str> {
        match self {
            DataSourceSpec::Name(_) => None,
            DataSourceSpec::Detailed { description, .. } => description.as_deref(),
        }
    }
}

/// The loaded configuration mapping. `data sources` has no default: a file
/// without it fails at parse time, which is the configuration error the
/// launcher propagates before constructing any window.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// The data sources the calculator will present, in file order.
    #[serde(rename = "data sources")]
    pub data_sources: Vec<DataSourceSpec>,
    /// Optional replacement for the standard age binning. Kept opaque: the
    /// model stores the labels without interpreting them.
    #[serde(rename = "custom age ranges", default)]
    pub custom_age_ranges: Option<Vec<String>>,
}

impl AppConfig {
    /// Load the configuration from the first candidate location that exists.
    pub fn load() -> Result<Self, ConfigError> {
        for candidate in Self::candidate_paths()? {
            if candidate.exists() {
                return Self::load_from(&candidate);
            }
        }
        Err(ConfigError::NotFound)
    }

    /// Load and parse the configuration from a specific file.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Parse a configuration document from YAML text.
    pub fn parse(content: &str) -> Result<Self, serde_yml::Error> {
        serde_yml::from_str(content)
    }

    /// Candidate file locations in lookup order: the working directory, then
    /// the application data directory in the user's home.
    fn candidate_paths() -> Result<Vec<PathBuf>, ConfigError> {
        let base_dirs = BaseDirs::new().ok_or(ConfigError::NoHomeDir)?;
        Ok(vec![
            PathBuf::from(CONFIG_FILE_NAME),
            base_dirs
                .home_dir()
                .join(DATA_DIR_NAME)
                .join(CONFIG_FILE_NAME),
        ])
    }

    /// Names of the configured data sources, in file order.
    pub fn data_source_names(&self) -> Vec<String> {
        self.data_sources
            .iter()
            .map(|spec| spec.name().to_string())
            .collect()
    }
}
