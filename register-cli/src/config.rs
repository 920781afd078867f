//! TOML configuration for the `register` binary.
//!
//! ```toml
//! [logging]
//! level = "info"
//! stdout = true
//! file = "register.log"
//!
//! [catalog]
//! activities = "activities.csv"
//! shirt_colors = "shirt_colors.csv"
//! ```
//!
//! Every key is optional. Relative catalog paths resolve against the
//! directory holding the config file.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config '{path}': {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("[catalog] needs both 'activities' and 'shirt_colors', or neither")]
    IncompleteCatalog,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegisterConfig {
    pub logging: LoggingConfig,
    pub catalog: CatalogConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// EnvFilter directive, e.g. `info` or `warn,register_core=debug`.
    pub level: String,
    pub stdout: bool,
    pub file: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            stdout: true,
            file: None,
        }
    }
}

/// Catalog CSVs. The bundled catalog is used when both are absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    pub activities: Option<PathBuf>,
    pub shirt_colors: Option<PathBuf>,
}

impl CatalogConfig {
    /// Both paths, or `None` for the bundled catalog.
    pub fn paths(&self) -> Result<Option<(&Path, &Path)>, ConfigError> {
        match (&self.activities, &self.shirt_colors) {
            (Some(activities), Some(colors)) => Ok(Some((activities, colors))),
            (None, None) => Ok(None),
            _ => Err(ConfigError::IncompleteCatalog),
        }
    }

    fn resolve_against(
        &mut self,
        base: &Path,
    ) {
        for path in [&mut self.activities, &mut self.shirt_colors]
            .into_iter()
            .flatten()
        {
            if path.is_relative() {
                *path = base.join(&*path);
            }
        }
    }
}

impl RegisterConfig {
    /// Reads `path`, resolving relative catalog paths against its directory.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let mut config: RegisterConfig =
            toml::from_str(&contents).map_err(|source| ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            })?;

        if let Some(base) = path.parent() {
            config.catalog.resolve_against(base);
        }
        config.catalog.paths()?;
        Ok(config)
    }

    /// Loads `path` when given, otherwise returns the defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }
}
