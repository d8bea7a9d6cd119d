use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::{
    common::errors::{MovieBoxError, Result},
    configs::*,
};

const CONFIG_CANDIDATES: [&str; 2] = ["moviebox.toml", "config.default.toml"];

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,
    pub logging: Option<LoggingConfig>,
}

impl Config {
    /// Loads the configuration.
    ///
    /// An explicit path must exist. Without one, the first existing candidate
    /// in the working directory is used, and built-in defaults otherwise.
    /// Returns the file that was read, if any.
    pub fn load(explicit: Option<&Path>) -> Result<(Self, Option<PathBuf>)> {
        let path = match explicit {
            Some(path) => {
                if !path.exists() {
                    return Err(MovieBoxError::Config(format!(
                        "{} not found",
                        path.display()
                    )));
                }
                Some(path.to_path_buf())
            }
            None => CONFIG_CANDIDATES
                .iter()
                .map(PathBuf::from)
                .find(|p| p.exists()),
        };

        let Some(path) = path else {
            return Ok((Self::default(), None));
        };

        let config_str = std::fs::read_to_string(&path)
            .map_err(|e| MovieBoxError::Config(format!("{}: {}", path.display(), e)))?;
        let config = Self::from_toml_str(&config_str)
            .map_err(|e| MovieBoxError::Config(format!("{}: {}", path.display(), e)))?;

        Ok((config, Some(path)))
    }

    pub fn from_toml_str(config_str: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(config_str)
    }
}
