//! Configuration management for infranet
//!
//! Provides TOML-based configuration with defaults and validation.
//! Location: ~/.infranet/config.toml

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::cli::args::Verbosity;
use crate::errors::{NetworkError, Result};
use crate::network::DEFAULT_MAX_CITIES;

/// Complete configuration for infranet
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub storage: StorageConfig,
    pub network: NetworkConfig,
    pub display: DisplayConfig,
}

/// Where the two data tables live
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub data_dir: PathBuf,
    pub cities_file: String,
    pub roads_file: String,
}

/// Capacity limits
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NetworkConfig {
    pub max_cities: usize,
    pub max_batch: usize,
}

/// Terminal output configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    pub currency: String,
    pub color_output: bool,
    pub default_verbosity: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("."),
            cities_file: "cities.txt".to_string(),
            roads_file: "roads.txt".to_string(),
        }
    }
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            max_cities: DEFAULT_MAX_CITIES,
            max_batch: 20,
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            currency: "billion RWF".to_string(),
            color_output: true,
            default_verbosity: "normal".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from file or use defaults
    pub fn load(path: Option<&Path>) -> Result<Self> {
        if let Some(config_path) = path {
            Self::load_from_file(config_path)
        } else {
            Self::load_default()
        }
    }

    /// Load configuration from specific file
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| NetworkError::ConfigError(format!("Failed to read config: {}", e)))?;

        let config: Config = toml::from_str(&contents)
            .map_err(|e| NetworkError::ConfigError(format!("Failed to parse config: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    /// Load default configuration from standard location or use built-in defaults
    pub fn load_default() -> Result<Self> {
        if let Some(config_path) = Self::default_path() {
            if config_path.exists() {
                return Self::load_from_file(&config_path);
            }
        }

        Ok(Config::default())
    }

    /// ~/.infranet/config.toml, when a home directory is known
    pub fn default_path() -> Option<PathBuf> {
        dirs::home_dir().map(|home| home.join(".infranet").join("config.toml"))
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.network.max_cities == 0 {
            return Err(NetworkError::ConfigError(
                "max_cities must be greater than 0".to_string(),
            ));
        }

        if self.network.max_batch == 0 || self.network.max_batch > self.network.max_cities {
            return Err(NetworkError::ConfigError(
                "max_batch must be between 1 and max_cities".to_string(),
            ));
        }

        let cities = self.storage.cities_file.trim();
        let roads = self.storage.roads_file.trim();
        if cities.is_empty() || roads.is_empty() {
            return Err(NetworkError::ConfigError(
                "data file names must not be empty".to_string(),
            ));
        }
        if cities == roads {
            return Err(NetworkError::ConfigError(
                "cities_file and roads_file must differ".to_string(),
            ));
        }

        self.verbosity()?;
        Ok(())
    }

    /// Save configuration to file
    pub fn save(&self, path: &Path) -> Result<()> {
        let contents = toml::to_string_pretty(self)
            .map_err(|e| NetworkError::ConfigError(format!("Failed to serialize config: {}", e)))?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| NetworkError::ConfigError(format!("Failed to create config dir: {}", e)))?;
        }

        std::fs::write(path, contents)
            .map_err(|e| NetworkError::ConfigError(format!("Failed to write config: {}", e)))?;

        Ok(())
    }

    /// Parsed `display.default_verbosity`
    pub fn verbosity(&self) -> Result<Verbosity> {
        self.display
            .default_verbosity
            .parse()
            .map_err(NetworkError::ConfigError)
    }

    /// Expand a leading `~` component to the home directory
    pub fn expand_path(path: &Path) -> PathBuf {
        if let Ok(rest) = path.strip_prefix("~") {
            if let Some(home) = dirs::home_dir() {
                return home.join(rest);
            }
        }
        path.to_path_buf()
    }

    /// Data directory, expanded
    pub fn data_dir(&self) -> PathBuf {
        Self::expand_path(&self.storage.data_dir)
    }

    pub fn cities_path(&self) -> PathBuf {
        self.data_dir().join(self.storage.cities_file.trim())
    }

    pub fn roads_path(&self) -> PathBuf {
        self.data_dir().join(self.storage.roads_file.trim())
    }
}
