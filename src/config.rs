//! Configuration types and loading

use eyre::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_SEED_URL: &str = "https://jsonplaceholder.typicode.com/todos";
const LOCAL_CONFIG: &str = ".tasklist.json";

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    pub seed: SeedConfig,

    /// TRACE, DEBUG, INFO, WARN or ERROR
    #[serde(rename = "log-level")]
    pub log_level: Option<String>,
}

/// Startup fetch of placeholder tasks
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct SeedConfig {
    pub enabled: bool,
    pub url: String,
    /// Records beyond this many are dropped
    pub limit: usize,
    #[serde(rename = "timeout-ms")]
    pub timeout_ms: u64,
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            url: DEFAULT_SEED_URL.to_string(),
            limit: 20,
            timeout_ms: 10_000,
        }
    }
}

impl Config {
    /// Load configuration with fallback chain
    ///
    /// An explicit path must load. Otherwise `./.tasklist.json`, then
    /// `<config dir>/tasklist/config.json`, then defaults.
    pub fn load(config_path: Option<&PathBuf>) -> Result<Self> {
        if let Some(path) = config_path {
            return Self::load_from_file(path).context(format!("Failed to load config from {}", path.display()));
        }

        match Self::load_first(Self::candidates(dirs::config_dir())) {
            Some(config) => Ok(config),
            None => {
                tracing::info!("No config file found, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Log level from the config file, read before logging is set up.
    ///
    /// Walks the same fallback chain as [`Config::load`].
    pub fn load_log_level(config_path: Option<&PathBuf>) -> Option<String> {
        let config = match config_path {
            Some(path) => Self::load_from_file(path).ok(),
            None => Self::load_first(Self::candidates(dirs::config_dir())),
        };
        config.and_then(|config| config.log_level)
    }

    fn candidates(config_dir: Option<PathBuf>) -> Vec<PathBuf> {
        std::iter::once(PathBuf::from(LOCAL_CONFIG))
            .chain(config_dir.map(|dir| dir.join("tasklist").join("config.json")))
            .collect()
    }

    /// First candidate that exists and parses.
    fn load_first(candidates: Vec<PathBuf>) -> Option<Self> {
        candidates
            .into_iter()
            .filter(|candidate| candidate.exists())
            .find_map(|candidate| match Self::load_from_file(&candidate) {
                Ok(config) => Some(config),
                Err(e) => {
                    tracing::warn!("Failed to load config from {}: {}", candidate.display(), e);
                    None
                }
            })
    }

    fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path).context("Failed to read config file")?;
        let config: Self = serde_json::from_str(&content).context("Failed to parse config file")?;
        tracing::info!("Loaded config from: {}", path.as_ref().display());
        Ok(config)
    }
}
