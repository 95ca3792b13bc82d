use std::path::PathBuf;

use config::{Config, File};
use log::info;
use once_cell::sync::OnceCell;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("The configuration has already been initialized")]
    ConfigAlreadyInitialized,

    #[error("Unable to read the configuration file: {0}")]
    UnableToReadConfig(#[from] config::ConfigError),
}

/// Configuration for the engine
#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Maximum depth, in half-moves, reached by iterative deepening
    pub max_depth: u16,

    /// Time given to the search command when none is passed on the command line, in milliseconds
    pub move_time_ms: u64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig { max_depth: 50, move_time_ms: 5000 }
    }
}

static CONFIG: OnceCell<EngineConfig> = OnceCell::new();

/// Get the configuration of the engine, or the default configuration if no file was loaded
pub fn get_config() -> &'static EngineConfig {
    CONFIG.get_or_init(EngineConfig::default)
}

/// Reads the configuration file at `path`. Missing keys take their default value.
pub fn load(path: PathBuf) -> Result<EngineConfig, ConfigError> {
    let settings = Config::builder().add_source(File::from(path)).build()?;
    Ok(settings.try_deserialize()?)
}

/// Initialize the configuration of the engine
pub fn initialize(path: PathBuf) -> Result<(), ConfigError> {
    let config = load(path.clone())?;
    info!("Configuration loaded from {}: {:?}", path.display(), config);
    CONFIG.set(config).map_err(|_| ConfigError::ConfigAlreadyInitialized)
}
