use std::env;
use std::path::Path;

use super::ConfigError;
use super::probe_config::{Config, validate};

pub struct AppConfig {
    pub config: Config,
    pub max_cluster_width: usize,
}

/// Load the application configuration from a YAML file.
/// A `.env` file in the working directory is applied first, if present.
/// The file is taken from the `CONFIG_FILE` environment variable and
/// defaults to `config.yml`.
pub fn load_config() -> Result<AppConfig, ConfigError> {
    let _ = dotenvy::dotenv();

    let config_file_location =
        env::var("CONFIG_FILE").unwrap_or_else(|_| "config.yml".to_string());
    log::info!("Using config file: {}", config_file_location);

    load_config_from(Path::new(&config_file_location))
}

/// Load and validate the configuration stored at `path`.
pub fn load_config_from(path: &Path) -> Result<AppConfig, ConfigError> {
    let config_str = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let config: Config = serde_yaml::from_str(&config_str).map_err(|source| ConfigError::Yaml {
        path: path.to_path_buf(),
        source,
    })?;
    validate(&config)?;

    let max_cluster_width = config.keys().map(|name| name.len()).max().unwrap_or(10);

    Ok(AppConfig {
        config,
        max_cluster_width,
    })
}
