use config::{Config as ConfigLoader, Environment, File};
use serde::Deserialize;
use std::env;
use std::path::{Path, PathBuf};

use super::error::Error;

/// Environment variable naming an explicit configuration file.
pub const CONFIG_PATH_ENV: &str = "SSSP_CONFIG";

/// File looked up in the working directory when `SSSP_CONFIG` is unset.
pub const DEFAULT_CONFIG_FILE: &str = "Config.toml";

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    /// Source vertex for the single-source engines.
    pub source: usize,
    /// Edges a Bellman-Ford worker claims per scheduling step.
    pub edge_chunk_size: usize,
    /// Floyd-Warshall logs a size warning above this many vertices.
    pub floyd_warshall_warn_nodes: usize,
}

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct LoggingConfig {
    /// `tracing` filter directive used when `RUST_LOG` is unset.
    pub level: String,
}

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct Config {
    pub engine: EngineConfig,
    pub logging: LoggingConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            engine: EngineConfig {
                source: 0,
                edge_chunk_size: sssp_core::bellman_ford::DEFAULT_EDGE_CHUNK_SIZE,
                floyd_warshall_warn_nodes: 2000,
            },
            logging: LoggingConfig {
                level: "info".to_string(),
            },
        }
    }
}

/// Loads configuration from `SSSP_CONFIG` (or `Config.toml` in the current
/// directory) and `SSSP_*` environment variables.
///
/// A missing file is not an error; built-in defaults apply.
pub fn load_config() -> Result<Config, Error> {
    let config_file_path: PathBuf = match env::var_os(CONFIG_PATH_ENV) {
        Some(path) => PathBuf::from(path),
        None => env::current_dir()
            .map_err(|e| {
                Error::ConfigLoadError(format!("Failed to determine current directory: {}", e))
            })?
            .join(DEFAULT_CONFIG_FILE),
    };

    load_config_from(&config_file_path)
}

/// Defaults, then the optional file at `path`, then environment overrides such
/// as `SSSP_ENGINE__EDGE_CHUNK_SIZE=512`.
pub fn load_config_from(path: &Path) -> Result<Config, Error> {
    let defaults = Config::default();

    let s = ConfigLoader::builder()
        .set_default("engine.source", defaults.engine.source as u64)
        .and_then(|b| {
            b.set_default(
                "engine.edge_chunk_size",
                defaults.engine.edge_chunk_size as u64,
            )
        })
        .and_then(|b| {
            b.set_default(
                "engine.floyd_warshall_warn_nodes",
                defaults.engine.floyd_warshall_warn_nodes as u64,
            )
        })
        .and_then(|b| b.set_default("logging.level", defaults.logging.level))
        .map_err(|e| Error::ConfigLoadError(e.to_string()))?
        .add_source(File::from(path).required(false))
        .add_source(
            Environment::with_prefix("SSSP")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        )
        .build()
        .map_err(|e| Error::ConfigLoadError(e.to_string()))?;

    let app_config: Config = s
        .try_deserialize()
        .map_err(|e| Error::ConfigLoadError(format!("Failed to deserialize config: {}", e)))?;

    if app_config.engine.edge_chunk_size == 0 {
        return Err(Error::ConfigLoadError(
            "engine.edge_chunk_size must be at least 1".to_string(),
        ));
    }

    Ok(app_config)
}
