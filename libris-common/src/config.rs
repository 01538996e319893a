//! Configuration loading and resolution
//!
//! Settings are resolved in priority order:
//! 1. Command-line argument (highest priority)
//! 2. Environment variable
//! 3. TOML config file (`<config dir>/libris/config.toml`)
//! 4. Compiled default (fallback)

use crate::{Error, Result};
use serde::Deserialize;
use std::path::PathBuf;

/// Default TCP port for the catalog service
pub const DEFAULT_PORT: u16 = 5840;

/// Default page size for paginated listings
pub const DEFAULT_PAGE_SIZE: i64 = 20;

/// Resolved service configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Address to bind the HTTP listener to
    pub bind_address: String,
    /// TCP port for the HTTP listener
    pub port: u16,
    /// Path to the SQLite database file
    pub database_path: PathBuf,
    /// Page size for paginated listings
    pub page_size: i64,
}

/// Subset of settings readable from the TOML config file
#[derive(Debug, Default, Deserialize)]
struct FileConfig {
    bind_address: Option<String>,
    port: Option<u16>,
    database: Option<PathBuf>,
    page_size: Option<i64>,
}

impl Config {
    /// Resolve configuration from CLI arguments, environment, config file and
    /// defaults, in that order.
    pub fn resolve(
        cli_port: Option<u16>,
        cli_database: Option<PathBuf>,
        cli_config_file: Option<PathBuf>,
    ) -> Result<Config> {
        let file = match cli_config_file.or_else(default_config_file) {
            Some(path) if path.exists() => load_config_file(&path)?,
            _ => FileConfig::default(),
        };

        let port = cli_port
            .or_else(|| env_parse("LIBRIS_PORT"))
            .or(file.port)
            .unwrap_or(DEFAULT_PORT);

        let database_path = cli_database
            .or_else(|| std::env::var("LIBRIS_DATABASE").ok().map(PathBuf::from))
            .or(file.database)
            .unwrap_or_else(default_database_path);

        let bind_address = std::env::var("LIBRIS_BIND")
            .ok()
            .or(file.bind_address)
            .unwrap_or_else(|| "127.0.0.1".to_string());

        let page_size = env_parse("LIBRIS_PAGE_SIZE")
            .or(file.page_size)
            .unwrap_or(DEFAULT_PAGE_SIZE);

        if page_size < 1 {
            return Err(Error::Config(format!(
                "page_size must be positive (got {})",
                page_size
            )));
        }

        Ok(Config {
            bind_address,
            port,
            database_path,
            page_size,
        })
    }
}

fn env_parse<T: std::str::FromStr>(name: &str) -> Option<T> {
    std::env::var(name).ok().and_then(|v| v.parse().ok())
}

fn load_config_file(path: &PathBuf) -> Result<FileConfig> {
    let content = std::fs::read_to_string(path)?;
    toml::from_str(&content)
        .map_err(|e| Error::Config(format!("Failed to parse {}: {}", path.display(), e)))
}

/// Default configuration file path for the platform
fn default_config_file() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("libris").join("config.toml"))
}

/// Default database location: `<data dir>/libris/libris.db`
fn default_database_path() -> PathBuf {
    dirs::data_local_dir()
        .map(|d| d.join("libris"))
        .unwrap_or_else(|| PathBuf::from("./libris_data"))
        .join("libris.db")
}
