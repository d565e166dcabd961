/// Runtime configuration read from the environment
use std::path::PathBuf;
use thiserror::Error;

pub const DATABASE_PATH_VAR: &str = "CATALOG_DATABASE_PATH";
pub const STORAGE_ROOT_VAR: &str = "CATALOG_STORAGE_ROOT";
pub const EVENT_BUFFER_VAR: &str = "CATALOG_EVENT_BUFFER";
pub const LOG_FILTER_VAR: &str = "RUST_LOG";

const DEFAULT_DATABASE_PATH: &str = "catalog.db";
const DEFAULT_EVENT_BUFFER: usize = 128;
const DEFAULT_LOG_FILTER: &str = "info";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{var} must be a positive integer, got {value:?}")]
    InvalidNumber { var: &'static str, value: String },

    #[error("{var} must not be empty")]
    Empty { var: &'static str },
}

/// Where the catalog keeps its rows
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DatabaseLocation {
    InMemory,
    File(PathBuf),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub database: DatabaseLocation,
    /// Local media storage root; media is kept in memory when unset
    pub storage_root: Option<PathBuf>,
    pub event_buffer: usize,
    pub log_filter: String,
}

impl AppConfig {
    /// Load `.env` (if present) and read the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        if let Ok(path) = dotenvy::dotenv() {
            tracing::debug!(path = %path.display(), "Loaded .env file");
        }
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Build the config from any variable source
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let database = match lookup(DATABASE_PATH_VAR) {
            None => DatabaseLocation::File(PathBuf::from(DEFAULT_DATABASE_PATH)),
            Some(path) if path.trim().is_empty() => {
                return Err(ConfigError::Empty {
                    var: DATABASE_PATH_VAR,
                })
            }
            Some(path) if path.trim() == ":memory:" => DatabaseLocation::InMemory,
            Some(path) => DatabaseLocation::File(PathBuf::from(path.trim())),
        };

        let storage_root = lookup(STORAGE_ROOT_VAR)
            .map(|root| root.trim().to_string())
            .filter(|root| !root.is_empty())
            .map(PathBuf::from);

        let event_buffer = match lookup(EVENT_BUFFER_VAR) {
            None => DEFAULT_EVENT_BUFFER,
            Some(value) => match value.trim().parse::<usize>() {
                Ok(buffer) if buffer > 0 => buffer,
                _ => {
                    return Err(ConfigError::InvalidNumber {
                        var: EVENT_BUFFER_VAR,
                        value,
                    })
                }
            },
        };

        let log_filter = lookup(LOG_FILTER_VAR)
            .filter(|filter| !filter.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string());

        Ok(AppConfig {
            database,
            storage_root,
            event_buffer,
            log_filter,
        })
    }
}
