//! Environment-driven configuration.
//!
//! # Responsibility
//! - Resolve store path, logging and bind settings from `NOTES_*` variables.
//! - Reject malformed values before any adapter starts.
//!
//! # Invariants
//! - Blank values are treated as unset.
//! - Resolution is pure over the supplied lookup, so it is testable without
//!   touching the process environment.

use crate::logging::{default_log_level, normalize_level, normalize_log_dir};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

pub const NOTES_FILE_ENV: &str = "NOTES_FILE";
pub const NOTES_LOG_LEVEL_ENV: &str = "NOTES_LOG_LEVEL";
pub const NOTES_LOG_DIR_ENV: &str = "NOTES_LOG_DIR";
pub const NOTES_BIND_ADDR_ENV: &str = "NOTES_BIND_ADDR";

const DEFAULT_NOTES_FILE: &str = "notes.json";
const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";

/// Configuration value rejected during resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigError {
    pub key: &'static str,
    pub value: String,
    pub reason: String,
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "invalid value `{}` for {}: {}",
            self.value, self.key, self.reason
        )
    }
}

impl Error for ConfigError {}

/// Resolved runtime settings shared by the HTTP and CLI adapters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotesConfig {
    /// JSON file backing the note store.
    pub notes_file: PathBuf,
    /// Normalized log level.
    pub log_level: &'static str,
    /// Absolute directory for rolling log files; stderr logging when `None`.
    pub log_dir: Option<PathBuf>,
    /// Listen address of the HTTP adapter.
    pub bind_addr: SocketAddr,
}

impl NotesConfig {
    /// Resolves configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Resolves configuration through `lookup`.
    ///
    /// # Errors
    /// - Unsupported log level.
    /// - Relative log directory.
    /// - Bind address that is not `host:port`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let read = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let notes_file = read(NOTES_FILE_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_NOTES_FILE));

        let log_level = match read(NOTES_LOG_LEVEL_ENV) {
            Some(raw) => normalize_level(&raw).map_err(|err| ConfigError {
                key: NOTES_LOG_LEVEL_ENV,
                value: raw.clone(),
                reason: err.to_string(),
            })?,
            None => default_log_level(),
        };

        let log_dir = match read(NOTES_LOG_DIR_ENV) {
            Some(raw) => Some(normalize_log_dir(Path::new(&raw)).map_err(|err| ConfigError {
                key: NOTES_LOG_DIR_ENV,
                value: raw.clone(),
                reason: err.to_string(),
            })?),
            None => None,
        };

        let raw_addr = read(NOTES_BIND_ADDR_ENV).unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr = raw_addr.parse::<SocketAddr>().map_err(|err| ConfigError {
            key: NOTES_BIND_ADDR_ENV,
            value: raw_addr.clone(),
            reason: err.to_string(),
        })?;

        Ok(Self {
            notes_file,
            log_level,
            log_dir,
            bind_addr,
        })
    }
}
