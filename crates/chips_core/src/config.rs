//! Environment-driven core configuration.
//!
//! Only logging is configurable; filtering and selection behavior are fixed.

use crate::logging::{default_log_level, normalize_level, normalize_target, LogTarget};
use std::path::PathBuf;

/// Log level override, e.g. `info`.
pub const ENV_LOG_LEVEL: &str = "CHIPS_LOG_LEVEL";
/// Absolute directory for rotating log files; unset means stderr.
pub const ENV_LOG_DIR: &str = "CHIPS_LOG_DIR";

/// Validated settings used to bootstrap core services.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoreConfig {
    pub log_level: &'static str,
    pub log_target: LogTarget,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            log_target: LogTarget::Stderr,
        }
    }
}

impl CoreConfig {
    /// Reads settings from process environment variables.
    pub fn from_env() -> Result<Self, String> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads settings through `lookup`; blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, String>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let log_level = match read(ENV_LOG_LEVEL) {
            Some(value) => {
                normalize_level(&value).map_err(|err| format!("{ENV_LOG_LEVEL}: {err}"))?
            }
            None => default_log_level(),
        };
        let log_target = match read(ENV_LOG_DIR) {
            Some(value) => normalize_target(LogTarget::Directory(PathBuf::from(value.trim())))
                .map_err(|err| format!("{ENV_LOG_DIR}: {err}"))?,
            None => LogTarget::Stderr,
        };

        Ok(Self {
            log_level,
            log_target,
        })
    }
}
