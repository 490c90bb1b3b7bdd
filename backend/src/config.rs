//! Server configuration.
//!
//! Values come from the environment (a `.env` file is loaded first by the
//! binary through `dotenvy`). CLI flags override them.
//!
//! | Variable                    | Default  |
//! |-----------------------------|----------|
//! | `DAYLIGHT_PORT`             | `3000`   |
//! | `DAYLIGHT_MAX_UPLOAD_BYTES` | 10 MiB   |
//! | `DAYLIGHT_STATIC_DIR`       | unset    |

use std::path::PathBuf;
use std::str::FromStr;

use crate::error::ConfigError;

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

pub const ENV_PORT: &str = "DAYLIGHT_PORT";
pub const ENV_MAX_UPLOAD_BYTES: &str = "DAYLIGHT_MAX_UPLOAD_BYTES";
pub const ENV_STATIC_DIR: &str = "DAYLIGHT_STATIC_DIR";

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Port to listen on
    pub port: u16,
    /// Largest accepted upload body
    pub max_upload_bytes: usize,
    /// Built frontend to serve at `/`
    pub static_dir: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            static_dir: None,
        }
    }
}

impl Config {
    /// Load from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load using an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        Ok(Self {
            port: parse_var(&lookup, ENV_PORT)?.unwrap_or(defaults.port),
            max_upload_bytes: parse_var(&lookup, ENV_MAX_UPLOAD_BYTES)?
                .unwrap_or(defaults.max_upload_bytes),
            static_dir: lookup(ENV_STATIC_DIR)
                .filter(|v| !v.trim().is_empty())
                .map(PathBuf::from),
        })
    }

    /// Apply CLI overrides.
    pub fn with_overrides(mut self, port: Option<u16>, static_dir: Option<PathBuf>) -> Self {
        if let Some(port) = port {
            self.port = port;
        }
        if static_dir.is_some() {
            self.static_dir = static_dir;
        }
        self
    }
}

fn parse_var<T, F>(lookup: &F, key: &str) -> Result<Option<T>, ConfigError>
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        None => Ok(None),
        Some(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::InvalidValue {
                key: key.to_string(),
                value: raw,
            }),
    }
}
