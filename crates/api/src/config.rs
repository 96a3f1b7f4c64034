//! Application configuration resolved once at startup.
//!
//! Values are looked up by environment-variable name in this order:
//! process environment, then the property file (`CONFIG_FILE`, default
//! `.env`), then the compiled-in default. Empty values count as unset.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Default greeting served by `GET /greeting`.
pub const DEFAULT_GREETING_MESSAGE: &str = "Hello from Quarkus!";
/// Default environment label.
pub const DEFAULT_ENVIRONMENT: &str = "unknown";
/// Default property file path.
pub const DEFAULT_CONFIG_FILE: &str = ".env";

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8080;
const DEFAULT_LOG_LEVEL: &str = "info";

/// Errors raised while reading the property file.
///
/// Never fatal: callers log them and resolve from the remaining sources.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file exists but could not be opened or read.
    #[error("Failed to read property file {path}: {source}")]
    PropertyFile {
        path: PathBuf,
        #[source]
        source: dotenvy::Error,
    },

    /// A single line could not be parsed; the rest of the file still applies.
    #[error("Skipped malformed line in property file {path}: {source}")]
    MalformedLine {
        path: PathBuf,
        #[source]
        source: dotenvy::Error,
    },
}

/// Maps a property name such as `greeting.message` to its environment
/// variable form (`GREETING_MESSAGE`).
pub fn env_name(property: &str) -> String {
    property
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() {
                c.to_ascii_uppercase()
            } else {
                '_'
            }
        })
        .collect()
}

/// Key/value pairs read from a dotenv-format property file.
///
/// Keys are stored in environment-variable form, so `greeting.message=Hi`
/// and `GREETING_MESSAGE=Hi` are equivalent. Values containing whitespace
/// or `$` must be quoted; unquoted ones make the line malformed.
#[derive(Debug, Default)]
pub struct PropertyFile {
    values: HashMap<String, String>,
    skipped: Vec<ConfigError>,
}

impl PropertyFile {
    /// Reads the file at `path` without touching the process environment.
    ///
    /// A missing file yields an empty set of properties. Lines that fail to
    /// parse are recorded in [`PropertyFile::skipped`] and the remaining
    /// lines are kept; only I/O failures reject the whole file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let read_error = |source: dotenvy::Error| ConfigError::PropertyFile {
            path: path.to_path_buf(),
            source,
        };

        let iter = match dotenvy::from_path_iter(path) {
            Ok(iter) => iter,
            Err(err) if err.not_found() => return Ok(Self::default()),
            Err(err) => return Err(read_error(err)),
        };

        let mut file = Self::default();
        for item in iter {
            match item {
                Ok((key, value)) => {
                    file.values.insert(env_name(&key), value);
                }
                Err(source @ dotenvy::Error::LineParse(..)) => {
                    file.skipped.push(ConfigError::MalformedLine {
                        path: path.to_path_buf(),
                        source,
                    });
                }
                Err(err) => return Err(read_error(err)),
            }
        }

        Ok(file)
    }

    /// Returns the value stored under the environment-style `key`.
    pub fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    /// Lines dropped while loading, in file order.
    pub fn skipped(&self) -> &[ConfigError] {
        &self.skipped
    }

    fn into_skipped(self) -> Vec<ConfigError> {
        self.skipped
    }
}

/// The two values backing the greeting resource.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GreetingConfig {
    message: String,
    environment: String,
}

impl GreetingConfig {
    /// Builds a config, substituting defaults for empty values.
    pub fn new(message: impl Into<String>, environment: impl Into<String>) -> Self {
        Self {
            message: non_empty(Some(message.into()))
                .unwrap_or_else(|| DEFAULT_GREETING_MESSAGE.to_string()),
            environment: non_empty(Some(environment.into()))
                .unwrap_or_else(|| DEFAULT_ENVIRONMENT.to_string()),
        }
    }

    /// Resolved `greeting.message`.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Resolved `app.environment`.
    pub fn environment(&self) -> &str {
        &self.environment
    }
}

impl Default for GreetingConfig {
    fn default() -> Self {
        Self {
            message: DEFAULT_GREETING_MESSAGE.to_string(),
            environment: DEFAULT_ENVIRONMENT.to_string(),
        }
    }
}

/// Server configuration with sensible defaults.
///
/// Reads from environment variables:
/// - `HOST`: bind address (default: `"0.0.0.0"`)
/// - `PORT`: listen port (default: `8080`)
/// - `RUST_LOG`: tracing filter directive (default: `"info"`)
/// - `GREETING_MESSAGE`: greeting text (default: `"Hello from Quarkus!"`)
/// - `APP_ENVIRONMENT`: environment label (default: `"unknown"`)
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub log_level: String,
    pub greeting: GreetingConfig,
}

impl Config {
    /// Loads configuration from the process environment layered over the
    /// property file.
    ///
    /// Also returns every property-file problem, so the caller can log them
    /// once tracing is up.
    pub fn from_env() -> (Self, Vec<ConfigError>) {
        let path = non_empty(std::env::var("CONFIG_FILE").ok())
            .unwrap_or_else(|| DEFAULT_CONFIG_FILE.to_string());

        let (file, mut errors) = match PropertyFile::load(&path) {
            Ok(file) => (file, Vec::new()),
            Err(err) => (PropertyFile::default(), vec![err]),
        };

        let config = Self::from_sources(|key| std::env::var(key).ok(), &file);
        errors.extend(file.into_skipped());

        (config, errors)
    }

    /// Resolves each option from `env` first, then from `file`, then from
    /// the default. Empty environment values defer to the file.
    pub fn from_sources<E>(env: E, file: &PropertyFile) -> Self
    where
        E: Fn(&str) -> Option<String>,
    {
        Self::from_lookup(|key| non_empty(env(key)).or_else(|| file.get(key)))
    }

    /// Resolves every option through `lookup`, keyed by environment name.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| non_empty(lookup(key));

        Self {
            host: get("HOST").unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port: get("PORT")
                .and_then(|p| p.trim().parse().ok())
                .unwrap_or(DEFAULT_PORT),
            log_level: get("RUST_LOG").unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string()),
            greeting: GreetingConfig {
                message: get(&env_name("greeting.message"))
                    .unwrap_or_else(|| DEFAULT_GREETING_MESSAGE.to_string()),
                environment: get(&env_name("app.environment"))
                    .unwrap_or_else(|| DEFAULT_ENVIRONMENT.to_string()),
            },
        }
    }

    /// Returns the `"host:port"` bind address string.
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            log_level: DEFAULT_LOG_LEVEL.to_string(),
            greeting: GreetingConfig::default(),
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
