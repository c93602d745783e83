//! Runtime configuration

use std::str::FromStr;

use log::LevelFilter;
use url::Url;

use crate::error::ConfigError;

/// Service base URI, e.g. `https://api.example.com`.
pub const BASE_URI_VAR: &str = "REGISTRATION_BASE_URI";

/// Optional log level (`off`, `error`, `warn`, `info`, `debug`, `trace`).
pub const LOG_LEVEL_VAR: &str = "REGISTRATION_LOG_LEVEL";

/// Level used when [`LOG_LEVEL_VAR`] is unset.
pub const DEFAULT_LOG_LEVEL: LevelFilter = LevelFilter::Debug;

/// Where the service lives and how loudly to log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    base_uri: Url,
    log_level: LevelFilter,
}

impl Config {
    /// Creates a config for `base_uri` with the default log level.
    pub fn new(base_uri: &str) -> Result<Self, ConfigError> {
        Ok(Self {
            base_uri: parse_base_uri(base_uri)?,
            log_level: DEFAULT_LOG_LEVEL,
        })
    }

    /// Reads the process environment.
    ///
    /// Callers that want `.env` support load it first.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Reads variables through `lookup`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let base_uri = lookup(BASE_URI_VAR)
            .filter(|v| !v.trim().is_empty())
            .ok_or(ConfigError::Missing { var: BASE_URI_VAR })?;

        let mut config = Self::new(&base_uri)?;
        if let Some(level) = lookup(LOG_LEVEL_VAR).filter(|v| !v.trim().is_empty()) {
            config.log_level = LevelFilter::from_str(level.trim())
                .map_err(|_| ConfigError::InvalidLogLevel { value: level })?;
        }
        Ok(config)
    }

    /// The service base URI.
    pub fn base_uri(&self) -> &Url {
        &self.base_uri
    }

    pub fn log_level(&self) -> LevelFilter {
        self.log_level
    }

    /// Overrides the log level.
    pub fn with_log_level(mut self, level: LevelFilter) -> Self {
        self.log_level = level;
        self
    }
}

fn parse_base_uri(value: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(value.trim()).map_err(|e| ConfigError::InvalidUrl {
        value: value.to_string(),
        reason: e.to_string(),
    })?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        scheme => Err(ConfigError::UnsupportedScheme {
            scheme: scheme.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_base_uri_required() {
        let err = Config::from_lookup(lookup(&[])).unwrap_err();
        assert_eq!(err, ConfigError::Missing { var: BASE_URI_VAR });

        let err = Config::from_lookup(lookup(&[(BASE_URI_VAR, "  ")])).unwrap_err();
        assert_eq!(err, ConfigError::Missing { var: BASE_URI_VAR });
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_lookup(lookup(&[(BASE_URI_VAR, "http://localhost:8080")]))
            .unwrap();
        assert_eq!(config.base_uri().as_str(), "http://localhost:8080/");
        assert_eq!(config.log_level(), LevelFilter::Debug);
    }

    #[test]
    fn test_log_level_override() {
        let config = Config::from_lookup(lookup(&[
            (BASE_URI_VAR, "https://api.example.com"),
            (LOG_LEVEL_VAR, "warn"),
        ]))
        .unwrap();
        assert_eq!(config.log_level(), LevelFilter::Warn);

        let err = Config::from_lookup(lookup(&[
            (BASE_URI_VAR, "https://api.example.com"),
            (LOG_LEVEL_VAR, "loud"),
        ]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidLogLevel { .. }));
    }

    #[test]
    fn test_rejects_relative_and_non_http() {
        assert!(matches!(
            Config::new("/api").unwrap_err(),
            ConfigError::InvalidUrl { .. }
        ));
        assert_eq!(
            Config::new("ftp://files.example.com").unwrap_err(),
            ConfigError::UnsupportedScheme {
                scheme: "ftp".to_string()
            }
        );
    }
}
