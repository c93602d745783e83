//! Configuration error types

/// Errors raised while loading [`Config`](crate::config::Config).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// A required environment variable is not set.
    #[error("Missing environment variable {var}")]
    Missing { var: &'static str },

    /// The base URI could not be parsed.
    #[error("Invalid base URI '{value}': {reason}")]
    InvalidUrl { value: String, reason: String },

    /// The base URI uses a scheme other than http or https.
    #[error("Unsupported scheme '{scheme}' in base URI")]
    UnsupportedScheme { scheme: String },

    /// The log level is not one of off/error/warn/info/debug/trace.
    #[error("Invalid log level '{value}'")]
    InvalidLogLevel { value: String },
}
