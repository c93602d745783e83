//! Start-up errors

use registration_lib::error::ApiError;
use registration_lib::error::ConfigError;
use registration_lib::error::Error;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Registration(#[from] Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to initialize logger: {0}")]
    Logger(#[from] log::SetLoggerError),
}

impl From<ConfigError> for AppError {
    fn from(e: ConfigError) -> Self {
        Self::Registration(e.into())
    }
}

impl From<ApiError> for AppError {
    fn from(e: ApiError) -> Self {
        Self::Registration(e.into())
    }
}
