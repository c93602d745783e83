//! Error types

mod api;
mod config;
mod field;
mod payload;

pub use api::*;
pub use config::*;
pub use field::*;
pub use payload::*;

/// Top-level error for the registration library.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Error talking to the registration service.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// Invalid or missing configuration.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Invalid field mutation on the draft.
    #[error(transparent)]
    Field(#[from] FieldError),

    /// Failed to build the multipart payload.
    #[error(transparent)]
    Payload(#[from] PayloadError),
}
