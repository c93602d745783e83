//! API error types

use super::PayloadError;

/// Errors that can occur while calling the registration service.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Non-success HTTP response.
    #[error("HTTP {status}: {}", .message.as_deref().unwrap_or("<no message>"))]
    Http {
        /// HTTP status code.
        status: u16,
        /// Message extracted from the response body, if the server sent one.
        message: Option<String>,
    },

    /// Network error before a response was received.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The request body could not be built.
    #[error("Payload error: {0}")]
    Payload(#[from] PayloadError),
}

impl ApiError {
    /// Creates a new HTTP error.
    pub fn http(status: u16, message: Option<String>) -> Self {
        Self::Http { status, message }
    }

    /// Returns the HTTP status code if this is an HTTP error.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Returns the message the server put in its error body, if any.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            Self::Http { message, .. } => message.as_deref(),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_message_only_from_http() {
        let err = ApiError::http(409, Some("Email already exists".to_string()));
        assert_eq!(err.server_message(), Some("Email already exists"));
        assert_eq!(err.status_code(), Some(409));

        let err = ApiError::Payload(PayloadError::MissingFile { index: 1 });
        assert_eq!(err.server_message(), None);
        assert_eq!(err.status_code(), None);
    }

    #[test]
    fn test_http_display_without_message() {
        let err = ApiError::http(500, None);
        assert_eq!(err.to_string(), "HTTP 500: <no message>");
    }
}
