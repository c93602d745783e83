//! Schema-gated submission.
//!
//! [`SubmissionHandler`] moves `Idle → Submitting → Idle`. The call can run
//! inline through [`SubmissionHandler::submit`], or be split into
//! [`begin`](SubmissionHandler::begin) and [`finish`](SubmissionHandler::finish)
//! so the network request runs on another task while the UI keeps drawing.

mod payload;

pub use payload::*;

use log::debug;
use log::info;
use log::warn;

use crate::RegisterResponse;
use crate::RegistrationApi;
use crate::error::ApiError;
use crate::error::PayloadError;
use crate::form::FormState;
use crate::validation::ValidationContext;
use crate::validation::ValidationErrors;

/// Shown when the server did not say what went wrong.
pub const NO_MESSAGE: &str = "no message provided";

/// Shown on success when the server sent no message.
pub const DEFAULT_SUCCESS_MESSAGE: &str = "Registration submitted";

/// Submission lifecycle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SubmissionState {
    #[default]
    Idle,
    Submitting,
}

/// Severity of a [`Notification`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Success,
    Error,
}

/// A transient message for the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub level: NotificationLevel,
    pub message: String,
}

impl Notification {
    /// Create a success notification.
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Success,
            message: message.into(),
        }
    }

    /// Create an error notification.
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Error,
            message: message.into(),
        }
    }

    /// Error notification for a failed request.
    ///
    /// Formatted as `Error : <server message>`, falling back to
    /// [`NO_MESSAGE`].
    pub fn from_api_error(error: &ApiError) -> Self {
        Self::error(format!(
            "Error : {}",
            error.server_message().unwrap_or(NO_MESSAGE)
        ))
    }

    /// Returns `true` for success notifications.
    pub fn is_success(&self) -> bool {
        self.level == NotificationLevel::Success
    }
}

/// Why a submit did not start.
#[derive(Debug, thiserror::Error)]
pub enum SubmitRejected {
    /// A submission is already in flight.
    #[error("A submission is already in progress")]
    Busy,

    /// The draft failed validation.
    #[error("{} field(s) failed validation", .0.len())]
    Invalid(ValidationErrors),

    /// The payload could not be built.
    #[error(transparent)]
    Payload(#[from] PayloadError),
}

impl SubmitRejected {
    /// Notification for rejections the user should hear about.
    ///
    /// Validation and busy rejections are shown by the form itself; a local
    /// payload failure gets the generic error message.
    pub fn notification(&self) -> Option<Notification> {
        match self {
            Self::Payload(_) => Some(Notification::error(format!("Error : {}", NO_MESSAGE))),
            Self::Busy | Self::Invalid(_) => None,
        }
    }
}

/// Result of [`SubmissionHandler::submit`].
#[derive(Debug)]
pub enum SubmitOutcome {
    /// Nothing was sent.
    Rejected(SubmitRejected),
    /// The request completed; the notification says how.
    Completed(Notification),
}

impl SubmitOutcome {
    /// The notification to show, if any.
    pub fn notification(&self) -> Option<Notification> {
        match self {
            Self::Completed(notification) => Some(notification.clone()),
            Self::Rejected(rejected) => rejected.notification(),
        }
    }
}

/// Drives one form through submission.
#[derive(Debug, Default)]
pub struct SubmissionHandler {
    state: SubmissionState,
}

impl SubmissionHandler {
    /// Creates an idle handler.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current state.
    pub fn state(&self) -> SubmissionState {
        self.state
    }

    /// Returns `true` while a request is in flight.
    pub fn is_submitting(&self) -> bool {
        self.state == SubmissionState::Submitting
    }

    /// Whether the submit control should be enabled.
    pub fn submit_enabled(&self) -> bool {
        !self.is_submitting()
    }

    /// Validates the form and, if valid, enters `Submitting`.
    ///
    /// Returns the payload to send. A rejected attempt still marks the form
    /// as submit-attempted so every error becomes visible.
    pub fn begin(
        &mut self,
        form: &mut FormState,
        cx: &ValidationContext,
    ) -> Result<RegistrationPayload, SubmitRejected> {
        if self.is_submitting() {
            debug!("Submit ignored: request already in flight");
            return Err(SubmitRejected::Busy);
        }

        form.mark_submit_attempted();
        let errors = form.validate_with(cx);
        if errors.is_invalid() {
            debug!("Submit blocked by {} validation error(s)", errors.len());
            return Err(SubmitRejected::Invalid(errors));
        }

        self.state = SubmissionState::Submitting;
        match RegistrationPayload::from_draft(form.draft()) {
            Ok(payload) => {
                debug!("Submitting registration with {} field(s)", payload.len());
                Ok(payload)
            }
            Err(e) => {
                warn!("Failed to build registration payload: {}", e);
                self.state = SubmissionState::Idle;
                Err(SubmitRejected::Payload(e))
            }
        }
    }

    /// Applies the network result and returns to `Idle`.
    ///
    /// On success the form is reset; on failure the draft is left intact.
    pub fn finish(
        &mut self,
        form: &mut FormState,
        result: Result<RegisterResponse, ApiError>,
    ) -> Notification {
        self.state = SubmissionState::Idle;
        match result {
            Ok(response) => {
                info!("Registration accepted");
                form.reset();
                Notification::success(
                    response
                        .message
                        .unwrap_or_else(|| DEFAULT_SUCCESS_MESSAGE.to_string()),
                )
            }
            Err(e) => {
                warn!("Registration failed: {}", e);
                Notification::from_api_error(&e)
            }
        }
    }

    /// Validates, sends exactly one request, and applies the result.
    pub async fn submit<A>(
        &mut self,
        form: &mut FormState,
        api: &A,
        cx: &ValidationContext,
    ) -> SubmitOutcome
    where
        A: RegistrationApi + ?Sized,
    {
        let payload = match self.begin(form, cx) {
            Ok(payload) => payload,
            Err(rejected) => return SubmitOutcome::Rejected(rejected),
        };
        let result = api.register(payload).await;
        SubmitOutcome::Completed(self.finish(form, result))
    }
}
