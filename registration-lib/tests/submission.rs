//! Submission scenarios through [`SubmissionHandler`].

mod common;

use std::sync::Mutex;

use async_trait::async_trait;
use common::TestServer;
use common::cx;
use common::filled_form;
use registration_lib::RegisterResponse;
use registration_lib::RegistrationApi;
use registration_lib::RegistrationClient;
use registration_lib::error::ApiError;
use registration_lib::form::FormState;
use registration_lib::model::FieldPath;
use registration_lib::model::RegistrationDraft;
use registration_lib::submit::NO_MESSAGE;
use registration_lib::submit::NotificationLevel;
use registration_lib::submit::RegistrationPayload;
use registration_lib::submit::SubmissionHandler;
use registration_lib::submit::SubmissionState;
use registration_lib::submit::SubmitOutcome;
use registration_lib::submit::SubmitRejected;

/// Replays one canned result and counts calls.
struct MockApi {
    result: Mutex<Option<Result<RegisterResponse, ApiError>>>,
    calls: Mutex<Vec<RegistrationPayload>>,
}

impl MockApi {
    fn new(result: Result<RegisterResponse, ApiError>) -> Self {
        Self {
            result: Mutex::new(Some(result)),
            calls: Mutex::new(Vec::new()),
        }
    }

    fn calls(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl RegistrationApi for MockApi {
    async fn is_live(&self) -> Result<(), ApiError> {
        Ok(())
    }

    async fn register(&self, payload: RegistrationPayload) -> Result<RegisterResponse, ApiError> {
        self.calls.lock().unwrap().push(payload);
        self.result
            .lock()
            .unwrap()
            .take()
            .unwrap_or_else(|| Err(ApiError::http(500, None)))
    }
}

fn registered() -> RegisterResponse {
    RegisterResponse {
        message: Some("Registered".to_string()),
    }
}

#[tokio::test]
async fn test_success_resets_form() {
    let api = MockApi::new(Ok(registered()));
    let mut form = filled_form();
    form.mark_touched(FieldPath::Email);
    let mut handler = SubmissionHandler::new();

    let outcome = handler.submit(&mut form, &api, &cx()).await;

    let notification = outcome.notification().unwrap();
    assert_eq!(notification.level, NotificationLevel::Success);
    assert_eq!(notification.message, "Registered");
    assert_eq!(form.draft(), &RegistrationDraft::new());
    assert!(!form.is_touched(FieldPath::Email));
    assert_eq!(handler.state(), SubmissionState::Idle);
    assert_eq!(api.calls(), 1);
}

#[tokio::test]
async fn test_success_without_message_uses_default() {
    let api = MockApi::new(Ok(RegisterResponse::default()));
    let mut form = filled_form();
    let mut handler = SubmissionHandler::new();

    let notification = handler.submit(&mut form, &api, &cx()).await.notification().unwrap();
    assert!(notification.is_success());
    assert_eq!(notification.message, "Registration submitted");
}

#[tokio::test]
async fn test_failure_keeps_draft() {
    let api = MockApi::new(Err(ApiError::http(
        409,
        Some("Email already exists".to_string()),
    )));
    let mut form = filled_form();
    let before = form.draft().clone();
    let mut handler = SubmissionHandler::new();

    let notification = handler.submit(&mut form, &api, &cx()).await.notification().unwrap();

    assert_eq!(notification.level, NotificationLevel::Error);
    assert_eq!(notification.message, "Error : Email already exists");
    assert_eq!(form.draft(), &before);
    assert!(handler.submit_enabled());
}

#[tokio::test]
async fn test_failure_without_message() {
    let api = MockApi::new(Err(ApiError::http(500, None)));
    let mut form = filled_form();
    let mut handler = SubmissionHandler::new();

    let notification = handler.submit(&mut form, &api, &cx()).await.notification().unwrap();
    assert_eq!(notification.message, format!("Error : {}", NO_MESSAGE));
}

#[tokio::test]
async fn test_invalid_form_sends_nothing() {
    let api = MockApi::new(Ok(registered()));
    let mut form = FormState::new();
    let mut handler = SubmissionHandler::new();

    let outcome = handler.submit(&mut form, &api, &cx()).await;

    match outcome {
        SubmitOutcome::Rejected(SubmitRejected::Invalid(errors)) => {
            assert_eq!(errors.first().map(|(k, _)| *k), Some(FieldPath::FirstName));
        }
        other => panic!("expected validation rejection, got {:?}", other),
    }
    assert_eq!(api.calls(), 0);
    assert!(form.submit_attempted());
    assert!(form.visible_error(FieldPath::LastName, &cx()).is_some());
    assert_eq!(handler.state(), SubmissionState::Idle);
}

#[tokio::test]
async fn test_submit_while_in_flight_is_busy() {
    let mut form = filled_form();
    let mut handler = SubmissionHandler::new();

    let payload = handler.begin(&mut form, &cx()).unwrap();
    assert!(handler.is_submitting());
    assert!(!handler.submit_enabled());

    let again = handler.begin(&mut form, &cx());
    assert!(matches!(again, Err(SubmitRejected::Busy)));

    let api = MockApi::new(Ok(registered()));
    let outcome = handler.submit(&mut form, &api, &cx()).await;
    assert!(matches!(outcome, SubmitOutcome::Rejected(SubmitRejected::Busy)));
    assert!(outcome.notification().is_none());
    assert_eq!(api.calls(), 0);

    let result = api.register(payload).await;
    let notification = handler.finish(&mut form, result);
    assert!(notification.is_success());
    assert_eq!(handler.state(), SubmissionState::Idle);
}

#[tokio::test]
async fn test_end_to_end_over_http() {
    let server = TestServer::start(200, r#"{"message":"Registered"}"#).await;
    let client = RegistrationClient::builder()
        .base_url(&server.base_url)
        .build()
        .unwrap();
    let mut form = filled_form();
    let mut handler = SubmissionHandler::new();

    let notification = handler
        .submit(&mut form, &client, &cx())
        .await
        .notification()
        .unwrap();

    assert_eq!(notification.message, "Registered");
    assert_eq!(form.draft(), &RegistrationDraft::new());
    assert_eq!(server.requests().len(), 1);
}

#[tokio::test]
async fn test_end_to_end_error_over_http() {
    let server = TestServer::start(422, r#"{"data":{"message":"Email already exists"}}"#).await;
    let client = RegistrationClient::builder()
        .base_url(&server.base_url)
        .build()
        .unwrap();
    let mut form = filled_form();
    let before = form.draft().clone();
    let mut handler = SubmissionHandler::new();

    let notification = handler
        .submit(&mut form, &client, &cx())
        .await
        .notification()
        .unwrap();

    assert!(notification.message.contains("Email already exists"));
    assert_eq!(form.draft(), &before);
    assert_eq!(handler.state(), SubmissionState::Idle);
}
