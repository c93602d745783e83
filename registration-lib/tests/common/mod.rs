//! Shared fixtures for integration tests.

#![allow(dead_code)]

use std::convert::Infallible;
use std::sync::Arc;
use std::sync::Mutex;

use chrono::NaiveDate;
use http_body_util::BodyExt;
use http_body_util::Full;
use hyper::Request;
use hyper::Response;
use hyper::body::Bytes;
use hyper::body::Incoming;
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper_util::rt::TokioIo;
use registration_lib::form::FormState;
use registration_lib::model::AddressLine;
use registration_lib::model::DocumentField;
use registration_lib::model::FieldPath;
use registration_lib::model::FilePayload;
use registration_lib::model::FileType;
use registration_lib::validation::ValidationContext;
use tokio::net::TcpListener;

/// A request as seen by [`TestServer`].
#[derive(Debug, Clone)]
pub struct Recorded {
    pub method: String,
    pub path: String,
    pub content_type: Option<String>,
    pub body: Vec<u8>,
}

impl Recorded {
    pub fn body_text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

/// Local HTTP server answering every request with one canned response.
pub struct TestServer {
    pub base_url: String,
    requests: Arc<Mutex<Vec<Recorded>>>,
}

impl TestServer {
    pub async fn start(status: u16, body: &'static str) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let requests = Arc::new(Mutex::new(Vec::new()));
        let log = requests.clone();

        tokio::spawn(async move {
            while let Ok((stream, _)) = listener.accept().await {
                let log = log.clone();
                tokio::spawn(async move {
                    let service = service_fn(move |req: Request<Incoming>| {
                        let log = log.clone();
                        async move {
                            let method = req.method().to_string();
                            let path = req.uri().path().to_string();
                            let content_type = req
                                .headers()
                                .get(hyper::header::CONTENT_TYPE)
                                .and_then(|v| v.to_str().ok())
                                .map(str::to_string);
                            let bytes = match req.into_body().collect().await {
                                Ok(collected) => collected.to_bytes().to_vec(),
                                Err(_) => Vec::new(),
                            };
                            log.lock().unwrap().push(Recorded {
                                method,
                                path,
                                content_type,
                                body: bytes,
                            });

                            Ok::<_, Infallible>(
                                Response::builder()
                                    .status(status)
                                    .header("Content-Type", "application/json")
                                    .body(Full::new(Bytes::from_static(body.as_bytes())))
                                    .unwrap(),
                            )
                        }
                    });
                    let _ = http1::Builder::new()
                        .serve_connection(TokioIo::new(stream), service)
                        .await;
                });
            }
        });

        Self {
            base_url: format!("http://{}", addr),
            requests,
        }
    }

    pub fn requests(&self) -> Vec<Recorded> {
        self.requests.lock().unwrap().clone()
    }
}

pub fn cx() -> ValidationContext {
    ValidationContext::new(NaiveDate::from_ymd_opt(2024, 10, 14).unwrap())
}

/// A form that passes validation, with two complete documents.
pub fn filled_form() -> FormState {
    let mut form = FormState::new();
    let fields = [
        (FieldPath::FirstName, "Grace"),
        (FieldPath::LastName, "Hopper"),
        (FieldPath::Email, "grace@example.com"),
        (FieldPath::DateOfBirth, "1990-05-01"),
        (FieldPath::Residential(AddressLine::Street1), "1 Navy Way"),
        (FieldPath::Residential(AddressLine::Street2), "Arlington"),
        (FieldPath::Permanent(AddressLine::Street1), "2 Harbor Rd"),
        (FieldPath::Permanent(AddressLine::Street2), "New York"),
    ];
    for (path, value) in fields {
        form.set_field(path, value.into()).unwrap();
    }

    let docs = [("Passport", FileType::Image, "passport.png"), ("Lease", FileType::Pdf, "lease.pdf")];
    for (index, (name, ty, file)) in docs.into_iter().enumerate() {
        form.set_field(FieldPath::Document(index, DocumentField::FileName), name.into())
            .unwrap();
        form.set_field(FieldPath::Document(index, DocumentField::FileType), ty.into())
            .unwrap();
        form.set_file(index, Some(FilePayload::new(file, vec![0x89, 0x50, index as u8])))
            .unwrap();
    }
    form
}
