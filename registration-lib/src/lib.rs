//! Registration form client library
//!
//! Form model, validation schema, and multipart submission for the
//! `/api/v1/register` endpoint. Front ends drive a [`form::FormState`] and
//! hand it to a [`submit::SubmissionHandler`] together with any
//! [`RegistrationApi`] implementation.

pub mod config;
pub mod error;
pub mod form;
pub mod model;
pub mod submit;
pub mod validation;

mod client;

pub use client::*;
