//! Form validation.
//!
//! A [`Schema`] is a fluent list of per-field rules evaluated against a whole
//! target value, so a rule can depend on sibling fields. Each field reports at
//! most one message: the first rule that fails.
//!
//! # Example
//!
//! ```
//! use chrono::NaiveDate;
//! use registration_lib::model::{FieldPath, RegistrationDraft};
//! use registration_lib::validation::{Schema, ValidationContext};
//!
//! let schema = Schema::<RegistrationDraft>::new()
//!     .field(FieldPath::FirstName, |d: &RegistrationDraft| d.first_name.clone())
//!         .required("First name is required.")
//!         .max_length(15, "Must be 15 characters or less")
//!     .field(FieldPath::Email, |d: &RegistrationDraft| d.email.clone())
//!         .required("Email is required.")
//!         .email("Invalid email address")
//!     .build();
//!
//! let cx = ValidationContext::new(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
//! let errors = schema.validate(&RegistrationDraft::new(), &cx);
//! assert_eq!(errors.get(&FieldPath::Email), Some("Email is required."));
//! ```

mod age;
mod registration;
mod result;
mod schema;

pub use age::*;
pub use registration::*;
pub use result::ValidationErrors;
pub use schema::{FieldBuilder, Schema, ValidationContext};
