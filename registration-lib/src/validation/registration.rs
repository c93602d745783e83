//! Rules of the registration form

use chrono::NaiveDate;

use super::MIN_AGE;
use super::Schema;
use super::age_on;
use crate::model::AddressLine;
use crate::model::DATE_FORMAT;
use crate::model::DocumentEntry;
use crate::model::DocumentField;
use crate::model::FieldPath;
use crate::model::RegistrationDraft;

pub const FIRST_NAME_MAX: usize = 15;
pub const LAST_NAME_MAX: usize = 20;

pub const FIRST_NAME_REQUIRED: &str = "First name is required.";
pub const FIRST_NAME_TOO_LONG: &str = "Must be 15 characters or less";
pub const LAST_NAME_REQUIRED: &str = "Last name is required.";
pub const LAST_NAME_TOO_LONG: &str = "Must be 20 characters or less.";
pub const EMAIL_REQUIRED: &str = "Email is required.";
pub const EMAIL_INVALID: &str = "Invalid email address";
pub const DATE_OF_BIRTH_REQUIRED: &str = "Date of Birth is Required.";
pub const DATE_OF_BIRTH_INVALID: &str = "Invalid date of birth";
pub const UNDER_MIN_AGE: &str = "You must be at least 18 years old.";
pub const STREET1_REQUIRED: &str = "Street1 is Required.";
pub const STREET2_REQUIRED: &str = "Street2 is Required.";
pub const PERMANENT_STREET1_REQUIRED: &str = "Permanent Street1 is Required.";
pub const PERMANENT_STREET2_REQUIRED: &str = "Permanent Street2 is Required.";
pub const FILE_NAME_REQUIRED: &str = "File name is required.";
pub const FILE_TYPE_REQUIRED: &str = "File type is required.";
pub const FILE_REQUIRED: &str = "File is required.";

/// The full registration form schema.
pub fn registration_schema() -> Schema<RegistrationDraft> {
    use AddressLine::*;

    Schema::new()
        .field(FieldPath::FirstName, |d: &RegistrationDraft| d.first_name.clone())
        .required(FIRST_NAME_REQUIRED)
        .max_length(FIRST_NAME_MAX, FIRST_NAME_TOO_LONG)
        .field(FieldPath::LastName, |d: &RegistrationDraft| d.last_name.clone())
        .required(LAST_NAME_REQUIRED)
        .max_length(LAST_NAME_MAX, LAST_NAME_TOO_LONG)
        .field(FieldPath::Email, |d: &RegistrationDraft| d.email.clone())
        .required(EMAIL_REQUIRED)
        .email(EMAIL_INVALID)
        .field(FieldPath::DateOfBirth, |d: &RegistrationDraft| d.date_of_birth.clone())
        .required(DATE_OF_BIRTH_REQUIRED)
        .rule_with(
            |v, _, cx| parse_date(v).is_some_and(|dob| dob <= cx.today()),
            DATE_OF_BIRTH_INVALID,
        )
        .rule_with(
            |v, _, cx| parse_date(v).is_some_and(|dob| age_on(dob, cx.today()) >= MIN_AGE),
            UNDER_MIN_AGE,
        )
        .field(FieldPath::Residential(Street1), |d: &RegistrationDraft| {
            d.residential.street1.clone()
        })
        .required(STREET1_REQUIRED)
        .field(FieldPath::Residential(Street2), |d: &RegistrationDraft| {
            d.residential.street2.clone()
        })
        .required(STREET2_REQUIRED)
        .field(FieldPath::Permanent(Street1), |d: &RegistrationDraft| {
            d.permanent.street1.clone()
        })
        .when(|d| !d.same_as_residential)
        .required(PERMANENT_STREET1_REQUIRED)
        .field(FieldPath::Permanent(Street2), |d: &RegistrationDraft| {
            d.permanent.street2.clone()
        })
        .when(|d| !d.same_as_residential)
        .required(PERMANENT_STREET2_REQUIRED)
        .each(documents, document_schema(), FieldPath::Document)
}

/// Rules applied to each document entry.
pub fn document_schema() -> Schema<DocumentEntry, DocumentField> {
    Schema::new()
        .field(DocumentField::FileName, |e: &DocumentEntry| e.file_name.clone())
        .required(FILE_NAME_REQUIRED)
        .field(DocumentField::FileType, |e: &DocumentEntry| e.file_type)
        .present(FILE_TYPE_REQUIRED)
        .field(DocumentField::File, |e: &DocumentEntry| e.file.as_ref().map(|f| f.len()))
        .present(FILE_REQUIRED)
        .build()
}

fn documents(draft: &RegistrationDraft) -> &[DocumentEntry] {
    draft.documents.entries()
}

fn parse_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT).ok()
}
