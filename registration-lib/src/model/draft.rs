//! The registration draft

use chrono::NaiveDate;

use super::AddressLine;
use super::DocumentField;
use super::DocumentList;
use super::FieldPath;
use super::FieldValue;
use crate::error::FieldError;

/// Date format accepted for the date of birth.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// A two-line street address.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Address {
    pub street1: String,
    pub street2: String,
}

impl Address {
    /// Creates an address from its two lines.
    pub fn new(street1: impl Into<String>, street2: impl Into<String>) -> Self {
        Self {
            street1: street1.into(),
            street2: street2.into(),
        }
    }

    /// Returns one line of the address.
    pub fn line(&self, line: AddressLine) -> &str {
        match line {
            AddressLine::Street1 => &self.street1,
            AddressLine::Street2 => &self.street2,
        }
    }

    fn line_mut(&mut self, line: AddressLine) -> &mut String {
        match line {
            AddressLine::Street1 => &mut self.street1,
            AddressLine::Street2 => &mut self.street2,
        }
    }
}

/// In-memory, not-yet-submitted registration data.
///
/// `Default` is the empty form: blank text, unchecked box, two empty
/// document entries.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegistrationDraft {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    /// Raw date input, `YYYY-MM-DD`.
    pub date_of_birth: String,
    pub residential: Address,
    pub same_as_residential: bool,
    pub permanent: Address,
    pub documents: DocumentList,
}

impl RegistrationDraft {
    /// Creates an empty draft.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses the date of birth, `None` if blank or malformed.
    pub fn date_of_birth(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(self.date_of_birth.trim(), DATE_FORMAT).ok()
    }

    /// The permanent address as the form shows it.
    ///
    /// Mirrors the residential address while `same_as_residential` is set.
    pub fn permanent_for_display(&self) -> &Address {
        if self.same_as_residential {
            &self.residential
        } else {
            &self.permanent
        }
    }

    /// Returns the stored text of a text-valued field.
    ///
    /// Returns `None` for the checkbox, the file type select, the file
    /// picker, and document indices past the end.
    pub fn text(&self, path: FieldPath) -> Option<&str> {
        match path {
            FieldPath::FirstName => Some(&self.first_name),
            FieldPath::LastName => Some(&self.last_name),
            FieldPath::Email => Some(&self.email),
            FieldPath::DateOfBirth => Some(&self.date_of_birth),
            FieldPath::Residential(line) => Some(self.residential.line(line)),
            FieldPath::Permanent(line) => Some(self.permanent.line(line)),
            FieldPath::Document(index, DocumentField::FileName) => {
                self.documents.get(index).map(|e| e.file_name.as_str())
            }
            FieldPath::SameAsResidential
            | FieldPath::Document(_, DocumentField::FileType)
            | FieldPath::Document(_, DocumentField::File) => None,
        }
    }

    /// Writes `value` at `path`.
    pub fn set(&mut self, path: FieldPath, value: FieldValue) -> Result<(), FieldError> {
        match (path, value) {
            (FieldPath::SameAsResidential, FieldValue::Checked(checked)) => {
                self.same_as_residential = checked;
                Ok(())
            }
            (FieldPath::Document(index, DocumentField::FileType), FieldValue::FileType(ty)) => {
                self.documents.entry_mut(index)?.file_type = ty;
                Ok(())
            }
            (FieldPath::Document(_, DocumentField::File), _) => {
                Err(FieldError::DedicatedMutation {
                    field: path.to_string(),
                })
            }
            (path, FieldValue::Text(text)) => match self.text_mut(path)? {
                Some(slot) => {
                    *slot = text;
                    Ok(())
                }
                None => Err(FieldError::type_mismatch(path, expected_kind(path), "text")),
            },
            (path, other) => Err(FieldError::type_mismatch(
                path,
                expected_kind(path),
                other.kind(),
            )),
        }
    }

    fn text_mut(&mut self, path: FieldPath) -> Result<Option<&mut String>, FieldError> {
        let slot = match path {
            FieldPath::FirstName => &mut self.first_name,
            FieldPath::LastName => &mut self.last_name,
            FieldPath::Email => &mut self.email,
            FieldPath::DateOfBirth => &mut self.date_of_birth,
            FieldPath::Residential(line) => self.residential.line_mut(line),
            FieldPath::Permanent(line) => self.permanent.line_mut(line),
            FieldPath::Document(index, DocumentField::FileName) => {
                &mut self.documents.entry_mut(index)?.file_name
            }
            _ => return Ok(None),
        };
        Ok(Some(slot))
    }
}

fn expected_kind(path: FieldPath) -> &'static str {
    match path {
        FieldPath::SameAsResidential => "checked",
        FieldPath::Document(_, DocumentField::FileType) => "file type",
        FieldPath::Document(_, DocumentField::File) => "file",
        _ => "text",
    }
}
