//! Values accepted by generic field mutation

use super::FileType;

/// A value written into the draft through
/// [`FormState::set_field`](crate::form::FormState::set_field).
///
/// File payloads are deliberately absent: they arrive from a file picker and
/// go through [`FormState::set_file`](crate::form::FormState::set_file).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    /// Text input content.
    Text(String),
    /// Checkbox state.
    Checked(bool),
    /// Select value; `None` is the "Select file type" placeholder.
    FileType(Option<FileType>),
}

impl FieldValue {
    /// Creates a text value.
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }

    /// Returns the kind name used in type mismatch errors.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Text(_) => "text",
            Self::Checked(_) => "checked",
            Self::FileType(_) => "file type",
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        Self::Checked(value)
    }
}

impl From<FileType> for FieldValue {
    fn from(value: FileType) -> Self {
        Self::FileType(Some(value))
    }
}
