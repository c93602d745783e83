//! FieldError for draft mutations

/// Error type for field mutations on a draft.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FieldError {
    /// The value kind does not match the field.
    #[error("Field '{field}' type mismatch: expected {expected}, got {actual}")]
    TypeMismatch {
        field: String,
        expected: &'static str,
        actual: &'static str,
    },

    /// A document index past the end of the list.
    #[error("Document index {index} out of range (len {len})")]
    IndexOutOfRange { index: usize, len: usize },

    /// The field can only be changed through its dedicated mutation.
    #[error("Field '{field}' cannot be set as a plain value")]
    DedicatedMutation { field: String },
}

impl FieldError {
    /// Creates a new type mismatch error.
    pub fn type_mismatch(field: impl ToString, expected: &'static str, actual: &'static str) -> Self {
        Self::TypeMismatch {
            field: field.to_string(),
            expected,
            actual,
        }
    }

    /// Creates a new index out of range error.
    pub fn index_out_of_range(index: usize, len: usize) -> Self {
        Self::IndexOutOfRange { index, len }
    }
}
