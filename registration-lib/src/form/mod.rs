//! Form state: the draft, touched fields, and error visibility.

use std::collections::BTreeSet;
use std::sync::Arc;

use log::debug;

use crate::error::FieldError;
use crate::model::DocumentField;
use crate::model::FieldPath;
use crate::model::FieldValue;
use crate::model::FilePayload;
use crate::model::RegistrationDraft;
use crate::validation::Schema;
use crate::validation::ValidationContext;
use crate::validation::ValidationErrors;
use crate::validation::registration_schema;

/// State of one form session.
///
/// Errors are computed from the schema on demand. They are *visible* for a
/// field once it has been touched, and for every field after a submit attempt.
#[derive(Debug, Clone)]
pub struct FormState {
    draft: RegistrationDraft,
    touched: BTreeSet<FieldPath>,
    submit_attempted: bool,
    schema: Arc<Schema<RegistrationDraft>>,
}

impl Default for FormState {
    fn default() -> Self {
        Self::new()
    }
}

impl FormState {
    /// Creates a form with an empty draft and the registration schema.
    pub fn new() -> Self {
        Self::with_schema(registration_schema())
    }

    /// Creates a form validated by a custom schema.
    pub fn with_schema(schema: Schema<RegistrationDraft>) -> Self {
        Self {
            draft: RegistrationDraft::new(),
            touched: BTreeSet::new(),
            submit_attempted: false,
            schema: Arc::new(schema),
        }
    }

    /// The current draft.
    pub fn draft(&self) -> &RegistrationDraft {
        &self.draft
    }

    /// Replaces the whole draft, keeping touched state.
    pub fn set_draft(&mut self, draft: RegistrationDraft) {
        self.draft = draft;
        self.prune_touched();
    }

    /// Writes a value at `path`.
    pub fn set_field(&mut self, path: FieldPath, value: FieldValue) -> Result<(), FieldError> {
        self.draft.set(path, value)
    }

    /// Assigns (or clears) the file of the document at `index`.
    pub fn set_file(&mut self, index: usize, file: Option<FilePayload>) -> Result<(), FieldError> {
        self.draft.documents.set_file(index, file)
    }

    /// Appends an empty document entry and returns its index.
    pub fn append_document(&mut self) -> usize {
        let index = self.draft.documents.append();
        debug!("Appended document entry {}", index);
        index
    }

    /// Removes the last document entry if above the floor.
    pub fn remove_last_document(&mut self) -> bool {
        let removed = self.draft.documents.remove_last();
        if removed {
            debug!("Removed document entry {}", self.draft.documents.len());
            self.prune_touched();
        }
        removed
    }

    /// Records that the user has visited `path`.
    pub fn mark_touched(&mut self, path: FieldPath) {
        self.touched.insert(path);
    }

    /// Returns `true` if `path` has been visited.
    pub fn is_touched(&self, path: FieldPath) -> bool {
        self.touched.contains(&path)
    }

    /// Makes every error visible, as a submit attempt does.
    pub fn mark_submit_attempted(&mut self) {
        self.submit_attempted = true;
    }

    /// Returns `true` once a submit has been attempted since the last reset.
    pub fn submit_attempted(&self) -> bool {
        self.submit_attempted
    }

    /// Validates the draft as of the local current date.
    pub fn validate(&self) -> ValidationErrors {
        self.validate_with(&ValidationContext::now())
    }

    /// Validates the draft with an explicit context.
    pub fn validate_with(&self, cx: &ValidationContext) -> ValidationErrors {
        self.schema.validate(&self.draft, cx)
    }

    /// Errors that should be displayed right now.
    pub fn visible_errors(&self, cx: &ValidationContext) -> ValidationErrors {
        let mut errors = self.validate_with(cx);
        if !self.submit_attempted {
            errors.retain(|path| self.touched.contains(path));
        }
        errors
    }

    /// The displayed error for a single field.
    pub fn visible_error(&self, path: FieldPath, cx: &ValidationContext) -> Option<String> {
        if !self.submit_attempted && !self.is_touched(path) {
            return None;
        }
        self.validate_with(cx).get(&path).map(str::to_string)
    }

    /// The text a control for `path` displays.
    ///
    /// Permanent address fields show the residential values while mirrored.
    pub fn display_value(&self, path: FieldPath) -> String {
        let draft = &self.draft;
        match path {
            FieldPath::Permanent(line) => draft.permanent_for_display().line(line).to_string(),
            FieldPath::SameAsResidential => draft.same_as_residential.to_string(),
            FieldPath::Document(index, DocumentField::FileType) => draft
                .documents
                .get(index)
                .and_then(|e| e.file_type)
                .map(|ty| ty.label().to_string())
                .unwrap_or_default(),
            FieldPath::Document(index, DocumentField::File) => draft
                .documents
                .get(index)
                .and_then(|e| e.file.as_ref())
                .map(|f| f.name().to_string())
                .unwrap_or_default(),
            _ => draft.text(path).unwrap_or_default().to_string(),
        }
    }

    /// Restores the empty draft and forgets all interaction.
    pub fn reset(&mut self) {
        self.draft = RegistrationDraft::new();
        self.touched.clear();
        self.submit_attempted = false;
    }

    fn prune_touched(&mut self) {
        let len = self.draft.documents.len();
        self.touched
            .retain(|path| path.document_index().is_none_or(|index| index < len));
    }
}
