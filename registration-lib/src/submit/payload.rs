//! Multipart payload for the register endpoint.

use reqwest::multipart::Form;
use reqwest::multipart::Part;

use crate::error::PayloadError;
use crate::model::FilePayload;
use crate::model::RegistrationDraft;

/// Value of one multipart field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PartValue {
    Text(String),
    File(FilePayload),
}

/// Flattened registration body.
///
/// Keys behave like browser `FormData::set`: setting an existing key
/// replaces its value in place, so each key appears at most once and keeps
/// its first position.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegistrationPayload {
    fields: Vec<(String, PartValue)>,
}

impl RegistrationPayload {
    /// Creates an empty payload.
    pub fn new() -> Self {
        Self::default()
    }

    /// Flattens a draft into the wire field names.
    ///
    /// The permanent address is only included when it is not mirrored from
    /// the residential one and both of its lines are filled in. Every document must carry a file type and a file; a valid
    /// draft always does.
    pub fn from_draft(draft: &RegistrationDraft) -> Result<Self, PayloadError> {
        let mut payload = Self::new();
        payload.set_text("firstName", &draft.first_name);
        payload.set_text("lastName", &draft.last_name);
        payload.set_text("email", &draft.email);
        payload.set_text("residentialaddress[street1]", &draft.residential.street1);
        payload.set_text("residentialaddress[street2]", &draft.residential.street2);

        let permanent = &draft.permanent;
        if !draft.same_as_residential
            && !permanent.street1.is_empty()
            && !permanent.street2.is_empty()
        {
            payload.set_text("permanentaddress[street1]", &permanent.street1);
            payload.set_text("permanentaddress[street2]", &permanent.street2);
        }

        for (index, entry) in draft.documents.iter().enumerate() {
            let file_type = entry
                .file_type
                .ok_or(PayloadError::MissingFileType { index })?;
            let file = entry
                .file
                .clone()
                .ok_or(PayloadError::MissingFile { index })?;

            payload.set_text(format!("documents[{}][filename]", index), &entry.file_name);
            payload.set_text(format!("documents[{}][filetype]", index), file_type.as_str());
            payload.set(format!("documents[{}][file]", index), PartValue::File(file));
        }

        Ok(payload)
    }

    /// Sets `key`, replacing any existing value.
    pub fn set(&mut self, key: impl Into<String>, value: PartValue) {
        let key = key.into();
        match self.fields.iter_mut().find(|(k, _)| *k == key) {
            Some((_, slot)) => *slot = value,
            None => self.fields.push((key, value)),
        }
    }

    /// Sets a text field.
    pub fn set_text(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.set(key, PartValue::Text(value.into()));
    }

    /// Value stored under `key`.
    pub fn get(&self, key: &str) -> Option<&PartValue> {
        self.fields.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    /// Text stored under `key`, `None` for missing keys and files.
    pub fn text(&self, key: &str) -> Option<&str> {
        match self.get(key)? {
            PartValue::Text(text) => Some(text),
            PartValue::File(_) => None,
        }
    }

    /// Field names in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(k, _)| k.as_str())
    }

    /// Number of fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns `true` if the payload has no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Converts into a reqwest multipart form.
    pub fn into_multipart(self) -> Result<Form, PayloadError> {
        let mut form = Form::new();
        for (key, value) in self.fields {
            form = match value {
                PartValue::Text(text) => form.text(key, text),
                PartValue::File(file) => {
                    let (file_name, mime, bytes) = file.into_parts();
                    let part = Part::bytes(bytes)
                        .file_name(file_name.clone())
                        .mime_str(&mime)
                        .map_err(|source| PayloadError::InvalidMime {
                            mime,
                            file_name,
                            source,
                        })?;
                    form.part(key, part)
                }
            };
        }
        Ok(form)
    }
}
