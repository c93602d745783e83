//! Document attachments

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::Deserialize;
use serde::Serialize;

use crate::error::FieldError;

/// Number of document entries the list starts with and never drops below.
pub const MIN_DOCUMENTS: usize = 2;

/// Classification of an attachment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileType {
    Image,
    Pdf,
}

impl FileType {
    /// All selectable types, in option order.
    pub const ALL: [FileType; 2] = [FileType::Image, FileType::Pdf];

    /// Wire value, as sent in `documents[i][filetype]`.
    pub fn as_str(&self) -> &'static str {
        match self {
            FileType::Image => "image",
            FileType::Pdf => "pdf",
        }
    }

    /// Human-readable option label.
    pub fn label(&self) -> &'static str {
        match self {
            FileType::Image => "Image",
            FileType::Pdf => "PDF",
        }
    }
}

impl fmt::Display for FileType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FileType {
    type Err = FieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "image" => Ok(FileType::Image),
            "pdf" => Ok(FileType::Pdf),
            _ => Err(FieldError::type_mismatch("fileType", "image or pdf", "unknown value")),
        }
    }
}

/// Binary content of an attachment, as picked by the user.
#[derive(Clone, PartialEq, Eq)]
pub struct FilePayload {
    name: String,
    mime: String,
    bytes: Vec<u8>,
}

impl FilePayload {
    /// Creates a payload, guessing the MIME type from the file name.
    pub fn new(name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        let name = name.into();
        let mime = guess_mime(&name).to_string();
        Self {
            name,
            mime,
            bytes: bytes.into(),
        }
    }

    /// Overrides the guessed MIME type.
    pub fn with_mime(mut self, mime: impl Into<String>) -> Self {
        self.mime = mime.into();
        self
    }

    /// Reads a payload from disk.
    pub async fn from_path(path: impl AsRef<Path>) -> std::io::Result<Self> {
        let path = path.as_ref();
        let bytes = tokio::fs::read(path).await?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "file".to_string());
        Ok(Self::new(name, bytes))
    }

    /// Original file name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// MIME type sent with the multipart part.
    pub fn mime(&self) -> &str {
        &self.mime
    }

    /// Raw content.
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Content length in bytes.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Returns `true` if the file is empty.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub(crate) fn into_parts(self) -> (String, String, Vec<u8>) {
        (self.name, self.mime, self.bytes)
    }
}

impl fmt::Debug for FilePayload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FilePayload")
            .field("name", &self.name)
            .field("mime", &self.mime)
            .field("len", &self.bytes.len())
            .finish()
    }
}

fn guess_mime(name: &str) -> &'static str {
    let ext = name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "pdf" => "application/pdf",
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "bmp" => "image/bmp",
        "svg" => "image/svg+xml",
        _ => "application/octet-stream",
    }
}

/// One attachment row of the form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocumentEntry {
    /// Display name entered by the user.
    pub file_name: String,
    /// Selected type, `None` while the placeholder is selected.
    pub file_type: Option<FileType>,
    /// Picked file, `None` until one is chosen.
    pub file: Option<FilePayload>,
}

impl DocumentEntry {
    /// Creates an entry with every sub-field empty.
    pub fn empty() -> Self {
        Self::default()
    }
}

/// Ordered attachment list that never holds fewer than [`MIN_DOCUMENTS`] entries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentList {
    entries: Vec<DocumentEntry>,
}

impl Default for DocumentList {
    fn default() -> Self {
        Self {
            entries: vec![DocumentEntry::empty(); MIN_DOCUMENTS],
        }
    }
}

impl DocumentList {
    /// Creates a list with the minimum number of empty entries.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an empty entry and returns its index.
    pub fn append(&mut self) -> usize {
        self.entries.push(DocumentEntry::empty());
        self.entries.len() - 1
    }

    /// Removes the last entry unless that would drop below [`MIN_DOCUMENTS`].
    ///
    /// Returns `true` if an entry was removed.
    pub fn remove_last(&mut self) -> bool {
        if self.entries.len() > MIN_DOCUMENTS {
            self.entries.pop();
            true
        } else {
            false
        }
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if there are no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entry at `index`.
    pub fn get(&self, index: usize) -> Option<&DocumentEntry> {
        self.entries.get(index)
    }

    /// Mutable entry at `index`, or an out of range error.
    pub fn entry_mut(&mut self, index: usize) -> Result<&mut DocumentEntry, FieldError> {
        let len = self.entries.len();
        self.entries
            .get_mut(index)
            .ok_or_else(|| FieldError::index_out_of_range(index, len))
    }

    /// All entries in order.
    pub fn entries(&self) -> &[DocumentEntry] {
        &self.entries
    }

    /// Iterates entries in order.
    pub fn iter(&self) -> impl Iterator<Item = &DocumentEntry> {
        self.entries.iter()
    }

    /// Replaces the payload of the entry at `index`.
    pub fn set_file(&mut self, index: usize, file: Option<FilePayload>) -> Result<(), FieldError> {
        self.entry_mut(index)?.file = file;
        Ok(())
    }
}
