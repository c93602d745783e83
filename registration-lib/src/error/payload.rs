//! Payload construction errors

/// Errors raised while flattening a draft into a multipart body.
#[derive(Debug, thiserror::Error)]
pub enum PayloadError {
    /// A document entry reached serialization without a file.
    #[error("Document {index} has no file attached")]
    MissingFile { index: usize },

    /// A document entry reached serialization without a file type.
    #[error("Document {index} has no file type")]
    MissingFileType { index: usize },

    /// The MIME type of an attachment was rejected.
    #[error("Invalid MIME type '{mime}' for {file_name}")]
    InvalidMime {
        mime: String,
        file_name: String,
        #[source]
        source: reqwest::Error,
    },
}
