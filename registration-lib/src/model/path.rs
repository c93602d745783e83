//! Typed field addressing.
//!
//! Every form control maps to exactly one [`FieldPath`]. Paths order the same
//! way the form lays out its controls, so ordered collections keyed by path
//! (touched sets, error maps) iterate top to bottom.

use std::fmt;

/// One line of a postal address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum AddressLine {
    Street1,
    Street2,
}

impl AddressLine {
    /// Both lines, in display order.
    pub const ALL: [AddressLine; 2] = [AddressLine::Street1, AddressLine::Street2];
}

/// A sub-field of a document entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum DocumentField {
    FileName,
    FileType,
    File,
}

impl DocumentField {
    /// All sub-fields, in display order.
    pub const ALL: [DocumentField; 3] = [
        DocumentField::FileName,
        DocumentField::FileType,
        DocumentField::File,
    ];
}

/// Address of a single field in a [`RegistrationDraft`](super::RegistrationDraft).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FieldPath {
    FirstName,
    LastName,
    Email,
    DateOfBirth,
    Residential(AddressLine),
    SameAsResidential,
    Permanent(AddressLine),
    Document(usize, DocumentField),
}

impl FieldPath {
    /// Every non-document field, in display order.
    pub const SCALARS: [FieldPath; 9] = [
        FieldPath::FirstName,
        FieldPath::LastName,
        FieldPath::Email,
        FieldPath::DateOfBirth,
        FieldPath::Residential(AddressLine::Street1),
        FieldPath::Residential(AddressLine::Street2),
        FieldPath::SameAsResidential,
        FieldPath::Permanent(AddressLine::Street1),
        FieldPath::Permanent(AddressLine::Street2),
    ];

    /// The three sub-field paths of the document at `index`.
    pub fn document(index: usize) -> [FieldPath; 3] {
        DocumentField::ALL.map(|field| FieldPath::Document(index, field))
    }

    /// Returns the document index if this path addresses a document entry.
    pub fn document_index(&self) -> Option<usize> {
        match self {
            FieldPath::Document(index, _) => Some(*index),
            _ => None,
        }
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldPath::FirstName => f.write_str("firstName"),
            FieldPath::LastName => f.write_str("lastName"),
            FieldPath::Email => f.write_str("email"),
            FieldPath::DateOfBirth => f.write_str("dateOfBirth"),
            FieldPath::Residential(line) => write!(f, "residential{}", line_suffix(*line)),
            FieldPath::SameAsResidential => f.write_str("sameAsResidential"),
            FieldPath::Permanent(line) => write!(f, "permanent{}", line_suffix(*line)),
            FieldPath::Document(index, field) => {
                let name = match field {
                    DocumentField::FileName => "fileName",
                    DocumentField::FileType => "fileType",
                    DocumentField::File => "file",
                };
                write!(f, "documents[{}].{}", index, name)
            }
        }
    }
}

fn line_suffix(line: AddressLine) -> &'static str {
    match line {
        AddressLine::Street1 => "Street1",
        AddressLine::Street2 => "Street2",
    }
}
