//! Registration draft model

mod document;
mod draft;
mod path;
mod value;

pub use document::*;
pub use draft::*;
pub use path::*;
pub use value::*;
