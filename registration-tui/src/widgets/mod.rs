pub mod spinner;

pub use spinner::Spinner;
pub use spinner::SpinnerCell;
