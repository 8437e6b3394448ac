//! The module contains the errors the booking engine can throw.
//!
//! Date-range problems have their own type, [`DateRangeError`], because the
//! form surfaces them next to the date pickers; everything else is an
//! [`EngineError`].
//!
//!  [`DateRangeError`]: crate::DateRangeError
use thiserror::Error;

use crate::DateRangeError;

/// Engine custom errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),
    #[error("Invalid dates: {0}")]
    InvalidDates(#[from] DateRangeError),
    #[error("\"{0}\" glamp not found!")]
    UnknownGlamp(String),
    #[error("\"{0}\" add-on not found!")]
    UnknownAddOn(String),
    #[error("booking already submitted")]
    AlreadySubmitted,
}
