//! Booking core of the glamp desk.
//!
//! Everything in this crate is synchronous and free of I/O: date rules,
//! pricing, the draft aggregate, the availability sequence guard and the
//! form lifecycle. The async wiring lives in the `desk` crate.

pub use availability::{
    Applied, AvailabilityNotice, AvailabilityReply, AvailabilityResult, AvailabilityState,
    RequestSequence,
};
pub use catalog::{AddOn, Catalog, Glamp};
pub use dates::{DateRange, DateRangeError, adjusted_check_out};
pub use draft::{BookingDraft, Change, GuestContact};
pub use error::EngineError;
pub use form::{FormPhase, PhaseEvent};
pub use money::Money;
pub use pricing::{PriceBreakdown, compute_total};
pub use submission::{BookingRequest, Field, FieldErrors, SubmissionOutcome, validate_for_submit};

pub mod dates;
pub mod pricing;

mod availability;
mod catalog;
mod draft;
mod error;
mod form;
mod money;
mod submission;
