//! Front-desk booking workflow: the form controller, its debounced
//! availability checker and the submitter, plus the `glamp_desk` CLI glue.

pub mod checker;
pub mod commands;
pub mod config;
pub mod controller;
pub mod error;
pub mod notifier;
pub mod submitter;

#[cfg(test)]
mod testing;

pub use checker::{AvailabilityChecker, CheckProgress, StayKey};
pub use controller::{BookingForm, FormSettings};
pub use notifier::{ConsoleNotifier, Notifier, ToastLevel};
pub use submitter::BookingSubmitter;
