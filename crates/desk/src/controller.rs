//! The booking form: draft, availability, price and submission in one
//! place, driven by discrete edit events.
//!
//! A host (TUI, CLI, web view) calls the `set_*` operations as the user
//! edits, polls [`BookingForm::next_event`] alongside its own input, and
//! calls [`BookingForm::submit`]. Only this type mutates the draft and the
//! availability flags.

use std::{sync::Arc, time::Duration};

use chrono::NaiveDate;
use client::BookingApi;
use engine::{
    AvailabilityNotice, AvailabilityReply, AvailabilityResult, BookingDraft, Catalog, Change,
    DateRangeError, EngineError, FieldErrors, FormPhase, PhaseEvent, PriceBreakdown,
    SubmissionOutcome, dates, pricing,
};

use crate::{
    checker::{AvailabilityChecker, CheckProgress, StayKey},
    notifier::{Notifier, ToastLevel},
    submitter::BookingSubmitter,
};

#[derive(Clone, Copy, Debug)]
pub struct FormSettings {
    pub debounce: Duration,
    pub default_max_guests: u32,
    /// Calendar date the form was opened on; check-in may not precede it.
    pub today: NaiveDate,
}

pub struct BookingForm<A, N> {
    catalog: Catalog,
    draft: BookingDraft,
    phase: FormPhase,
    settings: FormSettings,
    date_error: Option<DateRangeError>,
    field_errors: FieldErrors,
    checker: AvailabilityChecker<A>,
    submitter: BookingSubmitter<A>,
    notifier: N,
}

impl<A, N> BookingForm<A, N>
where
    A: BookingApi + 'static,
    N: Notifier,
{
    pub fn new(api: Arc<A>, catalog: Catalog, notifier: N, settings: FormSettings) -> Self {
        Self {
            catalog,
            draft: BookingDraft::default(),
            phase: FormPhase::Editing,
            settings,
            date_error: None,
            field_errors: FieldErrors::default(),
            checker: AvailabilityChecker::new(Arc::clone(&api), settings.debounce),
            submitter: BookingSubmitter::new(api),
            notifier,
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn draft(&self) -> &BookingDraft {
        &self.draft
    }

    pub fn phase(&self) -> FormPhase {
        self.phase
    }

    pub fn availability(&self) -> &AvailabilityResult {
        self.checker.state().result()
    }

    pub fn is_checking(&self) -> bool {
        self.checker.state().is_checking()
    }

    pub fn availability_notice(&self) -> Option<&AvailabilityNotice> {
        self.checker.state().notice()
    }

    /// Ordering or past-date problem with the current dates. Missing dates
    /// are not reported here; the form is simply incomplete.
    pub fn date_error(&self) -> Option<DateRangeError> {
        self.date_error
    }

    /// Messages from the last failed submission.
    pub fn field_errors(&self) -> &FieldErrors {
        &self.field_errors
    }

    pub fn price(&self) -> PriceBreakdown {
        pricing::compute(&self.draft, &self.catalog)
    }

    pub fn max_guests(&self) -> u32 {
        self.draft
            .max_guests(&self.catalog, self.settings.default_max_guests)
    }

    /// Submission is possible unless the current dates are known to be
    /// taken or a submission already went through.
    pub fn can_submit(&self) -> bool {
        self.phase.accepts_edits() && !self.availability().is_unavailable()
    }

    pub fn select_glamp(&mut self, glamp_id: Option<&str>) -> Result<(), EngineError> {
        self.ensure_editable()?;
        let change = self.draft.select_glamp(
            &self.catalog,
            glamp_id,
            self.settings.default_max_guests,
        )?;
        self.after_edit(change);
        Ok(())
    }

    pub fn set_check_in(&mut self, check_in: Option<NaiveDate>) -> Result<(), EngineError> {
        self.ensure_editable()?;
        let change = self.draft.set_check_in(check_in)?;
        self.after_edit(change);
        Ok(())
    }

    pub fn set_check_out(&mut self, check_out: Option<NaiveDate>) -> Result<(), EngineError> {
        self.ensure_editable()?;
        let change = self.draft.set_check_out(check_out)?;
        self.after_edit(change);
        Ok(())
    }

    /// Returns the guest count actually stored after clamping; a clamped
    /// request is reported to the user.
    pub fn set_guests(&mut self, requested: i64) -> Result<u32, EngineError> {
        self.ensure_editable()?;
        let guests = self.draft.set_guests(
            requested,
            &self.catalog,
            self.settings.default_max_guests,
        );
        if i64::from(guests) != requested {
            tracing::debug!(requested, guests, "guest count clamped");
            self.notifier
                .notify(ToastLevel::Info, &format!("Guests set to {guests}"));
        }
        Ok(guests)
    }

    pub fn set_customer_name(&mut self, name: &str) -> Result<(), EngineError> {
        self.ensure_editable()?;
        let change = self.draft.set_customer_name(name);
        self.after_edit(change);
        Ok(())
    }

    pub fn set_customer_email(&mut self, email: &str) -> Result<(), EngineError> {
        self.ensure_editable()?;
        let change = self.draft.set_customer_email(email);
        self.after_edit(change);
        Ok(())
    }

    pub fn set_customer_phone(&mut self, phone: &str) -> Result<(), EngineError> {
        self.ensure_editable()?;
        let change = self.draft.set_customer_phone(phone);
        self.after_edit(change);
        Ok(())
    }

    pub fn set_special_requests(&mut self, requests: &str) -> Result<(), EngineError> {
        self.ensure_editable()?;
        let change = self.draft.set_special_requests(requests);
        self.after_edit(change);
        Ok(())
    }

    /// Returns whether the add-on is selected afterwards.
    pub fn toggle_add_on(&mut self, add_on_id: &str) -> Result<bool, EngineError> {
        self.ensure_editable()?;
        self.draft.toggle_add_on(&self.catalog, add_on_id)
    }

    /// Processes the next debounce timer or availability reply.
    ///
    /// Returns `None` when nothing is outstanding. Cancel safe, so it can
    /// sit in a `select!` next to the host's input stream.
    pub async fn next_event(&mut self) -> Option<CheckProgress> {
        let progress = self.checker.next().await?;
        match &progress {
            CheckProgress::Started { .. } => {
                self.phase = self.phase.next(PhaseEvent::CheckStarted);
            }
            CheckProgress::Settled { reply, .. } => self.on_reply(reply),
            CheckProgress::Discarded { .. } => {}
        }
        Some(progress)
    }

    /// Drives timers and requests until none is outstanding.
    pub async fn settle(&mut self) {
        while self.next_event().await.is_some() {}
    }

    /// Submits the draft.
    ///
    /// On success the draft is cleared and the form stops accepting edits;
    /// the host is expected to navigate away. Any other outcome keeps the
    /// draft so the user can correct it and try again.
    pub async fn submit(&mut self) -> Result<SubmissionOutcome, EngineError> {
        self.ensure_editable()?;

        if let AvailabilityResult::Unavailable(reason) = self.availability() {
            let message = reason
                .clone()
                .unwrap_or_else(|| "Selected dates are not available".to_string());
            let outcome = SubmissionOutcome::Conflict(message);
            self.finish(&outcome);
            return Ok(outcome);
        }

        self.phase = self.phase.next(PhaseEvent::SubmitStarted);
        let outcome = self.submitter.submit(&self.draft).await;
        self.finish(&outcome);
        Ok(outcome)
    }

    fn ensure_editable(&self) -> Result<(), EngineError> {
        if self.phase.accepts_edits() {
            Ok(())
        } else {
            Err(EngineError::AlreadySubmitted)
        }
    }

    fn after_edit(&mut self, change: Change) {
        if !change.touches_triple() {
            return;
        }
        self.phase = self.phase.next(PhaseEvent::TripleEdited);

        let validated = dates::validate(
            self.draft.check_in(),
            self.draft.check_out(),
            self.settings.today,
        );
        self.date_error = match validated {
            Err(DateRangeError::MissingCheckIn | DateRangeError::MissingCheckOut) | Ok(_) => None,
            Err(err) => Some(err),
        };

        let stay = match (self.draft.glamp_id(), validated) {
            (Some(glamp_id), Ok(range)) => Some(StayKey {
                glamp_id: glamp_id.to_string(),
                range,
            }),
            _ => None,
        };
        self.checker.restart(stay);
    }

    fn on_reply(&mut self, reply: &AvailabilityReply) {
        match reply {
            AvailabilityReply::Available => {
                self.phase = self.phase.next(PhaseEvent::Confirmed);
            }
            AvailabilityReply::Unavailable(reason) => {
                self.phase = self.phase.next(PhaseEvent::Refused);
                let message = reason.as_deref().unwrap_or("Selected dates are not available");
                self.notifier.notify(ToastLevel::Warning, message);
            }
            AvailabilityReply::Rejected(message) => {
                self.phase = self.phase.next(PhaseEvent::Inconclusive);
                self.notifier.notify(ToastLevel::Warning, message);
            }
            AvailabilityReply::Unreachable(message) => {
                self.phase = self.phase.next(PhaseEvent::Inconclusive);
                self.notifier.notify(
                    ToastLevel::Warning,
                    &format!("Could not verify availability: {message}"),
                );
            }
        }
    }

    fn finish(&mut self, outcome: &SubmissionOutcome) {
        match outcome {
            SubmissionOutcome::Success { booking_id } => {
                self.phase = self.phase.next(PhaseEvent::SubmitSucceeded);
                self.draft = BookingDraft::default();
                self.field_errors = FieldErrors::default();
                self.date_error = None;
                self.checker.restart(None);
                self.notifier
                    .notify(ToastLevel::Success, &format!("Booking {booking_id} created"));
            }
            SubmissionOutcome::ValidationError(errors) => {
                self.phase = self.phase.next(PhaseEvent::SubmitFailed);
                self.field_errors = errors.clone();
                self.notifier
                    .notify(ToastLevel::Error, &format!("Please fix the form: {errors}"));
            }
            SubmissionOutcome::Conflict(message) => {
                self.phase = self.phase.next(PhaseEvent::SubmitFailed);
                self.field_errors = FieldErrors::default();
                self.notifier.notify(ToastLevel::Error, message);
            }
            SubmissionOutcome::TransportError(message) => {
                self.phase = self.phase.next(PhaseEvent::SubmitFailed);
                self.field_errors = FieldErrors::default();
                self.notifier.notify(
                    ToastLevel::Error,
                    &format!("Booking not sent, try again: {message}"),
                );
            }
        }
    }
}
