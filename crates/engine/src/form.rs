//! Lifecycle of a booking form.

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FormPhase {
    #[default]
    Editing,
    CheckingAvailability,
    ReadyToSubmit,
    Submitting,
    Submitted,
    Failed,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PhaseEvent {
    /// Glamp or a date changed.
    TripleEdited,
    /// The debounce window elapsed and a request went out.
    CheckStarted,
    /// The latest check came back available.
    Confirmed,
    /// The latest check came back unavailable.
    Refused,
    /// The latest check was rejected or failed; dates remain unconfirmed.
    Inconclusive,
    SubmitStarted,
    SubmitSucceeded,
    SubmitFailed,
}

impl FormPhase {
    pub fn next(self, event: PhaseEvent) -> FormPhase {
        use FormPhase::*;
        use PhaseEvent::*;

        match (self, event) {
            (Submitted, _) => Submitted,
            (Submitting, SubmitSucceeded) => Submitted,
            (Submitting, SubmitFailed) => Failed,
            (Submitting, _) => Submitting,

            (_, TripleEdited) => Editing,
            (Editing, CheckStarted) => CheckingAvailability,
            (CheckingAvailability, Confirmed | Inconclusive) => ReadyToSubmit,
            (CheckingAvailability, Refused) => Editing,
            (_, SubmitStarted) => Submitting,
            (_, SubmitFailed) => Failed,
            (phase, _) => phase,
        }
    }

    /// Edits are refused while a submission is in flight or done.
    pub fn accepts_edits(self) -> bool {
        !matches!(self, FormPhase::Submitting | FormPhase::Submitted)
    }
}
