//! Availability state for the current (glamp, check-in, check-out) triple.
//!
//! Replies are matched to requests through a monotonically increasing
//! sequence number. The number moves on every issued request *and* on every
//! edit of the triple, so a reply is applied only when nothing happened
//! since its request was issued. In-flight requests are never cancelled;
//! their replies are dropped when they come back stale.

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum AvailabilityResult {
    /// Not checked yet, check in progress, or the check was inconclusive.
    /// Submission is allowed; the backend has the final word.
    #[default]
    Unknown,
    Available,
    /// The dates are taken; submission is blocked until the triple changes.
    Unavailable(Option<String>),
}

impl AvailabilityResult {
    pub fn is_unavailable(&self) -> bool {
        matches!(self, Self::Unavailable(_))
    }
}

/// What the availability endpoint said about one request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AvailabilityReply {
    Available,
    Unavailable(Option<String>),
    /// The query itself was refused (e.g. malformed dates). Says nothing
    /// about the dates being taken.
    Rejected(String),
    /// The endpoint could not be reached or answered garbage.
    Unreachable(String),
}

/// A non-blocking problem worth showing next to the form.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AvailabilityNotice {
    Rejected(String),
    Unreachable(String),
}

/// Monotonic request counter.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RequestSequence(u64);

impl RequestSequence {
    /// Moves to a fresh number, making every earlier number stale.
    pub fn advance(&mut self) -> u64 {
        self.0 = self.0.wrapping_add(1);
        self.0
    }

    pub fn current(&self) -> u64 {
        self.0
    }

    pub fn is_current(&self, seq: u64) -> bool {
        self.0 == seq
    }
}

/// Whether a reply was applied or dropped as stale.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Applied {
    Current,
    Stale,
}

#[derive(Clone, Debug, Default)]
pub struct AvailabilityState {
    result: AvailabilityResult,
    checking: bool,
    notice: Option<AvailabilityNotice>,
    sequence: RequestSequence,
}

impl AvailabilityState {
    pub fn result(&self) -> &AvailabilityResult {
        &self.result
    }

    /// `true` while the latest request has not come back yet.
    pub fn is_checking(&self) -> bool {
        self.checking
    }

    pub fn notice(&self) -> Option<&AvailabilityNotice> {
        self.notice.as_ref()
    }

    pub fn sequence(&self) -> u64 {
        self.sequence.current()
    }

    /// The triple changed: forget everything known about the previous one.
    ///
    /// Returns the sequence number a debounce timer should carry; the timer
    /// is still due only if the number is current when it fires.
    pub fn invalidate(&mut self) -> u64 {
        self.result = AvailabilityResult::Unknown;
        self.checking = false;
        self.notice = None;
        self.sequence.advance()
    }

    pub fn is_current(&self, seq: u64) -> bool {
        self.sequence.is_current(seq)
    }

    /// Starts a request and returns its identity.
    pub fn begin(&mut self) -> u64 {
        self.checking = true;
        self.notice = None;
        self.sequence.advance()
    }

    /// Applies a reply if `seq` is still the latest request.
    ///
    /// Only `Unavailable` can block submission. Rejected and unreachable
    /// checks leave the result `Unknown` and raise a notice instead.
    pub fn apply(&mut self, seq: u64, reply: AvailabilityReply) -> Applied {
        if !self.sequence.is_current(seq) {
            return Applied::Stale;
        }

        self.checking = false;
        match reply {
            AvailabilityReply::Available => {
                self.result = AvailabilityResult::Available;
            }
            AvailabilityReply::Unavailable(reason) => {
                self.result = AvailabilityResult::Unavailable(reason);
            }
            AvailabilityReply::Rejected(message) => {
                self.result = AvailabilityResult::Unknown;
                self.notice = Some(AvailabilityNotice::Rejected(message));
            }
            AvailabilityReply::Unreachable(message) => {
                self.result = AvailabilityResult::Unknown;
                self.notice = Some(AvailabilityNotice::Unreachable(message));
            }
        }
        Applied::Current
    }
}
