//! Debounced, sequenced availability checks.
//!
//! Timers and requests run as tasks in a [`JoinSet`] owned by the checker,
//! and their results come back through [`AvailabilityChecker::next`] in
//! completion order. Whether a result still matters is decided when it is
//! applied: every edit and every request moves the sequence number, and
//! anything carrying an older number is dropped. Requests are never
//! aborted; superseded debounce timers are.

use std::{sync::Arc, time::Duration};

use client::BookingApi;
use engine::{Applied, AvailabilityReply, AvailabilityState, DateRange};
use tokio::task::{AbortHandle, JoinSet};

/// A (glamp, dates) pair ready to be checked.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StayKey {
    pub glamp_id: String,
    pub range: DateRange,
}

#[derive(Debug)]
enum CheckEvent {
    DebounceElapsed { seq: u64 },
    Replied { seq: u64, reply: AvailabilityReply },
}

/// What [`AvailabilityChecker::next`] did.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CheckProgress {
    /// The quiet period elapsed and request `seq` went out.
    Started { seq: u64 },
    /// The reply to the latest request was applied.
    Settled { seq: u64, reply: AvailabilityReply },
    /// A reply arrived after something newer happened and was dropped.
    Discarded { seq: u64 },
}

pub struct AvailabilityChecker<A> {
    api: Arc<A>,
    debounce: Duration,
    state: AvailabilityState,
    tasks: JoinSet<CheckEvent>,
    timer: Option<AbortHandle>,
    pending: Option<StayKey>,
}

impl<A> AvailabilityChecker<A>
where
    A: BookingApi + 'static,
{
    pub fn new(api: Arc<A>, debounce: Duration) -> Self {
        Self {
            api,
            debounce,
            state: AvailabilityState::default(),
            tasks: JoinSet::new(),
            timer: None,
            pending: None,
        }
    }

    pub fn state(&self) -> &AvailabilityState {
        &self.state
    }

    /// The stay changed. The result drops to `Unknown` right away; a query
    /// goes out once the stay has been left alone for the debounce period.
    ///
    /// `None` means the stay is incomplete or invalid and must not be
    /// queried.
    pub fn restart(&mut self, stay: Option<StayKey>) {
        let seq = self.state.invalidate();
        if let Some(timer) = self.timer.take() {
            timer.abort();
        }
        self.pending = None;

        let Some(stay) = stay else {
            tracing::debug!(seq, "stay incomplete, availability left unknown");
            return;
        };

        self.pending = Some(stay);
        let debounce = self.debounce;
        self.timer = Some(self.tasks.spawn(async move {
            tokio::time::sleep(debounce).await;
            CheckEvent::DebounceElapsed { seq }
        }));
    }

    /// Waits for the next timer or reply and applies it. Returns `None` once
    /// nothing is outstanding.
    ///
    /// Cancel safe: dropping the future before it resolves loses nothing.
    pub async fn next(&mut self) -> Option<CheckProgress> {
        loop {
            let event = match self.tasks.join_next().await? {
                Ok(event) => event,
                Err(err) if err.is_cancelled() => continue,
                Err(err) => {
                    tracing::warn!("availability task failed: {err}");
                    continue;
                }
            };

            match event {
                CheckEvent::DebounceElapsed { seq } => {
                    if !self.state.is_current(seq) {
                        continue;
                    }
                    self.timer = None;
                    let Some(stay) = self.pending.take() else {
                        continue;
                    };
                    return Some(self.issue(stay));
                }
                CheckEvent::Replied { seq, reply } => {
                    return Some(match self.state.apply(seq, reply.clone()) {
                        Applied::Current => {
                            tracing::debug!(seq, ?reply, "availability reply applied");
                            CheckProgress::Settled { seq, reply }
                        }
                        Applied::Stale => {
                            tracing::debug!(
                                seq,
                                latest = self.state.sequence(),
                                "discarding stale availability reply"
                            );
                            CheckProgress::Discarded { seq }
                        }
                    });
                }
            }
        }
    }

    fn issue(&mut self, stay: StayKey) -> CheckProgress {
        let seq = self.state.begin();
        tracing::info!(
            seq,
            glamp = %stay.glamp_id,
            check_in = %stay.range.check_in(),
            check_out = %stay.range.check_out(),
            "checking availability"
        );

        let api = Arc::clone(&self.api);
        self.tasks.spawn(async move {
            let reply = match api.check_availability(&stay.glamp_id, stay.range).await {
                Ok(reply) => reply,
                Err(err) => {
                    tracing::warn!(seq, "availability check failed: {err}");
                    AvailabilityReply::Unreachable(err.to_string())
                }
            };
            CheckEvent::Replied { seq, reply }
        });
        CheckProgress::Started { seq }
    }
}

#[cfg(test)]
mod tests {
    use engine::AvailabilityResult;
    use tokio::time::Instant;

    use super::*;
    use crate::testing::{ScriptedApi, stay};

    #[tokio::test(start_paused = true)]
    async fn query_waits_for_the_quiet_period() {
        let api = Arc::new(ScriptedApi::replying(Ok(AvailabilityReply::Available)));
        let mut checker = AvailabilityChecker::new(Arc::clone(&api), Duration::from_millis(400));

        let start = Instant::now();
        checker.restart(Some(stay("dome", 15, 18)));
        assert!(matches!(checker.next().await, Some(CheckProgress::Started { .. })));
        assert!(start.elapsed() >= Duration::from_millis(400));
        assert!(checker.state().is_checking());

        assert!(matches!(checker.next().await, Some(CheckProgress::Settled { .. })));
        assert_eq!(checker.state().result(), &AvailabilityResult::Available);
        assert!(!checker.state().is_checking());
        assert_eq!(checker.next().await, None);
    }

    #[tokio::test(start_paused = true)]
    async fn bursts_of_edits_collapse_into_one_query() {
        let api = Arc::new(ScriptedApi::replying(Ok(AvailabilityReply::Available)));
        let mut checker = AvailabilityChecker::new(Arc::clone(&api), Duration::from_millis(400));

        for check_out in 16..20 {
            checker.restart(Some(stay("dome", 15, check_out)));
            tokio::time::advance(Duration::from_millis(100)).await;
        }
        while checker.next().await.is_some() {}

        assert_eq!(api.checks(), vec![stay("dome", 15, 19)]);
    }

    #[tokio::test(start_paused = true)]
    async fn incomplete_stay_is_never_queried() {
        let api = Arc::new(ScriptedApi::replying(Ok(AvailabilityReply::Available)));
        let mut checker = AvailabilityChecker::new(Arc::clone(&api), Duration::from_millis(400));

        checker.restart(Some(stay("dome", 15, 18)));
        checker.restart(None);
        assert_eq!(checker.next().await, None);
        assert!(api.checks().is_empty());
        assert_eq!(checker.state().result(), &AvailabilityResult::Unknown);
    }

    #[tokio::test(start_paused = true)]
    async fn older_reply_arriving_last_is_discarded() {
        let api = Arc::new(ScriptedApi::holding());
        let mut checker = AvailabilityChecker::new(Arc::clone(&api), Duration::from_millis(400));

        checker.restart(Some(stay("dome", 1, 3)));
        let Some(CheckProgress::Started { seq: first }) = checker.next().await else {
            panic!("first query not issued");
        };
        api.wait_for_checks(1).await;

        checker.restart(Some(stay("dome", 5, 7)));
        let Some(CheckProgress::Started { seq: second }) = checker.next().await else {
            panic!("second query not issued");
        };
        api.wait_for_checks(2).await;

        api.resolve(1, Ok(AvailabilityReply::Available));
        assert_eq!(
            checker.next().await,
            Some(CheckProgress::Settled {
                seq: second,
                reply: AvailabilityReply::Available
            })
        );

        api.resolve(0, Ok(AvailabilityReply::Unavailable(None)));
        assert_eq!(
            checker.next().await,
            Some(CheckProgress::Discarded { seq: first })
        );
        assert_eq!(checker.state().result(), &AvailabilityResult::Available);
    }

    #[tokio::test(start_paused = true)]
    async fn edit_while_request_in_flight_clears_checking() {
        let api = Arc::new(ScriptedApi::holding());
        let mut checker = AvailabilityChecker::new(Arc::clone(&api), Duration::from_millis(400));

        checker.restart(Some(stay("dome", 1, 3)));
        let _ = checker.next().await;
        assert!(checker.state().is_checking());

        checker.restart(None);
        assert!(!checker.state().is_checking());

        api.wait_for_checks(1).await;
        api.resolve(0, Ok(AvailabilityReply::Available));
        assert!(matches!(checker.next().await, Some(CheckProgress::Discarded { .. })));
        assert_eq!(checker.state().result(), &AvailabilityResult::Unknown);
    }
}
