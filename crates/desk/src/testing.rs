//! Test doubles for the booking API and the notifier.

use std::{
    future::Future,
    sync::{Arc, Mutex},
};

use chrono::NaiveDate;
use client::{BookingApi, ClientError};
use engine::{AddOn, AvailabilityReply, BookingRequest, Catalog, DateRange, Glamp, Money};
use tokio::sync::oneshot;

use crate::{
    checker::StayKey,
    notifier::{Notifier, ToastLevel},
};

type CheckResult = Result<AvailabilityReply, ClientError>;

pub(crate) fn jan(day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2027, 1, day).unwrap()
}

pub(crate) fn stay(glamp_id: &str, check_in: u32, check_out: u32) -> StayKey {
    StayKey {
        glamp_id: glamp_id.to_string(),
        range: DateRange::new(jan(check_in), jan(check_out)).unwrap(),
    }
}

pub(crate) fn catalog() -> Catalog {
    Catalog::new(
        vec![
            Glamp {
                id: "dome".to_string(),
                name: "Stargazer Dome".to_string(),
                price_per_night: Money::from_major(25_000),
                capacity: Some(4),
            },
            Glamp {
                id: "pod".to_string(),
                name: "Forest Pod".to_string(),
                price_per_night: Money::from_major(90),
                capacity: None,
            },
        ],
        vec![AddOn {
            id: "breakfast".to_string(),
            name: "Breakfast basket".to_string(),
            price: Money::from_major(75),
        }],
    )
}

#[derive(Default)]
struct Script {
    auto_reply: Option<CheckResult>,
    checks: Vec<StayKey>,
    held: Vec<Option<oneshot::Sender<CheckResult>>>,
    booking_reply: Option<Result<String, ClientError>>,
    bookings: Vec<BookingRequest>,
}

/// Fake API. Availability replies are either immediate (`replying`) or
/// held until the test releases them in any order (`holding`).
#[derive(Default)]
pub(crate) struct ScriptedApi {
    script: Mutex<Script>,
}

impl ScriptedApi {
    pub(crate) fn replying(reply: CheckResult) -> Self {
        let api = Self::default();
        api.script.lock().unwrap().auto_reply = Some(reply);
        api
    }

    pub(crate) fn holding() -> Self {
        Self::default()
    }

    pub(crate) fn with_booking_reply(self, reply: Result<String, ClientError>) -> Self {
        self.script.lock().unwrap().booking_reply = Some(reply);
        self
    }

    pub(crate) fn checks(&self) -> Vec<StayKey> {
        self.script.lock().unwrap().checks.clone()
    }

    pub(crate) fn bookings(&self) -> Vec<BookingRequest> {
        self.script.lock().unwrap().bookings.clone()
    }

    /// Lets spawned request tasks run until `count` checks were made.
    pub(crate) async fn wait_for_checks(&self, count: usize) {
        while self.script.lock().unwrap().checks.len() < count {
            tokio::task::yield_now().await;
        }
    }

    /// Releases the reply of the `index`-th held check.
    pub(crate) fn resolve(&self, index: usize, reply: CheckResult) {
        let sender = self.script.lock().unwrap().held[index]
            .take()
            .expect("check already resolved");
        sender.send(reply).unwrap();
    }
}

impl BookingApi for ScriptedApi {
    fn list_glamps(&self) -> impl Future<Output = Result<Vec<Glamp>, ClientError>> + Send {
        let glamps = catalog().glamps().to_vec();
        async move { Ok(glamps) }
    }

    fn check_availability(
        &self,
        glamp_id: &str,
        range: DateRange,
    ) -> impl Future<Output = CheckResult> + Send {
        let mut script = self.script.lock().unwrap();
        script.checks.push(StayKey {
            glamp_id: glamp_id.to_string(),
            range,
        });
        let ready = match script.auto_reply.clone() {
            Some(reply) => Ok(reply),
            None => {
                let (tx, rx) = oneshot::channel();
                script.held.push(Some(tx));
                Err(rx)
            }
        };
        drop(script);

        async move {
            match ready {
                Ok(reply) => reply,
                Err(rx) => rx
                    .await
                    .unwrap_or_else(|_| Err(ClientError::Transport("reply dropped".to_string()))),
            }
        }
    }

    fn create_booking(
        &self,
        request: &BookingRequest,
    ) -> impl Future<Output = Result<String, ClientError>> + Send {
        let mut script = self.script.lock().unwrap();
        script.bookings.push(request.clone());
        let reply = script
            .booking_reply
            .clone()
            .unwrap_or_else(|| Ok("bk-1".to_string()));
        drop(script);
        async move { reply }
    }
}

/// Collects toasts for assertions.
#[derive(Clone, Default)]
pub(crate) struct RecordingNotifier {
    toasts: Arc<Mutex<Vec<(ToastLevel, String)>>>,
}

impl RecordingNotifier {
    pub(crate) fn toasts(&self) -> Vec<(ToastLevel, String)> {
        self.toasts.lock().unwrap().clone()
    }

    pub(crate) fn levels(&self) -> Vec<ToastLevel> {
        self.toasts().into_iter().map(|(level, _)| level).collect()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, level: ToastLevel, message: &str) {
        self.toasts.lock().unwrap().push((level, message.to_string()));
    }
}
