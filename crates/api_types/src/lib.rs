//! Wire types exchanged with the glamping back-office REST API.
//!
//! Field names follow the API's camelCase JSON. Calendar dates are always
//! ISO `YYYY-MM-DD` strings without a time-of-day component.

use serde::{Deserialize, Serialize};

/// Machine-readable failure class attached to an unsuccessful response.
///
/// Older API deployments omit it; callers must classify such responses by
/// HTTP status and the other structured fields instead.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// The request itself was malformed (bad dates, missing fields).
    Validation,
    /// The request was well formed but collides with existing bookings.
    Conflict,
    #[serde(other)]
    Other,
}

pub mod glamp {
    use super::*;

    #[derive(Clone, Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct Glamp {
        pub id: String,
        pub name: String,
        /// Nightly rate in major units (e.g. `250` or `249.90`).
        pub price_per_night: serde_json::Number,
        #[serde(default)]
        pub capacity: Option<u32>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct GlampListResponse {
        pub success: bool,
        #[serde(default)]
        pub data: Vec<Glamp>,
        pub error: Option<String>,
    }
}

pub mod availability {
    use chrono::NaiveDate;

    use super::*;

    /// Query string of `GET /availability`.
    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct AvailabilityQuery {
        pub unit_id: String,
        pub check_in: NaiveDate,
        pub check_out: NaiveDate,
    }

    /// `success = false` means the query was rejected, not that the dates
    /// are taken. Only `available = Some(false)` on a successful response
    /// reports unavailability.
    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct AvailabilityResponse {
        pub success: bool,
        pub available: Option<bool>,
        pub error: Option<String>,
        pub error_kind: Option<ErrorKind>,
    }
}

pub mod booking {
    use std::collections::BTreeMap;

    use chrono::NaiveDate;

    use super::*;

    /// Request body of `POST /bookings`.
    #[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct BookingNew {
        pub glamp_id: String,
        pub check_in_date: NaiveDate,
        pub check_out_date: NaiveDate,
        pub guests: u32,
        pub customer_name: String,
        pub customer_email: String,
        pub customer_phone: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        pub special_requests: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        pub add_ons: Option<Vec<String>>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct BookingCreated {
        pub id: String,
    }

    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct BookingResponse {
        pub success: bool,
        pub data: Option<BookingCreated>,
        pub error: Option<String>,
        pub error_kind: Option<ErrorKind>,
        /// Per-field messages keyed by the request's wire field names
        /// (`customerEmail`, `checkInDate`, ...).
        #[serde(default)]
        pub fields: BTreeMap<String, String>,
    }
}
