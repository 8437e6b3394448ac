//! REST access to the booking back office.
//!
//! [`BookingApi`] is the seam the form controller talks to; [`Client`] is
//! its `reqwest` implementation.

use std::{future::Future, time::Duration};

use api_types::{
    availability::{AvailabilityQuery, AvailabilityResponse},
    booking::BookingResponse,
    glamp::GlampListResponse,
};
use engine::{AvailabilityReply, BookingRequest, DateRange, Glamp};
use reqwest::{Response, Url};
use serde::de::DeserializeOwned;

pub use convert::booking_payload;
pub use error::ClientError;

mod classify;
mod convert;
mod error;

/// The three endpoints the booking workflow consumes.
pub trait BookingApi: Send + Sync {
    fn list_glamps(&self) -> impl Future<Output = Result<Vec<Glamp>, ClientError>> + Send;

    /// Asks whether `glamp_id` is free for `range`.
    ///
    /// A refused query comes back as `Ok(AvailabilityReply::Rejected)`;
    /// `Err` is reserved for failures to get any usable answer.
    fn check_availability(
        &self,
        glamp_id: &str,
        range: DateRange,
    ) -> impl Future<Output = Result<AvailabilityReply, ClientError>> + Send;

    /// Creates the booking and returns its id.
    fn create_booking(
        &self,
        request: &BookingRequest,
    ) -> impl Future<Output = Result<String, ClientError>> + Send;
}

#[derive(Debug, Clone)]
pub struct Client {
    base_url: Url,
    http: reqwest::Client,
}

impl Client {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ClientError> {
        let mut raw = base_url.trim().to_string();
        if !raw.ends_with('/') {
            raw.push('/');
        }
        let base_url = Url::parse(&raw).map_err(|err| ClientError::InvalidUrl(err.to_string()))?;
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { base_url, http })
    }

    fn endpoint(&self, path: &str) -> Result<Url, ClientError> {
        self.base_url
            .join(path)
            .map_err(|err| ClientError::InvalidUrl(err.to_string()))
    }
}

/// Reads the body as JSON, keeping the status even when the body is not
/// the expected shape.
async fn read_json<T: DeserializeOwned>(
    res: Response,
) -> Result<(reqwest::StatusCode, Option<T>), ClientError> {
    let status = res.status();
    let bytes = res.bytes().await?;
    let body = match serde_json::from_slice::<T>(&bytes) {
        Ok(body) => Some(body),
        Err(err) => {
            tracing::debug!("unparsable {status} response body: {err}");
            None
        }
    };
    Ok((status, body))
}

impl BookingApi for Client {
    async fn list_glamps(&self) -> Result<Vec<Glamp>, ClientError> {
        let endpoint = self.endpoint("glamps")?;
        let res = self.http.get(endpoint).send().await?;
        let (status, body) = read_json::<GlampListResponse>(res).await?;

        let Some(body) = body else {
            if status.is_success() {
                return Err(ClientError::Decode("glamp list is not valid JSON".to_string()));
            }
            return Err(ClientError::for_status(status, "unknown error".to_string()));
        };
        if !status.is_success() || !body.success {
            let message = body.error.unwrap_or_else(|| "unknown error".to_string());
            return Err(ClientError::for_status(status, message));
        }

        body.data.into_iter().map(convert::glamp_from_wire).collect()
    }

    async fn check_availability(
        &self,
        glamp_id: &str,
        range: DateRange,
    ) -> Result<AvailabilityReply, ClientError> {
        let endpoint = self.endpoint("availability")?;
        let query = AvailabilityQuery {
            unit_id: glamp_id.to_string(),
            check_in: range.check_in(),
            check_out: range.check_out(),
        };

        let res = self.http.get(endpoint).query(&query).send().await?;
        let (status, body) = read_json::<AvailabilityResponse>(res).await?;
        classify::availability_reply(status, body)
    }

    async fn create_booking(&self, request: &BookingRequest) -> Result<String, ClientError> {
        let endpoint = self.endpoint("bookings")?;
        let payload = convert::booking_payload(request);

        let res = self.http.post(endpoint).json(&payload).send().await?;
        let (status, body) = read_json::<BookingResponse>(res).await?;
        classify::booking_result(status, body)
    }
}
