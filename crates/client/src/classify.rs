//! Turns raw API answers into availability replies and booking results.
//!
//! Only the HTTP status and the structured fields (`success`, `available`,
//! `errorKind`, `fields`) are inspected. The free-text `error` is carried
//! along for display and never pattern-matched.

use api_types::{ErrorKind, availability::AvailabilityResponse, booking::BookingResponse};
use engine::AvailabilityReply;
use reqwest::StatusCode;

use crate::ClientError;

const UNKNOWN_ERROR: &str = "unknown error";

pub(crate) fn availability_reply(
    status: StatusCode,
    body: Option<AvailabilityResponse>,
) -> Result<AvailabilityReply, ClientError> {
    if status.is_success() {
        let body = body.ok_or_else(|| {
            ClientError::Decode("availability response is not valid JSON".to_string())
        })?;
        if body.success {
            return match body.available {
                Some(true) => Ok(AvailabilityReply::Available),
                Some(false) => Ok(AvailabilityReply::Unavailable(body.error)),
                None => Err(ClientError::Decode(
                    "availability response without `available`".to_string(),
                )),
            };
        }
        return Ok(refused_query(body.error_kind, body.error, false));
    }

    let (kind, message) = match body {
        Some(body) => (body.error_kind, body.error),
        None => (None, None),
    };
    match status.as_u16() {
        400 | 422 => Ok(refused_query(kind, message, false)),
        409 => Ok(refused_query(kind, message, true)),
        _ => Err(ClientError::for_status(
            status,
            message.unwrap_or_else(|| UNKNOWN_ERROR.to_string()),
        )),
    }
}

/// A query the API declined to answer. It only means "taken" when the API
/// says so through `errorKind` (or a 409).
fn refused_query(
    kind: Option<ErrorKind>,
    message: Option<String>,
    conflict_status: bool,
) -> AvailabilityReply {
    match kind {
        Some(ErrorKind::Conflict) => AvailabilityReply::Unavailable(message),
        None | Some(ErrorKind::Other) if conflict_status => AvailabilityReply::Unavailable(message),
        _ => AvailabilityReply::Rejected(
            message.unwrap_or_else(|| "availability query rejected".to_string()),
        ),
    }
}

/// Returns the id of the created booking, or the classified failure.
pub(crate) fn booking_result(
    status: StatusCode,
    body: Option<BookingResponse>,
) -> Result<String, ClientError> {
    if status.is_success()
        && let Some(body) = &body
        && body.success
    {
        return body
            .data
            .as_ref()
            .map(|created| created.id.clone())
            .ok_or_else(|| ClientError::Decode("booking created without an id".to_string()));
    }

    let Some(body) = body else {
        if status.is_success() {
            return Err(ClientError::Decode(
                "booking response is not valid JSON".to_string(),
            ));
        }
        return Err(rejection(status, None, UNKNOWN_ERROR.to_string(), Default::default()));
    };

    let message = body.error.unwrap_or_else(|| UNKNOWN_ERROR.to_string());
    Err(rejection(status, body.error_kind, message, body.fields))
}

fn rejection(
    status: StatusCode,
    kind: Option<ErrorKind>,
    message: String,
    fields: std::collections::BTreeMap<String, String>,
) -> ClientError {
    match status.as_u16() {
        401 | 403 | 404 => return ClientError::for_status(status, message),
        500..=599 => return ClientError::Server(message),
        _ => {}
    }

    let validation = kind == Some(ErrorKind::Validation)
        || !fields.is_empty()
        || status == StatusCode::UNPROCESSABLE_ENTITY;
    if validation && kind != Some(ErrorKind::Conflict) {
        return ClientError::Validation { message, fields };
    }
    ClientError::Conflict(message)
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use api_types::booking::BookingCreated;

    use super::*;

    fn availability(
        success: bool,
        available: Option<bool>,
        kind: Option<ErrorKind>,
    ) -> AvailabilityResponse {
        AvailabilityResponse {
            success,
            available,
            error: Some("msg".to_string()),
            error_kind: kind,
        }
    }

    fn booking(success: bool, kind: Option<ErrorKind>, fields: &[(&str, &str)]) -> BookingResponse {
        BookingResponse {
            success,
            data: success.then(|| BookingCreated {
                id: "bk-1".to_string(),
            }),
            error: (!success).then(|| "Dates not available".to_string()),
            error_kind: kind,
            fields: fields
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect::<BTreeMap<_, _>>(),
        }
    }

    #[test]
    fn available_flag_drives_the_reply() {
        assert_eq!(
            availability_reply(StatusCode::OK, Some(availability(true, Some(true), None))),
            Ok(AvailabilityReply::Available)
        );
        assert_eq!(
            availability_reply(StatusCode::OK, Some(availability(true, Some(false), None))),
            Ok(AvailabilityReply::Unavailable(Some("msg".to_string())))
        );
    }

    #[test]
    fn unsuccessful_query_is_rejected_not_unavailable() {
        assert_eq!(
            availability_reply(StatusCode::OK, Some(availability(false, None, None))),
            Ok(AvailabilityReply::Rejected("msg".to_string()))
        );
        assert_eq!(
            availability_reply(
                StatusCode::BAD_REQUEST,
                Some(availability(false, None, Some(ErrorKind::Validation)))
            ),
            Ok(AvailabilityReply::Rejected("msg".to_string()))
        );
    }

    #[test]
    fn explicit_conflict_kind_means_unavailable() {
        assert_eq!(
            availability_reply(
                StatusCode::OK,
                Some(availability(false, None, Some(ErrorKind::Conflict)))
            ),
            Ok(AvailabilityReply::Unavailable(Some("msg".to_string())))
        );
        assert_eq!(
            availability_reply(StatusCode::CONFLICT, None),
            Ok(AvailabilityReply::Unavailable(None))
        );
    }

    #[test]
    fn server_errors_and_garbage_are_errors() {
        assert!(matches!(
            availability_reply(StatusCode::BAD_GATEWAY, None),
            Err(ClientError::Server(_))
        ));
        assert!(matches!(
            availability_reply(StatusCode::OK, None),
            Err(ClientError::Decode(_))
        ));
        assert!(matches!(
            availability_reply(StatusCode::OK, Some(availability(true, None, None))),
            Err(ClientError::Decode(_))
        ));
    }

    #[test]
    fn created_booking_yields_id() {
        assert_eq!(
            booking_result(StatusCode::CREATED, Some(booking(true, None, &[]))),
            Ok("bk-1".to_string())
        );
    }

    #[test]
    fn unstructured_failure_is_a_conflict() {
        assert_eq!(
            booking_result(StatusCode::OK, Some(booking(false, None, &[]))),
            Err(ClientError::Conflict("Dates not available".to_string()))
        );
        assert_eq!(
            booking_result(StatusCode::BAD_REQUEST, Some(booking(false, None, &[]))),
            Err(ClientError::Conflict("Dates not available".to_string()))
        );
    }

    #[test]
    fn field_errors_are_validation() {
        let res = booking_result(
            StatusCode::BAD_REQUEST,
            Some(booking(false, None, &[("customerEmail", "invalid email")])),
        );
        let Err(ClientError::Validation { fields, .. }) = res else {
            panic!("expected validation error, got {res:?}");
        };
        assert_eq!(fields.get("customerEmail").map(String::as_str), Some("invalid email"));
    }

    #[test]
    fn error_kind_wins_over_status() {
        assert!(matches!(
            booking_result(
                StatusCode::UNPROCESSABLE_ENTITY,
                Some(booking(false, Some(ErrorKind::Conflict), &[]))
            ),
            Err(ClientError::Conflict(_))
        ));
        assert!(matches!(
            booking_result(
                StatusCode::OK,
                Some(booking(false, Some(ErrorKind::Validation), &[]))
            ),
            Err(ClientError::Validation { .. })
        ));
    }

    #[test]
    fn server_failure_is_not_a_conflict() {
        assert!(matches!(
            booking_result(StatusCode::SERVICE_UNAVAILABLE, None),
            Err(ClientError::Server(_))
        ));
        assert!(matches!(
            booking_result(StatusCode::NOT_FOUND, Some(booking(false, None, &[]))),
            Err(ClientError::NotFound(_))
        ));
    }
}
