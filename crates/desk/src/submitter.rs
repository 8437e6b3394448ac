//! Sends a finished draft to the back office and classifies the answer.

use std::sync::Arc;

use client::{BookingApi, ClientError};
use engine::{BookingDraft, Field, FieldErrors, SubmissionOutcome, validate_for_submit};

pub struct BookingSubmitter<A> {
    api: Arc<A>,
}

impl<A: BookingApi> BookingSubmitter<A> {
    pub fn new(api: Arc<A>) -> Self {
        Self { api }
    }

    /// Validates the draft locally, then creates the booking.
    ///
    /// An invalid draft never reaches the network. Whatever goes wrong after
    /// that ends up as one of the `SubmissionOutcome` variants; the draft
    /// itself is never touched here.
    pub async fn submit(&self, draft: &BookingDraft) -> SubmissionOutcome {
        let request = match validate_for_submit(draft) {
            Ok(request) => request,
            Err(errors) => {
                tracing::debug!(%errors, "booking rejected before submission");
                return SubmissionOutcome::ValidationError(errors);
            }
        };

        match self.api.create_booking(&request).await {
            Ok(booking_id) => {
                tracing::info!(
                    %booking_id,
                    glamp = %request.glamp_id,
                    check_in = %request.range.check_in(),
                    check_out = %request.range.check_out(),
                    "booking created"
                );
                SubmissionOutcome::Success { booking_id }
            }
            Err(err) => {
                tracing::warn!("booking submission failed: {err}");
                outcome_for_error(err)
            }
        }
    }
}

fn outcome_for_error(err: ClientError) -> SubmissionOutcome {
    match err {
        ClientError::Conflict(message) => SubmissionOutcome::Conflict(message),
        ClientError::Validation { message, fields } => {
            let mut errors = FieldErrors::default();
            let mut unmapped = Vec::new();
            for (name, msg) in fields {
                match Field::from_wire(&name) {
                    Some(field) => errors.insert(field, msg),
                    None => unmapped.push(format!("{name}: {msg}")),
                }
            }
            let message = if unmapped.is_empty() {
                message
            } else {
                format!("{message} ({})", unmapped.join(", "))
            };
            SubmissionOutcome::ValidationError(errors.with_message(message))
        }
        other => SubmissionOutcome::TransportError(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use engine::Catalog;

    use super::*;
    use crate::testing::{ScriptedApi, catalog, jan};

    fn draft(catalog: &Catalog) -> BookingDraft {
        let mut draft = BookingDraft::default();
        let _ = draft.select_glamp(catalog, Some("dome"), 10).unwrap();
        let _ = draft.set_check_in(Some(jan(15)));
        let _ = draft.set_check_out(Some(jan(18))).unwrap();
        let _ = draft.set_customer_name("Ada Lovelace");
        let _ = draft.set_customer_email("ada@example.com");
        let _ = draft.set_customer_phone("+39 333 1234567");
        draft
    }

    #[tokio::test]
    async fn empty_email_fails_without_a_request() {
        let api = Arc::new(ScriptedApi::holding());
        let submitter = BookingSubmitter::new(Arc::clone(&api));
        let mut draft = draft(&catalog());
        let _ = draft.set_customer_email("");

        let SubmissionOutcome::ValidationError(errors) = submitter.submit(&draft).await else {
            panic!("expected a validation error");
        };
        assert!(errors.get(Field::Email).is_some());
        assert!(api.bookings().is_empty());
    }

    #[tokio::test]
    async fn created_booking_is_success() {
        let api = Arc::new(ScriptedApi::holding().with_booking_reply(Ok("bk-77".to_string())));
        let submitter = BookingSubmitter::new(Arc::clone(&api));

        let outcome = submitter.submit(&draft(&catalog())).await;
        assert_eq!(
            outcome,
            SubmissionOutcome::Success {
                booking_id: "bk-77".to_string()
            }
        );
        assert_eq!(api.bookings().len(), 1);
        assert_eq!(api.bookings()[0].customer_name, "Ada Lovelace");
    }

    #[tokio::test]
    async fn taken_dates_are_a_conflict() {
        let api = Arc::new(
            ScriptedApi::holding()
                .with_booking_reply(Err(ClientError::Conflict("Dates not available".to_string()))),
        );
        let submitter = BookingSubmitter::new(api);

        assert_eq!(
            submitter.submit(&draft(&catalog())).await,
            SubmissionOutcome::Conflict("Dates not available".to_string())
        );
    }

    #[tokio::test]
    async fn backend_field_errors_map_onto_form_fields() {
        let fields = BTreeMap::from([
            ("customerPhone".to_string(), "invalid phone".to_string()),
            ("voucher".to_string(), "expired".to_string()),
        ]);
        let api = Arc::new(ScriptedApi::holding().with_booking_reply(Err(
            ClientError::Validation {
                message: "Invalid booking".to_string(),
                fields,
            },
        )));
        let submitter = BookingSubmitter::new(api);

        let SubmissionOutcome::ValidationError(errors) = submitter.submit(&draft(&catalog())).await
        else {
            panic!("expected a validation error");
        };
        assert_eq!(errors.get(Field::Phone), Some("invalid phone"));
        assert_eq!(errors.message(), Some("Invalid booking (voucher: expired)"));
    }

    #[tokio::test]
    async fn unreachable_and_server_errors_are_transport_errors() {
        for err in [
            ClientError::Transport("connection refused".to_string()),
            ClientError::Server("internal server error".to_string()),
            ClientError::Decode("booking created without an id".to_string()),
        ] {
            let api = Arc::new(ScriptedApi::holding().with_booking_reply(Err(err)));
            let submitter = BookingSubmitter::new(api);
            assert!(matches!(
                submitter.submit(&draft(&catalog())).await,
                SubmissionOutcome::TransportError(_)
            ));
        }
    }
}
