//! Submit-time validation and the outcome taxonomy of a submission.

use std::{collections::BTreeMap, fmt};

use crate::{BookingDraft, DateRange, DateRangeError};

/// A form field a validation message can be attached to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    Glamp,
    CheckIn,
    CheckOut,
    Guests,
    Name,
    Email,
    Phone,
    SpecialRequests,
    AddOns,
}

impl Field {
    /// Name of the field in the `POST /bookings` payload.
    pub const fn wire_name(self) -> &'static str {
        match self {
            Field::Glamp => "glampId",
            Field::CheckIn => "checkInDate",
            Field::CheckOut => "checkOutDate",
            Field::Guests => "guests",
            Field::Name => "customerName",
            Field::Email => "customerEmail",
            Field::Phone => "customerPhone",
            Field::SpecialRequests => "specialRequests",
            Field::AddOns => "addOns",
        }
    }

    pub fn from_wire(name: &str) -> Option<Field> {
        const ALL: [Field; 9] = [
            Field::Glamp,
            Field::CheckIn,
            Field::CheckOut,
            Field::Guests,
            Field::Name,
            Field::Email,
            Field::Phone,
            Field::SpecialRequests,
            Field::AddOns,
        ];
        ALL.into_iter().find(|field| field.wire_name() == name)
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.wire_name())
    }
}

/// Field-scoped messages plus an optional form-level message.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FieldErrors {
    fields: BTreeMap<Field, String>,
    message: Option<String>,
}

impl FieldErrors {
    pub fn insert(&mut self, field: Field, message: impl Into<String>) {
        self.fields.entry(field).or_insert_with(|| message.into());
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    pub fn get(&self, field: Field) -> Option<&str> {
        self.fields.get(&field).map(String::as_str)
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Field, &str)> {
        self.fields.iter().map(|(field, msg)| (*field, msg.as_str()))
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty() && self.message.is_none()
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts: Vec<String> = self
            .fields
            .iter()
            .map(|(field, msg)| format!("{field}: {msg}"))
            .collect();
        if let Some(message) = &self.message {
            parts.insert(0, message.clone());
        }
        f.write_str(&parts.join("; "))
    }
}

/// A draft that passed submit-time validation, with contact data trimmed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BookingRequest {
    pub glamp_id: String,
    pub range: DateRange,
    pub guests: u32,
    pub customer_name: String,
    pub customer_email: String,
    pub customer_phone: String,
    pub special_requests: Option<String>,
    pub add_ons: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SubmissionOutcome {
    Success { booking_id: String },
    /// Fixable by editing the named fields. Raised locally before any
    /// network call, or mapped back from the backend.
    ValidationError(FieldErrors),
    /// The dates collided with another booking; pick other dates and retry.
    Conflict(String),
    /// The backend could not be reached; retrying may succeed.
    TransportError(String),
}

impl SubmissionOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }
}

/// Checks everything a booking needs before it may leave the form.
///
/// Only presence and ordering of the dates are checked here; the "not in
/// the past" rule belongs to the date pickers.
pub fn validate_for_submit(draft: &BookingDraft) -> Result<BookingRequest, FieldErrors> {
    let mut errors = FieldErrors::default();

    let glamp_id = draft.glamp_id().map(str::to_string);
    if glamp_id.is_none() {
        errors.insert(Field::Glamp, "select a glamp");
    }

    let range = match (draft.check_in(), draft.check_out()) {
        (None, _) => {
            errors.insert(Field::CheckIn, DateRangeError::MissingCheckIn.to_string());
            None
        }
        (_, None) => {
            errors.insert(Field::CheckOut, DateRangeError::MissingCheckOut.to_string());
            None
        }
        (Some(check_in), Some(check_out)) => match DateRange::new(check_in, check_out) {
            Ok(range) => Some(range),
            Err(err) => {
                errors.insert(Field::CheckOut, err.to_string());
                None
            }
        },
    };

    let contact = draft.contact();
    let name = contact.name.trim();
    let email = contact.email.trim();
    let phone = contact.phone.trim();

    if name.is_empty() {
        errors.insert(Field::Name, "name is required");
    }
    if email.is_empty() {
        errors.insert(Field::Email, "email is required");
    } else if !looks_like_email(email) {
        errors.insert(Field::Email, "email is not valid");
    }
    if phone.is_empty() {
        errors.insert(Field::Phone, "phone is required");
    }

    let (Some(glamp_id), Some(range), true) = (glamp_id, range, errors.is_empty()) else {
        return Err(errors);
    };

    let requests = draft.special_requests().trim();
    Ok(BookingRequest {
        glamp_id,
        range,
        guests: draft.guests(),
        customer_name: name.to_string(),
        customer_email: email.to_string(),
        customer_phone: phone.to_string(),
        special_requests: (!requests.is_empty()).then(|| requests.to_string()),
        add_ons: draft.add_ons().iter().cloned().collect(),
    })
}

fn looks_like_email(value: &str) -> bool {
    match value.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.is_empty()
                && !domain.contains('@')
                && !value.chars().any(char::is_whitespace)
        }
        None => false,
    }
}
