//! Conversions between wire types and engine types.

use api_types::{booking::BookingNew, glamp::Glamp as WireGlamp};
use engine::{BookingRequest, Glamp, Money};

use crate::ClientError;

pub(crate) fn glamp_from_wire(wire: WireGlamp) -> Result<Glamp, ClientError> {
    let price_per_night = wire
        .price_per_night
        .to_string()
        .parse::<Money>()
        .map_err(|err| ClientError::Decode(format!("glamp {}: {err}", wire.id)))?;
    if price_per_night < Money::ZERO {
        return Err(ClientError::Decode(format!(
            "glamp {}: negative nightly rate",
            wire.id
        )));
    }
    Ok(Glamp {
        id: wire.id,
        name: wire.name,
        price_per_night,
        capacity: wire.capacity.filter(|capacity| *capacity > 0),
    })
}

pub fn booking_payload(request: &BookingRequest) -> BookingNew {
    BookingNew {
        glamp_id: request.glamp_id.clone(),
        check_in_date: request.range.check_in(),
        check_out_date: request.range.check_out(),
        guests: request.guests,
        customer_name: request.customer_name.clone(),
        customer_email: request.customer_email.clone(),
        customer_phone: request.customer_phone.clone(),
        special_requests: request.special_requests.clone(),
        add_ons: (!request.add_ons.is_empty()).then(|| request.add_ons.clone()),
    }
}
