//! The booking being edited.
//!
//! `BookingDraft` is only mutated through the operations below so that the
//! `check_out > check_in` invariant holds after every single update.

use std::collections::BTreeSet;

use chrono::NaiveDate;

use crate::{Catalog, DateRangeError, EngineError, dates};

/// Whether an update touched the (glamp, check-in, check-out) triple that
/// availability is keyed on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Change {
    Triple,
    Other,
    None,
}

impl Change {
    pub fn touches_triple(self) -> bool {
        self == Change::Triple
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GuestContact {
    pub name: String,
    pub email: String,
    pub phone: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BookingDraft {
    glamp_id: Option<String>,
    check_in: Option<NaiveDate>,
    check_out: Option<NaiveDate>,
    guests: u32,
    contact: GuestContact,
    special_requests: String,
    add_ons: BTreeSet<String>,
}

impl Default for BookingDraft {
    fn default() -> Self {
        Self {
            glamp_id: None,
            check_in: None,
            check_out: None,
            guests: 1,
            contact: GuestContact::default(),
            special_requests: String::new(),
            add_ons: BTreeSet::new(),
        }
    }
}

impl BookingDraft {
    pub fn glamp_id(&self) -> Option<&str> {
        self.glamp_id.as_deref()
    }

    pub fn check_in(&self) -> Option<NaiveDate> {
        self.check_in
    }

    pub fn check_out(&self) -> Option<NaiveDate> {
        self.check_out
    }

    pub fn guests(&self) -> u32 {
        self.guests
    }

    pub fn contact(&self) -> &GuestContact {
        &self.contact
    }

    pub fn special_requests(&self) -> &str {
        &self.special_requests
    }

    pub fn add_ons(&self) -> &BTreeSet<String> {
        &self.add_ons
    }

    /// Selects (or clears) the glamp and re-clamps guests to its capacity.
    pub fn select_glamp(
        &mut self,
        catalog: &Catalog,
        glamp_id: Option<&str>,
        default_max_guests: u32,
    ) -> Result<Change, EngineError> {
        if let Some(id) = glamp_id {
            catalog.require_glamp(id)?;
        }
        if self.glamp_id.as_deref() == glamp_id {
            return Ok(Change::None);
        }
        self.glamp_id = glamp_id.map(str::to_string);
        let max = self.max_guests(catalog, default_max_guests);
        self.guests = self.guests.clamp(1, max);
        Ok(Change::Triple)
    }

    /// Moves check-in, pushing check-out forward when it would no longer be
    /// after the new check-in. Refused, leaving the draft untouched, when
    /// check-out cannot be pushed past it.
    pub fn set_check_in(
        &mut self,
        check_in: Option<NaiveDate>,
    ) -> Result<Change, DateRangeError> {
        let check_out = match check_in {
            Some(date) => dates::adjusted_check_out(date, self.check_out)?,
            None => self.check_out,
        };
        if self.check_in == check_in && self.check_out == check_out {
            return Ok(Change::None);
        }
        self.check_in = check_in;
        self.check_out = check_out;
        Ok(Change::Triple)
    }

    /// Moves check-out; a date on or before the current check-in is refused
    /// and the draft is left untouched.
    pub fn set_check_out(
        &mut self,
        check_out: Option<NaiveDate>,
    ) -> Result<Change, DateRangeError> {
        if let (Some(check_in), Some(date)) = (self.check_in, check_out)
            && date <= check_in
        {
            return Err(DateRangeError::CheckOutNotAfterCheckIn);
        }
        if self.check_out == check_out {
            return Ok(Change::None);
        }
        self.check_out = check_out;
        Ok(Change::Triple)
    }

    /// Stores the requested guest count clamped to `[1, max]` and returns
    /// the value actually kept.
    pub fn set_guests(
        &mut self,
        requested: i64,
        catalog: &Catalog,
        default_max_guests: u32,
    ) -> u32 {
        let max = self.max_guests(catalog, default_max_guests);
        let clamped = requested.clamp(1, i64::from(max));
        self.guests = u32::try_from(clamped).unwrap_or(1);
        self.guests
    }

    pub fn set_customer_name(&mut self, name: &str) -> Change {
        replace(&mut self.contact.name, name)
    }

    pub fn set_customer_email(&mut self, email: &str) -> Change {
        replace(&mut self.contact.email, email)
    }

    pub fn set_customer_phone(&mut self, phone: &str) -> Change {
        replace(&mut self.contact.phone, phone)
    }

    pub fn set_special_requests(&mut self, requests: &str) -> Change {
        replace(&mut self.special_requests, requests)
    }

    /// Flips an add-on in or out of the selection. Returns whether it is now
    /// selected.
    pub fn toggle_add_on(
        &mut self,
        catalog: &Catalog,
        add_on_id: &str,
    ) -> Result<bool, EngineError> {
        catalog.require_add_on(add_on_id)?;
        if self.add_ons.remove(add_on_id) {
            return Ok(false);
        }
        self.add_ons.insert(add_on_id.to_string());
        Ok(true)
    }

    /// Upper guest bound: the selected glamp's capacity, or the configured
    /// default while no glamp (or no capacity) is known.
    pub fn max_guests(&self, catalog: &Catalog, default_max_guests: u32) -> u32 {
        self.glamp_id
            .as_deref()
            .and_then(|id| catalog.glamp(id))
            .and_then(|glamp| glamp.capacity)
            .unwrap_or(default_max_guests)
            .max(1)
    }
}

fn replace(field: &mut String, value: &str) -> Change {
    if field == value {
        return Change::None;
    }
    value.clone_into(field);
    Change::Other
}
