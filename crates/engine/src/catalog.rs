//! Read-only catalog snapshot used by a booking form session.
//!
//! Glamps are fetched once when the form opens; add-ons are a fixed list.
//! Neither is mutated by the booking core.

use crate::{EngineError, Money};

/// A bookable unit.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Glamp {
    pub id: String,
    pub name: String,
    pub price_per_night: Money,
    /// Maximum number of guests; `None` when the API does not report it.
    pub capacity: Option<u32>,
}

/// An optional extra charged once per booking.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AddOn {
    pub id: String,
    pub name: String,
    pub price: Money,
}

#[derive(Clone, Debug, Default)]
pub struct Catalog {
    glamps: Vec<Glamp>,
    add_ons: Vec<AddOn>,
}

impl Catalog {
    pub fn new(glamps: Vec<Glamp>, add_ons: Vec<AddOn>) -> Self {
        Self { glamps, add_ons }
    }

    pub fn glamps(&self) -> &[Glamp] {
        &self.glamps
    }

    pub fn add_ons(&self) -> &[AddOn] {
        &self.add_ons
    }

    pub fn glamp(&self, id: &str) -> Option<&Glamp> {
        self.glamps.iter().find(|glamp| glamp.id == id)
    }

    pub fn add_on(&self, id: &str) -> Option<&AddOn> {
        self.add_ons.iter().find(|add_on| add_on.id == id)
    }

    pub(crate) fn require_glamp(&self, id: &str) -> Result<&Glamp, EngineError> {
        self.glamp(id)
            .ok_or_else(|| EngineError::UnknownGlamp(id.to_string()))
    }

    pub(crate) fn require_add_on(&self, id: &str) -> Result<&AddOn, EngineError> {
        self.add_on(id)
            .ok_or_else(|| EngineError::UnknownAddOn(id.to_string()))
    }
}
