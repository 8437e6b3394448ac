//! Booking price derived from the current draft.
//!
//! Nothing here is cached: callers recompute after every edit so the total
//! can never disagree with the form.

use crate::{BookingDraft, Catalog, Money};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PriceBreakdown {
    pub nights: i64,
    pub base: Money,
    pub add_ons: Money,
    pub total: Money,
}

/// Prices the draft against the catalog.
///
/// An incomplete draft (no glamp, a missing date, or zero/negative nights)
/// prices at zero; that is the "not filled in yet" state, not an error.
/// Add-ons are charged once per booking; ids missing from the catalog are
/// ignored.
pub fn compute(draft: &BookingDraft, catalog: &Catalog) -> PriceBreakdown {
    let Some(glamp) = draft.glamp_id().and_then(|id| catalog.glamp(id)) else {
        return PriceBreakdown::default();
    };
    let (Some(check_in), Some(check_out)) = (draft.check_in(), draft.check_out()) else {
        return PriceBreakdown::default();
    };

    let nights = (check_out - check_in).num_days();
    if nights <= 0 {
        return PriceBreakdown::default();
    }

    let base = glamp.price_per_night.times(nights);
    let add_ons: Money = draft
        .add_ons()
        .iter()
        .filter_map(|id| catalog.add_on(id))
        .map(|add_on| add_on.price)
        .sum();

    PriceBreakdown {
        nights,
        base,
        add_ons,
        total: base + add_ons,
    }
}

/// Shorthand for `compute(draft, catalog).total`.
pub fn compute_total(draft: &BookingDraft, catalog: &Catalog) -> Money {
    compute(draft, catalog).total
}
