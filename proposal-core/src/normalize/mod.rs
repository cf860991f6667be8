//! Conversion of externally-sourced draft objects into the canonical
//! [`ProposalDraft`] shape.
//!
//! Input comes from the client-local storage slot or from a cross-surface
//! update, either of which may carry a partial draft, a legacy layout, or
//! junk. Normalization never fails: every malformed field has a defined
//! fallback, so callers always get a draft they can do arithmetic on.

pub mod coerce;
mod items;

use serde_json::Value;

pub use items::{normalize_additional_items, normalize_repairs};

use crate::models::{PricingMode, ProposalDraft, defaults};

/// Builds a fully-populated draft from any JSON value, including `null`
/// and `{}`.
///
/// The six named rate fields take their default constant only when the
/// stored value is absent, `null`, or an empty string; an explicit zero
/// survives. Quantities and amounts coerce to zero. Hood and fan initial
/// quantities clamp to a minimum of 1 (they are included in the base
/// rate, never zero). Item and repair normalization always runs, so the
/// result's sequences are never empty.
///
/// Idempotent: feeding a serialized normalized draft back in reproduces
/// it exactly.
pub fn apply_defaults(raw: &Value) -> ProposalDraft {
    ProposalDraft {
        restaurant_name: coerce::string(raw.get("restaurantName")),
        address: coerce::string(raw.get("address")),
        proposal_date: coerce::string(raw.get("proposalDate")),
        cleaning_frequency: coerce::frequency(raw.get("cleaningFrequency")),

        initial_hood_qty: coerce::count_at_least(raw.get("initialHoodQty"), 1),
        initial_fan_qty: coerce::count_at_least(raw.get("initialFanQty"), 1),
        filters: coerce::count_at_least(raw.get("filters"), 0),

        base_rate: coerce::decimal_or(raw.get("baseRate"), defaults::base_rate()),
        additional_items: normalize_additional_items(raw),
        repairs: normalize_repairs(raw),

        std_filter_qty: coerce::decimal_or_zero(raw.get("stdFilterQty")),
        std_filter_rate: coerce::decimal_or(raw.get("stdFilterRate"), defaults::std_filter_rate()),
        non_std_filter_qty: coerce::decimal_or_zero(raw.get("nonStdFilterQty")),
        non_std_filter_rate: coerce::decimal_or(
            raw.get("nonStdFilterRate"),
            defaults::non_std_filter_rate(),
        ),

        fuel_surcharge: coerce::decimal_or(raw.get("fuelSurcharge"), defaults::fuel_surcharge()),

        filter_exchange_frequency: coerce::frequency(raw.get("filterExchangeFrequency")),
        fuel_frequency: coerce::frequency(raw.get("fuelFrequency")),

        pricing_mode: if raw.get("pricingTouched").and_then(Value::as_bool) == Some(true) {
            PricingMode::Manual
        } else {
            PricingMode::Derived
        },
    }
}
