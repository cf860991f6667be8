//! Line-item normalization.
//!
//! Items and repairs each go through an ordered list of shape detectors.
//! Each detector recognizes one historical layout of the stored draft and
//! returns the canonical sequence; the first match wins, and the final
//! tier is an unconditional placeholder so the result is never empty.
//!
//! Tiers for additional items:
//! 1. `additionalItems` as a non-empty array (current shape),
//! 2. legacy flat fields (`additionalHoodQty`, `additionalHoodRate`,
//!    `additionalFanQty`, `additionalFanRate`),
//! 3. a single "Additional Hood" placeholder with qty 0.
//!
//! Tiers for repairs:
//! 1. `repairs` as a non-empty array,
//! 2. legacy single fields (`repairDescription`, `repairAmount`),
//! 3. one empty placeholder.
//!
//! The legacy tiers are a compatibility contract: drafts written by older
//! schema versions must stay readable with no migration step.

use serde_json::Value;

use super::coerce;
use crate::models::{ADDITIONAL_FAN, ADDITIONAL_HOOD, AdditionalItem, Frequency, RepairItem, defaults};

/// Normalizes the additional-item sequence from a raw draft object.
/// Always returns at least one entry.
pub fn normalize_additional_items(raw: &Value) -> Vec<AdditionalItem> {
    let cleaning_frequency = coerce::frequency(raw.get("cleaningFrequency"));

    detect_item_array(raw, cleaning_frequency)
        .or_else(|| detect_legacy_flat_items(raw, cleaning_frequency))
        .unwrap_or_else(|| vec![placeholder_item(cleaning_frequency)])
}

/// Normalizes the repair sequence from a raw draft object.
/// Always returns at least one entry.
pub fn normalize_repairs(raw: &Value) -> Vec<RepairItem> {
    detect_repair_array(raw)
        .or_else(|| detect_legacy_single_repair(raw))
        .unwrap_or_else(|| vec![RepairItem { description: String::new(), amount: Default::default() }])
}

/// Tier 1: current array shape. Entries are mapped field-wise through the
/// tolerant coercions; a missing rate takes the hood-rate constant and a
/// missing frequency inherits the draft's cleaning frequency.
fn detect_item_array(raw: &Value, cleaning_frequency: Option<Frequency>) -> Option<Vec<AdditionalItem>> {
    let entries = raw.get("additionalItems")?.as_array()?;
    if entries.is_empty() {
        return None;
    }

    Some(
        entries
            .iter()
            .map(|entry| AdditionalItem {
                description: coerce::string(entry.get("description")),
                qty: coerce::decimal_or_zero(entry.get("qty")),
                rate: coerce::decimal_or(entry.get("rate"), defaults::additional_hood_rate()),
                frequency: coerce::frequency(entry.get("frequency")).or(cleaning_frequency),
            })
            .collect(),
    )
}

/// Tier 2: flat fields written before items became an array. A hood entry
/// is reconstructed when either hood field is present, likewise for fans.
fn detect_legacy_flat_items(
    raw: &Value,
    cleaning_frequency: Option<Frequency>,
) -> Option<Vec<AdditionalItem>> {
    let hood_present = is_present(raw, "additionalHoodQty") || is_present(raw, "additionalHoodRate");
    let fan_present = is_present(raw, "additionalFanQty") || is_present(raw, "additionalFanRate");
    if !hood_present && !fan_present {
        return None;
    }

    let mut items = Vec::with_capacity(2);
    if hood_present {
        items.push(AdditionalItem {
            description: ADDITIONAL_HOOD.to_string(),
            qty: coerce::decimal_or_zero(raw.get("additionalHoodQty")),
            rate: coerce::decimal_or(raw.get("additionalHoodRate"), defaults::additional_hood_rate()),
            frequency: cleaning_frequency,
        });
    }
    if fan_present {
        items.push(AdditionalItem {
            description: ADDITIONAL_FAN.to_string(),
            qty: coerce::decimal_or_zero(raw.get("additionalFanQty")),
            rate: coerce::decimal_or(raw.get("additionalFanRate"), defaults::additional_fan_rate()),
            frequency: cleaning_frequency,
        });
    }
    Some(items)
}

/// Tier 3: nothing stored at all.
fn placeholder_item(cleaning_frequency: Option<Frequency>) -> AdditionalItem {
    AdditionalItem {
        description: ADDITIONAL_HOOD.to_string(),
        qty: Default::default(),
        rate: defaults::additional_hood_rate(),
        frequency: cleaning_frequency,
    }
}

fn detect_repair_array(raw: &Value) -> Option<Vec<RepairItem>> {
    let entries = raw.get("repairs")?.as_array()?;
    if entries.is_empty() {
        return None;
    }

    Some(
        entries
            .iter()
            .map(|entry| RepairItem {
                description: coerce::string(entry.get("description")),
                amount: coerce::decimal_or_zero(entry.get("amount")),
            })
            .collect(),
    )
}

fn detect_legacy_single_repair(raw: &Value) -> Option<Vec<RepairItem>> {
    if !is_present(raw, "repairDescription") && !is_present(raw, "repairAmount") {
        return None;
    }
    Some(vec![RepairItem {
        description: coerce::string(raw.get("repairDescription")),
        amount: coerce::decimal_or_zero(raw.get("repairAmount")),
    }])
}

/// A key counts as present only when it exists and is not `null`.
fn is_present(raw: &Value, key: &str) -> bool {
    matches!(raw.get(key), Some(v) if !v.is_null())
}
