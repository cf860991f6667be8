//! Equipment-count-derived quantities.
//!
//! While pricing is in [`PricingMode::Derived`], the inspection form
//! treats the extra-hood and extra-fan item quantities and the standard
//! filter quantity as computed values: one hood and one fan are included
//! in the base rate, so the billable extras are `count - 1` (never below
//! zero), and the standard filter quantity mirrors the filter count.
//! Once the mode is [`PricingMode::Manual`] those quantities belong to
//! the operator and are left alone.

use rust_decimal::Decimal;

use crate::models::{ADDITIONAL_FAN, ADDITIONAL_HOOD, AdditionalItem, PricingMode, ProposalDraft, defaults};

/// Equipment counts entered on the inspection form.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EquipmentCounts {
    pub hoods: u32,
    pub fans: u32,
    pub filters: u32,
}

/// Billable extra units for a counted equipment type: the first unit is
/// covered by the base rate.
pub fn billable_extras(count: u32) -> Decimal {
    Decimal::from(count.saturating_sub(1))
}

/// Writes the counts into the draft, rewriting derived quantities only
/// while pricing has not been touched.
///
/// The count fields themselves (`filters`) are form-owned and always
/// updated; only the pricing-side quantities obey the mode. Missing
/// system-managed items are inserted when their derived quantity is
/// nonzero, so a draft that never saw a second hood gains the line item
/// the moment one is counted.
pub fn apply_equipment_counts(draft: &mut ProposalDraft, counts: &EquipmentCounts) {
    draft.filters = counts.filters;

    if draft.pricing_mode == PricingMode::Manual {
        return;
    }

    set_system_item_qty(draft, ADDITIONAL_HOOD, billable_extras(counts.hoods), || {
        defaults::additional_hood_rate()
    });
    set_system_item_qty(draft, ADDITIONAL_FAN, billable_extras(counts.fans), || {
        defaults::additional_fan_rate()
    });
    draft.std_filter_qty = Decimal::from(counts.filters);
}

fn set_system_item_qty(
    draft: &mut ProposalDraft,
    description: &str,
    qty: Decimal,
    default_rate: impl FnOnce() -> Decimal,
) {
    let existing = draft
        .additional_items
        .iter_mut()
        .find(|item| item.description.trim().eq_ignore_ascii_case(description));

    match existing {
        Some(item) => item.qty = qty,
        None if qty > Decimal::ZERO => {
            let frequency = draft.cleaning_frequency;
            draft.additional_items.push(AdditionalItem {
                description: description.to_string(),
                qty,
                rate: default_rate(),
                frequency,
            });
        }
        None => {}
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;
    use serde_json::json;

    use super::*;
    use crate::normalize::apply_defaults;

    fn item_qty(draft: &ProposalDraft, description: &str) -> Option<Decimal> {
        draft
            .additional_items
            .iter()
            .find(|i| i.description.eq_ignore_ascii_case(description))
            .map(|i| i.qty)
    }

    #[test]
    fn three_hoods_two_fans_derive_expected_quantities() {
        let mut draft = apply_defaults(&json!({}));

        apply_equipment_counts(
            &mut draft,
            &EquipmentCounts { hoods: 3, fans: 2, filters: 6 },
        );

        assert_eq!(item_qty(&draft, ADDITIONAL_HOOD), Some(dec!(2)));
        assert_eq!(item_qty(&draft, ADDITIONAL_FAN), Some(dec!(1)));
        assert_eq!(draft.std_filter_qty, dec!(6));
        assert_eq!(draft.filters, 6);
        assert_eq!(draft.pricing_mode, PricingMode::Derived);
    }

    #[test]
    fn single_hood_and_fan_mean_zero_extras() {
        let mut draft = apply_defaults(&json!({}));

        apply_equipment_counts(
            &mut draft,
            &EquipmentCounts { hoods: 1, fans: 1, filters: 0 },
        );

        assert_eq!(item_qty(&draft, ADDITIONAL_HOOD), Some(dec!(0)));
        // No fan item existed and zero extras do not create one.
        assert_eq!(item_qty(&draft, ADDITIONAL_FAN), None);
    }

    #[test]
    fn zero_counts_clamp_rather_than_go_negative() {
        assert_eq!(billable_extras(0), dec!(0));
        assert_eq!(billable_extras(1), dec!(0));
        assert_eq!(billable_extras(5), dec!(4));
    }

    #[test]
    fn manual_mode_freezes_derived_quantities() {
        let mut draft = apply_defaults(&json!({
            "additionalItems": [{"description": "Additional Hood", "qty": 2, "rate": 203}],
            "stdFilterQty": 4,
            "pricingTouched": true,
        }));

        apply_equipment_counts(
            &mut draft,
            &EquipmentCounts { hoods: 5, fans: 4, filters: 9 },
        );

        assert_eq!(item_qty(&draft, ADDITIONAL_HOOD), Some(dec!(2)));
        assert_eq!(draft.std_filter_qty, dec!(4));
        // The raw count is still recorded for the report itself.
        assert_eq!(draft.filters, 9);
    }

    #[test]
    fn fan_item_is_inserted_when_extras_appear() {
        let mut draft = apply_defaults(&json!({
            "cleaningFrequency": "Quarterly",
        }));

        apply_equipment_counts(
            &mut draft,
            &EquipmentCounts { hoods: 1, fans: 3, filters: 0 },
        );

        let fan = draft
            .additional_items
            .iter()
            .find(|i| i.description == ADDITIONAL_FAN)
            .expect("fan item inserted");
        assert_eq!(fan.qty, dec!(2));
        assert_eq!(fan.rate, defaults::additional_fan_rate());
        assert_eq!(fan.frequency, Some(crate::models::Frequency::Quarterly));
    }
}
