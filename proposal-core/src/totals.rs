//! Proposal totals computation.
//!
//! A pure mapping from a draft to its subtotals and grand total:
//!
//! | Subtotal | Definition |
//! |----------|------------|
//! | additional | Σ qty × rate over additional items |
//! | main service | base rate + additional subtotal |
//! | repairs | Σ amount over repairs |
//! | filters | std qty × std rate + non-std qty × non-std rate |
//! | fuel | the flat fuel surcharge |
//! | total per service | main service + repairs + filters + fuel |
//!
//! Inputs pass through the same tolerant coercion as normalization, so
//! the computation is defined for any JSON value, including `{}`, and
//! can never produce a non-finite number.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::models::ProposalDraft;
use crate::normalize::apply_defaults;

/// Rounds to two decimal places, half away from zero. Standard financial
/// rounding for displayed currency.
pub fn round_half_up(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, rust_decimal::RoundingStrategy::MidpointAwayFromZero)
}

/// Computed subtotals and grand total for one proposal draft.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProposalTotals {
    pub additional_subtotal: Decimal,
    pub main_service_subtotal: Decimal,
    pub repairs_subtotal: Decimal,
    pub filters_subtotal: Decimal,
    pub fuel_subtotal: Decimal,
    pub total_per_service: Decimal,
}

impl ProposalTotals {
    /// Computes totals from a normalized draft.
    ///
    /// Summation is a stable left-to-right reduction; each subtotal is
    /// rounded before entering the grand total.
    pub fn from_draft(draft: &ProposalDraft) -> Self {
        let additional_subtotal = round_half_up(
            draft
                .additional_items
                .iter()
                .fold(Decimal::ZERO, |acc, item| acc + item.qty * item.rate),
        );
        let main_service_subtotal = round_half_up(draft.base_rate + additional_subtotal);
        let repairs_subtotal = round_half_up(
            draft
                .repairs
                .iter()
                .fold(Decimal::ZERO, |acc, repair| acc + repair.amount),
        );
        let filters_subtotal = round_half_up(
            draft.std_filter_qty * draft.std_filter_rate
                + draft.non_std_filter_qty * draft.non_std_filter_rate,
        );
        let fuel_subtotal = round_half_up(draft.fuel_surcharge);
        let total_per_service = round_half_up(
            main_service_subtotal + repairs_subtotal + filters_subtotal + fuel_subtotal,
        );

        Self {
            additional_subtotal,
            main_service_subtotal,
            repairs_subtotal,
            filters_subtotal,
            fuel_subtotal,
            total_per_service,
        }
    }
}

/// Computes totals from a raw draft value, re-normalizing defensively
/// first. Defined for any input, `{}` and `null` included.
pub fn compute_totals(raw: &Value) -> ProposalTotals {
    ProposalTotals::from_draft(&apply_defaults(raw))
}
