use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::Frequency;

/// Description the inspection form gives the system-managed extra-hood item.
pub const ADDITIONAL_HOOD: &str = "Additional Hood";
/// Description the inspection form gives the system-managed extra-fan item.
pub const ADDITIONAL_FAN: &str = "Additional Fan";

/// Named rate defaults applied when a field arrives absent, `null`, or `""`.
/// An explicit zero (number or the string `"0"`) is preserved as zero.
pub mod defaults {
    use rust_decimal::Decimal;

    pub fn base_rate() -> Decimal {
        Decimal::new(72300, 2)
    }

    pub fn additional_hood_rate() -> Decimal {
        Decimal::new(20300, 2)
    }

    pub fn additional_fan_rate() -> Decimal {
        Decimal::new(15200, 2)
    }

    pub fn std_filter_rate() -> Decimal {
        Decimal::new(800, 2)
    }

    pub fn non_std_filter_rate() -> Decimal {
        Decimal::new(1350, 2)
    }

    pub fn fuel_surcharge() -> Decimal {
        Decimal::new(4600, 2)
    }
}

/// Whether hood/fan/filter-derived quantities still track the equipment
/// counts from the inspection form, or pricing has been edited directly.
///
/// The transition is one-way: a pricing edit observed from the proposal
/// preview flips `Derived` to `Manual`, and nothing flips it back. That
/// matches how operators use the tool (once a proposal is hand-tuned,
/// equipment recounts must not silently rewrite it); a user-facing reset
/// would be a product decision, so none is offered here.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PricingMode {
    #[default]
    Derived,
    Manual,
}

impl PricingMode {
    pub fn is_manual(&self) -> bool {
        matches!(self, Self::Manual)
    }
}

/// A recurring billable line item beyond the base service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdditionalItem {
    pub description: String,
    pub qty: Decimal,
    pub rate: Decimal,
    pub frequency: Option<Frequency>,
}

impl AdditionalItem {
    /// True when this is the system-managed extra-hood or extra-fan item.
    /// Matching is case-insensitive over the trimmed description.
    pub fn is_system_managed(&self) -> bool {
        let d = self.description.trim();
        d.eq_ignore_ascii_case(ADDITIONAL_HOOD) || d.eq_ignore_ascii_case(ADDITIONAL_FAN)
    }
}

/// A one-time charge with no quantity/rate decomposition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepairItem {
    pub description: String,
    pub amount: Decimal,
}

/// The single working pricing record for one inspection.
///
/// This struct is the normalized shape; the persisted JSON (camelCase
/// keys, `pricingTouched` boolean) is a compatibility contract shared
/// with drafts written by older schema versions, which is why reads go
/// through [`crate::normalize::apply_defaults`] rather than plain serde
/// deserialization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProposalDraft {
    pub restaurant_name: String,
    pub address: String,
    /// Display string, not a structured date.
    pub proposal_date: String,
    pub cleaning_frequency: Option<Frequency>,

    /// Included in the base rate; clamped to a minimum of 1.
    pub initial_hood_qty: u32,
    /// Included in the base rate; clamped to a minimum of 1.
    pub initial_fan_qty: u32,
    /// Filter unit count from the inspection form; drives `std_filter_qty`
    /// while pricing is in [`PricingMode::Derived`].
    pub filters: u32,

    pub base_rate: Decimal,
    pub additional_items: Vec<AdditionalItem>,
    pub repairs: Vec<RepairItem>,

    pub std_filter_qty: Decimal,
    pub std_filter_rate: Decimal,
    pub non_std_filter_qty: Decimal,
    pub non_std_filter_rate: Decimal,

    /// Flat amount per service, not quantity-scaled.
    pub fuel_surcharge: Decimal,

    pub filter_exchange_frequency: Option<Frequency>,
    pub fuel_frequency: Option<Frequency>,

    #[serde(rename = "pricingTouched", with = "pricing_touched_flag")]
    pub pricing_mode: PricingMode,
}

impl ProposalDraft {
    /// Filter-exchange cadence, falling back to the whole-service cadence.
    pub fn effective_filter_exchange_frequency(&self) -> Option<Frequency> {
        self.filter_exchange_frequency.or(self.cleaning_frequency)
    }

    /// Fuel-surcharge cadence, falling back to the whole-service cadence.
    pub fn effective_fuel_frequency(&self) -> Option<Frequency> {
        self.fuel_frequency.or(self.cleaning_frequency)
    }
}

/// `PricingMode` travels on the wire as the historical `pricingTouched`
/// boolean.
mod pricing_touched_flag {
    use serde::{Deserialize, Deserializer, Serializer};

    use super::PricingMode;

    pub fn serialize<S: Serializer>(mode: &PricingMode, ser: S) -> Result<S::Ok, S::Error> {
        ser.serialize_bool(mode.is_manual())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(de: D) -> Result<PricingMode, D::Error> {
        let touched = bool::deserialize(de)?;
        Ok(if touched {
            PricingMode::Manual
        } else {
            PricingMode::Derived
        })
    }
}
