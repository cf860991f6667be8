use serde::{Deserialize, Serialize};

/// Billing cadence for the base service or an individual line item.
///
/// The wire names match the labels the UI stores ("Semi-annually" etc.).
/// An empty selection is modeled as `Option<Frequency>::None`, not a
/// variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Frequency {
    Monthly,
    Quarterly,
    #[serde(rename = "Semi-annually")]
    SemiAnnually,
    Annually,
}

impl Frequency {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Monthly => "Monthly",
            Self::Quarterly => "Quarterly",
            Self::SemiAnnually => "Semi-annually",
            Self::Annually => "Annually",
        }
    }

    /// Parses a stored frequency label. Matching is case-insensitive and
    /// ignores surrounding whitespace; anything unrecognized (including
    /// the empty string) is `None`.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "monthly" => Some(Self::Monthly),
            "quarterly" => Some(Self::Quarterly),
            "semi-annually" | "semi-annual" | "semiannually" => Some(Self::SemiAnnually),
            "annually" | "annual" => Some(Self::Annually),
            _ => None,
        }
    }
}
