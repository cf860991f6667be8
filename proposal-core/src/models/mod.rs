mod draft;
mod frequency;
mod report;

pub use draft::{
    ADDITIONAL_FAN, ADDITIONAL_HOOD, AdditionalItem, PricingMode, ProposalDraft, RepairItem,
    defaults,
};
pub use frequency::Frequency;
pub use report::{GeneratedReport, PhotoAnalysis, ReportRecord, ReportRequest};
