use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ProposalDraft;

/// Input handed to the report-generation collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportRequest {
    pub restaurant_name: String,
    pub address: String,
    pub hoods: u32,
    pub fans: u32,
    pub filters: u32,
    pub notes: String,
    /// Filenames of the uploaded photos, in upload order.
    pub photos: Vec<String>,
    /// When false, only photos flagged by the inspector are analyzed.
    pub analyze_all: bool,
}

/// Per-photo caption returned by the collaborator. The analysis text is
/// opaque to this crate; it is stored, never interpreted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PhotoAnalysis {
    pub filename: String,
    pub analysis: String,
    pub public_url: Option<String>,
}

/// Result of one report-generation call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedReport {
    /// Opaque identifier used for history lookup and sharing.
    pub report_id: String,
    pub report_text: String,
    pub photo_analysis: Vec<PhotoAnalysis>,
}

/// A saved report in history.
///
/// The embedded draft is copied by value at generation time, so later
/// edits to the working draft never change what a historical proposal
/// said. Reloading a record restores the draft including its pricing
/// mode, which is what keeps the derived/manual regime correct across
/// reloads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportRecord {
    pub report_id: String,
    pub created_at: DateTime<Utc>,
    pub report_text: String,
    pub photo_analysis: Vec<PhotoAnalysis>,
    pub draft_snapshot: ProposalDraft,
}
