use async_trait::async_trait;
use thiserror::Error;

use crate::models::{GeneratedReport, ReportRecord, ReportRequest};

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("Report not found")]
    NotFound,

    #[error("Storage error: {0}")]
    Storage(String),
}

/// Persistence collaborator for saved reports.
///
/// Each record embeds the draft snapshot taken at generation time, so the
/// repository is the source of truth for historical pricing regardless of
/// what happens to the working draft afterward.
#[async_trait]
pub trait HistoryRepository: Send + Sync {
    async fn save_report(&self, record: ReportRecord) -> Result<(), RepositoryError>;

    async fn get_report(&self, report_id: &str) -> Result<ReportRecord, RepositoryError>;

    async fn update_report(&self, record: &ReportRecord) -> Result<(), RepositoryError>;

    /// Newest first.
    async fn list_reports(&self) -> Result<Vec<ReportRecord>, RepositoryError>;
}

#[derive(Debug, Error)]
pub enum GeneratorError {
    #[error("Report generation failed: {0}")]
    Failed(String),

    #[error("Upstream service unavailable: {0}")]
    Unavailable(String),
}

/// The report-generation collaborator: a stateless request/response call
/// into the vision/summary backend. This crate never interprets the
/// returned text.
#[async_trait]
pub trait ReportGenerator: Send + Sync {
    async fn generate(&self, request: &ReportRequest) -> Result<GeneratedReport, GeneratorError>;
}
