use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;
use proposal_core::{HistoryRepository, RepositoryError};
use proposal_core::models::ReportRecord;

/// In-memory [`HistoryRepository`]. The production history lives in an
/// external document store; this implementation backs tests and local
/// wiring with the same trait surface.
#[derive(Default)]
pub struct MemoryHistoryRepository {
    records: Mutex<HashMap<String, ReportRecord>>,
}

impl MemoryHistoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn records(&self) -> std::sync::MutexGuard<'_, HashMap<String, ReportRecord>> {
        self.records.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl HistoryRepository for MemoryHistoryRepository {
    async fn save_report(&self, record: ReportRecord) -> Result<(), RepositoryError> {
        self.records().insert(record.report_id.clone(), record);
        Ok(())
    }

    async fn get_report(&self, report_id: &str) -> Result<ReportRecord, RepositoryError> {
        self.records()
            .get(report_id)
            .cloned()
            .ok_or(RepositoryError::NotFound)
    }

    async fn update_report(&self, record: &ReportRecord) -> Result<(), RepositoryError> {
        let mut records = self.records();
        if !records.contains_key(&record.report_id) {
            return Err(RepositoryError::NotFound);
        }
        records.insert(record.report_id.clone(), record.clone());
        Ok(())
    }

    async fn list_reports(&self) -> Result<Vec<ReportRecord>, RepositoryError> {
        let mut records: Vec<ReportRecord> = self.records().values().cloned().collect();
        records.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(records)
    }
}
