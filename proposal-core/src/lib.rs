pub mod derived;
pub mod history;
pub mod models;
pub mod normalize;
pub mod totals;

pub use derived::{EquipmentCounts, apply_equipment_counts};
pub use history::{GeneratorError, HistoryRepository, ReportGenerator, RepositoryError};
pub use models::*;
pub use normalize::apply_defaults;
pub use totals::{ProposalTotals, compute_totals};
