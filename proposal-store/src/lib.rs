//! Draft storage and cross-surface synchronization for the proposal
//! pricing engine.
//!
//! `proposal-core` owns the pure pieces (normalization, totals, derived
//! quantities); this crate owns the shared slot, the change-notification
//! fan-out between the inspection form and the proposal preview, and the
//! in-memory history repository used in tests and local wiring.

pub mod memory_history;
pub mod slot;
pub mod store;
pub mod sync;

pub use memory_history::MemoryHistoryRepository;
pub use slot::{DraftSlot, FileSlot, MemorySlot, StoreError};
pub use store::{DraftStore, DraftUpdate, Surface, merge_draft};
pub use sync::{InspectionFormSession, ProposalPreviewSession};
