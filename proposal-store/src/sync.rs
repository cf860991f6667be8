//! Surface sessions and the derived-until-touched rule.
//!
//! Each UI surface owns a session: a store handle, a subscription to
//! updates from the other surface, and the in-memory draft that stays
//! authoritative for that surface even when persistence fails.
//!
//! The inspection form treats hood/fan/filter-derived quantities as
//! computed until a pricing edit arrives from the proposal preview via
//! the change notification. That observation flips the draft's pricing
//! mode to manual, permanently: from then on equipment recounts update
//! the raw counts but leave the priced quantities alone. The flag is
//! persisted with the draft so history snapshots restore the right
//! regime.

use proposal_core::{
    EquipmentCounts, PricingMode, ProposalDraft, ProposalTotals, apply_defaults,
    apply_equipment_counts,
};
use serde_json::{Value, json};
use std::sync::mpsc;

use crate::store::{DraftStore, DraftUpdate, Surface, merge_draft};

/// Session for the inspection-form surface.
pub struct InspectionFormSession {
    store: DraftStore,
    updates: mpsc::Receiver<DraftUpdate>,
    draft: ProposalDraft,
}

impl InspectionFormSession {
    pub fn open(store: DraftStore) -> Self {
        let updates = store.subscribe(Surface::InspectionForm);
        let draft = store.read_draft();
        Self { store, updates, draft }
    }

    pub fn draft(&self) -> &ProposalDraft {
        &self.draft
    }

    /// Records new equipment counts, rewriting the derived quantities
    /// when pricing is untouched, and writes the result to the store.
    pub fn set_equipment_counts(&mut self, counts: EquipmentCounts) {
        self.drain_updates();
        apply_equipment_counts(&mut self.draft, &counts);
        self.store.write_draft(Surface::InspectionForm, &self.draft);
    }

    /// Updates the header fields the form owns.
    pub fn set_site_details(&mut self, restaurant_name: &str, address: &str) {
        self.drain_updates();
        self.draft.restaurant_name = restaurant_name.to_string();
        self.draft.address = address.to_string();
        self.store.write_draft(Surface::InspectionForm, &self.draft);
    }

    /// Adopts updates pushed from the other surface.
    ///
    /// Every preview-originated update is a pricing edit by definition
    /// (the preview is the pricing surface), so observing one flips the
    /// mode to manual. The flag is written back immediately so it is
    /// persistent even if the form never writes again.
    pub fn drain_updates(&mut self) {
        while let Ok(update) = self.updates.try_recv() {
            let mut adopted = apply_defaults(&update.payload);

            if update.origin == Surface::ProposalPreview
                && adopted.pricing_mode == PricingMode::Derived
            {
                adopted.pricing_mode = PricingMode::Manual;
                self.store
                    .write_partial(Surface::InspectionForm, &json!({"pricingTouched": true}));
            }

            self.draft = adopted;
        }
    }
}

/// Session for the proposal-preview surface: reads the shared draft,
/// applies pricing edits as partial merges, and recomputes totals live.
pub struct ProposalPreviewSession {
    store: DraftStore,
    updates: mpsc::Receiver<DraftUpdate>,
    draft: ProposalDraft,
}

impl ProposalPreviewSession {
    pub fn open(store: DraftStore) -> Self {
        let updates = store.subscribe(Surface::ProposalPreview);
        let draft = store.read_draft();
        Self { store, updates, draft }
    }

    pub fn draft(&self) -> &ProposalDraft {
        &self.draft
    }

    /// Applies a partial pricing edit. Only the keys present in the
    /// partial change; the merged result is re-normalized before this
    /// session adopts it.
    ///
    /// The merge happens on this session's in-memory draft, which stays
    /// authoritative for this surface: a slot write failure loses only
    /// persistence, never the edit itself.
    pub fn edit_pricing(&mut self, partial: &Value) {
        self.drain_updates();
        let current = serde_json::to_value(&self.draft).unwrap_or(Value::Null);
        let merged = merge_draft(&current, partial);
        self.draft = apply_defaults(&merged);
        self.store.write_raw(Surface::ProposalPreview, merged);
    }

    /// Adopts updates pushed from the other surface.
    pub fn drain_updates(&mut self) {
        while let Ok(update) = self.updates.try_recv() {
            self.draft = apply_defaults(&update.payload);
        }
    }

    /// Current totals for the draft as this surface sees it.
    pub fn totals(&self) -> ProposalTotals {
        ProposalTotals::from_draft(&self.draft)
    }
}
