//! End-to-end scenarios across both surfaces, a real file-backed slot,
//! and the history repository.

use chrono::Utc;
use pretty_assertions::assert_eq;
use proposal_core::models::{PricingMode, ReportRecord};
use proposal_core::{EquipmentCounts, HistoryRepository, apply_defaults};
use proposal_store::{
    DraftStore, FileSlot, InspectionFormSession, MemoryHistoryRepository, MemorySlot,
    ProposalPreviewSession, Surface,
};
use rust_decimal_macros::dec;
use serde_json::json;

fn hood_qty(draft: &proposal_core::ProposalDraft) -> rust_decimal::Decimal {
    draft
        .additional_items
        .iter()
        .find(|i| i.description.eq_ignore_ascii_case("Additional Hood"))
        .map(|i| i.qty)
        .unwrap_or_default()
}

#[test]
fn full_inspection_to_proposal_flow() {
    let store = DraftStore::new(MemorySlot::new());
    let mut form = InspectionFormSession::open(store.clone());
    let mut preview = ProposalPreviewSession::open(store);

    // Inspector counts the equipment and fills in the site.
    form.set_site_details("Taqueria Norte", "12 Mission St");
    form.set_equipment_counts(EquipmentCounts { hoods: 3, fans: 2, filters: 4 });

    // The preview picks it all up without a reload.
    preview.drain_updates();
    assert_eq!(preview.draft().restaurant_name, "Taqueria Norte");
    assert_eq!(hood_qty(preview.draft()), dec!(2));
    assert_eq!(preview.draft().std_filter_qty, dec!(4));

    // Operator tunes the pricing on the preview surface.
    preview.edit_pricing(&json!({
        "baseRate": 723,
        "additionalItems": [{"description": "Additional Hood", "qty": 2, "rate": 203}],
        "stdFilterQty": 4,
        "stdFilterRate": 8,
        "nonStdFilterQty": 0,
        "nonStdFilterRate": 13.5,
        "fuelSurcharge": 46,
        "repairs": [],
    }));
    assert_eq!(preview.totals().total_per_service, dec!(1207));

    // The form observes the pricing edit and stops deriving quantities.
    form.drain_updates();
    assert_eq!(form.draft().pricing_mode, PricingMode::Manual);

    form.set_equipment_counts(EquipmentCounts { hoods: 5, fans: 2, filters: 4 });
    assert_eq!(hood_qty(form.draft()), dec!(2), "recount must not rewrite manual pricing");

    // The preview keeps its totals across the recount.
    preview.drain_updates();
    assert_eq!(preview.totals().total_per_service, dec!(1207));
}

#[test]
fn file_slot_survives_reopening_both_surfaces() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("draft.json");

    {
        let store = DraftStore::new(FileSlot::new(&path));
        let mut form = InspectionFormSession::open(store);
        form.set_equipment_counts(EquipmentCounts { hoods: 2, fans: 1, filters: 8 });
    }

    let store = DraftStore::new(FileSlot::new(&path));
    let preview = ProposalPreviewSession::open(store);

    assert_eq!(hood_qty(preview.draft()), dec!(1));
    assert_eq!(preview.draft().filters, 8);
}

#[test]
fn legacy_file_content_is_readable_without_migration() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("draft.json");
    std::fs::write(
        &path,
        r#"{"restaurantName":"Old Grill","additionalHoodQty":1,"additionalHoodRate":200,"repairDescription":"Replace belt","repairAmount":85}"#,
    )
    .unwrap();

    let store = DraftStore::new(FileSlot::new(&path));
    let draft = store.read_draft();

    assert_eq!(draft.restaurant_name, "Old Grill");
    assert_eq!(hood_qty(&draft), dec!(1));
    assert_eq!(draft.additional_items[0].rate, dec!(200));
    assert_eq!(draft.repairs[0].description, "Replace belt");
    assert_eq!(draft.repairs[0].amount, dec!(85));
}

#[test]
fn three_surfaces_only_writer_is_excluded() {
    // A second preview (e.g. a duplicated tab) also gets the update.
    let store = DraftStore::new(MemorySlot::new());
    let form_rx = store.subscribe(Surface::InspectionForm);
    let preview_rx_a = store.subscribe(Surface::ProposalPreview);
    let preview_rx_b = store.subscribe(Surface::ProposalPreview);

    store.write_partial(Surface::InspectionForm, &json!({"filters": 12}));

    assert!(form_rx.try_recv().is_err());
    assert_eq!(preview_rx_a.try_recv().unwrap().payload["filters"], json!(12));
    assert_eq!(preview_rx_b.try_recv().unwrap().payload["filters"], json!(12));
}

#[tokio::test]
async fn generated_report_embeds_a_frozen_snapshot() {
    let store = DraftStore::new(MemorySlot::new());
    let mut preview = ProposalPreviewSession::open(store.clone());
    preview.edit_pricing(&json!({"baseRate": 650, "pricingTouched": true}));

    let repo = MemoryHistoryRepository::new();
    repo.save_report(ReportRecord {
        report_id: "r-042".to_string(),
        created_at: Utc::now(),
        report_text: "Heavy grease accumulation on hood 2.".to_string(),
        photo_analysis: vec![],
        draft_snapshot: preview.draft().clone(),
    })
    .await
    .unwrap();

    // The working draft moves on.
    preview.edit_pricing(&json!({"baseRate": 900}));
    assert_eq!(preview.draft().base_rate, dec!(900));

    // History still shows the pricing at generation time, mode included.
    let record = repo.get_report("r-042").await.unwrap();
    assert_eq!(record.draft_snapshot.base_rate, dec!(650));
    assert_eq!(record.draft_snapshot.pricing_mode, PricingMode::Manual);

    // Reloading the snapshot restores the manual regime through the
    // normal normalization path.
    let reloaded = apply_defaults(&serde_json::to_value(&record.draft_snapshot).unwrap());
    assert_eq!(reloaded.pricing_mode, PricingMode::Manual);
}
