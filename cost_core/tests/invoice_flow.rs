//! Building, pricing, saving and rolling up an invoice.

use cost_core::file_io::{load_invoice, save_invoice};
use cost_core::invoice::{Invoice, ItemCategory};
use cost_core::rates::RateTable;
use cost_core::takeoff::{summarize, takeoff};
use tempfile::tempdir;

#[test]
fn price_every_costable_category() {
    let rates = RateTable::default();
    let mut invoice = Invoice::new("INV-2025-100");

    for category in ItemCategory::ALL {
        let id = invoice.add_template_item(category);
        invoice.item_mut(&id).unwrap().dimensions = "100×100×100 cm".to_string();

        match category.cost_template(&rates) {
            Ok(item) => {
                invoice.price_item(&id, &item, &rates).unwrap();
                assert!(invoice.item(&id).unwrap().unit_price > 0.0, "{}", category);
            }
            Err(err) => {
                assert_eq!(category, ItemCategory::CustomFurniture);
                assert_eq!(err.error_code(), "NOT_COSTABLE");
            }
        }
    }

    let totals = invoice.totals();
    let expected: f64 = invoice.items.iter().map(|i| i.qty * i.unit_price).sum();
    assert_eq!(totals.subtotal, expected);
    assert!((totals.total - expected * 1.14).abs() < 1e-9 * expected);
}

#[test]
fn save_load_and_takeoff() {
    let rates = RateTable::default();
    let dir = tempdir().unwrap();
    let path = dir.path().join("INV-2025-101.json");

    let mut invoice = Invoice::new("INV-2025-101");
    invoice.meta.project_name = "Zamalek apartment".to_string();

    let cabinet = invoice.add_template_item(ItemCategory::Cabinet);
    invoice.item_mut(&cabinet).unwrap().dimensions = "220×80×40 cm".to_string();
    invoice.item_mut(&cabinet).unwrap().qty = 3.0;
    let template = ItemCategory::Cabinet.cost_template(&rates).unwrap();
    invoice.price_item(&cabinet, &template, &rates).unwrap();

    let door = invoice.add_template_item(ItemCategory::Door);
    invoice.item_mut(&door).unwrap().dimensions = "220×90×4 cm".to_string();
    let template = ItemCategory::Door.cost_template(&rates).unwrap();
    invoice.price_item(&door, &template, &rates).unwrap();

    save_invoice(&invoice, &path).unwrap();
    let loaded = load_invoice(&path).unwrap();
    assert_eq!(loaded, invoice);

    // Only the cabinet line carries a materials bill
    let lines = takeoff(&loaded);
    assert!(!lines.is_empty());
    assert!(lines.iter().all(|line| line.item_index == 0));

    let hinges = summarize(&loaded)
        .into_iter()
        .find(|m| m.name == "Door hinges")
        .unwrap();
    assert_eq!(hinges.total_qty, 30.0);
    assert_eq!(hinges.usage_count, 1);
}

#[test]
fn removing_lines_updates_totals() {
    let rates = RateTable::default();
    let mut invoice = Invoice::new("INV-2025-102");

    let chair = invoice.add_template_item(ItemCategory::DiningChair);
    invoice.item_mut(&chair).unwrap().dimensions = "45×50×90 cm".to_string();
    invoice.item_mut(&chair).unwrap().qty = 8.0;
    let template = ItemCategory::DiningChair.cost_template(&rates).unwrap();
    invoice.price_item(&chair, &template, &rates).unwrap();

    // 3484 per chair
    assert_eq!(invoice.totals().subtotal, 8.0 * 3484.0);

    invoice.remove_item(&chair);
    let totals = invoice.totals();
    assert_eq!(totals.subtotal, 0.0);
    assert_eq!(totals.total, 0.0);
}
