//! # Material Take-off
//!
//! Rolls the materials bills carried by invoice lines up into per-line
//! quantities and a per-material summary for the workshop.
//!
//! Every bill row is carried through, including the EGP rows for
//! accessories, overhead, labor and profit.
//!
//! ## Example
//!
//! ```rust
//! use cost_core::costing::{CalculatorKind, CostItem};
//! use cost_core::invoice::{Invoice, ItemCategory};
//! use cost_core::rates::RateTable;
//! use cost_core::takeoff::summarize;
//!
//! let rates = RateTable::default();
//! let mut invoice = Invoice::new("INV-7");
//! let id = invoice.add_template_item(ItemCategory::Cabinet);
//! invoice.item_mut(&id).unwrap().dimensions = "220×80×40 cm".to_string();
//! invoice
//!     .price_item(&id, &CostItem::template(CalculatorKind::Cabinet, &rates), &rates)
//!     .unwrap();
//!
//! let summary = summarize(&invoice);
//! assert!(summary.iter().any(|m| m.name == "Door hinges"));
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::costing::MaterialUnit;
use crate::invoice::{Invoice, ItemCategory};

/// One material row of one invoice line, scaled by the line quantity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TakeoffLine {
    /// Zero-based position of the line on the invoice
    pub item_index: usize,
    pub code: String,
    pub category: ItemCategory,
    pub name: String,
    pub unit: MaterialUnit,
    pub qty_per_item: f64,
    pub total_qty: f64,
}

/// Total quantity of one material across the invoice
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaterialSummary {
    pub name: String,
    pub unit: MaterialUnit,
    pub total_qty: f64,
    /// Number of invoice lines using this material
    pub usage_count: usize,
}

/// Expand every line's materials bill.
pub fn takeoff(invoice: &Invoice) -> Vec<TakeoffLine> {
    invoice
        .items
        .iter()
        .enumerate()
        .flat_map(|(index, item)| {
            item.materials
                .iter()
                .flatten()
                .map(move |row| TakeoffLine {
                    item_index: index,
                    code: item.code.clone(),
                    category: item.category,
                    name: row.name.clone(),
                    unit: row.unit,
                    qty_per_item: row.qty,
                    total_qty: row.qty * item.qty,
                })
        })
        .collect()
}

/// Group take-off lines by material name and unit.
///
/// Sorted by total quantity, largest first, then by name.
pub fn summarize(invoice: &Invoice) -> Vec<MaterialSummary> {
    let mut grouped: BTreeMap<(String, MaterialUnit), MaterialSummary> = BTreeMap::new();

    for line in takeoff(invoice) {
        let entry = grouped
            .entry((line.name.clone(), line.unit))
            .or_insert_with(|| MaterialSummary {
                name: line.name.clone(),
                unit: line.unit,
                total_qty: 0.0,
                usage_count: 0,
            });
        entry.total_qty += line.total_qty;
        entry.usage_count += 1;
    }

    let mut summary: Vec<MaterialSummary> = grouped.into_values().collect();
    summary.sort_by(|a, b| {
        b.total_qty
            .total_cmp(&a.total_qty)
            .then_with(|| a.name.cmp(&b.name))
    });
    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::costing::MaterialRow;
    use crate::invoice::InvoiceItem;
    use crate::rates::RateTable;

    fn line_with(qty: f64, rows: Vec<MaterialRow>) -> InvoiceItem {
        InvoiceItem {
            qty,
            code: "CAB-01".to_string(),
            materials: Some(rows),
            ..InvoiceItem::new(ItemCategory::Cabinet)
        }
    }

    #[test]
    fn test_takeoff_scales_by_line_qty() {
        let mut invoice = Invoice::new("INV-1");
        invoice.add_item(line_with(
            3.0,
            vec![
                MaterialRow::new("Hinges", MaterialUnit::Pcs, 4.0),
                MaterialRow::new("Profit", MaterialUnit::Currency, 1200.0),
            ],
        ));
        invoice.add_item(InvoiceItem::new(ItemCategory::Door));

        let lines = takeoff(&invoice);
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].item_index, 0);
        assert_eq!(lines[0].code, "CAB-01");
        assert_eq!(lines[0].qty_per_item, 4.0);
        assert_eq!(lines[0].total_qty, 12.0);
        assert_eq!(lines[1].unit, MaterialUnit::Currency);
        assert_eq!(lines[1].total_qty, 3600.0);
    }

    #[test]
    fn test_takeoff_keeps_every_bill_row() {
        let rates = RateTable::default();
        let mut invoice = Invoice::new("INV-1");
        let id = invoice.add_template_item(ItemCategory::Cabinet);
        invoice.item_mut(&id).unwrap().dimensions = "220×80×40 cm".to_string();
        let template = ItemCategory::Cabinet.cost_template(&rates).unwrap();
        invoice.price_item(&id, &template, &rates).unwrap();

        let bill = invoice.item(&id).unwrap().materials.clone().unwrap();
        let lines = takeoff(&invoice);
        assert_eq!(lines.len(), bill.len());
        assert!(lines.iter().any(|l| l.name == "Profit"));

        let summary = summarize(&invoice);
        let profit = summary.iter().find(|m| m.name == "Profit").unwrap();
        assert_eq!(profit.unit, MaterialUnit::Currency);
        assert_eq!(profit.usage_count, 1);
    }

    #[test]
    fn test_summary_groups_and_sorts() {
        let mut invoice = Invoice::new("INV-1");
        invoice.add_item(line_with(
            2.0,
            vec![
                MaterialRow::new("MDF16", MaterialUnit::Sheet, 2.5),
                MaterialRow::new("Hinges", MaterialUnit::Pcs, 4.0),
            ],
        ));
        invoice.add_item(line_with(
            1.0,
            vec![
                MaterialRow::new("MDF16", MaterialUnit::Sheet, 1.5),
                MaterialRow::new("Drawer runners", MaterialUnit::Pair, 8.0),
            ],
        ));

        let summary = summarize(&invoice);
        assert_eq!(summary.len(), 3);

        // Equal totals fall back to name order
        assert_eq!(summary[0].name, "Drawer runners");
        assert_eq!(summary[1].name, "Hinges");
        assert_eq!(summary[1].total_qty, 8.0);
        assert_eq!(summary[2].name, "MDF16");
        assert_eq!(summary[2].total_qty, 6.5);
        assert_eq!(summary[2].usage_count, 2);
    }

    #[test]
    fn test_same_name_different_unit_kept_apart() {
        let mut invoice = Invoice::new("INV-1");
        invoice.add_item(line_with(
            1.0,
            vec![
                MaterialRow::new("HPL", MaterialUnit::Sheet, 2.0),
                MaterialRow::new("HPL", MaterialUnit::SquareMeters, 5.0),
            ],
        ));
        assert_eq!(summarize(&invoice).len(), 2);
    }

    #[test]
    fn test_empty_invoice() {
        let invoice = Invoice::new("INV-1");
        assert!(takeoff(&invoice).is_empty());
        assert!(summarize(&invoice).is_empty());
    }
}
