//! # Invoice Data Structures
//!
//! The `Invoice` struct is the document the calculators feed. Invoices
//! serialize to human-readable JSON (see [`file_io`](crate::file_io)).
//!
//! ## Structure
//!
//! ```text
//! Invoice
//! ├── meta: InvoiceMeta (version, number, dates, project, timestamps)
//! ├── company: CompanyInfo
//! ├── client: ClientInfo
//! ├── items: Vec<InvoiceItem> (line order is the printed order)
//! └── vat_rate_percent, discount, notes
//! ```
//!
//! ## Example
//!
//! ```rust
//! use cost_core::costing::{CalculatorKind, CostItem};
//! use cost_core::invoice::{Invoice, ItemCategory};
//! use cost_core::rates::RateTable;
//!
//! let rates = RateTable::default();
//! let mut invoice = Invoice::new("INV-2025-014");
//!
//! let id = invoice.add_template_item(ItemCategory::Door);
//! invoice.item_mut(&id).unwrap().dimensions = "220×90×4 cm".to_string();
//!
//! let door = CostItem::template(CalculatorKind::Door, &rates);
//! invoice.price_item(&id, &door, &rates).unwrap();
//!
//! let totals = invoice.totals();
//! assert!(totals.total > totals.subtotal); // 14% VAT
//! ```

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use crate::costing::{CalculatorKind, CostItem, CostResult, MaterialRow};
use crate::errors::{CalcError, CalcResult};
use crate::materials::{SeatItemType, SofaShape};
use crate::rates::RateTable;

/// Current schema version for invoice files
pub const SCHEMA_VERSION: &str = "0.1.0";

/// Default VAT rate (%)
pub const DEFAULT_VAT_RATE_PERCENT: f64 = 14.0;

/// Root invoice container.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Invoice {
    pub meta: InvoiceMeta,
    pub company: CompanyInfo,
    pub client: ClientInfo,
    pub items: Vec<InvoiceItem>,
    #[serde(default = "default_vat_rate")]
    pub vat_rate_percent: f64,
    /// Flat discount taken off the subtotal before VAT
    #[serde(default)]
    pub discount: f64,
    #[serde(default)]
    pub notes: String,
}

fn default_vat_rate() -> f64 {
    DEFAULT_VAT_RATE_PERCENT
}

impl Invoice {
    /// Create an empty invoice dated today.
    ///
    /// ```rust
    /// use cost_core::invoice::Invoice;
    ///
    /// let invoice = Invoice::new("INV-2025-001");
    /// assert_eq!(invoice.meta.invoice_no, "INV-2025-001");
    /// assert_eq!(invoice.vat_rate_percent, 14.0);
    /// ```
    pub fn new(invoice_no: impl Into<String>) -> Self {
        let now = Utc::now();
        Invoice {
            meta: InvoiceMeta {
                version: SCHEMA_VERSION.to_string(),
                invoice_no: invoice_no.into(),
                date: now.date_naive(),
                due_date: None,
                project_name: String::new(),
                created: now,
                modified: now,
            },
            company: CompanyInfo::default(),
            client: ClientInfo::default(),
            items: Vec::new(),
            vat_rate_percent: DEFAULT_VAT_RATE_PERCENT,
            discount: 0.0,
            notes: DEFAULT_NOTES.to_string(),
        }
    }

    /// Append a line. Returns its id.
    pub fn add_item(&mut self, item: InvoiceItem) -> Uuid {
        let id = item.id;
        self.items.push(item);
        self.touch();
        id
    }

    /// Append an empty line of a category, coded with the category name.
    pub fn add_template_item(&mut self, category: ItemCategory) -> Uuid {
        let mut item = InvoiceItem::new(category);
        item.code = category.display_name().to_string();
        self.add_item(item)
    }

    /// Remove a line by id.
    ///
    /// Returns the removed line if it existed.
    pub fn remove_item(&mut self, id: &Uuid) -> Option<InvoiceItem> {
        let index = self.items.iter().position(|item| &item.id == id)?;
        let item = self.items.remove(index);
        self.touch();
        Some(item)
    }

    pub fn item(&self, id: &Uuid) -> Option<&InvoiceItem> {
        self.items.iter().find(|item| &item.id == id)
    }

    /// Mutable access to a line. Marks the invoice as modified when found.
    pub fn item_mut(&mut self, id: &Uuid) -> Option<&mut InvoiceItem> {
        let index = self.items.iter().position(|item| &item.id == id)?;
        self.meta.modified = Utc::now();
        self.items.get_mut(index)
    }

    /// Price a line with a calculator and apply the result to it.
    ///
    /// The line must have dimensions entered, its category must be costable,
    /// and `cost_item` must be for that category's calculator.
    pub fn price_item(
        &mut self,
        id: &Uuid,
        cost_item: &CostItem,
        rates: &RateTable,
    ) -> CalcResult<CostResult> {
        let item = self.item_mut(id).ok_or_else(|| CalcError::item_not_found(id))?;
        item.validate_dimensions()?;

        let kind = item
            .category
            .calculator()
            .ok_or_else(|| CalcError::not_costable(item.category.display_name()))?;
        if kind != cost_item.kind() {
            return Err(CalcError::invalid_input(
                "cost_item",
                cost_item.kind().display_name(),
                format!("Category '{}' is priced as {}", item.category, kind),
            ));
        }

        let result = cost_item.price(rates);
        item.apply_cost(&result, kind);
        debug!(id = %id, price = item.unit_price, "Applied cost to invoice item");
        Ok(result)
    }

    /// Update the modified timestamp.
    pub fn touch(&mut self) {
        self.meta.modified = Utc::now();
    }

    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    /// Subtotal, discount, VAT and grand total.
    ///
    /// ```rust
    /// use cost_core::invoice::{Invoice, InvoiceItem, ItemCategory};
    ///
    /// let mut invoice = Invoice::new("INV-1");
    /// let mut line = InvoiceItem::new(ItemCategory::Bench);
    /// line.qty = 2.0;
    /// line.unit_price = 500.0;
    /// invoice.add_item(line);
    /// invoice.discount = 100.0;
    ///
    /// let totals = invoice.totals();
    /// assert_eq!(totals.subtotal, 1000.0);
    /// assert_eq!(totals.taxable, 900.0);
    /// assert_eq!(totals.vat, 126.0);
    /// assert_eq!(totals.total, 1026.0);
    /// ```
    pub fn totals(&self) -> InvoiceTotals {
        let subtotal: f64 = self.items.iter().map(InvoiceItem::line_total).sum();
        let taxable = (subtotal - self.discount).max(0.0);
        let vat = taxable * self.vat_rate_percent / 100.0;
        InvoiceTotals {
            subtotal,
            discount: self.discount,
            taxable,
            vat,
            total: taxable + vat,
        }
    }
}

impl Default for Invoice {
    fn default() -> Self {
        Invoice::new("")
    }
}

const DEFAULT_NOTES: &str = "- Production lead time: 25–30 working days from advance payment.\n\
- Delivery & installation inside Cairo & Giza are included.\n\
- Colors and finishes may vary slightly due to natural wood characteristics.";

/// Invoice header stored in the file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvoiceMeta {
    /// Schema version (for migration compatibility)
    pub version: String,
    pub invoice_no: String,
    pub date: NaiveDate,
    #[serde(default)]
    pub due_date: Option<NaiveDate>,
    #[serde(default)]
    pub project_name: String,
    pub created: DateTime<Utc>,
    pub modified: DateTime<Utc>,
}

/// Issuing company.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompanyInfo {
    pub name: String,
    pub logo_url: String,
    pub address: String,
    pub phone: String,
    pub email: String,
}

impl Default for CompanyInfo {
    fn default() -> Self {
        CompanyInfo {
            name: "Meduza Studio Works".to_string(),
            logo_url: String::new(),
            address: "Tolon, El Sayeda Zeinab, Cairo, Egypt".to_string(),
            phone: String::new(),
            email: String::new(),
        }
    }
}

/// Billed client and delivery site.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientInfo {
    pub name: String,
    pub company: String,
    pub address: String,
    pub phone: String,
    pub email: String,
    pub site_address: String,
}

/// Computed invoice totals
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InvoiceTotals {
    /// Σ qty × unit price
    pub subtotal: f64,
    pub discount: f64,
    /// Subtotal less discount, never negative
    pub taxable: f64,
    pub vat: f64,
    pub total: f64,
}

// ============================================================================
// Line Items
// ============================================================================

/// One invoice line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvoiceItem {
    pub id: Uuid,
    #[serde(default)]
    pub category: ItemCategory,
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub dimensions: String,
    pub qty: f64,
    pub unit_price: f64,
    /// Image reference (path or data URL)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    /// Materials bill, carried by cabinet lines
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub materials: Option<Vec<MaterialRow>>,
}

impl InvoiceItem {
    /// Blank line: quantity 1, unpriced
    pub fn new(category: ItemCategory) -> Self {
        InvoiceItem {
            id: Uuid::new_v4(),
            category,
            code: String::new(),
            description: String::new(),
            dimensions: String::new(),
            qty: 1.0,
            unit_price: 0.0,
            image: None,
            materials: None,
        }
    }

    /// `qty × unit_price`
    pub fn line_total(&self) -> f64 {
        self.qty * self.unit_price
    }

    /// Dimensions must be entered before a line can be costed.
    pub fn validate_dimensions(&self) -> CalcResult<()> {
        if self.dimensions.trim().is_empty() {
            return Err(CalcError::missing_field("dimensions"));
        }
        Ok(())
    }

    /// Copy a calculator result onto this line.
    ///
    /// The unit price is rounded to whole currency units and the description
    /// replaced. Door, table and cabinet results also replace the dimensions
    /// when they carry any; a materials bill replaces the line's bill.
    pub fn apply_cost(&mut self, result: &CostResult, kind: CalculatorKind) {
        self.unit_price = result.price.round();
        self.description = result.description.clone();

        let sets_dimensions = matches!(
            kind,
            CalculatorKind::Door | CalculatorKind::Table | CalculatorKind::Cabinet
        );
        if sets_dimensions && !result.dimensions.is_empty() {
            self.dimensions = result.dimensions.clone();
        }
        if kind == CalculatorKind::Cabinet {
            if let Some(materials) = &result.materials {
                self.materials = Some(materials.clone());
            }
        }
    }
}

/// Line item category as shown on the invoice
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ItemCategory {
    Door,
    #[serde(rename = "Dining chair")]
    DiningChair,
    #[serde(rename = "Arm chair")]
    ArmChair,
    #[serde(rename = "Bar stool")]
    BarStool,
    Bench,
    #[serde(rename = "Dining table")]
    DiningTable,
    #[serde(rename = "Coffee table")]
    CoffeeTable,
    #[serde(rename = "Side table")]
    SideTable,
    #[serde(rename = "Console table")]
    ConsoleTable,
    #[serde(rename = "Sofa straight")]
    SofaStraight,
    #[serde(rename = "Sofa curved")]
    SofaCurved,
    Cabinet,
    #[default]
    #[serde(rename = "Custom furniture")]
    CustomFurniture,
}

impl ItemCategory {
    pub const ALL: [ItemCategory; 13] = [
        ItemCategory::Door,
        ItemCategory::DiningChair,
        ItemCategory::ArmChair,
        ItemCategory::BarStool,
        ItemCategory::Bench,
        ItemCategory::DiningTable,
        ItemCategory::CoffeeTable,
        ItemCategory::SideTable,
        ItemCategory::ConsoleTable,
        ItemCategory::SofaStraight,
        ItemCategory::SofaCurved,
        ItemCategory::Cabinet,
        ItemCategory::CustomFurniture,
    ];

    /// Calculator used to price this category, `None` for custom pieces
    pub fn calculator(&self) -> Option<CalculatorKind> {
        match self {
            ItemCategory::Door => Some(CalculatorKind::Door),
            ItemCategory::DiningChair
            | ItemCategory::ArmChair
            | ItemCategory::BarStool
            | ItemCategory::Bench => Some(CalculatorKind::Seating),
            ItemCategory::DiningTable
            | ItemCategory::CoffeeTable
            | ItemCategory::SideTable
            | ItemCategory::ConsoleTable => Some(CalculatorKind::Table),
            ItemCategory::SofaStraight | ItemCategory::SofaCurved => Some(CalculatorKind::Sofa),
            ItemCategory::Cabinet => Some(CalculatorKind::Cabinet),
            ItemCategory::CustomFurniture => None,
        }
    }

    /// Calculator defaults for this category, with the seat type or sofa
    /// shape the category implies
    pub fn cost_template(&self, rates: &RateTable) -> CalcResult<CostItem> {
        let kind = self
            .calculator()
            .ok_or_else(|| CalcError::not_costable(self.display_name()))?;
        let mut item = CostItem::template(kind, rates);
        match (&mut item, self) {
            (CostItem::Seating(seat), ItemCategory::ArmChair) => seat.item_type = SeatItemType::ArmChair,
            (CostItem::Seating(seat), ItemCategory::BarStool) => seat.item_type = SeatItemType::BarStool,
            (CostItem::Seating(seat), ItemCategory::Bench) => seat.item_type = SeatItemType::Bench,
            (CostItem::Sofa(sofa), ItemCategory::SofaCurved) => sofa.shape = SofaShape::Curved,
            _ => {}
        }
        Ok(item)
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            ItemCategory::Door => "Door",
            ItemCategory::DiningChair => "Dining chair",
            ItemCategory::ArmChair => "Arm chair",
            ItemCategory::BarStool => "Bar stool",
            ItemCategory::Bench => "Bench",
            ItemCategory::DiningTable => "Dining table",
            ItemCategory::CoffeeTable => "Coffee table",
            ItemCategory::SideTable => "Side table",
            ItemCategory::ConsoleTable => "Console table",
            ItemCategory::SofaStraight => "Sofa straight",
            ItemCategory::SofaCurved => "Sofa curved",
            ItemCategory::Cabinet => "Cabinet",
            ItemCategory::CustomFurniture => "Custom furniture",
        }
    }
}

impl std::fmt::Display for ItemCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::costing::door::DoorInput;

    fn priced_line(category: ItemCategory, qty: f64, unit_price: f64) -> InvoiceItem {
        InvoiceItem {
            qty,
            unit_price,
            ..InvoiceItem::new(category)
        }
    }

    #[test]
    fn test_invoice_creation() {
        let invoice = Invoice::new("INV-2025-001");
        assert_eq!(invoice.meta.version, SCHEMA_VERSION);
        assert_eq!(invoice.company.name, "Meduza Studio Works");
        assert_eq!(invoice.item_count(), 0);
        assert!(invoice.notes.contains("lead time"));
    }

    #[test]
    fn test_add_remove_item() {
        let mut invoice = Invoice::new("INV-1");
        let id = invoice.add_template_item(ItemCategory::Cabinet);
        assert_eq!(invoice.item_count(), 1);

        let item = invoice.item(&id).unwrap();
        assert_eq!(item.code, "Cabinet");
        assert_eq!(item.qty, 1.0);
        assert_eq!(item.unit_price, 0.0);

        let removed = invoice.remove_item(&id);
        assert!(removed.is_some());
        assert_eq!(invoice.item_count(), 0);
        assert!(invoice.remove_item(&id).is_none());
    }

    #[test]
    fn test_totals() {
        let mut invoice = Invoice::new("INV-1");
        invoice.add_item(priced_line(ItemCategory::Door, 2.0, 8500.0));
        invoice.add_item(priced_line(ItemCategory::Bench, 1.0, 3000.0));

        let totals = invoice.totals();
        assert_eq!(totals.subtotal, 20000.0);
        assert_eq!(totals.taxable, 20000.0);
        assert_eq!(totals.vat, 2800.0);
        assert_eq!(totals.total, 22800.0);
    }

    #[test]
    fn test_discount_clamps_at_zero() {
        let mut invoice = Invoice::new("INV-1");
        invoice.add_item(priced_line(ItemCategory::Door, 1.0, 1000.0));
        invoice.discount = 5000.0;

        let totals = invoice.totals();
        assert_eq!(totals.taxable, 0.0);
        assert_eq!(totals.vat, 0.0);
        assert_eq!(totals.total, 0.0);
    }

    #[test]
    fn test_validate_dimensions() {
        let mut item = InvoiceItem::new(ItemCategory::Door);
        item.dimensions = "   ".to_string();
        assert_eq!(
            item.validate_dimensions(),
            Err(CalcError::missing_field("dimensions"))
        );
        item.dimensions = "220×90×4 cm".to_string();
        assert!(item.validate_dimensions().is_ok());
    }

    #[test]
    fn test_category_routing() {
        assert_eq!(ItemCategory::Door.calculator(), Some(CalculatorKind::Door));
        assert_eq!(ItemCategory::BarStool.calculator(), Some(CalculatorKind::Seating));
        assert_eq!(ItemCategory::ConsoleTable.calculator(), Some(CalculatorKind::Table));
        assert_eq!(ItemCategory::SofaCurved.calculator(), Some(CalculatorKind::Sofa));
        assert_eq!(ItemCategory::Cabinet.calculator(), Some(CalculatorKind::Cabinet));
        assert_eq!(ItemCategory::CustomFurniture.calculator(), None);

        let costable = ItemCategory::ALL.iter().filter(|c| c.calculator().is_some()).count();
        assert_eq!(costable, 12);
    }

    #[test]
    fn test_cost_template_follows_category() {
        let rates = RateTable::default();
        match ItemCategory::SofaCurved.cost_template(&rates).unwrap() {
            CostItem::Sofa(sofa) => assert_eq!(sofa.shape, SofaShape::Curved),
            other => panic!("unexpected {:?}", other.kind()),
        }
        match ItemCategory::Bench.cost_template(&rates).unwrap() {
            CostItem::Seating(seat) => assert_eq!(seat.item_type, SeatItemType::Bench),
            other => panic!("unexpected {:?}", other.kind()),
        }
        let err = ItemCategory::CustomFurniture.cost_template(&rates).unwrap_err();
        assert_eq!(err.error_code(), "NOT_COSTABLE");
    }

    #[test]
    fn test_apply_cost_rules() {
        let rates = RateTable::default();

        let mut door_line = InvoiceItem::new(ItemCategory::Door);
        door_line.dimensions = "old".to_string();
        let result = CostItem::Door(DoorInput::default()).price(&rates);
        door_line.apply_cost(&result, CalculatorKind::Door);
        assert_eq!(door_line.unit_price, result.price.round());
        assert_eq!(door_line.dimensions, "220×90×4 cm");
        assert_eq!(door_line.description, result.description);

        // Seating results carry no dimensions; the entered ones stay
        let mut chair = InvoiceItem::new(ItemCategory::DiningChair);
        chair.dimensions = "45×50×90 cm".to_string();
        let result = CostItem::template(CalculatorKind::Seating, &rates).price(&rates);
        chair.apply_cost(&result, CalculatorKind::Seating);
        assert_eq!(chair.dimensions, "45×50×90 cm");
        assert!(chair.materials.is_none());

        // Sofa lines keep their entered dimensions too
        let mut sofa = InvoiceItem::new(ItemCategory::SofaStraight);
        sofa.dimensions = "250×90×80 cm".to_string();
        let result = CostItem::template(CalculatorKind::Sofa, &rates).price(&rates);
        sofa.apply_cost(&result, CalculatorKind::Sofa);
        assert_eq!(sofa.dimensions, "250×90×80 cm");

        let mut cabinet = InvoiceItem::new(ItemCategory::Cabinet);
        let result = CostItem::template(CalculatorKind::Cabinet, &rates).price(&rates);
        cabinet.apply_cost(&result, CalculatorKind::Cabinet);
        assert_eq!(cabinet.materials, result.materials);
        assert_eq!(cabinet.dimensions, "220×80×40 cm");
    }

    #[test]
    fn test_price_item() {
        let rates = RateTable::default();
        let mut invoice = Invoice::new("INV-1");
        let id = invoice.add_template_item(ItemCategory::DiningTable);

        let table = ItemCategory::DiningTable.cost_template(&rates).unwrap();

        // No dimensions yet
        let err = invoice.price_item(&id, &table, &rates).unwrap_err();
        assert_eq!(err, CalcError::missing_field("dimensions"));

        invoice.item_mut(&id).unwrap().dimensions = "200×100×75 cm".to_string();
        let result = invoice.price_item(&id, &table, &rates).unwrap();
        let line = invoice.item(&id).unwrap();
        assert_eq!(line.unit_price, result.price.round());
        assert_eq!(line.dimensions, "220×110×74 cm");

        // Wrong calculator for the category
        let door = CostItem::template(CalculatorKind::Door, &rates);
        assert_eq!(
            invoice.price_item(&id, &door, &rates).unwrap_err().error_code(),
            "INVALID_INPUT"
        );

        // Unknown line
        let missing = Uuid::new_v4();
        assert_eq!(
            invoice.price_item(&missing, &table, &rates).unwrap_err().error_code(),
            "ITEM_NOT_FOUND"
        );
    }

    #[test]
    fn test_custom_furniture_not_costable() {
        let rates = RateTable::default();
        let mut invoice = Invoice::new("INV-1");
        let id = invoice.add_template_item(ItemCategory::CustomFurniture);
        invoice.item_mut(&id).unwrap().dimensions = "100×100×100 cm".to_string();

        let door = CostItem::template(CalculatorKind::Door, &rates);
        let err = invoice.price_item(&id, &door, &rates).unwrap_err();
        assert_eq!(err, CalcError::not_costable("Custom furniture"));
    }

    #[test]
    fn test_invoice_serialization() {
        let mut invoice = Invoice::new("INV-2025-042");
        invoice.client.name = "Test Client".to_string();
        invoice.add_template_item(ItemCategory::SofaCurved);

        let json = serde_json::to_string_pretty(&invoice).unwrap();
        assert!(json.contains("\"Sofa curved\""));
        assert!(json.contains("Test Client"));

        let roundtrip: Invoice = serde_json::from_str(&json).unwrap();
        assert_eq!(roundtrip, invoice);
    }

    #[test]
    fn test_item_without_category_defaults_to_custom() {
        let json = format!(
            r#"{{"id":"{}","qty":1.0,"unit_price":100.0}}"#,
            Uuid::new_v4()
        );
        let item: InvoiceItem = serde_json::from_str(&json).unwrap();
        assert_eq!(item.category, ItemCategory::CustomFurniture);
    }
}
