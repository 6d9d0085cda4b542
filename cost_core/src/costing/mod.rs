//! # Costing Calculators
//!
//! Each furniture category has a calculator following the same pattern:
//!
//! - `*Input` - geometry and material selections (JSON-serializable)
//! - `calculate(&input, &rates) -> CostResult` - pure costing function
//!
//! Calculators never fail. Nonsensical input (negative sizes, zero margin)
//! simply propagates into zero or negative amounts. Every calculator collects
//! its money amounts into a [`CostBreakdown`], whose sum is the material cost;
//! the profit margin is applied on top of that sum.
//!
//! ## Available Calculators
//!
//! - [`door`] - Solid-frame doors with MDF skins, veneer or laminate facing
//! - [`seating`] - Chairs, stools, benches and arm chairs
//! - [`table`] - Tables with wood/steel legs and wood, marble or glass tops
//! - [`sofa`] - Sofas priced per metre of length
//! - [`cabinet`] - Sheet-goods cabinets with a full materials bill
//!
//! ## Example
//!
//! ```rust
//! use cost_core::costing::{CalculatorKind, CostItem};
//! use cost_core::rates::RateTable;
//!
//! let rates = RateTable::default();
//! let item = CostItem::template(CalculatorKind::Door, &rates);
//! let result = item.price(&rates);
//!
//! assert_eq!(result.dimensions, "220×90×4 cm");
//! assert!(result.price > result.breakdown.material_cost());
//! ```

pub mod cabinet;
pub mod door;
pub mod seating;
pub mod sofa;
pub mod table;

use serde::{Deserialize, Deserializer, Serialize};

use crate::errors::{CalcError, CalcResult};
use crate::materials::{FinishType, WoodSpecies};
use crate::rates::{RateTable, CURRENCY};

pub use cabinet::CabinetInput;
pub use door::DoorInput;
pub use seating::SeatingInput;
pub use sofa::SofaInput;
pub use table::TableInput;

/// Separator between description fragments
pub const DESCRIPTION_SEPARATOR: &str = " – ";

// ============================================================================
// Cost Breakdown
// ============================================================================

/// One named money amount contributing to the material cost
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostComponent {
    pub name: String,
    pub amount: f64,
}

/// Ordered list of cost components plus the margin applied to their sum.
///
/// ```rust
/// use cost_core::costing::CostBreakdown;
///
/// let mut breakdown = CostBreakdown::new(30.0);
/// breakdown.push("Frame", 1000.0).push("Labor", 500.0);
///
/// assert_eq!(breakdown.material_cost(), 1500.0);
/// assert_eq!(breakdown.profit(), 450.0);
/// assert_eq!(breakdown.selling_price(), 1950.0);
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CostBreakdown {
    pub components: Vec<CostComponent>,
    pub margin_percent: f64,
}

impl CostBreakdown {
    pub fn new(margin_percent: f64) -> Self {
        Self {
            components: Vec::new(),
            margin_percent: finite_or_zero(margin_percent),
        }
    }

    /// Append a component. Zero amounts are kept so every calculator reports
    /// the same component list regardless of selections; NaN and infinite
    /// amounts count as zero.
    pub fn push(&mut self, name: impl Into<String>, amount: f64) -> &mut Self {
        self.components.push(CostComponent {
            name: name.into(),
            amount: finite_or_zero(amount),
        });
        self
    }

    /// Amount of the first component with this name
    pub fn amount(&self, name: &str) -> Option<f64> {
        self.components
            .iter()
            .find(|c| c.name == name)
            .map(|c| c.amount)
    }

    /// Sum of all components
    pub fn material_cost(&self) -> f64 {
        self.components.iter().map(|c| c.amount).sum()
    }

    /// `material_cost × margin / 100`
    pub fn profit(&self) -> f64 {
        self.material_cost() * self.margin_percent / 100.0
    }

    /// `material_cost + profit`
    pub fn selling_price(&self) -> f64 {
        self.material_cost() + self.profit()
    }
}

// ============================================================================
// Results
// ============================================================================

/// Unit a materials bill row is counted in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum MaterialUnit {
    #[serde(rename = "sheet")]
    Sheet,
    #[serde(rename = "pcs")]
    Pcs,
    #[serde(rename = "pair")]
    Pair,
    #[serde(rename = "m²")]
    SquareMeters,
    /// Money rows (accessories, overhead, labor, profit)
    #[serde(rename = "EGP")]
    Currency,
}

impl MaterialUnit {
    pub fn symbol(&self) -> &'static str {
        match self {
            MaterialUnit::Sheet => "sheet",
            MaterialUnit::Pcs => "pcs",
            MaterialUnit::Pair => "pair",
            MaterialUnit::SquareMeters => "m²",
            MaterialUnit::Currency => CURRENCY,
        }
    }
}

impl std::fmt::Display for MaterialUnit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// One line of a materials bill
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaterialRow {
    pub name: String,
    pub unit: MaterialUnit,
    pub qty: f64,
}

impl MaterialRow {
    pub fn new(name: impl Into<String>, unit: MaterialUnit, qty: f64) -> Self {
        Self {
            name: name.into(),
            unit,
            qty: finite_or_zero(qty),
        }
    }
}

/// Output of every calculator.
///
/// ## JSON Example
///
/// ```json
/// {
///   "price": 5320.4,
///   "description": "Wood: Mouski – Veneer: Oak veneer – Finish: PU matte – Glass: none",
///   "dimensions": "220×90×4 cm",
///   "materials": null,
///   "breakdown": { "components": [ { "name": "Frame wood", "amount": 1080.0 } ], "margin_percent": 30.0 }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostResult {
    /// Selling price per unit (material cost plus margin), unrounded
    pub price: f64,
    /// Human-readable line description, fragments joined by " – "
    pub description: String,
    /// Dimensions string, empty for categories without one
    pub dimensions: String,
    /// Materials bill (cabinets only)
    pub materials: Option<Vec<MaterialRow>>,
    /// The components the price was built from
    pub breakdown: CostBreakdown,
}

impl CostResult {
    pub(crate) fn new(breakdown: CostBreakdown, parts: &[String], dimensions: String) -> Self {
        Self {
            price: breakdown.selling_price(),
            description: parts.join(DESCRIPTION_SEPARATOR),
            dimensions,
            materials: None,
            breakdown,
        }
    }

    pub fn material_cost(&self) -> f64 {
        self.breakdown.material_cost()
    }

    pub fn profit(&self) -> f64 {
        self.breakdown.profit()
    }
}

/// NaN and infinities count as zero.
pub fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}

/// Field deserializer for calculator inputs: `null` reads as zero.
pub(crate) fn zero_if_null<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Round to `dp` decimal places
pub fn round_to(value: f64, dp: i32) -> f64 {
    let factor = 10f64.powi(dp);
    (value * factor).round() / factor
}

// ============================================================================
// Dispatch
// ============================================================================

/// Which calculator an item is priced with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CalculatorKind {
    Door,
    Seating,
    Table,
    Sofa,
    Cabinet,
}

impl CalculatorKind {
    pub const ALL: [CalculatorKind; 5] = [
        CalculatorKind::Door,
        CalculatorKind::Seating,
        CalculatorKind::Table,
        CalculatorKind::Sofa,
        CalculatorKind::Cabinet,
    ];

    /// Parse a calculator name ("door", "Cabinet")
    pub fn from_str_flexible(s: &str) -> CalcResult<Self> {
        match s.trim().to_lowercase().as_str() {
            "door" | "doors" => Ok(CalculatorKind::Door),
            "seating" | "seat" | "chair" => Ok(CalculatorKind::Seating),
            "table" | "tables" => Ok(CalculatorKind::Table),
            "sofa" | "sofas" => Ok(CalculatorKind::Sofa),
            "cabinet" | "cabinets" => Ok(CalculatorKind::Cabinet),
            _ => Err(CalcError::invalid_input(
                "calculator",
                s,
                "Expected one of: door, seating, table, sofa, cabinet",
            )),
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            CalculatorKind::Door => "Door",
            CalculatorKind::Seating => "Seating",
            CalculatorKind::Table => "Table",
            CalculatorKind::Sofa => "Sofa",
            CalculatorKind::Cabinet => "Cabinet",
        }
    }
}

impl std::fmt::Display for CalculatorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Enum wrapper over every calculator input.
///
/// Serializes with a "type" discriminator:
///
/// ```json
/// { "type": "Door", "height_cm": 220.0, "width_cm": 90.0, "facing": "Oak" }
/// ```
///
/// Missing fields take the category defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum CostItem {
    Door(DoorInput),
    Seating(SeatingInput),
    Table(TableInput),
    Sofa(SofaInput),
    Cabinet(CabinetInput),
}

impl CostItem {
    /// Default item of a category, with accessories and margin seeded from
    /// the rate table
    pub fn template(kind: CalculatorKind, rates: &RateTable) -> Self {
        match kind {
            CalculatorKind::Door => CostItem::Door(DoorInput::with_rates(rates)),
            CalculatorKind::Seating => CostItem::Seating(SeatingInput::with_rates(rates)),
            CalculatorKind::Table => CostItem::Table(TableInput::with_rates(rates)),
            CalculatorKind::Sofa => CostItem::Sofa(SofaInput::with_rates(rates)),
            CalculatorKind::Cabinet => CostItem::Cabinet(CabinetInput::with_rates(rates)),
        }
    }

    pub fn kind(&self) -> CalculatorKind {
        match self {
            CostItem::Door(_) => CalculatorKind::Door,
            CostItem::Seating(_) => CalculatorKind::Seating,
            CostItem::Table(_) => CalculatorKind::Table,
            CostItem::Sofa(_) => CalculatorKind::Sofa,
            CostItem::Cabinet(_) => CalculatorKind::Cabinet,
        }
    }

    /// Run the matching calculator
    pub fn price(&self, rates: &RateTable) -> CostResult {
        match self {
            CostItem::Door(input) => door::calculate(input, rates),
            CostItem::Seating(input) => seating::calculate(input, rates),
            CostItem::Table(input) => table::calculate(input, rates),
            CostItem::Sofa(input) => sofa::calculate(input, rates),
            CostItem::Cabinet(input) => cabinet::calculate(input, rates),
        }
    }

    /// Replace the solid wood species. Cabinets are all sheet goods.
    pub fn set_wood(&mut self, wood: WoodSpecies) -> CalcResult<()> {
        match self {
            CostItem::Door(input) => input.wood = wood,
            CostItem::Seating(input) => input.wood = wood,
            CostItem::Table(input) => input.wood = wood,
            CostItem::Sofa(input) => input.wood = wood,
            CostItem::Cabinet(_) => {
                return Err(CalcError::invalid_input(
                    "wood",
                    wood.display_name(),
                    "Cabinets have no solid wood parts",
                ))
            }
        }
        Ok(())
    }

    /// Replace the finish type
    pub fn set_finish(&mut self, finish: FinishType) {
        match self {
            CostItem::Door(input) => input.finish = finish,
            CostItem::Seating(input) => input.finish = finish,
            CostItem::Table(input) => input.finish = finish,
            CostItem::Sofa(input) => input.finish = finish,
            CostItem::Cabinet(input) => input.finish = finish,
        }
    }

    /// Override the profit margin
    pub fn set_margin(&mut self, margin_percent: f64) {
        match self {
            CostItem::Door(input) => input.profit_margin_percent = margin_percent,
            CostItem::Seating(input) => input.profit_margin_percent = margin_percent,
            CostItem::Table(input) => input.profit_margin_percent = margin_percent,
            CostItem::Sofa(input) => input.profit_margin_percent = margin_percent,
            CostItem::Cabinet(input) => input.profit_margin_percent = margin_percent,
        }
    }
}
