//! # Table Calculator
//!
//! Prices dining, coffee, side and console tables. Wood legs scale from a
//! 220×110×74 cm reference base of 0.35 m³; steel legs carry no wood cost.
//! Wood-core tops are bought per sheet and may be veneered and finished;
//! marble and glass tops are bought per m² and never veneered.
//!
//! ## Example
//!
//! ```rust
//! use cost_core::costing::table::{calculate, TableInput};
//! use cost_core::materials::{TopMaterial, VeneerSpecies};
//! use cost_core::rates::RateTable;
//!
//! let rates = RateTable::default();
//! let input = TableInput {
//!     top: TopMaterial::Glass10,
//!     veneer: Some(VeneerSpecies::Oak),
//!     ..TableInput::with_rates(&rates)
//! };
//!
//! // Veneer only applies to wood-core tops
//! let result = calculate(&input, &rates);
//! assert_eq!(result.breakdown.amount("Veneer"), Some(0.0));
//! ```

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{CostBreakdown, CostResult};
use crate::geometry::{area_m2, scale_reference};
use crate::materials::{FinishType, LegMaterial, TopMaterial, VeneerSpecies, WoodSpecies};
use crate::rates::RateTable;

/// Leg volume of the 220×110×74 cm reference table (m³)
const REFERENCE_LEGS_M3: f64 = 0.35;
const REFERENCE_LENGTH_CM: f64 = 220.0;
const REFERENCE_WIDTH_CM: f64 = 110.0;
const REFERENCE_HEIGHT_CM: f64 = 74.0;

/// Input parameters for a table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TableInput {
    #[serde(deserialize_with = "super::zero_if_null")]
    pub length_cm: f64,
    #[serde(deserialize_with = "super::zero_if_null")]
    pub width_cm: f64,
    #[serde(deserialize_with = "super::zero_if_null")]
    pub height_cm: f64,
    pub legs: LegMaterial,
    /// Leg species (ignored for steel legs)
    pub wood: WoodSpecies,
    pub top: TopMaterial,
    pub veneer: Option<VeneerSpecies>,
    pub finish: FinishType,
    #[serde(deserialize_with = "super::zero_if_null")]
    pub overhead: f64,
    #[serde(deserialize_with = "super::zero_if_null")]
    pub labor_hours: f64,
    #[serde(deserialize_with = "super::zero_if_null")]
    pub profit_margin_percent: f64,
}

impl TableInput {
    /// 220×110×74 marble-top table on wood legs
    pub fn with_rates(rates: &RateTable) -> Self {
        Self {
            length_cm: 220.0,
            width_cm: 110.0,
            height_cm: 74.0,
            legs: LegMaterial::Wood,
            wood: WoodSpecies::Mouski,
            top: TopMaterial::Marble,
            veneer: None,
            finish: FinishType::PuMatte,
            overhead: 0.0,
            labor_hours: 0.0,
            profit_margin_percent: rates.default_profit_margin_percent,
        }
    }

    pub fn top_area_m2(&self) -> f64 {
        area_m2(self.length_cm, self.width_cm)
    }

    /// Solid wood volume of the legs (m³), zero for steel legs
    pub fn legs_volume_m3(&self) -> f64 {
        match self.legs {
            LegMaterial::Steel => 0.0,
            LegMaterial::Wood => scale_reference(
                REFERENCE_LEGS_M3,
                &[
                    (self.length_cm, REFERENCE_LENGTH_CM),
                    (self.width_cm, REFERENCE_WIDTH_CM),
                    (self.height_cm, REFERENCE_HEIGHT_CM),
                ],
            ),
        }
    }

    /// Veneer that actually gets applied: wood-core tops only
    pub fn applied_veneer(&self) -> Option<VeneerSpecies> {
        self.veneer.filter(|_| self.top.is_wood_core())
    }
}

impl Default for TableInput {
    fn default() -> Self {
        Self::with_rates(&RateTable::default())
    }
}

/// Price a table.
pub fn calculate(input: &TableInput, rates: &RateTable) -> CostResult {
    let top_area = input.top_area_m2();

    let legs = input.legs_volume_m3() * input.wood.rate_per_m3(rates);
    let top = input.top.cost(top_area, rates);
    let (veneer, finish) = match input.applied_veneer() {
        Some(species) => (
            top_area * species.rate_per_m2(rates),
            top_area * input.finish.rate_per_m2(rates),
        ),
        None => (0.0, 0.0),
    };
    let labor = input.labor_hours * rates.labor_per_hour;

    let mut breakdown = CostBreakdown::new(input.profit_margin_percent);
    breakdown
        .push("Legs wood", legs)
        .push("Top", top)
        .push("Veneer", veneer)
        .push("Finish", finish)
        .push("Overhead", input.overhead)
        .push("Labor", labor);

    let dimensions = format!(
        "{}×{}×{} cm",
        input.length_cm, input.width_cm, input.height_cm
    );
    let result = CostResult::new(breakdown, &describe(input), dimensions);

    debug!(
        category = "table",
        material_cost = result.material_cost(),
        price = result.price,
        "Costed item"
    );
    result
}

fn describe(input: &TableInput) -> Vec<String> {
    let legs = match input.legs {
        LegMaterial::Wood => input.wood.display_name(),
        LegMaterial::Steel => "Steel",
    };
    let mut parts = vec![format!("Top: {}", input.top), format!("Legs: {}", legs)];
    if let Some(species) = input.applied_veneer() {
        parts.push(format!("Veneer: {}", species));
        parts.push(format!("Finish: {}", input.finish));
    }
    parts
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::SHEET_AREA_M2;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-6
    }

    #[test]
    fn test_reference_marble_table() {
        let rates = RateTable::default();
        let result = calculate(&TableInput::default(), &rates);

        // 0.35 m³ of Mouski, 2.42 m² of marble
        assert!(close(result.breakdown.amount("Legs wood").unwrap(), 8400.0));
        assert!(close(result.breakdown.amount("Top").unwrap(), 2.42 * 4500.0));
        assert!(close(result.material_cost(), 8400.0 + 10890.0));
        assert!(close(result.price, (8400.0 + 10890.0) * 1.3));
        assert_eq!(result.dimensions, "220×110×74 cm");
    }

    #[test]
    fn test_steel_legs_have_no_wood() {
        let rates = RateTable::default();
        let input = TableInput {
            legs: LegMaterial::Steel,
            wood: WoodSpecies::Aro,
            ..TableInput::default()
        };
        let result = calculate(&input, &rates);
        assert_eq!(result.breakdown.amount("Legs wood"), Some(0.0));
        assert!(result.description.contains("Legs: Steel"));
    }

    #[test]
    fn test_marble_and_glass_never_veneered() {
        let rates = RateTable::default();
        for top in [TopMaterial::Marble, TopMaterial::Glass6, TopMaterial::Glass10] {
            let input = TableInput {
                top,
                veneer: Some(VeneerSpecies::Walnut),
                ..TableInput::default()
            };
            let result = calculate(&input, &rates);
            assert_eq!(result.breakdown.amount("Veneer"), Some(0.0));
            assert_eq!(result.breakdown.amount("Finish"), Some(0.0));
            assert!(!result.description.contains("Veneer"));
        }
    }

    #[test]
    fn test_veneered_wood_top() {
        let rates = RateTable::default();
        let input = TableInput {
            top: TopMaterial::Mdf21,
            veneer: Some(VeneerSpecies::Oak),
            finish: FinishType::Nc,
            ..TableInput::default()
        };
        let result = calculate(&input, &rates);
        let area = 2.42;
        assert!(close(result.breakdown.amount("Top").unwrap(), area / SHEET_AREA_M2 * 1350.0));
        assert!(close(result.breakdown.amount("Veneer").unwrap(), area * 210.0));
        assert!(close(result.breakdown.amount("Finish").unwrap(), area * 280.0));
        assert_eq!(
            result.description,
            "Top: MDF 21mm – Legs: Mouski – Veneer: Oak veneer – Finish: NC"
        );
    }

    #[test]
    fn test_wood_top_without_veneer() {
        let rates = RateTable::default();
        let input = TableInput {
            top: TopMaterial::Blockboard18,
            ..TableInput::default()
        };
        let result = calculate(&input, &rates);
        assert_eq!(result.breakdown.amount("Finish"), Some(0.0));
        assert_eq!(result.description, "Top: Blockboard 18mm – Legs: Mouski");
    }

    #[test]
    fn test_legs_scale_with_size() {
        let half = TableInput {
            height_cm: 37.0,
            ..TableInput::default()
        };
        assert!(close(half.legs_volume_m3(), 0.175));
    }
}
