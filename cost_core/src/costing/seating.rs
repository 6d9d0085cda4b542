//! # Seating Calculator
//!
//! Prices chairs, bar stools, benches and arm chairs. Solid wood volume and
//! base labor come from a reference table by seat type and detail level;
//! plywood, veneer, finish, upholstery, fabric and a steel chassis are added
//! on top.
//!
//! ## Example
//!
//! ```rust
//! use cost_core::costing::seating::{calculate, SeatingInput};
//! use cost_core::materials::{DetailLevel, SeatItemType};
//! use cost_core::rates::RateTable;
//!
//! let rates = RateTable::default();
//! let input = SeatingInput {
//!     item_type: SeatItemType::ArmChair,
//!     detail: DetailLevel::Heavy,
//!     ..SeatingInput::with_rates(&rates)
//! };
//!
//! let result = calculate(&input, &rates);
//! assert_eq!(input.effective_labor_hours(), 5.5);
//! assert_eq!(result.dimensions, "");
//! ```

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{CostBreakdown, CostResult};
use crate::materials::{
    fabric_fragment, veneer_fragment, DetailLevel, FabricGrade, FinishType, PlyThickness,
    SeatItemType, Upholstery, VeneerSpecies, WoodSpecies,
};
use crate::rates::RateTable;

/// Input parameters for a seat.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SeatingInput {
    pub item_type: SeatItemType,
    pub detail: DetailLevel,
    /// Overrides the reference solid wood volume (m³)
    pub wood_volume_m3: Option<f64>,
    pub wood: WoodSpecies,
    pub has_ply: bool,
    pub ply_thickness: PlyThickness,
    /// Fractional sheets allowed
    #[serde(deserialize_with = "super::zero_if_null")]
    pub ply_sheets: f64,
    /// Veneered and finished surface (m²)
    #[serde(deserialize_with = "super::zero_if_null")]
    pub surface_area_m2: f64,
    pub veneer: Option<VeneerSpecies>,
    pub finish: FinishType,
    pub upholstery: Upholstery,
    pub fabric_grade: FabricGrade,
    #[serde(deserialize_with = "super::zero_if_null")]
    pub fabric_m: f64,
    pub has_steel_chassis: bool,
    #[serde(deserialize_with = "super::zero_if_null")]
    pub overhead: f64,
    /// Overrides the reference labor hours
    pub labor_hours: Option<f64>,
    #[serde(deserialize_with = "super::zero_if_null")]
    pub profit_margin_percent: f64,
}

impl SeatingInput {
    /// Light dining chair with an upholstered seat
    pub fn with_rates(rates: &RateTable) -> Self {
        Self {
            item_type: SeatItemType::DiningChair,
            detail: DetailLevel::Light,
            wood_volume_m3: None,
            wood: WoodSpecies::Mouski,
            has_ply: false,
            ply_thickness: PlyThickness::Mm2_7,
            ply_sheets: 2.0,
            surface_area_m2: 1.2,
            veneer: None,
            finish: FinishType::PuMatte,
            upholstery: Upholstery::SeatOnly,
            fabric_grade: FabricGrade::Low,
            fabric_m: 1.5,
            has_steel_chassis: false,
            overhead: 350.0,
            labor_hours: None,
            profit_margin_percent: rates.default_profit_margin_percent,
        }
    }

    /// Solid wood volume, reference value unless overridden
    pub fn effective_wood_volume_m3(&self) -> f64 {
        self.wood_volume_m3
            .unwrap_or_else(|| self.item_type.reference(self.detail).0)
    }

    /// Labor hours, reference value unless overridden
    pub fn effective_labor_hours(&self) -> f64 {
        self.labor_hours
            .unwrap_or_else(|| self.item_type.reference(self.detail).1)
    }
}

impl Default for SeatingInput {
    fn default() -> Self {
        Self::with_rates(&RateTable::default())
    }
}

/// Price a seat.
pub fn calculate(input: &SeatingInput, rates: &RateTable) -> CostResult {
    let upholstered = input.upholstery != Upholstery::None;

    let wood = input.effective_wood_volume_m3() * input.wood.rate_per_m3(rates);
    let ply = if input.has_ply {
        input.ply_sheets * input.ply_thickness.rate_per_sheet(rates)
    } else {
        0.0
    };
    let veneer = input
        .veneer
        .map(|species| input.surface_area_m2 * species.rate_per_m2(rates))
        .unwrap_or(0.0);
    // Seats are always finished, veneered or not
    let finish = input.surface_area_m2 * input.finish.rate_per_m2(rates);
    let upholstery = input.upholstery.charge(rates);
    let fabric = if upholstered {
        input.fabric_m * input.fabric_grade.rate_per_m(rates)
    } else {
        0.0
    };
    let steel = if input.has_steel_chassis {
        rates.steel_chassis_per_piece
    } else {
        0.0
    };
    let labor = input.effective_labor_hours() * rates.labor_per_hour;

    let mut breakdown = CostBreakdown::new(input.profit_margin_percent);
    breakdown
        .push("Solid wood", wood)
        .push("Plywood", ply)
        .push("Veneer", veneer)
        .push("Finish", finish)
        .push("Upholstery", upholstery)
        .push("Fabric", fabric)
        .push("Overhead", input.overhead)
        .push("Labor", labor)
        .push("Steel chassis", steel);

    let parts = vec![
        format!("Wood: {}", input.wood),
        veneer_fragment(input.veneer),
        format!("Finish: {}", input.finish),
        fabric_fragment(upholstered, input.fabric_grade, input.fabric_m, rates),
    ];
    let result = CostResult::new(breakdown, &parts, String::new());

    debug!(
        category = "seating",
        seat = %input.item_type,
        material_cost = result.material_cost(),
        price = result.price,
        "Costed item"
    );
    result
}
