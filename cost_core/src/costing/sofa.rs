//! # Sofa Calculator
//!
//! Sofas are priced per metre of length: frame wood and upholstery scale with
//! length, veneer and finish with the veneered area entered for the piece,
//! fabric with the metres ordered.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{CostBreakdown, CostResult};
use crate::materials::{
    fabric_fragment, veneer_fragment, FabricGrade, FinishType, SofaShape, SofaUpholstery,
    VeneerSpecies, WoodSpecies,
};
use crate::rates::RateTable;

/// Input parameters for a sofa.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SofaInput {
    pub shape: SofaShape,
    #[serde(deserialize_with = "super::zero_if_null")]
    pub length_m: f64,
    pub wood: WoodSpecies,
    pub veneer: Option<VeneerSpecies>,
    #[serde(deserialize_with = "super::zero_if_null")]
    pub veneer_area_m2: f64,
    pub finish: FinishType,
    pub upholstery: SofaUpholstery,
    pub fabric_grade: FabricGrade,
    #[serde(deserialize_with = "super::zero_if_null")]
    pub fabric_m: f64,
    #[serde(deserialize_with = "super::zero_if_null")]
    pub overhead: f64,
    #[serde(deserialize_with = "super::zero_if_null")]
    pub labor_hours: f64,
    #[serde(deserialize_with = "super::zero_if_null")]
    pub profit_margin_percent: f64,
}

impl SofaInput {
    /// 2.5 m straight sofa, low-grade upholstery
    pub fn with_rates(rates: &RateTable) -> Self {
        Self {
            shape: SofaShape::Straight,
            length_m: 2.5,
            wood: WoodSpecies::Mouski,
            veneer: None,
            veneer_area_m2: 4.0,
            finish: FinishType::PuMatte,
            upholstery: SofaUpholstery::Low,
            fabric_grade: FabricGrade::Low,
            fabric_m: 8.0,
            overhead: 0.0,
            labor_hours: 0.0,
            profit_margin_percent: rates.default_profit_margin_percent,
        }
    }

    /// Frame wood volume (m³)
    pub fn wood_volume_m3(&self) -> f64 {
        self.length_m * self.shape.volume_per_m()
    }
}

impl Default for SofaInput {
    fn default() -> Self {
        Self::with_rates(&RateTable::default())
    }
}

/// Price a sofa.
pub fn calculate(input: &SofaInput, rates: &RateTable) -> CostResult {
    let upholstered = input.upholstery != SofaUpholstery::None;

    let wood = input.wood_volume_m3() * input.wood.rate_per_m3(rates);
    let (veneer, finish) = match input.veneer {
        Some(species) => (
            input.veneer_area_m2 * species.rate_per_m2(rates),
            input.veneer_area_m2 * input.finish.rate_per_m2(rates),
        ),
        None => (0.0, 0.0),
    };
    let upholstery = input.length_m * input.upholstery.rate_per_m(rates);
    let fabric = if upholstered {
        input.fabric_m * input.fabric_grade.rate_per_m(rates)
    } else {
        0.0
    };
    let labor = input.labor_hours * rates.labor_per_hour;

    let mut breakdown = CostBreakdown::new(input.profit_margin_percent);
    breakdown
        .push("Frame wood", wood)
        .push("Veneer", veneer)
        .push("Finish", finish)
        .push("Upholstery", upholstery)
        .push("Fabric", fabric)
        .push("Overhead", input.overhead)
        .push("Labor", labor);

    let finish_label = match input.veneer {
        Some(_) => input.finish.display_name(),
        None => "none",
    };
    let parts = vec![
        format!("Wood: {}", input.wood),
        veneer_fragment(input.veneer),
        format!("Finish: {}", finish_label),
        fabric_fragment(upholstered, input.fabric_grade, input.fabric_m, rates),
    ];
    let result = CostResult::new(breakdown, &parts, format!("{} m", input.length_m));

    debug!(
        category = "sofa",
        material_cost = result.material_cost(),
        price = result.price,
        "Costed item"
    );
    result
}
