//! # Door Calculator
//!
//! Prices a solid-frame door: a natural wood frame skinned both sides with
//! 10 mm MDF, faced with veneer (plus finish) or HPL/LPL laminate, with an
//! optional glass insert and steel chassis.
//!
//! ## Assumptions
//!
//! - Frame volume scales linearly from a measured 220×90 cm reference frame
//!   of 0.045 m³
//! - Both faces are skinned and faced; laminate needs no finish
//! - Partial sheets are priced pro rata
//!
//! ## Example
//!
//! ```rust
//! use cost_core::costing::door::{calculate, DoorInput};
//! use cost_core::materials::Facing;
//! use cost_core::rates::RateTable;
//!
//! let rates = RateTable::default();
//! let input = DoorInput {
//!     facing: Facing::Hpl,
//!     ..DoorInput::with_rates(&rates)
//! };
//!
//! let result = calculate(&input, &rates);
//! assert_eq!(result.breakdown.amount("Finish"), Some(0.0));
//! assert!(result.description.contains("Finish: none (HPL / LPL)"));
//! ```

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{CostBreakdown, CostResult};
use crate::geometry::{area_m2, scale_reference, sheets_needed};
use crate::materials::{Facing, FinishType, GlassType, WoodSpecies};
use crate::rates::RateTable;

/// Frame volume of the 220×90 cm reference door (m³)
const REFERENCE_FRAME_M3: f64 = 0.045;
const REFERENCE_HEIGHT_CM: f64 = 220.0;
const REFERENCE_WIDTH_CM: f64 = 90.0;

/// Input parameters for a door.
///
/// ## JSON Example
///
/// ```json
/// {
///   "height_cm": 220.0,
///   "width_cm": 90.0,
///   "thickness_cm": 4.0,
///   "wood": "Mouski",
///   "facing": "Oak",
///   "finish": "PU matte",
///   "glass": "Glass6",
///   "glass_area_m2": 0.5,
///   "accessories": 1500.0,
///   "overhead": 0.0,
///   "labor_hours": 6.0,
///   "has_steel_chassis": false,
///   "profit_margin_percent": 30.0
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DoorInput {
    #[serde(deserialize_with = "super::zero_if_null")]
    pub height_cm: f64,
    #[serde(deserialize_with = "super::zero_if_null")]
    pub width_cm: f64,
    #[serde(deserialize_with = "super::zero_if_null")]
    pub thickness_cm: f64,
    /// Frame species
    pub wood: WoodSpecies,
    /// Veneer species or HPL/LPL, applied to both faces
    pub facing: Facing,
    /// Ignored for laminate facings
    pub finish: FinishType,
    pub glass: GlassType,
    #[serde(deserialize_with = "super::zero_if_null")]
    pub glass_area_m2: f64,
    /// Handles, locks, hinges (flat amount)
    #[serde(deserialize_with = "super::zero_if_null")]
    pub accessories: f64,
    #[serde(deserialize_with = "super::zero_if_null")]
    pub overhead: f64,
    #[serde(deserialize_with = "super::zero_if_null")]
    pub labor_hours: f64,
    pub has_steel_chassis: bool,
    #[serde(deserialize_with = "super::zero_if_null")]
    pub profit_margin_percent: f64,
}

impl DoorInput {
    /// Standard 220×90×4 oak-veneered door
    pub fn with_rates(rates: &RateTable) -> Self {
        Self {
            height_cm: 220.0,
            width_cm: 90.0,
            thickness_cm: 4.0,
            wood: WoodSpecies::Mouski,
            facing: Facing::Oak,
            finish: FinishType::PuMatte,
            glass: GlassType::None,
            glass_area_m2: 0.0,
            accessories: rates.default_accessories,
            overhead: 0.0,
            labor_hours: 0.0,
            has_steel_chassis: false,
            profit_margin_percent: rates.default_profit_margin_percent,
        }
    }

    /// Area of one face (m²)
    pub fn leaf_area_m2(&self) -> f64 {
        area_m2(self.height_cm, self.width_cm)
    }

    /// Area of both faces (m²)
    pub fn both_faces_m2(&self) -> f64 {
        2.0 * self.leaf_area_m2()
    }

    /// Natural wood frame volume (m³)
    pub fn frame_volume_m3(&self) -> f64 {
        scale_reference(
            REFERENCE_FRAME_M3,
            &[
                (self.height_cm, REFERENCE_HEIGHT_CM),
                (self.width_cm, REFERENCE_WIDTH_CM),
            ],
        )
    }
}

impl Default for DoorInput {
    fn default() -> Self {
        Self::with_rates(&RateTable::default())
    }
}

/// Price a door.
pub fn calculate(input: &DoorInput, rates: &RateTable) -> CostResult {
    let both_faces = input.both_faces_m2();

    let frame = input.frame_volume_m3() * input.wood.rate_per_m3(rates);
    let mdf_skins = sheets_needed(both_faces) * rates.mdf10_per_sheet;
    let facing = input.facing.cost(both_faces, rates);
    let finish = if input.facing.is_laminate() {
        0.0
    } else {
        both_faces * input.finish.rate_per_m2(rates)
    };
    let glass = input.glass_area_m2 * input.glass.rate_per_m2(rates);
    let steel = if input.has_steel_chassis {
        rates.steel_chassis_per_piece
    } else {
        0.0
    };
    let labor = input.labor_hours * rates.labor_per_hour;

    let mut breakdown = CostBreakdown::new(input.profit_margin_percent);
    breakdown
        .push("Frame wood", frame)
        .push("MDF 10mm skins", mdf_skins)
        .push("Facing", facing)
        .push("Finish", finish)
        .push("Glass", glass)
        .push("Steel chassis", steel)
        .push("Accessories", input.accessories)
        .push("Overhead", input.overhead)
        .push("Labor", labor);

    let dimensions = format!(
        "{}×{}×{} cm",
        input.height_cm, input.width_cm, input.thickness_cm
    );
    let result = CostResult::new(breakdown, &describe(input), dimensions);

    debug!(
        category = "door",
        material_cost = result.material_cost(),
        price = result.price,
        "Costed item"
    );
    result
}

fn describe(input: &DoorInput) -> Vec<String> {
    let mut parts = vec![format!("Wood: {}", input.wood)];

    let facing_label = match input.facing.veneer() {
        Some(species) => species.display_name().to_string(),
        None => format!("{} facing", input.facing.code()),
    };
    parts.push(format!("Veneer: {}", facing_label));

    if input.facing.is_laminate() {
        parts.push("Finish: none (HPL / LPL)".to_string());
    } else {
        parts.push(format!("Finish: {}", input.finish));
    }

    match input.glass.label() {
        Some(label) => parts.push(format!("Glass: {}, {:.2} m²", label, input.glass_area_m2)),
        None => parts.push("Glass: none".to_string()),
    }

    if input.has_steel_chassis {
        parts.push("Steel chassis: yes".to_string());
    }
    parts
}
