//! # Cabinet Calculator
//!
//! Prices a sheet-goods cabinet (wardrobe, sideboard, kitchen unit) and
//! produces a materials bill for the workshop.
//!
//! ## Geometry
//!
//! With width `w`, height `h` and depth `d` in metres:
//!
//! - Body: two sides `2hd`, top and bottom `2wd`, plus an internal divider
//!   estimated at `0.3wh`
//! - Shelves: `n × wd`
//! - Back: `wh` in 10 mm MDF
//! - Face: `wh` in the face material
//! - Facing: the face plus 40% of the body, `wh + 0.4 × body`
//! - Drawers: 12 mm ply box `2(0.4×0.18) + 2(0.3×0.18)` m² and a 10 mm MDF
//!   bottom `0.4×0.3` m² each, plus one pair of runners
//!
//! ## Hinges
//!
//! | Height (cm)   | Hinges per door |
//! |---------------|-----------------|
//! | ≤ 60          | 2               |
//! | 60 < h ≤ 120  | 3               |
//! | 120 < h ≤ 200 | 4               |
//! | 200 < h ≤ 300 | 5               |
//! | > 300         | 2               |
//!
//! ## Example
//!
//! ```rust
//! use cost_core::costing::cabinet::{calculate, hinges_per_door, CabinetInput};
//! use cost_core::rates::RateTable;
//!
//! let rates = RateTable::default();
//! let result = calculate(&CabinetInput::with_rates(&rates), &rates);
//!
//! assert_eq!(hinges_per_door(220.0), 5);
//! assert!(result.description.ends_with("Hinges: 10 pcs"));
//! assert!(result.materials.is_some());
//! ```

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{round_to, CostBreakdown, CostResult, MaterialRow, MaterialUnit};
use crate::geometry::{cm_to_m, sheets_needed};
use crate::materials::{BoardMaterial, Facing, FinishType};
use crate::rates::RateTable;

/// Share of the body area that is visible and gets faced
const VISIBLE_BODY_SHARE: f64 = 0.4;

/// Internal divider estimate as a share of the front area
const DIVIDER_SHARE: f64 = 0.3;

/// Ply area of one drawer box: two 40×18 sides and two 30×18 ends (m²)
const DRAWER_BOX_M2: f64 = 2.0 * (0.4 * 0.18) + 2.0 * (0.3 * 0.18);

/// MDF area of one 40×30 drawer bottom (m²)
const DRAWER_BOTTOM_M2: f64 = 0.4 * 0.3;

/// Input parameters for a cabinet.
///
/// ## JSON Example
///
/// ```json
/// {
///   "height_cm": 220.0,
///   "width_cm": 80.0,
///   "depth_cm": 40.0,
///   "body": "MDF16",
///   "face": "MDF16",
///   "doors": 2,
///   "shelves": 4,
///   "drawers": 2,
///   "facing": "Walnut",
///   "finish": "PU matte",
///   "accessories": 1500.0,
///   "overhead": 0.0,
///   "labor_hours": 12.0,
///   "profit_margin_percent": 30.0
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CabinetInput {
    #[serde(deserialize_with = "super::zero_if_null")]
    pub height_cm: f64,
    #[serde(deserialize_with = "super::zero_if_null")]
    pub width_cm: f64,
    #[serde(deserialize_with = "super::zero_if_null")]
    pub depth_cm: f64,
    /// Carcass and shelf core
    pub body: BoardMaterial,
    /// Front panel
    pub face: BoardMaterial,
    #[serde(deserialize_with = "super::zero_if_null")]
    pub doors: u32,
    #[serde(deserialize_with = "super::zero_if_null")]
    pub shelves: u32,
    #[serde(deserialize_with = "super::zero_if_null")]
    pub drawers: u32,
    /// Veneer, laminate, or `None` for a bare board
    pub facing: Option<Facing>,
    /// Applied over veneer only
    pub finish: FinishType,
    #[serde(deserialize_with = "super::zero_if_null")]
    pub accessories: f64,
    #[serde(deserialize_with = "super::zero_if_null")]
    pub overhead: f64,
    #[serde(deserialize_with = "super::zero_if_null")]
    pub labor_hours: f64,
    #[serde(deserialize_with = "super::zero_if_null")]
    pub profit_margin_percent: f64,
}

impl CabinetInput {
    /// 220 cm tall, 80 cm wide, 40 cm deep MDF wardrobe with two doors
    pub fn with_rates(rates: &RateTable) -> Self {
        Self {
            height_cm: 220.0,
            width_cm: 80.0,
            depth_cm: 40.0,
            body: BoardMaterial::Mdf16,
            face: BoardMaterial::Mdf16,
            doors: 2,
            shelves: 4,
            drawers: 0,
            facing: None,
            finish: FinishType::PuMatte,
            accessories: rates.default_accessories,
            overhead: 0.0,
            labor_hours: 0.0,
            profit_margin_percent: rates.default_profit_margin_percent,
        }
    }

    /// Sides, top/bottom and divider (m²), excluding back and shelves
    pub fn body_area_m2(&self) -> f64 {
        let (w, h, d) = self.dims_m();
        2.0 * h * d + 2.0 * w * d + DIVIDER_SHARE * w * h
    }

    pub fn shelves_area_m2(&self) -> f64 {
        let (w, _, d) = self.dims_m();
        self.shelves as f64 * w * d
    }

    /// Front area `w × h` (m²), shared by back, face and doors
    pub fn front_area_m2(&self) -> f64 {
        let (w, h, _) = self.dims_m();
        w * h
    }

    /// Surface covered by the facing (m²)
    pub fn facing_area_m2(&self) -> f64 {
        self.front_area_m2() + VISIBLE_BODY_SHARE * self.body_area_m2()
    }

    pub fn total_hinges(&self) -> u32 {
        self.doors * hinges_per_door(self.height_cm)
    }

    fn dims_m(&self) -> (f64, f64, f64) {
        (
            cm_to_m(self.width_cm),
            cm_to_m(self.height_cm),
            cm_to_m(self.depth_cm),
        )
    }
}

impl Default for CabinetInput {
    fn default() -> Self {
        Self::with_rates(&RateTable::default())
    }
}

/// Hinges needed per door for a cabinet of this height.
///
/// Upper bounds are inclusive. Heights above 300 cm fall back to 2.
pub fn hinges_per_door(height_cm: f64) -> u32 {
    if height_cm > 60.0 && height_cm <= 120.0 {
        3
    } else if height_cm > 120.0 && height_cm <= 200.0 {
        4
    } else if height_cm > 200.0 && height_cm <= 300.0 {
        5
    } else {
        2
    }
}

/// Price a cabinet and build its materials bill.
pub fn calculate(input: &CabinetInput, rates: &RateTable) -> CostResult {
    let drawers = input.drawers as f64;

    let core_sheets = sheets_needed(input.body_area_m2() + input.shelves_area_m2());
    let back_sheets = sheets_needed(input.front_area_m2());
    let face_sheets = sheets_needed(input.front_area_m2());
    let drawer_ply_sheets = sheets_needed(drawers * DRAWER_BOX_M2);
    let drawer_mdf_sheets = sheets_needed(drawers * DRAWER_BOTTOM_M2);
    let facing_area = input.facing_area_m2();
    let hinges = input.total_hinges();

    let core = core_sheets * input.body.rate_per_sheet(rates);
    let back = back_sheets * rates.mdf10_per_sheet;
    let face = face_sheets * input.face.rate_per_sheet(rates);
    let drawer_boxes = drawer_ply_sheets * rates.ply12_per_sheet;
    let drawer_bottoms = drawer_mdf_sheets * rates.mdf10_per_sheet;
    let runners = drawers * rates.drawer_runner_per_pair;
    let facing = input
        .facing
        .map(|facing| facing.cost(facing_area, rates))
        .unwrap_or(0.0);
    let finish = match input.facing {
        Some(facing) if !facing.is_laminate() => facing_area * input.finish.rate_per_m2(rates),
        _ => 0.0,
    };
    let hinge_cost = hinges as f64 * rates.door_hinge_per_piece;
    let labor = input.labor_hours * rates.labor_per_hour;

    let mut breakdown = CostBreakdown::new(input.profit_margin_percent);
    breakdown
        .push("Body core", core)
        .push("Back", back)
        .push("Face panel", face)
        .push("Drawer boxes", drawer_boxes)
        .push("Drawer bottoms", drawer_bottoms)
        .push("Drawer runners", runners)
        .push("Facing", facing)
        .push("Finish", finish)
        .push("Hinges", hinge_cost)
        .push("Accessories", input.accessories)
        .push("Overhead", input.overhead)
        .push("Labor", labor);

    let mut rows = Vec::new();
    if core_sheets > 0.0 {
        rows.push(MaterialRow::new(
            format!("Cabinet body core ({})", input.body),
            MaterialUnit::Sheet,
            round_to(core_sheets, 3),
        ));
    }
    if back_sheets > 0.0 {
        rows.push(MaterialRow::new("Back (MDF 10mm)", MaterialUnit::Sheet, round_to(back_sheets, 3)));
    }
    if face_sheets > 0.0 {
        rows.push(MaterialRow::new(
            format!("Face panel ({})", input.face),
            MaterialUnit::Sheet,
            round_to(face_sheets, 3),
        ));
    }
    if input.drawers > 0 {
        rows.push(MaterialRow::new(
            "Drawer boxes PLY 12mm",
            MaterialUnit::Sheet,
            round_to(drawer_ply_sheets, 3),
        ));
        rows.push(MaterialRow::new(
            "Drawer bottoms MDF 10mm",
            MaterialUnit::Sheet,
            round_to(drawer_mdf_sheets, 3),
        ));
        rows.push(MaterialRow::new("Drawer runners", MaterialUnit::Pair, drawers));
    }
    match input.facing {
        Some(facing) if facing.is_laminate() => {
            rows.push(MaterialRow::new(
                format!("Laminate ({})", facing.code()),
                MaterialUnit::Sheet,
                round_to(sheets_needed(facing_area), 3),
            ));
        }
        Some(facing) => {
            let area = round_to(facing_area, 2);
            rows.push(MaterialRow::new(
                format!("Veneer ({})", facing.code()),
                MaterialUnit::SquareMeters,
                area,
            ));
            rows.push(MaterialRow::new(
                format!("Finish ({})", input.finish),
                MaterialUnit::SquareMeters,
                area,
            ));
        }
        None => {}
    }
    if hinges > 0 {
        rows.push(MaterialRow::new("Door hinges", MaterialUnit::Pcs, hinges as f64));
    }
    if input.accessories > 0.0 {
        rows.push(MaterialRow::new(
            "Accessories (handles, screws, etc.)",
            MaterialUnit::Currency,
            round_to(input.accessories, 0),
        ));
    }
    if input.overhead > 0.0 {
        rows.push(MaterialRow::new("Overhead", MaterialUnit::Currency, round_to(input.overhead, 0)));
    }
    if labor > 0.0 {
        rows.push(MaterialRow::new("Labor", MaterialUnit::Currency, round_to(labor, 0)));
    }
    rows.push(MaterialRow::new(
        "Profit",
        MaterialUnit::Currency,
        round_to(breakdown.profit(), 0),
    ));

    let dimensions = format!(
        "{}×{}×{} cm",
        input.height_cm, input.width_cm, input.depth_cm
    );
    let mut result = CostResult::new(breakdown, &describe(input, hinges), dimensions);
    result.materials = Some(rows);

    debug!(
        category = "cabinet",
        material_cost = result.material_cost(),
        price = result.price,
        hinges,
        "Costed item"
    );
    result
}

fn describe(input: &CabinetInput, hinges: u32) -> Vec<String> {
    let (facing, finish) = match input.facing {
        None => ("none".to_string(), "none".to_string()),
        Some(facing) => match facing.veneer() {
            Some(species) => (species.display_name().to_string(), input.finish.to_string()),
            None => (
                format!("{} laminate", facing.code()),
                "integrated (HPL/LPL)".to_string(),
            ),
        },
    };
    vec![
        format!("Body: {}", input.body),
        "Back: MDF 10mm".to_string(),
        format!("Face: {}", input.face),
        format!("Doors: {} pcs", input.doors),
        format!("Shelves: {} pcs", input.shelves),
        format!("Drawers: {} pcs", input.drawers),
        format!("Facing: {}", facing),
        format!("Finish: {}", finish),
        format!("Hinges: {} pcs", hinges),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::SHEET_AREA_M2;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-6
    }

    fn row<'a>(result: &'a CostResult, name: &str) -> Option<&'a MaterialRow> {
        result.materials.as_ref()?.iter().find(|r| r.name == name)
    }

    #[test]
    fn test_hinge_tiers() {
        assert_eq!(hinges_per_door(40.0), 2);
        assert_eq!(hinges_per_door(60.0), 2);
        assert_eq!(hinges_per_door(60.5), 3);
        assert_eq!(hinges_per_door(120.0), 3);
        assert_eq!(hinges_per_door(121.0), 4);
        assert_eq!(hinges_per_door(200.0), 4);
        assert_eq!(hinges_per_door(200.1), 5);
        assert_eq!(hinges_per_door(300.0), 5);
        assert_eq!(hinges_per_door(301.0), 2);
    }

    #[test]
    fn test_standard_wardrobe() {
        let rates = RateTable::default();
        let input = CabinetInput::default();
        let result = calculate(&input, &rates);

        // body 1.76 + 0.64 + 0.528, shelves 4 × 0.32
        assert!(close(input.body_area_m2(), 2.928));
        assert!(close(input.shelves_area_m2(), 1.28));
        assert!(close(input.front_area_m2(), 1.76));
        assert_eq!(input.total_hinges(), 10);

        let core = 4.208 / SHEET_AREA_M2 * 1050.0;
        let back = 1.76 / SHEET_AREA_M2 * 650.0;
        let face = 1.76 / SHEET_AREA_M2 * 1050.0;
        let material = core + back + face + 890.0 + 1500.0;
        assert!(close(result.breakdown.amount("Body core").unwrap(), core));
        assert!(close(result.breakdown.amount("Hinges").unwrap(), 890.0));
        assert!(close(result.material_cost(), material));
        assert!(close(result.price, material * 1.3));
        assert_eq!(result.dimensions, "220×80×40 cm");
    }

    #[test]
    fn test_face_equals_back_area() {
        let rates = RateTable::default();
        let input = CabinetInput {
            body: BoardMaterial::Ply18,
            face: BoardMaterial::Mdf21,
            ..CabinetInput::default()
        };
        let result = calculate(&input, &rates);
        let back_qty = row(&result, "Back (MDF 10mm)").unwrap().qty;
        let face_qty = row(&result, "Face panel (MDF 21mm)").unwrap().qty;
        assert_eq!(back_qty, face_qty);
        assert!(row(&result, "Cabinet body core (Plywood 18mm)").is_some());
    }

    #[test]
    fn test_materials_bill_without_extras() {
        let rates = RateTable::default();
        let result = calculate(&CabinetInput::default(), &rates);
        let rows = result.materials.as_ref().unwrap();
        let names: Vec<&str> = rows.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "Cabinet body core (MDF 16mm)",
                "Back (MDF 10mm)",
                "Face panel (MDF 16mm)",
                "Door hinges",
                "Accessories (handles, screws, etc.)",
                "Profit",
            ]
        );
        let core = row(&result, "Cabinet body core (MDF 16mm)").unwrap();
        assert_eq!(core.unit, MaterialUnit::Sheet);
        assert_eq!(core.qty, round_to(4.208 / SHEET_AREA_M2, 3));
        assert_eq!(row(&result, "Door hinges").unwrap().qty, 10.0);
        assert_eq!(
            row(&result, "Profit").unwrap().qty,
            round_to(result.profit(), 0)
        );
    }

    #[test]
    fn test_drawers() {
        let rates = RateTable::default();
        let input = CabinetInput {
            drawers: 3,
            labor_hours: 10.0,
            overhead: 250.0,
            ..CabinetInput::default()
        };
        let result = calculate(&input, &rates);
        assert_eq!(result.breakdown.amount("Drawer runners"), Some(930.0));
        let box_sheets = 3.0 * DRAWER_BOX_M2 / SHEET_AREA_M2;
        assert!(close(result.breakdown.amount("Drawer boxes").unwrap(), box_sheets * 1450.0));

        assert_eq!(row(&result, "Drawer runners").unwrap().unit, MaterialUnit::Pair);
        assert_eq!(row(&result, "Drawer runners").unwrap().qty, 3.0);
        assert_eq!(row(&result, "Drawer boxes PLY 12mm").unwrap().qty, round_to(box_sheets, 3));
        assert_eq!(row(&result, "Labor").unwrap().qty, 1600.0);
        assert_eq!(row(&result, "Overhead").unwrap().qty, 250.0);
    }

    #[test]
    fn test_veneer_facing() {
        let rates = RateTable::default();
        let input = CabinetInput {
            facing: Some(Facing::Walnut),
            ..CabinetInput::default()
        };
        let result = calculate(&input, &rates);
        let area = 1.76 + 0.4 * 2.928;
        assert!(close(result.breakdown.amount("Facing").unwrap(), area * 310.0));
        assert!(close(result.breakdown.amount("Finish").unwrap(), area * 350.0));

        let veneer = row(&result, "Veneer (Walnut)").unwrap();
        assert_eq!(veneer.unit, MaterialUnit::SquareMeters);
        assert_eq!(veneer.qty, round_to(area, 2));
        assert!(row(&result, "Finish (PU matte)").is_some());
        assert!(result.description.contains("Facing: Walnut veneer – Finish: PU matte"));
    }

    #[test]
    fn test_laminate_facing() {
        let rates = RateTable::default();
        let input = CabinetInput {
            facing: Some(Facing::Hpl),
            finish: FinishType::PuHighGloss,
            ..CabinetInput::default()
        };
        let result = calculate(&input, &rates);
        let area = 1.76 + 0.4 * 2.928;
        assert!(close(result.breakdown.amount("Facing").unwrap(), area / SHEET_AREA_M2 * 650.0));
        assert_eq!(result.breakdown.amount("Finish"), Some(0.0));
        assert!(row(&result, "Laminate (HPL)").is_some());
        assert!(row(&result, "Finish (PU high gloss)").is_none());
        assert!(result
            .description
            .contains("Facing: HPL laminate – Finish: integrated (HPL/LPL)"));
    }

    #[test]
    fn test_description() {
        let rates = RateTable::default();
        let result = calculate(&CabinetInput::default(), &rates);
        assert_eq!(
            result.description,
            "Body: MDF 16mm – Back: MDF 10mm – Face: MDF 16mm – Doors: 2 pcs – Shelves: 4 pcs – \
             Drawers: 0 pcs – Facing: none – Finish: none – Hinges: 10 pcs"
        );
    }

    #[test]
    fn test_profit_row_always_present() {
        let rates = RateTable::default();
        let input = CabinetInput {
            profit_margin_percent: 0.0,
            accessories: 0.0,
            ..CabinetInput::default()
        };
        let result = calculate(&input, &rates);
        let last = result.materials.as_ref().unwrap().last().unwrap();
        assert_eq!(last.name, "Profit");
        assert_eq!(last.qty, 0.0);
        assert!(row(&result, "Accessories (handles, screws, etc.)").is_none());
    }
}
