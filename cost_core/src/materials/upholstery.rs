//! Seating and Upholstery Selections
//!
//! Seat types and detail levels map to a measured wood volume and a base
//! labor estimate. Upholstery is a flat per-piece charge for chairs and
//! benches and a per-metre charge for sofas; fabric is bought by the metre.

use serde::{Deserialize, Serialize};

use crate::rates::RateTable;

/// Kind of seat
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SeatItemType {
    #[default]
    #[serde(rename = "Dining chair")]
    DiningChair,
    #[serde(rename = "Bar stool")]
    BarStool,
    Bench,
    #[serde(rename = "Arm chair")]
    ArmChair,
}

/// How much carving and joinery the piece has
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum DetailLevel {
    #[default]
    Light,
    Heavy,
}

impl SeatItemType {
    pub const ALL: [SeatItemType; 4] = [
        SeatItemType::DiningChair,
        SeatItemType::BarStool,
        SeatItemType::Bench,
        SeatItemType::ArmChair,
    ];

    /// Solid wood volume (m³) and base labor hours for this seat
    pub fn reference(&self, level: DetailLevel) -> (f64, f64) {
        use DetailLevel::*;
        match (self, level) {
            (SeatItemType::DiningChair, Light) => (0.025, 3.0),
            (SeatItemType::DiningChair, Heavy) => (0.035, 4.0),
            (SeatItemType::BarStool, Light) => (0.03, 3.0),
            (SeatItemType::BarStool, Heavy) => (0.04, 4.5),
            (SeatItemType::Bench, Light) => (0.035, 3.5),
            (SeatItemType::Bench, Heavy) => (0.05, 5.0),
            (SeatItemType::ArmChair, Light) => (0.04, 4.0),
            (SeatItemType::ArmChair, Heavy) => (0.06, 5.5),
        }
    }

    /// Get display name
    pub fn display_name(&self) -> &'static str {
        match self {
            SeatItemType::DiningChair => "Dining chair",
            SeatItemType::BarStool => "Bar stool",
            SeatItemType::Bench => "Bench",
            SeatItemType::ArmChair => "Arm chair",
        }
    }
}

impl std::fmt::Display for SeatItemType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Upholstery work on a chair or bench
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Upholstery {
    None,
    #[default]
    #[serde(rename = "Seat only")]
    SeatOnly,
    Full,
    #[serde(rename = "Full arm chair")]
    FullArmChair,
}

impl Upholstery {
    /// Flat charge per piece
    pub fn charge(&self, rates: &RateTable) -> f64 {
        match self {
            Upholstery::None => 0.0,
            Upholstery::SeatOnly => rates.upholstery_seat_only,
            Upholstery::Full => rates.upholstery_full,
            Upholstery::FullArmChair => rates.upholstery_arm_full,
        }
    }
}

/// Sofa upholstery grade
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SofaUpholstery {
    None,
    #[default]
    Low,
    High,
}

impl SofaUpholstery {
    /// Charge per metre of sofa length
    pub fn rate_per_m(&self, rates: &RateTable) -> f64 {
        match self {
            SofaUpholstery::None => 0.0,
            SofaUpholstery::Low => rates.upholstery_sofa_low_per_m,
            SofaUpholstery::High => rates.upholstery_sofa_high_per_m,
        }
    }
}

/// Sofa frame shape
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SofaShape {
    #[default]
    Straight,
    Curved,
}

impl SofaShape {
    /// Solid wood volume per metre of length (m³/m)
    pub fn volume_per_m(&self) -> f64 {
        match self {
            SofaShape::Straight => 0.06,
            SofaShape::Curved => 0.08,
        }
    }
}

/// Fabric grade
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum FabricGrade {
    #[default]
    Low,
    High,
}

impl FabricGrade {
    /// Price per metre
    pub fn rate_per_m(&self, rates: &RateTable) -> f64 {
        match self {
            FabricGrade::Low => rates.fabric_low_per_m,
            FabricGrade::High => rates.fabric_high_per_m,
        }
    }

    /// Get display name
    pub fn display_name(&self) -> &'static str {
        match self {
            FabricGrade::Low => "Low grade",
            FabricGrade::High => "High grade",
        }
    }
}

/// Description fragment for the fabric line, shared by seating and sofas.
///
/// `Fabric: Low grade (220 EGP/m, 1.50 m)`, or `Fabric: none` when the piece
/// is not upholstered.
pub fn fabric_fragment(upholstered: bool, grade: FabricGrade, meters: f64, rates: &RateTable) -> String {
    if !upholstered {
        return "Fabric: none".to_string();
    }
    format!(
        "Fabric: {} ({} {}/m, {:.2} m)",
        grade.display_name(),
        grade.rate_per_m(rates),
        crate::rates::CURRENCY,
        meters
    )
}
