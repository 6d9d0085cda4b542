//! Sheet Goods, Tops and Glass
//!
//! Board materials are bought per standard sheet and priced by sheet
//! fraction. Marble and glass are cut to size and priced per m².

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};
use crate::geometry::sheets_needed;
use crate::rates::RateTable;

// ============================================================================
// Board Materials (cabinet body / face)
// ============================================================================

/// Board used for a cabinet carcass or face panel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum BoardMaterial {
    #[default]
    #[serde(rename = "MDF16")]
    Mdf16,
    #[serde(rename = "MDF21")]
    Mdf21,
    Blockboard18,
    Ply18,
    Foamboard,
}

impl BoardMaterial {
    pub const ALL: [BoardMaterial; 5] = [
        BoardMaterial::Mdf16,
        BoardMaterial::Mdf21,
        BoardMaterial::Blockboard18,
        BoardMaterial::Ply18,
        BoardMaterial::Foamboard,
    ];

    /// Price per standard sheet
    pub fn rate_per_sheet(&self, rates: &RateTable) -> f64 {
        match self {
            BoardMaterial::Mdf16 => rates.mdf16_per_sheet,
            BoardMaterial::Mdf21 => rates.mdf21_per_sheet,
            BoardMaterial::Blockboard18 => rates.blockboard18_per_sheet,
            BoardMaterial::Ply18 => rates.ply18_per_sheet,
            BoardMaterial::Foamboard => rates.foamboard_per_sheet,
        }
    }

    /// Parse from common spellings ("mdf16", "MDF 21mm", "ply-18")
    pub fn from_str_flexible(s: &str) -> CalcResult<Self> {
        match s.to_uppercase().replace([' ', '_', '-'], "").trim_end_matches("MM") {
            "MDF16" => Ok(BoardMaterial::Mdf16),
            "MDF21" => Ok(BoardMaterial::Mdf21),
            "BLOCKBOARD18" | "BLOCKBOARD" => Ok(BoardMaterial::Blockboard18),
            "PLY18" | "PLYWOOD18" => Ok(BoardMaterial::Ply18),
            "FOAMBOARD" | "FOAMBOARD18" => Ok(BoardMaterial::Foamboard),
            _ => Err(CalcError::material_not_found(s)),
        }
    }

    /// Get display name
    pub fn display_name(&self) -> &'static str {
        match self {
            BoardMaterial::Mdf16 => "MDF 16mm",
            BoardMaterial::Mdf21 => "MDF 21mm",
            BoardMaterial::Blockboard18 => "Blockboard 18mm",
            BoardMaterial::Ply18 => "Plywood 18mm",
            BoardMaterial::Foamboard => "Foamboard 18mm",
        }
    }
}

impl std::fmt::Display for BoardMaterial {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

// ============================================================================
// Table Tops and Legs
// ============================================================================

/// Table top material
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TopMaterial {
    #[serde(rename = "MDF16")]
    Mdf16,
    #[serde(rename = "MDF21")]
    Mdf21,
    Blockboard18,
    #[default]
    Marble,
    Glass6,
    Glass10,
}

impl TopMaterial {
    pub const ALL: [TopMaterial; 6] = [
        TopMaterial::Mdf16,
        TopMaterial::Mdf21,
        TopMaterial::Blockboard18,
        TopMaterial::Marble,
        TopMaterial::Glass6,
        TopMaterial::Glass10,
    ];

    /// Wood-core tops can be veneered and finished
    pub fn is_wood_core(&self) -> bool {
        matches!(self, TopMaterial::Mdf16 | TopMaterial::Mdf21 | TopMaterial::Blockboard18)
    }

    /// Cost of a top of `area_m2`.
    ///
    /// Wood cores are priced by sheet fraction, marble and glass by area.
    pub fn cost(&self, area_m2: f64, rates: &RateTable) -> f64 {
        match self {
            TopMaterial::Mdf16 => sheets_needed(area_m2) * rates.mdf16_per_sheet,
            TopMaterial::Mdf21 => sheets_needed(area_m2) * rates.mdf21_per_sheet,
            TopMaterial::Blockboard18 => sheets_needed(area_m2) * rates.blockboard18_per_sheet,
            TopMaterial::Marble => area_m2 * rates.marble_per_m2,
            TopMaterial::Glass6 => area_m2 * rates.glass6_per_m2,
            TopMaterial::Glass10 => area_m2 * rates.glass10_per_m2,
        }
    }

    /// Get display name
    pub fn display_name(&self) -> &'static str {
        match self {
            TopMaterial::Mdf16 => "MDF 16mm",
            TopMaterial::Mdf21 => "MDF 21mm",
            TopMaterial::Blockboard18 => "Blockboard 18mm",
            TopMaterial::Marble => "Marble top",
            TopMaterial::Glass6 => "Glass 6mm top",
            TopMaterial::Glass10 => "Glass 10mm top",
        }
    }
}

impl std::fmt::Display for TopMaterial {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Table leg material
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum LegMaterial {
    #[default]
    Wood,
    Steel,
}

// ============================================================================
// Plywood
// ============================================================================

/// Plywood thickness used for seat shells and backs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum PlyThickness {
    #[serde(rename = "2.5")]
    Mm2_5,
    #[default]
    #[serde(rename = "2.7")]
    Mm2_7,
    #[serde(rename = "8")]
    Mm8,
    #[serde(rename = "12")]
    Mm12,
    #[serde(rename = "18")]
    Mm18,
}

impl PlyThickness {
    pub const ALL: [PlyThickness; 5] = [
        PlyThickness::Mm2_5,
        PlyThickness::Mm2_7,
        PlyThickness::Mm8,
        PlyThickness::Mm12,
        PlyThickness::Mm18,
    ];

    /// Thickness in millimetres
    pub fn mm(&self) -> f64 {
        match self {
            PlyThickness::Mm2_5 => 2.5,
            PlyThickness::Mm2_7 => 2.7,
            PlyThickness::Mm8 => 8.0,
            PlyThickness::Mm12 => 12.0,
            PlyThickness::Mm18 => 18.0,
        }
    }

    /// Price per standard sheet
    pub fn rate_per_sheet(&self, rates: &RateTable) -> f64 {
        match self {
            PlyThickness::Mm2_5 => rates.ply2_5_per_sheet,
            PlyThickness::Mm2_7 => rates.ply2_7_per_sheet,
            PlyThickness::Mm8 => rates.ply8_per_sheet,
            PlyThickness::Mm12 => rates.ply12_per_sheet,
            PlyThickness::Mm18 => rates.ply18_per_sheet,
        }
    }
}

impl std::fmt::Display for PlyThickness {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Ply {}mm", self.mm())
    }
}

// ============================================================================
// Glass
// ============================================================================

/// Glass insert for doors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum GlassType {
    #[default]
    None,
    Glass6,
    Glass10,
}

impl GlassType {
    /// Price per m², zero without glass
    pub fn rate_per_m2(&self, rates: &RateTable) -> f64 {
        match self {
            GlassType::None => 0.0,
            GlassType::Glass6 => rates.glass6_per_m2,
            GlassType::Glass10 => rates.glass10_per_m2,
        }
    }

    /// Short label used in descriptions ("6mm white")
    pub fn label(&self) -> Option<&'static str> {
        match self {
            GlassType::None => None,
            GlassType::Glass6 => Some("6mm white"),
            GlassType::Glass10 => Some("10mm white"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::SHEET_AREA_M2;

    #[test]
    fn test_board_rates_and_labels() {
        let rates = RateTable::default();
        assert_eq!(BoardMaterial::Mdf16.rate_per_sheet(&rates), 1050.0);
        assert_eq!(BoardMaterial::Foamboard.rate_per_sheet(&rates), 2100.0);
        assert_eq!(BoardMaterial::Ply18.to_string(), "Plywood 18mm");
    }

    #[test]
    fn test_board_parse() {
        assert_eq!(BoardMaterial::from_str_flexible("MDF 21mm").unwrap(), BoardMaterial::Mdf21);
        assert_eq!(BoardMaterial::from_str_flexible("ply-18").unwrap(), BoardMaterial::Ply18);
        assert!(BoardMaterial::from_str_flexible("chipboard").is_err());
    }

    #[test]
    fn test_top_pricing_modes() {
        let rates = RateTable::default();
        let by_sheet = TopMaterial::Mdf21.cost(SHEET_AREA_M2, &rates);
        assert!((by_sheet - 1350.0).abs() < 1e-9);
        assert_eq!(TopMaterial::Marble.cost(2.0, &rates), 9000.0);
        assert_eq!(TopMaterial::Glass10.cost(1.0, &rates), 1750.0);
    }

    #[test]
    fn test_wood_core_tops() {
        let wood: Vec<_> = TopMaterial::ALL.iter().filter(|t| t.is_wood_core()).collect();
        assert_eq!(wood.len(), 3);
        assert!(!TopMaterial::Glass6.is_wood_core());
    }

    #[test]
    fn test_ply_serialization() {
        assert_eq!(serde_json::to_string(&PlyThickness::Mm2_5).unwrap(), "\"2.5\"");
        assert_eq!(PlyThickness::Mm12.to_string(), "Ply 12mm");
        assert_eq!(PlyThickness::Mm2_7.rate_per_sheet(&RateTable::default()), 390.0);
    }

    #[test]
    fn test_glass() {
        let rates = RateTable::default();
        assert_eq!(GlassType::None.rate_per_m2(&rates), 0.0);
        assert_eq!(GlassType::Glass6.label(), Some("6mm white"));
    }
}
