//! Surface Layers
//!
//! Decorative layers applied over a structural core: wood veneers (bought per
//! m²), high/low pressure laminates (bought per sheet) and the finish coats
//! that go over veneer. Laminates carry their own surface and never take a
//! finish.

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};
use crate::geometry::sheets_needed;
use crate::rates::RateTable;

/// Wood veneer species
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VeneerSpecies {
    Walnut,
    Oak,
    Beech,
}

impl VeneerSpecies {
    pub const ALL: [VeneerSpecies; 3] = [VeneerSpecies::Walnut, VeneerSpecies::Oak, VeneerSpecies::Beech];

    /// Price per m²
    pub fn rate_per_m2(&self, rates: &RateTable) -> f64 {
        match self {
            VeneerSpecies::Walnut => rates.walnut_veneer_per_m2,
            VeneerSpecies::Oak => rates.oak_veneer_per_m2,
            VeneerSpecies::Beech => rates.beech_veneer_per_m2,
        }
    }

    /// Species name ("Oak")
    pub fn name(&self) -> &'static str {
        match self {
            VeneerSpecies::Walnut => "Walnut",
            VeneerSpecies::Oak => "Oak",
            VeneerSpecies::Beech => "Beech",
        }
    }

    /// Get display name ("Oak veneer")
    pub fn display_name(&self) -> &'static str {
        match self {
            VeneerSpecies::Walnut => "Walnut veneer",
            VeneerSpecies::Oak => "Oak veneer",
            VeneerSpecies::Beech => "Beech veneer",
        }
    }
}

impl std::fmt::Display for VeneerSpecies {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Facing applied over a door leaf or cabinet front.
///
/// Veneers are priced by area and take a separate finish; laminates are
/// priced by sheet fraction and are finished as supplied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Facing {
    Walnut,
    Oak,
    Beech,
    #[serde(rename = "HPL")]
    Hpl,
    #[serde(rename = "LPL")]
    Lpl,
}

impl Facing {
    pub const ALL: [Facing; 5] = [Facing::Walnut, Facing::Oak, Facing::Beech, Facing::Hpl, Facing::Lpl];

    /// The veneer species, or `None` for laminates
    pub fn veneer(&self) -> Option<VeneerSpecies> {
        match self {
            Facing::Walnut => Some(VeneerSpecies::Walnut),
            Facing::Oak => Some(VeneerSpecies::Oak),
            Facing::Beech => Some(VeneerSpecies::Beech),
            Facing::Hpl | Facing::Lpl => None,
        }
    }

    /// HPL or LPL
    pub fn is_laminate(&self) -> bool {
        matches!(self, Facing::Hpl | Facing::Lpl)
    }

    /// Cost of covering `area_m2` with this facing.
    ///
    /// Veneer: area × rate per m². Laminate: sheet fraction × rate per sheet.
    pub fn cost(&self, area_m2: f64, rates: &RateTable) -> f64 {
        match self {
            Facing::Hpl => sheets_needed(area_m2) * rates.hpl_per_sheet,
            Facing::Lpl => sheets_needed(area_m2) * rates.lpl_per_sheet,
            veneer => veneer
                .veneer()
                .map(|species| area_m2 * species.rate_per_m2(rates))
                .unwrap_or(0.0),
        }
    }

    /// Short code ("Oak", "HPL")
    pub fn code(&self) -> &'static str {
        match self {
            Facing::Walnut => "Walnut",
            Facing::Oak => "Oak",
            Facing::Beech => "Beech",
            Facing::Hpl => "HPL",
            Facing::Lpl => "LPL",
        }
    }

    /// Parse from common spellings ("oak", "oak veneer", "hpl")
    pub fn from_str_flexible(s: &str) -> CalcResult<Self> {
        let upper = s.to_uppercase();
        match upper.trim_end_matches("VENEER").trim() {
            "WALNUT" => Ok(Facing::Walnut),
            "OAK" => Ok(Facing::Oak),
            "BEECH" => Ok(Facing::Beech),
            "HPL" => Ok(Facing::Hpl),
            "LPL" => Ok(Facing::Lpl),
            _ => Err(CalcError::material_not_found(s)),
        }
    }
}

impl From<VeneerSpecies> for Facing {
    fn from(species: VeneerSpecies) -> Self {
        match species {
            VeneerSpecies::Walnut => Facing::Walnut,
            VeneerSpecies::Oak => Facing::Oak,
            VeneerSpecies::Beech => Facing::Beech,
        }
    }
}

impl std::fmt::Display for Facing {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.veneer() {
            Some(species) => write!(f, "{}", species),
            None => write!(f, "{}", self.code()),
        }
    }
}

impl std::str::FromStr for Facing {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_str_flexible(s)
    }
}

/// Finish coat applied over veneer or solid wood
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum FinishType {
    #[default]
    #[serde(rename = "PU matte")]
    PuMatte,
    #[serde(rename = "PU high gloss")]
    PuHighGloss,
    #[serde(rename = "NC")]
    Nc,
    #[serde(rename = "Oil / stain")]
    OilStain,
}

impl FinishType {
    pub const ALL: [FinishType; 4] = [
        FinishType::PuMatte,
        FinishType::PuHighGloss,
        FinishType::Nc,
        FinishType::OilStain,
    ];

    /// Price per m² per face
    pub fn rate_per_m2(&self, rates: &RateTable) -> f64 {
        match self {
            FinishType::PuMatte => rates.finish_pu_matte_per_m2,
            FinishType::PuHighGloss => rates.finish_pu_high_gloss_per_m2,
            FinishType::Nc => rates.finish_nc_per_m2,
            FinishType::OilStain => rates.finish_oil_per_m2,
        }
    }

    /// Parse from common spellings ("pu matte", "nc", "oil")
    pub fn from_str_flexible(s: &str) -> CalcResult<Self> {
        match s.to_uppercase().replace([' ', '_', '-', '/'], "").as_str() {
            "PUMATTE" | "MATTE" => Ok(FinishType::PuMatte),
            "PUHIGHGLOSS" | "HIGHGLOSS" | "GLOSS" => Ok(FinishType::PuHighGloss),
            "NC" => Ok(FinishType::Nc),
            "OILSTAIN" | "OIL" | "STAIN" => Ok(FinishType::OilStain),
            _ => Err(CalcError::material_not_found(s)),
        }
    }

    /// Get display name
    pub fn display_name(&self) -> &'static str {
        match self {
            FinishType::PuMatte => "PU matte",
            FinishType::PuHighGloss => "PU high gloss",
            FinishType::Nc => "NC",
            FinishType::OilStain => "Oil / stain",
        }
    }
}

impl std::fmt::Display for FinishType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

impl std::str::FromStr for FinishType {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_str_flexible(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::SHEET_AREA_M2;

    #[test]
    fn test_veneer_cost_is_per_area() {
        let rates = RateTable::default();
        assert_eq!(Facing::Oak.cost(2.0, &rates), 420.0);
        assert_eq!(Facing::Walnut.cost(1.0, &rates), 310.0);
    }

    #[test]
    fn test_laminate_cost_is_per_sheet() {
        let rates = RateTable::default();
        let one_sheet = Facing::Hpl.cost(SHEET_AREA_M2, &rates);
        assert!((one_sheet - 650.0).abs() < 1e-9);
        let half_sheet = Facing::Lpl.cost(SHEET_AREA_M2 / 2.0, &rates);
        assert!((half_sheet - 175.0).abs() < 1e-9);
    }

    #[test]
    fn test_laminate_flags() {
        assert!(Facing::Hpl.is_laminate());
        assert!(!Facing::Beech.is_laminate());
        assert_eq!(Facing::Hpl.veneer(), None);
        assert_eq!(Facing::from(VeneerSpecies::Oak), Facing::Oak);
    }

    #[test]
    fn test_parse_facing() {
        assert_eq!(Facing::from_str_flexible("Oak veneer").unwrap(), Facing::Oak);
        assert_eq!(Facing::from_str_flexible("hpl").unwrap(), Facing::Hpl);
        assert!(Facing::from_str_flexible("formica").is_err());
    }

    #[test]
    fn test_finish_serialization_uses_labels() {
        let json = serde_json::to_string(&FinishType::OilStain).unwrap();
        assert_eq!(json, "\"Oil / stain\"");
        let parsed: FinishType = serde_json::from_str("\"PU high gloss\"").unwrap();
        assert_eq!(parsed, FinishType::PuHighGloss);
        assert_eq!(FinishType::from_str_flexible("oil").unwrap(), FinishType::OilStain);
    }

    #[test]
    fn test_facing_serialization() {
        assert_eq!(serde_json::to_string(&Facing::Hpl).unwrap(), "\"HPL\"");
        assert_eq!(Facing::Oak.to_string(), "Oak veneer");
        assert_eq!(Facing::Lpl.to_string(), "LPL");
    }
}
