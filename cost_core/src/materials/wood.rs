//! Solid Wood
//!
//! Natural wood species bought by volume (m³) for frames, legs and carcasses.

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};
use crate::rates::RateTable;

/// Solid wood species stocked by the workshop
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum WoodSpecies {
    /// Mouski (imported pine)
    #[default]
    Mouski,
    /// Zan (beech)
    Zan,
    /// Aro (oak)
    Aro,
    /// Beech pine
    BeechPine,
}

impl WoodSpecies {
    /// All species for UI selection
    pub const ALL: [WoodSpecies; 4] = [
        WoodSpecies::Mouski,
        WoodSpecies::Zan,
        WoodSpecies::Aro,
        WoodSpecies::BeechPine,
    ];

    /// Price per m³
    pub fn rate_per_m3(&self, rates: &RateTable) -> f64 {
        match self {
            WoodSpecies::Mouski => rates.mouski_per_m3,
            WoodSpecies::Zan => rates.zan_per_m3,
            WoodSpecies::Aro => rates.aro_per_m3,
            WoodSpecies::BeechPine => rates.beech_pine_per_m3,
        }
    }

    /// Parse from common spellings ("mouski", "beech-pine", "oak"...)
    pub fn from_str_flexible(s: &str) -> CalcResult<Self> {
        match s.to_uppercase().replace([' ', '_', '-'], "").as_str() {
            "MOUSKI" | "PINE" => Ok(WoodSpecies::Mouski),
            "ZAN" | "BEECH" => Ok(WoodSpecies::Zan),
            "ARO" | "OAK" => Ok(WoodSpecies::Aro),
            "BEECHPINE" => Ok(WoodSpecies::BeechPine),
            _ => Err(CalcError::material_not_found(s)),
        }
    }

    /// Get display name
    pub fn display_name(&self) -> &'static str {
        match self {
            WoodSpecies::Mouski => "Mouski",
            WoodSpecies::Zan => "Zan (Beech)",
            WoodSpecies::Aro => "Aro (Oak)",
            WoodSpecies::BeechPine => "Beech pine",
        }
    }
}

impl std::fmt::Display for WoodSpecies {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

impl std::str::FromStr for WoodSpecies {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_str_flexible(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rates() {
        let rates = RateTable::default();
        assert_eq!(WoodSpecies::Mouski.rate_per_m3(&rates), 24000.0);
        assert_eq!(WoodSpecies::Zan.rate_per_m3(&rates), 36000.0);
        assert_eq!(WoodSpecies::Aro.rate_per_m3(&rates), 85000.0);
        assert_eq!(WoodSpecies::BeechPine.rate_per_m3(&rates), 78000.0);
    }

    #[test]
    fn test_parse_flexible() {
        assert_eq!(WoodSpecies::from_str_flexible("mouski").unwrap(), WoodSpecies::Mouski);
        assert_eq!(WoodSpecies::from_str_flexible("Beech pine").unwrap(), WoodSpecies::BeechPine);
        assert_eq!(WoodSpecies::from_str_flexible("oak").unwrap(), WoodSpecies::Aro);
        assert_eq!("zan".parse::<WoodSpecies>().unwrap(), WoodSpecies::Zan);
        assert!(WoodSpecies::from_str_flexible("teak").is_err());
    }

    #[test]
    fn test_display() {
        assert_eq!(WoodSpecies::Zan.to_string(), "Zan (Beech)");
        assert_eq!(WoodSpecies::default(), WoodSpecies::Mouski);
    }
}
