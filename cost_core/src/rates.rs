//! # Rate Table
//!
//! The flat price list every calculation reads from. A `RateTable` is a plain
//! value: it is passed by reference into each calculator and never mutated
//! during a calculation. Editing happens between calculations, through the
//! strongly-typed [`RateField`] tag rather than by property name.
//!
//! All prices are in [`CURRENCY`].
//!
//! ## Example
//!
//! ```rust
//! use cost_core::rates::{RateField, RateTable};
//!
//! let rates = RateTable::default().with(RateField::LaborPerHour, 200.0);
//! assert_eq!(rates.labor_per_hour, 200.0);
//! assert_eq!(rates.get(RateField::LaborPerHour), 200.0);
//!
//! let field = RateField::from_key("oak_veneer_per_m2").unwrap();
//! assert_eq!(rates.get(field), 210.0);
//! ```
//!
//! ## TOML
//!
//! Rate tables load from TOML (see [`crate::file_io::load_rates`]). Every key
//! is optional; missing keys keep their default:
//!
//! ```toml
//! mouski_per_m3 = 26000
//! labor_per_hour = 180
//! ```

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};

/// Currency all rates and prices are expressed in
pub const CURRENCY: &str = "EGP";

/// Groups used to lay rates out in settings screens and `rates` output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RateGroup {
    NaturalWood,
    Panels,
    Veneer,
    Laminate,
    Finish,
    Glass,
    Marble,
    Plywood,
    Upholstery,
    SofaUpholstery,
    Fabric,
    Hardware,
    Labor,
    Defaults,
}

impl RateGroup {
    /// Heading for this group
    pub fn display_name(&self) -> &'static str {
        match self {
            RateGroup::NaturalWood => "Natural Wood (EGP / m³)",
            RateGroup::Panels => "MDF / Blockboard (EGP / sheet 122×244)",
            RateGroup::Veneer => "Veneer (EGP / m²)",
            RateGroup::Laminate => "HPL / LPL (EGP / sheet 122×244)",
            RateGroup::Finish => "Finish (EGP / m²)",
            RateGroup::Glass => "Glass (EGP / m²)",
            RateGroup::Marble => "Marble (EGP / m²)",
            RateGroup::Plywood => "Plywood / Foamboard (EGP / sheet 122×244)",
            RateGroup::Upholstery => "Upholstery, chairs & benches (EGP / piece)",
            RateGroup::SofaUpholstery => "Upholstery, sofas (EGP / m)",
            RateGroup::Fabric => "Fabric (EGP / m)",
            RateGroup::Hardware => "Steel & Hardware (EGP / piece)",
            RateGroup::Labor => "Labor (EGP / hour)",
            RateGroup::Defaults => "Defaults",
        }
    }
}

macro_rules! rate_table {
    (
        $(
            $(#[doc = $doc:literal])*
            $field:ident => $variant:ident, $group:ident, $label:literal, $default:expr;
        )*
    ) => {
        /// Per-unit prices used by every calculator.
        ///
        /// Serializes as a flat map of `snake_case` keys to numbers. Unknown
        /// keys are rejected so a typo in a rates file does not go unnoticed.
        #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
        #[serde(default, deny_unknown_fields)]
        pub struct RateTable {
            $(
                $(#[doc = $doc])*
                pub $field: f64,
            )*
        }

        impl Default for RateTable {
            fn default() -> Self {
                RateTable {
                    $($field: $default,)*
                }
            }
        }

        /// Tag for one editable rate.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum RateField {
            $($variant,)*
        }

        impl RateField {
            /// Every rate, in settings-screen order
            pub const ALL: &'static [RateField] = &[$(RateField::$variant,)*];

            /// Key used in TOML/JSON files
            pub fn key(self) -> &'static str {
                match self {
                    $(RateField::$variant => stringify!($field),)*
                }
            }

            /// Human-readable label
            pub fn label(self) -> &'static str {
                match self {
                    $(RateField::$variant => $label,)*
                }
            }

            /// Settings group this rate belongs to
            pub fn group(self) -> RateGroup {
                match self {
                    $(RateField::$variant => RateGroup::$group,)*
                }
            }
        }

        impl RateTable {
            /// Read one rate
            pub fn get(&self, field: RateField) -> f64 {
                match field {
                    $(RateField::$variant => self.$field,)*
                }
            }

            /// Overwrite one rate
            pub fn set(&mut self, field: RateField, value: f64) {
                match field {
                    $(RateField::$variant => self.$field = value,)*
                }
            }
        }
    };
}

rate_table! {
    /// Mouski (pine) solid wood, per m³
    mouski_per_m3 => MouskiPerM3, NaturalWood, "Mouski", 24000.0;
    /// Zan (beech) solid wood, per m³
    zan_per_m3 => ZanPerM3, NaturalWood, "Zan (Beech)", 36000.0;
    /// Aro (oak) solid wood, per m³
    aro_per_m3 => AroPerM3, NaturalWood, "Aro (Oak)", 85000.0;
    /// Beech pine solid wood, per m³
    beech_pine_per_m3 => BeechPinePerM3, NaturalWood, "Beech pine", 78000.0;

    mdf10_per_sheet => Mdf10PerSheet, Panels, "MDF 10mm", 650.0;
    mdf16_per_sheet => Mdf16PerSheet, Panels, "MDF 16mm", 1050.0;
    mdf21_per_sheet => Mdf21PerSheet, Panels, "MDF 21mm", 1350.0;
    blockboard18_per_sheet => Blockboard18PerSheet, Panels, "Blockboard 18mm", 1650.0;

    walnut_veneer_per_m2 => WalnutVeneerPerM2, Veneer, "Walnut veneer", 310.0;
    oak_veneer_per_m2 => OakVeneerPerM2, Veneer, "Oak veneer", 210.0;
    beech_veneer_per_m2 => BeechVeneerPerM2, Veneer, "Beech veneer", 210.0;

    hpl_per_sheet => HplPerSheet, Laminate, "HPL", 650.0;
    lpl_per_sheet => LplPerSheet, Laminate, "LPL", 350.0;

    /// Finish rates are per m² per face
    finish_pu_matte_per_m2 => FinishPuMattePerM2, Finish, "PU matte", 350.0;
    finish_pu_high_gloss_per_m2 => FinishPuHighGlossPerM2, Finish, "PU high gloss", 420.0;
    finish_nc_per_m2 => FinishNcPerM2, Finish, "NC", 280.0;
    finish_oil_per_m2 => FinishOilPerM2, Finish, "Oil / stain", 250.0;

    glass6_per_m2 => Glass6PerM2, Glass, "Glass 6mm", 1350.0;
    glass10_per_m2 => Glass10PerM2, Glass, "Glass 10mm", 1750.0;

    marble_per_m2 => MarblePerM2, Marble, "Marble", 4500.0;

    ply2_5_per_sheet => Ply25PerSheet, Plywood, "Ply 2.5mm", 200.0;
    ply2_7_per_sheet => Ply27PerSheet, Plywood, "Ply 2.7mm", 390.0;
    ply8_per_sheet => Ply8PerSheet, Plywood, "Ply 8mm", 1050.0;
    ply12_per_sheet => Ply12PerSheet, Plywood, "Ply 12mm", 1450.0;
    ply18_per_sheet => Ply18PerSheet, Plywood, "Ply 18mm", 2050.0;
    foamboard_per_sheet => FoamboardPerSheet, Plywood, "Foamboard 18mm", 2100.0;

    upholstery_seat_only => UpholsterySeatOnly, Upholstery, "Seat only", 500.0;
    upholstery_full => UpholsteryFull, Upholstery, "Full", 700.0;
    upholstery_arm_full => UpholsteryArmFull, Upholstery, "Full arm chair", 900.0;

    upholstery_sofa_low_per_m => UpholsterySofaLowPerM, SofaUpholstery, "Sofa low grade", 1250.0;
    upholstery_sofa_high_per_m => UpholsterySofaHighPerM, SofaUpholstery, "Sofa high grade", 1750.0;

    fabric_low_per_m => FabricLowPerM, Fabric, "Fabric low grade", 220.0;
    fabric_high_per_m => FabricHighPerM, Fabric, "Fabric high grade", 450.0;

    steel_chassis_per_piece => SteelChassisPerPiece, Hardware, "Steel chassis", 1500.0;
    /// Drawer runners, per pair
    drawer_runner_per_pair => DrawerRunnerPerPair, Hardware, "Drawer runner (pair)", 310.0;
    door_hinge_per_piece => DoorHingePerPiece, Hardware, "Door hinge", 89.0;

    labor_per_hour => LaborPerHour, Labor, "Labor", 160.0;

    /// Accessories (handles, screws...) pre-filled on doors and cabinets
    default_accessories => DefaultAccessories, Defaults, "Default accessories", 1500.0;
    /// Profit margin pre-filled on every calculator, in percent
    default_profit_margin_percent => DefaultProfitMarginPercent, Defaults, "Default profit margin %", 30.0;
    compliance_per_item => CompliancePerItem, Defaults, "Compliance / item", 80.0;
}

impl RateField {
    /// Resolve a file/CLI key (`labor_per_hour`) to its field.
    ///
    /// Dashes are accepted in place of underscores.
    pub fn from_key(key: &str) -> CalcResult<Self> {
        let normalized = key.trim().to_lowercase().replace('-', "_");
        RateField::ALL
            .iter()
            .copied()
            .find(|f| f.key() == normalized)
            .ok_or_else(|| CalcError::invalid_input("rate", key, "Unknown rate key"))
    }
}

impl RateTable {
    /// Builder-style variant of [`RateTable::set`]
    pub fn with(mut self, field: RateField, value: f64) -> Self {
        self.set(field, value);
        self
    }

    /// Iterate `(field, value)` pairs in settings order
    pub fn iter(&self) -> impl Iterator<Item = (RateField, f64)> + '_ {
        RateField::ALL.iter().map(move |&f| (f, self.get(f)))
    }

    /// Check that every rate is a finite, non-negative number.
    ///
    /// Calculators never call this; it guards rate tables read from disk or
    /// typed in by a user.
    pub fn validate(&self) -> CalcResult<()> {
        for (field, value) in self.iter() {
            if !value.is_finite() {
                return Err(CalcError::invalid_input(
                    field.key(),
                    value.to_string(),
                    "Rate must be a finite number",
                ));
            }
            if value < 0.0 {
                return Err(CalcError::invalid_input(
                    field.key(),
                    value.to_string(),
                    "Rate cannot be negative",
                ));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let rates = RateTable::default();
        assert_eq!(rates.mouski_per_m3, 24000.0);
        assert_eq!(rates.mdf10_per_sheet, 650.0);
        assert_eq!(rates.door_hinge_per_piece, 89.0);
        assert_eq!(rates.default_profit_margin_percent, 30.0);
    }

    #[test]
    fn test_get_set_every_field() {
        let mut rates = RateTable::default();
        for (i, &field) in RateField::ALL.iter().enumerate() {
            rates.set(field, i as f64 + 0.5);
        }
        for (i, &field) in RateField::ALL.iter().enumerate() {
            assert_eq!(rates.get(field), i as f64 + 0.5, "{}", field.key());
        }
    }

    #[test]
    fn test_keys_are_unique_and_resolvable() {
        let mut keys: Vec<_> = RateField::ALL.iter().map(|f| f.key()).collect();
        keys.sort_unstable();
        keys.dedup();
        assert_eq!(keys.len(), RateField::ALL.len());

        for &field in RateField::ALL {
            assert_eq!(RateField::from_key(field.key()).unwrap(), field);
        }
        assert_eq!(RateField::from_key("Labor-Per-Hour").unwrap(), RateField::LaborPerHour);
        assert!(RateField::from_key("teak_per_m3").is_err());
    }

    #[test]
    fn test_validate() {
        assert!(RateTable::default().validate().is_ok());

        let negative = RateTable::default().with(RateField::HplPerSheet, -1.0);
        let err = negative.validate().unwrap_err();
        assert_eq!(err.error_code(), "INVALID_INPUT");

        let nan = RateTable::default().with(RateField::LaborPerHour, f64::NAN);
        assert!(nan.validate().is_err());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let rates: RateTable = serde_json::from_str(r#"{"labor_per_hour": 175}"#).unwrap();
        assert_eq!(rates.labor_per_hour, 175.0);
        assert_eq!(rates.zan_per_m3, 36000.0);
    }

    #[test]
    fn test_unknown_key_rejected() {
        let result: Result<RateTable, _> = serde_json::from_str(r#"{"labour_per_hour": 175}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_groups() {
        assert_eq!(RateField::Mdf16PerSheet.group(), RateGroup::Panels);
        assert_eq!(RateField::DoorHingePerPiece.group(), RateGroup::Hardware);
        assert_eq!(RateField::LaborPerHour.label(), "Labor");
    }
}
