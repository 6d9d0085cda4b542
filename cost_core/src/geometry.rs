//! # Geometry Helpers
//!
//! Conversions from shop dimensions to the quantities materials are bought in.
//!
//! Board materials are priced per standard sheet (1.22 m × 2.44 m). Sheet
//! counts are *fractional*: an item that needs 0.42 of a sheet pays for 0.42
//! of a sheet. Nothing here rounds up to whole panels.
//!
//! ## Example
//!
//! ```rust
//! use cost_core::geometry::{area_m2, sheets_needed, SHEET_AREA_M2};
//!
//! let leaf = area_m2(220.0, 90.0);
//! assert!((leaf - 1.98).abs() < 1e-12);
//!
//! let sheets = sheets_needed(SHEET_AREA_M2 / 2.0);
//! assert!((sheets - 0.5).abs() < 1e-12);
//! ```

use crate::units::{Centimeters, Meters, Sheets, SquareMeters};

/// Width of a standard panel (m)
pub const SHEET_WIDTH_M: f64 = 1.22;

/// Length of a standard panel (m)
pub const SHEET_LENGTH_M: f64 = 2.44;

/// Area of one standard panel (m²)
pub const SHEET_AREA_M2: f64 = SHEET_WIDTH_M * SHEET_LENGTH_M;

/// Centimetres to metres.
pub fn cm_to_m(cm: f64) -> f64 {
    Meters::from(Centimeters(cm)).value()
}

/// Area in m² of a rectangle given in centimetres.
pub fn area_m2(length_cm: f64, width_cm: f64) -> f64 {
    (Meters::from(Centimeters(length_cm)) * Meters::from(Centimeters(width_cm))).value()
}

/// Fraction of a standard sheet covering `area_m2`.
pub fn sheets_needed(area_m2: f64) -> f64 {
    sheets_for(SquareMeters(area_m2)).value()
}

/// Typed variant of [`sheets_needed`].
pub fn sheets_for(area: SquareMeters) -> Sheets {
    Sheets(area.value() / SHEET_AREA_M2)
}

/// Scale a reference quantity by the product of dimension ratios.
///
/// Used for parts whose volume is taken from a measured reference piece,
/// e.g. a 220×90 door frame or a 220×110×74 table base.
///
/// ```rust
/// use cost_core::geometry::scale_reference;
///
/// // Reference piece at its reference size
/// assert_eq!(scale_reference(0.045, &[(220.0, 220.0), (90.0, 90.0)]), 0.045);
/// ```
pub fn scale_reference(reference: f64, ratios: &[(f64, f64)]) -> f64 {
    ratios
        .iter()
        .fold(reference, |acc, (actual, reference_dim)| acc * (actual / reference_dim))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sheet_area() {
        assert!((SHEET_AREA_M2 - 2.9768).abs() < 1e-12);
    }

    #[test]
    fn test_area_m2() {
        assert_eq!(area_m2(100.0, 100.0), 1.0);
        assert!((area_m2(80.0, 220.0) - 1.76).abs() < 1e-12);
    }

    #[test]
    fn test_sheets_are_fractional() {
        let sheets = sheets_needed(1.0);
        assert!(sheets > 0.33 && sheets < 0.34);
        assert_eq!(sheets_needed(0.0), 0.0);
        assert!((sheets_needed(SHEET_AREA_M2 * 2.5) - 2.5).abs() < 1e-12);
    }

    #[test]
    fn test_scale_reference() {
        let half_height = scale_reference(0.045, &[(110.0, 220.0), (90.0, 90.0)]);
        assert!((half_height - 0.0225).abs() < 1e-12);

        // No ratios leaves the reference untouched
        assert_eq!(scale_reference(0.35, &[]), 0.35);
    }
}
