//! # Materials
//!
//! Material selections offered for each furniture category, with display
//! labels and lookups into a [`RateTable`](crate::rates::RateTable).
//!
//! ## Material Groups
//!
//! - **Solid wood**: bought by volume (m³)
//! - **Sheet goods**: MDF, blockboard, plywood and foamboard, bought per sheet
//! - **Surfaces**: veneers (per m²), HPL / LPL laminates (per sheet), finishes (per m²)
//! - **Tops and glass**: marble and glass, cut to size (per m²)
//! - **Upholstery**: per piece for seats, per metre for sofas, fabric per metre
//!
//! ## Example
//!
//! ```rust
//! use cost_core::materials::{Facing, WoodSpecies};
//! use cost_core::rates::RateTable;
//!
//! let rates = RateTable::default();
//! assert_eq!(WoodSpecies::Aro.rate_per_m3(&rates), 85000.0);
//!
//! // Veneer is priced by area
//! assert_eq!(Facing::Oak.cost(1.0, &rates), 210.0);
//! ```

pub mod panels;
pub mod surface;
pub mod upholstery;
pub mod wood;

pub use panels::{BoardMaterial, GlassType, LegMaterial, PlyThickness, TopMaterial};
pub use surface::{Facing, FinishType, VeneerSpecies};
pub use upholstery::{
    fabric_fragment, DetailLevel, FabricGrade, SeatItemType, SofaShape, SofaUpholstery, Upholstery,
};
pub use wood::WoodSpecies;

/// `Veneer: Oak veneer`, or `Veneer: none`
pub(crate) fn veneer_fragment(veneer: Option<VeneerSpecies>) -> String {
    match veneer {
        Some(species) => format!("Veneer: {}", species),
        None => "Veneer: none".to_string(),
    }
}
