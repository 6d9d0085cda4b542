//! # cost_core - Parametric Furniture Costing Engine
//!
//! `cost_core` prices custom furniture (doors, seating, tables, sofas and
//! cabinets) from a handful of dimensions and material choices, and carries
//! the invoices those prices land on. All inputs and outputs are
//! JSON-serializable.
//!
//! ## Design Philosophy
//!
//! - **Stateless**: Calculators are pure functions of an input and a rate table
//! - **JSON-First**: All types implement Serialize/Deserialize
//! - **Rich Errors**: Structured error types, not just strings
//!
//! ## Quick Start
//!
//! ```rust
//! use cost_core::costing::door::{calculate, DoorInput};
//! use cost_core::rates::RateTable;
//!
//! let rates = RateTable::default();
//! let result = calculate(&DoorInput::with_rates(&rates), &rates);
//!
//! // Selling price = material cost + margin
//! assert!((result.price - result.material_cost() * 1.3).abs() < 1e-6);
//!
//! let json = serde_json::to_string_pretty(&result).unwrap();
//! ```
//!
//! ## Modules
//!
//! - [`costing`] - The five calculators and their shared result types
//! - [`invoice`] - Invoice container, line items and totals
//! - [`takeoff`] - Material roll-up across an invoice
//! - [`rates`] - The rate table every calculator reads
//! - [`materials`] - Material choices and their rate lookups
//! - [`geometry`] - Area, sheet and reference-scaling helpers
//! - [`units`] - Type-safe unit wrappers
//! - [`errors`] - Structured error types
//! - [`file_io`] - Invoice and rate files with atomic saves

pub mod costing;
pub mod errors;
pub mod file_io;
pub mod geometry;
pub mod invoice;
pub mod materials;
pub mod rates;
pub mod takeoff;
pub mod units;

// Re-export commonly used types at crate root for convenience
pub use costing::{CalculatorKind, CostBreakdown, CostItem, CostResult, MaterialRow};
pub use errors::{CalcError, CalcResult};
pub use file_io::{load_invoice, load_rates, save_invoice, save_rates};
pub use invoice::{Invoice, InvoiceItem, InvoiceTotals, ItemCategory};
pub use rates::{RateField, RateTable};
