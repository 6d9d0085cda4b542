//! # File I/O Module
//!
//! Handles invoice and rate table files:
//! - **Atomic saves**: Write to .tmp, sync, rename to prevent corruption
//! - **Version validation**: Ensure invoice schema compatibility
//! - **Rate validation**: Loaded rate tables are checked before use
//!
//! ## File Formats
//!
//! Invoices are saved as JSON. Rate tables are TOML; keys left out of a
//! rate file keep their built-in values.
//!
//! ## Example
//!
//! ```rust,no_run
//! use cost_core::file_io::{load_invoice, load_rates, save_invoice};
//! use cost_core::invoice::Invoice;
//! use std::path::Path;
//!
//! let rates = load_rates(Path::new("rates.toml"))?;
//! let invoice = Invoice::new("INV-2025-014");
//! save_invoice(&invoice, Path::new("INV-2025-014.json"))?;
//!
//! let loaded = load_invoice(Path::new("INV-2025-014.json"))?;
//! # Ok::<(), cost_core::errors::CalcError>(())
//! ```

use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

use tracing::{debug, info};

use crate::errors::{CalcError, CalcResult};
use crate::invoice::{Invoice, SCHEMA_VERSION};
use crate::rates::RateTable;

/// Save an invoice with atomic write semantics.
///
/// The save process:
/// 1. Serialize invoice to JSON
/// 2. Write to a temporary file (.tmp)
/// 3. Sync to disk (fsync)
/// 4. Rename .tmp over the target
///
/// # Example
///
/// ```rust,no_run
/// use cost_core::file_io::save_invoice;
/// use cost_core::invoice::Invoice;
/// use std::path::Path;
///
/// let invoice = Invoice::new("INV-1");
/// save_invoice(&invoice, Path::new("INV-1.json"))?;
/// # Ok::<(), cost_core::errors::CalcError>(())
/// ```
pub fn save_invoice(invoice: &Invoice, path: &Path) -> CalcResult<()> {
    let json =
        serde_json::to_string_pretty(invoice).map_err(|e| CalcError::serialization(e.to_string()))?;

    write_atomic(path, json.as_bytes())?;
    info!(
        path = %path.display(),
        invoice_no = %invoice.meta.invoice_no,
        items = invoice.item_count(),
        "Saved invoice"
    );
    Ok(())
}

/// Load an invoice from a file.
///
/// # Returns
///
/// * `Ok(Invoice)` - Successfully loaded invoice
/// * `Err(CalcError::VersionMismatch)` - File version is incompatible
/// * `Err(CalcError::SerializationError)` - Invalid JSON
/// * `Err(CalcError::FileError)` - I/O error
pub fn load_invoice(path: &Path) -> CalcResult<Invoice> {
    let contents = read_to_string(path)?;

    let invoice: Invoice = serde_json::from_str(&contents).map_err(|e| {
        CalcError::serialization(format!("Invalid JSON in {}: {}", path.display(), e))
    })?;

    validate_version(&invoice.meta.version)?;

    debug!(
        path = %path.display(),
        version = %invoice.meta.version,
        items = invoice.item_count(),
        "Loaded invoice"
    );
    Ok(invoice)
}

/// Load a rate table from TOML.
///
/// Missing keys take their default values; unknown keys are rejected. The
/// table is validated before it is returned.
///
/// ```rust,no_run
/// use cost_core::file_io::load_rates;
/// use std::path::Path;
///
/// let rates = load_rates(Path::new("rates.toml"))?;
/// println!("Labor: {} EGP/h", rates.labor_per_hour);
/// # Ok::<(), cost_core::errors::CalcError>(())
/// ```
pub fn load_rates(path: &Path) -> CalcResult<RateTable> {
    let contents = read_to_string(path)?;

    let rates: RateTable = toml::from_str(&contents).map_err(|e| {
        CalcError::serialization(format!("Invalid rate table in {}: {}", path.display(), e))
    })?;
    rates.validate()?;

    debug!(path = %path.display(), "Loaded rate table");
    Ok(rates)
}

/// Save a rate table as TOML (atomic).
pub fn save_rates(rates: &RateTable, path: &Path) -> CalcResult<()> {
    rates.validate()?;
    let contents =
        toml::to_string_pretty(rates).map_err(|e| CalcError::serialization(e.to_string()))?;

    write_atomic(path, contents.as_bytes())?;
    info!(path = %path.display(), "Saved rate table");
    Ok(())
}

fn read_to_string(path: &Path) -> CalcResult<String> {
    fs::read_to_string(path)
        .map_err(|e| CalcError::file_error("read", path.display().to_string(), e.to_string()))
}

/// Write `.tmp` next to `path`, sync it, then rename it into place.
fn write_atomic(path: &Path, bytes: &[u8]) -> CalcResult<()> {
    let tmp_path = tmp_path_for(path);

    let mut tmp_file = File::create(&tmp_path).map_err(|e| {
        CalcError::file_error("create temp file", tmp_path.display().to_string(), e.to_string())
    })?;

    tmp_file.write_all(bytes).map_err(|e| {
        CalcError::file_error("write temp file", tmp_path.display().to_string(), e.to_string())
    })?;

    tmp_file.sync_all().map_err(|e| {
        CalcError::file_error("sync temp file", tmp_path.display().to_string(), e.to_string())
    })?;

    fs::rename(&tmp_path, path).map_err(|e| {
        let _ = fs::remove_file(&tmp_path);
        CalcError::file_error("rename to final", path.display().to_string(), e.to_string())
    })?;

    Ok(())
}

/// `invoice.json` -> `invoice.json.tmp`
fn tmp_path_for(path: &Path) -> std::path::PathBuf {
    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    tmp.into()
}

/// Validate that a file version is compatible with the current schema.
fn validate_version(file_version: &str) -> CalcResult<()> {
    let mismatch = || CalcError::VersionMismatch {
        file_version: file_version.to_string(),
        expected_version: SCHEMA_VERSION.to_string(),
    };

    let file_parts: Vec<u32> = file_version
        .split('.')
        .filter_map(|p| p.parse().ok())
        .collect();
    let current_parts: Vec<u32> = SCHEMA_VERSION
        .split('.')
        .filter_map(|p| p.parse().ok())
        .collect();

    if file_parts.is_empty() || current_parts.is_empty() {
        return Err(mismatch());
    }

    // Major version must match
    if file_parts[0] != current_parts[0] {
        return Err(mismatch());
    }

    // In 0.x a newer minor may break us
    if current_parts[0] == 0 && file_parts.len() > 1 && current_parts.len() > 1 {
        if file_parts[1] > current_parts[1] {
            return Err(mismatch());
        }
    }

    Ok(())
}
