//! # Millwork CLI
//!
//! Command-line front end to `cost_core`: price a single item from JSON,
//! print calculator templates, inspect or edit a rate table, and summarise a
//! saved invoice.
//!
//! ```text
//! cost_cli template door > door.json
//! cost_cli price door.json --rates rates.toml
//! cost_cli rates --set labor_per_hour=180 --out rates.toml
//! cost_cli invoice INV-2025-014.json --takeoff
//! ```

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use cost_core::costing::{CalculatorKind, CostItem, CostResult};
use cost_core::file_io::{load_invoice, load_rates, save_rates};
use cost_core::invoice::Invoice;
use cost_core::materials::{FinishType, WoodSpecies};
use cost_core::rates::{RateField, RateTable, CURRENCY};
use cost_core::takeoff::summarize;

#[derive(Parser)]
#[command(name = "cost_cli", version, about = "Price custom furniture and summarise invoices", long_about = None)]
struct Cli {
    /// Log calculation details to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Price one item described by a JSON file
    Price {
        #[arg(value_name = "ITEM")]
        item: PathBuf,

        /// Rate table (TOML); built-in rates if omitted
        #[arg(short, long, value_name = "FILE")]
        rates: Option<PathBuf>,

        /// Override the solid wood species
        #[arg(long)]
        wood: Option<String>,

        /// Override the finish type
        #[arg(long)]
        finish: Option<String>,

        /// Override the profit margin (%)
        #[arg(long)]
        margin: Option<f64>,

        /// Print the full result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print default inputs for a calculator as JSON
    Template {
        /// door, seating, table, sofa or cabinet
        kind: String,
    },

    /// Show the rate table, optionally applying overrides
    Rates {
        #[arg(short, long, value_name = "FILE")]
        rates: Option<PathBuf>,

        /// Override a rate, e.g. --set labor_per_hour=180
        #[arg(long = "set", value_name = "KEY=VALUE")]
        overrides: Vec<String>,

        /// Save the resulting table (TOML)
        #[arg(short, long, value_name = "FILE")]
        out: Option<PathBuf>,
    },

    /// Print an invoice's lines and totals
    Invoice {
        #[arg(value_name = "INVOICE")]
        path: PathBuf,

        /// Also print the material take-off
        #[arg(long)]
        takeoff: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Command::Price {
            item,
            rates,
            wood,
            finish,
            margin,
            json,
        } => {
            let rates = resolve_rates(rates.as_deref())?;
            let mut cost_item = read_cost_item(&item)?;

            if let Some(wood) = wood {
                cost_item.set_wood(WoodSpecies::from_str_flexible(&wood)?)?;
            }
            if let Some(finish) = finish {
                cost_item.set_finish(FinishType::from_str_flexible(&finish)?);
            }
            if let Some(margin) = margin {
                cost_item.set_margin(margin);
            }

            let result = cost_item.price(&rates);
            if json {
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else {
                print_result(cost_item.kind(), &result);
            }
        }
        Command::Template { kind } => {
            let kind = CalculatorKind::from_str_flexible(&kind)?;
            let template = CostItem::template(kind, &RateTable::default());
            println!("{}", serde_json::to_string_pretty(&template)?);
        }
        Command::Rates {
            rates,
            overrides,
            out,
        } => {
            let mut table = resolve_rates(rates.as_deref())?;
            for entry in &overrides {
                let (field, value) = parse_override(entry)?;
                table.set(field, value);
            }
            table.validate()?;

            if let Some(out) = out {
                save_rates(&table, &out)
                    .with_context(|| format!("Failed to save rate table: {:?}", out))?;
                println!("Saved {} rates to {}", RateField::ALL.len(), out.display());
            } else {
                print_rates(&table);
            }
        }
        Command::Invoice { path, takeoff } => {
            let invoice = load_invoice(&path)
                .with_context(|| format!("Failed to load invoice: {:?}", path))?;
            print_invoice(&invoice);
            if takeoff {
                print_takeoff(&invoice);
            }
        }
    }

    Ok(())
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn resolve_rates(path: Option<&Path>) -> Result<RateTable> {
    match path {
        Some(path) => {
            load_rates(path).with_context(|| format!("Failed to load rate table: {:?}", path))
        }
        None => {
            debug!("Using built-in rate table");
            Ok(RateTable::default())
        }
    }
}

fn read_cost_item(path: &Path) -> Result<CostItem> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read item file: {:?}", path))?;
    serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse item JSON: {:?}", path))
}

/// `key=value` to a rate field and value
fn parse_override(entry: &str) -> Result<(RateField, f64)> {
    let Some((key, value)) = entry.split_once('=') else {
        bail!("Expected KEY=VALUE, got '{}'", entry);
    };
    let field = RateField::from_key(key.trim())?;
    let value: f64 = value
        .trim()
        .parse()
        .with_context(|| format!("Invalid number for {}: '{}'", key.trim(), value.trim()))?;
    Ok((field, value))
}

fn print_result(kind: CalculatorKind, result: &CostResult) {
    println!("{}", kind);
    println!("{}", "=".repeat(kind.display_name().len()));
    for component in &result.breakdown.components {
        if component.amount > 0.0 {
            println!("  {:<24} {:>12.2} {}", component.name, component.amount, CURRENCY);
        }
    }
    println!("  {:<24} {:>12.2} {}", "Material cost", result.material_cost(), CURRENCY);
    println!(
        "  {:<24} {:>12.2} {}",
        format!("Profit ({}%)", result.breakdown.margin_percent),
        result.profit(),
        CURRENCY
    );
    println!("  {:<24} {:>12.2} {}", "Selling price", result.price, CURRENCY);
    println!();
    println!("{}", result.description);
    if !result.dimensions.is_empty() {
        println!("Dimensions: {}", result.dimensions);
    }

    if let Some(materials) = &result.materials {
        println!();
        println!("Materials");
        for row in materials {
            println!("  {:<40} {:>10.3} {}", row.name, row.qty, row.unit);
        }
    }
}

fn print_rates(rates: &RateTable) {
    let mut current_group = None;
    for (field, value) in rates.iter() {
        if current_group != Some(field.group()) {
            current_group = Some(field.group());
            println!();
            println!("{}", field.group().display_name());
        }
        println!("  {:<36} {:<28} {:>10.2}", field.key(), field.label(), value);
    }
}

fn print_invoice(invoice: &Invoice) {
    println!(
        "Invoice {}  {}  {}",
        invoice.meta.invoice_no, invoice.meta.date, invoice.client.name
    );
    if !invoice.meta.project_name.is_empty() {
        println!("Project: {}", invoice.meta.project_name);
    }
    println!();

    for (index, item) in invoice.items.iter().enumerate() {
        println!(
            "{:>3}. {:<18} {:<14} {:>6} × {:>10.2} = {:>12.2}",
            index + 1,
            item.category.display_name(),
            item.code,
            item.qty,
            item.unit_price,
            item.line_total()
        );
        if !item.description.is_empty() {
            println!("     {}", item.description);
        }
        if !item.dimensions.is_empty() {
            println!("     {}", item.dimensions);
        }
    }

    let totals = invoice.totals();
    println!();
    println!("  {:<20} {:>12.2} {}", "Subtotal", totals.subtotal, CURRENCY);
    if totals.discount > 0.0 {
        println!("  {:<20} {:>12.2} {}", "Discount", -totals.discount, CURRENCY);
    }
    println!(
        "  {:<20} {:>12.2} {}",
        format!("VAT ({}%)", invoice.vat_rate_percent),
        totals.vat,
        CURRENCY
    );
    println!("  {:<20} {:>12.2} {}", "Total", totals.total, CURRENCY);
}

fn print_takeoff(invoice: &Invoice) {
    let summary = summarize(invoice);
    println!();
    println!("Material take-off");
    if summary.is_empty() {
        println!("  (no materials bills on this invoice)");
        return;
    }
    for material in summary {
        println!(
            "  {:<40} {:>10.3} {:<6} {} item(s)",
            material.name, material.total_qty, material.unit, material.usage_count
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_override() {
        let (field, value) = parse_override("labor_per_hour = 180").unwrap();
        assert_eq!(field, RateField::LaborPerHour);
        assert_eq!(value, 180.0);

        assert!(parse_override("labor_per_hour").is_err());
        assert!(parse_override("labor_per_hour=abc").is_err());
        assert!(parse_override("teak_per_m3=100").is_err());
    }

    #[test]
    fn test_cli_parses() {
        let cli = Cli::try_parse_from([
            "cost_cli", "-v", "rates", "--set", "labor_per_hour=180", "--set", "marble_per_m2=5000",
        ])
        .unwrap();
        assert!(cli.verbose);
        match cli.command {
            Command::Rates { overrides, .. } => assert_eq!(overrides.len(), 2),
            _ => panic!("expected rates command"),
        }
    }
}
