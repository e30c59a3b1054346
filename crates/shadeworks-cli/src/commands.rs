//! Command handlers. Each one loads the catalog itself and writes its report
//! to the supplied writer so tests can capture the output.

use std::io::Write;
use std::path::Path;

use anyhow::Context;
use rust_decimal::Decimal;
use shadeworks_pricing::{CatalogPolicy, SelectionState};

/// Loads the catalog and prints a one-line summary per product.
///
/// # Errors
///
/// Returns an error if the catalog cannot be read, parsed, or fails its
/// integrity checks.
pub(crate) fn run_validate(
    catalog_path: &Path,
    policy: CatalogPolicy,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    let catalog = shadeworks_core::load_catalog(catalog_path, policy)
        .with_context(|| format!("catalog {} is not usable", catalog_path.display()))?;

    writeln!(
        out,
        "catalog OK: {} products, {} categories, currency {}",
        catalog.products.len(),
        catalog.categories.len(),
        catalog.currency_code
    )?;
    for summary in shadeworks_core::list_products(&catalog, None) {
        writeln!(
            out,
            "  {:<24} {:<10} from {} {}  ({}-{} x {}-{} mm)",
            summary.id,
            summary.category,
            summary.from_price,
            summary.currency_code,
            summary.min_width_mm,
            summary.max_width_mm,
            summary.min_height_mm,
            summary.max_height_mm
        )?;
    }
    Ok(())
}

/// Prints the resolved customization steps for a product.
///
/// # Errors
///
/// Returns an error if the catalog cannot be loaded or the product is
/// unknown.
pub(crate) fn run_options(
    catalog_path: &Path,
    policy: CatalogPolicy,
    product_id: &str,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    let catalog = shadeworks_core::load_catalog(catalog_path, policy)?;
    let product = catalog.product(product_id)?;
    let categories = catalog.resolve_catalog(product_id)?;

    writeln!(out, "{} ({})", product.name, product.id)?;
    for category in categories {
        let marker = if category.required { "required" } else { "optional" };
        writeln!(out, "{} [{}] ({marker})", category.label, category.id)?;
        for option in &category.options {
            writeln!(
                out,
                "  {:<20} {:<24} {}",
                option.id,
                option.name,
                format_delta(option.price_delta)
            )?;
        }
    }
    Ok(())
}

/// Prices the selection stored in `selection_path` and prints the breakdown
/// as pretty JSON.
///
/// # Errors
///
/// Returns an error if the catalog or selection file cannot be read, or the
/// selection cannot be priced.
pub(crate) fn run_quote(
    catalog_path: &Path,
    policy: CatalogPolicy,
    product_id: &str,
    selection_path: &Path,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    let catalog = shadeworks_core::load_catalog(catalog_path, policy)?;
    let raw = std::fs::read_to_string(selection_path)
        .with_context(|| format!("failed to read selection {}", selection_path.display()))?;
    let selection: SelectionState = serde_json::from_str(&raw)
        .with_context(|| format!("invalid selection JSON in {}", selection_path.display()))?;

    let breakdown = catalog.price(product_id, &selection).map_err(|e| {
        tracing::warn!(product_id, code = e.code(), error = %e, "quote rejected");
        e
    })?;

    serde_json::to_writer_pretty(&mut *out, &breakdown)?;
    writeln!(out)?;
    Ok(())
}

fn format_delta(delta: Decimal) -> String {
    if delta.is_zero() {
        "included".to_string()
    } else if delta.is_sign_negative() {
        format!("-{}", delta.abs())
    } else {
        format!("+{delta}")
    }
}
