//! Selection validation and total calculation.
//!
//! The same functions run in the storefront for live prices and on the
//! server when an order is submitted, so both sides always agree on the
//! total to the cent.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::category::{CategoryKind, CustomizationCategory};
use crate::error::{Dimension, PricingError};
use crate::product::Product;
use crate::selection::SelectionState;

/// One option's contribution to the price.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceAdjustment {
    pub category: CategoryKind,
    pub option_id: String,
    pub option_name: String,
    pub delta: Decimal,
}

/// Itemized result of pricing a selection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceBreakdown {
    pub product_id: String,
    pub currency_code: String,
    pub width_mm: Decimal,
    pub height_mm: Decimal,
    pub width_band: usize,
    pub height_band: usize,
    pub base_price: Decimal,
    /// In category display order.
    pub adjustments: Vec<PriceAdjustment>,
    pub total: Decimal,
}

impl PriceBreakdown {
    /// Sum of all option deltas.
    #[must_use]
    pub fn options_total(&self) -> Decimal {
        self.adjustments.iter().map(|a| a.delta).sum()
    }

    /// Whether `other` quotes the same money: same currency, same base, same
    /// ordered adjustments, same total. Labels and names are ignored.
    #[must_use]
    pub fn same_price_as(&self, other: &PriceBreakdown) -> bool {
        self.product_id == other.product_id
            && self.currency_code == other.currency_code
            && self.base_price == other.base_price
            && self.total == other.total
            && self.adjustments.len() == other.adjustments.len()
            && self
                .adjustments
                .iter()
                .zip(&other.adjustments)
                .all(|(a, b)| {
                    a.category == b.category && a.option_id == b.option_id && a.delta == b.delta
                })
    }
}

/// Prices a selection against a product and its resolved categories.
///
/// Checks run in a fixed order: required categories present, selected
/// options valid, dimensions within range. The first failure is returned.
///
/// # Errors
///
/// Returns [`PricingError::MissingSelection`], [`PricingError::NotFound`]
/// (selection names a category the product does not offer),
/// [`PricingError::InvalidOption`], or any error from the band lookup.
pub fn price_selection(
    product: &Product,
    currency_code: &str,
    categories: &[&CustomizationCategory],
    selection: &SelectionState,
) -> Result<PriceBreakdown, PricingError> {
    if let Some(err) = collect_issues(product, categories, selection).into_iter().next() {
        return Err(err);
    }

    let width_mm = selection.width_mm.ok_or_else(|| missing(Dimension::Width))?;
    let height_mm = selection.height_mm.ok_or_else(|| missing(Dimension::Height))?;
    let cell = product.lookup_band(width_mm, height_mm)?;

    let mut adjustments = Vec::new();
    for category in categories {
        let Some(option_id) = selection.chosen(category.id.as_str()) else {
            continue;
        };
        let option = category
            .option(option_id)
            .ok_or_else(|| PricingError::InvalidOption {
                category: category.id.to_string(),
                option: option_id.to_string(),
            })?;
        adjustments.push(PriceAdjustment {
            category: category.id,
            option_id: option.id.clone(),
            option_name: option.name.clone(),
            delta: option.price_delta,
        });
    }
    adjustments.sort_by_key(|a| a.category);

    let total = adjustments
        .iter()
        .try_fold(cell.price, |acc, a| acc.checked_add(a.delta))
        .ok_or_else(|| {
            PricingError::DataIntegrity(format!(
                "total for '{}' overflows the money range",
                product.id
            ))
        })?;
    if total < Decimal::ZERO {
        return Err(PricingError::DataIntegrity(format!(
            "selection for '{}' prices below zero ({total})",
            product.id
        )));
    }

    Ok(PriceBreakdown {
        product_id: product.id.clone(),
        currency_code: currency_code.to_string(),
        width_mm,
        height_mm,
        width_band: cell.width_band,
        height_band: cell.height_band,
        base_price: cell.price,
        adjustments,
        total,
    })
}

/// Returns every problem with a selection instead of stopping at the first,
/// so a form can highlight all offending fields at once.
///
/// Band-lookup failures other than out-of-range dimensions are catalog
/// problems and are reported as well.
#[must_use]
pub fn validate_selection(
    product: &Product,
    categories: &[&CustomizationCategory],
    selection: &SelectionState,
) -> Vec<PricingError> {
    let mut issues = collect_issues(product, categories, selection);
    if let (Some(w), Some(h)) = (selection.width_mm, selection.height_mm) {
        for (dimension, value) in [(Dimension::Width, w), (Dimension::Height, h)] {
            if let Err(err) = product.dimensions.check(dimension, value) {
                issues.push(err);
            }
        }
        if issues.is_empty() {
            if let Err(err) = product.lookup_band(w, h) {
                issues.push(err);
            }
        }
    }
    issues
}

/// Re-prices a selection and compares it with a breakdown submitted by a
/// client.
///
/// # Errors
///
/// Returns any pricing error for the selection, or
/// [`PricingError::PriceMismatch`] when the submitted breakdown differs.
pub fn verify_breakdown(
    product: &Product,
    currency_code: &str,
    categories: &[&CustomizationCategory],
    selection: &SelectionState,
    claimed: &PriceBreakdown,
) -> Result<PriceBreakdown, PricingError> {
    let computed = price_selection(product, currency_code, categories, selection)?;
    if !computed.same_price_as(claimed) {
        return Err(PricingError::PriceMismatch {
            expected: computed.total,
            claimed: claimed.total,
        });
    }
    Ok(computed)
}

/// Completeness checks first, then referential checks, each in display
/// order.
fn collect_issues(
    product: &Product,
    categories: &[&CustomizationCategory],
    selection: &SelectionState,
) -> Vec<PricingError> {
    let mut issues = Vec::new();

    let mut ordered: Vec<&CustomizationCategory> = categories.to_vec();
    ordered.sort_by_key(|c| c.id);

    // Dimensions sit between mount and fabric in display order.
    let mut dimensions_checked = false;
    for category in &ordered {
        if !dimensions_checked && category.id > CategoryKind::Mount {
            missing_dimensions(selection, &mut issues);
            dimensions_checked = true;
        }
        if category.required && selection.chosen(category.id.as_str()).is_none() {
            issues.push(PricingError::MissingSelection {
                category: category.id.to_string(),
            });
        }
    }
    if !dimensions_checked {
        missing_dimensions(selection, &mut issues);
    }

    for category in &ordered {
        if let Some(option_id) = selection.chosen(category.id.as_str()) {
            if category.option(option_id).is_none() {
                issues.push(PricingError::InvalidOption {
                    category: category.id.to_string(),
                    option: option_id.to_string(),
                });
            }
        }
    }

    for category_id in selection.options.keys() {
        let offered = CategoryKind::parse(category_id)
            .is_some_and(|kind| product.offers(kind) && ordered.iter().any(|c| c.id == kind));
        if !offered {
            issues.push(PricingError::NotFound {
                kind: "category",
                id: category_id.clone(),
            });
        }
    }

    issues
}

fn missing_dimensions(selection: &SelectionState, issues: &mut Vec<PricingError>) {
    for (dimension, value) in [
        (Dimension::Width, selection.width_mm),
        (Dimension::Height, selection.height_mm),
    ] {
        if value.is_none() {
            issues.push(missing(dimension));
        }
    }
}

fn missing(dimension: Dimension) -> PricingError {
    PricingError::MissingSelection {
        category: dimension.to_string(),
    }
}

#[cfg(test)]
#[path = "calculator_test.rs"]
mod tests;
