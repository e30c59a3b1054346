//! Catalog document and the option catalog resolver.

use std::collections::HashSet;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculator::{price_selection, validate_selection, verify_breakdown, PriceBreakdown};
use crate::category::{is_hex_color, CategoryKind, CustomizationCategory, OptionStyle};
use crate::error::{Dimension, PricingError};
use crate::product::Product;
use crate::selection::SelectionState;

/// Money values carry at most this many decimal places.
pub const MONEY_SCALE: u32 = 2;

/// Rules applied when checking a catalog's integrity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CatalogPolicy {
    /// Permit negative option deltas (discounts). Off by default.
    pub allow_discounts: bool,
}

/// The full catalog supplied by the product data source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalog {
    #[serde(default = "default_currency")]
    pub currency_code: String,
    pub categories: Vec<CustomizationCategory>,
    pub products: Vec<Product>,
}

fn default_currency() -> String {
    "USD".to_string()
}

impl Catalog {
    /// Finds a product by id.
    ///
    /// # Errors
    ///
    /// Returns [`PricingError::NotFound`] for an unknown id.
    pub fn product(&self, product_id: &str) -> Result<&Product, PricingError> {
        self.products
            .iter()
            .find(|p| p.id == product_id)
            .ok_or_else(|| PricingError::NotFound {
                kind: "product",
                id: product_id.to_string(),
            })
    }

    #[must_use]
    pub fn category(&self, kind: CategoryKind) -> Option<&CustomizationCategory> {
        self.categories.iter().find(|c| c.id == kind)
    }

    /// Returns the categories offered for a product in display order.
    ///
    /// # Errors
    ///
    /// Returns [`PricingError::NotFound`] for an unknown product and
    /// [`PricingError::DataIntegrity`] when the product references a category
    /// that is undefined or has no options.
    pub fn resolve_catalog(
        &self,
        product_id: &str,
    ) -> Result<Vec<&CustomizationCategory>, PricingError> {
        let product = self.product(product_id)?;
        self.resolve_for(product)
    }

    pub(crate) fn resolve_for(
        &self,
        product: &Product,
    ) -> Result<Vec<&CustomizationCategory>, PricingError> {
        let mut resolved = product
            .customizations
            .iter()
            .map(|&kind| {
                let category = self.category(kind).ok_or_else(|| {
                    PricingError::DataIntegrity(format!(
                        "product '{}' references undefined category '{kind}'",
                        product.id
                    ))
                })?;
                if category.options.is_empty() {
                    return Err(PricingError::DataIntegrity(format!(
                        "category '{kind}' offered by product '{}' has no options",
                        product.id
                    )));
                }
                Ok(category)
            })
            .collect::<Result<Vec<_>, _>>()?;

        resolved.sort_by_key(|c| c.id);
        Ok(resolved)
    }

    /// Resolves the product's categories and prices the selection.
    ///
    /// # Errors
    ///
    /// See [`Self::resolve_catalog`] and [`price_selection`].
    pub fn price(
        &self,
        product_id: &str,
        selection: &SelectionState,
    ) -> Result<PriceBreakdown, PricingError> {
        let product = self.product(product_id)?;
        let categories = self.resolve_for(product)?;
        price_selection(product, &self.currency_code, &categories, selection)
    }

    /// Lists every user-facing problem with a selection.
    ///
    /// # Errors
    ///
    /// Fails only when the product itself cannot be resolved.
    pub fn selection_issues(
        &self,
        product_id: &str,
        selection: &SelectionState,
    ) -> Result<Vec<PricingError>, PricingError> {
        let product = self.product(product_id)?;
        let categories = self.resolve_for(product)?;
        Ok(validate_selection(product, &categories, selection))
    }

    /// Re-prices a selection and checks it against a submitted breakdown.
    ///
    /// # Errors
    ///
    /// See [`verify_breakdown`].
    pub fn verify(
        &self,
        product_id: &str,
        selection: &SelectionState,
        claimed: &PriceBreakdown,
    ) -> Result<PriceBreakdown, PricingError> {
        let product = self.product(product_id)?;
        let categories = self.resolve_for(product)?;
        verify_breakdown(product, &self.currency_code, &categories, selection, claimed)
    }

    /// Checks every catalog invariant. A catalog that fails must not be used
    /// for pricing.
    ///
    /// # Errors
    ///
    /// Returns the first [`PricingError::DataIntegrity`] or
    /// [`PricingError::Misconfigured`] found.
    pub fn validate(&self, policy: CatalogPolicy) -> Result<(), PricingError> {
        let code = &self.currency_code;
        if code.len() != 3 || !code.chars().all(|c| c.is_ascii_uppercase()) {
            return Err(integrity(format!(
                "currency code '{}' is not an ISO 4217 code",
                self.currency_code
            )));
        }

        let mut seen_categories = HashSet::new();
        for category in &self.categories {
            if !seen_categories.insert(category.id) {
                return Err(integrity(format!("duplicate category '{}'", category.id)));
            }
            validate_category(category, policy)?;
        }

        let mut seen_ids = HashSet::new();
        let mut seen_slugs = HashSet::new();
        for product in &self.products {
            if product.id.trim().is_empty() {
                return Err(integrity("product id must be non-empty".to_string()));
            }
            if !seen_ids.insert(product.id.as_str()) {
                return Err(integrity(format!("duplicate product id '{}'", product.id)));
            }
            if !seen_slugs.insert(product.slug.as_str()) {
                return Err(integrity(format!(
                    "duplicate product slug '{}' (from product '{}')",
                    product.slug, product.id
                )));
            }
            self.validate_product(product)?;
        }

        Ok(())
    }

    fn validate_product(&self, product: &Product) -> Result<(), PricingError> {
        let mut seen = HashSet::new();
        for kind in &product.customizations {
            if !seen.insert(*kind) {
                return Err(integrity(format!(
                    "product '{}' lists category '{kind}' more than once",
                    product.id
                )));
            }
        }
        self.resolve_for(product)?;

        check_money(&product.base_price, || format!("base price of '{}'", product.id))?;
        if product.base_price < Decimal::ZERO {
            return Err(integrity(format!(
                "product '{}' has a negative base price",
                product.id
            )));
        }

        let matrix = &product.price_matrix;
        matrix.validate()?;
        for price in matrix.prices.iter().flatten() {
            check_money(price, || format!("matrix price of '{}'", product.id))?;
            if *price <= Decimal::ZERO {
                return Err(integrity(format!(
                    "product '{}' has a non-positive matrix price {price}",
                    product.id
                )));
            }
        }

        for dimension in [Dimension::Width, Dimension::Height] {
            let (min, max) = product.dimensions.range(dimension);
            if min <= Decimal::ZERO || min > max {
                return Err(integrity(format!(
                    "product '{}' declares an invalid {dimension} range {min} to {max}",
                    product.id
                )));
            }
            // validate() above guarantees non-empty bands.
            let Some((low, high)) = matrix.domain(dimension) else {
                continue;
            };
            if min < low || max >= high {
                return Err(integrity(format!(
                    "product '{}' {dimension} range {min} to {max} is not covered by bands [{low}, {high})",
                    product.id
                )));
            }
        }

        Ok(())
    }
}

fn validate_category(
    category: &CustomizationCategory,
    policy: CatalogPolicy,
) -> Result<(), PricingError> {
    if category.options.is_empty() {
        return Err(integrity(format!(
            "category '{}' has no options",
            category.id
        )));
    }

    let mut seen = HashSet::new();
    for option in &category.options {
        if !seen.insert(option.id.as_str()) {
            return Err(integrity(format!(
                "duplicate option '{}' in category '{}'",
                option.id, category.id
            )));
        }

        check_money(&option.price_delta, || {
            format!("delta of '{}/{}'", category.id, option.id)
        })?;
        if option.price_delta < Decimal::ZERO && !policy.allow_discounts {
            return Err(integrity(format!(
                "option '{}/{}' has negative delta {} and discounts are disabled",
                category.id, option.id, option.price_delta
            )));
        }

        match &option.style {
            OptionStyle::Swatch { color, .. } if !is_hex_color(color) => {
                return Err(integrity(format!(
                    "option '{}/{}' has invalid colour '{color}'",
                    category.id, option.id
                )));
            }
            OptionStyle::Plain { .. } if category.id == CategoryKind::Colour => {
                return Err(integrity(format!(
                    "colour option '{}' has no swatch colour",
                    option.id
                )));
            }
            _ => {}
        }
    }

    Ok(())
}

fn check_money(value: &Decimal, what: impl FnOnce() -> String) -> Result<(), PricingError> {
    if value.normalize().scale() > MONEY_SCALE {
        return Err(integrity(format!(
            "{} has more than {MONEY_SCALE} decimal places: {value}",
            what()
        )));
    }
    Ok(())
}

fn integrity(message: String) -> PricingError {
    PricingError::DataIntegrity(message)
}

#[cfg(test)]
#[path = "catalog_test.rs"]
mod tests;
