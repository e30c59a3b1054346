use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use shadeworks_pricing::{Catalog, CategoryKind, Product};

/// Listing view of a product: what a grid or search result needs, without
/// the price matrix.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductSummary {
    pub id: String,
    pub name: String,
    /// URL slug, e.g. `"blackout-roller-blind"`.
    pub slug: String,
    /// Product family, e.g. `"roller"`.
    pub category: String,
    /// Listing ("from") price.
    pub from_price: Decimal,
    /// Cheapest cell of the size matrix, the lowest price any size can reach.
    pub min_size_price: Option<Decimal>,
    pub currency_code: String,
    pub customizations: Vec<CategoryKind>,
    pub min_width_mm: Decimal,
    pub max_width_mm: Decimal,
    pub min_height_mm: Decimal,
    pub max_height_mm: Decimal,
}

impl ProductSummary {
    #[must_use]
    pub fn from_product(product: &Product, currency_code: &str) -> Self {
        let mut customizations = product.customizations.clone();
        customizations.sort();
        Self {
            id: product.id.clone(),
            name: product.name.clone(),
            slug: product.slug.clone(),
            category: product.category.clone(),
            from_price: product.base_price,
            min_size_price: product.price_matrix.min_price(),
            currency_code: currency_code.to_string(),
            customizations,
            min_width_mm: product.dimensions.min_width_mm,
            max_width_mm: product.dimensions.max_width_mm,
            min_height_mm: product.dimensions.min_height_mm,
            max_height_mm: product.dimensions.max_height_mm,
        }
    }

    /// Returns `true` if the product can be motorized.
    #[must_use]
    pub fn is_motorizable(&self) -> bool {
        self.customizations.contains(&CategoryKind::Motorization)
    }
}

/// Summaries for every product, optionally filtered by product family.
#[must_use]
pub fn list_products(catalog: &Catalog, family: Option<&str>) -> Vec<ProductSummary> {
    catalog
        .products
        .iter()
        .filter(|p| family.is_none_or(|f| p.category.eq_ignore_ascii_case(f)))
        .map(|p| ProductSummary::from_product(p, &catalog.currency_code))
        .collect()
}

/// Finds a product by its URL slug.
#[must_use]
pub fn find_by_slug<'a>(catalog: &'a Catalog, slug: &str) -> Option<&'a Product> {
    catalog.products.iter().find(|p| p.slug == slug)
}
