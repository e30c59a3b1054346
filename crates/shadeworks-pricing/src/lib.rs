//! Pricing engine for made-to-measure blinds.
//!
//! Pure computation with no I/O: the same code prices a selection in the
//! storefront and re-checks it on the server before an order is accepted.

pub mod calculator;
pub mod cart;
pub mod catalog;
pub mod category;
pub mod error;
pub mod matrix;
pub mod product;
pub mod selection;

#[cfg(test)]
pub(crate) mod fixtures;

pub use calculator::{
    price_selection, validate_selection, verify_breakdown, PriceAdjustment, PriceBreakdown,
};
pub use cart::{Cart, CartLine, LineChange};
pub use catalog::{Catalog, CatalogPolicy, MONEY_SCALE};
pub use category::{CategoryKind, CustomizationCategory, OptionStyle, PriceOption};
pub use error::{Dimension, PricingError};
pub use matrix::{BandLookup, PriceBandMatrix, SizeBand};
pub use product::{DimensionLimits, Product};
pub use selection::SelectionState;
