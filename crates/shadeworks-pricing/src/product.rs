use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::category::CategoryKind;
use crate::error::{Dimension, PricingError};
use crate::matrix::{BandLookup, PriceBandMatrix};

/// Inclusive size limits a product can be manufactured in, in millimetres.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DimensionLimits {
    pub min_width_mm: Decimal,
    pub max_width_mm: Decimal,
    pub min_height_mm: Decimal,
    pub max_height_mm: Decimal,
}

impl DimensionLimits {
    #[must_use]
    pub fn range(&self, dimension: Dimension) -> (Decimal, Decimal) {
        match dimension {
            Dimension::Width => (self.min_width_mm, self.max_width_mm),
            Dimension::Height => (self.min_height_mm, self.max_height_mm),
        }
    }

    /// Checks that `value` is positive and inside the declared range.
    ///
    /// # Errors
    ///
    /// Returns [`PricingError::OutOfRange`] otherwise.
    pub fn check(&self, dimension: Dimension, value: Decimal) -> Result<(), PricingError> {
        let (min, max) = self.range(dimension);
        if value <= Decimal::ZERO || value < min || value > max {
            return Err(PricingError::OutOfRange {
                dimension,
                value,
                min,
                max,
            });
        }
        Ok(())
    }
}

/// A made-to-measure blind as listed in the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: String,
    pub name: String,
    /// URL slug, e.g. `"blackout-roller-blind"`.
    pub slug: String,
    /// Product family, e.g. `"roller"` or `"venetian"`.
    pub category: String,
    /// Listing price shown before the buyer enters a size.
    pub base_price: Decimal,
    /// Customization categories offered for this product, by id.
    pub customizations: Vec<CategoryKind>,
    pub dimensions: DimensionLimits,
    pub price_matrix: PriceBandMatrix,
}

impl Product {
    /// Looks up the banded base price after checking the product's declared
    /// size limits.
    ///
    /// # Errors
    ///
    /// Returns [`PricingError::OutOfRange`] when a dimension is non-positive,
    /// outside the declared limits, or outside the matrix domain, and
    /// [`PricingError::Misconfigured`] for a missing matrix cell.
    pub fn lookup_base_price(
        &self,
        width_mm: Decimal,
        height_mm: Decimal,
    ) -> Result<Decimal, PricingError> {
        self.lookup_band(width_mm, height_mm).map(|cell| cell.price)
    }

    pub(crate) fn lookup_band(
        &self,
        width_mm: Decimal,
        height_mm: Decimal,
    ) -> Result<BandLookup, PricingError> {
        self.dimensions.check(Dimension::Width, width_mm)?;
        self.dimensions.check(Dimension::Height, height_mm)?;
        self.price_matrix.lookup(width_mm, height_mm)
    }

    #[must_use]
    pub fn offers(&self, kind: CategoryKind) -> bool {
        self.customizations.contains(&kind)
    }
}
