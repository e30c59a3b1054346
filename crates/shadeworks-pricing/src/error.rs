use rust_decimal::Decimal;
use thiserror::Error;

/// Which dimension of a blind a value refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dimension {
    Width,
    Height,
}

impl std::fmt::Display for Dimension {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Dimension::Width => write!(f, "width"),
            Dimension::Height => write!(f, "height"),
        }
    }
}

/// Errors produced while resolving a catalog or pricing a selection.
///
/// Variants split into two families: problems the buyer can fix by changing
/// their selection (see [`PricingError::is_user_correctable`]) and problems
/// with the catalog itself, which must block checkout.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PricingError {
    #[error("{kind} not found: {id}")]
    NotFound { kind: &'static str, id: String },

    #[error("catalog integrity violation: {0}")]
    DataIntegrity(String),

    #[error("price matrix has no cell for width band {width_band}, height band {height_band}")]
    Misconfigured {
        width_band: usize,
        height_band: usize,
    },

    #[error("{dimension} {value}mm is outside the supported range {min}mm to {max}mm")]
    OutOfRange {
        dimension: Dimension,
        value: Decimal,
        min: Decimal,
        max: Decimal,
    },

    #[error("missing required selection for '{category}'")]
    MissingSelection { category: String },

    #[error("option '{option}' is not available for '{category}'")]
    InvalidOption { category: String, option: String },

    #[error("submitted total {claimed} does not match computed total {expected}")]
    PriceMismatch { expected: Decimal, claimed: Decimal },
}

impl PricingError {
    /// `true` when the buyer can resolve the error by editing their selection,
    /// including a selection key for a category the product does not offer.
    ///
    /// Integrity and configuration failures return `false`: the catalog is
    /// broken and no price may be quoted from it.
    #[must_use]
    pub fn is_user_correctable(&self) -> bool {
        matches!(
            self,
            PricingError::OutOfRange { .. }
                | PricingError::MissingSelection { .. }
                | PricingError::InvalidOption { .. }
                | PricingError::NotFound {
                    kind: "category",
                    ..
                }
        )
    }

    /// Stable machine-readable code, used in API error bodies.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            PricingError::NotFound { .. } => "not_found",
            PricingError::DataIntegrity(_) | PricingError::Misconfigured { .. } => {
                "catalog_integrity"
            }
            PricingError::OutOfRange { .. } => "out_of_range",
            PricingError::MissingSelection { .. } => "missing_selection",
            PricingError::InvalidOption { .. } => "invalid_option",
            PricingError::PriceMismatch { .. } => "price_mismatch",
        }
    }

    /// The selection field the error points at, if any.
    #[must_use]
    pub fn field(&self) -> Option<String> {
        match self {
            PricingError::OutOfRange { dimension, .. } => Some(dimension.to_string()),
            PricingError::MissingSelection { category }
            | PricingError::InvalidOption { category, .. } => Some(category.clone()),
            PricingError::NotFound {
                kind: "category",
                id,
            } => Some(id.clone()),
            _ => None,
        }
    }
}
