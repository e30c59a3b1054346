//! Shared test catalog.

use rust_decimal::Decimal;

use crate::category::{CategoryKind, CustomizationCategory, OptionStyle, PriceOption};
use crate::catalog::Catalog;
use crate::matrix::{PriceBandMatrix, SizeBand};
use crate::product::{DimensionLimits, Product};
use crate::selection::SelectionState;

pub(crate) fn band(min: i64, max: i64) -> SizeBand {
    SizeBand {
        min: Decimal::from(min),
        max: Decimal::from(max),
    }
}

pub(crate) fn plain(id: &str, name: &str, delta: i64) -> PriceOption {
    PriceOption {
        id: id.to_string(),
        name: name.to_string(),
        price_delta: Decimal::from(delta),
        style: OptionStyle::Plain { image: None },
    }
}

pub(crate) fn swatch(id: &str, name: &str, color: &str) -> PriceOption {
    PriceOption {
        id: id.to_string(),
        name: name.to_string(),
        price_delta: Decimal::ZERO,
        style: OptionStyle::Swatch {
            color: color.to_string(),
            image: None,
        },
    }
}

pub(crate) fn category(
    id: CategoryKind,
    label: &str,
    required: bool,
    options: Vec<PriceOption>,
) -> CustomizationCategory {
    CustomizationCategory {
        id,
        label: label.to_string(),
        required,
        options,
    }
}

/// Widths `[300,600)`, `[600,900)`; heights `[400,800)`, `[800,1200)`;
/// prices `[[120,150],[140,175]]`.
pub(crate) fn sample_matrix() -> PriceBandMatrix {
    PriceBandMatrix {
        width_bands: vec![band(300, 600), band(600, 900)],
        height_bands: vec![band(400, 800), band(800, 1200)],
        prices: vec![
            vec![Decimal::from(120), Decimal::from(150)],
            vec![Decimal::from(140), Decimal::from(175)],
        ],
    }
}

pub(crate) fn sample_product() -> Product {
    Product {
        id: "roller-blackout".to_string(),
        name: "Blackout Roller Blind".to_string(),
        slug: "blackout-roller-blind".to_string(),
        category: "roller".to_string(),
        base_price: Decimal::from(120),
        // Deliberately not in display order.
        customizations: vec![
            CategoryKind::Headrail,
            CategoryKind::FabricType,
            CategoryKind::Mount,
            CategoryKind::Room,
            CategoryKind::Colour,
            CategoryKind::Valance,
        ],
        dimensions: DimensionLimits {
            min_width_mm: Decimal::from(300),
            max_width_mm: Decimal::from(899),
            min_height_mm: Decimal::from(400),
            max_height_mm: Decimal::from(1199),
        },
        price_matrix: sample_matrix(),
    }
}

pub(crate) fn sample_catalog() -> Catalog {
    Catalog {
        currency_code: "USD".to_string(),
        categories: vec![
            category(
                CategoryKind::Room,
                "Room",
                false,
                vec![plain("kitchen", "Kitchen", 0), plain("bedroom", "Bedroom", 0)],
            ),
            category(
                CategoryKind::Mount,
                "Mount Type",
                true,
                vec![
                    plain("inside", "Inside Mount", 0),
                    plain("outside", "Outside Mount", 0),
                ],
            ),
            category(
                CategoryKind::FabricType,
                "Fabric",
                true,
                vec![
                    plain("light-filtering", "Light Filtering", 0),
                    plain("blockout", "Blockout", 20),
                ],
            ),
            category(
                CategoryKind::Colour,
                "Colour",
                true,
                vec![swatch("white", "Snow", "#FFFFFF"), swatch("charcoal", "Charcoal", "#36454F")],
            ),
            category(
                CategoryKind::Headrail,
                "Headrail",
                false,
                vec![
                    plain("standard", "Standard", 0),
                    plain("cassette", "Cassette", 10),
                ],
            ),
            category(
                CategoryKind::Valance,
                "Valance",
                false,
                vec![plain("fabric-wrapped", "Fabric Wrapped", 35)],
            ),
            category(
                CategoryKind::Motorization,
                "Motorization",
                false,
                vec![plain("battery", "Battery Motor", 149)],
            ),
        ],
        products: vec![sample_product()],
    }
}

/// 600 × 799 blockout with a cassette headrail: 140 + 20 + 10 = 170.
pub(crate) fn complete_selection() -> SelectionState {
    SelectionState::new()
        .with_size(Decimal::from(600), Decimal::from(799))
        .with_option("headrail", "cassette")
        .with_option("fabric-type", "blockout")
        .with_option("mount", "inside")
        .with_option("colour", "white")
}
