use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The customization categories a blind can offer.
///
/// Variant order is the fixed display order: sorting by `CategoryKind`
/// yields room → mount → fabric → colour → headrail → control →
/// valance → bottom bar → motorization → wand position. Dimensions sit
/// between mount and fabric but are not an option category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CategoryKind {
    Room,
    Mount,
    FabricType,
    Colour,
    Headrail,
    ControlType,
    Valance,
    BottomBar,
    Motorization,
    WandPosition,
}

impl CategoryKind {
    pub const ALL: [CategoryKind; 10] = [
        CategoryKind::Room,
        CategoryKind::Mount,
        CategoryKind::FabricType,
        CategoryKind::Colour,
        CategoryKind::Headrail,
        CategoryKind::ControlType,
        CategoryKind::Valance,
        CategoryKind::BottomBar,
        CategoryKind::Motorization,
        CategoryKind::WandPosition,
    ];

    /// Identifier used in catalog documents and selection maps.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            CategoryKind::Room => "room",
            CategoryKind::Mount => "mount",
            CategoryKind::FabricType => "fabric-type",
            CategoryKind::Colour => "colour",
            CategoryKind::Headrail => "headrail",
            CategoryKind::ControlType => "control-type",
            CategoryKind::Valance => "valance",
            CategoryKind::BottomBar => "bottom-bar",
            CategoryKind::Motorization => "motorization",
            CategoryKind::WandPosition => "wand-position",
        }
    }

    /// Parses a catalog/selection identifier. Returns `None` for unknown ids.
    #[must_use]
    pub fn parse(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.as_str() == id)
    }
}

impl std::fmt::Display for CategoryKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How an option is presented to the buyer.
///
/// Colour categories only accept [`OptionStyle::Swatch`], so a colour option
/// always carries a colour value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "style", rename_all = "snake_case")]
pub enum OptionStyle {
    Plain {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        image: Option<String>,
    },
    Swatch {
        /// `#RRGGBB` or `#RGB`.
        color: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        image: Option<String>,
    },
}

impl OptionStyle {
    #[must_use]
    pub fn image(&self) -> Option<&str> {
        match self {
            OptionStyle::Plain { image } | OptionStyle::Swatch { image, .. } => image.as_deref(),
        }
    }

    #[must_use]
    pub fn color(&self) -> Option<&str> {
        match self {
            OptionStyle::Swatch { color, .. } => Some(color),
            OptionStyle::Plain { .. } => None,
        }
    }
}

/// A selectable option within a [`CustomizationCategory`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceOption {
    /// Unique within its category.
    pub id: String,
    pub name: String,
    /// Additive price change, e.g. `"20.00"`.
    pub price_delta: Decimal,
    #[serde(flatten)]
    pub style: OptionStyle,
}

/// One customization step, e.g. "Mount Type", with its options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomizationCategory {
    pub id: CategoryKind,
    pub label: String,
    #[serde(default = "default_required")]
    pub required: bool,
    pub options: Vec<PriceOption>,
}

fn default_required() -> bool {
    true
}

impl CustomizationCategory {
    /// Finds an option by id.
    #[must_use]
    pub fn option(&self, option_id: &str) -> Option<&PriceOption> {
        self.options.iter().find(|o| o.id == option_id)
    }
}

/// Returns `true` for `#RGB` or `#RRGGBB` hex colours.
#[must_use]
pub fn is_hex_color(value: &str) -> bool {
    value.strip_prefix('#').is_some_and(|hex| {
        matches!(hex.len(), 3 | 6) && hex.chars().all(|c| c.is_ascii_hexdigit())
    })
}
