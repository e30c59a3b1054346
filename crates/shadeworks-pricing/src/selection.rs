use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A buyer's choices for one blind.
///
/// Everything is referenced by identifier so a selection survives catalog
/// reloads and can be attached to a cart line or sent to the server as-is.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionState {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width_mm: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height_mm: Option<Decimal>,
    /// Category id (e.g. `"mount"`) to chosen option id.
    #[serde(default)]
    pub options: BTreeMap<String, String>,
    /// Free-text blind name, e.g. `"Kitchen left"` for multi-blind orders.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl SelectionState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_size(mut self, width_mm: Decimal, height_mm: Decimal) -> Self {
        self.width_mm = Some(width_mm);
        self.height_mm = Some(height_mm);
        self
    }

    #[must_use]
    pub fn with_option(mut self, category: impl Into<String>, option: impl Into<String>) -> Self {
        self.options.insert(category.into(), option.into());
        self
    }

    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Records a choice, replacing any earlier choice for the category.
    pub fn select(&mut self, category: impl Into<String>, option: impl Into<String>) {
        self.options.insert(category.into(), option.into());
    }

    /// Clears a choice. Returns the option id that was selected, if any.
    pub fn deselect(&mut self, category: &str) -> Option<String> {
        self.options.remove(category)
    }

    #[must_use]
    pub fn chosen(&self, category: &str) -> Option<&str> {
        self.options.get(category).map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn select_replaces_previous_choice() {
        let mut selection = SelectionState::new().with_option("mount", "inside");
        selection.select("mount", "outside");
        assert_eq!(selection.chosen("mount"), Some("outside"));
        assert_eq!(selection.options.len(), 1);
    }

    #[test]
    fn deselect_returns_removed_option() {
        let mut selection = SelectionState::new().with_option("valance", "fabric-wrapped");
        assert_eq!(selection.deselect("valance").as_deref(), Some("fabric-wrapped"));
        assert!(selection.chosen("valance").is_none());
    }

    #[test]
    fn deserializes_minimal_json() {
        let selection: SelectionState = serde_json::from_str(
            r#"{"width_mm": 600, "height_mm": "799.5", "options": {"mount": "inside"}}"#,
        )
        .expect("deserialize");
        assert_eq!(selection.width_mm, Some(Decimal::from(600)));
        assert_eq!(selection.height_mm, Some(Decimal::new(7995, 1)));
        assert_eq!(selection.chosen("mount"), Some("inside"));
        assert!(selection.label.is_none());
    }
}
