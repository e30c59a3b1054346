//! Session-scoped cart of priced blinds.
//!
//! The cart is an ordinary value owned by whoever holds the session; it is
//! passed to the code that needs it rather than living in a global.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculator::PriceBreakdown;
use crate::catalog::Catalog;
use crate::error::PricingError;
use crate::selection::SelectionState;

/// One customized blind in the cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    pub id: u64,
    pub product_id: String,
    pub selection: SelectionState,
    pub quantity: u32,
    pub breakdown: PriceBreakdown,
    /// Set when the selection no longer prices against the current catalog.
    #[serde(default)]
    pub stale: bool,
}

impl CartLine {
    /// `total × quantity`.
    ///
    /// # Errors
    ///
    /// Returns [`PricingError::DataIntegrity`] when the product does not fit
    /// the money range.
    pub fn line_total(&self) -> Result<Decimal, PricingError> {
        self.breakdown
            .total
            .checked_mul(Decimal::from(self.quantity))
            .ok_or_else(|| money_overflow(self.id))
    }
}

/// What happened to a line when the cart was repriced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineChange {
    Repriced {
        line_id: u64,
        previous: Decimal,
        current: Decimal,
    },
    Invalid {
        line_id: u64,
        error: PricingError,
    },
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cart {
    lines: Vec<CartLine>,
    next_line_id: u64,
}

impl Cart {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Prices the selection and appends it as a new line.
    ///
    /// # Errors
    ///
    /// Returns the pricing error when the selection does not price, and
    /// [`PricingError::InvalidOption`] naming `quantity` for a zero quantity.
    pub fn add(
        &mut self,
        catalog: &Catalog,
        product_id: &str,
        selection: SelectionState,
        quantity: u32,
    ) -> Result<&CartLine, PricingError> {
        if quantity == 0 {
            return Err(PricingError::InvalidOption {
                category: "quantity".to_string(),
                option: quantity.to_string(),
            });
        }
        let breakdown = catalog.price(product_id, &selection)?;

        self.next_line_id += 1;
        self.lines.push(CartLine {
            id: self.next_line_id,
            product_id: product_id.to_string(),
            selection,
            quantity,
            breakdown,
            stale: false,
        });
        let idx = self.lines.len() - 1;
        Ok(&self.lines[idx])
    }

    /// Sets a line's quantity. A quantity of zero removes the line.
    ///
    /// # Errors
    ///
    /// Returns [`PricingError::NotFound`] for an unknown line.
    pub fn set_quantity(&mut self, line_id: u64, quantity: u32) -> Result<(), PricingError> {
        if quantity == 0 {
            return self.remove(line_id).map(|_| ());
        }
        let line = self
            .lines
            .iter_mut()
            .find(|l| l.id == line_id)
            .ok_or_else(|| line_not_found(line_id))?;
        line.quantity = quantity;
        Ok(())
    }

    /// Removes a line and returns it.
    ///
    /// # Errors
    ///
    /// Returns [`PricingError::NotFound`] for an unknown line.
    pub fn remove(&mut self, line_id: u64) -> Result<CartLine, PricingError> {
        let idx = self
            .lines
            .iter()
            .position(|l| l.id == line_id)
            .ok_or_else(|| line_not_found(line_id))?;
        Ok(self.lines.remove(idx))
    }

    /// Sum of `total × quantity` over all lines.
    ///
    /// # Errors
    ///
    /// Returns [`PricingError::DataIntegrity`] when the sum does not fit the
    /// money range.
    pub fn subtotal(&self) -> Result<Decimal, PricingError> {
        self.lines.iter().try_fold(Decimal::ZERO, |acc, line| {
            acc.checked_add(line.line_total()?)
                .ok_or_else(|| money_overflow(line.id))
        })
    }

    /// Re-prices every line against `catalog`, typically after a catalog
    /// reload. Lines that no longer price keep their previous breakdown and
    /// are marked stale.
    pub fn reprice(&mut self, catalog: &Catalog) -> Vec<LineChange> {
        let mut changes = Vec::new();
        for line in &mut self.lines {
            match catalog.price(&line.product_id, &line.selection) {
                Ok(breakdown) => {
                    line.stale = false;
                    if breakdown.total != line.breakdown.total {
                        changes.push(LineChange::Repriced {
                            line_id: line.id,
                            previous: line.breakdown.total,
                            current: breakdown.total,
                        });
                    }
                    line.breakdown = breakdown;
                }
                Err(error) => {
                    line.stale = true;
                    changes.push(LineChange::Invalid {
                        line_id: line.id,
                        error,
                    });
                }
            }
        }
        changes
    }

    /// A cart can be checked out when it has lines and none are stale.
    #[must_use]
    pub fn is_checkout_ready(&self) -> bool {
        !self.lines.is_empty() && self.lines.iter().all(|l| !l.stale)
    }
}

fn money_overflow(line_id: u64) -> PricingError {
    PricingError::DataIntegrity(format!("cart line {line_id} overflows the money range"))
}

fn line_not_found(line_id: u64) -> PricingError {
    PricingError::NotFound {
        kind: "cart line",
        id: line_id.to_string(),
    }
}
