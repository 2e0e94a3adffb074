//! Cart and line item types.

use crate::catalog::Product;
use crate::checkout::PurchaseItem;
use crate::error::CommerceError;
use crate::ids::ProductId;
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// The shopping cart: an ordered list with at most one line per product.
///
/// Lines are addressed by position, matching the controls rendered for them.
/// Every operation either applies fully or leaves the cart untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    /// Create an empty cart.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `requested` units of a catalog product.
    ///
    /// Returns the position of the affected line. Returns an error if:
    /// - `requested` is below one
    /// - `requested` exceeds the product's stock
    ///
    /// An existing line for the product grows by `requested`, clamped to the
    /// product's current stock, and takes that stock as its new snapshot.
    pub fn add(&mut self, product: &Product, requested: i64) -> Result<usize, CommerceError> {
        if requested < 1 {
            return Err(CommerceError::InvalidQuantity(requested.to_string()));
        }
        if requested > product.stock {
            return Err(CommerceError::InsufficientStock {
                requested,
                stock: product.stock,
            });
        }

        if let Some(index) = self.position(product.product_id) {
            let line = &mut self.lines[index];
            line.stock = product.stock;
            line.quantity = line.quantity.saturating_add(requested).min(line.stock);
            return Ok(index);
        }

        self.lines.push(CartLine {
            product_id: product.product_id,
            name: product.name.clone(),
            price: product.price,
            quantity: requested,
            stock: product.stock,
        });
        Ok(self.lines.len() - 1)
    }

    /// Remove the line at `index`. Returns `None` if there is no such line.
    pub fn remove(&mut self, index: usize) -> Option<CartLine> {
        if index < self.lines.len() {
            Some(self.lines.remove(index))
        } else {
            None
        }
    }

    /// Raise the quantity at `index` by one, up to the line's stock.
    ///
    /// Returns the resulting quantity, or `None` if there is no such line.
    pub fn increment(&mut self, index: usize) -> Option<i64> {
        let line = self.lines.get_mut(index)?;
        line.quantity = line.quantity.saturating_add(1).min(line.stock);
        Some(line.quantity)
    }

    /// Lower the quantity at `index` by one, down to 1.
    ///
    /// Returns the resulting quantity, or `None` if there is no such line.
    pub fn decrement(&mut self, index: usize) -> Option<i64> {
        let line = self.lines.get_mut(index)?;
        line.quantity = (line.quantity - 1).max(1);
        Some(line.quantity)
    }

    /// Remove every line.
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Lines in display order.
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Get the line for a product.
    pub fn line_for(&self, product_id: ProductId) -> Option<&CartLine> {
        self.lines.iter().find(|l| l.product_id == product_id)
    }

    /// Number of lines.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Check if the cart is empty.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Total units across all lines.
    pub fn item_count(&self) -> i64 {
        self.lines.iter().map(|l| l.quantity).sum()
    }

    /// Sum of line totals. Saturates instead of overflowing.
    pub fn total(&self) -> Money {
        self.lines
            .iter()
            .fold(Money::zero(), |acc, line| acc + line.line_total())
    }

    /// `{product_id, quantity}` pairs for the purchase payload.
    pub fn purchase_items(&self) -> Vec<PurchaseItem> {
        self.lines
            .iter()
            .map(|l| PurchaseItem {
                product_id: l.product_id,
                quantity: l.quantity,
            })
            .collect()
    }

    fn position(&self, product_id: ProductId) -> Option<usize> {
        self.lines.iter().position(|l| l.product_id == product_id)
    }
}

/// One aggregated cart entry for a single product.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CartLine {
    /// Product being purchased.
    pub product_id: ProductId,
    /// Product name, captured when first added.
    pub name: String,
    /// Unit price, captured when first added.
    pub price: Money,
    /// Quantity, always within `[1, stock]`.
    pub quantity: i64,
    /// Stock snapshot used to clamp local edits.
    pub stock: i64,
}

impl CartLine {
    /// Unit price times quantity.
    pub fn line_total(&self) -> Money {
        self.price * self.quantity
    }
}

/// Parse the text of a quantity input.
///
/// Surrounding whitespace is ignored; anything else that is not a base-10
/// integer is rejected. Range checks happen in [`Cart::add`].
pub fn parse_quantity(raw: &str) -> Result<i64, CommerceError> {
    raw.trim()
        .parse::<i64>()
        .map_err(|_| CommerceError::InvalidQuantity(raw.to_string()))
}
