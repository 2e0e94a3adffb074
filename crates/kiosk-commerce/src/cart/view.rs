//! Render projection of the cart.

use crate::cart::Cart;
use crate::ids::ProductId;
use crate::markup::escape_html;
use serde::{Deserialize, Serialize};

/// Placeholder shown in place of the line list when the cart is empty.
pub const EMPTY_CART_TEXT: &str = "Cart is empty";

/// Everything the cart panel needs to draw itself.
///
/// Built fresh from the [`Cart`] on every change; holds no state of its own.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct CartView {
    /// One row per cart line, in cart order.
    pub rows: Vec<CartRow>,
    /// Whether the checkout control is enabled.
    pub checkout_enabled: bool,
    /// Total units in the cart.
    pub item_count: i64,
    /// Formatted grand total.
    pub total: String,
}

impl CartView {
    /// Project a cart into its view.
    pub fn project(cart: &Cart) -> Self {
        let rows = cart
            .lines()
            .iter()
            .enumerate()
            .map(|(index, line)| CartRow {
                index,
                product_id: line.product_id,
                name_html: escape_html(&line.name),
                quantity: line.quantity,
                unit_price: line.price.display(),
                line_total: line.line_total().display(),
                can_increment: line.quantity < line.stock,
                can_decrement: line.quantity > 1,
            })
            .collect();

        Self {
            rows,
            checkout_enabled: !cart.is_empty(),
            item_count: cart.item_count(),
            total: cart.total().display(),
        }
    }

    /// Check if there are no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Placeholder text when empty.
    pub fn placeholder(&self) -> Option<&'static str> {
        self.is_empty().then_some(EMPTY_CART_TEXT)
    }
}

/// One rendered cart line.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CartRow {
    /// Position in the cart; the row's controls act on this index.
    pub index: usize,
    /// Product on this line.
    pub product_id: ProductId,
    /// Product name, already escaped for markup.
    pub name_html: String,
    /// Quantity.
    pub quantity: i64,
    /// Formatted unit price.
    pub unit_price: String,
    /// Formatted quantity times unit price.
    pub line_total: String,
    /// False once the quantity has reached the stock snapshot.
    pub can_increment: bool,
    /// False at quantity 1.
    pub can_decrement: bool,
}

impl CartRow {
    /// Markup for the row summary: escaped name, quantity, unit price and total.
    ///
    /// Safe to assign as inner HTML: the only free text is the escaped name.
    pub fn summary_html(&self) -> String {
        format!(
            "{} \u{2014} {} \u{00d7} {} = {}",
            self.name_html, self.quantity, self.unit_price, self.line_total
        )
    }
}
