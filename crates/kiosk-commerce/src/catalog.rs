//! Catalog product records.

use crate::ids::ProductId;
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// A product as served by the catalog endpoint.
///
/// Wire shape: `{product_id, name, description, price, stock, image_key}`
/// with `price` as a decimal number.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Product {
    /// Catalog identifier.
    pub product_id: ProductId,
    /// Display name.
    pub name: String,
    /// Free-form description.
    #[serde(default)]
    pub description: String,
    /// Unit price.
    #[serde(with = "crate::money::decimal")]
    pub price: Money,
    /// Units in stock when the catalog was fetched.
    pub stock: i64,
    /// Key of the product image under the images path.
    #[serde(default)]
    pub image_key: String,
}

impl Product {
    /// Create a product with an empty description and no image.
    pub fn new(product_id: ProductId, name: impl Into<String>, price: Money, stock: i64) -> Self {
        Self {
            product_id,
            name: name.into(),
            description: String::new(),
            price,
            stock,
            image_key: String::new(),
        }
    }

    /// Upper bound for the quantity selector. Never below 1 so the input
    /// stays well-formed for sold-out items; `Cart::add` rejects them anyway.
    pub fn max_quantity(&self) -> i64 {
        self.stock.max(1)
    }

    /// Format the price for display.
    pub fn price_display(&self) -> String {
        self.price.display()
    }
}
