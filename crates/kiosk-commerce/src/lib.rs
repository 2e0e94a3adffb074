//! Domain types and logic for the Kiosk storefront widget.
//!
//! This crate holds everything about the widget that is not DOM glue:
//!
//! - **Catalog**: product records as served by the catalog endpoint
//! - **Cart**: the in-memory cart, its line items and the render projection
//! - **Checkout**: the checkout state machine and purchase payloads
//! - **Markup**: escaping of user- and catalog-supplied text
//!
//! # Example
//!
//! ```rust
//! use kiosk_commerce::prelude::*;
//!
//! let product = Product::new(ProductId::new(1), "Lamp", Money::from_cents(1000), 5);
//!
//! let mut cart = Cart::new();
//! cart.add(&product, 3).unwrap();
//! cart.add(&product, 4).unwrap();
//!
//! let view = CartView::project(&cart);
//! assert_eq!(view.rows[0].quantity, 5);
//! assert_eq!(view.rows[0].line_total, "$50.00");
//! assert!(view.checkout_enabled);
//! ```

pub mod error;
pub mod ids;
pub mod markup;
pub mod money;

pub mod cart;
pub mod catalog;
pub mod checkout;

pub use error::CommerceError;
pub use ids::ProductId;
pub use money::Money;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::CommerceError;
    pub use crate::ids::ProductId;
    pub use crate::markup::escape_html;
    pub use crate::money::Money;

    // Catalog
    pub use crate::catalog::Product;

    // Cart
    pub use crate::cart::{parse_quantity, Cart, CartLine, CartRow, CartView, EMPTY_CART_TEXT};

    // Checkout
    pub use crate::checkout::{
        BuyerIdentity, CheckoutFlow, CheckoutStep, PurchaseItem, PurchaseRequest,
        PurchaseResponse,
    };
}
