//! Shopping cart module.
//!
//! Contains the cart store and its render projection.

mod cart;
mod view;

pub use cart::{parse_quantity, Cart, CartLine};
pub use view::{CartRow, CartView, EMPTY_CART_TEXT};
