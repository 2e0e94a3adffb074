//! Commerce error types.

use thiserror::Error;

/// Errors raised by cart and checkout operations.
///
/// The `Display` text of the validation variants is what the shopper sees,
/// so keep it short and free of internal detail.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommerceError {
    /// Requested quantity is missing, unparsable or below one.
    #[error("Enter a valid quantity")]
    InvalidQuantity(String),

    /// Requested quantity is larger than the stock snapshot.
    #[error("Not enough stock")]
    InsufficientStock { requested: i64, stock: i64 },

    /// Checkout was started with nothing in the cart.
    #[error("Cart is empty")]
    EmptyCart,

    /// Buyer name or email was left blank.
    #[error("Name and email required")]
    MissingIdentity,

    /// Invalid checkout state transition.
    #[error("Invalid checkout transition from {from} to {to}")]
    InvalidCheckoutTransition { from: String, to: String },
}

impl CommerceError {
    /// Whether this error should be shown to the shopper as-is.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            CommerceError::InvalidQuantity(_)
                | CommerceError::InsufficientStock { .. }
                | CommerceError::EmptyCart
                | CommerceError::MissingIdentity
        )
    }
}
