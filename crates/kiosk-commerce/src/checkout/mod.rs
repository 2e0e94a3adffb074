//! Checkout module.
//!
//! Contains the checkout state machine and the purchase wire types.

mod flow;
mod purchase;

pub use flow::{CheckoutFlow, CheckoutStep};
pub use purchase::{
    BuyerIdentity, PurchaseItem, PurchaseRequest, PurchaseResponse, PURCHASE_FAILED_MESSAGE,
    PURCHASE_SUCCEEDED_MESSAGE,
};
