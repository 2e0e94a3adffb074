//! Purchase request and response types.

use crate::error::CommerceError;
use crate::ids::ProductId;
use serde::{Deserialize, Serialize};

/// Shown when the service rejects a purchase without saying why.
pub const PURCHASE_FAILED_MESSAGE: &str = "Purchase failed";

/// Shown after the service accepts a purchase.
pub const PURCHASE_SUCCEEDED_MESSAGE: &str = "Purchase successful!";

/// Who is buying.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuyerIdentity {
    name: String,
    email: String,
}

impl BuyerIdentity {
    /// Build an identity from form input.
    ///
    /// Both fields are trimmed and must be non-empty afterwards.
    pub fn new(name: &str, email: &str) -> Result<Self, CommerceError> {
        let name = name.trim();
        let email = email.trim();
        if name.is_empty() || email.is_empty() {
            return Err(CommerceError::MissingIdentity);
        }
        Ok(Self {
            name: name.to_string(),
            email: email.to_string(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &str {
        &self.email
    }
}

/// One `{product_id, quantity}` pair of the purchase payload.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct PurchaseItem {
    pub product_id: ProductId,
    pub quantity: i64,
}

/// Body of the purchase `POST`.
///
/// Price, name and stock are deliberately absent; the service prices the
/// order itself.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PurchaseRequest {
    pub buyer_name: String,
    pub buyer_email: String,
    pub items: Vec<PurchaseItem>,
}

impl PurchaseRequest {
    /// Create a request for a buyer and a list of items.
    pub fn new(buyer: &BuyerIdentity, items: Vec<PurchaseItem>) -> Self {
        Self {
            buyer_name: buyer.name.clone(),
            buyer_email: buyer.email.clone(),
            items,
        }
    }
}

/// Body returned by the purchase endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PurchaseResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl PurchaseResponse {
    /// An accepted purchase.
    pub fn accepted() -> Self {
        Self {
            success: true,
            message: None,
        }
    }

    /// A rejected purchase with an optional reason.
    pub fn rejected(message: Option<&str>) -> Self {
        Self {
            success: false,
            message: message.map(str::to_string),
        }
    }

    /// Text to show the shopper for a rejected purchase.
    pub fn failure_message(&self) -> &str {
        match self.message.as_deref() {
            Some(message) if !message.trim().is_empty() => message,
            _ => PURCHASE_FAILED_MESSAGE,
        }
    }
}
