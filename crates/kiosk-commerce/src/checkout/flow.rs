//! Checkout flow state machine.
//!
//! ```text
//! Idle -> CollectingIdentity -> Submitting -> Succeeded | Failed -> Idle
//! ```
//!
//! Validation failures on the way in (empty cart, blank identity) drop the
//! flow back to `Idle` without producing a request.

use crate::cart::Cart;
use crate::checkout::{BuyerIdentity, PurchaseRequest};
use crate::CommerceError;
use serde::{Deserialize, Serialize};

/// Steps in the checkout flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum CheckoutStep {
    /// No checkout in progress.
    #[default]
    Idle,
    /// Waiting for buyer name and email.
    CollectingIdentity,
    /// Purchase request in flight.
    Submitting,
    /// The service accepted the purchase.
    Succeeded,
    /// The service rejected the purchase or could not be reached.
    Failed,
}

impl CheckoutStep {
    pub fn as_str(&self) -> &'static str {
        match self {
            CheckoutStep::Idle => "idle",
            CheckoutStep::CollectingIdentity => "collecting_identity",
            CheckoutStep::Submitting => "submitting",
            CheckoutStep::Succeeded => "succeeded",
            CheckoutStep::Failed => "failed",
        }
    }

    /// Whether the identity form should be on screen.
    pub fn shows_identity_form(&self) -> bool {
        matches!(self, CheckoutStep::CollectingIdentity | CheckoutStep::Submitting)
    }

    /// Whether this is a terminal outcome awaiting reset.
    pub fn is_outcome(&self) -> bool {
        matches!(self, CheckoutStep::Succeeded | CheckoutStep::Failed)
    }
}

/// Checkout flow state.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct CheckoutFlow {
    step: CheckoutStep,
}

impl CheckoutFlow {
    /// Create an idle flow.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current step.
    pub fn step(&self) -> CheckoutStep {
        self.step
    }

    /// Start checkout. Refused with [`CommerceError::EmptyCart`] when there is
    /// nothing to buy; the flow stays idle.
    pub fn begin(&mut self, cart: &Cart) -> Result<(), CommerceError> {
        self.expect(CheckoutStep::Idle, CheckoutStep::CollectingIdentity)?;
        if cart.is_empty() {
            return Err(CommerceError::EmptyCart);
        }
        self.step = CheckoutStep::CollectingIdentity;
        Ok(())
    }

    /// Abandon identity collection.
    pub fn cancel(&mut self) -> Result<(), CommerceError> {
        self.expect(CheckoutStep::CollectingIdentity, CheckoutStep::Idle)?;
        self.step = CheckoutStep::Idle;
        Ok(())
    }

    /// Validate the buyer and build the purchase request from the cart.
    ///
    /// On success the flow is `Submitting`. On a validation error it is back
    /// at `Idle` and nothing should be sent.
    pub fn submit(
        &mut self,
        name: &str,
        email: &str,
        cart: &Cart,
    ) -> Result<PurchaseRequest, CommerceError> {
        self.expect(CheckoutStep::CollectingIdentity, CheckoutStep::Submitting)?;

        // The cart can be emptied while the form is open.
        if cart.is_empty() {
            self.step = CheckoutStep::Idle;
            return Err(CommerceError::EmptyCart);
        }

        let buyer = match BuyerIdentity::new(name, email) {
            Ok(buyer) => buyer,
            Err(e) => {
                self.step = CheckoutStep::Idle;
                return Err(e);
            }
        };

        self.step = CheckoutStep::Submitting;
        Ok(PurchaseRequest::new(&buyer, cart.purchase_items()))
    }

    /// Record the outcome of the in-flight request.
    pub fn resolve(&mut self, succeeded: bool) -> Result<CheckoutStep, CommerceError> {
        let next = if succeeded {
            CheckoutStep::Succeeded
        } else {
            CheckoutStep::Failed
        };
        self.expect(CheckoutStep::Submitting, next)?;
        self.step = next;
        Ok(next)
    }

    /// Return to `Idle` after an outcome has been reported.
    pub fn finish(&mut self) -> Result<(), CommerceError> {
        if !self.step.is_outcome() {
            return Err(self.transition_error(CheckoutStep::Idle));
        }
        self.step = CheckoutStep::Idle;
        Ok(())
    }

    fn expect(&self, required: CheckoutStep, to: CheckoutStep) -> Result<(), CommerceError> {
        if self.step == required {
            Ok(())
        } else {
            Err(self.transition_error(to))
        }
    }

    fn transition_error(&self, to: CheckoutStep) -> CommerceError {
        CommerceError::InvalidCheckoutTransition {
            from: self.step.as_str().to_string(),
            to: to.as_str().to_string(),
        }
    }
}
