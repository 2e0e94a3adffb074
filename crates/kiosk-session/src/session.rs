//! The storefront controller.

use std::cell::RefCell;
use std::rc::Rc;

use kiosk_commerce::cart::{parse_quantity, Cart, CartView};
use kiosk_commerce::catalog::Product;
use kiosk_commerce::checkout::{CheckoutFlow, CheckoutStep, PURCHASE_SUCCEEDED_MESSAGE};
use kiosk_commerce::CommerceError;
use kiosk_data::StorefrontApi;

use crate::notify::Notifier;
use crate::snapshot::{CatalogView, StorefrontSnapshot, CATALOG_ERROR_TEXT, UNKNOWN_ZONE};

/// Shown when the purchase service cannot be reached or answers garbage.
pub const TRANSPORT_FAILURE_MESSAGE: &str = "Network or server error";

type RenderFn = Box<dyn Fn(&StorefrontSnapshot)>;

#[derive(Default)]
struct SessionState {
    cart: Cart,
    checkout: CheckoutFlow,
    catalog: CatalogView,
    zone: Option<String>,
}

struct Inner<A, N> {
    api: A,
    notifier: N,
    state: RefCell<SessionState>,
    renderers: RefCell<Vec<RenderFn>>,
}

/// Owns the page session: cart, catalog, checkout flow and zone label.
///
/// Cheap to clone; clones share one session. Every mutation happens
/// synchronously and the state is never borrowed across an `.await`, so
/// handlers resumed by the event loop see a consistent cart.
///
/// Registered render callbacks receive a fresh [`StorefrontSnapshot`] after
/// each change.
pub struct Storefront<A, N> {
    inner: Rc<Inner<A, N>>,
}

impl<A, N> Clone for Storefront<A, N> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<A: StorefrontApi, N: Notifier> Storefront<A, N> {
    /// Create a session with an empty cart.
    pub fn new(api: A, notifier: N) -> Self {
        Self {
            inner: Rc::new(Inner {
                api,
                notifier,
                state: RefCell::new(SessionState::default()),
                renderers: RefCell::new(Vec::new()),
            }),
        }
    }

    /// Register a render callback. It is called once immediately.
    pub fn on_render(&self, render: impl Fn(&StorefrontSnapshot) + 'static) {
        render(&self.snapshot());
        self.inner.renderers.borrow_mut().push(Box::new(render));
    }

    /// Current state.
    pub fn snapshot(&self) -> StorefrontSnapshot {
        let state = self.inner.state.borrow();
        StorefrontSnapshot {
            catalog: state.catalog.clone(),
            cart: CartView::project(&state.cart),
            checkout: state.checkout.step(),
            zone: state.zone.clone(),
        }
    }

    pub fn api(&self) -> &A {
        &self.inner.api
    }

    pub fn notifier(&self) -> &N {
        &self.inner.notifier
    }

    /// Load the zone label and the catalog side by side.
    pub async fn start(&self) {
        futures::join!(self.load_zone(), self.load_catalog());
    }

    // ------------------------------------------------------------------
    // Catalog
    // ------------------------------------------------------------------

    /// Fetch the catalog and replace the catalog area.
    ///
    /// Returns whether the fetch succeeded. Failures are logged and shown in
    /// place of the catalog; there is no retry.
    pub async fn load_catalog(&self) -> bool {
        let result = self.inner.api.products().await;

        let loaded = match result {
            Ok(products) => {
                tracing::info!(count = products.len(), "catalog loaded");
                self.mutate(|state| state.catalog = CatalogView::Ready(products));
                true
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to load catalog");
                self.mutate(|state| {
                    state.catalog = CatalogView::Failed(CATALOG_ERROR_TEXT.to_string())
                });
                false
            }
        };

        // Also refreshes the cart panel after a reload.
        self.render();
        loaded
    }

    // ------------------------------------------------------------------
    // Cart
    // ------------------------------------------------------------------

    /// Add the quantity typed into a product's selector.
    pub fn add_to_cart(&self, product: &Product, raw_quantity: &str) -> bool {
        let result = parse_quantity(raw_quantity)
            .and_then(|requested| self.mutate(|state| state.cart.add(product, requested)));

        match result {
            Ok(index) => {
                tracing::debug!(product_id = %product.product_id, index, "added to cart");
                self.render();
                true
            }
            Err(e) => {
                self.reject(&e);
                false
            }
        }
    }

    /// Remove the line at `index`.
    pub fn remove_line(&self, index: usize) -> bool {
        let removed = self.mutate(|state| state.cart.remove(index));
        match removed {
            Some(line) => {
                tracing::debug!(product_id = %line.product_id, index, "removed from cart");
                self.render();
                true
            }
            None => false,
        }
    }

    /// Raise the quantity at `index` by one, up to its stock.
    pub fn increment_line(&self, index: usize) -> bool {
        self.adjust(index, |cart| cart.increment(index))
    }

    /// Lower the quantity at `index` by one, down to 1.
    pub fn decrement_line(&self, index: usize) -> bool {
        self.adjust(index, |cart| cart.decrement(index))
    }

    /// Empty the cart.
    pub fn clear_cart(&self) {
        self.mutate(|state| state.cart.clear());
        tracing::debug!("cart cleared");
        self.render();
    }

    fn adjust(&self, index: usize, step: impl FnOnce(&mut Cart) -> Option<i64>) -> bool {
        match self.mutate(|state| step(&mut state.cart)) {
            Some(quantity) => {
                tracing::debug!(index, quantity, "cart quantity adjusted");
                self.render();
                true
            }
            None => false,
        }
    }

    // ------------------------------------------------------------------
    // Checkout
    // ------------------------------------------------------------------

    /// Open the identity form. Refused with a notification on an empty cart.
    pub fn begin_checkout(&self) -> bool {
        let result = self.mutate(|state| state.checkout.begin(&state.cart));
        match result {
            Ok(()) => {
                self.render();
                true
            }
            Err(e) => {
                self.reject(&e);
                false
            }
        }
    }

    /// Close the identity form without submitting.
    pub fn cancel_checkout(&self) {
        match self.mutate(|state| state.checkout.cancel()) {
            Ok(()) => self.render(),
            Err(e) => self.reject(&e),
        }
    }

    /// Submit the cart for the given buyer and wait for the outcome.
    ///
    /// Returns the terminal step reached (`Succeeded` or `Failed`), or the
    /// current step if nothing was sent. The flow is idle again by the time
    /// the outcome has been reported.
    ///
    /// On success the cart is cleared, the flow returns to idle, and then the
    /// catalog is reloaded to pick up the new stock levels. On failure the
    /// cart is left as it was so the shopper can fix it and retry.
    pub async fn submit_checkout(&self, name: &str, email: &str) -> CheckoutStep {
        let request = self.mutate(|state| state.checkout.submit(name, email, &state.cart));
        let request = match request {
            Ok(request) => request,
            Err(e) => {
                self.reject(&e);
                self.render();
                return self.step();
            }
        };

        self.render();
        tracing::info!(items = request.items.len(), "submitting purchase");

        match self.inner.api.purchase(&request).await {
            Ok(response) if response.success => {
                tracing::info!("purchase accepted");
                self.resolve(true);
                self.inner.notifier.notify(PURCHASE_SUCCEEDED_MESSAGE);
                self.mutate(|state| state.cart.clear());
                self.finish();
                // Checkout must reopen even while the reload is outstanding.
                self.load_catalog().await;
                CheckoutStep::Succeeded
            }
            Ok(response) => {
                tracing::warn!(message = ?response.message, "purchase rejected");
                self.resolve(false);
                self.inner.notifier.notify(response.failure_message());
                self.finish();
                CheckoutStep::Failed
            }
            Err(e) => {
                tracing::error!(error = %e, "purchase request failed");
                self.resolve(false);
                self.inner.notifier.notify(TRANSPORT_FAILURE_MESSAGE);
                self.finish();
                CheckoutStep::Failed
            }
        }
    }

    fn step(&self) -> CheckoutStep {
        self.inner.state.borrow().checkout.step()
    }

    fn resolve(&self, succeeded: bool) {
        if let Err(e) = self.mutate(|state| state.checkout.resolve(succeeded)) {
            tracing::warn!(error = %e, "checkout outcome out of order");
        }
        self.render();
    }

    fn finish(&self) {
        if let Err(e) = self.mutate(|state| state.checkout.finish()) {
            tracing::warn!(error = %e, "checkout reset out of order");
        }
        self.render();
    }

    // ------------------------------------------------------------------
    // Zone
    // ------------------------------------------------------------------

    /// Fetch and show the zone label, or `unknown` if that fails.
    pub async fn load_zone(&self) {
        let label = match self.inner.api.zone().await {
            Ok(text) if !text.trim().is_empty() => text.trim().to_string(),
            Ok(_) => UNKNOWN_ZONE.to_string(),
            Err(e) => {
                tracing::warn!(error = %e, "failed to load zone");
                UNKNOWN_ZONE.to_string()
            }
        };
        self.mutate(|state| state.zone = Some(label));
        self.render();
    }

    // ------------------------------------------------------------------
    // Internals
    // ------------------------------------------------------------------

    fn mutate<R>(&self, f: impl FnOnce(&mut SessionState) -> R) -> R {
        let mut state = self.inner.state.borrow_mut();
        f(&mut state)
    }

    fn reject(&self, error: &CommerceError) {
        if error.is_validation() {
            tracing::warn!(error = %error, "rejected by validation");
            self.inner.notifier.notify(&error.to_string());
        } else {
            tracing::warn!(error = %error, "ignored out-of-order action");
        }
    }

    fn render(&self) {
        let snapshot = self.snapshot();
        for render in self.inner.renderers.borrow().iter() {
            render(&snapshot);
        }
    }
}
