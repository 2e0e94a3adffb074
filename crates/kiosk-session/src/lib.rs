//! Session controller for the Kiosk storefront widget.
//!
//! [`Storefront`] ties the cart, the checkout flow and the remote services
//! together for one page load. The view layer registers a render callback,
//! forwards user actions to the controller, and draws whatever
//! [`StorefrontSnapshot`] it is handed.
//!
//! # Example
//!
//! ```rust,ignore
//! use kiosk_session::Storefront;
//!
//! let storefront = Storefront::new(api, |message: &str| alert(message));
//! storefront.on_render(|snapshot| draw(snapshot));
//! storefront.start().await;
//!
//! storefront.add_to_cart(&product, "2");
//! storefront.begin_checkout();
//! storefront.submit_checkout("Ada", "ada@example.com").await;
//! ```

mod notify;
mod session;
mod snapshot;

pub use notify::Notifier;
pub use session::{Storefront, TRANSPORT_FAILURE_MESSAGE};
pub use snapshot::{CatalogView, StorefrontSnapshot, CATALOG_ERROR_TEXT, UNKNOWN_ZONE};
