//! Render snapshots handed to the view layer.

use kiosk_commerce::cart::CartView;
use kiosk_commerce::catalog::Product;
use kiosk_commerce::checkout::CheckoutStep;

/// Shown in the catalog area when the catalog cannot be loaded.
pub const CATALOG_ERROR_TEXT: &str = "Error loading products";

/// Shown for the zone when it cannot be determined.
pub const UNKNOWN_ZONE: &str = "unknown";

/// State of the catalog area.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum CatalogView {
    /// First fetch not finished yet.
    #[default]
    Loading,
    /// Products to render, in service order.
    Ready(Vec<Product>),
    /// Fetch failed; carries the text to show.
    Failed(String),
}

impl CatalogView {
    /// Products, if loaded.
    pub fn products(&self) -> Option<&[Product]> {
        match self {
            CatalogView::Ready(products) => Some(products),
            _ => None,
        }
    }
}

/// Everything the page renders, taken at one instant.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StorefrontSnapshot {
    pub catalog: CatalogView,
    pub cart: CartView,
    pub checkout: CheckoutStep,
    /// `None` until the zone fetch settles.
    pub zone: Option<String>,
}

impl StorefrontSnapshot {
    /// Zone text for display.
    pub fn zone_label(&self) -> &str {
        self.zone.as_deref().unwrap_or("\u{2026}")
    }
}
