//! Browser bindings.

use kiosk_session::Notifier;

/// Notifies the shopper with `window.alert`.
#[derive(Debug, Clone, Copy, Default)]
pub struct AlertNotifier;

impl Notifier for AlertNotifier {
    fn notify(&self, message: &str) {
        let Some(window) = web_sys::window() else {
            tracing::warn!(message, "no window to alert on");
            return;
        };
        if let Err(e) = window.alert_with_message(message) {
            tracing::warn!(error = ?e, "alert failed");
        }
    }
}

/// `window.location.origin`, used as the base URL when none is configured.
pub fn page_origin() -> Option<String> {
    web_sys::window().and_then(|window| window.location().origin().ok())
}
