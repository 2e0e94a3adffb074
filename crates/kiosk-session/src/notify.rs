//! User notifications.

/// Shows a short blocking message to the shopper.
///
/// The browser implementation is `window.alert`; tests record the messages.
pub trait Notifier {
    fn notify(&self, message: &str);
}

impl<F> Notifier for F
where
    F: Fn(&str),
{
    fn notify(&self, message: &str) {
        self(message)
    }
}
