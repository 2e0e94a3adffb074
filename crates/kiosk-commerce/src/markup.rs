//! Escaping for text interpolated into markup.

/// Escape `&`, `<`, `"` and `'` to their entity forms.
///
/// Product names and buyer-supplied text pass through this before they are
/// spliced into any HTML string. `>` is left alone; without a matching `<` it
/// cannot open a tag.
pub fn escape_html(unsafe_text: &str) -> String {
    let mut escaped = String::with_capacity(unsafe_text.len());
    for c in unsafe_text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#039;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
