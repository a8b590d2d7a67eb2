//! Markup escaping for user-supplied text.

use std::borrow::Cow;

/// Escape `<` and `>` so user text renders literally inside HTML.
///
/// Borrows the input when nothing needs escaping.
///
/// # Examples
/// ```
/// use thingful::domain::escape_markup;
///
/// assert_eq!(escape_markup("<b>hi</b>"), "&lt;b&gt;hi&lt;/b&gt;");
/// assert_eq!(escape_markup("plain"), "plain");
/// ```
#[must_use]
pub fn escape_markup(input: &str) -> Cow<'_, str> {
    if !input.contains(['<', '>']) {
        return Cow::Borrowed(input);
    }

    let mut escaped = String::with_capacity(input.len() + 8);
    for ch in input.chars() {
        match ch {
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            other => escaped.push(other),
        }
    }
    Cow::Owned(escaped)
}
