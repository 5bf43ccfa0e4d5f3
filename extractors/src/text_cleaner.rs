//! Markup stripping for values captured out of notification bodies.
//!
//! Tag removal is purely syntactic: anything between `<` and `>` goes, with no
//! attempt to understand the HTML around it.

use regex::Regex;
use std::sync::OnceLock;

fn tag_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"<[^>]*>").expect("invalid tag regex"))
}

fn ws_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\s+").expect("invalid ws regex"))
}

/// Removes every `<...>` tag and nothing else.
pub fn strip_tags(text: &str) -> String {
    tag_re().replace_all(text, "").into_owned()
}

/// Strips tags, decodes `&nbsp;` and trims.
///
/// No other entity is decoded here. `clean(clean(s)) == clean(s)` for any `s`.
pub fn clean(text: &str) -> String {
    strip_tags(text).replace("&nbsp;", " ").trim().to_string()
}

/// Cleaning used for a forwarded sender line that holds no email address.
///
/// Unlike [`clean`] this collapses whitespace runs and also decodes `&lt;`,
/// `&gt;` and `&amp;`.
pub fn clean_sender(text: &str) -> String {
    let stripped = strip_tags(text).replace("&nbsp;", " ");
    ws_re()
        .replace_all(&stripped, " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&amp;", "&")
        .trim()
        .to_string()
}
