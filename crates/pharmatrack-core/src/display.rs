//! Presentation rules shared by every renderer. None of these affect data.

use std::borrow::Cow;

/// Chart labels longer than this are elided.
pub const CHART_LABEL_MAX_CHARS: usize = 15;
/// Source titles longer than this are elided.
pub const SOURCE_TITLE_MAX_CHARS: usize = 40;

pub const ELISION_MARKER: &str = "...";

pub const MANUFACTURER_FALLBACK: &str = "Various";
pub const NOT_AVAILABLE: &str = "N/A";
pub const LAST_INSPECTION_FALLBACK: &str = "Unknown";
pub const CAPACITY_FALLBACK: &str = "NDA";

pub const SOURCE_TITLE_FALLBACK: &str = "Source";
pub const SOURCE_URI_FALLBACK: &str = "#";

/// Keep the first `max_chars` characters of `text` and append
/// [`ELISION_MARKER`] when anything was cut.
#[must_use]
pub fn elide(text: &str, max_chars: usize) -> Cow<'_, str> {
    match text.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => Cow::Owned(format!("{}{ELISION_MARKER}", &text[..byte_idx])),
        None => Cow::Borrowed(text),
    }
}

/// `value`, or `fallback` when `value` is empty.
#[must_use]
pub fn or_fallback<'a>(value: &'a str, fallback: &'a str) -> &'a str {
    if value.is_empty() {
        fallback
    } else {
        value
    }
}

/// Header label for the site count.
#[must_use]
pub fn site_count_label(filtered: usize, total: usize) -> &'static str {
    if filtered == total {
        "Identified Sites"
    } else {
        "Filtered Sites"
    }
}
