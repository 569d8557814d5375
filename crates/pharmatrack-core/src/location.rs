//! Heuristic decomposition of free-text `"City, [State,] Country"` strings.
//!
//! The upstream format puts the country last and, when present, the state
//! second-to-last. A two-part string is read as `"City, Country"`. Four-part
//! addresses such as `"Ward, City, Province, Country"` will report `City`'s
//! neighbour as the state; this is a known limitation of the heuristic.

use serde::Serialize;

/// Country designators treated as the United States. Matching is exact.
pub const US_DESIGNATORS: [&str; 2] = ["USA", "United States"];

/// Geographic parts derived from a site's `location`. Never stored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LocationParts {
    pub country: String,
    pub state: String,
}

/// Split `location` into its country and state.
///
/// Segments are split on commas and trimmed. Empty segments still count
/// towards the segment total, so `"Springfield, , USA"` has three segments
/// and an empty state. Malformed or empty input yields empty parts.
#[must_use]
pub fn parse_location(location: &str) -> LocationParts {
    let parts: Vec<&str> = location.split(',').map(str::trim).collect();

    let country = parts.last().copied().unwrap_or_default();
    let state = if parts.len() >= 3 {
        parts[parts.len() - 2]
    } else {
        ""
    };

    LocationParts {
        country: country.to_string(),
        state: state.to_string(),
    }
}

/// Returns `true` if `country` is one of [`US_DESIGNATORS`].
#[must_use]
pub fn is_us_designator(country: &str) -> bool {
    US_DESIGNATORS.contains(&country)
}
