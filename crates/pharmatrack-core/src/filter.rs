//! Filter option lists and the filtered site subset.
//!
//! All functions are pure and accept `None` for "no report loaded yet", in
//! which case they return empty results. Matching is exact and
//! case-sensitive: `"USA"` and `"U.S.A."` are different countries.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::location::{is_us_designator, parse_location, LocationParts};
use crate::report::{DrugReport, ManufacturingSite};

/// The user's current country/state selection. Empty means "all".
///
/// A non-empty `state` is only valid alongside a US `country`;
/// [`crate::ReportViewModel`] enforces this on every transition.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterSelection {
    #[serde(default)]
    pub country: String,
    #[serde(default)]
    pub state: String,
}

impl FilterSelection {
    /// Returns `true` when neither a country nor a state is selected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.country.is_empty() && self.state.is_empty()
    }

    /// Returns `true` if a site with the given parsed location passes.
    #[must_use]
    pub fn matches(&self, parts: &LocationParts) -> bool {
        let country_match = self.country.is_empty() || parts.country == self.country;
        let state_match = self.state.is_empty() || parts.state == self.state;
        country_match && state_match
    }
}

/// Distinct parsed countries across all sites, sorted ascending.
///
/// A location with a trailing comma parses to an empty country, and that
/// empty value is listed like any other.
#[must_use]
pub fn list_countries(report: Option<&DrugReport>) -> Vec<String> {
    let Some(report) = report else {
        return Vec::new();
    };

    report
        .sites
        .iter()
        .map(|site| parse_location(&site.location).country)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Distinct non-empty states among all US sites, sorted.
///
/// Returns empty unless `selected_country` is a US designator. Sites under
/// either designator contribute, so with `"USA"` selected a state seen only
/// under `"United States"` is listed but filters to nothing.
#[must_use]
pub fn list_us_states(report: Option<&DrugReport>, selected_country: &str) -> Vec<String> {
    let Some(report) = report else {
        return Vec::new();
    };
    if !is_us_designator(selected_country) {
        return Vec::new();
    }

    report
        .sites
        .iter()
        .map(|site| parse_location(&site.location))
        .filter(|parts| is_us_designator(&parts.country))
        .map(|parts| parts.state)
        .filter(|state| !state.is_empty())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Sites passing `selection`, in report order.
///
/// With an empty selection every site is returned without parsing.
#[must_use]
pub fn filter_sites<'a>(
    report: Option<&'a DrugReport>,
    selection: &FilterSelection,
) -> Vec<&'a ManufacturingSite> {
    let Some(report) = report else {
        return Vec::new();
    };
    if selection.is_empty() {
        return report.sites.iter().collect();
    }

    report
        .sites
        .iter()
        .filter(|site| selection.matches(&parse_location(&site.location)))
        .collect()
}
