use serde::{Deserialize, Serialize};

/// Outcome of a facility's most recent regulatory inspection.
///
/// Upstream labels are free strings constrained by the request schema, but the
/// model is not guaranteed to comply; anything unrecognised decodes to
/// [`InspectionStatus::Unknown`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "&'static str")]
pub enum InspectionStatus {
    Acceptable,
    NeedsImprovement,
    Critical,
    #[default]
    Unknown,
}

impl InspectionStatus {
    /// All variants, in the order they are listed in the request schema.
    pub const ALL: [InspectionStatus; 4] = [
        InspectionStatus::Acceptable,
        InspectionStatus::NeedsImprovement,
        InspectionStatus::Critical,
        InspectionStatus::Unknown,
    ];

    /// Wire label, e.g. `"Needs Improvement"`.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            InspectionStatus::Acceptable => "Acceptable",
            InspectionStatus::NeedsImprovement => "Needs Improvement",
            InspectionStatus::Critical => "Critical",
            InspectionStatus::Unknown => "Unknown",
        }
    }

    /// Parse a wire label. Matching is exact; unknown labels map to `Unknown`.
    #[must_use]
    pub fn from_label(label: &str) -> Self {
        match label {
            "Acceptable" => InspectionStatus::Acceptable,
            "Needs Improvement" => InspectionStatus::NeedsImprovement,
            "Critical" => InspectionStatus::Critical,
            _ => InspectionStatus::Unknown,
        }
    }
}

impl From<String> for InspectionStatus {
    fn from(value: String) -> Self {
        Self::from_label(&value)
    }
}

impl From<InspectionStatus> for &'static str {
    fn from(value: InspectionStatus) -> Self {
        value.as_str()
    }
}

impl std::fmt::Display for InspectionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One manufacturing facility associated with a drug.
///
/// `site_name`, `location` and `facility_type` are always present per the
/// upstream contract; every other field is best-effort and may be empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ManufacturingSite {
    pub site_name: String,
    /// Raw `"City, [State,] Country"` text. The only geographic structure
    /// available; see [`crate::location::parse_location`].
    pub location: String,
    /// Free-text classification, e.g. `"API Manufacturing"`.
    pub facility_type: String,
    /// FDA Establishment Identifier. May be empty.
    #[serde(default)]
    pub fei_number: String,
    #[serde(default)]
    pub inspection_status: InspectionStatus,
    #[serde(default)]
    pub last_inspection_date: String,
    #[serde(default)]
    pub interesting_facts: Vec<String>,
    #[serde(default)]
    pub capacity_estimate: String,
}

/// A citation record for where report data was found.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceLink {
    pub title: String,
    pub uri: String,
}

/// The generated report for one drug search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DrugReport {
    pub name: String,
    #[serde(default)]
    pub manufacturer: String,
    #[serde(default)]
    pub approval_date: String,
    #[serde(default)]
    pub drug_class: String,
    /// Upstream order, kept stable for rendering.
    pub sites: Vec<ManufacturingSite>,
    #[serde(default)]
    pub sources: Vec<SourceLink>,
}

impl DrugReport {
    /// Returns the total number of sites in the report, before filtering.
    #[must_use]
    pub fn site_count(&self) -> usize {
        self.sites.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inspection_status_round_trips_wire_labels() {
        for status in InspectionStatus::ALL {
            assert_eq!(InspectionStatus::from_label(status.as_str()), status);
        }
    }

    #[test]
    fn inspection_status_unknown_label_maps_to_unknown() {
        assert_eq!(
            InspectionStatus::from_label("Official Action Indicated"),
            InspectionStatus::Unknown
        );
        assert_eq!(
            InspectionStatus::from_label("acceptable"),
            InspectionStatus::Unknown
        );
    }

    #[test]
    fn site_deserializes_with_only_required_fields() {
        let json = r#"{"siteName":"Plant 1","location":"Berlin, Germany","facilityType":"Packaging"}"#;
        let site: ManufacturingSite = serde_json::from_str(json).expect("deserialize");
        assert_eq!(site.site_name, "Plant 1");
        assert_eq!(site.inspection_status, InspectionStatus::Unknown);
        assert!(site.interesting_facts.is_empty());
        assert!(site.fei_number.is_empty());
    }

    #[test]
    fn site_serializes_status_as_label() {
        let site = ManufacturingSite {
            site_name: "Plant 2".to_string(),
            location: "Boston, MA, USA".to_string(),
            facility_type: "API".to_string(),
            fei_number: String::new(),
            inspection_status: InspectionStatus::NeedsImprovement,
            last_inspection_date: String::new(),
            interesting_facts: vec![],
            capacity_estimate: String::new(),
        };
        let json = serde_json::to_value(&site).expect("serialize");
        assert_eq!(json["inspectionStatus"], "Needs Improvement");
        assert_eq!(json["facilityType"], "API");
    }
}
