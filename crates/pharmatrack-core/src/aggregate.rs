//! Grouped counts over a site subset, for the two summary charts.

use std::collections::HashMap;

use serde::Serialize;

use crate::report::ManufacturingSite;

/// One bar/slice of a chart: a grouping label and how many sites carry it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LabelCount {
    pub label: String,
    pub count: usize,
}

/// Count sites by the key `key_of` extracts.
///
/// Output order is first-seen order of each key. Only observed keys appear,
/// so there are never zero counts, and the counts sum to the number of sites.
pub fn count_by<'a, I, F>(sites: I, mut key_of: F) -> Vec<LabelCount>
where
    I: IntoIterator<Item = &'a ManufacturingSite>,
    F: FnMut(&'a ManufacturingSite) -> &'a str,
{
    let mut counts: Vec<LabelCount> = Vec::new();
    let mut index: HashMap<&'a str, usize> = HashMap::new();

    for site in sites {
        let key = key_of(site);
        match index.get(key) {
            Some(&i) => counts[i].count += 1,
            None => {
                index.insert(key, counts.len());
                counts.push(LabelCount {
                    label: key.to_string(),
                    count: 1,
                });
            }
        }
    }

    counts
}

/// Facility-type histogram data.
pub fn type_counts<'a, I>(sites: I) -> Vec<LabelCount>
where
    I: IntoIterator<Item = &'a ManufacturingSite>,
{
    count_by(sites, |site| site.facility_type.as_str())
}

/// Inspection-status breakdown data, labelled with the wire labels.
pub fn status_counts<'a, I>(sites: I) -> Vec<LabelCount>
where
    I: IntoIterator<Item = &'a ManufacturingSite>,
{
    count_by(sites, |site| site.inspection_status.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::InspectionStatus;

    fn site(facility_type: &str, status: InspectionStatus) -> ManufacturingSite {
        ManufacturingSite {
            site_name: "Site".to_string(),
            location: "Cork, Ireland".to_string(),
            facility_type: facility_type.to_string(),
            fei_number: String::new(),
            inspection_status: status,
            last_inspection_date: String::new(),
            interesting_facts: vec![],
            capacity_estimate: String::new(),
        }
    }

    fn lc(label: &str, count: usize) -> LabelCount {
        LabelCount {
            label: label.to_string(),
            count,
        }
    }

    #[test]
    fn empty_input_yields_empty_output() {
        let sites: Vec<ManufacturingSite> = vec![];
        assert!(type_counts(&sites).is_empty());
        assert!(status_counts(&sites).is_empty());
    }

    #[test]
    fn identical_keys_collapse_to_one_entry() {
        let sites: Vec<_> = (0..7)
            .map(|_| site("Packaging", InspectionStatus::Critical))
            .collect();
        assert_eq!(type_counts(&sites), vec![lc("Packaging", 7)]);
        assert_eq!(status_counts(&sites), vec![lc("Critical", 7)]);
    }

    #[test]
    fn output_follows_first_seen_order() {
        let sites = vec![
            site("Packaging", InspectionStatus::NeedsImprovement),
            site("API", InspectionStatus::Acceptable),
            site("Packaging", InspectionStatus::Acceptable),
            site("Finished Dosage Form", InspectionStatus::Unknown),
            site("API", InspectionStatus::NeedsImprovement),
        ];
        assert_eq!(
            type_counts(&sites),
            vec![
                lc("Packaging", 2),
                lc("API", 2),
                lc("Finished Dosage Form", 1)
            ]
        );
        assert_eq!(
            status_counts(&sites),
            vec![
                lc("Needs Improvement", 2),
                lc("Acceptable", 2),
                lc("Unknown", 1)
            ]
        );
    }

    #[test]
    fn counts_sum_to_site_count() {
        let types = ["A", "B", "C", "A", "D", "B", "A", "E", "C", "A", "B"];
        let sites: Vec<_> = types
            .iter()
            .enumerate()
            .map(|(i, t)| site(t, InspectionStatus::ALL[i % 4]))
            .collect();
        let by_type: usize = type_counts(&sites).iter().map(|c| c.count).sum();
        let by_status: usize = status_counts(&sites).iter().map(|c| c.count).sum();
        assert_eq!(by_type, sites.len());
        assert_eq!(by_status, sites.len());
    }

    #[test]
    fn custom_key_extractor() {
        let sites = vec![
            site("API", InspectionStatus::Acceptable),
            site("API", InspectionStatus::Critical),
        ];
        let counts = count_by(&sites, |s| s.location.as_str());
        assert_eq!(counts, vec![lc("Cork, Ireland", 2)]);
    }
}
