//! Read-only snapshot of everything a renderer needs from the session.

use serde::Serialize;

use crate::aggregate::LabelCount;
use crate::display::site_count_label;
use crate::filter::FilterSelection;
use crate::report::{ManufacturingSite, SourceLink};
use crate::session::{ReportViewModel, SessionStatus};

/// Drug-level summary shown above the cards.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportHeader {
    pub name: String,
    pub manufacturer: String,
    pub approval_date: String,
    pub drug_class: String,
    pub total_sites: usize,
    pub filtered_sites: usize,
    pub site_count_label: &'static str,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportView {
    pub status: SessionStatus,
    pub search_term: String,
    pub error_message: Option<String>,
    pub filter: FilterSelection,
    pub report: Option<ReportHeader>,
    pub countries: Vec<String>,
    pub us_states: Vec<String>,
    pub filtered_sites: Vec<ManufacturingSite>,
    pub type_counts: Vec<LabelCount>,
    pub status_counts: Vec<LabelCount>,
    pub sources: Vec<SourceLink>,
}

impl ReportViewModel {
    /// Compute every derived view for the current session.
    #[must_use]
    pub fn view(&self) -> ReportView {
        let session = self.session();
        let filtered = self.filtered_sites();

        let report = session.report.as_ref().map(|r| ReportHeader {
            name: r.name.clone(),
            manufacturer: r.manufacturer.clone(),
            approval_date: r.approval_date.clone(),
            drug_class: r.drug_class.clone(),
            total_sites: r.site_count(),
            filtered_sites: filtered.len(),
            site_count_label: site_count_label(filtered.len(), r.site_count()),
        });

        ReportView {
            status: session.status,
            search_term: session.search_term.clone(),
            error_message: session.error_message.clone(),
            filter: session.filter.clone(),
            report,
            countries: self.countries(),
            us_states: self.us_states(),
            type_counts: self.type_counts(),
            status_counts: self.status_counts(),
            filtered_sites: filtered.into_iter().cloned().collect(),
            sources: session
                .report
                .as_ref()
                .map(|r| r.sources.clone())
                .unwrap_or_default(),
        }
    }
}
