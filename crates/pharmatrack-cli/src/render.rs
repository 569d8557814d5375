//! Plain-text rendering of a [`ReportView`] for the terminal.

use std::fmt;

use chrono::Utc;
use pharmatrack_core::display::{
    elide, or_fallback, CAPACITY_FALLBACK, CHART_LABEL_MAX_CHARS, LAST_INSPECTION_FALLBACK,
    MANUFACTURER_FALLBACK, NOT_AVAILABLE, SOURCE_TITLE_MAX_CHARS,
};
use pharmatrack_core::{LabelCount, ManufacturingSite, ReportView};

pub(crate) const EMPTY_FILTER_MESSAGE: &str = "No manufacturing sites match your selected filters.";

const BAR_WIDTH: usize = 30;
const ALL: &str = "(all)";

/// The whole report: header, filter options, charts, cards, sources.
pub(crate) struct TextReport<'a>(pub &'a ReportView);

impl fmt::Display for TextReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let view = self.0;

        if let Some(header) = &view.report {
            writeln!(f, "# {}", header.name)?;
            writeln!(
                f,
                "Manufacturer:  {}",
                or_fallback(&header.manufacturer, MANUFACTURER_FALLBACK)
            )?;
            writeln!(
                f,
                "Approved:      {}",
                or_fallback(&header.approval_date, NOT_AVAILABLE)
            )?;
            writeln!(
                f,
                "Class:         {}",
                or_fallback(&header.drug_class, NOT_AVAILABLE)
            )?;
            writeln!(f, "{}: {}", header.site_count_label, header.filtered_sites)?;
            writeln!(f, "Generated:     {}", Utc::now().format("%Y-%m-%d %H:%M UTC"))?;
            writeln!(f)?;
        }

        write_filters(f, view)?;

        // Charts stay visible when the filter matches nothing.
        write!(f, "{}", Chart::new("Facility types", &view.type_counts))?;
        write!(f, "{}", Chart::new("Inspection status", &view.status_counts))?;

        if view.filtered_sites.is_empty() {
            writeln!(f, "{EMPTY_FILTER_MESSAGE}")?;
        } else {
            writeln!(f, "## Sites")?;
            for (idx, site) in view.filtered_sites.iter().enumerate() {
                write_card(f, idx + 1, site)?;
            }
        }

        write_sources(f, view)
    }
}

fn write_filters(f: &mut fmt::Formatter<'_>, view: &ReportView) -> fmt::Result {
    writeln!(f, "Countries:     {}", view.countries.join(", "))?;
    if !view.us_states.is_empty() {
        writeln!(f, "US states:     {}", view.us_states.join(", "))?;
    }
    let country = or_fallback(&view.filter.country, ALL);
    let state = or_fallback(&view.filter.state, ALL);
    writeln!(f, "Filter:        country={country} state={state}")?;
    writeln!(f)
}

/// Horizontal bar chart; bars are scaled to the largest count.
pub(crate) struct Chart<'a> {
    title: &'a str,
    counts: &'a [LabelCount],
}

impl<'a> Chart<'a> {
    pub(crate) fn new(title: &'a str, counts: &'a [LabelCount]) -> Self {
        Self { title, counts }
    }
}

impl fmt::Display for Chart<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "## {}", self.title)?;
        let max = self.counts.iter().map(|c| c.count).max().unwrap_or(0);
        let label_width = CHART_LABEL_MAX_CHARS + 3;
        for entry in self.counts {
            let bar_len = if max == 0 {
                0
            } else {
                (entry.count * BAR_WIDTH).div_ceil(max)
            };
            let label = elide(&entry.label, CHART_LABEL_MAX_CHARS);
            writeln!(
                f,
                "  {label:<label_width$} {} {}",
                "#".repeat(bar_len),
                entry.count
            )?;
        }
        writeln!(f)
    }
}

fn write_card(f: &mut fmt::Formatter<'_>, number: usize, site: &ManufacturingSite) -> fmt::Result {
    writeln!(f, "[{number}] {}", site.site_name)?;
    writeln!(f, "    Location:    {}", site.location)?;
    writeln!(f, "    Type:        {}", site.facility_type)?;
    writeln!(
        f,
        "    FEI:         {}",
        or_fallback(&site.fei_number, NOT_AVAILABLE)
    )?;
    writeln!(
        f,
        "    Inspection:  {} (last: {})",
        site.inspection_status,
        or_fallback(&site.last_inspection_date, LAST_INSPECTION_FALLBACK)
    )?;
    writeln!(
        f,
        "    Capacity:    {}",
        or_fallback(&site.capacity_estimate, CAPACITY_FALLBACK)
    )?;
    for fact in &site.interesting_facts {
        writeln!(f, "    - {fact}")?;
    }
    writeln!(f)
}

fn write_sources(f: &mut fmt::Formatter<'_>, view: &ReportView) -> fmt::Result {
    if view.sources.is_empty() {
        return Ok(());
    }
    writeln!(f, "## Sources")?;
    for source in &view.sources {
        writeln!(
            f,
            "  {}  <{}>",
            elide(&source.title, SOURCE_TITLE_MAX_CHARS),
            source.uri
        )?;
    }
    Ok(())
}
