//! Domain model and view state for the drug manufacturing-facility report.
//!
//! Parsing, filtering and aggregation are pure functions over a
//! [`DrugReport`]; [`ReportViewModel`] owns the single search session and is
//! the only place session state changes.

pub mod aggregate;
pub mod app_config;
pub mod config;
pub mod display;
pub mod filter;
pub mod location;
pub mod report;
pub mod session;
pub mod source;
pub mod view;

pub use aggregate::{count_by, status_counts, type_counts, LabelCount};
pub use app_config::{AppConfig, Environment};
pub use config::{load_app_config, load_app_config_from_env};
pub use filter::{filter_sites, list_countries, list_us_states, FilterSelection};
pub use location::{is_us_designator, parse_location, LocationParts, US_DESIGNATORS};
pub use report::{DrugReport, InspectionStatus, ManufacturingSite, SourceLink};
pub use session::{
    fetch_for_ticket, Completion, ReportViewModel, SearchSession, SearchTicket, SessionError,
    SessionStatus,
};
pub use source::{DataSource, DataSourceError, FETCH_FAILED_MESSAGE};
pub use view::{ReportHeader, ReportView};

use thiserror::Error;

/// Drug names offered as one-click suggestions on the idle screen.
pub const SUGGESTED_DRUGS: [&str; 6] = [
    "Aspirin",
    "Ibuprofen",
    "Ozempic",
    "Metformin",
    "Lipitor",
    "Advil",
];

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for environment variable {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
