//! The upstream collaborator that produces a [`DrugReport`] for a drug name.

use async_trait::async_trait;
use thiserror::Error;

use crate::report::DrugReport;

/// The only message the presentation layer ever sees for a failed fetch.
pub const FETCH_FAILED_MESSAGE: &str =
    "Failed to fetch medicine manufacturing data. Please try again.";

/// A failure surfaced by a [`DataSource`].
///
/// The detail is for operators and logs only; it is never shown to users.
#[derive(Debug, Error)]
#[error("data source failure: {detail}")]
pub struct DataSourceError {
    pub detail: String,
}

impl DataSourceError {
    pub fn new(detail: impl Into<String>) -> Self {
        Self {
            detail: detail.into(),
        }
    }
}

/// Supplies the raw report for a drug name.
///
/// Callers guarantee `drug_name` is non-empty after trimming. Implementations
/// do not need to guard against concurrent calls for different names; the
/// view model discards completions that are no longer current.
#[async_trait]
pub trait DataSource: Send + Sync {
    /// Fetch the report for `drug_name`.
    ///
    /// # Errors
    ///
    /// Returns [`DataSourceError`] for any network, upstream or schema failure.
    async fn fetch_report(&self, drug_name: &str) -> Result<DrugReport, DataSourceError>;
}
