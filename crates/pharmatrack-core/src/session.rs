//! The single search session and the transitions that mutate it.
//!
//! ```text
//! Idle ──submit──▶ Loading ──complete(Ok)──▶ Success ──reset──▶ Idle
//!                     │  ▲                      │
//!                     │  └──────submit──────────┘
//!                     └──complete(Err)──▶ Error ──reset──▶ Idle
//! ```
//!
//! Concurrent submissions follow latest-submission-wins: each `submit` hands
//! out a [`SearchTicket`] with a fresh generation and only the completion for
//! the newest ticket is applied. Older completions come back as
//! [`Completion::Stale`] and leave the session untouched.

use serde::Serialize;
use thiserror::Error;

use crate::aggregate::{status_counts, type_counts, LabelCount};
use crate::filter::{filter_sites, list_countries, list_us_states, FilterSelection};
use crate::location::is_us_designator;
use crate::report::{DrugReport, ManufacturingSite};
use crate::source::{DataSource, DataSourceError, FETCH_FAILED_MESSAGE};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionStatus {
    #[default]
    Idle,
    Loading,
    Success,
    Error,
}

impl std::fmt::Display for SessionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SessionStatus::Idle => write!(f, "idle"),
            SessionStatus::Loading => write!(f, "loading"),
            SessionStatus::Success => write!(f, "success"),
            SessionStatus::Error => write!(f, "error"),
        }
    }
}

/// Rejected transitions. None of these change the session.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("search term must not be empty")]
    EmptySearchTerm,

    #[error("filters can only change while a report is shown (status: {0})")]
    NoReport(SessionStatus),

    #[error("a state filter requires a United States country selection, got \"{country}\"")]
    StateRequiresUsCountry { country: String },
}

/// Issued by [`ReportViewModel::submit`]; hand it back with the fetch result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchTicket {
    generation: u64,
    term: String,
}

impl SearchTicket {
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// The trimmed drug name to request.
    #[must_use]
    pub fn term(&self) -> &str {
        &self.term
    }
}

/// Whether a completion was applied to the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    Applied,
    /// The ticket was superseded or abandoned; the result was discarded.
    Stale,
}

/// Top-level session state. Read-only outside [`ReportViewModel`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchSession {
    /// Text in the search box, as typed.
    pub search_term: String,
    pub status: SessionStatus,
    pub report: Option<DrugReport>,
    pub error_message: Option<String>,
    pub filter: FilterSelection,
}

/// Owns the [`SearchSession`] and exposes its transitions and derived views.
#[derive(Debug, Default)]
pub struct ReportViewModel {
    session: SearchSession,
    generation: u64,
    in_flight: Option<u64>,
}

impl ReportViewModel {
    /// A fresh session: `Idle`, empty term, no report.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn session(&self) -> &SearchSession {
        &self.session
    }

    #[must_use]
    pub fn status(&self) -> SessionStatus {
        self.session.status
    }

    // -------------------------------------------------------------------------
    // Transitions
    // -------------------------------------------------------------------------

    /// Update the search-box text without submitting.
    pub fn set_search_term(&mut self, term: impl Into<String>) {
        self.session.search_term = term.into();
    }

    pub fn clear_search_term(&mut self) {
        self.session.search_term.clear();
    }

    /// Start a search for `term`.
    ///
    /// Moves to `Loading`, clears any error, report and filter selection, and
    /// returns the ticket identifying this request. Submitting while already
    /// `Loading` supersedes the in-flight request.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::EmptySearchTerm`] if `term` is blank; the
    /// session is left unchanged.
    pub fn submit(&mut self, term: &str) -> Result<SearchTicket, SessionError> {
        let trimmed = term.trim();
        if trimmed.is_empty() {
            return Err(SessionError::EmptySearchTerm);
        }

        if let Some(previous) = self.in_flight {
            tracing::debug!(
                previous,
                term = trimmed,
                "new search supersedes in-flight request"
            );
        }

        self.generation += 1;
        self.in_flight = Some(self.generation);
        self.session.search_term = term.to_string();
        self.session.status = SessionStatus::Loading;
        self.session.report = None;
        self.session.error_message = None;
        self.session.filter = FilterSelection::default();

        tracing::info!(generation = self.generation, term = trimmed, "search submitted");

        Ok(SearchTicket {
            generation: self.generation,
            term: trimmed.to_string(),
        })
    }

    /// Submit the current search-box text.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::EmptySearchTerm`] if the text is blank.
    pub fn submit_current(&mut self) -> Result<SearchTicket, SessionError> {
        let term = self.session.search_term.clone();
        self.submit(&term)
    }

    /// Apply the outcome of the fetch for `ticket`.
    pub fn complete(
        &mut self,
        ticket: &SearchTicket,
        outcome: Result<DrugReport, DataSourceError>,
    ) -> Completion {
        match outcome {
            Ok(report) => self.data_arrived(ticket, report),
            Err(err) => self.data_failed(ticket, &err),
        }
    }

    /// `Loading` + report for the current ticket → `Success`.
    pub fn data_arrived(&mut self, ticket: &SearchTicket, report: DrugReport) -> Completion {
        if !self.is_current(ticket) {
            tracing::debug!(
                generation = ticket.generation,
                term = %ticket.term,
                "discarding stale report"
            );
            return Completion::Stale;
        }

        tracing::info!(
            generation = ticket.generation,
            drug = %report.name,
            sites = report.sites.len(),
            "report loaded"
        );
        self.in_flight = None;
        self.session.status = SessionStatus::Success;
        self.session.report = Some(report);
        self.session.error_message = None;
        Completion::Applied
    }

    /// `Loading` + failure for the current ticket → `Error`.
    ///
    /// The failure detail is logged; the session only ever carries
    /// [`FETCH_FAILED_MESSAGE`].
    pub fn data_failed(&mut self, ticket: &SearchTicket, err: &DataSourceError) -> Completion {
        if !self.is_current(ticket) {
            tracing::debug!(
                generation = ticket.generation,
                term = %ticket.term,
                error = %err,
                "discarding stale failure"
            );
            return Completion::Stale;
        }

        tracing::warn!(
            generation = ticket.generation,
            term = %ticket.term,
            error = %err,
            "report fetch failed"
        );
        self.in_flight = None;
        self.session.status = SessionStatus::Error;
        self.session.report = None;
        self.session.error_message = Some(FETCH_FAILED_MESSAGE.to_string());
        Completion::Applied
    }

    /// Return to `Idle`, keeping the search-box text.
    ///
    /// From `Loading` the in-flight request is abandoned and its completion
    /// will be reported as stale. From `Idle` this is a no-op.
    pub fn reset(&mut self) {
        if self.session.status == SessionStatus::Idle {
            return;
        }
        if let Some(abandoned) = self.in_flight.take() {
            tracing::debug!(generation = abandoned, "reset abandons in-flight request");
        }
        self.session.status = SessionStatus::Idle;
        self.session.report = None;
        self.session.error_message = None;
        self.session.filter = FilterSelection::default();
    }

    /// Select a country (empty for all). Always clears the state selection.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::NoReport`] unless the session is in `Success`.
    pub fn select_country(&mut self, country: impl Into<String>) -> Result<(), SessionError> {
        self.require_report()?;
        self.session.filter.country = country.into();
        self.session.filter.state.clear();
        Ok(())
    }

    /// Select a state (empty for all) within the selected US country.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::NoReport`] unless the session is in `Success`,
    /// or [`SessionError::StateRequiresUsCountry`] when `state` is non-empty
    /// and the selected country is not a US designator.
    pub fn select_state(&mut self, state: impl Into<String>) -> Result<(), SessionError> {
        self.require_report()?;
        let state = state.into();
        if !state.is_empty() && !is_us_designator(&self.session.filter.country) {
            return Err(SessionError::StateRequiresUsCountry {
                country: self.session.filter.country.clone(),
            });
        }
        self.session.filter.state = state;
        Ok(())
    }

    /// Replace the whole selection at once, validating before any change.
    ///
    /// # Errors
    ///
    /// Same as [`Self::select_country`] and [`Self::select_state`].
    pub fn apply_filter(&mut self, selection: FilterSelection) -> Result<(), SessionError> {
        self.require_report()?;
        if !selection.state.is_empty() && !is_us_designator(&selection.country) {
            return Err(SessionError::StateRequiresUsCountry {
                country: selection.country,
            });
        }
        self.session.filter = selection;
        Ok(())
    }

    /// Clear both country and state.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::NoReport`] unless the session is in `Success`.
    pub fn clear_filters(&mut self) -> Result<(), SessionError> {
        self.require_report()?;
        self.session.filter = FilterSelection::default();
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Derived views
    // -------------------------------------------------------------------------

    #[must_use]
    pub fn countries(&self) -> Vec<String> {
        list_countries(self.session.report.as_ref())
    }

    #[must_use]
    pub fn us_states(&self) -> Vec<String> {
        list_us_states(self.session.report.as_ref(), &self.session.filter.country)
    }

    #[must_use]
    pub fn filtered_sites(&self) -> Vec<&ManufacturingSite> {
        filter_sites(self.session.report.as_ref(), &self.session.filter)
    }

    #[must_use]
    pub fn type_counts(&self) -> Vec<LabelCount> {
        type_counts(self.filtered_sites())
    }

    #[must_use]
    pub fn status_counts(&self) -> Vec<LabelCount> {
        status_counts(self.filtered_sites())
    }

    fn is_current(&self, ticket: &SearchTicket) -> bool {
        self.session.status == SessionStatus::Loading && self.in_flight == Some(ticket.generation)
    }

    fn require_report(&self) -> Result<(), SessionError> {
        if self.session.status == SessionStatus::Success {
            Ok(())
        } else {
            Err(SessionError::NoReport(self.session.status))
        }
    }
}

/// Fetch the report for `ticket` from `source`.
///
/// Runs outside any lock on the view model; pass the result to
/// [`ReportViewModel::complete`].
///
/// # Errors
///
/// Propagates the [`DataSourceError`] from `source`.
pub async fn fetch_for_ticket(
    source: &dyn DataSource,
    ticket: &SearchTicket,
) -> Result<DrugReport, DataSourceError> {
    source.fetch_report(ticket.term()).await
}

#[cfg(test)]
#[path = "session_test.rs"]
mod tests;
