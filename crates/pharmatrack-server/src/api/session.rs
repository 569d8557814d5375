use axum::{extract::State, http::StatusCode, Extension, Json};
use pharmatrack_core::{FilterSelection, ReportView};
use serde::Deserialize;

use crate::middleware::RequestId;

use super::{map_session_error, ApiError, ApiResponse, AppState};

type ViewResponse = Json<ApiResponse<ReportView>>;

#[derive(Debug, Deserialize)]
pub(super) struct TermRequest {
    #[serde(default)]
    pub term: String,
}

#[derive(Debug, Default, Deserialize)]
pub(super) struct SearchRequest {
    /// Falls back to the stored search-box text when absent.
    #[serde(default)]
    pub term: Option<String>,
}

/// Partial filter update. A new `country` without a `state` clears the state.
#[derive(Debug, Default, Deserialize)]
pub(super) struct FilterRequest {
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
}

impl FilterRequest {
    fn merge_into(self, current: &FilterSelection) -> FilterSelection {
        match self.country {
            Some(country) => FilterSelection {
                country,
                state: self.state.unwrap_or_default(),
            },
            None => FilterSelection {
                country: current.country.clone(),
                state: self.state.unwrap_or_else(|| current.state.clone()),
            },
        }
    }
}

pub(super) async fn get_session(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> ViewResponse {
    let view = state.vm.lock().await.view();
    Json(ApiResponse::new(req_id.0, view))
}

pub(super) async fn set_term(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Json(body): Json<TermRequest>,
) -> ViewResponse {
    let mut vm = state.vm.lock().await;
    vm.set_search_term(body.term);
    Json(ApiResponse::new(req_id.0, vm.view()))
}

pub(super) async fn submit_search(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Json(body): Json<SearchRequest>,
) -> Result<(StatusCode, ViewResponse), ApiError> {
    let (ticket, view) = {
        let mut vm = state.vm.lock().await;
        let ticket = match body.term.as_deref() {
            Some(term) => vm.submit(term),
            None => vm.submit_current(),
        }
        .map_err(|e| map_session_error(req_id.0.clone(), &e))?;
        (ticket, vm.view())
    };

    tracing::info!(
        request_id = %req_id.0,
        generation = ticket.generation(),
        drug = ticket.term(),
        "dispatching report fetch"
    );
    // Detached: the completion lands in the view model, not in this response.
    drop(state.spawn_fetch(ticket));

    Ok((StatusCode::ACCEPTED, Json(ApiResponse::new(req_id.0, view))))
}

pub(super) async fn apply_filter(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Json(body): Json<FilterRequest>,
) -> Result<ViewResponse, ApiError> {
    let mut vm = state.vm.lock().await;
    let selection = body.merge_into(&vm.session().filter);
    vm.apply_filter(selection)
        .map_err(|e| map_session_error(req_id.0.clone(), &e))?;
    Ok(Json(ApiResponse::new(req_id.0, vm.view())))
}

pub(super) async fn clear_filters(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> Result<ViewResponse, ApiError> {
    let mut vm = state.vm.lock().await;
    vm.clear_filters()
        .map_err(|e| map_session_error(req_id.0.clone(), &e))?;
    Ok(Json(ApiResponse::new(req_id.0, vm.view())))
}

pub(super) async fn reset_session(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> ViewResponse {
    let mut vm = state.vm.lock().await;
    vm.reset();
    Json(ApiResponse::new(req_id.0, vm.view()))
}
