mod session;

use std::sync::Arc;

use axum::{
    http::{header, HeaderName, Method, StatusCode},
    response::IntoResponse,
    routing::{get, post, put},
    Extension, Json, Router,
};
use chrono::{DateTime, Utc};
use pharmatrack_core::{
    fetch_for_ticket, Completion, DataSource, ReportViewModel, SearchTicket, SessionError,
    SUGGESTED_DRUGS,
};
use serde::Serialize;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::middleware::{request_id, RequestId, REQUEST_ID_HEADER};

/// Shared server state: the one search session and the report source.
///
/// The view model sits behind an async mutex that is never held across the
/// upstream fetch.
#[derive(Clone)]
pub struct AppState {
    pub vm: Arc<Mutex<ReportViewModel>>,
    pub source: Arc<dyn DataSource>,
}

impl AppState {
    pub fn new(source: Arc<dyn DataSource>) -> Self {
        Self {
            vm: Arc::new(Mutex::new(ReportViewModel::new())),
            source,
        }
    }

    /// Runs the fetch for `ticket` in the background and applies the result.
    pub(crate) fn spawn_fetch(&self, ticket: SearchTicket) -> JoinHandle<Completion> {
        let vm = Arc::clone(&self.vm);
        let source = Arc::clone(&self.source);
        tokio::spawn(async move {
            let outcome = fetch_for_ticket(source.as_ref(), &ticket).await;
            vm.lock().await.complete(&ticket, outcome)
        })
    }
}

#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub data: T,
    pub meta: ResponseMeta,
}

#[derive(Debug, Serialize)]
pub struct ResponseMeta {
    pub request_id: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct ApiError {
    pub error: ErrorBody,
    pub meta: ResponseMeta,
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
struct HealthData {
    status: &'static str,
}

impl ResponseMeta {
    pub(super) fn new(request_id: String) -> Self {
        Self {
            request_id,
            timestamp: Utc::now(),
        }
    }
}

impl<T: Serialize> ApiResponse<T> {
    pub(super) fn new(request_id: String, data: T) -> Self {
        Self {
            data,
            meta: ResponseMeta::new(request_id),
        }
    }
}

impl ApiError {
    pub fn new(
        request_id: impl Into<String>,
        code: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            error: ErrorBody {
                code: code.into(),
                message: message.into(),
            },
            meta: ResponseMeta::new(request_id.into()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status = match self.error.code.as_str() {
            "not_found" => StatusCode::NOT_FOUND,
            "bad_request" | "validation_error" => StatusCode::BAD_REQUEST,
            "conflict" => StatusCode::CONFLICT,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, Json(self)).into_response()
    }
}

/// Rejected session transitions: bad input is a validation error, acting on
/// a session without a report is a conflict.
pub(super) fn map_session_error(request_id: String, error: &SessionError) -> ApiError {
    let code = match error {
        SessionError::EmptySearchTerm | SessionError::StateRequiresUsCountry { .. } => {
            "validation_error"
        }
        SessionError::NoReport(_) => "conflict",
    };
    tracing::debug!(error = %error, code, "session transition rejected");
    ApiError::new(request_id, code, error.to_string())
}

fn build_cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE, HeaderName::from_static(REQUEST_ID_HEADER)])
}

pub fn build_app(state: AppState) -> Router {
    Router::new()
        .route("/api/v1/health", get(health))
        .route("/api/v1/suggestions", get(suggestions))
        .route("/api/v1/session", get(session::get_session))
        .route("/api/v1/session/term", put(session::set_term))
        .route("/api/v1/session/search", post(session::submit_search))
        .route(
            "/api/v1/session/filter",
            put(session::apply_filter).delete(session::clear_filters),
        )
        .route("/api/v1/session/reset", post(session::reset_session))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(build_cors())
                .layer(axum::middleware::from_fn(request_id)),
        )
        .with_state(state)
}

async fn health(Extension(req_id): Extension<RequestId>) -> impl IntoResponse {
    Json(ApiResponse::new(req_id.0, HealthData { status: "ok" }))
}

async fn suggestions(Extension(req_id): Extension<RequestId>) -> impl IntoResponse {
    Json(ApiResponse::new(req_id.0, SUGGESTED_DRUGS.to_vec()))
}
