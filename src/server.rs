// Gini Index Dashboard - Web API
// JSON endpoints over a shared, read-only Dashboard plus the single HTML page

use crate::dashboard::{Dashboard, DashboardView};
use crate::dataset::IncomeRecord;
use crate::difference::DifferenceRecord;
use crate::error::DashboardError;
use crate::theme::ColorTheme;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Json, Response},
    routing::get,
    Router,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::CorsLayer;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub dashboard: Arc<Dashboard>,
    pub loaded_at: DateTime<Utc>,
}

impl AppState {
    pub fn new(dashboard: Dashboard) -> Self {
        Self {
            dashboard: Arc::new(dashboard),
            loaded_at: Utc::now(),
        }
    }
}

/// API Response wrapper
#[derive(Serialize)]
pub struct ApiResponse<T> {
    success: bool,
    data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl<T> ApiResponse<T> {
    fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    fn err(message: String) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message),
        }
    }
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
    records: usize,
    years: usize,
    loaded_at: DateTime<Utc>,
}

#[derive(Serialize)]
struct SliceResponse {
    year: i32,
    max_index: f64,
    records: Vec<IncomeRecord>,
}

#[derive(Serialize)]
struct DifferencesResponse {
    year: i32,
    previous_year: i32,
    records: Vec<DifferenceRecord>,
}

#[derive(Deserialize)]
struct ThemeQuery {
    theme: Option<String>,
}

/// Error body with the status it maps to
fn failure(err: DashboardError) -> Response {
    let status = match &err {
        DashboardError::EmptySelection { .. } => StatusCode::NOT_FOUND,
        DashboardError::UnknownTheme { .. } => StatusCode::BAD_REQUEST,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    };
    log::warn!("Request failed ({}): {}", status, err);
    (status, Json(ApiResponse::<()>::err(err.to_string()))).into_response()
}

fn require_year(dashboard: &Dashboard, year: i32) -> Result<(), DashboardError> {
    if dashboard.table().has_year(year) {
        Ok(())
    } else {
        Err(DashboardError::EmptySelection { year })
    }
}

// ============================================================================
// API Handlers
// ============================================================================

/// GET /api/health - Health check
async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    let dashboard = &state.dashboard;
    Json(ApiResponse::ok(HealthResponse {
        status: "OK",
        version: crate::VERSION,
        records: dashboard.table().len(),
        years: dashboard.years().len(),
        loaded_at: state.loaded_at,
    }))
}

/// GET /api/years - Selectable years, latest first
async fn get_years(State(state): State<AppState>) -> impl IntoResponse {
    Json(ApiResponse::ok(state.dashboard.years().to_vec()))
}

/// GET /api/themes - Palette names in selector order
async fn get_themes() -> impl IntoResponse {
    Json(ApiResponse::ok(ColorTheme::ALL.to_vec()))
}

/// GET /api/slice/:year - Ranked records for one year
async fn get_slice(State(state): State<AppState>, Path(year): Path<i32>) -> Response {
    if let Err(e) = require_year(&state.dashboard, year) {
        return failure(e);
    }

    let records = state.dashboard.ranked(year);
    let max_index = crate::max_gini(&records).unwrap_or(0.0);

    Json(ApiResponse::ok(SliceResponse {
        year,
        max_index,
        records,
    }))
    .into_response()
}

/// GET /api/differences/:year - Year-over-year changes, gains first
async fn get_differences(State(state): State<AppState>, Path(year): Path<i32>) -> Response {
    if let Err(e) = require_year(&state.dashboard, year) {
        return failure(e);
    }

    Json(ApiResponse::ok(DifferencesResponse {
        year,
        previous_year: year.saturating_sub(1),
        records: state.dashboard.differences(year),
    }))
    .into_response()
}

/// GET /api/dashboard/:year?theme=NAME - Everything the page renders
async fn get_dashboard(
    State(state): State<AppState>,
    Path(year): Path<i32>,
    Query(query): Query<ThemeQuery>,
) -> Response {
    let theme = match query.theme.as_deref().map(str::parse::<ColorTheme>) {
        None => ColorTheme::default(),
        Some(Ok(theme)) => theme,
        Some(Err(e)) => return failure(e),
    };

    let view: Result<DashboardView, DashboardError> = state.dashboard.view(year, theme);
    match view {
        Ok(view) => Json(ApiResponse::ok(view)).into_response(),
        Err(e) => failure(e),
    }
}

/// GET / - Serve index.html
async fn serve_index() -> impl IntoResponse {
    Html(include_str!("../web/index.html"))
}

// ============================================================================
// Router
// ============================================================================

pub fn router(state: AppState) -> Router {
    let api_routes = Router::new()
        .route("/health", get(health_check))
        .route("/years", get(get_years))
        .route("/themes", get(get_themes))
        .route("/slice/:year", get(get_slice))
        .route("/differences/:year", get(get_differences))
        .route("/dashboard/:year", get(get_dashboard))
        .with_state(state);

    Router::new()
        .route("/", get(serve_index))
        .nest("/api", api_routes)
        .layer(CorsLayer::permissive())
}
