//! HTTP route handlers.

use askama::Template;
use axum::body::Bytes;
use axum::{
    Json, Router,
    extract::{Path, Query, State, rejection::QueryRejection},
    http::{StatusCode, Uri},
    response::{Html, IntoResponse},
    routing::{get, post},
};
use chrono::Local;
use serde::de::DeserializeOwned;
use tower_http::services::ServeDir;
use tracing::{debug, info, warn};

use crate::acp;
use crate::domain::{BrevetId, DomainError, MINUTE_FORMAT, format_minute, parse_timestamp};

use super::dto::*;
use super::error::AppError;
use super::state::AppState;
use super::templates::*;

/// Create the application router.
///
/// `static_dir` is the path to the static assets directory.
pub fn create_router(state: AppState, static_dir: &str) -> Router {
    Router::new()
        .route("/", get(index_page))
        .route("/index", get(index_page))
        .route("/health", get(health))
        .route("/_calc_times", get(calc_times))
        .route("/submit", post(submit_brevet))
        .route("/display", get(display_latest))
        .route("/api/brevets", get(list_brevets).post(submit_brevet))
        .route(
            "/api/brevet/:id",
            get(get_brevet).put(update_brevet).delete(delete_brevet),
        )
        .nest_service("/static", ServeDir::new(static_dir))
        .fallback(not_found)
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Calculator page.
async fn index_page() -> impl IntoResponse {
    debug!("main page entry");
    let now = Local::now().format(MINUTE_FORMAT).to_string();
    Html(
        CalcTemplate::new(now)
            .render()
            .unwrap_or_else(|e| format!("Template error: {}", e)),
    )
}

/// HTML page for unknown routes.
async fn not_found(uri: Uri) -> impl IntoResponse {
    debug!(%uri, "page not found");
    let html = NotFoundTemplate {
        path: uri.path().to_string(),
    }
    .render()
    .unwrap_or_else(|e| format!("Template error: {}", e));
    (StatusCode::NOT_FOUND, Html(html))
}

/// Open and close time of a single control.
async fn calc_times(
    query: Result<Query<CalcTimesRequest>, QueryRejection>,
) -> Result<Json<CalcTimesResponse>, AppError> {
    let Query(req) = query.map_err(|e| {
        warn!(error = %e, "invalid calc_times query");
        AppError::BadRequest {
            message: e.body_text(),
        }
    })?;
    debug!(km = req.km, brev_dist = req.brev_dist, start = %req.start_time, "calculating control times");

    let start = parse_timestamp(&req.start_time).map_err(DomainError::from)?;
    let times = acp::control_times(req.km, req.brev_dist, start)?;

    Ok(Json(CalcTimesResponse {
        result: ControlWindow {
            open: format_minute(&times.open),
            close: format_minute(&times.close),
        },
    }))
}

/// Store a new brevet (`/submit` and `POST /api/brevets`).
async fn submit_brevet(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<InsertResponse>, AppError> {
    let req: SubmitBrevetRequest = parse_body(&body)?;
    let brevet = req.into_brevet();
    brevet.validate()?;

    let id = state.backend.insert(brevet).await?;
    info!(%id, "brevet submitted");

    Ok(Json(InsertResponse { id: id.to_string() }))
}

/// The most recently submitted brevet.
async fn display_latest(State(state): State<AppState>) -> Result<Json<BrevetResult>, AppError> {
    state
        .backend
        .latest()
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound {
            message: "no brevets have been submitted".to_string(),
        })
}

async fn list_brevets(State(state): State<AppState>) -> Result<Json<Vec<BrevetResult>>, AppError> {
    Ok(Json(state.backend.list().await?))
}

async fn get_brevet(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<BrevetResult>, AppError> {
    let id = parse_id(&id)?;
    Ok(Json(state.backend.get(id).await?))
}

/// Replace a stored brevet.
async fn update_brevet(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Bytes,
) -> Result<Json<MessageResponse>, AppError> {
    let id = parse_id(&id)?;
    let req: BrevetResult = parse_body(&body)?;
    let brevet = req.into_brevet();
    brevet.validate()?;

    state.backend.update(id, brevet).await?;
    info!(%id, "brevet updated");

    Ok(Json(MessageResponse {
        message: format!("updated brevet {id}"),
    }))
}

async fn delete_brevet(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, AppError> {
    let id = parse_id(&id)?;
    state.backend.delete(id).await?;
    info!(%id, "brevet deleted");

    Ok(Json(MessageResponse {
        message: format!("deleted brevet {id}"),
    }))
}

fn parse_id(raw: &str) -> Result<BrevetId, AppError> {
    Ok(raw.parse::<BrevetId>()?)
}

/// Parse JSON manually so the body can be logged on failure.
fn parse_body<T: DeserializeOwned>(body: &Bytes) -> Result<T, AppError> {
    serde_json::from_slice(body).map_err(|e| {
        warn!(error = %e, body = %String::from_utf8_lossy(body), "invalid JSON body");
        AppError::BadRequest {
            message: format!("Invalid JSON: {e}"),
        }
    })
}
