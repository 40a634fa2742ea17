//! HTTP route handlers.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use tower_http::cors::CorsLayer;

use crate::giromilano::GiromilanoError;
use crate::parse::{build_line, build_stop};
use crate::records::{LineRecord, StopRecord};
use crate::status::{MetroStatus, parse_metro_status};

use super::state::AppState;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index).fallback(method_not_allowed))
        .route("/health", get(health).fallback(method_not_allowed))
        .route("/lines", get(list_lines).fallback(method_not_allowed))
        .route("/lines/:line_id", get(line_details).fallback(method_not_allowed))
        .route("/stops/:stop_id", get(stop_details).fallback(method_not_allowed))
        .route("/status/metro", get(metro_status).fallback(method_not_allowed))
        .fallback(not_found)
        // Results are meant to be consumed from any frontend origin.
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// API index.
async fn index() -> Json<Value> {
    Json(json!({
        "title": "GiroMilano transit API",
        "description": "Normalized public-transport data for Milan.",
        "endpoints": {
            "metroStatus": {
                "path": "/status/metro",
                "description": "Current status of the metro lines."
            },
            "lines": {
                "path": "/lines",
                "description": "All transit lines."
            },
            "lineDetails": {
                "path": "/lines/{lineId}",
                "description": "One line with its stops and geometry.",
                "queryParameters": {
                    "all": "boolean, default false: include alternative route variants"
                }
            },
            "stopDetails": {
                "path": "/stops/{stopId}",
                "description": "One stop with the lines serving it."
            }
        }
    }))
}

/// List every transit line.
async fn list_lines(State(state): State<AppState>) -> Result<Json<Vec<LineRecord>>, AppError> {
    let patterns = state.giromilano.journey_patterns().await?;

    // Filtered lines (Trenord, Qlines, reserved journey patterns) and
    // malformed entries are absent, not null.
    let lines: Vec<LineRecord> = patterns.iter().filter_map(build_line).collect();

    Ok(Json(lines))
}

/// Query parameters of the line-details endpoint.
#[derive(Debug, Deserialize)]
struct LineDetailsQuery {
    /// Also fetch alternative route variants.
    #[serde(default)]
    all: bool,
}

/// Details of one line, stops and geometry included.
async fn line_details(
    State(state): State<AppState>,
    Path(line_id): Path<String>,
    Query(query): Query<LineDetailsQuery>,
) -> Result<Json<LineRecord>, AppError> {
    let payload = state
        .giromilano
        .journey_pattern(&line_id, query.all)
        .await?;

    build_line(&payload).map(Json).ok_or(AppError::NotFound {
        detail: format!("line {line_id} is unknown or excluded"),
    })
}

/// Details of one stop, serving lines included.
async fn stop_details(
    State(state): State<AppState>,
    Path(stop_id): Path<String>,
) -> Result<Json<StopRecord>, AppError> {
    let payload = state.giromilano.stop_summary(&stop_id).await?;

    build_stop(&payload).map(Json).ok_or(AppError::NotFound {
        detail: format!("stop {stop_id} is unknown or malformed"),
    })
}

/// Scraped metro line status.
async fn metro_status(State(state): State<AppState>) -> Result<Json<MetroStatus>, AppError> {
    let html = state.giromilano.status_page().await?;
    Ok(Json(parse_metro_status(&html)))
}

/// Fallback for unknown paths.
async fn not_found() -> AppError {
    AppError::NotFound {
        detail: "the requested resource does not exist".to_string(),
    }
}

/// Fallback for known paths hit with an unsupported method.
async fn method_not_allowed() -> AppError {
    AppError::MethodNotAllowed {
        detail: "this HTTP method is not allowed for the requested resource".to_string(),
    }
}

/// Application error type, serialized as the fixed error envelope.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Upstream did not answer in time (504 REQUEST_TIMEOUT)
    #[error("gateway timeout: {detail}")]
    GatewayTimeout { detail: String },
    /// Upstream failed or answered garbage (502 BAD_GATEWAY)
    #[error("bad gateway: {detail}")]
    BadGateway { detail: String },
    /// The resource does not exist (404 NOT_FOUND)
    #[error("not found: {detail}")]
    NotFound { detail: String },
    /// The method is not supported on this path (405 METHOD_NOT_ALLOWED)
    #[error("method not allowed: {detail}")]
    MethodNotAllowed { detail: String },
}

impl From<GiromilanoError> for AppError {
    fn from(e: GiromilanoError) -> Self {
        match e {
            GiromilanoError::Timeout => AppError::GatewayTimeout {
                detail: "Request timed out while fetching upstream data".to_string(),
            },
            other => AppError::BadGateway {
                detail: other.to_string(),
            },
        }
    }
}

/// The error envelope every non-200 response carries.
#[derive(Debug, Serialize)]
struct ErrorEnvelope {
    status_code: u16,
    error: &'static str,
    detail: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error, detail) = match self {
            AppError::GatewayTimeout { detail } => {
                (StatusCode::GATEWAY_TIMEOUT, "REQUEST_TIMEOUT", detail)
            }
            AppError::BadGateway { detail } => (StatusCode::BAD_GATEWAY, "BAD_GATEWAY", detail),
            AppError::NotFound { detail } => (StatusCode::NOT_FOUND, "NOT_FOUND", detail),
            AppError::MethodNotAllowed { detail } => {
                (StatusCode::METHOD_NOT_ALLOWED, "METHOD_NOT_ALLOWED", detail)
            }
        };

        tracing::warn!(%status, %detail, "request failed");

        let body = Json(ErrorEnvelope {
            status_code: status.as_u16(),
            error,
            detail,
        });
        (status, body).into_response()
    }
}
