//! HTTP routing layer.
//!
//! Thin by design: each handler parses inputs, calls one resolver
//! operation, and serializes the result as JSON. All query semantics
//! live in the resolver.

use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::json;
use streambox_core::{Error, Video};

use crate::resolver::details::DetailsPayload;
use crate::resolver::streams::StreamsPayload;
use crate::resolver::{DEFAULT_SEARCH_COUNT, DEFAULT_TRENDING_COUNT, Resolver};

/// Shared handler state: the resolver with its injected cache handle
/// and live source.
#[derive(Clone)]
pub struct AppState {
    pub resolver: Arc<Resolver>,
}

/// Resolver error mapped onto an HTTP response.
pub struct ApiError(Error);

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self.0 {
            Error::InvalidInput(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            Error::Database(_) | Error::MigrationFailed(_) => {
                tracing::error!("store failure: {}", self.0);
                (StatusCode::INTERNAL_SERVER_ERROR, "internal server error".to_string())
            }
        };

        (status, Json(json!({ "message": message }))).into_response()
    }
}

/// Common pagination query parameters.
#[derive(Debug, Default, Deserialize)]
pub struct PageQuery {
    pub page: Option<u32>,
    pub count: Option<u32>,
}

/// Body for the details/streams POST routes.
#[derive(Debug, Deserialize)]
pub struct IdPayload {
    #[serde(default)]
    pub id: Option<String>,
}

fn clamp(value: Option<u32>, default: usize) -> usize {
    value.map(|v| v as usize).filter(|v| *v >= 1).unwrap_or(default)
}

/// Build the application router.
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/api/trending", get(trending))
        .route("/api/search/:query", get(search))
        .route("/api/categories", get(categories))
        .route("/api/category/:genre/:page", get(category))
        .route("/api/details", post(details))
        .route("/api/streams", post(streams))
        .fallback(not_found)
        .with_state(state)
}

async fn root() -> impl IntoResponse {
    Json(json!({
        "message": "streambox is running",
        "endpoints": {
            "trending": "/api/trending",
            "search": "/api/search/:query",
            "categories": "/api/categories",
            "category": "/api/category/:genre/:page",
            "details": "/api/details",
            "streams": "/api/streams",
        },
    }))
}

async fn trending(
    State(state): State<AppState>, Query(params): Query<PageQuery>,
) -> Result<Json<Vec<Video>>, ApiError> {
    let page = clamp(params.page, 1);
    let count = clamp(params.count, DEFAULT_TRENDING_COUNT);
    let videos = state.resolver.trending(page, count).await?;
    Ok(Json(videos))
}

async fn search(
    State(state): State<AppState>, Path(query): Path<String>, Query(params): Query<PageQuery>,
) -> Result<Json<Vec<Video>>, ApiError> {
    let page = clamp(params.page, 1);
    let count = clamp(params.count, DEFAULT_SEARCH_COUNT);
    let videos = state.resolver.search(&query, page, count).await?;
    Ok(Json(videos))
}

async fn categories() -> impl IntoResponse {
    Json(json!({ "categories": [] }))
}

async fn category(
    State(state): State<AppState>, Path((genre, _page)): Path<(String, String)>,
) -> Result<Json<Vec<Video>>, ApiError> {
    let videos = state.resolver.category(&genre).await?;
    Ok(Json(videos))
}

async fn details(
    State(state): State<AppState>, Json(payload): Json<IdPayload>,
) -> Result<Json<DetailsPayload>, ApiError> {
    let id = payload.id.unwrap_or_default();
    let details = state.resolver.details(&id).await?;
    Ok(Json(details))
}

async fn streams(
    State(state): State<AppState>, Json(payload): Json<IdPayload>,
) -> Result<Json<StreamsPayload>, ApiError> {
    let id = payload.id.unwrap_or_default();
    let streams = state.resolver.streams(&id).await?;
    Ok(Json(streams))
}

async fn not_found() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, Json(json!({ "error": "route not found" })))
}
