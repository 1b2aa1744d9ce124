//! HTTP routes over the content façade.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::get,
    Router,
};
use serde::{Deserialize, Serialize};
use tower_http::trace::TraceLayer;

use atelier_content::ContentFacade;
use atelier_core::{ContentTypeId, DetailedContentType, Entry};

pub const CONTENT_TYPES_FAILED: &str = "Failed to fetch content types";

#[derive(Clone)]
pub struct AppState {
    pub facade: ContentFacade,
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/content-types", get(content_types))
        .route("/content-types/:id/entries", get(entries))
        .route("/health", get(health))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentTypesResponse {
    pub success: bool,
    pub content_types: Vec<DetailedContentType>,
}

#[derive(Debug, Serialize)]
pub struct EntriesResponse {
    pub success: bool,
    pub entries: Vec<Entry>,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Debug, Deserialize)]
pub struct EntriesParams {
    pub limit: Option<u32>,
}

/// GET /content-types
pub async fn content_types(State(state): State<AppState>) -> Response {
    match state.facade.detailed_content_types().await {
        Ok(content_types) => Json(ContentTypesResponse {
            success: true,
            content_types,
        })
        .into_response(),
        Err(err) => {
            tracing::error!(error = %err, "content type enrichment failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: CONTENT_TYPES_FAILED.to_string(),
                }),
            )
                .into_response()
        }
    }
}

/// GET /content-types/:id/entries?limit=N
pub async fn entries(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(params): Query<EntriesParams>,
) -> Json<EntriesResponse> {
    let entries = state
        .facade
        .entries_by_type(&ContentTypeId(id), params.limit)
        .await;
    Json(EntriesResponse {
        success: true,
        entries,
    })
}

/// Health check endpoint
pub async fn health() -> impl IntoResponse {
    "OK"
}
