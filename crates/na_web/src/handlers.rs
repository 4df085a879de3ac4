use axum::{
    extract::{rejection::QueryRejection, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use na_core::{SearchParams, SearchResponse};
use na_sources::service::elapsed_ms;
use std::sync::Arc;
use std::time::Instant;
use tracing::warn;

use crate::AppState;

pub async fn search(
    State(state): State<Arc<AppState>>,
    params: Result<Query<SearchParams>, QueryRejection>,
) -> impl IntoResponse {
    let started = Instant::now();

    let Query(params) = match params {
        Ok(params) => params,
        Err(rejection) => {
            warn!(error = %rejection, "unreadable query string");
            return (
                StatusCode::BAD_REQUEST,
                Json(SearchResponse::rejected(rejection.body_text(), elapsed_ms(started))),
            );
        }
    };

    let query = match params.sanitize() {
        Ok(query) => query,
        Err(e) => {
            warn!(keyword = ?params.keyword, error = %e, "rejected search");
            let message = match e {
                na_core::Error::InvalidQuery(message) => message,
                other => other.to_string(),
            };
            return (
                StatusCode::BAD_REQUEST,
                Json(SearchResponse::rejected(message, elapsed_ms(started))),
            );
        }
    };

    (StatusCode::OK, Json(state.search.search(&query, started).await))
}

pub async fn list_sources(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(state.search.source_names())
}
