use axum::{routing::get, Router};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub mod handlers;
pub mod state;

pub use state::AppState;

pub fn create_app(state: AppState) -> Router {
    let cors = CorsLayer::permissive();

    Router::new()
        .route("/search", get(handlers::search))
        .route("/api/search", get(handlers::search))
        .route("/api/sources", get(handlers::list_sources))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(Arc::new(state))
}

pub mod prelude {
    pub use crate::AppState;
    pub use na_core::{Article, Error, Result, SearchResponse};
}
