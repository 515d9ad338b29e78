//! Route definitions for the web interface

use crate::{
    app::{GRAPHQL_PATH, LISTING_CONFIG_PATH},
    handlers::api,
    state::AppState,
};
use axum::{
    Router,
    routing::{get, post},
};
use std::{path::Path, sync::Arc};
use tower_http::{
    services::{ServeDir, ServeFile},
    trace::TraceLayer,
};

/// Build the complete web application router
///
/// Anything that is neither an API route nor a file under `static_dir` gets
/// `index.html`, so client-side routes survive a reload.
pub fn build_routes(static_dir: &Path) -> Router<Arc<AppState>> {
    let assets =
        ServeDir::new(static_dir).fallback(ServeFile::new(static_dir.join("index.html")));

    Router::new()
        // GraphQL proxy
        .route(GRAPHQL_PATH, post(api::graphql_proxy))
        // Settings the browser needs before rendering the list
        .route(LISTING_CONFIG_PATH, get(api::listing_config))
        // Health check
        .route("/health", get(api::health_check))
        // Compiled front-end
        .fallback_service(assets)
        .layer(TraceLayer::new_for_http())
}
