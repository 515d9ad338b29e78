//! GraphQL proxy and health handlers

use crate::state::AppState;
use calls_core::config::ListingConfig;
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use std::sync::Arc;
use tracing::{debug, error};

/// Forward a GraphQL request body to the upstream API
///
/// The upstream status and JSON body are passed through unchanged. When the
/// upstream cannot be reached the client gets a GraphQL-shaped error with
/// `502 Bad Gateway`.
pub async fn graphql_proxy(
    State(state): State<Arc<AppState>>,
    Json(body): Json<serde_json::Value>,
) -> Response {
    match state.api_client.forward(&body).await {
        Ok((status, payload)) => {
            debug!(status, "Proxied GraphQL request");
            let status = StatusCode::from_u16(status).unwrap_or(StatusCode::BAD_GATEWAY);
            (status, Json(payload)).into_response()
        }
        Err(e) => {
            error!("Failed to proxy GraphQL request: {}", e);
            (
                StatusCode::BAD_GATEWAY,
                Json(serde_json::json!({
                    "data": null,
                    "errors": [{ "message": format!("Upstream GraphQL API unavailable: {e}") }]
                })),
            )
                .into_response()
        }
    }
}

/// Listing section of the configuration, read by the browser at startup
pub async fn listing_config(State(state): State<Arc<AppState>>) -> Json<ListingConfig> {
    Json(state.config.listing.clone())
}

/// Health check endpoint
pub async fn health_check() -> &'static str {
    "OK"
}
