//! Web server setup and configuration

use crate::{routes::build_routes, state::AppState};
use axum::Router;
use calls_core::{Config, Result};
use std::sync::Arc;

/// Build the complete web application with all routes and state
///
/// # Errors
///
/// Returns an error if the application state cannot be built.
pub fn build_app(config: Config) -> Result<Router> {
    let static_dir = config.webserver.static_dir.clone();
    let state = Arc::new(AppState::new(config)?);

    Ok(build_routes(&static_dir).with_state(state))
}
