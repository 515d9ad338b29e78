//! Application state management

use crate::api_client::ApiClient;
use calls_core::{Config, Result};

/// Application state holding configuration and clients
#[derive(Debug, Clone)]
pub struct AppState {
    /// Application configuration
    pub config: Config,
    /// Client for the upstream GraphQL API
    pub api_client: ApiClient,
}

impl AppState {
    /// Create new application state
    ///
    /// # Errors
    ///
    /// Returns an error if the upstream client cannot be built.
    pub fn new(config: Config) -> Result<Self> {
        let api_client = ApiClient::from_config(&config.api)?;

        Ok(Self { config, api_client })
    }
}
