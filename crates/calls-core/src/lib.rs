//! Core types, pagination and list view logic for the calls history

#![forbid(unsafe_code)]
#![warn(
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    missing_docs,
    rust_2018_idioms
)]

pub mod config;
pub mod display;
pub mod error;
pub mod graphql;
pub mod listing;
pub mod pagination;
pub mod routes;
pub mod source;
pub mod types;
pub mod utils;

#[cfg(any(test, feature = "test-fixtures"))]
pub mod fixtures;

// Re-export commonly used types
pub use config::Config;
pub use error::{Error, Result};
pub use listing::{CallListView, DayGroup, LoadRequest, LoadState};
pub use source::CallsSource;
pub use types::{CallRecord, CallType, Direction, PageResult};

/// Initialize the logging system
///
/// `RUST_LOG` takes precedence over the configured level.
///
/// # Errors
///
/// Returns an error if a global subscriber is already installed.
#[cfg(not(target_arch = "wasm32"))]
pub fn init_logging(logging: &config::LoggingConfig) -> Result<()> {
    use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.level));
    let registry = tracing_subscriber::registry().with(filter);

    let installed = if logging.format.eq_ignore_ascii_case("json") {
        registry.with(tracing_subscriber::fmt::layer().json()).try_init()
    } else {
        registry.with(tracing_subscriber::fmt::layer()).try_init()
    };

    installed.map_err(|e| Error::configuration(format!("failed to initialize logging: {e}")))
}
