//! Calls history web interface
//!
//! Browser front-end listing call records page by page, plus the server that
//! ships it and proxies GraphQL requests to the upstream API.

#![forbid(unsafe_code)]
#![warn(
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    missing_docs,
    rust_2018_idioms
)]

pub mod api_client;
pub mod app;
pub mod components;
pub mod pages;

#[cfg(not(target_arch = "wasm32"))]
pub mod handlers;
#[cfg(not(target_arch = "wasm32"))]
pub mod routes;
#[cfg(not(target_arch = "wasm32"))]
pub mod server;
#[cfg(not(target_arch = "wasm32"))]
pub mod state;

// Re-export the main functions
pub use app::{App, mount};
#[cfg(not(target_arch = "wasm32"))]
pub use server::build_app;
#[cfg(not(target_arch = "wasm32"))]
pub use state::AppState;
