//! Main Leptos application component with routing

use crate::{
    api_client::{ApiClient, fetch_listing_config},
    pages::{calls::CallsListPage, not_found::NotFound},
};
use calls_core::{config::ListingConfig, routes::CALLS};
use leptos::{prelude::*, task::spawn_local};
use leptos_router::{
    StaticSegment,
    components::{A, Route, Router, Routes},
};
use tracing::warn;

/// Path the browser posts GraphQL requests to; the web server proxies it upstream
pub const GRAPHQL_PATH: &str = "/graphql";

/// Path serving the server's `listing` configuration section
pub const LISTING_CONFIG_PATH: &str = "/config/listing";

/// Absolute URL of `path` on the origin that served the page
#[cfg(target_arch = "wasm32")]
fn endpoint(path: &str) -> String {
    let origin = window().location().origin().unwrap_or_default();
    format!("{origin}{path}")
}

#[cfg(not(target_arch = "wasm32"))]
fn endpoint(path: &str) -> String {
    let server = calls_core::config::WebServerConfig::default();
    format!("http://{}:{}{path}", server.host, server.port)
}

/// Main application component
#[component]
pub fn App() -> impl IntoView {
    let listing = RwSignal::new(None::<ListingConfig>);
    spawn_local(async move {
        let config = match fetch_listing_config(&endpoint(LISTING_CONFIG_PATH)).await {
            Ok(config) => config,
            Err(e) => {
                warn!("Failed to load listing config: {}, using defaults", e);
                ListingConfig::default()
            }
        };
        listing.set(Some(config));
    });

    provide_context(ApiClient::new(endpoint(GRAPHQL_PATH)));
    provide_context(listing);

    view! {
        <Router>
            <main class="app">
                <Header />
                <div class="content">
                    <Routes fallback=|| view! { <NotFound /> }>
                        <Route path=StaticSegment("") view=CallsListPage />
                        <Route path=StaticSegment("calls") view=CallsListPage />
                    </Routes>
                </div>
            </main>
        </Router>
    }
}

/// Application header
#[component]
fn Header() -> impl IntoView {
    view! {
        <header class="header">
            <div class="header-content">
                <h1 class="logo">
                    <A href=CALLS>"Calls History"</A>
                </h1>
            </div>
        </header>
    }
}

/// Mount the application onto the document body
pub fn mount() {
    leptos::mount::mount_to_body(App);
}
