//! Web server for the calls history interface
#![forbid(unsafe_code)]

#[cfg(not(target_arch = "wasm32"))]
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    use calls_web::build_app;
    use std::net::{IpAddr, SocketAddr};
    use tracing::{info, warn};

    // Get configuration, falling back to defaults
    let loaded = calls_core::Config::load();
    let config = loaded.as_ref().map_or_else(|_| calls_core::Config::default(), Clone::clone);

    calls_core::init_logging(&config.logging)?;
    if let Err(e) = &loaded {
        warn!("Failed to load config: {}, using defaults", e);
    }

    // Build the application with configuration
    let app = build_app(config.clone())?;

    // Use configuration for web server address
    let host: IpAddr = config
        .webserver
        .host
        .parse()
        .map_err(|e| format!("Invalid web server host '{}': {}", config.webserver.host, e))?;
    let addr = SocketAddr::new(host, config.webserver.port);

    info!(
        upstream = %config.api.graphql_url,
        static_dir = %config.webserver.static_dir.display(),
        "Starting calls history web server on {}",
        addr
    );

    // Start the server
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app.into_make_service()).await?;

    Ok(())
}

#[cfg(target_arch = "wasm32")]
fn main() {
    calls_web::mount();
}
