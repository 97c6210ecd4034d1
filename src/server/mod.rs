//! HTTP server for placefinder
//!
//! Mounts one location screen and exposes it as a REST API.

pub mod routes;
pub mod state;

use crate::config::Config;
use crate::error::{Error, Result};
use crate::geo::get_geocoder;
use crate::location::{LocationProvider, Provider};
use crate::screen::LocationScreen;
use routes::create_router;
use state::AppState;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

/// Start the HTTP server
///
/// # Arguments
/// * `config` - Server, location and geocoder configuration
///
/// # Returns
/// Never returns unless the server shuts down
pub async fn run(config: Config) -> Result<()> {
    let addr: SocketAddr = config
        .server_addr()
        .parse()
        .map_err(|e| Error::Server(format!("Invalid server address: {}", e)))?;

    let api_key = config.require_api_key()?;
    let geocoder_configured = !api_key.is_empty();
    let provider = Arc::new(Provider::from_config(&config.location)?);
    let geocoder = Arc::new(get_geocoder(&config.geocoder, api_key));
    let provider_name = provider.name();

    let screen = LocationScreen::from_config(provider, geocoder, &config);
    let state = Arc::new(AppState::new(
        screen.handle(),
        provider_name,
        config.geocoder.base_url.clone(),
        geocoder_configured,
    ));
    tokio::spawn(screen.run());

    let app = create_router(state);

    info!("Starting server on {} (location provider: {})", addr, provider_name);

    let listener = TcpListener::bind(addr)
        .await
        .map_err(|e| Error::Server(format!("Failed to bind to {}: {}", addr, e)))?;

    axum::serve(listener, app)
        .await
        .map_err(|e| Error::Server(format!("Server error: {}", e)))?;

    Ok(())
}
