//! Application startup and server initialization.
//!
//! This module handles the creation and configuration of the HTTP server,
//! including initialization of the token service, the store, and route setup.

use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

use crate::auth::TokenService;
use crate::config::ConfigV1;
use crate::routes;
use crate::state::AppState;
use crate::store::create_store;

/// Initializes and runs the application server.
///
/// Sets up the store and token service, then starts the HTTP server with
/// configured routes. Binds to the address specified in the configuration
/// and serves requests until shutdown.
///
/// # Errors
///
/// Returns an error if the server fails to bind to the specified address
/// or encounters a runtime error during execution.
pub async fn run(config: Arc<ConfigV1>) -> Result<(), Box<dyn std::error::Error>> {
    let store = create_store(&config.store).await;
    let tokens = Arc::new(TokenService::new(&config.jwt));

    info!(
        "Starting server in '{}' environment on {}",
        config.environment, config.bind_address
    );

    let state = AppState {
        config: config.clone(),
        tokens,
        store,
    };

    let app = routes::create_router(state);

    let listener = TcpListener::bind(&config.bind_address)
        .await
        .expect("Could not bind to specified address");

    axum::serve(listener, app).await?;

    Ok(())
}
