use std::{future, process, sync::Arc};
use storefront::{config::StorefrontConfig, logging, router::create_app_router, state::AppState};
use tokio::signal;
use tracing::{error, info};

#[tokio::main]
async fn main() {
    // Load configuration from .env and CLI arguments
    let config = StorefrontConfig::load().unwrap_or_else(|e| e.exit());

    // Initialize logging
    if let Err(e) = logging::init(&config.log_level, config.log_format) {
        eprintln!("Logging setup failed: {e}");
        process::exit(1);
    }

    // Initialize application state
    let state = match AppState::from_settings(&config.settings()) {
        Ok(state) => Arc::new(state),
        Err(e) => {
            error!("failed to initialize application state: {e}");
            process::exit(1);
        }
    };

    // Drop sessions nobody has used for a while
    state.spawn_session_sweeper();

    // Build application router with all routes and middleware
    let app = create_app_router(state);

    // Configure the server address
    let addr = config.socket_addr();
    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(listener) => listener,
        Err(e) => {
            error!("failed to bind {addr}: {e}");
            process::exit(1);
        }
    };
    info!("Server running on http://{addr}");

    // Start the server
    if let Err(e) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        error!("server error: {e}");
        process::exit(1);
    }
}

/// Resolves on Ctrl+C or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("failed to install Ctrl+C handler: {e}");
            future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                error!("failed to install SIGTERM handler: {e}");
                future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = future::pending::<()>();

    tokio::select! {
        () = ctrl_c => info!("ctrl_c signal received"),
        () = terminate => info!("terminate signal received"),
    }
}
