//! Routing module for the storefront application

use crate::state::SharedState;
use axum::{body::Body, extract::Request, middleware::Next, response::Response, Router};
use tower_http::cors::{Any, CorsLayer};
use tracing::{field, info, info_span, warn, Instrument, Span};

/// Creates and configures the application router with all routes and middleware
pub fn create_app_router(state: SharedState) -> Router {
    // Middleware: CORS (Permissive for local dev)
    let cors_layer = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Routes
    Router::new()
        .merge(crate::catalog::routes())
        .merge(crate::cart::routes())
        .merge(crate::checkout::routes())
        .layer(axum::middleware::from_fn(log_request))
        .layer(cors_layer)
        .with_state(state)
}

/// Runs the request inside a `request` span and records its status there.
async fn log_request(req: Request<Body>, next: Next) -> Response {
    let span = info_span!(
        "request",
        method = %req.method(),
        uri = %req.uri(),
        status = field::Empty,
    );

    async move {
        let res = next.run(req).await;
        let status = res.status();
        Span::current().record("status", status.as_u16());

        if status.is_success() {
            info!("request handled");
        } else {
            warn!("request failed");
        }
        res
    }
    .instrument(span)
    .await
}
