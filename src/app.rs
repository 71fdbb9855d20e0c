use crate::AppState;
use crate::features;
use axum::Router;
use http::StatusCode;
use std::path::Path;
use std::time::Duration;
use tower::ServiceBuilder;
use tower_http::services::ServeDir;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

/// Composes the feature routers under `/api`, wraps them in tracing and a
/// per-request timeout, and optionally serves the built client as fallback.
pub fn create_app(
    state: AppState,
    request_timeout: Duration,
    frontend_path: Option<&Path>,
) -> Router {
    // api router, where features are composed
    let api_router = Router::new().merge(features::entries::entries_router());

    let mut app = Router::new().nest("/api", api_router);

    if let Some(frontend_path) = frontend_path {
        app = app.fallback_service(ServeDir::new(frontend_path));
    }

    app.layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(TimeoutLayer::with_status_code(
                StatusCode::REQUEST_TIMEOUT,
                request_timeout,
            )),
    )
    .with_state(state)
}
