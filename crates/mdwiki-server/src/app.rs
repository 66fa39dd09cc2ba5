//! Router construction.
//!
//! Builds the axum router with all routes and middleware.

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use axum::http::StatusCode;
use axum::routing::{get, post};
use tower::ServiceBuilder;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::middleware::security;
use crate::state::AppState;

/// Create the application router.
///
/// Methods not listed for a route answer 405; paths not listed answer 404.
///
/// # Arguments
///
/// * `state` - Shared application state
/// * `request_timeout` - Upper bound on the time spent serving one request
pub fn create_router(state: Arc<AppState>, request_timeout: Duration) -> Router {
    let wiki_routes = Router::new()
        .route("/", get(handlers::index::get_index))
        .route(
            "/page/{*path}",
            get(handlers::pages::get_page).post(handlers::pages::post_page),
        )
        .route(
            "/new",
            get(handlers::new::get_form).post(handlers::new::create_page),
        )
        .route("/delete/{*name}", post(handlers::delete::delete_page))
        .route("/refresh", post(handlers::refresh::refresh));

    wiki_routes
        .fallback(handlers::not_found)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(TimeoutLayer::with_status_code(
                    StatusCode::REQUEST_TIMEOUT,
                    request_timeout,
                ))
                .layer(security::csp_layer())
                .layer(security::content_type_options_layer())
                .layer(security::frame_options_layer()),
        )
        .with_state(state)
}
