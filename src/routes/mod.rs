//! HTTP route handlers.
//!
//! Only `/recommendation` is routed; anything else falls through to axum's
//! default 404. Every request runs inside the request-ID middleware span.

pub mod recommendation;

use axum::{middleware, routing::get, Router};
use http::header::{HeaderValue, CACHE_CONTROL};
use tower_http::set_header::SetResponseHeaderLayer;

use crate::config::CACHE_CONTROL_RECOMMENDATION;
use crate::middleware::request_id_layer;
use crate::state::AppState;

/// Creates the Axum router with the recommendation route.
pub fn create_router(state: AppState) -> Router {
    // Each response is a fresh draw, never reuse it
    let recommendation_routes = Router::new()
        .route("/recommendation", get(recommendation::recommend))
        .layer(SetResponseHeaderLayer::if_not_present(
            CACHE_CONTROL,
            HeaderValue::from_static(CACHE_CONTROL_RECOMMENDATION),
        ));

    Router::new()
        .merge(recommendation_routes)
        .with_state(state)
        .layer(middleware::from_fn(request_id_layer))
}
