//! Route registration for the calculator

use axum::Router;
use axum::routing::post;
use http::StatusCode;

use super::handlers;

/// Build the router with all seven `POST /v1/<op>` routes.
///
/// Unknown paths and known paths hit with another method both answer 404.
pub fn router() -> Router {
    Router::new()
        .route("/v1/add", post(handlers::add))
        .route("/v1/subtract", post(handlers::subtract))
        .route("/v1/multiply", post(handlers::multiply))
        .route("/v1/divide", post(handlers::divide))
        .route("/v1/power", post(handlers::power))
        .route("/v1/sqrt", post(handlers::sqrt))
        .route("/v1/percentage", post(handlers::percentage))
        .method_not_allowed_fallback(not_found)
        .fallback(not_found)
}

async fn not_found() -> StatusCode {
    StatusCode::NOT_FOUND
}
