//! `OpenAPI` document for the calculator routes.

use calc_errors::ErrorEnvelope;
use utoipa::OpenApi;

use super::dto::{BinaryOperands, ResultEnvelope, UnaryOperands};
use super::handlers;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Calculator API",
        version = "1.0",
        description = "A REST API service that provides calculator operations"
    ),
    paths(
        handlers::add,
        handlers::subtract,
        handlers::multiply,
        handlers::divide,
        handlers::power,
        handlers::sqrt,
        handlers::percentage,
    ),
    components(schemas(BinaryOperands, UnaryOperands, ResultEnvelope, ErrorEnvelope)),
    tags((name = "calculator", description = "Arithmetic operations"))
)]
pub struct ApiDoc;
