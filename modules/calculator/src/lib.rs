//! Calculator module
//!
//! Seven arithmetic operations exposed over HTTP/JSON:
//! - [`domain`]: the pure arithmetic engine and its domain errors
//! - [`api::rest`]: the decode -> compute -> encode request pipeline,
//!   route table and `OpenAPI` document
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod api;
pub mod domain;

pub use api::rest::openapi::ApiDoc;
pub use api::rest::routes::router;
pub use domain::{DomainError, Operation};
