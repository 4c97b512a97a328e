//! REST transport for the calculator
//!
//! Every route runs the same pipeline: decode the body, convert operands to
//! `f64`, invoke the engine, encode a result or an error envelope.

pub mod dto;
pub mod error;
pub mod handlers;
pub mod openapi;
pub mod operand;
pub mod pipeline;
pub mod routes;
