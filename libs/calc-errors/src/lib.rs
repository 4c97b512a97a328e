//! Error envelope types for the calculator HTTP surface
//!
//! This crate provides pure data types for error responses, with the HTTP
//! framework integration kept behind features:
//! - `ErrorEnvelope`: the `{"error": "..."}` wire shape
//! - `Rejection`: an envelope paired with the status it is sent with
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod envelope;

pub use envelope::{ErrorEnvelope, Rejection, bad_request};
