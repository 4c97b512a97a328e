//! Domain layer for calculator

pub mod engine;
pub mod error;
pub mod operation;

pub use error::DomainError;
pub use operation::{BinaryFn, BinaryKernel, Kernel, Operation, UnaryFn};
