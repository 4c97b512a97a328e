//! The fixed set of operations and the shape of their kernels.

use super::{DomainError, engine};

/// A fallible two-operand computation.
pub type BinaryFn = fn(f64, f64) -> Result<f64, DomainError>;

/// A fallible one-operand computation.
pub type UnaryFn = fn(f64) -> Result<f64, DomainError>;

/// Two-operand engine function, with or without a domain check.
#[derive(Debug, Clone, Copy)]
pub enum BinaryKernel {
    /// Never fails.
    Total(fn(f64, f64) -> f64),
    /// May raise a domain error.
    Partial(BinaryFn),
}

impl BinaryKernel {
    /// Invoke the function. A total kernel always reports success.
    ///
    /// # Errors
    /// Whatever domain error a partial kernel raises.
    pub fn call(self, a: f64, b: f64) -> Result<f64, DomainError> {
        match self {
            Self::Total(f) => Ok(f(a, b)),
            Self::Partial(f) => f(a, b),
        }
    }
}

/// Tagged choice over the shapes an engine function can have.
#[derive(Debug, Clone, Copy)]
pub enum Kernel {
    Binary(BinaryKernel),
    Unary(UnaryFn),
}

/// The seven operations exposed by the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Add,
    Subtract,
    Multiply,
    Divide,
    Power,
    Sqrt,
    Percentage,
}

impl Operation {
    /// All operations, in route-table order.
    pub const ALL: [Self; 7] = [
        Self::Add,
        Self::Subtract,
        Self::Multiply,
        Self::Divide,
        Self::Power,
        Self::Sqrt,
        Self::Percentage,
    ];

    /// Route segment under the version prefix, e.g. `divide`.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Add => "add",
            Self::Subtract => "subtract",
            Self::Multiply => "multiply",
            Self::Divide => "divide",
            Self::Power => "power",
            Self::Sqrt => "sqrt",
            Self::Percentage => "percentage",
        }
    }

    #[must_use]
    pub fn kernel(self) -> Kernel {
        match self {
            Self::Add => Kernel::Binary(BinaryKernel::Total(engine::add)),
            Self::Subtract => Kernel::Binary(BinaryKernel::Total(engine::subtract)),
            Self::Multiply => Kernel::Binary(BinaryKernel::Total(engine::multiply)),
            Self::Divide => Kernel::Binary(BinaryKernel::Partial(engine::divide)),
            Self::Power => Kernel::Binary(BinaryKernel::Partial(engine::power)),
            Self::Sqrt => Kernel::Unary(engine::sqrt),
            Self::Percentage => Kernel::Binary(BinaryKernel::Partial(engine::percentage)),
        }
    }
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
