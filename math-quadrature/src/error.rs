//! Error types for quadrature rule construction and lookup.
//!
//! All errors are deterministic functions of their inputs, so none of them
//! is worth retrying with the same arguments.

use crate::quadrature::Variant;
use thiserror::Error;

/// Errors that can occur while building or looking up quadrature rules.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum QuadratureError {
    /// The rule variant does not define the requested operation
    /// (side rule of a bar, order change of an arbitrary rule, ...).
    #[error("{variant} rule does not support {operation}")]
    UnsupportedOperation {
        /// Variant the operation was requested on
        variant: Variant,
        /// Name of the operation
        operation: &'static str,
    },

    /// No published table exists for the requested order.
    #[error("no {variant} rule of order {order} (maximum supported order is {max_order})")]
    UnsupportedOrder {
        /// Variant that was requested
        variant: Variant,
        /// Requested order
        order: usize,
        /// Highest tabulated order for this variant
        max_order: usize,
    },

    /// Side index outside the topology's side count.
    #[error("side index {index} out of range (topology has {len} sides)")]
    IndexOutOfRange {
        /// Requested side index
        index: usize,
        /// Number of sides
        len: usize,
    },

    /// Newton iteration for a Legendre root did not converge.
    #[error("Legendre root {root} of {points} did not converge in {iterations} iterations")]
    NumericalConvergence {
        /// Requested point count
        points: usize,
        /// Index of the root that failed
        root: usize,
        /// Iterations spent
        iterations: usize,
    },

    /// Point count of zero, or one past the largest rule this crate builds.
    #[error("invalid point count: {points} (must be between 1 and {max})")]
    InvalidPointCount {
        /// The invalid point count, saturated at `usize::MAX`
        points: usize,
        /// Largest accepted point count
        max: usize,
    },

    /// Parametric dimension outside 1..=3.
    #[error("invalid parametric dimension: {dim} (must be 1, 2 or 3)")]
    InvalidDimension {
        /// The invalid dimension
        dim: usize,
    },

    /// Supplied coordinate or weight array has the wrong length.
    #[error("{what} length mismatch: expected {expected}, got {got}")]
    LengthMismatch {
        /// Which array was wrong
        what: &'static str,
        /// Expected length
        expected: usize,
        /// Actual length
        got: usize,
    },

    /// Base rule dimension does not match the element topology.
    #[error("{rule} rule has dimension {rule_dim} but topology {topology} has {topology_dim}")]
    DimensionMismatch {
        /// Name of the base rule
        rule: &'static str,
        /// Base rule parametric dimension
        rule_dim: usize,
        /// Topology name
        topology: String,
        /// Topology parametric dimension
        topology_dim: usize,
    },

    /// Topology name not known to this crate.
    #[error("unknown topology: {name}")]
    UnknownTopology {
        /// The name that was looked up
        name: String,
    },

    /// Topology has no single element rule variant (mixed-shape elements).
    #[error("topology {name} has no element integration rule")]
    NoElementRule {
        /// Topology name
        name: String,
    },
}

/// A specialized `Result` type for quadrature operations.
pub type Result<T> = std::result::Result<T, QuadratureError>;

impl QuadratureError {
    /// Returns `true` for precondition violations that indicate a bug in the
    /// calling code rather than a choice the caller can fall back from.
    ///
    /// This includes `UnsupportedOperation`, `IndexOutOfRange` and
    /// `NumericalConvergence`.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            QuadratureError::UnsupportedOperation { .. }
                | QuadratureError::IndexOutOfRange { .. }
                | QuadratureError::NumericalConvergence { .. }
        )
    }

    /// Returns `true` if the caller may retry with a different order.
    pub fn is_order_error(&self) -> bool {
        matches!(self, QuadratureError::UnsupportedOrder { .. })
    }

    /// Returns `true` if this error came from malformed caller-supplied input.
    ///
    /// This includes `InvalidPointCount`, `InvalidDimension`,
    /// `LengthMismatch` and `DimensionMismatch`.
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            QuadratureError::InvalidPointCount { .. }
                | QuadratureError::InvalidDimension { .. }
                | QuadratureError::LengthMismatch { .. }
                | QuadratureError::DimensionMismatch { .. }
        )
    }
}
