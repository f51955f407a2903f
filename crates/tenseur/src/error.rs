//! Error types for tenseur.

use thiserror::Error;

/// Errors that can occur while building views or evaluating expressions.
///
/// Incompatible operand kinds (vector times matrix, static shapes that do
/// not line up) never reach this type: they are rejected at compile time.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TensorError {
    /// Element count mismatch between data and shape.
    #[error("shape mismatch: expected {expected} elements, got {actual}")]
    ShapeMismatch { expected: usize, actual: usize },

    /// Dynamic operand dimensions that the operation cannot combine.
    #[error("dimension mismatch: {left:?} and {right:?}")]
    DimensionMismatch { left: Vec<usize>, right: Vec<usize> },

    /// Index out of bounds.
    #[error("index out of bounds: index {index} is out of range for dimension {dim_size}")]
    IndexOutOfBounds { index: usize, dim_size: usize },

    /// Wrong number of indices provided.
    #[error("wrong number of indices: expected {expected}, got {actual}")]
    WrongNumberOfIndices { expected: usize, actual: usize },

    /// Reduction over a tensor without elements.
    #[error("{op} of an empty tensor is undefined")]
    EmptyReduction { op: &'static str },

    /// Integer division by zero.
    #[error("integer division by zero")]
    DivisionByZero,

    /// Integer result that does not fit the element type.
    #[error("integer overflow in {op}")]
    Overflow { op: &'static str },

    /// The output buffer could not be allocated.
    #[error("failed to allocate a buffer of {len} elements")]
    AllocationFailed { len: usize },

    /// A node was asked for its value while it was still being evaluated.
    #[error("node `{op}` is already being evaluated")]
    EvaluationInProgress { op: &'static str },
}
